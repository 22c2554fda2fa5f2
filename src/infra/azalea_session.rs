use anyhow::Result;
use azalea::{
    BlockPos, Client, GameProfileComponent, Vec3,
    blocks::BlockState,
    ecs::prelude::With,
    entity::{LookDirection, Position, metadata::Health, metadata::Player},
    inventory::ItemStack,
    local_player::Hunger,
    physics::collision::BlockWithShape,
};

use crate::{
    model::{BlockCell, BlockKind, InventoryEntry, PlayerSighting, Point3},
    service::{bot_session::BotSession, landing_resolver::CollisionOracle},
};

/// azalea の Client を BotSession として扱う
#[derive(Clone)]
pub struct AzaleaBotSession {
    bot: Client,
}

impl AzaleaBotSession {
    pub fn new(bot: Client) -> Self {
        AzaleaBotSession { bot }
    }
}

fn to_point(v: Vec3) -> Point3 {
    Point3::new(v.x, v.y, v.z)
}

/// 未ロードのチャンクは空気とみなす
pub fn classify_block(state: Option<BlockState>) -> BlockKind {
    match state {
        None => BlockKind::Empty,
        Some(state) if state.is_air() => BlockKind::Empty,
        Some(state) if state.is_collision_shape_empty() => BlockKind::Passable,
        Some(_) => BlockKind::Solid,
    }
}

fn item_name(item: &ItemStack) -> Option<InventoryEntry> {
    match item {
        ItemStack::Present(data) => {
            let kind = data.kind.to_string();
            let name = kind.strip_prefix("minecraft:").unwrap_or(&kind);
            Some(InventoryEntry::new(name, data.count))
        }
        ItemStack::Empty => None,
    }
}

impl CollisionOracle for AzaleaBotSession {
    fn query(&self, cell: BlockCell) -> BlockKind {
        let pos = BlockPos::new(cell.x, cell.y, cell.z);
        let world = self.bot.world();
        let state = world.read().get_block_state(&pos);
        classify_block(state)
    }
}

impl BotSession for AzaleaBotSession {
    fn username(&self) -> String {
        self.bot.username()
    }

    fn chat(&self, message: &str) {
        self.bot.chat(message);
    }

    fn position(&self) -> Result<Point3> {
        let position = self
            .bot
            .get_component::<Position>()
            .ok_or_else(|| anyhow::anyhow!("Position is not known yet"))?;
        Ok(to_point(*position))
    }

    fn health(&self) -> Option<f32> {
        self.bot.get_component::<Health>().map(|health| *health)
    }

    fn food(&self) -> Option<u32> {
        self.bot.get_component::<Hunger>().map(|hunger| hunger.food)
    }

    fn inventory(&self) -> Result<Vec<InventoryEntry>> {
        let menu = self.bot.menu();
        let slots = menu.slots();
        Ok(slots[menu.player_slots_range()]
            .iter()
            .filter_map(item_name)
            .collect())
    }

    fn find_player(&self, username: &str) -> Result<Option<PlayerSighting>> {
        let Some(entity) = self
            .bot
            .entity_by::<With<Player>, &GameProfileComponent>(
                |profile: &&GameProfileComponent| profile.name == username,
            )
        else {
            return Ok(None);
        };

        let position = self
            .bot
            .get_entity_component::<Position>(entity)
            .ok_or_else(|| anyhow::anyhow!("{} has no position", username))?;
        let look = self
            .bot
            .get_entity_component::<LookDirection>(entity)
            .ok_or_else(|| anyhow::anyhow!("{} has no look direction", username))?;

        Ok(Some(PlayerSighting {
            position: to_point(*position),
            yaw: (look.y_rot() as f64).to_radians(),
        }))
    }

    fn set_jumping(&self, jumping: bool) {
        self.bot.set_jumping(jumping);
    }

    fn look_at(&self, target: Point3) {
        self.bot.look_at(Vec3::new(target.x, target.y, target.z));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unloaded_and_air_blocks_are_empty() {
        assert_eq!(classify_block(None), BlockKind::Empty);
        assert_eq!(classify_block(Some(BlockState::AIR)), BlockKind::Empty);
    }

    #[test]
    fn test_flowers_are_passable() {
        let poppy = BlockState::from(azalea::registry::Block::Poppy);
        assert_eq!(classify_block(Some(poppy)), BlockKind::Passable);
    }

    #[test]
    fn test_full_blocks_are_solid() {
        let stone = BlockState::from(azalea::registry::Block::Stone);
        assert_eq!(classify_block(Some(stone)), BlockKind::Solid);
    }
}
