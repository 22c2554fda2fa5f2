use anyhow::Result;
use itertools::Itertools;

use crate::{
    model::{InventoryEntry, Point3},
    service::bot_session::BotSession,
};

/// 0.5 は正の方向に丸める
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn position_message(position: Point3) -> String {
    format!(
        "I am at position X: {}, Y: {}, Z: {}",
        round_half_up(position.x),
        round_half_up(position.y),
        round_half_up(position.z)
    )
}

pub fn inventory_message(items: &[InventoryEntry]) -> String {
    if items.is_empty() {
        return "My inventory is empty".to_string();
    }
    format!("In my inventory: {}", items.iter().join(", "))
}

pub fn announce_position(session: &dyn BotSession) -> Result<()> {
    let position = session.position()?;
    session.chat(&position_message(position));
    Ok(())
}

pub fn list_inventory(session: &dyn BotSession) -> Result<()> {
    let items = session.inventory()?;
    session.chat(&inventory_message(&items));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::bot_session::DummyBotSession;

    #[test]
    fn test_position_message_rounds_like_chat_clients() {
        assert_eq!(
            position_message(Point3::new(10.5, 64.0, -2.5)),
            "I am at position X: 11, Y: 64, Z: -2"
        );
        assert_eq!(
            position_message(Point3::new(-0.3, 63.49, 0.0)),
            "I am at position X: 0, Y: 63, Z: 0"
        );
    }

    #[test]
    fn test_inventory_message() {
        assert_eq!(inventory_message(&[]), "My inventory is empty");
        assert_eq!(
            inventory_message(&[
                InventoryEntry::new("dirt", 3),
                InventoryEntry::new("oak_log", 1),
            ]),
            "In my inventory: 3 dirt, 1 oak_log"
        );
    }

    #[test]
    fn test_announce_position_without_position_fails() {
        let session = DummyBotSession::new("bot");
        assert!(announce_position(&session).is_err());
        assert!(session.chats().is_empty());
    }

    #[test]
    fn test_list_inventory() {
        let session = DummyBotSession::new("bot");
        session.add_item("stone", 64);
        list_inventory(&session).unwrap();
        assert_eq!(session.chats(), vec!["In my inventory: 64 stone"]);
    }
}
