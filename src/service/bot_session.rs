use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use anyhow::Result;

use crate::{
    model::{BlockCell, BlockKind, InventoryEntry, PlayerSighting, Point3},
    service::landing_resolver::CollisionOracle,
};

/// ボットが接続中のクライアントに対して行える操作
pub trait BotSession: CollisionOracle {
    fn username(&self) -> String;
    /// `/` で始まるメッセージはコマンドとして送信される
    fn chat(&self, message: &str);
    fn position(&self) -> Result<Point3>;
    fn health(&self) -> Option<f32>;
    fn food(&self) -> Option<u32>;
    fn inventory(&self) -> Result<Vec<InventoryEntry>>;
    /// 追跡中のプレイヤー。範囲外なら None
    fn find_player(&self, username: &str) -> Result<Option<PlayerSighting>>;
    fn set_jumping(&self, jumping: bool);
    fn look_at(&self, target: Point3);
}

#[derive(Debug, Default)]
struct DummySessionState {
    position: Option<Point3>,
    health: Option<f32>,
    food: Option<u32>,
    inventory: Vec<InventoryEntry>,
    inventory_error: Option<String>,
    players: HashMap<String, PlayerSighting>,
    player_lookup_error: Option<String>,
    blocks: HashMap<BlockCell, BlockKind>,
    unset_block: Option<BlockKind>,
    chats: Vec<String>,
    jumping: Vec<bool>,
    looks: Vec<Point3>,
}

/// 送信したチャットや操作を記録するだけのセッション
#[derive(Clone)]
pub struct DummyBotSession {
    username: String,
    state: Arc<Mutex<DummySessionState>>,
}

impl DummyBotSession {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            state: Arc::new(Mutex::new(DummySessionState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, DummySessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_position(&self, position: Point3) {
        self.state().position = Some(position);
    }

    pub fn set_vitals(&self, health: f32, food: u32) {
        let mut state = self.state();
        state.health = Some(health);
        state.food = Some(food);
    }

    pub fn add_item(&self, name: &str, count: i32) {
        self.state().inventory.push(InventoryEntry::new(name, count));
    }

    pub fn fail_inventory(&self, message: &str) {
        self.state().inventory_error = Some(message.to_string());
    }

    pub fn add_player(&self, username: &str, sighting: PlayerSighting) {
        self.state().players.insert(username.to_string(), sighting);
    }

    pub fn fail_player_lookup(&self, message: &str) {
        self.state().player_lookup_error = Some(message.to_string());
    }

    pub fn remove_player(&self, username: &str) {
        self.state().players.remove(username);
    }

    pub fn set_block(&self, cell: BlockCell, kind: BlockKind) {
        self.state().blocks.insert(cell, kind);
    }

    /// set_block していない座標の種類。既定は Empty
    pub fn fill_unset_blocks(&self, kind: BlockKind) {
        self.state().unset_block = Some(kind);
    }

    pub fn chats(&self) -> Vec<String> {
        self.state().chats.clone()
    }

    pub fn jumping_changes(&self) -> Vec<bool> {
        self.state().jumping.clone()
    }

    pub fn looks(&self) -> Vec<Point3> {
        self.state().looks.clone()
    }
}

impl CollisionOracle for DummyBotSession {
    fn query(&self, cell: BlockCell) -> BlockKind {
        let state = self.state();
        state
            .blocks
            .get(&cell)
            .copied()
            .or(state.unset_block)
            .unwrap_or(BlockKind::Empty)
    }
}

impl BotSession for DummyBotSession {
    fn username(&self) -> String {
        self.username.clone()
    }

    fn chat(&self, message: &str) {
        self.state().chats.push(message.to_string());
    }

    fn position(&self) -> Result<Point3> {
        self.state()
            .position
            .ok_or_else(|| anyhow::anyhow!("Position is not known yet"))
    }

    fn health(&self) -> Option<f32> {
        self.state().health
    }

    fn food(&self) -> Option<u32> {
        self.state().food
    }

    fn inventory(&self) -> Result<Vec<InventoryEntry>> {
        let state = self.state();
        if let Some(message) = &state.inventory_error {
            anyhow::bail!("{}", message);
        }
        Ok(state.inventory.clone())
    }

    fn find_player(&self, username: &str) -> Result<Option<PlayerSighting>> {
        let state = self.state();
        if let Some(message) = &state.player_lookup_error {
            anyhow::bail!("{}", message);
        }
        Ok(state.players.get(username).copied())
    }

    fn set_jumping(&self, jumping: bool) {
        self.state().jumping.push(jumping);
    }

    fn look_at(&self, target: Point3) {
        self.state().looks.push(target);
    }
}
