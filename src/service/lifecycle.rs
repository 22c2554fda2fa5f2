use anyhow::Result;
use tracing::{info, warn};

use crate::{
    config::BotConfig,
    service::{
        bot_session::BotSession,
        scheduler::{DeferredAction, Scheduler},
        status_report,
    },
};

pub const GREETING_MESSAGE: &str = "Hello! I am a bot created with azalea!";
pub const USAGE_MESSAGE: &str = "Type \"come to me\" to teleport me in front of you";

fn log_position(session: &dyn BotSession) {
    match session.position() {
        Ok(position) => info!("Position: {}", position),
        Err(e) => warn!("Position unavailable: {:#}", e),
    }
}

/// クライアント起動直後、ログイン前に呼ばれる
pub fn on_init(session: &dyn BotSession) {
    info!("Bot {} is attempting to connect to the server", session.username());
}

pub fn on_login(session: &dyn BotSession, scheduler: &dyn Scheduler, config: &BotConfig) {
    info!("Bot has logged in to the server!");
    log_position(session);
    match (session.health(), session.food()) {
        (Some(health), Some(food)) => info!("Health: {}, Food: {}", health, food),
        _ => warn!("Health and food are not known yet"),
    }
    // ワールドの読み込みを待ってから挨拶する
    scheduler.schedule(config.greeting_delay, DeferredAction::Greet);
}

pub fn on_spawn(session: &dyn BotSession) {
    info!("Bot spawned in the world");
    log_position(session);
}

pub fn on_disconnect(reason: Option<&str>) {
    match reason {
        Some(reason) => info!("Bot was kicked from the server: {}", reason),
        None => info!("Bot disconnected from the server"),
    }
}

pub fn greet(session: &dyn BotSession) -> Result<()> {
    session.chat(GREETING_MESSAGE);
    session.chat(USAGE_MESSAGE);
    status_report::announce_position(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::Point3,
        service::{bot_session::DummyBotSession, scheduler::DummyScheduler},
    };
    use std::time::Duration;

    #[test]
    fn test_login_schedules_greeting() {
        let session = DummyBotSession::new("bot");
        let scheduler = DummyScheduler::new();
        on_login(&session, &scheduler, &BotConfig::default());

        assert!(session.chats().is_empty());
        assert_eq!(
            scheduler.scheduled(),
            vec![(Duration::from_secs(2), DeferredAction::Greet)]
        );
    }

    #[test]
    fn test_init_only_logs() {
        let session = DummyBotSession::new("bot");
        on_init(&session);
        assert!(session.chats().is_empty());
        assert!(session.jumping_changes().is_empty());
        assert!(session.looks().is_empty());
    }

    #[test]
    fn test_greet() {
        let session = DummyBotSession::new("bot");
        session.set_position(Point3::new(0.4, 64.0, -7.6));
        greet(&session).unwrap();
        assert_eq!(
            session.chats(),
            vec![
                GREETING_MESSAGE,
                USAGE_MESSAGE,
                "I am at position X: 0, Y: 64, Z: -8",
            ]
        );
    }
}
