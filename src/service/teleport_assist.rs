use anyhow::Result;
use tracing::{debug, error};

use crate::{
    config::BotConfig,
    model::Point3,
    service::{
        bot_session::BotSession,
        landing_resolver::{self, LandingOutcome},
        scheduler::{DeferredAction, Scheduler},
    },
};

pub const OUT_OF_SIGHT_MESSAGE: &str = "I can't see you. Please make sure you're in range.";
pub const OBSTRUCTED_MESSAGE: &str =
    "Can't teleport there - it's obstructed. Looking for a safe spot nearby...";
pub const ARRIVED_IN_FRONT_MESSAGE: &str = "I've teleported in front of you!";
pub const ARRIVED_NEARBY_MESSAGE: &str = "I've teleported to a safe position near you!";
pub const NOT_FOUND_MESSAGE: &str = "Sorry, I couldn't find a safe position nearby.";

pub fn teleport_command(point: Point3) -> String {
    format!("/tp @s {:.1} {:.1} {:.1}", point.x, point.y, point.z)
}

/// プレイヤーの頭の方を向く。見つからなければ false
pub fn look_at_player(session: &dyn BotSession, username: &str) -> Result<bool> {
    match session.find_player(username)? {
        Some(sighting) => {
            session.look_at(sighting.head_position());
            Ok(true)
        }
        None => Ok(false),
    }
}

/// 呼び出したプレイヤーの正面、塞がっていればその周辺へテレポートする。
/// プレイヤーが見えなければ None
pub fn come_to_player(
    session: &dyn BotSession,
    scheduler: &dyn Scheduler,
    config: &BotConfig,
    username: &str,
) -> Result<Option<LandingOutcome>> {
    let Some(sighting) = session.find_player(username)? else {
        session.chat(OUT_OF_SIGHT_MESSAGE);
        return Ok(None);
    };

    let desired = sighting.point_in_front(config.teleport_distance);
    let outcome = landing_resolver::resolve(sighting.position, desired, session);
    debug!("Landing spot for {}: {:?}", username, outcome);

    match outcome {
        LandingOutcome::OriginalSafe(point) => {
            session.chat(&teleport_command(point));
            session.chat(ARRIVED_IN_FRONT_MESSAGE);
        }
        LandingOutcome::AlternativeFound(point) => {
            session.chat(OBSTRUCTED_MESSAGE);
            session.chat(&teleport_command(point));
            session.chat(ARRIVED_NEARBY_MESSAGE);
        }
        LandingOutcome::NoneFound => {
            session.chat(OBSTRUCTED_MESSAGE);
            session.chat(NOT_FOUND_MESSAGE);
            return Ok(Some(outcome));
        }
    }

    scheduler.schedule(
        config.look_delay,
        DeferredAction::LookAtPlayer {
            username: username.to_string(),
        },
    );
    Ok(Some(outcome))
}

/// `come to me` のハンドラ。失敗はチャットで通知する
pub fn handle_come_to_me(
    session: &dyn BotSession,
    scheduler: &dyn Scheduler,
    config: &BotConfig,
    username: &str,
) -> Result<()> {
    if let Err(e) = come_to_player(session, scheduler, config, username) {
        error!("Teleport error: {:#}", e);
        session.chat(&format!("Error teleporting: {}", e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teleport_command_format() {
        assert_eq!(
            teleport_command(Point3::new(-2.0, 64.0, 0.31)),
            "/tp @s -2.0 64.0 0.3"
        );
        assert_eq!(
            teleport_command(Point3::new(10.96, 70.5, -5.04)),
            "/tp @s 11.0 70.5 -5.0"
        );
    }
}
