use std::collections::HashMap;

use anyhow::Result;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::{
    config::BotConfig,
    service::{
        bot_session::BotSession,
        scheduler::{DeferredAction, Scheduler},
        status_report, teleport_assist,
    },
};

/// ハンドラに渡される、1メッセージ分の実行環境
pub struct CommandContext<'a> {
    pub session: &'a dyn BotSession,
    pub scheduler: &'a dyn Scheduler,
    pub config: &'a BotConfig,
}

/// 第2引数は発言したプレイヤー名
pub type CommandHandler = fn(&CommandContext, &str) -> Result<()>;

pub struct CommandDispatcher {
    handlers: HashMap<&'static str, CommandHandler>,
}

pub static DEFAULT_DISPATCHER: Lazy<CommandDispatcher> =
    Lazy::new(CommandDispatcher::with_defaults);

impl CommandDispatcher {
    pub fn new() -> Self {
        CommandDispatcher {
            handlers: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register("hello", say_hello);
        dispatcher.register("inventory", list_inventory);
        dispatcher.register("where are you", announce_position);
        dispatcher.register("position", announce_position);
        dispatcher.register("jump", jump);
        dispatcher.register("come to me", come_to_me);
        dispatcher.register("look at me", look_at_me);
        dispatcher
    }

    /// text は小文字で登録する
    pub fn register(&mut self, text: &'static str, handler: CommandHandler) {
        self.handlers.insert(text, handler);
    }

    pub fn normalize(message: &str) -> String {
        message.to_lowercase()
    }

    /// 対応するハンドラを実行したら true。自分の発言と未知のメッセージは無視する
    pub fn dispatch(&self, context: &CommandContext, sender: &str, message: &str) -> Result<bool> {
        if sender == context.session.username() {
            return Ok(false);
        }
        let Some(handler) = self.handlers.get(Self::normalize(message).as_str()) else {
            return Ok(false);
        };
        debug!("Dispatching {:?} from {}", message, sender);
        handler(context, sender)?;
        Ok(true)
    }
}

fn say_hello(context: &CommandContext, sender: &str) -> Result<()> {
    context.session.chat(&format!("Hello, {}!", sender));
    Ok(())
}

fn list_inventory(context: &CommandContext, _sender: &str) -> Result<()> {
    status_report::list_inventory(context.session)
}

fn announce_position(context: &CommandContext, _sender: &str) -> Result<()> {
    status_report::announce_position(context.session)
}

fn jump(context: &CommandContext, _sender: &str) -> Result<()> {
    context.session.set_jumping(true);
    context
        .scheduler
        .schedule(context.config.jump_duration, DeferredAction::StopJumping);
    context.session.chat("Jumping!");
    Ok(())
}

fn come_to_me(context: &CommandContext, sender: &str) -> Result<()> {
    teleport_assist::handle_come_to_me(context.session, context.scheduler, context.config, sender)
}

fn look_at_me(context: &CommandContext, sender: &str) -> Result<()> {
    if teleport_assist::look_at_player(context.session, sender)? {
        context
            .session
            .chat(&format!("Looking at you, {}!", sender));
    } else {
        context.session.chat(teleport_assist::OUT_OF_SIGHT_MESSAGE);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{bot_session::DummyBotSession, scheduler::DummyScheduler};

    fn dispatch(session: &DummyBotSession, sender: &str, message: &str) -> Result<bool> {
        let scheduler = DummyScheduler::new();
        let config = BotConfig::default();
        let context = CommandContext {
            session,
            scheduler: &scheduler,
            config: &config,
        };
        DEFAULT_DISPATCHER.dispatch(&context, sender, message)
    }

    #[test]
    fn test_hello_is_case_insensitive() {
        let session = DummyBotSession::new("bot");
        assert!(dispatch(&session, "alice", "HeLLo").unwrap());
        assert_eq!(session.chats(), vec!["Hello, alice!"]);
    }

    #[test]
    fn test_own_messages_are_ignored() {
        let session = DummyBotSession::new("bot");
        assert!(!dispatch(&session, "bot", "hello").unwrap());
        assert!(session.chats().is_empty());
    }

    #[test]
    fn test_unknown_and_padded_messages_are_ignored() {
        let session = DummyBotSession::new("bot");
        assert!(!dispatch(&session, "alice", "dance").unwrap());
        assert!(!dispatch(&session, "alice", " hello ").unwrap());
        assert!(session.chats().is_empty());
    }

    #[test]
    fn test_handler_error_is_returned() {
        let session = DummyBotSession::new("bot");
        session.fail_inventory("inventory is not loaded");
        let result = dispatch(&session, "alice", "inventory");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not loaded"));
    }

    #[test]
    fn test_custom_registration() {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher.register("ping", |context, _| {
            context.session.chat("pong");
            Ok(())
        });
        let session = DummyBotSession::new("bot");
        let scheduler = DummyScheduler::new();
        let config = BotConfig::default();
        let context = CommandContext {
            session: &session,
            scheduler: &scheduler,
            config: &config,
        };
        assert!(dispatcher.dispatch(&context, "alice", "PING").unwrap());
        assert!(!dispatcher.dispatch(&context, "alice", "hello").unwrap());
        assert_eq!(session.chats(), vec!["pong"]);
    }
}
