use azalea::prelude::*;
use azalea_viaversion::ViaVersionPlugin;
use clap::Parser;
use escort_bot_mc::{
    config::{BotArgs, BotConfig},
    infra::azalea_session::AzaleaBotSession,
    service::{
        command_dispatcher::{CommandContext, DEFAULT_DISPATCHER},
        lifecycle,
        scheduler::TokioScheduler,
    },
};
use tracing::{error, info};

#[derive(Default, Clone, Component)]
pub struct BotState {
    pub config: BotConfig,
}

#[tokio::main]
async fn main() {
    let args = BotArgs::parse();
    let account = Account::offline(&args.username);
    let address = args.server_address();

    let mut builder = ClientBuilder::new().set_handler(handle);
    if let Some(version) = &args.version {
        // ViaVersionを起動して指定バージョンで接続
        builder = builder.add_plugins(ViaVersionPlugin::start(version.clone()).await);
    }

    let exit = builder.start(account, address.as_str()).await;
    info!("Client stopped: {:?}", exit);
}

async fn handle(bot: Client, event: Event, state: BotState) -> anyhow::Result<()> {
    let session = AzaleaBotSession::new(bot);
    let scheduler = TokioScheduler::new(session.clone());

    match event {
        Event::Init => lifecycle::on_init(&session),
        Event::Login => lifecycle::on_login(&session, &scheduler, &state.config),
        Event::Spawn => lifecycle::on_spawn(&session),
        Event::Chat(message) => {
            let (sender, content) = message.split_sender_and_content();
            let Some(sender) = sender else {
                return Ok(());
            };
            let context = CommandContext {
                session: &session,
                scheduler: &scheduler,
                config: &state.config,
            };
            if let Err(e) = DEFAULT_DISPATCHER.dispatch(&context, &sender, &content) {
                error!("Failed to handle {:?} from {}: {:#}", content, sender, e);
            }
        }
        Event::Disconnect(reason) => {
            lifecycle::on_disconnect(reason.map(|r| r.to_string()).as_deref())
        }
        _ => {}
    }

    Ok(())
}
