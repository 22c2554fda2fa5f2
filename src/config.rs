use std::time::Duration;

use clap::Parser;

/// コマンドライン引数
#[derive(Parser, Debug, Clone)]
#[command(about = "Chat bot that teleports next to the player who calls it")]
pub struct BotArgs {
    #[arg(long, default_value = "MinecraftBot")]
    pub username: String,
    #[arg(long, default_value = "localhost")]
    pub host: String,
    #[arg(long, default_value_t = 61619)]
    pub port: u16,
    /// 指定した場合は ViaVersion を介してこのバージョンのサーバーに接続する
    #[arg(long)]
    pub version: Option<String>,
}

impl BotArgs {
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub greeting_delay: Duration,
    pub jump_duration: Duration,
    pub look_delay: Duration,
    /// 呼び出したプレイヤーの何ブロック前に移動するか
    pub teleport_distance: f64,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            greeting_delay: Duration::from_secs(2),
            jump_duration: Duration::from_millis(500),
            look_delay: Duration::from_millis(500),
            teleport_distance: 3.0,
        }
    }
}
