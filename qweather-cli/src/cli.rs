use async_trait::async_trait;
use clap::{Parser, Subcommand};
use qweather_core::{Config, ReplyChannel, ReplyPayload, reply_weather, source_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "qweather", version, about = "QWeather reply pipeline CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the QWeather API key in the local config file.
    Configure,

    /// Show current weather for a city, the way the bot would reply.
    Show {
        /// Free-text city name, e.g. "北京" or "beijing".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = inquire::Password::new("QWeather API key:")
        .without_confirmation()
        .prompt()?;
    config.set_api_key(key);
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let source = source_from_config(&config)?;

    reply_weather(&source, city, &StdoutChannel).await
}

/// Reply channel that prints to stdout: formatted text as-is, raw payloads
/// as pretty JSON.
struct StdoutChannel;

#[async_trait]
impl ReplyChannel for StdoutChannel {
    async fn send(&self, payload: ReplyPayload) -> anyhow::Result<()> {
        match payload {
            ReplyPayload::Text(text) => println!("{text}"),
            ReplyPayload::Raw(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        }
        Ok(())
    }
}
