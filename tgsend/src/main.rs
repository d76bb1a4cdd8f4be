use anyhow::Context;
use clap::Parser;
use tgsend::config::{Args, Command};
use tgsend::{telemetry, BotClient, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    telemetry::init_telemetry()?;

    let config = Config::load(&args).with_context(|| format!("invalid configuration ({})", args.config))?;
    tracing::debug!(?config, "Loaded configuration");

    match args.command {
        Command::Validate => println!("Configuration is valid."),
        Command::SendAudio { chat_id, path } => {
            let client = BotClient::from_config(&config)?;
            let message = client
                .send_protected_audio(chat_id, &path)
                .await
                .with_context(|| format!("failed to send {} to chat {}", path.display(), chat_id))?;
            println!("{}", serde_json::to_string_pretty(&message)?);
        }
    }

    Ok(())
}
