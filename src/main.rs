use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dhcpwire::{Config, Listener, Message, Result};

#[derive(Parser)]
#[command(name = "dhcpwire")]
#[command(author, version, about = "Decode and inspect DHCP/BOOTP datagrams", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "dhcpwire.json")]
    config: PathBuf,

    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bind the configured UDP endpoint and log every decoded message.
    Listen,
    /// Decode a captured datagram file and print it as JSON.
    Decode { file: PathBuf },
    /// Print the effective configuration.
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    match cli.command.unwrap_or(Commands::Listen) {
        Commands::Listen => {
            let config = Config::load_or_create(&cli.config)?;
            info!("Starting listener with config: {:?}", cli.config);
            let listener = Listener::bind(&config).await?;

            tokio::select! {
                result = listener.run() => result,
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal, stopping listener...");
                    Ok(())
                }
            }
        }
        Commands::Decode { file } => {
            let data = std::fs::read(&file)?;
            let message = Message::decode(&data)?;
            println!("{}", serde_json::to_string_pretty(&message)?);
            Ok(())
        }
        Commands::ShowConfig => {
            let config = Config::load_or_create(&cli.config)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
