mod commands;

use clap::Parser;
use commands::{execute_command, utils::create_client, Commands};

/// Aggregate recently added tracks from many playlists into a new one
#[derive(Parser)]
#[command(
    name = "scoutlist",
    about = "Aggregate recently added tracks from many playlists into a new one",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let client = match create_client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            eprintln!();
            eprintln!("Please set the following environment variable:");
            eprintln!("  SCOUTLIST_ACCESS_TOKEN=your_spotify_oauth_access_token");
            eprintln!();
            eprintln!("The token needs the playlist-read-private, playlist-modify-private");
            eprintln!("and playlist-modify-public scopes.");
            std::process::exit(1);
        }
    };

    if let Err(e) = execute_command(args.command, &client).await {
        eprintln!("❌ Command failed: {e}");
        std::process::exit(1);
    }

    Ok(())
}
