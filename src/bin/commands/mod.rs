pub mod output;
pub mod playlists;
pub mod run;
pub mod utils;

use clap::Subcommand;
use scoutlist::SpotifyCatalogClient;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// List your playlists
    ///
    /// Prints one JSON object per playlist with its id, owner and name, ready
    /// to paste into the sources or excludes of a recipe.
    ///
    /// Usage examples:
    /// # List every playlist you follow or own
    /// scoutlist playlists
    ///
    /// # Only the first 20
    /// scoutlist playlists --limit 20
    Playlists {
        /// Maximum number of playlists to show (0 for no limit)
        #[arg(long, default_value = "0")]
        limit: usize,
    },

    /// Show every track of one playlist
    ///
    /// Accepts a playlist id, a spotify:playlist: URI or an open.spotify.com URL.
    ///
    /// Usage examples:
    /// scoutlist tracks 37i9dQZF1DXcBWIGoYBM5M
    /// scoutlist tracks https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
    Tracks {
        /// Playlist id, URI or URL
        playlist: String,
    },

    /// Build a new playlist from a recipe
    ///
    /// Reads the exclude playlists, merges the source playlists newest first,
    /// drops duplicates and already heard tracks, and writes the result to a
    /// new private playlist named scout_YYYYMMDD_HHMMSS.
    ///
    /// Usage examples:
    /// # Use ~/.config/scoutlist/recipe.json
    /// scoutlist run
    ///
    /// # Preview the result without creating anything
    /// scoutlist run --recipe weekly.json --dry-run
    ///
    /// # Override the recipe's output length
    /// scoutlist run --output-len 25
    Run {
        /// Recipe file (defaults to the user config directory)
        #[arg(long)]
        recipe: Option<PathBuf>,

        /// Number of tracks to keep, overriding the recipe
        #[arg(long)]
        output_len: Option<usize>,

        /// Print the aggregated tracks instead of publishing them
        #[arg(long)]
        dry_run: bool,
    },
}

pub async fn execute_command(
    command: Commands,
    client: &SpotifyCatalogClient,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Playlists { limit } => playlists::handle_list_playlists(client, limit).await,
        Commands::Tracks { playlist } => playlists::handle_list_tracks(client, &playlist).await,
        Commands::Run {
            recipe,
            output_len,
            dry_run,
        } => run::handle_run(client, recipe, output_len, dry_run).await,
    }
}
