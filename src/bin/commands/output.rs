use scoutlist::{PlaylistRef, PublishedPlaylist, Track};
use serde::{Deserialize, Serialize};

/// Events emitted by commands (JSON output to stdout)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScoutEvent {
    /// Found one of the user's playlists
    PlaylistFound { index: usize, playlist: PlaylistRef },
    /// Found a track, either in a playlist or in an aggregated result
    TrackFound { index: usize, track: Track },
    /// A destination playlist was created and filled
    Published { playlist: PublishedPlaylist },
}

/// Output an event as JSON to stdout
pub fn output_event(event: &ScoutEvent) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    } else {
        log::error!("Failed to serialize event to JSON");
    }
}
