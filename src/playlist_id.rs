use crate::{Result, ScoutlistError};
use regex::Regex;
use std::sync::OnceLock;

fn playlist_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:spotify:(?:user:[^:]+:)?playlist:|https?://open\.spotify\.com/(?:user/[^/]+/)?playlist/)?([A-Za-z0-9]+)(?:[?#].*)?$",
        )
        .expect("playlist id pattern is valid")
    })
}

/// Extract a playlist id from a bare id, a `spotify:playlist:` URI or an
/// `open.spotify.com/playlist/` URL.
pub fn parse_playlist_id(input: &str) -> Result<String> {
    let trimmed = input.trim();
    playlist_id_pattern()
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| ScoutlistError::Invalid(format!("Not a playlist id: '{input}'")))
}
