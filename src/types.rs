use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One catalog entry as it appears inside a playlist.
///
/// Identity is the `uri` alone: the same track added to two playlists at
/// different times compares equal, which is what deduplication and exclusion
/// rely on. `added_at` is the ordering key only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Stable catalog identifier, e.g. `spotify:track:4uLU6hMCjMI75M1A2tKUQC`
    pub uri: String,
    /// When the track was added to the playlist it was read from
    pub added_at: DateTime<Utc>,
}

impl Track {
    pub fn new(uri: impl Into<String>, added_at: DateTime<Utc>) -> Self {
        Self {
            uri: uri.into(),
            added_at,
        }
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (added {})", self.uri, self.added_at.to_rfc3339())
    }
}

/// Address of a remote playlist. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRef {
    pub id: String,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub display_name: String,
}

impl PlaylistRef {
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            display_name: display_name.into(),
        }
    }

    /// Reference addressed by id only.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self::new(id, "", "")
    }
}

impl fmt::Display for PlaylistRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.display_name.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.display_name, self.id)
        }
    }
}

/// Opaque continuation marker returned by a paged list call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageToken(pub String);

impl PageToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PageToken {
    fn from(token: String) -> Self {
        PageToken(token)
    }
}

/// One page of a playlist's entries.
#[derive(Debug, Clone, Default)]
pub struct TrackPage {
    pub tracks: Vec<Track>,
    pub next_page_token: Option<PageToken>,
}

/// One page of the authenticated user's playlists.
#[derive(Debug, Clone, Default)]
pub struct PlaylistPage {
    pub playlists: Vec<PlaylistRef>,
    pub next_page_token: Option<PageToken>,
}

/// A destination playlist created and filled by the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedPlaylist {
    pub id: String,
    pub name: String,
    pub tracks_added: usize,
}
