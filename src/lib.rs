pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod iterator;
pub mod pipeline;
pub mod playlist_id;
pub mod publish;
pub mod retry;
pub mod r#trait;
pub mod types;

pub use aggregate::merge_candidates;
pub use client::SpotifyCatalogClient;
pub use config::{MissingPlaylistPolicy, Recipe, ScoutConfig};
pub use error::ScoutlistError;
pub use exclusion::ExclusionSet;
pub use iterator::{AsyncPaginatedIterator, PlaylistTracksIterator, UserPlaylistsIterator};
pub use pipeline::Scout;
pub use playlist_id::parse_playlist_id;
pub use publish::playlist_name;
pub use r#trait::CatalogClient;
pub use retry::RetryConfig;
pub use types::{
    PageToken, PlaylistPage, PlaylistRef, PublishedPlaylist, Track, TrackPage,
};

#[cfg(feature = "mock")]
pub use r#trait::MockCatalogClient;

pub type Result<T> = std::result::Result<T, ScoutlistError>;
