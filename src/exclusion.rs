//! Builds the set of "already heard" track identifiers.

use crate::config::MissingPlaylistPolicy;
use crate::iterator::{AsyncPaginatedIterator, PlaylistTracksIterator};
use crate::r#trait::CatalogClient;
use crate::retry::RetryConfig;
use crate::{PlaylistRef, Result, ScoutlistError};
use std::collections::HashSet;

/// Track identifiers that must not appear in the output.
///
/// Built once per run and only read afterwards. Membership is by `uri`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    uris: HashSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.uris.contains(uri)
    }

    pub fn insert(&mut self, uri: impl Into<String>) -> bool {
        self.uris.insert(uri.into())
    }

    pub fn len(&self) -> usize {
        self.uris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.uris.iter().map(String::as_str)
    }
}

impl FromIterator<String> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            uris: iter.into_iter().collect(),
        }
    }
}

impl<'s> FromIterator<&'s str> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = &'s str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

impl Extend<String> for ExclusionSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.uris.extend(iter);
    }
}

/// Read every listed playlist and union their track identifiers.
///
/// An empty list yields an empty set. A playlist that cannot be found
/// aborts the build under [`MissingPlaylistPolicy::Abort`] and is skipped
/// with a warning under [`MissingPlaylistPolicy::Skip`]; any other error
/// always aborts.
pub async fn build_exclusion_set<C: CatalogClient + ?Sized>(
    client: &C,
    playlists: &[PlaylistRef],
    retry: &RetryConfig,
    on_missing: MissingPlaylistPolicy,
) -> Result<ExclusionSet> {
    let mut excluded = ExclusionSet::new();

    for playlist in playlists {
        let mut tracks = PlaylistTracksIterator::new(client, playlist.id.as_str(), retry.clone());
        match tracks.collect_all().await {
            Ok(tracks) => {
                log::debug!("Excluding {} tracks from {}", tracks.len(), playlist);
                excluded.extend(tracks.into_iter().map(|track| track.uri));
            }
            Err(ScoutlistError::NotFound(what)) if on_missing == MissingPlaylistPolicy::Skip => {
                log::warn!("Skipping exclude playlist {playlist}: not found ({what})");
            }
            Err(e) => return Err(e),
        }
    }

    log::info!("Excluded tracks size: {}", excluded.len());
    Ok(excluded)
}
