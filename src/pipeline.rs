use crate::aggregate;
use crate::config::ScoutConfig;
use crate::exclusion::{self, ExclusionSet};
use crate::iterator::{AsyncPaginatedIterator, PlaylistTracksIterator, UserPlaylistsIterator};
use crate::publish;
use crate::r#trait::CatalogClient;
use crate::{PlaylistRef, PublishedPlaylist, Result, ScoutlistError, Track};

/// The aggregation engine, bound to one catalog client and one configuration.
///
/// Exposes the four pipeline steps. Each step only talks to the catalog
/// through the client it was given; nothing is cached between calls, so
/// every run reflects the catalog as it is now.
///
/// # Examples
///
/// ```rust,no_run
/// use scoutlist::{CatalogClient, PlaylistRef, Scout, ScoutConfig};
///
/// # async fn run(client: &dyn CatalogClient) -> scoutlist::Result<()> {
/// let scout = Scout::new(client, ScoutConfig::default());
///
/// let heard = scout
///     .build_exclusion_set(&[PlaylistRef::from_id("1a2b3c")])
///     .await?;
/// let tracks = scout
///     .aggregate_source_tracks(&[PlaylistRef::from_id("4d5e6f")], &heard, 50)
///     .await?;
/// if let Some(published) = scout.publish("my_user", &tracks).await? {
///     println!("{} now holds {} tracks", published.name, published.tracks_added);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Scout<'a, C: CatalogClient + ?Sized> {
    client: &'a C,
    config: ScoutConfig,
}

impl<'a, C: CatalogClient + ?Sized> Scout<'a, C> {
    pub fn new(client: &'a C, config: ScoutConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    /// Lazy, restartable iterator over one playlist's entries.
    pub fn playlist_tracks(&self, playlist: &PlaylistRef) -> PlaylistTracksIterator<'a, C> {
        PlaylistTracksIterator::new(self.client, playlist.id.as_str(), self.config.retry.clone())
    }

    /// Iterator over the authenticated user's playlists.
    pub fn user_playlists(&self) -> UserPlaylistsIterator<'a, C> {
        UserPlaylistsIterator::new(self.client, self.config.retry.clone())
    }

    /// Every entry of `playlist`, in remote order.
    pub async fn read_all_tracks(&self, playlist: &PlaylistRef) -> Result<Vec<Track>> {
        require_id(playlist)?;
        self.playlist_tracks(playlist).collect_all().await
    }

    /// Union of the track identifiers in `playlists`.
    pub async fn build_exclusion_set(&self, playlists: &[PlaylistRef]) -> Result<ExclusionSet> {
        playlists.iter().try_for_each(require_id)?;
        exclusion::build_exclusion_set(
            self.client,
            playlists,
            &self.config.retry,
            self.config.missing_exclude_policy,
        )
        .await
    }

    /// Deduplicated, filtered, newest-first merge of `sources`, at most
    /// `output_len` long.
    pub async fn aggregate_source_tracks(
        &self,
        sources: &[PlaylistRef],
        excluded: &ExclusionSet,
        output_len: usize,
    ) -> Result<Vec<Track>> {
        sources.iter().try_for_each(require_id)?;
        aggregate::aggregate_source_tracks(
            self.client,
            sources,
            excluded,
            output_len,
            &self.config.retry,
        )
        .await
    }

    /// Create a new playlist for `owner_id` holding exactly `tracks`.
    pub async fn publish(
        &self,
        owner_id: &str,
        tracks: &[Track],
    ) -> Result<Option<PublishedPlaylist>> {
        publish::publish(self.client, owner_id, tracks, &self.config).await
    }

    /// Finish a publish that failed with
    /// [`PartialWrite`](ScoutlistError::PartialWrite).
    pub async fn resume_publish(
        &self,
        playlist_id: &str,
        tracks: &[Track],
        confirmed_tracks: usize,
    ) -> Result<usize> {
        publish::resume_publish(self.client, playlist_id, tracks, confirmed_tracks, &self.config)
            .await
    }
}

fn require_id(playlist: &PlaylistRef) -> Result<()> {
    if playlist.id.trim().is_empty() {
        return Err(ScoutlistError::Invalid(format!(
            "playlist reference '{}' has no id",
            playlist.display_name
        )));
    }
    Ok(())
}
