use crate::{PageToken, PlaylistPage, Result, TrackPage};
use async_trait::async_trait;

/// Capability for talking to the remote music catalog.
///
/// Every pipeline operation receives an implementation of this trait
/// explicitly, so the aggregation engine never owns authentication or
/// global client state and can be driven by a fake in tests.
///
/// Implementations map remote failures onto
/// [`ScoutlistError`](crate::ScoutlistError): an unknown playlist is `NotFound`,
/// throttling is `RateLimited`, and network faults or 5xx responses are
/// `Transient`. Retrying is the caller's job, not the implementation's.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockCatalogClient`
/// that implements this trait using the `mockall` library.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait(?Send)]
pub trait CatalogClient {
    /// Read one page of a playlist's entries.
    ///
    /// `page_token` is `None` for the first page and otherwise the token
    /// returned by the previous page.
    async fn read_playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<PageToken>,
    ) -> Result<TrackPage>;

    /// Create an empty playlist owned by `owner_id`, returning its id.
    async fn create_playlist(&self, owner_id: &str, name: &str) -> Result<String>;

    /// Add tracks to a playlist, at `position` if given, appended otherwise.
    async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        position: Option<u32>,
    ) -> Result<()>;

    /// Read one page of the authenticated user's playlists.
    async fn current_user_playlists_page(
        &self,
        page_token: Option<PageToken>,
    ) -> Result<PlaylistPage>;
}
