use crate::r#trait::CatalogClient;
use crate::retry::{retry_operation, RetryConfig};
use crate::{PageToken, PlaylistPage, PlaylistRef, Result, Track, TrackPage};

use async_trait::async_trait;

/// Async iterator trait for paginated catalog data.
///
/// This trait provides a common interface for iterating over paginated data from
/// the catalog, such as a playlist's entries or the user's playlists. Pages are
/// fetched lazily as items are consumed.
#[async_trait(?Send)]
pub trait AsyncPaginatedIterator<T> {
    /// Fetch the next item from the iterator.
    ///
    /// This method automatically handles pagination, fetching new pages as needed.
    /// Returns `None` when there are no more items available.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(item))` - Next item in the sequence
    /// - `Ok(None)` - No more items available
    /// - `Err(...)` - A page request failed after retries
    async fn next(&mut self) -> Result<Option<T>>;

    /// Collect all remaining items into a Vec.
    async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Take up to n items from the iterator.
    ///
    /// Only the pages needed to produce `n` items are requested.
    async fn take(&mut self, n: usize) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for _ in 0..n {
            match self.next().await? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }

    /// Number of pages fetched so far.
    fn current_page(&self) -> u32;
}

/// Iterator over every entry of one playlist, in remote order.
///
/// The first page is requested with no token; each following page uses the
/// continuation token from the previous response. Iteration ends when a page
/// comes back without a token, so neither the page size nor the total length
/// is ever assumed. Every page request goes through the retry policy.
///
/// The iterator is restartable: [`reset`](Self::reset) drops all continuation
/// state so the next call starts again from the first page.
pub struct PlaylistTracksIterator<'a, C: CatalogClient + ?Sized> {
    client: &'a C,
    playlist_id: String,
    retry: RetryConfig,
    next_token: Option<PageToken>,
    has_more: bool,
    buffer: Vec<Track>,
    pages_fetched: u32,
    tracks_yielded: usize,
}

#[async_trait(?Send)]
impl<'a, C: CatalogClient + ?Sized> AsyncPaginatedIterator<Track> for PlaylistTracksIterator<'a, C> {
    async fn next(&mut self) -> Result<Option<Track>> {
        // Empty pages in the middle of a playlist are legal, keep following tokens
        while self.buffer.is_empty() {
            match self.next_page().await? {
                Some(page) => {
                    self.buffer = page.tracks;
                    self.buffer.reverse(); // Reverse so we can pop from end efficiently
                }
                None => return Ok(None),
            }
        }

        let track = self.buffer.pop();
        if track.is_some() {
            self.tracks_yielded += 1;
        }
        Ok(track)
    }

    fn current_page(&self) -> u32 {
        self.pages_fetched
    }
}

impl<'a, C: CatalogClient + ?Sized> PlaylistTracksIterator<'a, C> {
    /// Create a new iterator over `playlist_id`.
    pub fn new(client: &'a C, playlist_id: impl Into<String>, retry: RetryConfig) -> Self {
        Self {
            client,
            playlist_id: playlist_id.into(),
            retry,
            next_token: None,
            has_more: true,
            buffer: Vec::new(),
            pages_fetched: 0,
            tracks_yielded: 0,
        }
    }

    /// Fetch the next page of entries.
    ///
    /// Returns `Ok(None)` once the previous page carried no continuation token.
    pub async fn next_page(&mut self) -> Result<Option<TrackPage>> {
        if !self.has_more {
            return Ok(None);
        }

        log::debug!(
            "Fetching page {} of playlist {} (yielded {} tracks so far)",
            self.pages_fetched + 1,
            self.playlist_id,
            self.tracks_yielded
        );

        let client = self.client;
        let playlist_id = self.playlist_id.as_str();
        let token = self.next_token.clone();
        let page = retry_operation(&self.retry, "read_playlist_page", move || {
            client.read_playlist_page(playlist_id, token.clone())
        })
        .await?;

        self.pages_fetched += 1;
        self.has_more = page.next_page_token.is_some();
        self.next_token = page.next_page_token.clone();

        Ok(Some(page))
    }

    /// Start over from the first page.
    pub fn reset(&mut self) {
        self.next_token = None;
        self.has_more = true;
        self.buffer.clear();
        self.pages_fetched = 0;
        self.tracks_yielded = 0;
    }

    pub fn playlist_id(&self) -> &str {
        &self.playlist_id
    }
}

/// Iterator over the authenticated user's playlists.
pub struct UserPlaylistsIterator<'a, C: CatalogClient + ?Sized> {
    client: &'a C,
    retry: RetryConfig,
    next_token: Option<PageToken>,
    has_more: bool,
    buffer: Vec<PlaylistRef>,
    pages_fetched: u32,
}

#[async_trait(?Send)]
impl<'a, C: CatalogClient + ?Sized> AsyncPaginatedIterator<PlaylistRef>
    for UserPlaylistsIterator<'a, C>
{
    async fn next(&mut self) -> Result<Option<PlaylistRef>> {
        while self.buffer.is_empty() {
            match self.next_page().await? {
                Some(page) => {
                    self.buffer = page.playlists;
                    self.buffer.reverse();
                }
                None => return Ok(None),
            }
        }

        Ok(self.buffer.pop())
    }

    fn current_page(&self) -> u32 {
        self.pages_fetched
    }
}

impl<'a, C: CatalogClient + ?Sized> UserPlaylistsIterator<'a, C> {
    pub fn new(client: &'a C, retry: RetryConfig) -> Self {
        Self {
            client,
            retry,
            next_token: None,
            has_more: true,
            buffer: Vec::new(),
            pages_fetched: 0,
        }
    }

    /// Fetch the next page of playlists.
    pub async fn next_page(&mut self) -> Result<Option<PlaylistPage>> {
        if !self.has_more {
            return Ok(None);
        }

        let client = self.client;
        let token = self.next_token.clone();
        let page = retry_operation(&self.retry, "current_user_playlists_page", move || {
            client.current_user_playlists_page(token.clone())
        })
        .await?;

        self.pages_fetched += 1;
        self.has_more = page.next_page_token.is_some();
        self.next_token = page.next_page_token.clone();

        Ok(Some(page))
    }
}
