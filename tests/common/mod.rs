#![allow(dead_code)]
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use scoutlist::{
    CatalogClient, PageToken, PlaylistPage, PlaylistRef, Result, RetryConfig, ScoutConfig,
    ScoutlistError, Track, TrackPage,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// One recorded `add_tracks` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCall {
    pub playlist_id: String,
    pub uris: Vec<String>,
    pub position: Option<u32>,
}

/// In-memory catalog that serves playlists in fixed-size pages and records
/// every write.
pub struct FakeCatalog {
    playlists: RefCell<HashMap<String, Vec<Track>>>,
    page_size: usize,
    next_created: Cell<usize>,
    fail_add_call: Cell<Option<usize>>,
    add_calls: RefCell<Vec<AddCall>>,
    created: RefCell<Vec<(String, String)>>,
    reads: Cell<usize>,
}

impl FakeCatalog {
    pub fn new(page_size: usize) -> Self {
        Self {
            playlists: RefCell::new(HashMap::new()),
            page_size,
            next_created: Cell::new(0),
            fail_add_call: Cell::new(None),
            add_calls: RefCell::new(Vec::new()),
            created: RefCell::new(Vec::new()),
            reads: Cell::new(0),
        }
    }

    pub fn with_playlist(self, id: &str, tracks: Vec<Track>) -> Self {
        self.playlists.borrow_mut().insert(id.to_string(), tracks);
        self
    }

    /// Make the `n`th `add_tracks` call (0-based, counted from now) fail once.
    pub fn fail_add_call(&self, n: usize) {
        self.fail_add_call
            .set(Some(self.add_calls.borrow().len() + n));
    }

    pub fn add_calls(&self) -> Vec<AddCall> {
        self.add_calls.borrow().clone()
    }

    pub fn created(&self) -> Vec<(String, String)> {
        self.created.borrow().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn playlist_uris(&self, id: &str) -> Vec<String> {
        self.playlists
            .borrow()
            .get(id)
            .map(|tracks| tracks.iter().map(|track| track.uri.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait(?Send)]
impl CatalogClient for FakeCatalog {
    async fn read_playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<PageToken>,
    ) -> Result<TrackPage> {
        self.reads.set(self.reads.get() + 1);
        let playlists = self.playlists.borrow();
        let tracks = playlists
            .get(playlist_id)
            .ok_or_else(|| ScoutlistError::NotFound(format!("playlist {playlist_id}")))?;

        let start = match page_token {
            Some(token) => token
                .as_str()
                .parse::<usize>()
                .map_err(|_| ScoutlistError::Invalid(format!("bad token {}", token.as_str())))?,
            None => 0,
        };
        let end = (start + self.page_size).min(tracks.len());
        let next_page_token = (end < tracks.len()).then(|| PageToken(end.to_string()));

        Ok(TrackPage {
            tracks: tracks[start..end].to_vec(),
            next_page_token,
        })
    }

    async fn create_playlist(&self, owner_id: &str, name: &str) -> Result<String> {
        let n = self.next_created.get();
        self.next_created.set(n + 1);
        let id = format!("created{n}");
        self.playlists.borrow_mut().insert(id.clone(), Vec::new());
        self.created
            .borrow_mut()
            .push((owner_id.to_string(), name.to_string()));
        Ok(id)
    }

    async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        position: Option<u32>,
    ) -> Result<()> {
        let call = self.add_calls.borrow().len();
        self.add_calls.borrow_mut().push(AddCall {
            playlist_id: playlist_id.to_string(),
            uris: uris.to_vec(),
            position,
        });

        if self.fail_add_call.get() == Some(call) {
            self.fail_add_call.set(None);
            return Err(ScoutlistError::Invalid("write rejected".to_string()));
        }

        let mut playlists = self.playlists.borrow_mut();
        let tracks = playlists
            .get_mut(playlist_id)
            .ok_or_else(|| ScoutlistError::NotFound(format!("playlist {playlist_id}")))?;
        let at = position.map_or(tracks.len(), |p| p as usize).min(tracks.len());
        let new_tracks = uris.iter().map(|uri| Track::new(uri.as_str(), ts(0)));
        tracks.splice(at..at, new_tracks);
        Ok(())
    }

    async fn current_user_playlists_page(
        &self,
        _page_token: Option<PageToken>,
    ) -> Result<PlaylistPage> {
        let mut ids: Vec<String> = self.playlists.borrow().keys().cloned().collect();
        ids.sort();
        Ok(PlaylistPage {
            playlists: ids.into_iter().map(PlaylistRef::from_id).collect(),
            next_page_token: None,
        })
    }
}

/// A fixed instant plus `secs` seconds.
pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(secs)
}

pub fn track(uri: &str, secs: i64) -> Track {
    Track::new(uri, ts(secs))
}

pub fn uris(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|track| track.uri.as_str()).collect()
}

/// Config that never sleeps between attempts.
pub fn no_retry_config() -> ScoutConfig {
    ScoutConfig {
        retry: RetryConfig {
            max_retries: 0,
            base_delay_ms: 0,
            max_delay_ms: 0,
        },
        ..ScoutConfig::default()
    }
}
