use crate::r#trait::CatalogClient;
use crate::{PageToken, PlaylistPage, PlaylistRef, Result, ScoutlistError, Track, TrackPage};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use serde::Deserialize;
use serde_json::json;

/// Default Spotify Web API root.
pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";

/// Entries per playlist page requested from the API (the API maximum).
const TRACKS_PAGE_LIMIT: u32 = 100;
/// Playlists per page when listing the user's playlists.
const PLAYLISTS_PAGE_LIMIT: u32 = 50;
/// Only the fields the pipeline needs.
const TRACK_FIELDS: &str = "items(added_at,track(id,uri,is_local)),next";

/// [`CatalogClient`] backed by the Spotify Web API.
///
/// Authentication is not handled here: the client is given a ready OAuth
/// access token with the `playlist-read-private`, `playlist-modify-private`
/// and `playlist-modify-public` scopes.
///
/// Page tokens are the absolute `next` URLs returned by the API.
///
/// # Examples
///
/// ```rust,no_run
/// use scoutlist::{Scout, ScoutConfig, SpotifyCatalogClient};
///
/// # tokio_test::block_on(async {
/// let http_client = http_client::native::NativeClient::new();
/// let client = SpotifyCatalogClient::new(Box::new(http_client), "access-token".to_string());
/// let user = client.current_user_id().await?;
/// let scout = Scout::new(&client, ScoutConfig::default());
/// # Ok::<(), scoutlist::ScoutlistError>(())
/// # });
/// ```
pub struct SpotifyCatalogClient {
    client: Box<dyn HttpClient>,
    access_token: String,
    base_url: String,
}

#[derive(Deserialize)]
struct PlaylistTracksResponse {
    items: Vec<PlaylistItem>,
    next: Option<String>,
}

#[derive(Deserialize)]
struct PlaylistItem {
    added_at: Option<DateTime<Utc>>,
    track: Option<TrackObject>,
}

#[derive(Deserialize)]
struct TrackObject {
    id: Option<String>,
    uri: Option<String>,
    #[serde(default)]
    is_local: bool,
}

#[derive(Deserialize)]
struct PlaylistsResponse {
    items: Vec<PlaylistObject>,
    next: Option<String>,
}

#[derive(Deserialize)]
struct PlaylistObject {
    id: String,
    name: String,
    owner: UserObject,
}

#[derive(Deserialize)]
struct UserObject {
    id: String,
}

#[derive(Deserialize)]
struct CreatedPlaylist {
    id: String,
}

impl SpotifyCatalogClient {
    /// Create a client against the public Spotify API.
    pub fn new(client: Box<dyn HttpClient>, access_token: String) -> Self {
        Self::with_base_url(client, access_token, DEFAULT_API_BASE.to_string())
    }

    /// Create a client against a custom API root.
    ///
    /// This is useful for testing or for API proxies.
    pub fn with_base_url(client: Box<dyn HttpClient>, access_token: String, base_url: String) -> Self {
        Self {
            client,
            access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Id of the user the access token belongs to.
    pub async fn current_user_id(&self) -> Result<String> {
        let body = self
            .send(Method::Get, &format!("{}/me", self.base_url), None)
            .await?;
        let user: UserObject = serde_json::from_str(&body)?;
        Ok(user.id)
    }

    fn playlist_tracks_url(&self, playlist_id: &str) -> String {
        format!(
            "{}/playlists/{}/tracks?limit={}&fields={}",
            self.base_url,
            urlencoding::encode(playlist_id),
            TRACKS_PAGE_LIMIT,
            urlencoding::encode(TRACK_FIELDS)
        )
    }

    /// Send one request and map the response status onto our error kinds.
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<String> {
        let parsed = url
            .parse::<Url>()
            .map_err(|e| ScoutlistError::Invalid(format!("Bad URL {url}: {e}")))?;

        log::debug!("{method} {url}");

        let mut request = Request::new(method, parsed);
        let authorization = format!("Bearer {}", self.access_token);
        request.insert_header("Authorization", authorization.as_str());
        request.insert_header("Accept", "application/json");
        if let Some(body) = body {
            request.insert_header("Content-Type", "application/json");
            request.set_body(body.to_string());
        }

        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| ScoutlistError::Transient(e.to_string()))?;

        let status: u16 = response.status().into();
        let retry_after = response
            .header("retry-after")
            .and_then(|h| h.get(0))
            .and_then(|v| v.as_str().parse::<u64>().ok());
        let text = response
            .body_string()
            .await
            .map_err(|e| ScoutlistError::Transient(e.to_string()))?;

        match status {
            200..=299 => Ok(text),
            400 => Err(ScoutlistError::Invalid(format!("{url}: {text}"))),
            401 | 403 => Err(ScoutlistError::Auth(format!("{status} from {url}"))),
            404 => Err(ScoutlistError::NotFound(url.to_string())),
            429 => Err(ScoutlistError::RateLimited { retry_after }),
            500..=599 => Err(ScoutlistError::Transient(format!("{status} from {url}"))),
            _ => Err(ScoutlistError::Parse(format!(
                "Unexpected status {status} from {url}"
            ))),
        }
    }
}

#[async_trait(?Send)]
impl CatalogClient for SpotifyCatalogClient {
    async fn read_playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<PageToken>,
    ) -> Result<TrackPage> {
        let url = match page_token {
            Some(token) => token.0,
            None => self.playlist_tracks_url(playlist_id),
        };

        // A malformed id is as unreadable as a missing one
        let body = self
            .send(Method::Get, &url, None)
            .await
            .map_err(|e| match e {
                ScoutlistError::NotFound(_) | ScoutlistError::Invalid(_) => {
                    ScoutlistError::NotFound(format!("playlist {playlist_id}"))
                }
                other => other,
            })?;
        let page: PlaylistTracksResponse = serde_json::from_str(&body)?;

        let mut tracks = Vec::with_capacity(page.items.len());
        for item in page.items {
            let Some(track) = item.track else {
                continue;
            };
            match (track.id, track.uri) {
                (Some(_), Some(uri)) if !track.is_local => {
                    // Very old playlists lack added_at; sort those last
                    let added_at = item.added_at.unwrap_or(DateTime::<Utc>::MIN_UTC);
                    tracks.push(Track::new(uri, added_at));
                }
                (_, uri) => {
                    log::debug!("Skipping entry without a catalog id: {uri:?}");
                }
            }
        }

        Ok(TrackPage {
            tracks,
            next_page_token: page.next.map(PageToken),
        })
    }

    async fn create_playlist(&self, owner_id: &str, name: &str) -> Result<String> {
        let url = format!(
            "{}/users/{}/playlists",
            self.base_url,
            urlencoding::encode(owner_id)
        );
        let body = self
            .send(
                Method::Post,
                &url,
                Some(json!({ "name": name, "public": false })),
            )
            .await
            .map_err(|e| match e {
                ScoutlistError::NotFound(_) => ScoutlistError::NotFound(format!("user {owner_id}")),
                other => other,
            })?;
        let created: CreatedPlaylist = serde_json::from_str(&body)?;
        Ok(created.id)
    }

    async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        position: Option<u32>,
    ) -> Result<()> {
        let url = format!(
            "{}/playlists/{}/tracks",
            self.base_url,
            urlencoding::encode(playlist_id)
        );
        let mut body = json!({ "uris": uris });
        if let Some(position) = position {
            body["position"] = json!(position);
        }
        self.send(Method::Post, &url, Some(body)).await?;
        Ok(())
    }

    async fn current_user_playlists_page(
        &self,
        page_token: Option<PageToken>,
    ) -> Result<PlaylistPage> {
        let url = match page_token {
            Some(token) => token.0,
            None => format!("{}/me/playlists?limit={}", self.base_url, PLAYLISTS_PAGE_LIMIT),
        };
        let body = self.send(Method::Get, &url, None).await?;
        let page: PlaylistsResponse = serde_json::from_str(&body)?;

        Ok(PlaylistPage {
            playlists: page
                .items
                .into_iter()
                .map(|p| PlaylistRef::new(p.id, p.owner.id, p.name))
                .collect(),
            next_page_token: page.next.map(PageToken),
        })
    }
}
