use thiserror::Error;

/// Error types for scoutlist operations.
///
/// Covers failures reported by the catalog service (missing playlists,
/// throttling, network faults), input validation, and publication that
/// stopped part-way through.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use scoutlist::{CatalogClient, Scout, ScoutConfig, ScoutlistError};
///
/// # async fn run(client: &dyn CatalogClient, tracks: Vec<scoutlist::Track>) {
/// let scout = Scout::new(client, ScoutConfig::default());
///
/// match scout.publish("some_user", &tracks).await {
///     Ok(Some(published)) => println!("Created {}", published.name),
///     Ok(None) => println!("Nothing to publish"),
///     Err(ScoutlistError::PartialWrite { playlist_id, confirmed_tracks, .. }) => {
///         eprintln!("{playlist_id} holds only the first {confirmed_tracks} tracks");
///     }
///     Err(ScoutlistError::NotFound(what)) => eprintln!("Not found: {what}"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # }
/// ```
#[derive(Error, Debug)]
pub enum ScoutlistError {
    /// A playlist or user id does not resolve, or is not accessible to the
    /// authenticated principal.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The catalog service signalled throttling.
    ///
    /// `retry_after` carries the server's hint in seconds when one was sent.
    #[error("Rate limited (retry after {retry_after:?} seconds)")]
    RateLimited {
        /// Seconds the server asked us to wait, if it said
        retry_after: Option<u64>,
    },

    /// Network failure, timeout or 5xx response.
    #[error("Transient failure: {0}")]
    Transient(String),

    /// Malformed input, rejected before any remote call is made.
    #[error("Invalid input: {0}")]
    Invalid(String),

    /// Publication stopped after some chunks were written.
    ///
    /// The destination playlist holds exactly the first `confirmed_tracks`
    /// tracks of the aggregated list. Use
    /// [`Scout::resume_publish`](crate::Scout::resume_publish) to write the rest.
    #[error(
        "Partial write to playlist {playlist_id}: {confirmed_tracks} of {total_tracks} tracks \
         confirmed ({confirmed_chunks} chunks): {source}"
    )]
    PartialWrite {
        /// The destination playlist that was partially populated
        playlist_id: String,
        /// Number of chunks the failing call confirmed before it stopped
        confirmed_chunks: usize,
        /// Number of tracks confirmed present, always a prefix of the list
        confirmed_tracks: usize,
        /// Length of the list that was being written
        total_tracks: usize,
        /// The failure that stopped the write
        #[source]
        source: Box<ScoutlistError>,
    },

    /// The catalog rejected our credentials.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The catalog returned a body we could not understand.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// File system I/O errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScoutlistError {
    /// Whether the retry policy should try the failed call again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ScoutlistError::RateLimited { .. } | ScoutlistError::Transient(_)
        )
    }

    /// Server supplied wait hint, in seconds.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            ScoutlistError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ScoutlistError {
    fn from(err: serde_json::Error) -> Self {
        ScoutlistError::Parse(err.to_string())
    }
}
