use scoutlist::client::DEFAULT_API_BASE;
use scoutlist::SpotifyCatalogClient;
use std::env;

/// Build a catalog client from the environment.
///
/// `SCOUTLIST_ACCESS_TOKEN` is required; `SCOUTLIST_API_BASE` overrides the
/// Spotify API root.
pub fn create_client() -> Result<SpotifyCatalogClient, Box<dyn std::error::Error>> {
    let access_token = env::var("SCOUTLIST_ACCESS_TOKEN")
        .map_err(|_| "SCOUTLIST_ACCESS_TOKEN environment variable not set")?;
    let base_url =
        env::var("SCOUTLIST_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

    let http_client = http_client::native::NativeClient::new();
    Ok(SpotifyCatalogClient::with_base_url(
        Box::new(http_client),
        access_token,
        base_url,
    ))
}
