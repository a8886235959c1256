use super::output::{output_event, ScoutEvent};
use scoutlist::{
    parse_playlist_id, AsyncPaginatedIterator, PlaylistRef, Scout, ScoutConfig,
    SpotifyCatalogClient,
};

/// Handle the playlists command
pub async fn handle_list_playlists(
    client: &SpotifyCatalogClient,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Listing your playlists");

    let scout = Scout::new(client, ScoutConfig::default());
    let mut playlists = scout.user_playlists();
    let mut count = 0;

    while let Some(playlist) = playlists.next().await? {
        count += 1;
        output_event(&ScoutEvent::PlaylistFound {
            index: count,
            playlist,
        });

        if limit > 0 && count >= limit {
            break;
        }
    }

    log::info!("{count} playlists");
    Ok(())
}

/// Handle the tracks command
pub async fn handle_list_tracks(
    client: &SpotifyCatalogClient,
    playlist: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let playlist = PlaylistRef::from_id(parse_playlist_id(playlist)?);
    log::info!("Listing tracks of playlist {playlist}");

    let scout = Scout::new(client, ScoutConfig::default());
    let mut tracks = scout.playlist_tracks(&playlist);
    let mut count = 0;

    while let Some(track) = tracks.next().await? {
        count += 1;
        output_event(&ScoutEvent::TrackFound {
            index: count,
            track,
        });
    }

    log::info!("{count} tracks in {} pages", tracks.current_page());
    Ok(())
}
