use super::output::{output_event, ScoutEvent};
use scoutlist::{Recipe, Scout, ScoutlistError, SpotifyCatalogClient};
use std::path::PathBuf;

/// Handle the run command
pub async fn handle_run(
    client: &SpotifyCatalogClient,
    recipe_path: Option<PathBuf>,
    output_len: Option<usize>,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = match recipe_path {
        Some(path) => path,
        None => Recipe::default_path()?,
    };
    let mut recipe = Recipe::load(&path)?;
    if let Some(output_len) = output_len {
        recipe.output_len = output_len;
    }

    log::info!(
        "Aggregating {} source playlists, excluding {} ({} tracks wanted)",
        recipe.sources.len(),
        recipe.excludes.len(),
        recipe.output_len
    );

    let scout = Scout::new(client, recipe.config.clone());
    let excluded = scout.build_exclusion_set(&recipe.excludes).await?;
    let tracks = scout
        .aggregate_source_tracks(&recipe.sources, &excluded, recipe.output_len)
        .await?;

    if dry_run {
        for (index, track) in tracks.into_iter().enumerate() {
            output_event(&ScoutEvent::TrackFound {
                index: index + 1,
                track,
            });
        }
        log::info!("Dry run, nothing published");
        return Ok(());
    }

    let owner_id = match &recipe.owner_id {
        Some(owner_id) => owner_id.clone(),
        None => client.current_user_id().await?,
    };

    match scout.publish(&owner_id, &tracks).await {
        Ok(Some(playlist)) => {
            output_event(&ScoutEvent::Published { playlist });
            Ok(())
        }
        Ok(None) => {
            log::info!("No tracks survived aggregation, no playlist created");
            Ok(())
        }
        Err(ScoutlistError::PartialWrite {
            playlist_id,
            confirmed_tracks,
            total_tracks,
            source,
            ..
        }) => {
            log::error!(
                "Playlist {playlist_id} holds the first {confirmed_tracks} of {total_tracks} tracks, \
                 the rest were not written"
            );
            Err(source)
        }
        Err(e) => Err(e.into()),
    }
}
