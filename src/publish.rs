//! Creates the destination playlist and writes the aggregated list into it.

use crate::config::ScoutConfig;
use crate::r#trait::CatalogClient;
use crate::retry::{retry_operation, RetryConfig};
use crate::{PublishedPlaylist, Result, ScoutlistError, Track};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// Destination name for a playlist created at `at`.
///
/// Second resolution, e.g. `scout_20240105_134502`.
pub fn playlist_name<Tz>(prefix: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{prefix}_{}", at.format("%Y%m%d_%H%M%S"))
}

/// Create a fresh playlist for `owner_id` and fill it with `tracks`, in order.
///
/// Returns `Ok(None)` without creating anything when `tracks` is empty.
///
/// If creation fails nothing has been written and the error is returned
/// unchanged. Once the playlist exists, any chunk failure is reported as
/// [`ScoutlistError::PartialWrite`], even when no chunk made it, so the
/// caller always learns the destination id and how many tracks are present.
pub async fn publish<C: CatalogClient + ?Sized>(
    client: &C,
    owner_id: &str,
    tracks: &[Track],
    config: &ScoutConfig,
) -> Result<Option<PublishedPlaylist>> {
    config.validate()?;
    if owner_id.trim().is_empty() {
        return Err(ScoutlistError::Invalid(
            "owner id must not be empty".to_string(),
        ));
    }

    if tracks.is_empty() {
        log::info!("No tracks to publish, not creating a playlist");
        return Ok(None);
    }

    let name = playlist_name(&config.name_prefix, &Local::now());
    let playlist_id = retry_operation(&config.retry, "create_playlist", || {
        client.create_playlist(owner_id, &name)
    })
    .await?;
    log::info!("Created playlist {name} ({playlist_id})");

    let tracks_added = write_chunks(
        client,
        &playlist_id,
        tracks,
        0,
        config.write_chunk_size,
        &config.retry,
    )
    .await?;
    log::info!("{tracks_added} tracks added");

    Ok(Some(PublishedPlaylist {
        id: playlist_id,
        name,
        tracks_added,
    }))
}

/// Write the part of `tracks` a previous publish did not confirm.
///
/// `confirmed_tracks` is the count reported by
/// [`ScoutlistError::PartialWrite`]; writing resumes at that position so no
/// track is duplicated. Returns the number of tracks written by this call.
pub async fn resume_publish<C: CatalogClient + ?Sized>(
    client: &C,
    playlist_id: &str,
    tracks: &[Track],
    confirmed_tracks: usize,
    config: &ScoutConfig,
) -> Result<usize> {
    config.validate()?;
    if confirmed_tracks > tracks.len() {
        return Err(ScoutlistError::Invalid(format!(
            "{confirmed_tracks} tracks confirmed but only {} to write",
            tracks.len()
        )));
    }

    let written = write_chunks(
        client,
        playlist_id,
        tracks,
        confirmed_tracks,
        config.write_chunk_size,
        &config.retry,
    )
    .await?;
    Ok(written - confirmed_tracks)
}

/// Write `tracks[start..]` in chunks, strictly one after another.
///
/// Returns the absolute number of tracks present afterwards.
async fn write_chunks<C: CatalogClient + ?Sized>(
    client: &C,
    playlist_id: &str,
    tracks: &[Track],
    start: usize,
    chunk_size: usize,
    retry: &RetryConfig,
) -> Result<usize> {
    let mut offset = start;
    let mut confirmed_chunks = 0;

    for chunk in tracks[start..].chunks(chunk_size) {
        let uris: Vec<String> = chunk.iter().map(|track| track.uri.clone()).collect();
        let position = u32::try_from(offset).map_err(|_| {
            ScoutlistError::Invalid(format!("position {offset} out of range"))
        })?;

        log::debug!(
            "Adding {} tracks to {} at position {}",
            uris.len(),
            playlist_id,
            position
        );

        let written = retry_operation(retry, "add_tracks", || {
            client.add_tracks(playlist_id, &uris, Some(position))
        })
        .await;

        if let Err(source) = written {
            log::warn!(
                "Writing to {playlist_id} stopped after {offset} of {} tracks: {source}",
                tracks.len()
            );
            return Err(ScoutlistError::PartialWrite {
                playlist_id: playlist_id.to_string(),
                confirmed_chunks,
                confirmed_tracks: offset,
                total_tracks: tracks.len(),
                source: Box::new(source),
            });
        }

        offset += chunk.len();
        confirmed_chunks += 1;
    }

    Ok(offset)
}
