//! Merges source playlists into the ordered, bounded output list.

use crate::exclusion::ExclusionSet;
use crate::iterator::{AsyncPaginatedIterator, PlaylistTracksIterator};
use crate::r#trait::CatalogClient;
use crate::retry::RetryConfig;
use crate::{PlaylistRef, Result, Track};
use std::collections::HashSet;

/// Read every source playlist and merge the result.
///
/// Sources are read in the given order and any failure, including a missing
/// playlist, aborts the whole aggregation. `output_len == 0` returns an empty
/// list without touching the catalog.
pub async fn aggregate_source_tracks<C: CatalogClient + ?Sized>(
    client: &C,
    sources: &[PlaylistRef],
    excluded: &ExclusionSet,
    output_len: usize,
    retry: &RetryConfig,
) -> Result<Vec<Track>> {
    if output_len == 0 {
        log::info!("Requested output length is 0, skipping source reads");
        return Ok(Vec::new());
    }

    let mut per_playlist = Vec::with_capacity(sources.len());
    for playlist in sources {
        let tracks = PlaylistTracksIterator::new(client, playlist.id.as_str(), retry.clone())
            .collect_all()
            .await?;
        log::debug!("Read {} tracks from source {}", tracks.len(), playlist);
        per_playlist.push(tracks);
    }

    let merged = merge_candidates(per_playlist, excluded, output_len);
    log::info!(
        "Aggregated {} tracks from {} source playlists (requested {})",
        merged.len(),
        sources.len(),
        output_len
    );
    Ok(merged)
}

/// Merge already-read playlists into the output list.
///
/// 1. concatenate in playlist order, keeping each playlist's own order;
/// 2. keep the first occurrence of each `uri`;
/// 3. drop excluded `uri`s;
/// 4. stable sort by `added_at`, newest first;
/// 5. keep at most `output_len` tracks.
///
/// Deterministic: equal inputs always give the same output, ties included.
pub fn merge_candidates(
    playlists: Vec<Vec<Track>>,
    excluded: &ExclusionSet,
    output_len: usize,
) -> Vec<Track> {
    let mut seen = HashSet::new();
    let mut candidates: Vec<Track> = playlists
        .into_iter()
        .flatten()
        .filter(|track| seen.insert(track.uri.clone()))
        .filter(|track| !excluded.contains(&track.uri))
        .collect();

    // sort_by is stable, so equal timestamps keep first-seen order
    candidates.sort_by(|a, b| b.added_at.cmp(&a.added_at));
    candidates.truncate(output_len);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#trait::MockCatalogClient;
    use crate::{ScoutlistError, TrackPage};
    use chrono::{TimeZone, Utc};

    fn track(uri: &str, day: u32) -> Track {
        Track::new(uri, Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap())
    }

    fn uris(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.uri.as_str()).collect()
    }

    #[test]
    fn test_merge_dedupes_excludes_and_sorts() {
        let a = vec![track("t1", 3), track("t2", 1)];
        let b = vec![track("t2", 1), track("t3", 5)];
        let excluded: ExclusionSet = ["t1"].into_iter().collect();

        let merged = merge_candidates(vec![a.clone(), b.clone()], &excluded, 5);
        assert_eq!(uris(&merged), vec!["t3", "t2"]);

        let merged = merge_candidates(vec![a, b], &excluded, 1);
        assert_eq!(uris(&merged), vec!["t3"]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let a = vec![track("t1", 2)];
        let b = vec![track("t1", 9), track("t2", 5)];

        let merged = merge_candidates(vec![a, b], &ExclusionSet::new(), 10);
        assert_eq!(uris(&merged), vec!["t2", "t1"]);
        assert_eq!(merged[1].added_at, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let a = vec![track("x", 4), track("y", 4)];
        let b = vec![track("z", 4), track("w", 7)];

        let merged = merge_candidates(vec![a, b], &ExclusionSet::new(), 10);
        assert_eq!(uris(&merged), vec!["w", "x", "y", "z"]);
    }

    #[test]
    fn test_excluded_first_occurrence_drops_later_copies() {
        // Dedupe happens before exclusion, an excluded uri never resurfaces
        let a = vec![track("t1", 1)];
        let b = vec![track("t1", 8)];
        let excluded: ExclusionSet = ["t1"].into_iter().collect();

        assert!(merge_candidates(vec![a, b], &excluded, 10).is_empty());
    }

    #[test]
    fn test_short_and_empty_inputs() {
        assert!(merge_candidates(vec![], &ExclusionSet::new(), 3).is_empty());
        assert!(merge_candidates(vec![vec![], vec![]], &ExclusionSet::new(), 3).is_empty());

        let merged = merge_candidates(vec![vec![track("a", 1)]], &ExclusionSet::new(), 3);
        assert_eq!(merged.len(), 1);

        let merged = merge_candidates(vec![vec![track("a", 1)]], &ExclusionSet::new(), 0);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_excluding_a_non_candidate_changes_nothing() {
        let sources = vec![vec![track("a", 1), track("b", 2)]];
        let without = merge_candidates(sources.clone(), &ExclusionSet::new(), 5);
        let with: ExclusionSet = ["not-a-candidate"].into_iter().collect();
        let with = merge_candidates(sources, &with, 5);
        assert_eq!(uris(&without), uris(&with));
    }

    #[tokio::test]
    async fn test_zero_output_len_skips_reads() {
        let mock = MockCatalogClient::new();
        let result = aggregate_source_tracks(
            &mock,
            &[PlaylistRef::from_id("a")],
            &ExclusionSet::new(),
            0,
            &RetryConfig::default(),
        )
        .await
        .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_missing_source_aborts() {
        let mut mock = MockCatalogClient::new();
        mock.expect_read_playlist_page()
            .returning(|id, _| match id {
                "a" => Ok(TrackPage {
                    tracks: vec![track("t1", 1)],
                    next_page_token: None,
                }),
                other => Err(ScoutlistError::NotFound(other.to_string())),
            });

        let err = aggregate_source_tracks(
            &mock,
            &[PlaylistRef::from_id("a"), PlaylistRef::from_id("gone")],
            &ExclusionSet::new(),
            5,
            &RetryConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ScoutlistError::NotFound(ref id) if id == "gone"));
    }
}
