use crate::playlist_id::parse_playlist_id;
use crate::retry::RetryConfig;
use crate::{PlaylistRef, Result, ScoutlistError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum number of track ids the catalog accepts in one add call.
pub const DEFAULT_WRITE_CHUNK_SIZE: usize = 100;

/// Prefix of generated destination playlist names.
pub const DEFAULT_NAME_PREFIX: &str = "scout";

/// What to do when an exclude playlist cannot be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPlaylistPolicy {
    /// Fail the run with `NotFound`.
    #[default]
    Abort,
    /// Log a warning and carry on without that playlist.
    Skip,
}

/// Pipeline tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    pub retry: RetryConfig,
    /// Track ids per add call
    pub write_chunk_size: usize,
    /// Destination names are `{name_prefix}_{YYYYMMDD}_{HHMMSS}`
    pub name_prefix: String,
    pub missing_exclude_policy: MissingPlaylistPolicy,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            write_chunk_size: DEFAULT_WRITE_CHUNK_SIZE,
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            missing_exclude_policy: MissingPlaylistPolicy::default(),
        }
    }
}

impl ScoutConfig {
    pub fn validate(&self) -> Result<()> {
        if self.write_chunk_size == 0 {
            return Err(ScoutlistError::Invalid(
                "write_chunk_size must be at least 1".to_string(),
            ));
        }
        if self.name_prefix.trim().is_empty() {
            return Err(ScoutlistError::Invalid(
                "name_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything one run needs: where to read from, what to skip, how many to keep.
///
/// Stored as JSON, e.g.
///
/// ```json
/// {
///   "sources": [{"id": "37i9dQZF1DXcBWIGoYBM5M", "display_name": "Today's Top Hits"}],
///   "excludes": [{"id": "spotify:playlist:1a2b3c"}],
///   "output_len": 50
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Owner of the destination playlist; the authenticated user when absent
    #[serde(default)]
    pub owner_id: Option<String>,
    pub sources: Vec<PlaylistRef>,
    #[serde(default)]
    pub excludes: Vec<PlaylistRef>,
    pub output_len: usize,
    #[serde(default)]
    pub config: ScoutConfig,
}

impl Recipe {
    /// Default recipe location: `~/.config/scoutlist/recipe.json` on Linux.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ScoutlistError::Invalid("Cannot determine the user config directory".to_string())
        })?;
        Ok(config_dir.join("scoutlist").join("recipe.json"))
    }

    /// Load and normalise a recipe file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let recipe = Self::from_json(&json)?;
        log::debug!("Recipe loaded from: {}", path.display());
        Ok(recipe)
    }

    /// Parse a recipe, normalising every playlist id.
    ///
    /// Ids may be given as bare ids, `spotify:playlist:` URIs or playlist
    /// URLs; anything else is rejected as `Invalid`.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut recipe: Recipe = serde_json::from_str(json)?;
        for playlist in recipe.sources.iter_mut().chain(recipe.excludes.iter_mut()) {
            playlist.id = parse_playlist_id(&playlist.id)?;
        }
        recipe.config.validate()?;
        Ok(recipe)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_defaults_and_normalisation() {
        let recipe = Recipe::from_json(
            r#"{
                "sources": [
                    {"id": "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc"},
                    {"id": "spotify:playlist:1a2B3c", "display_name": "Mine"}
                ],
                "output_len": 20
            }"#,
        )
        .unwrap();

        assert_eq!(recipe.sources[0].id, "37i9dQZF1DXcBWIGoYBM5M");
        assert_eq!(recipe.sources[1].id, "1a2B3c");
        assert_eq!(recipe.sources[1].display_name, "Mine");
        assert!(recipe.excludes.is_empty());
        assert_eq!(recipe.owner_id, None);
        assert_eq!(recipe.config, ScoutConfig::default());
        assert_eq!(recipe.config.write_chunk_size, 100);
    }

    #[test]
    fn test_recipe_rejects_bad_ids() {
        let err = Recipe::from_json(r#"{"sources": [{"id": "not a playlist!"}], "output_len": 1}"#)
            .unwrap_err();
        assert!(matches!(err, ScoutlistError::Invalid(_)));
    }

    #[test]
    fn test_recipe_rejects_negative_output_len() {
        let err = Recipe::from_json(r#"{"sources": [], "output_len": -3}"#).unwrap_err();
        assert!(matches!(err, ScoutlistError::Parse(_)));
    }

    #[test]
    fn test_partial_config_overrides() {
        let recipe = Recipe::from_json(
            r#"{
                "sources": [],
                "output_len": 5,
                "config": {"write_chunk_size": 50, "missing_exclude_policy": "skip"}
            }"#,
        )
        .unwrap();
        assert_eq!(recipe.config.write_chunk_size, 50);
        assert_eq!(recipe.config.missing_exclude_policy, MissingPlaylistPolicy::Skip);
        assert_eq!(recipe.config.name_prefix, "scout");
        assert_eq!(recipe.config.retry, RetryConfig::default());
    }

    #[test]
    fn test_zero_chunk_size_is_invalid() {
        let config = ScoutConfig {
            write_chunk_size: 0,
            ..ScoutConfig::default()
        };
        assert!(matches!(config.validate(), Err(ScoutlistError::Invalid(_))));
    }

    #[test]
    fn test_recipe_round_trips_through_file() {
        let dir = std::env::temp_dir().join(format!("scoutlist-recipe-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("recipe.json");

        let recipe = Recipe {
            owner_id: Some("me".to_string()),
            sources: vec![PlaylistRef::new("abc", "them", "Theirs")],
            excludes: vec![PlaylistRef::from_id("def")],
            output_len: 30,
            config: ScoutConfig::default(),
        };
        fs::write(&path, recipe.to_json().unwrap()).unwrap();

        assert_eq!(Recipe::load(&path).unwrap(), recipe);
        fs::remove_dir_all(&dir).unwrap();
    }
}
