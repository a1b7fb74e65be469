//! Cue scheduler configuration.
//!
//! Loaded from a JSON file when the user supplies one. Every field has a
//! default, so a file only needs the entries it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sound::{SoundError, ToneTable};

/// Settings for a [`CueScheduler`](super::CueScheduler).
///
/// # Example
///
/// ```
/// use hiit_cues::cue::CueConfig;
///
/// let config = CueConfig::from_json_str(r#"{"start_muted": true}"#).unwrap();
/// assert!(config.start_muted);
/// assert_eq!(config.tones, hiit_cues::sound::ToneTable::default());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CueConfig {
    /// Whether the scheduler starts muted.
    #[serde(default)]
    pub start_muted: bool,

    /// Sound for each cue.
    #[serde(default)]
    pub tones: ToneTable,
}

impl CueConfig {
    /// Creates a configuration that starts muted.
    #[must_use]
    pub fn muted() -> Self {
        Self {
            start_muted: true,
            ..Self::default()
        }
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::ConfigIo` for malformed JSON and
    /// `SoundError::InvalidToneTable` for values out of range.
    pub fn from_json_str(json: &str) -> Result<Self, SoundError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SoundError::ConfigIo(e.to_string()))?;
        config.tones.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::ConfigIo` if the file cannot be read or parsed,
    /// and `SoundError::InvalidToneTable` for values out of range.
    pub fn load(path: &Path) -> Result<Self, SoundError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| SoundError::ConfigIo(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Serializes the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::ConfigIo` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, SoundError> {
        serde_json::to_string_pretty(self).map_err(|e| SoundError::ConfigIo(e.to_string()))
    }
}
