//! Client-side loading preferences.
//!
//! Settings are plain data, serializable to RON so a user profile can be
//! kept on disk next to the rest of the client configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// How server-requested player skins are honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SkinPolicy {
    /// Use whatever valid model and skin the server specifies.
    #[default]
    Allow,
    /// Ignore the request entirely and use the default model and skin.
    ForceDefault,
    /// Ignore the requested skin; the female model keeps its own default
    /// skin, every other request falls to the universal default.
    ForceDefaultSkin,
}

/// Tunable precache behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Skin substitution policy applied while parsing descriptors.
    pub skin_policy: SkinPolicy,
    /// Register per-weapon visual models beyond the default one.
    pub vwep: bool,
}

impl ClientSettings {
    /// Create settings with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            skin_policy: SkinPolicy::Allow,
            vwep: true,
        }
    }

    /// Set the skin substitution policy.
    #[must_use]
    pub fn with_skin_policy(mut self, policy: SkinPolicy) -> Self {
        self.skin_policy = policy;
        self
    }

    /// Enable or disable visual weapon models.
    #[must_use]
    pub fn with_vwep(mut self, vwep: bool) -> Self {
        self.vwep = vwep;
        self
    }

    /// Load settings from a RON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content =
            fs::read_to_string(path).map_err(|e| SettingsError::IoError(e.to_string()))?;
        let settings: ClientSettings =
            ron::from_str(&content).map_err(|e| SettingsError::ParseError(e.to_string()))?;
        Ok(settings)
    }

    /// Load settings from a RON file, falling back to defaults when the file
    /// is missing or malformed.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => settings,
            Err(SettingsError::IoError(_)) => {
                log::debug!("no settings at {}, using defaults", path.display());
                Self::new()
            }
            Err(e) => {
                log::warn!("ignoring settings at {}: {e}", path.display());
                Self::new()
            }
        }
    }

    /// Save settings to a RON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SettingsError::SerializeError(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| SettingsError::IoError(e.to_string()))?;
        Ok(())
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur while loading or saving settings
#[derive(Debug, Clone)]
pub enum SettingsError {
    /// IO error
    IoError(String),
    /// Deserialization error
    ParseError(String),
    /// Serialization error
    SerializeError(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::ParseError(e) => write!(f, "Parse error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = ClientSettings::new();
        assert_eq!(settings.skin_policy, SkinPolicy::Allow);
        assert!(settings.vwep);
    }

    #[test]
    fn test_builder_chain() {
        let settings = ClientSettings::new()
            .with_skin_policy(SkinPolicy::ForceDefaultSkin)
            .with_vwep(false);
        assert_eq!(settings.skin_policy, SkinPolicy::ForceDefaultSkin);
        assert!(!settings.vwep);
    }

    #[test]
    fn test_ron_parse() {
        let settings: ClientSettings =
            ron::from_str("(skin_policy: ForceDefault, vwep: false)").unwrap();
        assert_eq!(settings.skin_policy, SkinPolicy::ForceDefault);
        assert!(!settings.vwep);
    }

    #[test]
    fn test_save_load_round_trip() {
        let settings = ClientSettings::new()
            .with_skin_policy(SkinPolicy::ForceDefaultSkin)
            .with_vwep(false);

        let dir = tempdir().unwrap();
        let path = dir.path().join("precache.ron");
        settings.save(&path).unwrap();

        let loaded = ClientSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(ClientSettings::load_or_default(&path), settings);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let settings = ClientSettings::load_or_default("definitely/not/here.ron");
        assert_eq!(settings, ClientSettings::new());
    }
}
