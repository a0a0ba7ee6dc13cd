//! Level manifests.
//!
//! A manifest is a JSON description of one level's precache inputs, enough
//! to drive a full pipeline run without a live session source. Offline
//! tools write them; [`LevelManifest::apply`] turns one into a populated
//! configstring table.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::configstrings::{
    ConfigStrings, FIRST_GENERIC_MODEL_SLOT, MAX_CLIENTS, MAX_IMAGES, MAX_MODELS, MAX_SOUNDS,
};

/// Appearance descriptor for one client slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    /// Client slot index.
    pub slot: usize,
    /// Raw appearance descriptor.
    pub descriptor: String,
}

/// JSON-serializable description of a level's precache inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelManifest {
    /// World geometry path.
    pub map: String,
    /// Expected world checksum, when the source cares about versions.
    #[serde(default)]
    pub checksum: Option<i32>,
    /// Generic model paths, in slot order.
    #[serde(default)]
    pub models: Vec<String>,
    /// Image names, in slot order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Sound names, in slot order.
    #[serde(default)]
    pub sounds: Vec<String>,
    /// Connected clients.
    #[serde(default)]
    pub players: Vec<PlayerSlot>,
    /// Sky box name.
    #[serde(default)]
    pub sky: String,
    /// Sky rotation speed in degrees per second.
    #[serde(default)]
    pub sky_rotate: f32,
    /// Sky rotation axis.
    #[serde(default)]
    pub sky_axis: Vec3,
}

impl LevelManifest {
    /// Parse a manifest from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(json).map_err(|e| ManifestError::ParseError(e.to_string()))
    }

    /// Load a manifest from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let content =
            fs::read_to_string(path).map_err(|e| ManifestError::IoError(e.to_string()))?;
        Self::from_json(&content)
    }

    /// Save the manifest to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ManifestError::SerializeError(e.to_string()))?;
        fs::write(path, json).map_err(|e| ManifestError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Write the manifest into a configstring table.
    ///
    /// Entries beyond a table's capacity are dropped with a warning; a
    /// manifest that large is broken, not worth refusing the whole level
    /// over.
    pub fn apply(&self, strings: &mut ConfigStrings) {
        strings.clear();
        strings.set_world_map(&self.map);
        if let Some(checksum) = self.checksum {
            strings.set_map_checksum(&checksum.to_string());
        }

        let room = MAX_MODELS - FIRST_GENERIC_MODEL_SLOT;
        if self.models.len() > room {
            log::warn!("manifest lists {} models, keeping {room}", self.models.len());
        }
        for (i, name) in self.models.iter().take(room).enumerate() {
            strings.set_model(FIRST_GENERIC_MODEL_SLOT + i, name);
        }

        let room = MAX_IMAGES - 1;
        if self.images.len() > room {
            log::warn!("manifest lists {} images, keeping {room}", self.images.len());
        }
        for (i, name) in self.images.iter().take(room).enumerate() {
            strings.set_image(1 + i, name);
        }

        let room = MAX_SOUNDS - 1;
        if self.sounds.len() > room {
            log::warn!("manifest lists {} sounds, keeping {room}", self.sounds.len());
        }
        for (i, name) in self.sounds.iter().take(room).enumerate() {
            strings.set_sound(1 + i, name);
        }

        for player in &self.players {
            if player.slot >= MAX_CLIENTS {
                log::warn!("manifest client slot {} out of range, dropping", player.slot);
                continue;
            }
            strings.set_player_skin(player.slot, &player.descriptor);
        }

        strings.set_sky_name(&self.sky);
        strings.set_sky_rotate(&self.sky_rotate.to_string());
        let axis = self.sky_axis;
        strings.set_sky_axis(&format!("{} {} {}", axis.x, axis.y, axis.z));
    }
}

/// Errors that can occur while loading or saving manifests
#[derive(Debug, Clone)]
pub enum ManifestError {
    /// IO error
    IoError(String),
    /// Deserialization error
    ParseError(String),
    /// Serialization error
    SerializeError(String),
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::ParseError(e) => write!(f, "Parse error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
        }
    }
}

impl std::error::Error for ManifestError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_minimal_manifest() {
        let manifest = LevelManifest::from_json(r#"{"map": "maps/base1.bsp"}"#).unwrap();
        assert_eq!(manifest.map, "maps/base1.bsp");
        assert_eq!(manifest.checksum, None);
        assert!(manifest.models.is_empty());
        assert_eq!(manifest.sky, "");
        assert_eq!(manifest.sky_axis, Vec3::ZERO);
    }

    #[test]
    fn test_apply_populates_the_table() {
        let manifest = LevelManifest::from_json(
            r##"{
                "map": "maps/base1.bsp",
                "checksum": 1577,
                "models": ["models/objects/barrels/tris.md2", "#w_blaster.md2"],
                "images": ["i_health"],
                "sounds": ["world/amb1.wav"],
                "players": [{"slot": 0, "descriptor": "Bones\\male/grunt"}],
                "sky": "unit1_",
                "sky_rotate": 90.0,
                "sky_axis": [0.0, 0.0, 1.0]
            }"##,
        )
        .unwrap();

        let mut strings = ConfigStrings::new();
        manifest.apply(&mut strings);

        assert_eq!(strings.world_map(), "maps/base1.bsp");
        assert_eq!(strings.map_checksum(), "1577");
        assert_eq!(strings.model(2), "models/objects/barrels/tris.md2");
        assert_eq!(strings.model(3), "#w_blaster.md2");
        assert_eq!(strings.image(1), "i_health");
        assert_eq!(strings.sound(1), "world/amb1.wav");
        assert_eq!(strings.player_skin(0), "Bones\\male/grunt");
        assert_eq!(strings.sky_name(), "unit1_");
        assert_eq!(strings.sky_rotate(), "90");
        assert_eq!(strings.sky_axis(), "0 0 1");
    }

    #[test]
    fn test_apply_truncates_overfull_categories() {
        let manifest = LevelManifest {
            map: "maps/base1.bsp".to_string(),
            checksum: None,
            models: (0..300).map(|i| format!("models/m{i}.md2")).collect(),
            images: (0..300).map(|i| format!("pic{i}")).collect(),
            sounds: (0..300).map(|i| format!("snd{i}.wav")).collect(),
            players: Vec::new(),
            sky: String::new(),
            sky_rotate: 0.0,
            sky_axis: Vec3::ZERO,
        };

        let mut strings = ConfigStrings::new();
        manifest.apply(&mut strings);

        assert_eq!(strings.model(FIRST_GENERIC_MODEL_SLOT), "models/m0.md2");
        assert_eq!(strings.model(MAX_MODELS - 1), "models/m253.md2");
        assert_eq!(strings.image(1), "pic0");
        assert_eq!(strings.image(MAX_IMAGES - 1), "pic254");
        assert_eq!(strings.sound(1), "snd0.wav");
        assert_eq!(strings.sound(MAX_SOUNDS - 1), "snd254.wav");
    }

    #[test]
    fn test_apply_drops_out_of_range_player_slots() {
        let manifest = LevelManifest::from_json(
            r#"{
                "map": "maps/base1.bsp",
                "players": [
                    {"slot": 300, "descriptor": "ghost\\male/grunt"},
                    {"slot": 1, "descriptor": "Bones\\male/grunt"}
                ]
            }"#,
        )
        .unwrap();

        let mut strings = ConfigStrings::new();
        manifest.apply(&mut strings);
        assert_eq!(strings.player_skin(1), "Bones\\male/grunt");
    }

    #[test]
    fn test_save_load_round_trip() {
        let manifest = LevelManifest {
            map: "maps/base1.bsp".to_string(),
            checksum: Some(1577),
            models: vec!["models/objects/barrels/tris.md2".to_string()],
            images: vec!["i_health".to_string()],
            sounds: vec!["world/amb1.wav".to_string()],
            players: vec![PlayerSlot {
                slot: 0,
                descriptor: "Bones\\male/grunt".to_string(),
            }],
            sky: "unit1_".to_string(),
            sky_rotate: 90.0,
            sky_axis: Vec3::new(0.0, 0.0, 1.0),
        };

        let dir = tempdir().unwrap();
        let path = dir.path().join("base1.json");
        manifest.save(&path).unwrap();

        let loaded = LevelManifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn test_bad_json_errors() {
        let err = LevelManifest::from_json("{").unwrap_err();
        assert!(matches!(err, ManifestError::ParseError(_)));
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = LevelManifest::load("definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ManifestError::IoError(_)));
    }
}
