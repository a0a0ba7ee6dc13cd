//! Server-broadcast level state.
//!
//! A `ConfigStrings` table holds the short text slots the authoritative
//! session source broadcasts for one level: asset paths, per-client
//! appearance descriptors, and sky/checksum parameters. The transport layer
//! fills it; the precache pipeline only reads it.

/// Model slot capacity. Slot 0 is reserved, slot 1 names the world geometry.
pub const MAX_MODELS: usize = 256;

/// Image slot capacity. Slot 0 is reserved.
pub const MAX_IMAGES: usize = 256;

/// Sound slot capacity. Slot 0 is reserved.
pub const MAX_SOUNDS: usize = 256;

/// Client slot capacity.
pub const MAX_CLIENTS: usize = 256;

/// Model slot carrying the world geometry path.
pub const WORLD_MODEL_SLOT: usize = 1;

/// First model slot available to regular level assets.
pub const FIRST_GENERIC_MODEL_SLOT: usize = 2;

/// Leading marker of inline world sub-geometry entries.
pub const INLINE_MODEL_MARKER: char = '*';

/// Leading marker of visual weapon model entries.
pub const WEAPON_MODEL_MARKER: char = '#';

/// Indexed table of level configstrings.
///
/// Capacities are fixed; the tables are sparse and scanned with the empty
/// string as the end-of-list sentinel.
#[derive(Debug, Clone)]
pub struct ConfigStrings {
    models: Vec<String>,
    images: Vec<String>,
    sounds: Vec<String>,
    player_skins: Vec<String>,
    sky_name: String,
    sky_rotate: String,
    sky_axis: String,
    map_checksum: String,
}

impl ConfigStrings {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            models: vec![String::new(); MAX_MODELS],
            images: vec![String::new(); MAX_IMAGES],
            sounds: vec![String::new(); MAX_SOUNDS],
            player_skins: vec![String::new(); MAX_CLIENTS],
            sky_name: String::new(),
            sky_rotate: String::new(),
            sky_axis: String::new(),
            map_checksum: String::new(),
        }
    }

    /// Reset every slot to empty.
    pub fn clear(&mut self) {
        for s in self
            .models
            .iter_mut()
            .chain(self.images.iter_mut())
            .chain(self.sounds.iter_mut())
            .chain(self.player_skins.iter_mut())
        {
            s.clear();
        }
        self.sky_name.clear();
        self.sky_rotate.clear();
        self.sky_axis.clear();
        self.map_checksum.clear();
    }

    /// Model path at `slot`.
    #[must_use]
    pub fn model(&self, slot: usize) -> &str {
        &self.models[slot]
    }

    /// Store a model path.
    pub fn set_model(&mut self, slot: usize, value: &str) {
        assert!(slot < MAX_MODELS, "model slot {slot} out of range");
        self.models[slot].replace_range(.., value);
    }

    /// Image path at `slot`.
    #[must_use]
    pub fn image(&self, slot: usize) -> &str {
        &self.images[slot]
    }

    /// Store an image path.
    pub fn set_image(&mut self, slot: usize, value: &str) {
        assert!(slot < MAX_IMAGES, "image slot {slot} out of range");
        self.images[slot].replace_range(.., value);
    }

    /// Sound name at `slot`.
    #[must_use]
    pub fn sound(&self, slot: usize) -> &str {
        &self.sounds[slot]
    }

    /// Store a sound name.
    pub fn set_sound(&mut self, slot: usize, value: &str) {
        assert!(slot < MAX_SOUNDS, "sound slot {slot} out of range");
        self.sounds[slot].replace_range(.., value);
    }

    /// Appearance descriptor for the client in `slot`, possibly empty.
    #[must_use]
    pub fn player_skin(&self, slot: usize) -> &str {
        &self.player_skins[slot]
    }

    /// Store an appearance descriptor.
    pub fn set_player_skin(&mut self, slot: usize, value: &str) {
        assert!(slot < MAX_CLIENTS, "client slot {slot} out of range");
        self.player_skins[slot].replace_range(.., value);
    }

    /// Path of the world geometry, empty until the level is announced.
    #[must_use]
    pub fn world_map(&self) -> &str {
        &self.models[WORLD_MODEL_SLOT]
    }

    /// Store the world geometry path.
    pub fn set_world_map(&mut self, path: &str) {
        self.models[WORLD_MODEL_SLOT].replace_range(.., path);
    }

    /// Sky box name.
    #[must_use]
    pub fn sky_name(&self) -> &str {
        &self.sky_name
    }

    /// Store the sky box name.
    pub fn set_sky_name(&mut self, value: &str) {
        self.sky_name.replace_range(.., value);
    }

    /// Sky rotation speed, textual.
    #[must_use]
    pub fn sky_rotate(&self) -> &str {
        &self.sky_rotate
    }

    /// Store the sky rotation speed.
    pub fn set_sky_rotate(&mut self, value: &str) {
        self.sky_rotate.replace_range(.., value);
    }

    /// Sky rotation axis as a space-separated float triple, textual.
    #[must_use]
    pub fn sky_axis(&self) -> &str {
        &self.sky_axis
    }

    /// Store the sky rotation axis triple.
    pub fn set_sky_axis(&mut self, value: &str) {
        self.sky_axis.replace_range(.., value);
    }

    /// World geometry checksum announced by the server, textual and possibly
    /// empty.
    #[must_use]
    pub fn map_checksum(&self) -> &str {
        &self.map_checksum
    }

    /// Store the announced world checksum.
    pub fn set_map_checksum(&mut self, value: &str) {
        self.map_checksum.replace_range(.., value);
    }
}

impl Default for ConfigStrings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_start_empty() {
        let cs = ConfigStrings::new();
        assert_eq!(cs.model(1), "");
        assert_eq!(cs.image(MAX_IMAGES - 1), "");
        assert_eq!(cs.player_skin(0), "");
        assert_eq!(cs.map_checksum(), "");
    }

    #[test]
    fn test_world_map_aliases_model_slot_one() {
        let mut cs = ConfigStrings::new();
        cs.set_world_map("maps/base1.bsp");
        assert_eq!(cs.model(WORLD_MODEL_SLOT), "maps/base1.bsp");
        cs.set_model(WORLD_MODEL_SLOT, "maps/q2dm1.bsp");
        assert_eq!(cs.world_map(), "maps/q2dm1.bsp");
    }

    #[test]
    fn test_set_and_clear() {
        let mut cs = ConfigStrings::new();
        cs.set_model(2, "models/objects/barrels/tris.md2");
        cs.set_sound(1, "world/amb1.wav");
        cs.set_player_skin(3, "Bones\\male/grunt");
        cs.set_sky_axis("0 0 1");
        cs.clear();
        assert_eq!(cs.model(2), "");
        assert_eq!(cs.sound(1), "");
        assert_eq!(cs.player_skin(3), "");
        assert_eq!(cs.sky_axis(), "");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_model_slot_bound_is_enforced() {
        let mut cs = ConfigStrings::new();
        cs.set_model(MAX_MODELS, "too far");
    }
}
