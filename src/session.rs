//! Client-side session state.

use crate::appearance::ClientAppearance;
use crate::backend::{ClipHandle, ImageHandle, ModelHandle, SoundHandle, WorldGeometry};
use crate::configstrings::{MAX_CLIENTS, MAX_IMAGES, MAX_MODELS, MAX_SOUNDS};
use crate::effects::EffectAssets;
use crate::precache::WeaponModelCatalog;

/// Everything the client holds onto for the current level.
///
/// The handle tables are parallel to the configstring tables and filled by
/// the precache pipeline. Appearance records outlive a single load, so a
/// client whose descriptor goes empty keeps the looks it last resolved.
#[derive(Debug)]
pub struct ClientSession {
    /// Short name of the current map, empty while disconnected.
    pub(crate) map_name: String,
    /// Whether this session replays a demo instead of a live connection.
    pub demo_playback: bool,
    pub(crate) world: Option<WorldGeometry>,
    pub(crate) model_handles: Vec<Option<ModelHandle>>,
    pub(crate) clip_handles: Vec<Option<ClipHandle>>,
    pub(crate) image_handles: Vec<Option<ImageHandle>>,
    pub(crate) sound_handles: Vec<Option<SoundHandle>>,
    pub(crate) effects: EffectAssets,
    pub(crate) weapon_models: WeaponModelCatalog,
    pub(crate) appearances: Vec<ClientAppearance>,
    pub(crate) base_appearance: ClientAppearance,
    pub(crate) precached: bool,
}

impl ClientSession {
    /// Create a disconnected session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map_name: String::new(),
            demo_playback: false,
            world: None,
            model_handles: vec![None; MAX_MODELS],
            clip_handles: vec![None; MAX_MODELS],
            image_handles: vec![None; MAX_IMAGES],
            sound_handles: vec![None; MAX_SOUNDS],
            effects: EffectAssets::default(),
            weapon_models: WeaponModelCatalog::default(),
            appearances: vec![ClientAppearance::default(); MAX_CLIENTS],
            base_appearance: ClientAppearance::default(),
            precached: false,
        }
    }

    /// Short name of the current map.
    #[must_use]
    pub fn map_name(&self) -> &str {
        &self.map_name
    }

    /// Set the short map name for the upcoming load.
    pub fn set_map_name(&mut self, name: &str) {
        self.map_name.replace_range(.., name);
    }

    /// Loaded world geometry, if any.
    #[must_use]
    pub fn world(&self) -> Option<&WorldGeometry> {
        self.world.as_ref()
    }

    /// Draw handle for the model in `slot`.
    #[must_use]
    pub fn model_handle(&self, slot: usize) -> Option<ModelHandle> {
        self.model_handles[slot]
    }

    /// Collision handle for the inline model in `slot`.
    #[must_use]
    pub fn clip_handle(&self, slot: usize) -> Option<ClipHandle> {
        self.clip_handles[slot]
    }

    /// Handle for the image in `slot`.
    #[must_use]
    pub fn image_handle(&self, slot: usize) -> Option<ImageHandle> {
        self.image_handles[slot]
    }

    /// Handle for the sound in `slot`.
    #[must_use]
    pub fn sound_handle(&self, slot: usize) -> Option<SoundHandle> {
        self.sound_handles[slot]
    }

    /// Built-in effect asset handles.
    #[must_use]
    pub fn effects(&self) -> &EffectAssets {
        &self.effects
    }

    /// Weapon model catalog of the current level.
    #[must_use]
    pub fn weapon_models(&self) -> &WeaponModelCatalog {
        &self.weapon_models
    }

    /// Appearance record for the client in `slot`.
    #[must_use]
    pub fn appearance(&self, slot: usize) -> &ClientAppearance {
        &self.appearances[slot]
    }

    /// Fallback appearance for clients whose own record is unusable.
    #[must_use]
    pub fn base_appearance(&self) -> &ClientAppearance {
        &self.base_appearance
    }

    /// Whether the last precache run completed.
    #[must_use]
    pub fn is_precached(&self) -> bool {
        self.precached
    }

    /// Drop per-level handles ahead of a fresh load.
    ///
    /// Appearance records are kept; the pipeline re-resolves every slot
    /// that still has a descriptor and leaves the rest as they were.
    pub(crate) fn reset_for_load(&mut self) {
        self.precached = false;
        self.world = None;
        self.model_handles.fill(None);
        self.clip_handles.fill(None);
        self.image_handles.fill(None);
        self.sound_handles.fill(None);
        self.effects.clear();
    }

    /// Wipe the whole session, as on disconnect.
    ///
    /// The demo flag is left alone; it describes the connection, not the
    /// level.
    pub fn clear(&mut self) {
        self.reset_for_load();
        self.map_name.clear();
        self.weapon_models = WeaponModelCatalog::default();
        for record in &mut self.appearances {
            *record = ClientAppearance::default();
        }
        self.base_appearance = ClientAppearance::default();
    }
}

impl Default for ClientSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = ClientSession::new();
        assert_eq!(session.map_name(), "");
        assert!(!session.is_precached());
        assert_eq!(session.model_handle(MAX_MODELS - 1), None);
        assert_eq!(session.appearance(0).name, "");
    }

    #[test]
    fn test_reset_keeps_appearances() {
        let mut session = ClientSession::new();
        session.appearances[5].name = "Bones".to_string();
        session.model_handles[2] = ModelHandle::from_raw(7);
        session.precached = true;

        session.reset_for_load();
        assert!(!session.is_precached());
        assert_eq!(session.model_handle(2), None);
        assert_eq!(session.appearance(5).name, "Bones");
    }

    #[test]
    fn test_clear_wipes_everything() {
        let mut session = ClientSession::new();
        session.set_map_name("base1");
        session.appearances[5].name = "Bones".to_string();
        session.demo_playback = true;

        session.clear();
        assert_eq!(session.map_name(), "");
        assert_eq!(session.appearance(5).name, "");
        assert!(session.demo_playback);
    }
}
