//! Resolved per-client appearance records.

use crate::backend::{ImageHandle, ModelHandle, RenderBackend, SkinHandle};
use crate::paths::{
    DEFAULT_MODEL, DEFAULT_SKIN, FEMALE_MODEL, FEMALE_SKIN, player_icon_path, player_model_path,
    player_skin_path, player_weapon_path,
};
use crate::precache::{MAX_CLIENT_WEAPON_MODELS, WeaponModelCatalog};

use super::AppearanceDescriptor;

/// Renderer-ready appearance for one client slot.
///
/// A record is either complete (model, skin, icon, and the first weapon
/// handle all present) or cleared down to the display name; a partly
/// resolved player is never kept around to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAppearance {
    /// Display name from the descriptor. Survives a clear.
    pub name: String,
    /// Model directory the assets resolved under; empty when cleared.
    pub model_name: String,
    /// Skin the assets resolved under; empty when cleared.
    pub skin_name: String,
    /// Player body model.
    pub model: Option<ModelHandle>,
    /// Skin applied to the body model.
    pub skin: Option<SkinHandle>,
    /// Scoreboard icon.
    pub icon: Option<ImageHandle>,
    /// View weapon models, indexed like the catalog that resolved them.
    pub weapons: [Option<ModelHandle>; MAX_CLIENT_WEAPON_MODELS],
}

impl ClientAppearance {
    /// Resolve a parsed descriptor into a complete appearance record.
    ///
    /// Walks the fallback chain: a missing model falls to "male", a missing
    /// skin on the female model tries "athena", any still-missing skin
    /// retries under "male", and the last resort is "grunt". Weapons that
    /// fail under the resolved model are retried under "male" without
    /// changing the record's model. If the chain still leaves a required
    /// handle missing, the whole record is cleared.
    #[must_use]
    pub fn resolve(
        descriptor: &AppearanceDescriptor,
        catalog: &WeaponModelCatalog,
        renderer: &mut dyn RenderBackend,
    ) -> Self {
        let mut model_name = descriptor.model.clone();
        let mut skin_name = descriptor.skin.clone();

        let mut model = renderer.register_model(&player_model_path(&model_name));
        if model.is_none() && !model_name.eq_ignore_ascii_case(DEFAULT_MODEL) {
            model_name = DEFAULT_MODEL.to_string();
            model = renderer.register_model(&player_model_path(DEFAULT_MODEL));
        }

        let mut skin = renderer.register_skin(&player_skin_path(&model_name, &skin_name));

        // the female model carries its own stock skin
        if skin.is_none() && model_name.eq_ignore_ascii_case(FEMALE_MODEL) {
            skin_name = FEMALE_SKIN.to_string();
            skin = renderer.register_skin(&player_skin_path(FEMALE_MODEL, FEMALE_SKIN));
        }

        // the male model may carry the requested skin (team skins)
        if skin.is_none() && !model_name.eq_ignore_ascii_case(DEFAULT_MODEL) {
            model_name = DEFAULT_MODEL.to_string();
            model = renderer.register_model(&player_model_path(DEFAULT_MODEL));
            skin = renderer.register_skin(&player_skin_path(DEFAULT_MODEL, &skin_name));
        }

        // last resort
        if skin.is_none() {
            skin_name = DEFAULT_SKIN.to_string();
            skin = renderer.register_skin(&player_skin_path(DEFAULT_MODEL, DEFAULT_SKIN));
        }

        let mut weapons = [None; MAX_CLIENT_WEAPON_MODELS];
        for (slot, weapon_file) in catalog.iter().enumerate() {
            let mut handle =
                renderer.register_model(&player_weapon_path(&model_name, weapon_file));
            if handle.is_none() && !model_name.eq_ignore_ascii_case(DEFAULT_MODEL) {
                handle = renderer.register_model(&player_weapon_path(DEFAULT_MODEL, weapon_file));
            }
            weapons[slot] = handle;
        }

        let icon = renderer.register_pic(&player_icon_path(&model_name, &skin_name));

        let mut record = Self {
            name: descriptor.name.clone(),
            model_name,
            skin_name,
            model,
            skin,
            icon,
            weapons,
        };
        if !record.is_complete() {
            log::debug!("appearance for {:?} is incomplete, clearing", record.name);
            record.clear_resolved();
        }
        record
    }

    /// Whether every handle required for drawing resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.model.is_some()
            && self.skin.is_some()
            && self.icon.is_some()
            && self.weapons[0].is_some()
    }

    /// Drop every resolved handle and asset name, keeping the display name.
    pub fn clear_resolved(&mut self) {
        self.model_name.clear();
        self.skin_name.clear();
        self.model = None;
        self.skin = None;
        self.icon = None;
        self.weapons = [None; MAX_CLIENT_WEAPON_MODELS];
    }
}

impl Default for ClientAppearance {
    fn default() -> Self {
        Self {
            name: String::new(),
            model_name: String::new(),
            skin_name: String::new(),
            model: None,
            skin: None,
            icon: None,
            weapons: [None; MAX_CLIENT_WEAPON_MODELS],
        }
    }
}
