//! View weapon model catalog.

use smallvec::SmallVec;

use crate::configstrings::{
    ConfigStrings, FIRST_GENERIC_MODEL_SLOT, MAX_MODELS, WEAPON_MODEL_MARKER,
};
use crate::paths::DEFAULT_WEAPON_FILE;

/// Upper bound on catalog entries, the stock weapon included.
pub const MAX_CLIENT_WEAPON_MODELS: usize = 20;

/// Per-level list of weapon model file names.
///
/// Entry 0 is always the stock weapon file; the rest are gathered from
/// marker-prefixed model configstrings. Appearance records index their
/// weapon handles by catalog position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponModelCatalog {
    entries: SmallVec<[String; MAX_CLIENT_WEAPON_MODELS]>,
}

impl WeaponModelCatalog {
    /// Gather weapon models from the model configstrings.
    ///
    /// When `vwep` is false the catalog holds only the stock weapon.
    /// Otherwise the model table is scanned from the first generic slot up
    /// to the first empty one, collecting entries whose configstring starts
    /// with the weapon marker, until the catalog is full.
    #[must_use]
    pub fn build(strings: &ConfigStrings, vwep: bool) -> Self {
        let mut entries = SmallVec::new();
        entries.push(DEFAULT_WEAPON_FILE.to_string());

        if vwep {
            for slot in FIRST_GENERIC_MODEL_SLOT..MAX_MODELS {
                let name = strings.model(slot);
                if name.is_empty() {
                    break;
                }
                let Some(file) = name.strip_prefix(WEAPON_MODEL_MARKER) else {
                    continue;
                };

                entries.push(file.to_string());
                if entries.len() == MAX_CLIENT_WEAPON_MODELS {
                    break;
                }
            }
        }

        Self { entries }
    }

    /// Number of catalog entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries. A built catalog never is; this
    /// only holds for a value that was never filled in.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File name at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Iterate over the file names in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl Default for WeaponModelCatalog {
    /// Catalog holding only the stock weapon file.
    fn default() -> Self {
        let mut entries = SmallVec::new();
        entries.push(DEFAULT_WEAPON_FILE.to_string());
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_holds_stock_weapon() {
        let catalog = WeaponModelCatalog::default();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0), Some("weapon.md2"));
    }

    #[test]
    fn test_build_collects_marked_entries_in_slot_order() {
        let mut strings = ConfigStrings::new();
        strings.set_model(2, "models/objects/barrels/tris.md2");
        strings.set_model(3, "#w_blaster.md2");
        strings.set_model(4, "models/weapons/g_rail/tris.md2");
        strings.set_model(5, "#w_railgun.md2");

        let catalog = WeaponModelCatalog::build(&strings, true);
        let files: Vec<&str> = catalog.iter().collect();
        assert_eq!(files, ["weapon.md2", "w_blaster.md2", "w_railgun.md2"]);
    }

    #[test]
    fn test_build_stops_at_first_empty_slot() {
        let mut strings = ConfigStrings::new();
        strings.set_model(2, "#w_blaster.md2");
        // slot 3 left empty
        strings.set_model(4, "#w_railgun.md2");

        let catalog = WeaponModelCatalog::build(&strings, true);
        let files: Vec<&str> = catalog.iter().collect();
        assert_eq!(files, ["weapon.md2", "w_blaster.md2"]);
    }

    #[test]
    fn test_build_without_vwep_keeps_only_stock_weapon() {
        let mut strings = ConfigStrings::new();
        strings.set_model(2, "#w_blaster.md2");

        let catalog = WeaponModelCatalog::build(&strings, false);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0), Some("weapon.md2"));
    }

    #[test]
    fn test_build_respects_capacity() {
        let mut strings = ConfigStrings::new();
        for slot in 2..40 {
            strings.set_model(slot, &format!("#w_{slot}.md2"));
        }

        let catalog = WeaponModelCatalog::build(&strings, true);
        assert_eq!(catalog.len(), MAX_CLIENT_WEAPON_MODELS);
        assert_eq!(catalog.get(0), Some("weapon.md2"));
        assert_eq!(
            catalog.get(MAX_CLIENT_WEAPON_MODELS - 1),
            Some("w_20.md2")
        );
    }
}
