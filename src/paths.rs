//! Asset path conventions for player models, skins, and icons.
//!
//! Path construction is pure string building; whether a path actually
//! resolves is decided by the registration backend that receives it.

/// Longest accepted asset path or appearance descriptor, in bytes.
pub const MAX_ASSET_PATH: usize = 64;

/// Model substituted when the requested one is invalid or missing.
pub const DEFAULT_MODEL: &str = "male";

/// Skin substituted when every other fallback is exhausted.
pub const DEFAULT_SKIN: &str = "grunt";

/// Model whose default skin differs from the universal one.
pub const FEMALE_MODEL: &str = "female";

/// Default skin for the female model.
pub const FEMALE_SKIN: &str = "athena";

/// Weapon model filename every catalog starts with.
pub const DEFAULT_WEAPON_FILE: &str = "weapon.md2";

/// Descriptor the base appearance record is always resolved from.
pub const BASE_PLAYER_DESCRIPTOR: &str = "unnamed\\male/grunt";

/// Check whether a name is usable as a single path component.
///
/// Accepts ASCII alphanumerics, `_` and `-` only, so separators, traversal
/// sequences, and extensions never pass.
#[must_use]
pub fn is_safe_component(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|c| c.is_ascii_alphanumeric() || c == b'_' || c == b'-')
}

/// Path of a player model.
#[must_use]
pub fn player_model_path(model: &str) -> String {
    format!("players/{model}/tris.md2")
}

/// Path of a player skin.
#[must_use]
pub fn player_skin_path(model: &str, skin: &str) -> String {
    format!("players/{model}/{skin}.pcx")
}

/// Path of a per-player weapon model file.
#[must_use]
pub fn player_weapon_path(model: &str, weapon_file: &str) -> String {
    format!("players/{model}/{weapon_file}")
}

/// Path of a player status icon. The leading slash keeps the lookup out of
/// the pic search directories.
#[must_use]
pub fn player_icon_path(model: &str, skin: &str) -> String {
    format!("/players/{model}/{skin}_i.pcx")
}

/// Short map identifier derived from a world geometry path.
#[must_use]
pub fn map_shortname(path: &str) -> &str {
    let base = match path.rfind('/') {
        Some(i) => &path[i + 1..],
        None => path,
    };
    base.strip_suffix(".bsp").unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_component_accepts_plain_names() {
        assert!(is_safe_component("male"));
        assert!(is_safe_component("ctf_r"));
        assert!(is_safe_component("disguise-2"));
        assert!(is_safe_component("Athena"));
    }

    #[test]
    fn test_safe_component_rejects_separators_and_traversal() {
        assert!(!is_safe_component(".."));
        assert!(!is_safe_component("a/b"));
        assert!(!is_safe_component("a\\b"));
        assert!(!is_safe_component("skin.pcx"));
        assert!(!is_safe_component("sk in"));
    }

    #[test]
    fn test_safe_component_rejects_empty() {
        assert!(!is_safe_component(""));
    }

    #[test]
    fn test_player_path_layout() {
        assert_eq!(player_model_path("female"), "players/female/tris.md2");
        assert_eq!(player_skin_path("male", "grunt"), "players/male/grunt.pcx");
        assert_eq!(
            player_weapon_path("male", "weapon.md2"),
            "players/male/weapon.md2"
        );
        assert_eq!(
            player_icon_path("female", "athena"),
            "/players/female/athena_i.pcx"
        );
    }

    #[test]
    fn test_map_shortname() {
        assert_eq!(map_shortname("maps/base1.bsp"), "base1");
        assert_eq!(map_shortname("base1.bsp"), "base1");
        assert_eq!(map_shortname("maps/e1/q2dm1.bsp"), "q2dm1");
        assert_eq!(map_shortname("base1"), "base1");
    }
}
