//! Appearance descriptor parsing.
//!
//! A descriptor is the raw `name\model/skin` string broadcast for each
//! client slot. Parsing isolates the display name and validates the model
//! and skin components, substituting defaults so the output always names
//! assets that can at least be attempted.

use crate::paths::{
    DEFAULT_MODEL, DEFAULT_SKIN, FEMALE_MODEL, FEMALE_SKIN, MAX_ASSET_PATH, is_safe_component,
};
use crate::settings::SkinPolicy;

/// Parsed appearance request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppearanceDescriptor {
    /// Player-chosen display name, possibly empty. Not validated.
    pub name: String,
    /// Model directory name, safe and non-empty.
    pub model: String,
    /// Skin name, safe and non-empty.
    pub skin: String,
}

impl AppearanceDescriptor {
    /// Parse a raw descriptor.
    ///
    /// Text before the first `\` is the display name; the rest is the
    /// model/skin string, split at the first `/` (or `\`). Components that
    /// fail validation, and components the policy rejects, are replaced by
    /// the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the descriptor reaches the transport length
    /// bound; data that long is corrupt, not a resolvable request
    pub fn parse(raw: &str, policy: SkinPolicy) -> Result<Self, DescriptorError> {
        // the configstring transport already bounds descriptor length,
        // but check anyway
        if raw.len() >= MAX_ASSET_PATH {
            return Err(DescriptorError::Oversize { len: raw.len() });
        }

        let (name, skin_string) = match raw.find('\\') {
            Some(i) => (&raw[..i], &raw[i + 1..]),
            None => ("", raw),
        };

        let (model, skin) = split_skin_string(skin_string, policy);
        Ok(Self {
            name: name.to_string(),
            model,
            skin,
        })
    }
}

/// Split a model/skin string and validate both components.
fn split_skin_string(s: &str, policy: SkinPolicy) -> (String, String) {
    let sep = s.find('/').or_else(|| s.find('\\'));
    let Some(sep) = sep.filter(|&i| i > 0) else {
        return universal_default();
    };
    let model = &s[..sep];
    let skin = &s[sep + 1..];

    if policy == SkinPolicy::ForceDefaultSkin || !is_safe_component(skin) {
        return default_skin_for(model);
    }
    if policy == SkinPolicy::ForceDefault || !is_safe_component(model) {
        return universal_default();
    }
    (model.to_string(), skin.to_string())
}

/// Default pair for a model whose skin was rejected. Only the female model
/// keeps its identity here; anything else falls to the universal default.
fn default_skin_for(model: &str) -> (String, String) {
    if model.eq_ignore_ascii_case(FEMALE_MODEL) {
        (FEMALE_MODEL.to_string(), FEMALE_SKIN.to_string())
    } else {
        universal_default()
    }
}

fn universal_default() -> (String, String) {
    (DEFAULT_MODEL.to_string(), DEFAULT_SKIN.to_string())
}

/// Errors from descriptor parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// Descriptor reached the transport length bound
    Oversize {
        /// Observed length in bytes
        len: usize,
    },
}

impl std::fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Oversize { len } => {
                write!(f, "oversize player skin descriptor ({len} bytes)")
            }
        }
    }
}

impl std::error::Error for DescriptorError {}
