//! Asset precache and player appearance resolution for a quake-style client
//!
//! This crate provides:
//! - Staged level loading with per-stage progress notifications
//! - Cascading player appearance resolution with built-in defaults
//! - Configstring tables fed live or from JSON level manifests
//! - Pluggable renderer, world, audio, and presentation backends

pub mod appearance;
pub mod backend;
pub mod configstrings;
pub mod effects;
pub mod manifest;
pub mod paths;
pub mod precache;
pub mod session;
pub mod settings;

// Re-exports for convenience
pub use glam;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::appearance::{AppearanceDescriptor, ClientAppearance, DescriptorError};
    pub use crate::backend::{
        AudioBackend, Backends, EventPump, Presenter, RenderBackend, WorldLoader,
    };
    pub use crate::configstrings::ConfigStrings;
    pub use crate::effects::{EffectModel, EffectSound};
    pub use crate::manifest::LevelManifest;
    pub use crate::precache::{LoadStage, PrecacheError, PrecachePipeline, WeaponModelCatalog};
    pub use crate::session::ClientSession;
    pub use crate::settings::{ClientSettings, SkinPolicy};
    pub use glam::Vec3;
}
