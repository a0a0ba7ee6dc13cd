//! Staged asset precache.
//!
//! [`PrecachePipeline`] runs the ordered load stages against a session and
//! a set of backends; [`WeaponModelCatalog`] is the per-level list of view
//! weapon files the appearance resolver indexes into.

mod catalog;
mod pipeline;

pub use catalog::{MAX_CLIENT_WEAPON_MODELS, WeaponModelCatalog};
pub use pipeline::{LoadStage, PrecacheError, PrecachePipeline};
