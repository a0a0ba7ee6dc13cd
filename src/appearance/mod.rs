//! Player appearance parsing and resolution.
//!
//! Raw descriptors come in over configstrings; [`AppearanceDescriptor`]
//! validates them and [`ClientAppearance`] resolves them against the
//! renderer into drawable records.

mod descriptor;
mod record;

pub use descriptor::{AppearanceDescriptor, DescriptorError};
pub use record::ClientAppearance;
