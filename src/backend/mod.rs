//! Collaborator interfaces consumed during a precache run.
//!
//! The pipeline never touches GPU, disk, or audio devices itself; it shapes
//! calls into these traits and stores the handles they return. `memory`
//! provides a headless implementation of the whole suite.

use glam::Vec3;

mod handle;
pub mod memory;

pub use handle::{ClipHandle, ImageHandle, ModelHandle, SkinHandle, SoundHandle};

/// Renderer-side asset registration.
///
/// `begin_registration`/`end_registration` bracket one load cycle so the
/// renderer may release assets that were not touched in between. Individual
/// registrations are lookup-or-load: repeating a path is cheap and returns
/// the same handle.
pub trait RenderBackend {
    /// Open a registration cycle for the named map.
    fn begin_registration(&mut self, map_id: &str);

    /// Register a model; `None` when the asset is missing or unloadable.
    fn register_model(&mut self, path: &str) -> Option<ModelHandle>;

    /// Register a player skin; `None` when the asset is missing.
    fn register_skin(&mut self, path: &str) -> Option<SkinHandle>;

    /// Register a 2D image; `None` when the asset is missing.
    fn register_pic(&mut self, path: &str) -> Option<ImageHandle>;

    /// Configure the sky box and its rotation.
    fn set_sky(&mut self, name: &str, rotate: f32, axis: Vec3);

    /// Close the registration cycle, allowing unused assets to be dropped.
    fn end_registration(&mut self);
}

/// World geometry loading and inline sub-model lookup.
pub trait WorldLoader {
    /// Load the world geometry at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the geometry cannot be loaded
    fn load(&mut self, path: &str) -> Result<WorldGeometry, WorldError>;

    /// Resolve an inline sub-model name (`*1`, `*2`, ...) of a loaded world.
    fn inline_model(&mut self, world: &WorldGeometry, name: &str) -> Option<ClipHandle>;
}

/// Audio-side sound registration, bracketed like the renderer's cycle.
pub trait AudioBackend {
    /// Open a sound registration cycle.
    fn begin_registration(&mut self);

    /// Register a sound effect by name.
    fn register_sound(&mut self, name: &str) -> Option<SoundHandle>;

    /// Close the cycle, allowing unreferenced sounds to be dropped.
    fn end_registration(&mut self);
}

/// Load-screen presentation.
pub trait Presenter {
    /// Show a progress label, or clear it with `None`.
    fn show_progress(&mut self, label: Option<&str>);

    /// Redraw the screen so progress stays visible during a slow load.
    fn refresh_screen(&mut self);

    /// Drop transient notification text once loading is done.
    fn clear_notifications(&mut self);
}

/// Cooperative yield point between pipeline stages.
pub trait EventPump {
    /// Process pending window/input events.
    fn pump_events(&mut self);
}

/// Token for one loaded world, passed back for inline-model lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldGeometry {
    /// Path the geometry was loaded from.
    pub path: String,
    /// Content checksum reported by the loader.
    pub checksum: i32,
}

/// Errors a world loader can report
#[derive(Debug, Clone)]
pub enum WorldError {
    /// No geometry at the requested path
    NotFound,
    /// Geometry exists but cannot be parsed
    Corrupt(String),
    /// IO error
    IoError(String),
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "no such file"),
            Self::Corrupt(e) => write!(f, "corrupt geometry: {e}"),
            Self::IoError(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for WorldError {}

/// The collaborator bundle one pipeline run borrows.
///
/// The renderer slot is optional: until the video subsystem has come up
/// there is nothing to register against, and the pipeline skips the run.
pub struct Backends<'a> {
    /// Renderer registration backend, absent before video init.
    pub renderer: Option<&'a mut dyn RenderBackend>,
    /// World geometry loader.
    pub world: &'a mut dyn WorldLoader,
    /// Sound registration backend.
    pub audio: &'a mut dyn AudioBackend,
    /// Load-screen presentation.
    pub presenter: &'a mut dyn Presenter,
    /// Event pump yielded to between stages.
    pub events: &'a mut dyn EventPump,
}
