//! Level load pipeline.
//!
//! One run walks the fixed stage order, turning the configstring table
//! into session handle tables: world geometry first, then models, images,
//! client appearances, and sounds, with a progress notification and an
//! event-pump yield at every stage boundary so the host stays responsive
//! through a multi-second load.

use glam::Vec3;

use crate::appearance::{AppearanceDescriptor, ClientAppearance, DescriptorError};
use crate::backend::{
    AudioBackend, Backends, EventPump, Presenter, RenderBackend, WorldError, WorldLoader,
};
use crate::configstrings::{
    ConfigStrings, FIRST_GENERIC_MODEL_SLOT, INLINE_MODEL_MARKER, MAX_CLIENTS, MAX_IMAGES,
    MAX_MODELS, MAX_SOUNDS, WEAPON_MODEL_MARKER, WORLD_MODEL_SLOT,
};
use crate::paths::BASE_PLAYER_DESCRIPTOR;
use crate::session::ClientSession;
use crate::settings::ClientSettings;

use super::WeaponModelCatalog;

// ============================================================================
// Load Stages
// ============================================================================

/// Stages of a precache run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    /// World geometry, collision submodels, and the weapon catalog.
    World,
    /// Effect and level models.
    Models,
    /// Level images.
    Images,
    /// Client appearance records.
    Clients,
    /// Effect and level sounds.
    Sounds,
    /// Registration closed, load screen dismissed.
    Finished,
}

impl LoadStage {
    /// Progress label shown while the stage runs, `None` once loading is
    /// over.
    fn label(self, strings: &ConfigStrings) -> Option<&str> {
        match self {
            Self::World => Some(strings.world_map()),
            Self::Models => Some("models"),
            Self::Images => Some("images"),
            Self::Clients => Some("clients"),
            Self::Sounds => Some("sounds"),
            Self::Finished => None,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors that abort a precache run
#[derive(Debug, Clone)]
pub enum PrecacheError {
    /// A client appearance descriptor was malformed beyond repair
    Descriptor(DescriptorError),
    /// World geometry could not be loaded
    WorldLoad {
        /// Path the load was attempted from
        path: String,
        /// Underlying loader error
        source: WorldError,
    },
    /// Loaded world geometry does not match the server's announced version
    ChecksumMismatch {
        /// Checksum of the local geometry
        local: i32,
        /// Announced checksum, kept textual as it arrived
        server: String,
    },
}

impl std::fmt::Display for PrecacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Descriptor(e) => write!(f, "bad player descriptor: {e}"),
            Self::WorldLoad { path, source } => write!(f, "couldn't load {path}: {source}"),
            Self::ChecksumMismatch { local, server } => {
                write!(f, "local map version differs from server: {local} != {server}")
            }
        }
    }
}

impl std::error::Error for PrecacheError {}

impl From<DescriptorError> for PrecacheError {
    fn from(e: DescriptorError) -> Self {
        Self::Descriptor(e)
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Single-use driver for one precache run.
///
/// Borrows the session and every backend for the whole run, and `run`
/// consumes the pipeline; starting another run means re-borrowing the same
/// session, so two runs can never overlap.
pub struct PrecachePipeline<'a> {
    session: &'a mut ClientSession,
    strings: &'a ConfigStrings,
    settings: ClientSettings,
    backends: Backends<'a>,
}

impl<'a> PrecachePipeline<'a> {
    /// Bind a pipeline to the state it will fill and the backends it will
    /// register against.
    #[must_use]
    pub fn new(
        session: &'a mut ClientSession,
        strings: &'a ConfigStrings,
        settings: ClientSettings,
        backends: Backends<'a>,
    ) -> Self {
        Self {
            session,
            strings,
            settings,
            backends,
        }
    }

    /// Run every stage in order.
    ///
    /// Returns `Ok(false)` without touching anything when there is no
    /// renderer yet or no map has been announced.
    ///
    /// # Errors
    ///
    /// Fails when the world geometry cannot be loaded, when its checksum
    /// contradicts the server on a live connection, or when a client
    /// descriptor is oversize. The session is left unprecached in that case
    pub fn run(self) -> Result<bool, PrecacheError> {
        let Backends {
            renderer,
            world,
            audio,
            presenter,
            events,
        } = self.backends;

        let Some(renderer) = renderer else {
            log::debug!("video not initialized, skipping precache");
            return Ok(false);
        };
        if self.session.map_name.is_empty() {
            log::debug!("no map loaded, skipping precache");
            return Ok(false);
        }

        let mut pass = LoadPass {
            session: self.session,
            strings: self.strings,
            settings: self.settings,
            renderer,
            world,
            audio,
            presenter,
            events,
        };
        pass.run()?;
        Ok(true)
    }
}

// ============================================================================
// Load Pass
// ============================================================================

/// A running load with the renderer requirement already settled.
struct LoadPass<'a> {
    session: &'a mut ClientSession,
    strings: &'a ConfigStrings,
    settings: ClientSettings,
    renderer: &'a mut dyn RenderBackend,
    world: &'a mut dyn WorldLoader,
    audio: &'a mut dyn AudioBackend,
    presenter: &'a mut dyn Presenter,
    events: &'a mut dyn EventPump,
}

impl LoadPass<'_> {
    fn run(&mut self) -> Result<(), PrecacheError> {
        self.session.reset_for_load();

        self.load_world()?;
        self.load_models();
        self.load_images();
        self.load_clients()?;
        self.load_sky();
        self.load_sounds();
        self.finish();

        self.session.precached = true;
        Ok(())
    }

    /// Advance the visible load state and give the host a breath.
    fn enter_stage(&mut self, stage: LoadStage) {
        self.presenter.show_progress(stage.label(self.strings));
        self.presenter.refresh_screen();
        self.events.pump_events();
    }

    fn load_world(&mut self) -> Result<(), PrecacheError> {
        self.enter_stage(LoadStage::World);

        let path = self.strings.world_map();
        let world = self
            .world
            .load(path)
            .map_err(|source| PrecacheError::WorldLoad {
                path: path.to_string(),
                source,
            })?;

        self.check_map_version(world.checksum)?;

        // collision handles for inline submodels
        for slot in WORLD_MODEL_SLOT..MAX_MODELS {
            let name = self.strings.model(slot);
            if name.is_empty() {
                break;
            }
            if name.starts_with(INLINE_MODEL_MARKER) {
                self.session.clip_handles[slot] = self.world.inline_model(&world, name);
            }
        }
        self.session.world = Some(world);

        self.session.weapon_models = WeaponModelCatalog::build(self.strings, self.settings.vwep);

        self.renderer.begin_registration(&self.session.map_name);
        Ok(())
    }

    /// Compare the loaded geometry against the version the server announced.
    fn check_map_version(&self, local: i32) -> Result<(), PrecacheError> {
        let announced = self.strings.map_checksum();
        if announced.is_empty() {
            return Ok(());
        }
        if announced.trim().parse().unwrap_or(0) == local {
            return Ok(());
        }
        if self.session.demo_playback {
            // a demo recorded on another version of the map still plays,
            // it just looks odd
            log::warn!("local map version differs from demo: {local} != {announced}");
            return Ok(());
        }
        Err(PrecacheError::ChecksumMismatch {
            local,
            server: announced.to_string(),
        })
    }

    fn load_models(&mut self) {
        self.enter_stage(LoadStage::Models);

        self.session.effects.register_models(self.renderer);

        for slot in FIRST_GENERIC_MODEL_SLOT..MAX_MODELS {
            let name = self.strings.model(slot);
            if name.is_empty() {
                break;
            }
            // weapon entries are per-player, the catalog owns them
            if name.starts_with(WEAPON_MODEL_MARKER) {
                continue;
            }
            self.session.model_handles[slot] = self.renderer.register_model(name);
        }
    }

    fn load_images(&mut self) {
        self.enter_stage(LoadStage::Images);

        for slot in 1..MAX_IMAGES {
            let name = self.strings.image(slot);
            if name.is_empty() {
                break;
            }
            self.session.image_handles[slot] = self.renderer.register_pic(name);
        }
    }

    fn load_clients(&mut self) -> Result<(), PrecacheError> {
        self.enter_stage(LoadStage::Clients);

        for slot in 0..MAX_CLIENTS {
            let raw = self.strings.player_skin(slot);
            if raw.is_empty() {
                continue;
            }
            let descriptor = AppearanceDescriptor::parse(raw, self.settings.skin_policy)?;
            let record = ClientAppearance::resolve(
                &descriptor,
                &self.session.weapon_models,
                self.renderer,
            );
            self.session.appearances[slot] = record;
        }

        let base = AppearanceDescriptor::parse(BASE_PLAYER_DESCRIPTOR, self.settings.skin_policy)?;
        self.session.base_appearance =
            ClientAppearance::resolve(&base, &self.session.weapon_models, self.renderer);
        Ok(())
    }

    fn load_sky(&mut self) {
        let rotate = self.strings.sky_rotate().trim().parse().unwrap_or(0.0);
        let axis = match parse_sky_axis(self.strings.sky_axis()) {
            Some(axis) => axis,
            None => {
                log::debug!("couldn't parse sky axis {:?}", self.strings.sky_axis());
                Vec3::ZERO
            }
        };
        self.renderer.set_sky(self.strings.sky_name(), rotate, axis);
    }

    fn load_sounds(&mut self) {
        self.enter_stage(LoadStage::Sounds);

        self.audio.begin_registration();
        self.session.effects.register_sounds(self.audio);

        for slot in 1..MAX_SOUNDS {
            let name = self.strings.sound(slot);
            if name.is_empty() {
                break;
            }
            self.session.sound_handles[slot] = self.audio.register_sound(name);
        }
        self.audio.end_registration();
    }

    fn finish(&mut self) {
        // the renderer can now drop assets the new level never referenced
        self.renderer.end_registration();
        self.presenter.clear_notifications();
        self.enter_stage(LoadStage::Finished);
    }
}

/// Parse an axis configstring of three whitespace-separated floats.
fn parse_sky_axis(raw: &str) -> Option<Vec3> {
    let mut parts = raw.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    let z = parts.next()?.parse().ok()?;
    Some(Vec3::new(x, y, z))
}
