//! In-memory collaborator suite.
//!
//! Implements every backend trait without touching real devices, which is
//! enough to run a whole precache pass headlessly: in tests, in the demo
//! binary, or on a dedicated host with no video. Registration is
//! lookup-or-load, so repeating a path returns the handle it got first.

use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{
    AudioBackend, ClipHandle, EventPump, ImageHandle, ModelHandle, Presenter, RenderBackend,
    SkinHandle, SoundHandle, WorldError, WorldGeometry, WorldLoader,
};

/// Sky parameters handed to `set_sky`.
#[derive(Debug, Clone, PartialEq)]
pub struct SkySetting {
    /// Sky box name.
    pub name: String,
    /// Rotation speed.
    pub rotate: f32,
    /// Rotation axis.
    pub axis: Vec3,
}

/// Renderer backend backed by hash maps.
///
/// A fresh renderer registers every path it is asked for; one built with
/// [`MemoryRenderer::with_assets`] only registers the listed paths, which is
/// how tests model missing assets.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    available: Option<FxHashSet<String>>,
    models: FxHashMap<String, ModelHandle>,
    skins: FxHashMap<String, SkinHandle>,
    pics: FxHashMap<String, ImageHandle>,
    attempts: Vec<String>,
    next_handle: u32,
    last_map: Option<String>,
    end_calls: usize,
    sky: Option<SkySetting>,
}

impl MemoryRenderer {
    /// Create a renderer that resolves every path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer that only resolves the given paths.
    #[must_use]
    pub fn with_assets<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available: Some(paths.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Every path a registration call was made for, in call order,
    /// including failed ones.
    #[must_use]
    pub fn attempts(&self) -> &[String] {
        &self.attempts
    }

    /// Handle a model path resolved to, if it ever registered.
    #[must_use]
    pub fn model(&self, path: &str) -> Option<ModelHandle> {
        self.models.get(path).copied()
    }

    /// Handle a skin path resolved to, if it ever registered.
    #[must_use]
    pub fn skin(&self, path: &str) -> Option<SkinHandle> {
        self.skins.get(path).copied()
    }

    /// Handle an image path resolved to, if it ever registered.
    #[must_use]
    pub fn pic(&self, path: &str) -> Option<ImageHandle> {
        self.pics.get(path).copied()
    }

    /// Sky parameters from the most recent `set_sky` call.
    #[must_use]
    pub fn sky(&self) -> Option<&SkySetting> {
        self.sky.as_ref()
    }

    /// Map the most recent registration cycle was opened for.
    #[must_use]
    pub fn last_map(&self) -> Option<&str> {
        self.last_map.as_deref()
    }

    /// Number of completed registration cycles.
    #[must_use]
    pub fn completed_cycles(&self) -> usize {
        self.end_calls
    }

    fn has(&self, path: &str) -> bool {
        match &self.available {
            None => true,
            Some(set) => set.contains(path),
        }
    }

    fn next_id(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl RenderBackend for MemoryRenderer {
    fn begin_registration(&mut self, map_id: &str) {
        self.last_map = Some(map_id.to_string());
    }

    fn register_model(&mut self, path: &str) -> Option<ModelHandle> {
        self.attempts.push(path.to_string());
        if !self.has(path) {
            return None;
        }
        if let Some(&handle) = self.models.get(path) {
            return Some(handle);
        }
        let handle = ModelHandle::from_raw(self.next_id())?;
        self.models.insert(path.to_string(), handle);
        Some(handle)
    }

    fn register_skin(&mut self, path: &str) -> Option<SkinHandle> {
        self.attempts.push(path.to_string());
        if !self.has(path) {
            return None;
        }
        if let Some(&handle) = self.skins.get(path) {
            return Some(handle);
        }
        let handle = SkinHandle::from_raw(self.next_id())?;
        self.skins.insert(path.to_string(), handle);
        Some(handle)
    }

    fn register_pic(&mut self, path: &str) -> Option<ImageHandle> {
        self.attempts.push(path.to_string());
        if !self.has(path) {
            return None;
        }
        if let Some(&handle) = self.pics.get(path) {
            return Some(handle);
        }
        let handle = ImageHandle::from_raw(self.next_id())?;
        self.pics.insert(path.to_string(), handle);
        Some(handle)
    }

    fn set_sky(&mut self, name: &str, rotate: f32, axis: Vec3) {
        self.sky = Some(SkySetting {
            name: name.to_string(),
            rotate,
            axis,
        });
    }

    fn end_registration(&mut self) {
        self.end_calls += 1;
    }
}

/// World loader backed by a table of known paths and their checksums.
#[derive(Debug, Default)]
pub struct MemoryWorld {
    worlds: FxHashMap<String, i32>,
    loads: Vec<String>,
}

impl MemoryWorld {
    /// Create a loader that knows no worlds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with a single known world.
    #[must_use]
    pub fn with_world(path: impl Into<String>, checksum: i32) -> Self {
        let mut loader = Self::default();
        loader.add_world(path, checksum);
        loader
    }

    /// Register another known world.
    pub fn add_world(&mut self, path: impl Into<String>, checksum: i32) {
        self.worlds.insert(path.into(), checksum);
    }

    /// Every path passed to `load`, in call order.
    #[must_use]
    pub fn loads(&self) -> &[String] {
        &self.loads
    }
}

impl WorldLoader for MemoryWorld {
    fn load(&mut self, path: &str) -> Result<WorldGeometry, WorldError> {
        self.loads.push(path.to_string());
        match self.worlds.get(path) {
            Some(&checksum) => Ok(WorldGeometry {
                path: path.to_string(),
                checksum,
            }),
            None => Err(WorldError::NotFound),
        }
    }

    fn inline_model(&mut self, world: &WorldGeometry, name: &str) -> Option<ClipHandle> {
        if !self.worlds.contains_key(&world.path) {
            return None;
        }
        let index: u32 = name.strip_prefix('*')?.parse().ok()?;
        ClipHandle::from_raw(index)
    }
}

/// One call observed by [`MemoryAudio`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioOp {
    /// `begin_registration`
    Begin,
    /// `register_sound` with the requested name
    Register(String),
    /// `end_registration`
    End,
}

/// Audio backend that records its call sequence.
#[derive(Debug, Default)]
pub struct MemoryAudio {
    ops: Vec<AudioOp>,
    handles: FxHashMap<String, SoundHandle>,
    next_handle: u32,
}

impl MemoryAudio {
    /// Create an empty audio backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The observed call sequence.
    #[must_use]
    pub fn ops(&self) -> &[AudioOp] {
        &self.ops
    }

    /// Handle a sound name resolved to, if it ever registered.
    #[must_use]
    pub fn sound(&self, name: &str) -> Option<SoundHandle> {
        self.handles.get(name).copied()
    }
}

impl AudioBackend for MemoryAudio {
    fn begin_registration(&mut self) {
        self.ops.push(AudioOp::Begin);
    }

    fn register_sound(&mut self, name: &str) -> Option<SoundHandle> {
        self.ops.push(AudioOp::Register(name.to_string()));
        if let Some(&handle) = self.handles.get(name) {
            return Some(handle);
        }
        self.next_handle += 1;
        let handle = SoundHandle::from_raw(self.next_handle)?;
        self.handles.insert(name.to_string(), handle);
        Some(handle)
    }

    fn end_registration(&mut self) {
        self.ops.push(AudioOp::End);
    }
}

/// Presenter that records labels instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    labels: Vec<Option<String>>,
    refreshes: usize,
    notifications_cleared: usize,
}

impl RecordingPresenter {
    /// Create an empty presenter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every progress label shown, in order; `None` entries are clears.
    #[must_use]
    pub fn labels(&self) -> &[Option<String>] {
        &self.labels
    }

    /// Number of screen refresh requests.
    #[must_use]
    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    /// Number of notification clears.
    #[must_use]
    pub fn notifications_cleared(&self) -> usize {
        self.notifications_cleared
    }
}

impl Presenter for RecordingPresenter {
    fn show_progress(&mut self, label: Option<&str>) {
        self.labels.push(label.map(str::to_string));
    }

    fn refresh_screen(&mut self) {
        self.refreshes += 1;
    }

    fn clear_notifications(&mut self) {
        self.notifications_cleared += 1;
    }
}

/// Event pump that only counts how often it ran.
#[derive(Debug, Default)]
pub struct NullEventPump {
    pumps: usize,
}

impl NullEventPump {
    /// Create a pump with a zeroed counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of yields taken.
    #[must_use]
    pub fn pumps(&self) -> usize {
        self.pumps
    }
}

impl EventPump for NullEventPump {
    fn pump_events(&mut self) {
        self.pumps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_is_lookup_or_load() {
        let mut renderer = MemoryRenderer::new();
        let first = renderer.register_model("models/a.md2").unwrap();
        let again = renderer.register_model("models/a.md2").unwrap();
        assert_eq!(first, again);
        assert_eq!(renderer.attempts().len(), 2);
    }

    #[test]
    fn test_restricted_renderer_fails_unknown_paths() {
        let mut renderer = MemoryRenderer::with_assets(["players/male/tris.md2"]);
        assert!(renderer.register_model("players/male/tris.md2").is_some());
        assert!(renderer.register_model("players/female/tris.md2").is_none());
        assert_eq!(renderer.attempts().len(), 2);
    }

    #[test]
    fn test_handle_classes_do_not_collide() {
        let mut renderer = MemoryRenderer::new();
        let model = renderer.register_model("players/male/tris.md2").unwrap();
        let skin = renderer.register_skin("players/male/grunt.pcx").unwrap();
        assert_ne!(model.raw(), skin.raw());
    }

    #[test]
    fn test_world_loader_checksum_and_inline_models() {
        let mut world = MemoryWorld::with_world("maps/base1.bsp", 0x1234);
        let geometry = world.load("maps/base1.bsp").unwrap();
        assert_eq!(geometry.checksum, 0x1234);
        assert!(world.inline_model(&geometry, "*3").is_some());
        assert!(world.inline_model(&geometry, "*zero").is_none());
        assert!(matches!(
            world.load("maps/missing.bsp"),
            Err(WorldError::NotFound)
        ));
    }

    #[test]
    fn test_audio_records_op_order() {
        let mut audio = MemoryAudio::new();
        audio.begin_registration();
        audio.register_sound("world/amb1.wav");
        audio.end_registration();
        assert_eq!(audio.ops()[0], AudioOp::Begin);
        assert_eq!(audio.ops()[2], AudioOp::End);
        assert!(audio.sound("world/amb1.wav").is_some());
    }
}
