//! Built-in temp-entity effect assets.
//!
//! The effect system references a fixed set of models and sounds that every
//! level needs regardless of its configstrings. They are registered once per
//! load, right at the top of their stages, so the handles are warm before
//! the first frame.

use crate::backend::{AudioBackend, ModelHandle, RenderBackend, SoundHandle};

/// Models the effect system spawns directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectModel {
    Explosion,
    Smoke,
    MuzzleFlash,
    ParasiteSegment,
    GrappleCable,
    ParasiteTip,
    RocketExplosion,
    BfgExplosion,
    PowerScreen,
    GibBone,
    GibMeat,
    GibBone2,
    Lightning,
    HeatBeam,
    WidowBeam,
    BigExplosion,
}

impl EffectModel {
    /// Every effect model, in registration order.
    pub const ALL: [Self; 16] = [
        Self::Explosion,
        Self::Smoke,
        Self::MuzzleFlash,
        Self::ParasiteSegment,
        Self::GrappleCable,
        Self::ParasiteTip,
        Self::RocketExplosion,
        Self::BfgExplosion,
        Self::PowerScreen,
        Self::GibBone,
        Self::GibMeat,
        Self::GibBone2,
        Self::Lightning,
        Self::HeatBeam,
        Self::WidowBeam,
        Self::BigExplosion,
    ];

    /// Asset path of the model.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Explosion => "models/objects/explode/tris.md2",
            Self::Smoke => "models/objects/smoke/tris.md2",
            Self::MuzzleFlash => "models/objects/flash/tris.md2",
            Self::ParasiteSegment => "models/monsters/parasite/segment/tris.md2",
            Self::GrappleCable => "models/ctf/segment/tris.md2",
            Self::ParasiteTip => "models/monsters/parasite/tip/tris.md2",
            Self::RocketExplosion => "models/objects/r_explode/tris.md2",
            Self::BfgExplosion => "sprites/s_bfg2.sp2",
            Self::PowerScreen => "models/items/armor/effect/tris.md2",
            Self::GibBone => "models/objects/gibs/bone/tris.md2",
            Self::GibMeat => "models/objects/gibs/sm_meat/tris.md2",
            Self::GibBone2 => "models/objects/gibs/bone2/tris.md2",
            Self::Lightning => "models/proj/lightning/tris.md2",
            Self::HeatBeam => "models/proj/beam/tris.md2",
            Self::WidowBeam => "models/proj/widowbeam/tris.md2",
            Self::BigExplosion => "models/objects/r_explode2/tris.md2",
        }
    }
}

/// Sounds the effect system plays directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectSound {
    Ricochet1,
    Ricochet2,
    Ricochet3,
    LaserHit,
    Spark5,
    Spark6,
    Spark7,
    Railgun,
    RocketExplosion,
    GrenadeExplosion,
    WaterExplosion,
    Land1,
    Fall2,
    Fall1,
    Footstep1,
    Footstep2,
    Footstep3,
    Footstep4,
    Tesla,
    DisruptorHit,
}

impl EffectSound {
    /// Every effect sound, in registration order.
    pub const ALL: [Self; 20] = [
        Self::Ricochet1,
        Self::Ricochet2,
        Self::Ricochet3,
        Self::LaserHit,
        Self::Spark5,
        Self::Spark6,
        Self::Spark7,
        Self::Railgun,
        Self::RocketExplosion,
        Self::GrenadeExplosion,
        Self::WaterExplosion,
        Self::Land1,
        Self::Fall2,
        Self::Fall1,
        Self::Footstep1,
        Self::Footstep2,
        Self::Footstep3,
        Self::Footstep4,
        Self::Tesla,
        Self::DisruptorHit,
    ];

    /// Asset path of the sound.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Ricochet1 => "world/ric1.wav",
            Self::Ricochet2 => "world/ric2.wav",
            Self::Ricochet3 => "world/ric3.wav",
            Self::LaserHit => "weapons/lashit.wav",
            Self::Spark5 => "world/spark5.wav",
            Self::Spark6 => "world/spark6.wav",
            Self::Spark7 => "world/spark7.wav",
            Self::Railgun => "weapons/railgf1a.wav",
            Self::RocketExplosion => "weapons/rocklx1a.wav",
            Self::GrenadeExplosion => "weapons/grenlx1a.wav",
            Self::WaterExplosion => "weapons/xpld_wat.wav",
            Self::Land1 => "player/land1.wav",
            Self::Fall2 => "player/fall2.wav",
            Self::Fall1 => "player/fall1.wav",
            Self::Footstep1 => "player/step1.wav",
            Self::Footstep2 => "player/step2.wav",
            Self::Footstep3 => "player/step3.wav",
            Self::Footstep4 => "player/step4.wav",
            Self::Tesla => "weapons/tesla.wav",
            Self::DisruptorHit => "weapons/disrupthit.wav",
        }
    }
}

/// Handle table for the built-in effect assets.
#[derive(Debug, Clone, Default)]
pub struct EffectAssets {
    models: [Option<ModelHandle>; EffectModel::ALL.len()],
    sounds: [Option<SoundHandle>; EffectSound::ALL.len()],
}

impl EffectAssets {
    /// Register every effect model with the renderer.
    pub fn register_models(&mut self, renderer: &mut dyn RenderBackend) {
        for which in EffectModel::ALL {
            self.models[which as usize] = renderer.register_model(which.path());
        }
    }

    /// Register every effect sound with the audio backend.
    pub fn register_sounds(&mut self, audio: &mut dyn AudioBackend) {
        for which in EffectSound::ALL {
            self.sounds[which as usize] = audio.register_sound(which.path());
        }
    }

    /// Handle of an effect model, if its registration succeeded.
    #[must_use]
    pub fn model(&self, which: EffectModel) -> Option<ModelHandle> {
        self.models[which as usize]
    }

    /// Handle of an effect sound, if its registration succeeded.
    #[must_use]
    pub fn sound(&self, which: EffectSound) -> Option<SoundHandle> {
        self.sounds[which as usize]
    }

    /// Drop all handles.
    pub fn clear(&mut self) {
        self.models = [None; EffectModel::ALL.len()];
        self.sounds = [None; EffectSound::ALL.len()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::{AudioOp, MemoryAudio, MemoryRenderer};

    #[test]
    fn test_registers_every_model_in_order() {
        let mut renderer = MemoryRenderer::new();
        let mut effects = EffectAssets::default();
        effects.register_models(&mut renderer);

        let expected: Vec<&str> = EffectModel::ALL.iter().map(|m| m.path()).collect();
        assert_eq!(renderer.attempts(), expected.as_slice());
        assert!(effects.model(EffectModel::BfgExplosion).is_some());
        assert!(effects.model(EffectModel::BigExplosion).is_some());
    }

    #[test]
    fn test_registers_every_sound() {
        let mut audio = MemoryAudio::new();
        let mut effects = EffectAssets::default();
        effects.register_sounds(&mut audio);

        assert_eq!(audio.ops().len(), EffectSound::ALL.len());
        assert_eq!(
            audio.ops()[0],
            AudioOp::Register("world/ric1.wav".to_string())
        );
        assert!(effects.sound(EffectSound::Footstep4).is_some());
    }

    #[test]
    fn test_gib_and_fall_assets_are_warmed() {
        let mut renderer = MemoryRenderer::new();
        let mut audio = MemoryAudio::new();
        let mut effects = EffectAssets::default();
        effects.register_models(&mut renderer);
        effects.register_sounds(&mut audio);

        assert!(effects.model(EffectModel::GibBone).is_some());
        assert!(effects.model(EffectModel::GibMeat).is_some());
        assert!(
            renderer
                .attempts()
                .iter()
                .any(|p| p == "models/objects/gibs/bone2/tris.md2")
        );

        assert!(effects.sound(EffectSound::Land1).is_some());
        assert!(effects.sound(EffectSound::Fall1).is_some());
        let ops = audio.ops();
        let position = |name: &str| {
            ops.iter()
                .position(|op| *op == AudioOp::Register(name.to_string()))
                .unwrap()
        };
        assert!(position("player/land1.wav") < position("player/step1.wav"));
        assert!(position("player/fall2.wav") < position("player/fall1.wav"));
    }

    #[test]
    fn test_missing_assets_leave_holes() {
        let mut renderer = MemoryRenderer::with_assets(["models/objects/smoke/tris.md2"]);
        let mut effects = EffectAssets::default();
        effects.register_models(&mut renderer);

        assert!(effects.model(EffectModel::Smoke).is_some());
        assert!(effects.model(EffectModel::Explosion).is_none());
    }

    #[test]
    fn test_clear_drops_handles() {
        let mut renderer = MemoryRenderer::new();
        let mut effects = EffectAssets::default();
        effects.register_models(&mut renderer);
        effects.clear();
        assert!(effects.model(EffectModel::Smoke).is_none());
    }
}
