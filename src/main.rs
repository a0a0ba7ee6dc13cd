//! Headless demo running a full precache pass over a level manifest

use precache::backend::memory::{MemoryAudio, MemoryRenderer, MemoryWorld, NullEventPump};
use precache::configstrings::{MAX_CLIENTS, MAX_IMAGES, MAX_MODELS, MAX_SOUNDS};
use precache::effects::EffectModel;
use precache::manifest::ManifestError;
use precache::paths::map_shortname;
use precache::prelude::*;

/// Built-in level used when no manifest path is given.
const DEMO_MANIFEST: &str = r##"{
    "map": "maps/base1.bsp",
    "checksum": 1577,
    "models": [
        "models/objects/barrels/tris.md2",
        "*2",
        "#w_blaster.md2",
        "#w_shotgun.md2",
        "models/weapons/g_rail/tris.md2"
    ],
    "images": ["i_health", "i_powershield"],
    "sounds": ["world/amb1.wav", "doors/dr1_strt.wav"],
    "players": [
        {"slot": 0, "descriptor": "Bones\\male/grunt"},
        {"slot": 1, "descriptor": "Athena\\female/athena"},
        {"slot": 2, "descriptor": "Kane\\cyborg/ps9000"}
    ],
    "sky": "unit1_",
    "sky_rotate": 90.0,
    "sky_axis": [0.0, 0.0, 1.0]
}"##;

/// Presenter that narrates the load into the log.
struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn show_progress(&mut self, label: Option<&str>) {
        match label {
            Some(label) => log::info!("loading {label}"),
            None => log::info!("load complete"),
        }
    }

    fn refresh_screen(&mut self) {}

    fn clear_notifications(&mut self) {}
}

fn load_manifest() -> Result<LevelManifest, ManifestError> {
    match std::env::args().nth(1) {
        Some(path) => LevelManifest::load(path),
        None => LevelManifest::from_json(DEMO_MANIFEST),
    }
}

/// Asset set the demo renderer will admit.
fn demo_assets(manifest: &LevelManifest) -> Vec<String> {
    let mut assets: Vec<String> = EffectModel::ALL
        .iter()
        .map(|m| m.path().to_string())
        .collect();
    assets.extend(manifest.models.iter().cloned());
    assets.extend(manifest.images.iter().cloned());

    // no cyborg assets, so slot 2 falls back to male
    for (model, skin) in [("male", "grunt"), ("female", "athena")] {
        assets.push(format!("players/{model}/tris.md2"));
        assets.push(format!("players/{model}/{skin}.pcx"));
        assets.push(format!("players/{model}/weapon.md2"));
        assets.push(format!("players/{model}/w_blaster.md2"));
        assets.push(format!("players/{model}/w_shotgun.md2"));
        assets.push(format!("/players/{model}/{skin}_i.pcx"));
    }
    assets
}

fn report(session: &ClientSession) {
    let models = (0..MAX_MODELS)
        .filter(|&slot| session.model_handle(slot).is_some())
        .count();
    let images = (0..MAX_IMAGES)
        .filter(|&slot| session.image_handle(slot).is_some())
        .count();
    let sounds = (0..MAX_SOUNDS)
        .filter(|&slot| session.sound_handle(slot).is_some())
        .count();
    log::info!(
        "precached {models} models, {images} images, {sounds} sounds for {}",
        session.map_name()
    );

    for slot in 0..MAX_CLIENTS {
        let record = session.appearance(slot);
        if record.name.is_empty() && !record.is_complete() {
            continue;
        }
        log::info!(
            "client {slot}: {} as {}/{}",
            record.name,
            record.model_name,
            record.skin_name
        );
    }
}

fn main() {
    env_logger::init();

    let settings = ClientSettings::load_or_default("precache.ron");

    let manifest = match load_manifest() {
        Ok(manifest) => manifest,
        Err(e) => {
            eprintln!("Manifest error: {e}");
            std::process::exit(1);
        }
    };

    let mut strings = ConfigStrings::new();
    manifest.apply(&mut strings);

    let mut session = ClientSession::new();
    session.set_map_name(map_shortname(&manifest.map));

    let mut renderer = MemoryRenderer::with_assets(demo_assets(&manifest));
    let mut world = MemoryWorld::with_world(manifest.map.clone(), manifest.checksum.unwrap_or(0));
    let mut audio = MemoryAudio::new();
    let mut presenter = TerminalPresenter;
    let mut events = NullEventPump::new();

    let backends = Backends {
        renderer: Some(&mut renderer),
        world: &mut world,
        audio: &mut audio,
        presenter: &mut presenter,
        events: &mut events,
    };

    let pipeline = PrecachePipeline::new(&mut session, &strings, settings, backends);
    match pipeline.run() {
        Ok(true) => report(&session),
        Ok(false) => log::warn!("nothing to precache"),
        Err(e) => {
            eprintln!("Precache error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_manifest_parses() {
        let manifest = LevelManifest::from_json(DEMO_MANIFEST).unwrap();
        assert_eq!(manifest.map, "maps/base1.bsp");
        assert_eq!(manifest.models[2], "#w_blaster.md2");
        assert_eq!(manifest.models[3], "#w_shotgun.md2");
        assert_eq!(manifest.models[4], "models/weapons/g_rail/tris.md2");
        assert_eq!(manifest.players.len(), 3);
        assert_eq!(manifest.sky, "unit1_");
    }

    #[test]
    fn test_demo_assets_cover_the_player_fallback() {
        let manifest = LevelManifest::from_json(DEMO_MANIFEST).unwrap();
        let assets = demo_assets(&manifest);
        assert!(assets.contains(&"players/male/tris.md2".to_string()));
        assert!(assets.contains(&"players/male/w_shotgun.md2".to_string()));
        assert!(!assets.iter().any(|a| a.contains("cyborg")));
    }
}
