use bevy::prelude::*;
use bevy::window::WindowResolution;
use std::env;

use retroburn::audio::AudioCuePlugin;
use retroburn::config::{self, TuningConfig};
use retroburn::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, TICK_RATE_HZ};
use retroburn::graphics;
use retroburn::hud::HudPlugin;
use retroburn::menu::MenuPlugin;
use retroburn::particles::ParticlesPlugin;
use retroburn::score::{FileHighScoreStore, ScorePlugin, ScoreStore};
use retroburn::simulation::SimulationPlugin;
use retroburn::vehicle::VehicleMode;

fn main() {
    // RETROBURN_MODE=booster preselects the multi-stage vehicle; the menu
    // buttons can still switch before launch.
    let mode = match env::var("RETROBURN_MODE").as_deref() {
        Ok("booster") => VehicleMode::MultiStage,
        _ => VehicleMode::SingleStage,
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Retroburn".into(),
                resolution: WindowResolution::new(CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // One fixed simulation step per tick; all gameplay runs here.
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
        // Compiled defaults; load_tuning_config overwrites them from
        // assets/tuning.toml (if present) in the Startup schedule.
        .insert_resource(TuningConfig::default())
        .insert_resource(ScoreStore(Box::new(FileHighScoreStore::default())))
        .insert_resource(mode)
        .add_plugins((
            MenuPlugin,
            SimulationPlugin,
            ParticlesPlugin,
            AudioCuePlugin,
            HudPlugin,
            ScorePlugin,
        ))
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the
                // final values.
                config::load_tuning_config,
                graphics::setup_camera.after(config::load_tuning_config),
            ),
        )
        .run();
}
