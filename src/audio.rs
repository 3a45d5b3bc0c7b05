//! Audio cues: thrust loop, crash one-shot, success one-shot.
//!
//! All three sound files are optional.  Presence is checked once at startup;
//! a missing file logs a single warning and disables only that cue — the
//! game never fails to start over audio.
//!
//! The thrust loop is driven by an explicit two-state edge detector owned by
//! this module: the simulation publishes only the current-tick
//! [`ThrustState`], and [`ThrustEdge`] remembers the previous tick so the
//! loop starts on the off→on transition and stops on on→off.  Presentation
//! bookkeeping stays out of the vehicle state.

use crate::landing::TouchdownMessage;
use crate::menu::GameState;
use crate::vehicle::ThrustState;
use bevy::prelude::*;
use std::path::Path;

// ── Resources / markers ───────────────────────────────────────────────────────

/// Handles to whichever of the three optional sound clips were found on disk.
#[derive(Resource, Default)]
pub struct SoundAssets {
    pub thrust: Option<Handle<AudioSource>>,
    pub crash: Option<Handle<AudioSource>>,
    pub success: Option<Handle<AudioSource>>,
}

/// Previous-tick thrust flag for the loop start/stop edge detector.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ThrustEdge {
    pub was_active: bool,
}

/// Tags the looping thrust playback entity so it can be stopped by despawn.
#[derive(Component)]
pub struct ThrustLoop;

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct AudioCuePlugin;

impl Plugin for AudioCuePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundAssets>()
            .init_resource::<ThrustEdge>()
            .add_systems(Startup, load_sound_assets)
            .add_systems(
                Update,
                (
                    thrust_loop_system.run_if(in_state(GameState::Playing)),
                    touchdown_cue_system,
                ),
            )
            .add_systems(OnExit(GameState::Playing), silence_thrust_loop);
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Probe the three sound files and load whichever exist.
///
/// The explicit on-disk check (rather than letting the asset server fail
/// silently later) is what produces the one-time warning the first session
/// would otherwise never see.
pub fn load_sound_assets(mut sounds: ResMut<SoundAssets>, asset_server: Res<AssetServer>) {
    sounds.thrust = load_optional_clip(&asset_server, "sounds/thrust.ogg");
    sounds.crash = load_optional_clip(&asset_server, "sounds/crash.ogg");
    sounds.success = load_optional_clip(&asset_server, "sounds/success.ogg");
}

fn load_optional_clip(asset_server: &AssetServer, relative: &str) -> Option<Handle<AudioSource>> {
    if Path::new("assets").join(relative).exists() {
        Some(asset_server.load(relative.to_string()))
    } else {
        warn!("Sound file assets/{relative} not found; cue disabled");
        None
    }
}

// ── Cue systems ───────────────────────────────────────────────────────────────

/// Start the thrust loop on the off→on edge, stop it on on→off.
pub fn thrust_loop_system(
    mut commands: Commands,
    thrust: Res<ThrustState>,
    mut edge: ResMut<ThrustEdge>,
    sounds: Res<SoundAssets>,
    loops: Query<Entity, With<ThrustLoop>>,
) {
    if thrust.active && !edge.was_active {
        if let Some(handle) = &sounds.thrust {
            commands.spawn((
                AudioPlayer(handle.clone()),
                PlaybackSettings::LOOP,
                ThrustLoop,
            ));
        }
    } else if !thrust.active && edge.was_active {
        for entity in loops.iter() {
            commands.entity(entity).despawn();
        }
    }

    edge.was_active = thrust.active;
}

/// Kill any running thrust loop and reset the edge when gameplay ends —
/// the session can resolve mid-burn.
pub fn silence_thrust_loop(
    mut commands: Commands,
    mut edge: ResMut<ThrustEdge>,
    mut thrust: ResMut<ThrustState>,
    loops: Query<Entity, With<ThrustLoop>>,
) {
    for entity in loops.iter() {
        commands.entity(entity).despawn();
    }
    edge.was_active = false;
    thrust.active = false;
}

/// Play the success or crash one-shot when the session resolves.
pub fn touchdown_cue_system(
    mut commands: Commands,
    sounds: Res<SoundAssets>,
    mut touchdowns: MessageReader<TouchdownMessage>,
) {
    for msg in touchdowns.read() {
        let clip = if msg.outcome.is_success() {
            &sounds.success
        } else {
            &sounds.crash
        };
        if let Some(handle) = clip {
            commands.spawn((AudioPlayer(handle.clone()), PlaybackSettings::DESPAWN));
        }
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// The edge detector must track the published thrust state even with no
    /// sound assets present (silent fallback path).
    #[test]
    fn edge_detector_tracks_thrust_transitions_without_assets() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(SoundAssets::default());
        app.insert_resource(ThrustEdge::default());
        app.insert_resource(ThrustState { active: false });
        app.add_systems(Update, thrust_loop_system);

        app.update();
        assert!(!app.world().resource::<ThrustEdge>().was_active);

        app.insert_resource(ThrustState { active: true });
        app.update();
        assert!(app.world().resource::<ThrustEdge>().was_active);

        app.insert_resource(ThrustState { active: false });
        app.update();
        assert!(!app.world().resource::<ThrustEdge>().was_active);
    }

    /// Missing sound files must not panic the cue systems.
    #[test]
    fn touchdown_cue_is_a_no_op_without_assets() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(SoundAssets::default());
        app.add_message::<TouchdownMessage>();
        app.add_systems(Update, touchdown_cue_system);

        app.world_mut().write_message(TouchdownMessage {
            outcome: crate::landing::LandingOutcome::CrashedOnPad,
            position: Vec2::ZERO,
        });
        app.update();
    }
}
