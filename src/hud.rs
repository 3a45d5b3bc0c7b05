//! In-flight HUD: fuel bar and telemetry readout.
//!
//! | System               | Schedule            | Purpose                      |
//! |----------------------|---------------------|------------------------------|
//! | `setup_hud`          | `OnEnter(Playing)`  | Spawn the HUD node tree      |
//! | `cleanup_hud`        | `OnExit(Playing)`   | Despawn the HUD              |
//! | `hud_refresh_system` | `Update` (Playing)  | Refresh bar width + text     |
//!
//! The HUD is a pure consumer of simulation state; nothing here feeds back
//! into gameplay.

use crate::config::TuningConfig;
use crate::level::{LevelCounter, LevelParams};
use crate::menu::GameState;
use crate::score::{HighScore, SessionScore};
use crate::vehicle::Vehicle;
use bevy::prelude::*;

const FUEL_BAR_WIDTH: f32 = 200.0;

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the HUD; despawned on `OnExit(Playing)`.
#[derive(Component)]
pub struct HudRoot;

/// The green fill inside the fuel bar; its width tracks remaining fuel.
#[derive(Component)]
pub struct FuelBarFill;

/// The multi-line telemetry text block.
#[derive(Component)]
pub struct TelemetryText;

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), setup_hud)
            .add_systems(OnExit(GameState::Playing), cleanup_hud)
            .add_systems(
                Update,
                hud_refresh_system.run_if(in_state(GameState::Playing)),
            );
    }
}

// ── Setup / teardown ──────────────────────────────────────────────────────────

/// Spawn the HUD in the top-left corner: fuel bar on top, telemetry below.
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|root| {
            // Fuel bar: red background, green fill clipped by remaining fuel.
            root.spawn((
                Node {
                    width: Val::Px(FUEL_BAR_WIDTH),
                    height: Val::Px(20.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.55, 0.08, 0.08)),
            ))
            .with_children(|bar| {
                bar.spawn((
                    Node {
                        width: Val::Px(FUEL_BAR_WIDTH),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.12, 0.70, 0.20)),
                    FuelBarFill,
                ));
            });

            root.spawn((
                Text::new(String::new()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                TelemetryText,
            ));
        });
}

/// Recursively despawn the HUD.
pub fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Refresh ───────────────────────────────────────────────────────────────────

/// Refresh the fuel bar width and the telemetry text from live state.
#[allow(clippy::too_many_arguments)]
pub fn hud_refresh_system(
    config: Res<TuningConfig>,
    params: Res<LevelParams>,
    level: Res<LevelCounter>,
    score: Res<SessionScore>,
    high: Res<HighScore>,
    q_vehicle: Query<(&Transform, &Vehicle)>,
    mut q_fill: Query<&mut Node, With<FuelBarFill>>,
    mut q_text: Query<&mut Text, With<TelemetryText>>,
) {
    let Ok((transform, vehicle)) = q_vehicle.single() else {
        return;
    };

    let fraction = if params.starting_fuel > 0.0 {
        (vehicle.fuel / params.starting_fuel).clamp(0.0, 1.0)
    } else {
        0.0
    };
    if let Ok(mut fill) = q_fill.single_mut() {
        fill.width = Val::Px(FUEL_BAR_WIDTH * fraction);
    }

    let altitude = vehicle.bottom_edge(transform.translation.y) - config.ground_line_y();
    if let Ok(mut text) = q_text.single_mut() {
        text.0 = format!(
            "Fuel: {:.0}\n\
             Altitude: {:.0} m\n\
             Vertical Speed: {:+.1} m/s\n\
             Horizontal Speed: {:+.1} m/s\n\
             Angle: {:.0}°\n\
             Score: {}\n\
             Level: {}\n\
             High Score: {}",
            vehicle.fuel,
            altitude.max(0.0),
            vehicle.velocity.y,
            vehicle.velocity.x,
            vehicle.angle_deg,
            score.0,
            level.0,
            high.0,
        );
    }
}
