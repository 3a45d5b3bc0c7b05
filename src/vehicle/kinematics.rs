//! Per-tick kinematic integration: gravity, wind drift, position advance.
//!
//! Runs after the intent-apply step each fixed tick.  There is no
//! sub-stepping and no mid-step collision response — the landing evaluator
//! inspects the position only after it has been advanced.

use super::state::Vehicle;
use crate::config::TuningConfig;
use crate::level::LevelParams;
use bevy::prelude::*;

/// Integrate accelerations into velocity, then velocity into position.
///
/// Per tick: gravity subtracts from `vy`; the level's constant lateral wind
/// adds to `vx` every tick regardless of thrust state; the position advances
/// by the updated velocity.  The vehicle wraps across the canvas's x-edges.
/// No max-speed clamp, no normalization.
pub fn kinematics_system(
    params: Res<LevelParams>,
    config: Res<TuningConfig>,
    mut q: Query<(&mut Transform, &mut Vehicle)>,
) {
    let Ok((mut transform, mut vehicle)) = q.single_mut() else {
        return;
    };

    vehicle.velocity.y -= params.gravity;
    vehicle.velocity.x += params.wind;

    transform.translation.x += vehicle.velocity.x;
    transform.translation.y += vehicle.velocity.y;

    // Horizontal screen wrap.
    let half_width = config.half_width();
    if transform.translation.x < -half_width {
        transform.translation.x = half_width;
    } else if transform.translation.x > half_width {
        transform.translation.x = -half_width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GRAVITY;

    fn build_test_app(params: LevelParams) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TuningConfig::default());
        app.insert_resource(params);
        app.add_systems(Update, kinematics_system);
        app
    }

    fn spawn_vehicle_at(app: &mut App, pos: Vec2, velocity: Vec2) {
        app.world_mut().spawn((
            Vehicle {
                velocity,
                angle_deg: 0.0,
                fuel: 100.0,
                width: 20.0,
                height: 40.0,
            },
            Transform::from_translation(pos.extend(0.0)),
        ));
    }

    fn sample(app: &mut App) -> (Vec2, Vec2) {
        let mut query = app.world_mut().query::<(&Transform, &Vehicle)>();
        let (transform, vehicle) = query.single(app.world()).expect("vehicle must exist");
        (transform.translation.truncate(), vehicle.velocity)
    }

    #[test]
    fn gravity_pulls_velocity_down_every_tick() {
        let mut app = build_test_app(LevelParams::default());
        spawn_vehicle_at(&mut app, Vec2::ZERO, Vec2::ZERO);

        app.update();
        app.update();

        let (_, velocity) = sample(&mut app);
        assert!(
            (velocity.y + GRAVITY * 2.0).abs() < 1e-6,
            "two ticks of gravity, got {:?}",
            velocity
        );
    }

    #[test]
    fn wind_drifts_horizontally_every_tick() {
        let params = LevelParams {
            gravity: 0.0,
            wind: 0.05,
            starting_fuel: 100.0,
        };
        let mut app = build_test_app(params);
        spawn_vehicle_at(&mut app, Vec2::ZERO, Vec2::ZERO);

        for _ in 0..10 {
            app.update();
        }

        let (_, velocity) = sample(&mut app);
        assert!(
            (velocity.x - 0.5).abs() < 1e-5,
            "ten ticks of 0.05 wind, got {:?}",
            velocity
        );
    }

    #[test]
    fn position_advances_by_updated_velocity() {
        let params = LevelParams {
            gravity: 0.2,
            wind: 0.0,
            starting_fuel: 100.0,
        };
        let mut app = build_test_app(params);
        spawn_vehicle_at(&mut app, Vec2::new(10.0, 300.0), Vec2::new(1.0, -2.0));

        app.update();

        let (pos, velocity) = sample(&mut app);
        // Gravity applies before the move, so the tick travels at vy = −2.2.
        assert!((pos.x - 11.0).abs() < 1e-6);
        assert!((pos.y - 297.8).abs() < 1e-4, "got y = {}", pos.y);
        assert!((velocity.y + 2.2).abs() < 1e-6);
    }

    #[test]
    fn vehicle_wraps_across_canvas_edges() {
        let params = LevelParams {
            gravity: 0.0,
            wind: 0.0,
            starting_fuel: 100.0,
        };
        let mut app = build_test_app(params);
        spawn_vehicle_at(&mut app, Vec2::new(599.0, 0.0), Vec2::new(5.0, 0.0));

        app.update();

        let (pos, _) = sample(&mut app);
        assert_eq!(pos.x, -600.0, "crossing the right edge re-enters on the left");
    }
}
