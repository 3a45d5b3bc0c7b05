//! World rendering: gizmo outlines for the vehicle, terrain, pad, and tower.
//!
//! Everything here is a pure consumer of entity state — one immediate-mode
//! gizmo pass per frame while gameplay is active.  HUD and menu UI live in
//! [`crate::hud`] and [`crate::menu`].

use crate::terrain::{CatchTower, LandingPad, Terrain};
use crate::vehicle::{Vehicle, VehicleMode};
use bevy::prelude::*;

fn terrain_color() -> Color {
    Color::srgb(0.10, 0.75, 0.25)
}
fn pad_color() -> Color {
    Color::srgb(1.0, 0.9, 0.1)
}
fn hull_color() -> Color {
    Color::srgb(0.85, 0.85, 0.88)
}
fn tower_color() -> Color {
    Color::srgb(0.45, 0.45, 0.45)
}
fn zone_color(armed: bool) -> Color {
    if armed {
        Color::srgb(0.2, 1.0, 0.3)
    } else {
        Color::srgba(0.2, 1.0, 0.3, 0.35)
    }
}

/// Rotate a local offset into world space for the vehicle's orientation.
///
/// Positive angles tilt the hull to the right, matching the heading
/// convention used by the thrust mapper.
fn rotate_offset(offset: Vec2, angle_deg: f32) -> Vec2 {
    Vec2::from_angle(-angle_deg.to_radians()).rotate(offset)
}

/// Draw a closed polygon outline through `points`.
fn draw_outline(gizmos: &mut Gizmos, points: &[Vec2], color: Color) {
    for i in 0..points.len() {
        gizmos.line_2d(points[i], points[(i + 1) % points.len()], color);
    }
}

/// Draw the whole playfield: terrain silhouette, pad, vehicle hull, and (in
/// multi-stage sessions) the catch tower.
pub fn world_gizmo_system(
    mut gizmos: Gizmos,
    terrain: Res<Terrain>,
    pad: Res<LandingPad>,
    tower: Res<CatchTower>,
    mode: Res<VehicleMode>,
    q: Query<(&Transform, &Vehicle)>,
) {
    // ── Terrain silhouette ────────────────────────────────────────────────────
    if terrain.points.len() >= 2 {
        gizmos.linestrip_2d(terrain.points.iter().copied(), terrain_color());
    }

    // ── Landing pad ───────────────────────────────────────────────────────────
    let pad_corners = [
        Vec2::new(pad.left(), pad.top_y - pad.height),
        Vec2::new(pad.right(), pad.top_y - pad.height),
        Vec2::new(pad.right(), pad.top_y),
        Vec2::new(pad.left(), pad.top_y),
    ];
    draw_outline(&mut gizmos, &pad_corners, pad_color());

    // ── Catch tower (multi-stage only) ────────────────────────────────────────
    if *mode == VehicleMode::MultiStage {
        let base = Vec2::new(tower.base_x, tower.base_y);
        let top = base + Vec2::new(0.0, tower.height);
        gizmos.line_2d(base, top, tower_color());
        gizmos.line_2d(
            top + Vec2::new(-20.0, 0.0),
            top + Vec2::new(20.0, 0.0),
            tower_color(),
        );

        // Arms hang level when retracted, sweep upward when extended.
        let arm_angle = if tower.arms_extended { 30.0_f32 } else { 0.0 };
        let reach = tower.arm_length;
        let rise = reach * arm_angle.to_radians().sin();
        let run = reach * arm_angle.to_radians().cos();
        let shoulder = top - Vec2::new(0.0, 5.0);
        gizmos.line_2d(shoulder, shoulder + Vec2::new(-run, -rise), tower_color());
        gizmos.line_2d(shoulder, shoulder + Vec2::new(run, -rise), tower_color());

        let zone = &tower.zone;
        let zone_corners = [
            zone.center + Vec2::new(-zone.half_width, -zone.half_height),
            zone.center + Vec2::new(zone.half_width, -zone.half_height),
            zone.center + Vec2::new(zone.half_width, zone.half_height),
            zone.center + Vec2::new(-zone.half_width, zone.half_height),
        ];
        draw_outline(&mut gizmos, &zone_corners, zone_color(tower.arms_extended));
    }

    // ── Vehicle hull ──────────────────────────────────────────────────────────
    let Ok((transform, vehicle)) = q.single() else {
        return;
    };
    let pos = transform.translation.truncate();
    let hw = vehicle.width * 0.5;
    let hh = vehicle.height * 0.5;

    let hull: Vec<Vec2> = [
        Vec2::new(-hw, -hh),
        Vec2::new(hw, -hh),
        Vec2::new(hw, hh),
        Vec2::new(-hw, hh),
    ]
    .into_iter()
    .map(|corner| pos + rotate_offset(corner, vehicle.angle_deg))
    .collect();
    draw_outline(&mut gizmos, &hull, hull_color());

    // Nose cone.
    let nose: Vec<Vec2> = [
        Vec2::new(-hw * 0.5, hh),
        Vec2::new(0.0, hh + 6.0),
        Vec2::new(hw * 0.5, hh),
    ]
    .into_iter()
    .map(|corner| pos + rotate_offset(corner, vehicle.angle_deg))
    .collect();
    draw_outline(&mut gizmos, &nose, hull_color());
}
