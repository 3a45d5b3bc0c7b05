//! Particle effects: thrust exhaust and the crash explosion burst.
//!
//! ## Design
//!
//! Particles are lightweight ECS entities with a [`Particle`] component that
//! stores per-tick physics state (velocity, age, colour).  The pipeline:
//!
//! | System                        | Schedule    | Purpose                                      |
//! |-------------------------------|-------------|----------------------------------------------|
//! | `attach_particle_mesh_system` | Update      | Attach `Mesh2d` to freshly-spawned particles |
//! | `particle_advance_system`     | FixedUpdate | Move and age particles, despawn expired ones |
//! | `particle_cap_system`         | FixedUpdate | Evict oldest particles over the hard cap     |
//! | `particle_fade_system`        | Update      | Fade material alpha by remaining lifetime    |
//! | `explosion_burst_system`      | Update      | Spawn the crash burst on a failed touchdown  |
//!
//! Spawn helpers take only `&mut Commands` — no `Assets` access needed at
//! spawn time; `attach_particle_mesh_system` supplies the `Mesh2d` one frame
//! later, which is imperceptible at 60 Hz.  A single shared circle-mesh
//! [`ParticleMesh`] resource avoids per-particle mesh allocation; each
//! particle gets its own `ColorMaterial` so its alpha fades individually.
//!
//! The population is bounded by a hard cap with oldest-first eviction, so a
//! burst storm can never grow the particle list without limit.  Purely
//! cosmetic: nothing here feeds back into the simulation.

use crate::config::TuningConfig;
use crate::landing::TouchdownMessage;
use crate::vehicle::{ThrustState, Vehicle};
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use rand::Rng;

// ── Resources ─────────────────────────────────────────────────────────────────

/// Shared circle mesh used by all particle entities (created once at startup).
#[derive(Resource)]
pub struct ParticleMesh(pub Handle<Mesh>);

// ── Component ─────────────────────────────────────────────────────────────────

/// Short-lived visual particle entity.
///
/// Ages by one per fixed tick; despawned once `age >= lifetime`.  `material`
/// is `None` until `attach_particle_mesh_system` runs.
#[derive(Component)]
pub struct Particle {
    /// World-space velocity (units/tick).
    pub velocity: Vec2,
    /// Ticks alive so far.
    pub age: f32,
    /// Total lifetime in ticks.
    pub lifetime: f32,
    /// Base colour red channel (sRGB, 0–1).
    pub r: f32,
    /// Base colour green channel.
    pub g: f32,
    /// Base colour blue channel.
    pub b: f32,
    /// Handle to this particle's unique `ColorMaterial` so the fade system
    /// can update the alpha.
    pub material: Option<Handle<ColorMaterial>>,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct ParticlesPlugin;

impl Plugin for ParticlesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_particle_mesh)
            .add_systems(
                FixedUpdate,
                (particle_advance_system, particle_cap_system).chain(),
            )
            .add_systems(
                Update,
                (
                    attach_particle_mesh_system,
                    particle_fade_system,
                    explosion_burst_system,
                )
                    .chain(),
            );
    }
}

// ── Startup system ────────────────────────────────────────────────────────────

/// Create the shared circle mesh and store it as a [`ParticleMesh`] resource.
fn init_particle_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let handle = meshes.add(circle_mesh(2.0, 6));
    commands.insert_resource(ParticleMesh(handle));
}

// ── Update / FixedUpdate systems ──────────────────────────────────────────────

/// Attach `Mesh2d` + `MeshMaterial2d` to every newly-spawned [`Particle`].
///
/// Uses [`Added<Particle>`] so it only runs for particles that appeared since
/// the last frame — zero overhead for the steady-state population.
pub fn attach_particle_mesh_system(
    mut commands: Commands,
    particle_mesh: Res<ParticleMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(Entity, &mut Particle), Added<Particle>>,
) {
    for (entity, mut particle) in query.iter_mut() {
        let mat_handle = materials.add(ColorMaterial::from_color(Color::srgba(
            particle.r, particle.g, particle.b, 1.0,
        )));
        particle.material = Some(mat_handle.clone());
        commands
            .entity(entity)
            .insert((Mesh2d(particle_mesh.0.clone()), MeshMaterial2d(mat_handle)));
    }
}

/// Advance all particles one tick: translate by velocity, age, and despawn
/// any whose age has reached their lifetime.
pub fn particle_advance_system(
    mut commands: Commands,
    mut query: Query<(Entity, &mut Transform, &mut Particle)>,
) {
    for (entity, mut transform, mut particle) in query.iter_mut() {
        particle.age += 1.0;

        if particle.age >= particle.lifetime {
            commands.entity(entity).despawn();
            continue;
        }

        transform.translation.x += particle.velocity.x;
        transform.translation.y += particle.velocity.y;
    }
}

/// Enforce the hard population cap, despawning the oldest particles first.
pub fn particle_cap_system(
    mut commands: Commands,
    config: Res<TuningConfig>,
    query: Query<(Entity, &Particle)>,
) {
    let live = query.iter().count();
    if live <= config.max_particles {
        return;
    }

    let mut by_age: Vec<(Entity, f32)> =
        query.iter().map(|(entity, p)| (entity, p.age)).collect();
    by_age.sort_by(|a, b| b.1.total_cmp(&a.1));

    for (entity, _) in by_age.into_iter().take(live - config.max_particles) {
        commands.entity(entity).despawn();
    }
}

/// Fade each particle's material alpha linearly with remaining lifetime.
pub fn particle_fade_system(
    mut materials: ResMut<Assets<ColorMaterial>>,
    query: Query<&Particle>,
) {
    for particle in query.iter() {
        let alpha = (1.0 - particle.age / particle.lifetime).clamp(0.0, 1.0);
        if let Some(ref handle) = particle.material {
            if let Some(mat) = materials.get_mut(handle) {
                mat.color = Color::srgba(particle.r, particle.g, particle.b, alpha);
            }
        }
    }
}

/// Spawn the explosion burst at the crash site when a touchdown fails.
pub fn explosion_burst_system(
    mut commands: Commands,
    config: Res<TuningConfig>,
    mut touchdowns: MessageReader<TouchdownMessage>,
) {
    for msg in touchdowns.read() {
        if !msg.outcome.is_success() {
            spawn_explosion_particles(&mut commands, msg.position, &config);
        }
    }
}

/// Emit exhaust from the vehicle tail on every tick the main engine fires.
///
/// Scheduled by the simulation plugin after the intent-apply step so it sees
/// the current tick's [`ThrustState`].
pub fn exhaust_emitter_system(
    mut commands: Commands,
    config: Res<TuningConfig>,
    thrust: Res<ThrustState>,
    q: Query<(&Transform, &Vehicle)>,
) {
    if !thrust.active {
        return;
    }
    let Ok((transform, vehicle)) = q.single() else {
        return;
    };

    let mut rng = rand::thread_rng();
    let tail = Vec2::new(
        transform.translation.x,
        vehicle.bottom_edge(transform.translation.y),
    );

    for _ in 0..config.exhaust_particles_per_tick {
        let velocity = Vec2::new(rng.gen_range(-1.0..1.0), -rng.gen_range(1.0..3.0));

        // Orange flame with slight variation.
        let r = 1.0;
        let g = rng.gen_range(0.55_f32..0.75_f32);
        let b = 0.0;

        commands.spawn((
            Particle {
                velocity,
                age: 0.0,
                lifetime: config.exhaust_particle_lifetime,
                r,
                g,
                b,
                material: None,
            },
            Transform::from_translation(tail.extend(0.9)),
            Visibility::default(),
        ));
    }
}

// ── Public spawn helpers ──────────────────────────────────────────────────────

/// Spawn the crash burst: radial red-orange debris from the impact point.
pub fn spawn_explosion_particles(commands: &mut Commands, pos: Vec2, config: &TuningConfig) {
    let mut rng = rand::thread_rng();

    for _ in 0..config.explosion_particle_count {
        let angle = rng.gen_range(0.0_f32..std::f32::consts::TAU);
        let speed = rng.gen_range(2.0_f32..8.0_f32);
        let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;

        let r = 1.0;
        let g = rng.gen_range(0.0_f32..0.25_f32);
        let b = rng.gen_range(0.0_f32..0.10_f32);

        commands.spawn((
            Particle {
                velocity,
                age: 0.0,
                lifetime: config.explosion_particle_lifetime,
                r,
                g,
                b,
                material: None,
            },
            Transform::from_translation(pos.extend(0.9)),
            Visibility::default(),
        ));
    }
}

// ── Mesh helper ───────────────────────────────────────────────────────────────

/// Build a filled circle mesh approximated by an `n`-sided regular polygon.
///
/// Uses a triangle fan from the centre: `(0, i, i+1 mod n)`.
fn circle_mesh(radius: f32, sides: u32) -> Mesh {
    let n = sides as usize;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(n + 1);

    // Centre vertex.
    positions.push([0.0, 0.0, 0.0]);
    normals.push([0.0, 0.0, 1.0]);
    uvs.push([0.5, 0.5]);

    for i in 0..n {
        let angle = std::f32::consts::TAU * i as f32 / n as f32;
        let x = radius * angle.cos();
        let y = radius * angle.sin();
        positions.push([x, y, 0.0]);
        normals.push([0.0, 0.0, 1.0]);
        uvs.push([x / (2.0 * radius) + 0.5, y / (2.0 * radius) + 0.5]);
    }

    let mut indices: Vec<u32> = Vec::with_capacity(n * 3);
    for i in 0..n as u32 {
        let v1 = i + 1;
        let v2 = (i + 1) % n as u32 + 1;
        indices.extend_from_slice(&[0, v1, v2]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn build_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TuningConfig::default());
        app
    }

    fn spawn_plain_particle(app: &mut App, age: f32, lifetime: f32) {
        app.world_mut().spawn((
            Particle {
                velocity: Vec2::new(1.0, 0.0),
                age,
                lifetime,
                r: 1.0,
                g: 0.5,
                b: 0.0,
                material: None,
            },
            Transform::default(),
        ));
    }

    fn live_count(app: &mut App) -> usize {
        let mut query = app.world_mut().query::<&Particle>();
        query.iter(app.world()).count()
    }

    #[test]
    fn advance_moves_and_ages_particles() {
        let mut app = build_test_app();
        spawn_plain_particle(&mut app, 0.0, 10.0);
        app.add_systems(Update, particle_advance_system);

        app.update();

        let mut query = app.world_mut().query::<(&Transform, &Particle)>();
        let (transform, particle) = query.single(app.world()).expect("particle lives");
        assert_eq!(transform.translation.x, 1.0);
        assert_eq!(particle.age, 1.0);
    }

    #[test]
    fn expired_particles_are_pruned() {
        let mut app = build_test_app();
        spawn_plain_particle(&mut app, 9.0, 10.0);
        spawn_plain_particle(&mut app, 0.0, 10.0);
        app.add_systems(Update, particle_advance_system);

        app.update();

        assert_eq!(live_count(&mut app), 1, "only the young particle survives");
    }

    #[test]
    fn cap_evicts_oldest_first() {
        let mut app = build_test_app();
        app.insert_resource(TuningConfig {
            max_particles: 3,
            ..Default::default()
        });
        for age in [5.0, 1.0, 9.0, 3.0, 7.0] {
            spawn_plain_particle(&mut app, age, 100.0);
        }
        app.add_systems(Update, particle_cap_system);

        app.update();

        let mut query = app.world_mut().query::<&Particle>();
        let mut ages: Vec<f32> = query.iter(app.world()).map(|p| p.age).collect();
        ages.sort_by(f32::total_cmp);
        assert_eq!(ages, vec![1.0, 3.0, 5.0], "the two oldest must be evicted");
    }

    #[test]
    fn cap_leaves_small_populations_alone() {
        let mut app = build_test_app();
        for _ in 0..10 {
            spawn_plain_particle(&mut app, 0.0, 100.0);
        }
        app.add_systems(Update, particle_cap_system);

        app.update();

        assert_eq!(live_count(&mut app), 10);
    }

    #[test]
    fn explosion_burst_matches_configured_count() {
        let mut app = build_test_app();
        app.add_message::<TouchdownMessage>();
        app.add_systems(Update, explosion_burst_system);

        app.world_mut().write_message(TouchdownMessage {
            outcome: crate::landing::LandingOutcome::CrashedOffPad,
            position: Vec2::new(10.0, -290.0),
        });
        app.update();

        assert_eq!(live_count(&mut app), 50);
    }

    #[test]
    fn successful_touchdown_spawns_no_burst() {
        let mut app = build_test_app();
        app.add_message::<TouchdownMessage>();
        app.add_systems(Update, explosion_burst_system);

        app.world_mut().write_message(TouchdownMessage {
            outcome: crate::landing::LandingOutcome::Landed,
            position: Vec2::ZERO,
        });
        app.update();

        assert_eq!(live_count(&mut app), 0);
    }
}
