use bevy::prelude::*;

/// Setup camera for 2D rendering.
///
/// The default `Camera2d` at the origin shows the full 1200×800 logical
/// canvas; world coordinates are y-up with the ground band near the bottom
/// edge.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
