//! Celestial body spawning and animation.
//!
//! Each body is a small hierarchy:
//!
//! ```text
//! OrbitPivot (at the Sun, turns to carry the body round)
//! └── anchor (offset by the orbital distance)
//!     ├── body mesh [BodyVisual, BodySpin]
//!     │   └── glow shell [BodyGlow]
//!     ├── ring
//!     └── MoonPivot
//!         └── moon mesh
//! ```
//!
//! Orbits and moons freeze while any body is selected so the camera can settle
//! on a still target. The selected body (and the Sun) keep spinning.

use bevy::{prelude::*, render::render_resource::Face};
use rand::Rng;

use crate::config::AppConfig;
use crate::content::{BodyId, BodyData};
use crate::render::SceneEntity;
use crate::render::highlight::SelectedBody;
use crate::texture::{body_texture, ring_texture};

/// Orbital speeds in the content table are per frame at 60 fps; this scales
/// them to radians per second.
pub const ORBIT_SPEED_SCALE: f32 = 20.0;

/// Self-rotation in radians per second.
pub const SPIN_RATE: f32 = 0.3;

/// Ring radii relative to the body size.
pub const RING_INNER: f32 = 1.3;
pub const RING_OUTER: f32 = 2.2;

/// Glow shell scale for the Sun and for planets.
pub const SUN_GLOW_SCALE: f32 = 1.3;
pub const PLANET_GLOW_SCALE: f32 = 1.2;

const MOON_COLOR: u32 = 0xBDC3C7;
const SUN_GLOW_COLOR: u32 = 0xFFAB00;

/// The visible sphere of a body. Its world position is the body's position.
#[derive(Component, Debug, Clone, Copy)]
pub struct BodyVisual {
    pub id: BodyId,
    pub size: f32,
}

/// Entity at the Sun that turns to carry a body round its orbit.
#[derive(Component, Debug)]
pub struct OrbitPivot {
    pub id: BodyId,
    /// Radians per second.
    pub speed: f32,
}

/// Self-rotation marker.
#[derive(Component)]
pub struct BodySpin;

/// Glow shell around a body.
#[derive(Component, Debug)]
pub struct BodyGlow(pub BodyId);

/// Pivot that carries one moon round its planet.
#[derive(Component, Debug)]
pub struct MoonPivot {
    /// Radians per second.
    pub speed: f32,
}

/// Plugin providing celestial body spawning and motion.
pub struct CelestialBodyPlugin;

impl Plugin for CelestialBodyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>();
    }
}

/// Distance of moon `index` from a planet of `planet_size`.
pub fn moon_distance(planet_size: f32, index: u8) -> f32 {
    planet_size + 0.8 + index as f32 * 0.6
}

/// Whether a body turns on its own axis this frame.
pub fn spins(id: BodyId, selected: &SelectedBody) -> bool {
    id.is_star() || selected.is(id) || !selected.any()
}

fn srgb_hex(hex: u32) -> Color {
    Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Spawn the Sun, planets, rings and moons.
pub(crate) fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    config: Res<AppConfig>,
) {
    let mut rng = rand::thread_rng();
    let visuals = &config.visuals;
    let moon_material = materials.add(StandardMaterial {
        base_color: srgb_hex(MOON_COLOR),
        perceptual_roughness: 0.8,
        ..default()
    });

    for (index, id) in BodyId::ALL.iter().enumerate() {
        let data: &BodyData = id.data();
        let seed = visuals.texture_seed.wrapping_add(index as u64);
        let texture = images.add(
            body_texture(data.texture, data.rgb(), seed, visuals.texture_size).into_image(),
        );

        let surface = if id.is_star() {
            StandardMaterial {
                base_color_texture: Some(texture),
                unlit: true,
                ..default()
            }
        } else {
            StandardMaterial {
                base_color_texture: Some(texture),
                perceptual_roughness: 0.8,
                metallic: 0.1,
                ..default()
            }
        };

        let (glow_color, glow_alpha, glow_scale) = if id.is_star() {
            (srgb_hex(SUN_GLOW_COLOR), 0.4, SUN_GLOW_SCALE)
        } else {
            (data.bevy_color(), 0.45, PLANET_GLOW_SCALE)
        };
        let glow = materials.add(StandardMaterial {
            base_color: glow_color.with_alpha(glow_alpha),
            unlit: true,
            alpha_mode: AlphaMode::Add,
            // Only the inside of the shell is drawn, so it haloes the body.
            cull_mode: Some(Face::Front),
            ..default()
        });

        let sphere = meshes.add(Sphere::new(data.size).mesh().uv(64, 32));
        let glow_mesh = meshes.add(Sphere::new(data.size).mesh().uv(32, 16));
        let initial_angle = if id.is_star() {
            0.0
        } else {
            rng.gen_range(0.0..std::f32::consts::TAU)
        };

        commands
            .spawn((
                Name::new(data.name),
                OrbitPivot {
                    id: *id,
                    speed: data.speed * ORBIT_SPEED_SCALE,
                },
                Transform::from_rotation(Quat::from_rotation_y(initial_angle)),
                Visibility::default(),
                SceneEntity,
            ))
            .with_children(|pivot| {
                pivot
                    .spawn((
                        Transform::from_xyz(data.distance, 0.0, 0.0),
                        Visibility::default(),
                    ))
                    .with_children(|anchor| {
                        anchor
                            .spawn((
                                Mesh3d(sphere),
                                MeshMaterial3d(materials.add(surface)),
                                Transform::default(),
                                BodyVisual {
                                    id: *id,
                                    size: data.size,
                                },
                                BodySpin,
                            ))
                            .with_children(|body| {
                                body.spawn((
                                    Mesh3d(glow_mesh),
                                    MeshMaterial3d(glow),
                                    Transform::from_scale(Vec3::splat(glow_scale)),
                                    if id.is_star() {
                                        Visibility::Inherited
                                    } else {
                                        Visibility::Hidden
                                    },
                                    BodyGlow(*id),
                                ));
                            });

                        if let Some(ring) = data.ring {
                            let ring_image = images.add(ring_texture(ring, seed).into_image());
                            anchor.spawn((
                                Mesh3d(meshes.add(
                                    Annulus::new(data.size * RING_INNER, data.size * RING_OUTER)
                                        .mesh()
                                        .resolution(128),
                                )),
                                MeshMaterial3d(materials.add(StandardMaterial {
                                    base_color: Color::WHITE.with_alpha(0.8),
                                    base_color_texture: Some(ring_image),
                                    alpha_mode: AlphaMode::Blend,
                                    perceptual_roughness: 0.8,
                                    double_sided: true,
                                    cull_mode: None,
                                    ..default()
                                })),
                                Transform::from_rotation(ring.tilt()),
                            ));
                        }

                        for moon in 0..data.moons {
                            let radius = rng.gen_range(0.15..0.25);
                            anchor
                                .spawn((
                                    MoonPivot {
                                        speed: rng.gen_range(0.5..1.5),
                                    },
                                    Transform::from_rotation(Quat::from_rotation_y(
                                        rng.gen_range(0.0..std::f32::consts::TAU),
                                    )),
                                    Visibility::default(),
                                ))
                                .with_children(|moon_pivot| {
                                    moon_pivot.spawn((
                                        Mesh3d(meshes.add(Sphere::new(radius).mesh().uv(16, 8))),
                                        MeshMaterial3d(moon_material.clone()),
                                        Transform::from_xyz(moon_distance(data.size, moon), 0.0, 0.0),
                                    ));
                                });
                        }
                    });
            });
    }

    info!("Spawned {} celestial bodies", BodyId::ALL.len());
}

/// Carry planets round the Sun while nothing is selected.
pub(crate) fn advance_orbits(
    time: Res<Time>,
    selected: Res<SelectedBody>,
    mut pivots: Query<(&OrbitPivot, &mut Transform)>,
) {
    if selected.any() {
        return;
    }
    let dt = time.delta_secs();
    for (pivot, mut transform) in &mut pivots {
        if pivot.id.is_star() {
            continue;
        }
        transform.rotate_y(pivot.speed * dt);
    }
}

pub(crate) fn spin_bodies(
    time: Res<Time>,
    selected: Res<SelectedBody>,
    mut bodies: Query<(&BodyVisual, &mut Transform), With<BodySpin>>,
) {
    let angle = SPIN_RATE * time.delta_secs();
    for (visual, mut transform) in &mut bodies {
        if spins(visual.id, &selected) {
            transform.rotate_y(angle);
        }
    }
}

pub(crate) fn orbit_moons(
    time: Res<Time>,
    selected: Res<SelectedBody>,
    mut moons: Query<(&MoonPivot, &mut Transform)>,
) {
    if selected.any() {
        return;
    }
    let dt = time.delta_secs();
    for (moon, mut transform) in &mut moons {
        transform.rotate_y(moon.speed * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moons_clear_their_planet() {
        for id in BodyId::ALL {
            let data = id.data();
            for moon in 0..data.moons {
                assert!(moon_distance(data.size, moon) > data.size);
            }
        }
    }

    #[test]
    fn test_spin_rules() {
        let mut selected = SelectedBody::default();
        assert!(spins(BodyId::Mars, &selected));

        selected.select(BodyId::Earth);
        assert!(spins(BodyId::Earth, &selected));
        assert!(spins(BodyId::Sun, &selected));
        assert!(!spins(BodyId::Mars, &selected));
    }
}
