//! Background rendering for the solar-system scene.
//!
//! Provides the starfield shell, twinkling sparkles and scene lighting.

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;
use rand::Rng;

use crate::config::AppConfig;
use crate::render::SceneEntity;

/// Inner radius of the starfield shell.
pub const STAR_SHELL_RADIUS: f32 = 150.0;

/// Thickness of the starfield shell.
pub const STAR_SHELL_DEPTH: f32 = 50.0;

/// Side of the cube the sparkles float in.
pub const SPARKLE_EXTENT: f32 = 100.0;

/// Scene background.
pub const SPACE_COLOR: Color = Color::srgb(0.008, 0.008, 0.02);

/// Twinkle state for one sparkle.
#[derive(Component, Debug)]
pub struct Sparkle {
    pub phase: f32,
    pub speed: f32,
}

impl Sparkle {
    /// Scale at `elapsed` seconds, between 0.2 and 1.0.
    pub fn scale_at(&self, elapsed: f32) -> f32 {
        0.6 + 0.4 * (elapsed * self.speed + self.phase).sin()
    }
}

/// Random point in the starfield shell.
pub fn star_position(rng: &mut impl Rng) -> Vec3 {
    // Rejection-sample a direction so stars are uniform over the sphere.
    let direction = loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len = v.length_squared();
        if len > 1e-4 && len <= 1.0 {
            break v.normalize();
        }
    };
    direction * (STAR_SHELL_RADIUS + rng.gen_range(0.0..STAR_SHELL_DEPTH))
}

pub(crate) fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<AppConfig>,
) {
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });
    let star_mesh = meshes.add(Sphere::new(0.25).mesh().uv(8, 6));

    let mut rng = rand::thread_rng();
    let star_count = config.visuals.star_count;

    for _ in 0..star_count {
        let scale = rng.gen_range(0.4..1.6);
        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_material.clone()),
            Transform::from_translation(star_position(&mut rng)).with_scale(Vec3::splat(scale)),
            SceneEntity,
        ));
    }

    let sparkle_material = materials.add(StandardMaterial {
        base_color: Color::WHITE.with_alpha(0.5),
        unlit: true,
        alpha_mode: AlphaMode::Add,
        ..default()
    });
    let sparkle_mesh = meshes.add(Sphere::new(0.08).mesh().uv(6, 4));
    let sparkle_count = config.visuals.sparkle_count;
    let half = SPARKLE_EXTENT / 2.0;

    for _ in 0..sparkle_count {
        commands.spawn((
            Mesh3d(sparkle_mesh.clone()),
            MeshMaterial3d(sparkle_material.clone()),
            Transform::from_xyz(
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            ),
            Sparkle {
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
                speed: rng.gen_range(0.8..2.4),
            },
            SceneEntity,
        ));
    }

    info!("Spawned {star_count} background stars and {sparkle_count} sparkles");
}

pub(crate) fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(ClearColor(SPACE_COLOR));
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 200.0,
        ..default()
    });

    // Warm light from the Sun.
    commands.spawn((
        PointLight {
            color: Color::srgb_u8(0xFF, 0xD5, 0x4F),
            intensity: 5.0e7,
            range: 300.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
        SceneEntity,
    ));

    info!("Scene lighting initialized");
}

pub(crate) fn twinkle_sparkles(time: Res<Time>, mut sparkles: Query<(&Sparkle, &mut Transform)>) {
    let elapsed = time.elapsed_secs();
    for (sparkle, mut transform) in &mut sparkles {
        transform.scale = Vec3::splat(sparkle.scale_at(elapsed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_stars_lie_in_shell() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let d = star_position(&mut rng).length();
            assert!(d >= STAR_SHELL_RADIUS - 1e-3);
            assert!(d <= STAR_SHELL_RADIUS + STAR_SHELL_DEPTH + 1e-3);
        }
    }

    #[test]
    fn test_sparkle_scale_bounds() {
        let sparkle = Sparkle { phase: 0.3, speed: 1.7 };
        for step in 0..200 {
            let s = sparkle.scale_at(step as f32 * 0.05);
            assert!((0.2..=1.0).contains(&s));
        }
    }
}
