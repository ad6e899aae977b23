//! Procedural course generation: sloped platforms and side walls.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rapier2d::prelude::*;

use crate::config::RaceConfig;
use crate::physics::PhysicsWorld;

/// A static course obstacle, as seen by the renderer.
///
/// The snapshot is read-only; the collider handle ties it back to the
/// physics world so a finished course can be released before the next one
/// is generated.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Center position.
    pub position: [f32; 2],
    /// Rotation in radians.
    pub angle: f32,
    pub width: f32,
    pub height: f32,
    pub collider: ColliderHandle,
}

/// Generates race courses as fixed colliders in the physics world.
pub struct LevelGenerator;

impl LevelGenerator {
    /// Generates a fresh course: alternating-slope platform rows between the
    /// spawn band and the finish line, plus side walls that keep marbles on
    /// the course. Same seed and config produce the same course.
    pub fn generate(
        world: &mut PhysicsWorld,
        config: &RaceConfig,
        seed: u64,
    ) -> Vec<Platform> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut platforms = Vec::new();

        let top = config.spawn_area.y[1] + 60.0;
        let bottom = config.finish_line_y - 60.0;
        let rows = config.platform_rows;
        #[allow(clippy::cast_precision_loss)]
        let gap = if rows == 0 {
            0.0
        } else {
            (bottom - top) / rows as f32
        };

        for row in 0..rows {
            let width = rng.random_range(0.35..0.55) * config.surface_width;
            let x = rng.random_range(width / 2.0..config.surface_width - width / 2.0);
            #[allow(clippy::cast_precision_loss)]
            let y = top + gap * row as f32 + rng.random_range(-0.15..0.15) * gap;
            // Alternate slope direction so marbles zig-zag down the course.
            let slope = rng.random_range(0.15..0.35);
            let angle = if row % 2 == 0 { slope } else { -slope };

            platforms.push(Self::add_platform(
                world,
                [x, y],
                angle,
                width,
                config.platform_thickness,
            ));
        }

        let wall_span = config.finish_line_y;
        for x in [0.0, config.surface_width] {
            platforms.push(Self::add_platform(
                world,
                [x, wall_span / 2.0],
                0.0,
                config.platform_thickness,
                wall_span,
            ));
        }

        tracing::debug!(
            "generated course: {} platforms (seed={seed})",
            platforms.len()
        );
        platforms
    }

    /// Removes a previous course's colliders from the physics world.
    pub fn release(world: &mut PhysicsWorld, platforms: Vec<Platform>) {
        for platform in platforms {
            world.remove_collider(platform.collider);
        }
    }

    fn add_platform(
        world: &mut PhysicsWorld,
        position: [f32; 2],
        angle: f32,
        width: f32,
        height: f32,
    ) -> Platform {
        let collider = ColliderBuilder::cuboid(width / 2.0, height / 2.0)
            .translation(Vector::new(position[0], position[1]))
            .rotation(angle)
            .friction(0.3)
            .build();
        let handle = world.add_static_collider(collider);

        Platform {
            position,
            angle,
            width,
            height,
            collider: handle,
        }
    }
}
