//! Race bookkeeping: marble entities, finish detection, and standings.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::RaceConfig;
use crate::physics::PhysicsWorld;

/// Unique identifier for a marble.
pub type MarbleId = u32;

/// Marble entity racing down the course.
#[derive(Debug, Clone)]
pub struct Marble {
    pub id: MarbleId,
    /// Index into [`Color::palette`].
    pub color_index: usize,
    pub color: Color,
    pub name: &'static str,
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
    pub radius: f32,
    pub finished: bool,
}

/// A marble's recorded completion, in finish order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FinishRecord {
    pub marble_id: MarbleId,
    pub color_index: usize,
    pub elapsed_seconds: f64,
}

/// Read-only per-frame view of a marble for rendering.
#[derive(Debug, Clone, Copy)]
pub struct MarbleView {
    pub position: [f32; 2],
    pub color: Color,
    pub color_index: usize,
    pub name: &'static str,
}

/// Manages marbles in the physics world and derives race standings.
///
/// Standings order is append order of finish detection; equal times keep
/// their detection order and no further tie-break is applied.
#[derive(Debug)]
pub struct RaceManager {
    marbles: Vec<Marble>,
    finished: Vec<FinishRecord>,
    next_id: MarbleId,
    rng: ChaCha8Rng,
    seed: u64,
    racing: bool,
    start_frame: u64,
    first_finish_frame: Option<u64>,
}

impl RaceManager {
    /// Creates a new race manager with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self {
            marbles: Vec::new(),
            finished: Vec::new(),
            next_id: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            racing: false,
            start_frame: 0,
            first_finish_frame: None,
        }
    }

    /// Spawns one marble per palette color across the spawn band.
    ///
    /// Marbles are laned evenly with seeded jitter so they never stack on
    /// the exact same point while staying deterministic per seed.
    pub fn create_marbles(&mut self, world: &mut PhysicsWorld, config: &RaceConfig) {
        let palette = Color::palette();
        #[allow(clippy::cast_precision_loss)]
        let lane_width =
            (config.spawn_area.x[1] - config.spawn_area.x[0]) / palette.len() as f32;

        for (color_index, (color, name)) in palette.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let lane_center =
                config.spawn_area.x[0] + lane_width * (color_index as f32 + 0.5);
            let x = lane_center + self.rng.random_range(-0.3..0.3) * lane_width;
            let y = self
                .rng
                .random_range(config.spawn_area.y[0]..config.spawn_area.y[1]);

            self.spawn_marble_at(world, color_index, color, name, x, y, config.marble_radius);
        }
    }

    /// Spawns a marble at a specific position.
    pub fn spawn_marble_at(
        &mut self,
        world: &mut PhysicsWorld,
        color_index: usize,
        color: Color,
        name: &'static str,
        x: f32,
        y: f32,
        radius: f32,
    ) -> MarbleId {
        let id = self.next_id;
        self.next_id += 1;

        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(x, y))
            .linear_damping(0.5)
            .angular_damping(0.5)
            .ccd_enabled(true)
            .build();
        let body_handle = world.add_rigid_body(rigid_body);

        let collider = ColliderBuilder::ball(radius)
            .restitution(0.7)
            .friction(0.3)
            .density(1.0)
            .build();
        let collider_handle = world.add_collider(collider, body_handle);

        self.marbles.push(Marble {
            id,
            color_index,
            color,
            name,
            body_handle,
            collider_handle,
            radius,
            finished: false,
        });

        id
    }

    /// Arms finish detection. Elapsed times are measured from the physics
    /// frame at this moment.
    pub fn start_race(&mut self, world: &PhysicsWorld) {
        self.racing = true;
        self.start_frame = world.current_frame();
        self.first_finish_frame = None;
        self.finished.clear();
        tracing::info!("race started with {} marbles", self.marbles.len());
    }

    /// Scans for marbles that crossed the finish line and records them.
    /// Returns whether the race is over.
    ///
    /// The race ends when every marble has finished, or when the grace
    /// window has elapsed since the first finisher; a wedged marble then
    /// simply has no finish record.
    pub fn update(&mut self, world: &PhysicsWorld, config: &RaceConfig) -> bool {
        if !self.racing {
            return false;
        }

        let frame = world.current_frame();
        for marble in &mut self.marbles {
            if marble.finished {
                continue;
            }
            let Some(body) = world.get_rigid_body(marble.body_handle) else {
                continue;
            };
            if body.translation().y >= config.finish_line_y {
                marble.finished = true;
                let elapsed_seconds =
                    PhysicsWorld::frames_to_seconds(frame - self.start_frame);
                self.finished.push(FinishRecord {
                    marble_id: marble.id,
                    color_index: marble.color_index,
                    elapsed_seconds,
                });
                self.first_finish_frame.get_or_insert(frame);
                tracing::info!(
                    "{} finished in {:.3}s (place {})",
                    marble.name,
                    elapsed_seconds,
                    self.finished.len()
                );
            }
        }

        let all_finished =
            !self.marbles.is_empty() && self.marbles.iter().all(|m| m.finished);
        let grace_expired = self.first_finish_frame.is_some_and(|first| {
            PhysicsWorld::frames_to_seconds(frame - first) >= config.finish_grace_seconds
        });

        if all_finished || grace_expired {
            self.racing = false;
            tracing::info!(
                "race finished: {}/{} marbles recorded",
                self.finished.len(),
                self.marbles.len()
            );
            return true;
        }
        false
    }

    /// Finish records in ascending finish-time order.
    pub fn finished_marbles(&self) -> &[FinishRecord] {
        &self.finished
    }

    /// The first finisher, if any marble has finished.
    pub fn winner(&self) -> Option<&Marble> {
        self.finished
            .first()
            .and_then(|record| self.marble(record.marble_id))
    }

    /// Gets a marble by ID.
    pub fn marble(&self, marble_id: MarbleId) -> Option<&Marble> {
        self.marbles.iter().find(|m| m.id == marble_id)
    }

    /// Returns all marbles.
    pub fn marbles(&self) -> &[Marble] {
        &self.marbles
    }

    /// Whether a race is currently in progress.
    pub fn is_racing(&self) -> bool {
        self.racing
    }

    /// Per-frame render views in marble creation order.
    pub fn views(&self, world: &PhysicsWorld) -> Vec<MarbleView> {
        self.marbles
            .iter()
            .filter_map(|marble| {
                let body = world.get_rigid_body(marble.body_handle)?;
                let pos = body.translation();
                Some(MarbleView {
                    position: [pos.x, pos.y],
                    color: marble.color,
                    color_index: marble.color_index,
                    name: marble.name,
                })
            })
            .collect()
    }

    /// Removes all marbles from the world and clears race state.
    pub fn reset(&mut self, world: &mut PhysicsWorld) {
        for marble in self.marbles.drain(..) {
            world.remove_rigid_body(marble.body_handle);
        }
        self.finished.clear();
        self.next_id = 0;
        self.racing = false;
        self.start_frame = 0;
        self.first_finish_frame = None;
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}
