//! Marble-Race Core Library
//!
//! Game orchestration and physics simulation for a 2D marble race using
//! `Rapier2D` with deterministic behavior.
//!
//! The crate is organized around one orchestrator (`game::RaceGame`) and its
//! collaborators: the physics world, the level generator, the race
//! bookkeeping, the scene compositor, and the injected UI/effects adapters.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod config;
pub mod effects;
pub mod game;
pub mod level;
pub mod physics;
pub mod race;
pub mod results;
pub mod scene;
pub mod ui;

pub use color::{Color, ColorParseError};
pub use config::{ConfigError, RaceConfig, SpawnArea};
pub use effects::{CelebrationEffects, NullEffects};
pub use game::{GamePhase, RaceGame, RaceOutcome, TickOutcome};
pub use level::{LevelGenerator, Platform};
pub use physics::{PHYSICS_DT, PhysicsWorld, default_gravity};
pub use race::{FinishRecord, Marble, MarbleId, MarbleView, RaceManager};
pub use results::{format_race_time, place_text, standings_lines};
pub use scene::{
    DrawCommand, Fill, LinearGradient, RadialGradient, SceneFrame, SceneRenderer, SceneStyle,
    StrokeStyle,
};
pub use ui::{ResultBanner, ResultTone, Screen, UiAdapter};
