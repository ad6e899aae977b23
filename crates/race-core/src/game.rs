//! Game state machine and frame-loop orchestration.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::RaceConfig;
use crate::effects::CelebrationEffects;
use crate::level::{LevelGenerator, Platform};
use crate::physics::PhysicsWorld;
use crate::race::{FinishRecord, RaceManager};
use crate::results::{place_text, standings_lines};
use crate::scene::{DrawCommand, SceneFrame, SceneRenderer};
use crate::ui::{ResultBanner, ResultTone, Screen, UiAdapter};

/// Game phase representing the current state of the game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Waiting for the player to commit to a color.
    #[default]
    ColorSelection,
    /// Race in progress; the host drives [`RaceGame::tick`].
    Racing,
    /// Race over; waiting for "play again".
    Result,
}

/// Win/loss result computed once a race ends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RaceOutcome {
    /// Palette index of the winning marble's color.
    pub winner_color_index: usize,
    /// Whether the winner carries the player's color.
    pub is_win: bool,
    /// Player's 1-based placement; `None` means no recorded finish and reads
    /// as "Last Place".
    pub player_place: Option<usize>,
}

impl RaceOutcome {
    /// Derives the outcome from the finish list.
    ///
    /// The player's placement is the 1-based index of the record carrying
    /// the selected color, searched in standings order.
    pub fn derive(
        winner_color_index: usize,
        selected_color: usize,
        records: &[FinishRecord],
    ) -> Self {
        let player_place = records
            .iter()
            .position(|record| record.color_index == selected_color)
            .map(|index| index + 1);
        Self {
            winner_color_index,
            is_win: winner_color_index == selected_color,
            player_place,
        }
    }
}

/// What the host should do after one call to [`RaceGame::tick`].
#[derive(Debug)]
pub enum TickOutcome {
    /// Nothing happened; the game is not racing. Do not reschedule.
    Idle,
    /// A frame was simulated: present these commands, then schedule the
    /// next tick.
    Frame(Vec<DrawCommand>),
    /// The race just ended. Do not reschedule.
    Finished(RaceOutcome),
}

/// Orchestrates the color-selection → racing → result cycle.
///
/// Owns the state machine and every collaborator; the host supplies the
/// scheduling (display refresh in production, a plain loop in tests) and
/// the UI/effects adapters. All methods run on one logical control flow.
pub struct RaceGame {
    config: RaceConfig,
    physics: PhysicsWorld,
    platforms: Vec<Platform>,
    race: RaceManager,
    renderer: SceneRenderer,
    ui: Box<dyn UiAdapter>,
    effects: Box<dyn CelebrationEffects>,
    phase: GamePhase,
    selected_color: Option<usize>,
    next_course_seed: u64,
}

impl RaceGame {
    /// Creates a game in the color-selection phase.
    pub fn new(
        config: RaceConfig,
        seed: u64,
        ui: Box<dyn UiAdapter>,
        effects: Box<dyn CelebrationEffects>,
    ) -> Self {
        let mut game = Self {
            config,
            physics: PhysicsWorld::new(),
            platforms: Vec::new(),
            race: RaceManager::new(seed),
            renderer: SceneRenderer::new(),
            ui,
            effects,
            phase: GamePhase::ColorSelection,
            selected_color: None,
            next_course_seed: seed,
        };
        game.ui.show_screen(Screen::ColorSelection);
        game
    }

    /// Commits the player to a palette color and starts a race.
    ///
    /// Only valid in the color-selection phase; an unknown palette index is
    /// ignored and the game stays where it is.
    pub fn select_color(&mut self, color_index: usize) {
        if self.phase != GamePhase::ColorSelection {
            tracing::warn!("select_color ignored in phase {:?}", self.phase);
            return;
        }
        let palette = Color::palette();
        let Some((color, name)) = palette.get(color_index).copied() else {
            tracing::warn!("select_color ignored: no palette entry {color_index}");
            return;
        };

        self.selected_color = Some(color_index);

        // Release the previous course before generating the next one.
        let old_course = std::mem::take(&mut self.platforms);
        LevelGenerator::release(&mut self.physics, old_course);
        let seed = self.next_course_seed;
        self.next_course_seed = self.next_course_seed.wrapping_add(1);
        self.platforms = LevelGenerator::generate(&mut self.physics, &self.config, seed);

        self.race.create_marbles(&mut self.physics, &self.config);
        self.race.start_race(&self.physics);

        self.ui.show_screen(Screen::Game);
        self.ui.set_selected_color(Some((name, color)));
        self.ui.set_result_message(None);

        self.phase = GamePhase::Racing;
        tracing::info!("race started: player chose {name}");
    }

    /// Advances the game by one frame.
    ///
    /// Steps physics, updates race bookkeeping, republishes the standings
    /// text, and either composes the frame or — when the race just ended —
    /// computes the outcome and stops. Outside the racing phase this is a
    /// no-op, which is what makes cancellation cooperative: a reset between
    /// ticks simply leaves nothing to do.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != GamePhase::Racing {
            return TickOutcome::Idle;
        }

        self.physics.step();
        let race_finished = self.race.update(&self.physics, &self.config);

        self.ui
            .set_standings(&standings_lines(self.race.finished_marbles()));

        if race_finished {
            let outcome = self.finish_race();
            return TickOutcome::Finished(outcome);
        }

        let marbles = self.race.views(&self.physics);
        let commands = self.renderer.compose(&SceneFrame {
            platforms: &self.platforms,
            marbles: &marbles,
            config: &self.config,
        });
        TickOutcome::Frame(commands)
    }

    fn finish_race(&mut self) -> RaceOutcome {
        let winner = self
            .race
            .winner()
            .expect("race finished without a winner");
        let selected = self
            .selected_color
            .expect("racing without a selected color");
        let outcome =
            RaceOutcome::derive(winner.color_index, selected, self.race.finished_marbles());

        self.phase = GamePhase::Result;
        self.ui.show_screen(Screen::Result);

        let banner = if outcome.is_win {
            self.effects.start();
            ResultBanner {
                text: "You Win!".to_string(),
                tone: ResultTone::Win,
            }
        } else {
            // Make sure no stray celebration runs into a loss screen.
            self.effects.stop();
            ResultBanner {
                text: format!("Try Again\n\nYou Got {}", place_text(outcome.player_place)),
                tone: ResultTone::Lose,
            }
        };
        self.ui.set_result_message(Some(&banner));

        tracing::info!(
            "race over: winner color {} ({}), player place {:?}",
            outcome.winner_color_index,
            if outcome.is_win { "win" } else { "loss" },
            outcome.player_place
        );
        outcome
    }

    /// Returns the game to color selection. Valid from any phase.
    pub fn reset(&mut self) {
        self.effects.stop();
        self.race.reset(&mut self.physics);
        self.selected_color = None;
        self.phase = GamePhase::ColorSelection;

        self.ui.set_standings(&[]);
        self.ui.set_result_message(None);
        self.ui.set_selected_color(None);
        self.ui.show_screen(Screen::ColorSelection);
        tracing::info!("game reset to color selection");
    }

    /// Applies a new drawing-surface size. Geometry only: existing bodies
    /// keep their positions; subsequent frames compose with the new bounds.
    pub fn resize_surface(&mut self, width: f32, height: f32) {
        self.config.resize_surface(width, height);
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The committed palette index, if a race is underway or just ended.
    pub fn selected_color(&self) -> Option<usize> {
        self.selected_color
    }

    /// Current course platforms.
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Race bookkeeping, for hosts that render standings themselves.
    pub fn race(&self) -> &RaceManager {
        &self.race
    }

    /// The physics world backing the current race.
    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Active configuration.
    pub fn config(&self) -> &RaceConfig {
        &self.config
    }
}
