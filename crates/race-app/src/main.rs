//! Headless marble-race host.
//!
//! Wires a terminal UI adapter and a deterministic tick loop to the game
//! core and runs one complete race:
//!
//! ```text
//! race-app [color-index] [seed]
//! ```

use anyhow::{Context, bail};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use race_core::{
    CelebrationEffects, Color, RaceConfig, RaceGame, ResultBanner, Screen, TickOutcome, UiAdapter,
};

/// UI adapter that narrates the game to stdout.
#[derive(Default)]
struct TerminalUi {
    standings: Vec<String>,
}

impl UiAdapter for TerminalUi {
    fn show_screen(&mut self, screen: Screen) {
        println!("--- {screen:?} ---");
    }

    fn set_selected_color(&mut self, selection: Option<(&str, Color)>) {
        if let Some((name, color)) = selection {
            println!("You chose: {name} ({})", color.to_hex());
        }
    }

    fn set_standings(&mut self, lines: &[String]) {
        // Only narrate newly finished marbles, not every republish.
        for line in &lines[self.standings.len().min(lines.len())..] {
            println!("{line}");
        }
        self.standings = lines.to_vec();
    }

    fn set_result_message(&mut self, banner: Option<&ResultBanner>) {
        if let Some(banner) = banner {
            println!("\n{}\n", banner.text);
        }
    }
}

/// Celebration layer that just logs; a graphical host would spawn
/// particles here.
#[derive(Default)]
struct LogEffects {
    running: bool,
}

impl CelebrationEffects for LogEffects {
    fn start(&mut self) {
        if !self.running {
            self.running = true;
            tracing::info!("fireworks started");
        }
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            tracing::info!("fireworks stopped");
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let color_index: usize = args
        .next()
        .map_or(Ok(0), |arg| arg.parse())
        .context("color index must be a number")?;
    let seed: u64 = args
        .next()
        .map_or(Ok(2024), |arg| arg.parse())
        .context("seed must be a number")?;

    let palette = Color::palette();
    if color_index >= palette.len() {
        bail!(
            "color index {color_index} out of range (palette has {} colors)",
            palette.len()
        );
    }

    let mut game = RaceGame::new(
        RaceConfig::default(),
        seed,
        Box::new(TerminalUi::default()),
        Box::new(LogEffects::default()),
    );

    game.select_color(color_index);

    // Deterministic stepper standing in for a display-refresh driver: each
    // tick runs to completion before the next is scheduled.
    let max_frames = 60 * 120;
    for frame in 0..max_frames {
        match game.tick() {
            TickOutcome::Frame(commands) => {
                if frame % 300 == 0 {
                    tracing::debug!("frame {frame}: {} draw commands", commands.len());
                }
            }
            TickOutcome::Finished(outcome) => {
                tracing::info!(
                    "finished after {frame} frames: winner color {}, player place {:?}",
                    outcome.winner_color_index,
                    outcome.player_place
                );
                return Ok(());
            }
            TickOutcome::Idle => break,
        }
    }

    bail!("race did not finish within {max_frames} frames")
}
