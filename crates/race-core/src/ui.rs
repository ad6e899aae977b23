//! UI adapter contract.
//!
//! The orchestrator never touches a display surface directly; a host
//! implements [`UiAdapter`] over whatever it has (DOM, terminal, test
//! recorder). Input flows the other way: the host wires its "color chosen"
//! and "play again" events to [`crate::game::RaceGame::select_color`] and
//! [`crate::game::RaceGame::reset`].

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// The three screens of the game, one visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    ColorSelection,
    Game,
    Result,
}

/// Whether the result banner celebrates or consoles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultTone {
    Win,
    Lose,
}

/// End-of-race message for the result screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultBanner {
    pub text: String,
    pub tone: ResultTone,
}

/// Host-implemented view of the game.
pub trait UiAdapter {
    /// Makes `screen` the visible one.
    fn show_screen(&mut self, screen: Screen);

    /// Updates the "You chose: …" HUD slot; `None` clears it.
    fn set_selected_color(&mut self, selection: Option<(&str, Color)>);

    /// Replaces the live standings display. An empty slice clears it.
    fn set_standings(&mut self, lines: &[String]);

    /// Sets or clears the result banner.
    fn set_result_message(&mut self, banner: Option<&ResultBanner>);
}
