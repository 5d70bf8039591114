//! Player commands sent from the frontend to the simulation.
//!
//! Commands are validated and queued for processing at the next frame boundary.

use serde::{Deserialize, Serialize};

use crate::enums::{Direction, PlayerSlot};

/// One control on a player's tank. Edge events for these (pressed or
/// released) are the only way tanks are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankControl {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameCommand {
    // --- Tank control ---
    /// A control went down. Held until the matching Release.
    Press {
        slot: PlayerSlot,
        control: TankControl,
    },
    /// A control came back up.
    Release {
        slot: PlayerSlot,
        control: TankControl,
    },

    // --- Round control ---
    /// Toggle between Active and Paused.
    TogglePause,
    /// Abandon the session and return to the menu.
    QuitToMenu,

    // --- Level select ---
    /// Jump to the next level (menu shortcut, ignored after defeat).
    NextLevel,
    /// Jump to the previous level (menu shortcut, ignored after defeat).
    PreviousLevel,

    // --- Debug ---
    /// Toggle the overlay that shows each enemy's steering target.
    ToggleTargetOverlay,
}

impl TankControl {
    /// The facing this control steers toward, if it is a movement control.
    pub fn direction(self) -> Option<Direction> {
        match self {
            TankControl::Up => Some(Direction::Up),
            TankControl::Down => Some(Direction::Down),
            TankControl::Left => Some(Direction::Left),
            TankControl::Right => Some(Direction::Right),
            TankControl::Fire => None,
        }
    }
}
