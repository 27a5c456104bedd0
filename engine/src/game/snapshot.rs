use serde::{Deserialize, Serialize};

use super::types::{Direction, EndReason, Position};

/// Immutable copy of the engine state handed to observers and callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Head first.
    pub snake: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub is_game_over: bool,
    pub is_paused: bool,
    /// Current tick period in milliseconds.
    pub speed: u32,
    pub end_reason: Option<EndReason>,
}

impl GameState {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    pub fn is_running(&self) -> bool {
        !self.is_game_over && !self.is_paused
    }
}
