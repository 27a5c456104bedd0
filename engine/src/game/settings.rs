use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::constants::{
    DEFAULT_GRID_SIZE, DEFAULT_INITIAL_SPEED_MS, DEFAULT_SPEED_INCREMENT_MS, MAX_GRID_SIZE,
    MAX_INITIAL_SPEED_MS, MIN_GRID_SIZE, MIN_SPEED_MS,
};

/// Engine parameters, fixed for the lifetime of an engine. Speeds are tick
/// periods in milliseconds, so a smaller speed means a faster game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub grid_size: u32,
    pub initial_speed: u32,
    pub speed_increment: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            initial_speed: DEFAULT_INITIAL_SPEED_MS,
            speed_increment: DEFAULT_SPEED_INCREMENT_MS,
        }
    }
}

impl EngineConfig {
    pub fn new(grid_size: u32, initial_speed: u32, speed_increment: u32) -> Self {
        Self {
            grid_size,
            initial_speed,
            speed_increment,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.grid_size as usize * self.grid_size as usize
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<(), String> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(format!("grid_size must be at least {}", MIN_GRID_SIZE));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(format!("grid_size must not exceed {}", MAX_GRID_SIZE));
        }
        if self.initial_speed < MIN_SPEED_MS {
            return Err(format!("initial_speed must be at least {}ms", MIN_SPEED_MS));
        }
        if self.initial_speed > MAX_INITIAL_SPEED_MS {
            return Err(format!(
                "initial_speed must not exceed {}ms",
                MAX_INITIAL_SPEED_MS
            ));
        }
        Ok(())
    }
}
