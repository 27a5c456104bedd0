/// Score awarded for every food eaten.
pub const FOOD_REWARD: u32 = 10;

/// Fastest tick period, in milliseconds, the game can accelerate to.
pub const MIN_SPEED_MS: u32 = 50;

pub const DEFAULT_GRID_SIZE: u32 = 20;
pub const DEFAULT_INITIAL_SPEED_MS: u32 = 150;
pub const DEFAULT_SPEED_INCREMENT_MS: u32 = 5;

pub const MIN_GRID_SIZE: u32 = 2;
pub const MAX_GRID_SIZE: u32 = 1024;
pub const MAX_INITIAL_SPEED_MS: u32 = 10_000;

/// Random food samples tried before falling back to scanning the free cells.
pub const MAX_FOOD_SAMPLES: usize = 100;
