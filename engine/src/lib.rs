pub mod config;
pub mod constants;
pub mod game;
pub mod logger;

pub use game::{
    Direction, EndReason, EngineConfig, GameState, Position, SessionRng, Snake, SnakeEngine,
    TickOutcome, place_food,
};
