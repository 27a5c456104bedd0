mod engine;
mod food;
mod game_state;
mod session_rng;
mod settings;
mod snake;
mod snapshot;
mod timer;
mod types;

pub use engine::{SnakeEngine, StateCallback};
pub use food::place_food;
pub use game_state::{SnakeGameState, TickOutcome};
pub use session_rng::SessionRng;
pub use settings::EngineConfig;
pub use snake::Snake;
pub use snapshot::GameState;
pub use types::{Direction, EndReason, Position};
