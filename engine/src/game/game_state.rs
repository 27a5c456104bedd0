use crate::constants::{FOOD_REWARD, MIN_SPEED_MS};
use super::food::place_food;
use super::session_rng::SessionRng;
use super::settings::EngineConfig;
use super::snake::Snake;
use super::snapshot::GameState;
use super::types::{Direction, EndReason, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or already over; nothing changed.
    Idle,
    Moved,
    AteFood { speed: u32 },
    GameOver(EndReason),
}

/// The mutable game aggregate and its movement rules. Holds no timer; the
/// engine decides when `tick` runs.
#[derive(Clone, Debug)]
pub struct SnakeGameState {
    config: EngineConfig,
    snake: Snake,
    food: Position,
    direction: Direction,
    score: u32,
    high_score: u32,
    is_game_over: bool,
    is_paused: bool,
    speed: u32,
    end_reason: Option<EndReason>,
}

impl SnakeGameState {
    /// Fresh game: one segment in the centre heading right. `config` must be
    /// validated, which guarantees a free cell for the first food.
    pub fn new(config: &EngineConfig, high_score: u32, rng: &mut SessionRng) -> Self {
        let center = (config.grid_size / 2) as i32;
        let head = Position::new(center, center);
        let snake = Snake::new(head);
        let food = place_food(&snake, config, rng)
            .expect("a validated grid always has a free cell next to a one-segment snake");

        Self {
            config: *config,
            snake,
            food,
            direction: Direction::Right,
            score: 0,
            high_score,
            is_game_over: false,
            is_paused: false,
            speed: config.initial_speed,
            end_reason: None,
        }
    }

    pub fn tick(&mut self, rng: &mut SessionRng) -> TickOutcome {
        if self.is_game_over || self.is_paused {
            return TickOutcome::Idle;
        }

        let new_head = self.snake.head().step(self.direction);

        if let Some(reason) = self.collision_at(new_head) {
            self.finish(reason);
            return TickOutcome::GameOver(reason);
        }

        let ate_food = new_head == self.food;
        self.snake.advance(new_head, ate_food);

        if !ate_food {
            return TickOutcome::Moved;
        }

        self.score += FOOD_REWARD;
        self.speed = self
            .speed
            .saturating_sub(self.config.speed_increment)
            .max(MIN_SPEED_MS);

        match place_food(&self.snake, &self.config, rng) {
            Some(food) => {
                self.food = food;
                TickOutcome::AteFood { speed: self.speed }
            }
            None => {
                self.finish(EndReason::BoardFull);
                TickOutcome::GameOver(EndReason::BoardFull)
            }
        }
    }

    fn collision_at(&self, pos: Position) -> Option<EndReason> {
        if !pos.is_within(self.config.grid_size) {
            return Some(EndReason::WallCollision);
        }
        if self.snake.blocks(pos) {
            return Some(EndReason::SelfCollision);
        }
        None
    }

    fn finish(&mut self, reason: EndReason) {
        self.is_game_over = true;
        self.end_reason = Some(reason);
        self.high_score = self.high_score.max(self.score);
    }

    /// Stores `direction` unless it reverses the current heading. Returns
    /// whether it was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(&self.direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snapshot(&self) -> GameState {
        GameState {
            snake: self.snake.segments().collect(),
            food: self.food,
            direction: self.direction,
            score: self.score,
            high_score: self.high_score,
            is_game_over: self.is_game_over,
            is_paused: self.is_paused,
            speed: self.speed,
            end_reason: self.end_reason,
        }
    }

    #[cfg(test)]
    pub(crate) fn force_food(&mut self, food: Position) {
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn force_snake(&mut self, segments: &[Position], direction: Direction) {
        self.snake = Snake::from_segments(segments.iter().copied()).expect("non-empty body");
        self.direction = direction;
    }

    #[cfg(test)]
    pub(crate) fn force_score(&mut self, score: u32) {
        self.score = score;
    }
}
