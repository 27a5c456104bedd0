use serde::{Deserialize, Serialize};
use snake_engine::{Direction, GameState, Position, SessionRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutopilotKind {
    /// Safe move closest to the food, random safe move otherwise.
    Greedy,
    /// Any safe move.
    Random,
}

/// Stand-in for a player: picks one direction per snake step.
pub struct Autopilot {
    kind: AutopilotKind,
    rng: SessionRng,
    last_head: Option<Position>,
}

impl Autopilot {
    pub fn new(kind: AutopilotKind, rng: SessionRng) -> Self {
        Self {
            kind,
            rng,
            last_head: None,
        }
    }

    /// Call when a new game starts so its first position is considered.
    pub fn forget(&mut self) {
        self.last_head = None;
    }

    /// Direction to send, or `None` when the current heading should be kept.
    /// Only the first snapshot of each step is considered, so the
    /// notification fired by our own direction change is not acted upon.
    pub fn next_direction(&mut self, state: &GameState, grid_size: u32) -> Option<Direction> {
        if !state.is_running() {
            return None;
        }

        let head = state.head()?;
        if self.last_head == Some(head) {
            return None;
        }
        self.last_head = Some(head);

        let chosen = match self.kind {
            AutopilotKind::Greedy => {
                Self::closest_to_food(state, grid_size).or_else(|| self.random_safe(state, grid_size))
            }
            AutopilotKind::Random => self.random_safe(state, grid_size),
        };

        chosen.filter(|direction| *direction != state.direction)
    }

    fn closest_to_food(state: &GameState, grid_size: u32) -> Option<Direction> {
        let head = state.head()?;
        Self::safe_directions(state, grid_size)
            .into_iter()
            .min_by_key(|direction| head.step(*direction).manhattan_distance(state.food))
    }

    fn random_safe(&mut self, state: &GameState, grid_size: u32) -> Option<Direction> {
        let safe = Self::safe_directions(state, grid_size);
        self.rng.choose(&safe)
    }

    fn safe_directions(state: &GameState, grid_size: u32) -> Vec<Direction> {
        let Some(head) = state.head() else {
            return Vec::new();
        };
        // The tail moves away on the same step, so it is not an obstacle.
        let body = &state.snake[..state.snake.len() - 1];

        Direction::ALL
            .into_iter()
            .filter(|direction| !direction.is_opposite(&state.direction))
            .filter(|direction| {
                let next = head.step(*direction);
                next.is_within(grid_size) && !body.contains(&next)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(snake: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GameState {
        GameState {
            snake: snake.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            food: Position::new(food.0, food.1),
            direction,
            score: 0,
            high_score: 0,
            is_game_over: false,
            is_paused: false,
            speed: 150,
            end_reason: None,
        }
    }

    fn greedy() -> Autopilot {
        Autopilot::new(AutopilotKind::Greedy, SessionRng::new(42))
    }

    #[test]
    fn test_greedy_turns_toward_food() {
        let state = state_with(&[(5, 5)], Direction::Right, (5, 1));
        assert_eq!(greedy().next_direction(&state, 10), Some(Direction::Up));
    }

    #[test]
    fn test_greedy_keeps_heading_when_already_closest() {
        let state = state_with(&[(5, 5)], Direction::Right, (9, 5));
        assert_eq!(greedy().next_direction(&state, 10), None);
    }

    #[test]
    fn test_never_reverses_or_leaves_board() {
        // Food directly behind, wall above.
        let state = state_with(&[(5, 0), (4, 0)], Direction::Right, (0, 0));
        let chosen = greedy().next_direction(&state, 10);
        assert_eq!(chosen, Some(Direction::Down));
    }

    #[test]
    fn test_avoids_own_body() {
        let state = state_with(
            &[(5, 5), (5, 6), (4, 6), (3, 6), (3, 5)],
            Direction::Up,
            (5, 9),
        );
        let mut autopilot = Autopilot::new(AutopilotKind::Random, SessionRng::new(3));
        for _ in 0..20 {
            autopilot.forget();
            if let Some(direction) = autopilot.next_direction(&state, 10) {
                assert_ne!(direction, Direction::Down);
                let next = Position::new(5, 5).step(direction);
                assert!(!state.snake[..4].contains(&next));
            }
        }
    }

    #[test]
    fn test_decides_once_per_step() {
        let state = state_with(&[(5, 5)], Direction::Right, (5, 1));
        let mut autopilot = greedy();
        assert_eq!(autopilot.next_direction(&state, 10), Some(Direction::Up));

        let mut turned = state.clone();
        turned.direction = Direction::Up;
        assert_eq!(autopilot.next_direction(&turned, 10), None);

        autopilot.forget();
        assert_eq!(autopilot.next_direction(&state, 10), Some(Direction::Up));
    }

    #[test]
    fn test_ignores_finished_or_paused_games() {
        let mut state = state_with(&[(5, 5)], Direction::Right, (5, 1));
        state.is_paused = true;
        assert_eq!(greedy().next_direction(&state, 10), None);
        state.is_paused = false;
        state.is_game_over = true;
        assert_eq!(greedy().next_direction(&state, 10), None);
    }
}
