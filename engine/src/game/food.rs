use crate::constants::MAX_FOOD_SAMPLES;
use super::session_rng::SessionRng;
use super::settings::EngineConfig;
use super::snake::Snake;
use super::types::Position;

/// Picks a uniformly random cell not covered by `snake`, or `None` when the
/// snake fills the board.
///
/// Rejection sampling is tried first; after `MAX_FOOD_SAMPLES` misses the free
/// cells are enumerated and one is chosen directly, which keeps the choice
/// uniform and bounds the work on crowded boards.
pub fn place_food(snake: &Snake, config: &EngineConfig, rng: &mut SessionRng) -> Option<Position> {
    if snake.len() >= config.cell_count() {
        return None;
    }

    let grid_size = config.grid_size;
    for _ in 0..MAX_FOOD_SAMPLES {
        let candidate = rng.random_cell(grid_size);
        if !snake.contains(candidate) {
            return Some(candidate);
        }
    }

    let size = grid_size as i32;
    let free_cells: Vec<Position> = (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .filter(|pos| !snake.contains(*pos))
        .collect();

    rng.choose(&free_cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_covering(grid_size: i32, skip: &[Position]) -> Snake {
        let cells = (0..grid_size)
            .flat_map(|y| (0..grid_size).map(move |x| Position::new(x, y)))
            .filter(|pos| !skip.contains(pos));
        Snake::from_segments(cells).expect("non-empty body")
    }

    fn grid(grid_size: u32) -> EngineConfig {
        EngineConfig::new(grid_size, 150, 5)
    }

    #[test]
    fn test_food_avoids_snake_and_stays_on_board() {
        let mut rng = SessionRng::new(42);
        let snake = Snake::new(Position::new(10, 10));
        for _ in 0..1000 {
            let food = place_food(&snake, &grid(20), &mut rng).expect("free cell");
            assert!(food.is_within(20));
            assert_ne!(food, Position::new(10, 10));
        }
    }

    #[test]
    fn test_single_free_cell_is_found() {
        let mut rng = SessionRng::new(3);
        let hole = Position::new(7, 2);
        let snake = snake_covering(8, &[hole]);
        assert_eq!(place_food(&snake, &grid(8), &mut rng), Some(hole));
    }

    #[test]
    fn test_full_board_has_no_food() {
        let mut rng = SessionRng::new(3);
        let snake = snake_covering(4, &[]);
        assert_eq!(place_food(&snake, &grid(4), &mut rng), None);
    }
}
