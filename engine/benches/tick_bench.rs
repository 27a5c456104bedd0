use criterion::{Criterion, criterion_group, criterion_main};
use snake_engine::{
    Direction, EngineConfig, Position, SessionRng, Snake, SnakeEngine, TickOutcome, place_food,
};
use std::hint::black_box;

fn steer(engine: &SnakeEngine) {
    let state = engine.state();
    let Some(head) = state.head() else {
        return;
    };
    let grid = engine.config().grid_size as i32;
    let direction = match state.direction {
        Direction::Right if head.x + 1 >= grid => Direction::Down,
        Direction::Down => {
            if head.x + 1 >= grid {
                Direction::Left
            } else {
                Direction::Right
            }
        }
        Direction::Left if head.x == 0 => Direction::Down,
        other => other,
    };
    engine.set_direction(direction);
}

fn bench_ticks_until_game_over(c: &mut Criterion) {
    c.bench_function("tick_64x64_serpentine", |b| {
        let engine = SnakeEngine::with_seed(EngineConfig::new(64, 150, 5), 7).unwrap();
        b.iter(|| {
            steer(&engine);
            if let TickOutcome::GameOver(_) = black_box(engine.tick()) {
                engine.reset();
            }
        });
    });
}

fn bench_food_on_crowded_board(c: &mut Criterion) {
    let config = EngineConfig::new(48, 150, 5);
    let grid_size = config.grid_size as i32;
    let free = [Position::new(5, 7), Position::new(40, 40), Position::new(47, 0)];
    let cells = (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Position::new(x, y)))
        .filter(|pos| !free.contains(pos));
    let snake = Snake::from_segments(cells).unwrap();
    let mut rng = SessionRng::new(11);

    c.bench_function("place_food_three_free_cells", |b| {
        b.iter(|| black_box(place_food(&snake, &config, &mut rng)));
    });
}

criterion_group!(benches, bench_ticks_until_game_over, bench_food_on_crowded_board);
criterion_main!(benches);
