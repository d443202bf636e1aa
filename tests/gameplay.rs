use rand::rngs::StdRng;
use rand::SeedableRng;

use torus_snake::render::{Canvas, MemoryCanvas, Painter, Style};
use torus_snake::{Direction, Grid, Position, Round, Snake, TickOutcome};

fn grid(width: i32, height: i32) -> Grid {
    Grid::new(width, height).unwrap()
}

#[test]
fn eleven_ticks_south_on_ten_by_ten() {
    let g = grid(10, 10);
    let mut snake = Snake::new(Position::ORIGIN, Direction::South);
    snake.grow();
    let mut round = Round::with_snake(g, snake);
    round.set_pellet(Some(Position::new(7, 3)));
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..11 {
        assert_eq!(round.tick(Direction::South, &mut rng), TickOutcome::Advanced);
        assert_eq!(round.snake().size(), 1);
    }

    assert_eq!(round.snake().position(), Position::new(0, 1));
}

#[test]
fn long_random_game_keeps_invariants() {
    let g = grid(8, 6);
    let mut round = Round::new(g, Direction::East);
    let mut rng = StdRng::seed_from_u64(2024);
    let turns = [Direction::East, Direction::South, Direction::West, Direction::North];

    for tick in 0..400 {
        let before = round.snake().size();
        let heading = turns[(tick / 3) % turns.len()];

        let outcome = round.tick(heading, &mut rng);
        let snake = round.snake();

        assert!(g.contains(snake.position()));
        match outcome {
            TickOutcome::Ate => assert_eq!(snake.size(), before + 1),
            TickOutcome::Advanced if before > 0 => assert_eq!(snake.size(), before),
            TickOutcome::Advanced => assert_eq!(snake.size(), 1),
            TickOutcome::Collided | TickOutcome::Filled => break,
        }

        let pellet = round.pellet().expect("pellet respawns every live tick");
        assert!(g.contains(pellet));
        assert!(snake.cells(g).all(|c| c != pellet));
    }
}

#[test]
fn drawn_frame_matches_snake_cells() {
    let g = grid(12, 6);
    let mut round = Round::new(g, Direction::East);
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..4 {
        round.tick(Direction::East, &mut rng);
    }

    let mut canvas = MemoryCanvas::new(24, 6);
    let painter = Painter::new(2);
    painter.draw_round(&mut canvas, &round, false);
    canvas.present().unwrap();

    let snake_cells: Vec<Position> = round.snake().cells(g).collect();
    for y in 0..6u16 {
        for x in 0..12u16 {
            let pos = Position::new(i32::from(x), i32::from(y));
            let style = canvas.presented(x * 2, y).unwrap().style;
            if snake_cells.contains(&pos) {
                assert_eq!(style, Style::Snake, "cell {}", pos);
            } else if round.pellet() == Some(pos) {
                assert_eq!(style, Style::Pellet, "cell {}", pos);
            } else {
                assert_eq!(style, Style::Plain, "cell {}", pos);
            }
        }
    }
}
