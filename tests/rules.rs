use gridsnake::apple::Apple;
use gridsnake::snake::{Cause, Heading, Outcome, Snake};
use gridsnake::{ARENA_HEIGHT, ARENA_WIDTH, CELL_SIZE};

use rand::rngs::StdRng;
use rand::SeedableRng;

const CENTER: (i32, i32) = (ARENA_WIDTH / 2, ARENA_HEIGHT / 2);

#[test]
fn reversing_at_the_start_keeps_the_snake_going_right() {
    // Length 2, heading Right, centered on the 720x560 arena.
    let mut snake = Snake::new(CENTER, 2, Heading::Right);

    assert!(!snake.set_heading(Heading::Left));
    assert_eq!(snake.heading(), Heading::Right);

    let before = snake.head();
    assert_eq!(snake.step((0, 0)), Outcome::Continue);
    assert_eq!(snake.head(), (before.0 + CELL_SIZE, before.1));
}

#[test]
fn apple_on_the_projected_head_cell_triggers_growth_and_respawn() {
    let mut snake = Snake::new(CENTER, 2, Heading::Right);
    let mut apple = Apple::new(snake.next_head());
    let mut rng = StdRng::seed_from_u64(5);

    let len_before = snake.segments().len();
    assert_eq!(snake.step(apple.cell()), Outcome::Grow);
    assert_eq!(snake.segments().len(), len_before + 1);
    assert_eq!(snake.score(), 1);

    assert!(apple.relocate(&mut rng, snake.segments()));
    assert!(!snake.segments().contains(&apple.cell()));
}

#[test]
fn crossing_the_left_boundary_is_a_wall_death() {
    // Head at x = 0; one more step left puts it at x = -20.
    let mut snake = Snake::new((0, CENTER.1), 3, Heading::Left);

    let outcome = snake.step((0, 0));
    assert_eq!(outcome, Outcome::Dead(Cause::Wall));
    assert!(!snake.is_alive());
}

#[test]
fn walking_the_full_arena_width_dies_exactly_at_the_right_wall() {
    let mut snake = Snake::new((CELL_SIZE, CENTER.1), 2, Heading::Right);
    let steps_to_wall = (ARENA_WIDTH / CELL_SIZE - 2) as usize;

    for _ in 0..steps_to_wall {
        assert_eq!(snake.step((0, 0)), Outcome::Continue);
    }
    assert_eq!(snake.step((0, 0)), Outcome::Dead(Cause::Wall));
}

#[test]
fn looping_back_into_the_body_is_a_self_death() {
    let mut snake = Snake::new(CENTER, 6, Heading::Right);

    // A tight clockwise loop: up, left, down runs into the body.
    snake.set_heading(Heading::Up);
    assert_eq!(snake.step((0, 0)), Outcome::Continue);
    snake.set_heading(Heading::Left);
    assert_eq!(snake.step((0, 0)), Outcome::Continue);
    snake.set_heading(Heading::Down);
    assert_eq!(snake.step((0, 0)), Outcome::Dead(Cause::Body));
    assert!(!snake.is_alive());
}

#[test]
fn growth_keeps_every_earlier_segment() {
    let mut snake = Snake::new(CENTER, 2, Heading::Right);
    let mut rng = StdRng::seed_from_u64(21);
    let mut apple = Apple::new(snake.next_head());

    // Eat three apples in a row along the same rank.
    for eaten in 1..=3 {
        assert_eq!(snake.step(apple.cell()), Outcome::Grow);
        assert_eq!(snake.segments().len(), 2 + eaten);
        apple = Apple::new(snake.next_head());
    }
    assert_eq!(snake.score(), 3);

    // After a respawn the apple is never under the snake.
    assert!(apple.relocate(&mut rng, snake.segments()));
    assert!(!snake.segments().contains(&apple.cell()));
}

#[test]
fn a_dead_snake_reports_dead_on_the_tick_it_collides() {
    let mut snake = Snake::new((CELL_SIZE, CENTER.1), 2, Heading::Left);

    assert_eq!(snake.step((0, 0)), Outcome::Continue);
    assert!(snake.is_alive());
    assert!(matches!(snake.step((0, 0)), Outcome::Dead(Cause::Wall)));
    assert!(!snake.is_alive());
}
