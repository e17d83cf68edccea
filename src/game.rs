use std::thread::sleep;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use gridsnake::apple::Apple;
use gridsnake::scores::HighScore;
use gridsnake::snake::{Heading, Outcome, Snake};
use gridsnake::{ARENA_HEIGHT, ARENA_WIDTH};

use crate::term::Screen;

const INITIAL_SNAKE_LENGTH: usize = 2;
const HIGH_SCORE_FILE: &str = "highscore.txt";

const BODY_CHAR: char = '█';
const APPLE_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

// Tick rate ramps with snake length, bounded so the game stays playable.
const MIN_FPS: u64 = 5;
const MAX_FPS: u64 = 25;

pub struct GameConfig {
    pub persist_scores: bool,
    pub allow_retry: bool,
}

impl GameConfig {
    pub fn full() -> Self {
        GameConfig { persist_scores: true, allow_retry: true }
    }

    /// The stripped-down variant: no high-score file, no retry prompt.
    pub fn minimal() -> Self {
        GameConfig { persist_scores: false, allow_retry: false }
    }

    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        if args.any(|arg| arg == "--minimal") {
            GameConfig::minimal()
        } else {
            GameConfig::full()
        }
    }
}

enum RoundEnd {
    Retry,
    Quit,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum TickInput {
    Quit,
    Turn(Heading),
    Idle,
}

/// Folds one tick's drained key events into a single decision: a quit wins
/// wherever it sits in the queue; otherwise the first direction change that
/// is not a reversal of `current` wins and later direction events that tick
/// are dropped.
fn resolve_tick_input(events: &[KeyEvent], current: Heading) -> TickInput {
    let mut turn = None;

    for ev in events {
        if is_quit(ev) {
            return TickInput::Quit;
        }
        if turn.is_none() {
            if let Some(heading) = heading_for(ev) {
                if heading != current.opposite() {
                    turn = Some(heading);
                }
            }
        }
    }

    match turn {
        Some(heading) => TickInput::Turn(heading),
        None => TickInput::Idle,
    }
}

pub struct SnakeGame {
    config: GameConfig,
    term: Screen,
    scores: HighScore,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut term = Screen::new()?;
        term.setup()?;

        // Loaded once; carried across retries within this process.
        let scores = HighScore::load(HIGH_SCORE_FILE);

        Ok(SnakeGame { config, term, scores })
    }

    /// Runs rounds until the player quits. Exiting this function is the only
    /// way out; the caller restores the terminal and returns from main.
    pub fn run(&mut self) -> Result<()> {
        loop {
            if let RoundEnd::Quit = self.play_round()? {
                return Ok(());
            }
        }
    }

    pub fn shutdown(&mut self) {
        let _ = self.term.restore();
    }

    fn play_round(&mut self) -> Result<RoundEnd> {
        let center = (ARENA_WIDTH / 2, ARENA_HEIGHT / 2);
        let mut snake = Snake::new(center, INITIAL_SNAKE_LENGTH, Heading::Right);
        let mut rng = rand::thread_rng();
        let mut apple = Apple::spawn(&mut rng, snake.segments())
            .context("no free cell to place the first apple")?;

        self.render(&snake, &apple)?;

        loop {
            match resolve_tick_input(&self.term.read_key_events()?, snake.heading()) {
                TickInput::Quit => {
                    self.persist_score(snake.score());
                    return Ok(RoundEnd::Quit);
                }
                TickInput::Turn(heading) => {
                    snake.set_heading(heading);
                }
                TickInput::Idle => {}
            }

            match snake.step(apple.cell()) {
                Outcome::Dead(_) => {
                    self.persist_score(snake.score());
                    return self.end_of_round(&snake, &apple, false);
                }
                Outcome::Grow => {
                    if !apple.relocate(&mut rng, snake.segments()) {
                        // Nowhere left to put an apple: the board is full.
                        self.persist_score(snake.score());
                        return self.end_of_round(&snake, &apple, true);
                    }
                }
                Outcome::Continue => {}
            }

            self.render(&snake, &apple)?;
            sleep(tick_interval(snake.segments().len()));
        }
    }

    fn render(&mut self, snake: &Snake, apple: &Apple) -> Result<()> {
        self.term.begin_frame();
        self.term.plot(apple.cell(), APPLE_CHAR);

        for (i, &cell) in snake.segments().iter().enumerate() {
            let ch = if i == 0 { snake.head_char() } else { BODY_CHAR };
            self.term.plot(cell, ch);
        }

        self.term.hud(snake.score(), self.scores.best());
        self.term.present()
    }

    /// The dead state: end-of-round message stays on screen until the player
    /// picks retry or quit. In the minimal configuration any ending quits.
    fn end_of_round(&mut self, snake: &Snake, apple: &Apple, won: bool) -> Result<RoundEnd> {
        if !self.config.allow_retry {
            return Ok(RoundEnd::Quit);
        }

        self.render(snake, apple)?;
        if !won {
            for &cell in snake.segments() {
                self.term.plot(cell, DEAD_SNAKE_CHAR);
            }
        }

        let title = if won { "You won!" } else { "You died!" };
        let score_line = format!("Score: {}", snake.score());
        self.term.show_message(&[
            title,
            &score_line,
            "",
            "Press 'r' to play again,",
            "or 'q' to quit.",
        ])?;

        loop {
            let ev = self.term.read_key_blocking()?;
            if is_quit(&ev) {
                return Ok(RoundEnd::Quit);
            }
            if matches!(ev.code, KeyCode::Char('r') | KeyCode::Char('a')) {
                return Ok(RoundEnd::Retry);
            }
        }
    }

    fn persist_score(&mut self, score: u32) {
        if !self.config.persist_scores {
            return;
        }
        // Best effort: a failed write must not take down the shutdown path.
        let _ = self.scores.record(score);
    }
}

/// Interval between ticks, shrinking as the snake grows (fps = length / 2,
/// clamped) so the game speeds up with score but never becomes unplayable.
fn tick_interval(length: usize) -> Duration {
    let fps = (length as u64 / 2).max(MIN_FPS).min(MAX_FPS);
    Duration::from_millis(1000 / fps)
}

fn heading_for(ev: &KeyEvent) -> Option<Heading> {
    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Heading::Up),
        KeyCode::Char('a') | KeyCode::Left => Some(Heading::Left),
        KeyCode::Char('s') | KeyCode::Down => Some(Heading::Down),
        KeyCode::Char('d') | KeyCode::Right => Some(Heading::Right),
        _ => None,
    }
}

fn is_quit(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
        || matches!(ev.code, KeyCode::Char('q') | KeyCode::Esc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_interval_shrinks_with_length() {
        assert_eq!(tick_interval(2), Duration::from_millis(200));
        assert!(tick_interval(20) < tick_interval(2));
        assert!(tick_interval(40) < tick_interval(20));
    }

    #[test]
    fn tick_interval_is_floored() {
        // Past the cap, longer snakes no longer speed the game up.
        assert_eq!(tick_interval(50), tick_interval(500));
        assert_eq!(tick_interval(500), Duration::from_millis(40));
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn first_valid_turn_wins_within_a_tick() {
        let events = [key(KeyCode::Up), key(KeyCode::Down)];
        assert_eq!(resolve_tick_input(&events, Heading::Right), TickInput::Turn(Heading::Up));
    }

    #[test]
    fn rejected_reversal_lets_a_later_turn_through() {
        // Left reverses Right and is dropped; Up is the first valid change.
        let events = [key(KeyCode::Left), key(KeyCode::Up)];
        assert_eq!(resolve_tick_input(&events, Heading::Right), TickInput::Turn(Heading::Up));
    }

    #[test]
    fn a_lone_reversal_changes_nothing() {
        let events = [key(KeyCode::Left)];
        assert_eq!(resolve_tick_input(&events, Heading::Right), TickInput::Idle);
    }

    #[test]
    fn quit_is_honored_after_an_accepted_turn() {
        let events = [key(KeyCode::Up), key(KeyCode::Char('q'))];
        assert_eq!(resolve_tick_input(&events, Heading::Right), TickInput::Quit);
    }

    #[test]
    fn ctrl_c_is_a_quit() {
        let events = [KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        }];
        assert_eq!(resolve_tick_input(&events, Heading::Up), TickInput::Quit);
    }

    #[test]
    fn no_events_means_no_change() {
        assert_eq!(resolve_tick_input(&[], Heading::Down), TickInput::Idle);
    }

    #[test]
    fn minimal_flag_disables_persistence_and_retry() {
        let config = GameConfig::from_args(vec!["--minimal".to_string()].into_iter());
        assert!(!config.persist_scores);
        assert!(!config.allow_retry);

        let config = GameConfig::from_args(std::iter::empty());
        assert!(config.persist_scores);
        assert!(config.allow_retry);
    }
}
