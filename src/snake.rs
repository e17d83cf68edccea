use crate::{Cell, Px, ARENA_HEIGHT, ARENA_WIDTH, CELL_SIZE};
use Heading::*;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn delta(self) -> (Px, Px) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    Dead(Cause),
    Grow,
    Continue,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Cause {
    Wall,
    Body,
}

pub struct Snake {
    segments: Vec<Cell>,
    heading: Heading,
    grow_pending: bool,
    alive: bool,
    score: u32,
}

impl Snake {
    /// Builds a snake whose head sits at `head`, with the body trailing
    /// opposite to `heading`.
    pub fn new(head: Cell, length: usize, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        let segments = (0..length as Px)
            .map(|i| (head.0 - dx * CELL_SIZE * i, head.1 - dy * CELL_SIZE * i))
            .collect();
        Snake { segments, heading, grow_pending: false, alive: true, score: 0 }
    }

    pub fn segments(&self) -> &[Cell] {
        &self.segments
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Where the head will be after the next step. Pure translation, no
    /// clipping to the arena.
    pub fn next_head(&self) -> Cell {
        let (x, y) = self.head();
        let (dx, dy) = self.heading.delta();
        (x + dx * CELL_SIZE, y + dy * CELL_SIZE)
    }

    /// Wall check first, then body, then apple. The ordering decides the
    /// tie-break if a cell ever satisfied more than one.
    pub fn check_collision(&self, new_head: Cell, apple: Cell) -> Outcome {
        let (x, y) = new_head;

        if x < 0 || y < 0 || x > ARENA_WIDTH - CELL_SIZE || y > ARENA_HEIGHT - CELL_SIZE {
            return Outcome::Dead(Cause::Wall);
        }
        if self.segments[1..].contains(&new_head) {
            return Outcome::Dead(Cause::Body);
        }
        if new_head == apple {
            return Outcome::Grow;
        }
        Outcome::Continue
    }

    /// Prepends the new head; drops the tail unless growth is pending.
    pub fn advance(&mut self, new_head: Cell) {
        self.segments.insert(0, new_head);

        if self.grow_pending {
            self.grow_pending = false;
        } else {
            self.segments.pop();
        }
    }

    /// One simulation tick: move the head one cell in the current heading
    /// and resolve what it landed on.
    pub fn step(&mut self, apple: Cell) -> Outcome {
        let new_head = self.next_head();
        let outcome = self.check_collision(new_head, apple);

        match outcome {
            Outcome::Dead(_) => self.alive = false,
            Outcome::Grow => {
                self.score += 1;
                self.grow_pending = true;
                self.advance(new_head);
            }
            Outcome::Continue => self.advance(new_head),
        }

        outcome
    }

    /// Rejects the exact opposite of the current heading, so the snake can
    /// never reverse into itself in a single tick.
    pub fn set_heading(&mut self, requested: Heading) -> bool {
        if requested == self.heading.opposite() {
            return false;
        }
        self.heading = requested;
        true
    }

    pub fn head_char(&self) -> char {
        match self.heading {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}
