use crate::{Cell, Px, ARENA_HEIGHT, ARENA_WIDTH, CELL_SIZE};

use rand::seq::SliceRandom;
use rand::Rng;

const GRID_COLS: Px = ARENA_WIDTH / CELL_SIZE;
const GRID_ROWS: Px = ARENA_HEIGHT / CELL_SIZE;

/// Rejection-sampling budget before falling back to scanning for free cells.
/// The grid dwarfs the snake for any reachable length, so the fallback only
/// matters on a nearly full board.
const MAX_PLACEMENT_TRIES: u32 = 128;

pub struct Apple {
    cell: Cell,
}

impl Apple {
    pub fn new(cell: Cell) -> Self {
        Apple { cell }
    }

    /// Places a new apple on a cell not occupied by the snake. `None` means
    /// the snake fills the whole grid.
    pub fn spawn<R: Rng>(rng: &mut R, segments: &[Cell]) -> Option<Self> {
        Self::place(rng, segments).map(|cell| Apple { cell })
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Moves the apple to a fresh free cell after it has been eaten.
    /// Returns false when no free cell remains.
    pub fn relocate<R: Rng>(&mut self, rng: &mut R, segments: &[Cell]) -> bool {
        match Self::place(rng, segments) {
            Some(cell) => {
                self.cell = cell;
                true
            }
            None => false,
        }
    }

    fn place<R: Rng>(rng: &mut R, segments: &[Cell]) -> Option<Cell> {
        for _ in 0..MAX_PLACEMENT_TRIES {
            let cell = (
                rng.gen_range(0..GRID_COLS) * CELL_SIZE,
                rng.gen_range(0..GRID_ROWS) * CELL_SIZE,
            );
            if !segments.contains(&cell) {
                return Some(cell);
            }
        }

        // Dense board: pick uniformly among the cells that are actually free.
        let free: Vec<Cell> = (0..GRID_COLS)
            .flat_map(|x| (0..GRID_ROWS).map(move |y| (x * CELL_SIZE, y * CELL_SIZE)))
            .filter(|cell| !segments.contains(cell))
            .collect();
        free.choose(rng).copied()
    }
}
