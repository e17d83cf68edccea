pub mod apple;
pub mod scores;
pub mod snake;

/// Pixel coordinate. Signed so that a head one step past a boundary is
/// representable; out-of-bounds is detected after the move, not prevented.
pub type Px = i32;
pub type Cell = (Px, Px);

pub const ARENA_WIDTH: Px = 720;
pub const ARENA_HEIGHT: Px = 560;
pub const CELL_SIZE: Px = 20;
