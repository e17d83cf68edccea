mod game;
mod term;

use anyhow::Context;

use game::{GameConfig, SnakeGame};

fn main() -> anyhow::Result<()> {
    let config = GameConfig::from_args(std::env::args().skip(1));

    let mut game = SnakeGame::new(config).context("could not set up the terminal")?;
    let result = game.run();

    // Restore the terminal before reporting anything, even on error.
    game.shutdown();
    result
}
