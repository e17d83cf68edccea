use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style};

use gridsnake::{Cell, ARENA_HEIGHT, ARENA_WIDTH, CELL_SIZE};

pub type TermInt = u16;

const GRID_COLS: TermInt = (ARENA_WIDTH / CELL_SIZE) as TermInt;
const GRID_ROWS: TermInt = (ARENA_HEIGHT / CELL_SIZE) as TermInt;

// One HUD row on top, then the bordered arena: one terminal cell per game cell.
const HUD_ROWS: TermInt = 1;
const SCREEN_COLS: TermInt = GRID_COLS + 2;
const SCREEN_ROWS: TermInt = GRID_ROWS + 2 + HUD_ROWS;

/// The rendering context: owns the terminal and a char frame buffer that is
/// recomposed from scratch each tick and flushed in one go.
pub struct Screen {
    stdout: Stdout,
    frame: Vec<char>,
}

impl Screen {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        if width < SCREEN_COLS || height < SCREEN_ROWS {
            bail!(
                "terminal is {}x{}, but the arena needs at least {}x{}",
                width, height, SCREEN_COLS, SCREEN_ROWS
            );
        }

        let frame = vec![' '; SCREEN_COLS as usize * SCREEN_ROWS as usize];
        Ok(Screen { stdout: stdout(), frame })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking)?;
        execute!(self.stdout, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Resets the frame to an empty bordered arena.
    pub fn begin_frame(&mut self) {
        for ch in self.frame.iter_mut() {
            *ch = ' ';
        }

        let top = HUD_ROWS;
        let bottom = SCREEN_ROWS - 1;
        for x in 0..SCREEN_COLS {
            let ch = if x == 0 || x == SCREEN_COLS - 1 { '+' } else { '-' };
            self.put(x, top, ch);
            self.put(x, bottom, ch);
        }
        for y in top + 1..bottom {
            self.put(0, y, '|');
            self.put(SCREEN_COLS - 1, y, '|');
        }
    }

    /// Draws one glyph at a game cell. Cells outside the arena are ignored.
    pub fn plot(&mut self, cell: Cell, ch: char) {
        let (x, y) = cell;
        if x < 0 || y < 0 || x > ARENA_WIDTH - CELL_SIZE || y > ARENA_HEIGHT - CELL_SIZE {
            return;
        }

        let col = (x / CELL_SIZE) as TermInt + 1;
        let row = (y / CELL_SIZE) as TermInt + 1 + HUD_ROWS;
        self.put(col, row, ch);
    }

    /// Score on the left of the HUD row, high score on the right.
    pub fn hud(&mut self, score: u32, high_score: u32) {
        let left = format!("Score: {}", score);
        let right = format!("High score: {}", high_score);

        self.text(1, 0, &left);
        self.text(SCREEN_COLS - right.len() as TermInt - 1, 0, &right);
    }

    /// Overlays a centered message box on top of the current frame.
    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        self.compose_message(lines);
        self.present()
    }

    /// Centers the box on the screen. Lines wider than the screen are cut at
    /// the edge so the centering math can never underflow.
    fn compose_message(&mut self, lines: &[&str]) {
        let longest = lines.iter().map(|x| x.len()).max().unwrap_or(0);
        let msg_width = (longest + 2).min(SCREEN_COLS as usize) as TermInt;
        let msg_height = (lines.len() + 2).min(SCREEN_ROWS as usize) as TermInt;
        let top_left = (
            (SCREEN_COLS - msg_width) / 2,
            (SCREEN_ROWS - msg_height) / 2,
        );

        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.put(top_left.0 + x_diff, *y, ' ');
            }
        }

        for (i, line) in lines.iter().take(msg_height as usize - 2).enumerate() {
            let padded = format!("{: ^width$}", line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded.chars().take(msg_width as usize).enumerate() {
                self.put(top_left.0 + x_diff as TermInt, y, ch);
            }
        }
    }

    /// Flushes the composed frame to the terminal, one row per write.
    pub fn present(&mut self) -> Result<()> {
        for row in 0..SCREEN_ROWS {
            let start = row as usize * SCREEN_COLS as usize;
            let line: String = self.frame[start..start + SCREEN_COLS as usize].iter().collect();
            queue!(self.stdout, cursor::MoveTo(0, row), style::Print(line))?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Drains every key event queued since the last tick.
    pub fn read_key_events(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    fn text(&mut self, col: TermInt, row: TermInt, s: &str) {
        for (i, ch) in s.chars().enumerate() {
            self.put(col + i as TermInt, row, ch);
        }
    }

    fn put(&mut self, col: TermInt, row: TermInt, ch: char) {
        self.frame[row as usize * SCREEN_COLS as usize + col as usize] = ch;
    }
}
