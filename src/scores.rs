use std::fs;
use std::io;
use std::path::PathBuf;

/// High-score store over a plain-number text file. Loaded once at startup;
/// written only when a session score beats the stored value.
pub struct HighScore {
    path: PathBuf,
    best: u32,
}

impl HighScore {
    /// A missing or corrupt file counts as a high score of 0.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| contents.trim().parse().ok())
            .unwrap_or(0);
        HighScore { path, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Persists `score` if it beats the current best; a lower or equal score
    /// leaves the file untouched. Keeps the in-memory best in sync so later
    /// rounds compare against it.
    pub fn record(&mut self, score: u32) -> io::Result<()> {
        if score <= self.best {
            return Ok(());
        }
        fs::write(&self.path, score.to_string())?;
        self.best = score;
        Ok(())
    }
}
