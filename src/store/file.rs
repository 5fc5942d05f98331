use super::{GameResult, ScoreStore, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_PATH: &str = "highscore.txt";

pub struct FileStore
{
    path: PathBuf,
}

impl FileStore
{
    pub fn new(path: impl Into<PathBuf>) -> Self
    {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path
    {
        &self.path
    }

    fn read(&self) -> Result<u32, StoreError>
    {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let trimmed = contents.trim();
        trimmed
            .parse::<u32>()
            .map_err(|_| StoreError::Parse(trimmed.to_string()))
    }

    fn write_if_higher(&self, score: u32) -> Result<bool, StoreError>
    {
        let previous = self.read().unwrap_or(0);
        if score <= previous {
            return Ok(false);
        }
        fs::write(&self.path, score.to_string())?;
        Ok(true)
    }
}

impl ScoreStore for FileStore
{
    fn name(&self) -> &'static str
    {
        "file"
    }

    fn load_high_score(&mut self) -> u32
    {
        match self.read() {
            Ok(score) => score,
            Err(err) => {
                log::warn!("Couldn't read high score from {}: {err}", self.path.display());
                0
            }
        }
    }

    fn record_result(&mut self, result: &GameResult)
    {
        match self.write_if_higher(result.final_score) {
            Ok(true) => log::debug!("new high score {} saved", result.final_score),
            Ok(false) => {}
            Err(err) => {
                log::warn!("Couldn't save high score to {}: {err}", self.path.display())
            }
        }
    }
}
