//! High score and player persistence.
//!
//! Every strategy is best-effort: failures are logged and turned into
//! defaults so the game never stops because of storage.

pub mod file;
pub mod memory;
pub mod mysql;

use crate::game::{GameOver, Guess};
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use mysql::MySqlStore;

pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Error)]
pub enum StoreError
{
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored high score is not a number: {0:?}")]
    Parse(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerInfo
{
    pub name: Option<String>,
    pub email: Option<String>,
}

impl PlayerInfo
{
    pub fn new(name: Option<String>, email: Option<String>) -> Self
    {
        Self { name, email }
    }

    pub fn display_name(&self) -> &str
    {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => ANONYMOUS,
        }
    }

    pub fn email(&self) -> Option<&str>
    {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult
{
    pub final_score: u32,
    pub guess: Option<Guess>,
    pub player: PlayerInfo,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl GameResult
{
    pub fn from_game_over(over: &GameOver, player: PlayerInfo) -> Self
    {
        Self {
            final_score: over.final_score,
            guess: over.guess,
            player,
            started_at: over.started_at,
            ended_at: over.ended_at,
        }
    }
}

pub trait ScoreStore
{
    fn name(&self) -> &'static str;

    /// Highest score on record, 0 when nothing readable is stored.
    fn load_high_score(&mut self) -> u32;

    /// Stores the finished session. Never fails from the caller's view.
    fn record_result(&mut self, result: &GameResult);

    /// Per-color statistics for a guess made while the session keeps running.
    fn record_guess(&mut self, _guess: Guess) {}

    fn collects_player_info(&self) -> bool
    {
        false
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn blank_names_become_anonymous()
    {
        assert_eq!(PlayerInfo::default().display_name(), ANONYMOUS);
        let player = PlayerInfo::new(Some("   ".to_string()), None);
        assert_eq!(player.display_name(), ANONYMOUS);
        let player = PlayerInfo::new(Some(" Ada ".to_string()), None);
        assert_eq!(player.display_name(), "Ada");
    }

    #[test]
    fn empty_email_is_dropped()
    {
        let player = PlayerInfo::new(None, Some("  ".to_string()));
        assert_eq!(player.email(), None);
        let player = PlayerInfo::new(None, Some("a@b.c".to_string()));
        assert_eq!(player.email(), Some("a@b.c"));
    }
}
