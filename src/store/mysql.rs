use super::{GameResult, ScoreStore, StoreError};
use crate::game::{Guess, GuessOutcome};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tokio::runtime::{Builder, Runtime};

const CREATE_PLAYERS: &str = r#"
    CREATE TABLE IF NOT EXISTS players (
        id INT AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(255) NULL,
        UNIQUE KEY uq_players_name (name)
    )
"#;

const CREATE_GAME_SESSIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS game_sessions (
        id INT AUTO_INCREMENT PRIMARY KEY,
        player_id INT NOT NULL,
        score INT NOT NULL,
        start_time DATETIME NOT NULL,
        end_time DATETIME NOT NULL,
        FOREIGN KEY (player_id) REFERENCES players(id)
    )
"#;

const CREATE_COLOR_STATS: &str = r#"
    CREATE TABLE IF NOT EXISTS color_stats (
        color_name VARCHAR(20) PRIMARY KEY,
        correct_guesses INT NOT NULL DEFAULT 0,
        incorrect_guesses INT NOT NULL DEFAULT 0
    )
"#;

// LAST_INSERT_ID(id) makes the existing row id visible when the name already exists.
const UPSERT_PLAYER: &str = "INSERT INTO players (name, email) VALUES (?, ?) \
     ON DUPLICATE KEY UPDATE id = LAST_INSERT_ID(id), email = COALESCE(VALUES(email), email)";

const INSERT_SESSION: &str =
    "INSERT INTO game_sessions (player_id, score, start_time, end_time) VALUES (?, ?, ?, ?)";

const HIGH_SCORE: &str =
    "SELECT MAX(gs.score) FROM game_sessions gs JOIN players p ON p.id = gs.player_id";

const COUNT_CORRECT: &str = "INSERT INTO color_stats (color_name, correct_guesses) VALUES (?, 1) \
     ON DUPLICATE KEY UPDATE correct_guesses = correct_guesses + 1";

const COUNT_INCORRECT: &str = "INSERT INTO color_stats (color_name, incorrect_guesses) VALUES (?, 1) \
     ON DUPLICATE KEY UPDATE incorrect_guesses = incorrect_guesses + 1";

fn color_stat_statement(outcome: GuessOutcome) -> &'static str
{
    match outcome {
        GuessOutcome::Correct => COUNT_CORRECT,
        GuessOutcome::Incorrect => COUNT_INCORRECT,
    }
}

pub struct MySqlStore
{
    runtime: Runtime,
    pool: MySqlPool,
}

impl MySqlStore
{
    pub fn connect(url: &str) -> Result<Self, StoreError>
    {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let pool = runtime.block_on(async {
            let pool = MySqlPoolOptions::new()
                .max_connections(1)
                .connect(url)
                .await?;
            for statement in [CREATE_PLAYERS, CREATE_GAME_SESSIONS, CREATE_COLOR_STATS] {
                sqlx::query(statement).execute(&pool).await?;
            }
            Ok::<_, StoreError>(pool)
        })?;
        log::info!("Database connected and tables ready");
        Ok(Self { runtime, pool })
    }

    fn high_score(&self) -> Result<u32, StoreError>
    {
        let max = self.runtime.block_on(
            sqlx::query_scalar::<_, Option<i64>>(HIGH_SCORE).fetch_one(&self.pool),
        )?;
        Ok(max.and_then(|score| u32::try_from(score).ok()).unwrap_or(0))
    }

    fn insert_result(&self, result: &GameResult) -> Result<(), StoreError>
    {
        self.runtime.block_on(async {
            let mut tx = self.pool.begin().await?;
            let player_id = sqlx::query(UPSERT_PLAYER)
                .bind(result.player.display_name())
                .bind(result.player.email())
                .execute(&mut *tx)
                .await?
                .last_insert_id();
            sqlx::query(INSERT_SESSION)
                .bind(player_id)
                .bind(result.final_score)
                .bind(result.started_at)
                .bind(result.ended_at)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            Ok::<_, StoreError>(())
        })
    }

    fn count_guess(&self, guess: Guess) -> Result<(), StoreError>
    {
        self.runtime.block_on(
            sqlx::query(color_stat_statement(guess.outcome))
                .bind(guess.color.name())
                .execute(&self.pool),
        )?;
        Ok(())
    }
}

impl ScoreStore for MySqlStore
{
    fn name(&self) -> &'static str
    {
        "mysql"
    }

    fn load_high_score(&mut self) -> u32
    {
        self.high_score().unwrap_or_else(|err| {
            log::warn!("Couldn't load high score: {err}");
            0
        })
    }

    fn record_result(&mut self, result: &GameResult)
    {
        if let Err(err) = self.insert_result(result) {
            log::warn!("Couldn't record session: {err}");
        }
        if let Some(guess) = result.guess {
            self.record_guess(guess);
        }
    }

    fn record_guess(&mut self, guess: Guess)
    {
        if let Err(err) = self.count_guess(guess) {
            log::warn!("Couldn't update stats for {}: {err}", guess.color);
        }
    }

    fn collects_player_info(&self) -> bool
    {
        true
    }
}
