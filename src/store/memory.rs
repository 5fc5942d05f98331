use super::{GameResult, ScoreStore};
use crate::game::{Color, Guess, GuessOutcome};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorStat
{
    pub correct_guesses: u32,
    pub incorrect_guesses: u32,
}

#[derive(Default)]
pub struct MemoryStore
{
    results: Vec<GameResult>,
    color_stats: HashMap<Color, ColorStat>,
}

impl MemoryStore
{
    pub fn new() -> Self
    {
        Self::default()
    }

    #[cfg(test)]
    pub fn results(&self) -> &[GameResult]
    {
        &self.results
    }

    #[cfg(test)]
    pub fn color_stat(&self, color: Color) -> ColorStat
    {
        self.color_stats.get(&color).copied().unwrap_or_default()
    }

    fn count(&mut self, guess: Guess)
    {
        let stat = self.color_stats.entry(guess.color).or_default();
        match guess.outcome {
            GuessOutcome::Correct => stat.correct_guesses += 1,
            GuessOutcome::Incorrect => stat.incorrect_guesses += 1,
        }
    }
}

impl ScoreStore for MemoryStore
{
    fn name(&self) -> &'static str
    {
        "memory"
    }

    fn load_high_score(&mut self) -> u32
    {
        self.results
            .iter()
            .map(|result| result.final_score)
            .max()
            .unwrap_or(0)
    }

    fn record_result(&mut self, result: &GameResult)
    {
        if let Some(guess) = result.guess {
            self.count(guess);
        }
        self.results.push(result.clone());
    }

    fn record_guess(&mut self, guess: Guess)
    {
        self.count(guess);
    }
}
