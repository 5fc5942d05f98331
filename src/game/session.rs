use super::palette::Color;
use super::round::RoundState;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const ROUND_SECONDS: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason
{
    TimeExpired,
    WrongGuess,
}

impl EndReason
{
    pub fn message(self) -> &'static str
    {
        match self {
            EndReason::TimeExpired => "Time's up! Game Over!",
            EndReason::WrongGuess => "Wrong input! Game Over!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status
{
    Running,
    GameOver(EndReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome
{
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Guess
{
    pub color: Color,
    pub outcome: GuessOutcome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOver
{
    pub reason: EndReason,
    pub final_score: u32,
    pub guess: Option<Guess>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event
{
    Tick,
    Submit(String),
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome
{
    Ignored,
    Ticked,
    Accepted(Guess),
    Ended(GameOver),
    Restarted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct View
{
    pub word: Color,
    pub color_to_render: Color,
    pub score: u32,
    pub time_remaining: u32,
    pub status: Status,
}

pub struct GameSession<R = StdRng>
{
    rng: R,
    score: u32,
    time_remaining: u32,
    current: RoundState,
    status: Status,
    started_at: DateTime<Utc>,
}

impl GameSession<StdRng>
{
    pub fn new() -> Self
    {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> GameSession<R>
{
    pub fn with_rng(mut rng: R) -> Self
    {
        let current = RoundState::new_round(&mut rng);
        Self {
            rng,
            score: 0,
            time_remaining: ROUND_SECONDS,
            current,
            status: Status::Running,
            started_at: Utc::now(),
        }
    }

    pub fn dispatch(&mut self, event: Event) -> Outcome
    {
        match event {
            Event::Tick => self.tick(),
            Event::Submit(text) => self.submit_guess(&text),
            Event::Restart => self.restart(),
        }
    }

    pub fn tick(&mut self) -> Outcome
    {
        if self.status != Status::Running {
            return Outcome::Ignored;
        }
        if self.time_remaining > 0 {
            self.time_remaining -= 1;
            if self.time_remaining > 0 {
                return Outcome::Ticked;
            }
        }
        self.end(EndReason::TimeExpired, None)
    }

    pub fn submit_guess(&mut self, text: &str) -> Outcome
    {
        if self.status != Status::Running || self.time_remaining == 0 {
            return Outcome::Ignored;
        }

        let color = self.current.expected_answer();
        if self.current.accepts(text) {
            self.score += 1;
            self.current = RoundState::new_round(&mut self.rng);
            log::debug!("accepted {color}, score {}", self.score);
            Outcome::Accepted(Guess {
                color,
                outcome: GuessOutcome::Correct,
            })
        } else {
            let guess = Guess {
                color,
                outcome: GuessOutcome::Incorrect,
            };
            self.end(EndReason::WrongGuess, Some(guess))
        }
    }

    // Allowed from any state; the session is replaced wholesale.
    pub fn restart(&mut self) -> Outcome
    {
        self.score = 0;
        self.time_remaining = ROUND_SECONDS;
        self.current = RoundState::new_round(&mut self.rng);
        self.status = Status::Running;
        self.started_at = Utc::now();
        log::info!("session restarted");
        Outcome::Restarted
    }

    pub fn current_view(&self) -> View
    {
        View {
            word: self.current.word(),
            color_to_render: self.current.render_color(),
            score: self.score,
            time_remaining: self.time_remaining,
            status: self.status,
        }
    }

    pub fn is_running(&self) -> bool
    {
        self.status == Status::Running
    }

    fn end(&mut self, reason: EndReason, guess: Option<Guess>) -> Outcome
    {
        self.status = Status::GameOver(reason);
        log::info!("game over ({reason:?}) with score {}", self.score);
        Outcome::Ended(GameOver {
            reason,
            final_score: self.score,
            guess,
            started_at: self.started_at,
            ended_at: Utc::now(),
        })
    }

    #[cfg(test)]
    pub(crate) fn set_round(&mut self, round: RoundState)
    {
        self.current = round;
    }
}

impl Default for GameSession<StdRng>
{
    fn default() -> Self
    {
        Self::new()
    }
}
