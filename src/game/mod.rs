pub mod palette;
pub mod round;
pub mod session;

pub use palette::{Color, Rgb};
pub use session::{
    EndReason, Event, GameOver, GameSession, Guess, GuessOutcome, Outcome, Status, View,
};
