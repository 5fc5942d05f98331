use crate::game::{EndReason, Event, GameOver, GameSession, Outcome, View};
use crate::store::{GameResult, PlayerInfo, ScoreStore};
use rand::rngs::StdRng;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary
{
    pub reason: EndReason,
    pub score: u32,
    pub high_score: u32,
}

pub struct App<R = StdRng>
{
    session: GameSession<R>,
    store: Box<dyn ScoreStore>,
}

impl<R: Rng> App<R>
{
    pub fn new(session: GameSession<R>, store: Box<dyn ScoreStore>) -> Self
    {
        log::debug!("using {} store", store.name());
        Self { session, store }
    }

    pub fn handle(&mut self, event: Event) -> Outcome
    {
        let outcome = self.session.dispatch(event);
        if let Outcome::Accepted(guess) = outcome {
            self.store.record_guess(guess);
        }
        outcome
    }

    pub fn view(&self) -> View
    {
        self.session.current_view()
    }

    pub fn is_running(&self) -> bool
    {
        self.session.is_running()
    }

    pub fn wants_player_info(&self) -> bool
    {
        self.store.collects_player_info()
    }

    // Records first so the returned high score already counts this session.
    pub fn finish(&mut self, over: &GameOver, player: PlayerInfo) -> Summary
    {
        self.store
            .record_result(&GameResult::from_game_over(over, player));
        Summary {
            reason: over.reason,
            score: over.final_score,
            high_score: self.store.load_high_score(),
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::game::{Color, Guess, GuessOutcome};
    use crate::store::{FileStore, MemoryStore};
    use rand::SeedableRng;

    fn app_with(store: Box<dyn ScoreStore>) -> App
    {
        App::new(GameSession::with_rng(StdRng::seed_from_u64(99)), store)
    }

    fn answer(app: &App) -> String
    {
        app.view().color_to_render.name().to_lowercase()
    }

    fn play(app: &mut App, correct: u32) -> GameOver
    {
        for _ in 0..correct {
            let text = answer(app);
            assert!(matches!(app.handle(Event::Submit(text)), Outcome::Accepted(_)));
        }
        match app.handle(Event::Submit("wrongcolor".to_string())) {
            Outcome::Ended(over) => over,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn game_over_records_and_reports_high_score()
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hs.txt");
        let mut app = app_with(Box::new(FileStore::new(&path)));

        let over = play(&mut app, 5);
        let summary = app.finish(&over, PlayerInfo::default());
        assert_eq!(
            summary,
            Summary {
                reason: EndReason::WrongGuess,
                score: 5,
                high_score: 5,
            }
        );

        app.handle(Event::Restart);
        let over = play(&mut app, 3);
        let summary = app.finish(&over, PlayerInfo::default());
        assert_eq!(summary.score, 3);
        assert_eq!(summary.high_score, 5);
    }

    #[test]
    fn time_expiry_finishes_without_a_guess()
    {
        let mut app = app_with(Box::new(MemoryStore::new()));
        let mut ended = None;
        while app.is_running() {
            if let Outcome::Ended(over) = app.handle(Event::Tick) {
                ended = Some(over);
            }
        }
        let over = ended.unwrap();
        assert_eq!(over.guess, None);
        let summary = app.finish(&over, PlayerInfo::default());
        assert_eq!(summary.reason, EndReason::TimeExpired);
        assert_eq!(summary.high_score, 0);
        assert!(!app.wants_player_info());
    }

    #[test]
    fn accepted_guesses_reach_the_store()
    {
        struct Recorder(std::rc::Rc<std::cell::RefCell<Vec<Guess>>>);

        impl ScoreStore for Recorder
        {
            fn name(&self) -> &'static str
            {
                "recorder"
            }

            fn load_high_score(&mut self) -> u32
            {
                0
            }

            fn record_result(&mut self, result: &GameResult)
            {
                self.0.borrow_mut().extend(result.guess);
            }

            fn record_guess(&mut self, guess: Guess)
            {
                self.0.borrow_mut().push(guess);
            }
        }

        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut app = app_with(Box::new(Recorder(seen.clone())));
        let first = app.view().color_to_render;
        let over = play(&mut app, 1);
        app.finish(&over, PlayerInfo::default());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(
            seen[0],
            Guess {
                color: first,
                outcome: GuessOutcome::Correct,
            }
        );
        assert_eq!(seen[1].outcome, GuessOutcome::Incorrect);
        assert!(Color::ALL.contains(&seen[1].color));
    }
}
