use super::palette::Color;
use rand::seq::SliceRandom;
use rand::Rng;

// Word and render color are the first two entries of one palette permutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundState
{
    word: Color,
    render_color: Color,
}

impl RoundState
{
    pub fn new_round(rng: &mut impl Rng) -> Self
    {
        let mut colors = Color::ALL;
        colors.shuffle(rng);
        Self {
            word: colors[0],
            render_color: colors[1],
        }
    }

    #[cfg(test)]
    pub fn fixed(word: Color, render_color: Color) -> Self
    {
        Self { word, render_color }
    }

    pub fn word(&self) -> Color
    {
        self.word
    }

    pub fn render_color(&self) -> Color
    {
        self.render_color
    }

    pub fn expected_answer(&self) -> Color
    {
        self.render_color
    }

    pub fn accepts(&self, text: &str) -> bool
    {
        Color::from_name(text) == Some(self.expected_answer())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn expected_answer_is_the_render_color()
    {
        let round = RoundState::fixed(Color::Green, Color::Red);
        assert_eq!(round.expected_answer(), Color::Red);
        assert!(round.accepts(" red "));
        assert!(round.accepts("RED"));
        assert!(round.accepts("Red"));
        assert!(!round.accepts("green"));
        assert!(!round.accepts(""));
    }

    #[test]
    fn rounds_draw_from_the_palette()
    {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let round = RoundState::new_round(&mut rng);
            assert!(Color::ALL.contains(&round.word()));
            assert!(Color::ALL.contains(&round.render_color()));
            assert_ne!(round.word(), round.render_color());
        }
    }

    #[test]
    fn every_color_eventually_shows_as_answer()
    {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(RoundState::new_round(&mut rng).expected_answer());
        }
        assert_eq!(seen.len(), Color::ALL.len());
    }
}
