#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color
{
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
    Pink,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb
{
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color
{
    pub const ALL: [Color; 8] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Purple,
        Color::Pink,
        Color::Black,
    ];

    pub fn name(self) -> &'static str
    {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Orange => "Orange",
            Color::Purple => "Purple",
            Color::Pink => "Pink",
            Color::Black => "Black",
        }
    }

    pub fn hex(self) -> &'static str
    {
        match self {
            Color::Red => "#FF0000",
            Color::Blue => "#0000FF",
            Color::Green => "#008000",
            Color::Yellow => "#FFFF00",
            Color::Orange => "#FFA500",
            Color::Purple => "#800080",
            Color::Pink => "#FFC0CB",
            Color::Black => "#000000",
        }
    }

    pub fn rgb(self) -> Rgb
    {
        let hex = self.hex().trim_start_matches('#');
        let channel = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).unwrap_or(0);
        Rgb {
            r: channel(0),
            g: channel(2),
            b: channel(4),
        }
    }

    pub fn from_name(name: &str) -> Option<Color>
    {
        let name = name.trim();
        Color::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Color
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn palette_has_eight_distinct_colors()
    {
        let names: HashSet<&str> = Color::ALL.iter().map(|color| color.name()).collect();
        assert_eq!(names.len(), 8);
        let hexes: HashSet<&str> = Color::ALL.iter().map(|color| color.hex()).collect();
        assert_eq!(hexes.len(), 8);
    }

    #[test]
    fn rgb_decodes_hex_values()
    {
        assert_eq!(Color::Orange.rgb(), Rgb { r: 255, g: 165, b: 0 });
        assert_eq!(Color::Green.rgb(), Rgb { r: 0, g: 128, b: 0 });
        assert_eq!(Color::Black.rgb(), Rgb { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn from_name_ignores_case_and_padding()
    {
        assert_eq!(Color::from_name(" pUrPle "), Some(Color::Purple));
        assert_eq!(Color::from_name("cyan"), None);
    }
}
