use crate::app::{App, Summary};
use crate::game::{Event as GameEvent, Outcome, Rgb, Status, View};
use crate::store::PlayerInfo;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use rand::Rng;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_secs(1);
const DRAW_MS: u64 = 33;
const POLL_MS: u64 = 5;
const MAX_INPUT: usize = 24;
const BACKDROP: Rgb = Rgb {
    r: 225,
    g: 225,
    b: 225,
};

struct TerminalGuard
{
    stdout: Stdout,
}

impl TerminalGuard
{
    fn enter() -> io::Result<Self>
    {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(Self { stdout })
    }

    fn stdout(&mut self) -> &mut Stdout
    {
        &mut self.stdout
    }
}

impl Drop for TerminalGuard
{
    fn drop(&mut self)
    {
        let _ = execute!(self.stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

enum Key
{
    Quit,
    Enter,
    Backspace,
    Left,
    Right,
    Char(char),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Choice
{
    Restart,
    Exit,
}

pub fn run<R: Rng>(app: &mut App<R>) -> Result<(), String>
{
    let mut term = TerminalGuard::enter().map_err(|err| err.to_string())?;
    let mut input = String::new();
    let mut next_tick = Instant::now() + TICK;
    let mut last_draw: Option<Instant> = None;

    loop {
        let mut outcome = Outcome::Ignored;

        match read_key(Duration::from_millis(0))? {
            Some(Key::Quit) => return Ok(()),
            Some(Key::Enter) => {
                let text = std::mem::take(&mut input);
                outcome = app.handle(GameEvent::Submit(text));
            }
            Some(Key::Backspace) => {
                input.pop();
            }
            Some(Key::Char(ch)) => {
                if !ch.is_control() && input.chars().count() < MAX_INPUT {
                    input.push(ch);
                }
            }
            Some(Key::Left) | Some(Key::Right) | None => {}
        }

        if !matches!(outcome, Outcome::Ended(_)) && Instant::now() >= next_tick {
            outcome = app.handle(GameEvent::Tick);
            next_tick += TICK;
        }

        if let Outcome::Ended(over) = outcome {
            draw_game(term.stdout(), &app.view(), &input)?;
            let player = if app.wants_player_info() {
                ask_player(term.stdout())?
            } else {
                PlayerInfo::default()
            };
            let summary = app.finish(&over, player);
            match game_over_prompt(term.stdout(), &summary)? {
                Choice::Restart => {
                    app.handle(GameEvent::Restart);
                    input.clear();
                    next_tick = Instant::now() + TICK;
                    last_draw = None;
                }
                Choice::Exit => return Ok(()),
            }
        }

        let redraw = !matches!(outcome, Outcome::Ignored)
            || last_draw.is_none_or(|at| at.elapsed() >= Duration::from_millis(DRAW_MS));
        if redraw {
            draw_game(term.stdout(), &app.view(), &input)?;
            last_draw = Some(Instant::now());
        }

        std::thread::sleep(Duration::from_millis(POLL_MS));
    }
}

fn read_key(timeout: Duration) -> Result<Option<Key>, String>
{
    if !event::poll(timeout).map_err(|err| err.to_string())? {
        return Ok(None);
    }
    let key = match event::read().map_err(|err| err.to_string())? {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) if kind != KeyEventKind::Release => match code {
            KeyCode::Esc => Some(Key::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Char(ch) => Some(Key::Char(ch)),
            _ => None,
        },
        _ => None,
    };
    Ok(key)
}

fn wait_key() -> Result<Key, String>
{
    loop {
        if let Some(key) = read_key(Duration::from_millis(50))? {
            return Ok(key);
        }
    }
}

fn draw_game(stdout: &mut Stdout, view: &View, input: &str) -> Result<(), String>
{
    let mut lines = Vec::new();
    lines.push("Color Game".to_string());
    lines.push(format!("Time left: {}", view.time_remaining));
    lines.push("Type the color you see, not the word!".to_string());
    lines.push(String::new());
    lines.push(render_word(view));
    lines.push(String::new());
    lines.push(format!("Score: {}", view.score));
    lines.push(format!("> {}", input));
    lines.push(String::new());
    lines.push(
        match view.status {
            Status::Running => "Enter submits, Backspace edits, Esc quits",
            Status::GameOver(reason) => reason.message(),
        }
        .to_string(),
    );
    write_screen(stdout, &lines)
}

fn render_word(view: &View) -> String
{
    let text = view.word.name();
    let width = text.len() + 8;
    let blank = " ".repeat(width);
    let padded = format!("{text:^width$}");
    let fg = view.color_to_render.rgb();
    let backdrop = ansi_background(BACKDROP);
    format!(
        "{backdrop}{blank}\x1b[0m\r\n{backdrop}\x1b[1m{}{padded}\x1b[0m\r\n{backdrop}{blank}\x1b[0m",
        ansi_color(fg)
    )
}

fn ask_player(stdout: &mut Stdout) -> Result<PlayerInfo, String>
{
    let name = prompt_line(stdout, "Enter your name:")?;
    let email = prompt_line(stdout, "Enter your email:")?;
    Ok(PlayerInfo::new(name, email))
}

// Esc cancels the prompt and yields None.
fn prompt_line(stdout: &mut Stdout, label: &str) -> Result<Option<String>, String>
{
    let mut buffer = String::new();
    loop {
        let lines = vec![
            "Game Over".to_string(),
            String::new(),
            label.to_string(),
            format!("> {}", buffer),
            String::new(),
            "Enter confirms, Esc skips".to_string(),
        ];
        write_screen(stdout, &lines)?;

        match wait_key()? {
            Key::Enter => return Ok(Some(buffer)),
            Key::Quit => return Ok(None),
            Key::Backspace => {
                buffer.pop();
            }
            Key::Char(ch) => {
                if !ch.is_control() && buffer.chars().count() < 100 {
                    buffer.push(ch);
                }
            }
            Key::Left | Key::Right => {}
        }
    }
}

fn game_over_prompt(stdout: &mut Stdout, summary: &Summary) -> Result<Choice, String>
{
    let mut selected = Choice::Restart;
    loop {
        let button = |choice: Choice, label: &str| {
            if choice == selected {
                format!("\x1b[7m [ {label} ] \x1b[0m")
            } else {
                format!("   {label}   ")
            }
        };
        let lines = vec![
            "Game Over".to_string(),
            String::new(),
            summary.reason.message().to_string(),
            format!("Your Score: {}", summary.score),
            format!("Highest Score: {}", summary.high_score),
            "Do you want to play again?".to_string(),
            String::new(),
            format!(
                "{}  {}",
                button(Choice::Restart, "Restart"),
                button(Choice::Exit, "Exit")
            ),
            String::new(),
            "Left/Right to choose, Enter to confirm (R/E also work)".to_string(),
        ];
        write_screen(stdout, &lines)?;

        match wait_key()? {
            Key::Enter => return Ok(selected),
            Key::Quit => return Ok(Choice::Exit),
            Key::Left => selected = Choice::Restart,
            Key::Right => selected = Choice::Exit,
            Key::Char(ch) if ch.eq_ignore_ascii_case(&'r') => return Ok(Choice::Restart),
            Key::Char(ch) if ch.eq_ignore_ascii_case(&'e') => return Ok(Choice::Exit),
            _ => {}
        }
    }
}

fn write_screen(stdout: &mut Stdout, lines: &[String]) -> Result<(), String>
{
    let output = format!("{}\r\n", lines.join("\r\n"));
    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All)).map_err(|err| err.to_string())?;
    stdout.write_all(output.as_bytes()).map_err(|err| err.to_string())?;
    stdout.flush().map_err(|err| err.to_string())?;
    Ok(())
}

fn ansi_color(color: Rgb) -> String
{
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

fn ansi_background(color: Rgb) -> String
{
    format!("\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::game::Color;

    fn view(word: Color, color: Color) -> View
    {
        View {
            word,
            color_to_render: color,
            score: 0,
            time_remaining: 30,
            status: Status::Running,
        }
    }

    #[test]
    fn word_is_painted_in_the_render_color()
    {
        let rendered = render_word(&view(Color::Blue, Color::Orange));
        assert!(rendered.contains("Blue"));
        assert!(rendered.contains(&ansi_color(Color::Orange.rgb())));
        assert!(!rendered.contains(&ansi_color(Color::Blue.rgb())));
    }

    #[test]
    fn padded_word_keeps_its_text()
    {
        let rendered = render_word(&view(Color::Black, Color::Black));
        assert_eq!(rendered.matches("Black").count(), 1);
        assert_eq!(rendered.lines().count(), 3);
    }
}
