//! Play command implementation - interactive TUI or plain line mode.

// Board dimensions are u16, so grid indices fit terminal coordinates
#![allow(clippy::needless_pass_by_value, clippy::cast_possible_truncation)]

use super::output::format_summary_text;
use super::prompt::resolve_config;
use super::{CliError, OutputFormat};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use delve::game::clock_seed;
use delve::render::{BoardView, render, render_frame, status_lines};
use delve::replay::Recording;
use delve::{Board, Direction, GameState, MoveOutcome};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io::{self, BufRead, Write, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the board cannot be built, the terminal fails, or the
/// recording cannot be saved.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    width: Option<u16>,
    height: Option<u16>,
    bombs: Option<u32>,
    seed: Option<u64>,
    save: Option<PathBuf>,
    plain: bool,
    yes: bool,
    format: OutputFormat,
) -> Result<(), CliError> {
    let config = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = stdout();
        resolve_config(width, height, bombs, yes, &mut input, &mut output)?
    };

    let seed = seed.unwrap_or_else(clock_seed);
    let board = Board::new(config, seed)?;
    info!(seed, width = config.width, height = config.height, bombs = config.bombs, "new game");

    let mut session = Session {
        board,
        recording: Recording::new(seed, config),
    };

    if plain {
        let stdin = io::stdin();
        play_plain(&mut session, &mut stdin.lock(), &mut stdout())?;
    } else {
        play_tui(&mut session)?;
    }

    // Final board, revealed if the game ended
    print!("{}", render_frame(&session.board));
    println!();

    let summary = session.board.summary();
    match format {
        OutputFormat::Text => print!("{}", format_summary_text(&summary)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    if let Some(path) = save {
        session
            .recording
            .save(&path)
            .map_err(|e| CliError::new(format!("Failed to save recording: {e}")))?;
        println!("Recording saved to: {}", path.display());
    }

    Ok(())
}

/// A board plus the recording of every move that changed it.
struct Session {
    board: Board,
    recording: Recording,
}

impl Session {
    fn apply(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = self.board.move_player(direction);
        if outcome != MoveOutcome::Ignored {
            self.recording.push(direction);
        }
        outcome
    }
}

/// Line-based loop: show the frame, read one direction per line.
///
/// Stops when the game ends, on `q`/`quit`, or at end of input.
fn play_plain<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    output: &mut W,
) -> Result<(), CliError> {
    while session.board.is_running() {
        write!(output, "{}", render_frame(&session.board))?;
        write!(output, "Move (w/a/s/d, q to quit): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit") {
            break;
        }
        match answer.parse::<Direction>() {
            Ok(direction) => {
                session.apply(direction);
            }
            Err(e) => writeln!(output, "{e}")?,
        }
        writeln!(output)?;
    }
    Ok(())
}

fn play_tui(session: &mut Session) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui(&mut terminal, session);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_tui<B: Backend>(terminal: &mut Terminal<B>, session: &mut Session) -> Result<(), CliError> {
    loop {
        terminal.draw(|f| ui(f, session))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            // Any key leaves the final screen
            if !session.board.is_running() {
                break;
            }
            let direction = match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Up => Some(Direction::North),
                KeyCode::Down => Some(Direction::South),
                KeyCode::Left => Some(Direction::West),
                KeyCode::Right => Some(Direction::East),
                KeyCode::Char(c) => Direction::from_key(c),
                _ => None,
            };
            if let Some(direction) = direction {
                session.apply(direction);
            }
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, session: &Session) {
    let board = &session.board;
    let status = status_lines(board);

    let chunks = Layout::vertical([
        Constraint::Length(3),                                // Header
        Constraint::Min(board.height().saturating_add(2)),    // Board
        Constraint::Length(status.len() as u16 + 2),          // Status
        Constraint::Length(3),                                // Footer
    ])
    .split(f.area());

    render_header(f, chunks[0], session);
    render_board(f, chunks[1], &render(board));
    render_status(f, chunks[2], board.state(), status);
    render_footer(f, chunks[3], board.is_running());
}

fn render_header(f: &mut Frame, area: Rect, session: &Session) {
    let config = session.recording.config;
    let title = format!(
        " Delve | Seed {} | {}x{}, {} bombs | Moves: {} ",
        session.recording.seed,
        config.width,
        config.height,
        config.bombs,
        session.board.history().len()
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn glyph_color(glyph: char) -> Color {
    match glyph {
        '>' => Color::Cyan,
        '$' => Color::Green,
        'x' => Color::Red,
        '?' => Color::Magenta,
        '0' => Color::DarkGray,
        '1' => Color::Blue,
        '2' => Color::Yellow,
        '3' | '4' => Color::LightRed,
        _ => Color::Gray,
    }
}

fn render_board(f: &mut Frame, area: Rect, view: &BoardView) {
    let lines: Vec<Line> = view
        .rows()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| {
                    let style = Style::default().fg(glyph_color(cell.glyph));
                    if cell.player {
                        Span::styled(
                            format!("[{}]", cell.glyph),
                            style.bg(Color::DarkGray).add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::styled(format!(" {} ", cell.glyph), style)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let board_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Dungeon "));

    f.render_widget(board_widget, area);
}

fn render_status(f: &mut Frame, area: Rect, state: GameState, status: Vec<String>) {
    let style = match state {
        GameState::Win => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        GameState::Loss => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        GameState::Running => Style::default(),
    };
    let lines: Vec<Line> = status.into_iter().map(Line::from).collect();

    let status_widget = Paragraph::new(lines)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Status "));

    f.render_widget(status_widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, running: bool) {
    let controls = if running {
        " [←↑↓→/WASD] Move  [q] Quit "
    } else {
        " Press any key to exit "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
