use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags};
use crossterm::{cursor, execute, terminal};
use game_core::headless::{HeldKeys, MonoText, RecordingSurface};
use game_core::{Config, FrameOutcome, HostEvent, Match, Rect, Surface};

use keyboard::KeyState;
use screen::TermSurface;

mod keyboard;
mod screen;

/// Smallest grid that still leaves room for paddles and the score line
const MIN_COLS: u16 = 40;
const MIN_ROWS: u16 = 12;

#[derive(Parser)]
#[command(name = "pong", about = "Two-player Pong in the terminal")]
struct Cli {
    /// JSON config file; missing fields use the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cap the frame rate. Ball speed is per frame, so this sets game speed
    #[arg(long)]
    fps: Option<u32>,

    /// Simulate this many frames without a terminal and print the score
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::new(),
    };
    let game = Match::new(config).context("Invalid configuration")?;

    match cli.headless {
        Some(frames) => simulate(game, frames),
        None => play(game, cli.fps),
    }
}

/// Run frames against the recording host with nobody at the keys
fn simulate(mut game: Match, frames: u64) -> Result<()> {
    let config = game.config();
    let mut surface = RecordingSurface::new(config.arena_width as u32, config.arena_height as u32);
    let keys = HeldKeys::new();
    let mut events: VecDeque<HostEvent> = VecDeque::new();

    for _ in 0..frames {
        game.run_frame(&mut surface, &mut MonoText, &keys, &mut events);
    }

    let score = game.score();
    println!("{} frames: {} - {}", game.tick(), score.left, score.right);
    Ok(())
}

fn play(game: Match, fps: Option<u32>) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    if cols < MIN_COLS || rows < MIN_ROWS {
        bail!("Terminal too small: need {MIN_COLS}x{MIN_ROWS}, have {cols}x{rows}");
    }

    match fps {
        Some(fps) if fps > 0 => log::info!("Frame rate capped at {fps}"),
        _ => log::warn!("Frame rate uncapped; game speed depends on terminal throughput"),
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(terminal::ClearType::All),
    )?;

    let reports_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if reports_release {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    } else {
        log::warn!("Terminal does not report key releases; holding keys is emulated");
    }

    let result = run_loop(game, stdout, cols, rows, fps, reports_release);

    // Always restore terminal state.
    let mut stdout = io::stdout();
    if reports_release {
        let _ = execute!(stdout, PopKeyboardEnhancementFlags);
    }
    let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run_loop(
    mut game: Match,
    stdout: Stdout,
    cols: u16,
    rows: u16,
    fps: Option<u32>,
    reports_release: bool,
) -> Result<()> {
    let config = game.config();
    let mut surface = TermSurface::new(
        stdout,
        config.arena_width as u32,
        config.arena_height as u32,
        cols,
        rows,
    );
    let mut text = surface.text_provider();
    let mut keys = KeyState::new(reports_release);
    let mut pending: VecDeque<HostEvent> = VecDeque::new();
    let frame_budget = fps
        .filter(|&fps| fps > 0)
        .map(|fps| Duration::from_secs_f64(1.0 / f64::from(fps)));

    // First frame paints the whole screen
    let arena = *game.arena();
    game.run_frame(&mut surface, &mut text, &keys, &mut pending);
    surface.present(&[Rect::new(0, 0, arena.width.ceil() as i32, arena.height.ceil() as i32)]);
    surface.take_error()?;

    loop {
        let started = Instant::now();

        keys.pump(&mut pending)?;
        if game.run_frame(&mut surface, &mut text, &keys, &mut pending) == FrameOutcome::Quit {
            break;
        }
        surface.take_error().context("Failed to draw frame")?;

        if let Some(rest) = frame_budget.and_then(|budget| budget.checked_sub(started.elapsed())) {
            thread::sleep(rest);
        }
    }

    Ok(())
}
