use std::io::stdout;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{self, Clear, ClearType},
    ExecutableCommand,
};

use rusty_klondike::Game;

use tui::Tui;

mod tui;

const MIN_TERMINAL_WIDTH: u16 = 60;
const FRAME: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "rusty_klondike", about = "Klondike solitaire in the terminal")]
struct Cli {
    /// Deal a reproducible game from this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Use distinct colors for all four suits
    #[arg(long)]
    high_contrast: bool,

    /// Write logs to a daily file in this directory (filter with RUST_LOG)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn init_logging(dir: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating log dir {}", dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(dir, "rusty_klondike.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let env = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(anyhow::Error::msg)
        .context("installing log subscriber")?;
    Ok(guard)
}

fn run(cli: &Cli) -> Result<()> {
    // Prepare terminal
    terminal::enable_raw_mode().context("enabling raw mode")?;
    let mut out = stdout();
    out.execute(cursor::Hide)?;
    out.execute(Clear(ClearType::All))?;

    let game = match cli.seed {
        Some(seed) => Game::new_seeded(seed),
        None => Game::new(&mut rand::thread_rng()),
    };
    let mut tui = Tui::new(game, cli.high_contrast);
    tui.print(&mut out)?;

    // Game loop: redraw once per frame for the clock, and after every key
    let mut last_frame = Instant::now();
    loop {
        if event::poll(FRAME)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key {
                    KeyEvent { code: KeyCode::Char('q'), modifiers: KeyModifiers::CONTROL, .. } => break,
                    KeyEvent { code: KeyCode::Char('n'), modifiers: KeyModifiers::CONTROL, .. } => {
                        tui.new_game(&mut rand::thread_rng());
                    }
                    KeyEvent { code: KeyCode::Left, .. } => tui.move_cursor_left(),
                    KeyEvent { code: KeyCode::Right, .. } => tui.move_cursor_right(),
                    KeyEvent { code: KeyCode::Up, .. } => tui.move_cursor_up(),
                    KeyEvent { code: KeyCode::Down, .. } => tui.move_cursor_down(),
                    KeyEvent { code: KeyCode::Char(' ') | KeyCode::Enter, .. } => tui.press(),
                    KeyEvent { code: KeyCode::Char('z'), .. } => tui.undo(),
                    KeyEvent { code: KeyCode::Char('h'), .. } => tui.toggle_high_contrast(),
                    _ => {}
                }
            }
        }
        let now = Instant::now();
        tui.tick(now - last_frame);
        last_frame = now;
        tui.print(&mut out)?;
    }

    Ok(())
}

fn cleanup() {
    let mut out = stdout();
    let _ = out.execute(cursor::Show);
    let _ = terminal::disable_raw_mode();
    let _ = out.execute(Clear(ClearType::All));
    println!();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = match &cli.log_dir {
        Some(dir) => Some(init_logging(dir)?),
        None => None,
    };
    tracing::info!("rusty_klondike starting");

    let result = run(&cli);
    cleanup();
    result
}
