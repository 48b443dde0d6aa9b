//! Terminal runner (default binary).
//!
//! Reads an optional JSON engine config named by `FALLBLOCK_CONFIG`, logs to
//! `fallblock.log`, and runs the game on crossterm with the framebuffer
//! renderer.

use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fallblock::core::{EngineConfig, Game};
use fallblock::input::{handle_key_event, is_soft_drop_key, should_quit};
use fallblock::term::{GameView, TerminalRenderer, Viewport};
use fallblock::types::{GameEvent, TICK_MS};
use fallblock::Driver;

const CONFIG_ENV: &str = "FALLBLOCK_CONFIG";
const LOG_FILE: &str = "fallblock.log";

fn main() -> Result<()> {
    init_logging()?;
    let config = load_config()?;
    let game = Game::new(config).context("invalid engine config")?;
    info!(width = config.width, height = config.height, seed = config.seed, "starting");

    let mut term = TerminalRenderer::stdout();
    term.enter()?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).with_context(|| format!("create {LOG_FILE}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config() -> Result<EngineConfig> {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return Ok(EngineConfig::default());
    };
    read_config(Path::new(&path))
}

fn read_config(path: &Path) -> Result<EngineConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parse config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn run(term: &mut TerminalRenderer, mut game: Game) -> Result<()> {
    let view = GameView::default();
    let mut driver = Driver::new();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        term.draw_game(&view, &game, Viewport::new(w, h))?;

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            info!(score = game.score(), lines = game.lines(), "quit");
                            return Ok(());
                        }
                        if let Some(action) = handle_key_event(key) {
                            driver.handle_action(&mut game, action);
                        }
                    }
                    KeyEventKind::Release => {
                        if is_soft_drop_key(key) {
                            driver.release_down();
                        }
                    }
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            driver.advance(&mut game, elapsed.as_millis().min(u32::MAX as u128) as u32);
        }

        for event in game.take_events() {
            match event {
                GameEvent::GameOver => info!(score = game.score(), lines = game.lines(), "game over"),
                other => debug!(event = ?other),
            }
        }
    }
}
