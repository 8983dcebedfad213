// src/main.rs
use std::fs;
use std::io::{self, Stdout};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use log::{error, info};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use quotepop::app::{App, build_registry};
use quotepop::config::Settings;
use quotepop::input::handle_key;
use quotepop::route::RouteSelection;
use quotepop::terminal::TerminalGuard;
use quotepop::ui::render;

#[derive(Parser, Debug)]
#[command(name = "quotepop", version, about = "Auto-dismissing quotation popups in your terminal")]
struct Cli {
    /// Route path, optionally with a query, e.g. `/chen` or `/poems?debug`
    #[arg(default_value = "/")]
    path: String,

    /// Show the debug control panel instead of the welcome dialog
    #[arg(long)]
    debug: bool,

    /// Extra config file layered over the defaults
    #[arg(short, long)]
    config: Option<String>,

    /// Override how long each popup stays visible
    #[arg(long)]
    lifetime_ms: Option<u64>,

    /// Override the auto-spawn period
    #[arg(long)]
    spawn_interval_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(ms) = cli.lifetime_ms {
        settings.lifetime_ms = ms;
    }
    if let Some(ms) = cli.spawn_interval_ms {
        settings.spawn_interval_ms = ms;
    }
    settings.validate()?;

    init_logging(&settings)?;
    info!("starting quotepop with {:?}", settings);

    let registry = build_registry(&settings)?;
    let mut selection = RouteSelection::parse(&cli.path, &registry);
    selection.debug |= cli.debug;

    let (spawn_tx, spawn_rx) = mpsc::unbounded_channel();
    let mut app = App::new(&settings, registry, selection, spawn_tx);

    // Restores the terminal on every exit path, including failed setup.
    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = run(&mut terminal, &mut app, spawn_rx, &settings).await;
    drop(terminal);
    drop(guard);

    if let Err(e) = &result {
        error!("exited with error: {e:#}");
    }
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut spawn_rx: mpsc::UnboundedReceiver<quotepop::driver::SpawnTick>,
    settings: &Settings,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut frame = tokio::time::interval(settings.progress_poll());
    frame.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    while app.is_running() {
        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        handle_key(app, key, Instant::now());
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
            Some(tick) = spawn_rx.recv() => {
                app.on_spawn_tick(tick, Instant::now());
            }
            _ = frame.tick() => {}
        }

        let now = Instant::now();
        app.tick(now);
        terminal.draw(|f| render(f, app, now))?;
    }
    Ok(())
}

fn init_logging(settings: &Settings) -> Result<()> {
    // Truncate on each run
    let log_file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(settings.log_path())
        .with_context(|| format!("opening log file {}", settings.log_file))?;

    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&settings.log_level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.target(env_logger::Target::Pipe(Box::new(log_file))).init();
    Ok(())
}
