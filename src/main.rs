mod action;
mod app;
mod config;
mod diagnostics;
mod error;
mod gateway;
mod github;
mod paginated;
mod parse;
mod session;
mod tui;
mod types;
mod ui;

use std::panic;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::github::GitHub;
use crate::session::Session;
use crate::tui::{Event, EventHandler};

#[derive(Parser, Debug)]
#[command(name = "gazer", version, about = "See who starred and forked a GitHub repository")]
struct Cli {
    /// Username, owner/repo, or github.com URL to open on startup
    query: Option<String>,

    /// GitHub API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Config file to use instead of ~/.config/gazer/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    init_logging(&config);

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let github = GitHub::new(&config)?;

    let result = run(github, cli.query).await;

    tui::restore()?;

    result
}

/// Log to a file while the terminal is in the alternate screen; stderr otherwise.
fn init_logging(config: &Config) {
    let writer = config
        .log_path()
        .and_then(|path| {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).ok()?;
            }
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        })
        .map(|file| BoxMakeWriter::new(Mutex::new(file)))
        .unwrap_or_else(|| BoxMakeWriter::new(std::io::stderr));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();
}

async fn run(github: GitHub, query: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let session = Session::new(
        Arc::new(github),
        action_tx.clone(),
        diagnostics::tracing_hook(),
    );
    let mut state_rx = session.subscribe();
    let mut app = App::new(session, query);

    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(render_rate);

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
            Ok(()) = state_rx.changed() => {
                terminal.draw(|frame| ui::render(frame, &app))?;
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
