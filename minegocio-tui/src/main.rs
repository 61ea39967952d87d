//! MiNegocio clientes TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use minegocio_tui::api_client::RestClient;
use minegocio_tui::app::App;
use minegocio_tui::config::TuiConfig;
use minegocio_tui::error::TuiError;
use minegocio_tui::events::TuiEvent;
use minegocio_tui::logging;
use minegocio_tui::persistence;
use minegocio_tui::runtime::Runtime;
use minegocio_tui::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    logging::init(&config)?;
    tracing::info!(api_base_url = %config.api_base_url, "starting");

    let api = RestClient::new(&config)?;
    let mut app = App::new(config);
    match persistence::load(&app.config.persistence_path) {
        Ok(Some(state)) => app.restore(&state),
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "ignoring persisted state"),
    }

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    let runtime = Runtime::new(Arc::new(api), event_tx.clone());

    spawn_input_reader(event_tx.clone());
    app.startup_search();
    runtime.dispatch(&mut app.state);

    let mut ticker = tokio::time::interval(app.config.tick_rate());

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        let quit = tokio::select! {
            _ = ticker.tick() => app.handle_event(TuiEvent::Tick),
            Some(event) = event_rx.recv() => app.handle_event(event),
        };
        runtime.dispatch(&mut app.state);
        if quit {
            break;
        }
    }

    if let Err(err) = persistence::save(&app.config.persistence_path, &app.snapshot()) {
        tracing::warn!(error = %err, "failed to persist UI state");
    }
    tracing::info!("exiting");

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let event = match evt {
                    CrosstermEvent::Key(key) => TuiEvent::Input(key),
                    CrosstermEvent::Resize(width, height) => TuiEvent::Resize { width, height },
                    _ => continue,
                };
                if sender.blocking_send(event).is_err() {
                    break;
                }
            }
        }
    });
}
