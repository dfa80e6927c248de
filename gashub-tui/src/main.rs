use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use gashub_core::currency::HttpRateSource;
use gashub_core::{AppConfig, Translations};
use gashub_tui::worker::{self, WorkerCommand};
use gashub_tui::{input, logging, persistence, ui, AppContext};

/// `GASHUB_CONFIG`, else `<config dir>/gashub/config.toml`.
fn config_path() -> PathBuf {
    std::env::var_os("GASHUB_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("gashub")
                .join("config.toml")
        })
}

fn main() -> Result<()> {
    let config_path = config_path();
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    let _log_guard = logging::init(&config.logging)?;

    // Restore the terminal before printing a panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let state_path = persistence::default_path();
    let preferences = persistence::load(&state_path);
    let translations = Translations::load(config.i18n.dir.as_deref());

    let source = HttpRateSource::new(config.rates.endpoint.clone(), config.rate_timeout())
        .context("building exchange-rate client")?;
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle =
        worker::spawn_worker(cmd_rx, resp_tx, Box::new(source)).context("spawning rate worker")?;

    let mut app = AppContext::new(
        config,
        translations,
        preferences,
        cmd_tx.clone(),
        resp_rx,
        Local::now().date_naive(),
        Some(state_path),
    );

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    app.persist();
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("exiting");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppContext) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_worker_response(resp);
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }
        app.tick(Instant::now());

        if !app.running {
            break;
        }
    }
    Ok(())
}
