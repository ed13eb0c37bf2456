mod app;
mod bootstrap;
mod cli;
mod config;
mod journals;
mod logging;
mod presenter;
mod remote;
mod runtime;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::TimerConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use remote::{DevStore, RemoteStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::from_filename(".env.journal-timer").ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::ConfigPath => {
            let path = TimerConfig::config_path()?;
            if !path.exists() {
                TimerConfig::default().save()?;
            }
            println!("{}", path.display());
            Ok(())
        }
        Commands::Run => {
            let config = TimerConfig::load()?;
            logging::init(&TimerConfig::log_path()?)?;
            let (journals, store) = bootstrap::sheets_backend(&config)?;
            let mut app = App::new(journals, config.semesters.clone());
            run_tui(&mut app, store).await
        }
        Commands::Dev { latency_ms, fail } => {
            let config = TimerConfig::load()?;
            logging::init(&TimerConfig::log_path()?)?;
            let store = bootstrap::dev_backend(Duration::from_millis(latency_ms), fail);
            let mut app = App::new(DevStore::journals(), config.semesters.clone());
            run_tui(&mut app, Arc::new(store.clone())).await?;

            for line in bootstrap::dev_submission_report(&store) {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

async fn run_tui(app: &mut App, store: Arc<dyn RemoteStore>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, app, store).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = ?err, "journal-timer exited with an error");
    }
    res
}
