use quizboss::app::App;
use quizboss::bank::QuestionBank;
use quizboss::config::persistence::FileProgressStore;
use quizboss::config::GameConfig;
use quizboss::error::{is_fatal, user_friendly_message};
use quizboss::quiz::Game;
use quizboss::{QuizError, Result, APP_NAME, LOG_FILE};
use std::fs::{self, OpenOptions};
use std::process;

/// Send logs to a file; the terminal belongs to the TUI
fn init_logging() -> Result<()> {
    let log_dir = dirs::data_dir()
        .ok_or_else(|| QuizError::ConfigError("Unable to determine data directory".to_string()))?
        .join(APP_NAME);
    fs::create_dir_all(&log_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

async fn run() -> Result<()> {
    let config = GameConfig::load()?;
    let bank = QuestionBank::load(&config)?;
    let store = FileProgressStore::new()?;
    log::info!("Progress file: {}", store.path().display());

    let mut app = App::new(Game::new(config, bank, store))?;
    app.init()?;
    let result = app.run().await;
    app.restore()?;
    result
}

#[tokio::main]
async fn main() {
    if let Err(err) = init_logging() {
        eprintln!("Logging disabled: {}", err);
    }
    log::info!("{} {} starting", APP_NAME, env!("CARGO_PKG_VERSION"));

    if let Err(err) = run().await {
        if is_fatal(&err) {
            log::error!("Fatal: {}", err);
        } else {
            log::error!("{}", err);
        }
        eprintln!("{}", user_friendly_message(&err));
        process::exit(1);
    }
    log::info!("Goodbye");
}
