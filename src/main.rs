// src/main.rs

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::{stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

mod app;
mod core;
mod logging;
mod ui;

use crate::app::{App, AppEvent};
use crate::core::chat::{self, ChatTransport, ChatWidget};
use crate::core::client::HttpChatClient;
use crate::core::config::Config;
use crate::core::results::{self, ResultsContainer};

#[derive(Parser)]
#[command(name = "truthguard", version)]
#[command(about = "Terminal client for the TruthGuard misinformation analysis service")]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Root URL of the TruthGuard server
    #[arg(long, env = "TRUTHGUARD_BASE_URL", global = true)]
    base_url: Option<Url>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive terminal UI (default)
    Tui {
        /// Analysis payload (JSON) to show on start
        #[arg(short, long)]
        result: Option<PathBuf>,
    },
    /// Render an analysis payload to an HTML result card
    Render {
        /// Analysis payload (JSON)
        payload: PathBuf,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Send one message to the assistant and print its reply
    Chat {
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let log_path = logging::initialize_logging()?;
    info!(log = %log_path.display(), "TruthGuard client starting.");

    let config = Config::load(cli.config.as_deref())?.with_base_url(cli.base_url);

    match cli.command.unwrap_or(Commands::Tui { result: None }) {
        Commands::Tui { result } => run_tui(config, result).await,
        Commands::Render { payload, output } => render_payload(&payload, output.as_deref()).await,
        Commands::Chat { message } => chat_once(&config, &message).await,
    }
}

async fn render_payload(payload: &Path, output: Option<&Path>) -> Result<()> {
    let result = results::load_analysis_file(payload)
        .await
        .wrap_err_with(|| format!("rendering {}", payload.display()))?;

    let mut container = ResultsContainer::default();
    results::display_results(Some(&mut container), &result);

    match output {
        Some(path) => std::fs::write(path, container.html())?,
        None => stdout().write_all(container.html().as_bytes())?,
    }
    Ok(())
}

/// Runs a single exchange through the chat controller and prints the bot's last word.
async fn chat_once(config: &Config, message: &str) -> Result<()> {
    let client = HttpChatClient::new(config)?;
    info!(endpoint = %client.endpoint(), "Sending one-shot chat message.");
    let mut widget = ChatWidget::new();
    widget.input_mut().set(message);

    let Some(submission) = widget.submit() else {
        warn!("Empty message, nothing sent.");
        return Ok(());
    };
    let outcome = client.send(&submission.message).await;
    widget.resolve(chat::ChatEvent { id: submission.id, outcome });

    let reply = widget
        .messages()
        .last()
        .ok_or_else(|| eyre!("chat log is empty after a reply"))?;
    println!("{}", reply.text);
    Ok(())
}

async fn run_tui(config: Config, result: Option<PathBuf>) -> Result<()> {
    let client = Arc::new(HttpChatClient::new(&config)?);
    let mut app = App::new(config.base_url.clone(), result, logging::get_data_dir());
    let (tx, mut rx) = mpsc::channel::<AppEvent>(32);

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    spawn_load(&mut app, &tx);
    let outcome = event_loop(&mut terminal, &mut app, &client, &tx, &mut rx).await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    outcome
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &Arc<HttpChatClient>,
    tx: &mpsc::Sender<AppEvent>,
    rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(app, client, tx)?;
        }

        while let Ok(event) = rx.try_recv() {
            app.apply(event);
        }
        app.on_tick();
    }
    info!("TruthGuard client exiting.");
    Ok(())
}

/// Reads the payload file on a background task, if the app has one.
fn spawn_load(app: &mut App, tx: &mpsc::Sender<AppEvent>) -> Option<JoinHandle<()>> {
    let path = app.begin_load()?;
    let tx = tx.clone();
    Some(tokio::spawn(async move {
        let loaded = results::load_analysis_file(&path).await;
        if tx.send(AppEvent::ResultLoaded(loaded)).await.is_err() {
            debug!("UI loop gone, dropping loaded payload.");
        }
    }))
}

fn handle_events(app: &mut App, client: &Arc<HttpChatClient>, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            if app.chat.is_open() {
                handle_chat_input(app, key.code, client, tx);
            } else {
                handle_main_input(app, key.code, tx);
            }
        }
    }
    Ok(())
}

/// Keys while the chat panel has focus.
fn handle_chat_input(
    app: &mut App,
    key_code: KeyCode,
    client: &Arc<HttpChatClient>,
    tx: &mpsc::Sender<AppEvent>,
) {
    match key_code {
        KeyCode::Esc => app.chat.close_panel(),
        KeyCode::F(1) => app.chat.open_panel(),
        KeyCode::F(2) => app.chat.input_mut().toggle_visibility(),
        KeyCode::Char(c) => app.chat.input_mut().push(c),
        KeyCode::Backspace => app.chat.input_mut().pop(),
        KeyCode::PageUp => app.chat.scroll_up(),
        KeyCode::PageDown => app.chat.scroll_down(),
        KeyCode::Enter => {
            if let Some(submission) = app.chat.submit() {
                chat::spawn_exchange(Arc::clone(client), submission, tx.clone());
            }
        }
        _ => {}
    }
}

/// Keys while the results view has focus.
fn handle_main_input(app: &mut App, key_code: KeyCode, tx: &mpsc::Sender<AppEvent>) {
    app.notice = None;
    match key_code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') | KeyCode::F(1) => app.chat.open_panel(),
        KeyCode::Char('r') => {
            spawn_load(app, tx);
        }
        KeyCode::Char('y') => app.copy_detail_link(),
        KeyCode::Char('e') => app.export_html(),
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn load_finishes_quietly_when_ui_loop_is_gone() {
        let dir = tempfile::tempdir().unwrap();
        let mut payload = tempfile::NamedTempFile::new_in(dir.path()).unwrap();
        write!(payload, r#"{{"analysis_id": 1, "short_report": "ok"}}"#).unwrap();

        let mut app = App::new(
            Url::parse("http://127.0.0.1:5000/").unwrap(),
            Some(payload.path().to_path_buf()),
            dir.path().to_path_buf(),
        );
        let (tx, rx) = mpsc::channel::<AppEvent>(1);
        drop(rx);

        let handle = spawn_load(&mut app, &tx).unwrap();
        handle.await.unwrap();
        assert!(app.loading.is_visible());
    }

    #[test]
    fn nothing_to_load_without_a_source() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();
        let mut app = App::new(Url::parse("http://127.0.0.1:5000/").unwrap(), None, PathBuf::from("."));
        let (tx, _rx) = mpsc::channel::<AppEvent>(1);
        assert!(spawn_load(&mut app, &tx).is_none());
    }
}
