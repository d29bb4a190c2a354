//! manual-sitemap: a chapter navigator and full-text filter for markdown manuals.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use manual_sitemap::formats::Format;
use manual_sitemap::{app_state, config, formats, input, ui};
use ratatui::crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Frame interval of the event loop; queued view changes are applied once per frame.
const TICK: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "manual-sitemap")]
#[command(about = "Chapter navigation and full-text filtering for markdown manuals", long_about = None)]
struct Args {
    /// Files or directories holding the manual, in reading order
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Chapter reference to open first
    #[arg(long, short = 'c', value_name = "REF")]
    chapter: Option<String>,

    /// Print the chapter index as JSON instead of starting the reader
    #[arg(long)]
    dump: bool,

    /// Write log output to this file while the reader runs
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    if let Some(path) = &args.log_file {
        cfg.log_file = path.to_string_lossy().into_owned();
    }

    let _guard = init_tracing(&cfg, args.dump)?;

    let format = formats::markdown::MarkdownFormat;
    if cfg.file_extensions.is_empty() {
        cfg.file_extensions.push(format.file_extension().to_string());
    }

    let documents = input::find_documents(args.paths, &cfg.file_extensions)?;
    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    let tree = input::load_tree(&documents, &format)?;
    info!(
        files = documents.len(),
        sections = tree.sections.len(),
        "manual loaded"
    );

    let mut app = app_state::AppState::new(tree, &cfg);
    if app.manual.sitemap().is_empty() {
        warn!("manual has no navigation section, chapters are not indexed");
    }

    if args.dump {
        let json = serde_json::to_string_pretty(app.manual.sitemap()).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    let reference = args.chapter.as_deref().unwrap_or("::first");
    app.navigate(reference);
    app.manual.flush(&mut app.view, Instant::now());

    run_tui(app)
}

/// Logs to stderr for `--dump`, to the configured file for the reader, and nowhere otherwise,
/// since the reader owns the terminal.
fn init_tracing(cfg: &config::Config, dump: bool) -> io::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if dump {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
        return Ok(None);
    }
    if cfg.log_file.is_empty() {
        return Ok(None);
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cfg.log_file)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn run_tui(mut app: app_state::AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
) -> io::Result<()> {
    loop {
        app.pump(Instant::now());
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key, Instant::now()) == app_state::Control::Quit {
                return Ok(());
            }
        }
    }
}
