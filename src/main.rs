use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use statusboard::app::{snapshot_json, write_export};
use statusboard::ui::{self, ScreenLayout, Theme};
use statusboard::{events, fetch_once, logging, App, HttpFetcher, ResolvedSettings, Settings};

#[derive(Parser, Debug)]
#[command(name = "statusboard")]
#[command(about = "Terminal dashboard polling agent status and bus messages over HTTP")]
struct Args {
    /// Origin the endpoints are served from (defaults to http://127.0.0.1:8000)
    #[arg(short, long)]
    origin: Option<String>,

    /// Polling period (e.g., "2000ms", "5s")
    #[arg(short, long)]
    interval: Option<String>,

    /// Per-request timeout (e.g., "10s")
    #[arg(short, long)]
    timeout: Option<String>,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write diagnostic logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch both endpoints once, write them to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        logging::init_logging(path)?;
    }

    let settings = Settings::load(args.config.as_deref())?
        .with_overrides(args.origin, args.interval, args.timeout)
        .resolve()?;
    tracing::info!(
        base = %settings.base,
        interval = ?settings.interval,
        timeout = ?settings.timeout,
        "Starting statusboard"
    );

    let rt = tokio::runtime::Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return rt.block_on(export_to_file(&settings, &export_path));
    }

    // Subscriptions spawn onto the runtime while the TUI owns the main thread
    let _guard = rt.enter();
    let fetcher = Arc::new(HttpFetcher::new(settings.timeout));
    let app = App::start(&settings, fetcher, Theme::auto_detect());

    run_tui(app)
}

/// Run the TUI until the user quits
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        // Pick up whatever the subscriptions delivered since the last frame
        app.sync();

        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let area = ratatui::layout::Rect::new(0, 0, size.width, size.height);
                    if ui::fits(area) {
                        let layout = ScreenLayout::new(area, app.panels.len());
                        events::handle_mouse_event(app, mouse, &layout);
                    }
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Fetch both endpoints once and write them to a JSON file
async fn export_to_file(settings: &ResolvedSettings, export_path: &Path) -> Result<()> {
    let fetcher = HttpFetcher::new(settings.timeout);

    let (status, messages) = tokio::join!(
        fetch_once(&fetcher, &settings.status),
        fetch_once(&fetcher, &settings.messages),
    );

    let export = snapshot_json([
        (settings.status.path(), status.as_ref()),
        (settings.messages.path(), messages.as_ref()),
    ]);
    write_export(export_path, &export)?;

    println!("Exported state to {}", export_path.display());
    Ok(())
}
