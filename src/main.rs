use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{self, disable_raw_mode, enable_raw_mode},
};
use std::io::{self, Write};
use tokio::sync::mpsc;
use tracing::{debug, info};

use cascade_menu::{
    config::{get_config_path, Config},
    logging, utils, App, HotkeyBridge, HotkeyRegistry,
};

/// Keyboard-driven cascading menus
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to the temp dir (cascade-menu-debug.log)
    #[arg(short, long)]
    debug: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Global hotkey, overrides the config (e.g. "Ctrl+Alt+M")
    #[arg(long)]
    hotkey: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        logging::init_debug_logging(&utils::get_debug_log_path())?;
        debug!("Debug mode enabled");
    }

    let config_path = get_config_path(args.config)?;
    info!("Loading config from: {:?}", config_path);
    let mut config = Config::load(&config_path)?;

    if args.hotkey.is_some() {
        config.hotkey = args.hotkey;
    }

    let (screen_width, _) = terminal::size().unwrap_or((80, 24));
    let mut app = App::new(config, Some(config_path), screen_width);

    let (mut bridge, hotkey_rx) = HotkeyBridge::new(HotkeyRegistry::new());
    if app.register_hotkey(&mut bridge) {
        if let Some(key) = bridge.registered() {
            println!("Hotkey: {}", key);
        }
    }

    enable_raw_mode()?;
    let result = run_app(&mut app, bridge, hotkey_rx).await;
    disable_raw_mode()?;

    result
}

/// Read terminal events on a blocking thread
///
/// Hotkey presses are consumed by the bridge; every other key press is
/// forwarded to the event loop.
fn spawn_input_thread(
    bridge: HotkeyBridge<HotkeyRegistry>,
    key_tx: mpsc::UnboundedSender<Event>,
) {
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if bridge.dispatch(&key) {
                    continue;
                }
                if key_tx.send(Event::Key(key)).is_err() {
                    break;
                }
            }
            Ok(ev @ Event::Resize(..)) => {
                if key_tx.send(ev).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                debug!("input thread stopped: {}", e);
                break;
            }
        }
    });
}

async fn run_app(
    app: &mut App,
    bridge: HotkeyBridge<HotkeyRegistry>,
    mut hotkey_rx: mpsc::UnboundedReceiver<()>,
) -> Result<()> {
    let (key_tx, mut key_rx) = mpsc::unbounded_channel();
    spawn_input_thread(bridge, key_tx);

    print_line("Arrows/Home/End navigate, Enter opens, Tab switches menu, Esc closes")?;

    loop {
        let events = tokio::select! {
            Some(event) = key_rx.recv() => match event {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(width, _) => {
                    app.set_screen_width(width);
                    Vec::new()
                }
                _ => Vec::new(),
            },
            Some(()) = hotkey_rx.recv() => app.hotkey_activated(),
            else => break,
        };

        for event in &events {
            print_line(&app.describe(event))?;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn print_line(line: &str) -> Result<()> {
    let mut stdout = io::stdout();
    // Raw mode: no implicit carriage return
    write!(stdout, "{}\r\n", line)?;
    stdout.flush()?;
    Ok(())
}
