//! placedeck-tui: Terminal UI for the placedeck places panel
//!
//! This crate provides the TUI layer for placedeck, including:
//! - The shell layout (transcript + places panel)
//! - Panel rendering of card/detail fragments with mouse hit regions
//! - The result feed bridging agent output into the app
//! - The manual panel toggle and keyboard navigation

mod app;
mod event;
pub mod feed;
mod hit;
mod layout;
mod panel;
mod surface;
#[cfg(test)]
pub mod test_utils;
mod theme;
mod transcript;

pub use app::{App, IntentLog};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use hit::{HitMap, Node};
pub use layout::{compute_areas, render_shell, ShellAreas};
pub use placedeck_core;
pub use surface::TuiSurface;
pub use theme::{Icons, Theme};
pub use transcript::{Message, Role};

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::path::PathBuf;

use placedeck_core::Config;

/// How the feed is sourced.
#[derive(Debug, Clone)]
pub enum FeedSource {
    /// No feed; the panel stays empty until toggled.
    None,
    /// Play a JSONL script file.
    Script(PathBuf),
    /// Play the bundled demo conversation.
    Demo,
}

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(
    config: Config,
    source: FeedSource,
    assets_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and feed
    let mut app = App::new(config, assets_dir);
    let (feed_tx, mut feed_rx) = tokio::sync::mpsc::unbounded_channel();
    let feed_handle = match source {
        FeedSource::None => None,
        FeedSource::Script(path) => Some(feed::spawn_script(path, feed_tx)),
        FeedSource::Demo => Some(feed::spawn_demo(feed_tx)),
    };

    // Create event handler (4 Hz tick rate = 250ms)
    let mut events = EventHandler::new(250);

    // Main loop
    let result = run_loop(&mut terminal, &mut app, &mut events, &mut feed_rx).await;

    if let Some(handle) = feed_handle {
        handle.abort();
    }

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    feed_rx: &mut tokio::sync::mpsc::UnboundedReceiver<feed::FeedEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Draw
        terminal.draw(|frame| render_shell(frame, app))?;

        // Drain any pending feed events (non-blocking)
        while let Ok(feed_event) = feed_rx.try_recv() {
            app.on_feed_event(feed_event);
        }

        // Handle events
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    let action = event::key_to_action(key);
                    app.handle_action(action);
                }
                Event::Mouse(mouse) => {
                    use crossterm::event::{MouseButton, MouseEventKind};
                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            app.click_at(mouse.column, mouse.row);
                        }
                        MouseEventKind::ScrollUp => {
                            app.handle_action(Action::Up);
                        }
                        MouseEventKind::ScrollDown => {
                            app.handle_action(Action::Down);
                        }
                        _ => {}
                    }
                }
                Event::Tick => {
                    app.tick();
                }
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
