//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::layout::TICK_MS;
use crate::loader::LoaderMessage;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::viewport::ViewportWatcher;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Terminal, backend::Backend};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub source_name: String,
}

impl UIConfig {
    pub fn new(with_background_color: bool, source_name: String) -> Self {
        Self {
            with_background_color,
            source_name,
        }
    }
}

/// Application state
#[derive(Debug)]
pub struct App {
    /// The dashboard being displayed.
    state: DashboardState,

    /// Receives activity and the final result from the loader task.
    loader_receiver: mpsc::Receiver<LoaderMessage>,

    /// Broadcasts shutdown signal to the loader task.
    shutdown_sender: broadcast::Sender<()>,

    /// Publishes terminal resizes to the dashboard.
    viewport_watcher: ViewportWatcher,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        loader_receiver: mpsc::Receiver<LoaderMessage>,
        shutdown_sender: broadcast::Sender<()>,
        viewport_watcher: ViewportWatcher,
        ui_config: UIConfig,
    ) -> Self {
        let state = DashboardState::new(viewport_watcher.subscribe(), ui_config);
        Self {
            state,
            loader_receiver,
            shutdown_sender,
            viewport_watcher,
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the dashboard.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    loop {
        // Drain everything the loader has sent since the last frame
        while let Ok(message) = app.loader_receiver.try_recv() {
            app.state.apply_message(message);
        }

        app.state.update();
        terminal.draw(|f| render_dashboard(f, &app.state))?;

        if event::poll(Duration::from_millis(TICK_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    // Skip events that are not KeyEventKind::Press
                    if key.kind == event::KeyEventKind::Release {
                        continue;
                    }

                    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                        // Stop the loader before tearing down the dashboard
                        let _ = app.shutdown_sender.send(());
                        return Ok(());
                    }

                    app.state.handle_key(key);
                }
                Event::Resize(columns, rows) => {
                    app.viewport_watcher.notify_resize(columns, rows);
                }
                _ => {}
            }
        }
    }
}
