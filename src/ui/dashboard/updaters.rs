//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from loader messages,
//! viewport changes and key presses

use super::state::DashboardState;

use crate::events::Event;
use crate::loader::{LoadState, LoaderMessage};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

/// Rows moved by PgUp/PgDn in the holder table.
const HOLDER_PAGE: usize = 10;

impl DashboardState {
    /// Advance the animation tick and pick up viewport changes.
    pub fn update(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        if self.viewport_subscription_mut().has_changed() {
            self.viewport = self.viewport_subscription_mut().latest();
        }
    }

    /// Apply a message from the loader task.
    pub fn apply_message(&mut self, message: LoaderMessage) {
        match message {
            LoaderMessage::Activity(event) => self.add_to_activity_log(event),
            LoaderMessage::Resolved(state) => {
                if !self.load_state.resolve(state) {
                    debug!("Ignoring loader result; dashboard already resolved");
                }
            }
        }
    }

    /// Move the holder table highlight, staying within the list.
    fn scroll_holders(&mut self, delta: isize) {
        let last = self.holder_count().saturating_sub(1);
        self.selected_holder = self.selected_holder.saturating_add_signed(delta).min(last);
    }

    /// Handle a key press. Keys only take effect once stats are loaded.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if !matches!(self.load_state, LoadState::Ready(_)) {
            return;
        }

        let large = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Left => self.range.step(self.active_handle, false, large),
            KeyCode::Right => self.range.step(self.active_handle, true, large),
            KeyCode::Tab | KeyCode::BackTab => {
                self.active_handle = self.active_handle.toggle();
                return;
            }
            KeyCode::Up => return self.scroll_holders(-1),
            KeyCode::Down => return self.scroll_holders(1),
            KeyCode::PageUp => return self.scroll_holders(-(HOLDER_PAGE as isize)),
            KeyCode::PageDown => return self.scroll_holders(HOLDER_PAGE as isize),
            KeyCode::Char('r') | KeyCode::Char('R') => self.range.reset(),
            _ => return,
        }

        let event = Event::dashboard(format!(
            "Date range set to {:.0}% - {:.0}%",
            self.range.start(),
            self.range.end()
        ));
        event.log();
        self.add_to_activity_log(event);
    }
}
