//! Viewport tracking
//!
//! The terminal size is published through a [`ViewportWatcher`]. Views hold a
//! [`ViewportSubscription`] for as long as they are mounted; dropping it
//! deregisters the view.

use crate::consts::cli_consts::layout::{COMPACT_BREAKPOINT_PX, FALLBACK_CELL_WIDTH_PX};
use log::debug;
use tokio::sync::watch;

/// Size of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width_px: u32,
    pub columns: u16,
    pub rows: u16,
}

impl Viewport {
    /// Build a viewport from a terminal size. `pixel_width` is what the
    /// terminal reports, or 0 when it does not know.
    pub fn from_terminal(columns: u16, rows: u16, pixel_width: u16) -> Self {
        let width_px = if pixel_width > 0 {
            u32::from(pixel_width)
        } else {
            u32::from(columns) * FALLBACK_CELL_WIDTH_PX
        };
        Self {
            width_px,
            columns,
            rows,
        }
    }

    /// Query the current terminal.
    pub fn detect() -> std::io::Result<Self> {
        let size = crossterm::terminal::window_size()?;
        Ok(Self::from_terminal(size.columns, size.rows, size.width))
    }

    /// Below the breakpoint the dashboard uses its compact layout.
    pub fn is_compact(&self) -> bool {
        self.width_px < COMPACT_BREAKPOINT_PX
    }
}

/// Publishes viewport changes to subscribed views.
#[derive(Debug)]
pub struct ViewportWatcher {
    sender: watch::Sender<Viewport>,
}

impl ViewportWatcher {
    pub fn new(initial: Viewport) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    #[cfg(test)]
    pub fn current(&self) -> Viewport {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> ViewportSubscription {
        ViewportSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Replace the current viewport and notify subscribers if it changed.
    pub fn publish(&self, viewport: Viewport) {
        self.sender.send_if_modified(|current| {
            if *current == viewport {
                false
            } else {
                *current = viewport;
                true
            }
        });
    }

    /// Handle a terminal resize notification.
    pub fn notify_resize(&self, columns: u16, rows: u16) {
        // Pixel size is only known by asking the terminal again.
        let pixel_width = crossterm::terminal::window_size()
            .map(|size| size.width)
            .unwrap_or(0);
        let viewport = Viewport::from_terminal(columns, rows, pixel_width);
        debug!(
            "Viewport resized to {}x{} ({} px)",
            columns, rows, viewport.width_px
        );
        self.publish(viewport);
    }
}

/// A view's registration with the [`ViewportWatcher`].
#[derive(Debug)]
pub struct ViewportSubscription {
    receiver: watch::Receiver<Viewport>,
}

impl ViewportSubscription {
    /// Latest viewport; marks it as seen.
    pub fn latest(&mut self) -> Viewport {
        *self.receiver.borrow_and_update()
    }

    /// Whether a viewport was published since the last [`latest`](Self::latest).
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    #[cfg(test)]
    pub fn unsubscribe(self) {
        drop(self);
    }
}
