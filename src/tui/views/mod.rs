//! TUI Views module
//!
//! The lock screen, the monthly summary, the status bar and the modal
//! overlays.

pub mod lock;
pub mod modal;
pub mod status_bar;
pub mod summary;

use ratatui::Frame;

use super::app::App;
use super::layout::AppLayout;
use super::state::Screen;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    if app.state.screen == Screen::Locked {
        lock::render(frame, app);
        return;
    }

    let layout = AppLayout::new(frame.area());
    summary::render(frame, app, layout.main);
    status_bar::render(frame, app, layout.status_bar);

    if app.state.has_modal() {
        modal::render(frame, &app.state.modal);
    }
}
