//! atrium TUI — ratatui application shell.
//!
//! The shell owns every view's state, routes key events to the focused pane
//! and polls the invoice fetch once per tick. Start it with [`run`].

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, AppState, InvoiceSource, View};
pub use theme::Theme;

use atrium_core::config::Config;

/// Run the TUI until the user quits.
pub fn run(config: Config, theme: Theme, invoices: InvoiceSource) -> anyhow::Result<()> {
    tracing::info!(theme = theme.name, "starting tui");
    App::new(config, theme, invoices).run()
}
