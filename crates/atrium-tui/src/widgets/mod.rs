//! Ratatui widgets for the atrium TUI.

pub mod calendar;
pub mod command_bar;
pub mod data_table;
pub mod faq;
pub mod header;
pub mod help;
pub mod profile_form;
pub mod query_bar;
pub mod sidebar;
pub mod text_input;
