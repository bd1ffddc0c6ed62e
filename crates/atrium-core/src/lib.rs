//! atrium-core — shared types and pure logic for the atrium dashboard.
//!
//! # Architecture
//!
//! ```text
//! mock / fetch ──► Record collection ──► FilterableList ──► UI views
//!                                             │
//!                                             └──► highlight() segments
//! ```
//!
//! Nothing in this crate touches the terminal or the network. The only file
//! I/O is [`config::Config::load`], which reads the user config file, and
//! [`export::export_csv`], which writes a view's rows to disk.

pub mod calendar;
pub mod config;
pub mod export;
pub mod filter;
pub mod form;
pub mod types;

pub use filter::{highlight, FilterableList};
pub use types::{FieldValue, Record, Segment};
