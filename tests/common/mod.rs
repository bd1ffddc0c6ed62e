//! Shared test utilities for atrium integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

#![allow(dead_code)]

pub mod builders;
pub mod fake_users_api;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
