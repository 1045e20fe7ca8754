//! `Rollcall` - terminal signup client for school activities.
//!
//! This crate provides a TUI over the school activities service,
//! letting students browse the roster and manage signups from a terminal.


// Re-export public modules for use in integration tests and as a library
pub mod activities;
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod services;
pub mod types;
pub mod ui;
