//! Service modules for extracted functionality.
//!
//! This module contains service abstractions extracted from the main App struct
//! to improve modularity and testability.

pub mod roster;
pub mod signup;
