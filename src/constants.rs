//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Activities service constants.
pub mod api {
    /// Default base URL for the activities service.
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
}

/// Transient notice lifetimes, in milliseconds.
pub mod notice {
    /// How long signup and roster notices stay on screen.
    pub const SIGNUP_TTL_MS: u64 = 5000;

    /// How long participant-removal notices stay on screen.
    pub const REMOVAL_TTL_MS: u64 = 4000;
}

/// Fuzzy filter constants.
pub mod filter {
    /// Minimum fuzzy match score for an activity to stay visible.
    pub const MIN_SCORE: i64 = 50;
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 10;
}

/// UI layout constants.
pub mod ui {
    /// Default spacing percentage for split panes.
    pub const DEFAULT_SPLIT_PERCENT: u16 = 50;

    /// Width of the activity name column in the browse list.
    pub const NAME_COLUMN_WIDTH: usize = 28;
}
