//! Activities service integration.
//!
//! Provides the HTTP client for the school activities service, covering the
//! roster listing, signup, and participant removal endpoints.

/// API client for activities service requests
pub mod api;
/// Data types representing service activities
pub mod types;

// Re-export key components
pub use api::ActivitiesClient;
pub use types::Activity;
