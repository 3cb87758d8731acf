//! API clients for external service integration.
//!
//! - **Auth**: Google OAuth token caching, refresh, and the loopback
//!   consent flow
//! - **Gmail**: inbox search, expense extraction, and synced-message labeling

pub mod auth;
pub mod gmail;

pub use gmail::GmailConfig;
