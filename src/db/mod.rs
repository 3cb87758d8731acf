//! Database layer for the spent application.
//!
//! SQLite-backed storage used when a database target is configured through
//! the environment. The layer stays deliberately thin: one table, one
//! connection per logical operation, no state shared across calls.

/// Connection management and target selection.
pub mod db;

/// Expense table operations.
pub mod expenses;
