//! # Spent - Personal Expense Tracking
//!
//! A command-line utility for recording expenses, querying them, and
//! reconciling them against an email inbox.
//!
//! ## Features
//!
//! - **Dual-Backend Ledger**: SQLite storage when a database is configured,
//!   a plain text file otherwise
//! - **Expense Management**: Add, list, update, and delete expenses
//! - **Summaries**: Totals over the whole ledger or a single calendar month
//! - **Inbox Synchronization**: Import expenses from Gmail reservation emails
//! - **Recurring Sync**: A drift-tolerant scheduler that keeps the inbox
//!   reconciled even across host suspends
//!
//! ## Usage
//!
//! ```rust,no_run
//! use spent::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
