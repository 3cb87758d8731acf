//! Core library modules for the spent application.
//!
//! - **Ledger core**: the dual-backend service (`ledger`), the text store
//!   (`csv`), and the expense model (`expense`)
//! - **Scheduling**: the drift-tolerant recurring runner (`scheduler`)
//! - **Infrastructure**: configuration, data directory resolution,
//!   messaging, and table rendering

pub mod config;
pub mod csv;
pub mod data_storage;
pub mod expense;
pub mod ledger;
pub mod messages;
pub mod scheduler;
pub mod view;
