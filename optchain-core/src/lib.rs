//! optchain-core
//!
//! Core types, traits, and selection logic shared across the optchain workspace.
//!
//! - `types`: contract rows, chains, and option kinds.
//! - `connector`: the `ChainConnector` trait implemented by providers.
//! - `select`: expiration resolution and strike selection around the underlying.
//! - `table`: the column model and plain-text table rendering.
//!
//! Prices are `rust_decimal::Decimal`, so the at-the-money test (strike equal to
//! the underlying price) is an exact comparison.
#![warn(missing_docs)]

/// The `ChainConnector` trait implemented by market-data providers.
pub mod connector;
/// Expiration resolution and strike selection.
pub mod select;
/// Column model and table rendering.
pub mod table;
pub mod types;

pub use connector::ChainConnector;
pub use select::{Resolution, StrikeWindow, resolve_expirations, select_expiration, select_strikes};
pub use table::{Column, DROPPED_COLUMNS, Table, display_columns};
pub use types::*;
