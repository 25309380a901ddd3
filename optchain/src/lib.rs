//! optchain prints the option strikes nearest the underlying price.
//!
//! Overview
//! - Fetches the full chain of a symbol through one `ChainConnector`.
//! - Resolves which expirations to show: an exact DTE, the lowest listed DTE as a
//!   fallback, or the next few expirations at or after a DTE.
//! - Keeps the puts just below and the calls just above the underlying, plus any
//!   strike exactly at it, and prints them as a trimmed text table.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use optchain::{ChainRequest, OptChain};
//! use optchain_yfinance::YfConnector;
//!
//! let app = OptChain::builder()
//!     .with_connector(Arc::new(YfConnector::try_new_default()?))
//!     .build()?;
//! let mut out = std::io::stdout().lock();
//! app.run(&ChainRequest::new("SPX", 0).next_expirations(true), &mut out).await?;
//! ```
#![warn(missing_docs)]

/// Command-line flags and connector selection for the binary.
pub mod cli;
mod core;

pub use crate::core::{ChainRequest, OptChain, OptChainBuilder};
pub use optchain_core::{ChainError, SelectionConfig};
