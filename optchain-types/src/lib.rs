//! optchain-specific error taxonomy and configuration primitives shared by every crate.
#![warn(missing_docs)]

mod config;
mod error;

pub use config::SelectionConfig;
pub use error::ChainError;
