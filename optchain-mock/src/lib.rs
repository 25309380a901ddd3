//! Mock connectors for tests and offline demos.
//!
//! - [`MockConnector`] serves deterministic fixture chains (`SPX`, `ACME`, `EMPTY`).
//! - [`DynamicMockConnector`] defers to a controller so tests can script per-symbol results.
use async_trait::async_trait;
use optchain_core::{Chain, ChainConnector, ChainError};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};
pub use fixtures::options::{BASIC_COLUMNS, FULL_COLUMNS};

/// Mock connector for CI-safe runs. Provides deterministic data from static fixtures.
///
/// | symbol  | underlying | DTEs          | notes                               |
/// |---------|------------|---------------|-------------------------------------|
/// | `SPX`   | 5000       | 0, 1, 3, 7    | strikes 4850..=5150 by 10, greeks   |
/// | `ACME`  | 101.25     | 2, 9          | strikes 90..=112 by 1, no greeks    |
/// | `EMPTY` | 42         | none          | empty chain                         |
/// | `FAIL`  |            |               | connector error                     |
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn maybe_fail(symbol: &str) -> Result<(), ChainError> {
        match symbol {
            "FAIL" => Err(ChainError::connector(
                "optchain-mock",
                "forced failure: option_chain",
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ChainConnector for MockConnector {
    fn name(&self) -> &'static str {
        "optchain-mock"
    }

    async fn option_chain(&self, symbol: &str) -> Result<Chain, ChainError> {
        Self::maybe_fail(symbol)?;
        fixtures::options::chain_by_symbol(symbol)
            .ok_or_else(|| ChainError::not_found(format!("option chain for {symbol}")))
    }
}
