use async_trait::async_trait;

use crate::ChainError;
use crate::types::Chain;

/// A market-data provider able to return the full option chain of a symbol.
///
/// Implementations return every listed expiration in one [`Chain`] and declare
/// which columns they populate. Transport failures are returned as
/// [`ChainError`]; connectors do not retry.
#[async_trait]
pub trait ChainConnector: Send + Sync {
    /// Stable connector name used in error tags and logs.
    fn name(&self) -> &'static str;

    /// Fetch the option chain for `symbol` across all expirations.
    async fn option_chain(&self, symbol: &str) -> Result<Chain, ChainError>;
}
