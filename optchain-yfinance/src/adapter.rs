#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;

use optchain_core::{ChainError, Decimal};
use yfinance_rs as yf;

/// Last price of an underlying; stubbed in tests.
#[async_trait]
pub trait YfQuotes: Send + Sync {
    /// Last price of `symbol`, or `None` when Yahoo reports none.
    async fn price(&self, symbol: &str) -> Result<Option<Decimal>, ChainError>;
}

/// Listed expirations and per-expiration chains; stubbed in tests.
#[async_trait]
pub trait YfOptions: Send + Sync {
    /// Listed expirations as unix seconds.
    async fn expirations(&self, symbol: &str) -> Result<Vec<i64>, ChainError>;
    /// Calls and puts of one expiration.
    async fn chain(&self, symbol: &str, date: i64)
    -> Result<yf::ticker::OptionChain, ChainError>;
}

/// Production adapter over a shared `YfClient`.
#[derive(Clone)]
pub struct RealAdapter {
    client: yf::YfClient,
}

impl RealAdapter {
    /// Build a cookie-enabled client with a browser user agent.
    ///
    /// # Errors
    /// Returns a connector error when either HTTP client cannot be built.
    pub fn try_new() -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .no_proxy()
            .build()
            .map_err(|e| ChainError::connector("optchain-yfinance", e.to_string()))?;
        let client = yf::YfClient::builder()
            .custom_client(http)
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|e| map_yf_err(&e, "client setup"))?;
        Ok(Self { client })
    }
}

fn map_yf_err(e: &yf::YfError, context: &str) -> ChainError {
    let msg = match e {
        yf::YfError::NotFound { .. } => return ChainError::not_found(context.to_string()),
        yf::YfError::RateLimited { .. } => format!("rate limit: {context}"),
        yf::YfError::ServerError { status, .. } => format!("server error {status}: {context}"),
        yf::YfError::Status { status, .. } => format!("status {status}: {context}"),
        other => other.to_string(),
    };
    ChainError::connector("optchain-yfinance", msg)
}

#[async_trait]
impl YfQuotes for RealAdapter {
    async fn price(&self, symbol: &str) -> Result<Option<Decimal>, ChainError> {
        let quotes = yf::quote::quotes(&self.client, [symbol.to_string()])
            .await
            .map_err(|e| map_yf_err(&e, &format!("quote for {symbol}")))?;
        Ok(quotes
            .into_iter()
            .find_map(|q| q.price.as_ref().map(|m| m.amount())))
    }
}

#[async_trait]
impl YfOptions for RealAdapter {
    async fn expirations(&self, symbol: &str) -> Result<Vec<i64>, ChainError> {
        yf::ticker::Ticker::new(&self.client, symbol.to_string())
            .options()
            .await
            .map_err(|e| map_yf_err(&e, &format!("expirations for {symbol}")))
    }

    async fn chain(
        &self,
        symbol: &str,
        date: i64,
    ) -> Result<yf::ticker::OptionChain, ChainError> {
        yf::ticker::Ticker::new(&self.client, symbol.to_string())
            .option_chain(Some(date))
            .await
            .map_err(|e| map_yf_err(&e, &format!("option chain for {symbol}")))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn YfQuotes {
    /// Wrap a closure as a quotes adapter.
    pub fn from_fn<F>(f: F) -> Arc<dyn YfQuotes>
    where
        F: Fn(&str) -> Result<Option<Decimal>, ChainError> + Send + Sync + 'static,
    {
        struct FnQuotes<F>(F);
        #[async_trait]
        impl<F> YfQuotes for FnQuotes<F>
        where
            F: Fn(&str) -> Result<Option<Decimal>, ChainError> + Send + Sync + 'static,
        {
            async fn price(&self, symbol: &str) -> Result<Option<Decimal>, ChainError> {
                (self.0)(symbol)
            }
        }
        Arc::new(FnQuotes(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn YfOptions {
    /// Wrap an expirations closure and a chain closure as an options adapter.
    pub fn from_fns<E, C>(expirations: E, chain: C) -> Arc<dyn YfOptions>
    where
        E: Fn(&str) -> Result<Vec<i64>, ChainError> + Send + Sync + 'static,
        C: Fn(&str, i64) -> Result<yf::ticker::OptionChain, ChainError> + Send + Sync + 'static,
    {
        struct FnOptions<E, C>(E, C);
        #[async_trait]
        impl<E, C> YfOptions for FnOptions<E, C>
        where
            E: Fn(&str) -> Result<Vec<i64>, ChainError> + Send + Sync + 'static,
            C: Fn(&str, i64) -> Result<yf::ticker::OptionChain, ChainError>
                + Send
                + Sync
                + 'static,
        {
            async fn expirations(&self, symbol: &str) -> Result<Vec<i64>, ChainError> {
                (self.0)(symbol)
            }
            async fn chain(
                &self,
                symbol: &str,
                date: i64,
            ) -> Result<yf::ticker::OptionChain, ChainError> {
                (self.1)(symbol, date)
            }
        }
        Arc::new(FnOptions(expirations, chain))
    }
}
