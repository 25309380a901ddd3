//! optchain-yfinance
//!
//! Connector that implements `ChainConnector` on top of the `yfinance-rs`
//! client library. One `option_chain` call fetches the underlying price, the
//! listed expirations, and every expiration's calls and puts.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `yfinance-rs`.
pub mod adapter;

use std::sync::Arc;

use adapter::{RealAdapter, YfOptions, YfQuotes};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use optchain_core::{
    Chain, ChainConnector, ChainError, Column, Contract, Decimal, Greeks, NaiveDate, OptionKind,
};
use yfinance_rs as yf;

pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Index roots Yahoo lists under a caret symbol.
pub const INDEX_ROOTS: &[&str] = &["SPX", "XSP", "NDX", "RUT", "VIX", "DJX", "OEX"];

/// Columns populated by this connector, in display order.
///
/// Yahoo fills greeks only for some contracts; rows without them render `-`.
pub const YF_COLUMNS: &[Column] = &[
    Column::UnderlyingSymbol,
    Column::UnderlyingPrice,
    Column::ContractSymbol,
    Column::Expiration,
    Column::Dte,
    Column::Strike,
    Column::OptionType,
    Column::OpenInterest,
    Column::Volume,
    Column::LastTradePrice,
    Column::Bid,
    Column::Ask,
    Column::ImpliedVolatility,
    Column::Delta,
    Column::Gamma,
    Column::Theta,
    Column::Vega,
    Column::Rho,
    Column::InTheMoney,
    Column::LastTradeTime,
];

/// Public connector type. Production users construct it with `YfConnector::try_new_default()`.
pub struct YfConnector {
    quotes: Arc<dyn YfQuotes>,
    options: Arc<dyn YfOptions>,
    as_of: Option<NaiveDate>,
}

/// Yahoo symbol for a user-facing ticker: index roots gain a `^`, others are upper-cased.
#[must_use]
pub fn yahoo_symbol(symbol: &str) -> String {
    let upper = symbol.trim().to_ascii_uppercase();
    if INDEX_ROOTS.contains(&upper.as_str()) {
        format!("^{upper}")
    } else {
        upper
    }
}

/// Calendar days from `today` to `expiration`; `None` once it has expired.
#[must_use]
pub fn days_to_expiration(expiration: NaiveDate, today: NaiveDate) -> Option<u32> {
    u32::try_from((expiration - today).num_days()).ok()
}

fn expired(ts: i64, today: NaiveDate) -> bool {
    DateTime::<Utc>::from_timestamp(ts, 0).is_some_and(|t| t.date_naive() < today)
}

impl YfConnector {
    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("no matches")
    }

    fn normalize_error(e: ChainError, what: &str) -> ChainError {
        match e {
            ChainError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    ChainError::not_found(what.to_string())
                } else {
                    ChainError::connector("optchain-yfinance", msg)
                }
            }
            ChainError::Other(msg) => ChainError::connector("optchain-yfinance", msg),
            other => other,
        }
    }

    /// Build over a fresh `yfinance_rs::YfClient`.
    ///
    /// # Errors
    /// Returns a connector error when the HTTP client cannot be built.
    pub fn try_new_default() -> Result<Self, ChainError> {
        let shared = Arc::new(RealAdapter::try_new()?);
        Ok(Self {
            quotes: Arc::clone(&shared) as Arc<dyn YfQuotes>,
            options: shared,
            as_of: None,
        })
    }

    /// Build over injected adapters (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn with_adapters(quotes: Arc<dyn YfQuotes>, options: Arc<dyn YfOptions>) -> Self {
        Self {
            quotes,
            options,
            as_of: None,
        }
    }

    /// Pin the date DTEs are counted from instead of today in New York.
    #[must_use]
    pub const fn as_of(mut self, today: NaiveDate) -> Self {
        self.as_of = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| Utc::now().with_timezone(&New_York).date_naive())
    }

    async fn underlying_price(&self, symbol: &str, ysym: &str) -> Result<Decimal, ChainError> {
        let what = format!("quote for {symbol}");
        self.quotes
            .price(ysym)
            .await
            .map_err(|e| Self::normalize_error(e, &what))?
            .ok_or_else(|| ChainError::not_found(what))
    }
}

fn to_contract(
    raw: &yf::ticker::OptionContract,
    kind: OptionKind,
    symbol: &str,
    underlying_price: Decimal,
    today: NaiveDate,
) -> Option<Contract> {
    let dte = days_to_expiration(raw.expiration_date, today)?;
    let mut c = Contract::new(
        raw.instrument.symbol_str(),
        symbol,
        kind,
        raw.expiration_date,
        dte,
        raw.strike.amount(),
        underlying_price,
    );
    c.bid = raw.bid.as_ref().map(|m| m.amount());
    c.ask = raw.ask.as_ref().map(|m| m.amount());
    c.last_trade_price = raw.price.as_ref().map(|m| m.amount());
    c.volume = raw.volume.and_then(|v| u64::try_from(v).ok());
    c.open_interest = raw.open_interest.and_then(|v| u64::try_from(v).ok());
    c.implied_volatility = raw.implied_volatility;
    c.greeks = raw.greeks.as_ref().map(|g| Greeks {
        delta: g.delta,
        gamma: g.gamma,
        theta: g.theta,
        vega: g.vega,
        rho: g.rho,
    });
    c.in_the_money = Some(raw.in_the_money);
    c.last_trade_time = raw.last_trade_at;
    Some(c)
}

#[async_trait]
impl ChainConnector for YfConnector {
    fn name(&self) -> &'static str {
        "optchain-yfinance"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "optchain_yfinance::option_chain",
            skip(self, symbol),
            fields(symbol = %symbol),
        )
    )]
    async fn option_chain(&self, symbol: &str) -> Result<Chain, ChainError> {
        let ysym = yahoo_symbol(symbol);
        let today = self.today();
        let underlying = self.underlying_price(symbol, &ysym).await?;

        let what = format!("option chain for {symbol}");
        let expirations = self
            .options
            .expirations(&ysym)
            .await
            .map_err(|e| Self::normalize_error(e, &what))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "optchain::yfinance",
            symbol = %ysym,
            expirations = expirations.len(),
            "fetched expiration list"
        );

        let mut contracts = Vec::new();
        for ts in expirations {
            // Yahoo can keep listing an expiry for a day after it settles.
            if expired(ts, today) {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "optchain::yfinance", ts, "skipping expired expiration");
                continue;
            }
            let raw = self
                .options
                .chain(&ysym, ts)
                .await
                .map_err(|e| Self::normalize_error(e, &what))?;
            let calls = raw.calls.iter().map(|c| (OptionKind::Call, c));
            let puts = raw.puts.iter().map(|c| (OptionKind::Put, c));
            contracts.extend(
                calls
                    .chain(puts)
                    .filter_map(|(kind, c)| to_contract(c, kind, symbol, underlying, today)),
            );
        }

        Ok(Chain::new(symbol, contracts, YF_COLUMNS.to_vec()))
    }
}
