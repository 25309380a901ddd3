//! Option-chain domain types and re-exports from `optchain-types`.
// Consolidated re-exports so downstream crates can depend on `optchain-core` only
pub use optchain_types::{ChainError, SelectionConfig};

pub use chrono::{DateTime, NaiveDate, Utc};
pub use rust_decimal::Decimal;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::table::Column;

/// Contract right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Right to buy the underlying at the strike.
    Call,
    /// Right to sell the underlying at the strike.
    Put,
}

impl OptionKind {
    /// Lowercase label used in rendered tables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sensitivities reported by providers that compute them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Greeks {
    /// Change in option price per unit change in the underlying.
    pub delta: Option<f64>,
    /// Change in delta per unit change in the underlying.
    pub gamma: Option<f64>,
    /// Time decay per day.
    pub theta: Option<f64>,
    /// Sensitivity to a one point change in implied volatility.
    pub vega: Option<f64>,
    /// Sensitivity to the risk-free rate.
    pub rho: Option<f64>,
}

/// One option contract row of a chain.
///
/// Everything past `underlying_price` is optional: providers fill what they have
/// and declare the populated columns on the [`Chain`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Provider contract identifier, e.g. `SPXW251017P05000000`.
    pub contract_symbol: String,
    /// Symbol of the underlying as requested by the caller.
    pub underlying_symbol: String,
    /// Call or put.
    pub option_type: OptionKind,
    /// Expiration date.
    pub expiration: NaiveDate,
    /// Calendar days until expiration; shared by every row of one expiration.
    pub dte: u32,
    /// Strike price.
    pub strike: Decimal,
    /// Underlying price at fetch time; shared by every row of one expiration.
    pub underlying_price: Decimal,

    /// Best bid.
    pub bid: Option<Decimal>,
    /// Best ask.
    pub ask: Option<Decimal>,
    /// Size at the best bid.
    pub bid_size: Option<u64>,
    /// Size at the best ask.
    pub ask_size: Option<u64>,
    /// Last traded price.
    pub last_trade_price: Option<Decimal>,
    /// Provider model price.
    pub theoretical_price: Option<Decimal>,
    /// Session open.
    pub open: Option<Decimal>,
    /// Session high.
    pub high: Option<Decimal>,
    /// Session low.
    pub low: Option<Decimal>,
    /// Previous session close.
    pub prev_close: Option<Decimal>,
    /// Change versus previous close.
    pub change: Option<Decimal>,
    /// Change versus previous close, as a fraction.
    pub change_percent: Option<f64>,
    /// Contracts traded this session.
    pub volume: Option<u64>,
    /// Open interest.
    pub open_interest: Option<u64>,
    /// Implied volatility as a fraction.
    pub implied_volatility: Option<f64>,
    /// Greeks, when the provider computes them.
    pub greeks: Option<Greeks>,
    /// Provider in-the-money flag.
    pub in_the_money: Option<bool>,
    /// Time of the last trade.
    pub last_trade_time: Option<DateTime<Utc>>,
}

impl Contract {
    /// Build a contract with identifying fields only; pricing fields start empty.
    #[must_use]
    pub fn new(
        contract_symbol: impl Into<String>,
        underlying_symbol: impl Into<String>,
        option_type: OptionKind,
        expiration: NaiveDate,
        dte: u32,
        strike: Decimal,
        underlying_price: Decimal,
    ) -> Self {
        Self {
            contract_symbol: contract_symbol.into(),
            underlying_symbol: underlying_symbol.into(),
            option_type,
            expiration,
            dte,
            strike,
            underlying_price,
            bid: None,
            ask: None,
            bid_size: None,
            ask_size: None,
            last_trade_price: None,
            theoretical_price: None,
            open: None,
            high: None,
            low: None,
            prev_close: None,
            change: None,
            change_percent: None,
            volume: None,
            open_interest: None,
            implied_volatility: None,
            greeks: None,
            in_the_money: None,
            last_trade_time: None,
        }
    }

    /// `true` when the strike sits exactly on the underlying price.
    #[must_use]
    pub fn is_at_the_money(&self) -> bool {
        self.strike == self.underlying_price
    }
}

/// All contracts of one symbol across every listed expiration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    /// Symbol the chain was requested for.
    pub symbol: String,
    /// Contract rows in provider order.
    pub contracts: Vec<Contract>,
    /// Columns the provider populated, in display order.
    pub columns: Vec<Column>,
}

impl Chain {
    /// Build a chain from rows and the columns the provider fills.
    #[must_use]
    pub fn new(symbol: impl Into<String>, contracts: Vec<Contract>, columns: Vec<Column>) -> Self {
        Self {
            symbol: symbol.into(),
            contracts,
            columns,
        }
    }

    /// Distinct DTE values present in the chain, ascending.
    #[must_use]
    pub fn dtes(&self) -> Vec<u32> {
        self.contracts
            .iter()
            .map(|c| c.dte)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Contracts expiring `dte` days out, in provider order.
    #[must_use]
    pub fn expiring_in(&self, dte: u32) -> Vec<&Contract> {
        self.contracts.iter().filter(|c| c.dte == dte).collect()
    }
}
