//! Expiration resolution and strike selection around the underlying price.

use crate::types::{Chain, Contract, Decimal, NaiveDate, OptionKind, SelectionConfig};

/// Outcome of resolving a requested DTE against the expirations of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The requested DTE is listed.
    Exact(u32),
    /// The requested DTE is not listed; the lowest listed DTE is used instead.
    Fallback {
        /// DTE asked for.
        requested: u32,
        /// Lowest DTE present in the chain.
        lowest: u32,
    },
    /// Look-ahead mode: the first listed DTEs at or after the requested one.
    Ahead(Vec<u32>),
    /// Look-ahead mode found no DTE at or after the requested one.
    NoneAhead,
    /// The chain has no contracts at all.
    Empty,
}

impl Resolution {
    /// DTEs to print, ascending.
    #[must_use]
    pub fn dtes(&self) -> Vec<u32> {
        match self {
            Self::Exact(dte) => vec![*dte],
            Self::Fallback { lowest, .. } => vec![*lowest],
            Self::Ahead(dtes) => dtes.clone(),
            Self::NoneAhead | Self::Empty => Vec::new(),
        }
    }
}

/// Resolve which expirations to display.
///
/// With `lookahead` set, returns up to that many distinct DTEs `>= requested`.
/// Without it, returns the exact match or falls back to the lowest DTE.
#[must_use]
pub fn resolve_expirations(chain: &Chain, requested: u32, lookahead: Option<usize>) -> Resolution {
    let listed = chain.dtes();

    let resolution = match lookahead {
        Some(n) => {
            let ahead: Vec<u32> = listed
                .into_iter()
                .filter(|d| *d >= requested)
                .take(n)
                .collect();
            if ahead.is_empty() {
                Resolution::NoneAhead
            } else {
                Resolution::Ahead(ahead)
            }
        }
        None => match listed.first() {
            None => Resolution::Empty,
            Some(_) if listed.contains(&requested) => Resolution::Exact(requested),
            Some(&lowest) => Resolution::Fallback { requested, lowest },
        },
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "optchain::select",
        symbol = %chain.symbol,
        requested,
        ?resolution,
        "resolved expirations"
    );

    resolution
}

/// Contracts of one expiration narrowed to the strikes nearest the underlying.
#[derive(Debug, Clone, PartialEq)]
pub struct StrikeWindow {
    /// Expiration date shared by every row.
    pub expiration: NaiveDate,
    /// DTE shared by every row.
    pub dte: u32,
    /// Underlying price the window is centred on.
    pub underlying_price: Decimal,
    /// Selected rows, strike ascending.
    pub contracts: Vec<Contract>,
}

/// Narrow the contracts of one expiration to the strikes around the underlying.
///
/// Keeps the `puts_below` highest put strikes strictly below the underlying,
/// the `calls_above` lowest call strikes strictly above it, and every row whose
/// strike equals it. Returns `None` when `contracts` is empty.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        target = "optchain::select",
        level = "debug",
        skip(contracts, config),
        fields(rows = contracts.len()),
    )
)]
#[must_use]
pub fn select_strikes(contracts: &[&Contract], config: &SelectionConfig) -> Option<StrikeWindow> {
    let first = contracts.first()?;
    let underlying = first.underlying_price;

    let mut puts: Vec<&Contract> = contracts
        .iter()
        .copied()
        .filter(|c| c.option_type == OptionKind::Put && c.strike < underlying)
        .collect();
    puts.sort_by(|a, b| b.strike.cmp(&a.strike));
    puts.truncate(config.puts_below);

    let at_the_money = contracts.iter().copied().filter(|c| c.strike == underlying);

    let mut calls: Vec<&Contract> = contracts
        .iter()
        .copied()
        .filter(|c| c.option_type == OptionKind::Call && c.strike > underlying)
        .collect();
    calls.sort_by_key(|c| c.strike);
    calls.truncate(config.calls_above);

    let mut selected: Vec<Contract> = puts
        .into_iter()
        .chain(at_the_money)
        .chain(calls)
        .cloned()
        .collect();
    selected.sort_by_key(|c| c.strike);

    Some(StrikeWindow {
        expiration: first.expiration,
        dte: first.dte,
        underlying_price: underlying,
        contracts: selected,
    })
}

/// Select the strike window of the expiration `dte` days out.
#[must_use]
pub fn select_expiration(chain: &Chain, dte: u32, config: &SelectionConfig) -> Option<StrikeWindow> {
    select_strikes(&chain.expiring_in(dte), config)
}
