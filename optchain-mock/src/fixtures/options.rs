use chrono::{Days, NaiveDate};
use optchain_core::{Chain, Column, Contract, Decimal, Greeks, OptionKind};

use super::quotes;

/// Trading date every fixture DTE is counted from.
pub fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).expect("valid fixture date")
}

const SPX_DTES: &[u32] = &[0, 1, 3, 7];
const ACME_DTES: &[u32] = &[2, 9];

/// Columns a full-featured provider fills (greeks included).
pub const FULL_COLUMNS: &[Column] = &Column::ALL;

/// Columns of a provider without greeks or session statistics.
pub const BASIC_COLUMNS: &[Column] = &[
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
];

pub fn chain_by_symbol(s: &str) -> Option<Chain> {
    let underlying = quotes::underlying_by_symbol(s)?;
    match s {
        // 4850..=5150 by 10: fifteen strikes either side of an on-strike spot.
        "SPX" => Some(build(
            s,
            "SPXW",
            underlying,
            SPX_DTES,
            (485..=515).map(|k| Decimal::from(k * 10)),
            true,
        )),
        // 90..=112 by 1 around an off-strike spot: no at-the-money rows.
        "ACME" => Some(build(
            s,
            "ACME",
            underlying,
            ACME_DTES,
            (90..=112).map(Decimal::from),
            false,
        )),
        "EMPTY" => Some(Chain::new(s, Vec::new(), BASIC_COLUMNS.to_vec())),
        _ => None,
    }
}

fn build(
    symbol: &str,
    root: &str,
    underlying: Decimal,
    dtes: &[u32],
    strikes: impl Iterator<Item = Decimal> + Clone,
    with_greeks: bool,
) -> Chain {
    let mut rows = Vec::new();
    for &dte in dtes {
        let expiration = as_of() + Days::new(u64::from(dte));
        for strike in strikes.clone() {
            for kind in [OptionKind::Call, OptionKind::Put] {
                rows.push(contract(
                    symbol, root, kind, expiration, dte, strike, underlying, with_greeks,
                ));
            }
        }
    }
    let columns = if with_greeks {
        FULL_COLUMNS.to_vec()
    } else {
        BASIC_COLUMNS.to_vec()
    };
    Chain::new(symbol, rows, columns)
}

#[allow(clippy::too_many_arguments)]
fn contract(
    symbol: &str,
    root: &str,
    kind: OptionKind,
    expiration: NaiveDate,
    dte: u32,
    strike: Decimal,
    underlying: Decimal,
    with_greeks: bool,
) -> Contract {
    let right = match kind {
        OptionKind::Call => 'C',
        OptionKind::Put => 'P',
    };
    let milli: i64 = (strike * Decimal::from(1000))
        .trunc()
        .try_into()
        .unwrap_or_default();
    let occ = format!("{root}{}{right}{milli:08}", expiration.format("%y%m%d"));

    let intrinsic = match kind {
        OptionKind::Call => (underlying - strike).max(Decimal::ZERO),
        OptionKind::Put => (strike - underlying).max(Decimal::ZERO),
    };
    let distance = (strike - underlying).abs();
    let extrinsic = (Decimal::from(5 + 2 * dte) - distance / Decimal::from(10))
        .max(Decimal::new(5, 2))
        .round_dp(2);
    let mid = intrinsic + extrinsic;
    let spread = Decimal::new(10, 2);

    let mut c = Contract::new(occ, symbol, kind, expiration, dte, strike, underlying);
    c.bid = Some((mid - spread).max(Decimal::ZERO));
    c.ask = Some(mid + spread);
    c.last_trade_price = Some(mid);
    c.volume = Some(1000u64.saturating_sub(distance.trunc().try_into().unwrap_or(0u64)));
    c.open_interest = Some(5000);
    c.implied_volatility = Some(0.15 + f64::from(dte) / 100.0);
    c.in_the_money = Some(intrinsic > Decimal::ZERO);

    if with_greeks {
        let moneyness: f64 = ((underlying - strike) / underlying)
            .try_into()
            .unwrap_or(0.0);
        let call_delta = (0.5 + moneyness * 10.0).clamp(0.01, 0.99);
        let delta = match kind {
            OptionKind::Call => call_delta,
            OptionKind::Put => call_delta - 1.0,
        };
        c.greeks = Some(Greeks {
            delta: Some(delta),
            gamma: Some(0.002),
            theta: Some(-1.5),
            vega: Some(0.8),
            rho: Some(0.05),
        });
        c.theoretical_price = Some(mid);
        c.bid_size = Some(10);
        c.ask_size = Some(12);
        c.open = Some(mid);
        c.high = Some(mid + Decimal::ONE);
        c.low = Some((mid - Decimal::ONE).max(Decimal::ZERO));
        c.prev_close = Some(mid);
        c.change = Some(Decimal::ZERO);
        c.change_percent = Some(0.0);
    }
    c
}
