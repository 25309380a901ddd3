//! Column model and plain-text rendering of selected contracts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Contract;

/// A column a provider may populate on its contract rows.
///
/// Each variant maps to one [`Contract`] field; see [`Column::header`] for labels.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    UnderlyingSymbol,
    UnderlyingPrice,
    ContractSymbol,
    Expiration,
    Dte,
    Strike,
    OptionType,
    OpenInterest,
    Volume,
    TheoreticalPrice,
    LastTradePrice,
    Bid,
    BidSize,
    Ask,
    AskSize,
    Open,
    High,
    Low,
    PrevClose,
    Change,
    ChangePercent,
    ImpliedVolatility,
    Delta,
    Gamma,
    Theta,
    Vega,
    Rho,
    InTheMoney,
    LastTradeTime,
}

/// Columns removed before display: identifiers repeated in the header line,
/// greeks other than delta, timestamps, session OHLC, change fields and IV.
pub const DROPPED_COLUMNS: &[Column] = &[
    Column::UnderlyingSymbol,
    Column::ContractSymbol,
    Column::Expiration,
    Column::Dte,
    Column::Gamma,
    Column::Theta,
    Column::Vega,
    Column::Rho,
    Column::PrevClose,
    Column::ChangePercent,
    Column::LastTradeTime,
    Column::BidSize,
    Column::AskSize,
    Column::Open,
    Column::High,
    Column::Low,
    Column::Change,
    Column::ImpliedVolatility,
];

const MISSING: &str = "-";

impl Column {
    /// Every column, in the order providers lay them out.
    pub const ALL: [Self; 29] = [
        Self::UnderlyingSymbol,
        Self::UnderlyingPrice,
        Self::ContractSymbol,
        Self::Expiration,
        Self::Dte,
        Self::Strike,
        Self::OptionType,
        Self::OpenInterest,
        Self::Volume,
        Self::TheoreticalPrice,
        Self::LastTradePrice,
        Self::Bid,
        Self::BidSize,
        Self::Ask,
        Self::AskSize,
        Self::Open,
        Self::High,
        Self::Low,
        Self::PrevClose,
        Self::Change,
        Self::ChangePercent,
        Self::ImpliedVolatility,
        Self::Delta,
        Self::Gamma,
        Self::Theta,
        Self::Vega,
        Self::Rho,
        Self::InTheMoney,
        Self::LastTradeTime,
    ];

    /// Header label.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::UnderlyingSymbol => "underlying_symbol",
            Self::UnderlyingPrice => "underlying_price",
            Self::ContractSymbol => "contract_symbol",
            Self::Expiration => "expiration",
            Self::Dte => "dte",
            Self::Strike => "strike",
            Self::OptionType => "option_type",
            Self::OpenInterest => "open_interest",
            Self::Volume => "volume",
            Self::TheoreticalPrice => "theoretical_price",
            Self::LastTradePrice => "last_trade_price",
            Self::Bid => "bid",
            Self::BidSize => "bid_size",
            Self::Ask => "ask",
            Self::AskSize => "ask_size",
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::PrevClose => "prev_close",
            Self::Change => "change",
            Self::ChangePercent => "change_percent",
            Self::ImpliedVolatility => "implied_volatility",
            Self::Delta => "delta",
            Self::Gamma => "gamma",
            Self::Theta => "theta",
            Self::Vega => "vega",
            Self::Rho => "rho",
            Self::InTheMoney => "in_the_money",
            Self::LastTradeTime => "last_trade_time",
        }
    }

    /// Render this column's cell for `c`, or `None` when the value is missing.
    #[must_use]
    pub fn cell(self, c: &Contract) -> Option<String> {
        fn show<T: fmt::Display>(v: Option<T>) -> Option<String> {
            v.map(|v| v.to_string())
        }
        let greek = |pick: fn(&crate::types::Greeks) -> Option<f64>| {
            show(c.greeks.as_ref().and_then(pick))
        };

        match self {
            Self::UnderlyingSymbol => Some(c.underlying_symbol.clone()),
            Self::UnderlyingPrice => Some(c.underlying_price.to_string()),
            Self::ContractSymbol => Some(c.contract_symbol.clone()),
            Self::Expiration => Some(c.expiration.to_string()),
            Self::Dte => Some(c.dte.to_string()),
            Self::Strike => Some(c.strike.to_string()),
            Self::OptionType => Some(c.option_type.to_string()),
            Self::OpenInterest => show(c.open_interest),
            Self::Volume => show(c.volume),
            Self::TheoreticalPrice => show(c.theoretical_price),
            Self::LastTradePrice => show(c.last_trade_price),
            Self::Bid => show(c.bid),
            Self::BidSize => show(c.bid_size),
            Self::Ask => show(c.ask),
            Self::AskSize => show(c.ask_size),
            Self::Open => show(c.open),
            Self::High => show(c.high),
            Self::Low => show(c.low),
            Self::PrevClose => show(c.prev_close),
            Self::Change => show(c.change),
            Self::ChangePercent => show(c.change_percent),
            Self::ImpliedVolatility => show(c.implied_volatility),
            Self::Delta => greek(|g| g.delta),
            Self::Gamma => greek(|g| g.gamma),
            Self::Theta => greek(|g| g.theta),
            Self::Vega => greek(|g| g.vega),
            Self::Rho => greek(|g| g.rho),
            Self::InTheMoney => show(c.in_the_money),
            Self::LastTradeTime => c
                .last_trade_time
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }

    /// `true` when this column is removed before display.
    #[must_use]
    pub fn is_dropped(self) -> bool {
        DROPPED_COLUMNS.contains(&self)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Columns left to display once [`DROPPED_COLUMNS`] are removed from `present`.
#[must_use]
pub fn display_columns(present: &[Column]) -> Vec<Column> {
    present.iter().copied().filter(|c| !c.is_dropped()).collect()
}

/// Rendered text table without a row index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table of `contracts` over `columns`, in the given order.
    #[must_use]
    pub fn new(columns: &[Column], contracts: &[Contract]) -> Self {
        let headers = columns.iter().map(|c| c.header()).collect();
        let rows = contracts
            .iter()
            .map(|contract| {
                columns
                    .iter()
                    .map(|col| col.cell(contract).unwrap_or_else(|| MISSING.to_string()))
                    .collect()
            })
            .collect();
        Self { headers, rows }
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .fold(h.chars().count(), usize::max)
            })
            .collect()
    }
}

fn write_line<'a>(
    f: &mut fmt::Formatter<'_>,
    widths: &[usize],
    cells: impl Iterator<Item = &'a str>,
) -> fmt::Result {
    for (i, (cell, &width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{cell:>width$}")?;
    }
    writeln!(f)
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_line(f, &widths, self.headers.iter().copied())?;
        for row in &self.rows {
            write_line(f, &widths, row.iter().map(String::as_str))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Decimal, Greeks, NaiveDate, OptionKind};

    fn contract(strike: i64) -> Contract {
        let mut c = Contract::new(
            "SPXW250106C05000000",
            "SPX",
            OptionKind::Call,
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            0,
            Decimal::from(strike),
            Decimal::from(5000),
        );
        c.bid = Some(Decimal::new(1250, 2));
        c.greeks = Some(Greeks {
            delta: Some(0.5),
            ..Greeks::default()
        });
        c
    }

    #[test]
    fn dropped_columns_are_filtered_and_absent_ones_ignored() {
        let present = [
            Column::ContractSymbol,
            Column::Strike,
            Column::Gamma,
            Column::Bid,
            Column::Delta,
        ];
        assert_eq!(
            display_columns(&present),
            vec![Column::Strike, Column::Bid, Column::Delta]
        );
    }

    #[test]
    fn all_lists_each_column_once() {
        let mut seen = std::collections::HashSet::new();
        assert!(Column::ALL.iter().all(|c| seen.insert(*c)));
    }

    #[test]
    fn renders_right_aligned_without_index() {
        let table = Table::new(
            &[Column::Strike, Column::Bid, Column::Ask, Column::Delta],
            &[contract(5000), contract(10)],
        );
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "strike   bid ask delta");
        assert_eq!(lines[1], "  5000 12.50   -   0.5");
        assert_eq!(lines[2], "    10 12.50   -   0.5");
    }

    #[test]
    fn missing_greeks_render_as_missing() {
        let mut c = contract(5000);
        c.greeks = None;
        assert_eq!(Column::Delta.cell(&c), None);
        assert_eq!(Column::OptionType.cell(&c).as_deref(), Some("call"));
    }
}
