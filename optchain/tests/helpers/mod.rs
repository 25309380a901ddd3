#![allow(dead_code)]

use std::sync::Arc;

use optchain::{ChainError, ChainRequest, OptChain, SelectionConfig};
use optchain_core::{ChainConnector, Column, Contract, Decimal, NaiveDate, OptionKind};
use optchain_mock::MockConnector;

pub fn mock_app() -> OptChain {
    app_with(Arc::new(MockConnector::new()), SelectionConfig::default())
}

pub fn app_with(connector: Arc<dyn ChainConnector>, cfg: SelectionConfig) -> OptChain {
    OptChain::builder()
        .with_connector(connector)
        .selection(cfg)
        .build()
        .unwrap()
}

pub async fn render(app: &OptChain, req: ChainRequest) -> Result<String, ChainError> {
    let mut out = Vec::new();
    app.run(&req, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

/// Section headers (`Options chain for ...`) in print order.
pub fn section_headers(report: &str) -> Vec<&str> {
    report
        .lines()
        .filter(|l| l.starts_with("Options chain for "))
        .collect()
}

/// Table lines of the first section: header row first, then data rows.
pub fn first_table(report: &str) -> Vec<&str> {
    report
        .lines()
        .skip_while(|l| !l.starts_with("Options chain for "))
        .skip(2)
        .take_while(|l| !l.is_empty())
        .collect()
}

pub fn contract(kind: OptionKind, strike: i64, bid: Option<Decimal>) -> Contract {
    let mut c = Contract::new(
        format!("XYZ250110{}{:08}", if kind == OptionKind::Call { 'C' } else { 'P' }, strike * 1000),
        "XYZ",
        kind,
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        4,
        Decimal::from(strike),
        Decimal::from(100),
    );
    c.bid = bid;
    c
}

pub const SMALL_COLUMNS: &[Column] = &[
    Column::UnderlyingSymbol,
    Column::UnderlyingPrice,
    Column::ContractSymbol,
    Column::Strike,
    Column::OptionType,
    Column::Bid,
];
