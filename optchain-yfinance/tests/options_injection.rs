#![cfg(feature = "test-adapters")]

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use optchain_core::{ChainConnector, Column, Decimal, OptionKind};
use optchain_yfinance::{YF_COLUMNS, YfConnector, adapter};
use paft::domain::{AssetKind, Instrument};
use paft::money::{Currency, IsoCurrency, Money};
use yfinance_rs as yf;

const JAN_06: i64 = 1_736_121_600;
const JAN_10: i64 = 1_736_467_200;

fn usd(s: &str) -> Money {
    Money::from_canonical_str(s, Currency::Iso(IsoCurrency::USD)).unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
}

fn contract(symbol: &str, strike: &str, exp: NaiveDate) -> yf::ticker::OptionContract {
    yf::ticker::OptionContract {
        instrument: Instrument::from_symbol(symbol, AssetKind::Equity).unwrap(),
        strike: usd(strike),
        price: Some(usd("1.23")),
        bid: Some(usd("1.20")),
        ask: Some(usd("1.25")),
        volume: Some(42),
        open_interest: Some(1000),
        implied_volatility: Some(0.25),
        in_the_money: false,
        expiration_at: None,
        expiration_date: exp,
        greeks: None,
        last_trade_at: None,
    }
}

fn spx_quotes() -> Arc<dyn adapter::YfQuotes> {
    <dyn adapter::YfQuotes>::from_fn(|sym| {
        assert_eq!(sym, "^SPX");
        Ok(Some(Decimal::from(5000)))
    })
}

fn spx_options(seen: Arc<Mutex<Vec<i64>>>) -> Arc<dyn adapter::YfOptions> {
    <dyn adapter::YfOptions>::from_fns(
        |sym| {
            assert_eq!(sym, "^SPX");
            Ok(vec![JAN_06, JAN_10])
        },
        move |_sym, ts| {
            seen.lock().unwrap().push(ts);
            let exp = if ts == JAN_06 { date(6) } else { date(10) };
            let tag = exp.format("%y%m%d").to_string();
            Ok(yf::ticker::OptionChain {
                calls: vec![contract(&format!("SPXW{tag}C05010000"), "5010", exp)],
                puts: vec![contract(&format!("SPXW{tag}P04990000"), "4990", exp)],
            })
        },
    )
}

#[tokio::test]
async fn chain_spans_every_expiration_with_dte_from_as_of() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let yf = YfConnector::with_adapters(spx_quotes(), spx_options(Arc::clone(&seen)))
        .as_of(date(6));

    let chain = yf.option_chain("spx").await.unwrap();

    assert_eq!(chain.symbol, "spx");
    assert_eq!(chain.columns, YF_COLUMNS.to_vec());
    assert_eq!(chain.dtes(), vec![0, 4]);
    assert_eq!(chain.contracts.len(), 4);
    assert_eq!(*seen.lock().unwrap(), vec![JAN_06, JAN_10]);

    let put = chain
        .expiring_in(4)
        .into_iter()
        .find(|c| c.option_type == OptionKind::Put)
        .unwrap();
    assert_eq!(put.contract_symbol, "SPXW250110P04990000");
    assert_eq!(put.strike, Decimal::from(4990));
    assert_eq!(put.underlying_price, Decimal::from(5000));
    assert_eq!(put.bid, Some("1.20".parse().unwrap()));
    assert_eq!(put.last_trade_price, Some("1.23".parse().unwrap()));
    assert_eq!(put.volume, Some(42));
    assert_eq!(put.open_interest, Some(1000));
    assert_eq!(put.in_the_money, Some(false));
    assert_eq!(put.greeks, None);
    assert_eq!(Column::Delta.cell(put), None);
}

#[tokio::test]
async fn expired_expirations_are_skipped() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let yf = YfConnector::with_adapters(spx_quotes(), spx_options(Arc::clone(&seen)))
        .as_of(date(8));

    let chain = yf.option_chain("SPX").await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![JAN_10]);
    assert_eq!(chain.dtes(), vec![2]);
    assert!(chain.contracts.iter().all(|c| c.expiration == date(10)));
}

#[tokio::test]
async fn stale_rows_inside_a_live_expiration_are_dropped() {
    let quotes = <dyn adapter::YfQuotes>::from_fn(|_| Ok(Some(Decimal::from(100))));
    let options = <dyn adapter::YfOptions>::from_fns(
        |_| Ok(vec![JAN_10]),
        |_, _| {
            Ok(yf::ticker::OptionChain {
                calls: vec![
                    contract("ACME250110C00105000", "105", date(10)),
                    contract("ACME250103C00105000", "105", date(3)),
                ],
                puts: vec![],
            })
        },
    );
    let yf = YfConnector::with_adapters(quotes, options).as_of(date(6));

    let chain = yf.option_chain("ACME").await.unwrap();
    assert_eq!(chain.contracts.len(), 1);
    assert_eq!(chain.contracts[0].contract_symbol, "ACME250110C00105000");
}

#[tokio::test]
async fn greeks_come_through_to_delta_column() {
    let quotes = <dyn adapter::YfQuotes>::from_fn(|_| Ok(Some(Decimal::from(100))));
    let options = <dyn adapter::YfOptions>::from_fns(
        |_| Ok(vec![JAN_10]),
        |_, _| {
            let mut call = contract("ACME250110C00105000", "105", date(10));
            call.greeks = Some(
                serde_json::from_str(r#"{"delta": 0.42, "gamma": 0.03}"#).unwrap(),
            );
            Ok(yf::ticker::OptionChain {
                calls: vec![call],
                puts: vec![],
            })
        },
    );
    let yf = YfConnector::with_adapters(quotes, options).as_of(date(6));

    let chain = yf.option_chain("ACME").await.unwrap();
    let call = &chain.contracts[0];
    let greeks = call.greeks.unwrap();
    assert_eq!(greeks.delta, Some(0.42));
    assert_eq!(greeks.gamma, Some(0.03));
    assert_eq!(greeks.rho, None);
    assert!(chain.columns.contains(&Column::Delta));
    assert_eq!(Column::Delta.cell(call).as_deref(), Some("0.42"));
}

#[tokio::test]
async fn no_expirations_yields_empty_chain() {
    let quotes = <dyn adapter::YfQuotes>::from_fn(|_| Ok(Some(Decimal::from(12))));
    let options = <dyn adapter::YfOptions>::from_fns(
        |_| Ok(vec![]),
        |_, _| panic!("no chain request without expirations"),
    );
    let yf = YfConnector::with_adapters(quotes, options);

    let chain = yf.option_chain("ACME").await.unwrap();
    assert!(chain.contracts.is_empty());
    assert_eq!(chain.columns, YF_COLUMNS.to_vec());
}
