use rust_decimal::Decimal;

/// Underlying spot used to price each fixture chain.
pub fn underlying_by_symbol(s: &str) -> Option<Decimal> {
    match s {
        "SPX" => Some(Decimal::from(5000)),
        "ACME" => Some(Decimal::new(10125, 2)),
        "EMPTY" => Some(Decimal::from(42)),
        _ => None,
    }
}
