use std::sync::Arc;

use clap::Parser;
use optchain_core::{ChainConnector, ChainError};

use crate::ChainRequest;

/// Environment variable that swaps the Yahoo connector for the offline mock.
pub const USE_MOCK_ENV: &str = "OPTCHAIN_USE_MOCK";

/// Print the option strikes around the underlying price for one or more expirations.
#[derive(Debug, Parser)]
#[command(name = "optchain", version, about)]
pub struct Args {
    /// Ticker symbol; index roots such as SPX are looked up as ^SPX
    #[arg(short = 't', long, default_value = "SPX")]
    pub ticker: String,

    /// Days to expiration to look for
    #[arg(short = 'd', long, default_value_t = 0)]
    pub dte: u32,

    /// Show the next 3 expirations at or after --dte
    #[arg(short = 'n', long = "next-3-dte")]
    pub next_3_dte: bool,
}

impl Args {
    /// Request described by the parsed flags.
    #[must_use]
    pub fn request(&self) -> ChainRequest {
        ChainRequest::new(self.ticker.clone(), self.dte).next_expirations(self.next_3_dte)
    }
}

/// Return the connector for this run: the mock when [`USE_MOCK_ENV`] is set, Yahoo otherwise.
///
/// # Errors
/// Returns a connector error when the Yahoo HTTP client cannot be built.
pub fn get_connector() -> Result<Arc<dyn ChainConnector>, ChainError> {
    if std::env::var_os(USE_MOCK_ENV).is_some() {
        #[cfg(feature = "tracing")]
        tracing::info!(target: "optchain::cli", "using mock connector");
        Ok(Arc::new(optchain_mock::MockConnector::new()))
    } else {
        Ok(Arc::new(optchain_yfinance::YfConnector::try_new_default()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spx_same_day() {
        let args = Args::try_parse_from(["optchain"]).unwrap();
        assert_eq!(args.ticker, "SPX");
        assert_eq!(args.dte, 0);
        assert!(!args.next_3_dte);
        assert_eq!(args.request(), ChainRequest::new("SPX", 0));
    }

    #[test]
    fn short_and_long_flags_parse() {
        let args = Args::try_parse_from(["optchain", "-t", "AAPL", "-d", "7", "-n"]).unwrap();
        assert_eq!(args.request(), ChainRequest::new("AAPL", 7).next_expirations(true));

        let args =
            Args::try_parse_from(["optchain", "--ticker", "QQQ", "--dte", "2", "--next-3-dte"])
                .unwrap();
        assert_eq!(args.ticker, "QQQ");
        assert_eq!(args.dte, 2);
        assert!(args.next_3_dte);
    }

    #[test]
    fn negative_or_non_numeric_dte_is_rejected() {
        assert!(Args::try_parse_from(["optchain", "--dte", "-1"]).is_err());
        assert!(Args::try_parse_from(["optchain", "--dte", "soon"]).is_err());
    }
}
