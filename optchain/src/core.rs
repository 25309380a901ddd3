use std::io::Write;
use std::sync::Arc;

use optchain_core::{
    Chain, ChainConnector, ChainError, Resolution, SelectionConfig, StrikeWindow, Table,
    display_columns, resolve_expirations, select_expiration,
};

/// What to print: a symbol and the DTE to look for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRequest {
    /// Ticker as typed by the user, e.g. `SPX`.
    pub symbol: String,
    /// Requested days to expiration.
    pub dte: u32,
    /// Print the next few expirations at or after `dte` instead of a single one.
    pub next_expirations: bool,
}

impl ChainRequest {
    /// Request a single expiration of `symbol`.
    #[must_use]
    pub fn new(symbol: impl Into<String>, dte: u32) -> Self {
        Self {
            symbol: symbol.into(),
            dte,
            next_expirations: false,
        }
    }

    /// Switch to look-ahead mode.
    #[must_use]
    pub const fn next_expirations(mut self, yes: bool) -> Self {
        self.next_expirations = yes;
        self
    }
}

/// Fetches a chain through one connector and prints the strikes around the underlying.
pub struct OptChain {
    pub(crate) connector: Arc<dyn ChainConnector>,
    pub(crate) cfg: SelectionConfig,
}

/// Builder for constructing an [`OptChain`].
pub struct OptChainBuilder {
    connector: Option<Arc<dyn ChainConnector>>,
    cfg: SelectionConfig,
}

impl Default for OptChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OptChainBuilder {
    /// Create a builder with no connector and default selection limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connector: None,
            cfg: SelectionConfig::default(),
        }
    }

    /// Set the provider connector. A later call replaces an earlier one.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn ChainConnector>) -> Self {
        self.connector = Some(c);
        self
    }

    /// Override the strike and expiration limits.
    #[must_use]
    pub const fn selection(mut self, cfg: SelectionConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the [`OptChain`].
    ///
    /// # Errors
    /// Returns `InvalidArg` when no connector was registered.
    pub fn build(self) -> Result<OptChain, ChainError> {
        let connector = self.connector.ok_or_else(|| {
            ChainError::InvalidArg(
                "no connector registered; add one via with_connector(...)".to_string(),
            )
        })?;
        Ok(OptChain {
            connector,
            cfg: self.cfg,
        })
    }
}

impl OptChain {
    /// Start building an [`OptChain`].
    #[must_use]
    pub fn builder() -> OptChainBuilder {
        OptChainBuilder::new()
    }

    /// Fetch the full chain of `symbol` from the connector.
    ///
    /// # Errors
    /// Propagates the connector's error unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "optchain::fetch",
            skip(self),
            fields(connector = self.connector.name()),
        )
    )]
    pub async fn fetch(&self, symbol: &str) -> Result<Chain, ChainError> {
        let chain = self.connector.option_chain(symbol).await?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "optchain::core",
            contracts = chain.contracts.len(),
            columns = chain.columns.len(),
            "fetched chain"
        );
        Ok(chain)
    }

    /// Fetch, select, and print the request to `out`.
    ///
    /// Informational outcomes (fallback to the lowest DTE, nothing at or after the
    /// requested DTE, no rows for an expiration) are printed and return `Ok`.
    ///
    /// # Errors
    /// Returns the connector error when the fetch fails, or `Output` when writing fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "optchain::run",
            skip(self, req, out),
            fields(symbol = %req.symbol, dte = req.dte, next = req.next_expirations),
        )
    )]
    pub async fn run<W: Write>(&self, req: &ChainRequest, out: &mut W) -> Result<(), ChainError> {
        let chain = self.fetch(&req.symbol).await?;
        let lookahead = req.next_expirations.then_some(self.cfg.expirations_ahead);
        let symbol = &req.symbol;

        let resolution = resolve_expirations(&chain, req.dte, lookahead);
        match &resolution {
            Resolution::NoneAhead => {
                writeln!(out, "No DTEs found for {symbol} at or after {} DTE.", req.dte)?;
                return Ok(());
            }
            Resolution::Empty => {
                writeln!(out, "No options found for {symbol} with DTE {}", req.dte)?;
                return Ok(());
            }
            Resolution::Fallback { requested, lowest } => {
                writeln!(
                    out,
                    "No {requested} DTE options found for {symbol}, getting lowest dte: {lowest}"
                )?;
            }
            Resolution::Exact(_) | Resolution::Ahead(_) => {}
        }

        let columns = display_columns(&chain.columns);
        for dte in resolution.dtes() {
            match select_expiration(&chain, dte, &self.cfg) {
                Some(window) => write_window(out, symbol, &columns, &window)?,
                None => writeln!(out, "No options found for {symbol} with DTE {dte}")?,
            }
        }
        Ok(())
    }
}

fn write_window<W: Write>(
    out: &mut W,
    symbol: &str,
    columns: &[optchain_core::Column],
    window: &StrikeWindow,
) -> Result<(), ChainError> {
    writeln!(out)?;
    writeln!(
        out,
        "Options chain for {symbol} on {} (DTE: {})",
        window.expiration, window.dte
    )?;
    writeln!(out)?;
    write!(out, "{}", Table::new(columns, &window.contracts))?;
    Ok(())
}
