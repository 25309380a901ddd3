//! Configuration for strike selection around the underlying price.

use serde::{Deserialize, Serialize};

/// Limits applied when narrowing a chain for display.
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Maximum number of puts kept strictly below the underlying price.
    pub puts_below: usize,
    /// Maximum number of calls kept strictly above the underlying price.
    pub calls_above: usize,
    /// Number of expirations resolved when looking ahead from a requested DTE.
    pub expirations_ahead: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            puts_below: 10,
            calls_above: 10,
            expirations_ahead: 3,
        }
    }
}
