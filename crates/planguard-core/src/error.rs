//! Error types for plan-based SQL analysis.
//!
//! # Error Handling Strategy
//!
//! This crate uses two complementary error handling patterns:
//!
//! - [`CrosstabError`]: Local failures while reducing a crosstab call to its
//!   embedded SQL. These never surface from [`crate::analyze`]: the plan
//!   walker converts them into the [`crate::UNKNOWN_CROSSTAB_SQL`] sentinel so
//!   an unanalyzable pivot call reads as a reference to a forbidden table.
//!
//! - [`AnalyzeError`]: Fatal failures of a whole analysis run. Without a plan
//!   no table names can be determined safely, so these are logged for
//!   operators and then propagated; the caller must refuse to authorize the
//!   statement.
//!
//! Validators and the statement counter are infallible: malformed input
//! simply yields a negative answer.

use thiserror::Error;

/// Failure reported by a [`PlanOracle`](crate::analyzer::PlanOracle)
/// implementation.
pub type OracleError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised when a crosstab call cannot be reduced to its embedded SQL.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CrosstabError {
    /// The call is not the single-argument literal form `crosstab('...'::text)`.
    #[error("only simple crosstab calls supported")]
    UnsupportedForm,

    /// The literal body contains a single quote outside a doubled escape pair.
    #[error("only escaped single quotes allowed in query")]
    UnescapedQuote,
}

/// Fatal errors from [`analyze`](crate::analyzer::analyze).
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The plan oracle could not explain the statement.
    #[error("explain query failed: {0}")]
    Explain(#[source] OracleError),

    /// The oracle response could not be decoded into a plan tree.
    #[error("could not parse query plan: {0}")]
    PlanUnavailable(String),
}
