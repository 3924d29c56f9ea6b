//! PostgreSQL plan oracle backed by a blocking `postgres` connection.
//!
//! The analysis core treats planning as an injected capability; this crate
//! supplies the real one. Each oracle owns its connection, matching the
//! core's one-session-per-analysis model: spawn one oracle per concurrent
//! `analyze` call.

use planguard_core::{OracleError, PlanOracle};
use postgres::Client;

/// Plan oracle that explains statements over a live PostgreSQL session.
pub struct PgPlanOracle {
    client: Client,
}

impl PgPlanOracle {
    /// Wraps an open connection.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Releases the underlying connection.
    pub fn into_client(self) -> Client {
        self.client
    }
}

impl PlanOracle for PgPlanOracle {
    fn explain(&mut self, sql: &str) -> Result<String, OracleError> {
        let row = self.client.query_one(&explain_statement(sql), &[])?;
        let body: String = row.try_get("QUERY PLAN")?;
        Ok(body)
    }
}

/// Builds the explain statement sent to the server.
///
/// `EXPLAIN` takes no bind parameters, so the statement text is interpolated
/// directly. Callers are expected to gate untrusted input through
/// [`planguard_core::is_single_statement`] first; the core's analyzer also
/// never sends anything here that it did not receive whole or extract from a
/// validated crosstab literal.
pub fn explain_statement(sql: &str) -> String {
    format!("EXPLAIN (VERBOSE, FORMAT JSON) {sql}")
}
