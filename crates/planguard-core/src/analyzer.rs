//! Worklist-driven analysis of which tables and functions a statement
//! reaches.

use tracing::error;

use crate::error::{AnalyzeError, OracleError};
use crate::functions::extract_function_names;
use crate::plan::plan_root;

/// External capability that explains one SQL statement against live schema.
///
/// Implementations issue the equivalent of
/// `EXPLAIN (VERBOSE, FORMAT JSON) <statement>` and return the raw JSON body
/// of the `QUERY PLAN` column. Planning stays delegated to the engine: only
/// its planner resolves table names through views, inheritance and
/// search-path lookup.
///
/// An oracle wraps a live session, so one oracle serves one [`analyze`] call
/// at a time; concurrent analyses each need their own handle.
pub trait PlanOracle {
    /// Explains `sql`, returning the undecoded plan JSON.
    fn explain(&mut self, sql: &str) -> Result<String, OracleError>;
}

/// Table and function names reachable from one analyzed statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzeResult {
    /// Referenced tables in discovery order. Duplicates are preserved: each
    /// plan node that touches a table contributes one entry.
    pub table_names: Vec<String>,

    /// Called functions in first-seen order, deduplicated.
    pub function_names: Vec<String>,
}

/// Main entry point for reachability analysis.
///
/// Starts from `sql` and drives a worklist to closure: each queued statement
/// has its function-call names extracted and merged, is explained by the
/// oracle, and has its plan tree walked for referenced tables; SQL embedded
/// in crosstab calls is queued for the same treatment, so nesting is followed
/// to any depth. The queue is popped last-in-first-out, which makes discovery
/// order deterministic for a given input.
///
/// # Errors
///
/// [`AnalyzeError::Explain`] when the oracle cannot plan a statement and
/// [`AnalyzeError::PlanUnavailable`] when its response cannot be decoded.
/// Both are fatal: without a plan there is no safe answer, so no partial
/// result is returned.
pub fn analyze(sql: &str, oracle: &mut dyn PlanOracle) -> Result<AnalyzeResult, AnalyzeError> {
    let mut queue = vec![sql.to_string()];
    let mut result = AnalyzeResult::default();

    while let Some(statement) = queue.pop() {
        for name in extract_function_names(&statement) {
            if !result.function_names.contains(&name) {
                result.function_names.push(name);
            }
        }

        let body = oracle.explain(&statement).map_err(AnalyzeError::Explain)?;
        let root = match plan_root(&body) {
            Ok(root) => root,
            Err(err) => {
                error!(statement = %statement, "could not parse query plan");
                return Err(err);
            }
        };

        let mut names = root.collect_names();
        result.table_names.append(&mut names.table_names);
        queue.append(&mut names.subqueries);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticOracle {
        body: String,
        calls: usize,
    }

    impl PlanOracle for StaticOracle {
        fn explain(&mut self, _sql: &str) -> Result<String, OracleError> {
            self.calls += 1;
            Ok(self.body.clone())
        }
    }

    struct FailingOracle;

    impl PlanOracle for FailingOracle {
        fn explain(&mut self, sql: &str) -> Result<String, OracleError> {
            Err(format!("syntax error at or near {sql:?}").into())
        }
    }

    #[test]
    fn test_single_round_trip() {
        let mut oracle = StaticOracle {
            body: r#"[{"Plan": {"Node Type": "Seq Scan", "Relation Name": "orders"}}]"#.to_string(),
            calls: 0,
        };
        let result = analyze("SELECT count(*) FROM orders", &mut oracle).unwrap();
        assert_eq!(result.table_names, vec!["orders"]);
        assert_eq!(result.function_names, vec!["count"]);
        assert_eq!(oracle.calls, 1);
    }

    #[test]
    fn test_oracle_failure_is_fatal() {
        let err = analyze("SELECT 1 FRO", &mut FailingOracle).unwrap_err();
        assert!(matches!(err, AnalyzeError::Explain(_)));
    }

    #[test]
    fn test_undecodable_plan_is_fatal() {
        let mut oracle = StaticOracle {
            body: "QUERY PLAN".to_string(),
            calls: 0,
        };
        let err = analyze("SELECT 1", &mut oracle).unwrap_err();
        assert!(matches!(err, AnalyzeError::PlanUnavailable(_)));
    }
}
