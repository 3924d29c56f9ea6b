//! Query plan tree decoding and traversal.
//!
//! The plan oracle answers with the raw body of
//! `EXPLAIN (VERBOSE, FORMAT JSON)`: a JSON array whose first element holds
//! the root node under `"Plan"`. Nodes are decoded read-only and walked by
//! structural recursion; a query plan has no cycles, so parents simply own
//! their children.

use serde::Deserialize;

use crate::crosstab::extract_crosstab_sql;
use crate::error::AnalyzeError;

/// Placeholder table name recorded when a crosstab call cannot be analyzed.
///
/// Authorization layers treat the sentinel as a table nobody may read, so an
/// opaque pivot call fails closed instead of slipping through unexamined.
pub const UNKNOWN_CROSSTAB_SQL: &str = "_unknown_crosstab_sql";

/// One step of a PostgreSQL execution plan.
///
/// Keys not listed here (costs, output columns, join filters, ...) are
/// ignored on decode.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanNode {
    /// Table referenced at this step, if any.
    #[serde(rename = "Relation Name")]
    pub relation_name: Option<String>,

    /// Function invoked at this step, if any.
    #[serde(rename = "Function Name")]
    pub function_name: Option<String>,

    /// Source text of the function call, present for function scans.
    #[serde(rename = "Function Call")]
    pub function_call: Option<String>,

    /// Child plan steps, in execution order.
    #[serde(rename = "Plans", default)]
    pub plans: Vec<PlanNode>,
}

/// Names and nested statements gathered from one plan tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanNames {
    /// Referenced tables, one entry per plan node, duplicates preserved.
    pub table_names: Vec<String>,

    /// SQL statements embedded in crosstab calls, awaiting their own
    /// analysis round-trip.
    pub subqueries: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ExplainEntry {
    #[serde(rename = "Plan")]
    plan: PlanNode,
}

/// Decodes a raw `EXPLAIN (VERBOSE, FORMAT JSON)` body into its root node.
pub(crate) fn plan_root(body: &str) -> Result<PlanNode, AnalyzeError> {
    let mut entries: Vec<ExplainEntry> =
        serde_json::from_str(body).map_err(|err| AnalyzeError::PlanUnavailable(err.to_string()))?;
    if entries.is_empty() {
        return Err(AnalyzeError::PlanUnavailable(
            "explain output contained no plan entries".to_string(),
        ));
    }
    Ok(entries.remove(0).plan)
}

impl PlanNode {
    /// Collects every referenced table name and every crosstab-embedded SQL
    /// statement in the subtree rooted at `self`.
    ///
    /// Table names are not deduplicated: each plan node that touches a table
    /// contributes one entry. A function scan whose name starts with
    /// `crosstab` has its call text reduced to the embedded SQL; when that
    /// reduction fails, the [`UNKNOWN_CROSSTAB_SQL`] sentinel is recorded as
    /// a table name instead, so the walk itself never fails.
    pub fn collect_names(&self) -> PlanNames {
        let mut names = PlanNames::default();
        self.collect_into(&mut names);
        names
    }

    fn collect_into(&self, names: &mut PlanNames) {
        if let Some(relation) = &self.relation_name {
            names.table_names.push(relation.clone());
        }

        if let Some(function) = &self.function_name {
            if function.starts_with("crosstab") {
                match self.function_call.as_deref().map(extract_crosstab_sql) {
                    Some(Ok(subquery)) => names.subqueries.push(subquery),
                    _ => names.table_names.push(UNKNOWN_CROSSTAB_SQL.to_string()),
                }
            }
        }

        for child in &self.plans {
            child.collect_into(names);
        }
    }
}
