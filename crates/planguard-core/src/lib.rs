pub mod analyzer;
pub mod crosstab;
pub mod error;
pub mod functions;
pub mod plan;
pub mod statement;
pub mod validate;

// Re-export main types and functions
pub use analyzer::{analyze, AnalyzeResult, PlanOracle};
pub use crosstab::extract_crosstab_sql;
pub use error::{AnalyzeError, CrosstabError, OracleError};
pub use functions::extract_function_names;
pub use plan::{PlanNames, PlanNode, UNKNOWN_CROSSTAB_SQL};
pub use statement::is_single_statement;
pub use validate::{
    get_list, is_valid_field_name, is_valid_table_name, should_fts_index_field_type, validate_int,
};
