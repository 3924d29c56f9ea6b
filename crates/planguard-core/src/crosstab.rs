//! Extraction of the SQL literal embedded in a crosstab call.
//!
//! Crosstabs reshape rows into columns by executing an SQL string passed to
//! them as an argument, which makes that argument an injection vector. Only
//! the single-argument `crosstab('...'::text)` form with a literal body is
//! peered into; parameters, multiple arguments and non-literal expressions
//! are all rejected so that the caller falls back to a conservative answer.

use crate::error::CrosstabError;

const CALL_PREFIX: &str = "crosstab('";
const CALL_SUFFIX: &str = "'::text)";

/// Extracts and unescapes the SQL literal from the source text of a crosstab
/// call.
///
/// The body must use doubled single quotes (`''`) as its only escape
/// mechanism; they are collapsed back to single quotes in the returned SQL.
///
/// # Errors
///
/// [`CrosstabError::UnsupportedForm`] when `call_text` is not the
/// single-argument literal form, [`CrosstabError::UnescapedQuote`] when the
/// body could break out of its string literal.
pub fn extract_crosstab_sql(call_text: &str) -> Result<String, CrosstabError> {
    let body = call_text
        .strip_prefix(CALL_PREFIX)
        .and_then(|rest| rest.strip_suffix(CALL_SUFFIX))
        .ok_or(CrosstabError::UnsupportedForm)?;

    if body.replace("''", "").contains('\'') {
        return Err(CrosstabError::UnescapedQuote);
    }
    Ok(body.replace("''", "'"))
}
