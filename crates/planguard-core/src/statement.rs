//! Statement counting for stacked-query detection.

use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::tokenizer::{Token, Tokenizer};

/// Returns true when `sql` contains at most one statement.
///
/// Untrusted SQL ends up interpolated into an `EXPLAIN` round-trip, where a
/// second statement smuggled in behind a semicolon would execute verbatim.
/// The check is lexical: string literals, dollar-quoted bodies and comments
/// are tokenized first, so a `;` inside them does not count as a boundary.
/// Input the tokenizer rejects cannot be proven single and is reported as
/// multiple.
pub fn is_single_statement(sql: &str) -> bool {
    let Ok(tokens) = Tokenizer::new(&PostgreSqlDialect {}, sql).tokenize() else {
        return false;
    };

    let mut statements = 0usize;
    let mut in_statement = false;
    for token in &tokens {
        match token {
            Token::SemiColon => in_statement = false,
            Token::Whitespace(_) => {}
            _ => {
                if !in_statement {
                    statements += 1;
                    in_statement = true;
                }
            }
        }
    }
    statements <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_statement() {
        assert!(is_single_statement("SELECT 1"));
        assert!(is_single_statement("SELECT * FROM orders WHERE id = 1"));
    }

    #[test]
    fn test_two_statements() {
        assert!(!is_single_statement("SELECT 1; SELECT 2"));
        assert!(!is_single_statement("SELECT 1;DROP TABLE orders"));
    }

    #[test]
    fn test_trailing_semicolon_is_still_single() {
        assert!(is_single_statement("SELECT 1;"));
        assert!(is_single_statement("SELECT 1; ; "));
    }

    #[test]
    fn test_semicolon_inside_string_literal() {
        assert!(is_single_statement("SELECT ';'"));
        assert!(is_single_statement("SELECT 'a; b; c' FROM orders"));
    }

    #[test]
    fn test_semicolon_inside_dollar_quoting() {
        assert!(is_single_statement("SELECT $$one; two$$"));
    }

    #[test]
    fn test_semicolon_inside_comment() {
        assert!(is_single_statement("SELECT 1 -- trailing; note"));
        assert!(is_single_statement("SELECT /* a; b */ 1"));
    }

    #[test]
    fn test_empty_input_is_single() {
        assert!(is_single_statement(""));
        assert!(is_single_statement("   "));
    }

    #[test]
    fn test_unterminated_literal_is_not_single() {
        assert!(!is_single_statement("SELECT 'oops"));
    }
}
