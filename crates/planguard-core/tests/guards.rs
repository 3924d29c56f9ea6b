//! Table-driven coverage of the request-guard surfaces: identifier
//! validation and single-statement checking.

use planguard_core::{is_single_statement, is_valid_field_name, is_valid_table_name};
use rstest::rstest;

#[rstest]
#[case("name", true)]
#[case("first name", true)]
#[case("Name2", true)]
#[case("", false)]
#[case(" name", false)]
#[case("name ", false)]
#[case("\tname", false)]
#[case("_name", false)]
#[case("na\"me", false)]
fn field_name_validation(#[case] name: &str, #[case] expected: bool) {
    assert_eq!(is_valid_field_name(name), expected);
}

#[rstest]
#[case("orders", true)]
#[case("order items", true)]
#[case("my%table", false)]
#[case("_orders", false)]
#[case("orders ", false)]
fn table_name_validation(#[case] name: &str, #[case] expected: bool) {
    assert_eq!(is_valid_table_name(name), expected);
}

#[test]
fn percent_is_only_rejected_for_tables() {
    assert!(is_valid_field_name("my%table"));
    assert!(!is_valid_table_name("my%table"));
}

#[rstest]
#[case("SELECT 1", true)]
#[case("SELECT 1;", true)]
#[case("SELECT 1; SELECT 2", false)]
#[case("SELECT ';'", true)]
#[case("SELECT 1 /* ; */", true)]
#[case("SELECT $tag$ ; $tag$", true)]
#[case("", true)]
fn statement_counting(#[case] sql: &str, #[case] expected: bool) {
    assert_eq!(is_single_statement(sql), expected);
}
