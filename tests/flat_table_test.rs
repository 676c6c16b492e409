use seopulse::flat_table::{parse, FlatTable, FlatTableError};
use std::collections::HashMap;

fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_single_record_zips_header_and_values() {
    let text = "Rank;Domain;Organic Keywords\n42;example.com;1500";
    let table = parse(text).expect("should parse");

    assert_eq!(
        table,
        FlatTable::Single(map(&[
            ("Rank", "42"),
            ("Domain", "example.com"),
            ("Organic Keywords", "1500"),
        ]))
    );
}

#[test]
fn test_many_records_zip_independently() {
    let text = "Keyword;Position\nrust tutorial;3\nrust book;7\nrust async;12";
    let table = parse(text).expect("should parse");

    assert_eq!(
        table,
        FlatTable::Many(vec![
            map(&[("Keyword", "rust tutorial"), ("Position", "3")]),
            map(&[("Keyword", "rust book"), ("Position", "7")]),
            map(&[("Keyword", "rust async"), ("Position", "12")]),
        ])
    );
}

#[test]
fn test_fewer_than_two_lines_is_empty_not_error() {
    assert_eq!(parse(""), Ok(FlatTable::Empty));
    assert_eq!(parse("   \n  "), Ok(FlatTable::Empty));
    assert_eq!(parse("Rank;Domain"), Ok(FlatTable::Empty));
}

#[test]
fn test_trailing_newline_tolerated() {
    let text = "A;B\n1;2\n";
    let table = parse(text).expect("should parse");
    assert_eq!(table, FlatTable::Single(map(&[("A", "1"), ("B", "2")])));
}

#[test]
fn test_field_count_mismatch_is_rejected() {
    // Second data line is short one field; silent misalignment is the
    // failure mode this guards against
    let text = "A;B;C\n1;2;3\n4;5";
    let err = parse(text).expect_err("should reject");
    assert_eq!(
        err,
        FlatTableError::FieldCountMismatch {
            line: 3,
            expected: 3,
            found: 2,
        }
    );
}

#[test]
fn test_excess_fields_also_rejected() {
    let text = "A;B\n1;2;3";
    let err = parse(text).expect_err("should reject");
    assert_eq!(
        err,
        FlatTableError::FieldCountMismatch {
            line: 2,
            expected: 2,
            found: 3,
        }
    );
}

#[test]
fn test_records_accessor() {
    let many = parse("K;V\na;1\nb;2").expect("should parse");
    assert_eq!(many.records().len(), 2);
    assert_eq!(many.first().and_then(|r| r.get("K").cloned()), Some("a".to_string()));

    assert!(FlatTable::Empty.records().is_empty());
    assert_eq!(FlatTable::Empty.first(), None);
}
