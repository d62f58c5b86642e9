use rstest::rstest;

use crate::base::{Len, Operator, QueryError, RowId};
use crate::index::ordered::OrderedPostingsIndex;

/// Index over the column [1, 2, 1, 4, 1, 2, 0]
fn sample_index() -> OrderedPostingsIndex {
    let column: [&[u8]; 7] = [&[1], &[2], &[1], &[4], &[1], &[2], &[0]];
    let mut index = OrderedPostingsIndex::new();
    for (row, key) in column.iter().enumerate() {
        index.insert(key, row as RowId);
    }
    index
}

#[test]
fn test_insert_keeps_keys_sorted_and_unique() {
    let index = sample_index();

    assert_eq!(index.len(), 4);
    let keys: Vec<&[u8]> = index.keys().collect();
    assert_eq!(keys, vec![&[0u8][..], &[1], &[2], &[4]]);
}

#[test]
fn test_postings_keep_insertion_order() {
    let index = sample_index();

    for (key, expected) in [
        (&[0u8][..], vec![6]),
        (&[1], vec![0, 2, 4]),
        (&[2], vec![1, 5]),
        (&[4], vec![3]),
    ] {
        let rows: Vec<RowId> = index.query(key, Operator::Equal).collect();
        assert_eq!(rows, expected, "postings for key {:?}", key);
    }
}

#[rstest]
#[case(Operator::Less, 0, vec![])]
#[case(Operator::Less, 1, vec![6])]
#[case(Operator::Less, 2, vec![0, 2, 4, 6])]
#[case(Operator::Less, 3, vec![1, 5, 0, 2, 4, 6])]
#[case(Operator::Less, 4, vec![1, 5, 0, 2, 4, 6])]
#[case(Operator::Less, 5, vec![3, 1, 5, 0, 2, 4, 6])]
#[case(Operator::LessEqual, 0, vec![6])]
#[case(Operator::LessEqual, 1, vec![0, 2, 4, 6])]
#[case(Operator::LessEqual, 2, vec![1, 5, 0, 2, 4, 6])]
#[case(Operator::LessEqual, 3, vec![1, 5, 0, 2, 4, 6])]
#[case(Operator::LessEqual, 4, vec![3, 1, 5, 0, 2, 4, 6])]
#[case(Operator::LessEqual, 5, vec![3, 1, 5, 0, 2, 4, 6])]
#[case(Operator::Equal, 0, vec![6])]
#[case(Operator::Equal, 1, vec![0, 2, 4])]
#[case(Operator::Equal, 2, vec![1, 5])]
#[case(Operator::Equal, 3, vec![])]
#[case(Operator::Equal, 4, vec![3])]
#[case(Operator::Equal, 5, vec![])]
fn test_query(#[case] op: Operator, #[case] key: u8, #[case] expected: Vec<RowId>) {
    let index = sample_index();

    let mut cursor = index.query(&[key], op);
    let rows: Vec<RowId> = cursor.by_ref().collect();
    assert_eq!(rows, expected, "{} {}", op, key);
    assert_eq!(cursor.err(), None);
}

#[rstest]
#[case(Operator::Greater)]
#[case(Operator::GreaterEqual)]
#[case(Operator::NotEqual)]
fn test_unsupported_operator(#[case] op: Operator) {
    let index = sample_index();

    let mut cursor = index.query(&[1], op);
    assert!(!cursor.advance());
    assert_eq!(cursor.err(), Some(&QueryError::UnsupportedOperator(op)));
}

#[test]
fn test_unknown_operator_code() {
    let index = sample_index();

    let mut cursor = index.query_code(&[1], 9);
    assert!(!cursor.advance());
    assert_eq!(cursor.err(), Some(&QueryError::UnknownOperator(9)));
}

#[test]
fn test_query_code_dispatch() {
    let index = sample_index();

    let rows: Vec<RowId> = index.query_code(&[2], Operator::Equal.code()).collect();
    assert_eq!(rows, vec![1, 5]);

    for code in 0..=5u8 {
        let op = Operator::try_from(code).expect("code in range");
        assert_eq!(op.code(), code);
    }
    assert_eq!(
        Operator::try_from(6),
        Err(QueryError::UnknownOperator(6))
    );
}

#[test]
fn test_empty_index() {
    let index = OrderedPostingsIndex::new();

    for op in [Operator::Equal, Operator::Less, Operator::LessEqual] {
        let mut cursor = index.query(&[1], op);
        assert!(!cursor.advance());
        assert_eq!(cursor.err(), None);
    }
}

#[test]
fn test_lexicographic_key_order() {
    // Prefixes sort before their extensions
    let mut index = OrderedPostingsIndex::new();
    index.insert(&[1, 0], 0);
    index.insert(&[1], 1);
    index.insert(&[0, 255], 2);

    let keys: Vec<&[u8]> = index.keys().collect();
    assert_eq!(keys, vec![&[0u8, 255][..], &[1], &[1, 0]]);

    let rows: Vec<RowId> = index.query(&[1, 0], Operator::Less).collect();
    assert_eq!(rows, vec![1, 2]);
}

#[test]
#[should_panic(expected = "not positioned")]
fn test_current_before_advance_panics() {
    let index = sample_index();
    let cursor = index.query(&[1], Operator::Equal);
    let _ = cursor.current();
}
