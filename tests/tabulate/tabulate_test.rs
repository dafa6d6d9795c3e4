//! Integration tests for result formatting.

use pypinfo::result::{QueryResult, Value};
use pypinfo::tabulate::{tabulate, TabulateError};

fn columns(names: &[&str]) -> QueryResult {
    QueryResult::new(names.iter().map(|c| c.to_string()).collect())
}

#[test]
fn test_empty_result_is_header_and_zero_total() {
    let result = columns(&["python_version", "download_count"]);

    let table = tabulate(&result).unwrap();
    assert_eq!(
        table,
        "| python_version | download_count |\n\
         | -------------- | -------------: |\n\
         | Total          |              0 |"
    );
}

#[test]
fn test_rows_and_total() {
    let mut result = columns(&["python_version", "download_count"]);
    result.push_row(vec!["3.11".into(), Value::Integer(1_200_000)]);
    result.push_row(vec!["3.10".into(), Value::Integer(800_000)]);
    result.push_row(vec!["2.7".into(), Value::Integer(35)]);

    let table = tabulate(&result).unwrap();
    assert_eq!(
        table,
        "| python_version | download_count |\n\
         | -------------- | -------------: |\n\
         | 3.11           |      1,200,000 |\n\
         | 3.10           |        800,000 |\n\
         | 2.7            |             35 |\n\
         | Total          |      2,000,035 |"
    );
}

#[test]
fn test_total_equals_sum() {
    let counts = [17_i64, 4, 9_999, 123_456];
    let mut result = columns(&["country", "download_count"]);
    for (i, n) in counts.iter().enumerate() {
        result.push_row(vec![format!("C{}", i).into(), Value::Integer(*n)]);
    }

    let table = tabulate(&result).unwrap();
    let total_line = table.lines().last().unwrap();
    assert!(total_line.starts_with("| Total"));
    assert!(total_line.ends_with(" 133,476 |"));
}

#[test]
fn test_widths_grow_with_cells() {
    let mut result = columns(&["cpu", "download_count"]);
    result.push_row(vec!["x86_64-very-long-name".into(), Value::Integer(1)]);

    let table = tabulate(&result).unwrap();
    let widths: Vec<usize> = table.lines().map(|l| l.chars().count()).collect();
    assert!(widths.windows(2).all(|w| w[0] == w[1]));
    assert!(table.starts_with("| cpu                   |"));
}

#[test]
fn test_total_only_labels_first_column() {
    let mut result = columns(&["country", "installer_name", "download_count"]);
    result.push_row(vec!["US".into(), "pip".into(), Value::Integer(5)]);

    let table = tabulate(&result).unwrap();
    assert_eq!(
        table.lines().last(),
        Some("| Total   |                |              5 |")
    );
}

#[test]
fn test_count_only_gets_label_column() {
    let mut result = columns(&["download_count"]);
    result.push_row(vec![Value::Integer(5)]);

    let table = tabulate(&result).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "|       | download_count |");
    assert_eq!(lines[2], "|       |              5 |");
    assert_eq!(lines[3], "| Total |              5 |");
    assert_ne!(lines[2], lines[3]);
}

#[test]
fn test_missing_count_column() {
    let mut result = columns(&["country"]);
    result.push_row(vec!["US".into()]);

    assert!(matches!(
        tabulate(&result),
        Err(TabulateError::MalformedResult(msg)) if msg.contains("download_count")
    ));
}

#[test]
fn test_row_missing_column() {
    let mut result = columns(&["country", "download_count"]);
    result.rows.push([("country".to_string(), Value::from("US"))].into_iter().collect());

    assert!(matches!(
        tabulate(&result),
        Err(TabulateError::MalformedResult(_))
    ));
}

#[test]
fn test_text_count_rejected() {
    let mut result = columns(&["download_count"]);
    result.push_row(vec!["lots".into()]);

    let err = tabulate(&result).unwrap_err();
    assert!(err.to_string().starts_with("malformed result:"));
}
