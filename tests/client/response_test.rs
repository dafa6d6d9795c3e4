//! Decoding BigQuery `jobs.query` responses into result rows.

use pypinfo::client::protocol::QueryResponse;
use pypinfo::client::ClientError;
use pypinfo::result::Value;
use pypinfo::tabulate::tabulate;

fn parse(json: &str) -> QueryResponse {
    serde_json::from_str(json).expect("fixture should deserialize")
}

const PYVERSION_RESPONSE: &str = r#"{
  "kind": "bigquery#queryResponse",
  "schema": {
    "fields": [
      {"name": "python_version", "type": "STRING", "mode": "NULLABLE"},
      {"name": "percent_3", "type": "FLOAT", "mode": "NULLABLE"},
      {"name": "download_count", "type": "INTEGER", "mode": "NULLABLE"}
    ]
  },
  "jobReference": {"projectId": "pypinfo-test", "jobId": "job_1", "location": "US"},
  "totalRows": "3",
  "rows": [
    {"f": [{"v": "3.11"}, {"v": "100.0"}, {"v": "5120"}]},
    {"f": [{"v": "3.10"}, {"v": "100.0"}, {"v": "4003"}]},
    {"f": [{"v": null}, {"v": "0.0"}, {"v": "12"}]}
  ],
  "totalBytesProcessed": "1048576",
  "jobComplete": true,
  "cacheHit": false
}"#;

#[test]
fn test_decode_rows() {
    let result = parse(PYVERSION_RESPONSE).into_result().unwrap();

    assert_eq!(
        result.columns,
        vec!["python_version", "percent_3", "download_count"]
    );
    assert_eq!(result.len(), 3);
    assert_eq!(result.rows[0]["python_version"], Value::Text("3.11".into()));
    assert_eq!(result.rows[0]["percent_3"], Value::Percent(100.0));
    assert_eq!(result.rows[0]["download_count"], Value::Integer(5120));
    assert_eq!(result.rows[2]["python_version"], Value::Null);
}

#[test]
fn test_decoded_rows_tabulate() {
    let result = parse(PYVERSION_RESPONSE).into_result().unwrap();
    let table = tabulate(&result).unwrap();

    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[2].contains("100.00%"));
    assert!(lines[5].starts_with("| Total"));
    assert!(lines[5].ends_with(" 9,135 |"));
}

#[test]
fn test_empty_result_has_columns() {
    let response = parse(
        r#"{
          "schema": {"fields": [{"name": "download_count", "type": "INTEGER"}]},
          "totalRows": "0",
          "jobComplete": true
        }"#,
    );
    assert!(response.job_complete);

    let result = response.into_result().unwrap();
    assert!(result.is_empty());
    assert_eq!(result.columns, vec!["download_count"]);
}

#[test]
fn test_incomplete_job_flag() {
    let response = parse(
        r#"{"jobReference": {"projectId": "p", "jobId": "j"}, "jobComplete": false}"#,
    );
    assert!(!response.job_complete);
    assert!(matches!(
        response.into_result(),
        Err(ClientError::MalformedResponse(_))
    ));
}

#[test]
fn test_bad_integer_cell() {
    let response = parse(
        r#"{
          "schema": {"fields": [{"name": "download_count", "type": "INT64"}]},
          "rows": [{"f": [{"v": "many"}]}],
          "jobComplete": true
        }"#,
    );
    assert!(matches!(
        response.into_result(),
        Err(ClientError::MalformedResponse(_))
    ));
}

#[test]
fn test_row_width_mismatch() {
    let response = parse(
        r#"{
          "schema": {"fields": [
            {"name": "country", "type": "STRING"},
            {"name": "download_count", "type": "INTEGER"}
          ]},
          "rows": [{"f": [{"v": "US"}]}],
          "jobComplete": true
        }"#,
    );
    assert!(matches!(
        response.into_result(),
        Err(ClientError::MalformedResponse(msg)) if msg.contains("1 cells")
    ));
}
