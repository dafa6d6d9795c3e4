//! Integration tests for query construction.
//!
//! These tests drive the public builder API the same way the CLI does:
//! resolve field tokens, then build the SQL text.

use insta::assert_snapshot;
use pypinfo::builder::{build_query, BuildOptions, DateWindow, QuerySpec};
use pypinfo::fields::lookup_all;

fn build(project: Option<&str>, tokens: &[&str], options: BuildOptions) -> String {
    let fields = lookup_all(tokens).expect("fields should resolve");
    build_query(project, &fields, &options)
}

fn group_by_line(sql: &str) -> Option<&str> {
    sql.lines()
        .find(|l| l.starts_with("GROUP BY "))
        .map(|l| &l["GROUP BY ".len()..])
}

// ============================================================================
// Full Query Text
// ============================================================================

#[test]
fn test_requests_pyversion_defaults() {
    let sql = build(Some("requests"), &["pyversion"], BuildOptions::default());

    assert_snapshot!(sql, @r"
SELECT
  REGEXP_EXTRACT(details.python, r'^([^\.]+\.[^\.]+)') AS `python_version`,
  COUNT(*) AS `download_count`
FROM `bigquery-public-data.pypi.file_downloads`
WHERE file.project = 'requests' AND timestamp BETWEEN TIMESTAMP_ADD(CURRENT_TIMESTAMP(), INTERVAL -31 DAY) AND TIMESTAMP_ADD(CURRENT_TIMESTAMP(), INTERVAL -1 DAY)
GROUP BY REGEXP_EXTRACT(details.python, r'^([^\.]+\.[^\.]+)')
ORDER BY `download_count` DESC
LIMIT 20
");
}

#[test]
fn test_all_projects_count_only() {
    let sql = build(None, &[], BuildOptions::default().with_days(7).with_limit(1));

    assert_snapshot!(sql, @r"
SELECT
  COUNT(*) AS `download_count`
FROM `bigquery-public-data.pypi.file_downloads`
WHERE timestamp BETWEEN TIMESTAMP_ADD(CURRENT_TIMESTAMP(), INTERVAL -7 DAY) AND TIMESTAMP_ADD(CURRENT_TIMESTAMP(), INTERVAL -1 DAY)
ORDER BY `download_count` DESC
LIMIT 1
");
}

// ============================================================================
// GROUP BY
// ============================================================================

#[test]
fn test_group_by_preserves_request_order() {
    let sql = build(
        Some("django"),
        &["country", "installer", "system"],
        BuildOptions::default(),
    );

    assert_eq!(
        group_by_line(&sql),
        Some("country_code, details.installer.name, details.system.name")
    );

    let sql = build(
        Some("django"),
        &["system", "country", "installer"],
        BuildOptions::default(),
    );
    assert_eq!(
        group_by_line(&sql),
        Some("details.system.name, country_code, details.installer.name")
    );
}

#[test]
fn test_select_aliases_follow_fields() {
    let sql = build(Some("numpy"), &["version", "cpu"], BuildOptions::default());

    let version = sql.find("file.version AS `version`").unwrap();
    let cpu = sql.find("details.cpu AS `cpu`").unwrap();
    let count = sql.find("COUNT(*) AS `download_count`").unwrap();
    assert!(version < cpu && cpu < count);
}

#[test]
fn test_percent_fields_not_grouped() {
    let sql = build(Some("requests"), &["pyversion", "percent3"], BuildOptions::default());

    assert!(sql.contains("AS `percent_3`"));
    assert_eq!(
        group_by_line(&sql),
        Some(r"REGEXP_EXTRACT(details.python, r'^([^\.]+\.[^\.]+)')")
    );

    let sql = build(Some("requests"), &["percent2"], BuildOptions::default());
    assert_eq!(group_by_line(&sql), None);
}

// ============================================================================
// Project Filter
// ============================================================================

#[test]
fn test_project_filter_presence() {
    let with = build(Some("foo"), &["country"], BuildOptions::default());
    assert!(with.contains("file.project = 'foo'"));

    let without = build(None, &["country"], BuildOptions::default());
    assert!(!without.contains("file.project ="));
}

#[test]
fn test_project_name_normalized_and_escaped() {
    let sql = build(Some("Flask_SQLAlchemy"), &[], BuildOptions::default());
    assert!(sql.contains("file.project = 'flask-sqlalchemy'"));

    let sql = build(Some("it's"), &[], BuildOptions::default());
    assert!(sql.contains(r"file.project = 'it\'s'"));
}

// ============================================================================
// Date Window
// ============================================================================

#[test]
fn test_days_window() {
    let sql = build(Some("foo"), &[], BuildOptions::default().with_days(7));
    assert!(sql.contains("INTERVAL -7 DAY) AND TIMESTAMP_ADD(CURRENT_TIMESTAMP(), INTERVAL -1 DAY)"));
}

#[test]
fn test_start_end_window() {
    let options = BuildOptions::default().with_start_date(-10).with_end_date(-1);
    let sql = build(Some("foo"), &[], options);
    assert!(sql.contains("INTERVAL -10 DAY) AND TIMESTAMP_ADD(CURRENT_TIMESTAMP(), INTERVAL -1 DAY)"));
}

#[test]
fn test_default_window() {
    let spec = QuerySpec::new(Some("foo"), &[], &BuildOptions::default());
    assert_eq!(spec.date_window, DateWindow { start: -31, end: -1 });
}

#[test]
fn test_days_override_start_end() {
    let options = BuildOptions::default()
        .with_days(3)
        .with_start_date(-90)
        .with_end_date(-60);
    let spec = QuerySpec::new(None, &[], &options);
    assert_eq!(spec.date_window, DateWindow { start: -3, end: -1 });
}

// ============================================================================
// WHERE / ORDER / LIMIT
// ============================================================================

#[test]
fn test_custom_where_is_anded_and_parenthesized() {
    let options = BuildOptions::default().with_where("country_code = 'US' OR country_code = 'CA'");
    let sql = build(Some("foo"), &["country"], options);

    assert!(sql.contains(
        "INTERVAL -1 DAY) AND (country_code = 'US' OR country_code = 'CA')\nGROUP BY"
    ));
}

#[test]
fn test_order_defaults_to_descending() {
    let options = BuildOptions::default().with_order("python_version");
    let sql = build(Some("foo"), &["pyversion"], options);
    assert!(sql.contains("\nORDER BY python_version DESC\n"));
}

#[test]
fn test_order_keeps_explicit_direction() {
    let options = BuildOptions::default().with_order("download_date asc");
    let sql = build(Some("foo"), &["date"], options);
    assert!(sql.contains("\nORDER BY download_date asc\n"));
}

#[test]
fn test_limit() {
    let default = build(Some("foo"), &[], BuildOptions::default());
    assert!(default.ends_with("\nLIMIT 20"));

    let explicit = build(Some("foo"), &[], BuildOptions::default().with_limit(100));
    assert!(explicit.ends_with("\nLIMIT 100"));
}
