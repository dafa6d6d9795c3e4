//! Integration tests for the field vocabulary.

use pypinfo::fields::{by_label, lookup, lookup_all, FieldError, FieldKind, FIELDS};

#[test]
fn test_every_documented_field_resolves() {
    let vocabulary = [
        "project",
        "version",
        "pyversion",
        "percent3",
        "percent2",
        "impl",
        "impl-version",
        "openssl",
        "date",
        "month",
        "year",
        "country",
        "installer",
        "installer-version",
        "setuptools-version",
        "system",
        "system-release",
        "distro",
        "distro-version",
        "cpu",
    ];

    for name in vocabulary {
        let field = lookup(name).unwrap_or_else(|e| panic!("{} should resolve: {}", name, e));
        assert_eq!(field.name, name);
        assert!(!field.column_expression.is_empty());
    }
    assert_eq!(FIELDS.len(), vocabulary.len());
}

#[test]
fn test_bogus_field() {
    assert_eq!(
        lookup("bogus"),
        Err(FieldError::UnsupportedField("bogus".into()))
    );
}

#[test]
fn test_error_message_names_token() {
    let err = lookup("pyversions").unwrap_err();
    assert_eq!(err.to_string(), "unsupported field: pyversions");
}

#[test]
fn test_lookup_all_preserves_order() {
    let fields = lookup_all(&["country", "pyversion", "cpu"]).unwrap();
    let labels: Vec<_> = fields.iter().map(|f| f.display_label).collect();
    assert_eq!(labels, vec!["country", "python_version", "cpu"]);
}

#[test]
fn test_lookup_all_stops_at_first_unknown() {
    let result = lookup_all(&["country", "nope", "alsonope"]);
    assert_eq!(result, Err(FieldError::UnsupportedField("nope".into())));
}

#[test]
fn test_lookup_all_empty() {
    let empty: [&str; 0] = [];
    assert!(lookup_all(&empty).unwrap().is_empty());
}

#[test]
fn test_kinds() {
    let percent: Vec<_> = FIELDS
        .iter()
        .filter(|f| f.kind == FieldKind::Percent)
        .map(|f| f.name)
        .collect();
    assert_eq!(percent, vec!["percent3", "percent2"]);
}

#[test]
fn test_by_label_round_trips_names() {
    for field in FIELDS {
        assert_eq!(by_label(field.display_label), Some(field));
    }
}

#[test]
fn test_lookup_all_rejects_repeated_token() {
    assert_eq!(
        lookup_all(&["country", "cpu", "country"]).map(|f| f.len()),
        Err(FieldError::DuplicateField("country".into()))
    );
}
