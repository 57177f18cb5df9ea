#![allow(clippy::unwrap_used, clippy::expect_used)]

use docvers_core::errors::{DocversError, ExError, ExErrorKind};
use std::error::Error;

#[test]
fn test_invalid_options_verifiable_by_kind() {
    let err: ExError = DocversError::InvalidOptions {
        path: "docvers.toml".to_string(),
        reason: "unknown field `tagz`".to_string(),
    }
    .into();

    assert_eq!(err.kind(), ExErrorKind::InvalidOptions);
    assert_eq!(err.code(), "ERR_INVALID_OPTIONS");
    assert_eq!(err.path(), Some("docvers.toml"));
    assert!(err.message().contains("tagz"));
}

#[test]
fn test_missing_field_message_names_the_field() {
    let err: ExError = DocversError::MissingField {
        field: "version".to_string(),
        context: "versions.json[2]".to_string(),
    }
    .into();

    assert_eq!(err.kind(), ExErrorKind::MissingField);
    assert!(err.message().contains("`version`"));
    assert!(err.message().contains("versions.json[2]"));
}

#[test]
fn test_json_errors_become_serialization_errors() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: ExError = DocversError::from(json_err).into();

    assert_eq!(err.kind(), ExErrorKind::Serialization);
    assert_eq!(err.code(), "ERR_SERIALIZATION");
}

#[test]
fn test_display_carries_context() {
    let err = ExError::new(ExErrorKind::Io)
        .with_op("expand_document")
        .with_version("1.1.0")
        .with_path("out/1.1.0/api.json")
        .with_message("permission denied");

    assert_eq!(
        err.to_string(),
        "[ERR_IO] in operation 'expand_document': permission denied (version: 1.1.0) (path: out/1.1.0/api.json)"
    );
}

#[test]
fn test_bad_version_record_maps_to_invalid_document_with_version() {
    let err: ExError = DocversError::InvalidVersionContent {
        version: "1.1.0".to_string(),
        context: "versions.json[1]".to_string(),
        reason: "data did not match any variant".to_string(),
    }
    .into();

    assert_eq!(err.kind(), ExErrorKind::InvalidDocument);
    assert_eq!(err.version(), Some("1.1.0"));
    assert!(err.to_string().contains("(version: 1.1.0)"));
    assert!(err.source().is_none());
}
