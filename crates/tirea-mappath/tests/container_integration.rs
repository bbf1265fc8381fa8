//! Integration tests for the `Container` wrapper.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tirea_mappath::{Container, ErrorKind, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_container_builds_document_step_by_step() {
    init_tracing();
    let mut c = Container::new();

    c.put("users.0.name", "Alice").unwrap();
    c.put("users.0.roles.0", "admin").unwrap();
    c.put("users.1.name", "Bob").unwrap();
    c.put("users.-1.roles", json!([])).unwrap();

    assert_eq!(
        c.data(),
        &json!({
            "users": [
                {"name": "Alice", "roles": ["admin"]},
                {"name": "Bob", "roles": []}
            ]
        })
    );
    assert_eq!(c.get("users.-2.roles.0").unwrap(), "admin");
}

#[test]
fn test_container_errors_do_not_leak_partial_writes() {
    init_tracing();
    let mut c = Container::from_value(json!({"list": [1, {"k": "v"}], "leaf": 3}));
    let before = c.data().clone();

    let cases = [
        ("list.x", ErrorKind::InvalidPath),
        ("list.-3", ErrorKind::InvalidPath),
        ("leaf.a", ErrorKind::InvalidPath),
        ("list.1.k.z", ErrorKind::InvalidPath),
        ("", ErrorKind::InvalidPath),
    ];
    for (path, kind) in cases {
        assert_eq!(c.put(path, 1).unwrap_err().kind(), kind, "put {path}");
    }

    let cases = [
        ("list.5", ErrorKind::NotFound),
        ("list.1.missing", ErrorKind::NotFound),
        ("list.x", ErrorKind::InvalidPath),
        ("leaf.a", ErrorKind::InvalidPath),
        ("nope.a", ErrorKind::NotFound),
    ];
    for (path, kind) in cases {
        assert_eq!(c.delete(path).unwrap_err().kind(), kind, "delete {path}");
    }

    assert_eq!(c.data(), &before);
}

#[test]
fn test_container_get_reports_not_found() {
    let c = Container::from_value(json!({"leaf": 3}));
    assert_eq!(c.get("leaf.a").unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(c.get("gone").unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(c.get(".leaf").unwrap_err().kind(), ErrorKind::InvalidPath);
}

#[test]
fn test_container_dot_merge() {
    let mut c = Container::new();
    c.put(".", json!({"a": 1})).unwrap();
    c.put(".", json!({"b": 2})).unwrap();
    assert_eq!(c.data(), &json!({"a": 1, "b": 2}));

    let mut seq = Container::from_value(json!([1]));
    seq.put(".", json!([2])).unwrap();
    assert_eq!(seq.into_inner(), json!([1, 2]));
}

#[test]
fn test_container_clone_branches() {
    let mut base = Container::from_value(json!({"config": {"retries": 3}}));
    let mut branch = base.clone();

    branch.put("config.retries", 5).unwrap();
    base.delete("config.retries").unwrap();

    assert_eq!(branch.get("config.retries").unwrap(), 5);
    assert!(base.get("config.retries").unwrap_err().is_not_found());
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Envelope {
    name: String,
    body: Container,
}

#[test]
fn test_container_embeds_in_serde_struct() {
    let raw = r#"{"name":"doc","body":{"items":[1,2]}}"#;
    let mut envelope: Envelope = serde_json::from_str(raw).unwrap();
    envelope.body.put("items.-1", 20).unwrap();

    let value: Value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value, json!({"name": "doc", "body": {"items": [1, 20]}}));
}
