//! Logical combinator tests, including the async lifting.

mod common;

use common::{assert_accepts, assert_rejects, init_logging};
use regex::Regex;
use std::time::Duration;
use tuple_schema::{
    self as s, BooleanOptions, ErrorKind, Mapper, NumericStringOptions, Object, ObjectOptions,
    StringOptions, Value, ValidationError,
};

fn boolean() -> Mapper {
    s::boolean(BooleanOptions::default()).expect("Failed to build schema")
}

fn string() -> Mapper {
    s::string(StringOptions::default()).expect("Failed to build schema")
}

fn numeric_string() -> Mapper {
    s::numeric_string(NumericStringOptions::default()).expect("Failed to build schema")
}

#[test]
fn test_or() {
    init_logging();
    let schema = s::or([boolean(), string()]);
    assert_accepts(&schema, false);
    assert_accepts(&schema, true);
    assert_accepts(&schema, "");
    assert_accepts(&schema, "string");
    assert_rejects(&schema, Object::new());

    let error = schema.validate(&Value::from(321)).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Aggregate);
    assert_eq!(error.errors().len(), 2);
    assert_eq!(error.path(), None);
}

#[test]
fn test_or_with_options() {
    let schema = s::or([
        s::string(StringOptions {
            matches: Some(Regex::new(r"\d\d \w+ \d\d\d\d \d\d:\d\d:\d\d \w+?").unwrap()),
            ..Default::default()
        })
        .expect("Failed to build schema"),
        s::object(ObjectOptions {
            class: Some("Date".to_string()),
            ..Default::default()
        })
        .expect("Failed to build schema"),
    ]);
    assert_accepts(&schema, "04 Apr 1995 00:12:00 GMT");
    assert_accepts(&schema, Object::new().with_class("Date"));
    assert_rejects(&schema, Value::array(Vec::<Value>::new()));
    assert_rejects(&schema, "bad string");
}

#[test]
fn test_and() {
    init_logging();
    let schema = s::and([
        s::string(StringOptions {
            matches: Some(Regex::new("0+").unwrap()),
            ..Default::default()
        })
        .expect("Failed to build schema"),
        numeric_string(),
    ]);
    assert_accepts(&schema, "00000");
    assert_rejects(&schema, Value::array(Vec::<Value>::new()));

    let error = schema.validate(&Value::from("bad string")).unwrap_err();
    assert_eq!(error.errors().len(), 2);
}

#[test]
fn test_and_second_step_sees_pre_failure_value() {
    let upper = s::string(StringOptions {
        map: Some(s::Transform::new(|value| {
            Value::from(value.as_str().map(str::to_uppercase))
        })),
        ..Default::default()
    })
    .expect("Failed to build schema");
    let reject_everything = Mapper::new(|value, path| Err(ValidationError::check_failed(value, path)));

    let schema = s::and([upper.clone(), reject_everything, upper, string()]);
    let error = schema.validate(&Value::from("abc")).unwrap_err();
    assert_eq!(error.errors().len(), 1);
    assert_eq!(error.to_string(), "Validation failed! got ABC at root");
}

#[test]
fn test_not() {
    let schema = s::not(numeric_string());
    assert_accepts(&schema, "Non numeric string");
    match schema.validate(&Value::from("0000")) {
        Err(ValidationError::NotMatched { path }) => assert_eq!(path, "root"),
        other => panic!("Expected NotMatched error, got {:?}", other),
    }
}

#[test]
fn test_not_discards_inner_map() {
    let schema = s::not(s::overwrite(Default::default()));
    assert!(schema.validate(&Value::from(1)).is_err());

    let schema = s::not(s::not(string()));
    assert_eq!(schema.validate(&Value::from("kept")).unwrap(), Value::from("kept"));
}

#[tokio::test]
async fn test_async_val_awaits_before_validating() {
    init_logging();
    let schema = s::async_val(numeric_string());

    let delayed = async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Ok::<_, ValidationError>(Value::from("42"))
    };
    assert_eq!(schema.validate(delayed).await.unwrap(), Value::from("42"));

    let invalid = async { Ok::<_, ValidationError>(Value::from("forty two")) };
    assert!(schema.validate(invalid).await.is_err());
}

#[tokio::test]
async fn test_async_val_propagates_rejection() {
    let schema = s::async_val(string());
    let failed = async { Err::<Value, _>(ValidationError::rejected("connection reset", s::Path::root())) };
    let error = schema.validate(failed).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Rejected);
}

#[tokio::test]
async fn test_async_val_independent_futures() {
    let schema = s::async_val(string());
    let (a, b) = futures::future::join(
        schema.validate(async { Ok::<_, ValidationError>(Value::from("a")) }),
        schema.validate(async { Ok::<_, ValidationError>(Value::from(2)) }),
    )
    .await;
    assert!(a.is_ok());
    assert!(b.is_err());
}

#[test]
fn test_repeat() {
    let schema = s::s_tuple(s::repeat(3, &string()));
    assert!(schema.validate(&Value::array(["a", "b", "c"])).is_ok());
    assert!(schema.validate(&Value::array(["a", "b"])).is_err());
    assert!(s::repeat(0, &string()).is_empty());
}
