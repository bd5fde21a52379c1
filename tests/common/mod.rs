//! Shared helpers for the integration suites.

#![allow(dead_code)]

use serde_json::json;
use tuple_schema::{Mapper, Value, parse};

/// Install a test logger once per binary so `trace!` output shows up with
/// `RUST_LOG=trace`.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Assert that `schema` accepts `input` and returns it unchanged.
pub fn assert_accepts(schema: &Mapper, input: impl Into<Value>) {
    let input = input.into();
    match schema.validate(&input) {
        Ok(output) => assert_eq!(output, input, "schema changed an accepted value"),
        Err(error) => panic!("Expected {} to be accepted, got error: {}", input, error),
    }
}

/// Assert that `schema` rejects `input`, both directly and through `parse`.
pub fn assert_rejects(schema: &Mapper, input: impl Into<Value>) {
    let input = input.into();
    if let Ok(output) = schema.validate(&input) {
        panic!("Expected {} to be rejected, got {}", input, output);
    }
    assert!(parse(schema, &input).is_sentinel());
}

/// A user payload shaped like a typical JSON API response.
pub fn sample_user(id: u32) -> Value {
    Value::from(json!({
        "id": id,
        "name": "Leanne Graham",
        "username": "Bret",
        "email": "Sincere@april.biz",
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": "Gwenborough",
            "zipcode": "92998-3874",
            "geo": {"lat": "-37.3159", "lng": "81.1496"}
        },
        "phone": "1-770-736-8031 x56442",
        "website": "hildegard.org",
        "company": {
            "name": "Romaguera-Crona",
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    }))
}
