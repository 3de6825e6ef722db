// tests/nesting.rs

use forgewatch::errors::ForgewatchError;
use forgewatch::exec::{NESTED_MARKER_VAR, ensure_not_nested};

#[test]
fn refuses_to_start_inside_a_supervised_child() {
    let result = ensure_not_nested(|key| (key == NESTED_MARKER_VAR).then(|| "1".to_string()));

    match result {
        Err(ForgewatchError::NestedInstance) => {}
        other => panic!("expected NestedInstance, got {other:?}"),
    }
}

#[test]
fn starts_when_marker_is_absent_or_different() {
    assert!(ensure_not_nested(|_| None).is_ok());
    assert!(ensure_not_nested(|_| Some("0".to_string())).is_ok());
}
