use crate::cow_yaml::parse_yaml_str;

use super::*;

#[test]
fn defaults_bind_the_skip_pattern() {
    let bindings = Bindings::with_defaults();
    assert_eq!(bindings.get(GINKGO_SKIP_VARIABLE).unwrap().as_str(), DEFAULT_GINKGO_SKIP);
    assert!(DEFAULT_GINKGO_SKIP.starts_with("--ginkgo.skip="));
}

#[test]
fn insert_overrides_in_place() {
    let mut bindings = Bindings::default();
    bindings.insert("a", "1").unwrap();
    bindings.insert("b", "2").unwrap();
    bindings.insert("a", "3").unwrap();
    assert_eq!(bindings.names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(bindings.get("a").unwrap().as_str(), "3");
}

#[test]
fn insert_rejects_invalid_names() {
    let mut bindings = Bindings::default();
    assert!(bindings.insert("", "x").is_err());
    assert!(bindings.insert("1abc", "x").is_err());
    assert!(bindings.insert("with-dash", "x").is_err());
    assert!(bindings.insert("_ok1", "x").is_ok());
}

#[test]
fn extend_from_yaml_stringifies_scalars() {
    let docs = parse_yaml_str("ginkgo_skip: --ginkgo.skip=foo\nretries: 3\nenabled: true\nempty:\n").unwrap();
    let mut bindings = Bindings::with_defaults();
    bindings.extend_from_yaml(&docs[0]).unwrap();
    assert_eq!(bindings.get("ginkgo_skip").unwrap().as_str(), "--ginkgo.skip=foo");
    assert_eq!(bindings.get("retries").unwrap().as_str(), "3");
    assert_eq!(bindings.get("enabled").unwrap().as_str(), "true");
    assert_eq!(bindings.get("empty").unwrap().as_str(), "");
}

#[test]
fn extend_from_yaml_rejects_nested_values() {
    let docs = parse_yaml_str("matrix:\n- a\n").unwrap();
    let err = Bindings::default().extend_from_yaml(&docs[0]).unwrap_err();
    assert_eq!(err.to_string(), "variable \"matrix\" must be a scalar, found sequence");
}

#[test]
fn extend_from_yaml_rejects_non_mappings() {
    let docs = parse_yaml_str("- a\n").unwrap();
    assert!(Bindings::default().extend_from_yaml(&docs[0]).is_err());
}
