use rest_connector_core::{decode_int, decode_map, ParseError};

#[test]
fn json_object_decodes_all_pairs() {
    let map = decode_map(r#"{"key1": "value1", "key2": "value2"}"#).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map["key1"], "value1");
    assert_eq!(map["key2"], "value2");
}

#[test]
fn json_object_with_leading_whitespace_is_still_json() {
    let map = decode_map("  \n{\"a\": \"b\"}").unwrap();
    assert_eq!(map["a"], "b");
}

#[test]
fn json_scalar_values_are_rendered_as_strings() {
    let map = decode_map(r#"{"limit": 10, "debug": true}"#).unwrap();
    assert_eq!(map["limit"], "10");
    assert_eq!(map["debug"], "true");
}

#[test]
fn json_nested_value_is_rejected() {
    let err = decode_map(r#"{"a": {"b": "c"}}"#).unwrap_err();
    match err {
        ParseError::NonScalarValue { key } => assert_eq!(key, "a"),
        other => panic!("expected non-scalar error, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = decode_map(r#"{"a": "b, "c": "d"}"#).unwrap_err();
    assert!(matches!(err, ParseError::Json(_)));

    let err = decode_map(r#"{"key1}"#).unwrap_err();
    assert!(matches!(err, ParseError::Json(_)));
}

#[test]
fn key_value_pairs_decode_all_pairs() {
    let map = decode_map("key1=value1;key2=value2;").unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map["key1"], "value1");
    assert_eq!(map["key2"], "value2");
}

#[test]
fn key_value_pairs_have_whitespace_trimmed() {
    let map = decode_map("\tkey1\t=\tvalue1\t;  key2  =  value2  ;").unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map["key1"], "value1");
    assert_eq!(map["key2"], "value2");
}

#[test]
fn key_value_pair_may_have_empty_value() {
    let map = decode_map("x-empty=").unwrap();
    assert_eq!(map["x-empty"], "");
}

#[test]
fn token_without_equals_is_rejected() {
    let err = decode_map("header1").unwrap_err();
    assert!(matches!(err, ParseError::InvalidPair(ref p) if p == "header1"));

    assert!(decode_map("invalidData").is_err());
    assert!(decode_map("a=1;broken").is_err());
}

#[test]
fn token_with_two_equals_is_rejected() {
    let err = decode_map("a=b=c").unwrap_err();
    assert!(matches!(err, ParseError::InvalidPair(_)));
}

#[test]
fn empty_key_is_rejected() {
    assert!(matches!(
        decode_map("=value").unwrap_err(),
        ParseError::InvalidPair(_)
    ));
}

#[test]
fn whitespace_only_input_is_rejected() {
    assert!(matches!(
        decode_map("   ").unwrap_err(),
        ParseError::InvalidPair(_)
    ));
    assert!(decode_map(";").is_err());
}

#[test]
fn decode_int_trims_and_parses() {
    assert_eq!(decode_int(" 42 ").unwrap(), 42);
    assert_eq!(decode_int("-3").unwrap(), -3);
    assert!(matches!(
        decode_int("ten").unwrap_err(),
        ParseError::InvalidInteger { ref value, .. } if value == "ten"
    ));
}
