//! Canonicalization of arbitrary value graphs into JSON-safe data.
//!
//! Input to the pipeline is an [`InputValue`], a closed set of shapes wide
//! enough to describe what agent runtimes hand to a tool call. The single
//! operation here is [`canonicalize`], which rewrites any such graph into a
//! [`serde_json::Value`] that is guaranteed to serialize. Containers are
//! rebuilt recursively and scalars that JSON cannot represent fall back to
//! their display text, so the result never depends on what the converter
//! downstream can tolerate.

use serde_json::{Map, Number, Value};

// ── Input model ────────────────────────────────────────────────────

/// A value graph accepted for conversion.
///
/// This is deliberately wider than JSON. Sets and non-string-keyed maps have
/// no JSON form and exist so callers can hand over data as they hold it;
/// [`canonicalize`] decides how each shape lands in JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    /// Raw bytes. Canonicalized as lossy UTF-8 text.
    Bytes(Vec<u8>),
    /// An ordered sequence. Element order is preserved.
    Seq(Vec<InputValue>),
    /// An unordered collection. Canonicalized into a sorted sequence so the
    /// output does not depend on iteration order.
    Set(Vec<InputValue>),
    /// A mapping with arbitrary keys. Keys are coerced to strings and later
    /// duplicates overwrite earlier ones.
    Map(Vec<(InputValue, InputValue)>),
    /// A record with named fields, such as a deserialized struct. Becomes an
    /// object with the field names as keys.
    Object(Vec<(String, InputValue)>),
}

impl From<Value> for InputValue {
    /// Plain JSON maps onto the input model without loss: arrays become
    /// sequences and objects become maps with string keys.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => InputValue::Null,
            Value::Bool(b) => InputValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    InputValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    InputValue::UInt(u)
                } else {
                    InputValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => InputValue::Str(s),
            Value::Array(items) => InputValue::Seq(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => InputValue::Map(
                map.into_iter()
                    .map(|(k, v)| (InputValue::Str(k), v.into()))
                    .collect(),
            ),
        }
    }
}

// ── Canonicalization ───────────────────────────────────────────────

/// Rewrite a value graph into JSON-safe data.
///
/// The dispatch order goes from the most specific shape to the most general:
/// maps before records, sequences and sets before scalars. Empty containers
/// stay empty rather than collapsing to `null`. The result always serializes
/// with `serde_json`; this function cannot fail.
pub fn canonicalize(value: InputValue) -> Value {
    match value {
        InputValue::Map(entries) => {
            let mut map = Map::new();
            for (key, val) in entries {
                map.insert(string_form(&canonicalize(key)), canonicalize(val));
            }
            Value::Object(map)
        }
        InputValue::Object(fields) => {
            let mut map = Map::new();
            for (name, val) in fields {
                map.insert(name, canonicalize(val));
            }
            Value::Object(map)
        }
        InputValue::Seq(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        InputValue::Set(items) => {
            let mut elems: Vec<Value> = items.into_iter().map(canonicalize).collect();
            // Primary key: the string form. Secondary key: compact JSON, so
            // elements whose string forms collide (1 vs "1") still land in
            // one order no matter how the set was iterated.
            elems.sort_by_cached_key(|v| (string_form(v), v.to_string()));
            Value::Array(elems)
        }
        InputValue::Null => Value::Null,
        InputValue::Bool(b) => Value::Bool(b),
        InputValue::Int(i) => Value::Number(i.into()),
        InputValue::UInt(u) => Value::Number(u.into()),
        InputValue::Float(f) => match Number::from_f64(f) {
            Some(n) => Value::Number(n),
            // NaN and the infinities have no JSON form.
            None => Value::String(f.to_string()),
        },
        InputValue::Str(s) => Value::String(s),
        InputValue::Bytes(b) => Value::String(String::from_utf8_lossy(&b).into_owned()),
    }
}

/// The coercion used for map keys and set ordering: strings as they are,
/// everything else as compact JSON.
fn string_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_pass_through() {
        assert_eq!(canonicalize(InputValue::Null), json!(null));
        assert_eq!(canonicalize(InputValue::Bool(true)), json!(true));
        assert_eq!(canonicalize(InputValue::Int(-7)), json!(-7));
        assert_eq!(canonicalize(InputValue::UInt(u64::MAX)), json!(u64::MAX));
        assert_eq!(canonicalize(InputValue::Float(2.5)), json!(2.5));
        assert_eq!(
            canonicalize(InputValue::Str("hi".into())),
            json!("hi")
        );
    }

    #[test]
    fn non_finite_floats_fall_back_to_text() {
        assert_eq!(canonicalize(InputValue::Float(f64::NAN)), json!("NaN"));
        assert_eq!(canonicalize(InputValue::Float(f64::INFINITY)), json!("inf"));
        assert_eq!(
            canonicalize(InputValue::Float(f64::NEG_INFINITY)),
            json!("-inf")
        );
    }

    #[test]
    fn bytes_become_lossy_text() {
        assert_eq!(
            canonicalize(InputValue::Bytes(b"abc".to_vec())),
            json!("abc")
        );
        // Invalid UTF-8 is replaced, not rejected.
        assert_eq!(
            canonicalize(InputValue::Bytes(vec![0x61, 0xff, 0x62])),
            json!("a\u{fffd}b")
        );
    }

    #[test]
    fn map_keys_are_coerced_to_strings() {
        let map = InputValue::Map(vec![
            (InputValue::Int(1), InputValue::Str("int".into())),
            (InputValue::Bool(true), InputValue::Str("bool".into())),
            (InputValue::Float(2.5), InputValue::Str("float".into())),
            (InputValue::Null, InputValue::Str("null".into())),
        ]);
        assert_eq!(
            canonicalize(map),
            json!({"1": "int", "true": "bool", "2.5": "float", "null": "null"})
        );
    }

    #[test]
    fn map_preserves_insertion_order() {
        let map = InputValue::Map(vec![
            (InputValue::Str("z".into()), InputValue::Int(1)),
            (InputValue::Str("a".into()), InputValue::Int(2)),
            (InputValue::Str("m".into()), InputValue::Int(3)),
        ]);
        let text = serde_json::to_string(&canonicalize(map)).unwrap();
        assert_eq!(text, r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn later_duplicate_keys_overwrite_earlier_ones() {
        let map = InputValue::Map(vec![
            (InputValue::Int(1), InputValue::Str("first".into())),
            (InputValue::Str("1".into()), InputValue::Str("second".into())),
        ]);
        assert_eq!(canonicalize(map), json!({"1": "second"}));
    }

    #[test]
    fn records_become_objects() {
        let record = InputValue::Object(vec![
            ("id".into(), InputValue::Int(1)),
            ("name".into(), InputValue::Str("ada".into())),
        ]);
        assert_eq!(canonicalize(record), json!({"id": 1, "name": "ada"}));
    }

    #[test]
    fn sequences_keep_their_order() {
        let seq = InputValue::Seq(vec![
            InputValue::Int(3),
            InputValue::Int(1),
            InputValue::Int(2),
        ]);
        assert_eq!(canonicalize(seq), json!([3, 1, 2]));
    }

    #[test]
    fn sets_sort_by_string_form() {
        // "1" < "10" < "2" lexicographically.
        let set = InputValue::Set(vec![
            InputValue::Int(10),
            InputValue::Int(2),
            InputValue::Int(1),
        ]);
        assert_eq!(canonicalize(set), json!([1, 10, 2]));
    }

    #[test]
    fn set_order_is_independent_of_iteration_order() {
        let forward = InputValue::Set(vec![
            InputValue::Str("b".into()),
            InputValue::Str("a".into()),
            InputValue::Int(1),
        ]);
        let backward = InputValue::Set(vec![
            InputValue::Int(1),
            InputValue::Str("a".into()),
            InputValue::Str("b".into()),
        ]);
        assert_eq!(canonicalize(forward), canonicalize(backward));
    }

    #[test]
    fn empty_containers_stay_empty() {
        assert_eq!(canonicalize(InputValue::Seq(vec![])), json!([]));
        assert_eq!(canonicalize(InputValue::Set(vec![])), json!([]));
        assert_eq!(canonicalize(InputValue::Map(vec![])), json!({}));
        assert_eq!(canonicalize(InputValue::Object(vec![])), json!({}));
    }

    #[test]
    fn nested_mixed_graph_canonicalizes_whole() {
        let graph = InputValue::Object(vec![
            (
                "a".into(),
                InputValue::Seq(vec![
                    InputValue::Int(1),
                    InputValue::Int(2),
                    InputValue::Int(3),
                ]),
            ),
            (
                "b".into(),
                InputValue::Set(vec![InputValue::Int(2), InputValue::Int(1)]),
            ),
        ]);
        assert_eq!(canonicalize(graph), json!({"a": [1, 2, 3], "b": [1, 2]}));
    }

    #[test]
    fn json_values_round_trip_through_the_input_model() {
        let original = json!({
            "users": [{"id": 1, "tags": ["a", "b"]}, {"id": 2, "tags": []}],
            "count": 2,
            "ratio": 0.5,
            "active": true,
            "note": null
        });
        let canon = canonicalize(InputValue::from(original.clone()));
        assert_eq!(canon, original);
    }
}
