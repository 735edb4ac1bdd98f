//! Property tests for canonicalization.
//!
//! Any value graph built from the supported shapes must canonicalize to
//! JSON-serializable data, must do so deterministically, and must order
//! sets independently of how they were iterated.

use proptest::prelude::*;
use toon_relay::pipeline::{InputValue, canonicalize};

fn scalar() -> impl Strategy<Value = InputValue> {
    prop_oneof![
        Just(InputValue::Null),
        any::<bool>().prop_map(InputValue::Bool),
        any::<i64>().prop_map(InputValue::Int),
        any::<u64>().prop_map(InputValue::UInt),
        any::<f64>().prop_map(InputValue::Float),
        "\\PC{0,24}".prop_map(InputValue::Str),
        proptest::collection::vec(any::<u8>(), 0..24).prop_map(InputValue::Bytes),
    ]
}

fn input_value() -> impl Strategy<Value = InputValue> {
    scalar().prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(InputValue::Seq),
            proptest::collection::vec(inner.clone(), 0..6).prop_map(InputValue::Set),
            proptest::collection::vec((scalar(), inner.clone()), 0..6)
                .prop_map(InputValue::Map),
            proptest::collection::vec(("[a-z]{1,8}", inner), 0..6)
                .prop_map(InputValue::Object),
        ]
    })
}

proptest! {
    #[test]
    fn canonical_values_always_serialize(value in input_value()) {
        let canon = canonicalize(value);
        let text = serde_json::to_string_pretty(&canon)
            .expect("canonical values are JSON-serializable");
        let parsed: serde_json::Value = serde_json::from_str(&text).expect("own output parses");
        prop_assert_eq!(parsed, canon);
    }

    #[test]
    fn canonicalization_is_deterministic(value in input_value()) {
        prop_assert_eq!(canonicalize(value.clone()), canonicalize(value));
    }

    #[test]
    fn set_order_is_independent_of_iteration_order(
        elems in proptest::collection::vec(scalar(), 0..8)
    ) {
        let mut reversed = elems.clone();
        reversed.reverse();
        prop_assert_eq!(
            canonicalize(InputValue::Set(elems)),
            canonicalize(InputValue::Set(reversed))
        );
    }
}
