//! Property-Based Test Generators
//!
//! Provides proptest strategies for meta-testing the verifier: skip sets,
//! property names and alternative sentinel values that still differ from
//! each type's default.

use bean_kernel::{Primitive, TypeDescriptor};
use proptest::prelude::*;

use crate::sentinels::SentinelValues;

/// Strategy for generating the primitive kinds
pub fn primitive_strategy() -> impl Strategy<Value = Primitive> {
    prop_oneof![
        Just(Primitive::Boolean),
        Just(Primitive::Int),
        Just(Primitive::Long),
        Just(Primitive::Double),
        Just(Primitive::Float),
        Just(Primitive::Char),
    ]
}

/// Strategy for generating property types covered by the sentinel table
pub fn builtin_type_strategy() -> impl Strategy<Value = TypeDescriptor> {
    let leaf = prop_oneof![
        Just(TypeDescriptor::String),
        primitive_strategy().prop_map(TypeDescriptor::Primitive),
        primitive_strategy().prop_map(TypeDescriptor::Boxed),
    ];
    leaf.prop_recursive(2, 4, 1, |inner| inner.prop_map(TypeDescriptor::array_of))
}

/// Strategy for generating valid camel-case property names
///
/// The second character is never uppercase, so `get` + capitalized name
/// decapitalizes back to the same property name.
pub fn property_name_strategy() -> impl Strategy<Value = String> {
    "[a-z]([a-z0-9][a-zA-Z0-9]{0,14})?"
}

/// Strategy for generating a subset of the given property names to skip
pub fn skip_set_strategy(names: Vec<&'static str>) -> impl Strategy<Value = Vec<&'static str>> {
    let len = names.len();
    proptest::sample::subsequence(names, 0..=len)
}

/// Strategy for generating non-empty string sentinels
pub fn string_sentinel_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}"
}

/// Strategy for generating non-zero int sentinels
pub fn int_sentinel_strategy() -> impl Strategy<Value = i32> {
    any::<i32>().prop_filter("sentinel must differ from the default", |v| *v != 0)
}

/// Strategy for generating non-zero long sentinels
pub fn long_sentinel_strategy() -> impl Strategy<Value = i64> {
    any::<i64>().prop_filter("sentinel must differ from the default", |v| *v != 0)
}

/// Strategy for generating non-default char sentinels
pub fn char_sentinel_strategy() -> impl Strategy<Value = char> {
    any::<char>().prop_filter("sentinel must differ from the default", |c| *c != '\0')
}

/// Sentinel provider with generated values
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSentinels {
    pub string: String,
    pub int: i32,
    pub long: i64,
    pub character: char,
}

impl SentinelValues for GeneratedSentinels {
    fn string_value(&self) -> String {
        self.string.clone()
    }

    fn int_value(&self) -> i32 {
        self.int
    }

    fn long_value(&self) -> i64 {
        self.long
    }

    fn char_value(&self) -> char {
        self.character
    }
}

/// Strategy for generating a complete set of overridden sentinels
pub fn generated_sentinels_strategy() -> impl Strategy<Value = GeneratedSentinels> {
    (
        string_sentinel_strategy(),
        int_sentinel_strategy(),
        long_sentinel_strategy(),
        char_sentinel_strategy(),
    )
        .prop_map(|(string, int, long, character)| GeneratedSentinels {
            string,
            int,
            long,
            character,
        })
}
