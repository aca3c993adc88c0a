//! Default Sentinel Table
//!
//! Fixed, non-default test values for the built-in property types. Every
//! provider is a trait method with a default body, so a caller overrides
//! only the values it needs to change.

use bean_kernel::{ArrayValue, EnumType, ObjectType, TypeDescriptor, Value, InvocationError};

/// Sentinel used for string properties
pub const TEST_STRING: &str = "test string";
/// Sentinel used for boolean properties
pub const TEST_BOOLEAN: bool = true;
/// Sentinel used for 32-bit integer properties
pub const TEST_INT: i32 = 1;
/// Sentinel used for 64-bit integer properties
pub const TEST_LONG: i64 = 1;
/// Sentinel used for double-precision properties
pub const TEST_DOUBLE: f64 = 1.0;
/// Sentinel used for single-precision properties
pub const TEST_FLOAT: f32 = 1.0;
/// Sentinel used for character properties
pub const TEST_CHAR: char = 'Y';

/// Providers of test values, one per built-in type
pub trait SentinelValues {
    /// Custom construction tried before any built-in rule
    ///
    /// The default declines for every type. Overrides plugging in a mocking
    /// strategy should consult `TypeDescriptor::is_mockable` first.
    fn mock_value(&self, _ty: &TypeDescriptor) -> Option<Value> {
        None
    }

    fn string_value(&self) -> String {
        TEST_STRING.to_string()
    }

    /// A one-element array of the component type
    ///
    /// The element is the component's zero value, except for enum and object
    /// components: `Vec<T>` cannot hold Null, so those get the first constant
    /// or a freshly constructed instance when one is available.
    fn array_value(&self, component: &TypeDescriptor) -> Value {
        Value::Array(ArrayValue {
            component: component.clone(),
            elements: vec![array_element(component)],
        })
    }

    fn boolean_value(&self) -> bool {
        TEST_BOOLEAN
    }

    fn int_value(&self) -> i32 {
        TEST_INT
    }

    fn long_value(&self) -> i64 {
        TEST_LONG
    }

    fn double_value(&self) -> f64 {
        TEST_DOUBLE
    }

    fn float_value(&self) -> f32 {
        TEST_FLOAT
    }

    fn char_value(&self) -> char {
        TEST_CHAR
    }

    /// The first declared constant, or `None` for an enum without constants
    fn enum_value(&self, enum_type: &EnumType) -> Option<Value> {
        enum_type.first_constant()
    }

    /// Fallback for object types: an instance from the no-argument constructor
    ///
    /// Returns `None` when the type has no such constructor.
    fn non_standard_value(&self, object_type: &ObjectType) -> Option<Result<Value, InvocationError>> {
        object_type.construct()
    }
}

fn array_element(component: &TypeDescriptor) -> Value {
    let filled = match component {
        TypeDescriptor::Enum(enum_type) => enum_type.first_constant(),
        TypeDescriptor::Object(object_type) => object_type.construct().and_then(Result::ok),
        _ => None,
    };
    filled.unwrap_or_else(|| component.default_value())
}

/// The unmodified sentinel table
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSentinels;

impl SentinelValues for DefaultSentinels {}

impl<S: SentinelValues + ?Sized> SentinelValues for &S {
    fn mock_value(&self, ty: &TypeDescriptor) -> Option<Value> {
        (**self).mock_value(ty)
    }

    fn string_value(&self) -> String {
        (**self).string_value()
    }

    fn array_value(&self, component: &TypeDescriptor) -> Value {
        (**self).array_value(component)
    }

    fn boolean_value(&self) -> bool {
        (**self).boolean_value()
    }

    fn int_value(&self) -> i32 {
        (**self).int_value()
    }

    fn long_value(&self) -> i64 {
        (**self).long_value()
    }

    fn double_value(&self) -> f64 {
        (**self).double_value()
    }

    fn float_value(&self) -> f32 {
        (**self).float_value()
    }

    fn char_value(&self) -> char {
        (**self).char_value()
    }

    fn enum_value(&self, enum_type: &EnumType) -> Option<Value> {
        (**self).enum_value(enum_type)
    }

    fn non_standard_value(&self, object_type: &ObjectType) -> Option<Result<Value, InvocationError>> {
        (**self).non_standard_value(object_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bean_kernel::Primitive;

    #[test]
    fn test_sentinels_differ_from_defaults() {
        let sentinels = DefaultSentinels;
        assert_ne!(sentinels.string_value(), String::default());
        assert_ne!(sentinels.boolean_value(), bool::default());
        assert_ne!(sentinels.int_value(), i32::default());
        assert_ne!(sentinels.long_value(), i64::default());
        assert_ne!(sentinels.double_value(), f64::default());
        assert_ne!(sentinels.float_value(), f32::default());
        assert_ne!(sentinels.char_value(), char::default());
    }

    #[test]
    fn test_default_table() {
        let sentinels = DefaultSentinels;
        assert_eq!(sentinels.string_value(), "test string");
        assert!(sentinels.boolean_value());
        assert_eq!(sentinels.int_value(), 1);
        assert_eq!(sentinels.long_value(), 1);
        assert_eq!(sentinels.double_value(), 1.0);
        assert_eq!(sentinels.float_value(), 1.0);
        assert_eq!(sentinels.char_value(), 'Y');
    }

    #[test]
    fn test_array_sentinel_has_one_zero_element() {
        let int = TypeDescriptor::Primitive(Primitive::Int);
        match DefaultSentinels.array_value(&int) {
            Value::Array(array) => {
                assert_eq!(array.component, int);
                assert_eq!(array.elements, vec![Value::Int(0)]);
            }
            other => panic!("Expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_array_of_enum_holds_first_constant() {
        let tier = EnumType::new("Tier", vec!["Bronze", "Silver"]);
        match DefaultSentinels.array_value(&TypeDescriptor::Enum(tier.clone())) {
            Value::Array(array) => assert_eq!(array.elements, vec![tier.constant("Bronze").unwrap()]),
            other => panic!("Expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_array_of_object_holds_constructed_instance() {
        #[derive(Debug, Clone, Default, PartialEq)]
        struct Address {
            street: String,
        }

        let address = ObjectType::default_constructible::<Address>("Address");
        match DefaultSentinels.array_value(&TypeDescriptor::Object(address)) {
            Value::Array(array) => assert_eq!(
                array.elements,
                vec![Value::Object(bean_kernel::ObjectValue::new(Address::default()))]
            ),
            other => panic!("Expected array, got {:?}", other),
        }

        struct Handle;
        let handle = ObjectType::new::<Handle>("Handle");
        match DefaultSentinels.array_value(&TypeDescriptor::Object(handle)) {
            Value::Array(array) => assert_eq!(array.elements, vec![Value::Null]),
            other => panic!("Expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_mock_declines_by_default() {
        assert!(DefaultSentinels.mock_value(&TypeDescriptor::String).is_none());
    }

    #[test]
    fn test_override_single_provider() {
        struct Shouty;
        impl SentinelValues for Shouty {
            fn string_value(&self) -> String {
                "LOUD".to_string()
            }
        }

        assert_eq!(Shouty.string_value(), "LOUD");
        assert_eq!(Shouty.int_value(), TEST_INT);
    }
}
