//! Conversions between Rust types and dynamic property values
//!
//! `Reflect` connects a concrete Rust type to its `TypeDescriptor` so that
//! the typed helpers on `BeanClassBuilder` can derive method signatures
//! instead of having them spelled out by hand.

use crate::error::ConversionError;
use crate::types::{Primitive, TypeDescriptor};
use crate::value::{ArrayValue, Value};

/// A Rust type that can appear as a bean property value
pub trait Reflect: Sized {
    /// The declared type of properties holding this Rust type
    fn type_descriptor() -> TypeDescriptor;

    fn into_value(self) -> Value;

    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

fn mismatch<T: Reflect>(value: &Value) -> ConversionError {
    ConversionError::mismatch(T::type_descriptor().name(), value.kind())
}

macro_rules! reflect_primitive {
    ($ty:ty, $variant:ident) => {
        impl Reflect for $ty {
            fn type_descriptor() -> TypeDescriptor {
                TypeDescriptor::Primitive(Primitive::$variant)
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: Value) -> Result<Self, ConversionError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(mismatch::<Self>(&other)),
                }
            }
        }
    };
}

reflect_primitive!(bool, Boolean);
reflect_primitive!(i32, Int);
reflect_primitive!(i64, Long);
reflect_primitive!(f64, Double);
reflect_primitive!(f32, Float);
reflect_primitive!(char, Char);

impl Reflect for String {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::String
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// `Option<T>` is the nullable form of `T`; for primitives that is the boxed type
impl<T: Reflect> Reflect for Option<T> {
    fn type_descriptor() -> TypeDescriptor {
        T::type_descriptor().nullable()
    }

    fn into_value(self) -> Value {
        self.map_or(Value::Null, Reflect::into_value)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::array_of(T::type_descriptor())
    }

    fn into_value(self) -> Value {
        Value::Array(ArrayValue {
            component: T::type_descriptor(),
            elements: self.into_iter().map(Reflect::into_value).collect(),
        })
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Array(array) if array.component == T::type_descriptor() => {
                array.elements.into_iter().map(T::from_value).collect()
            }
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// Implements `Reflect` for a fieldless enum
///
/// Constants must be listed in declaration order; the first one listed is
/// the enum's first declared constant.
///
/// ```rust
/// use bean_kernel::reflect_enum;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Status { Active, Closed }
///
/// reflect_enum!(Status { Active, Closed });
/// ```
#[macro_export]
macro_rules! reflect_enum {
    ($ty:ident { $($variant:ident),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn type_descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::Enum($crate::EnumType::new(
                    stringify!($ty),
                    vec![$(stringify!($variant)),*],
                ))
            }

            fn into_value(self) -> $crate::Value {
                let name: &'static str = match self {
                    $($ty::$variant => stringify!($variant),)*
                };
                let constants: &[&'static str] = &[$(stringify!($variant)),*];
                let ordinal = constants.iter().position(|c| *c == name).unwrap_or(0);
                $crate::Value::Enum($crate::EnumConstant {
                    type_name: stringify!($ty),
                    name,
                    ordinal,
                })
            }

            fn from_value(value: $crate::Value) -> ::core::result::Result<Self, $crate::ConversionError> {
                match value {
                    $crate::Value::Enum(constant) if constant.type_name == stringify!($ty) => {
                        match constant.name {
                            $(stringify!($variant) => ::core::result::Result::Ok($ty::$variant),)*
                            other => ::core::result::Result::Err($crate::ConversionError::UnknownConstant {
                                enum_name: stringify!($ty),
                                constant: other.to_string(),
                            }),
                        }
                    }
                    other => ::core::result::Result::Err($crate::ConversionError::mismatch(stringify!($ty), other.kind())),
                }
            }
        }
    };
}

/// Implements `Reflect` for an object type
///
/// By default the type is constructed through `Default`. Pass
/// `no_constructor` for types that cannot be built without arguments and
/// `final_type` for default-constructible types that mocks must not replace.
///
/// ```rust
/// use bean_kernel::reflect_object;
///
/// #[derive(Debug, Clone, Default, PartialEq)]
/// struct Address { street: String }
///
/// reflect_object!(Address);
/// ```
#[macro_export]
macro_rules! reflect_object {
    (@impl $ty:ty, $object_type:expr) => {
        impl $crate::Reflect for $ty {
            fn type_descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::Object($object_type)
            }

            fn into_value(self) -> $crate::Value {
                $crate::Value::Object($crate::ObjectValue::new(self))
            }

            fn from_value(value: $crate::Value) -> ::core::result::Result<Self, $crate::ConversionError> {
                match value {
                    $crate::Value::Object(object) => object.downcast::<$ty>().map_err(|object| {
                        $crate::ConversionError::mismatch(stringify!($ty), object.type_name())
                    }),
                    other => ::core::result::Result::Err($crate::ConversionError::mismatch(stringify!($ty), other.kind())),
                }
            }
        }
    };
    ($ty:ty, no_constructor) => {
        $crate::reflect_object!(@impl $ty, $crate::ObjectType::new::<$ty>(stringify!($ty)));
    };
    ($ty:ty, final_type) => {
        $crate::reflect_object!(
            @impl $ty,
            $crate::ObjectType::default_constructible::<$ty>(stringify!($ty)).finalized()
        );
    };
    ($ty:ty) => {
        $crate::reflect_object!(
            @impl $ty,
            $crate::ObjectType::default_constructible::<$ty>(stringify!($ty))
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EnumType;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Color {
        Red,
        Green,
    }

    reflect_enum!(Color { Red, Green });

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Address {
        street: String,
    }

    reflect_object!(Address);

    #[test]
    fn test_primitive_descriptors() {
        assert_eq!(i32::type_descriptor(), TypeDescriptor::Primitive(Primitive::Int));
        assert_eq!(
            Option::<bool>::type_descriptor(),
            TypeDescriptor::Boxed(Primitive::Boolean)
        );
        assert_eq!(Option::<String>::type_descriptor(), TypeDescriptor::String);
    }

    #[test]
    fn test_from_value_rejects_wrong_kind() {
        let err = i32::from_value(Value::Long(1)).unwrap_err();
        assert_eq!(err, ConversionError::mismatch("int", "long"));
        assert!(i32::from_value(Value::Null).is_err());
    }

    #[test]
    fn test_option_null_is_none() {
        assert_eq!(Option::<i64>::from_value(Value::Null), Ok(None));
        assert_eq!(Option::<i64>::from_value(Value::Long(7)), Ok(Some(7)));
        assert_eq!(Some(3i32).into_value(), Value::Int(3));
        assert_eq!(None::<i32>.into_value(), Value::Null);
    }

    #[test]
    fn test_vec_checks_component_type() {
        let ints = vec![1i32, 2].into_value();
        assert_eq!(Vec::<i32>::from_value(ints.clone()), Ok(vec![1, 2]));
        assert!(Vec::<i64>::from_value(ints).is_err());
    }

    #[test]
    fn test_enum_reflection() {
        assert_eq!(
            Color::type_descriptor(),
            TypeDescriptor::Enum(EnumType::new("Color", vec!["Red", "Green"]))
        );
        match Color::Green.into_value() {
            Value::Enum(constant) => {
                assert_eq!(constant.name, "Green");
                assert_eq!(constant.ordinal, 1);
            }
            other => panic!("Expected enum value, got {:?}", other),
        }
        assert_eq!(Color::from_value(Color::Red.into_value()), Ok(Color::Red));
    }

    #[test]
    fn test_object_reflection() {
        let address = Address {
            street: "1 Main St".to_string(),
        };
        let value = address.clone().into_value();
        assert!(value.conforms_to(&Address::type_descriptor()));
        assert_eq!(Address::from_value(value), Ok(address));
        assert!(Address::from_value(Value::Int(1)).is_err());
    }
}
