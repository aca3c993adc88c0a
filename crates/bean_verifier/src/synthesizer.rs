//! Value Synthesizer
//!
//! Builds a deterministic test value for a declared property type. Rules
//! are tried in a fixed order and the first match wins:
//!
//! 1. the caller's mock strategy (`SentinelValues::mock_value`)
//! 2. built-in sentinels: string, array, boolean, int, long, double, float,
//!    char, enum
//! 3. the type's no-argument constructor
//!
//! If nothing applies the type is unsupported. No placeholder value is ever
//! returned in that case.

use bean_kernel::{Primitive, TypeDescriptor, Value};
use tracing::trace;

use crate::error::SynthesisError;
use crate::sentinels::SentinelValues;

/// Produces a test value of type `ty`
pub fn synthesize<S>(sentinels: &S, ty: &TypeDescriptor) -> Result<Value, SynthesisError>
where
    S: SentinelValues + ?Sized,
{
    if let Some(mocked) = sentinels.mock_value(ty) {
        trace!(type_name = %ty, "using mocked value");
        return Ok(mocked);
    }

    match ty {
        TypeDescriptor::String => Ok(Value::String(sentinels.string_value())),
        TypeDescriptor::Array(component) => Ok(sentinels.array_value(component)),
        TypeDescriptor::Primitive(primitive) | TypeDescriptor::Boxed(primitive) => {
            Ok(primitive_sentinel(sentinels, *primitive))
        }
        TypeDescriptor::Enum(enum_type) => sentinels
            .enum_value(enum_type)
            .ok_or_else(|| SynthesisError::EmptyEnum(enum_type.name().to_string())),
        TypeDescriptor::Object(object_type) => match sentinels.non_standard_value(object_type) {
            Some(Ok(value)) => Ok(value),
            Some(Err(source)) => Err(SynthesisError::Construction {
                type_name: object_type.name().to_string(),
                source,
            }),
            None => Err(SynthesisError::Unsupported(object_type.name().to_string())),
        },
        TypeDescriptor::Void => Err(SynthesisError::Unsupported(ty.name())),
    }
}

fn primitive_sentinel<S>(sentinels: &S, primitive: Primitive) -> Value
where
    S: SentinelValues + ?Sized,
{
    match primitive {
        Primitive::Boolean => Value::Boolean(sentinels.boolean_value()),
        Primitive::Int => Value::Int(sentinels.int_value()),
        Primitive::Long => Value::Long(sentinels.long_value()),
        Primitive::Double => Value::Double(sentinels.double_value()),
        Primitive::Float => Value::Float(sentinels.float_value()),
        Primitive::Char => Value::Char(sentinels.char_value()),
    }
}
