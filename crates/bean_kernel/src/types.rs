//! Type descriptors for bean properties
//!
//! A `TypeDescriptor` is the structural stand-in for a runtime class: it says
//! what shape a property value has, how it renders in messages, and what its
//! zero value is.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::error::InvocationError;
use crate::value::{ArrayValue, EnumConstant, ObjectValue, Value};

/// Scalar types that have both a primitive and a nullable (boxed) form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Boolean,
    Int,
    Long,
    Double,
    Float,
    Char,
}

impl Primitive {
    /// Returns the display name of the primitive
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Double => "double",
            Primitive::Float => "float",
            Primitive::Char => "char",
        }
    }

    /// Returns the zero value of the primitive
    pub fn zero_value(&self) -> Value {
        match self {
            Primitive::Boolean => Value::Boolean(false),
            Primitive::Int => Value::Int(0),
            Primitive::Long => Value::Long(0),
            Primitive::Double => Value::Double(0.0),
            Primitive::Float => Value::Float(0.0),
            Primitive::Char => Value::Char('\0'),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An enumerated type and its declared constants, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumType {
    name: &'static str,
    constants: Vec<&'static str>,
}

impl EnumType {
    pub fn new(name: &'static str, constants: Vec<&'static str>) -> Self {
        Self { name, constants }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn constants(&self) -> &[&'static str] {
        &self.constants
    }

    /// Returns the value for a named constant, if it is declared
    pub fn constant(&self, name: &str) -> Option<Value> {
        self.constants
            .iter()
            .position(|c| *c == name)
            .map(|ordinal| {
                Value::Enum(EnumConstant {
                    type_name: self.name,
                    name: self.constants[ordinal],
                    ordinal,
                })
            })
    }

    /// Returns the first declared constant
    pub fn first_constant(&self) -> Option<Value> {
        self.constants.first().and_then(|name| self.constant(name))
    }
}

/// No-argument constructor for an object type
pub type ObjectConstructor = Arc<dyn Fn() -> Result<ObjectValue, InvocationError> + Send + Sync>;

/// A non-enum, non-array reference type
///
/// Two object types are the same type when their Rust `TypeId`s match; the
/// name is only used for messages.
#[derive(Clone)]
pub struct ObjectType {
    name: &'static str,
    type_id: TypeId,
    constructor: Option<ObjectConstructor>,
    is_final: bool,
}

impl ObjectType {
    /// Describes an object type that exposes no no-argument constructor
    pub fn new<T: 'static>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
            constructor: None,
            is_final: false,
        }
    }

    /// Describes an object type constructed through `Default`
    pub fn default_constructible<T>(name: &'static str) -> Self
    where
        T: Default + Clone + PartialEq + fmt::Debug + 'static,
    {
        Self::new::<T>(name).with_constructor(Arc::new(|| Ok(ObjectValue::new(T::default()))))
    }

    /// Attaches a no-argument constructor
    pub fn with_constructor(mut self, constructor: ObjectConstructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Marks the type as final, which mocking strategies may refuse
    pub fn finalized(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// Invokes the no-argument constructor
    ///
    /// Returns `None` when the type has no such constructor.
    pub fn construct(&self) -> Option<Result<Value, InvocationError>> {
        self.constructor
            .as_ref()
            .map(|constructor| constructor().map(Value::Object))
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ObjectType {}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType")
            .field("name", &self.name)
            .field("has_constructor", &self.has_constructor())
            .field("is_final", &self.is_final)
            .finish()
    }
}

/// The declared type of a property, parameter or return value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// No value; the return type of mutators
    Void,
    Primitive(Primitive),
    /// The nullable wrapper form of a primitive
    Boxed(Primitive),
    String,
    /// An array with the given component type
    Array(Box<TypeDescriptor>),
    Enum(EnumType),
    Object(ObjectType),
}

impl TypeDescriptor {
    pub fn array_of(component: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(component))
    }

    /// Returns the nullable form of this type
    ///
    /// Primitives become boxed; every other type is already nullable.
    pub fn nullable(self) -> Self {
        match self {
            TypeDescriptor::Primitive(p) => TypeDescriptor::Boxed(p),
            other => other,
        }
    }

    /// Returns true if `Value::Null` is a legal value of this type
    pub fn is_nullable(&self) -> bool {
        !matches!(self, TypeDescriptor::Void | TypeDescriptor::Primitive(_))
    }

    /// Returns true if a mocking strategy could sensibly stand in for this type
    pub fn is_mockable(&self) -> bool {
        matches!(self, TypeDescriptor::Object(object) if !object.is_final())
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeDescriptor::Void)
    }

    /// Returns the zero value of this type
    ///
    /// Strings default to empty and arrays to zero length, matching their
    /// Rust `Default`. Types without a natural zero default to `Value::Null`.
    pub fn default_value(&self) -> Value {
        match self {
            TypeDescriptor::Primitive(p) => p.zero_value(),
            TypeDescriptor::String => Value::String(String::new()),
            TypeDescriptor::Array(component) => Value::Array(ArrayValue {
                component: (**component).clone(),
                elements: Vec::new(),
            }),
            TypeDescriptor::Void
            | TypeDescriptor::Boxed(_)
            | TypeDescriptor::Enum(_)
            | TypeDescriptor::Object(_) => Value::Null,
        }
    }

    /// Returns the display name of the type
    pub fn name(&self) -> String {
        match self {
            TypeDescriptor::Void => "void".to_string(),
            TypeDescriptor::Primitive(p) => p.name().to_string(),
            TypeDescriptor::Boxed(p) => format!("Option<{}>", p.name()),
            TypeDescriptor::String => "String".to_string(),
            TypeDescriptor::Array(component) => format!("{}[]", component.name()),
            TypeDescriptor::Enum(e) => e.name().to_string(),
            TypeDescriptor::Object(o) => o.name().to_string(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Serialize for TypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}
