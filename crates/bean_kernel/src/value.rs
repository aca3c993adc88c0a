//! Dynamic property values
//!
//! `Value` carries a property value across the registration table without
//! the verifier knowing the concrete Rust type. Equality is value equality
//! for scalars, strings and enum constants, element-wise for arrays and the
//! type's own `PartialEq` for objects.

use std::any::{Any, TypeId};
use std::fmt;

use crate::types::TypeDescriptor;

/// Object-safe view of a user type stored inside a `Value`
pub trait DynObject: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn dyn_eq(&self, other: &dyn DynObject) -> bool;
    fn dyn_clone(&self) -> Box<dyn DynObject>;
}

impl<T> DynObject for T
where
    T: Any + Clone + PartialEq + fmt::Debug,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn dyn_eq(&self, other: &dyn DynObject) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }

    fn dyn_clone(&self) -> Box<dyn DynObject> {
        Box::new(self.clone())
    }
}

/// An instance of an object type
pub struct ObjectValue {
    inner: Box<dyn DynObject>,
    type_name: &'static str,
}

impl ObjectValue {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Clone + PartialEq + fmt::Debug,
    {
        Self {
            inner: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns the Rust type name of the wrapped value
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the `TypeId` of the wrapped value
    pub fn type_id(&self) -> TypeId {
        (*self.inner).as_any().type_id()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.inner).as_any().downcast_ref::<T>()
    }

    /// Unwraps the concrete value, handing `self` back on a type mismatch
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        if self.type_id() != TypeId::of::<T>() {
            return Err(self);
        }
        match self.inner.into_any().downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type id checked above"),
        }
    }
}

impl Clone for ObjectValue {
    fn clone(&self) -> Self {
        Self {
            inner: (*self.inner).dyn_clone(),
            type_name: self.type_name,
        }
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        (*self.inner).dyn_eq(&*other.inner)
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

/// A constant of an enumerated type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumConstant {
    pub type_name: &'static str,
    pub name: &'static str,
    pub ordinal: usize,
}

/// An array value together with its component type
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    pub component: TypeDescriptor,
    pub elements: Vec<Value>,
}

/// A dynamically typed property value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    Float(f32),
    Char(char),
    String(String),
    Enum(EnumConstant),
    Array(ArrayValue),
    Object(ObjectValue),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short description of the value's runtime kind, used in error messages
    pub fn kind(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Boolean(_) => "boolean".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Long(_) => "long".to_string(),
            Value::Double(_) => "double".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Char(_) => "char".to_string(),
            Value::String(_) => "String".to_string(),
            Value::Enum(c) => c.type_name.to_string(),
            Value::Array(a) => format!("{}[]", a.component.name()),
            Value::Object(o) => o.type_name().to_string(),
        }
    }

    /// Returns true if this value may be passed where `ty` is declared
    pub fn conforms_to(&self, ty: &TypeDescriptor) -> bool {
        use crate::types::Primitive as P;

        match (self, ty) {
            (Value::Null, ty) => ty.is_nullable(),
            (Value::Boolean(_), TypeDescriptor::Primitive(P::Boolean) | TypeDescriptor::Boxed(P::Boolean)) => true,
            (Value::Int(_), TypeDescriptor::Primitive(P::Int) | TypeDescriptor::Boxed(P::Int)) => true,
            (Value::Long(_), TypeDescriptor::Primitive(P::Long) | TypeDescriptor::Boxed(P::Long)) => true,
            (Value::Double(_), TypeDescriptor::Primitive(P::Double) | TypeDescriptor::Boxed(P::Double)) => true,
            (Value::Float(_), TypeDescriptor::Primitive(P::Float) | TypeDescriptor::Boxed(P::Float)) => true,
            (Value::Char(_), TypeDescriptor::Primitive(P::Char) | TypeDescriptor::Boxed(P::Char)) => true,
            (Value::String(_), TypeDescriptor::String) => true,
            (Value::Enum(c), TypeDescriptor::Enum(e)) => c.type_name == e.name(),
            (Value::Array(a), TypeDescriptor::Array(component)) => a.component == **component,
            (Value::Object(o), TypeDescriptor::Object(t)) => o.type_id() == t.type_id(),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{:?}", v),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Char(v) => write!(f, "'{}'", v),
            Value::String(v) => write!(f, "\"{}\"", v),
            Value::Enum(c) => write!(f, "{}::{}", c.type_name, c.name),
            Value::Array(a) => {
                f.write_str("[")?;
                for (i, element) in a.elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str("]")
            }
            Value::Object(o) => write!(f, "{:?}", o),
        }
    }
}
