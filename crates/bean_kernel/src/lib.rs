//! Bean Kernel - Structural model of JavaBean-style value objects
//!
//! This crate provides the building blocks the round-trip verifier works on:
//! - Type descriptors and dynamic values for property types
//! - The `Reflect` trait connecting Rust types to descriptors
//! - Explicit registration tables standing in for runtime reflection
//! - Property introspection by accessor/mutator naming convention

pub mod types;
pub mod value;
pub mod reflect;
pub mod class;
pub mod introspection;
pub mod error;

pub use types::{Primitive, TypeDescriptor, EnumType, ObjectType, ObjectConstructor};
pub use value::{Value, ObjectValue, EnumConstant, ArrayValue, DynObject};
pub use reflect::Reflect;
pub use class::{Bean, BeanClass, BeanClassBuilder, MethodInfo};
pub use introspection::{introspect, PropertyDescriptor};
pub use error::{BeanError, BeanResult, InvocationError, ConversionError};
