//! Bean Registration Table
//!
//! Rust has no runtime reflection, so each bean type describes itself once
//! through a `BeanClass`: a no-argument constructor plus a table of methods,
//! each with a name, a signature and an invoker closure. Introspection reads
//! properties out of this table by naming convention.
//!
//! # Usage
//!
//! ```rust
//! use bean_kernel::{Bean, BeanClass};
//!
//! #[derive(Debug, Default)]
//! struct Customer {
//!     name: String,
//!     active: bool,
//! }
//!
//! impl Bean for Customer {
//!     fn bean_class() -> BeanClass<Self> {
//!         BeanClass::builder("Customer")
//!             .default_constructor()
//!             .getter("getName", |c: &Customer| c.name.clone())
//!             .setter("setName", |c: &mut Customer, v: String| c.name = v)
//!             .getter("isActive", |c: &Customer| c.active)
//!             .setter("setActive", |c: &mut Customer, v: bool| c.active = v)
//!             .build()
//!     }
//! }
//! ```

use std::fmt;

use crate::error::{BeanError, BeanResult, InvocationError};
use crate::reflect::Reflect;
use crate::types::TypeDescriptor;
use crate::value::Value;

/// Invoker closure behind a registered method
pub type Invoker<T> = Box<dyn Fn(&mut T, Vec<Value>) -> Result<Value, InvocationError>>;

/// No-argument constructor of a bean type
pub type BeanConstructor<T> = Box<dyn Fn() -> Result<T, InvocationError>>;

/// A bean type that can be introspected
pub trait Bean: Sized + 'static {
    /// Builds the registration table for this type
    fn bean_class() -> BeanClass<Self>;
}

/// A method registered on a bean type
pub struct MethodInfo<T> {
    name: String,
    parameter_types: Vec<TypeDescriptor>,
    return_type: TypeDescriptor,
    invoker: Invoker<T>,
}

impl<T> MethodInfo<T> {
    /// Registers a method with an arbitrary signature
    pub fn new<F>(
        name: impl Into<String>,
        parameter_types: Vec<TypeDescriptor>,
        return_type: TypeDescriptor,
        invoker: F,
    ) -> Self
    where
        F: Fn(&mut T, Vec<Value>) -> Result<Value, InvocationError> + 'static,
    {
        Self {
            name: name.into(),
            parameter_types,
            return_type,
            invoker: Box::new(invoker),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_types(&self) -> &[TypeDescriptor] {
        &self.parameter_types
    }

    pub fn return_type(&self) -> &TypeDescriptor {
        &self.return_type
    }

    /// Returns true if the method takes exactly these parameter types
    pub fn has_signature(&self, parameter_types: &[TypeDescriptor]) -> bool {
        self.parameter_types == parameter_types
    }

    /// Calls the method on `target`
    ///
    /// Arity and argument types are checked before the invoker runs.
    pub fn invoke(&self, target: &mut T, args: Vec<Value>) -> Result<Value, InvocationError> {
        if args.len() != self.parameter_types.len() {
            return Err(InvocationError::ArgumentCount {
                method: self.name.clone(),
                expected: self.parameter_types.len(),
                actual: args.len(),
            });
        }

        for (index, (arg, expected)) in args.iter().zip(&self.parameter_types).enumerate() {
            if !arg.conforms_to(expected) {
                return Err(InvocationError::ArgumentMismatch {
                    method: self.name.clone(),
                    index,
                    expected: expected.name(),
                    actual: arg.kind(),
                });
            }
        }

        (self.invoker)(target, args)
    }
}

impl<T> fmt::Debug for MethodInfo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("parameter_types", &self.parameter_types)
            .field("return_type", &self.return_type)
            .finish()
    }
}

/// Registration table of a bean type
pub struct BeanClass<T> {
    name: String,
    constructor: Option<BeanConstructor<T>>,
    methods: Vec<MethodInfo<T>>,
}

impl<T> BeanClass<T> {
    /// Starts a registration table for the named bean
    pub fn builder(name: impl Into<String>) -> BeanClassBuilder<T>
    where
        T: 'static,
    {
        BeanClassBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn methods(&self) -> &[MethodInfo<T>] {
        &self.methods
    }

    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// Finds a method by name and exact parameter types
    pub fn find_method(&self, name: &str, parameter_types: &[TypeDescriptor]) -> Option<&MethodInfo<T>> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.has_signature(parameter_types))
    }

    /// Creates a fresh instance through the no-argument constructor
    pub fn instantiate(&self) -> BeanResult<T> {
        let constructor = self
            .constructor
            .as_ref()
            .ok_or_else(|| BeanError::no_constructor(&self.name))?;

        constructor().map_err(|source| BeanError::Construction {
            bean: self.name.clone(),
            source,
        })
    }
}

impl<T> fmt::Debug for BeanClass<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanClass")
            .field("name", &self.name)
            .field("has_constructor", &self.has_constructor())
            .field("methods", &self.methods)
            .finish()
    }
}

/// Fluent builder for a `BeanClass`
pub struct BeanClassBuilder<T> {
    name: String,
    constructor: Option<BeanConstructor<T>>,
    methods: Vec<MethodInfo<T>>,
}

impl<T: 'static> BeanClassBuilder<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructor: None,
            methods: Vec::new(),
        }
    }

    /// Sets an infallible no-argument constructor
    pub fn constructor<F>(self, constructor: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        self.try_constructor(move || Ok(constructor()))
    }

    /// Sets a no-argument constructor that may fail
    pub fn try_constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn() -> Result<T, InvocationError> + 'static,
    {
        self.constructor = Some(Box::new(constructor));
        self
    }

    /// Uses `Default` as the no-argument constructor
    pub fn default_constructor(self) -> Self
    where
        T: Default,
    {
        self.constructor(T::default)
    }

    /// Registers a zero-argument method returning `V`
    ///
    /// The name is the full method name, e.g. `getName` or `isActive`.
    pub fn getter<V, F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        V: Reflect,
        F: Fn(&T) -> V + 'static,
    {
        self.methods.push(MethodInfo::new(
            name,
            Vec::new(),
            V::type_descriptor(),
            move |target: &mut T, _args| Ok(getter(target).into_value()),
        ));
        self
    }

    /// Registers a one-argument method taking `V` and returning nothing
    pub fn setter<V, F>(self, name: impl Into<String>, setter: F) -> Self
    where
        V: Reflect,
        F: Fn(&mut T, V) + 'static,
    {
        self.try_setter(name, move |target: &mut T, value: V| {
            setter(target, value);
            Ok(())
        })
    }

    /// Registers a one-argument mutator that may reject its argument
    pub fn try_setter<V, F>(mut self, name: impl Into<String>, setter: F) -> Self
    where
        V: Reflect,
        F: Fn(&mut T, V) -> Result<(), InvocationError> + 'static,
    {
        self.methods.push(MethodInfo::new(
            name,
            vec![V::type_descriptor()],
            TypeDescriptor::Void,
            move |target: &mut T, mut args: Vec<Value>| {
                let value = V::from_value(args.remove(0))?;
                setter(target, value)?;
                Ok(Value::Null)
            },
        ));
        self
    }

    /// Registers a method with an explicit signature
    pub fn method(mut self, method: MethodInfo<T>) -> Self {
        self.methods.push(method);
        self
    }

    pub fn build(self) -> BeanClass<T> {
        BeanClass {
            name: self.name,
            constructor: self.constructor,
            methods: self.methods,
        }
    }
}
