//! Property introspection
//!
//! Derives property descriptors from a bean's registration table using the
//! accessor/mutator naming convention:
//!
//! - `getX()` returning anything but void is the accessor of `x`
//! - `isX()` returning primitive `boolean` is the accessor of `x`
//! - `setX(..)` returning void is a mutator candidate of `x`, whatever its arity
//!
//! Mutator candidates are kept regardless of their shape; deciding whether a
//! property can actually be round-tripped is left to the caller.

use std::collections::{BTreeMap, HashSet};

use crate::class::{BeanClass, MethodInfo};
use crate::error::{BeanError, BeanResult};
use crate::types::{Primitive, TypeDescriptor};

/// Discovered metadata about one property
pub struct PropertyDescriptor<'a, T> {
    name: String,
    property_type: TypeDescriptor,
    accessor: Option<&'a MethodInfo<T>>,
    mutator: Option<&'a MethodInfo<T>>,
}

impl<'a, T> PropertyDescriptor<'a, T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_type(&self) -> &TypeDescriptor {
        &self.property_type
    }

    pub fn accessor(&self) -> Option<&'a MethodInfo<T>> {
        self.accessor
    }

    pub fn mutator(&self) -> Option<&'a MethodInfo<T>> {
        self.mutator
    }

    /// Returns true if the accessor and mutator form a round-trippable pair
    ///
    /// Both must exist and the mutator must take exactly one argument of the
    /// accessor's return type.
    pub fn is_round_trippable(&self) -> bool {
        match (self.accessor, self.mutator) {
            (Some(accessor), Some(mutator)) => {
                mutator.has_signature(std::slice::from_ref(accessor.return_type()))
            }
            _ => false,
        }
    }

    /// Recovers an `isX` accessor for a nullable boolean property
    ///
    /// The naming convention only recognises `isX` for primitive booleans,
    /// so a `Boxed(Boolean)` property exposed as `isX` has no accessor after
    /// introspection. Returns true if an accessor was attached.
    pub fn find_boolean_is_accessor(&mut self, class: &'a BeanClass<T>) -> bool {
        if self.accessor.is_some() || self.property_type != TypeDescriptor::Boxed(Primitive::Boolean) {
            return false;
        }

        let method_name = format!("is{}", capitalize(&self.name));
        match class
            .find_method(&method_name, &[])
            .filter(|m| *m.return_type() == self.property_type)
        {
            Some(accessor) => {
                self.accessor = Some(accessor);
                true
            }
            None => false,
        }
    }
}

impl<T> std::fmt::Debug for PropertyDescriptor<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("property_type", &self.property_type)
            .field("accessor", &self.accessor.map(MethodInfo::name))
            .field("mutator", &self.mutator.map(MethodInfo::name))
            .finish()
    }
}

struct Candidates<'a, T> {
    getter: Option<&'a MethodInfo<T>>,
    is_getter: Option<&'a MethodInfo<T>>,
    setters: Vec<&'a MethodInfo<T>>,
}

/// Discovers the properties of a bean type, sorted by name
///
/// Fails if the registration table is malformed: an empty method name or two
/// methods sharing a name and parameter list.
pub fn introspect<T>(class: &BeanClass<T>) -> BeanResult<Vec<PropertyDescriptor<'_, T>>> {
    validate(class)?;

    let mut candidates: BTreeMap<String, Candidates<'_, T>> = BTreeMap::new();

    for method in class.methods() {
        let name = method.name();
        let params = method.parameter_types();
        let returns = method.return_type();

        if let Some(property) = name.strip_prefix("get").and_then(decapitalize) {
            if params.is_empty() && !returns.is_void() {
                entry(&mut candidates, property).getter = Some(method);
            }
        } else if let Some(property) = name.strip_prefix("is").and_then(decapitalize) {
            if params.is_empty() && *returns == TypeDescriptor::Primitive(Primitive::Boolean) {
                entry(&mut candidates, property).is_getter = Some(method);
            }
        } else if let Some(property) = name.strip_prefix("set").and_then(decapitalize) {
            if returns.is_void() {
                entry(&mut candidates, property).setters.push(method);
            }
        }
    }

    Ok(candidates
        .into_iter()
        .map(|(name, found)| {
            let accessor = found.is_getter.or(found.getter);
            let property_type = match (accessor, found.setters.first()) {
                (Some(accessor), _) => accessor.return_type().clone(),
                (None, Some(setter)) => setter
                    .parameter_types()
                    .first()
                    .cloned()
                    .unwrap_or(TypeDescriptor::Void),
                (None, None) => TypeDescriptor::Void,
            };
            let mutator = found
                .setters
                .iter()
                .copied()
                .find(|s| s.has_signature(std::slice::from_ref(&property_type)))
                .or_else(|| found.setters.first().copied());

            PropertyDescriptor {
                name,
                property_type,
                accessor,
                mutator,
            }
        })
        .collect())
}

fn entry<'m, 'a, T>(
    candidates: &'m mut BTreeMap<String, Candidates<'a, T>>,
    property: String,
) -> &'m mut Candidates<'a, T> {
    candidates.entry(property).or_insert_with(|| Candidates {
        getter: None,
        is_getter: None,
        setters: Vec::new(),
    })
}

fn validate<T>(class: &BeanClass<T>) -> BeanResult<()> {
    let mut seen = HashSet::new();

    for method in class.methods() {
        if method.name().is_empty() {
            return Err(BeanError::introspection(class.name(), "method with an empty name"));
        }

        let signature: Vec<String> = method.parameter_types().iter().map(TypeDescriptor::name).collect();
        if !seen.insert((method.name(), signature.clone())) {
            return Err(BeanError::introspection(
                class.name(),
                format!("method {}({}) is registered twice", method.name(), signature.join(", ")),
            ));
        }
    }

    Ok(())
}

/// Converts a method-name suffix into a property name
///
/// The first character is lowercased unless the first two characters are
/// both uppercase, so `Name` becomes `name` while `URL` stays `URL`.
fn decapitalize(suffix: &str) -> Option<String> {
    let mut chars = suffix.chars();
    let first = chars.next()?;
    let second = chars.next();

    if first.is_uppercase() && second.map_or(false, char::is_uppercase) {
        return Some(suffix.to_string());
    }

    let mut name: String = first.to_lowercase().collect();
    name.push_str(&suffix[first.len_utf8()..]);
    Some(name)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
