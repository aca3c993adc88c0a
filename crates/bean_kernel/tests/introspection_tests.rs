//! Integration tests for property introspection

use bean_kernel::{
    introspect, BeanClass, BeanClassBuilder, BeanError, BeanResult, MethodInfo, PropertyDescriptor, Primitive,
    TypeDescriptor, Value,
};
use proptest::prelude::*;

#[derive(Debug, Default)]
struct Record {
    values: std::collections::HashMap<String, i32>,
}

/// Builds a class with one `getX`/`setX` pair per property name
fn record_class(properties: &[String]) -> BeanClass<Record> {
    let mut builder: BeanClassBuilder<Record> = BeanClass::builder("Record").default_constructor();
    for property in properties {
        let capitalized = capitalize(property);
        let key = property.clone();
        builder = builder.getter(format!("get{}", capitalized), move |r: &Record| {
            r.values.get(&key).copied().unwrap_or(0)
        });
        let key = property.clone();
        builder = builder.setter(format!("set{}", capitalized), move |r: &mut Record, v: i32| {
            r.values.insert(key.clone(), v);
        });
    }
    builder.build()
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase second character keeps the name stable through capitalization
fn property_name() -> impl Strategy<Value = String> {
    "[a-z]([a-z0-9][a-zA-Z0-9]{0,9})?"
}

mod discovery {
    use super::*;

    proptest! {
        #[test]
        fn test_properties_discovered_in_sorted_order(
            names in proptest::collection::btree_set(property_name(), 0..8)
        ) {
            let names: Vec<String> = names.into_iter().collect();
            let class = record_class(&names);
            let props = introspect(&class).unwrap();

            let discovered: Vec<&str> = props.iter().map(|p| p.name()).collect();
            let expected: Vec<&str> = names.iter().map(String::as_str).collect();
            prop_assert_eq!(discovered, expected);
            prop_assert!(props.iter().all(|p| p.is_round_trippable()));
        }

        #[test]
        fn test_discovered_pairs_round_trip(
            names in proptest::collection::btree_set(property_name(), 1..6),
            value in any::<i32>()
        ) {
            let names: Vec<String> = names.into_iter().collect();
            let class = record_class(&names);
            let props = introspect(&class).unwrap();

            for property in &props {
                let mut record = class.instantiate().unwrap();
                let mutator = property.mutator().unwrap();
                let accessor = property.accessor().unwrap();
                mutator.invoke(&mut record, vec![Value::Int(value)]).unwrap();
                prop_assert_eq!(accessor.invoke(&mut record, vec![]).unwrap(), Value::Int(value));
            }
        }
    }

    #[test]
    fn test_non_property_methods_are_ignored() {
        let class: BeanClass<Record> = BeanClass::builder("Record")
            .method(MethodInfo::new(
                "reset",
                vec![],
                TypeDescriptor::Void,
                |r: &mut Record, _args: Vec<Value>| {
                    r.values.clear();
                    Ok(Value::Null)
                },
            ))
            .method(MethodInfo::new(
                "getVoid",
                vec![],
                TypeDescriptor::Void,
                |_r: &mut Record, _args: Vec<Value>| Ok(Value::Null),
            ))
            .method(MethodInfo::new(
                "getIndexed",
                vec![TypeDescriptor::Primitive(Primitive::Int)],
                TypeDescriptor::Primitive(Primitive::Int),
                |_r: &mut Record, _args: Vec<Value>| Ok(Value::Int(0)),
            ))
            .build();

        assert!(introspect(&class).unwrap().is_empty());
    }

    #[test]
    fn test_setter_with_return_value_is_not_a_mutator() {
        let class: BeanClass<Record> = BeanClass::builder("Record")
            .getter("getCount", |_r: &Record| 0i32)
            .method(MethodInfo::new(
                "setCount",
                vec![TypeDescriptor::Primitive(Primitive::Int)],
                TypeDescriptor::Primitive(Primitive::Int),
                |_r: &mut Record, args: Vec<Value>| Ok(args.into_iter().next().unwrap_or(Value::Null)),
            ))
            .build();

        let props = introspect(&class).unwrap();
        assert_eq!(props.len(), 1);
        assert!(props[0].mutator().is_none());
    }
}

mod malformed_tables {
    use super::*;

    #[test]
    fn test_duplicate_signature_is_reported_through_bean_result() {
        let class: BeanClass<Record> = BeanClass::builder("Record")
            .getter("getCount", |_r: &Record| 0i32)
            .getter("getCount", |_r: &Record| 1i32)
            .build();

        let result: BeanResult<Vec<PropertyDescriptor<'_, Record>>> = introspect(&class);
        match result {
            Err(BeanError::Introspection { bean, message }) => {
                assert_eq!(bean, "Record");
                assert!(message.contains("getCount"));
            }
            other => panic!("Expected introspection error, got {:?}", other),
        }
    }
}

mod boolean_accessors {
    use super::*;

    #[derive(Debug, Default)]
    struct Toggle {
        on: bool,
        maybe: Option<bool>,
    }

    #[test]
    fn test_is_accessor_preferred_over_get() {
        let class: BeanClass<Toggle> = BeanClass::builder("Toggle")
            .getter("getOn", |t: &Toggle| t.on)
            .getter("isOn", |t: &Toggle| t.on)
            .setter("setOn", |t: &mut Toggle, v: bool| t.on = v)
            .build();

        let props = introspect(&class).unwrap();
        assert_eq!(props[0].accessor().map(MethodInfo::name), Some("isOn"));
    }

    #[test]
    fn test_boxed_is_accessor_requires_compensating_lookup() {
        let class: BeanClass<Toggle> = BeanClass::builder("Toggle")
            .getter("isMaybe", |t: &Toggle| t.maybe)
            .setter("setMaybe", |t: &mut Toggle, v: Option<bool>| t.maybe = v)
            .build();

        let mut props = introspect(&class).unwrap();
        assert_eq!(props.len(), 1);
        assert!(!props[0].is_round_trippable());
        assert!(props[0].find_boolean_is_accessor(&class));
        assert!(props[0].is_round_trippable());
        // a second lookup has nothing left to attach
        assert!(!props[0].find_boolean_is_accessor(&class));
    }

    #[test]
    fn test_boxed_is_accessor_without_mutator_is_not_a_property() {
        let class: BeanClass<Toggle> = BeanClass::builder("Toggle")
            .getter("isMaybe", |t: &Toggle| t.maybe)
            .build();

        assert!(introspect(&class).unwrap().is_empty());
    }
}
