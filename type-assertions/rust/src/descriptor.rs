use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    error::UnknownPrimitiveType,
    value::{Class, Value},
};

/// The tags a `typeof` check can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Number,
    Boolean,
    BigInt,
    Undefined,
    Function,
    Object,
    Symbol,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::String,
        PrimitiveType::Number,
        PrimitiveType::Boolean,
        PrimitiveType::BigInt,
        PrimitiveType::Undefined,
        PrimitiveType::Function,
        PrimitiveType::Object,
        PrimitiveType::Symbol,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Number => "number",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::BigInt => "bigint",
            PrimitiveType::Undefined => "undefined",
            PrimitiveType::Function => "function",
            PrimitiveType::Object => "object",
            PrimitiveType::Symbol => "symbol",
        }
    }
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimitiveType {
    type Err = UnknownPrimitiveType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimitiveType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPrimitiveType(s.to_owned()))
    }
}

/// The `typeof` tag of a value. `null` and arrays are `object`.
pub fn type_of(value: &Value) -> PrimitiveType {
    match value {
        Value::Undefined => PrimitiveType::Undefined,
        Value::Boolean(_) => PrimitiveType::Boolean,
        Value::Number(_) => PrimitiveType::Number,
        Value::BigInt(_) => PrimitiveType::BigInt,
        Value::String(_) => PrimitiveType::String,
        Value::Symbol(_) => PrimitiveType::Symbol,
        Value::Function(_) => PrimitiveType::Function,
        Value::Null | Value::Object(_) | Value::Array(_) => PrimitiveType::Object,
    }
}

/// What a value is expected to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// Compared against the value's `typeof` tag
    Primitive(PrimitiveType),
    Null,
    Undefined,
    /// Satisfied by instances of the class or any subclass
    Class(Class),
}

impl Expected {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Expected::Primitive(p) => type_of(value) == *p,
            Expected::Null => value.is_null(),
            Expected::Undefined => value.is_undefined(),
            Expected::Class(class) => is_instance_of(value, class),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Expected::Primitive(p) => p.as_str(),
            Expected::Null => "null",
            Expected::Undefined => "undefined",
            Expected::Class(class) => class.name(),
        }
    }
}

impl From<PrimitiveType> for Expected {
    fn from(p: PrimitiveType) -> Self {
        Expected::Primitive(p)
    }
}

impl From<Class> for Expected {
    fn from(class: Class) -> Self {
        Expected::Class(class)
    }
}

impl From<&Class> for Expected {
    fn from(class: &Class) -> Self {
        Expected::Class(class.clone())
    }
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn matches(value: &Value, expected: &Expected) -> bool {
    expected.matches(value)
}

pub fn name_of_expected(expected: &Expected) -> &str {
    expected.name()
}

pub fn is_instance_of(value: &Value, class: &Class) -> bool {
    value.class().is_some_and(|c| c.is_subclass_of(class))
}

/// A best-effort name for the runtime type of `value`: its class name for
/// objects and arrays, otherwise its `typeof` tag. Callables are always
/// reported as `function`.
pub fn name_of_value(value: &Value) -> &str {
    match value {
        Value::Null => "null",
        Value::Undefined => "undefined",
        Value::Function(_) => PrimitiveType::Function.as_str(),
        _ => match value.class() {
            Some(class) => class.name(),
            None => type_of(value).as_str(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Array, Function, Object, Symbol};

    fn samples() -> Vec<Value> {
        vec![
            Value::Undefined,
            Value::Null,
            true.into(),
            1.5.into(),
            Value::BigInt(7),
            "s".into(),
            Symbol::new(None).into(),
            Function::new("f").into(),
            Object::new().into(),
            Array::new().into(),
        ]
    }

    #[test]
    fn primitive_names_parse() {
        for p in PrimitiveType::ALL {
            assert_eq!(p, p.as_str().parse::<PrimitiveType>().unwrap());
        }
        assert_eq!(
            "Number".parse::<PrimitiveType>(),
            Err(UnknownPrimitiveType("Number".into()))
        );
    }

    #[test]
    fn each_value_matches_exactly_its_tag() {
        for value in samples() {
            let tag = type_of(&value);
            for p in PrimitiveType::ALL {
                assert_eq!(p == tag, Expected::from(p).matches(&value), "{value:?} vs {p}");
            }
        }
    }

    #[test]
    fn null_is_tagged_object() {
        assert_eq!(PrimitiveType::Object, type_of(&Value::Null));
        assert!(Expected::Null.matches(&Value::Null));
        assert!(!Expected::Null.matches(&Value::Undefined));
        assert!(!Expected::Undefined.matches(&Value::Null));
    }

    #[test]
    fn class_matching_follows_inheritance() {
        let shape = Class::new("Shape");
        let circle = Class::extends("Circle", &shape);
        let value = Value::from(Object::of(&circle));

        assert!(Expected::from(&circle).matches(&value));
        assert!(Expected::from(&shape).matches(&value));
        assert!(Expected::from(Class::object()).matches(&value));
        assert!(!Expected::from(Class::array()).matches(&value));
    }

    #[test]
    fn primitives_are_not_instances() {
        assert!(!is_instance_of(&Value::from(1), Class::object()));
        assert!(!is_instance_of(&Value::Null, Class::object()));
        assert!(is_instance_of(&Array::new().into(), Class::object()));
        assert!(is_instance_of(&Function::new("f").into(), Class::function()));
    }

    #[test]
    fn expected_names() {
        assert_eq!("null", Expected::Null.name());
        assert_eq!("undefined", Expected::Undefined.name());
        assert_eq!("bigint", Expected::from(PrimitiveType::BigInt).name());
        assert_eq!("Date", Expected::from(Class::new("Date")).name());
    }

    #[test]
    fn value_names() {
        let point = Class::new("Point");
        assert_eq!("null", name_of_value(&Value::Null));
        assert_eq!("undefined", name_of_value(&Value::Undefined));
        assert_eq!("number", name_of_value(&Value::from(3)));
        assert_eq!("string", name_of_value(&Value::from("x")));
        assert_eq!("Object", name_of_value(&Object::new().into()));
        assert_eq!("Array", name_of_value(&Array::new().into()));
        assert_eq!("Point", name_of_value(&Object::of(&point).into()));
        assert_eq!("function", name_of_value(&Function::new("f").into()));
        assert_eq!("function", name_of_value(&point.into()));
    }
}
