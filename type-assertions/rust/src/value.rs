use std::{
    fmt::{self, Debug, Display, Formatter},
    sync::{Arc, OnceLock},
};

use rustc_hash::FxHashMap;

/// A runtime value as seen by the assertions.
///
/// Once an assertion has passed, the matching `as_*` accessor is guaranteed
/// to return `Some` (in development mode).
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    Symbol(Symbol),
    Function(Function),
    Object(Object),
    Array(Array),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// `null` or `undefined`
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// The class this value was constructed by. Primitives have none.
    pub fn class(&self) -> Option<&Class> {
        match self {
            Value::Object(o) => Some(o.class()),
            Value::Array(_) => Some(Class::array()),
            Value::Function(_) => Some(Class::function()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bigint(&self) -> Option<i128> {
        match self {
            Value::BigInt(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }
}

/// Renders the value the way string coercion does, e.g. in a template literal.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => Display::fmt(b, f),
            Value::Number(n) => fmt_number(*n, f),
            Value::BigInt(n) => Display::fmt(n, f),
            Value::String(s) => f.write_str(s),
            Value::Symbol(s) => Display::fmt(s, f),
            Value::Function(func) => Display::fmt(func, f),
            Value::Object(_) => f.write_str("[object Object]"),
            Value::Array(a) => Display::fmt(a, f),
        }
    }
}

fn fmt_number(n: f64, f: &mut Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        // -0 renders as 0
        return f.write_str("0");
    }

    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let s = format!("{n:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{mantissa}e+{exp}"),
            _ => f.write_str(&s),
        };
    }

    write!(f, "{n}")
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(val: $ty) -> Self {
                    Value::$variant(val.into())
                }
            }
        )*
    };
}

impl_from! {
    bool => Boolean,
    f64 => Number,
    i32 => Number,
    &str => String,
    String => String,
    Symbol => Symbol,
    Function => Function,
    Object => Object,
    Array => Array,
}

impl From<Class> for Value {
    fn from(class: Class) -> Self {
        Value::Function(Function::constructor(&class))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` becomes `null`
    fn from(val: Option<T>) -> Self {
        val.map_or(Value::Null, Into::into)
    }
}

/// A constructor reference. Compared by identity, like the host compares
/// constructors in an `instanceof` check.
#[derive(Clone)]
pub struct Class {
    inner: Arc<ClassInner>,
}

struct ClassInner {
    name: String,
    parent: Option<Class>,
}

impl Class {
    /// A class implicitly extending `Object`
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self::with_parent(name, Some(Self::object().clone()))
    }

    pub fn extends<S: Into<String>>(name: S, parent: &Class) -> Self {
        Self::with_parent(name, Some(parent.clone()))
    }

    fn with_parent<S: Into<String>>(name: S, parent: Option<Class>) -> Self {
        Self {
            inner: Arc::new(ClassInner {
                name: name.into(),
                parent,
            }),
        }
    }

    pub fn object() -> &'static Class {
        static CELL: OnceLock<Class> = OnceLock::new();
        CELL.get_or_init(|| Class::with_parent("Object", None))
    }

    pub fn array() -> &'static Class {
        static CELL: OnceLock<Class> = OnceLock::new();
        CELL.get_or_init(|| Class::new("Array"))
    }

    pub fn function() -> &'static Class {
        static CELL: OnceLock<Class> = OnceLock::new();
        CELL.get_or_init(|| Class::new("Function"))
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn parent(&self) -> Option<&Class> {
        self.inner.parent.as_ref()
    }

    /// True if `self` is `other` or inherits from it
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == other {
                return true;
            }
            current = class.parent();
        }
        false
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Class {}

impl Debug for Class {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Class").field(&self.name()).finish()
    }
}

#[derive(Clone, Debug)]
pub struct Function {
    name: String,
    constructs: Option<Class>,
}

impl Function {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            constructs: None,
        }
    }

    pub fn constructor(class: &Class) -> Self {
        Self {
            name: class.name().to_owned(),
            constructs: Some(class.clone()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constructs(&self) -> Option<&Class> {
        self.constructs.as_ref()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.constructs {
            Some(_) => write!(f, "class {} {{ }}", self.name),
            None => write!(f, "function {}() {{ [native code] }}", self.name),
        }
    }
}

/// A unique symbol. Two symbols with the same description are still distinct.
#[derive(Clone)]
pub struct Symbol {
    description: Arc<Option<String>>,
}

impl Symbol {
    pub fn new(description: Option<&str>) -> Self {
        Self {
            description: Arc::new(description.map(str::to_owned)),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.description, &other.description)
    }
}

impl Eq for Symbol {}

impl Debug for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or_default())
    }
}

#[derive(Clone, Debug)]
pub struct Object {
    class: Class,
    props: FxHashMap<String, Value>,
}

impl Object {
    /// A plain `{}` object
    pub fn new() -> Self {
        Self::of(Class::object())
    }

    /// An instance of `class`
    pub fn of(class: &Class) -> Self {
        Self {
            class: class.clone(),
            props: FxHashMap::default(),
        }
    }

    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> Option<Value> {
        self.props.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// True if the property exists, even when its value is `undefined`
    pub fn contains_key(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    pub fn class(&self) -> &Class {
        &self.class
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

/// An array which may have holes, i.e. indices below `len` that were never assigned.
#[derive(Clone, Debug, Default)]
pub struct Array {
    slots: Vec<Option<Value>>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    /// An array of `len` holes, like `new Array(len)`
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn push<V: Into<Value>>(&mut self, value: V) {
        self.slots.push(Some(value.into()));
    }

    /// Assigns `index`, growing the array with holes if needed
    pub fn set<V: Into<Value>>(&mut self, index: usize, value: V) {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(value.into());
    }

    /// Turns `index` back into a hole, like `delete arr[index]`
    pub fn delete(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn has_index(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over all slots, yielding `None` for holes
    pub fn slots(&self) -> impl Iterator<Item = Option<&Value>> {
        self.slots.iter().map(Option::as_ref)
    }
}

impl Display for Array {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match slot {
                None | Some(Value::Null | Value::Undefined) => {}
                Some(value) => write!(f, "{value}")?,
            }
        }
        Ok(())
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().map(|v| Some(v.into())).collect(),
        }
    }
}

impl From<Vec<Value>> for Array {
    fn from(values: Vec<Value>) -> Self {
        values.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_like_string_coercion() {
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(-0.0).to_string(), "0");
        assert_eq!(Value::from(0.5).to_string(), "0.5");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from(1e21).to_string(), "1e+21");
        assert_eq!(Value::from(1.5e-7).to_string(), "1.5e-7");
    }

    #[test]
    fn arrays_render_joined() {
        let mut arr: Array = [Value::from(1), Value::Null, Value::from("a")].into_iter().collect();
        arr.set(4, true);
        assert_eq!(Value::from(arr).to_string(), "1,,a,,true");
    }

    #[test]
    fn objects_and_symbols_render() {
        assert_eq!(Value::from(Object::new()).to_string(), "[object Object]");
        assert_eq!(Value::from(Symbol::new(Some("id"))).to_string(), "Symbol(id)");
        assert_eq!(Value::from(Symbol::new(None)).to_string(), "Symbol()");
    }

    #[test]
    fn builtin_classes_are_singletons() {
        assert_eq!(Class::array(), Class::array());
        assert_ne!(Class::array(), Class::function());
        assert!(Class::array().is_subclass_of(Class::object()));
        assert!(Class::object().parent().is_none());
    }

    #[test]
    fn classes_compare_by_identity() {
        let a = Class::new("Point");
        let b = Class::new("Point");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn subclass_chain() {
        let shape = Class::new("Shape");
        let circle = Class::extends("Circle", &shape);
        assert!(circle.is_subclass_of(&shape));
        assert!(circle.is_subclass_of(Class::object()));
        assert!(!shape.is_subclass_of(&circle));
    }

    #[test]
    fn array_holes() {
        let mut arr = Array::with_len(3);
        arr.set(0, 1);
        arr.set(2, Value::Undefined);
        assert_eq!(3, arr.len());
        assert!(arr.has_index(0));
        assert!(!arr.has_index(1));
        assert!(arr.has_index(2));
        assert!(arr.get(1).is_none());

        arr.delete(0);
        assert!(!arr.has_index(0));
    }

    #[test]
    fn object_props() {
        let obj = Object::new().with("a", 1).with("b", Value::Undefined);
        assert!(obj.contains_key("b"));
        assert!(!obj.contains_key("c"));
        assert_eq!(obj.get("a").and_then(Value::as_f64), Some(1.0));
        assert_eq!(2, obj.len());
    }

    #[test]
    fn option_converts_to_null() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some("x")).as_str(), Some("x"));
    }
}
