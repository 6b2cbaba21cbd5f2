use tracing::debug;

use crate::{
    config::{Config, Mode},
    descriptor::{is_instance_of, name_of_value, type_of, Expected, PrimitiveType},
    error::{AssertionError, Result},
    value::{Array, Class, Object, Value},
};

const DEFAULT_MESSAGE: &str = "No specific message provided.";
const DEFAULT_UNREACHABLE_MESSAGE: &str =
    "Unreachable code was reached. Static types are inaccurate somewhere.";

/// Runs development-mode checks.
///
/// Every method returns `Ok(())` without inspecting its arguments when the
/// mode is [`Mode::Production`]. In [`Mode::Development`] a passing check
/// returns `Ok(())` and the value is guaranteed to have the asserted shape,
/// so the matching `Value::as_*` accessor can be relied upon. A failing check
/// returns the first violation found as an [`AssertionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asserter {
    mode: Mode,
}

impl Asserter {
    pub const fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.mode())
    }

    pub const fn development() -> Self {
        Self::new(Mode::Development)
    }

    pub const fn production() -> Self {
        Self::new(Mode::Production)
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether checks run. Use to skip building expensive arguments.
    #[inline(always)]
    pub const fn is_enabled(&self) -> bool {
        self.mode.is_development()
    }

    pub fn assert(&self, condition: bool, msg: Option<&str>) -> Result<()> {
        if !self.is_enabled() || condition {
            return Ok(());
        }
        fail(msg.unwrap_or(DEFAULT_MESSAGE))
    }

    /// Asserts that `value` is of the `expected` type
    pub fn assert_type(&self, value: &Value, expected: &Expected) -> Result<()> {
        if !self.is_enabled() || expected.matches(value) {
            return Ok(());
        }
        fail(format!(
            "Provided object was not of type {}. Was: {}, value: {}",
            expected,
            name_of_value(value),
            value
        ))
    }

    /// Asserts that every element of `array` is of the `expected` type.
    /// Holes fail even when `expected` is `undefined`.
    pub fn assert_array_type(&self, array: &Array, expected: &Expected) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        for (i, slot) in array.slots().enumerate() {
            let Some(item) = slot else {
                return fail(format!(
                    "Array to assert type of was sparse with a missing item at index {i}"
                ));
            };
            if !expected.matches(item) {
                return fail(format!(
                    "Provided array had item at index {i} not of type {}. Was: {}, value: {}",
                    expected,
                    name_of_value(item),
                    item
                ));
            }
        }
        Ok(())
    }

    /// Asserts that `array` has exactly one element per entry of `expected`,
    /// each of the type at the same position.
    pub fn assert_tuple_types(&self, array: &Array, expected: &[Expected]) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        if array.len() != expected.len() {
            return fail(format!(
                "Provided tuple length mismatch: expected {}, but got {}",
                expected.len(),
                array.len()
            ));
        }
        for (i, (slot, expected)) in array.slots().zip(expected).enumerate() {
            let Some(item) = slot else {
                return fail(format!(
                    "Provided tuple was sparse with a missing item at required index {i}"
                ));
            };
            if !expected.matches(item) {
                return fail(format!(
                    "Provided tuple had item at index {i} not of type {}. Was: {}, value: {}",
                    expected,
                    name_of_value(item),
                    item
                ));
            }
        }
        Ok(())
    }

    pub fn assert_type_of_string(&self, value: &Value) -> Result<()> {
        self.assert_type_of(value, PrimitiveType::String)
    }

    pub fn assert_type_of_number(&self, value: &Value) -> Result<()> {
        self.assert_type_of(value, PrimitiveType::Number)
    }

    pub fn assert_type_of_boolean(&self, value: &Value) -> Result<()> {
        self.assert_type_of(value, PrimitiveType::Boolean)
    }

    pub fn assert_type_of_bigint(&self, value: &Value) -> Result<()> {
        self.assert_type_of(value, PrimitiveType::BigInt)
    }

    pub fn assert_type_of_undefined(&self, value: &Value) -> Result<()> {
        self.assert_type_of(value, PrimitiveType::Undefined)
    }

    pub fn assert_type_of_function(&self, value: &Value) -> Result<()> {
        self.assert_type_of(value, PrimitiveType::Function)
    }

    /// Passes for `null`, since its `typeof` tag is `object`
    pub fn assert_type_of_object(&self, value: &Value) -> Result<()> {
        self.assert_type_of(value, PrimitiveType::Object)
    }

    pub fn assert_type_of_symbol(&self, value: &Value) -> Result<()> {
        self.assert_type_of(value, PrimitiveType::Symbol)
    }

    fn assert_type_of(&self, value: &Value, tag: PrimitiveType) -> Result<()> {
        if !self.is_enabled() || type_of(value) == tag {
            return Ok(());
        }
        fail(format!(
            "Provided item was not of type {tag}. Was: {}",
            name_of_value(value)
        ))
    }

    pub fn assert_null(&self, value: &Value) -> Result<()> {
        if !self.is_enabled() || value.is_null() {
            return Ok(());
        }
        fail(format!(
            "Provided item was not null. Was type: {}, value: {}",
            name_of_value(value),
            value
        ))
    }

    pub fn assert_instance_of(&self, value: &Value, class: &Class) -> Result<()> {
        if !self.is_enabled() || is_instance_of(value, class) {
            return Ok(());
        }
        fail(format!(
            "Provided item was not of type {} but was type: {}, value: {}",
            class.name(),
            name_of_value(value),
            value
        ))
    }

    /// Asserts that `array` has exactly `expected_len` elements and no holes
    pub fn assert_is_tuple(&self, array: &Array, expected_len: usize) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        if array.len() != expected_len {
            return fail(format!(
                "Provided array is not a tuple of expected length {expected_len}. It has length {}.",
                array.len()
            ));
        }
        match (0..expected_len).find(|&i| !array.has_index(i)) {
            Some(i) => fail(format!(
                "Provided tuple is sparse and therefore not a tuple. Index {i} is missing."
            )),
            None => Ok(()),
        }
    }

    /// Marks code that should be impossible to reach, e.g. the fallback arm
    /// after every known case has been handled. Always fails when enabled.
    pub fn assert_unreachable(&self, value: &Value, msg: Option<&str>) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        fail(format!(
            "{}\nValue assumed impossible was actually of type: {}, value: {}",
            msg.unwrap_or(DEFAULT_UNREACHABLE_MESSAGE),
            name_of_value(value),
            value
        ))
    }

    /// Asserts that `value` is neither `null` nor `undefined`.
    /// Falsy values such as `0` and `""` pass.
    pub fn assert_non_nullable(&self, value: &Value) -> Result<()> {
        if !self.is_enabled() || !value.is_nullish() {
            return Ok(());
        }
        fail(format!(
            "Provided item should've been non-null but was: {value}"
        ))
    }

    /// Asserts that each key in `keys` is present on `object` with a value
    /// that is neither `null` nor `undefined`. Keys are checked in order.
    pub fn assert_props_non_nullable<K: AsRef<str>>(&self, object: &Object, keys: &[K]) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        for key in keys {
            let key = key.as_ref();
            match object.get(key) {
                None => {
                    return fail(format!(
                        "Provided object prop {key} should've been non-null but was not present at all."
                    ))
                }
                Some(value) if value.is_nullish() => {
                    return fail(format!(
                        "Provided object prop {key} should've been non-null but was: {value}"
                    ))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Asserts that `array` has no holes and no `null` or `undefined` elements
    pub fn assert_array_non_nullable(&self, array: &Array) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        match first_nullish(array) {
            None => Ok(()),
            Some(Nullish::Hole(i)) => fail(format!(
                "Provided array should've been non-null but was sparse with a missing item at index {i}"
            )),
            Some(Nullish::Null(i)) => fail(format!(
                "Provided array should've been non-null but had an item with value null at index {i}"
            )),
            Some(Nullish::Undefined(i)) => fail(format!(
                "Provided array should've been non-null but had an undefined item at index {i}"
            )),
        }
    }

    /// Like [`Asserter::assert_array_non_nullable`], for tuples. The length is
    /// not checked; call [`Asserter::assert_is_tuple`] first if it matters.
    pub fn assert_tuple_non_nullable(&self, tuple: &Array) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        match first_nullish(tuple) {
            None => Ok(()),
            Some(Nullish::Hole(i)) => fail(format!(
                "Provided tuple should've been non-null but is sparse. Index {i} is missing."
            )),
            Some(Nullish::Null(i)) => fail(format!(
                "Provided tuple should've been non-null but had an item with value null at index {i}"
            )),
            Some(Nullish::Undefined(i)) => fail(format!(
                "Provided tuple should've been non-null but had an undefined item at index {i}"
            )),
        }
    }

    /// Asserts that `value` is a number other than `NaN` or +/-`Infinity`
    pub fn assert_finite_number(&self, value: &Value) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        match value.as_f64() {
            None => fail(format!(
                "Provided item was not of type number. Was: {}",
                name_of_value(value)
            )),
            Some(n) if !n.is_finite() => fail(format!("Provided number was not finite. Was: {value}")),
            Some(_) => Ok(()),
        }
    }
}

impl Default for Asserter {
    fn default() -> Self {
        Self::new(Mode::from_build())
    }
}

impl From<Config> for Asserter {
    fn from(config: Config) -> Self {
        Self::from_config(&config)
    }
}

enum Nullish {
    Hole(usize),
    Null(usize),
    Undefined(usize),
}

fn first_nullish(array: &Array) -> Option<Nullish> {
    array.slots().enumerate().find_map(|(i, slot)| match slot {
        None => Some(Nullish::Hole(i)),
        Some(Value::Null) => Some(Nullish::Null(i)),
        Some(Value::Undefined) => Some(Nullish::Undefined(i)),
        Some(_) => None,
    })
}

#[cold]
fn fail<S: Into<String>>(detail: S) -> Result<()> {
    let err = AssertionError::new(detail);
    debug!(error = %err, "assertion failed");
    Err(err)
}
