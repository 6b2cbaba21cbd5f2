//! Development-mode runtime assertions over dynamically typed values.
//!
//! ```
//! use type_assertions::{Asserter, Expected, Mode, Object, PrimitiveType, Value};
//!
//! let asserter = Asserter::new(Mode::Development);
//!
//! let value = Value::from(1337);
//! asserter.assert_type(&value, &PrimitiveType::Number.into()).unwrap();
//! assert_eq!(value.as_f64(), Some(1337.0));
//!
//! let user = Object::new().with("name", "ada").with("email", Value::Null);
//! let err = asserter.assert_props_non_nullable(&user, &["name", "email"]).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Assertion failed: Provided object prop email should've been non-null but was: null"
//! );
//!
//! // Nothing is checked in production
//! let asserter = Asserter::new(Mode::Production);
//! assert!(asserter.assert_type(&Value::Null, &Expected::Undefined).is_ok());
//! ```

pub mod asserter;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod value;

pub use asserter::Asserter;
pub use config::{Config, Mode};
pub use descriptor::{name_of_expected, name_of_value, type_of, Expected, PrimitiveType};
pub use error::{AssertionError, ConfigError, Result, UnknownPrimitiveType};
pub use value::{Array, Class, Function, Object, Symbol, Value};
