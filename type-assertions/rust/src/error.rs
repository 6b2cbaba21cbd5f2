use thiserror::Error;

const PREFIX: &str = "Assertion failed: ";

/// Raised when a development-mode check does not hold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AssertionError {
    message: String,
}

impl AssertionError {
    pub const NAME: &'static str = "AssertionError";

    pub(crate) fn new<S: Into<String>>(detail: S) -> Self {
        let detail = detail.into();
        let mut message = String::with_capacity(PREFIX.len() + detail.len());
        message.push_str(PREFIX);
        message.push_str(&detail);
        Self { message }
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The message without the `Assertion failed: ` prefix
    pub fn detail(&self) -> &str {
        &self.message[PREFIX.len()..]
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid assertion mode {value:?} in {var}, expected development or production")]
    InvalidMode { var: &'static str, value: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("{0:?} is not a primitive type name")]
pub struct UnknownPrimitiveType(pub String);

pub type Result<T, E = AssertionError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_prefixed() {
        let err = AssertionError::new("x was 3");
        assert_eq!(err.to_string(), "Assertion failed: x was 3");
        assert_eq!(err.detail(), "x was 3");
        assert_eq!(err.name(), "AssertionError");
    }

    #[test]
    fn config_error_names_the_variable() {
        let err = ConfigError::InvalidMode {
            var: "TYPE_ASSERT_MODE",
            value: "staging".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid assertion mode \"staging\" in TYPE_ASSERT_MODE, expected development or production"
        );
    }
}
