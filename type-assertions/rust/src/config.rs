use std::{
    env,
    fmt::{self, Display},
    str::FromStr,
};

use tracing::info;

use crate::error::ConfigError;

pub const MODE_VAR: &str = "TYPE_ASSERT_MODE";

/// Whether assertions run. In `Production` every assertion returns `Ok`
/// without looking at its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    /// The mode implied by the build profile
    pub const fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Mode::Development
        } else {
            Mode::Production
        }
    }

    pub const fn is_development(self) -> bool {
        matches!(self, Mode::Development)
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Development => "development",
            Mode::Production => "production",
        })
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            _ => Err(ConfigError::InvalidMode {
                var: MODE_VAR,
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    mode: Mode,
}

impl Config {
    pub const fn new(mode: Mode) -> Self {
        Self { mode }
    }

    /// Reads `TYPE_ASSERT_MODE`, falling back to the build profile when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let (mode, source) = match lookup(MODE_VAR) {
            Some(value) => (value.parse::<Mode>()?, MODE_VAR),
            None => (Mode::from_build(), "build profile"),
        };

        let config = Config { mode };
        info!(mode = %config.mode, source, "initialized assertion config");

        Ok(config)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Mode::from_build())
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Config {{ mode: {} }}", self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_names() {
        assert_eq!(Mode::Development, "development".parse::<Mode>().unwrap());
        assert_eq!(Mode::Development, " DEV ".parse::<Mode>().unwrap());
        assert_eq!(Mode::Production, "Production".parse::<Mode>().unwrap());
        assert_eq!(Mode::Production, "prod".parse::<Mode>().unwrap());
        assert!("test".parse::<Mode>().is_err());
    }

    #[test]
    fn lookup_overrides_build_profile() {
        let config = Config::from_lookup(|key| {
            assert_eq!(MODE_VAR, key);
            Some("production".into())
        })
        .unwrap();
        assert_eq!(Mode::Production, config.mode());
    }

    #[test]
    fn unset_falls_back_to_build_profile() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(Mode::from_build(), config.mode());
        assert_eq!(Config::default(), config);
    }

    #[test]
    fn invalid_mode_is_an_error() {
        let err = Config::from_lookup(|_| Some("staging".into())).unwrap_err();
        assert_eq!(
            ConfigError::InvalidMode {
                var: MODE_VAR,
                value: "staging".into()
            },
            err
        );
    }
}
