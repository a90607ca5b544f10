use sentry::types::Dsn;
use std::{env::var, fmt, str::FromStr};
use tracing::warn;

pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Clone, Debug)]
pub struct EnvVars {
    pub batch_size: usize,
    pub environment: Environment,
    pub sentry_dsn: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        f.write_str(s)
    }
}

impl EnvVars {
    pub fn new() -> Self {
        let sentry_dsn = match var("SENTRY_DSN") {
            Ok(dsn_string) => {
                assert!(
                    valid_sentry_dsn(&dsn_string),
                    "SENTRY_DSN is not valid DSN."
                );
                Some(dsn_string)
            }
            Err(_e) => {
                warn!("SENTRY_DSN not set.");
                None
            }
        };

        let batch_size = match var("BATCH_SIZE") {
            Ok(v) => match v.parse::<usize>() {
                Ok(n) if n > 0 => n,
                Ok(_) => panic!("BATCH_SIZE must be greater than 0"),
                Err(e) => panic!("BATCH_SIZE is not a valid whole number: {:?}", e),
            },
            Err(_e) => {
                warn!("BATCH_SIZE not set. Defaulting to {DEFAULT_BATCH_SIZE}");
                DEFAULT_BATCH_SIZE
            }
        };

        let environment = match var("ENVIRONMENT") {
            Ok(v) => v.parse().unwrap_or_else(|e| {
                warn!("ENVIRONMENT {e}. Defaulting to 'production'.");
                Environment::Production
            }),
            Err(_e) => {
                warn!("ENVIRONMENT not set. Defaulting to 'production'.");
                Environment::Production
            }
        };

        Self {
            batch_size,
            environment,
            sentry_dsn,
        }
    }
}

impl Default for EnvVars {
    fn default() -> Self {
        Self::new()
    }
}

fn valid_sentry_dsn(url: &str) -> bool {
    url.parse::<Dsn>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!("Staging".parse::<Environment>(), Ok(Environment::Staging));
        assert_eq!(" DEVELOPMENT ".parse::<Environment>(), Ok(Environment::Development));
    }

    #[test]
    fn unknown_environment_is_rejected() {
        assert_eq!(
            "qa".parse::<Environment>(),
            Err("unknown environment 'qa'".to_string())
        );
        assert_eq!(Environment::Production.to_string(), "production");
        assert_eq!(
            Environment::Staging.to_string().parse::<Environment>(),
            Ok(Environment::Staging)
        );
    }

    #[test]
    fn sentry_dsn_is_validated() {
        assert!(valid_sentry_dsn("https://public@sentry.example.com/1"));
        assert!(!valid_sentry_dsn("not a dsn"));
    }
}
