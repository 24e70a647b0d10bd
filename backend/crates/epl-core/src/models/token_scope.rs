use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Purpose a token was issued for. A token only resolves under its own scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenScope {
    Authentication,
    Activation,
    PasswordReset,
}

impl TokenScope {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Activation => "activation",
            Self::PasswordReset => "password-reset",
        }
    }
}

impl FromStr for TokenScope {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "authentication" => Ok(Self::Authentication),
            "activation" => Ok(Self::Activation),
            "password-reset" => Ok(Self::PasswordReset),
            _ => Err(CoreError::InvalidTokenScope {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for TokenScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
