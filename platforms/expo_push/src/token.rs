use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::ValidationError;

/// Every Expo push token starts with this prefix.
pub const TOKEN_PREFIX: &str = "ExponentPushToken";

pub(crate) fn is_valid_token(token: &str) -> bool {
    token.starts_with(TOKEN_PREFIX)
}

/// A push token that is known to carry the Expo prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ExpoPushToken(String);

impl ExpoPushToken {
    /// Check `token` and wrap it, rejecting anything without [`TOKEN_PREFIX`].
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        if !is_valid_token(&token) {
            return Err(ValidationError::MalformedToken { token });
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for ExpoPushToken {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ExpoPushToken {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExpoPushToken> for String {
    fn from(token: ExpoPushToken) -> Self {
        token.0
    }
}

impl AsRef<str> for ExpoPushToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpoPushToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
