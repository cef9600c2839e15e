//! Machine salt sourcing.
//!
//! The salt is the OS username of the account running the tool. Only the
//! binaries read it from the environment; the token and verifier functions
//! take it as a plain argument.

use crate::error::{LicenseError, LicenseResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Environment variables consulted for the username, in order.
pub const USERNAME_VARS: [&str; 3] = ["USER", "USERNAME", "LOGNAME"];

/// The username bound into a POW.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineSalt(String);

impl MachineSalt {
    /// Wraps an explicit salt value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Reads the current OS username from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::SaltUnavailable`] if no username variable is set.
    pub fn current() -> LicenseResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolves the salt through `lookup`, trying [`USERNAME_VARS`] in order.
    /// Blank values are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::SaltUnavailable`] if every lookup comes back empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LicenseResult<Self> {
        USERNAME_VARS
            .iter()
            .filter_map(|&name| lookup(name))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
            .map(Self)
            .ok_or_else(|| LicenseError::SaltUnavailable(USERNAME_VARS.join(", ")))
    }

    /// Returns the salt string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MachineSalt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MachineSalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
