//! Loading the stored token pair from an env file.
//!
//! Variables already set in the process environment win over the file, the
//! same way `dotenvy::dotenv()` leaves existing variables alone.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Variable holding the POW.
pub const POW_VAR: &str = "POW";

/// Variable holding the private key.
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";

/// Shown when the env file is missing.
pub const EXAMPLE_ENV: &str = "POW=\"BASE64_OF_NAME/PROJECT#USERNAME\"\nPRIVATE_KEY=\"SHA256_OF_SHA512_OF_THE_POW_ABOVE\"\n";

/// Reads `KEY=VALUE` pairs from an env file without touching the process
/// environment. Returns `None` if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn read_env_file(path: &Path) -> Result<Option<HashMap<String, String>>> {
    if !path.exists() {
        return Ok(None);
    }

    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to open env file {}", path.display()))?;
    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) =
            item.with_context(|| format!("Failed to parse env file {}", path.display()))?;
        vars.insert(key, value);
    }
    Ok(Some(vars))
}

/// The POW / private key pair a user keeps between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredTokens {
    /// The POW, empty if not configured.
    pub pow: String,
    /// The private key, empty if not configured.
    pub private_key: String,
}

impl StoredTokens {
    /// Resolves the pair from the process environment (`lookup`) first and
    /// the env file second. Missing values are left empty for the verifier
    /// to report.
    pub fn resolve(
        file_vars: &HashMap<String, String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let get = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .or_else(|| file_vars.get(name).cloned())
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        Self {
            pow: get(POW_VAR),
            private_key: get(PRIVATE_KEY_VAR),
        }
    }

    /// Returns true if either value is missing.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.pow.is_empty() || self.private_key.is_empty()
    }
}
