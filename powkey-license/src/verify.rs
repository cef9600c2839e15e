//! POW / private key verification.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. POW, private key and allow-list URL are present
//! 2. The private key equals `hex(sha256(sha512(pow)))`
//! 3. The POW decodes to UTF-8 text
//! 4. The decoded text is `subject/project#salt` and the salt is the current user
//! 5. `subject/project` appears in the allow-list fetched from the URL
//!
//! Every outcome, including fetch errors, comes back as a [`Verification`].

use crate::allowlist::{self, AllowListSource, HttpAllowList};
use crate::token::{decode_pow, derive_private_key, split_payload};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Why a verification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// POW, private key or URL was empty.
    MissingInput,
    /// The private key does not belong to the POW.
    KeyMismatch,
    /// The POW is not valid base64 / UTF-8.
    DecodeError,
    /// The decoded POW lacks exactly one salt delimiter.
    MalformedToken,
    /// The embedded username differs from the current one.
    UsernameMismatch,
    /// The allow-list could not be fetched.
    FetchError,
    /// The identity is not on the allow-list.
    NotListed,
}

impl FailureReason {
    /// Returns a stable identifier for this reason.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingInput => "missing_input",
            Self::KeyMismatch => "key_mismatch",
            Self::DecodeError => "decode_error",
            Self::MalformedToken => "malformed_token",
            Self::UsernameMismatch => "username_mismatch",
            Self::FetchError => "fetch_error",
            Self::NotListed => "not_listed",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of one verification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Verification {
    /// All checks passed.
    Success {
        /// The licensed `subject/project`.
        identity: String,
        /// The username the POW was bound to.
        machine_salt: String,
        /// Human-readable summary.
        message: String,
    },
    /// The first check that failed.
    Failure {
        /// Failure category.
        reason: FailureReason,
        /// Human-readable explanation.
        message: String,
    },
}

impl Verification {
    fn failure(reason: FailureReason, message: String) -> Self {
        info!(reason = %reason, "License verification failed: {}", message);
        Self::Failure { reason, message }
    }

    /// Returns true if verification succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<FailureReason> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason, .. } => Some(*reason),
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Failure { message, .. } => message,
        }
    }
}

/// Verifies token pairs against an allow-list source.
#[derive(Debug, Clone, Default)]
pub struct Verifier<S = HttpAllowList> {
    source: S,
}

impl<S: AllowListSource> Verifier<S> {
    /// Creates a verifier that reads allow-lists from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Runs the full check sequence. Never panics or returns an error;
    /// failures are reported through [`Verification::Failure`].
    pub fn verify(
        &self,
        pow: &str,
        private_key: &str,
        allow_list_url: &str,
        current_machine_salt: &str,
    ) -> Verification {
        let missing: Vec<&str> = [
            ("POW", pow),
            ("PRIVATE_KEY", private_key),
            ("allow-list URL", allow_list_url),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(name, _)| name)
        .collect();
        if !missing.is_empty() {
            return Verification::failure(
                FailureReason::MissingInput,
                format!("Missing required input: {}.", missing.join(", ")),
            );
        }

        debug!("Checking private key against POW");
        if derive_private_key(pow) != private_key {
            return Verification::failure(
                FailureReason::KeyMismatch,
                "Private key mismatch. The provided private key does not match the hash of the POW."
                    .to_string(),
            );
        }

        let decoded = match decode_pow(pow) {
            Ok(decoded) => decoded,
            Err(e) => {
                return Verification::failure(
                    FailureReason::DecodeError,
                    format!("Failed to decode POW: {e}"),
                );
            }
        };

        let (identity, embedded_salt) = match split_payload(&decoded) {
            Ok(parts) => parts,
            Err(e) => {
                return Verification::failure(
                    FailureReason::MalformedToken,
                    format!("Failed to parse decoded POW: {e}"),
                );
            }
        };

        if embedded_salt != current_machine_salt {
            return Verification::failure(
                FailureReason::UsernameMismatch,
                format!(
                    "Username mismatch. POW was generated for user '{embedded_salt}', but current user is '{current_machine_salt}'."
                ),
            );
        }

        debug!(identity, "POW decoded, checking allow-list");
        let lines = match self.source.fetch_lines(allow_list_url) {
            Ok(lines) => lines,
            Err(e) => {
                return Verification::failure(
                    FailureReason::FetchError,
                    format!("Failed to fetch allow-list from {allow_list_url}: {e}"),
                );
            }
        };

        if !allowlist::contains(&lines, identity) {
            return Verification::failure(
                FailureReason::NotListed,
                format!(
                    "The name/project part ('{identity}') from your POW was not found in the allow-list at {allow_list_url}."
                ),
            );
        }

        debug!(identity, "License verified");
        Verification::Success {
            identity: identity.to_string(),
            machine_salt: embedded_salt.to_string(),
            message: format!(
                "Verification successful (User: '{embedded_salt}', Project Info: '{identity}')."
            ),
        }
    }
}

/// Verifies a token pair, fetching the allow-list over HTTP with the
/// default timeout.
pub fn verify(
    pow: &str,
    private_key: &str,
    allow_list_url: &str,
    current_machine_salt: &str,
) -> Verification {
    Verifier::new(HttpAllowList::default()).verify(
        pow,
        private_key,
        allow_list_url,
        current_machine_salt,
    )
}
