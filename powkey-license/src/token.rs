//! POW token construction and private key derivation.
//!
//! A POW is the standard base64 encoding of `subject/project#salt`, where
//! the salt is the OS username of the account that generated it.
//!
//! The private key is `hex(sha256(sha512(pow)))`. It is not a secret: it only
//! shows that the POW and key were produced together and were not edited
//! afterwards.

use crate::error::{LicenseError, LicenseResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

/// Separates `subject/project` from the embedded machine salt.
pub const SALT_DELIMITER: char = '#';

/// Separates the subject from the project in the canonical string.
pub const PROJECT_SEPARATOR: char = '/';

/// Length of a private key in hex characters.
pub const PRIVATE_KEY_HEX_LEN: usize = 64;

/// Who is licensed, and for which project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Personal or company name.
    subject: String,
    /// Project label.
    project: String,
}

impl Identity {
    /// Creates a validated identity.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidInput`] if either field is blank or
    /// contains [`SALT_DELIMITER`].
    pub fn new(subject: &str, project: &str) -> LicenseResult<Self> {
        if subject.trim().is_empty() || project.trim().is_empty() {
            return Err(LicenseError::InvalidInput(
                "name/company name and project name cannot be empty".to_string(),
            ));
        }
        if subject.contains(SALT_DELIMITER) || project.contains(SALT_DELIMITER) {
            return Err(LicenseError::InvalidInput(format!(
                "name/company name and project name cannot contain '{SALT_DELIMITER}'"
            )));
        }

        Ok(Self {
            subject: subject.to_string(),
            project: project.to_string(),
        })
    }

    /// Returns the subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the project.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Returns `subject/project`, the form the allow-list carries.
    #[must_use]
    pub fn canonical(&self) -> String {
        format!("{}{PROJECT_SEPARATOR}{}", self.subject, self.project)
    }

    /// Returns `subject/project#salt`, the payload encoded into the POW.
    #[must_use]
    pub fn payload(&self, machine_salt: &str) -> String {
        format!("{}{SALT_DELIMITER}{machine_salt}", self.canonical())
    }

    /// Builds the POW and private key for this identity bound to `machine_salt`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidInput`] if the salt is empty or
    /// contains [`SALT_DELIMITER`].
    pub fn build(&self, machine_salt: &str) -> LicenseResult<TokenPair> {
        if machine_salt.is_empty() {
            return Err(LicenseError::InvalidInput(
                "machine salt cannot be empty".to_string(),
            ));
        }
        if machine_salt.contains(SALT_DELIMITER) {
            return Err(LicenseError::InvalidInput(format!(
                "machine salt cannot contain '{SALT_DELIMITER}'"
            )));
        }

        let pow = encode_pow(&self.payload(machine_salt));
        let private_key = derive_private_key(&pow);

        Ok(TokenPair { pow, private_key })
    }
}

/// The two strings a user keeps after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Base64 proof of work.
    pub pow: String,
    /// Hex digest bound to `pow`.
    pub private_key: String,
}

impl TokenPair {
    /// Renders the pair as `.env` file contents.
    #[must_use]
    pub fn to_env_file(&self) -> String {
        format!("POW=\"{}\"\nPRIVATE_KEY=\"{}\"\n", self.pow, self.private_key)
    }
}

/// Builds the POW and private key for an identity on this machine.
///
/// Deterministic: the same arguments always give the same pair.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidInput`] if any argument is blank or
/// contains [`SALT_DELIMITER`]. Nothing is produced in that case.
pub fn build(subject: &str, project: &str, machine_salt: &str) -> LicenseResult<TokenPair> {
    Identity::new(subject, project)?.build(machine_salt)
}

/// Encodes a payload string into a POW.
#[must_use]
pub fn encode_pow(payload: &str) -> String {
    BASE64.encode(payload.as_bytes())
}

/// Decodes a POW back into its payload string.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidEncoding`] if `pow` is not standard base64
/// or the bytes are not UTF-8.
pub fn decode_pow(pow: &str) -> LicenseResult<String> {
    let bytes = BASE64
        .decode(pow)
        .map_err(|e| LicenseError::InvalidEncoding(format!("invalid base64: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| LicenseError::InvalidEncoding(format!("payload is not UTF-8: {e}")))
}

/// Derives the private key for a POW: `hex(sha256(sha512(pow)))`.
#[must_use]
pub fn derive_private_key(pow: &str) -> String {
    let wide = Sha512::digest(pow.as_bytes());
    let narrow = Sha256::digest(wide);
    hex::encode(narrow)
}

/// Splits a decoded payload into `(subject/project, salt)`.
///
/// # Errors
///
/// Returns [`LicenseError::MalformedToken`] unless the payload holds exactly
/// one delimiter with non-empty text on both sides.
pub fn split_payload(decoded: &str) -> LicenseResult<(&str, &str)> {
    let parts: Vec<&str> = decoded.split(SALT_DELIMITER).collect();
    match parts.as_slice() {
        [identity, salt] if !identity.is_empty() && !salt.is_empty() => Ok((identity, salt)),
        _ => Err(LicenseError::MalformedToken(format!(
            "expected exactly one '{SALT_DELIMITER}' delimiter, decoded: {decoded}"
        ))),
    }
}
