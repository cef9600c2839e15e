//! Output of `powkey-generate`.

use powkey_license::{TokenPair, SALT_DELIMITER};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Machine-readable result of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCredentials {
    /// `name/project#username` as embedded in the POW.
    pub payload: String,
    /// Base64 POW.
    pub pow: String,
    /// `hex(sha256(sha512(POW)))`.
    pub private_key: String,
    /// The username bound into the POW.
    pub machine_salt: String,
}

impl GeneratedCredentials {
    /// Combines the embedded payload, the generated pair and the salt used.
    pub fn new(payload: String, pair: TokenPair, machine_salt: String) -> Self {
        Self {
            payload,
            pow: pair.pow,
            private_key: pair.private_key,
            machine_salt,
        }
    }
}

/// Renders the human-readable credentials and instructions.
#[must_use]
pub fn render_credentials(creds: &GeneratedCredentials) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n--- Generated Credentials ---");
    let _ = writeln!(out, "Data embedded in POW (before base64): {}", creds.payload);
    let _ = writeln!(
        out,
        "Proof of Work (base64 - includes name, project, and username salt): {}",
        creds.pow
    );
    let _ = writeln!(out, "Private Key (sha256(sha512(POW))): {}", creds.private_key);

    let _ = writeln!(out, "\n--- Instructions ---");
    let _ = writeln!(out, "1. Your Proof of Work (POW) represents: {}", creds.payload);
    let _ = writeln!(
        out,
        "   It has your OS username embedded. Share this base64 POW with the author."
    );
    let _ = writeln!(
        out,
        "   The author's list will contain the part BEFORE the '{SALT_DELIMITER}' (i.e., 'name/project')."
    );
    let _ = writeln!(
        out,
        "2. Keep your Private Key with the POW. It is derived directly from this specific POW."
    );
    let _ = writeln!(
        out,
        "   To verify, the software checks the key against the POW, then decodes the POW to check your username and 'name/project' against the author's list."
    );
    out
}
