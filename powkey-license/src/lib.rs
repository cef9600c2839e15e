//! Proof-of-work license tokens.
//!
//! This crate handles:
//! - Building a POW and private key from a name, a project and the OS username
//! - Checking that a stored POW / private key pair belongs together
//! - Checking the licensed `name/project` against an author-hosted allow-list
//!
//! # Trust Model
//!
//! This is honor-system licensing. The private key is a plain hash of the POW,
//! not a secret and not a signature. Verification proves the pair was produced
//! together on the same account, nothing more.
//!
//! # Token Format
//!
//! - POW: `base64(subject/project#username)`
//! - Private key: `hex(sha256(sha512(POW)))`
//!
//! The allow-list is a plain-text file with one `subject/project` per line.

mod allowlist;
mod error;
mod salt;
mod token;
mod verify;

pub use allowlist::{
    contains, split_lines, AllowListSource, HttpAllowList, StaticAllowList,
    DEFAULT_FETCH_TIMEOUT, USER_AGENT,
};
pub use error::{LicenseError, LicenseResult};
pub use salt::{MachineSalt, USERNAME_VARS};
pub use token::{
    build, decode_pow, derive_private_key, encode_pow, split_payload, Identity, TokenPair,
    PRIVATE_KEY_HEX_LEN, PROJECT_SEPARATOR, SALT_DELIMITER,
};
pub use verify::{verify, FailureReason, Verification, Verifier};
