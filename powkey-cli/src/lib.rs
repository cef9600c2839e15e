//! Shared plumbing for the `powkey-generate` and `powkey-verify` binaries.

pub mod env_file;
pub mod logging;
pub mod prompt;
pub mod report;

pub use env_file::{read_env_file, StoredTokens, EXAMPLE_ENV, POW_VAR, PRIVATE_KEY_VAR};
pub use logging::{filter_directives, init_logging};
pub use prompt::{collect_identity, IdentityAnswers, UsageType};
pub use report::{render_credentials, GeneratedCredentials};
