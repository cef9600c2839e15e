//! Verifies the stored POW / private key against the author's allow-list.
//!
//! Usage:
//!   powkey-verify https://example.com/pow_list.txt
//!
//! POW and PRIVATE_KEY come from the environment or an env file (`.env` by
//! default). Exits 0 when the license checks out, 1 otherwise.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use powkey_cli::{init_logging, read_env_file, StoredTokens, EXAMPLE_ENV};
use powkey_license::{HttpAllowList, MachineSalt, Verifier};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "powkey-verify", version)]
#[command(about = "Verify a proof-of-work license against an allow-list")]
struct Args {
    /// URL of the allow-list (one name/project per line)
    allow_list_url: Option<String>,

    /// Env file holding POW and PRIVATE_KEY
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Override the OS username used as salt
    #[arg(long)]
    salt: Option<String>,

    /// Allow-list request timeout in seconds
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Print the verification result as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<bool> {
    let file_vars = match read_env_file(&args.env_file)? {
        Some(vars) => vars,
        None => {
            eprintln!(
                "Note: {} not found. This program expects an env file with POW and PRIVATE_KEY.",
                args.env_file.display()
            );
            eprintln!("Example content:\n{EXAMPLE_ENV}");
            HashMap::new()
        }
    };

    let Some(url) = args.allow_list_url else {
        eprintln!("Usage: powkey-verify <ALLOW_LIST_URL>");
        eprintln!("Example: powkey-verify https://example.com/pow_list.txt");
        return Ok(false);
    };

    let tokens = StoredTokens::resolve(&file_vars, |name| env::var(name).ok());
    if tokens.is_incomplete() {
        debug!("POW or PRIVATE_KEY not configured");
    }

    let salt = match args.salt {
        Some(s) => MachineSalt::new(s),
        None => MachineSalt::current().context("Failed to get current user for verification")?,
    };

    let verifier = Verifier::new(HttpAllowList::new(Duration::from_secs(args.timeout_secs)));
    let result = verifier.verify(&tokens.pow, &tokens.private_key, &url, salt.as_str());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.message());
        if result.is_success() {
            println!("License verified. Application can proceed.");
        }
    }

    Ok(result.is_success())
}
