//! Generates a POW and private key for a name and project.
//!
//! Usage:
//!   powkey-generate
//!   powkey-generate --usage company --name "Acme" --project Rocket --env-file .env

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use powkey_cli::{
    collect_identity, init_logging, render_credentials, GeneratedCredentials, UsageType,
};
use powkey_license::{Identity, MachineSalt};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "powkey-generate", version)]
#[command(about = "Generate a proof-of-work license token and its private key")]
struct Args {
    /// Personal or company use (prompted if omitted)
    #[arg(long, value_enum)]
    usage: Option<UsageType>,

    /// Your name or company name (prompted if omitted)
    #[arg(long)]
    name: Option<String>,

    /// Project name (prompted if omitted)
    #[arg(long)]
    project: Option<String>,

    /// Override the OS username used as salt
    #[arg(long)]
    salt: Option<String>,

    /// Also write POW and PRIVATE_KEY to this env file
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Overwrite an existing env file
    #[arg(long, requires = "env_file")]
    force: bool,

    /// Print a JSON object instead of text
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
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<()> {
    let salt = match args.salt {
        Some(s) => MachineSalt::new(s),
        None => MachineSalt::current()
            .context("Failed to get current user. This is needed for salting the private key")?,
    };
    debug!(salt = %salt, "Resolved machine salt");

    // Prompts go to stderr in JSON mode so stdout stays a single document.
    let mut prompt_out: Box<dyn Write> = if args.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    writeln!(
        prompt_out,
        "Note: Your current OS username ('{salt}') will be embedded in the Proof of Work."
    )?;

    let answers = collect_identity(
        &mut io::stdin().lock(),
        &mut prompt_out,
        args.usage,
        args.name,
        args.project,
    )?;
    drop(prompt_out);

    let identity = Identity::new(&answers.name, &answers.project)?;
    let pair = identity.build(salt.as_str())?;
    let payload = identity.payload(salt.as_str());
    info!(usage = ?answers.usage, "Generated license token");

    if let Some(path) = &args.env_file {
        if path.exists() && !args.force {
            bail!("{} already exists (use --force to overwrite)", path.display());
        }
        fs::write(path, pair.to_env_file())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote env file");
    }

    let creds = GeneratedCredentials::new(payload, pair, salt.to_string());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&creds)?);
    } else {
        print!("{}", render_credentials(&creds));
        if let Some(path) = &args.env_file {
            println!("3. POW and PRIVATE_KEY were written to {}.", path.display());
        }
    }

    Ok(())
}
