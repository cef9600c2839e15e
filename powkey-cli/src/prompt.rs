//! Interactive collection of the name and project for a new token.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use std::io::{BufRead, Write};

/// Whether the license is for a person or a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UsageType {
    /// Personal use.
    Personal,
    /// Company use.
    Company,
}

impl UsageType {
    /// Interprets a prompt answer. Anything other than `company` is personal.
    #[must_use]
    pub fn from_answer(answer: &str) -> Self {
        if answer.trim().eq_ignore_ascii_case("company") {
            Self::Company
        } else {
            Self::Personal
        }
    }

    fn name_prompt(&self) -> &'static str {
        match self {
            Self::Personal => "Enter your name: ",
            Self::Company => "Enter your company name: ",
        }
    }
}

/// Answers gathered from flags and prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityAnswers {
    /// Personal or company use.
    pub usage: UsageType,
    /// Personal or company name, trimmed.
    pub name: String,
    /// Project name, trimmed.
    pub project: String,
}

/// Fills in whatever `usage`, `name` and `project` leave unset by prompting
/// on `output` and reading lines from `input`. Answers are trimmed.
///
/// # Errors
///
/// Fails if the input closes before a required answer or on I/O errors.
/// Empty answers are returned as-is for the builder to reject.
pub fn collect_identity<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    usage: Option<UsageType>,
    name: Option<String>,
    project: Option<String>,
) -> Result<IdentityAnswers> {
    let usage = match usage {
        Some(u) => u,
        None => UsageType::from_answer(&ask(
            input,
            output,
            "Are you using this code for personal or company use? (personal/company):\n",
        )?),
    };

    let name = match name {
        Some(n) => n.trim().to_string(),
        None => ask(input, output, usage.name_prompt())?,
    };

    let project = match project {
        Some(p) => p.trim().to_string(),
        None => ask(input, output, "Enter the project name: ")?,
    };

    Ok(IdentityAnswers {
        usage,
        name,
        project,
    })
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{question}").context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read answer")?;
    if read == 0 {
        bail!("input closed before answering: {}", question.trim());
    }
    Ok(line.trim().to_string())
}
