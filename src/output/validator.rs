use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::validation::report::{ChangeCategory, ChangeCode, ChangeItem, ChangeLog};

/// An external conformance validator, run as `program args... <output>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ValidatorCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "output", rename_all = "snake_case")]
pub enum ValidatorOutcome {
    Passed,
    /// Non-zero exit. Carries the validator's combined output.
    Failed(String),
    /// The validator could not be started.
    Unavailable(String),
}

/// Run `command` against `path`. Never fails the conversion; problems are
/// recorded in `log`.
pub fn run_validator(
    command: &ValidatorCommand,
    path: &Path,
    log: &mut ChangeLog,
) -> ValidatorOutcome {
    let output = Command::new(&command.program)
        .args(&command.args)
        .arg(path)
        .output();

    match output {
        Ok(out) if out.status.success() => {
            tracing::info!("External validator passed for {}", path.display());
            ValidatorOutcome::Passed
        }
        Ok(out) => {
            let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&out.stderr));
            let text = text.trim().to_string();
            log.add(ChangeItem::warning(
                ChangeCode::ExternalValidationFailed,
                ChangeCategory::Tooling,
                format!("{} reported problems ({}): {text}", command.program, out.status),
            ));
            ValidatorOutcome::Failed(text)
        }
        Err(err) => {
            let reason = format!("could not run {}: {err}", command.program);
            log.add(ChangeItem::warning(
                ChangeCode::OptionalToolUnavailable,
                ChangeCategory::Tooling,
                format!("External validation skipped, {reason}"),
            ));
            ValidatorOutcome::Unavailable(reason)
        }
    }
}
