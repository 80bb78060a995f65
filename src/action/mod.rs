//! CI host surface for the action.
//!
//! Everything the action says to the runner goes through [`ActionHost`]:
//! progress lines, warnings, secret masking, step outputs, exported variables
//! and the terminal failure message.

mod command;
pub mod env;
mod file_command;

pub use command::{escape_data, escape_property, format_command};
pub use env::ActionEnv;
pub use file_command::{issue_file_command, prepare_key_value_message};

use crate::cli::OutputManager;
use crate::error::{ActionError, Result};

/// Runner environment plus the output channel.
#[derive(Debug, Clone)]
pub struct ActionHost {
    env: ActionEnv,
    output: OutputManager,
}

impl ActionHost {
    /// Create a host over an environment snapshot
    pub fn new(env: ActionEnv, output: OutputManager) -> Self {
        Self { env, output }
    }

    /// Environment snapshot
    pub fn env(&self) -> &ActionEnv {
        &self.env
    }

    /// Output channel
    pub fn output(&self) -> &OutputManager {
        &self.output
    }

    /// Print an info line
    pub fn info(&self, message: &str) {
        let _ = self.output.info(message);
    }

    /// Print a success line
    pub fn success(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Emit a warning annotation
    pub fn warning(&self, message: &str) {
        let _ = self.output.command(&format_command("warning", &[], message));
    }

    /// Register a value the runner must redact from all logs
    pub fn set_secret(&self, secret: &str) {
        let _ = self.output.command(&format_command("add-mask", &[], secret));
    }

    /// Report the run as failed
    pub fn set_failed(&self, message: &str) {
        let _ = self.output.command(&format_command("error", &[], message));
    }

    /// Set a step output
    pub fn set_output(&self, key: &str, value: &str) -> Result<()> {
        if let Some(path) = self.env.path(env::GITHUB_OUTPUT) {
            return issue_file_command(&path, &prepare_key_value_message(key, value)?);
        }

        let _ = self.output.println("");
        let _ = self
            .output
            .command(&format_command("set-output", &[("name", key)], value));
        Ok(())
    }

    /// Export an environment variable for later steps
    pub fn export_variable(&self, name: &str, value: &str) -> Result<()> {
        if let Some(path) = self.env.path(env::GITHUB_ENV) {
            return issue_file_command(&path, &prepare_key_value_message(name, value)?);
        }

        let _ = self
            .output
            .command(&format_command("set-env", &[("name", name)], value));
        Ok(())
    }
}

/// Validate a required input value.
///
/// Values are trimmed; blank values count as not supplied.
pub fn required_input(name: &str, value: Option<&str>) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ActionError::MissingInput {
            name: name.to_string(),
        }),
    }
}

/// Trim an optional input, mapping blank to `None`.
pub fn optional_input(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse an optional boolean input.
///
/// Accepts the YAML 1.2 core schema spellings. Anything else warns and
/// yields `false`; an unset or blank input is `false` without a warning.
pub fn boolean_input(host: &ActionHost, name: &str, value: Option<&str>) -> bool {
    let Some(raw) = optional_input(value) else {
        return false;
    };

    match raw.as_str() {
        "true" | "True" | "TRUE" => true,
        "false" | "False" | "FALSE" => false,
        other => {
            host.warning(&format!(
                "Invalid boolean value for input '{name}': '{other}'. Defaulting to false"
            ));
            false
        }
    }
}
