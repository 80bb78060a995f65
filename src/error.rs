//! Error types for bdy_package_publish operations.
//!
//! This module defines the fatal error taxonomy with actionable messages and
//! recovery suggestions, plus the normalizer that turns anything a failed run
//! can produce (typed errors or panic payloads) into a reportable message.

use std::any::Any;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bdy_package_publish operations
pub type Result<T> = std::result::Result<T, ActionError>;

/// Fallback message when a failure carries no usable information
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Fallback message when a failure value cannot be serialized
pub const NON_SERIALIZABLE_ERROR_MESSAGE: &str = "An error occurred (non-serializable)";

/// Main error type for all action operations
#[derive(Error, Debug)]
pub enum ActionError {
    /// Host platform is not covered by the published binaries
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Latest version lookup failed
    #[error("Failed to fetch latest version from {url}: {reason}")]
    Fetch {
        /// URL that was requested
        url: String,
        /// Transport or HTTP status description
        reason: String,
    },

    /// Archive download failed
    #[error("Failed to download BDY CLI. URL: {url}")]
    Download {
        /// URL that was requested
        url: String,
    },

    /// External program exited with a non-zero status
    #[error("The process '{program}' failed with exit code {exit_code}")]
    CommandFailed {
        /// Program that was run
        program: String,
        /// Exit code, or -1 when terminated by a signal
        exit_code: i32,
    },

    /// External program could not be started at all
    #[error("Unable to locate executable file: {program} ({source})")]
    Spawn {
        /// Program that was run
        program: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// Required credential missing from the environment
    #[error(
        "{name} is not set. Please use the buddy/login@v1 action before publishing packages."
    )]
    MissingCredential {
        /// Environment variable name
        name: String,
    },

    /// Region override is not a known region
    #[error("Invalid region: \"{region}\". Must be one of: {}", .valid.join(", "))]
    InvalidRegion {
        /// Region as supplied
        region: String,
        /// Accepted region names
        valid: Vec<String>,
    },

    /// Required action input not supplied
    #[error("Input required and not supplied: {name}")]
    MissingInput {
        /// Input name
        name: String,
    },

    /// Writing an output or exported variable failed
    #[error("Unable to set '{key}': {reason}")]
    Output {
        /// Output key or variable name
        key: String,
        /// Reason for the error
        reason: String,
    },

    /// Output or environment file could not be written
    #[error("Failed to write {path}: {source}")]
    FileCommand {
        /// File named by the host
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Platform resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Operating system is not linux, darwin or win32
    #[error("Unsupported platform: {platform}. Only linux, darwin, and win32 are supported.")]
    UnsupportedPlatform {
        /// Reported OS name
        platform: String,
    },

    /// CPU architecture is not x64 or arm64
    #[error("Unsupported architecture: {arch}. Only x64 and arm64 are supported.")]
    UnsupportedArchitecture {
        /// Reported architecture name
        arch: String,
    },

    /// Known OS and architecture, but no binary is published for the pair
    #[error("{}", combination_message(.platform, .arch))]
    UnsupportedCombination {
        /// Resolved OS label
        platform: String,
        /// Resolved architecture label
        arch: String,
    },
}

fn combination_message(platform: &str, arch: &str) -> String {
    match (platform, arch) {
        ("darwin", "x64") => {
            "macOS x64 is not supported. Only darwin-arm64 binaries are available.".to_string()
        }
        ("win32", "arm64") => {
            "Windows ARM64 is not supported. Only win-x64 binaries are available.".to_string()
        }
        _ => format!("{platform}-{arch} is not supported."),
    }
}

impl ActionError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ActionError::MissingCredential { .. } => vec![
                "Add a buddy/login@v1 step before this action".to_string(),
                "Verify the login step exports BUDDY_TOKEN and BUDDY_API_ENDPOINT".to_string(),
            ],
            ActionError::Platform(_) => vec![
                "Run the job on linux (x64/arm64), macOS (arm64) or Windows (x64)".to_string(),
                "Or install bdy yourself and point BDY_PATH at it".to_string(),
            ],
            ActionError::Fetch { .. } | ActionError::Download { .. } => vec![
                "Check that the runner can reach es.buddy.works".to_string(),
                "Pre-install bdy and set BDY_PATH to skip the download".to_string(),
            ],
            ActionError::InvalidRegion { valid, .. } => {
                vec![format!("Use one of: {}", valid.join(", "))]
            }
            ActionError::MissingInput { name } => {
                vec![format!("Add '{name}' to the step's `with:` block")]
            }
            _ => Vec::new(),
        }
    }
}

/// A failure normalized for reporting through the host's failure channel.
#[derive(Debug)]
pub enum Reported {
    /// A typed error, passed through unchanged
    Error(ActionError),
    /// Message extracted from an untyped failure value
    Message(String),
}

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reported::Error(e) => write!(f, "{e}"),
            Reported::Message(m) => f.write_str(m),
        }
    }
}

/// Typed errors are reported as they are.
pub fn normalize_error(error: ActionError) -> Reported {
    Reported::Error(error)
}

/// Convert a panic payload into a displayable message.
///
/// Handles the payload shapes a panic can carry: string literals, formatted
/// strings, `ActionError`s raised with `panic_any`, and JSON values.
pub fn normalize_panic(payload: Box<dyn Any + Send>) -> Reported {
    let payload = match payload.downcast::<ActionError>() {
        Ok(error) => return Reported::Error(*error),
        Err(other) => other,
    };

    if let Some(message) = payload.downcast_ref::<&'static str>() {
        return Reported::Message((*message).to_string());
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return Reported::Message(message.clone());
    }
    if let Some(value) = payload.downcast_ref::<serde_json::Value>() {
        return Reported::Message(normalize_value(value));
    }

    Reported::Message(UNKNOWN_ERROR_MESSAGE.to_string())
}

/// Extract a message from an arbitrary JSON failure value.
pub fn normalize_value(value: &serde_json::Value) -> String {
    use serde_json::Value;

    match value {
        Value::Null => UNKNOWN_ERROR_MESSAGE.to_string(),
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => serde_json::to_string(value)
                .unwrap_or_else(|_| NON_SERIALIZABLE_ERROR_MESSAGE.to_string()),
        },
        other => serde_json::to_string(other)
            .unwrap_or_else(|_| NON_SERIALIZABLE_ERROR_MESSAGE.to_string()),
    }
}
