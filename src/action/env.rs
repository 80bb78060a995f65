//! Snapshot of the environment the action runs in.

use std::collections::HashMap;
use std::path::PathBuf;

/// Override for the BDY CLI binary location
pub const BDY_PATH: &str = "BDY_PATH";
/// API token exported by the login action
pub const BUDDY_TOKEN: &str = "BUDDY_TOKEN";
/// API endpoint exported by the login action
pub const BUDDY_API_ENDPOINT: &str = "BUDDY_API_ENDPOINT";
/// Exported package URL for downstream steps
pub const BUDDY_PACKAGE_URL: &str = "BUDDY_PACKAGE_URL";
/// File that collects step outputs
pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";
/// File that collects exported environment variables
pub const GITHUB_ENV: &str = "GITHUB_ENV";

/// Environment variables captured once at startup.
///
/// Every component reads configuration from here instead of the live process
/// environment, so tests can describe the runner with a plain map.
#[derive(Debug, Clone, Default)]
pub struct ActionEnv {
    vars: HashMap<String, String>,
}

impl ActionEnv {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Build from explicit key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Return a copy with one more variable set
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Value of a variable; empty values count as unset
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Value of a variable interpreted as a path
    pub fn path(&self, name: &str) -> Option<PathBuf> {
        self.get(name).map(PathBuf::from)
    }

    /// `BDY_PATH` override, if any
    pub fn bdy_path(&self) -> Option<&str> {
        self.get(BDY_PATH)
    }

    /// `PATH` used for tool lookup
    pub fn search_path(&self) -> Option<&str> {
        self.get("PATH").or_else(|| self.get("Path"))
    }
}
