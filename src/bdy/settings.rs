//! Installer configuration.

use crate::action::ActionEnv;
use crate::platform::{HostTarget, PlatformInfo};
use std::path::PathBuf;

/// Base URL BDY releases are served from
pub const DEFAULT_BASE_URL: &str = "https://es.buddy.works/bdy";

/// Release channel installed by the action
pub const DEFAULT_CHANNEL: &str = "prod";

/// Directory the archive is extracted into on linux and macOS
pub const DEFAULT_INSTALL_DIR: &str = "/usr/local/bin";

/// Name of the tool on PATH
pub const BDY_BINARY: &str = "bdy";

/// Where to find, fetch and install the BDY CLI
#[derive(Debug, Clone)]
pub struct BdySettings {
    /// Release server base URL, without trailing slash
    pub base_url: String,
    /// Release channel
    pub channel: String,
    /// System directory for extracted binaries (non-Windows)
    pub install_dir: PathBuf,
    /// Directory the archive is downloaded into
    pub work_dir: PathBuf,
    /// Explicit binary location (`BDY_PATH`)
    pub binary_override: Option<PathBuf>,
    /// PATH used to look the tool up when there is no override
    pub search_path: Option<String>,
    /// Host OS and architecture
    pub host: HostTarget,
}

impl Default for BdySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            channel: DEFAULT_CHANNEL.to_string(),
            install_dir: PathBuf::from(DEFAULT_INSTALL_DIR),
            work_dir: PathBuf::from("."),
            binary_override: None,
            search_path: None,
            host: HostTarget::current(),
        }
    }
}

impl BdySettings {
    /// Defaults plus the overrides present in the environment
    pub fn from_env(env: &ActionEnv) -> Self {
        Self {
            binary_override: env.bdy_path().map(PathBuf::from),
            search_path: env.search_path().map(str::to_string),
            ..Self::default()
        }
    }

    /// Program used to invoke the tool
    pub fn program(&self) -> String {
        match &self.binary_override {
            Some(path) => path.to_string_lossy().into_owned(),
            None => BDY_BINARY.to_string(),
        }
    }

    /// Resolve a helper program (`curl`, `tar`, `sudo`) against the search path.
    ///
    /// Falls back to the bare name, leaving the lookup to the OS.
    pub fn tool(&self, name: &str) -> String {
        self.search_path
            .as_deref()
            .and_then(|path| which::which_in(name, Some(path), &self.work_dir).ok())
            .map(|found| found.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string())
    }

    /// Archive URL for a version on this host
    pub fn download_url(&self, version: &str, platform: &PlatformInfo) -> String {
        format!(
            "{}/{}/{}/{}{}",
            self.base_url.trim_end_matches('/'),
            self.channel,
            version,
            platform.download_prefix,
            platform.file_extension
        )
    }
}
