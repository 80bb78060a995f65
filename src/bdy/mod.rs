//! BDY CLI provisioning.
//!
//! Detects an existing BDY installation, resolves the latest published
//! version and installs the matching archive for the host when missing.

mod guard;
mod installer;
mod settings;
mod version;

pub use guard::ArchiveGuard;
pub use installer::{InstallProbe, Installer, parse_version_output};
pub use settings::{BDY_BINARY, BdySettings, DEFAULT_BASE_URL, DEFAULT_CHANNEL, DEFAULT_INSTALL_DIR};
pub use version::{fetch_latest_version, latest_version_url};
