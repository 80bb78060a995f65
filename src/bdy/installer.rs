//! BDY CLI installation and version checks.

use super::guard::ArchiveGuard;
use super::settings::{BDY_BINARY, BdySettings};
use super::version::fetch_latest_version;
use crate::action::ActionHost;
use crate::error::{ActionError, Result};
use crate::exec::{self, ExecOptions};
use crate::platform::{SupportedPlatform, resolve_platform};
use regex::Regex;
use std::sync::LazyLock;

/// Version reported when `bdy version` cannot be run
pub const UNKNOWN_VERSION: &str = "unknown";

static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.\d+\.\d+(-[\w.]+)?").expect("version pattern is valid")
});

/// Outcome of looking for an existing installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallProbe {
    /// The tool answered (or was found on PATH)
    Installed,
    /// No binary at the override path or on PATH
    NotFound,
    /// The lookup itself failed
    ProbeError(String),
}

impl InstallProbe {
    /// Collapse to the installed / not installed answer
    pub fn is_installed(&self) -> bool {
        matches!(self, InstallProbe::Installed)
    }
}

/// Extract the version from `bdy version` output.
///
/// Scans lines from last to first and returns the first that starts with a
/// semantic version; falls back to the whole trimmed output.
pub fn parse_version_output(output: &str) -> String {
    let trimmed = output.trim();
    trimmed
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty() && VERSION_LINE.is_match(line))
        .unwrap_or(trimmed)
        .to_string()
}

/// Installs and inspects the BDY CLI for one run
#[derive(Debug)]
pub struct Installer<'a> {
    settings: BdySettings,
    host: &'a ActionHost,
    client: reqwest::Client,
}

impl<'a> Installer<'a> {
    /// Create an installer reporting through `host`
    pub fn new(settings: BdySettings, host: &'a ActionHost) -> Self {
        Self {
            settings,
            host,
            client: reqwest::Client::new(),
        }
    }

    /// Installer settings
    pub fn settings(&self) -> &BdySettings {
        &self.settings
    }

    /// Look for an existing installation without printing anything.
    pub async fn probe(&self) -> InstallProbe {
        if let Some(path) = &self.settings.binary_override {
            let program = path.to_string_lossy();
            return match exec::probe(&program, &["version"]).await {
                Ok(true) => InstallProbe::Installed,
                Ok(false) => InstallProbe::ProbeError(format!("'{program} version' failed")),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => InstallProbe::NotFound,
                Err(e) => InstallProbe::ProbeError(e.to_string()),
            };
        }

        let Some(search_path) = self.settings.search_path.as_deref() else {
            return InstallProbe::NotFound;
        };
        match which::which_in(BDY_BINARY, Some(search_path), &self.settings.work_dir) {
            Ok(found) => {
                log::debug!("Found {} at {}", BDY_BINARY, found.display());
                InstallProbe::Installed
            }
            Err(which::Error::CannotFindBinaryPath) => InstallProbe::NotFound,
            Err(e) => InstallProbe::ProbeError(e.to_string()),
        }
    }

    /// Whether the tool is available; probe failures count as not installed
    pub async fn is_installed(&self) -> bool {
        let probe = self.probe().await;
        if let InstallProbe::ProbeError(reason) = &probe {
            log::debug!("Treating probe failure as not installed: {reason}");
        }
        probe.is_installed()
    }

    /// Installed version, or `"unknown"` when `bdy version` fails
    pub async fn version(&self) -> String {
        match exec::execute(&self.settings.program(), &["version"], ExecOptions::silent()).await {
            Ok(output) => parse_version_output(&output.stdout),
            Err(e) => {
                log::debug!("bdy version failed: {e}");
                UNKNOWN_VERSION.to_string()
            }
        }
    }

    /// Download and extract the latest release for this host.
    ///
    /// # Errors
    ///
    /// * `Platform` - the host has no published binary
    /// * `Fetch` - the latest version could not be resolved
    /// * `Download` - the archive could not be downloaded
    /// * `CommandFailed` / `Spawn` - directory creation or extraction failed
    pub async fn install(&self) -> Result<()> {
        let platform = resolve_platform(&self.settings.host)?;
        if let Ok(descriptor) = serde_json::to_string(&platform) {
            log::debug!("Resolved platform: {descriptor}");
        }
        let version =
            fetch_latest_version(&self.client, &self.settings.base_url, &self.settings.channel)
                .await?;

        self.host.info(&format!(
            "Installing BDY CLI ({version}) for {}...",
            platform.download_prefix
        ));

        let file_name = format!("bdy{}", platform.file_extension);
        let url = self.settings.download_url(&version, &platform);
        let install_dir = self.settings.install_dir.to_string_lossy().into_owned();
        let echo = ExecOptions::echo(self.host.output());
        let in_work_dir = echo.in_dir(&self.settings.work_dir);
        let sudo = self.settings.tool("sudo");

        if platform.platform == SupportedPlatform::Darwin {
            exec::execute(&sudo, &["mkdir", "-p", "-m", "755", &install_dir], echo).await?;
        }

        let archive = ArchiveGuard::new(self.settings.work_dir.join(&file_name));

        exec::execute(
            &self.settings.tool("curl"),
            &["-fL", &url, "-o", &file_name],
            in_work_dir,
        )
        .await
        .map_err(|e| {
            log::debug!("Download failed: {e}");
            ActionError::Download { url: url.clone() }
        })?;

        if platform.platform == SupportedPlatform::Win32 {
            exec::execute(&self.settings.tool("tar"), &["-xf", &file_name], in_work_dir).await?;
        } else {
            let destination = format!("{}/", install_dir.trim_end_matches('/'));
            exec::execute(
                &sudo,
                &["tar", "-zxf", &file_name, "-C", &destination],
                in_work_dir,
            )
            .await?;
        }

        archive.finish()?;
        Ok(())
    }

    /// Install the tool unless it is already present, logging the version.
    pub async fn ensure_installed(&self) -> Result<()> {
        if self.is_installed().await {
            let version = self.version().await;
            self.host
                .info(&format!("BDY CLI is already installed (version: {version})"));
            return Ok(());
        }

        self.host.info("BDY CLI not found, installing...");
        self.install().await?;

        let version = self.version().await;
        self.host
            .success(&format!("BDY CLI installed successfully (version: {version})"));
        Ok(())
    }
}
