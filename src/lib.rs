//! # BDY Package Publish
//!
//! CI action that publishes a package to Buddy with the BDY CLI.
//!
//! The action runs a short, strictly sequential pipeline:
//!
//! - **Install**: find BDY via `BDY_PATH` or `PATH`, otherwise download the
//!   latest `prod` release for the host and extract it
//! - **Credentials**: require `BUDDY_TOKEN` and `BUDDY_API_ENDPOINT` from the
//!   login step and mask the token
//! - **Publish**: run `bdy package publish` and export the first URL it
//!   prints as the `package_url` output and `BUDDY_PACKAGE_URL`
//!
//! ## Usage
//!
//! ```bash
//! bdy_package_publish --workspace acme --project web --identifier my-pkg --directory ./dist
//! bdy_package_publish --workspace acme --project web --identifier my-pkg --directory ./dist --create --region eu
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod action;
pub mod bdy;
pub mod cli;
pub mod error;
pub mod exec;
pub mod platform;
pub mod publish;

// Re-export main types for public API
pub use action::{ActionEnv, ActionHost};
pub use bdy::{BdySettings, InstallProbe, Installer};
pub use cli::{Args, OutputManager};
pub use error::{ActionError, PlatformError, Reported, Result};
pub use platform::{HostTarget, PlatformInfo, resolve_platform};
pub use publish::{Inputs, Outputs, Region};
