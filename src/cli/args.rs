//! Command line argument parsing and input validation.
//!
//! Every input can be given as a flag or, as the runner does, through the
//! matching `INPUT_*` environment variable.

use crate::action::{ActionHost, boolean_input, optional_input, required_input};
use crate::error::Result;
use crate::publish::Inputs;
use clap::Parser;

/// Publish a package to Buddy with the BDY CLI
#[derive(Parser, Debug, Default)]
#[command(
    name = "bdy_package_publish",
    version,
    about = "Publish a package to Buddy with the BDY CLI",
    long_about = "Installs the BDY CLI when missing, checks the credentials left by the \
buddy/login action and runs `bdy package publish`.

Usage:
  bdy_package_publish --workspace acme --project web --identifier my-pkg --directory ./dist
  INPUT_WORKSPACE=acme INPUT_PROJECT=web ... bdy_package_publish"
)]
pub struct Args {
    /// Workspace domain
    #[arg(long, env = "INPUT_WORKSPACE", value_name = "DOMAIN")]
    pub workspace: Option<String>,

    /// Project name
    #[arg(long, env = "INPUT_PROJECT", value_name = "NAME")]
    pub project: Option<String>,

    /// Package identifier
    #[arg(long, env = "INPUT_IDENTIFIER", value_name = "ID")]
    pub identifier: Option<String>,

    /// Directory containing the package contents
    #[arg(long, env = "INPUT_DIRECTORY", value_name = "PATH")]
    pub directory: Option<String>,

    /// Create the package if it does not exist (true/false)
    #[arg(
        long,
        env = "INPUT_CREATE",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub create: Option<String>,

    /// Overwrite an existing version (true/false)
    #[arg(
        long,
        env = "INPUT_FORCE",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub force: Option<String>,

    /// Region override: EU, US or AP
    #[arg(long, env = "INPUT_REGION", value_name = "REGION")]
    pub region: Option<String>,

    /// API endpoint override
    #[arg(long, env = "INPUT_API", value_name = "URL")]
    pub api: Option<String>,

    /// Only print workflow commands and errors
    #[arg(long, short)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Collect and validate the publish inputs.
    ///
    /// Malformed booleans are reported as warnings through `host` and read
    /// as `false`.
    ///
    /// # Errors
    ///
    /// * `MissingInput` - a required input is absent or blank
    pub fn inputs(&self, host: &ActionHost) -> Result<Inputs> {
        Ok(Inputs {
            workspace: required_input("workspace", self.workspace.as_deref())?,
            project: required_input("project", self.project.as_deref())?,
            identifier: required_input("identifier", self.identifier.as_deref())?,
            directory: required_input("directory", self.directory.as_deref())?,
            create: boolean_input(host, "create", self.create.as_deref()),
            force: boolean_input(host, "force", self.force.as_deref()),
            region: optional_input(self.region.as_deref()),
            api: optional_input(self.api.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionEnv;
    use crate::cli::OutputManager;
    use crate::error::ActionError;

    fn host() -> ActionHost {
        ActionHost::new(ActionEnv::default(), OutputManager::capturing().0)
    }

    fn args() -> Args {
        Args {
            workspace: Some("acme".to_string()),
            project: Some("web".to_string()),
            identifier: Some("my-pkg".to_string()),
            directory: Some("./dist".to_string()),
            ..Args::default()
        }
    }

    #[test]
    fn minimal_inputs() {
        let inputs = args().inputs(&host()).unwrap();
        assert_eq!(inputs.workspace, "acme");
        assert!(!inputs.create);
        assert!(!inputs.force);
        assert_eq!(inputs.region, None);
        assert_eq!(inputs.api, None);
    }

    #[test]
    fn missing_required_input_is_named() {
        let err = Args {
            directory: Some("  ".to_string()),
            ..args()
        }
        .inputs(&host())
        .unwrap_err();
        assert_eq!(err.to_string(), "Input required and not supplied: directory");
        assert!(matches!(err, ActionError::MissingInput { .. }));
    }

    #[test]
    fn flags_parse_from_command_line() {
        let parsed = Args::try_parse_from([
            "bdy_package_publish",
            "--workspace",
            "acme",
            "--project",
            "web",
            "--identifier",
            "my-pkg",
            "--directory",
            "./dist",
            "--create",
            "--force",
            "false",
            "--region",
            "ap",
        ])
        .unwrap();

        let inputs = parsed.inputs(&host()).unwrap();
        assert!(inputs.create);
        assert!(!inputs.force);
        assert_eq!(inputs.region.as_deref(), Some("ap"));
    }

    #[test]
    fn malformed_boolean_defaults_to_false() {
        let (output, lines) = OutputManager::capturing();
        let host = ActionHost::new(ActionEnv::default(), output);
        let inputs = Args {
            create: Some("maybe".to_string()),
            ..args()
        }
        .inputs(&host)
        .unwrap();

        assert!(!inputs.create);
        assert_eq!(lines.lock().unwrap().len(), 1);
    }
}
