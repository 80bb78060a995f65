//! `bdy package publish` invocation.

use super::region::validate_region;
use crate::action::ActionHost;
use crate::action::env::BUDDY_PACKAGE_URL;
use crate::bdy::BDY_BINARY;
use crate::error::Result;
use crate::exec;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Step output carrying the package URL
pub const PACKAGE_URL_OUTPUT: &str = "package_url";

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("url pattern is valid"));

/// Validated action inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    /// Workspace domain
    pub workspace: String,
    /// Project name
    pub project: String,
    /// Package identifier
    pub identifier: String,
    /// Directory with the package contents
    pub directory: String,
    /// Create the package if it does not exist
    pub create: bool,
    /// Overwrite an existing version
    pub force: bool,
    /// Region override, validated when the arguments are built
    pub region: Option<String>,
    /// API endpoint override
    pub api: Option<String>,
}

/// Values the action exposes to later steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outputs {
    /// URL of the published package, when the tool printed one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_url: Option<String>,
}

/// Build the argument list for `bdy`.
///
/// # Errors
///
/// * `InvalidRegion` - the region override is not a known region
pub fn build_publish_args(inputs: &Inputs) -> Result<Vec<String>> {
    let mut args: Vec<String> = [
        "package",
        "publish",
        &inputs.identifier,
        &inputs.directory,
        "--workspace",
        &inputs.workspace,
        "--project",
        &inputs.project,
    ]
    .into_iter()
    .map(str::to_string)
    .collect();

    if inputs.create {
        args.push("--create".to_string());
    }

    if inputs.force {
        args.push("--force".to_string());
    }

    if let Some(region) = &inputs.region {
        args.push("--region".to_string());
        args.push(validate_region(region)?.to_string());
    }

    if let Some(api) = &inputs.api {
        args.push("--api".to_string());
        args.push(api.clone());
    }

    Ok(args)
}

/// First `http(s)://` URL in the tool output
pub fn extract_package_url(output: &str) -> Option<&str> {
    URL_PATTERN.find(output).map(|m| m.as_str())
}

/// Publish the package and export its URL.
///
/// A missing URL in the tool output is not an error; the outputs simply
/// carry no `package_url`.
pub async fn publish_package(inputs: &Inputs, host: &ActionHost) -> Result<Outputs> {
    host.info(&format!(
        "Publishing package: {} from {}",
        inputs.identifier, inputs.directory
    ));

    let args = build_publish_args(inputs)?;

    if inputs.create {
        host.info("Will create package if it does not exist");
    }
    if inputs.force {
        host.info("Will overwrite existing version if present");
    }
    if let Some(region) = &inputs.region {
        host.info(&format!("Overriding region to: {}", region.to_uppercase()));
    }

    let program = host.env().bdy_path().unwrap_or(BDY_BINARY);
    let output = exec::execute_command(program, &args, host.output()).await?;

    let mut outputs = Outputs::default();
    if let Some(url) = extract_package_url(&output) {
        host.set_output(PACKAGE_URL_OUTPUT, url)?;
        host.export_variable(BUDDY_PACKAGE_URL, url)?;
        outputs.package_url = Some(url.to_string());
    } else {
        log::debug!("No package URL in bdy output");
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActionError;

    fn inputs() -> Inputs {
        Inputs {
            workspace: "acme".to_string(),
            project: "web".to_string(),
            identifier: "my-pkg".to_string(),
            directory: "./dist".to_string(),
            ..Inputs::default()
        }
    }

    #[test]
    fn base_arguments() {
        assert_eq!(
            build_publish_args(&inputs()).unwrap(),
            vec![
                "package", "publish", "my-pkg", "./dist", "--workspace", "acme", "--project",
                "web"
            ]
        );
    }

    #[test]
    fn optional_flags_follow_base_arguments() {
        let args = build_publish_args(&Inputs {
            create: true,
            force: false,
            region: Some("us".to_string()),
            ..inputs()
        })
        .unwrap();

        assert!(args.contains(&"--create".to_string()));
        assert!(!args.contains(&"--force".to_string()));
        assert_eq!(&args[8..], ["--create", "--region", "US"]);
    }

    #[test]
    fn all_flags_in_order() {
        let args = build_publish_args(&Inputs {
            create: true,
            force: true,
            region: Some("eu".to_string()),
            api: Some("https://api.eu.buddy.works".to_string()),
            ..inputs()
        })
        .unwrap();

        assert_eq!(
            &args[8..],
            [
                "--create",
                "--force",
                "--region",
                "EU",
                "--api",
                "https://api.eu.buddy.works"
            ]
        );
    }

    #[test]
    fn invalid_region_fails() {
        let err = build_publish_args(&Inputs {
            region: Some("mars".to_string()),
            ..inputs()
        })
        .unwrap_err();
        assert!(matches!(err, ActionError::InvalidRegion { .. }));
    }

    #[test]
    fn url_extraction() {
        assert_eq!(
            extract_package_url("Published! https://buddy.works/pkg/123 done"),
            Some("https://buddy.works/pkg/123")
        );
        assert_eq!(
            extract_package_url("a http://x.test/1\nb https://y.test/2"),
            Some("http://x.test/1")
        );
        assert_eq!(extract_package_url("Published without a link"), None);
    }

    #[test]
    fn outputs_serialize_without_missing_url() {
        assert_eq!(serde_json::to_string(&Outputs::default()).unwrap(), "{}");
    }
}
