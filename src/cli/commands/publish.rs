//! The publish pipeline: ensure BDY → credentials → inputs → publish.

use crate::action::ActionHost;
use crate::bdy::{BdySettings, Installer};
use crate::cli::Args;
use crate::error::Result;
use crate::publish::{Outputs, check_buddy_credentials, publish_package};

/// Run every stage in order; the first failure aborts the rest.
pub async fn execute_publish(args: &Args, host: &ActionHost) -> Result<Outputs> {
    let installer = Installer::new(BdySettings::from_env(host.env()), host);
    installer.ensure_installed().await?;

    let credentials = check_buddy_credentials(host)?;
    log::debug!("Publishing through {}", credentials.endpoint());

    let inputs = args.inputs(host)?;
    let outputs = publish_package(&inputs, host).await?;

    host.success("Package published successfully");
    if let Some(url) = &outputs.package_url {
        let _ = host.output().indent(&format!("Package URL: {url}"));
    }
    if let Ok(summary) = serde_json::to_string(&outputs) {
        log::debug!("Outputs: {summary}");
    }

    Ok(outputs)
}
