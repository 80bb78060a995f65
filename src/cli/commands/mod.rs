//! Command execution for the action pipeline.

mod publish;

use crate::action::ActionHost;
use crate::cli::Args;
use crate::error::Result;
use crate::publish::Outputs;

pub use publish::execute_publish;

/// Execute the action for parsed arguments
pub async fn execute_command(args: &Args, host: &ActionHost) -> Result<Outputs> {
    execute_publish(args, host).await
}
