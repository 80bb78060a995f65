//! BDY Package Publish - publish a package to Buddy from a CI job.
//!
//! Exits 0 on success. Any failure, including a panic inside the pipeline,
//! is reported through the runner's error channel and exits 1.

use bdy_package_publish::cli::{self, Args, OutputManager};
use bdy_package_publish::error::{Reported, normalize_error, normalize_panic};
use bdy_package_publish::{ActionEnv, ActionHost};
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse_args();
    let host = ActionHost::new(ActionEnv::from_process(), OutputManager::new(args.quiet));

    let task_host = host.clone();
    let outcome =
        tokio::spawn(async move { cli::execute_command(&args, &task_host).await }).await;

    let reported = match outcome {
        Ok(Ok(_)) => process::exit(0),
        Ok(Err(e)) => normalize_error(e),
        Err(join_error) if join_error.is_panic() => normalize_panic(join_error.into_panic()),
        Err(join_error) => Reported::Message(join_error.to_string()),
    };

    host.set_failed(&reported.to_string());

    // Show recovery suggestions for typed errors
    if let Reported::Error(e) = &reported {
        let suggestions = e.recovery_suggestions();
        if !suggestions.is_empty() {
            let output = host.output();
            let _ = output.println("\n💡 Recovery suggestions:");
            for suggestion in suggestions {
                let _ = output.indent(&suggestion);
            }
        }
    }

    process::exit(1);
}
