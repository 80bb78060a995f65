//! Command line interface for bdy_package_publish.
//!
//! Parses inputs, runs the install → credentials → publish pipeline and
//! reports progress through the output manager.

mod args;
pub mod commands;
mod output;

pub use args::Args;
pub use commands::execute_command;
pub use output::OutputManager;
