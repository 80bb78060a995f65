//! Package publishing through the BDY CLI.
//!
//! Validates the credentials left behind by the login step, assembles the
//! `bdy package publish` invocation and exports the resulting package URL.

mod credentials;
mod publisher;
mod region;

pub use credentials::{Credentials, check_buddy_credentials};
pub use publisher::{Inputs, Outputs, build_publish_args, extract_package_url, publish_package};
pub use region::{Region, validate_region};
