pub mod completions;
pub mod diff;
pub mod doctor;
pub mod output;
pub mod query;
pub mod range;
pub mod reconcile;
pub mod validate;

use std::path::Path;

use serde::de::DeserializeOwned;
use skyboard_core::config::{ConfigLoader, ResolvedConfig};
use skyboard_core::document::read_document;

/// Load the active profile and install logging, or exit with status 1.
pub fn load_config(config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    let rc = match ConfigLoader::load_or_default(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };
    crate::logging::init(&rc);
    rc
}

/// Read an input document, or exit with status 1.
pub fn load_document<T: DeserializeOwned>(path: &Path, what: &str) -> T {
    match read_document(path) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error reading {}: {}", what, e);
            std::process::exit(1);
        }
    }
}
