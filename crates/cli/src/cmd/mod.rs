pub mod doctor;
pub mod sync;
pub mod watch;

use std::path::Path;

use vaultkeeper_core::config::{ConfigLoader, ResolvedConfig};

/// Load the resolved configuration or exit with a diagnostic.
pub fn load_config_or_exit(
    cfg_path: Option<&Path>,
    profile: Option<&str>,
) -> ResolvedConfig {
    match ConfigLoader::load(cfg_path, profile) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
