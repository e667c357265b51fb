use std::path::Path;

use vaultkeeper_core::config::{ConfigLoader, default_config_path};

pub fn run(cfg_path: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(cfg_path, profile) {
        Ok(rc) => {
            println!("OK   vaultkeeper doctor (core v{})", vaultkeeper_core::version());
            println!(
                "path: {}",
                cfg_path.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("vault_root: {}", rc.vault_root.display());
            println!("index_prefix: {}", rc.settings.index_prefix);
            println!("template_file: {}", rc.settings.template_file);
            println!("folders_included: {:?}", rc.settings.included_folders());
            println!("folders_excluded: {:?}", rc.settings.excluded_folders());
            if !rc.vault_root.is_dir() {
                println!("warning: vault_root is not a directory");
                std::process::exit(1);
            }
        }
        Err(e) => {
            println!("FAIL vaultkeeper doctor");
            println!("{e}");
            if cfg_path.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
