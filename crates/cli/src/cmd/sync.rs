use std::path::Path;

use vaultkeeper_core::sync::Syncer;
use vaultkeeper_core::vault::FsVault;

/// Manual trigger: clear the baseline snapshot and run one full pass, so
/// every document appears created and every index document regenerates.
pub fn run(cfg_path: Option<&Path>, profile: Option<&str>) {
    let rc = super::load_config_or_exit(cfg_path, profile);
    crate::logging::init(&rc);

    let vault = match FsVault::open(&rc.vault_root) {
        Ok(vault) => vault,
        Err(e) => {
            eprintln!("cannot open vault: {e}");
            std::process::exit(1);
        }
    };

    let mut syncer = Syncer::new(vault, rc.settings);
    let summary = syncer.resync();

    println!(
        "synced: {} index document(s) updated, {} failed, {} removed from excluded folders",
        summary.updated, summary.failed, summary.cleaned
    );
}
