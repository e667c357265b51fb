use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use notify::event::{ModifyKind, RenameMode};
use notify::{EventKind, RecursiveMode};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, DebouncedEvent};
use tracing::{debug, info, warn};

use vaultkeeper_core::sync::{RenameEvent, Syncer};
use vaultkeeper_core::vault::{FsVault, Vault, VaultEntry};

use crate::WatchArgs;

/// Watch the vault and run one sync pass per debounced batch of events.
///
/// The debouncer collapses bursts of filesystem events into a single batch;
/// the receive loop runs each pass to completion before taking the next
/// batch, so no two passes ever overlap.
pub fn run(cfg_path: Option<&Path>, profile: Option<&str>, args: &WatchArgs) {
    let rc = super::load_config_or_exit(cfg_path, profile);
    crate::logging::init(&rc);

    let vault = match FsVault::open(&rc.vault_root) {
        Ok(vault) => vault,
        Err(e) => {
            eprintln!("cannot open vault: {e}");
            std::process::exit(1);
        }
    };
    let root = vault.root().to_path_buf();

    let mut syncer = Syncer::new(vault, rc.settings);
    syncer.capture_baseline();

    let (tx, rx) = mpsc::channel();
    let mut debouncer = match new_debouncer(
        Duration::from_millis(args.debounce_ms),
        None,
        move |result: DebounceEventResult| {
            let _ = tx.send(result);
        },
    ) {
        Ok(debouncer) => debouncer,
        Err(e) => {
            eprintln!("cannot start watcher: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = debouncer.watch(&root, RecursiveMode::Recursive) {
        eprintln!("cannot watch {}: {e}", root.display());
        std::process::exit(1);
    }

    info!(path = %root.display(), debounce_ms = args.debounce_ms, "watching vault");

    for result in rx {
        match result {
            Ok(events) => {
                let trigger = classify_batch(&events, syncer.vault());
                if trigger.structural {
                    syncer.run_pass(trigger.rename.as_ref());
                } else {
                    debug!("batch without structural changes, skipping pass");
                }
            }
            Err(errors) => {
                for error in errors {
                    warn!(%error, "watcher error");
                }
            }
        }
    }
}

/// What a debounced batch asks of the syncer: whether anything structural
/// (create/delete/rename) happened at all, and the most recent rename as the
/// single pending trigger for folder-rename inference.
struct Trigger {
    structural: bool,
    rename: Option<RenameEvent>,
}

fn classify_batch(events: &[DebouncedEvent], vault: &FsVault) -> Trigger {
    let mut trigger = Trigger { structural: false, rename: None };

    for event in events {
        match event.kind {
            EventKind::Create(_) | EventKind::Remove(_) => {
                if event.paths.iter().any(|p| vault_path(vault, p).is_some()) {
                    trigger.structural = true;
                }
            }
            EventKind::Modify(ModifyKind::Name(mode)) => {
                if !event.paths.iter().any(|p| vault_path(vault, p).is_some()) {
                    continue;
                }
                trigger.structural = true;
                if mode == RenameMode::Both && event.paths.len() == 2 {
                    if let Some(rename) =
                        rename_event(vault, &event.paths[0], &event.paths[1])
                    {
                        debug!(?rename, "rename trigger");
                        trigger.rename = Some(rename);
                    }
                }
            }
            // Content modifications never change the path set.
            _ => {}
        }
    }

    trigger
}

/// Map a raw rename pair onto a document-level [`RenameEvent`].
///
/// A directory rename arrives as a single event for the directory itself;
/// the inference works on file paths, so it is re-expressed through one of
/// the directory's surviving documents (the stale index document qualifies).
fn rename_event(vault: &FsVault, old: &Path, new: &Path) -> Option<RenameEvent> {
    let old_rel = vault_path(vault, old)?;
    let new_rel = vault_path(vault, new)?;

    match vault.entry(&new_rel)? {
        VaultEntry::File { .. } => {
            if new_rel.ends_with(".md") {
                Some(RenameEvent { path: new_rel, old_path: old_rel })
            } else {
                None
            }
        }
        VaultEntry::Folder { .. } => {
            let children = vault.children(&new_rel).ok()?;
            let child = children.iter().find(|c| c.is_file())?;
            let name = child.name().to_string();
            Some(RenameEvent {
                path: format!("{new_rel}/{name}"),
                old_path: format!("{old_rel}/{name}"),
            })
        }
    }
}

/// Vault-relative form of an absolute event path; hidden segments are
/// invisible to the vault and yield `None`.
fn vault_path(vault: &FsVault, path: &Path) -> Option<String> {
    let relative = vault.relativize(path)?;
    if relative.split('/').any(|segment| segment.starts_with('.')) {
        return None;
    }
    Some(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn vault_with(files: &[&str]) -> (TempDir, FsVault) {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        let vault = FsVault::open(dir.path()).unwrap();
        (dir, vault)
    }

    #[test]
    fn file_rename_maps_directly() {
        let (_dir, vault) = vault_with(&["A/B/note.md"]);
        let root = vault.root().to_path_buf();
        let event =
            rename_event(&vault, &root.join("A/B/old.md"), &root.join("A/B/note.md"))
                .unwrap();
        assert_eq!(event.path, "A/B/note.md");
        assert_eq!(event.old_path, "A/B/old.md");
    }

    #[test]
    fn folder_rename_is_expressed_through_a_contained_document() {
        let (_dir, vault) = vault_with(&["A/B/note.md"]);
        let root = vault.root().to_path_buf();
        let event =
            rename_event(&vault, &root.join("A/OldB"), &root.join("A/B")).unwrap();
        assert_eq!(event.path, "A/B/note.md");
        assert_eq!(event.old_path, "A/OldB/note.md");
    }

    #[test]
    fn hidden_paths_are_invisible() {
        let (_dir, vault) = vault_with(&["A/note.md"]);
        let root = vault.root().to_path_buf();
        assert!(vault_path(&vault, &root.join(".trash/note.md")).is_none());
        assert!(vault_path(&vault, &root.join("A/note.md")).is_some());
    }
}
