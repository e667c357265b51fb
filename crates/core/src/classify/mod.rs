//! Change classification between vault snapshots.
//!
//! Given a before/after snapshot of vault paths plus an optional rename
//! event, this module computes the set of changed paths, an inferred folder
//! rename requiring an index-file rename, and the set of index documents
//! needing regeneration.

use std::collections::BTreeSet;

use crate::config::IndexSettings;
use crate::paths;
use crate::vault::{Vault, VaultEntry};

/// An inferred rename of an existing index document following a folder
/// rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    /// Vault path of the stale index document (old folder name, new chain).
    pub from: String,
    /// Target path under the renamed ancestor chain.
    pub to: String,
}

/// Symmetric difference of two snapshots: paths present in exactly one.
pub fn diff(previous: &BTreeSet<String>, current: &BTreeSet<String>) -> Vec<String> {
    previous.symmetric_difference(current).cloned().collect()
}

/// Infer a folder rename from a single file-rename event.
///
/// A plan is produced only when the file's own name is unchanged, its depth
/// is unchanged, exactly one ancestor segment differs, and an index document
/// named after the old folder still exists at the divergent position in the
/// new ancestor chain. Two or more differing segments are ambiguous; a
/// missing old index document means an excluded folder or a genuine file
/// move. Both cases require no action.
pub fn infer_folder_rename(
    vault: &dyn Vault,
    settings: &IndexSettings,
    new_path: &str,
    old_path: &str,
) -> Option<RenamePlan> {
    let new_segments: Vec<&str> = new_path.split('/').collect();
    let old_segments: Vec<&str> = old_path.split('/').collect();

    // The file itself was renamed, not a folder.
    if new_segments.last() != old_segments.last() {
        return None;
    }
    // The file moved to a shallower or deeper directory.
    if new_segments.len() != old_segments.len() {
        return None;
    }

    let divergent: Vec<usize> = (0..new_segments.len())
        .filter(|&i| new_segments[i] != old_segments[i])
        .collect();
    if divergent.len() != 1 {
        return None;
    }
    let position = divergent[0];

    let renamed_folder = new_segments[..=position].join("/");
    let stale_index = format!(
        "{renamed_folder}/{}{}.md",
        settings.index_prefix, old_segments[position]
    );

    match vault.entry(&stale_index) {
        Some(VaultEntry::File { .. }) => {
            let vault_name = vault.display_name();
            let to =
                paths::inner_index_path(&renamed_folder, &settings.index_prefix, &vault_name);
            Some(RenamePlan { from: stale_index, to })
        }
        _ => None,
    }
}

/// Index documents needing regeneration for a set of changed paths: each
/// path's own index (when it resolves and passes the inclusion/exclusion
/// policy) plus its parent folder's index, so hierarchical links propagate
/// upward. Deduplicated.
pub fn indexes_to_update(
    changed: &[String],
    settings: &IndexSettings,
    vault: &dyn Vault,
) -> BTreeSet<String> {
    let mut updates = BTreeSet::new();

    for path in changed {
        if let Some(index) = paths::index_ref_for(path, settings, vault) {
            if settings.allows(&index) {
                updates.insert(index);
            }
        }

        let parent = paths::parent_folder(path);
        if let Some(parent_index) = paths::index_ref_for(&parent, settings, vault) {
            updates.insert(parent_index);
        }
    }

    updates
}
