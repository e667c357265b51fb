//! Pure helpers for vault-relative paths.
//!
//! Vault paths use `/` separators and are relative to the vault root; the
//! root itself is the empty string. An index document is a note whose stem
//! equals `<prefix><containing-folder-name>`.

use crate::config::IndexSettings;
use crate::vault::Vault;

/// Path with the last `/`-delimited segment removed; root entries map to the
/// empty string. A single trailing `/` on folder paths is tolerated.
pub fn parent_folder(path: &str) -> String {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    match trimmed.rfind('/') {
        Some(idx) => trimmed[..idx].to_string(),
        None => String::new(),
    }
}

/// Last segment of a folder path, or the vault's display name for the root.
pub fn folder_name(folder_path: &str, vault_name: &str) -> String {
    let trimmed = folder_path.strip_suffix('/').unwrap_or(folder_path);
    match trimmed.rsplit('/').next() {
        None | Some("") => vault_name.to_string(),
        Some(segment) => segment.to_string(),
    }
}

/// Name of the folder containing `path`.
pub fn parent_folder_name(path: &str, vault_name: &str) -> String {
    folder_name(&parent_folder(path), vault_name)
}

/// Builds `<folderPath/><prefix><folderName>.md`, normalizing to exactly one
/// trailing `/` after the folder part (none when the folder is the root).
pub fn index_file_path(folder_path: &str, folder_name: &str, prefix: &str) -> String {
    let folder = folder_path.trim_end_matches('/');
    if folder.is_empty() {
        format!("{prefix}{folder_name}.md")
    } else {
        format!("{folder}/{prefix}{folder_name}.md")
    }
}

/// The index document belonging to the folder itself.
pub fn inner_index_path(folder_path: &str, prefix: &str, vault_name: &str) -> String {
    index_file_path(folder_path, &folder_name(folder_path, vault_name), prefix)
}

/// True iff `path` names an index document: a `.md` file whose stem is
/// `<prefix><containing-folder-name>`.
pub fn is_index_path(path: &str, prefix: &str, vault_name: &str) -> bool {
    let stem = match path.rsplit('/').next().and_then(|n| n.strip_suffix(".md")) {
        Some(s) => s,
        None => return false,
    };
    stem == format!("{prefix}{}", parent_folder_name(path, vault_name))
}

/// Index path of the folder containing `path`, or `None` when no index
/// should be touched for it: the path no longer resolves in the vault, it is
/// itself an index document (self-reference), or its parent folder is gone
/// (a subfolder moved out from under it mid-pass).
pub fn index_ref_for(
    path: &str,
    settings: &IndexSettings,
    vault: &dyn Vault,
) -> Option<String> {
    let vault_name = vault.display_name();

    vault.entry(path)?;
    if is_index_path(path, &settings.index_prefix, &vault_name) {
        return None;
    }

    let parent = parent_folder(path);
    if !parent.is_empty() && vault.entry(&parent).is_none() {
        return None;
    }

    Some(index_file_path(
        &parent,
        &parent_folder_name(path, &vault_name),
        &settings.index_prefix,
    ))
}
