//! Filesystem-backed vault over a root directory.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{Vault, VaultEntry, VaultError};

/// A vault rooted at a directory. Hidden directories are invisible, and only
/// `.md` files count as documents.
#[derive(Debug)]
pub struct FsVault {
    root: PathBuf,
    name: String,
}

impl FsVault {
    pub fn open(root: &Path) -> Result<Self, VaultError> {
        let root = root
            .canonicalize()
            .map_err(|_| VaultError::NotFound(root.display().to_string()))?;
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "vault".to_string());
        Ok(Self { root, name })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a filesystem path back to a vault-relative `/`-separated path.
    pub fn relativize(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        Some(segments.join("/"))
    }

    fn absolute(&self, path: &str) -> PathBuf {
        let mut abs = self.root.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            abs.push(segment);
        }
        abs
    }

    fn io_error(path: &str, source: std::io::Error) -> VaultError {
        VaultError::Io { path: path.to_string(), source }
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == "md")
}

impl Vault for FsVault {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn markdown_files(&self) -> Vec<String> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if entry.file_type().is_file() && is_markdown(path) {
                if let Some(relative) = self.relativize(path) {
                    files.push(relative);
                }
            }
        }
        files.sort();
        files
    }

    fn entry(&self, path: &str) -> Option<VaultEntry> {
        let abs = self.absolute(path);
        let metadata = fs::metadata(&abs).ok()?;
        let name = if path.is_empty() {
            self.name.clone()
        } else {
            path.rsplit('/').next().unwrap_or(path).to_string()
        };
        if metadata.is_dir() {
            Some(VaultEntry::Folder { path: path.to_string(), name })
        } else {
            Some(VaultEntry::File { path: path.to_string(), name })
        }
    }

    fn read(&self, path: &str) -> Result<String, VaultError> {
        fs::read_to_string(self.absolute(path)).map_err(|e| Self::io_error(path, e))
    }

    fn write(&self, path: &str, content: &str) -> Result<(), VaultError> {
        fs::write(self.absolute(path), content).map_err(|e| Self::io_error(path, e))
    }

    fn create(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let abs = self.absolute(path);
        if abs.is_dir() {
            return Err(VaultError::NotAFile(path.to_string()));
        }
        if abs.exists() {
            return Err(VaultError::AlreadyExists(path.to_string()));
        }
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent).map_err(|e| Self::io_error(path, e))?;
        }
        fs::write(&abs, content).map_err(|e| Self::io_error(path, e))
    }

    fn delete(&self, path: &str) -> Result<(), VaultError> {
        let abs = self.absolute(path);
        if abs.is_dir() {
            fs::remove_dir_all(&abs).map_err(|e| Self::io_error(path, e))
        } else {
            fs::remove_file(&abs).map_err(|e| Self::io_error(path, e))
        }
    }

    fn rename(&self, from: &str, to: &str) -> Result<(), VaultError> {
        let source = self.absolute(from);
        if !source.exists() {
            return Err(VaultError::NotFound(from.to_string()));
        }
        let target = self.absolute(to);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Self::io_error(to, e))?;
        }
        fs::rename(&source, &target).map_err(|e| Self::io_error(from, e))
    }

    fn children(&self, folder: &str) -> Result<Vec<VaultEntry>, VaultError> {
        let abs = self.absolute(folder);
        let read_dir = fs::read_dir(&abs).map_err(|e| Self::io_error(folder, e))?;

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|e| Self::io_error(folder, e))?;
            let name = dir_entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let path = if folder.is_empty() {
                name.clone()
            } else {
                format!("{}/{name}", folder.trim_end_matches('/'))
            };
            let file_type =
                dir_entry.file_type().map_err(|e| Self::io_error(folder, e))?;
            if file_type.is_dir() {
                entries.push(VaultEntry::Folder { path, name });
            } else if is_markdown(Path::new(&name)) {
                entries.push(VaultEntry::File { path, name });
            }
        }
        entries.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vault_with(files: &[&str]) -> (TempDir, FsVault) {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "content").unwrap();
        }
        let vault = FsVault::open(dir.path()).unwrap();
        (dir, vault)
    }

    #[test]
    fn enumerates_markdown_files_only() {
        let (_dir, vault) = vault_with(&["a.md", "sub/b.md", "sub/skip.txt"]);
        assert_eq!(vault.markdown_files(), vec!["a.md", "sub/b.md"]);
    }

    #[test]
    fn hidden_directories_are_invisible() {
        let (_dir, vault) = vault_with(&["a.md", ".hidden/cache.md"]);
        assert_eq!(vault.markdown_files(), vec!["a.md"]);
    }

    #[test]
    fn entry_distinguishes_files_and_folders() {
        let (_dir, vault) = vault_with(&["sub/b.md"]);
        assert!(matches!(vault.entry("sub"), Some(VaultEntry::Folder { .. })));
        assert!(matches!(vault.entry("sub/b.md"), Some(VaultEntry::File { .. })));
        assert!(vault.entry("missing.md").is_none());
    }

    #[test]
    fn root_entry_resolves_to_folder() {
        let (_dir, vault) = vault_with(&["a.md"]);
        assert!(matches!(vault.entry(""), Some(VaultEntry::Folder { .. })));
    }

    #[test]
    fn create_refuses_folder_paths() {
        let (_dir, vault) = vault_with(&["sub/b.md"]);
        let result = vault.create("sub", "seed");
        assert!(matches!(result, Err(VaultError::NotAFile(_))));
    }

    #[test]
    fn create_then_read_round_trips() {
        let (_dir, vault) = vault_with(&[]);
        vault.create("new/note.md", "seed").unwrap();
        assert_eq!(vault.read("new/note.md").unwrap(), "seed");
    }

    #[test]
    fn rename_moves_documents() {
        let (_dir, vault) = vault_with(&["old.md"]);
        vault.rename("old.md", "sub/new.md").unwrap();
        assert!(vault.entry("old.md").is_none());
        assert_eq!(vault.read("sub/new.md").unwrap(), "content");
    }

    #[test]
    fn children_lists_folders_and_documents() {
        let (_dir, vault) = vault_with(&["Docs/a.md", "Docs/Guide/b.md", "Docs/x.txt"]);
        let children = vault.children("Docs").unwrap();
        let paths: Vec<_> = children.iter().map(|c| c.path().to_string()).collect();
        assert_eq!(paths, vec!["Docs/Guide", "Docs/a.md"]);
    }
}
