//! The vault collaborator: the capability set the sync engine consumes.
//!
//! A vault stores markdown documents addressed by vault-relative paths with
//! `/` separators (the root is the empty string). The engine only ever goes
//! through [`Vault`]; the filesystem-backed implementation lives in [`fs`].

pub mod fs;

use thiserror::Error;

pub use fs::FsVault;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("no such path in vault: {0}")]
    NotFound(String),

    #[error("path already exists: {0}")]
    AlreadyExists(String),

    #[error("cannot create a document on a folder path: {0}")]
    NotAFile(String),

    #[error("vault I/O failure on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A vault entity: either a document or a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEntry {
    File { path: String, name: String },
    Folder { path: String, name: String },
}

impl VaultEntry {
    pub fn path(&self) -> &str {
        match self {
            VaultEntry::File { path, .. } | VaultEntry::Folder { path, .. } => path,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            VaultEntry::File { name, .. } | VaultEntry::Folder { name, .. } => name,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, VaultEntry::File { .. })
    }
}

/// The consumed capability set: enumerate, resolve, read, write, create,
/// delete, rename, list children, display name.
pub trait Vault {
    /// The vault's display name, used as the root folder's name.
    fn display_name(&self) -> String;

    /// All markdown document paths currently in the vault.
    fn markdown_files(&self) -> Vec<String>;

    /// Resolve a path to an entity; `None` when nothing is there.
    fn entry(&self, path: &str) -> Option<VaultEntry>;

    fn read(&self, path: &str) -> Result<String, VaultError>;

    fn write(&self, path: &str, content: &str) -> Result<(), VaultError>;

    fn create(&self, path: &str, content: &str) -> Result<(), VaultError>;

    fn delete(&self, path: &str) -> Result<(), VaultError>;

    fn rename(&self, from: &str, to: &str) -> Result<(), VaultError>;

    /// Direct children of a folder: subfolders and markdown documents.
    fn children(&self, folder: &str) -> Result<Vec<VaultEntry>, VaultError>;
}
