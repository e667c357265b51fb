//! vaultkeeper-core: auto-generated folder index notes for markdown vaults.
//!
//! Every folder in a vault gets a companion index document listing its
//! subfolders and files as links. The [`sync`] orchestrator keeps those
//! documents in step with the vault incrementally: it diffs snapshots of the
//! vault's paths, infers folder renames from file-rename events, and
//! regenerates only the affected index documents.

pub mod classify;
pub mod config;
pub mod frontmatter;
pub mod paths;
pub mod render;
pub mod sync;
pub mod vault;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
