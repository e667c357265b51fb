//! The sync pass: diff, rename, regenerate, clean.
//!
//! A pass runs to completion before the next can start; the orchestrator is
//! the only owner of the baseline snapshot. Failures are contained to the
//! smallest unit of work (one document) and never abort the rest of the
//! batch; the baseline always advances so the next pass reconciles.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::classify::{self, RenamePlan};
use crate::config::IndexSettings;
use crate::frontmatter;
use crate::paths;
use crate::render::{self, ChildEntry, EmojiLookup, ShortcodeEmoji};
use crate::vault::{Vault, VaultEntry, VaultError};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("index path is occupied by a folder: {0}")]
    IndexIsFolder(String),

    #[error(transparent)]
    Vault(#[from] VaultError),
}

/// A debounced file-rename notification from the host: the document's new
/// path and the path it previously occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEvent {
    pub path: String,
    pub old_path: String,
}

/// What one pass did, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Paths in the symmetric difference against the baseline.
    pub changed: usize,
    /// Whether an inferred index-file rename was applied.
    pub renamed: bool,
    /// Index documents regenerated.
    pub updated: usize,
    /// Index documents that failed to regenerate (logged, not fatal).
    pub failed: usize,
    /// Index documents deleted from excluded folders.
    pub cleaned: usize,
}

/// Owns the baseline snapshot and sequences rename-then-regenerate-then-clean
/// for every change event.
pub struct Syncer<V: Vault> {
    vault: V,
    settings: IndexSettings,
    emoji: Box<dyn EmojiLookup>,
    baseline: Option<BTreeSet<String>>,
}

impl<V: Vault> Syncer<V> {
    pub fn new(vault: V, settings: IndexSettings) -> Self {
        Self { vault, settings, emoji: Box::new(ShortcodeEmoji), baseline: None }
    }

    /// Replace the emoji collaborator (tests, alternative glyph tables).
    pub fn with_emoji(mut self, emoji: Box<dyn EmojiLookup>) -> Self {
        self.emoji = emoji;
        self
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// Capture the current vault contents as the baseline without syncing.
    pub fn capture_baseline(&mut self) {
        self.baseline = Some(self.snapshot());
    }

    /// Manual trigger: clear the baseline so every document appears created,
    /// then run one full pass.
    pub fn resync(&mut self) -> PassSummary {
        self.baseline = Some(BTreeSet::new());
        self.run_pass(None)
    }

    /// Run one sync pass against the current vault state.
    pub fn run_pass(&mut self, event: Option<&RenameEvent>) -> PassSummary {
        info!("starting index sync pass");
        let current = self.snapshot();
        let mut summary = PassSummary::default();

        if let Some(baseline) = self.baseline.take() {
            let changed = classify::diff(&baseline, &current);
            debug!(?changed, "changed paths");
            summary.changed = changed.len();

            let plan = event.and_then(|ev| {
                classify::infer_folder_rename(
                    &self.vault,
                    &self.settings,
                    &ev.path,
                    &ev.old_path,
                )
            });

            let mut updates =
                classify::indexes_to_update(&changed, &self.settings, &self.vault);
            debug!(?updates, "index documents to update");

            if let Some(plan) = plan {
                match self.apply_rename(&plan) {
                    Ok(()) => summary.renamed = true,
                    Err(error) => {
                        warn!(%error, from = %plan.from, to = %plan.to, "index rename failed");
                    }
                }
            }

            // Drop indexes that resolve under an excluded folder before
            // touching anything.
            updates.retain(|index| !self.settings.excludes(index));

            for index in &updates {
                match self.regenerate_index(index) {
                    Ok(()) => summary.updated += 1,
                    Err(error) => {
                        summary.failed += 1;
                        warn!(%error, %index, "index regeneration failed");
                    }
                }
            }

            summary.cleaned = self.clean_excluded();
        }

        // The baseline advances even when individual updates failed; the
        // next pass reconciles.
        self.baseline = Some(current);
        info!(
            changed = summary.changed,
            updated = summary.updated,
            failed = summary.failed,
            cleaned = summary.cleaned,
            "index sync pass complete"
        );
        summary
    }

    fn snapshot(&self) -> BTreeSet<String> {
        self.vault.markdown_files().into_iter().collect()
    }

    /// Rename a stale index document onto its new path. A document already
    /// occupying the target is deleted first: overwrite semantics, which
    /// destroys the occupant even if it is not a stale index document.
    fn apply_rename(&self, plan: &RenamePlan) -> Result<(), VaultError> {
        if let Some(VaultEntry::File { .. }) = self.vault.entry(&plan.to) {
            self.vault.delete(&plan.to)?;
        }
        info!(from = %plan.from, to = %plan.to, "renaming index document");
        self.vault.rename(&plan.from, &plan.to)
    }

    fn regenerate_index(&self, index_path: &str) -> Result<(), SyncError> {
        let template = self.template_content();

        match self.vault.entry(index_path) {
            None => self.vault.create(index_path, &template)?,
            Some(VaultEntry::Folder { .. }) => {
                return Err(SyncError::IndexIsFolder(index_path.to_string()));
            }
            Some(VaultEntry::File { .. }) => {}
        }

        let folder = paths::parent_folder(index_path);
        let children = self.vault.children(&folder)?;
        let (subfolders, files): (Vec<ChildEntry>, Vec<ChildEntry>) = children
            .iter()
            .map(|child| ChildEntry {
                path: child.path().to_string(),
                is_folder: !child.is_file(),
            })
            .partition(|child| child.is_folder);

        let mut content = self.vault.read(index_path)?;
        if content.is_empty() {
            content = template;
        }

        let sep = &self.settings.front_matter_separator;
        let matter = if frontmatter::has_frontmatter(&content, sep) {
            frontmatter::regenerate(&self.settings, &content)
        } else {
            String::new()
        };

        let body = render::build_index_body(
            &subfolders,
            &files,
            index_path,
            &self.settings,
            self.emoji.as_ref(),
            &self.vault.display_name(),
        );

        let updated = if matter.is_empty() { body } else { format!("{matter}\n{body}") };
        self.vault.write(index_path, &updated)?;
        Ok(())
    }

    /// Delete the index document of every excluded folder, even when it was
    /// created earlier in the same pass.
    fn clean_excluded(&self) -> usize {
        let vault_name = self.vault.display_name();
        let mut removed = 0;

        for folder in self.settings.excluded_folders() {
            let index = paths::inner_index_path(
                &folder,
                &self.settings.index_prefix,
                &vault_name,
            );
            if self.vault.entry(&index).is_none() {
                continue;
            }
            match self.vault.delete(&index) {
                Ok(()) => removed += 1,
                Err(error) => warn!(%error, %index, "failed to delete excluded index"),
            }
        }

        removed
    }

    fn template_content(&self) -> String {
        if self.settings.template_file.is_empty() {
            return String::new();
        }
        match self.vault.read(&self.settings.template_file) {
            Ok(content) => content,
            Err(_) => String::new(),
        }
    }
}
