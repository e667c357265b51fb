//! Full sync passes over a real (temporary) vault directory.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use vaultkeeper_core::config::{IndexSettings, SortOrder};
use vaultkeeper_core::sync::{RenameEvent, Syncer};
use vaultkeeper_core::vault::FsVault;

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

fn settings() -> IndexSettings {
    IndexSettings { index_prefix: "Index_".to_string(), ..IndexSettings::default() }
}

fn syncer(root: &Path, settings: IndexSettings) -> Syncer<FsVault> {
    Syncer::new(FsVault::open(root).unwrap(), settings)
}

#[test]
fn empty_vault_produces_linked_index_tree() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("Docs/Guide/page1.md"), "# One");
    write(&dir.path().join("Docs/Guide/page2.md"), "# Two");

    let mut syncer = syncer(dir.path(), settings());
    syncer.resync();

    let docs_index = read(&dir.path().join("Docs/Index_Docs.md"));
    assert!(
        docs_index.contains("[[Docs/Guide/Index_Guide.md]]"),
        "parent index should link the subfolder's index, got: {docs_index}"
    );

    let guide_index = read(&dir.path().join("Docs/Guide/Index_Guide.md"));
    assert_eq!(
        guide_index,
        "[[Docs/Guide/page1.md]]\n[[Docs/Guide/page2.md]]",
        "guide index should list both pages in ascending order"
    );
}

#[test]
fn descending_order_reverses_the_listing() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("Docs/a.md"), "");
    write(&dir.path().join("Docs/b.md"), "");

    let mut syncer = syncer(
        dir.path(),
        IndexSettings { sort_order: SortOrder::Descending, ..settings() },
    );
    syncer.resync();

    let index = read(&dir.path().join("Docs/Index_Docs.md"));
    assert_eq!(index, "[[Docs/b.md]]\n[[Docs/a.md]]");
}

#[test]
fn incremental_pass_only_touches_affected_indexes() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("Docs/a.md"), "");
    write(&dir.path().join("Notes/n.md"), "");

    let mut syncer = syncer(dir.path(), settings());
    syncer.resync();

    // New file under Docs only: the pass touches Docs' index and the root
    // index (for the index documents created by the first pass), but not
    // Notes' index.
    write(&dir.path().join("Docs/b.md"), "");
    let summary = syncer.run_pass(None);
    assert_eq!(summary.updated, 2);

    let docs_index = read(&dir.path().join("Docs/Index_Docs.md"));
    assert!(docs_index.contains("[[Docs/b.md]]"));
    let notes_index = read(&dir.path().join("Notes/Index_Notes.md"));
    assert_eq!(notes_index, "[[Notes/n.md]]");
}

#[test]
fn folder_rename_carries_the_index_document_along() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("A/OldB/note.md"), "");

    let mut syncer = syncer(dir.path(), settings());
    syncer.resync();
    assert!(dir.path().join("A/OldB/Index_OldB.md").exists());

    // The host renames the folder; the watcher reports it as one file-rename
    // event. The stale index travels with the folder.
    fs::rename(dir.path().join("A/OldB"), dir.path().join("A/B")).unwrap();
    let event = RenameEvent {
        path: "A/B/note.md".to_string(),
        old_path: "A/OldB/note.md".to_string(),
    };
    let summary = syncer.run_pass(Some(&event));

    assert!(summary.renamed);
    assert!(!dir.path().join("A/B/Index_OldB.md").exists());
    assert!(dir.path().join("A/B/Index_B.md").exists());
}

#[test]
fn rename_overwrites_an_occupied_target() {
    // Overwrite semantics: the occupant of the rename target is deleted
    // unconditionally, even if it was not a stale index document. Known
    // data-loss risk, pinned here on purpose.
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("A/OldB/note.md"), "");

    let mut syncer = syncer(dir.path(), settings());
    syncer.resync();

    fs::rename(dir.path().join("A/OldB"), dir.path().join("A/B")).unwrap();
    write(&dir.path().join("A/B/Index_B.md"), "user-authored occupant");

    let event = RenameEvent {
        path: "A/B/note.md".to_string(),
        old_path: "A/OldB/note.md".to_string(),
    };
    let summary = syncer.run_pass(Some(&event));

    assert!(summary.renamed);
    let content = read(&dir.path().join("A/B/Index_B.md"));
    assert!(
        !content.contains("user-authored occupant"),
        "the occupant is destroyed by the rename"
    );
}

#[test]
fn excluded_folder_never_keeps_an_index() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("Docs/a.md"), "");
    write(&dir.path().join("Private/secret.md"), "");
    write(&dir.path().join("Private/Index_Private.md"), "stale");

    let mut syncer = syncer(
        dir.path(),
        IndexSettings { folders_excluded: "Private".to_string(), ..settings() },
    );
    syncer.resync();

    assert!(dir.path().join("Docs/Index_Docs.md").exists());
    assert!(!dir.path().join("Private/Index_Private.md").exists());
}

#[test]
fn template_seeds_new_index_documents_and_tags_are_injected() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("templates/index.md"), "---\ntitle: Index\n---\nseed");
    write(&dir.path().join("Docs/a.md"), "");

    let mut syncer = syncer(
        dir.path(),
        IndexSettings {
            template_file: "templates/index.md".to_string(),
            index_tag_boolean: true,
            ..settings()
        },
    );
    syncer.resync();

    let index = read(&dir.path().join("Docs/Index_Docs.md"));
    assert!(index.starts_with("---\ntitle: Index\ntags: MOC\n---"));
    assert!(index.contains("[[Docs/a.md]]"));
    // The template's own body is replaced by the generated listing.
    assert!(!index.contains("seed"));

    // Regenerating again must not duplicate the tag.
    write(&dir.path().join("Docs/b.md"), "");
    syncer.run_pass(None);
    let index = read(&dir.path().join("Docs/Index_Docs.md"));
    assert_eq!(index.matches("MOC").count(), 1);
}

#[test]
fn repeated_passes_converge() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("Docs/Guide/page1.md"), "");

    let mut syncer = syncer(dir.path(), settings());
    syncer.resync();

    // Index documents created by one pass show up as changes in the next;
    // after a few passes the vault is stable.
    let mut last = syncer.run_pass(None);
    for _ in 0..3 {
        let next = syncer.run_pass(None);
        last = next;
    }
    assert_eq!(last.changed, 0);
    assert_eq!(last.updated, 0);
}
