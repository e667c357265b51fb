//! Rendering of index document bodies.
//!
//! Each direct child of a folder becomes one link line; subfolder entries
//! link to the subfolder's own inner index document rather than the folder
//! itself. The renderer is pure: entry order comes from the caller and the
//! emoji collaborator is a trait seam.

use crate::config::{IndexItemStyle, IndexSettings, SortOrder};
use crate::paths;

/// A direct child of a folder, either a document or a subfolder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry {
    /// Vault-relative path of the child.
    pub path: String,
    pub is_folder: bool,
}

impl ChildEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self { path: path.into(), is_folder: false }
    }

    pub fn folder(path: impl Into<String>) -> Self {
        Self { path: path.into(), is_folder: true }
    }
}

/// Emoji-name-to-glyph lookup collaborator.
pub trait EmojiLookup {
    /// Resolve a `:shortcode:` name to its glyph; `None` when unknown.
    fn glyph(&self, name: &str) -> Option<String>;
}

/// Shortcode-table lookup backed by the `emojis` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortcodeEmoji;

impl EmojiLookup for ShortcodeEmoji {
    fn glyph(&self, name: &str) -> Option<String> {
        let key = name.trim_matches(':');
        if key.is_empty() {
            return None;
        }
        emojis::get_by_shortcode(key).map(|e| e.as_str().to_string())
    }
}

/// Render a single entry line: optional emoji glyph, optional `!` embed
/// marker when the target is itself an index document, and the link token.
pub fn render_entry(
    entry: &ChildEntry,
    settings: &IndexSettings,
    emoji: &dyn EmojiLookup,
    vault_name: &str,
) -> String {
    let target_path = if entry.is_folder {
        paths::inner_index_path(&entry.path, &settings.index_prefix, vault_name)
    } else {
        entry.path.clone()
    };

    let embed = if settings.embed_sub_index
        && paths::is_index_path(&target_path, &settings.index_prefix, vault_name)
    {
        "!"
    } else {
        ""
    };

    let glyph = emoji_prefix(settings, emoji, entry.is_folder);
    let target = link_target(&target_path, settings);

    match settings.index_item_style {
        IndexItemStyle::PureLink => format!("{glyph}{embed}[[{target}]]"),
        IndexItemStyle::List => format!("- {glyph}{embed}[[{target}]]"),
        IndexItemStyle::Checkbox => format!("- [ ] {glyph}{embed}[[{target}]]"),
    }
}

/// Build the full body of an index document: subfolder entries first (caller
/// order), then file entries excluding the index document's own file, sorted
/// lexicographically over the rendered lines per the configured order.
pub fn build_index_body(
    subfolders: &[ChildEntry],
    files: &[ChildEntry],
    own_path: &str,
    settings: &IndexSettings,
    emoji: &dyn EmojiLookup,
    vault_name: &str,
) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(subfolders.len() + files.len());

    for entry in subfolders {
        lines.push(render_entry(entry, settings, emoji, vault_name));
    }
    for entry in files {
        if entry.path == own_path {
            continue;
        }
        lines.push(render_entry(entry, settings, emoji, vault_name));
    }

    lines.sort();
    if settings.sort_order == SortOrder::Descending {
        lines.reverse();
    }

    lines.join("\n")
}

fn emoji_prefix(
    settings: &IndexSettings,
    emoji: &dyn EmojiLookup,
    is_folder: bool,
) -> String {
    if !settings.enable_emojis {
        return String::new();
    }
    let name = if is_folder { &settings.folder_emoji } else { &settings.file_emoji };
    match emoji.glyph(name) {
        Some(glyph) => format!("{glyph} "),
        None => String::new(),
    }
}

/// With `clean_path_boolean`, rewrite `folder/name.md` to `folder/name|name`
/// so only the leaf name shows as link text.
fn link_target(path: &str, settings: &IndexSettings) -> String {
    if !settings.clean_path_boolean {
        return path.to_string();
    }
    let clean = path.strip_suffix(".md").unwrap_or(path);
    let leaf = clean.rsplit('/').next().unwrap_or(clean);
    format!("{clean}|{leaf}")
}
