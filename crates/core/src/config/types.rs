use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub vault_root: String,
    #[serde(flatten)]
    pub settings: IndexSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Ordering applied to the rendered link lines of an index document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Rendering style of a single index entry line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexItemStyle {
    /// `[[target]]`
    PureLink,
    /// `- [[target]]`
    List,
    /// `- [ ] [[target]]`
    Checkbox,
}

/// The recognized indexing options, threaded explicitly through every
/// component call. Loaded once at startup from the active profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Newline-separated path prefixes; empty means every folder is included.
    pub folders_included: String,
    /// Newline-separated path prefixes that never receive index documents.
    pub folders_excluded: String,
    /// Filename prefix identifying index documents.
    pub index_prefix: String,
    /// Vault path of a note whose content seeds newly created index documents.
    pub template_file: String,
    /// Delimiter string bounding the frontmatter block.
    pub front_matter_separator: String,
    pub sort_order: SortOrder,
    pub index_item_style: IndexItemStyle,
    /// Prefix sub-index links with `!` so they embed in preview.
    pub embed_sub_index: bool,
    /// Show only the leaf name as link display text.
    pub clean_path_boolean: bool,
    pub enable_emojis: bool,
    /// Emoji shortcode (`:name:`) prefixed to folder entries.
    pub folder_emoji: String,
    /// Emoji shortcode (`:name:`) prefixed to file entries.
    pub file_emoji: String,
    /// Inject a tag into the frontmatter of every regenerated index document.
    pub index_tag_boolean: bool,
    pub index_tag_value: String,
    pub index_tag_label: String,
    pub index_tag_separator: String,
    /// Wrap each injected tag in `[[..]]` so it works as a link.
    pub add_square_brackets: bool,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            folders_included: String::new(),
            folders_excluded: String::new(),
            index_prefix: "_Index_of_".to_string(),
            template_file: String::new(),
            front_matter_separator: "---".to_string(),
            sort_order: SortOrder::Ascending,
            index_item_style: IndexItemStyle::PureLink,
            embed_sub_index: false,
            clean_path_boolean: false,
            enable_emojis: false,
            folder_emoji: ":card_index_dividers:".to_string(),
            file_emoji: ":page_facing_up:".to_string(),
            index_tag_boolean: false,
            index_tag_value: "MOC".to_string(),
            index_tag_label: "tags".to_string(),
            index_tag_separator: ", ".to_string(),
            add_square_brackets: false,
        }
    }
}

impl IndexSettings {
    /// Included-folder prefixes, one per non-empty line, leading `/` stripped.
    pub fn included_folders(&self) -> Vec<String> {
        split_folder_list(&self.folders_included)
    }

    /// Excluded-folder prefixes, one per non-empty line, leading `/` stripped.
    pub fn excluded_folders(&self) -> Vec<String> {
        split_folder_list(&self.folders_excluded)
    }

    /// A path is allowed iff it matches at least one included prefix (or the
    /// included list is unset) and matches none of the excluded prefixes.
    pub fn allows(&self, path: &str) -> bool {
        let included = self.included_folders();
        let in_included =
            included.is_empty() || included.iter().any(|p| path.starts_with(p.as_str()));
        in_included && !self.excludes(path)
    }

    /// True iff the path falls under one of the excluded-folder prefixes.
    pub fn excludes(&self, path: &str) -> bool {
        self.excluded_folders().iter().any(|p| path.starts_with(p.as_str()))
    }
}

fn split_folder_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim().trim_start_matches('/'))
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub vault_root: PathBuf,
    pub settings: IndexSettings,
    pub logging: LoggingConfig,
}
