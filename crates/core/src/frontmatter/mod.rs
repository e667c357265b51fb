//! Frontmatter detection, extraction, and regeneration for index documents.
//!
//! The metadata block is delimited by a configurable separator string (`---`
//! by default) appearing as the first and second occurrence in the content.
//! Fewer than two occurrences means the document carries no frontmatter. The
//! block is treated as opaque text: the separator is configurable and the
//! content between the separators is not required to be valid YAML.

use regex::Regex;

use crate::config::IndexSettings;

/// True iff the separator occurs at least twice in the content.
pub fn has_frontmatter(content: &str, sep: &str) -> bool {
    if sep.is_empty() {
        return false;
    }
    match content.find(sep) {
        Some(first) => content[first + sep.len()..].contains(sep),
        None => false,
    }
}

/// The substring from the first occurrence of the separator through the
/// second, both separators included; empty when no frontmatter exists.
pub fn extract(content: &str, sep: &str) -> String {
    if !has_frontmatter(content, sep) {
        return String::new();
    }
    let mut parts = content.splitn(3, sep);
    parts.next();
    let inner = parts.next().unwrap_or("");
    format!("{sep}{inner}{sep}")
}

/// Content with the frontmatter block (both separators included) removed;
/// unchanged when no frontmatter exists.
pub fn strip(content: &str, sep: &str) -> String {
    if !has_frontmatter(content, sep) {
        return content.to_string();
    }
    let mut parts = content.splitn(3, sep);
    let before = parts.next().unwrap_or("");
    parts.next();
    let after = parts.next().unwrap_or("");
    format!("{before}{after}")
}

/// Returns the document's frontmatter block, injecting the configured tag
/// when tag injection is enabled.
///
/// The tag value (wrapped `[[..]]` when `add_square_brackets` is set) is
/// appended to an existing `<label>:` line using the configured separator,
/// or a new label line is added before the closing delimiter. Documents
/// without a metadata block yield an empty string: tags are only injected
/// into documents that already carry frontmatter, typically seeded from the
/// template. Idempotent: applying twice equals applying once.
pub fn regenerate(settings: &IndexSettings, content: &str) -> String {
    let sep = &settings.front_matter_separator;
    let block = extract(content, sep);
    if block.is_empty() || !settings.index_tag_boolean {
        return block;
    }

    let tag = if settings.add_square_brackets {
        format!("[[{}]]", settings.index_tag_value)
    } else {
        settings.index_tag_value.clone()
    };

    let inner = &block[sep.len()..block.len() - sep.len()];
    let updated = inject_tag(inner, &settings.index_tag_label, &tag, &settings.index_tag_separator);
    format!("{sep}{updated}{sep}")
}

fn inject_tag(inner: &str, label: &str, tag: &str, list_sep: &str) -> String {
    let label_line = Regex::new(&format!(r"(?m)^[ \t]*{}[ \t]*:(.*)$", regex::escape(label)))
        .expect("label pattern is escaped");

    match label_line.captures(inner) {
        Some(caps) => {
            let existing = caps.get(1).map_or("", |m| m.as_str());
            let present = (!list_sep.is_empty()
                && existing.split(list_sep).any(|v| v.trim() == tag))
                || existing.trim() == tag;
            if present {
                return inner.to_string();
            }

            let joined = if existing.trim().is_empty() {
                tag.to_string()
            } else {
                format!("{}{list_sep}{tag}", existing.trim_end())
            };
            let whole = caps.get(0).expect("capture 0 always present");
            format!("{}{label}: {}{}", &inner[..whole.start()], joined.trim_start(), &inner[whole.end()..])
        }
        None => {
            // No label line yet: add one just before the closing separator.
            let mut updated = inner.to_string();
            if !updated.ends_with('\n') {
                updated.push('\n');
            }
            updated.push_str(label);
            updated.push_str(": ");
            updated.push_str(tag);
            updated.push('\n');
            updated
        }
    }
}
