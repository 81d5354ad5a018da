use crate::identity::{find_specifier_operator, Identity, RequirementKind};
use crate::locale::Collator;

/// How a file's comment structure is treated while sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Keep blank-line-delimited sections and standalone comments: each
    /// section is reassembled as its comments (original order) followed by
    /// its sorted entries.
    PreserveComments,
    /// Drop standalone comments and blank lines, sort plain entries, and
    /// append local-path/VCS/editable references in their original order.
    Legacy,
}

/// One blank-line-delimited run of lines, split into standalone comments
/// and entries. Rebuilt from scratch on every sort call.
#[derive(Default)]
struct Section {
    comments: Vec<String>,
    entries: Vec<String>,
}

impl Section {
    fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.entries.is_empty()
    }
}

/// Sort the lines of a requirements file.
///
/// The input is never mutated and the result is a fixed point: sorting the
/// output again yields the same lines. Entries compare by their sort key
/// (inline comment, extras, and version specifier stripped; case preserved)
/// under the given collator.
pub fn sort_lines(lines: &[String], collator: &Collator, mode: SortMode) -> Vec<String> {
    match mode {
        SortMode::PreserveComments => sort_sections(lines, collator),
        SortMode::Legacy => sort_legacy(lines, collator),
    }
}

/// The portion of an entry line used for ordering: inline comment, extras
/// bracket, and version specifier removed.
pub fn sort_key(entry: &str) -> &str {
    let mut key = entry.trim();
    if let Some(idx) = key.find('#') {
        key = &key[..idx];
    }
    if let Some(idx) = key.find('[') {
        key = &key[..idx];
    }
    if let Some(idx) = find_specifier_operator(key) {
        key = &key[..idx];
    }
    key.trim()
}

fn sort_sections(lines: &[String], collator: &Collator) -> Vec<String> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current = Section::default();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else if trimmed.starts_with('#') {
            current.comments.push(line.clone());
        } else {
            current.entries.push(line.clone());
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }

    for section in &mut sections {
        section
            .entries
            .sort_by(|a, b| collator.compare(sort_key(a), sort_key(b)));
    }

    let mut result = Vec::new();
    for (index, section) in sections.iter().enumerate() {
        if index > 0 {
            result.push(String::new());
        }
        result.extend(section.comments.iter().cloned());
        result.extend(section.entries.iter().cloned());
    }
    result
}

fn sort_legacy(lines: &[String], collator: &Collator) -> Vec<String> {
    let mut packages: Vec<String> = Vec::new();
    let mut references: Vec<String> = Vec::new();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if is_deferred_reference(trimmed) {
            references.push(line.clone());
        } else {
            packages.push(line.clone());
        }
    }

    packages.sort_by(|a, b| collator.compare(sort_key(a), sort_key(b)));
    packages.extend(references);
    packages
}

/// Local-path, VCS/URL, and editable (`-e`) references sort after the plain
/// entries, keeping their original relative order.
fn is_deferred_reference(trimmed: &str) -> bool {
    if let Some(rest) = trimmed.strip_prefix("-e ") {
        return rest.contains('/');
    }
    matches!(
        Identity::of(trimmed),
        Some(identity) if identity.kind != RequirementKind::Plain
    )
}
