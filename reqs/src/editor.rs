use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use reqs_core::{matches_package, sort_lines, Collator, SortMode};

/// Line-list editing for requirements files.
///
/// All operations are pure transformations of a line list; reading and
/// writing files is kept at the edges so previews and tests can work on the
/// in-memory form.
pub struct FileEditor {
    locale: Option<String>,
}

/// Result of an add attempt.
pub enum AddOutcome {
    /// A line already matching the package was found.
    AlreadyPresent,
    /// The package was appended and the file re-sorted.
    Added(Vec<String>),
}

impl FileEditor {
    pub fn new(locale: Option<String>) -> Self {
        Self { locale }
    }

    /// Read a file into lines.
    pub fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(contents.lines().map(ToString::to_string).collect())
    }

    /// Write lines back, trimmed and terminated with exactly one newline.
    pub fn write_lines(&self, path: &Path, lines: &[String]) -> Result<()> {
        let contents = format!("{}\n", lines.join("\n").trim());
        fs::write(path, contents)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(())
    }

    /// Replace every line matching `package` with `<package><specifier>`,
    /// carrying over any inline trailing comment, then sort. Returns `None`
    /// when nothing matched.
    pub fn update(&self, lines: &[String], package: &str, specifier: &str) -> Option<Vec<String>> {
        let mut updated: Vec<String> = Vec::with_capacity(lines.len());
        let mut modified = false;

        for line in lines {
            if matches_package(package, line) {
                let inline_comment = inline_comment(line)
                    .map(|comment| format!("  {comment}"))
                    .unwrap_or_default();
                updated.push(format!("{package}{specifier}{inline_comment}"));
                modified = true;
            } else {
                updated.push(line.clone());
            }
        }

        modified.then(|| self.sort(&updated, SortMode::PreserveComments))
    }

    /// Append `package` (unversioned) unless a matching line already exists,
    /// then sort.
    pub fn add(&self, lines: &[String], package: &str) -> AddOutcome {
        if lines.iter().any(|line| matches_package(package, line)) {
            return AddOutcome::AlreadyPresent;
        }
        let mut updated = lines.to_vec();
        updated.push(package.to_string());
        AddOutcome::Added(self.sort(&updated, SortMode::PreserveComments))
    }

    /// Drop every line matching `package`, then sort. Returns `None` when
    /// nothing was removed.
    pub fn remove(&self, lines: &[String], package: &str) -> Option<Vec<String>> {
        let remaining: Vec<String> = lines
            .iter()
            .filter(|line| !matches_package(package, line))
            .cloned()
            .collect();

        (remaining.len() != lines.len()).then(|| self.sort(&remaining, SortMode::PreserveComments))
    }

    /// Lines matching `package`, verbatim.
    pub fn find<'a>(&self, lines: &'a [String], package: &str) -> Vec<&'a String> {
        lines
            .iter()
            .filter(|line| matches_package(package, line))
            .collect()
    }

    /// Sort a line list in the given mode. The collation locale is acquired
    /// for the duration of this call and released before returning.
    pub fn sort(&self, lines: &[String], mode: SortMode) -> Vec<String> {
        let collator = Collator::acquire(self.locale.as_deref());
        sort_lines(lines, &collator, mode)
    }
}

/// The inline trailing comment of an entry line, if any. A `#` that starts
/// the line is a standalone comment, not an inline one.
fn inline_comment(line: &str) -> Option<&str> {
    let idx = line.find('#')?;
    if line[..idx].trim().is_empty() {
        return None;
    }
    Some(line[idx..].trim_end())
}
