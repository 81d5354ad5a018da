use std::fs;
use std::path::{Path, PathBuf};

use glob::glob;
use regex::Regex;

use crate::console;

const REQUIREMENTS_FILE_NAME: &str = "requirements.txt";

/// Resolve CLI path arguments, defaulting to the current directory when no
/// paths (or a lone `*`) were given.
pub fn resolve_paths(paths: &[String]) -> Vec<PathBuf> {
    if paths.is_empty() || (paths.len() == 1 && paths[0].trim() == "*") {
        return vec![PathBuf::from(".")];
    }
    paths.iter().map(|path| PathBuf::from(path.trim())).collect()
}

/// Find all requirements.txt files in the given paths.
///
/// Directories are searched recursively; symlinks are skipped and anything
/// inside a virtual environment directory (.venv, venv, virtualenv,
/// .aws-sam) is excluded. Problems are reported on stderr and the rest of
/// the batch continues.
pub fn gather_requirements_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut requirements_files: Vec<PathBuf> = Vec::new();

    for path in paths {
        if !path.exists() {
            console::error(&format!("Path '{}' does not exist", path.display()));
            continue;
        }

        if path.is_file() {
            if path.file_name().is_some_and(|name| name == REQUIREMENTS_FILE_NAME) {
                requirements_files.push(path.clone());
            } else {
                console::error(&format!(
                    "'{}' is not a requirements.txt file",
                    path.display()
                ));
            }
        } else if path.is_dir() {
            let found = find_in_directory(path);
            if found.is_empty() {
                console::warn(&format!(
                    "No requirements.txt files found in directory '{}'",
                    path.display()
                ));
            }
            requirements_files.extend(found);
        } else {
            console::error(&format!(
                "'{}' is neither a file nor a directory",
                path.display()
            ));
        }
    }

    let exclusion = venv_exclusion_pattern();
    let mut validated: Vec<PathBuf> = Vec::new();
    for file in requirements_files {
        if exclusion.is_match(&file.to_string_lossy()) {
            continue;
        }
        if !file.exists() {
            console::warn(&format!("File '{}' no longer exists", file.display()));
            continue;
        }
        validated.push(file);
    }
    validated
}

fn find_in_directory(dir: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/**/{REQUIREMENTS_FILE_NAME}", dir.display());
    let mut found: Vec<PathBuf> = match glob(&pattern) {
        Ok(entries) => entries
            .flatten()
            .filter(|path| !path.is_symlink())
            .collect(),
        Err(_) => Vec::new(),
    };
    // Deterministic processing order regardless of filesystem iteration.
    found.sort();
    found
}

fn venv_exclusion_pattern() -> Regex {
    Regex::new(r"[/\\](venv|\.venv|virtualenv|\.aws-sam)[/\\]").expect("valid exclusion pattern")
}

/// Check whether a file can be modified, warning and skipping read-only
/// files instead of failing the whole batch. Preview mode never writes, so
/// it always passes.
pub fn check_file_writable(path: &Path, preview: bool) -> bool {
    if preview {
        return true;
    }

    let readonly = fs::metadata(path)
        .map(|meta| meta.permissions().readonly())
        .unwrap_or(true);

    if readonly {
        console::warn(&format!(
            "{} is read-only, skipping file modification",
            path.display()
        ));
        return false;
    }
    true
}
