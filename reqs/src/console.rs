use std::path::Path;

use colored::Colorize;

use crate::config;

/// Apply the color preference for the rest of the process.
///
/// Priority: explicit --color/--no-color flag, then the NO_COLOR convention
/// (handled by the `colored` crate itself), then the user config file, then
/// terminal auto-detection.
pub fn init_colors(cli_override: Option<bool>) {
    if let Some(enabled) = cli_override {
        colored::control::set_override(enabled);
        return;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return;
    }
    if let Some(enabled) = config::color_setting() {
        colored::control::set_override(enabled);
    }
}

/// Print a file path header.
pub fn print_path(path: &Path) {
    println!("{}", path.display().to_string().cyan().bold());
}

/// Print a warning to stderr.
pub fn warn(message: &str) {
    eprintln!("{} {message}", "Warning:".yellow().bold());
}

/// Print an error to stderr.
pub fn error(message: &str) {
    eprintln!("{} {message}", "Error:".red().bold());
}

/// Print the full file with changed lines marked, like a unified diff with
/// unlimited context: removals prefixed `-` (red), additions `+` (green),
/// unchanged lines indented by a space for alignment.
pub fn print_diff(old_lines: &[String], new_lines: &[String]) {
    for op in diff_ops(old_lines, new_lines) {
        match op {
            DiffOp::Unchanged(line) => println!(" {line}"),
            DiffOp::Removed(line) => println!("{}", format!("-{line}").red()),
            DiffOp::Added(line) => println!("{}", format!("+{line}").green()),
        }
    }
    println!();
}

enum DiffOp<'a> {
    Unchanged(&'a str),
    Removed(&'a str),
    Added(&'a str),
}

/// Line-level diff via longest-common-subsequence. Requirements files are
/// small, so the quadratic table is fine.
fn diff_ops<'a>(old: &'a [String], new: &'a [String]) -> Vec<DiffOp<'a>> {
    let rows = old.len();
    let cols = new.len();

    let mut table = vec![vec![0usize; cols + 1]; rows + 1];
    for i in (0..rows).rev() {
        for j in (0..cols).rev() {
            table[i][j] = if old[i] == new[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut ops = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < rows && j < cols {
        if old[i] == new[j] {
            ops.push(DiffOp::Unchanged(&old[i]));
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            ops.push(DiffOp::Removed(&old[i]));
            i += 1;
        } else {
            ops.push(DiffOp::Added(&new[j]));
            j += 1;
        }
    }
    ops.extend(old[i..].iter().map(|line| DiffOp::Removed(line)));
    ops.extend(new[j..].iter().map(|line| DiffOp::Added(line)));
    ops
}
