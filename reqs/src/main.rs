use anyhow::{anyhow, Result};
use clap::Parser;
use colored::Colorize;
use reqs::cli::{Cli, Command, ConfigCommand, ConfigKey};
use reqs::config;
use reqs::console;
use reqs::editor::{AddOutcome, FileEditor};
use reqs::files::{check_file_writable, gather_requirements_files, resolve_paths};
use reqs::pypi::SimpleIndexClient;
use reqs_core::{normalize_specifier, SortMode};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    console::init_colors(cli.color_override());

    let editor = FileEditor::new(cli.locale.clone());

    match cli.command {
        Command::Update {
            ref package_name,
            ref version_specifier,
            ref paths,
            preview,
        } => run_update(&editor, package_name, version_specifier, paths, preview),
        Command::Find {
            ref package_name,
            ref paths,
            verbose,
        } => run_find(&editor, package_name, paths, verbose),
        Command::Add {
            ref package_name,
            ref paths,
            preview,
        } => run_add(&editor, package_name, paths, preview),
        Command::Remove {
            ref package_name,
            ref paths,
            preview,
        } => run_remove(&editor, package_name, paths, preview),
        Command::Sort { ref paths, preview } => run_sort(&editor, paths, preview),
        Command::Cat { ref paths } => run_cat(paths),
        Command::Versions {
            ref package_name,
            show_all,
            limit,
            one_per_line,
            ref index_url,
            include_yanked,
        } => {
            run_versions(
                package_name,
                show_all,
                limit,
                one_per_line,
                index_url.as_deref(),
                include_yanked,
            )
            .await
        }
        Command::Config(ref action) => run_config(action),
    }
}

fn run_update(
    editor: &FileEditor,
    package_name: &str,
    version_specifier: &str,
    paths: &[String],
    preview: bool,
) -> Result<()> {
    let specifier = normalize_specifier(version_specifier)?;

    if preview {
        println!("Previewing changes");
    }

    for file in gather_requirements_files(&resolve_paths(paths)) {
        let original = editor.read_lines(&file)?;

        let Some(updated) = editor.update(&original, package_name, &specifier) else {
            continue;
        };

        if preview {
            console::print_path(&file);
            console::print_diff(&original, &updated);
        } else if check_file_writable(&file, preview) {
            editor.write_lines(&file, &updated)?;
            println!("Updated {}", file.display());
        }
    }

    Ok(())
}

fn run_find(editor: &FileEditor, package_name: &str, paths: &[String], verbose: bool) -> Result<()> {
    for file in gather_requirements_files(&resolve_paths(paths)) {
        let lines = editor.read_lines(&file)?;
        for line in editor.find(&lines, package_name) {
            println!("{}", file.display());
            if verbose {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn run_add(editor: &FileEditor, package_name: &str, paths: &[String], preview: bool) -> Result<()> {
    if preview {
        println!("Previewing changes");
    }

    for file in gather_requirements_files(&resolve_paths(paths)) {
        let original = editor.read_lines(&file)?;

        match editor.add(&original, package_name) {
            AddOutcome::AlreadyPresent => {
                println!("{package_name} already exists in {}", file.display());
            }
            AddOutcome::Added(updated) => {
                if preview {
                    console::print_path(&file);
                    console::print_diff(&original, &updated);
                } else if check_file_writable(&file, preview) {
                    editor.write_lines(&file, &updated)?;
                    println!("Updated {}", file.display());
                }
            }
        }
    }

    Ok(())
}

fn run_remove(
    editor: &FileEditor,
    package_name: &str,
    paths: &[String],
    preview: bool,
) -> Result<()> {
    if preview {
        println!("Previewing changes");
    }

    for file in gather_requirements_files(&resolve_paths(paths)) {
        let original = editor.read_lines(&file)?;

        let Some(updated) = editor.remove(&original, package_name) else {
            continue;
        };

        if preview {
            console::print_path(&file);
            console::print_diff(&original, &updated);
        } else if check_file_writable(&file, preview) {
            editor.write_lines(&file, &updated)?;
            println!("Removed {package_name} from {}", file.display());
        }
    }

    Ok(())
}

fn run_sort(editor: &FileEditor, paths: &[String], preview: bool) -> Result<()> {
    if preview {
        println!("Previewing changes");
    }

    let mut files_sorted = 0u32;
    let mut files_already_sorted = 0u32;
    let mut files_skipped = 0u32;

    for file in gather_requirements_files(&resolve_paths(paths)) {
        let original = editor.read_lines(&file)?;
        let sorted = editor.sort(&original, SortMode::Legacy);

        if original == sorted {
            println!("{} is already sorted", file.display());
            files_already_sorted += 1;
        } else if preview {
            console::print_path(&file);
            console::print_diff(&original, &sorted);
            files_sorted += 1;
        } else if check_file_writable(&file, preview) {
            editor.write_lines(&file, &sorted)?;
            println!("Sorted {}", file.display());
            files_sorted += 1;
        } else {
            files_skipped += 1;
        }
    }

    let total = files_sorted + files_already_sorted + files_skipped;
    if total > 1 {
        let mut parts = Vec::new();
        if files_sorted > 0 {
            parts.push(format!("{files_sorted} sorted"));
        }
        if files_already_sorted > 0 {
            parts.push(format!("{files_already_sorted} already sorted"));
        }
        if files_skipped > 0 {
            parts.push(format!("{files_skipped} skipped"));
        }
        println!("\nSummary: {} ({total} files total)", parts.join(", "));
    }

    Ok(())
}

fn run_cat(paths: &[String]) -> Result<()> {
    for file in gather_requirements_files(&resolve_paths(paths)) {
        let contents = std::fs::read_to_string(&file)
            .map_err(|err| anyhow!("Failed to read file {}: {err}", file.display()))?;
        console::print_path(&file);
        println!("{}", contents.trim());
        println!();
    }
    Ok(())
}

async fn run_versions(
    package_name: &str,
    show_all: bool,
    limit: usize,
    one_per_line: bool,
    index_url: Option<&str>,
    include_yanked: bool,
) -> Result<()> {
    let mut client = SimpleIndexClient::new(include_yanked);
    if let Some(url) = index_url {
        client = client.with_index_url(url);
    }

    let versions = client.fetch_versions(package_name).await?;
    if versions.is_empty() {
        return Err(anyhow!("No versions found for '{package_name}'"));
    }

    let latest = &versions[0];
    println!(
        "{} (latest: {})",
        package_name.green().bold(),
        latest.to_string().green()
    );

    let total = versions.len();
    let shown: Vec<String> = if show_all {
        versions.iter().map(ToString::to_string).collect()
    } else {
        versions.iter().take(limit).map(ToString::to_string).collect()
    };

    if one_per_line {
        for version in &shown {
            println!("{version}");
        }
    } else {
        println!("Available versions: {}", shown.join(", "));
        if !show_all && total > limit {
            println!(
                "{}",
                format!("(showing {limit} of {total} versions, use --all for complete list)")
                    .yellow()
            );
        }
    }

    Ok(())
}

fn run_config(action: &ConfigCommand) -> Result<()> {
    match action {
        ConfigCommand::Show => {
            let path = config::config_file()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            println!("{} {}", "Config file:".cyan().bold(), path.display());

            let table = config::load();
            if table.is_empty() {
                println!("No configuration set (using defaults)");
                return Ok(());
            }

            println!("\nCurrent settings:");
            for (section, value) in &table {
                match value.as_table() {
                    Some(entries) => {
                        for (key, entry) in entries {
                            println!("  {section}.{key} = {entry}");
                        }
                    }
                    None => println!("  {section} = {value}"),
                }
            }
            Ok(())
        }
        ConfigCommand::Path => {
            let path = config::config_file()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommand::Set { setting, value } => {
            match setting {
                ConfigKey::Color => {
                    let enabled = value.as_bool();
                    config::save_color_setting(enabled)?;
                    let status = if enabled { "enabled" } else { "disabled" };
                    println!("Color output {status}");
                }
            }
            Ok(())
        }
        ConfigCommand::Init => {
            let path = config::config_file()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            if path.exists() {
                println!("Config file already exists: {}", path.display());
                return Ok(());
            }
            config::ensure_config_dir()?;
            std::fs::write(&path, config::default_config_content())
                .map_err(|err| anyhow!("Failed to write config file: {err}"))?;
            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}
