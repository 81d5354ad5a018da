use clap::{Parser, Subcommand, ValueEnum};

/// Manage requirements.txt files such as adding, removing, and updating
/// individual packages in bulk.
#[derive(Parser, Debug, Clone)]
#[command(name = "reqs")]
#[command(author, version, about, long_about = LONG_ABOUT)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable colored output (auto-detected by default)
    #[arg(long, global = true, overrides_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Locale to use for sorting (defaults to the system locale)
    #[arg(long, global = true, value_name = "LOCALE")]
    pub locale: Option<String>,
}

const LONG_ABOUT: &str = "\
Manage requirements.txt files such as adding, removing, and updating individual packages in bulk.

Exit codes:
    0: Success (operation completed, or no changes needed)
    1: Error (invalid arguments, file not found, or operation failed)

Searches exclude virtual environment directories (.venv, venv, virtualenv, .aws-sam).
Color output is auto-detected; use --color/--no-color to override, or set NO_COLOR.";

impl Cli {
    /// Explicit color preference from the flags, `None` for auto-detection.
    pub fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Update a package version in requirements.txt files
    Update {
        /// Name of the package to update (case-insensitive)
        package_name: String,
        /// Version specifier, e.g. "4.2.0", ">=4.0.0" or ">=4.0.0,<5.0.0".
        /// Without an operator, "==" is assumed.
        version_specifier: String,
        /// Files or directories to update (defaults to the current directory)
        paths: Vec<String>,
        /// Preview file changes without saving
        #[arg(long, visible_alias = "dry-run")]
        preview: bool,
    },

    /// Find a package in requirements.txt files
    Find {
        /// Name of the package to find (case-insensitive)
        package_name: String,
        /// Files or directories to search (defaults to the current directory)
        paths: Vec<String>,
        /// Also print the matching line
        #[arg(long)]
        verbose: bool,
    },

    /// Add a package to requirements.txt files
    Add {
        /// Name of the package to add
        package_name: String,
        /// Files or directories to update (defaults to the current directory)
        paths: Vec<String>,
        /// Preview file changes without saving
        #[arg(long, visible_alias = "dry-run")]
        preview: bool,
    },

    /// Remove a package from requirements.txt files
    Remove {
        /// Name of the package to remove (case-insensitive)
        package_name: String,
        /// Files or directories to update (defaults to the current directory)
        paths: Vec<String>,
        /// Preview file changes without saving
        #[arg(long, visible_alias = "dry-run")]
        preview: bool,
    },

    /// Sort requirements.txt files alphabetically
    ///
    /// Standalone comment lines are removed, inline comments are kept, and
    /// path-based references are placed at the end.
    Sort {
        /// Files or directories to sort (defaults to the current directory)
        paths: Vec<String>,
        /// Preview file changes without saving
        #[arg(long, visible_alias = "dry-run")]
        preview: bool,
    },

    /// Display the contents of requirements.txt files
    Cat {
        /// Files or directories to display (defaults to the current directory)
        paths: Vec<String>,
    },

    /// Show available versions of a package from PyPI
    Versions {
        /// Name of the package to query
        package_name: String,
        /// Show all available versions (default: 10 most recent)
        #[arg(long = "all")]
        show_all: bool,
        /// Number of versions to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Print each version on its own line (useful for piping)
        #[arg(short = '1', long = "one-per-line")]
        one_per_line: bool,
        /// Custom package index URL (e.g. a private Nexus repository)
        #[arg(long, value_name = "URL")]
        index_url: Option<String>,
        /// Include versions whose artifacts were all yanked
        #[arg(long)]
        include_yanked: bool,
    },

    /// Manage CLI configuration settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show current configuration settings
    Show,
    /// Show the configuration file path
    Path,
    /// Set a configuration value
    Set {
        /// Setting to change
        #[arg(value_enum)]
        setting: ConfigKey,
        /// New value
        #[arg(value_enum)]
        value: Toggle,
    },
    /// Initialize the configuration file with defaults
    Init,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ConfigKey {
    /// Enable/disable colored output
    Color,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Toggle {
    True,
    False,
}

impl Toggle {
    pub fn as_bool(self) -> bool {
        matches!(self, Self::True)
    }
}
