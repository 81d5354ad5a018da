use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a temporary project directory
pub struct TempProject {
    pub dir: TempDir,
}

impl TempProject {
    /// Create a new temporary project
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        Self { dir }
    }

    /// Get the path to the project directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file in the project with the given content
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let file_path = self.dir.path().join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Get the absolute path to a file in the project
    pub fn file_path(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    /// Read a file in the project
    pub fn read_file(&self, relative_path: &str) -> String {
        fs::read_to_string(self.file_path(relative_path)).expect("Failed to read file")
    }
}

impl Default for TempProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Requirements content with sections and comments
#[allow(dead_code)]
pub fn sample_sectioned_requirements() -> &'static str {
    "\
# Web
flask==2.0.0
django==3.2.0

# Data
pandas==1.3.0
numpy==1.21.0
"
}

/// Unsorted requirements content with mixed entry kinds
#[allow(dead_code)]
pub fn sample_unsorted_requirements() -> &'static str {
    "\
zebra==1.0.0
# build tools
apple==2.0.0
banana==3.0.0  # keep
./local_pkg
-e ../dev
"
}
