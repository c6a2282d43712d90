//! Working-directory file operations
//!
//! Thin wrappers over the filesystem for the flat working tree: tracked
//! filenames are plain names in the repository root. The repository's own
//! data directory is never listed and never touched.

use anyhow::Context;
use std::path::Path;

/// Directory holding all repository state, ignored in listings
pub const REPO_DIR_NAME: &str = ".jot";

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_exists(&self, filename: &str) -> bool {
        self.path.join(filename).is_file()
    }

    pub fn read_file(&self, filename: &str) -> anyhow::Result<String> {
        let file_path = self.path.join(filename);

        std::fs::read_to_string(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))
    }

    pub fn write_file(&self, filename: &str, content: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(filename);

        std::fs::write(&file_path, content)
            .with_context(|| format!("Unable to write file {}", file_path.display()))
    }

    /// Delete a working file if present; absent files are not an error
    pub fn delete_file(&self, filename: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(filename);

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Unable to delete file {}", file_path.display()))?;
        }

        Ok(())
    }

    /// List the names of all plain files in the working directory
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = std::fs::read_dir(self.path.as_ref())
            .with_context(|| format!("Unable to list directory {}", self.path.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| name != REPO_DIR_NAME)
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }
}
