//! Source files handed to the dispatch engine.

use std::path::{Path, PathBuf};

/// One source file: its path and full text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path reported in violations.
    pub path: PathBuf,
    /// File contents.
    pub content: String,
}

impl SourceFile {
    /// Creates a source file from in-memory text.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Reads a file from disk.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(path, content))
    }

    /// Rewrites the reported path relative to `root`, if it lies below it.
    #[must_use]
    pub fn relative_to(mut self, root: &Path) -> Self {
        if let Ok(relative) = self.path.strip_prefix(root) {
            self.path = relative.to_path_buf();
        }
        self
    }
}
