use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File-backed storage for the prompt document.
///
/// The whole document is one JSON array in a single file. Reads hand back
/// the raw file text so whatever formatting is on disk reaches the caller
/// untouched; writes replace the entire file with a pretty-printed
/// serialization of the new array. The write is not atomic, so a failure
/// mid-write can leave a truncated file.
#[derive(Debug, Clone)]
pub struct PromptStore {
    path: PathBuf,
}

impl PromptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw contents of the backing file.
    ///
    /// A missing file is an error like any other read failure; first-run
    /// deployments either seed the file or tolerate the error until the
    /// first save creates it.
    pub fn read_document(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read prompts file {}", self.path.display()))
    }

    /// Replace the whole document with `prompts`, discarding the previous
    /// contents. Elements are written verbatim; nothing checks their shape.
    pub fn replace_document(&self, prompts: &[serde_json::Value]) -> Result<()> {
        let text = serde_json::to_string_pretty(prompts)
            .context("failed to serialize prompts document")?;

        std::fs::write(&self.path, text)
            .with_context(|| format!("failed to write prompts file {}", self.path.display()))
    }
}
