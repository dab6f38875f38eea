// src/output.rs
// =============================================================================
// The output directory: one UTF-8 Markdown file per saved page.
//
// File names come from extract::url_to_filename. Two URLs that map to the
// same name overwrite each other; the last write wins.
// =============================================================================

use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{CrawlError, Result};
use crate::extract::url_to_filename;

#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    // Creates the directory (and parents); fine if it already exists
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let root = path.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| CrawlError::OutputDir {
                path: root.clone(),
                source,
            })?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    // Writes a page's Markdown and returns the file it landed in
    pub async fn save(&self, url: &Url, markdown: &str) -> Result<PathBuf> {
        let path = self.root.join(url_to_filename(url));
        tokio::fs::write(&path, markdown.as_bytes())
            .await
            .map_err(|source| CrawlError::Persistence {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}
