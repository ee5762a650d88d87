use crate::error::{GrabError, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "ai-instructions.md";

/// Writes the provenance manifest next to the `reference` folder.
/// Extraction is considered incomplete without it, so a write failure
/// is fatal to the run.
pub struct ManifestWriter;

impl ManifestWriter {
    pub fn write(
        target_path: &Path,
        display_name: &str,
        source_url: &str,
        timestamp: DateTime<Local>,
    ) -> Result<PathBuf> {
        let content = format!(
            "# AI Instructions: Documentation Context Folder\n\
             \n\
             This folder contains documentation for the following Github repository: {}.\n\
             \n\
             It is intended to provide you with context on how this SDK or utility operates. \
             Do not edit the documentation in this folder or its recursive paths.\n\
             \n\
             It was imported from the internet on: {}.\n\
             \n\
             The original URL was {}\n",
            display_name,
            timestamp.format("%Y-%m-%d %H:%M:%S"),
            source_url,
        );

        let manifest_path = target_path.join(MANIFEST_FILE);
        fs::write(&manifest_path, content).map_err(|source| GrabError::ManifestWrite { source })?;

        Ok(manifest_path)
    }
}
