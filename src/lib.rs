pub mod classify;
pub mod cli;
pub mod cloner;
pub mod config;
pub mod error;
pub mod extractor;
pub mod reference;
pub mod ui;

// Public API re-exports
pub use classify::{is_binary_or_generated, is_code_file, is_markdown, FilterMode};
pub use cli::{Cli, OutputFormat};
pub use cloner::{CloneProgress, RepoFetcher};
pub use config::Settings;
pub use error::{GrabError, Result, UserFriendlyError};
pub use extractor::{
    ExtractionEngine, ExtractionOutcome, ManifestWriter, MANIFEST_FILE, REFERENCE_DIR,
};
pub use reference::RepositoryReference;
pub use ui::{OutputFormatter, OutputMode, PipelineProgress};

use std::path::Path;

/// One-call form of the extraction pipeline: URL, target path, filter
/// mode, and the two milestone callbacks. Front ends that manage their
/// own progress widgets use [`ExtractionEngine`] directly.
pub fn extract<P, S>(
    repo_url: &str,
    target_path: &Path,
    filter_mode: FilterMode,
    on_progress: P,
    on_status: S,
) -> ExtractionOutcome
where
    P: Fn(u8) + Send + Sync + 'static,
    S: Fn(&str) + Send + Sync + 'static,
{
    ExtractionEngine::new(filter_mode)
        .with_progress(on_progress)
        .with_status(on_status)
        .extract(repo_url, target_path)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
