use crate::classify::FilterMode;
use crate::cloner::RepoFetcher;
use crate::error::{GrabError, Result, UserFriendlyError};
use crate::extractor::manifest::ManifestWriter;
use crate::reference::RepositoryReference;
use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Destination directory name under the target path.
pub const REFERENCE_DIR: &str = "reference";

pub const SUCCESS_MESSAGE: &str = "Documentation successfully grabbed!";

/// Final result of one extraction run. Failures are reported through
/// the `success` flag and `message` rather than a panic or a bare
/// error, so callers can surface them to whatever front end invoked
/// the run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    pub success: bool,
    pub message: String,
    /// Destination paths of copied files, in traversal order.
    pub copied_paths: Vec<PathBuf>,
    /// Per-file copy failures. Non-empty on a successful run means some
    /// files were skipped; the run itself still completed.
    pub copy_errors: Vec<String>,
    pub destination_root: PathBuf,
}

impl ExtractionOutcome {
    fn failure(message: String, destination_root: PathBuf) -> Self {
        Self {
            success: false,
            message,
            copied_paths: Vec::new(),
            copy_errors: Vec::new(),
            destination_root,
        }
    }
}

/// Result of the copy phase. Per-file errors are collected here rather
/// than aborting the run.
#[derive(Debug, Default)]
pub struct CopyStats {
    pub copied: Vec<PathBuf>,
    pub errors: Vec<String>,
}

pub type ProgressFn = dyn Fn(u8) + Send + Sync;
pub type StatusFn = dyn Fn(&str) + Send + Sync;

/// Orchestrates one extraction: parse URL, fetch the branch, resolve
/// the subpath, filter-copy into `{target}/reference`, write the
/// manifest, release the fetch workspace.
///
/// The pipeline is synchronous and single-threaded; callers wanting a
/// responsive front end schedule `extract` on a worker task. Progress
/// and status callbacks fire at fixed milestones, synchronously from
/// the pipeline's own execution context.
pub struct ExtractionEngine {
    filter_mode: FilterMode,
    on_progress: Option<Box<ProgressFn>>,
    on_status: Option<Box<StatusFn>>,
}

impl ExtractionEngine {
    pub fn new(filter_mode: FilterMode) -> Self {
        Self {
            filter_mode,
            on_progress: None,
            on_status: None,
        }
    }

    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(u8) + Send + Sync + 'static,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub fn with_status<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_status = Some(Box::new(callback));
        self
    }

    /// Run the pipeline, folding any failure into the outcome.
    pub fn extract(&self, url: &str, target_path: &Path) -> ExtractionOutcome {
        match self.try_extract(url, target_path) {
            Ok(outcome) => outcome,
            Err(error) => ExtractionOutcome::failure(
                error.user_message(),
                target_path.join(REFERENCE_DIR),
            ),
        }
    }

    /// Run the pipeline, surfacing stage failures as typed errors. The
    /// fetch workspace is released on every exit path: the `TempDir`
    /// guard deletes it when this function returns, success or not.
    pub fn try_extract(&self, url: &str, target_path: &Path) -> Result<ExtractionOutcome> {
        let reference = RepositoryReference::parse(url)?;

        self.report_status("Cloning repository...");
        self.report_progress(10);

        let workspace = RepoFetcher::new().fetch(&reference)?;

        self.report_progress(40);
        self.report_status("Processing files...");

        let source_root = resolve_source_root(workspace.path(), &reference)?;

        let destination = target_path.join(REFERENCE_DIR);
        prepare_destination(&destination)?;

        self.report_progress(60);

        let stats = if self.filter_mode == FilterMode::None {
            self.report_status("Copying all documentation files...");
            copy_tree_verbatim(&source_root, &destination)?
        } else {
            self.report_status(&format!(
                "Filtering and copying {}...",
                self.filter_mode.description()
            ));
            copy_tree_filtered(&source_root, &destination, self.filter_mode)?
        };

        self.report_progress(80);
        self.report_status("Creating AI instructions file...");

        ManifestWriter::write(
            target_path,
            &reference.display_name(),
            &reference.raw_url,
            Local::now(),
        )?;

        workspace.close().map_err(GrabError::Io)?;

        self.report_progress(100);
        self.report_status(SUCCESS_MESSAGE);

        Ok(ExtractionOutcome {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            copied_paths: stats.copied,
            copy_errors: stats.errors,
            destination_root: destination,
        })
    }

    fn report_progress(&self, percent: u8) {
        if let Some(callback) = &self.on_progress {
            callback(percent);
        }
    }

    fn report_status(&self, status: &str) {
        if let Some(callback) = &self.on_status {
            callback(status);
        }
    }
}

/// Resolve the directory to copy from: the workspace root, or the
/// reference's subpath beneath it. A subpath that does not name an
/// existing directory in the clone is an error.
pub fn resolve_source_root(
    workspace_root: &Path,
    reference: &RepositoryReference,
) -> Result<PathBuf> {
    if !reference.has_sub_path() {
        return Ok(workspace_root.to_path_buf());
    }

    let resolved = workspace_root.join(&reference.sub_path);
    if !resolved.is_dir() {
        return Err(GrabError::SubpathNotFound {
            subpath: reference.sub_path.clone(),
        });
    }
    Ok(resolved)
}

/// Wipe and recreate the destination directory. Any previous contents
/// are fully replaced; failure here is fatal to the run.
pub fn prepare_destination(destination: &Path) -> Result<()> {
    if destination.exists() {
        fs::remove_dir_all(destination).map_err(GrabError::Io)?;
    }
    fs::create_dir_all(destination).map_err(GrabError::Io)?;
    Ok(())
}

/// Copy the whole tree, preserving structure and bytes, skipping
/// version-control metadata directories.
pub fn copy_tree_verbatim(source: &Path, destination: &Path) -> Result<CopyStats> {
    let mut stats = CopyStats::default();

    let walker = WalkDir::new(source)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                stats.errors.push(format!("Error reading entry: {}", error));
                continue;
            }
        };

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| GrabError::Unexpected {
                message: e.to_string(),
            })?;
        let dest_path = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path).map_err(GrabError::Io)?;
        } else if entry.file_type().is_file() {
            match copy_file(entry.path(), &dest_path) {
                Ok(_) => stats.copied.push(dest_path),
                Err(error) => stats
                    .errors
                    .push(format!("Error copying {}: {}", entry.path().display(), error)),
            }
        }
    }

    Ok(stats)
}

/// Walk the tree and copy the files the filter mode admits, lazily
/// creating parent directories so that fully filtered subtrees leave
/// no empty directories behind.
pub fn copy_tree_filtered(
    source: &Path,
    destination: &Path,
    mode: FilterMode,
) -> Result<CopyStats> {
    let mut stats = CopyStats::default();

    for entry in WalkDir::new(source).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                stats.errors.push(format!("Error reading entry: {}", error));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| GrabError::Unexpected {
                message: e.to_string(),
            })?;

        if !mode.admits(relative) {
            continue;
        }

        let dest_path = destination.join(relative);
        let result = dest_path
            .parent()
            .map(fs::create_dir_all)
            .transpose()
            .map_err(GrabError::Io)
            .and_then(|_| copy_file(entry.path(), &dest_path));

        match result {
            Ok(_) => stats.copied.push(dest_path),
            Err(error) => stats
                .errors
                .push(format!("Error copying {}: {}", entry.path().display(), error)),
        }
    }

    Ok(stats)
}

/// Byte-exact copy carrying the source's modification time across,
/// matching what the files had in the clone.
fn copy_file(source: &Path, destination: &Path) -> Result<u64> {
    let bytes = fs::copy(source, destination).map_err(GrabError::Io)?;

    if let Ok(metadata) = fs::metadata(source) {
        if let Ok(modified) = metadata.modified() {
            let _ = filetime::set_file_mtime(
                destination,
                filetime::FileTime::from_system_time(modified),
            );
        }
    }

    Ok(bytes)
}
