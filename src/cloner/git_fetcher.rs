use crate::error::{GrabError, Result};
use crate::reference::RepositoryReference;
use git2::{build::RepoBuilder, CertificateCheckStatus, FetchOptions, Progress, RemoteCallbacks};
use tempfile::TempDir;

/// Snapshot of git transfer statistics, forwarded to the optional
/// progress callback during the fetch.
#[derive(Debug, Clone)]
pub struct CloneProgress {
    pub total_objects: u32,
    pub received_objects: u32,
    pub indexed_deltas: u32,
    pub total_deltas: u32,
    pub received_bytes: u64,
}

impl From<Progress<'_>> for CloneProgress {
    fn from(progress: Progress) -> Self {
        Self {
            total_objects: progress.total_objects() as u32,
            received_objects: progress.received_objects() as u32,
            indexed_deltas: progress.indexed_deltas() as u32,
            total_deltas: progress.total_deltas() as u32,
            received_bytes: progress.received_bytes() as u64,
        }
    }
}

impl CloneProgress {
    pub fn percentage(&self) -> u32 {
        if self.total_objects == 0 {
            0
        } else {
            self.received_objects * 100 / self.total_objects
        }
    }
}

/// Clones the requested branch of a repository into a fresh temporary
/// workspace. The whole branch tree is always fetched; filtering to a
/// subpath happens after the fetch, never during it.
pub struct RepoFetcher {
    progress_callback: Option<Box<dyn Fn(CloneProgress) + Send + Sync>>,
}

impl RepoFetcher {
    pub fn new() -> Self {
        Self {
            progress_callback: None,
        }
    }

    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(CloneProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Box::new(callback));
        self
    }

    /// Fetch the full branch tree into a new temporary workspace.
    ///
    /// The returned `TempDir` guard owns the workspace; dropping it on
    /// any exit path deletes the clone.
    pub fn fetch(&self, reference: &RepositoryReference) -> Result<TempDir> {
        let workspace = TempDir::new().map_err(GrabError::Io)?;
        self.clone_branch(reference, workspace.path())?;
        Ok(workspace)
    }

    fn clone_branch(&self, reference: &RepositoryReference, path: &std::path::Path) -> Result<()> {
        self.clone_from(&reference.clone_url(), &reference.branch, path)
    }

    fn clone_from(&self, url: &str, branch: &str, path: &std::path::Path) -> Result<()> {
        let mut callbacks = RemoteCallbacks::new();

        let progress_callback = self.progress_callback.as_deref();
        callbacks.transfer_progress(move |stats: Progress| {
            if let Some(callback) = progress_callback {
                callback(CloneProgress::from(stats));
            }
            true
        });

        callbacks.certificate_check(|_cert, _valid| Ok(CertificateCheckStatus::CertificateOk));

        // Token-based auth for private repositories, falling back to the
        // default SSH key, then anonymous access.
        callbacks.credentials(|_url, username_from_url, _allowed_types| {
            if let Ok(token) = std::env::var("GITHUB_TOKEN") {
                return git2::Cred::userpass_plaintext(username_from_url.unwrap_or("git"), &token);
            }

            if let Some(username) = username_from_url {
                if let Ok(home) = std::env::var("HOME") {
                    let ssh_key = std::path::Path::new(&home).join(".ssh/id_rsa");
                    if ssh_key.exists() {
                        return git2::Cred::ssh_key(username, None, &ssh_key, None);
                    }
                }
            }

            git2::Cred::default()
        });

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);

        let mut builder = RepoBuilder::new();
        builder.fetch_options(fetch_options);
        builder.branch(branch);

        builder.clone(url, path).map_err(GrabError::from)?;

        Ok(())
    }
}

impl Default for RepoFetcher {
    fn default() -> Self {
        Self::new()
    }
}
