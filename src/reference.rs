use crate::error::{GrabError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Structured form of a GitHub repository URL, optionally rooted at a
/// branch and subdirectory via the `/tree/{branch}/{subpath}` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryReference {
    pub owner: String,
    pub repo_name: String,
    pub branch: String,
    pub sub_path: String,
    pub raw_url: String,
}

impl RepositoryReference {
    /// Parse a browser-style GitHub URL into its components.
    ///
    /// Accepted grammar: `https://github.com/{owner}/{repo}` optionally
    /// followed by `/tree/{branch}` or `/tree/{branch}/{subpath...}`.
    /// The branch defaults to `main` when no `/tree/` segment is present.
    /// Existence of the owner, repository, or branch is not checked here;
    /// that is deferred to the fetch step.
    pub fn parse(url: &str) -> Result<Self> {
        let invalid = || GrabError::InvalidUrlFormat {
            url: url.to_string(),
        };

        let parsed = Url::parse(url).map_err(|_| invalid())?;

        match parsed.scheme() {
            "http" | "https" => {}
            _ => return Err(invalid()),
        }

        if parsed.host_str() != Some("github.com") {
            return Err(invalid());
        }

        let segments: Vec<&str> = parsed
            .path_segments()
            .ok_or_else(invalid)?
            .filter(|s| !s.is_empty())
            .collect();

        if segments.len() < 2 {
            return Err(invalid());
        }

        let owner = segments[0].to_string();
        let repo_name = segments[1]
            .strip_suffix(".git")
            .unwrap_or(segments[1])
            .to_string();

        if owner.is_empty() || repo_name.is_empty() {
            return Err(invalid());
        }

        let (branch, sub_path) = match segments.get(2) {
            None => ("main".to_string(), String::new()),
            Some(&"tree") => {
                let branch = segments.get(3).ok_or_else(invalid)?.to_string();
                let sub_path = segments[4..].join("/");
                (branch, sub_path)
            }
            // Other views (blob, commits, releases, ...) do not name a
            // copyable tree.
            Some(_) => return Err(invalid()),
        };

        Ok(Self {
            owner,
            repo_name,
            branch,
            sub_path,
            raw_url: url.to_string(),
        })
    }

    /// Clone URL for the whole repository; the subpath is filtered after
    /// fetch, never during.
    pub fn clone_url(&self) -> String {
        format!("https://github.com/{}/{}.git", self.owner, self.repo_name)
    }

    /// Name shown in the manifest: `owner/repo`, annotated with the
    /// subpath when one was given.
    pub fn display_name(&self) -> String {
        if self.sub_path.is_empty() {
            format!("{}/{}", self.owner, self.repo_name)
        } else {
            format!("{}/{} (path: {})", self.owner, self.repo_name, self.sub_path)
        }
    }

    pub fn has_sub_path(&self) -> bool {
        !self.sub_path.is_empty()
    }
}
