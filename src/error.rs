use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrabError {
    #[error("Invalid GitHub URL format: {url}")]
    InvalidUrlFormat { url: String },

    #[error("Specified path '{subpath}' not found in repository")]
    SubpathNotFound { subpath: String },

    #[error("Git clone failed: {detail}")]
    CloneFailed { detail: String },

    #[error("Failed to write AI instructions file: {source}")]
    ManifestWrite {
        #[source]
        source: std::io::Error,
    },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Error: {message}")]
    Unexpected { message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for GrabError {
    fn user_message(&self) -> String {
        match self {
            GrabError::InvalidUrlFormat { url } => {
                format!("Invalid GitHub URL format: {}", url)
            }
            GrabError::SubpathNotFound { subpath } => {
                format!("Specified path '{}' not found in repository", subpath)
            }
            GrabError::CloneFailed { detail } => {
                format!("Git clone failed: {}", detail)
            }
            GrabError::ManifestWrite { source } => {
                format!("Failed to write AI instructions file: {}", source)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            GrabError::InvalidUrlFormat { .. } => Some(
                "Provide a GitHub URL like https://github.com/owner/repo or https://github.com/owner/repo/tree/branch/docs".to_string()
            ),
            GrabError::SubpathNotFound { .. } => Some(
                "Check that the subdirectory exists on the requested branch. The path after /tree/{branch}/ must match the repository layout exactly.".to_string()
            ),
            GrabError::CloneFailed { .. } => Some(
                "Verify the repository and branch exist and that you have network access. For private repositories, set the GITHUB_TOKEN environment variable.".to_string()
            ),
            GrabError::ManifestWrite { .. } | GrabError::Io(_) => Some(
                "Ensure you have write permission for the target directory.".to_string()
            ),
            GrabError::Config { .. } => Some(
                "Check the settings file syntax. It is a JSON object with base_repo_path and filter_mode keys.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<git2::Error> for GrabError {
    fn from(error: git2::Error) -> Self {
        GrabError::CloneFailed {
            detail: error.message().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GrabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = GrabError::InvalidUrlFormat {
            url: "not-a-url".to_string(),
        };
        assert!(error.user_message().contains("Invalid GitHub URL format"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_subpath_message_names_the_path() {
        let error = GrabError::SubpathNotFound {
            subpath: "docs/api".to_string(),
        };
        assert!(error.user_message().contains("docs/api"));
    }

    #[test]
    fn test_git_error_conversion_carries_detail() {
        let git_error = git2::Error::from_str("remote branch missing");
        let error = GrabError::from(git_error);
        match error {
            GrabError::CloneFailed { detail } => {
                assert!(detail.contains("remote branch missing"))
            }
            other => panic!("expected CloneFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_has_no_suggestion() {
        let error = GrabError::Unexpected {
            message: "boom".to_string(),
        };
        assert!(error.suggestion().is_none());
        assert!(error.user_message().contains("boom"));
    }
}
