use crate::classify::FilterMode;
use crate::config::Settings;
use crate::error::{GrabError, Result};
use crate::reference::RepositoryReference;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docsgrab")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Grab curated documentation context from GitHub repositories")]
#[command(
    long_about = "DocsGrab clones a GitHub repository (optionally rooted at a branch and \
                  subdirectory), copies a filtered subset of its files into a local \
                  'reference' folder, and writes an ai-instructions.md provenance manifest \
                  alongside it."
)]
#[command(after_help = "EXAMPLES:\n  \
    docsgrab https://github.com/acme/widgets\n  \
    docsgrab https://github.com/acme/widgets/tree/main/docs --target ~/projects/myapp\n  \
    docsgrab https://github.com/rust-lang/book --filter markdown-only\n  \
    docsgrab https://github.com/acme/widgets --filter light-filter --output-format json")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// GitHub repository URL, optionally with /tree/{branch}/{subdir}
    #[arg(value_parser = validate_reference_url)]
    pub repository_url: String,

    /// Target path receiving the reference folder and manifest
    #[arg(short, long, help = "Directory receiving reference/ and ai-instructions.md")]
    pub target: Option<PathBuf>,

    /// Filtering mode applied during the copy
    #[arg(short, long, value_enum)]
    pub filter: Option<FilterMode>,

    /// Settings file path
    #[arg(short, long, help = "Path to JSON settings file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_settings(&self) -> Result<Settings> {
        Settings::load_with_defaults(self.config.as_ref())
    }

    /// CLI flag wins over the persisted default.
    pub fn resolve_filter_mode(&self, settings: &Settings) -> FilterMode {
        self.filter.unwrap_or(settings.filter_mode)
    }

    /// Target precedence: --target, then the settings file's
    /// base_repo_path, then the current directory. The resolved path
    /// must be an existing directory.
    pub fn resolve_target(&self, settings: &Settings) -> Result<PathBuf> {
        let target = self
            .target
            .clone()
            .or_else(|| settings.base_path())
            .or_else(|| std::env::current_dir().ok())
            .ok_or_else(|| GrabError::Config {
                message: "No target path given and the current directory is unavailable"
                    .to_string(),
            })?;

        if !target.is_dir() {
            return Err(GrabError::Config {
                message: format!("Target path is not a directory: {}", target.display()),
            });
        }

        Ok(target)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn validate_reference_url(s: &str) -> std::result::Result<String, String> {
    RepositoryReference::parse(s)
        .map(|_| s.to_string())
        .map_err(|_| {
            "Expected a GitHub URL like https://github.com/owner/repo or \
             https://github.com/owner/repo/tree/branch/subdir"
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli_with_url(url: &str) -> Cli {
        Cli {
            repository_url: url.to_string(),
            target: None,
            filter: None,
            config: None,
            output_format: OutputFormat::Human,
            verbose: 0,
            quiet: false,
        }
    }

    #[test]
    fn test_validate_reference_url() {
        assert!(validate_reference_url("https://github.com/acme/widgets").is_ok());
        assert!(validate_reference_url("https://github.com/acme/widgets/tree/dev/docs").is_ok());
        assert!(validate_reference_url("https://gitlab.com/acme/widgets").is_err());
        assert!(validate_reference_url("not-a-url").is_err());
    }

    #[test]
    fn test_filter_mode_resolution() {
        let settings = Settings {
            base_repo_path: String::new(),
            filter_mode: FilterMode::LightFilter,
        };

        let cli = cli_with_url("https://github.com/acme/widgets");
        assert_eq!(cli.resolve_filter_mode(&settings), FilterMode::LightFilter);

        let mut cli = cli_with_url("https://github.com/acme/widgets");
        cli.filter = Some(FilterMode::MarkdownOnly);
        assert_eq!(cli.resolve_filter_mode(&settings), FilterMode::MarkdownOnly);
    }

    #[test]
    fn test_target_resolution_precedence() {
        let cli_dir = TempDir::new().unwrap();
        let settings_dir = TempDir::new().unwrap();

        let settings = Settings {
            base_repo_path: settings_dir.path().to_string_lossy().to_string(),
            filter_mode: FilterMode::None,
        };

        let mut cli = cli_with_url("https://github.com/acme/widgets");
        cli.target = Some(cli_dir.path().to_path_buf());
        assert_eq!(cli.resolve_target(&settings).unwrap(), cli_dir.path());

        let cli = cli_with_url("https://github.com/acme/widgets");
        assert_eq!(cli.resolve_target(&settings).unwrap(), settings_dir.path());
    }

    #[test]
    fn test_target_must_be_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a-file");
        std::fs::write(&file, "x").unwrap();

        let mut cli = cli_with_url("https://github.com/acme/widgets");
        cli.target = Some(file);

        assert!(matches!(
            cli.resolve_target(&Settings::default()),
            Err(GrabError::Config { .. })
        ));
    }

    #[test]
    fn test_verbosity_level() {
        let mut cli = cli_with_url("https://github.com/acme/widgets");
        cli.verbose = 2;
        assert_eq!(cli.verbosity_level(), 2);

        cli.verbose = 0;
        cli.quiet = true;
        assert_eq!(cli.verbosity_level(), 0);
    }
}
