use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Policy controlling which files survive the copy phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Copy every file except version-control metadata
    #[default]
    None,
    /// Copy Markdown documents only (.md, .mdx)
    MarkdownOnly,
    /// Copy everything that is not a code file
    ExcludeCode,
    /// Copy everything that is not a binary or generated file
    LightFilter,
}

impl FilterMode {
    /// Per-file inclusion rule, applied to the path relative to the
    /// extraction root. `LightFilter` inspects the full relative path so
    /// that a generated directory anywhere above the file excludes it.
    pub fn admits(&self, relative_path: &Path) -> bool {
        let name = relative_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        match self {
            FilterMode::None => true,
            FilterMode::MarkdownOnly => is_markdown(&name),
            FilterMode::ExcludeCode => !is_code_file(&name),
            FilterMode::LightFilter => !is_binary_or_generated(&relative_path.to_string_lossy()),
        }
    }

    /// Human description used in the filtering status line.
    pub fn description(&self) -> &'static str {
        match self {
            FilterMode::None => "all files",
            FilterMode::MarkdownOnly => "markdown files only",
            FilterMode::ExcludeCode => "non-code files",
            FilterMode::LightFilter => "documentation files (excluding binaries)",
        }
    }
}

const MARKDOWN_SUFFIXES: &[&str] = &[".md", ".mdx"];

const CODE_SUFFIXES: &[&str] = &[
    // Programming languages
    ".py", ".js", ".jsx", ".ts", ".tsx", ".java", ".c", ".cpp", ".cs", ".go", ".rb", ".php",
    ".swift", ".kt", ".rs", ".scala", ".sh", ".bash", ".ps1", ".pl", ".lua", ".r",
    // Web development
    ".html", ".htm", ".css", ".scss", ".sass", ".less",
    // Data formats that often carry code
    ".json", ".xml", ".yaml", ".yml",
    // Build and config files
    ".gradle", ".sbt", ".make", ".cmake", ".toml", ".ini", ".conf",
    // Compiled artifacts
    ".class", ".jar", ".war", ".dll", ".exe", ".so", ".o", ".obj", ".pyc",
    // Container files
    ".dockerfile", ".containerfile",
    // Database files
    ".sql", ".db", ".sqlite",
];

const BINARY_SUFFIXES: &[&str] = &[
    // Binary and archive files
    ".bin", ".dat", ".exe", ".dll", ".so", ".dylib", ".class", ".jar", ".war", ".ear",
    ".zip", ".tar", ".gz", ".bz2", ".xz", ".7z", ".rar",
    // Images
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp", ".ico", ".svg",
    // Audio/video
    ".mp3", ".mp4", ".wav", ".flac", ".ogg", ".avi", ".mov", ".mkv", ".webm",
    // Non-text document formats
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx",
    // Database files
    ".db", ".sqlite", ".mdb",
    // Compiled code
    ".pyc", ".pyo", ".o", ".obj", ".a", ".lib",
    // Lock files and package management
    ".lock", ".yarn-integrity", "package-lock.json", "yarn.lock",
    // Cache files
    ".cache", ".ds_store", "thumbs.db",
];

const GENERATED_FRAGMENTS: &[&str] = &[
    "node_modules", "__pycache__", ".git", ".svn", ".hg", ".idea", ".vscode",
    "build", "dist", "target", "out", "bin", "obj",
];

/// True iff the name carries a Markdown extension. Case-insensitive.
pub fn is_markdown(name: &str) -> bool {
    has_any_suffix(name, MARKDOWN_SUFFIXES)
}

/// True iff the name carries an extension from the code allowlist.
/// Case-insensitive.
pub fn is_code_file(name: &str) -> bool {
    has_any_suffix(name, CODE_SUFFIXES)
}

/// True iff the path names a binary/generated artifact, either by its
/// suffix or because any path component lies inside a generated
/// directory. Takes the full relative path, not just the basename.
pub fn is_binary_or_generated(path: &str) -> bool {
    let normalized = path.replace('\\', "/").to_lowercase();

    has_any_suffix(&normalized, BINARY_SUFFIXES)
        || GENERATED_FRAGMENTS
            .iter()
            .any(|fragment| normalized.contains(fragment))
}

fn has_any_suffix(name: &str, suffixes: &[&str]) -> bool {
    let lower = name.to_lowercase();
    suffixes.iter().any(|suffix| lower.ends_with(suffix))
}
