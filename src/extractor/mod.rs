pub mod engine;
pub mod manifest;

pub use engine::{CopyStats, ExtractionEngine, ExtractionOutcome, REFERENCE_DIR};
pub use manifest::{ManifestWriter, MANIFEST_FILE};
