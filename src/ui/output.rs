use crate::error::{GrabError, UserFriendlyError};
use crate::extractor::ExtractionOutcome;
use console::{style, Emoji, Term};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
        }
    }

    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}{}", CHECKMARK, style(message).green().bold());
                } else {
                    println!("{}{}", CHECKMARK, message);
                }
            }
            OutputMode::Json => self.print_json_message("success", message),
            OutputMode::Plain => println!("SUCCESS: {}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    eprintln!("{}{}", CROSS, style(message).red().bold());
                } else {
                    eprintln!("{}{}", CROSS, message);
                }
            }
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}{}", WARNING, style(message).yellow());
                } else {
                    println!("{}{}", WARNING, message);
                }
            }
            OutputMode::Json => self.print_json_message("warning", message),
            OutputMode::Plain => println!("WARNING: {}", message),
        }
    }

    pub fn info(&self, message: &str) {
        if self.verbose_level == 0 {
            return;
        }
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}{}", INFO, style(message).cyan());
                } else {
                    println!("{}{}", INFO, message);
                }
            }
            OutputMode::Json => self.print_json_message("info", message),
            OutputMode::Plain => println!("INFO: {}", message),
        }
    }

    pub fn debug(&self, message: &str) {
        if self.verbose_level < 2 {
            return;
        }
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("  {}", style(message).dim());
                } else {
                    println!("  DEBUG: {}", message);
                }
            }
            OutputMode::Json => self.print_json_message("debug", message),
            OutputMode::Plain => println!("DEBUG: {}", message),
        }
    }

    pub fn print_user_friendly_error(&self, error: &GrabError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => self.print_json_object(&serde_json::json!({
                    "type": "suggestion",
                    "message": suggestion,
                })),
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    pub fn print_outcome(&self, outcome: &ExtractionOutcome) {
        match self.mode {
            OutputMode::Json => {
                let json = serde_json::to_string_pretty(outcome)
                    .unwrap_or_else(|_| "{}".to_string());
                println!("{}", json);
            }
            OutputMode::Human | OutputMode::Plain => {
                for error in &outcome.copy_errors {
                    self.warning(error);
                }
                if outcome.success {
                    self.success(&outcome.message);
                    self.info(&format!(
                        "Copied {} files into {}",
                        outcome.copied_paths.len(),
                        outcome.destination_root.display()
                    ));
                } else {
                    self.error(&outcome.message);
                }
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": level,
            "message": message,
        }));
    }

    fn print_json_object(&self, value: &serde_json::Value) {
        println!("{}", value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_quiet_disables_colors_and_info() {
        let formatter = OutputFormatter::new(OutputMode::Human, 3, true);
        assert!(!formatter.use_colors);
        assert_eq!(formatter.verbose_level, 0);
    }

    #[test]
    fn test_outcome_serializes_to_json() {
        let outcome = ExtractionOutcome {
            success: true,
            message: "done".to_string(),
            copied_paths: vec![PathBuf::from("reference/a.md")],
            copy_errors: vec!["Error copying b.md: permission denied".to_string()],
            destination_root: PathBuf::from("reference"),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["copied_paths"][0], "reference/a.md");
        assert_eq!(
            json["copy_errors"][0],
            "Error copying b.md: permission denied"
        );
    }
}
