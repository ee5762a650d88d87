use clap::Parser;
use docsgrab::{
    Cli, ExtractionEngine, GrabError, OutputFormat, OutputFormatter, OutputMode, PipelineProgress,
};
use std::process;
use tokio::task;

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    let cli = Cli::parse();

    let output_mode = match cli.output_format {
        OutputFormat::Human => OutputMode::Human,
        OutputFormat::Json => OutputMode::Json,
        OutputFormat::Plain => OutputMode::Plain,
    };
    let formatter = OutputFormatter::new(output_mode, cli.verbosity_level(), cli.quiet);

    let settings = match cli.load_settings() {
        Ok(settings) => settings,
        Err(error) => {
            formatter.print_user_friendly_error(&error);
            return exit_code_for(&error);
        }
    };

    let filter_mode = cli.resolve_filter_mode(&settings);
    let target = match cli.resolve_target(&settings) {
        Ok(target) => target,
        Err(error) => {
            formatter.print_user_friendly_error(&error);
            return exit_code_for(&error);
        }
    };

    formatter.info(&format!("Filter mode: {}", filter_mode.description()));
    formatter.info(&format!("Target path: {}", target.display()));

    let progress = PipelineProgress::new(!cli.quiet && output_mode == OutputMode::Human);
    let percent_bar = progress.bar();
    let status_bar = progress.bar();

    let engine = ExtractionEngine::new(filter_mode)
        .with_progress(move |percent| percent_bar.set_position(percent as u64))
        .with_status(move |status| status_bar.set_message(status.to_string()));

    // The pipeline itself is synchronous; run it off the async runtime's
    // worker threads so the progress bar stays responsive.
    let url = cli.repository_url.clone();
    let result = task::spawn_blocking(move || engine.try_extract(&url, &target)).await;

    let result = match result {
        Ok(result) => result,
        Err(join_error) => {
            progress.abandon();
            formatter.error(&format!("Extraction task failed: {}", join_error));
            return 1;
        }
    };

    match result {
        Ok(outcome) => {
            progress.finish(&outcome.message);
            formatter.print_outcome(&outcome);
            0
        }
        Err(error) => {
            progress.abandon();
            formatter.print_user_friendly_error(&error);
            exit_code_for(&error)
        }
    }
}

fn exit_code_for(error: &GrabError) -> i32 {
    match error {
        GrabError::InvalidUrlFormat { .. } => 2,
        GrabError::SubpathNotFound { .. } => 3,
        GrabError::CloneFailed { .. } => 4,
        GrabError::ManifestWrite { .. } => 5,
        GrabError::Config { .. } => 6,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(
            exit_code_for(&GrabError::InvalidUrlFormat {
                url: "x".to_string()
            }),
            2
        );
        assert_eq!(
            exit_code_for(&GrabError::SubpathNotFound {
                subpath: "docs".to_string()
            }),
            3
        );
        assert_eq!(
            exit_code_for(&GrabError::CloneFailed {
                detail: "x".to_string()
            }),
            4
        );
        assert_eq!(
            exit_code_for(&GrabError::Unexpected {
                message: "x".to_string()
            }),
            1
        );
    }
}
