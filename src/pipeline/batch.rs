//! Sequential analysis of a batch of images.

use crate::config::OutputFormat;
use crate::enrichment::{ArticleSource, EnrichmentResolver};
use crate::error::{Error, Result};
use crate::output::json::{ErrorPayload, EventType, write_event};
use crate::output::{progress, text};
use crate::pipeline::analyze_image;
use crate::resources::Resources;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Options controlling a batch run.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Report format written to the sink.
    pub format: OutputFormat,
    /// Stop at the first unreadable image.
    pub fail_fast: bool,
    /// Show a spinner per image.
    pub progress: bool,
}

/// Analyze `files` in order, writing one report per image to `out`.
///
/// Unreadable images are logged and counted; in JSON mode an `error` event
/// is written in their place. Any other failure aborts the batch. Returns
/// the number of analyzed images, or [`Error::AnalysisFailed`] if any image
/// could not be analyzed.
pub async fn analyze_batch<W: Write, S: ArticleSource + Sync>(
    files: &[PathBuf],
    resources: &Resources,
    resolver: &EnrichmentResolver<'_, S>,
    options: BatchOptions,
    out: &mut W,
) -> Result<usize> {
    let mut analyzed = 0;
    let mut failed = 0;

    for file in files {
        let name = file.file_name().map_or_else(
            || file.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        );
        let spinner = progress::create_analysis_spinner(&name, options.progress);
        let result = analyze_image(file, resources, resolver).await;
        progress::finish_spinner(spinner);

        match result {
            Ok(report) => {
                match options.format {
                    OutputFormat::Text => {
                        if analyzed > 0 {
                            writeln!(out)?;
                        }
                        text::write_analysis(out, &report)?;
                    }
                    OutputFormat::Json => write_event(out, EventType::Result, &report)?,
                }
                analyzed += 1;
            }
            Err(e) if e.is_input_failure() => {
                error!("Failed to analyze {}: {}", file.display(), e);
                failed += 1;
                if options.format == OutputFormat::Json {
                    write_event(
                        out,
                        EventType::Error,
                        ErrorPayload {
                            file: file.display().to_string(),
                            message: error_chain(&e),
                        },
                    )?;
                }
                if options.fail_fast {
                    out.flush()?;
                    return Err(e);
                }
            }
            Err(e) => return Err(e),
        }
    }
    out.flush()?;

    info!("{} analyzed, {} failed", analyzed, failed);

    if failed > 0 {
        warn!("{} image(s) could not be analyzed", failed);
        return Err(Error::AnalysisFailed {
            failed,
            total: files.len(),
        });
    }

    Ok(analyzed)
}

/// Error message including its sources.
fn error_chain(e: &Error) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
