//! Batch command - normalize multiple analysis files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use bites_core::{ExpenseNormalizer, ParsedDocument};

use super::normalize::{format_document, load_document, OutputFormat};
use super::{format_timestamp, load_config, resolve_normalization};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Preset to use instead of the configured one
    #[arg(short, long)]
    preset: Option<String>,

    /// Minimum field confidence (0.0 - 1.0)
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Inputs are already mapped raw documents
    #[arg(long)]
    raw: bool,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of normalizing a single file.
struct FileResult {
    path: PathBuf,
    document: Option<ParsedDocument>,
    error: Option<String>,
    processing_time_ms: u64,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    filename: &'a str,
    status: &'a str,
    vendor_name: &'a str,
    transaction_date: String,
    total_amount: Option<f64>,
    line_items: Option<usize>,
    issues: String,
    processing_time_ms: u64,
    error: &'a str,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let file_config = load_config(config_path)?;
    let config = resolve_normalization(&file_config, args.preset.as_deref(), args.min_confidence)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("json")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let normalizer = ExpenseNormalizer::new(config);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = load_document(&path, args.raw).map(|doc| normalizer.normalize(&doc));
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(document) => results.push(FileResult {
                path,
                document: Some(document),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        document: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    pb.abandon();
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.document.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(document) = &result.document {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("document");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                let content = format_document(document, args.format, file_config.output.pretty)?;
                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let row = match &result.document {
            Some(document) => SummaryRow {
                filename,
                status: "success",
                vendor_name: document.vendor_name.as_deref().unwrap_or_default(),
                transaction_date: document
                    .transaction_date
                    .as_ref()
                    .map(format_timestamp)
                    .unwrap_or_default(),
                total_amount: document.total_amount,
                line_items: Some(document.line_items.len()),
                issues: document.issues().join("; "),
                processing_time_ms: result.processing_time_ms,
                error: "",
            },
            None => SummaryRow {
                filename,
                status: "error",
                vendor_name: "",
                transaction_date: String::new(),
                total_amount: None,
                line_items: None,
                issues: String::new(),
                processing_time_ms: result.processing_time_ms,
                error: result.error.as_deref().unwrap_or(""),
            },
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        let results = vec![
            FileResult {
                path: PathBuf::from("in/ticket.json"),
                document: Some(ParsedDocument {
                    vendor_name: Some("Tienda Sol".to_string()),
                    transaction_date: "2024-03-15T00:00:00+00:00".parse().ok(),
                    total_amount: Some(12.5),
                    ..Default::default()
                }),
                error: None,
                processing_time_ms: 3,
            },
            FileResult {
                path: PathBuf::from("in/broken.json"),
                document: None,
                error: Some("expected value".to_string()),
                processing_time_ms: 1,
            },
        ];

        write_summary(&path, &results).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(
            lines[0],
            "filename,status,vendor_name,transaction_date,total_amount,line_items,issues,processing_time_ms,error"
        );
        assert_eq!(
            lines[1],
            "ticket.json,success,Tienda Sol,2024-03-15T00:00:00Z,12.5,0,No line items,3,"
        );
        assert_eq!(lines[2], "broken.json,error,,,,,,1,expected value");
    }
}
