//! Normalize command - turn one analysis file into a structured bill.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use bites_core::{
    AnalyzeExpenseOutput, ExpenseNormalizer, ParsedDocument, ParsedLineItem, RawOcrDocument,
};

use super::{format_timestamp, load_config, resolve_normalization};

/// Arguments for the normalize command.
#[derive(Args)]
pub struct NormalizeArgs {
    /// Input file (AnalyzeExpense JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Preset to use instead of the configured one
    #[arg(short, long)]
    preset: Option<String>,

    /// Minimum field confidence (0.0 - 1.0)
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Input is an already mapped raw document instead of an AnalyzeExpense response
    #[arg(long)]
    raw: bool,

    /// Report missing fields and total mismatches
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line item
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: NormalizeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let file_config = load_config(config_path)?;
    let config = resolve_normalization(&file_config, args.preset.as_deref(), args.min_confidence)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Normalizing file: {}", args.input.display());

    let document = load_document(&args.input, args.raw)?;
    let parsed = ExpenseNormalizer::new(config).normalize(&document);

    if args.validate {
        let issues = parsed.issues();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_document(&parsed, args.format, file_config.output.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read an input file as a raw document or an AnalyzeExpense response.
pub fn load_document(path: &Path, raw: bool) -> anyhow::Result<RawOcrDocument> {
    let content = fs::read_to_string(path)?;

    let document = if raw {
        serde_json::from_str(&content)?
    } else {
        AnalyzeExpenseOutput::from_json(&content)?.to_document()
    };

    debug!(
        "Loaded {} summary fields and {} line items from {}",
        document.summary_fields.len(),
        document.line_item_count(),
        path.display()
    );

    Ok(document)
}

pub fn format_document(
    document: &ParsedDocument,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(document)?),
        OutputFormat::Json => Ok(serde_json::to_string(document)?),
        OutputFormat::Csv => format_csv(document),
        OutputFormat::Text => Ok(format_text(document)),
    }
}

#[derive(Serialize)]
struct ItemRow<'a> {
    vendor_name: &'a str,
    transaction_date: String,
    total_amount: Option<f64>,
    description: &'a str,
    quantity: Option<f64>,
    unit_price: Option<f64>,
    total_price: Option<f64>,
}

fn item_row<'a>(document: &'a ParsedDocument, item: Option<&'a ParsedLineItem>) -> ItemRow<'a> {
    ItemRow {
        vendor_name: document.vendor_name.as_deref().unwrap_or_default(),
        transaction_date: document
            .transaction_date
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_default(),
        total_amount: document.total_amount,
        description: item.map(|i| i.description.as_str()).unwrap_or_default(),
        quantity: item.and_then(|i| i.quantity),
        unit_price: item.and_then(|i| i.unit_price),
        total_price: item.and_then(|i| i.total_price),
    }
}

fn format_csv(document: &ParsedDocument) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    if document.line_items.is_empty() {
        wtr.serialize(item_row(document, None))?;
    }
    for item in &document.line_items {
        wtr.serialize(item_row(document, Some(item)))?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(document: &ParsedDocument) -> String {
    let mut output = String::new();

    let unknown = || "-".to_string();

    output.push_str(&format!(
        "Vendor: {}\n",
        document.vendor_name.clone().unwrap_or_else(unknown)
    ));
    output.push_str(&format!(
        "Date: {}\n",
        document
            .transaction_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(unknown)
    ));
    output.push_str(&format!(
        "Total: {}\n",
        document
            .total_amount
            .map(|t| format!("{:.2}", t))
            .unwrap_or_else(unknown)
    ));

    if !document.line_items.is_empty() {
        output.push_str("\nItems:\n");
        for item in &document.line_items {
            output.push_str(&format!("  {}", item.description));
            if let Some(quantity) = item.quantity {
                output.push_str(&format!("  x{}", quantity));
            }
            if let Some(price) = item.unit_price {
                output.push_str(&format!("  @ {:.2}", price));
            }
            if let Some(total) = item.total_price {
                output.push_str(&format!("  = {:.2}", total));
            }
            output.push('\n');
        }
    }

    output
}
