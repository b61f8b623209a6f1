//! Convert command - turn a single statement into a table.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use stmtx_core::export::{download_filename, XlsxExporter};
use stmtx_core::models::config::StmtxConfig;
use stmtx_core::models::statement::{ConversionResult, NoticeLevel, StatementFormat, StatementTable};
use stmtx_core::pdf::{PdfExtractor, PdfProcessor, PdfType};
use stmtx_core::source::{MemorySource, PageSource};

use super::load_config;

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input statement (PDF, or plain text with form-feed page breaks)
    #[arg(required = true)]
    input: PathBuf,

    /// Statement layout (default: from config)
    #[arg(short, long, value_enum)]
    bank: Option<BankArg>,

    /// Output file or directory (default: stdout, or the export directory for xlsx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "xlsx")]
    format: OutputFormat,

    /// Name used in the spreadsheet filename (default: the bank name)
    #[arg(long)]
    source_id: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum BankArg {
    /// HDFC Bank line layout
    Hdfc,
    /// Any other bank with tabular statements (ICICI, Axis, ...)
    Generic,
}

impl From<BankArg> for StatementFormat {
    fn from(bank: BankArg) -> Self {
        match bank {
            BankArg::Hdfc => StatementFormat::Hdfc,
            BankArg::Generic => StatementFormat::Generic,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Excel workbook
    Xlsx,
    /// CSV output
    Csv,
    /// JSON records
    Json,
    /// Plain text preview
    Text,
}

pub async fn run(args: ConvertArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let format = args
        .bank
        .map(StatementFormat::from)
        .unwrap_or(config.statement.default_format);
    info!("Converting {} as {} statement", args.input.display(), format);

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Loading statement...");
    pb.set_position(10);
    let source = open_source(&args.input, &config)?;

    pb.set_message("Parsing transactions...");
    pb.set_position(40);
    let result = stmtx_core::convert(source.as_ref(), format, &config);

    pb.set_position(100);
    pb.finish_and_clear();

    print_notices(&result);

    match args.format {
        OutputFormat::Xlsx => {
            let source_id = args
                .source_id
                .clone()
                .unwrap_or_else(|| format.display_name().to_string());
            let path = xlsx_path(args.output.as_deref(), &config, &source_id);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }

            XlsxExporter::from_config(&config.export).write_to(&result.table, &path)?;
            eprintln!(
                "{} {} statement processed successfully!",
                style("✓").green(),
                format.display_name()
            );
            println!(
                "{} {} rows written to {}",
                style("✓").green(),
                result.table.len(),
                path.display()
            );
        }
        other => {
            let output = render(&result.table, other)?;
            if let Some(output_path) = &args.output {
                fs::write(output_path, &output)?;
                println!(
                    "{} Output written to {}",
                    style("✓").green(),
                    output_path.display()
                );
            } else {
                print!("{}", output);
            }
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Open a statement file as a page source.
///
/// PDFs must carry a text layer; `.txt` files are split into pages on form
/// feeds.
pub fn open_source(path: &Path, config: &StmtxConfig) -> anyhow::Result<Box<dyn PageSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let mut extractor = PdfExtractor::new()
                .with_grid_detector(config.statement.grid_detector())
                .with_min_text_length(config.pdf.min_text_length);
            extractor.load(&data)?;

            debug!("PDF has {} pages", PdfProcessor::page_count(&extractor));
            match extractor.analyze() {
                PdfType::Text => Ok(Box::new(extractor)),
                PdfType::Image => anyhow::bail!(
                    "PDF has no text layer ({} characters). Scanned statements are not supported.",
                    extractor.text_len()
                ),
                PdfType::Empty => anyhow::bail!("PDF appears to be empty"),
            }
        }
        "txt" => {
            let text = fs::read_to_string(path)?;
            Ok(Box::new(
                MemorySource::from_text(&text).with_grid_detector(config.statement.grid_detector()),
            ))
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// Where the workbook goes: an explicit file, a directory that receives the
/// download filename, or the configured export directory.
fn xlsx_path(output: Option<&Path>, config: &StmtxConfig, source_id: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(download_filename(source_id)),
        Some(path) => path.to_path_buf(),
        None => config.output_dir().join(download_filename(source_id)),
    }
}

fn print_notices(result: &ConversionResult) {
    for notice in &result.notices {
        match notice.level {
            NoticeLevel::Warning => eprintln!("{} {}", style("⚠").yellow(), notice),
            NoticeLevel::Info => eprintln!("{} {}", style("ℹ").blue(), notice),
        }
    }
}

fn render(table: &StatementTable, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&table.to_records())? + "\n"),
        OutputFormat::Csv => format_csv(table),
        OutputFormat::Text | OutputFormat::Xlsx => Ok(format_text(table)),
    }
}

fn format_csv(table: &StatementTable) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(&table.header)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(table: &StatementTable) -> String {
    let mut widths: Vec<usize> = table.header.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (cell, width) in row.iter().zip(widths.iter_mut()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut output = String::new();
    output.push_str(&line(&table.header));
    output.push('\n');
    output.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    output.push('\n');
    for row in &table.rows {
        output.push_str(&line(row));
        output.push('\n');
    }
    output.push_str(&format!("\n{} rows\n", table.len()));

    output
}
