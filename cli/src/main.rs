//! unocr CLI - OCR block-graph extraction tool

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use unocr::analysis::{JsonResponseAnalyzer, TextAnalyzer, UnavailableAnalyzer};
use unocr::ocr::{parse_response_file, JsonResponseProvider};
use unocr::pipeline::{DirectoryStore, RecordStore};
use unocr::{DocumentProcessor, ExtractOptions, Extractor, JsonFormat, PipelineOptions, Status};

#[derive(Parser)]
#[command(name = "unocr")]
#[command(version)]
#[command(about = "Extract text, form fields, and tables from OCR responses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract from a saved OCR response
    Extract {
        /// OCR response file ({"Blocks": [...]})
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Skip table reconstruction
        #[arg(long)]
        no_tables: bool,

        /// Drop words and lines recognized below this confidence (0-100)
        #[arg(long, value_name = "N")]
        min_confidence: Option<f64>,
    },

    /// Run extraction and text analysis, storing one record per document
    Process {
        /// OCR response files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Captured text-analysis response to replay
        #[arg(long, value_name = "FILE")]
        analysis: Option<PathBuf>,

        /// Directory records are written to
        #[arg(short, long, value_name = "DIR", env = "UNOCR_OUTPUT_DIR", default_value = ".")]
        output: PathBuf,

        /// Process files one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show block statistics for an OCR response
    Info {
        /// OCR response file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// JSON extraction result
    Json,
    /// Plain text: full text, fields, tables
    Text,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            output,
            format,
            compact,
            no_tables,
            min_confidence,
        } => {
            let mut options = ExtractOptions::new().with_tables(!no_tables);
            if let Some(min) = min_confidence {
                options = options.with_min_confidence(min);
            }
            cmd_extract(&input, output.as_deref(), format, compact, options)
        }
        Commands::Process {
            inputs,
            analysis,
            output,
            sequential,
        } => cmd_process(&inputs, analysis.as_deref(), &output, sequential),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    compact: bool,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = unocr::extract_file_with_options(input, options)?;

    let content = match format {
        OutputFormat::Json => {
            let json_format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            unocr::render::to_json(&result, json_format)?
        }
        OutputFormat::Text => unocr::render::to_text(&result),
    };

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn cmd_process(
    inputs: &[PathBuf],
    analysis: Option<&Path>,
    output: &Path,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer: Arc<dyn TextAnalyzer> = match analysis {
        Some(path) => Arc::new(JsonResponseAnalyzer::from_file(path)?),
        None => Arc::new(UnavailableAnalyzer),
    };

    let mut options = PipelineOptions::new();
    if sequential {
        options = options.sequential();
    }

    // Inputs are paths as typed; an empty root leaves them untouched
    let ocr = Arc::new(JsonResponseProvider::new(""));
    let processor = DocumentProcessor::with_options(ocr, analyzer, options);
    let store = DirectoryStore::new(output);

    let documents: Vec<String> = inputs
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();

    let records = processor.process_batch(documents.as_slice());

    let mut succeeded = 0;
    let mut failures = 0;
    let mut unstored = 0;
    for record in &records {
        let key = record.result_key();
        if let Err(e) = store.put(&key, record) {
            eprintln!("{} {}: {}", "not stored".red(), record.document_name, e);
            unstored += 1;
            continue;
        }

        if record.status.is_success() {
            succeeded += 1;
        }
        let label = match record.status {
            Status::Success => "success".green(),
            Status::Partial => "partial".yellow(),
            Status::Failed => "failed".red(),
        };
        println!(
            "{} {} {} {}",
            label,
            record.document_name,
            "→".dimmed(),
            store.root().join(&key).display()
        );
        if let Some(ref error) = record.extraction.error {
            println!("  {} {}", "extraction:".dimmed(), error);
            failures += 1;
        }
        if let Some(ref error) = record.analysis.error {
            println!("  {} {}", "analysis:".dimmed(), error);
        }
    }

    println!(
        "\n{} {} documents processed, {} succeeded, {} extraction failures",
        "Done!".green().bold(),
        records.len(),
        succeeded,
        failures
    );

    if unstored > 0 {
        return Err(format!("{} of {} records could not be stored", unstored, records.len()).into());
    }
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let blocks = parse_response_file(input)?;
    let result = Extractor::new().extract(&blocks);

    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    for block in &blocks {
        *by_type.entry(block.block_type.to_string()).or_default() += 1;
    }

    println!("{}", "Response Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Blocks".bold(), blocks.len());
    println!("{}: {}", "Pages".bold(), result.page_count);
    println!("{}: {:.2}", "Confidence".bold(), result.extraction_confidence);

    println!();
    println!("{}", "Block Types".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (block_type, count) in &by_type {
        println!("{}: {}", block_type.bold(), count);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Words".bold(), result.word_count());
    println!("{}: {}", "Fields".bold(), result.key_value_pairs.len());
    println!("{}: {}", "Tables".bold(), result.tables.len());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unocr".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("OCR block-graph extraction tool");
    println!();
    println!("License: MIT");
}
