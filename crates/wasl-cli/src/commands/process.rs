//! Process command - records for a single invoice file.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::ProgressBar;
use tracing::{debug, info};

use wasl_core::{PageRecord, Pipeline};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    Pipeline::check_collaborators(&config)?;
    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_message("Running OCR...");
    pb.enable_steady_tick(std::time::Duration::from_millis(120));

    let pipeline = Pipeline::from_config(&config);
    let input = args.input.clone();
    let records = tokio::task::spawn_blocking(move || pipeline.process_document(&input)).await?;

    pb.finish_and_clear();

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&records)?,
        OutputFormat::Text => format_text(&records),
    };
    println!("{}", output);

    let with_phone = records.iter().filter(|r| r.has_phone()).count();
    println!(
        "{} {} pages, {} with a customer phone",
        style("ℹ").blue(),
        records.len(),
        with_phone
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_text(records: &[PageRecord]) -> String {
    let mut output = String::new();

    for record in records {
        output.push_str(&format!(
            "{} page {}\n",
            record.file_name,
            record.page.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string())
        ));
        output.push_str(&format!("  Name:  {}\n", record.display_name()));
        output.push_str(&format!("  Phone: {}\n", record.display_phone()));
        if !record.link.is_empty() {
            output.push_str(&format!("  Link:  {}\n", record.link));
        }
    }

    output
}
