//! Batch command: every invoice in a folder into one links dataset.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::{stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use wasl_core::pipeline::display_file_name;
use wasl_core::{
    assemble_dataset, find_documents, open_with_default_app, write_dataset, ExportFormat, Pipeline,
};

use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Folder with invoice PDFs (default: input.folder from config)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (default: output.path from config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: output.format from config)
    #[arg(short, long, value_enum)]
    format: Option<DatasetFormat>,

    /// Number of documents processed in parallel
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Do not open the output file when done
    #[arg(long)]
    no_open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum DatasetFormat {
    /// CSV with a UTF-8 byte order mark
    Csv,
    /// JSON with counts and records
    Json,
}

impl From<DatasetFormat> for ExportFormat {
    fn from(format: DatasetFormat) -> Self {
        match format {
            DatasetFormat::Csv => ExportFormat::Csv,
            DatasetFormat::Json => ExportFormat::Json,
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(input) = args.input {
        config.input.folder = input;
    }
    if let Some(output) = args.output {
        config.output.path = output;
    }
    if let Some(format) = args.format {
        config.output.format = format.into();
    }

    let documents = find_documents(&config.input)?;
    if documents.is_empty() {
        println!(
            "{} No results: no .{} files in {}",
            style("ℹ").blue(),
            config.input.extension,
            config.input.folder.display()
        );
        return Ok(());
    }

    Pipeline::check_collaborators(&config)?;

    println!(
        "{} Found {} invoices to process",
        style("ℹ").blue(),
        documents.len()
    );

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Documents run on blocking threads; `buffered` keeps the results in
    // enumeration order, which decides which duplicate phone survives.
    let pipeline = Arc::new(Pipeline::from_config(&config));
    let mut results = stream::iter(documents)
        .map(|path| {
            let pipeline = Arc::clone(&pipeline);
            tokio::task::spawn_blocking(move || {
                let records = pipeline.process_document(&path);
                (path, records)
            })
        })
        .buffered(args.jobs.max(1));

    let mut per_document = Vec::new();
    while let Some(joined) = results.next().await {
        let (path, records) = joined?;
        debug!("{}: {} records", path.display(), records.len());
        pb.set_message(display_file_name(&path));
        pb.inc(1);
        per_document.push(records);
    }
    pb.finish_and_clear();

    let dataset = assemble_dataset(per_document);
    write_dataset(&dataset, &config.output.path, config.output.format)?;

    println!(
        "{} Wrote {} rows to {} in {:.1?}",
        style("✓").green(),
        dataset.len(),
        config.output.path.display(),
        start.elapsed()
    );
    println!(
        "   {} with phone, {} without phone, {} duplicates dropped",
        style(dataset.stats.with_phone).green(),
        style(dataset.stats.without_phone).yellow(),
        dataset.stats.duplicates_dropped
    );

    if config.output.open_after_write && !args.no_open {
        open_with_default_app(&config.output.path);
    }

    Ok(())
}
