//! Per-document processing: rasterize, recognize each page, assemble records.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Result, WaslError};
use crate::extraction::extract_customer;
use crate::link::LinkBuilder;
use crate::models::config::{OcrConfig, WaslConfig};
use crate::models::record::{ExclusionSet, OutputDataset, PageRecord, UNKNOWN_NAME};
use crate::ocr::{recognize_page, OcrEngine, TesseractEngine};
use crate::pdf::{rasterizer_from_config, PageRasterizer};

/// Turns the OCR text of one page into a [`PageRecord`].
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    exclusion: ExclusionSet,
    links: LinkBuilder,
}

impl RecordAssembler {
    pub fn new(exclusion: ExclusionSet, links: LinkBuilder) -> Self {
        Self { exclusion, links }
    }

    pub fn from_config(config: &WaslConfig) -> Self {
        Self::new(
            ExclusionSet::new(&config.exclusion.business_numbers),
            LinkBuilder::from_config(&config.messaging),
        )
    }

    /// Build the record for one page.
    ///
    /// The name is looked up around the phone before the business-number
    /// check, so an excluded number still anchors the name search.
    pub fn assemble(&self, file_name: &str, page: u32, raw_text: &str) -> PageRecord {
        let found = extract_customer(raw_text);

        let phone = found.phone().filter(|p| {
            let excluded = self.exclusion.contains(p);
            if excluded {
                debug!("Dropping business number {} on {} page {}", p, file_name, page);
            }
            !excluded
        });
        let name = found.name();

        let link = self.links.build(name.unwrap_or(UNKNOWN_NAME), phone);

        PageRecord {
            file_name: file_name.to_string(),
            page: Some(page),
            name: name.map(str::to_string),
            phone: phone.map(str::to_string),
            link,
        }
    }
}

/// Processes invoice documents into page records.
pub struct Pipeline {
    rasterizer: Box<dyn PageRasterizer>,
    ocr: Box<dyn OcrEngine>,
    ocr_config: OcrConfig,
    assembler: RecordAssembler,
}

impl Pipeline {
    pub fn new(
        rasterizer: Box<dyn PageRasterizer>,
        ocr: Box<dyn OcrEngine>,
        ocr_config: OcrConfig,
        assembler: RecordAssembler,
    ) -> Self {
        Self {
            rasterizer,
            ocr,
            ocr_config,
            assembler,
        }
    }

    /// Build a pipeline with the configured rasterizer chain and Tesseract.
    pub fn from_config(config: &WaslConfig) -> Self {
        let rasterizer = rasterizer_from_config(&config.pdf);
        debug!("Rasterizer chain: {}", rasterizer.backend_names().join(" -> "));

        Self::new(
            Box::new(rasterizer),
            Box::new(TesseractEngine::new(&config.ocr.tesseract_path)),
            config.ocr.clone(),
            RecordAssembler::from_config(config),
        )
    }

    /// Fail early when a collaborator the whole run depends on is missing.
    pub fn check_collaborators(config: &WaslConfig) -> Result<()> {
        if config.pdf.backends.is_empty() {
            return Err(WaslError::Config(
                "pdf.backends must list at least one rasterizer".to_string(),
            ));
        }

        if !TesseractEngine::new(&config.ocr.tesseract_path).is_available() {
            return Err(WaslError::CollaboratorUnavailable {
                tool: "tesseract",
                path: config.ocr.tesseract_path.display().to_string(),
                hint: "Install Tesseract OCR with Arabic language data \
                       (e.g. apt install tesseract-ocr tesseract-ocr-ara) \
                       or set ocr.tesseract_path.",
            });
        }

        Ok(())
    }

    /// Process one document, never failing.
    ///
    /// A document that cannot be opened, or that has no pages, yields a
    /// single placeholder record.
    pub fn process_document(&self, path: &Path) -> Vec<PageRecord> {
        let file_name = display_file_name(path);

        let rendered = match self.rasterizer.rasterize(path) {
            Ok(rendered) => rendered,
            Err(e) => {
                warn!("Could not open {}: {}", path.display(), e);
                return vec![PageRecord::placeholder(file_name)];
            }
        };

        debug!(
            "{} rendered {} pages of {}",
            rendered.backend(),
            rendered.pages().len(),
            file_name
        );

        let records: Vec<PageRecord> = rendered
            .pages()
            .iter()
            .map(|page| {
                let text = recognize_page(self.ocr.as_ref(), &page.path, &self.ocr_config);
                self.assembler.assemble(&file_name, page.number, &text)
            })
            .collect();

        if records.is_empty() {
            return vec![PageRecord::placeholder(file_name)];
        }
        records
    }
}

/// Build the dataset from per-document records given in enumeration order.
///
/// Whether documents ran one after another or in parallel, callers hand
/// their records over here in input order so dedup keeps the same rows.
pub fn assemble_dataset<I>(per_document: I) -> OutputDataset
where
    I: IntoIterator<Item = Vec<PageRecord>>,
{
    let mut documents = 0usize;
    let records: Vec<PageRecord> = per_document
        .into_iter()
        .inspect(|_| documents += 1)
        .flatten()
        .collect();

    let dataset = OutputDataset::from_records(records);
    info!(
        "Processed {} documents into {} records",
        documents,
        dataset.len()
    );
    dataset
}

/// File name without directories, as shown in the dataset.
pub fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
