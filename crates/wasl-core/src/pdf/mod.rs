//! PDF rasterization: a PDF path in, ordered page images out.
//!
//! Backends are tried in order by [`FallbackRasterizer`]; a document that no
//! backend can open is reported as a single [`RasterError`] and contributes no
//! pages.

mod embedded;
mod fallback;
mod mutool;
mod poppler;

pub use embedded::EmbeddedImageRasterizer;
pub use fallback::FallbackRasterizer;
pub use mutool::MutoolRasterizer;
pub use poppler::PdftoppmRasterizer;

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::trace;

use crate::error::RasterError;
use crate::models::config::{PdfConfig, RasterBackend};

/// Result type for rasterization.
pub type Result<T> = std::result::Result<T, RasterError>;

/// One rendered page on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// Page number (1-indexed).
    pub number: u32,
    /// PNG file holding the page.
    pub path: PathBuf,
}

/// Page images of one document.
///
/// Owns the temporary directory the images live in; it is removed on drop.
#[derive(Debug)]
pub struct RenderedDocument {
    backend: String,
    pages: Vec<PageImage>,
    _workdir: Option<TempDir>,
}

impl RenderedDocument {
    pub fn new(backend: impl Into<String>, pages: Vec<PageImage>, workdir: Option<TempDir>) -> Self {
        Self {
            backend: backend.into(),
            pages,
            _workdir: workdir,
        }
    }

    /// Pages ordered by page number.
    pub fn pages(&self) -> &[PageImage] {
        &self.pages
    }

    /// Name of the backend that produced the pages.
    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Trait for PDF-to-image backends.
pub trait PageRasterizer: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Render every page of the document.
    fn rasterize(&self, pdf: &Path) -> Result<RenderedDocument>;
}

/// Build the configured backend chain.
pub fn rasterizer_from_config(config: &PdfConfig) -> FallbackRasterizer {
    let backends: Vec<Box<dyn PageRasterizer>> = config
        .backends
        .iter()
        .map(|backend| -> Box<dyn PageRasterizer> {
            match backend {
                RasterBackend::Pdftoppm => Box::new(PdftoppmRasterizer::new(
                    &config.pdftoppm_path,
                    config.render_dpi,
                )),
                RasterBackend::Mutool => {
                    Box::new(MutoolRasterizer::new(&config.mutool_path, config.render_dpi))
                }
                RasterBackend::Embedded => Box::new(EmbeddedImageRasterizer::new()),
            }
        })
        .collect();

    FallbackRasterizer::new(backends)
}

/// Check whether an external tool can be started.
///
/// Some tools print their version to stderr and exit non-zero, so any output counts.
pub fn tool_available(binary: &Path, version_arg: &str) -> bool {
    Command::new(binary)
        .arg(version_arg)
        .output()
        .map(|o| o.status.success() || !o.stderr.is_empty() || !o.stdout.is_empty())
        .unwrap_or(false)
}

/// Run an external rasterizer to completion.
fn run_tool(backend: &str, command: &mut Command) -> Result<()> {
    trace!("Running {:?}", command);

    let output = command.output().map_err(|e| RasterError::Spawn {
        backend: backend.to_string(),
        reason: e.to_string(),
    })?;

    if !output.status.success() {
        return Err(RasterError::Failed {
            backend: backend.to_string(),
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

/// Collect `<prefix>-<n>.png` files written by a rasterizer, ordered by `n`.
fn collect_page_images(dir: &Path) -> Result<Vec<PageImage>> {
    let mut pages = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if !is_png {
            continue;
        }

        let number = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.rsplit('-').next())
            .and_then(|n| n.parse::<u32>().ok());

        if let Some(number) = number {
            pages.push(PageImage { number, path });
        }
    }

    pages.sort_by_key(|p| p.number);
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collect_page_images_orders_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page-10.png", "page-2.png", "page-01.png", "notes.txt", "cover.png"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let pages = collect_page_images(dir.path()).unwrap();
        let numbers: Vec<u32> = pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
    }

    #[test]
    fn test_rasterizer_from_config_keeps_order() {
        let config = PdfConfig {
            backends: vec![RasterBackend::Embedded, RasterBackend::Pdftoppm],
            ..PdfConfig::default()
        };
        let chain = rasterizer_from_config(&config);
        assert_eq!(chain.backend_names(), vec!["embedded", "pdftoppm"]);
    }

    #[test]
    fn test_missing_tool_is_unavailable() {
        assert!(!tool_available(Path::new("/nonexistent/wasl-tool"), "--version"));
    }
}
