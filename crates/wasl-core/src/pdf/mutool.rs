//! Rasterization with MuPDF's `mutool draw`.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::{collect_page_images, run_tool, PageRasterizer, RenderedDocument, Result};
use crate::error::RasterError;

const BACKEND: &str = "mutool";

/// Renders pages with `mutool draw -r <dpi> -o page-%d.png`.
pub struct MutoolRasterizer {
    binary: PathBuf,
    dpi: u32,
}

impl MutoolRasterizer {
    pub fn new(binary: impl AsRef<Path>, dpi: u32) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
            dpi,
        }
    }

    /// Check if mutool is available on the system.
    pub fn is_available(&self) -> bool {
        super::tool_available(&self.binary, "-v")
    }
}

impl PageRasterizer for MutoolRasterizer {
    fn name(&self) -> &str {
        BACKEND
    }

    fn rasterize(&self, pdf: &Path) -> Result<RenderedDocument> {
        let workdir = tempfile::tempdir()?;

        run_tool(
            BACKEND,
            Command::new(&self.binary)
                .arg("draw")
                .arg("-q")
                .arg("-r")
                .arg(self.dpi.to_string())
                .arg("-o")
                .arg(workdir.path().join("page-%d.png"))
                .arg(pdf),
        )?;

        let pages = collect_page_images(workdir.path())?;
        if pages.is_empty() {
            return Err(RasterError::NoPages(BACKEND.to_string()));
        }

        debug!("{} rendered {} pages from {}", BACKEND, pages.len(), pdf.display());
        Ok(RenderedDocument::new(BACKEND, pages, Some(workdir)))
    }
}
