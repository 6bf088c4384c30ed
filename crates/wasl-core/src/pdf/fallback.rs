//! Ordered chain of rasterization backends.

use std::path::Path;

use tracing::debug;

use super::{PageRasterizer, RenderedDocument, Result};
use crate::error::RasterError;

/// Tries each backend in turn and returns the first non-empty rendering.
pub struct FallbackRasterizer {
    backends: Vec<Box<dyn PageRasterizer>>,
}

impl FallbackRasterizer {
    pub fn new(backends: Vec<Box<dyn PageRasterizer>>) -> Self {
        Self { backends }
    }

    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }
}

impl PageRasterizer for FallbackRasterizer {
    fn name(&self) -> &str {
        "fallback"
    }

    fn rasterize(&self, pdf: &Path) -> Result<RenderedDocument> {
        let mut failures = Vec::with_capacity(self.backends.len());

        for backend in &self.backends {
            match backend.rasterize(pdf) {
                Ok(doc) if !doc.is_empty() => return Ok(doc),
                Ok(_) => {
                    debug!("{} produced no pages for {}", backend.name(), pdf.display());
                    failures.push(format!("{}: no pages", backend.name()));
                }
                Err(e) => {
                    debug!("{} failed on {}: {}", backend.name(), pdf.display(), e);
                    failures.push(format!("{}: {}", backend.name(), e));
                }
            }
        }

        Err(RasterError::AllBackendsFailed(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::PageImage;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    struct Fixed {
        name: &'static str,
        pages: Option<u32>,
    }

    impl PageRasterizer for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn rasterize(&self, _pdf: &Path) -> Result<RenderedDocument> {
            match self.pages {
                Some(n) => Ok(RenderedDocument::new(
                    self.name,
                    (1..=n)
                        .map(|number| PageImage {
                            number,
                            path: PathBuf::from(format!("{number}.png")),
                        })
                        .collect(),
                    None,
                )),
                None => Err(RasterError::Parse("broken".to_string())),
            }
        }
    }

    #[test]
    fn test_first_success_wins() {
        let chain = FallbackRasterizer::new(vec![
            Box::new(Fixed { name: "a", pages: None }),
            Box::new(Fixed { name: "b", pages: Some(0) }),
            Box::new(Fixed { name: "c", pages: Some(2) }),
            Box::new(Fixed { name: "d", pages: Some(5) }),
        ]);

        let doc = chain.rasterize(Path::new("x.pdf")).unwrap();
        assert_eq!(doc.backend(), "c");
        assert_eq!(doc.pages().len(), 2);
    }

    #[test]
    fn test_all_failures_reported() {
        let chain = FallbackRasterizer::new(vec![
            Box::new(Fixed { name: "a", pages: None }),
            Box::new(Fixed { name: "b", pages: Some(0) }),
        ]);

        match chain.rasterize(Path::new("x.pdf")) {
            Err(RasterError::AllBackendsFailed(causes)) => {
                assert_eq!(causes.len(), 2);
                assert!(causes[0].starts_with("a: "));
                assert_eq!(causes[1], "b: no pages");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_chain_fails() {
        let chain = FallbackRasterizer::new(Vec::new());
        assert!(chain.rasterize(Path::new("x.pdf")).is_err());
    }
}
