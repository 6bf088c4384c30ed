//! In-process page images taken from the scans embedded in a PDF, using lopdf.

use std::path::Path;

use image::{DynamicImage, GenericImageView, GrayImage, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use super::{PageImage, PageRasterizer, RenderedDocument, Result};
use crate::error::RasterError;

const BACKEND: &str = "embedded";

/// Extracts the largest embedded image of each page.
///
/// Scanned invoices are usually one full-page image per page, so this needs no
/// external tools. Pages without a decodable image are skipped.
pub struct EmbeddedImageRasterizer;

impl EmbeddedImageRasterizer {
    pub fn new() -> Self {
        EmbeddedImageRasterizer
    }
}

impl Default for EmbeddedImageRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRasterizer for EmbeddedImageRasterizer {
    fn name(&self) -> &str {
        BACKEND
    }

    fn rasterize(&self, pdf: &Path) -> Result<RenderedDocument> {
        let doc = load_document(pdf)?;

        let page_ids = doc.get_pages();
        if page_ids.is_empty() {
            return Err(RasterError::NoPages(BACKEND.to_string()));
        }

        let workdir = tempfile::tempdir()?;
        let mut pages = Vec::with_capacity(page_ids.len());

        for (number, page_id) in page_ids {
            let largest = page_images(&doc, page_id).into_iter().max_by_key(|img| {
                let (w, h) = img.dimensions();
                u64::from(w) * u64::from(h)
            });

            let Some(image) = largest else {
                debug!("No decodable image on page {} of {}", number, pdf.display());
                continue;
            };

            let path = workdir.path().join(format!("page-{number}.png"));
            image.save_with_format(&path, image::ImageFormat::Png)?;
            pages.push(PageImage { number, path });
        }

        if pages.is_empty() {
            return Err(RasterError::NoPages(BACKEND.to_string()));
        }

        debug!("Extracted {} page images from {}", pages.len(), pdf.display());
        Ok(RenderedDocument::new(BACKEND, pages, Some(workdir)))
    }
}

fn load_document(pdf: &Path) -> Result<Document> {
    let mut doc = Document::load(pdf).map_err(|e| RasterError::Parse(e.to_string()))?;

    // Handle PDFs with empty password encryption
    if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            return Err(RasterError::Encrypted);
        }
        debug!("Decrypted {} with empty password", pdf.display());
    }

    Ok(doc)
}

/// Decode every image XObject referenced by a page.
fn page_images(doc: &Document, page_id: ObjectId) -> Vec<DynamicImage> {
    let Some(resources) = page_resources(doc, page_id) else {
        return Vec::new();
    };
    let Ok(xobjects) = resources.get(b"XObject") else {
        return Vec::new();
    };
    let Ok((_, Object::Dictionary(xobjects))) = doc.dereference(xobjects) else {
        return Vec::new();
    };

    xobjects
        .iter()
        .filter_map(|(_, obj_ref)| doc.dereference(obj_ref).ok())
        .filter_map(|(_, obj)| decode_image_object(doc, obj))
        .collect()
}

/// Resources dictionary for a page, following inheritance up the page tree.
fn page_resources(doc: &Document, node_id: ObjectId) -> Option<Dictionary> {
    let Ok(Object::Dictionary(dict)) = doc.get_object(node_id) else {
        return None;
    };

    if let Ok(resources) = dict.get(b"Resources") {
        if let Ok((_, Object::Dictionary(res_dict))) = doc.dereference(resources) {
            return Some(res_dict.clone());
        }
    }

    match dict.get(b"Parent") {
        Ok(Object::Reference(parent_id)) => page_resources(doc, *parent_id),
        _ => None,
    }
}

fn decode_image_object(doc: &Document, obj: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = obj else {
        return None;
    };
    let dict = &stream.dict;

    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }

    let width = u32::try_from(dict.get(b"Width").ok()?.as_i64().ok()?).ok()?;
    let height = u32::try_from(dict.get(b"Height").ok()?.as_i64().ok()?).ok()?;
    trace!("Found image object: {}x{}", width, height);

    let filter = dict.get(b"Filter").ok().and_then(|filter| match filter {
        Object::Name(name) => Some(name.as_slice()),
        Object::Array(arr) => arr.last().and_then(|o| o.as_name().ok()),
        _ => None,
    });

    match filter {
        Some(b"DCTDecode") => {
            return image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg)
                .ok();
        }
        Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
            trace!("Skipping image with unsupported filter");
            return None;
        }
        _ => {}
    }

    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| match o {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
            _ => None,
        })
        .unwrap_or(b"DeviceRGB");

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);

    image_from_raw(&data, width, height, color_space, bits)
}

/// Build an image from uncompressed samples.
///
/// Handles 8-bit RGB and gray, and 1-bit gray (typical of black-and-white scans).
fn image_from_raw(
    data: &[u8],
    width: u32,
    height: u32,
    color_space: &[u8],
    bits_per_component: i64,
) -> Option<DynamicImage> {
    if width == 0 || height == 0 {
        return None;
    }

    let (w, h) = (width as usize, height as usize);
    let pixels = w.checked_mul(h)?;
    let is_rgb = matches!(color_space, b"DeviceRGB" | b"RGB");
    let is_gray = matches!(color_space, b"DeviceGray" | b"G");

    match (bits_per_component, is_rgb, is_gray) {
        (8, true, _) => {
            let len = pixels.checked_mul(3)?;
            let samples = data.get(..len)?.to_vec();
            RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8)
        }
        (8, _, true) => {
            let samples = data.get(..pixels)?.to_vec();
            GrayImage::from_raw(width, height, samples).map(DynamicImage::ImageLuma8)
        }
        (1, _, true) => {
            let row_bytes = w.div_ceil(8);
            if data.len() < row_bytes.checked_mul(h)? {
                return None;
            }
            let mut samples = Vec::with_capacity(pixels);
            for row in data.chunks(row_bytes).take(h) {
                for x in 0..w {
                    let bit = (row[x / 8] >> (7 - (x % 8))) & 1;
                    samples.push(if bit == 1 { 255 } else { 0 });
                }
            }
            GrayImage::from_raw(width, height, samples).map(DynamicImage::ImageLuma8)
        }
        _ => {
            trace!(
                "Unsupported image: colorspace={:?}, bits={}",
                String::from_utf8_lossy(color_space),
                bits_per_component
            );
            None
        }
    }
}
