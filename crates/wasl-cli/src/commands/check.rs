//! Check command - availability of the external tools.

use console::style;

use wasl_core::models::RasterBackend;
use wasl_core::pdf::{MutoolRasterizer, PdftoppmRasterizer};
use wasl_core::TesseractEngine;

use super::load_config;

pub async fn run(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let tesseract = TesseractEngine::new(&config.ocr.tesseract_path);
    let tesseract_ok = tesseract.is_available();
    report("tesseract", &config.ocr.tesseract_path.display().to_string(), tesseract_ok);

    if tesseract_ok {
        match tesseract.languages() {
            Ok(installed) => {
                for lang in config.ocr.language.split('+').filter(|l| !l.is_empty()) {
                    let present = installed.iter().any(|l| l == lang);
                    report(&format!("  language {lang}"), "", present);
                }
            }
            Err(e) => println!("  {} could not list languages: {}", style("!").yellow(), e),
        }
    }

    let mut any_backend = false;
    for backend in &config.pdf.backends {
        let (path, available) = match backend {
            RasterBackend::Pdftoppm => (
                config.pdf.pdftoppm_path.display().to_string(),
                PdftoppmRasterizer::new(&config.pdf.pdftoppm_path, config.pdf.render_dpi)
                    .is_available(),
            ),
            RasterBackend::Mutool => (
                config.pdf.mutool_path.display().to_string(),
                MutoolRasterizer::new(&config.pdf.mutool_path, config.pdf.render_dpi)
                    .is_available(),
            ),
            RasterBackend::Embedded => ("built in".to_string(), true),
        };
        any_backend |= available;
        report(backend.as_str(), &path, available);
    }

    if !tesseract_ok {
        anyhow::bail!("tesseract is required; install it or set ocr.tesseract_path");
    }
    if !any_backend {
        anyhow::bail!("no PDF rasterizer is available; check pdf.backends");
    }

    println!("{} Ready", style("✓").green());
    Ok(())
}

fn report(tool: &str, path: &str, available: bool) {
    let mark = if available {
        style("✓").green()
    } else {
        style("✗").red()
    };
    if path.is_empty() {
        println!("{} {}", mark, tool);
    } else {
        println!("{} {} ({})", mark, tool, style(path).dim());
    }
}
