//! PDF export of the rendered report region.
//!
//! The layout is fixed: A4 portrait, 10 mm margins, JPEG at 0.95, captured at
//! three times the screen scale, with CSS page breaks honored. Only the file
//! name varies, with the day of the export.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use scribe_logging::{scribe_debug, scribe_info};
use serde::Serialize;

use crate::persist::AtomicFileWriter;
use crate::ExportError;

pub const MARGIN_MM: f64 = 10.0;
pub const JPEG_QUALITY: f64 = 0.95;
pub const CAPTURE_SCALE: u32 = 3;

/// `report_<YYYY-MM-DD>.pdf`
pub fn report_filename(date: NaiveDate) -> String {
    format!("report_{}.pdf", date.format("%Y-%m-%d"))
}

/// Rendering parameters, serialized in the option-object shape DOM-to-PDF
/// renderers take.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportConfig {
    /// Top, left, bottom, right, in [`PageOptions::unit`].
    pub margin: [f64; 4],
    pub filename: String,
    pub image: ImageOptions,
    #[serde(rename = "html2canvas")]
    pub capture: CaptureOptions,
    #[serde(rename = "jsPDF")]
    pub page: PageOptions,
    #[serde(rename = "pagebreak")]
    pub page_break: PageBreakOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageOptions {
    #[serde(rename = "type")]
    pub format: ImageFormat,
    pub quality: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureOptions {
    pub scale: u32,
    #[serde(rename = "useCORS")]
    pub use_cors: bool,
    pub logging: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageOptions {
    pub unit: Unit,
    pub format: PaperSize,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Mm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    A4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageBreakOptions {
    pub mode: Vec<PageBreakMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageBreakMode {
    /// Follow `page-break-*` / `break-*` CSS, including print media rules.
    Css,
    /// Break before elements marked with the legacy page-break class.
    Legacy,
}

impl ExportConfig {
    /// The report layout for an export made on `date`.
    pub fn report(date: NaiveDate) -> Self {
        Self {
            margin: [MARGIN_MM; 4],
            filename: report_filename(date),
            image: ImageOptions {
                format: ImageFormat::Jpeg,
                quality: JPEG_QUALITY,
            },
            capture: CaptureOptions {
                scale: CAPTURE_SCALE,
                use_cors: true,
                logging: false,
            },
            page: PageOptions {
                unit: Unit::Mm,
                format: PaperSize::A4,
                orientation: Orientation::Portrait,
            },
            page_break: PageBreakOptions {
                mode: vec![PageBreakMode::Css, PageBreakMode::Legacy],
            },
        }
    }

    pub fn honors_css_breaks(&self) -> bool {
        self.page_break.mode.contains(&PageBreakMode::Css)
    }
}

/// External facility that turns the report region into PDF bytes.
#[async_trait::async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, source: &Path, config: &ExportConfig) -> Result<Vec<u8>, ExportError>;
}

/// Renders the report source and saves the result into the downloads directory.
pub struct Exporter {
    renderer: Arc<dyn PdfRenderer>,
    source: PathBuf,
    writer: AtomicFileWriter,
}

impl Exporter {
    pub fn new(renderer: Arc<dyn PdfRenderer>, source: PathBuf, downloads_dir: PathBuf) -> Self {
        Self {
            renderer,
            source,
            writer: AtomicFileWriter::new(downloads_dir),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub async fn export(&self, date: NaiveDate) -> Result<PathBuf, ExportError> {
        let config = ExportConfig::report(date);
        scribe_debug!(
            "Export options: {}",
            serde_json::to_string(&config).unwrap_or_default()
        );

        let pdf = self.renderer.render(&self.source, &config).await?;
        if pdf.is_empty() {
            return Err(ExportError::Render("renderer produced no output".to_string()));
        }

        let path = self.writer.write(&config.filename, &pdf)?;
        scribe_info!("Saved {} ({} bytes)", path.display(), pdf.len());
        Ok(path)
    }
}
