use std::path::Path;
use std::process::Stdio;

use scribe_logging::scribe_debug;

use crate::export::{ExportConfig, Orientation, PaperSize, PdfRenderer, Unit};
use crate::ExportError;

/// CSS pixels per inch; the capture scale multiplies it.
const BASE_DPI: u32 = 96;

/// Drives an external HTML-to-PDF program (wkhtmltopdf-compatible flags)
/// and reads the document from its stdout.
#[derive(Debug, Clone)]
pub struct CommandPdfRenderer {
    program: String,
}

impl CommandPdfRenderer {
    pub const DEFAULT_PROGRAM: &'static str = "wkhtmltopdf";

    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Command line for rendering `source` with `config`, ending in `-` for stdout.
    pub fn arguments(config: &ExportConfig, source: &Path) -> Vec<String> {
        let unit = match config.page.unit {
            Unit::Mm => "mm",
        };
        let [top, left, bottom, right] = config.margin;
        let mut args = Vec::new();
        if !config.capture.logging {
            args.push("--quiet".to_string());
        }
        for (flag, value) in [
            ("--margin-top", top),
            ("--margin-left", left),
            ("--margin-bottom", bottom),
            ("--margin-right", right),
        ] {
            args.push(flag.to_string());
            args.push(format!("{value}{unit}"));
        }
        args.push("--page-size".to_string());
        args.push(
            match config.page.format {
                PaperSize::A4 => "A4",
            }
            .to_string(),
        );
        args.push("--orientation".to_string());
        args.push(
            match config.page.orientation {
                Orientation::Portrait => "Portrait",
            }
            .to_string(),
        );
        args.push("--image-quality".to_string());
        args.push(((config.image.quality * 100.0).round() as u32).to_string());
        args.push("--dpi".to_string());
        args.push((BASE_DPI * config.capture.scale).to_string());
        if config.honors_css_breaks() {
            args.push("--print-media-type".to_string());
        }
        if config.capture.use_cors {
            args.push("--enable-local-file-access".to_string());
        }
        args.push(source.display().to_string());
        args.push("-".to_string());
        args
    }
}

impl Default for CommandPdfRenderer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

#[async_trait::async_trait]
impl PdfRenderer for CommandPdfRenderer {
    async fn render(&self, source: &Path, config: &ExportConfig) -> Result<Vec<u8>, ExportError> {
        let args = Self::arguments(config, source);
        scribe_debug!("Running {} {}", self.program, args.join(" "));

        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| ExportError::Spawn {
                program: self.program.clone(),
                message: err.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExportError::Render(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(output.stdout)
    }
}
