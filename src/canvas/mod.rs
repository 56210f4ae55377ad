mod pdf;
mod svg;

use std::path::Path;

use crate::error::Error;
use crate::model::Color;
use crate::page::RuleLine;
use crate::serialize::StrokePath;

pub use pdf::PdfCanvas;
pub use svg::SvgCanvas;

/// Vector output sink. Coordinates are canvas pixels, y pointing down, on a
/// sheet declared in millimetres.
pub trait Canvas {
    fn add_rule_line(&mut self, line: &RuleLine, width: f32, color: Color) -> Result<(), Error>;

    /// Stroked, unfilled path with round caps.
    fn add_path(&mut self, path: &StrokePath) -> Result<(), Error>;

    /// Serialized document.
    fn finish(&self) -> Result<Vec<u8>, Error>;

    fn save(&self, destination: &Path) -> Result<(), Error> {
        let bytes = self.finish()?;
        std::fs::write(destination, &bytes).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
                std::io::Error::new(e.kind(), format!("{}: {}", e, destination.display())),
            ),
            _ => Error::Io(e),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Pdf,
}

impl OutputFormat {
    /// Pick the format from the destination's extension.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("svg") => Ok(OutputFormat::Svg),
            Some("pdf") => Ok(OutputFormat::Pdf),
            _ => Err(Error::InvalidArgument(format!(
                "cannot infer output format from {:?}, expected .svg or .pdf",
                path.display().to_string()
            ))),
        }
    }

    pub fn create_canvas(self, width_mm: f32, height_mm: f32) -> Box<dyn Canvas> {
        match self {
            OutputFormat::Svg => Box::new(SvgCanvas::new(width_mm, height_mm)),
            OutputFormat::Pdf => Box::new(PdfCanvas::new(width_mm, height_mm)),
        }
    }
}
