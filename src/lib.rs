//! Lays out generated handwriting strokes on a sheet of (optionally ruled)
//! paper and writes the result as SVG or PDF.
//!
//! Stroke generation itself is external: anything implementing
//! [`SequenceGenerator`] can be plugged into a [`Handwriter`].

pub mod canvas;
mod error;
pub mod generator;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod page;
mod render;
pub mod serialize;
pub mod text;

pub use canvas::{Canvas, OutputFormat, PdfCanvas, SvgCanvas};
pub use error::Error;
pub use generator::{ReplayGenerator, SequenceGenerator};
pub use layout::{Jitter, LineCursor, LineLayout, NoJitter, RandomJitter};
pub use model::{Alignment, Color, Coordinate, Document, OffsetSample, RenderLine, StyleRef};
pub use page::{PageConfig, PageSize, RuleLine, SizeSpec, mm_to_px};
pub use render::{
    DEFAULT_BIAS, DEFAULT_STROKE_WIDTH, Handwriter, RenderOptions, RenderSummary, render_document,
};
