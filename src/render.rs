use std::path::Path;
use std::time::Instant;

use crate::canvas::{Canvas, OutputFormat};
use crate::error::Error;
use crate::generator::SequenceGenerator;
use crate::geometry::{to_coordinates, trim_padding};
use crate::layout::{Jitter, LineCursor, LineLayout, RandomJitter};
use crate::model::{Alignment, Color, Document, OffsetSample, RenderLine, StyleRef};
use crate::page::{PageConfig, RULE_WIDTH_MM, mm_to_px};
use crate::serialize;
use crate::text::validate_lines;

pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;
pub const DEFAULT_BIAS: f32 = 0.5;

/// Everything about a render request except the text itself.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub page: PageConfig,
    /// Per-line legibility passed to the generator.
    pub biases: Option<Vec<f32>>,
    pub styles: Option<Vec<StyleRef>>,
    pub colors: Option<Vec<Color>>,
    pub widths: Option<Vec<f32>>,
    pub scale: f32,
    pub alignment: Alignment,
    /// Seed for the left-alignment jitter; random when unset.
    pub seed: Option<u64>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            biases: None,
            styles: None,
            colors: None,
            widths: None,
            scale: 1.0,
            alignment: Alignment::Center,
            seed: None,
        }
    }
}

impl RenderOptions {
    fn check_per_line<T>(values: &Option<Vec<T>>, what: &str, lines: usize) -> Result<(), Error> {
        match values {
            Some(v) if v.len() != lines => Err(Error::InvalidArgument(format!(
                "{what} has {} entries for {lines} lines",
                v.len()
            ))),
            _ => Ok(()),
        }
    }

    pub fn validate(&self, lines: usize) -> Result<(), Error> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "scale factor must be positive, got {}",
                self.scale
            )));
        }
        Self::check_per_line(&self.biases, "biases", lines)?;
        Self::check_per_line(&self.styles, "styles", lines)?;
        Self::check_per_line(&self.colors, "stroke colors", lines)?;
        Self::check_per_line(&self.widths, "stroke widths", lines)?;
        if let Some(w) = self
            .widths
            .iter()
            .flatten()
            .find(|w| !w.is_finite() || **w <= 0.0)
        {
            return Err(Error::InvalidArgument(format!(
                "stroke widths must be positive, got {w}"
            )));
        }
        Ok(())
    }

    fn jitter(&self) -> RandomJitter {
        match self.seed {
            Some(seed) => RandomJitter::seeded(seed),
            None => RandomJitter::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSummary {
    pub lines: usize,
    pub paths: usize,
    /// Vertical cursor after the last line, in canvas pixels.
    pub cursor: f32,
}

/// Lay out every line of `doc` onto `canvas`, ruling first.
pub fn render_document(
    doc: &Document,
    canvas: &mut dyn Canvas,
    jitter: &mut dyn Jitter,
) -> Result<RenderSummary, Error> {
    let rule_width = mm_to_px(RULE_WIDTH_MM);
    for rule in doc.page.rule_lines() {
        canvas.add_rule_line(&rule, rule_width, Color::BLACK)?;
    }

    let layout = LineLayout::new(&doc.page);
    let mut cursor = LineCursor::new(doc.page.line_height_px());
    let mut paths = 0usize;

    for (i, line) in doc.lines.iter().enumerate() {
        if line.is_blank() {
            log::debug!("Line {i}: blank, skipping at cursor {:.1}", cursor.position());
            cursor.advance();
            continue;
        }
        if line.coords.is_empty() {
            log::warn!("Line {i}: generator returned no strokes for {:?}", line.text);
            cursor.advance();
            continue;
        }

        let placed = layout.layout_line(line, &cursor, jitter);
        serialize::emit(&placed, line.color, line.width, canvas)?;
        paths += 1;
        log::debug!(
            "Line {i}: {} points placed at cursor {:.1} ({:?})",
            placed.len(),
            cursor.position(),
            line.alignment
        );
        cursor.advance();
    }

    Ok(RenderSummary {
        lines: doc.lines.len(),
        paths,
        cursor: cursor.position(),
    })
}

/// Renders text as handwriting with an injected stroke generator.
pub struct Handwriter<G> {
    generator: G,
}

impl<G: SequenceGenerator> Handwriter<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Validate, generate and strip padding, without drawing anything.
    pub fn strokes<S: AsRef<str>>(
        &self,
        lines: &[S],
        options: &RenderOptions,
    ) -> Result<Vec<Vec<OffsetSample>>, Error> {
        validate_lines(lines)?;
        options.validate(lines.len())?;
        self.generate(lines, options)
    }

    fn generate<S: AsRef<str>>(
        &self,
        lines: &[S],
        options: &RenderOptions,
    ) -> Result<Vec<Vec<OffsetSample>>, Error> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }
        let owned: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();
        let batch = self.generator.generate(
            &owned,
            options.biases.as_deref(),
            options.styles.as_deref(),
        )?;
        if batch.len() != lines.len() {
            return Err(Error::InvalidGeometry(format!(
                "generator returned {} sequences for {} lines",
                batch.len(),
                lines.len()
            )));
        }
        Ok(batch
            .iter()
            .map(|seq| trim_padding(seq).to_vec())
            .collect())
    }

    fn build_document<S: AsRef<str>>(
        &self,
        lines: &[S],
        options: &RenderOptions,
    ) -> Result<Document, Error> {
        let sequences = self.generate(lines, options)?;
        let lines = lines
            .iter()
            .zip(sequences)
            .enumerate()
            .map(|(i, (text, offsets))| {
                Ok(RenderLine {
                    text: text.as_ref().to_string(),
                    coords: to_coordinates(&offsets)?,
                    color: options
                        .colors
                        .as_ref()
                        .map_or(Color::BLACK, |c| c[i]),
                    width: options
                        .widths
                        .as_ref()
                        .map_or(DEFAULT_STROKE_WIDTH, |w| w[i]),
                    alignment: options.alignment,
                    scale: options.scale,
                    bias: options.biases.as_ref().map_or(DEFAULT_BIAS, |b| b[i]),
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Document {
            page: options.page.clone(),
            lines,
        })
    }

    /// Render onto a caller-supplied canvas without saving it.
    pub fn render_to<S: AsRef<str>>(
        &self,
        canvas: &mut dyn Canvas,
        lines: &[S],
        options: &RenderOptions,
        jitter: &mut dyn Jitter,
    ) -> Result<RenderSummary, Error> {
        validate_lines(lines)?;
        options.validate(lines.len())?;
        let doc = self.build_document(lines, options)?;
        render_document(&doc, canvas, jitter)
    }

    /// Render `lines` and save the result to `destination` (`.svg` or `.pdf`).
    pub fn write<S: AsRef<str>>(
        &self,
        destination: &Path,
        lines: &[S],
        options: &RenderOptions,
    ) -> Result<RenderSummary, Error> {
        let t0 = Instant::now();

        let format = OutputFormat::from_path(destination)?;
        validate_lines(lines)?;
        options.validate(lines.len())?;
        let t_validate = t0.elapsed();

        let doc = self.build_document(lines, options)?;
        let t_generate = t0.elapsed();

        let (width_mm, height_mm) = doc.page.size();
        let mut canvas = format.create_canvas(width_mm, height_mm);
        let mut jitter = options.jitter();
        let summary = render_document(&doc, canvas.as_mut(), &mut jitter)?;
        let t_render = t0.elapsed();

        canvas.save(destination)?;
        let t_total = t0.elapsed();

        log::info!(
            "Timing: validate={:.1}ms, generate={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms ({} paths for {} lines)",
            t_validate.as_secs_f64() * 1000.0,
            (t_generate - t_validate).as_secs_f64() * 1000.0,
            (t_render - t_generate).as_secs_f64() * 1000.0,
            (t_total - t_render).as_secs_f64() * 1000.0,
            t_total.as_secs_f64() * 1000.0,
            summary.paths,
            summary.lines,
        );

        Ok(summary)
    }
}
