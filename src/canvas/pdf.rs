use pdf_writer::types::{LineCapStyle, LineJoinStyle};
use pdf_writer::{Content, Filter, Pdf, Rect, Ref};

use crate::error::Error;
use crate::model::Color;
use crate::page::{RuleLine, mm_to_px};
use crate::serialize::{PathCommand, StrokePath};

use super::Canvas;

const PT_PER_MM: f32 = 72.0 / 25.4;

enum Element {
    Rule {
        line: RuleLine,
        width: f32,
        color: Color,
    },
    Path(StrokePath),
}

/// Single-page PDF sink. Elements are kept until `finish` so the content
/// stream can be written in one pass.
pub struct PdfCanvas {
    width_mm: f32,
    height_mm: f32,
    elements: Vec<Element>,
}

impl PdfCanvas {
    pub fn new(width_mm: f32, height_mm: f32) -> Self {
        Self {
            width_mm,
            height_mm,
            elements: Vec::new(),
        }
    }

    fn content(&self, width_pt: f32, height_pt: f32) -> Content {
        let mut content = Content::new();
        content.save_state();
        // px space (y down) onto the media box (y up), stretched like an SVG viewBox
        content.transform([
            width_pt / mm_to_px(self.width_mm),
            0.0,
            0.0,
            -height_pt / mm_to_px(self.height_mm),
            0.0,
            height_pt,
        ]);
        content.set_line_cap(LineCapStyle::RoundCap);
        content.set_line_join(LineJoinStyle::RoundJoin);

        for el in &self.elements {
            match el {
                Element::Rule { line, width, color } => {
                    let [r, g, b] = color.to_unit();
                    content.set_line_width(*width);
                    content.set_stroke_rgb(r, g, b);
                    content.move_to(line.from.0, line.from.1);
                    content.line_to(line.to.0, line.to.1);
                    content.stroke();
                }
                Element::Path(path) => {
                    if path.commands.is_empty() {
                        continue;
                    }
                    let [r, g, b] = path.color.to_unit();
                    content.set_line_width(path.width);
                    content.set_stroke_rgb(r, g, b);
                    for cmd in &path.commands {
                        match *cmd {
                            PathCommand::MoveTo(x, y) => content.move_to(x, y),
                            PathCommand::LineTo(x, y) => content.line_to(x, y),
                        };
                    }
                    content.stroke();
                }
            }
        }
        content.restore_state();
        content
    }
}

impl Canvas for PdfCanvas {
    fn add_rule_line(&mut self, line: &RuleLine, width: f32, color: Color) -> Result<(), Error> {
        self.elements.push(Element::Rule {
            line: *line,
            width,
            color,
        });
        Ok(())
    }

    fn add_path(&mut self, path: &StrokePath) -> Result<(), Error> {
        self.elements.push(Element::Path(path.clone()));
        Ok(())
    }

    fn finish(&self) -> Result<Vec<u8>, Error> {
        let width_pt = self.width_mm * PT_PER_MM;
        let height_pt = self.height_mm * PT_PER_MM;

        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let page_id = Ref::new(3);
        let content_id = Ref::new(4);

        let raw = self.content(width_pt, height_pt).finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id).kids([page_id]).count(1);
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, width_pt, height_pt))
            .parent(pages_id)
            .contents(content_id);
        drop(page);

        log::debug!(
            "PDF canvas: {} elements, content stream {} -> {} bytes",
            self.elements.len(),
            raw.as_slice().len(),
            compressed.len()
        );
        Ok(pdf.finish())
    }
}
