use std::fmt;

use crate::error::Error;
use crate::model::Color;
use crate::page::{RuleLine, mm_to_px};
use crate::serialize::StrokePath;

use super::Canvas;

enum Element {
    Rule {
        line: RuleLine,
        width: f32,
        color: Color,
    },
    Path(StrokePath),
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Rule { line, width, color } => writeln!(
                f,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                line.from.0,
                line.from.1,
                line.to.0,
                line.to.1,
                color.to_hex(),
                width,
            ),
            Element::Path(path) => writeln!(
                f,
                r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
                path.svg_data(),
                path.color.to_hex(),
                path.width,
            ),
        }
    }
}

pub struct SvgCanvas {
    width_mm: f32,
    height_mm: f32,
    elements: Vec<Element>,
}

impl SvgCanvas {
    pub fn new(width_mm: f32, height_mm: f32) -> Self {
        Self {
            width_mm,
            height_mm,
            elements: Vec::new(),
        }
    }

    pub fn to_svg_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SvgCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg width="{0}mm" height="{1}mm" viewBox="0 0 {2} {3}" version="1.1" xmlns="http://www.w3.org/2000/svg">"#,
            self.width_mm,
            self.height_mm,
            mm_to_px(self.width_mm),
            mm_to_px(self.height_mm),
        )?;
        for el in &self.elements {
            write!(f, "{el}")?;
        }
        f.write_str("</svg>\n")
    }
}

impl Canvas for SvgCanvas {
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
        Ok(self.to_svg_string().into_bytes())
    }
}
