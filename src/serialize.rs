use std::fmt;

use crate::canvas::Canvas;
use crate::error::Error;
use crate::model::{Color, Coordinate};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(f32, f32),
    LineTo(f32, f32),
}

/// One line's strokes as a single path with a single style.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokePath {
    pub commands: Vec<PathCommand>,
    pub color: Color,
    pub width: f32,
}

impl StrokePath {
    /// SVG path data (`d` attribute).
    pub fn svg_data(&self) -> SvgPathData<'_> {
        SvgPathData(self)
    }

    pub fn to_svg_data(&self) -> String {
        self.svg_data().to_string()
    }

    pub fn move_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(..)))
            .count()
    }
}

pub struct SvgPathData<'a>(&'a StrokePath);

impl fmt::Display for SvgPathData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.0.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match cmd {
                PathCommand::MoveTo(x, y) => write!(f, "M{x},{y}")?,
                PathCommand::LineTo(x, y) => write!(f, "L{x},{y}")?,
            }
        }
        Ok(())
    }
}

/// Walk placed coordinates: a point after a pen lift (or the first point)
/// starts a new subpath, every other point draws from its predecessor.
pub fn build_path(coords: &[Coordinate], color: Color, width: f32) -> StrokePath {
    let mut prev_lift = true;
    let commands = coords
        .iter()
        .map(|c| {
            let cmd = if prev_lift {
                PathCommand::MoveTo(c.x, c.y)
            } else {
                PathCommand::LineTo(c.x, c.y)
            };
            prev_lift = c.pen_lift;
            cmd
        })
        .collect();
    StrokePath {
        commands,
        color,
        width,
    }
}

pub fn emit(
    coords: &[Coordinate],
    color: Color,
    width: f32,
    canvas: &mut dyn Canvas,
) -> Result<(), Error> {
    canvas.add_path(&build_path(coords, color, width))
}
