use std::str::FromStr;

use crate::error::Error;
use crate::page::PageConfig;

/// One pen movement emitted by the sequence generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetSample {
    pub dx: f32,
    pub dy: f32,
    /// The next sample starts a new pen-down stroke.
    pub pen_lift: bool,
}

impl OffsetSample {
    pub fn new(dx: f32, dy: f32, pen_lift: bool) -> Self {
        Self { dx, dy, pen_lift }
    }

    /// Build a sample from a raw `[dx, dy, eos]` row.
    pub fn try_from_row(row: &[f32]) -> Result<Self, Error> {
        let [dx, dy, eos] = row else {
            return Err(Error::InvalidGeometry(format!(
                "offset rows need 3 values, got {}",
                row.len()
            )));
        };
        let pen_lift = if *eos == 1.0 {
            true
        } else if *eos == 0.0 {
            false
        } else {
            return Err(Error::InvalidGeometry(format!(
                "pen-lift flag must be 0 or 1, got {eos}"
            )));
        };
        Ok(Self::new(*dx, *dy, pen_lift))
    }

    /// Padding samples appended by the generator to equalize batch lengths.
    pub fn is_padding(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0 && !self.pen_lift
    }
}

/// Absolute pen position. `pen_lift` at a point means the next point is a move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub x: f32,
    pub y: f32,
    pub pen_lift: bool,
}

impl Coordinate {
    pub fn new(x: f32, y: f32, pen_lift: bool) -> Self {
        Self { x, y, pen_lift }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl FromStr for Alignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(Error::InvalidArgument(format!(
                "invalid alignment value {other:?}, allowed values are 'left', 'center', 'right'"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Components scaled to 0.0..=1.0.
    pub fn to_unit(self) -> [f32; 3] {
        self.0.map(|c| c as f32 / 255.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

fn parse_hex_color(val: &str) -> Option<[u8; 3]> {
    let digits = val.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    match digits.len() {
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some([r, g, b])
        }
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 17;
            }
            Some(out)
        }
        _ => None,
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let named = match s.to_ascii_lowercase().as_str() {
            "black" => Some([0, 0, 0]),
            "white" => Some([255, 255, 255]),
            "red" => Some([255, 0, 0]),
            "green" => Some([0, 128, 0]),
            "blue" => Some([0, 0, 255]),
            "navy" => Some([0, 0, 128]),
            "gray" | "grey" => Some([128, 128, 128]),
            "silver" => Some([192, 192, 192]),
            "maroon" => Some([128, 0, 0]),
            "purple" => Some([128, 0, 128]),
            "fuchsia" => Some([255, 0, 255]),
            "lime" => Some([0, 255, 0]),
            "olive" => Some([128, 128, 0]),
            "yellow" => Some([255, 255, 0]),
            "teal" => Some([0, 128, 128]),
            "aqua" => Some([0, 255, 255]),
            _ => None,
        };
        named
            .or_else(|| parse_hex_color(s))
            .map(Color)
            .ok_or_else(|| Error::InvalidArgument(format!("unrecognized stroke color {s:?}")))
    }
}

/// Opaque handle for a handwriting style known to the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StyleRef(pub u32);

pub struct RenderLine {
    pub text: String,
    pub coords: Vec<Coordinate>,
    pub color: Color,
    pub width: f32,
    pub alignment: Alignment,
    pub scale: f32,
    /// Passed to the generator only; layout ignores it.
    pub bias: f32,
}

impl RenderLine {
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

pub struct Document {
    pub page: PageConfig,
    pub lines: Vec<RenderLine>,
}
