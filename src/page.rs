use std::str::FromStr;

use crate::error::Error;

pub const DPI: f32 = 96.0;
const MM_PER_INCH: f32 = 25.4;

/// Band kept free of rules at the bottom of the page, in mm.
const BOTTOM_BORDER_MM: f32 = 15.0;
pub(crate) const RULE_WIDTH_MM: f32 = 0.5;

const DEFAULT_MARGIN_HORIZONTAL: u32 = 34;
const DEFAULT_MARGIN_VERTICAL: u32 = 33;
const DEFAULT_RULE_SPACING: u32 = 8;
const RULED_HORIZONTAL_COUNT: u32 = 32;

/// Millimetres to canvas pixels at 96 dpi, rounded to whole pixels.
pub fn mm_to_px(mm: f32) -> f32 {
    (mm * DPI / MM_PER_INCH).round()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageSize {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    Letter,
    Legal,
    Tabloid,
}

impl PageSize {
    pub const ALL: [PageSize; 10] = [
        PageSize::A0,
        PageSize::A1,
        PageSize::A2,
        PageSize::A3,
        PageSize::A4,
        PageSize::A5,
        PageSize::A6,
        PageSize::Letter,
        PageSize::Legal,
        PageSize::Tabloid,
    ];

    /// Width and height in millimetres.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A0 => (841.0, 1189.0),
            PageSize::A1 => (594.0, 841.0),
            PageSize::A2 => (420.0, 594.0),
            PageSize::A3 => (297.0, 420.0),
            PageSize::A4 => (210.0, 297.0),
            PageSize::A5 => (148.0, 210.0),
            PageSize::A6 => (105.0, 148.0),
            PageSize::Letter => (216.0, 279.0),
            PageSize::Legal => (216.0, 356.0),
            PageSize::Tabloid => (279.0, 432.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PageSize::A0 => "A0",
            PageSize::A1 => "A1",
            PageSize::A2 => "A2",
            PageSize::A3 => "A3",
            PageSize::A4 => "A4",
            PageSize::A5 => "A5",
            PageSize::A6 => "A6",
            PageSize::Letter => "Letter",
            PageSize::Legal => "Legal",
            PageSize::Tabloid => "Tabloid",
        }
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.name() == s)
            .ok_or_else(|| Error::InvalidSize(format!("unknown paper size {s:?}")))
    }
}

/// Either a standard sheet name or explicit millimetre dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeSpec<'a> {
    Named(&'a str),
    Dimensions(f32, f32),
}

impl<'a> From<&'a str> for SizeSpec<'a> {
    fn from(name: &'a str) -> Self {
        SizeSpec::Named(name)
    }
}

impl From<(f32, f32)> for SizeSpec<'_> {
    fn from((w, h): (f32, f32)) -> Self {
        SizeSpec::Dimensions(w, h)
    }
}

impl From<PageSize> for SizeSpec<'_> {
    fn from(size: PageSize) -> Self {
        let (w, h) = size.dimensions();
        SizeSpec::Dimensions(w, h)
    }
}

fn resolve_size(spec: SizeSpec<'_>) -> Result<(f32, f32), Error> {
    match spec {
        SizeSpec::Named(name) => Ok(name.parse::<PageSize>()?.dimensions()),
        SizeSpec::Dimensions(w, h) => {
            if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
                return Err(Error::InvalidSize(format!(
                    "width and height must be positive, got {w}x{h}"
                )));
            }
            Ok((w, h))
        }
    }
}

fn non_negative(value: i64, what: &str) -> Result<u32, Error> {
    u32::try_from(value).map_err(|_| {
        if value < 0 {
            Error::InvalidArgument(format!("{what} must be a non-negative integer, got {value}"))
        } else {
            Error::InvalidArgument(format!("{what} is out of range, got {value}"))
        }
    })
}

/// A straight guide line in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RuleLine {
    pub from: (f32, f32),
    pub to: (f32, f32),
}

/// The sheet a document is drawn on. All lengths are millimetres.
#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    width: f32,
    height: f32,
    margin_horizontal: u32,
    margin_vertical: u32,
    rule_count: u32,
    vertical_rule_count: u32,
    rule_spacing: u32,
}

impl PageConfig {
    pub fn new<'a>(size: impl Into<SizeSpec<'a>>, ruled: bool) -> Result<Self, Error> {
        let (width, height) = resolve_size(size.into())?;
        Ok(Self {
            width,
            height,
            margin_horizontal: DEFAULT_MARGIN_HORIZONTAL,
            margin_vertical: DEFAULT_MARGIN_VERTICAL,
            rule_count: if ruled { RULED_HORIZONTAL_COUNT } else { 0 },
            vertical_rule_count: if ruled { 1 } else { 0 },
            rule_spacing: DEFAULT_RULE_SPACING,
        })
    }

    pub fn set_size<'a>(&mut self, size: impl Into<SizeSpec<'a>>) -> Result<(), Error> {
        (self.width, self.height) = resolve_size(size.into())?;
        Ok(())
    }

    pub fn set_margins(&mut self, horizontal: i64, vertical: i64) -> Result<(), Error> {
        let horizontal = non_negative(horizontal, "horizontal margin")?;
        let vertical = non_negative(vertical, "vertical margin")?;
        self.margin_horizontal = horizontal;
        self.margin_vertical = vertical;
        Ok(())
    }

    pub fn set_ruling(
        &mut self,
        rule_count: i64,
        vertical_rule_count: i64,
        rule_spacing: i64,
    ) -> Result<(), Error> {
        let rule_count = non_negative(rule_count, "rule count")?;
        let vertical_rule_count = non_negative(vertical_rule_count, "vertical rule count")?;
        let rule_spacing = non_negative(rule_spacing, "rule spacing")?;
        if vertical_rule_count > 1 {
            return Err(Error::InvalidArgument(format!(
                "vertical rule count must be 0 or 1, got {vertical_rule_count}"
            )));
        }
        self.rule_count = rule_count;
        self.vertical_rule_count = vertical_rule_count;
        self.rule_spacing = rule_spacing;
        Ok(())
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn margins(&self) -> (u32, u32) {
        (self.margin_horizontal, self.margin_vertical)
    }

    pub fn rule_count(&self) -> u32 {
        self.rule_count
    }

    pub fn vertical_rule_count(&self) -> u32 {
        self.vertical_rule_count
    }

    pub fn rule_spacing(&self) -> u32 {
        self.rule_spacing
    }

    pub fn is_ruled(&self) -> bool {
        self.rule_count > 0 || self.vertical_rule_count > 0
    }

    /// Page size in canvas pixels.
    pub fn size_px(&self) -> (f32, f32) {
        (mm_to_px(self.width), mm_to_px(self.height))
    }

    pub fn line_height_px(&self) -> f32 {
        mm_to_px(self.rule_spacing as f32)
    }

    /// Guide lines for lined paper, in pixels: horizontal rules first, then the
    /// left margin rule.
    pub fn rule_lines(&self) -> Vec<RuleLine> {
        let (width_px, height_px) = self.size_px();
        let bottom = height_px - mm_to_px(BOTTOM_BORDER_MM);
        let step = self.line_height_px();
        let top = mm_to_px(self.margin_vertical as f32);

        let mut rules: Vec<RuleLine> = (0..self.rule_count)
            .map(|i| top + i as f32 * step)
            .take_while(|&y| y <= bottom)
            .map(|y| RuleLine {
                from: (0.0, y),
                to: (width_px, y),
            })
            .collect();

        if self.vertical_rule_count == 1 {
            let x = mm_to_px(self.margin_horizontal as f32);
            rules.push(RuleLine {
                from: (x, 0.0),
                to: (x, height_px),
            });
        }
        rules
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        let (width, height) = PageSize::A4.dimensions();
        Self {
            width,
            height,
            margin_horizontal: DEFAULT_MARGIN_HORIZONTAL,
            margin_vertical: DEFAULT_MARGIN_VERTICAL,
            rule_count: 0,
            vertical_rule_count: 0,
            rule_spacing: DEFAULT_RULE_SPACING,
        }
    }
}
