use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::{self, Bounds};
use crate::model::{Alignment, Coordinate, RenderLine};
use crate::page::{PageConfig, mm_to_px};

/// Upper bound of the left-alignment jitter, in whole millimetres.
pub const MAX_JITTER_MM: u32 = 6;
/// Gap kept between a stroke and the anchor it is aligned to, in mm.
pub const PADDING_MM: f32 = 5.0;

/// Source of the small horizontal offset that keeps left-aligned lines from
/// starting at exactly the same x.
pub trait Jitter {
    /// Whole millimetres; values above [`MAX_JITTER_MM`] are clamped.
    fn horizontal_mm(&mut self) -> u32;
}

pub struct RandomJitter {
    rng: StdRng,
}

impl RandomJitter {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomJitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Jitter for RandomJitter {
    fn horizontal_mm(&mut self) -> u32 {
        self.rng.random_range(0..=MAX_JITTER_MM)
    }
}

pub struct NoJitter;

impl Jitter for NoJitter {
    fn horizontal_mm(&mut self) -> u32 {
        0
    }
}

/// Running vertical position shared by all lines of one document.
///
/// Starts a quarter line-height above zero and drops by one line-height per
/// line, blank lines included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineCursor {
    y: f32,
    line_height: f32,
}

impl LineCursor {
    pub fn new(line_height: f32) -> Self {
        Self {
            y: -line_height / 4.0,
            line_height,
        }
    }

    pub fn position(&self) -> f32 {
        self.y
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn advance(&mut self) {
        self.y -= self.line_height;
    }
}

/// Page-level placement parameters, all in canvas pixels.
pub struct LineLayout {
    view_width: f32,
    margin_horizontal: f32,
    margin_vertical: f32,
    padding: f32,
}

impl LineLayout {
    pub fn new(page: &PageConfig) -> Self {
        let (margin_h, margin_v) = page.margins();
        Self {
            view_width: page.size_px().0,
            margin_horizontal: mm_to_px(margin_h as f32),
            margin_vertical: mm_to_px(margin_v as f32),
            padding: mm_to_px(PADDING_MM),
        }
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Scale, smooth and level one line's strokes, then place them on the page.
    pub fn layout_line(
        &self,
        line: &RenderLine,
        cursor: &LineCursor,
        jitter: &mut dyn Jitter,
    ) -> Vec<Coordinate> {
        let scaled = geometry::scale(&line.coords, line.scale);
        let smoothed = geometry::denoise(&scaled);
        let aligned = geometry::align(&smoothed);
        self.place(&aligned, line.alignment, cursor, jitter)
    }

    /// Flip aligned stroke geometry into page space and anchor it according to
    /// `alignment` and the cursor.
    pub fn place(
        &self,
        coords: &[Coordinate],
        alignment: Alignment,
        cursor: &LineCursor,
        jitter: &mut dyn Jitter,
    ) -> Vec<Coordinate> {
        let flipped: Vec<Coordinate> = coords
            .iter()
            .map(|c| Coordinate::new(c.x, -c.y, c.pen_lift))
            .collect();
        let Some(b) = Bounds::of(&flipped) else {
            return flipped;
        };

        let dx = match alignment {
            Alignment::Left => {
                let jitter_mm = jitter.horizontal_mm().min(MAX_JITTER_MM);
                self.margin_horizontal + mm_to_px(jitter_mm as f32) + self.padding
            }
            Alignment::Right => self.view_width - b.width() - self.padding,
            Alignment::Center => (self.view_width - b.width()) / 2.0,
        };
        let dy = self.margin_vertical - cursor.position();

        flipped
            .into_iter()
            .map(|c| Coordinate::new(c.x - b.min_x + dx, c.y - b.min_y + dy, c.pen_lift))
            .collect()
    }
}
