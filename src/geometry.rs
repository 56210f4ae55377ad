use crate::error::Error;
use crate::model::{Coordinate, OffsetSample};

// Savitzky-Golay smoothing weights for a cubic fit.
const SG7_WEIGHTS: [f32; 7] = [-2.0, 3.0, 6.0, 7.0, 6.0, 3.0, -2.0];
const SG7_NORM: f32 = 21.0;
const SG5_WEIGHTS: [f32; 5] = [-3.0, 12.0, 17.0, 12.0, -3.0];
const SG5_NORM: f32 = 35.0;

/// Below this the cloud has no usable principal axis.
const MIN_SPREAD: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn of(coords: &[Coordinate]) -> Option<Self> {
        let first = coords.first()?;
        let init = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(coords.iter().fold(init, |b, c| Bounds {
            min_x: b.min_x.min(c.x),
            min_y: b.min_y.min(c.y),
            max_x: b.max_x.max(c.x),
            max_y: b.max_y.max(c.y),
        }))
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Drop the all-zero samples a batched generator appends after the real strokes.
pub fn trim_padding(samples: &[OffsetSample]) -> &[OffsetSample] {
    let end = samples
        .iter()
        .rposition(|s| !s.is_padding())
        .map_or(0, |i| i + 1);
    &samples[..end]
}

/// Parse raw `[dx, dy, eos]` rows, as produced by an external generator.
pub fn offsets_from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Vec<OffsetSample>, Error> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            OffsetSample::try_from_row(row.as_ref()).map_err(|e| match e {
                Error::InvalidGeometry(msg) => Error::InvalidGeometry(format!("row {i}: {msg}")),
                other => other,
            })
        })
        .collect()
}

/// Cumulative sum of the deltas; pen-lift flags carry over unchanged.
pub fn to_coordinates(offsets: &[OffsetSample]) -> Result<Vec<Coordinate>, Error> {
    let mut x = 0.0f32;
    let mut y = 0.0f32;
    offsets
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if !(s.dx.is_finite() && s.dy.is_finite()) {
                return Err(Error::InvalidGeometry(format!(
                    "non-finite offset ({}, {}) at sample {i}",
                    s.dx, s.dy
                )));
            }
            x += s.dx;
            y += s.dy;
            Ok(Coordinate::new(x, y, s.pen_lift))
        })
        .collect()
}

pub fn scale(coords: &[Coordinate], factor: f32) -> Vec<Coordinate> {
    coords
        .iter()
        .map(|c| Coordinate::new(c.x * factor, c.y * factor, c.pen_lift))
        .collect()
}

fn convolve(window: &[Coordinate], weights: &[f32], norm: f32) -> (f32, f32) {
    let (sx, sy) = window
        .iter()
        .zip(weights)
        .fold((0.0, 0.0), |(sx, sy), (c, w)| (sx + c.x * w, sy + c.y * w));
    (sx / norm, sy / norm)
}

fn smooth_stroke(stroke: &[Coordinate], out: &mut Vec<Coordinate>) {
    let n = stroke.len();
    for (i, c) in stroke.iter().enumerate() {
        let (x, y) = match i.min(n - 1 - i) {
            0 | 1 => (c.x, c.y),
            2 => convolve(&stroke[i - 2..=i + 2], &SG5_WEIGHTS, SG5_NORM),
            _ => convolve(&stroke[i - 3..=i + 3], &SG7_WEIGHTS, SG7_NORM),
        };
        out.push(Coordinate::new(x, y, c.pen_lift));
    }
}

/// Smooth sampling jitter inside each pen-down stroke.
///
/// Strokes are split after every pen-lift point. Each stroke's two outermost
/// points on either end keep their position; the window narrows from 7 to 5
/// points as it approaches a stroke end so it never reaches across a break.
pub fn denoise(coords: &[Coordinate]) -> Vec<Coordinate> {
    let mut out = Vec::with_capacity(coords.len());
    for stroke in coords.split_inclusive(|c| c.pen_lift) {
        smooth_stroke(stroke, &mut out);
    }
    out
}

/// Angle of the principal axis, or zero when the points are not spread more
/// horizontally than vertically.
fn slant_angle(coords: &[Coordinate]) -> f64 {
    let n = coords.len() as f64;
    if coords.len() < 2 {
        return 0.0;
    }
    let mean_x = coords.iter().map(|c| c.x as f64).sum::<f64>() / n;
    let mean_y = coords.iter().map(|c| c.y as f64).sum::<f64>() / n;
    let (mut sxx, mut syy, mut sxy) = (0.0f64, 0.0f64, 0.0f64);
    for c in coords {
        let dx = c.x as f64 - mean_x;
        let dy = c.y as f64 - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx <= syy || sxx < MIN_SPREAD {
        return 0.0;
    }
    0.5 * (2.0 * sxy).atan2(sxx - syy)
}

/// Level the line's baseline and move its bounding box to the origin.
pub fn align(coords: &[Coordinate]) -> Vec<Coordinate> {
    let angle = slant_angle(coords);
    let (sin, cos) = (-angle).sin_cos();
    let rotated: Vec<Coordinate> = coords
        .iter()
        .map(|c| {
            let (x, y) = (c.x as f64, c.y as f64);
            Coordinate::new((x * cos - y * sin) as f32, (x * sin + y * cos) as f32, c.pen_lift)
        })
        .collect();

    let Some(b) = Bounds::of(&rotated) else {
        return rotated;
    };
    rotated
        .into_iter()
        .map(|c| Coordinate::new(c.x - b.min_x, c.y - b.min_y, c.pen_lift))
        .collect()
}
