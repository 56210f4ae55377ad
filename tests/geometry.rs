mod common;

use common::{TOL, wavy_offsets};
use penline::geometry::{
    Bounds, align, denoise, offsets_from_rows, scale, to_coordinates, trim_padding,
};
use penline::{Coordinate, Error, OffsetSample};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= TOL * (1.0 + a.abs().max(b.abs()))
}

fn assert_coords_close(a: &[Coordinate], b: &[Coordinate]) {
    assert_eq!(a.len(), b.len());
    for (i, (p, q)) in a.iter().zip(b).enumerate() {
        assert!(close(p.x, q.x) && close(p.y, q.y), "point {i}: {p:?} vs {q:?}");
        assert_eq!(p.pen_lift, q.pen_lift, "pen flag at {i}");
    }
}

#[test]
fn coordinates_reproduce_offsets() {
    let offsets = wavy_offsets(4, 15);
    let coords = to_coordinates(&offsets).unwrap();
    assert_eq!(coords.len(), offsets.len());

    let mut prev = (0.0f32, 0.0f32);
    for (c, o) in coords.iter().zip(&offsets) {
        assert!(close(c.x - prev.0, o.dx), "dx {} vs {}", c.x - prev.0, o.dx);
        assert!(close(c.y - prev.1, o.dy), "dy {} vs {}", c.y - prev.1, o.dy);
        assert_eq!(c.pen_lift, o.pen_lift);
        prev = (c.x, c.y);
    }
}

#[test]
fn trailing_padding_is_trimmed() {
    let mut offsets = wavy_offsets(2, 5);
    let real = offsets.len();
    offsets.extend(std::iter::repeat_n(OffsetSample::new(0.0, 0.0, false), 7));
    assert_eq!(trim_padding(&offsets).len(), real);

    // zero moves inside the trace are kept
    let inner = [
        OffsetSample::new(1.0, 1.0, false),
        OffsetSample::new(0.0, 0.0, false),
        OffsetSample::new(1.0, 0.0, true),
        OffsetSample::new(0.0, 0.0, false),
    ];
    assert_eq!(trim_padding(&inner).len(), 3);
}

#[test]
fn all_padding_yields_no_coordinates() {
    let padding = vec![OffsetSample::new(0.0, 0.0, false); 20];
    let coords = to_coordinates(trim_padding(&padding)).unwrap();
    assert!(coords.is_empty());
}

#[test]
fn malformed_rows_are_invalid_geometry() {
    let short: Vec<Vec<f32>> = vec![vec![1.0, 2.0, 0.0], vec![1.0, 2.0]];
    let err = offsets_from_rows(&short).unwrap_err();
    assert!(matches!(err, Error::InvalidGeometry(ref m) if m.contains("row 1")), "{err:?}");

    let bad_flag = [[0.5f32, 0.5, 0.3]];
    assert!(matches!(offsets_from_rows(&bad_flag), Err(Error::InvalidGeometry(_))));

    let ok = [[0.5f32, -0.5, 1.0], [1.0, 0.0, 0.0]];
    let samples = offsets_from_rows(&ok).unwrap();
    assert_eq!(samples[0], OffsetSample::new(0.5, -0.5, true));
    assert!(!samples[1].pen_lift);
}

#[test]
fn non_finite_offsets_are_rejected() {
    let offsets = [
        OffsetSample::new(1.0, 0.0, false),
        OffsetSample::new(f32::NAN, 0.0, false),
    ];
    assert!(matches!(to_coordinates(&offsets), Err(Error::InvalidGeometry(_))));
}

#[test]
fn single_point_passes_through_the_pipeline() {
    let coords = to_coordinates(&[OffsetSample::new(3.0, 4.0, true)]).unwrap();
    assert_eq!(coords, vec![Coordinate::new(3.0, 4.0, true)]);
    let smoothed = denoise(&coords);
    assert_eq!(smoothed, coords);
    assert_eq!(align(&smoothed), vec![Coordinate::new(0.0, 0.0, true)]);
}

#[test]
fn denoise_keeps_stroke_ends_and_flags() {
    let coords = to_coordinates(&wavy_offsets(2, 10)).unwrap();
    let smoothed = denoise(&coords);
    assert_eq!(smoothed.len(), coords.len());

    for stroke_start in [0usize, 10] {
        for i in [stroke_start, stroke_start + 1, stroke_start + 8, stroke_start + 9] {
            assert_eq!(smoothed[i], coords[i], "boundary point {i} moved");
        }
    }
    for (s, c) in smoothed.iter().zip(&coords) {
        assert_eq!(s.pen_lift, c.pen_lift);
    }
}

#[test]
fn denoise_damps_zigzag_noise() {
    let coords: Vec<Coordinate> = (0..20)
        .map(|i| {
            let y = if i % 2 == 0 { 0.5 } else { -0.5 };
            Coordinate::new(i as f32, y, i == 19)
        })
        .collect();
    let smoothed = denoise(&coords);
    for (i, c) in smoothed.iter().enumerate().take(18).skip(2) {
        assert!(c.y.abs() < 0.2, "point {i} still at {}", c.y);
        assert!(close(c.x, i as f32));
    }
    assert_eq!(smoothed[0], coords[0]);
    assert_eq!(smoothed[19], coords[19]);
}

#[test]
fn denoise_is_a_fixed_point_on_smooth_strokes() {
    let coords: Vec<Coordinate> = (0..24)
        .map(|i| {
            let t = i as f32 * 0.5;
            Coordinate::new(t, 0.01 * t * t * t - 0.2 * t * t + t, i == 23)
        })
        .collect();
    let once = denoise(&coords);
    assert_coords_close(&once, &coords);
    assert_coords_close(&denoise(&once), &once);
}

#[test]
fn align_moves_bounding_box_to_origin() {
    let coords = to_coordinates(&wavy_offsets(3, 12)).unwrap();
    let shifted: Vec<Coordinate> = coords
        .iter()
        .map(|c| Coordinate::new(c.x + 250.0, c.y - 40.0, c.pen_lift))
        .collect();
    let aligned = align(&shifted);
    let b = Bounds::of(&aligned).unwrap();
    assert!(b.min_x.abs() < TOL && b.min_y.abs() < TOL, "{b:?}");
    assert_eq!(aligned.len(), shifted.len());
    for (a, s) in aligned.iter().zip(&shifted) {
        assert_eq!(a.pen_lift, s.pen_lift);
    }
}

#[test]
fn align_is_idempotent() {
    let coords = denoise(&to_coordinates(&wavy_offsets(5, 14)).unwrap());
    let once = align(&coords);
    let twice = align(&once);
    assert_coords_close(&twice, &once);
}

#[test]
fn align_levels_a_slanted_baseline() {
    let slanted: Vec<Coordinate> = (0..50)
        .map(|i| Coordinate::new(i as f32, 0.5 * i as f32, false))
        .collect();
    let aligned = align(&slanted);
    let b = Bounds::of(&aligned).unwrap();
    assert!(b.height() < 1e-2, "height {}", b.height());
    assert!(close(b.width(), (49.0f32 * 49.0 * 1.25).sqrt()));
    // ordering along the line survives the rotation
    assert!(aligned.windows(2).all(|w| w[1].x > w[0].x));
}

#[test]
fn align_leaves_upright_strokes_unrotated() {
    let upright = vec![
        Coordinate::new(0.0, 0.0, false),
        Coordinate::new(0.1, 5.0, false),
        Coordinate::new(0.2, 10.0, true),
    ];
    assert_coords_close(&align(&upright), &upright);
}

#[test]
fn scaling_is_uniform_and_returns_new_values() {
    let coords = to_coordinates(&wavy_offsets(2, 8)).unwrap();
    let scaled = scale(&coords, 2.5);
    for (s, c) in scaled.iter().zip(&coords) {
        assert!(close(s.x, c.x * 2.5) && close(s.y, c.y * 2.5));
    }
    let b = Bounds::of(&coords).unwrap();
    let sb = Bounds::of(&scaled).unwrap();
    assert!(close(sb.width(), b.width() * 2.5));
    assert!(close(sb.height(), b.height() * 2.5));
}
