//! Pure coordinate math used while drawing and editing areas.
//!
//! Nothing in here touches the registry or the rendering surface; every
//! function takes coordinates by value and returns fresh ones.

use crate::model::{Point, RectCoords};
use imagemap_core::constants::{TAN_22_5, TAN_67_5};

/// Rounds half-way cases towards positive infinity (`Math.round` semantics).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Moves a negative width/height into the origin so both dimensions end up
/// non-negative. Idempotent.
pub fn normalize_rect(coords: RectCoords) -> RectCoords {
    let mut out = coords;
    if out.width < 0.0 {
        out.x += out.width;
        out.width = -out.width;
    }
    if out.height < 0.0 {
        out.y += out.height;
        out.height = -out.height;
    }
    out
}

/// Shrinks the larger-magnitude dimension to the smaller one's magnitude,
/// keeping its own sign.
pub fn square_rect(coords: RectCoords) -> RectCoords {
    let mut out = coords;
    if out.width.abs() > out.height.abs() {
        out.width = sign(out.width) * out.height.abs();
    } else {
        out.height = sign(out.height) * out.width.abs();
    }
    out
}

// Zero counts as negative, matching the drawing code this was modelled on.
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Adjusts one dimension of `coords` so its aspect ratio matches `original`.
///
/// When the current ratio is at or below the target, the width is derived from
/// the height; otherwise the height is derived from the width. An original
/// without a usable ratio leaves the coordinates unchanged.
pub fn proportional_rect(coords: RectCoords, original: &RectCoords) -> RectCoords {
    let target = original.width / original.height;
    if !target.is_finite() || target == 0.0 {
        return coords;
    }

    let mut out = coords;
    let current = out.width / out.height;
    if current <= target {
        out.width = round_half_up(out.height * target);
    } else {
        out.height = round_half_up(out.width / target);
    }
    out
}

/// Snaps `candidate` onto the nearest of the eight 45° directions around
/// `last`.
///
/// `dy` is measured upward (screen y grows downward). Inside the near-axis
/// sectors (tan below 22.5° or above 67.5°) one coordinate is copied from
/// `last`; in the diagonal sector the larger delta is shortened to the smaller
/// one. Candidates already on an axis are returned unchanged.
pub fn snap_angle(last: Point, candidate: Point) -> Point {
    let dx = candidate.x - last.x;
    let dy = -(candidate.y - last.y);
    let mut out = candidate;

    if dx == 0.0 || dy == 0.0 {
        return out;
    }

    let tan = dy / dx;
    // Quadrants I and III share a positive tangent, II and IV a negative one.
    if tan > 0.0 {
        if tan > TAN_67_5 {
            out.x = last.x;
        } else if tan < TAN_22_5 {
            out.y = last.y;
        } else if dx.abs() > dy.abs() {
            out.x = last.x + dy;
        } else {
            out.y = last.y - dx;
        }
    } else if tan < -TAN_67_5 {
        out.x = last.x;
    } else if tan > -TAN_22_5 {
        out.y = last.y;
    } else if dx.abs() > dy.abs() {
        out.x = last.x - dy;
    } else {
        out.y = last.y + dx;
    }

    out
}

/// Distance from `p` to the segment `a`..`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * abx, a.y + t * aby))
}

/// Even-odd point-in-polygon test.
pub fn point_in_polygon(p: Point, points: &[Point]) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for (i, pi) in points.iter().enumerate() {
        let pj = points[j];
        if (pi.y > p.y) != (pj.y > p.y)
            && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f64, y: f64, width: f64, height: f64) -> RectCoords {
        RectCoords {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_normalize_rect_flips_negative_dimensions() {
        assert_eq!(normalize_rect(rect(50.0, 40.0, -20.0, -10.0)), rect(30.0, 30.0, 20.0, 10.0));
        assert_eq!(normalize_rect(rect(5.0, 5.0, 10.0, 10.0)), rect(5.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn test_square_rect_keeps_sign_of_larger_dimension() {
        assert_eq!(square_rect(rect(0.0, 0.0, -40.0, 10.0)), rect(0.0, 0.0, -10.0, 10.0));
        assert_eq!(square_rect(rect(0.0, 0.0, 10.0, -40.0)), rect(0.0, 0.0, 10.0, -10.0));
        assert_eq!(square_rect(rect(0.0, 0.0, 30.0, 30.0)), rect(0.0, 0.0, 30.0, 30.0));
    }

    #[test]
    fn test_proportional_rect() {
        let original = rect(0.0, 0.0, 100.0, 50.0);
        // Too narrow: width follows height.
        assert_eq!(proportional_rect(rect(0.0, 0.0, 60.0, 40.0), &original), rect(0.0, 0.0, 80.0, 40.0));
        // Too wide: height follows width.
        assert_eq!(proportional_rect(rect(0.0, 0.0, 120.0, 40.0), &original), rect(0.0, 0.0, 120.0, 60.0));
        // Degenerate original leaves the candidate alone.
        let flat = rect(0.0, 0.0, 100.0, 0.0);
        assert_eq!(proportional_rect(rect(1.0, 2.0, 3.0, 4.0), &flat), rect(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(29.9), 30.0);
    }

    #[test]
    fn test_snap_angle_horizontal_and_diagonal() {
        let last = Point::new(100.0, 100.0);
        // dx=10, dy=1 (upward) snaps flat.
        assert_eq!(snap_angle(last, Point::new(110.0, 99.0)), Point::new(110.0, 100.0));
        // dx=10, dy=10 stays on the diagonal.
        assert_eq!(snap_angle(last, Point::new(110.0, 90.0)), Point::new(110.0, 90.0));
        // Steep upward stroke snaps vertical.
        assert_eq!(snap_angle(last, Point::new(101.0, 80.0)), Point::new(100.0, 80.0));
    }

    #[test]
    fn test_snap_angle_each_quadrant_diagonal() {
        let last = Point::new(0.0, 0.0);
        // Up-right, wider than tall: x shortened.
        assert_eq!(snap_angle(last, Point::new(12.0, -10.0)), Point::new(10.0, -10.0));
        // Up-left.
        assert_eq!(snap_angle(last, Point::new(-12.0, -10.0)), Point::new(-10.0, -10.0));
        // Down-left.
        assert_eq!(snap_angle(last, Point::new(-12.0, 10.0)), Point::new(-10.0, 10.0));
        // Down-right, taller than wide: y shortened.
        assert_eq!(snap_angle(last, Point::new(10.0, 12.0)), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_snap_angle_axis_aligned_is_unchanged() {
        let last = Point::new(3.0, 4.0);
        assert_eq!(snap_angle(last, Point::new(3.0, 40.0)), Point::new(3.0, 40.0));
        assert_eq!(snap_angle(last, Point::new(-7.0, 4.0)), Point::new(-7.0, 4.0));
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Point::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(Point::new(15.0, 5.0), &square));
        assert!(!point_in_polygon(Point::new(5.0, 5.0), &[]));
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Point::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Point::new(13.0, 4.0), a, b), 5.0);
        assert_eq!(distance_to_segment(Point::new(0.0, 2.0), a, a), 2.0);
    }

    proptest! {
        #[test]
        fn prop_normalize_rect_is_idempotent(
            x in -1000i32..1000, y in -1000i32..1000,
            w in -1000i32..1000, h in -1000i32..1000,
        ) {
            let once = normalize_rect(rect(x as f64, y as f64, w as f64, h as f64));
            prop_assert!(once.width >= 0.0 && once.height >= 0.0);
            prop_assert_eq!(normalize_rect(once), once);
        }

        #[test]
        fn prop_square_rect_has_equal_magnitudes(
            w in -1000i32..1000, h in -1000i32..1000,
        ) {
            let out = square_rect(rect(0.0, 0.0, w as f64, h as f64));
            prop_assert_eq!(out.width.abs(), out.height.abs());
        }

        #[test]
        fn prop_snap_angle_lands_on_eight_directions(
            lx in -500i32..500, ly in -500i32..500,
            cx in -500i32..500, cy in -500i32..500,
        ) {
            let last = Point::new(lx as f64, ly as f64);
            let out = snap_angle(last, Point::new(cx as f64, cy as f64));
            let dx = out.x - last.x;
            let dy = out.y - last.y;
            prop_assert!(dx == 0.0 || dy == 0.0 || dx.abs() == dy.abs());
        }
    }
}
