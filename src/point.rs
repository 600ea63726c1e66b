// Copyright 2025 Lars Brubaker
// License: MIT
//
// Integer coordinate primitive and the geometric predicates the sweep relies on.
//
// Coordinates are i64. While every input stays inside LOW_RANGE, slope tests
// multiply in i64 without overflow; once any coordinate exceeds it the engine
// switches to i128 products for the rest of the run.

use crate::config::{HIGH_RANGE, HORIZONTAL, LOW_RANGE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type CInt = i64;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntPoint {
    pub x: CInt,
    pub y: CInt,
}

pub type Path = Vec<IntPoint>;
pub type Paths = Vec<Path>;

impl IntPoint {
    #[inline]
    pub const fn new(x: CInt, y: CInt) -> Self {
        IntPoint { x, y }
    }

    /// True when both axes differ by at most `tolerance`.
    #[inline]
    pub fn almost_equal(&self, other: &IntPoint, tolerance: CInt) -> bool {
        let tolerance = tolerance.unsigned_abs();
        self.x.abs_diff(other.x) <= tolerance && self.y.abs_diff(other.y) <= tolerance
    }
}

impl From<(CInt, CInt)> for IntPoint {
    fn from((x, y): (CInt, CInt)) -> Self {
        IntPoint { x, y }
    }
}

/// Build a path from coordinate pairs.
pub fn path_from(coords: &[(CInt, CInt)]) -> Path {
    coords.iter().map(|&c| IntPoint::from(c)).collect()
}

/// Convert float coordinates to integers by multiplying with `scale`.
pub fn scale_path_up(coords: &[(f64, f64)], scale: f64) -> Path {
    coords
        .iter()
        .map(|&(x, y)| IntPoint::new(round(x * scale), round(y * scale)))
        .collect()
}

pub fn scale_path_down(path: &Path, scale: f64) -> Vec<(f64, f64)> {
    path.iter()
        .map(|p| (p.x as f64 / scale, p.y as f64 / scale))
        .collect()
}

/// Escalate `use_full_range` when `pt` leaves the low range.
///
/// Points beyond the high range are still accepted; slope arithmetic may
/// lose exactness there, so a warning is logged.
pub fn range_test(pt: IntPoint, use_full_range: &mut bool) {
    let (ax, ay) = (pt.x.unsigned_abs(), pt.y.unsigned_abs());
    if *use_full_range {
        if ax > HIGH_RANGE as u64 || ay > HIGH_RANGE as u64 {
            tracing::warn!(x = pt.x, y = pt.y, "coordinate outside the supported range");
        }
    } else if ax > LOW_RANGE as u64 || ay > LOW_RANGE as u64 {
        tracing::debug!(x = pt.x, y = pt.y, "switching to full-range arithmetic");
        *use_full_range = true;
        range_test(pt, use_full_range);
    }
}

/// Do segments (p1,p2) and (p2,p3) have the same slope?
#[inline]
pub fn slopes_equal3(p1: IntPoint, p2: IntPoint, p3: IntPoint, use_full_range: bool) -> bool {
    slopes_equal4(p1, p2, p2, p3, use_full_range)
}

/// Do segments (p1,p2) and (p3,p4) have the same slope?
#[inline]
pub fn slopes_equal4(
    p1: IntPoint,
    p2: IntPoint,
    p3: IntPoint,
    p4: IntPoint,
    use_full_range: bool,
) -> bool {
    if use_full_range {
        let a = (p1.y as i128 - p2.y as i128).wrapping_mul(p3.x as i128 - p4.x as i128);
        let b = (p1.x as i128 - p2.x as i128).wrapping_mul(p3.y as i128 - p4.y as i128);
        a == b
    } else {
        (p1.y - p2.y) * (p3.x - p4.x) == (p1.x - p2.x) * (p3.y - p4.y)
    }
}

/// Is `p2` strictly between `p1` and `p3` on their common line?
pub fn pt2_is_between_pt1_and_pt3(p1: IntPoint, p2: IntPoint, p3: IntPoint) -> bool {
    if p1 == p3 || p1 == p2 || p3 == p2 {
        false
    } else if p1.x != p3.x {
        (p2.x > p1.x) == (p2.x < p3.x)
    } else {
        (p2.y > p1.y) == (p2.y < p3.y)
    }
}

/// Inverse slope from `p1` to `p2`, or `HORIZONTAL` when they share a y.
#[inline]
pub fn get_dx(p1: IntPoint, p2: IntPoint) -> f64 {
    if p1.y == p2.y {
        HORIZONTAL
    } else {
        (p2.x as f64 - p1.x as f64) / (p2.y as f64 - p1.y as f64)
    }
}

/// Round half away from zero.
#[inline]
pub fn round(v: f64) -> CInt {
    v.round() as CInt
}

/// Do the open x-intervals [a1,a2] and [b1,b2] overlap (in either order)?
#[inline]
pub fn horz_segments_overlap(a1: CInt, a2: CInt, b1: CInt, b2: CInt) -> bool {
    let (a1, a2) = if a1 > a2 { (a2, a1) } else { (a1, a2) };
    let (b1, b2) = if b1 > b2 { (b2, b1) } else { (b1, b2) };
    a1 < b2 && b1 < a2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn almost_equal_respects_tolerance() {
        let a = IntPoint::new(10, 10);
        assert!(a.almost_equal(&IntPoint::new(10, 10), 0));
        assert!(!a.almost_equal(&IntPoint::new(11, 10), 0));
        assert!(a.almost_equal(&IntPoint::new(11, 9), 1));

        let lo = IntPoint::new(CInt::MIN + 1, CInt::MIN + 1);
        let hi = IntPoint::new(CInt::MAX - 1, CInt::MAX - 1);
        assert!(!lo.almost_equal(&hi, 0));
        assert!(hi.almost_equal(&hi, 0));
    }

    #[test]
    fn scaling_rounds_to_nearest() {
        let path = scale_path_up(&[(0.5, -0.25), (1.00000004, 2.0)], 10.0);
        assert_eq!(path, path_from(&[(5, -3), (10, 20)]));
        let back = scale_path_down(&path, 10.0);
        assert_eq!(back, vec![(0.5, -0.3), (1.0, 2.0)]);
    }

    #[test]
    fn range_test_escalates_once() {
        let mut full = false;
        range_test(IntPoint::new(100, -100), &mut full);
        assert!(!full);
        range_test(IntPoint::new(LOW_RANGE + 1, 0), &mut full);
        assert!(full);
        // Beyond the high range only warns.
        range_test(IntPoint::new(CInt::MAX, CInt::MIN), &mut full);
        assert!(full);
    }

    #[test]
    fn beyond_high_range_keeps_full_range() {
        let mut full = false;
        range_test(IntPoint::new(HIGH_RANGE + 1, 0), &mut full);
        assert!(full);
        range_test(IntPoint::new(0, -(HIGH_RANGE + 1)), &mut full);
        assert!(full);
    }

    #[test]
    fn dx_of_extreme_edges_is_finite() {
        let m = CInt::MAX - 1;
        assert_eq!(get_dx(IntPoint::new(-m, -m), IntPoint::new(m, m)), 1.0);
        assert_eq!(get_dx(IntPoint::new(m, -m), IntPoint::new(-m, m)), -1.0);
    }

    #[test]
    fn slopes_equal_both_ranges() {
        let p1 = IntPoint::new(0, 0);
        let p2 = IntPoint::new(5, 5);
        let p3 = IntPoint::new(10, 10);
        let p4 = IntPoint::new(10, 11);
        assert!(slopes_equal3(p1, p2, p3, false));
        assert!(slopes_equal3(p1, p2, p3, true));
        assert!(!slopes_equal3(p1, p2, p4, false));

        let big = 1 << 40;
        let q1 = IntPoint::new(0, 0);
        let q2 = IntPoint::new(big, big);
        let q3 = IntPoint::new(2 * big, 2 * big);
        assert!(slopes_equal3(q1, q2, q3, true));
        assert!(!slopes_equal3(q1, q2, IntPoint::new(2 * big, 2 * big + 1), true));
    }

    #[test]
    fn between_checks_strict_interior() {
        let a = IntPoint::new(0, 0);
        let c = IntPoint::new(10, 0);
        assert!(pt2_is_between_pt1_and_pt3(a, IntPoint::new(5, 0), c));
        assert!(!pt2_is_between_pt1_and_pt3(a, IntPoint::new(15, 0), c));
        assert!(!pt2_is_between_pt1_and_pt3(a, a, c));
        let v = IntPoint::new(0, 10);
        assert!(pt2_is_between_pt1_and_pt3(a, IntPoint::new(0, 3), v));
    }

    #[test]
    fn dx_and_rounding() {
        assert_eq!(get_dx(IntPoint::new(0, 0), IntPoint::new(4, 0)), HORIZONTAL);
        assert_eq!(get_dx(IntPoint::new(0, 0), IntPoint::new(4, 2)), 2.0);
        assert_eq!(round(2.5), 3);
        assert_eq!(round(-2.5), -3);
        assert_eq!(round(-2.4), -2);
    }

    #[test]
    fn horizontal_overlap_is_open() {
        assert!(horz_segments_overlap(0, 10, 5, 15));
        assert!(horz_segments_overlap(10, 0, 15, 5));
        assert!(!horz_segments_overlap(0, 10, 10, 20));
    }
}
