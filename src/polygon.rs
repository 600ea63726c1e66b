// Copyright 2025 Lars Brubaker
// License: MIT
//
// Free functions over closed paths.

use crate::clipper::{ClipType, Clipper, PolyFillType, PolyType};
use crate::config::ClipOption;
use crate::error::ClipResult;
use crate::outrec::crossing_step;
use crate::point::{IntPoint, Path, Paths};

pub use crate::point::{scale_path_down, scale_path_up};

/// Distance below which `clean_polygon` callers usually merge vertices.
pub const DEFAULT_CLEAN_DISTANCE: f64 = 1.415;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointLocation {
    Outside,
    Inside,
    OnBoundary,
}

/// Signed shoelace area. Paths shorter than 3 points have zero area.
pub fn area(path: &[IntPoint]) -> f64 {
    if path.len() < 3 {
        return 0.0;
    }
    let mut a = 0.0;
    let mut prev = path[path.len() - 1];
    for &cur in path {
        a += (prev.x as f64 + cur.x as f64) * (prev.y as f64 - cur.y as f64);
        prev = cur;
    }
    -a * 0.5
}

pub fn orientation(path: &[IntPoint]) -> bool {
    area(path) >= 0.0
}

pub fn reverse_path(path: &mut Path) {
    path.reverse();
}

pub fn reverse_paths(paths: &mut Paths) {
    for path in paths {
        path.reverse();
    }
}

pub fn point_in_polygon(pt: IntPoint, path: &[IntPoint]) -> PointLocation {
    if path.len() < 3 {
        return PointLocation::Outside;
    }
    let mut result = 0;
    let mut a = path[path.len() - 1];
    for &b in path {
        if crossing_step(pt, a, b, &mut result).is_some() {
            return PointLocation::OnBoundary;
        }
        a = b;
    }
    if result == 0 {
        PointLocation::Outside
    } else {
        PointLocation::Inside
    }
}

fn points_are_close(a: IntPoint, b: IntPoint, dist_sqrd: f64) -> bool {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    dx * dx + dy * dy <= dist_sqrd
}

/// Squared distance from `pt` to the infinite line through `ln1` and `ln2`.
fn distance_from_line_sqrd(pt: IntPoint, ln1: IntPoint, ln2: IntPoint) -> f64 {
    let a = ln1.y as f64 - ln2.y as f64;
    let b = ln2.x as f64 - ln1.x as f64;
    let c = a * ln1.x as f64 + b * ln1.y as f64;
    let c = a * pt.x as f64 + b * pt.y as f64 - c;
    (c * c) / (a * a + b * b)
}

/// Whether `p2` lies within the squared distance of the line through the
/// other two. The point that sits between the others is the one measured.
fn slopes_near_collinear(p1: IntPoint, p2: IntPoint, p3: IntPoint, dist_sqrd: f64) -> bool {
    let between = |a: IntPoint, b: IntPoint, c: IntPoint| {
        if p1.x.abs_diff(p2.x) > p1.y.abs_diff(p2.y) {
            (a.x > b.x) == (a.x < c.x)
        } else {
            (a.y > b.y) == (a.y < c.y)
        }
    };
    if between(p1, p2, p3) {
        distance_from_line_sqrd(p1, p2, p3) < dist_sqrd
    } else if between(p2, p1, p3) {
        distance_from_line_sqrd(p2, p1, p3) < dist_sqrd
    } else {
        distance_from_line_sqrd(p3, p1, p2) < dist_sqrd
    }
}

/// Unlink `op` from the ring and return its predecessor, which must be
/// rechecked.
fn unlink(op: usize, next: &mut [usize], prev: &mut [usize], kept: &mut [bool]) -> usize {
    let p = prev[op];
    let nx = next[op];
    next[p] = nx;
    prev[nx] = p;
    kept[p] = false;
    p
}

/// Remove vertices within `distance` of a neighbour, vertices whose
/// neighbours are that close to each other, and vertices that lie within
/// `distance` of the line through their neighbours. A result with fewer
/// than 3 points is returned empty.
pub fn clean_polygon(path: &[IntPoint], distance: f64) -> Path {
    let n = path.len();
    if n == 0 {
        return Path::new();
    }
    let mut next: Vec<usize> = (0..n).map(|i| (i + 1) % n).collect();
    let mut prev: Vec<usize> = (0..n).map(|i| (i + n - 1) % n).collect();
    let mut kept = vec![false; n];
    let mut size = n;
    let dist_sqrd = distance * distance;

    let mut op = 0;
    while !kept[op] && next[op] != prev[op] {
        let (p, nx) = (prev[op], next[op]);
        if points_are_close(path[op], path[p], dist_sqrd) {
            op = unlink(op, &mut next, &mut prev, &mut kept);
            size -= 1;
        } else if points_are_close(path[p], path[nx], dist_sqrd) {
            unlink(nx, &mut next, &mut prev, &mut kept);
            op = unlink(op, &mut next, &mut prev, &mut kept);
            size -= 2;
        } else if slopes_near_collinear(path[p], path[op], path[nx], dist_sqrd) {
            op = unlink(op, &mut next, &mut prev, &mut kept);
            size -= 1;
        } else {
            kept[op] = true;
            op = nx;
        }
    }

    if size < 3 {
        return Path::new();
    }
    let mut out = Path::with_capacity(size);
    for _ in 0..size {
        out.push(path[op]);
        op = next[op];
    }
    out
}

pub fn clean_polygons(paths: &[Path], distance: f64) -> Paths {
    paths.iter().map(|p| clean_polygon(p, distance)).collect()
}

/// Union `path` with itself into strictly simple rings.
pub fn simplify_polygon(path: &[IntPoint], fill: PolyFillType) -> ClipResult<Paths> {
    let mut clipper = Clipper::new();
    clipper.set_option(ClipOption::StrictlySimple, true);
    let mut solution = Paths::new();
    if clipper.add_path(path, PolyType::Subject).is_ok() {
        clipper.execute(ClipType::Union, &mut solution, fill)?;
    }
    Ok(solution)
}

pub fn simplify_polygons(paths: &[Path], fill: PolyFillType) -> ClipResult<Paths> {
    let mut clipper = Clipper::new();
    clipper.set_option(ClipOption::StrictlySimple, true);
    let mut solution = Paths::new();
    if clipper.add_paths(paths, PolyType::Subject) {
        clipper.execute(ClipType::Union, &mut solution, fill)?;
    }
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::path_from;

    fn square() -> Path {
        path_from(&[(0, 0), (10, 0), (10, 10), (0, 10)])
    }

    #[test]
    fn area_sign_follows_orientation() {
        let mut sq = square();
        assert_eq!(area(&sq), 100.0);
        assert!(orientation(&sq));
        reverse_path(&mut sq);
        assert_eq!(area(&sq), -100.0);
        assert!(!orientation(&sq));
        assert_eq!(area(&sq[..2]), 0.0);
    }

    #[test]
    fn reverse_paths_flips_each() {
        let mut paths = vec![square(), square()];
        reverse_paths(&mut paths);
        assert!(paths.iter().all(|p| area(p) < 0.0));
    }

    #[test]
    fn point_locations() {
        let sq = square();
        assert_eq!(point_in_polygon(IntPoint::new(5, 5), &sq), PointLocation::Inside);
        assert_eq!(point_in_polygon(IntPoint::new(15, 5), &sq), PointLocation::Outside);
        assert_eq!(point_in_polygon(IntPoint::new(10, 5), &sq), PointLocation::OnBoundary);
        assert_eq!(point_in_polygon(IntPoint::new(0, 0), &sq), PointLocation::OnBoundary);
        assert_eq!(point_in_polygon(IntPoint::new(5, 0), &sq), PointLocation::OnBoundary);
        assert_eq!(
            point_in_polygon(IntPoint::new(1, 1), &sq[..2]),
            PointLocation::Outside
        );
    }

    #[test]
    fn clean_drops_near_duplicates_and_collinear_points() {
        let noisy = path_from(&[(0, 0), (5, 0), (10, 0), (10, 10), (10, 10), (0, 10)]);
        let cleaned = clean_polygon(&noisy, DEFAULT_CLEAN_DISTANCE);
        assert_eq!(cleaned.len(), 4);
        assert_eq!(area(&cleaned).abs(), 100.0);
        assert_eq!(cleaned, square());
    }

    #[test]
    fn clean_collapses_slivers() {
        let sliver = path_from(&[(0, 0), (10, 0), (20, 1)]);
        assert!(clean_polygon(&sliver, 2.0).is_empty());
        assert!(clean_polygon(&[], 1.0).is_empty());
        assert!(clean_polygon(&path_from(&[(0, 0), (5, 5)]), 1.0).is_empty());
        assert_eq!(clean_polygons(&[square(), Path::new()], 1.0)[0].len(), 4);
    }

    #[test]
    fn simplify_splits_bow_tie() {
        let bow_tie = path_from(&[(0, 0), (10, 10), (10, 0), (0, 10)]);
        let out = simplify_polygon(&bow_tie, PolyFillType::NonZero).unwrap();
        assert_eq!(out.len(), 2);
        let total: f64 = out.iter().map(|p| area(p).abs()).sum();
        assert_eq!(total, 50.0);
    }

    #[test]
    fn simplify_many_merges_overlap() {
        let a = square();
        let b = path_from(&[(5, 0), (15, 0), (15, 10), (5, 10)]);
        let out = simplify_polygons(&[a, b], PolyFillType::NonZero).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(area(&out[0]), 150.0);
    }
}
