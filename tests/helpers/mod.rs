// Copyright 2025 Lars Brubaker
// Shared test utilities for nest-clipper tests.

#![allow(dead_code)]

use nest_clipper::{
    area, path_from, point_in_polygon, CInt, ClipType, Clipper, IntPoint, Path, Paths,
    PointLocation, PolyFillType, PolyType,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Axis-aligned square with positive orientation.
pub fn square(x: CInt, y: CInt, size: CInt) -> Path {
    rect(x, y, size, size)
}

pub fn rect(x: CInt, y: CInt, w: CInt, h: CInt) -> Path {
    path_from(&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)])
}

pub fn reversed(mut path: Path) -> Path {
    path.reverse();
    path
}

/// Sum of absolute ring areas. Holes are not subtracted.
pub fn total_abs_area(paths: &Paths) -> f64 {
    paths.iter().map(|p| area(p).abs()).sum()
}

/// Sum of signed ring areas: outers positive, holes negative.
pub fn net_area(paths: &Paths) -> f64 {
    paths.iter().map(|p| area(p)).sum()
}

pub fn assert_area_approx(actual: f64, expected: f64, tolerance: f64, label: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{}: expected area ~{}, got {} (diff={})",
        label,
        expected,
        actual,
        (actual - expected).abs()
    );
}

/// Run one boolean operation with the same fill rule for both sides.
pub fn clip(
    clip_type: ClipType,
    subjects: &[Path],
    clips: &[Path],
    fill: PolyFillType,
) -> Paths {
    let mut c = Clipper::new();
    c.add_paths(subjects, PolyType::Subject);
    c.add_paths(clips, PolyType::Clip);
    let mut solution = Paths::new();
    c.execute(clip_type, &mut solution, fill)
        .unwrap_or_else(|e| panic!("{:?} failed: {}", clip_type, e));
    solution
}

/// Every output ring must be closed over at least 3 distinct points and
/// free of consecutive duplicates.
pub fn verify_valid_output(paths: &Paths) {
    for (i, path) in paths.iter().enumerate() {
        assert!(path.len() >= 3, "ring {} has only {} points", i, path.len());
        for j in 0..path.len() {
            let next = path[(j + 1) % path.len()];
            assert_ne!(path[j], next, "ring {} repeats point {:?}", i, next);
        }
        assert!(area(path) != 0.0, "ring {} has zero area", i);
    }
}

/// Random convex polygon: points on a circle around `center`, sorted by
/// angle.
pub fn random_convex(rng: &mut StdRng, center: (CInt, CInt), radius: f64, vertices: usize) -> Path {
    let mut angles: Vec<f64> = (0..vertices)
        .map(|_| rng.gen_range(0.0..std::f64::consts::TAU))
        .collect();
    angles.sort_by(|a, b| a.total_cmp(b));
    angles
        .into_iter()
        .map(|a| {
            IntPoint::new(
                center.0 + (radius * a.cos()).round() as CInt,
                center.1 + (radius * a.sin()).round() as CInt,
            )
        })
        .collect()
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Count of `paths` containing `pt` strictly inside, as EvenOdd would see it.
pub fn inside_count(paths: &Paths, pt: IntPoint) -> usize {
    paths
        .iter()
        .filter(|p| point_in_polygon(pt, p) == PointLocation::Inside)
        .count()
}
