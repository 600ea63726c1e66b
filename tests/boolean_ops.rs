// Copyright 2025 Lars Brubaker
// Boolean operation correctness tests with area verification.

mod helpers;

use helpers::*;
use nest_clipper::{area, ClipType, Clipper, Paths, PolyFillType, PolyType};

/// Two 10x10 squares overlapping in a 5x5 corner.
fn offset_squares() -> (nest_clipper::Path, nest_clipper::Path) {
    (square(0, 0, 10), square(5, 5, 10))
}

#[test]
fn union_of_offset_squares() {
    let (a, b) = offset_squares();
    let out = clip(ClipType::Union, &[a], &[b], PolyFillType::NonZero);
    verify_valid_output(&out);
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]), 175.0);
}

#[test]
fn difference_of_offset_squares() {
    let (a, b) = offset_squares();
    let out = clip(ClipType::Difference, &[a], &[b], PolyFillType::NonZero);
    verify_valid_output(&out);
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]), 75.0);
}

#[test]
fn intersection_of_offset_squares() {
    let (a, b) = offset_squares();
    let out = clip(ClipType::Intersection, &[a], &[b], PolyFillType::NonZero);
    verify_valid_output(&out);
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]), 25.0);
    let mut corners = out[0].clone();
    corners.sort_by_key(|p| (p.x, p.y));
    assert_eq!(corners, {
        let mut s = square(5, 5, 5);
        s.sort_by_key(|p| (p.x, p.y));
        s
    });
}

#[test]
fn xor_of_offset_squares() {
    let (a, b) = offset_squares();
    let out = clip(ClipType::Xor, &[a], &[b], PolyFillType::NonZero);
    verify_valid_output(&out);
    // Either two L-shapes or an outline with the overlap as a hole.
    assert_area_approx(net_area(&out), 150.0, 1e-9, "xor");
}

#[test]
fn disjoint_union_keeps_both_rings() {
    let a = square(0, 0, 10);
    let b = rect(100, -20, 7, 3);
    let out = clip(ClipType::Union, &[a.clone()], &[b.clone()], PolyFillType::NonZero);
    verify_valid_output(&out);
    assert_eq!(out.len(), 2);
    assert_eq!(total_abs_area(&out), area(&a) + area(&b));
}

#[test]
fn disjoint_intersection_is_empty() {
    let out = clip(
        ClipType::Intersection,
        &[square(0, 0, 10)],
        &[square(50, 50, 10)],
        PolyFillType::NonZero,
    );
    assert!(out.is_empty());
}

#[test]
fn difference_with_nothing_returns_subject() {
    let a = square(0, 0, 10);
    let out = clip(ClipType::Difference, &[a.clone()], &[], PolyFillType::NonZero);
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]), area(&a));
}

#[test]
fn subject_only_union_merges_overlaps() {
    let out = clip(
        ClipType::Union,
        &[square(0, 0, 10), square(5, 5, 10), square(12, 4, 3)],
        &[],
        PolyFillType::NonZero,
    );
    verify_valid_output(&out);
    assert_eq!(out.len(), 1);
    // 175 from the pair, plus the 3x3 square minus its 3x2 overlap with the second.
    assert_eq!(area(&out[0]), 178.0);
}

#[test]
fn touching_squares_union_into_one_ring() {
    let out = clip(
        ClipType::Union,
        &[square(0, 0, 10)],
        &[square(10, 0, 10)],
        PolyFillType::NonZero,
    );
    verify_valid_output(&out);
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]), 200.0);
    assert_eq!(out[0].len(), 4);
}

#[test]
fn triangle_clipped_by_square() {
    let tri = nest_clipper::path_from(&[(0, 0), (20, 0), (10, 20)]);
    let out = clip(ClipType::Intersection, &[tri], &[square(0, 0, 10)], PolyFillType::NonZero);
    verify_valid_output(&out);
    assert_eq!(out.len(), 1);
    // The square minus the sliver left of the triangle's left edge.
    assert_eq!(area(&out[0]), 75.0);
}

#[test]
fn area_identities_on_random_convex_pairs() {
    let mut rng = seeded(7);
    for case in 0..20 {
        let a = random_convex(&mut rng, (0, 0), 1000.0, 12);
        let b = random_convex(&mut rng, (400, 300), 800.0, 9);
        let (area_a, area_b) = (area(&a).abs(), area(&b).abs());

        let i = total_abs_area(&clip(ClipType::Intersection, &[a.clone()], &[b.clone()], PolyFillType::NonZero));
        let u = clip(ClipType::Union, &[a.clone()], &[b.clone()], PolyFillType::NonZero);
        let d = clip(ClipType::Difference, &[a.clone()], &[b.clone()], PolyFillType::NonZero);
        verify_valid_output(&u);
        verify_valid_output(&d);

        let tolerance = (area_a + area_b) * 1e-3;
        assert_area_approx(net_area(&u), area_a + area_b - i, tolerance, &format!("union {}", case));
        assert_area_approx(net_area(&d), area_a - i, tolerance, &format!("difference {}", case));
    }
}

#[test]
fn solution_is_appended_not_replaced() {
    let mut c = Clipper::new();
    c.add_path(&square(0, 0, 10), PolyType::Subject).unwrap();
    let mut solution: Paths = vec![square(100, 100, 1)];
    c.execute(ClipType::Union, &mut solution, PolyFillType::NonZero).unwrap();
    assert_eq!(solution.len(), 2);
    assert_eq!(solution[0], square(100, 100, 1));
}

#[test]
fn separate_fill_rules_per_side() {
    // The subject pair overlaps itself; EvenOdd drops the overlap before the
    // clip is applied, NonZero keeps it.
    let subjects = [square(0, 0, 10), square(5, 0, 10)];
    let clip_sq = [square(0, 0, 15)];

    let run = |subj_fill| {
        let mut c = Clipper::new();
        c.add_paths(&subjects, PolyType::Subject);
        c.add_paths(&clip_sq, PolyType::Clip);
        let mut out = Paths::new();
        c.execute_with_fill_types(ClipType::Intersection, &mut out, subj_fill, PolyFillType::NonZero)
            .unwrap();
        out
    };
    assert_eq!(total_abs_area(&run(PolyFillType::NonZero)), 150.0);
    assert_eq!(total_abs_area(&run(PolyFillType::EvenOdd)), 100.0);
}
