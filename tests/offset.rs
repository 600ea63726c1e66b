// Copyright 2025 Lars Brubaker
// Polygon offsetting tests.

mod helpers;

use helpers::*;
use nest_clipper::{area, path_from, ClipperOffset, JoinType, OffsetConfig, Paths};

fn offset(paths: &[nest_clipper::Path], join: JoinType, delta: f64) -> Paths {
    let mut off = ClipperOffset::new();
    off.add_paths(paths, join);
    let out = off.execute(delta).unwrap();
    verify_valid_output(&out);
    out
}

#[test]
fn miter_outset_of_unit_square() {
    let out = offset(&[square(0, 0, 10)], JoinType::Miter, 1.0);
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]), 144.0);
    assert_eq!(out[0].len(), 4);
}

#[test]
fn miter_inset_of_unit_square() {
    let out = offset(&[square(0, 0, 10)], JoinType::Miter, -1.0);
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]).abs(), 64.0);
}

#[test]
fn join_types_order_by_area() {
    let src = [square(0, 0, 1000)];
    let miter = area(&offset(&src, JoinType::Miter, 100.0)[0]);
    let square_join = area(&offset(&src, JoinType::Square, 100.0)[0]);
    let round = area(&offset(&src, JoinType::Round, 100.0)[0]);

    assert_eq!(miter, 1_440_000.0);
    assert!(round > 1_000_000.0 && round < miter, "round {}", round);
    assert!(square_join > 1_000_000.0 && square_join < miter, "square {}", square_join);
    // A true circle of corners adds pi * r^2.
    let ideal = 1_000_000.0 + 4.0 * 1000.0 * 100.0 + std::f64::consts::PI * 100.0 * 100.0;
    assert_area_approx(round, ideal, 200.0, "round");
}

#[test]
fn miter_limit_squares_off_sharp_corners() {
    let spike = path_from(&[(0, 0), (1000, 0), (0, 100)]);
    let mut tight = ClipperOffset::with_config(OffsetConfig {
        miter_limit: 2.0,
        ..OffsetConfig::default()
    });
    tight.add_path(&spike, JoinType::Miter);
    let tight_area = area(&tight.execute(10.0).unwrap()[0]);

    let mut loose = ClipperOffset::with_config(OffsetConfig {
        miter_limit: 50.0,
        ..OffsetConfig::default()
    });
    loose.add_path(&spike, JoinType::Miter);
    let loose_area = area(&loose.execute(10.0).unwrap()[0]);

    assert!(loose_area > tight_area, "loose {} tight {}", loose_area, tight_area);
}

#[test]
fn finer_arc_tolerance_adds_vertices() {
    let src = square(0, 0, 1000);
    let mut coarse = ClipperOffset::with_config(OffsetConfig {
        arc_tolerance: 10.0,
        ..OffsetConfig::default()
    });
    coarse.add_path(&src, JoinType::Round);
    let coarse_out = coarse.execute(100.0).unwrap();

    let mut fine = ClipperOffset::with_config(OffsetConfig {
        arc_tolerance: 0.1,
        ..OffsetConfig::default()
    });
    fine.add_path(&src, JoinType::Round);
    let fine_out = fine.execute(100.0).unwrap();

    assert!(fine_out[0].len() > coarse_out[0].len());
}

#[test]
fn inset_past_the_width_removes_the_ring() {
    let out = offset(&[rect(0, 0, 100, 10)], JoinType::Miter, -6.0);
    assert!(out.is_empty());
}

#[test]
fn overlapping_outsets_merge() {
    let out = offset(&[square(0, 0, 10), square(12, 0, 10)], JoinType::Miter, 2.0);
    assert_eq!(out.len(), 1);
    // 14x26 bounding box
    assert_eq!(area(&out[0]), 14.0 * 26.0);
}

#[test]
fn concave_outset_fills_the_notch() {
    // U shape: a 30x30 block with a 10x20 notch cut from the top.
    let u = path_from(&[(0, 0), (10, 0), (10, 20), (20, 20), (20, 0), (30, 0), (30, 30), (0, 30)]);
    let out = offset(&[u.clone()], JoinType::Miter, 5.0);
    assert_eq!(out.len(), 1);
    // The notch is exactly twice the offset wide, so it closes.
    assert_eq!(area(&out[0]), 40.0 * 40.0);
}

#[test]
fn holes_shrink_when_outer_grows() {
    let outer = square(0, 0, 100);
    let hole = reversed(square(30, 30, 40));
    let out = offset(&[outer, hole], JoinType::Miter, 5.0);
    assert_eq!(out.len(), 2);
    // 110x110 minus a 30x30 hole.
    assert_eq!(net_area(&out), 110.0 * 110.0 - 30.0 * 30.0);
}

#[test]
fn reversed_input_offsets_the_same_way() {
    let out = offset(&[reversed(square(0, 0, 10))], JoinType::Miter, 1.0);
    assert_eq!(area(&out[0]), 144.0);
}

#[test]
fn zero_delta_is_passthrough() {
    let out = offset(&[square(0, 0, 10)], JoinType::Square, 0.0);
    assert_eq!(out, vec![square(0, 0, 10)]);
}

#[test]
fn clear_drops_queued_paths() {
    let mut off = ClipperOffset::new();
    off.add_path(&square(0, 0, 10), JoinType::Miter);
    off.clear();
    assert!(off.execute(1.0).unwrap().is_empty());
}
