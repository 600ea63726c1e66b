// Copyright 2025 Lars Brubaker
// License: MIT
//
// Join queue and post-sweep ring repair.
//
// During the sweep, places where two output rings run along a shared edge
// or touch are recorded as joins. Once the sweep ends they are resolved in
// order. A join whose two points belong to different rings merges them; a
// join within one ring splits it in two. There are three kinds:
//   1. horizontal: both points lie anywhere along collinear horizontals at
//      off_pt.y;
//   2. non-horizontal: both points sit at the bottom of a shared collinear
//      segment with off_pt above them;
//   3. strictly simple: both points and off_pt coincide where two edges
//      touch without being collinear.
//
// Ghost joins are provisional horizontal joins with no second point yet.
// They only live until the next band's horizontals are processed.

use crate::edge::INVALID;
use crate::outrec::{OutPtIdx, OutRings};
use crate::point::{slopes_equal3, CInt, IntPoint};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Join {
    pub out_pt1: OutPtIdx,
    pub out_pt2: OutPtIdx,
    pub off_pt: IntPoint,
}

#[derive(Default)]
pub struct JoinQueue {
    pub joins: Vec<Join>,
    pub ghosts: Vec<Join>,
}

impl JoinQueue {
    pub fn new() -> Self {
        JoinQueue {
            joins: Vec::new(),
            ghosts: Vec::new(),
        }
    }

    pub fn add_join(&mut self, out_pt1: OutPtIdx, out_pt2: OutPtIdx, off_pt: IntPoint) {
        self.joins.push(Join {
            out_pt1,
            out_pt2,
            off_pt,
        });
    }

    pub fn add_ghost_join(&mut self, out_pt: OutPtIdx, off_pt: IntPoint) {
        self.ghosts.push(Join {
            out_pt1: out_pt,
            out_pt2: INVALID,
            off_pt,
        });
    }

    pub fn clear_ghosts(&mut self) {
        self.ghosts.clear();
    }

    pub fn clear(&mut self) {
        self.joins.clear();
        self.ghosts.clear();
    }

    /// Resolve every queued join, merging or splitting rings.
    pub fn join_common_edges(&mut self, rings: &mut OutRings, reverse_solution: bool, use_full_range: bool) {
        for i in 0..self.joins.len() {
            let mut join = self.joins[i];
            let r1 = rings.owner(rings.pt(join.out_pt1).idx);
            let mut r2 = rings.owner(rings.pt(join.out_pt2).idx);

            if rings.rec(r1).pts == INVALID || rings.rec(r2).pts == INVALID {
                continue;
            }

            // Decide which fragment carries the right hole state before the
            // rings are rewired.
            let hole_state = rings.hole_state_rec(r1, r2);

            if !join_points(rings, &mut join, r1, r2, use_full_range) {
                continue;
            }
            self.joins[i] = join;

            if r1 == r2 {
                // One ring pinched into two.
                rings.rec_mut(r1).pts = join.out_pt1;
                rings.rec_mut(r1).bottom_pt = INVALID;
                r2 = rings.create_rec();
                rings.rec_mut(r2).pts = join.out_pt2;
                rings.update_out_pt_idxs(r2);

                let (p1, p2) = (rings.rec(r1).pts, rings.rec(r2).pts);
                if rings.poly2_contains_poly1(p2, p1) {
                    tracing::debug!(outer = r1, inner = r2, "join split a nested ring");
                    let hole = !rings.rec(r1).is_hole;
                    rings.rec_mut(r2).is_hole = hole;
                    rings.rec_mut(r2).first_left = r1;
                    rings.fixup_first_lefts2(r2, r1);
                    if (hole ^ reverse_solution) == (rings.rec_area(r2) > 0.0) {
                        rings.reverse_links(p2);
                    }
                } else if rings.poly2_contains_poly1(p1, p2) {
                    tracing::debug!(outer = r2, inner = r1, "join split a nested ring");
                    let r1_hole = rings.rec(r1).is_hole;
                    let r1_fl = rings.rec(r1).first_left;
                    rings.rec_mut(r2).is_hole = r1_hole;
                    rings.rec_mut(r1).is_hole = !r1_hole;
                    rings.rec_mut(r2).first_left = r1_fl;
                    rings.rec_mut(r1).first_left = r2;
                    rings.fixup_first_lefts2(r1, r2);
                    if (!r1_hole ^ reverse_solution) == (rings.rec_area(r1) > 0.0) {
                        rings.reverse_links(p1);
                    }
                } else {
                    tracing::debug!(ring = r1, split = r2, "join split separate rings");
                    rings.rec_mut(r2).is_hole = rings.rec(r1).is_hole;
                    rings.rec_mut(r2).first_left = rings.rec(r1).first_left;
                    rings.fixup_first_lefts1(r1, r2);
                }
            } else {
                // Two rings became one.
                let r1_idx = rings.rec(r1).idx;
                let rec2 = rings.rec_mut(r2);
                rec2.pts = INVALID;
                rec2.bottom_pt = INVALID;
                rec2.idx = r1_idx;

                rings.rec_mut(r1).is_hole = rings.rec(hole_state).is_hole;
                if hole_state == r2 {
                    rings.rec_mut(r1).first_left = rings.rec(r2).first_left;
                }
                rings.rec_mut(r2).first_left = r1;
                rings.fixup_first_lefts3(r2, r1);
            }
        }
    }
}

/// Overlap of the x-spans [a1,a2] and [b1,b2], either order, if non-empty.
fn get_overlap(a1: CInt, a2: CInt, b1: CInt, b2: CInt) -> Option<(CInt, CInt)> {
    let (left, right) = if a1 < a2 {
        if b1 < b2 {
            (a1.max(b1), a2.min(b2))
        } else {
            (a1.max(b2), a2.min(b1))
        }
    } else if b1 < b2 {
        (a2.max(b1), a1.min(b2))
    } else {
        (a2.max(b2), a1.min(b1))
    };
    if left < right {
        Some((left, right))
    } else {
        None
    }
}

/// Cross-link op1/op2 with fresh duplicates so the shared point becomes a
/// seam between the two rings (or two halves of one ring).
fn splice_at(rings: &mut OutRings, join: &mut Join, op1: OutPtIdx, op2: OutPtIdx, reverse: bool) {
    if reverse {
        let op1b = rings.dup_out_pt(op1, false);
        let op2b = rings.dup_out_pt(op2, true);
        rings.pt_mut(op1).prev = op2;
        rings.pt_mut(op2).next = op1;
        rings.pt_mut(op1b).next = op2b;
        rings.pt_mut(op2b).prev = op1b;
        join.out_pt1 = op1;
        join.out_pt2 = op1b;
    } else {
        let op1b = rings.dup_out_pt(op1, true);
        let op2b = rings.dup_out_pt(op2, false);
        rings.pt_mut(op1).next = op2;
        rings.pt_mut(op2).prev = op1;
        rings.pt_mut(op1b).prev = op2b;
        rings.pt_mut(op2b).next = op1b;
        join.out_pt1 = op1;
        join.out_pt2 = op1b;
    }
}

fn join_points(rings: &mut OutRings, join: &mut Join, r1: u32, r2: u32, use_full_range: bool) -> bool {
    let mut op1 = join.out_pt1;
    let mut op2 = join.out_pt2;
    let off = join.off_pt;
    let is_horizontal = rings.xy(op1).y == off.y;

    if is_horizontal && off == rings.xy(op1) && off == rings.xy(op2) {
        // Strictly simple join.
        if r1 != r2 {
            return false;
        }
        let mut op1b = rings.next(op1);
        while op1b != op1 && rings.xy(op1b) == off {
            op1b = rings.next(op1b);
        }
        let reverse1 = rings.xy(op1b).y > off.y;
        let mut op2b = rings.next(op2);
        while op2b != op2 && rings.xy(op2b) == off {
            op2b = rings.next(op2b);
        }
        let reverse2 = rings.xy(op2b).y > off.y;
        if reverse1 == reverse2 {
            return false;
        }
        splice_at(rings, join, op1, op2, reverse1);
        true
    } else if is_horizontal {
        // The two points may lie anywhere along their horizontal runs, so
        // first find the extent of each run.
        let mut op1b = op1;
        while rings.xy(rings.prev(op1)).y == rings.xy(op1).y && rings.prev(op1) != op1b && rings.prev(op1) != op2 {
            op1 = rings.prev(op1);
        }
        while rings.xy(rings.next(op1b)).y == rings.xy(op1b).y && rings.next(op1b) != op1 && rings.next(op1b) != op2 {
            op1b = rings.next(op1b);
        }
        if rings.next(op1b) == op1 || rings.next(op1b) == op2 {
            // A flat ring.
            return false;
        }

        let mut op2b = op2;
        while rings.xy(rings.prev(op2)).y == rings.xy(op2).y && rings.prev(op2) != op2b && rings.prev(op2) != op1b {
            op2 = rings.prev(op2);
        }
        while rings.xy(rings.next(op2b)).y == rings.xy(op2b).y && rings.next(op2b) != op2 && rings.next(op2b) != op1 {
            op2b = rings.next(op2b);
        }
        if rings.next(op2b) == op2 || rings.next(op2b) == op1 {
            return false;
        }

        let (x1, x1b, x2, x2b) = (rings.xy(op1).x, rings.xy(op1b).x, rings.xy(op2).x, rings.xy(op2b).x);
        let (left, right) = match get_overlap(x1, x1b, x2, x2b) {
            Some(span) => span,
            None => return false,
        };

        // Joining overlapping runs leaves a spike that fixup removes later;
        // keep op1 and op2 off the discarded side since other joins may
        // still reference them.
        let (pt, discard_left) = if x1 >= left && x1 <= right {
            (rings.xy(op1), x1 > x1b)
        } else if x2 >= left && x2 <= right {
            (rings.xy(op2), x2 > x2b)
        } else if x1b >= left && x1b <= right {
            (rings.xy(op1b), x1b > x1)
        } else {
            (rings.xy(op2b), x2b > x2)
        };
        join.out_pt1 = op1;
        join.out_pt2 = op2;
        join_horz(rings, op1, op1b, op2, op2b, pt, discard_left)
    } else {
        // Pick the neighbour on each side that runs up along the shared
        // segment toward off_pt.
        let mut op1b = rings.next(op1);
        while rings.xy(op1b) == rings.xy(op1) && op1b != op1 {
            op1b = rings.next(op1b);
        }
        let reverse1 = rings.xy(op1b).y > rings.xy(op1).y
            || !slopes_equal3(rings.xy(op1), rings.xy(op1b), off, use_full_range);
        if reverse1 {
            op1b = rings.prev(op1);
            while rings.xy(op1b) == rings.xy(op1) && op1b != op1 {
                op1b = rings.prev(op1b);
            }
            if rings.xy(op1b).y > rings.xy(op1).y
                || !slopes_equal3(rings.xy(op1), rings.xy(op1b), off, use_full_range)
            {
                return false;
            }
        }
        let mut op2b = rings.next(op2);
        while rings.xy(op2b) == rings.xy(op2) && op2b != op2 {
            op2b = rings.next(op2b);
        }
        let reverse2 = rings.xy(op2b).y > rings.xy(op2).y
            || !slopes_equal3(rings.xy(op2), rings.xy(op2b), off, use_full_range);
        if reverse2 {
            op2b = rings.prev(op2);
            while rings.xy(op2b) == rings.xy(op2) && op2b != op2 {
                op2b = rings.prev(op2b);
            }
            if rings.xy(op2b).y > rings.xy(op2).y
                || !slopes_equal3(rings.xy(op2), rings.xy(op2b), off, use_full_range)
            {
                return false;
            }
        }

        if op1b == op1 || op2b == op2 || op1b == op2b || (r1 == r2 && reverse1 == reverse2) {
            return false;
        }
        splice_at(rings, join, op1, op2, reverse1);
        true
    }
}

/// Splice two opposite-running horizontal runs together at `pt`.
fn join_horz(
    rings: &mut OutRings,
    mut op1: OutPtIdx,
    op1b: OutPtIdx,
    mut op2: OutPtIdx,
    op2b: OutPtIdx,
    pt: IntPoint,
    discard_left: bool,
) -> bool {
    let dir1_ltr = rings.xy(op1).x <= rings.xy(op1b).x;
    let dir2_ltr = rings.xy(op2).x <= rings.xy(op2b).x;
    if dir1_ltr == dir2_ltr {
        return false;
    }

    // When discarding the left side, op1b must end up left of op1 (and
    // likewise op2b), otherwise right of it.
    let op1b = advance_horizontal_end(rings, &mut op1, pt, dir1_ltr, discard_left);
    let op2b = advance_horizontal_end(rings, &mut op2, pt, dir2_ltr, discard_left);

    if dir1_ltr == discard_left {
        rings.pt_mut(op1).prev = op2;
        rings.pt_mut(op2).next = op1;
        rings.pt_mut(op1b).next = op2b;
        rings.pt_mut(op2b).prev = op1b;
    } else {
        rings.pt_mut(op1).next = op2;
        rings.pt_mut(op2).prev = op1;
        rings.pt_mut(op1b).prev = op2b;
        rings.pt_mut(op2b).next = op1b;
    }
    true
}

/// Walk `op` along its horizontal run up to `pt` and leave a duplicate of
/// `pt` on the kept side. Returns the duplicate.
fn advance_horizontal_end(rings: &mut OutRings, op: &mut OutPtIdx, pt: IntPoint, ltr: bool, discard_left: bool) -> OutPtIdx {
    let insert_after;
    if ltr {
        while rings.xy(rings.next(*op)).x <= pt.x
            && rings.xy(rings.next(*op)).x >= rings.xy(*op).x
            && rings.xy(rings.next(*op)).y == pt.y
        {
            *op = rings.next(*op);
        }
        if discard_left && rings.xy(*op).x != pt.x {
            *op = rings.next(*op);
        }
        insert_after = !discard_left;
    } else {
        while rings.xy(rings.next(*op)).x >= pt.x
            && rings.xy(rings.next(*op)).x <= rings.xy(*op).x
            && rings.xy(rings.next(*op)).y == pt.y
        {
            *op = rings.next(*op);
        }
        if !discard_left && rings.xy(*op).x != pt.x {
            *op = rings.next(*op);
        }
        insert_after = discard_left;
    }
    let mut dup = rings.dup_out_pt(*op, insert_after);
    if rings.xy(dup) != pt {
        *op = dup;
        rings.pt_mut(*op).pt = pt;
        dup = rings.dup_out_pt(*op, insert_after);
    }
    dup
}

/// Split rings wherever a vertex repeats, so every ring is simple.
pub fn do_simple_polygons(rings: &mut OutRings) {
    let mut i = 0;
    while i < rings.recs.len() {
        let rec = i as u32;
        i += 1;
        let mut op = rings.rec(rec).pts;
        if op == INVALID {
            continue;
        }
        loop {
            let mut op2 = rings.next(op);
            while op2 != rings.rec(rec).pts {
                if rings.xy(op) == rings.xy(op2) && rings.next(op2) != op && rings.prev(op2) != op {
                    // Split into two rings at the repeated vertex.
                    let op3 = rings.prev(op);
                    let op4 = rings.prev(op2);
                    rings.pt_mut(op).prev = op4;
                    rings.pt_mut(op4).next = op;
                    rings.pt_mut(op2).prev = op3;
                    rings.pt_mut(op3).next = op2;

                    rings.rec_mut(rec).pts = op;
                    let rec2 = rings.create_rec();
                    rings.rec_mut(rec2).pts = op2;
                    rings.update_out_pt_idxs(rec2);
                    if rings.poly2_contains_poly1(op2, op) {
                        let hole = !rings.rec(rec).is_hole;
                        rings.rec_mut(rec2).is_hole = hole;
                        rings.rec_mut(rec2).first_left = rec;
                        rings.fixup_first_lefts2(rec2, rec);
                    } else if rings.poly2_contains_poly1(op, op2) {
                        let hole = rings.rec(rec).is_hole;
                        let fl = rings.rec(rec).first_left;
                        rings.rec_mut(rec2).is_hole = hole;
                        rings.rec_mut(rec).is_hole = !hole;
                        rings.rec_mut(rec2).first_left = fl;
                        rings.rec_mut(rec).first_left = rec2;
                        rings.fixup_first_lefts2(rec, rec2);
                    } else {
                        rings.rec_mut(rec2).is_hole = rings.rec(rec).is_hole;
                        rings.rec_mut(rec2).first_left = rings.rec(rec).first_left;
                        rings.fixup_first_lefts1(rec, rec2);
                    }
                    op2 = op;
                }
                op2 = rings.next(op2);
            }
            op = rings.next(op);
            if op == rings.rec(rec).pts {
                break;
            }
        }
    }
}
