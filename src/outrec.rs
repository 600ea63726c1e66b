// Copyright 2025 Lars Brubaker
// License: MIT
//
// Output ring manager.
//
// Output points live in one arena and form circular doubly-linked rings.
// Each `OutRec` names one ring by an entry point (`pts`), which is the
// left-most end while the ring is being built; `pts.prev` is the right-most
// end. When two rings merge, the absorbed one keeps no points and its `idx`
// redirects to the survivor; `owner` follows those redirects.

use crate::edge::{EdgeSide, INVALID};
use crate::point::{get_dx, pt2_is_between_pt1_and_pt3, slopes_equal3, IntPoint, Path};

pub type OutPtIdx = u32;
pub type OutRecIdx = u32;

#[derive(Clone, Debug)]
pub struct OutPt {
    /// Ring the point was created for; resolve through `OutRings::owner`.
    pub idx: OutRecIdx,
    pub pt: IntPoint,
    pub next: OutPtIdx,
    pub prev: OutPtIdx,
}

#[derive(Clone, Debug)]
pub struct OutRec {
    /// Redirect to the ring that absorbed this one; equals its own index
    /// while the ring is live.
    pub idx: OutRecIdx,
    pub is_hole: bool,
    /// Nearest ring known to contain this one, or INVALID.
    pub first_left: OutRecIdx,
    pub pts: OutPtIdx,
    /// Cached bottom-most point, INVALID when stale.
    pub bottom_pt: OutPtIdx,
}

#[derive(Default)]
pub struct OutRings {
    pub pts: Vec<OutPt>,
    pub recs: Vec<OutRec>,
}

impl OutRings {
    pub fn new() -> Self {
        OutRings {
            pts: Vec::new(),
            recs: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.pts.clear();
        self.recs.clear();
    }

    #[inline]
    pub fn pt(&self, op: OutPtIdx) -> &OutPt {
        &self.pts[op as usize]
    }

    #[inline]
    pub fn pt_mut(&mut self, op: OutPtIdx) -> &mut OutPt {
        &mut self.pts[op as usize]
    }

    #[inline]
    pub fn rec(&self, r: OutRecIdx) -> &OutRec {
        &self.recs[r as usize]
    }

    #[inline]
    pub fn rec_mut(&mut self, r: OutRecIdx) -> &mut OutRec {
        &mut self.recs[r as usize]
    }

    #[inline]
    pub(crate) fn next(&self, op: OutPtIdx) -> OutPtIdx {
        self.pt(op).next
    }

    #[inline]
    pub(crate) fn prev(&self, op: OutPtIdx) -> OutPtIdx {
        self.pt(op).prev
    }

    #[inline]
    pub(crate) fn xy(&self, op: OutPtIdx) -> IntPoint {
        self.pt(op).pt
    }

    pub fn create_rec(&mut self) -> OutRecIdx {
        let idx = self.recs.len() as OutRecIdx;
        self.recs.push(OutRec {
            idx,
            is_hole: false,
            first_left: INVALID,
            pts: INVALID,
            bottom_pt: INVALID,
        });
        idx
    }

    /// Start `rec`'s ring with a single point.
    pub fn start_ring(&mut self, rec: OutRecIdx, pt: IntPoint) -> OutPtIdx {
        let op = self.pts.len() as OutPtIdx;
        self.pts.push(OutPt {
            idx: rec,
            pt,
            next: op,
            prev: op,
        });
        self.rec_mut(rec).pts = op;
        op
    }

    /// Add `pt` at the front (left side) or back (right side) of `rec`'s ring.
    ///
    /// A point equal to the current end is not duplicated; that end is
    /// returned instead.
    pub fn push_point(&mut self, rec: OutRecIdx, pt: IntPoint, to_front: bool) -> OutPtIdx {
        let op = self.rec(rec).pts;
        let back = self.prev(op);
        if to_front && pt == self.xy(op) {
            return op;
        }
        if !to_front && pt == self.xy(back) {
            return back;
        }
        let new_op = self.pts.len() as OutPtIdx;
        self.pts.push(OutPt {
            idx: rec,
            pt,
            next: op,
            prev: back,
        });
        self.pt_mut(back).next = new_op;
        self.pt_mut(op).prev = new_op;
        if to_front {
            self.rec_mut(rec).pts = new_op;
        }
        new_op
    }

    /// Canonical live ring for `idx`, compressing the redirect chain.
    pub fn owner(&mut self, idx: OutRecIdx) -> OutRecIdx {
        let mut root = idx;
        let mut hops = 0usize;
        while self.rec(root).idx != root {
            root = self.rec(root).idx;
            hops += 1;
            debug_assert!(hops <= self.recs.len(), "output ring redirect cycle");
        }
        let mut r = idx;
        while self.rec(r).idx != root {
            let next = self.rec(r).idx;
            self.rec_mut(r).idx = root;
            r = next;
        }
        root
    }

    /// The ring end an edge on `side` is currently extending.
    pub fn last_point(&self, rec: OutRecIdx, side: EdgeSide) -> OutPtIdx {
        let op = self.rec(rec).pts;
        match side {
            EdgeSide::Left => op,
            EdgeSide::Right => self.prev(op),
        }
    }

    pub fn dup_out_pt(&mut self, op: OutPtIdx, insert_after: bool) -> OutPtIdx {
        let src = self.pt(op).clone();
        let new_op = self.pts.len() as OutPtIdx;
        if insert_after {
            self.pts.push(OutPt {
                idx: src.idx,
                pt: src.pt,
                next: src.next,
                prev: op,
            });
            self.pt_mut(src.next).prev = new_op;
            self.pt_mut(op).next = new_op;
        } else {
            self.pts.push(OutPt {
                idx: src.idx,
                pt: src.pt,
                next: op,
                prev: src.prev,
            });
            self.pt_mut(src.prev).next = new_op;
            self.pt_mut(op).prev = new_op;
        }
        new_op
    }

    pub fn reverse_links(&mut self, start: OutPtIdx) {
        if start == INVALID {
            return;
        }
        let mut op = start;
        loop {
            let p = self.pt_mut(op);
            std::mem::swap(&mut p.next, &mut p.prev);
            // After the swap, `prev` holds the old `next`.
            op = p.prev;
            if op == start {
                break;
            }
        }
    }

    pub fn point_count(&self, start: OutPtIdx) -> usize {
        if start == INVALID {
            return 0;
        }
        let mut n = 0;
        let mut op = start;
        loop {
            n += 1;
            op = self.next(op);
            if op == start {
                break;
            }
        }
        n
    }

    /// Signed area of the ring through `start`; equal to `polygon::area` of
    /// the path `ring_path` exports.
    pub fn ring_area(&self, start: OutPtIdx) -> f64 {
        if start == INVALID {
            return 0.0;
        }
        let mut a = 0.0;
        let mut op = start;
        loop {
            let (p, q) = (self.xy(self.prev(op)), self.xy(op));
            a += (p.x as f64 + q.x as f64) * (p.y as f64 - q.y as f64);
            op = self.next(op);
            if op == start {
                break;
            }
        }
        a * 0.5
    }

    pub fn rec_area(&self, rec: OutRecIdx) -> f64 {
        self.ring_area(self.rec(rec).pts)
    }

    /// Is `btm1` the better bottom representative than `btm2`?
    ///
    /// Both sit at the same location; the one whose neighbours fan out
    /// more steeply belongs to the outer ring.
    fn first_is_bottom_pt(&self, btm1: OutPtIdx, btm2: OutPtIdx) -> bool {
        let spread = |btm: OutPtIdx| -> (f64, f64) {
            let base = self.xy(btm);
            let mut p = self.prev(btm);
            while self.xy(p) == base && p != btm {
                p = self.prev(p);
            }
            let dxp = get_dx(base, self.xy(p)).abs();
            let mut p = self.next(btm);
            while self.xy(p) == base && p != btm {
                p = self.next(p);
            }
            let dxn = get_dx(base, self.xy(p)).abs();
            (dxp, dxn)
        };
        let (dx1p, dx1n) = spread(btm1);
        let (dx2p, dx2n) = spread(btm2);
        if dx1p.max(dx1n) == dx2p.max(dx2n) && dx1p.min(dx1n) == dx2p.min(dx2n) {
            self.ring_area(btm1) > 0.0
        } else {
            (dx1p >= dx2p && dx1p >= dx2n) || (dx1n >= dx2p && dx1n >= dx2n)
        }
    }

    /// Bottom-most (then left-most) point of the ring through `pp`.
    pub fn bottom_pt(&self, mut pp: OutPtIdx) -> OutPtIdx {
        let mut dups = INVALID;
        let mut p = self.next(pp);
        while p != pp {
            let (a, b) = (self.xy(p), self.xy(pp));
            if a.y > b.y {
                pp = p;
                dups = INVALID;
            } else if a.y == b.y && a.x <= b.x {
                if a.x < b.x {
                    dups = INVALID;
                    pp = p;
                } else if self.next(p) != pp && self.prev(p) != pp {
                    dups = p;
                }
            }
            p = self.next(p);
        }
        if dups != INVALID {
            // Several vertices share the bottom location.
            while dups != p {
                if !self.first_is_bottom_pt(p, dups) {
                    pp = dups;
                }
                dups = self.next(dups);
                while self.xy(dups) != self.xy(pp) {
                    dups = self.next(dups);
                }
            }
        }
        pp
    }

    fn cached_bottom_pt(&mut self, rec: OutRecIdx) -> OutPtIdx {
        if self.rec(rec).bottom_pt == INVALID {
            let b = self.bottom_pt(self.rec(rec).pts);
            self.rec_mut(rec).bottom_pt = b;
        }
        self.rec(rec).bottom_pt
    }

    /// Of two fragments, the one whose bottom point lies lowest carries the
    /// correct hole state.
    pub fn lowermost_rec(&mut self, r1: OutRecIdx, r2: OutRecIdx) -> OutRecIdx {
        let b1 = self.cached_bottom_pt(r1);
        let b2 = self.cached_bottom_pt(r2);
        let (p1, p2) = (self.xy(b1), self.xy(b2));
        if p1.y > p2.y {
            r1
        } else if p1.y < p2.y {
            r2
        } else if p1.x < p2.x {
            r1
        } else if p1.x > p2.x {
            r2
        } else if self.next(b1) == b1 {
            r2
        } else if self.next(b2) == b2 {
            r1
        } else if self.first_is_bottom_pt(b1, b2) {
            r1
        } else {
            r2
        }
    }

    /// Is `r2` reachable by walking `r1`'s first-left chain?
    pub fn rec1_right_of_rec2(&self, r1: OutRecIdx, r2: OutRecIdx) -> bool {
        let mut r = r1;
        loop {
            r = self.rec(r).first_left;
            if r == r2 {
                return true;
            }
            if r == INVALID {
                return false;
            }
        }
    }

    /// The hole-state ring when `r1` and `r2` are about to be combined.
    pub fn hole_state_rec(&mut self, r1: OutRecIdx, r2: OutRecIdx) -> OutRecIdx {
        if r1 == r2 {
            r1
        } else if self.rec1_right_of_rec2(r1, r2) {
            r2
        } else if self.rec1_right_of_rec2(r2, r1) {
            r1
        } else {
            self.lowermost_rec(r1, r2)
        }
    }

    /// Splice `r2`'s ring onto `r1`'s. `side1`/`side2` are the sides of the
    /// two edges meeting at the local maximum. Leaves `r2` empty with its
    /// first-left pointing at `r1`; the caller sets the redirect.
    pub fn append_rings(&mut self, r1: OutRecIdx, r2: OutRecIdx, side1: EdgeSide, side2: EdgeSide) {
        let hole_state = self.hole_state_rec(r1, r2);

        let p1_lft = self.rec(r1).pts;
        let p1_rt = self.prev(p1_lft);
        let p2_lft = self.rec(r2).pts;
        let p2_rt = self.prev(p2_lft);

        match (side1, side2) {
            (EdgeSide::Left, EdgeSide::Left) => {
                // z y x a b c
                self.reverse_links(p2_lft);
                self.pt_mut(p2_lft).next = p1_lft;
                self.pt_mut(p1_lft).prev = p2_lft;
                self.pt_mut(p1_rt).next = p2_rt;
                self.pt_mut(p2_rt).prev = p1_rt;
                self.rec_mut(r1).pts = p2_rt;
            }
            (EdgeSide::Left, EdgeSide::Right) => {
                // x y z a b c
                self.pt_mut(p2_rt).next = p1_lft;
                self.pt_mut(p1_lft).prev = p2_rt;
                self.pt_mut(p2_lft).prev = p1_rt;
                self.pt_mut(p1_rt).next = p2_lft;
                self.rec_mut(r1).pts = p2_lft;
            }
            (EdgeSide::Right, EdgeSide::Right) => {
                // a b c z y x
                self.reverse_links(p2_lft);
                self.pt_mut(p1_rt).next = p2_rt;
                self.pt_mut(p2_rt).prev = p1_rt;
                self.pt_mut(p2_lft).next = p1_lft;
                self.pt_mut(p1_lft).prev = p2_lft;
            }
            (EdgeSide::Right, EdgeSide::Left) => {
                // a b c x y z
                self.pt_mut(p1_rt).next = p2_lft;
                self.pt_mut(p2_lft).prev = p1_rt;
                self.pt_mut(p1_lft).prev = p2_rt;
                self.pt_mut(p2_rt).next = p1_lft;
            }
        }

        self.rec_mut(r1).bottom_pt = INVALID;
        if hole_state == r2 {
            if self.rec(r2).first_left != r1 {
                self.rec_mut(r1).first_left = self.rec(r2).first_left;
            }
            self.rec_mut(r1).is_hole = self.rec(r2).is_hole;
        }
        let rec2 = self.rec_mut(r2);
        rec2.pts = INVALID;
        rec2.bottom_pt = INVALID;
        rec2.first_left = r1;
    }

    /// Point-in-ring test: 1 inside, 0 outside, -1 on the boundary.
    pub fn point_in_ring(&self, pt: IntPoint, start: OutPtIdx) -> i32 {
        let mut result = 0;
        let mut op = start;
        loop {
            let (a, b) = (self.xy(op), self.xy(self.next(op)));
            if let Some(r) = crossing_step(pt, a, b, &mut result) {
                return r;
            }
            op = self.next(op);
            if op == start {
                break;
            }
        }
        result
    }

    /// Does the ring through `outer` contain the ring through `inner`?
    ///
    /// The first vertex of `inner` not on `outer`'s boundary decides.
    pub fn poly2_contains_poly1(&self, inner: OutPtIdx, outer: OutPtIdx) -> bool {
        let mut op = inner;
        loop {
            let res = self.point_in_ring(self.xy(op), outer);
            if res >= 0 {
                return res > 0;
            }
            op = self.next(op);
            if op == inner {
                break;
            }
        }
        true
    }

    pub fn update_out_pt_idxs(&mut self, rec: OutRecIdx) {
        let start = self.rec(rec).pts;
        let mut op = start;
        loop {
            self.pt_mut(op).idx = rec;
            op = self.prev(op);
            if op == start {
                break;
            }
        }
    }

    /// Skip first-left links to rings that no longer hold points.
    pub fn parse_first_left(&self, mut fl: OutRecIdx) -> OutRecIdx {
        while fl != INVALID && self.rec(fl).pts == INVALID {
            fl = self.rec(fl).first_left;
        }
        fl
    }

    /// After `new_rec` split from `old_rec` as a separate ring, move rings
    /// whose container was `old_rec` but that lie inside `new_rec`.
    pub fn fixup_first_lefts1(&mut self, old_rec: OutRecIdx, new_rec: OutRecIdx) {
        for i in 0..self.recs.len() as OutRecIdx {
            let fl = self.parse_first_left(self.rec(i).first_left);
            if self.rec(i).pts != INVALID
                && fl == old_rec
                && self.poly2_contains_poly1(self.rec(i).pts, self.rec(new_rec).pts)
            {
                self.rec_mut(i).first_left = new_rec;
            }
        }
    }

    /// After a split left `inner` nested in `outer`, re-home rings that were
    /// contained by either or by `outer`'s container.
    pub fn fixup_first_lefts2(&mut self, inner: OutRecIdx, outer: OutRecIdx) {
        let orfl = self.rec(outer).first_left;
        for i in 0..self.recs.len() as OutRecIdx {
            let pts = self.rec(i).pts;
            if pts == INVALID || i == outer || i == inner {
                continue;
            }
            let fl = self.parse_first_left(self.rec(i).first_left);
            if fl != orfl && fl != inner && fl != outer {
                continue;
            }
            if self.poly2_contains_poly1(pts, self.rec(inner).pts) {
                self.rec_mut(i).first_left = inner;
            } else if self.poly2_contains_poly1(pts, self.rec(outer).pts) {
                self.rec_mut(i).first_left = outer;
            } else if self.rec(i).first_left == inner || self.rec(i).first_left == outer {
                self.rec_mut(i).first_left = orfl;
            }
        }
    }

    /// After `old_rec` merged into `new_rec`, redirect its dependants blindly.
    pub fn fixup_first_lefts3(&mut self, old_rec: OutRecIdx, new_rec: OutRecIdx) {
        for i in 0..self.recs.len() as OutRecIdx {
            let fl = self.parse_first_left(self.rec(i).first_left);
            if self.rec(i).pts != INVALID && fl == old_rec {
                self.rec_mut(i).first_left = new_rec;
            }
        }
    }

    /// Drop duplicate points and collinear middles; discard the ring when
    /// fewer than 3 points remain.
    ///
    /// With `preserve_collinear`, only spikes (a middle point lying outside
    /// its neighbours' span) are removed among collinear triples.
    pub fn fixup_out_polygon(&mut self, rec: OutRecIdx, preserve_collinear: bool, use_full_range: bool) {
        let mut last_ok = INVALID;
        self.rec_mut(rec).bottom_pt = INVALID;
        let mut pp = self.rec(rec).pts;
        loop {
            if self.prev(pp) == pp || self.prev(pp) == self.next(pp) {
                self.rec_mut(rec).pts = INVALID;
                return;
            }
            let (prev, next) = (self.prev(pp), self.next(pp));
            let (a, b, c) = (self.xy(prev), self.xy(pp), self.xy(next));
            if b == c
                || b == a
                || (slopes_equal3(a, b, c, use_full_range)
                    && (!preserve_collinear || !pt2_is_between_pt1_and_pt3(a, b, c)))
            {
                last_ok = INVALID;
                self.pt_mut(prev).next = next;
                self.pt_mut(next).prev = prev;
                pp = prev;
            } else if pp == last_ok {
                break;
            } else {
                if last_ok == INVALID {
                    last_ok = pp;
                }
                pp = next;
            }
        }
        self.rec_mut(rec).pts = pp;
    }

    /// Export `rec`'s ring as a path in output order.
    pub fn ring_path(&self, rec: OutRecIdx) -> Path {
        let start = self.rec(rec).pts;
        if start == INVALID {
            return Path::new();
        }
        let mut path = Path::with_capacity(self.point_count(start));
        let first = self.prev(start);
        let mut p = first;
        loop {
            path.push(self.xy(p));
            p = self.prev(p);
            if p == first {
                break;
            }
        }
        path
    }
}

fn cross_from(pt: IntPoint, a: IntPoint, b: IntPoint) -> f64 {
    (a.x as f64 - pt.x as f64) * (b.y as f64 - pt.y as f64) - (b.x as f64 - pt.x as f64) * (a.y as f64 - pt.y as f64)
}

/// One edge step of the crossing-number point-in-polygon test shared by
/// `OutRings::point_in_ring` and `polygon::point_in_polygon`.
///
/// Returns Some(-1) as soon as `pt` is found on the boundary.
pub(crate) fn crossing_step(pt: IntPoint, a: IntPoint, b: IntPoint, result: &mut i32) -> Option<i32> {
    if b.y == pt.y && (b.x == pt.x || (a.y == pt.y && ((b.x > pt.x) == (a.x < pt.x)))) {
        return Some(-1);
    }
    if (a.y < pt.y) != (b.y < pt.y) {
        if a.x >= pt.x {
            if b.x > pt.x {
                *result = 1 - *result;
            } else {
                let d = cross_from(pt, a, b);
                if d == 0.0 {
                    return Some(-1);
                }
                if (d > 0.0) == (b.y > a.y) {
                    *result = 1 - *result;
                }
            }
        } else if b.x > pt.x {
            let d = cross_from(pt, a, b);
            if d == 0.0 {
                return Some(-1);
            }
            if (d > 0.0) == (b.y > a.y) {
                *result = 1 - *result;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(rings: &mut OutRings, pts: &[(i64, i64)]) -> OutRecIdx {
        let rec = rings.create_rec();
        rings.start_ring(rec, IntPoint::new(pts[0].0, pts[0].1));
        for &(x, y) in &pts[1..] {
            rings.push_point(rec, IntPoint::new(x, y), false);
        }
        rec
    }

    #[test]
    fn push_point_skips_repeated_ends() {
        let mut rings = OutRings::new();
        let rec = ring(&mut rings, &[(0, 0), (10, 0)]);
        let back = rings.push_point(rec, IntPoint::new(10, 0), false);
        assert_eq!(rings.pt(back).pt, IntPoint::new(10, 0));
        let front = rings.push_point(rec, IntPoint::new(0, 0), true);
        assert_eq!(front, rings.rec(rec).pts);
        assert_eq!(rings.point_count(rings.rec(rec).pts), 2);
    }

    #[test]
    fn area_flips_with_reversal() {
        let mut rings = OutRings::new();
        let rec = ring(&mut rings, &[(0, 0), (10, 0), (10, 10), (0, 10)]);
        let a = rings.rec_area(rec);
        assert_eq!(a.abs(), 100.0);
        rings.reverse_links(rings.rec(rec).pts);
        assert_eq!(rings.rec_area(rec), -a);
        assert_eq!(rings.point_count(rings.rec(rec).pts), 4);
    }

    #[test]
    fn owner_chase_terminates_and_compresses() {
        let mut rings = OutRings::new();
        let n = 16;
        for _ in 0..n {
            rings.create_rec();
        }
        // 0 -> 1 -> 2 -> ... -> 15
        for i in 0..n - 1 {
            rings.rec_mut(i).idx = i + 1;
        }
        assert_eq!(rings.owner(0), n - 1);
        for i in 0..n - 1 {
            assert_eq!(rings.rec(i).idx, n - 1, "ring {} was not compressed", i);
        }
        assert_eq!(rings.owner(n - 1), n - 1);
    }

    #[test]
    fn point_in_ring_classifies() {
        let mut rings = OutRings::new();
        let rec = ring(&mut rings, &[(0, 0), (10, 0), (10, 10), (0, 10)]);
        let op = rings.rec(rec).pts;
        assert_eq!(rings.point_in_ring(IntPoint::new(5, 5), op), 1);
        assert_eq!(rings.point_in_ring(IntPoint::new(15, 5), op), 0);
        assert_eq!(rings.point_in_ring(IntPoint::new(10, 5), op), -1);
        assert_eq!(rings.point_in_ring(IntPoint::new(0, 0), op), -1);
    }

    #[test]
    fn containment_between_rings() {
        let mut rings = OutRings::new();
        let outer = ring(&mut rings, &[(0, 0), (20, 0), (20, 20), (0, 20)]);
        let inner = ring(&mut rings, &[(5, 5), (15, 5), (15, 15), (5, 15)]);
        let (po, pi) = (rings.rec(outer).pts, rings.rec(inner).pts);
        assert!(rings.poly2_contains_poly1(pi, po));
        assert!(!rings.poly2_contains_poly1(po, pi));
    }

    #[test]
    fn fixup_removes_collinear_and_degenerates() {
        let mut rings = OutRings::new();
        let rec = ring(&mut rings, &[(0, 0), (5, 0), (10, 0), (10, 10), (10, 10), (0, 10)]);
        rings.fixup_out_polygon(rec, false, false);
        assert_eq!(rings.point_count(rings.rec(rec).pts), 4);

        let keep = ring(&mut rings, &[(0, 0), (5, 0), (10, 0), (10, 10), (0, 10)]);
        rings.fixup_out_polygon(keep, true, false);
        assert_eq!(rings.point_count(rings.rec(keep).pts), 5);

        let flat = ring(&mut rings, &[(0, 0), (5, 0), (10, 0)]);
        rings.fixup_out_polygon(flat, false, false);
        assert_eq!(rings.rec(flat).pts, INVALID);
    }

    #[test]
    fn bottom_point_is_lowest_then_leftmost() {
        let mut rings = OutRings::new();
        let rec = ring(&mut rings, &[(0, 0), (10, 0), (10, 10), (3, 10), (0, 5)]);
        let b = rings.bottom_pt(rings.rec(rec).pts);
        assert_eq!(rings.pt(b).pt, IntPoint::new(3, 10));
    }

    #[test]
    fn dup_out_pt_inserts_beside() {
        let mut rings = OutRings::new();
        let rec = ring(&mut rings, &[(0, 0), (10, 0), (10, 10)]);
        let op = rings.rec(rec).pts;
        let after = rings.dup_out_pt(op, true);
        assert_eq!(rings.pt(op).next, after);
        let before = rings.dup_out_pt(op, false);
        assert_eq!(rings.pt(op).prev, before);
        assert_eq!(rings.point_count(op), 5);
    }

    #[test]
    fn ring_path_walks_backwards_from_the_right_end() {
        let mut rings = OutRings::new();
        let rec = ring(&mut rings, &[(0, 0), (10, 0), (10, 10)]);
        let path = rings.ring_path(rec);
        assert_eq!(
            path,
            vec![IntPoint::new(10, 10), IntPoint::new(10, 0), IntPoint::new(0, 0)]
        );
    }
}
