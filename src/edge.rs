// Copyright 2025 Lars Brubaker
// License: MIT
//
// Edge table: the arena of edges built from input rings.
//
// Every ingested ring becomes a circular run of edges linked through `next` and
// `prev`. After duplicate and collinear vertices are spliced out, the ring is
// cut at its local minima into bounds: monotone chains linked through
// `next_in_lml` from a local minimum up to a local maximum.
//
// The y axis points "down": an edge's `bot` has the larger y and the sweep
// moves from large y to small y.

use crate::config::{HORIZONTAL, VERTEX_TOLERANCE};
use crate::error::{ClipError, ClipResult};
use crate::minima::{LocalMinimaQueue, LocalMinimum};
use crate::point::{get_dx, pt2_is_between_pt1_and_pt3, range_test, round, slopes_equal3, CInt, IntPoint};

/// Index into `EdgeTable::edges`.
pub type EdgeIdx = u32;

/// Null link for every arena index in the crate.
pub const INVALID: u32 = u32::MAX;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PolyType {
    Subject,
    Clip,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeSide {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub struct Edge {
    pub bot: IntPoint,
    /// Position at the current scanline. Before the ring is classified this
    /// holds the input vertex the edge starts from.
    pub curr: IntPoint,
    pub top: IntPoint,
    /// dx/dy, or `HORIZONTAL`.
    pub dx: f64,
    pub poly_type: PolyType,
    pub side: EdgeSide,
    /// +1 or -1 depending on ring direction.
    pub wind_delta: i32,
    /// Winding count against edges of the same polygon type.
    pub wind_cnt: i32,
    /// Winding count against edges of the other polygon type.
    pub wind_cnt2: i32,
    /// Output ring this edge is currently building, or INVALID.
    pub out_idx: u32,
    pub next: EdgeIdx,
    pub prev: EdgeIdx,
    pub next_in_lml: EdgeIdx,
    pub next_in_ael: EdgeIdx,
    pub prev_in_ael: EdgeIdx,
    pub next_in_sel: EdgeIdx,
    pub prev_in_sel: EdgeIdx,
}

impl Default for Edge {
    fn default() -> Self {
        Edge {
            bot: IntPoint::default(),
            curr: IntPoint::default(),
            top: IntPoint::default(),
            dx: 0.0,
            poly_type: PolyType::Subject,
            side: EdgeSide::Left,
            wind_delta: 0,
            wind_cnt: 0,
            wind_cnt2: 0,
            out_idx: INVALID,
            next: INVALID,
            prev: INVALID,
            next_in_lml: INVALID,
            next_in_ael: INVALID,
            prev_in_ael: INVALID,
            next_in_sel: INVALID,
            prev_in_sel: INVALID,
        }
    }
}

impl Edge {
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.dx == HORIZONTAL
    }

    /// X where this edge crosses scanline `y`.
    #[inline]
    pub fn top_x(&self, y: CInt) -> CInt {
        if y == self.top.y {
            self.top.x
        } else {
            self.bot.x.saturating_add(round(self.dx * (y as f64 - self.bot.y as f64)))
        }
    }

    #[inline]
    pub fn is_maxima(&self, y: CInt) -> bool {
        self.top.y == y && self.next_in_lml == INVALID
    }

    #[inline]
    pub fn is_intermediate(&self, y: CInt) -> bool {
        self.top.y == y && self.next_in_lml != INVALID
    }

    fn set_dx(&mut self) {
        self.dx = get_dx(self.bot, self.top);
    }

    fn reverse_horizontal(&mut self) {
        std::mem::swap(&mut self.top.x, &mut self.bot.x);
    }
}

/// Owns every edge of the current run plus the heads of the two intrusive
/// lists threaded through them (see `active.rs`).
pub struct EdgeTable {
    pub edges: Vec<Edge>,
    /// Head of the active edge list.
    pub active: EdgeIdx,
    /// Head of the sorted edge list.
    pub sorted: EdgeIdx,
}

impl Default for EdgeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeTable {
    pub fn new() -> Self {
        EdgeTable {
            edges: Vec::new(),
            active: INVALID,
            sorted: INVALID,
        }
    }

    #[inline]
    pub fn get(&self, e: EdgeIdx) -> &Edge {
        &self.edges[e as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, e: EdgeIdx) -> &mut Edge {
        &mut self.edges[e as usize]
    }

    #[inline]
    pub fn is_horizontal(&self, e: EdgeIdx) -> bool {
        self.get(e).is_horizontal()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.active = INVALID;
        self.sorted = INVALID;
    }

    /// Ingest one closed ring, pushing its local minima onto `minima`.
    ///
    /// On rejection no edges are left behind in the arena.
    pub fn add_ring(
        &mut self,
        path: &[IntPoint],
        poly_type: PolyType,
        preserve_collinear: bool,
        use_full_range: &mut bool,
        minima: &mut LocalMinimaQueue,
    ) -> ClipResult<()> {
        if path.is_empty() {
            return Err(ClipError::TooFewVertices);
        }
        let mut high = path.len() - 1;
        while high > 0 && path[high].almost_equal(&path[0], VERTEX_TOLERANCE) {
            high -= 1;
        }
        while high > 0 && path[high].almost_equal(&path[high - 1], VERTEX_TOLERANCE) {
            high -= 1;
        }
        if high < 2 {
            return Err(ClipError::TooFewVertices);
        }

        let base = self.edges.len() as EdgeIdx;
        let n = (high + 1) as EdgeIdx;
        for (i, &pt) in path[..=high].iter().enumerate() {
            range_test(pt, use_full_range);
            let i = i as EdgeIdx;
            self.edges.push(Edge {
                curr: pt,
                next: base + (i + 1) % n,
                prev: base + (i + n - 1) % n,
                ..Edge::default()
            });
        }

        let e_start = match self.strip_degenerate_vertices(base, preserve_collinear, *use_full_range) {
            Some(e) => e,
            None => {
                self.edges.truncate(base as usize);
                return Err(ClipError::TooFewVertices);
            }
        };

        let mut is_flat = true;
        let start_y = self.get(e_start).curr.y;
        let mut e = e_start;
        loop {
            self.classify_edge(e, poly_type);
            e = self.get(e).next;
            if is_flat && self.get(e).curr.y != start_y {
                is_flat = false;
            }
            if e == e_start {
                break;
            }
        }
        if is_flat {
            self.edges.truncate(base as usize);
            return Err(ClipError::FlatPath);
        }

        self.push_local_minima(e_start, minima);
        Ok(())
    }

    /// Splice out duplicate vertices and collinear middles until none remain.
    ///
    /// Returns an edge still in the ring, or None when fewer than 3 survive.
    fn strip_degenerate_vertices(
        &mut self,
        start: EdgeIdx,
        preserve_collinear: bool,
        use_full_range: bool,
    ) -> Option<EdgeIdx> {
        let mut e_start = start;
        let mut e = start;
        let mut loop_stop = start;
        loop {
            let next = self.get(e).next;
            let prev = self.get(e).prev;
            if self.get(e).curr == self.get(next).curr {
                if e == next {
                    break;
                }
                if e == e_start {
                    e_start = next;
                }
                e = self.remove_edge(e);
                loop_stop = e;
                continue;
            }
            if prev == next {
                break;
            }
            let (pp, pc, pn) = (self.get(prev).curr, self.get(e).curr, self.get(next).curr);
            if slopes_equal3(pp, pc, pn, use_full_range)
                && (!preserve_collinear || !pt2_is_between_pt1_and_pt3(pp, pc, pn))
            {
                if e == e_start {
                    e_start = next;
                }
                e = self.remove_edge(e);
                e = self.get(e).prev;
                loop_stop = e;
                continue;
            }
            e = next;
            if e == loop_stop {
                break;
            }
        }
        if self.get(e).prev == self.get(e).next {
            None
        } else {
            Some(e_start)
        }
    }

    /// Unlink `e` from its ring and return its successor.
    fn remove_edge(&mut self, e: EdgeIdx) -> EdgeIdx {
        let (prev, next) = (self.get(e).prev, self.get(e).next);
        self.get_mut(prev).next = next;
        self.get_mut(next).prev = prev;
        self.get_mut(e).prev = INVALID;
        next
    }

    fn classify_edge(&mut self, e: EdgeIdx, poly_type: PolyType) {
        let next_curr = self.get(self.get(e).next).curr;
        let edge = self.get_mut(e);
        if edge.curr.y >= next_curr.y {
            edge.bot = edge.curr;
            edge.top = next_curr;
        } else {
            edge.top = edge.curr;
            edge.bot = next_curr;
        }
        edge.set_dx();
        edge.poly_type = poly_type;
    }

    fn push_local_minima(&mut self, e_start: EdgeIdx, minima: &mut LocalMinimaQueue) {
        let mut e = e_start;
        let mut e_min = INVALID;
        loop {
            e = self.find_next_loc_min(e);
            if e == e_min {
                break;
            }
            if e_min == INVALID {
                e_min = e;
            }

            // e and e.prev share the minimum vertex; the steeper-leaning
            // one (larger dx) starts the left bound.
            let prev = self.get(e).prev;
            let y = self.get(e).bot.y;
            let (left, right, left_is_forward) = if self.get(e).dx < self.get(prev).dx {
                (prev, e, false)
            } else {
                (e, prev, true)
            };

            let wind_delta = if self.get(left).next == right { -1 } else { 1 };
            self.get_mut(left).wind_delta = wind_delta;
            self.get_mut(right).wind_delta = -wind_delta;

            e = self.process_bound(left, left_is_forward);
            let e2 = self.process_bound(right, !left_is_forward);
            minima.push(LocalMinimum {
                y,
                left_bound: left,
                right_bound: right,
            });
            if !left_is_forward {
                e = e2;
            }
        }
    }

    /// Advance around the ring to the next local minimum vertex.
    ///
    /// When horizontals run along the bottom, the returned edge is aligned
    /// with the left end of that run.
    pub(crate) fn find_next_loc_min(&self, mut e: EdgeIdx) -> EdgeIdx {
        loop {
            while self.get(e).bot != self.get(self.get(e).prev).bot || self.get(e).curr == self.get(e).top {
                e = self.get(e).next;
            }
            if !self.is_horizontal(e) && !self.is_horizontal(self.get(e).prev) {
                break;
            }
            while self.is_horizontal(self.get(e).prev) {
                e = self.get(e).prev;
            }
            let e2 = e;
            while self.is_horizontal(e) {
                e = self.get(e).next;
            }
            if self.get(e).top.y == self.get(self.get(e).prev).bot.y {
                // An intermediate horizontal, not a minimum.
                continue;
            }
            if self.get(self.get(e2).prev).bot.x < self.get(e).bot.x {
                e = e2;
            }
            break;
        }
        e
    }

    /// Link the bound starting at `e` through `next_in_lml` up to its local
    /// maximum and return the first edge beyond it.
    pub(crate) fn process_bound(&mut self, mut e: EdgeIdx, next_is_forward: bool) -> EdgeIdx {
        let mut result = e;

        if self.is_horizontal(e) {
            // Orient a bottom horizontal so its bot.x meets the adjoining edge.
            let neighbour = if next_is_forward { self.get(e).prev } else { self.get(e).next };
            let e_bot_x = self.get(e).bot.x;
            let nb = self.get(neighbour);
            let reverse = if nb.is_horizontal() {
                nb.bot.x != e_bot_x && nb.top.x != e_bot_x
            } else {
                nb.bot.x != e_bot_x
            };
            if reverse {
                self.get_mut(e).reverse_horizontal();
            }
        }

        let e_start = e;
        if next_is_forward {
            while self.get(result).top.y == self.get(self.get(result).next).bot.y {
                result = self.get(result).next;
            }
            if self.is_horizontal(result) {
                // A top horizontal joins this bound only when the edge below
                // it attaches at its left end.
                let mut horz = result;
                while self.is_horizontal(self.get(horz).prev) {
                    horz = self.get(horz).prev;
                }
                let before = self.get(horz).prev;
                if self.get(before).top.x > self.get(self.get(result).next).top.x {
                    result = before;
                }
            }
            while e != result {
                let next = self.get(e).next;
                self.get_mut(e).next_in_lml = next;
                self.align_inner_horizontal(e, e_start, self.get(e).prev);
                e = next;
            }
            self.align_inner_horizontal(e, e_start, self.get(e).prev);
            result = self.get(result).next;
        } else {
            while self.get(result).top.y == self.get(self.get(result).prev).bot.y {
                result = self.get(result).prev;
            }
            if self.is_horizontal(result) {
                let mut horz = result;
                while self.is_horizontal(self.get(horz).next) {
                    horz = self.get(horz).next;
                }
                let after = self.get(horz).next;
                if self.get(after).top.x >= self.get(self.get(result).prev).top.x {
                    result = after;
                }
            }
            while e != result {
                let prev = self.get(e).prev;
                self.get_mut(e).next_in_lml = prev;
                self.align_inner_horizontal(e, e_start, self.get(e).next);
                e = prev;
            }
            self.align_inner_horizontal(e, e_start, self.get(e).next);
            result = self.get(result).prev;
        }
        result
    }

    /// Flip a horizontal inside a bound so its bot.x meets the edge below it.
    fn align_inner_horizontal(&mut self, e: EdgeIdx, e_start: EdgeIdx, below: EdgeIdx) {
        if e != e_start && self.is_horizontal(e) && self.get(e).bot.x != self.get(below).top.x {
            self.get_mut(e).reverse_horizontal();
        }
    }

    /// The other half of a local maximum, if `e` is one.
    pub fn maxima_pair(&self, e: EdgeIdx) -> EdgeIdx {
        let edge = self.get(e);
        let (next, prev) = (self.get(edge.next), self.get(edge.prev));
        if next.top == edge.top && next.next_in_lml == INVALID {
            edge.next
        } else if prev.top == edge.top && prev.next_in_lml == INVALID {
            edge.prev
        } else {
            INVALID
        }
    }

    /// As `maxima_pair`, but only when the pair is still in the AEL (a
    /// horizontal pair may be waiting in the SEL instead).
    pub fn maxima_pair_ex(&self, e: EdgeIdx) -> EdgeIdx {
        let pair = self.maxima_pair(e);
        if pair != INVALID {
            let p = self.get(pair);
            if p.next_in_ael == p.prev_in_ael && p.next_in_ael == INVALID && self.active != pair && !p.is_horizontal() {
                return INVALID;
            }
        }
        pair
    }

    /// Intersection of two crossing edges, clamped into the current band.
    ///
    /// `e1.curr.y` is the band bottom while intersections are being built.
    pub fn intersect_point(&self, e1: EdgeIdx, e2: EdgeIdx) -> IntPoint {
        let (a, b) = (self.get(e1), self.get(e2));
        let mut ip = IntPoint::default();
        if a.dx == b.dx {
            // Parallel: fall back to the lower edge's bottom; the band clamp
            // below moves it back onto the scanline.
            ip = if a.bot.y >= b.bot.y { a.bot } else { b.bot };
        } else if a.bot.x == a.top.x {
            ip.x = a.bot.x;
            if b.is_horizontal() {
                ip.y = b.bot.y;
            } else {
                let b2 = b.bot.y as f64 - b.bot.x as f64 / b.dx;
                ip.y = round(ip.x as f64 / b.dx + b2);
            }
        } else if b.bot.x == b.top.x {
            ip.x = b.bot.x;
            if a.is_horizontal() {
                ip.y = a.bot.y;
            } else {
                let b1 = a.bot.y as f64 - a.bot.x as f64 / a.dx;
                ip.y = round(ip.x as f64 / a.dx + b1);
            }
        } else {
            let b1 = a.bot.x as f64 - a.bot.y as f64 * a.dx;
            let b2 = b.bot.x as f64 - b.bot.y as f64 * b.dx;
            let q = (b2 - b1) / (a.dx - b.dx);
            ip.y = round(q);
            ip.x = if a.dx.abs() < b.dx.abs() {
                round(a.dx * q + b1)
            } else {
                round(b.dx * q + b2)
            };
        }

        if ip.y < a.top.y || ip.y < b.top.y {
            ip.y = a.top.y.max(b.top.y);
            ip.x = if a.dx.abs() < b.dx.abs() { a.top_x(ip.y) } else { b.top_x(ip.y) };
        }
        if ip.y > a.curr.y {
            ip.y = a.curr.y;
            // The more vertical edge gives the better x.
            ip.x = if a.dx.abs() > b.dx.abs() { b.top_x(ip.y) } else { a.top_x(ip.y) };
        }
        ip
    }
}
