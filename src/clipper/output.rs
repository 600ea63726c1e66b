// Copyright 2025 Lars Brubaker
// License: MIT
//
// Output ring construction during the sweep: local minima open rings, local
// maxima close or merge them, and the band top advances every active edge.

use super::Clipper;
use crate::edge::{EdgeIdx, EdgeSide, INVALID};
use crate::error::{ClipResult, InvariantError};
use crate::outrec::{OutPtIdx, OutRecIdx};
use crate::point::{horz_segments_overlap, slopes_equal4, CInt, IntPoint};

impl Clipper {
    /// Add `pt` to the ring `e` is building, opening a ring if `e` has none.
    pub(super) fn add_out_pt(&mut self, e: EdgeIdx, pt: IntPoint) -> OutPtIdx {
        let out_idx = self.edges.get(e).out_idx;
        if out_idx == INVALID {
            let rec = self.rings.create_rec();
            let op = self.rings.start_ring(rec, pt);
            self.set_hole_state(e, rec);
            self.edges.get_mut(e).out_idx = rec;
            op
        } else {
            let to_front = self.edges.get(e).side == EdgeSide::Left;
            self.rings.push_point(out_idx, pt, to_front)
        }
    }

    /// The last point added by `e`'s side of its ring.
    pub(super) fn last_out_pt(&self, e: EdgeIdx) -> OutPtIdx {
        let edge = self.edges.get(e);
        self.rings.last_point(edge.out_idx, edge.side)
    }

    /// A new ring is a hole when the nearest contributing edge to its left
    /// belongs to an outer ring. Pairs of edges from one ring cancel.
    fn set_hole_state(&mut self, e: EdgeIdx, rec: OutRecIdx) {
        let mut candidate = INVALID;
        let mut e2 = self.edges.get(e).prev_in_ael;
        while e2 != INVALID {
            let out = self.edges.get(e2).out_idx;
            if out != INVALID {
                if candidate == INVALID {
                    candidate = e2;
                } else if self.edges.get(candidate).out_idx == out {
                    candidate = INVALID;
                }
            }
            e2 = self.edges.get(e2).prev_in_ael;
        }
        if candidate == INVALID {
            let r = self.rings.rec_mut(rec);
            r.first_left = INVALID;
            r.is_hole = false;
        } else {
            let fl = self.edges.get(candidate).out_idx;
            let hole = !self.rings.rec(fl).is_hole;
            let r = self.rings.rec_mut(rec);
            r.first_left = fl;
            r.is_hole = hole;
        }
    }

    pub(super) fn add_local_min_poly(&mut self, e1: EdgeIdx, e2: EdgeIdx, pt: IntPoint) -> OutPtIdx {
        let result;
        let e;
        let prev_e;
        if self.edges.is_horizontal(e2) || self.edges.get(e1).dx > self.edges.get(e2).dx {
            result = self.add_out_pt(e1, pt);
            let out = self.edges.get(e1).out_idx;
            self.edges.get_mut(e2).out_idx = out;
            self.edges.get_mut(e1).side = EdgeSide::Left;
            self.edges.get_mut(e2).side = EdgeSide::Right;
            e = e1;
            prev_e = if self.edges.get(e1).prev_in_ael == e2 {
                self.edges.get(e2).prev_in_ael
            } else {
                self.edges.get(e1).prev_in_ael
            };
        } else {
            result = self.add_out_pt(e2, pt);
            let out = self.edges.get(e2).out_idx;
            self.edges.get_mut(e1).out_idx = out;
            self.edges.get_mut(e1).side = EdgeSide::Right;
            self.edges.get_mut(e2).side = EdgeSide::Left;
            e = e2;
            prev_e = if self.edges.get(e2).prev_in_ael == e1 {
                self.edges.get(e1).prev_in_ael
            } else {
                self.edges.get(e2).prev_in_ael
            };
        }

        if prev_e != INVALID
            && self.edges.get(prev_e).out_idx != INVALID
            && self.edges.get(prev_e).top.y < pt.y
            && self.edges.get(e).top.y < pt.y
        {
            let x_prev = self.edges.get(prev_e).top_x(pt.y);
            let x_e = self.edges.get(e).top_x(pt.y);
            if x_prev == x_e
                && slopes_equal4(
                    IntPoint::new(x_prev, pt.y),
                    self.edges.get(prev_e).top,
                    IntPoint::new(x_e, pt.y),
                    self.edges.get(e).top,
                    self.use_full_range,
                )
            {
                let op = self.add_out_pt(prev_e, pt);
                let off = self.edges.get(e).top;
                self.joins.add_join(result, op, off);
            }
        }
        result
    }

    pub(super) fn add_local_max_poly(&mut self, e1: EdgeIdx, e2: EdgeIdx, pt: IntPoint) {
        self.add_out_pt(e1, pt);
        let (o1, o2) = (self.edges.get(e1).out_idx, self.edges.get(e2).out_idx);
        if o1 == o2 {
            self.edges.get_mut(e1).out_idx = INVALID;
            self.edges.get_mut(e2).out_idx = INVALID;
        } else if o1 < o2 {
            self.append_polygon(e1, e2);
        } else {
            self.append_polygon(e2, e1);
        }
    }

    /// Merge `e2`'s ring into `e1`'s and hand the surviving ring to whichever
    /// active edge was still building the obsolete one.
    fn append_polygon(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        let (r1, r2) = (self.edges.get(e1).out_idx, self.edges.get(e2).out_idx);
        let side1 = self.edges.get(e1).side;
        self.rings.append_rings(r1, r2, side1, self.edges.get(e2).side);

        self.edges.get_mut(e1).out_idx = INVALID;
        self.edges.get_mut(e2).out_idx = INVALID;
        let heir = self.edges.ael_iter().find(|&e| self.edges.get(e).out_idx == r2);
        if let Some(e) = heir {
            let edge = self.edges.get_mut(e);
            edge.out_idx = r1;
            edge.side = side1;
        }
        let keep = self.rings.rec(r1).idx;
        self.rings.rec_mut(r2).idx = keep;
    }

    pub(super) fn insert_local_minima_into_ael(&mut self, bot_y: CInt) {
        while let Some(lm) = self.minima.pop_at(bot_y) {
            let (lb, rb) = (lm.left_bound, lm.right_bound);
            self.edges.insert_edge_into_ael(lb, INVALID);
            self.edges.insert_edge_into_ael(rb, lb);
            self.set_winding_count(lb);
            let (wc, wc2) = (self.edges.get(lb).wind_cnt, self.edges.get(lb).wind_cnt2);
            self.edges.get_mut(rb).wind_cnt = wc;
            self.edges.get_mut(rb).wind_cnt2 = wc2;

            let op1 = if self.is_contributing(lb) {
                let bot = self.edges.get(lb).bot;
                Some(self.add_local_min_poly(lb, rb, bot))
            } else {
                None
            };
            self.scanbeam.insert(self.edges.get(lb).top.y);

            if self.edges.is_horizontal(rb) {
                self.edges.add_edge_to_sel(rb);
                let next = self.edges.get(rb).next_in_lml;
                if next != INVALID {
                    self.scanbeam.insert(self.edges.get(next).top.y);
                }
            } else {
                self.scanbeam.insert(self.edges.get(rb).top.y);
            }

            let op1 = match op1 {
                Some(op) => op,
                None => {
                    self.cross_edges_between_bounds(lb, rb);
                    continue;
                }
            };

            // A horizontal right bound overlapping a ghost horizontal means
            // the two rings share that stretch.
            if self.edges.is_horizontal(rb) {
                let (rb_bot, rb_top) = (self.edges.get(rb).bot.x, self.edges.get(rb).top.x);
                for i in 0..self.joins.ghosts.len() {
                    let ghost = self.joins.ghosts[i];
                    let ghost_x = self.rings.xy(ghost.out_pt1).x;
                    if horz_segments_overlap(ghost_x, ghost.off_pt.x, rb_bot, rb_top) {
                        self.joins.add_join(ghost.out_pt1, op1, ghost.off_pt);
                    }
                }
            }

            let prev = self.edges.get(lb).prev_in_ael;
            if prev != INVALID {
                let (p, l) = (self.edges.get(prev), self.edges.get(lb));
                if p.curr.x == l.bot.x
                    && p.out_idx != INVALID
                    && slopes_equal4(p.bot, p.top, l.curr, l.top, self.use_full_range)
                {
                    let (bot, top) = (l.bot, l.top);
                    let op2 = self.add_out_pt(prev, bot);
                    self.joins.add_join(op1, op2, top);
                }
            }

            if self.edges.get(lb).next_in_ael != rb {
                let prev = self.edges.get(rb).prev_in_ael;
                let (p, r) = (self.edges.get(prev), self.edges.get(rb));
                if r.out_idx != INVALID
                    && p.out_idx != INVALID
                    && slopes_equal4(p.curr, p.top, r.curr, r.top, self.use_full_range)
                {
                    let (bot, top) = (r.bot, r.top);
                    let op2 = self.add_out_pt(prev, bot);
                    self.joins.add_join(op1, op2, top);
                }
            }
            self.cross_edges_between_bounds(lb, rb);
        }
    }

    /// Edges strictly between a new minimum's bounds cross the right bound
    /// at the minimum vertex.
    fn cross_edges_between_bounds(&mut self, lb: EdgeIdx, rb: EdgeIdx) {
        let mut e = self.edges.get(lb).next_in_ael;
        if e == rb {
            return;
        }
        let pt = self.edges.get(lb).curr;
        while e != rb && e != INVALID {
            self.intersect_edges(rb, e, pt);
            e = self.edges.get(e).next_in_ael;
        }
    }

    /// Close the local maximum at the top of `e`, crossing whatever lies
    /// between `e` and its pair first.
    fn do_maxima(&mut self, e: EdgeIdx) -> ClipResult<()> {
        let pair = self.edges.maxima_pair_ex(e);
        if pair == INVALID {
            if self.edges.get(e).out_idx != INVALID {
                let top = self.edges.get(e).top;
                self.add_out_pt(e, top);
            }
            self.edges.delete_from_ael(e);
            return Ok(());
        }

        let top = self.edges.get(e).top;
        let mut next = self.edges.get(e).next_in_ael;
        while next != INVALID && next != pair {
            self.intersect_edges(e, next, top);
            self.edges.swap_positions_in_ael(e, next);
            next = self.edges.get(e).next_in_ael;
        }

        let (o1, o2) = (self.edges.get(e).out_idx, self.edges.get(pair).out_idx);
        if o1 != INVALID && o2 != INVALID {
            self.add_local_max_poly(e, pair, top);
        } else if o1 != INVALID || o2 != INVALID {
            return Err(InvariantError::LocalMaximum.into());
        }
        self.edges.delete_from_ael(e);
        self.edges.delete_from_ael(pair);
        Ok(())
    }

    pub(super) fn process_edges_at_top_of_scanbeam(&mut self, top_y: CInt) -> ClipResult<()> {
        let strictly_simple = self.config.strictly_simple;

        let mut e = self.edges.active;
        while e != INVALID {
            // Maxima are treated as bent horizontals, except those whose pair
            // is a horizontal still to be processed.
            let mut is_maxima = self.edges.get(e).is_maxima(top_y);
            if is_maxima {
                let pair = self.edges.maxima_pair_ex(e);
                is_maxima = pair == INVALID || !self.edges.is_horizontal(pair);
            }

            if is_maxima {
                if strictly_simple {
                    self.maxima.push(self.edges.get(e).top.x);
                }
                let prev = self.edges.get(e).prev_in_ael;
                self.do_maxima(e)?;
                e = if prev == INVALID {
                    self.edges.active
                } else {
                    self.edges.get(prev).next_in_ael
                };
                continue;
            }

            let next_lml = self.edges.get(e).next_in_lml;
            if self.edges.get(e).is_intermediate(top_y) && self.edges.is_horizontal(next_lml) {
                e = self.edges.update_edge_into_ael(e, &mut self.scanbeam)?;
                if self.edges.get(e).out_idx != INVALID {
                    let bot = self.edges.get(e).bot;
                    self.add_out_pt(e, bot);
                }
                self.edges.add_edge_to_sel(e);
            } else {
                let edge = self.edges.get_mut(e);
                edge.curr = IntPoint::new(edge.top_x(top_y), top_y);
            }

            // Both edges need a vertex where one touches the other.
            if strictly_simple {
                let prev = self.edges.get(e).prev_in_ael;
                if prev != INVALID {
                    let (p, c) = (self.edges.get(prev), self.edges.get(e));
                    if c.out_idx != INVALID && p.out_idx != INVALID && p.curr.x == c.curr.x {
                        let pt = c.curr;
                        let op = self.add_out_pt(prev, pt);
                        let op2 = self.add_out_pt(e, pt);
                        self.joins.add_join(op, op2, pt);
                    }
                }
            }
            e = self.edges.get(e).next_in_ael;
        }

        self.maxima.sort_unstable();
        self.maxima.dedup();
        self.process_horizontals()?;
        self.maxima.clear();

        // Promote intermediate vertices to the next edge of their bound.
        let mut e = self.edges.active;
        while e != INVALID {
            if self.edges.get(e).is_intermediate(top_y) {
                let op = if self.edges.get(e).out_idx != INVALID {
                    let top = self.edges.get(e).top;
                    Some(self.add_out_pt(e, top))
                } else {
                    None
                };
                e = self.edges.update_edge_into_ael(e, &mut self.scanbeam)?;
                if let Some(op) = op {
                    self.join_collinear_neighbour(e, op, false);
                }
            }
            e = self.edges.get(e).next_in_ael;
        }
        Ok(())
    }

    /// After `e` was promoted at a vertex where ring point `op` was added,
    /// queue a join with an AEL neighbour running collinear from the same
    /// point. Edges promoted off a horizontal compare whole-edge deltas;
    /// otherwise the neighbour is compared from its current position.
    pub(super) fn join_collinear_neighbour(&mut self, e: EdgeIdx, op: OutPtIdx, by_delta: bool) {
        let edge = self.edges.get(e);
        let (bot, top) = (edge.bot, edge.top);
        for neighbour in [edge.prev_in_ael, edge.next_in_ael] {
            if neighbour == INVALID {
                continue;
            }
            let n = self.edges.get(neighbour);
            let c = self.edges.get(e);
            let collinear = if by_delta {
                slopes_equal4(c.top, c.bot, n.top, n.bot, self.use_full_range)
            } else {
                slopes_equal4(c.curr, c.top, n.curr, n.top, self.use_full_range)
            };
            if n.curr == bot && n.out_idx != INVALID && n.curr.y > n.top.y && collinear {
                let op2 = self.add_out_pt(neighbour, bot);
                self.joins.add_join(op, op2, top);
                return;
            }
        }
    }
}
