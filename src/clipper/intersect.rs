// Copyright 2025 Lars Brubaker
// License: MIT
//
// Crossings within one band.
//
// The AEL is ordered by x at the band bottom. Re-sorting it by x at the band
// top with a bubble pass yields every pair of edges that cross inside the
// band. The crossings are then applied bottom-up, each between edges that
// are adjacent at that moment, updating winding counts and output rings.

use super::winding::filled_count;
use super::{ClipType, Clipper, PolyFillType, PolyType};
use crate::edge::{EdgeIdx, INVALID};
use crate::error::{ClipResult, InvariantError};
use crate::point::{CInt, IntPoint};

#[derive(Copy, Clone, Debug)]
pub(crate) struct IntersectNode {
    pub edge1: EdgeIdx,
    pub edge2: EdgeIdx,
    pub pt: IntPoint,
}

impl Clipper {
    pub(super) fn process_intersections(&mut self, top_y: CInt) -> ClipResult<()> {
        if self.edges.active == INVALID {
            return Ok(());
        }
        self.build_intersect_list(top_y);
        let result = match self.intersections.len() {
            0 => Ok(()),
            1 => {
                self.process_intersect_list();
                Ok(())
            }
            _ => self.fixup_intersection_order().map(|()| self.process_intersect_list()),
        };
        self.intersections.clear();
        self.edges.sorted = INVALID;
        result
    }

    fn build_intersect_list(&mut self, top_y: CInt) {
        // Copy the AEL into the SEL with x moved to the band top.
        let mut e = self.edges.active;
        self.edges.sorted = e;
        while e != INVALID {
            let edge = self.edges.get_mut(e);
            edge.prev_in_sel = edge.prev_in_ael;
            edge.next_in_sel = edge.next_in_ael;
            edge.curr.x = edge.top_x(top_y);
            e = edge.next_in_ael;
        }

        loop {
            let mut modified = false;
            let mut e = self.edges.sorted;
            loop {
                let next = self.edges.get(e).next_in_sel;
                if next == INVALID {
                    break;
                }
                if self.edges.get(e).curr.x > self.edges.get(next).curr.x {
                    let mut pt = self.edges.intersect_point(e, next);
                    if pt.y < top_y {
                        pt = IntPoint::new(self.edges.get(e).top_x(top_y), top_y);
                    }
                    self.intersections.push(IntersectNode {
                        edge1: e,
                        edge2: next,
                        pt,
                    });
                    self.edges.swap_positions_in_sel(e, next);
                    modified = true;
                } else {
                    e = next;
                }
            }
            // `e` has bubbled to the end; shorten the pass.
            let prev = self.edges.get(e).prev_in_sel;
            if prev == INVALID || !modified {
                break;
            }
            self.edges.get_mut(prev).next_in_sel = INVALID;
        }
        self.edges.sorted = INVALID;
    }

    /// Reorder crossings so each is applied between neighbours.
    fn fixup_intersection_order(&mut self) -> ClipResult<()> {
        self.edges.copy_ael_to_sel();
        self.intersections.sort_by(|a, b| b.pt.y.cmp(&a.pt.y));

        let count = self.intersections.len();
        for i in 0..count {
            if !self.edges_adjacent(&self.intersections[i]) {
                let j = (i + 1..count).find(|&j| self.edges_adjacent(&self.intersections[j]));
                match j {
                    Some(j) => self.intersections.swap(i, j),
                    None => return Err(InvariantError::Intersection.into()),
                }
            }
            let node = self.intersections[i];
            self.edges.swap_positions_in_sel(node.edge1, node.edge2);
        }
        Ok(())
    }

    fn edges_adjacent(&self, node: &IntersectNode) -> bool {
        let e1 = self.edges.get(node.edge1);
        e1.next_in_sel == node.edge2 || e1.prev_in_sel == node.edge2
    }

    fn process_intersect_list(&mut self) {
        for i in 0..self.intersections.len() {
            let node = self.intersections[i];
            self.intersect_edges(node.edge1, node.edge2, node.pt);
            self.edges.swap_positions_in_ael(node.edge1, node.edge2);
        }
        self.intersections.clear();
    }

    /// Apply the crossing of `e1` and `e2` at `pt`. Above the crossing `e1`
    /// lies to the right of `e2`. The caller swaps their AEL positions.
    pub(super) fn intersect_edges(&mut self, e1: EdgeIdx, e2: EdgeIdx, pt: IntPoint) {
        let e1_contributing = self.edges.get(e1).out_idx != INVALID;
        let e2_contributing = self.edges.get(e2).out_idx != INVALID;
        let type1 = self.edges.get(e1).poly_type;
        let type2 = self.edges.get(e2).poly_type;
        let (fill1, other_fill1) = self.fill_types(type1);
        let (fill2, other_fill2) = self.fill_types(type2);

        // Update the winding counts.
        {
            let (d1, d2) = (self.edges.get(e1).wind_delta, self.edges.get(e2).wind_delta);
            let (wc1, wc2) = (self.edges.get(e1).wind_cnt, self.edges.get(e2).wind_cnt);
            if type1 == type2 {
                if fill1 == PolyFillType::EvenOdd {
                    self.edges.get_mut(e1).wind_cnt = wc2;
                    self.edges.get_mut(e2).wind_cnt = wc1;
                } else {
                    self.edges.get_mut(e1).wind_cnt = if wc1 + d2 == 0 { -wc1 } else { wc1 + d2 };
                    self.edges.get_mut(e2).wind_cnt = if wc2 - d1 == 0 { -wc2 } else { wc2 - d1 };
                }
            } else {
                let a = self.edges.get_mut(e1);
                a.wind_cnt2 = if fill2 != PolyFillType::EvenOdd {
                    a.wind_cnt2 + d2
                } else if a.wind_cnt2 == 0 {
                    1
                } else {
                    0
                };
                let b = self.edges.get_mut(e2);
                b.wind_cnt2 = if fill1 != PolyFillType::EvenOdd {
                    b.wind_cnt2 - d1
                } else if b.wind_cnt2 == 0 {
                    1
                } else {
                    0
                };
            }
        }

        let e1_wc = filled_count(fill1, self.edges.get(e1).wind_cnt);
        let e2_wc = filled_count(fill2, self.edges.get(e2).wind_cnt);
        let unit = |wc: i32| wc == 0 || wc == 1;

        if e1_contributing && e2_contributing {
            if !unit(e1_wc) || !unit(e2_wc) || (type1 != type2 && self.clip_type != ClipType::Xor) {
                self.add_local_max_poly(e1, e2, pt);
            } else {
                self.add_out_pt(e1, pt);
                self.add_out_pt(e2, pt);
                self.swap_sides(e1, e2);
                self.swap_out_idx(e1, e2);
            }
        } else if e1_contributing {
            if unit(e2_wc) {
                self.add_out_pt(e1, pt);
                self.swap_sides(e1, e2);
                self.swap_out_idx(e1, e2);
            }
        } else if e2_contributing {
            if unit(e1_wc) {
                self.add_out_pt(e2, pt);
                self.swap_sides(e1, e2);
                self.swap_out_idx(e1, e2);
            }
        } else if unit(e1_wc) && unit(e2_wc) {
            // Neither edge is contributing yet.
            let e1_wc2 = filled_count(other_fill1, self.edges.get(e1).wind_cnt2);
            let e2_wc2 = filled_count(other_fill2, self.edges.get(e2).wind_cnt2);
            if type1 != type2 {
                self.add_local_min_poly(e1, e2, pt);
            } else if e1_wc == 1 && e2_wc == 1 {
                let starts = match self.clip_type {
                    ClipType::Intersection => e1_wc2 > 0 && e2_wc2 > 0,
                    ClipType::Union => e1_wc2 <= 0 && e2_wc2 <= 0,
                    ClipType::Difference => {
                        (type1 == PolyType::Clip && e1_wc2 > 0 && e2_wc2 > 0)
                            || (type1 == PolyType::Subject && e1_wc2 <= 0 && e2_wc2 <= 0)
                    }
                    ClipType::Xor => true,
                };
                if starts {
                    self.add_local_min_poly(e1, e2, pt);
                }
            } else {
                self.swap_sides(e1, e2);
            }
        }
    }

    fn swap_sides(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        let s1 = self.edges.get(e1).side;
        let s2 = self.edges.get(e2).side;
        self.edges.get_mut(e1).side = s2;
        self.edges.get_mut(e2).side = s1;
    }

    fn swap_out_idx(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        let o1 = self.edges.get(e1).out_idx;
        let o2 = self.edges.get(e2).out_idx;
        self.edges.get_mut(e1).out_idx = o2;
        self.edges.get_mut(e2).out_idx = o1;
    }
}
