// Copyright 2025 Lars Brubaker
// License: MIT
//
// Active edge list (AEL) and sorted edge list (SEL).
//
// Both are intrusive doubly-linked lists threaded through the edge arena with
// INVALID as the null link; the table stores each list's head. The AEL holds
// the edges crossing the sweep line in left-to-right order. The SEL is reused
// for two jobs: queueing horizontals within a band, and as the scratch order
// for intersection building.

use crate::edge::{EdgeIdx, EdgeTable, INVALID};
use crate::error::{ClipResult, InvariantError};
use crate::scanbeam::ScanbeamQueue;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl EdgeTable {
    /// Does `e2` belong before `e1` in the AEL?
    ///
    /// Edges are ordered by `curr.x`. On a tie the edge that heads further
    /// left above the shared point goes first.
    pub fn e2_inserts_before_e1(&self, e1: EdgeIdx, e2: EdgeIdx) -> bool {
        let (a, b) = (self.get(e1), self.get(e2));
        if b.curr.x == a.curr.x {
            if b.top.y > a.top.y {
                b.top.x < a.top_x(b.top.y)
            } else {
                a.top.x > b.top_x(a.top.y)
            }
        } else {
            b.curr.x < a.curr.x
        }
    }

    /// Insert `edge` into the AEL, scanning from `start` (or the head).
    pub fn insert_edge_into_ael(&mut self, edge: EdgeIdx, start: EdgeIdx) {
        if self.active == INVALID {
            let e = self.get_mut(edge);
            e.prev_in_ael = INVALID;
            e.next_in_ael = INVALID;
            self.active = edge;
        } else if start == INVALID && self.e2_inserts_before_e1(self.active, edge) {
            let head = self.active;
            let e = self.get_mut(edge);
            e.prev_in_ael = INVALID;
            e.next_in_ael = head;
            self.get_mut(head).prev_in_ael = edge;
            self.active = edge;
        } else {
            let mut s = if start == INVALID { self.active } else { start };
            loop {
                let next = self.get(s).next_in_ael;
                if next == INVALID || self.e2_inserts_before_e1(next, edge) {
                    break;
                }
                s = next;
            }
            let next = self.get(s).next_in_ael;
            self.get_mut(edge).next_in_ael = next;
            if next != INVALID {
                self.get_mut(next).prev_in_ael = edge;
            }
            self.get_mut(edge).prev_in_ael = s;
            self.get_mut(s).next_in_ael = edge;
        }
    }

    pub fn delete_from_ael(&mut self, e: EdgeIdx) {
        let (prev, next) = (self.get(e).prev_in_ael, self.get(e).next_in_ael);
        if prev == INVALID && next == INVALID && e != self.active {
            return;
        }
        if prev != INVALID {
            self.get_mut(prev).next_in_ael = next;
        } else {
            self.active = next;
        }
        if next != INVALID {
            self.get_mut(next).prev_in_ael = prev;
        }
        let edge = self.get_mut(e);
        edge.next_in_ael = INVALID;
        edge.prev_in_ael = INVALID;
    }

    pub fn delete_from_sel(&mut self, e: EdgeIdx) {
        let (prev, next) = (self.get(e).prev_in_sel, self.get(e).next_in_sel);
        if prev == INVALID && next == INVALID && e != self.sorted {
            return;
        }
        if prev != INVALID {
            self.get_mut(prev).next_in_sel = next;
        } else {
            self.sorted = next;
        }
        if next != INVALID {
            self.get_mut(next).prev_in_sel = prev;
        }
        let edge = self.get_mut(e);
        edge.next_in_sel = INVALID;
        edge.prev_in_sel = INVALID;
    }

    /// Push onto the front of the SEL. Horizontal processing does not depend
    /// on SEL order.
    pub fn add_edge_to_sel(&mut self, e: EdgeIdx) {
        let head = self.sorted;
        let edge = self.get_mut(e);
        edge.prev_in_sel = INVALID;
        edge.next_in_sel = head;
        if head != INVALID {
            self.get_mut(head).prev_in_sel = e;
        }
        self.sorted = e;
    }

    pub fn pop_edge_from_sel(&mut self) -> Option<EdgeIdx> {
        let e = self.sorted;
        if e == INVALID {
            return None;
        }
        self.delete_from_sel(e);
        Some(e)
    }

    pub fn copy_ael_to_sel(&mut self) {
        let mut e = self.active;
        self.sorted = e;
        while e != INVALID {
            let edge = self.get_mut(e);
            edge.prev_in_sel = edge.prev_in_ael;
            edge.next_in_sel = edge.next_in_ael;
            e = edge.next_in_ael;
        }
    }

    pub fn swap_positions_in_ael(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        // Either edge may already have left the AEL.
        let (a, b) = (self.get(e1), self.get(e2));
        if a.next_in_ael == a.prev_in_ael || b.next_in_ael == b.prev_in_ael {
            return;
        }
        if a.next_in_ael == e2 {
            let next = b.next_in_ael;
            let prev = a.prev_in_ael;
            if next != INVALID {
                self.get_mut(next).prev_in_ael = e1;
            }
            if prev != INVALID {
                self.get_mut(prev).next_in_ael = e2;
            }
            self.get_mut(e2).prev_in_ael = prev;
            self.get_mut(e2).next_in_ael = e1;
            self.get_mut(e1).prev_in_ael = e2;
            self.get_mut(e1).next_in_ael = next;
        } else if b.next_in_ael == e1 {
            let next = a.next_in_ael;
            let prev = b.prev_in_ael;
            if next != INVALID {
                self.get_mut(next).prev_in_ael = e2;
            }
            if prev != INVALID {
                self.get_mut(prev).next_in_ael = e1;
            }
            self.get_mut(e1).prev_in_ael = prev;
            self.get_mut(e1).next_in_ael = e2;
            self.get_mut(e2).prev_in_ael = e1;
            self.get_mut(e2).next_in_ael = next;
        } else {
            let (a_next, a_prev) = (a.next_in_ael, a.prev_in_ael);
            let (b_next, b_prev) = (b.next_in_ael, b.prev_in_ael);
            self.get_mut(e1).next_in_ael = b_next;
            if b_next != INVALID {
                self.get_mut(b_next).prev_in_ael = e1;
            }
            self.get_mut(e1).prev_in_ael = b_prev;
            if b_prev != INVALID {
                self.get_mut(b_prev).next_in_ael = e1;
            }
            self.get_mut(e2).next_in_ael = a_next;
            if a_next != INVALID {
                self.get_mut(a_next).prev_in_ael = e2;
            }
            self.get_mut(e2).prev_in_ael = a_prev;
            if a_prev != INVALID {
                self.get_mut(a_prev).next_in_ael = e2;
            }
        }
        if self.get(e1).prev_in_ael == INVALID {
            self.active = e1;
        } else if self.get(e2).prev_in_ael == INVALID {
            self.active = e2;
        }
    }

    pub fn swap_positions_in_sel(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        let (a, b) = (self.get(e1), self.get(e2));
        if a.next_in_sel == INVALID && a.prev_in_sel == INVALID {
            return;
        }
        if b.next_in_sel == INVALID && b.prev_in_sel == INVALID {
            return;
        }
        if a.next_in_sel == e2 {
            let next = b.next_in_sel;
            let prev = a.prev_in_sel;
            if next != INVALID {
                self.get_mut(next).prev_in_sel = e1;
            }
            if prev != INVALID {
                self.get_mut(prev).next_in_sel = e2;
            }
            self.get_mut(e2).prev_in_sel = prev;
            self.get_mut(e2).next_in_sel = e1;
            self.get_mut(e1).prev_in_sel = e2;
            self.get_mut(e1).next_in_sel = next;
        } else if b.next_in_sel == e1 {
            let next = a.next_in_sel;
            let prev = b.prev_in_sel;
            if next != INVALID {
                self.get_mut(next).prev_in_sel = e2;
            }
            if prev != INVALID {
                self.get_mut(prev).next_in_sel = e1;
            }
            self.get_mut(e1).prev_in_sel = prev;
            self.get_mut(e1).next_in_sel = e2;
            self.get_mut(e2).prev_in_sel = e1;
            self.get_mut(e2).next_in_sel = next;
        } else {
            let (a_next, a_prev) = (a.next_in_sel, a.prev_in_sel);
            let (b_next, b_prev) = (b.next_in_sel, b.prev_in_sel);
            self.get_mut(e1).next_in_sel = b_next;
            if b_next != INVALID {
                self.get_mut(b_next).prev_in_sel = e1;
            }
            self.get_mut(e1).prev_in_sel = b_prev;
            if b_prev != INVALID {
                self.get_mut(b_prev).next_in_sel = e1;
            }
            self.get_mut(e2).next_in_sel = a_next;
            if a_next != INVALID {
                self.get_mut(a_next).prev_in_sel = e2;
            }
            self.get_mut(e2).prev_in_sel = a_prev;
            if a_prev != INVALID {
                self.get_mut(a_prev).next_in_sel = e2;
            }
        }
        if self.get(e1).prev_in_sel == INVALID {
            self.sorted = e1;
        } else if self.get(e2).prev_in_sel == INVALID {
            self.sorted = e2;
        }
    }

    /// Replace `e` in the AEL with its bound successor and return the successor.
    ///
    /// The successor inherits the ring assignment, side and winding state;
    /// its top is queued on the scanbeam unless it is horizontal.
    pub fn update_edge_into_ael(&mut self, e: EdgeIdx, scanbeam: &mut ScanbeamQueue) -> ClipResult<EdgeIdx> {
        let next = self.get(e).next_in_lml;
        if next == INVALID {
            return Err(InvariantError::MissingBoundSuccessor.into());
        }
        let old = self.get(e).clone();
        if old.prev_in_ael != INVALID {
            self.get_mut(old.prev_in_ael).next_in_ael = next;
        } else {
            self.active = next;
        }
        if old.next_in_ael != INVALID {
            self.get_mut(old.next_in_ael).prev_in_ael = next;
        }
        let n = self.get_mut(next);
        n.out_idx = old.out_idx;
        n.side = old.side;
        n.wind_delta = old.wind_delta;
        n.wind_cnt = old.wind_cnt;
        n.wind_cnt2 = old.wind_cnt2;
        n.curr = n.bot;
        n.prev_in_ael = old.prev_in_ael;
        n.next_in_ael = old.next_in_ael;
        if !n.is_horizontal() {
            scanbeam.insert(n.top.y);
        }
        Ok(next)
    }

    /// The neighbour of `e` in the AEL in the direction of travel.
    #[inline]
    pub fn next_in_ael_dir(&self, e: EdgeIdx, dir: Direction) -> EdgeIdx {
        match dir {
            Direction::LeftToRight => self.get(e).next_in_ael,
            Direction::RightToLeft => self.get(e).prev_in_ael,
        }
    }

    /// Iterate the AEL from the head.
    pub fn ael_iter(&self) -> AelIter<'_> {
        AelIter {
            table: self,
            curr: self.active,
        }
    }
}

pub struct AelIter<'a> {
    table: &'a EdgeTable,
    curr: EdgeIdx,
}

impl Iterator for AelIter<'_> {
    type Item = EdgeIdx;

    fn next(&mut self) -> Option<EdgeIdx> {
        if self.curr == INVALID {
            return None;
        }
        let e = self.curr;
        self.curr = self.table.get(e).next_in_ael;
        Some(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;
    use crate::point::IntPoint;

    /// Vertical edges at the given x values spanning y 10 -> 0.
    fn verticals(xs: &[i64]) -> EdgeTable {
        let mut table = EdgeTable::new();
        for &x in xs {
            table.edges.push(Edge {
                bot: IntPoint::new(x, 10),
                curr: IntPoint::new(x, 10),
                top: IntPoint::new(x, 0),
                ..Edge::default()
            });
        }
        table
    }

    fn ael_order(table: &EdgeTable) -> Vec<EdgeIdx> {
        table.ael_iter().collect()
    }

    #[test]
    fn insert_keeps_x_order() {
        let mut table = verticals(&[30, 10, 20, 0]);
        for e in 0..4 {
            table.insert_edge_into_ael(e, INVALID);
        }
        assert_eq!(ael_order(&table), vec![3, 1, 2, 0]);
    }

    #[test]
    fn tie_on_x_orders_by_top() {
        let mut table = EdgeTable::new();
        // Both start at (5, 10); edge 0 leans right, edge 1 leans left.
        table.edges.push(Edge {
            bot: IntPoint::new(5, 10),
            curr: IntPoint::new(5, 10),
            top: IntPoint::new(10, 0),
            dx: -0.5,
            ..Edge::default()
        });
        table.edges.push(Edge {
            bot: IntPoint::new(5, 10),
            curr: IntPoint::new(5, 10),
            top: IntPoint::new(0, 0),
            dx: 0.5,
            ..Edge::default()
        });
        table.insert_edge_into_ael(0, INVALID);
        table.insert_edge_into_ael(1, INVALID);
        assert_eq!(ael_order(&table), vec![1, 0]);
    }

    #[test]
    fn swap_adjacent_and_distant() {
        let mut table = verticals(&[0, 10, 20, 30]);
        for e in 0..4 {
            table.insert_edge_into_ael(e, INVALID);
        }
        table.swap_positions_in_ael(0, 1);
        assert_eq!(ael_order(&table), vec![1, 0, 2, 3]);
        table.swap_positions_in_ael(3, 2);
        assert_eq!(ael_order(&table), vec![1, 0, 3, 2]);
        table.swap_positions_in_ael(1, 2);
        assert_eq!(ael_order(&table), vec![2, 0, 3, 1]);
        assert_eq!(table.active, 2);
    }

    #[test]
    fn delete_and_double_delete() {
        let mut table = verticals(&[0, 10, 20]);
        for e in 0..3 {
            table.insert_edge_into_ael(e, INVALID);
        }
        table.delete_from_ael(0);
        table.delete_from_ael(0);
        assert_eq!(ael_order(&table), vec![1, 2]);
        table.delete_from_ael(2);
        assert_eq!(ael_order(&table), vec![1]);
    }

    #[test]
    fn sel_copy_swap_and_pop() {
        let mut table = verticals(&[0, 10, 20]);
        for e in 0..3 {
            table.insert_edge_into_ael(e, INVALID);
        }
        table.copy_ael_to_sel();
        table.swap_positions_in_sel(1, 2);
        assert_eq!(table.sorted, 0);
        assert_eq!(table.get(0).next_in_sel, 2);
        assert_eq!(table.pop_edge_from_sel(), Some(0));
        assert_eq!(table.pop_edge_from_sel(), Some(2));
        assert_eq!(table.pop_edge_from_sel(), Some(1));
        assert_eq!(table.pop_edge_from_sel(), None);

        table.add_edge_to_sel(1);
        table.add_edge_to_sel(0);
        assert_eq!(table.pop_edge_from_sel(), Some(0));
    }

    #[test]
    fn update_without_successor_is_an_invariant_error() {
        let mut table = verticals(&[0]);
        table.insert_edge_into_ael(0, INVALID);
        let mut sb = ScanbeamQueue::new();
        let err = table.update_edge_into_ael(0, &mut sb).unwrap_err();
        assert_eq!(err, InvariantError::MissingBoundSuccessor.into());
    }
}
