// Copyright 2025 Lars Brubaker
// License: MIT
//
// Horizontal edges.
//
// A horizontal does not advance with the sweep; it is processed in place on
// its scanline by sliding it from its bot.x to its top.x across every AEL
// edge in between. Consecutive horizontals in one bound are handled as a
// single chain.

use super::Clipper;
use crate::active::Direction;
use crate::edge::{EdgeIdx, INVALID};
use crate::error::{ClipResult, InvariantError};
use crate::outrec::OutPtIdx;
use crate::point::{horz_segments_overlap, CInt, IntPoint};

/// Travel direction and x extent of a horizontal running bot_x -> top_x.
fn horz_direction(bot_x: CInt, top_x: CInt) -> (Direction, CInt, CInt) {
    if bot_x < top_x {
        (Direction::LeftToRight, bot_x, top_x)
    } else {
        (Direction::RightToLeft, top_x, bot_x)
    }
}

impl Clipper {
    pub(super) fn process_horizontals(&mut self) -> ClipResult<()> {
        while let Some(e) = self.edges.pop_edge_from_sel() {
            self.process_horizontal(e)?;
        }
        Ok(())
    }

    /// Queue joins between horizontal `horz` (at ring point `op1`) and any
    /// overlapping contributing horizontal still waiting in the SEL.
    fn join_waiting_horizontals(&mut self, horz: EdgeIdx, op1: OutPtIdx) {
        let (bot_x, top_x) = (self.edges.get(horz).bot.x, self.edges.get(horz).top.x);
        let mut next = self.edges.sorted;
        while next != INVALID {
            let n = self.edges.get(next);
            if n.out_idx != INVALID && horz_segments_overlap(bot_x, top_x, n.bot.x, n.top.x) {
                let off = n.top;
                let op2 = self.last_out_pt(next);
                self.joins.add_join(op2, op1, off);
            }
            next = self.edges.get(next).next_in_sel;
        }
    }

    fn process_horizontal(&mut self, mut horz: EdgeIdx) -> ClipResult<()> {
        let (mut dir, mut horz_left, mut horz_right) =
            horz_direction(self.edges.get(horz).bot.x, self.edges.get(horz).top.x);

        let mut last_horz = horz;
        loop {
            let next = self.edges.get(last_horz).next_in_lml;
            if next == INVALID || !self.edges.is_horizontal(next) {
                break;
            }
            last_horz = next;
        }
        let max_pair = if self.edges.get(last_horz).next_in_lml == INVALID {
            self.edges.maxima_pair(last_horz)
        } else {
            INVALID
        };

        // Cursors into the sorted maxima list: `ltr` counts up from the
        // front, `rtl` counts up from the back. `len` means exhausted.
        let len = self.maxima.len();
        let (mut ltr, mut rtl) = (len, len);
        if len > 0 {
            let bot_x = self.edges.get(horz).bot.x;
            let last_top_x = self.edges.get(last_horz).top.x;
            match dir {
                Direction::LeftToRight => {
                    ltr = self.maxima.iter().position(|&m| m > bot_x).unwrap_or(len);
                    if ltr < len && self.maxima[ltr] >= last_top_x {
                        ltr = len;
                    }
                }
                Direction::RightToLeft => {
                    rtl = self.maxima.iter().rev().position(|&m| m <= bot_x).unwrap_or(len);
                    if rtl < len && self.maxima[len - 1 - rtl] <= last_top_x {
                        rtl = len;
                    }
                }
            }
        }

        let mut op1 = INVALID;
        loop {
            let is_last = horz == last_horz;
            let mut e = self.edges.next_in_ael_dir(horz, dir);
            while e != INVALID {
                // Give the horizontal a vertex wherever a maximum touches it.
                if len > 0 {
                    let e_x = self.edges.get(e).curr.x;
                    let y = self.edges.get(horz).bot.y;
                    let contributing = self.edges.get(horz).out_idx != INVALID;
                    match dir {
                        Direction::LeftToRight => {
                            while ltr < len && self.maxima[ltr] < e_x {
                                if contributing {
                                    self.add_out_pt(horz, IntPoint::new(self.maxima[ltr], y));
                                }
                                ltr += 1;
                            }
                        }
                        Direction::RightToLeft => {
                            while rtl < len && self.maxima[len - 1 - rtl] > e_x {
                                if contributing {
                                    self.add_out_pt(horz, IntPoint::new(self.maxima[len - 1 - rtl], y));
                                }
                                rtl += 1;
                            }
                        }
                    }
                }

                let e_curr_x = self.edges.get(e).curr.x;
                if (dir == Direction::LeftToRight && e_curr_x > horz_right)
                    || (dir == Direction::RightToLeft && e_curr_x < horz_left)
                {
                    break;
                }

                // Stop at the end of an intermediate horizontal when `e` is
                // steeper than the edge that follows it.
                let horz_next = self.edges.get(horz).next_in_lml;
                if e_curr_x == self.edges.get(horz).top.x
                    && horz_next != INVALID
                    && self.edges.get(e).dx < self.edges.get(horz_next).dx
                {
                    break;
                }

                if self.edges.get(horz).out_idx != INVALID {
                    let curr = self.edges.get(e).curr;
                    op1 = self.add_out_pt(horz, curr);
                    self.join_waiting_horizontals(horz, op1);
                    let bot = self.edges.get(horz).bot;
                    self.joins.add_ghost_join(op1, bot);
                }

                if e == max_pair && is_last {
                    if self.edges.get(horz).out_idx != INVALID {
                        let top = self.edges.get(horz).top;
                        self.add_local_max_poly(horz, max_pair, top);
                    }
                    self.edges.delete_from_ael(horz);
                    self.edges.delete_from_ael(max_pair);
                    return Ok(());
                }

                let pt = IntPoint::new(e_curr_x, self.edges.get(horz).curr.y);
                match dir {
                    Direction::LeftToRight => self.intersect_edges(horz, e, pt),
                    Direction::RightToLeft => self.intersect_edges(e, horz, pt),
                }
                let next = self.edges.next_in_ael_dir(e, dir);
                self.edges.swap_positions_in_ael(horz, e);
                e = next;
            }

            let next_lml = self.edges.get(horz).next_in_lml;
            if next_lml == INVALID || !self.edges.is_horizontal(next_lml) {
                break;
            }
            horz = self
                .edges
                .update_edge_into_ael(horz, &mut self.scanbeam)
                .map_err(|_| InvariantError::Horizontal)?;
            if self.edges.get(horz).out_idx != INVALID {
                let bot = self.edges.get(horz).bot;
                self.add_out_pt(horz, bot);
            }
            (dir, horz_left, horz_right) = horz_direction(self.edges.get(horz).bot.x, self.edges.get(horz).top.x);
        }

        if self.edges.get(horz).out_idx != INVALID && op1 == INVALID {
            op1 = self.last_out_pt(horz);
            self.join_waiting_horizontals(horz, op1);
            let top = self.edges.get(horz).top;
            self.joins.add_ghost_join(op1, top);
        }

        if self.edges.get(horz).next_in_lml != INVALID {
            if self.edges.get(horz).out_idx != INVALID {
                let top = self.edges.get(horz).top;
                let op = self.add_out_pt(horz, top);
                horz = self
                    .edges
                    .update_edge_into_ael(horz, &mut self.scanbeam)
                    .map_err(|_| InvariantError::Horizontal)?;
                self.join_collinear_neighbour(horz, op, true);
            } else {
                self.edges
                    .update_edge_into_ael(horz, &mut self.scanbeam)
                    .map_err(|_| InvariantError::Horizontal)?;
            }
        } else {
            if self.edges.get(horz).out_idx != INVALID {
                let top = self.edges.get(horz).top;
                self.add_out_pt(horz, top);
            }
            self.edges.delete_from_ael(horz);
        }
        Ok(())
    }
}
