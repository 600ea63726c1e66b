// Copyright 2025 Lars Brubaker
// License: MIT
//
// Winding counts and the contribution test.

use super::{ClipType, Clipper, PolyFillType, PolyType};
use crate::edge::{EdgeIdx, INVALID};

impl Clipper {
    /// Fill rules for `poly_type`'s own type and for the other type.
    pub(super) fn fill_types(&self, poly_type: PolyType) -> (PolyFillType, PolyFillType) {
        match poly_type {
            PolyType::Subject => (self.subj_fill, self.clip_fill),
            PolyType::Clip => (self.clip_fill, self.subj_fill),
        }
    }

    /// Compute `wind_cnt` and `wind_cnt2` for an edge just inserted into
    /// the AEL from its nearest same-type neighbour on the left.
    pub(super) fn set_winding_count(&mut self, edge: EdgeIdx) {
        let (poly_type, wind_delta) = {
            let ed = self.edges.get(edge);
            (ed.poly_type, ed.wind_delta)
        };
        let (fill, other_fill) = self.fill_types(poly_type);

        let mut e = self.edges.get(edge).prev_in_ael;
        while e != INVALID && self.edges.get(e).poly_type != poly_type {
            e = self.edges.get(e).prev_in_ael;
        }

        let (wind_cnt, mut wind_cnt2, mut scan) = if e == INVALID {
            (wind_delta, 0, self.edges.active)
        } else {
            let prev = self.edges.get(e);
            let wc = if fill == PolyFillType::EvenOdd {
                wind_delta
            } else if prev.wind_cnt * prev.wind_delta < 0 {
                // Moving out of the previous polygon.
                if prev.wind_cnt.abs() > 1 {
                    if prev.wind_delta * wind_delta < 0 {
                        prev.wind_cnt
                    } else {
                        prev.wind_cnt + wind_delta
                    }
                } else {
                    wind_delta
                }
            } else if prev.wind_delta * wind_delta < 0 {
                // Moving into it, but wound the other way.
                prev.wind_cnt
            } else {
                prev.wind_cnt + wind_delta
            };
            (wc, prev.wind_cnt2, prev.next_in_ael)
        };

        // Accumulate the other type's edges between there and here.
        while scan != edge && scan != INVALID {
            let s = self.edges.get(scan);
            if s.poly_type != poly_type {
                if other_fill == PolyFillType::EvenOdd {
                    wind_cnt2 = if wind_cnt2 == 0 { 1 } else { 0 };
                } else {
                    wind_cnt2 += s.wind_delta;
                }
            }
            scan = s.next_in_ael;
        }

        let ed = self.edges.get_mut(edge);
        ed.wind_cnt = wind_cnt;
        ed.wind_cnt2 = wind_cnt2;
    }

    pub(super) fn is_contributing(&self, e: EdgeIdx) -> bool {
        let edge = self.edges.get(e);
        let (fill, other_fill) = self.fill_types(edge.poly_type);
        let wc = edge.wind_cnt;
        let own_ok = match fill {
            PolyFillType::EvenOdd => true,
            PolyFillType::NonZero => wc.abs() == 1,
            PolyFillType::Positive => wc == 1,
            PolyFillType::Negative => wc == -1,
        };
        if !own_ok {
            return false;
        }

        let wc2 = edge.wind_cnt2;
        let inside_other = || match other_fill {
            PolyFillType::EvenOdd | PolyFillType::NonZero => wc2 != 0,
            PolyFillType::Positive => wc2 > 0,
            PolyFillType::Negative => wc2 < 0,
        };
        let outside_other = || match other_fill {
            PolyFillType::EvenOdd | PolyFillType::NonZero => wc2 == 0,
            PolyFillType::Positive => wc2 <= 0,
            PolyFillType::Negative => wc2 >= 0,
        };
        match self.clip_type {
            ClipType::Intersection => inside_other(),
            ClipType::Union => outside_other(),
            ClipType::Difference => match edge.poly_type {
                PolyType::Subject => outside_other(),
                PolyType::Clip => inside_other(),
            },
            ClipType::Xor => true,
        }
    }
}

/// Winding count as seen through `fill`: how many times the region is
/// covered, counting only the direction that rule fills.
pub(super) fn filled_count(fill: PolyFillType, wind_cnt: i32) -> i32 {
    match fill {
        PolyFillType::Positive => wind_cnt,
        PolyFillType::Negative => -wind_cnt,
        PolyFillType::EvenOdd | PolyFillType::NonZero => wind_cnt.abs(),
    }
}
