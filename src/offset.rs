// Copyright 2025 Lars Brubaker
// License: MIT
//
// Polygon offsetting.
//
// Each ring is pushed out (positive delta) or pulled in (negative delta)
// along its edge normals, with corners filled per the join type. The raw
// offset rings overlap themselves at concave corners, so the result is
// cleaned up with a union on the clipping engine.

use std::f64::consts::PI;

use crate::clipper::{ClipType, Clipper, PolyFillType, PolyType};
use crate::config::{ClipOption, OffsetConfig, DEFAULT_ARC_TOLERANCE};
use crate::error::ClipResult;
use crate::point::{path_from, round, CInt, IntPoint, Path, Paths};
use crate::polygon::orientation;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JoinType {
    /// Corners cut square at the offset distance.
    Square,
    /// Corners approximated by an arc within `arc_tolerance`.
    Round,
    /// Corners extended to a point, squared off beyond `miter_limit`.
    Miter,
}

#[derive(Copy, Clone, Debug, Default)]
struct Normal {
    x: f64,
    y: f64,
}

fn unit_normal(p1: IntPoint, p2: IntPoint) -> Normal {
    if p1 == p2 {
        return Normal::default();
    }
    let dx = p2.x as f64 - p1.x as f64;
    let dy = p2.y as f64 - p1.y as f64;
    let f = 1.0 / (dx * dx + dy * dy).sqrt();
    Normal { x: dy * f, y: -dx * f }
}

pub struct ClipperOffset {
    config: OffsetConfig,
    rings: Vec<(Path, JoinType)>,
    /// (ring, vertex) of the lowest vertex seen so far.
    lowest: Option<(usize, usize)>,
}

impl Default for ClipperOffset {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipperOffset {
    pub fn new() -> Self {
        Self::with_config(OffsetConfig::default())
    }

    pub fn with_config(config: OffsetConfig) -> Self {
        ClipperOffset {
            config,
            rings: Vec::new(),
            lowest: None,
        }
    }

    pub fn clear(&mut self) {
        self.rings.clear();
        self.lowest = None;
    }

    /// Queue a closed polygon. Returns false when fewer than 3 distinct
    /// points remain after removing duplicates.
    pub fn add_path(&mut self, path: &[IntPoint], join: JoinType) -> bool {
        let mut high = match path.len() {
            0 => return false,
            n => n - 1,
        };
        while high > 0 && path[0] == path[high] {
            high -= 1;
        }

        let mut ring: Path = Vec::with_capacity(high + 1);
        ring.push(path[0]);
        let mut k = 0;
        for &pt in &path[1..=high] {
            let last = ring[ring.len() - 1];
            if last != pt {
                ring.push(pt);
                let low = ring[k];
                if pt.y > low.y || (pt.y == low.y && pt.x < low.x) {
                    k = ring.len() - 1;
                }
            }
        }
        if ring.len() < 3 {
            tracing::debug!(points = path.len(), "offset path rejected");
            return false;
        }

        let candidate = ring[k];
        self.rings.push((ring, join));
        let idx = self.rings.len() - 1;
        let lower = match self.lowest {
            None => true,
            Some((r, v)) => {
                let ip = self.rings[r].0[v];
                candidate.y > ip.y || (candidate.y == ip.y && candidate.x < ip.x)
            }
        };
        if lower {
            self.lowest = Some((idx, k));
        }
        true
    }

    pub fn add_paths(&mut self, paths: &[Path], join: JoinType) -> bool {
        let mut any = false;
        for path in paths {
            any |= self.add_path(path, join);
        }
        any
    }

    /// Offset every queued polygon by `delta` and merge the results.
    pub fn execute(&mut self, delta: f64) -> ClipResult<Paths> {
        self.fix_orientations();
        if delta.abs() < 1.0e-20 {
            return Ok(self.rings.iter().map(|(ring, _)| ring.clone()).collect());
        }

        let run = OffsetRun::new(&self.config, delta);
        let raw: Paths = self
            .rings
            .iter()
            .map(|(ring, join)| run.offset_ring(ring, *join))
            .collect();

        let mut clipper = Clipper::new();
        clipper.add_paths(&raw, PolyType::Subject);
        let mut solution = Paths::new();
        if delta > 0.0 {
            clipper.execute(ClipType::Union, &mut solution, PolyFillType::Positive)?;
        } else {
            // Surround everything with a frame so the shrunk rings come out
            // as its holes.
            let (left, top, right, bottom) = bounds(&raw);
            let frame = path_from(&[
                (left.saturating_sub(10), bottom.saturating_add(10)),
                (right.saturating_add(10), bottom.saturating_add(10)),
                (right.saturating_add(10), top.saturating_sub(10)),
                (left.saturating_sub(10), top.saturating_sub(10)),
            ]);
            // A frame that fails to ingest means there is nothing to offset.
            if clipper.add_path(&frame, PolyType::Subject).is_err() {
                return Ok(Paths::new());
            }
            clipper.set_option(ClipOption::ReverseSolution, true);
            clipper.execute(ClipType::Union, &mut solution, PolyFillType::Negative)?;
            if !solution.is_empty() {
                solution.remove(0);
            }
        }
        tracing::debug!(delta, inputs = self.rings.len(), outputs = solution.len(), "offset finished");
        Ok(solution)
    }

    /// Make the ring with the lowest vertex positively oriented, reversing
    /// every ring if it is not.
    fn fix_orientations(&mut self) {
        if let Some((r, _)) = self.lowest {
            if !orientation(&self.rings[r].0) {
                for (ring, _) in &mut self.rings {
                    ring.reverse();
                }
            }
        }
    }
}

fn bounds(paths: &Paths) -> (CInt, CInt, CInt, CInt) {
    let mut pts = paths.iter().flatten();
    let first = match pts.next() {
        Some(p) => *p,
        None => return (0, 0, 0, 0),
    };
    pts.fold((first.x, first.y, first.x, first.y), |(l, t, r, b), p| {
        (l.min(p.x), t.min(p.y), r.max(p.x), b.max(p.y))
    })
}

/// Per-delta constants shared by every ring of one `execute`.
struct OffsetRun {
    delta: f64,
    sin: f64,
    cos: f64,
    steps_per_rad: f64,
    miter_lim: f64,
}

impl OffsetRun {
    fn new(config: &OffsetConfig, delta: f64) -> Self {
        let miter_lim = if config.miter_limit > 2.0 {
            2.0 / (config.miter_limit * config.miter_limit)
        } else {
            0.5
        };

        let abs_delta = delta.abs();
        let y = if config.arc_tolerance <= 0.0 {
            DEFAULT_ARC_TOLERANCE
        } else if config.arc_tolerance > abs_delta * DEFAULT_ARC_TOLERANCE {
            abs_delta * DEFAULT_ARC_TOLERANCE
        } else {
            config.arc_tolerance
        };
        let mut steps = PI / (1.0 - y / abs_delta).acos();
        if steps > abs_delta * PI {
            steps = abs_delta * PI;
        }
        let sin = (2.0 * PI / steps).sin();
        OffsetRun {
            delta,
            sin: if delta < 0.0 { -sin } else { sin },
            cos: (2.0 * PI / steps).cos(),
            steps_per_rad: steps / (2.0 * PI),
            miter_lim,
        }
    }

    fn at(&self, pt: IntPoint, nx: f64, ny: f64) -> IntPoint {
        IntPoint::new(
            round(pt.x as f64 + nx * self.delta),
            round(pt.y as f64 + ny * self.delta),
        )
    }

    fn offset_ring(&self, src: &[IntPoint], join: JoinType) -> Path {
        let len = src.len();
        let normals: Vec<Normal> = (0..len)
            .map(|j| unit_normal(src[j], src[(j + 1) % len]))
            .collect();

        let mut dest = Path::with_capacity(len * 2);
        let mut k = len - 1;
        for j in 0..len {
            self.offset_point(src[j], normals[k], normals[j], join, &mut dest);
            k = j;
        }
        dest
    }

    /// Emit the corner at `pt` between the edge before it (normal `nk`) and
    /// the edge after it (normal `nj`).
    fn offset_point(&self, pt: IntPoint, nk: Normal, nj: Normal, join: JoinType, dest: &mut Path) {
        let mut sin_a = nk.x * nj.y - nj.x * nk.y;
        let cos_a = nk.x * nj.x + nk.y * nj.y;
        if (sin_a * self.delta).abs() < 1.0 {
            // Nearly straight: one point is enough.
            if cos_a > 0.0 {
                dest.push(self.at(pt, nk.x, nk.y));
                return;
            }
        } else {
            sin_a = sin_a.clamp(-1.0, 1.0);
        }

        if sin_a * self.delta < 0.0 {
            // Concave: notch through the vertex, cleaned up by the union.
            dest.push(self.at(pt, nk.x, nk.y));
            dest.push(pt);
            dest.push(self.at(pt, nj.x, nj.y));
            return;
        }

        match join {
            JoinType::Miter => {
                let r = 1.0 + cos_a;
                if r >= self.miter_lim {
                    let q = 1.0 / r;
                    dest.push(self.at(pt, (nk.x + nj.x) * q, (nk.y + nj.y) * q));
                } else {
                    self.square(pt, nk, nj, sin_a, cos_a, dest);
                }
            }
            JoinType::Square => self.square(pt, nk, nj, sin_a, cos_a, dest),
            JoinType::Round => self.round(pt, nk, nj, sin_a, cos_a, dest),
        }
    }

    fn square(&self, pt: IntPoint, nk: Normal, nj: Normal, sin_a: f64, cos_a: f64, dest: &mut Path) {
        let dx = (sin_a.atan2(cos_a) / 4.0).tan();
        dest.push(self.at(pt, nk.x - nk.y * dx, nk.y + nk.x * dx));
        dest.push(self.at(pt, nj.x + nj.y * dx, nj.y - nj.x * dx));
    }

    fn round(&self, pt: IntPoint, nk: Normal, nj: Normal, sin_a: f64, cos_a: f64, dest: &mut Path) {
        let a = sin_a.atan2(cos_a);
        let steps = round(self.steps_per_rad * a.abs()).max(1);
        let (mut x, mut y) = (nk.x, nk.y);
        for _ in 0..steps {
            dest.push(self.at(pt, x, y));
            let x2 = x;
            x = x * self.cos - self.sin * y;
            y = x2 * self.sin + y * self.cos;
        }
        dest.push(self.at(pt, nj.x, nj.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::area;

    fn square(size: CInt) -> Path {
        path_from(&[(0, 0), (size, 0), (size, size), (0, size)])
    }

    #[test]
    fn unit_normals_point_outward_for_positive_rings() {
        let n = unit_normal(IntPoint::new(0, 0), IntPoint::new(10, 0));
        assert_eq!((n.x, n.y), (0.0, -1.0));
        let zero = unit_normal(IntPoint::new(3, 3), IntPoint::new(3, 3));
        assert_eq!((zero.x, zero.y), (0.0, 0.0));
    }

    #[test]
    fn rejects_degenerate_paths() {
        let mut off = ClipperOffset::new();
        assert!(!off.add_path(&[], JoinType::Miter));
        assert!(!off.add_path(&path_from(&[(0, 0), (5, 5), (5, 5), (0, 0)]), JoinType::Miter));
        assert!(off.add_path(&square(10), JoinType::Miter));
    }

    #[test]
    fn lowest_vertex_tracks_bottom_left() {
        let mut off = ClipperOffset::new();
        off.add_path(&square(10), JoinType::Miter);
        assert_eq!(off.lowest, Some((0, 3)));
        off.add_path(&path_from(&[(20, 0), (30, 0), (25, 20)]), JoinType::Miter);
        assert_eq!(off.lowest, Some((1, 2)));
    }

    #[test]
    fn miter_grows_square() {
        let mut off = ClipperOffset::new();
        off.add_path(&square(10), JoinType::Miter);
        let out = off.execute(1.0).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(area(&out[0]), 144.0);
    }

    #[test]
    fn negative_delta_shrinks_square() {
        let mut off = ClipperOffset::new();
        off.add_path(&square(10), JoinType::Miter);
        let out = off.execute(-1.0).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(area(&out[0]).abs(), 64.0);
    }

    #[test]
    fn zero_delta_returns_input() {
        let mut off = ClipperOffset::new();
        off.add_path(&square(10), JoinType::Round);
        let out = off.execute(0.0).unwrap();
        assert_eq!(out, vec![square(10)]);
    }

    #[test]
    fn reversed_input_is_reoriented() {
        let mut off = ClipperOffset::new();
        let mut ring = square(10);
        ring.reverse();
        off.add_path(&ring, JoinType::Miter);
        let out = off.execute(1.0).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(area(&out[0]), 144.0);
    }
}
