// Copyright 2025 Lars Brubaker
// License: MIT
//
// The clipping engine: owns the edge table, both queues, the output rings
// and the join queue, and drives the sweep from the lowest scanline (largest
// y) to the highest.
//
// The sweep itself is split across submodules that all extend `Clipper`:
//   winding.rs    - winding counts and the contribution test
//   intersect.rs  - per-band crossing list and `intersect_edges`
//   horizontal.rs - horizontal edge processing
//   output.rs     - output points, local minima/maxima and band tops

mod horizontal;
mod intersect;
mod output;
mod winding;


use crate::config::{ClipOption, ClipperConfig};
use crate::edge::{EdgeSide, EdgeTable, INVALID};
use crate::error::{ClipError, ClipResult};
use crate::join::{do_simple_polygons, JoinQueue};
use crate::minima::LocalMinimaQueue;
use crate::outrec::OutRings;
use crate::point::{CInt, IntPoint, Path, Paths};
use crate::scanbeam::ScanbeamQueue;

pub use crate::edge::PolyType;

use intersect::IntersectNode;

// ─────────────────────────────── Public types ──────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClipType {
    Intersection,
    Union,
    Difference,
    Xor,
}

/// Which regions of a polygon set count as filled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PolyFillType {
    EvenOdd,
    NonZero,
    Positive,
    Negative,
}

/// One output ring with its nesting information.
#[derive(Clone, Debug, PartialEq)]
pub struct SolutionRing {
    pub path: Path,
    pub is_hole: bool,
    /// Index of the containing ring within the same result, if any.
    pub first_left: Option<usize>,
}

// ─────────────────────────────── Clipper ───────────────────────────────────────

pub struct Clipper {
    edges: EdgeTable,
    minima: LocalMinimaQueue,
    scanbeam: ScanbeamQueue,
    rings: OutRings,
    joins: JoinQueue,
    intersections: Vec<IntersectNode>,
    /// X positions of maxima at the current band top (strictly simple only).
    maxima: Vec<CInt>,

    clip_type: ClipType,
    subj_fill: PolyFillType,
    clip_fill: PolyFillType,
    config: ClipperConfig,
    use_full_range: bool,
    execute_locked: bool,
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipper {
    pub fn new() -> Self {
        Self::with_config(ClipperConfig::default())
    }

    pub fn with_config(config: ClipperConfig) -> Self {
        Clipper {
            edges: EdgeTable::new(),
            minima: LocalMinimaQueue::new(),
            scanbeam: ScanbeamQueue::new(),
            rings: OutRings::new(),
            joins: JoinQueue::new(),
            intersections: Vec::new(),
            maxima: Vec::new(),
            clip_type: ClipType::Union,
            subj_fill: PolyFillType::EvenOdd,
            clip_fill: PolyFillType::EvenOdd,
            config,
            use_full_range: false,
            execute_locked: false,
        }
    }

    pub fn set_option(&mut self, option: ClipOption, value: bool) {
        self.config.set(option, value);
    }

    pub fn get_option(&self, option: ClipOption) -> bool {
        self.config.get(option)
    }

    pub fn config(&self) -> &ClipperConfig {
        &self.config
    }

    /// Ingest one closed ring.
    pub fn add_path(&mut self, path: &[IntPoint], poly_type: PolyType) -> ClipResult<()> {
        let result = self.edges.add_ring(
            path,
            poly_type,
            self.config.preserve_collinear,
            &mut self.use_full_range,
            &mut self.minima,
        );
        if let Err(err) = &result {
            tracing::debug!(points = path.len(), ?poly_type, %err, "path rejected");
        }
        result
    }

    /// Ingest several rings. Returns true if at least one was accepted.
    pub fn add_paths(&mut self, paths: &[Path], poly_type: PolyType) -> bool {
        let mut any = false;
        for path in paths {
            if self.add_path(path, poly_type).is_ok() {
                any = true;
            }
        }
        any
    }

    /// Run `clip_type` with one fill rule for both polygon types and append
    /// the result rings to `solution`.
    pub fn execute(
        &mut self,
        clip_type: ClipType,
        solution: &mut Paths,
        fill: PolyFillType,
    ) -> ClipResult<()> {
        self.execute_with_fill_types(clip_type, solution, fill, fill)
    }

    pub fn execute_with_fill_types(
        &mut self,
        clip_type: ClipType,
        solution: &mut Paths,
        subj_fill: PolyFillType,
        clip_fill: PolyFillType,
    ) -> ClipResult<()> {
        self.run(clip_type, subj_fill, clip_fill, |clipper| {
            solution.extend(clipper.result_paths());
        })
    }

    /// As `execute_with_fill_types`, but also report hole state and nesting.
    pub fn execute_rings(
        &mut self,
        clip_type: ClipType,
        subj_fill: PolyFillType,
        clip_fill: PolyFillType,
    ) -> ClipResult<Vec<SolutionRing>> {
        let mut rings = Vec::new();
        self.run(clip_type, subj_fill, clip_fill, |clipper| {
            rings = clipper.result_rings();
        })?;
        Ok(rings)
    }

    /// Drop every ingested path and all intermediate state.
    pub fn dispose(&mut self) {
        self.edges.clear();
        self.minima.clear();
        self.scanbeam.clear();
        self.rings.clear();
        self.joins.clear();
        self.intersections.clear();
        self.maxima.clear();
        self.use_full_range = false;
    }

    fn run<F>(
        &mut self,
        clip_type: ClipType,
        subj_fill: PolyFillType,
        clip_fill: PolyFillType,
        export: F,
    ) -> ClipResult<()>
    where
        F: FnOnce(&Clipper),
    {
        if self.execute_locked {
            return Err(ClipError::Reentrant);
        }
        self.execute_locked = true;
        self.clip_type = clip_type;
        self.subj_fill = subj_fill;
        self.clip_fill = clip_fill;

        let result = self.execute_internal();
        match &result {
            Ok(()) => {
                export(self);
                tracing::debug!(?clip_type, rings = self.rings.recs.len(), "clipping run finished");
            }
            Err(ClipError::Invariant(err)) => {
                tracing::error!(?clip_type, %err, "clipping run aborted");
            }
            Err(err) => {
                tracing::debug!(?clip_type, %err, "clipping run failed");
            }
        }

        self.dispose();
        self.execute_locked = false;
        result
    }

    /// Seed the scanbeam with every minimum and reset the bound heads.
    fn reset(&mut self) {
        self.scanbeam.clear();
        self.edges.active = INVALID;
        self.edges.sorted = INVALID;
        for lm in self.minima.pending() {
            self.scanbeam.insert(lm.y);
            for (e, side) in [(lm.left_bound, EdgeSide::Left), (lm.right_bound, EdgeSide::Right)] {
                let edge = &mut self.edges.edges[e as usize];
                edge.curr = edge.bot;
                edge.side = side;
                edge.out_idx = INVALID;
            }
        }
    }

    fn execute_internal(&mut self) -> ClipResult<()> {
        self.reset();
        self.maxima.clear();
        if self.scanbeam.is_empty() {
            return Ok(());
        }

        let mut bot_y = self.scanbeam.pop()?;
        loop {
            self.insert_local_minima_into_ael(bot_y);
            // Horizontals may queue new scanlines, so pop only after them.
            self.process_horizontals()?;
            self.joins.clear_ghosts();
            if self.scanbeam.is_empty() {
                break;
            }
            let top_y = self.scanbeam.pop()?;
            tracing::trace!(bot_y, top_y, "scanbeam");
            self.process_intersections(top_y)?;
            self.process_edges_at_top_of_scanbeam(top_y)?;
            bot_y = top_y;
            if self.scanbeam.is_empty() && self.minima.is_empty() {
                break;
            }
        }

        let reverse = self.config.reverse_solution;
        for r in 0..self.rings.recs.len() as u32 {
            let (pts, is_hole) = (self.rings.rec(r).pts, self.rings.rec(r).is_hole);
            if pts == INVALID {
                continue;
            }
            if (is_hole ^ reverse) == (self.rings.rec_area(r) > 0.0) {
                self.rings.reverse_links(pts);
            }
        }

        self.joins
            .join_common_edges(&mut self.rings, reverse, self.use_full_range);

        let preserve = self.config.preserve_collinear || self.config.strictly_simple;
        for r in 0..self.rings.recs.len() as u32 {
            if self.rings.rec(r).pts != INVALID {
                self.rings.fixup_out_polygon(r, preserve, self.use_full_range);
            }
        }

        if self.config.strictly_simple {
            do_simple_polygons(&mut self.rings);
        }
        Ok(())
    }

    fn is_exported(&self, r: u32) -> bool {
        let pts = self.rings.rec(r).pts;
        pts != INVALID && self.rings.point_count(pts) >= 3
    }

    fn result_paths(&self) -> Paths {
        (0..self.rings.recs.len() as u32)
            .filter(|&r| self.is_exported(r))
            .map(|r| self.rings.ring_path(r))
            .collect()
    }

    fn result_rings(&self) -> Vec<SolutionRing> {
        let count = self.rings.recs.len();
        let mut slot = vec![None; count];
        let mut next = 0usize;
        for r in 0..count as u32 {
            if self.is_exported(r) {
                slot[r as usize] = Some(next);
                next += 1;
            }
        }

        let mut out = Vec::with_capacity(next);
        for r in 0..count as u32 {
            if slot[r as usize].is_none() {
                continue;
            }
            // Walk past containers that were merged away or discarded.
            let mut fl = self.rings.rec(r).first_left;
            let mut hops = 0;
            while fl != INVALID && slot[fl as usize].is_none() && hops < count {
                fl = self.rings.rec(fl).first_left;
                hops += 1;
            }
            let first_left = if fl == INVALID { None } else { slot[fl as usize] };
            out.push(SolutionRing {
                path: self.rings.ring_path(r),
                is_hole: self.rings.rec(r).is_hole,
                first_left,
            });
        }
        out
    }
}
