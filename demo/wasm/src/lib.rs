// Copyright 2025 Lars Brubaker
// WASM bindings for nest-clipper

use nest_clipper::{
    area, scale_path_down, scale_path_up, ClipOption, ClipType, Clipper, ClipperOffset, JoinType,
    Path, Paths, PolyFillType, PolyType, CLIPPER_SCALE,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

/// Flat [x0,y0, x1,y1, ...] float coordinates to a scaled integer path.
fn path_from_flat(coords: &[f64]) -> Path {
    let pairs: Vec<(f64, f64)> = coords.chunks_exact(2).map(|c| (c[0], c[1])).collect();
    scale_path_up(&pairs, CLIPPER_SCALE)
}

/// Paths to one flat coordinate array plus a parallel array of ring
/// lengths (in points).
fn flatten(paths: &Paths) -> (Vec<f64>, Vec<u32>) {
    let mut coords = Vec::new();
    let mut lengths = Vec::with_capacity(paths.len());
    for path in paths {
        lengths.push(path.len() as u32);
        for (x, y) in scale_path_down(path, CLIPPER_SCALE) {
            coords.push(x);
            coords.push(y);
        }
    }
    (coords, lengths)
}

fn fill_type(fill: u32) -> PolyFillType {
    match fill {
        0 => PolyFillType::EvenOdd,
        1 => PolyFillType::NonZero,
        2 => PolyFillType::Positive,
        3 => PolyFillType::Negative,
        _ => PolyFillType::NonZero,
    }
}

fn clip_type(op: u32) -> ClipType {
    match op {
        0 => ClipType::Intersection,
        1 => ClipType::Union,
        2 => ClipType::Difference,
        _ => ClipType::Xor,
    }
}

fn join_type(join: u32) -> JoinType {
    match join {
        0 => JoinType::Square,
        1 => JoinType::Round,
        _ => JoinType::Miter,
    }
}

/// A clipper that accumulates subject and clip rings, then runs one boolean
/// operation. Coordinates are floats; they are scaled by `CLIPPER_SCALE`
/// internally.
#[wasm_bindgen]
pub struct ClipperJs {
    inner: Clipper,
    coords: Vec<f64>,
    lengths: Vec<u32>,
}

#[wasm_bindgen]
impl ClipperJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ClipperJs {
        ClipperJs {
            inner: Clipper::new(),
            coords: Vec::new(),
            lengths: Vec::new(),
        }
    }

    /// Add a subject ring from a flat [x0,y0, x1,y1, ...] Float64Array.
    pub fn add_subject(&mut self, coords: &[f64]) -> bool {
        self.inner.add_path(&path_from_flat(coords), PolyType::Subject).is_ok()
    }

    pub fn add_clip(&mut self, coords: &[f64]) -> bool {
        self.inner.add_path(&path_from_flat(coords), PolyType::Clip).is_ok()
    }

    /// Set an option (0 = ReverseSolution, 1 = StrictlySimple, 2 = PreserveCollinear).
    pub fn set_option(&mut self, option: u32, value: bool) {
        let opt = match option {
            0 => ClipOption::ReverseSolution,
            1 => ClipOption::StrictlySimple,
            2 => ClipOption::PreserveCollinear,
            _ => return,
        };
        self.inner.set_option(opt, value);
    }

    /// Run and return true on success.
    /// op: 0=Intersection 1=Union 2=Difference 3=Xor
    /// fill: 0=EvenOdd 1=NonZero 2=Positive 3=Negative
    pub fn execute(&mut self, op: u32, fill: u32) -> bool {
        let mut solution = Paths::new();
        match self.inner.execute(clip_type(op), &mut solution, fill_type(fill)) {
            Ok(()) => {
                (self.coords, self.lengths) = flatten(&solution);
                true
            }
            Err(_) => false,
        }
    }

    pub fn ring_count(&self) -> u32 {
        self.lengths.len() as u32
    }

    /// Point count of each result ring, in order.
    pub fn get_ring_lengths(&self) -> Vec<u32> {
        self.lengths.clone()
    }

    /// Flat [x0,y0, x1,y1, ...] coordinates of every result ring, concatenated.
    pub fn get_coords(&self) -> Vec<f64> {
        self.coords.clone()
    }
}

impl Default for ClipperJs {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience: offset one closed ring by `delta` (in float units).
/// Returns the concatenated flat coordinates of the result rings.
/// join: 0=Square 1=Round 2=Miter
#[wasm_bindgen]
pub fn offset_polygon(coords: &[f64], delta: f64, join: u32) -> Vec<f64> {
    let mut off = ClipperOffset::new();
    if !off.add_path(&path_from_flat(coords), join_type(join)) {
        return Vec::new();
    }
    match off.execute(delta * CLIPPER_SCALE) {
        Ok(paths) => flatten(&paths).0,
        Err(_) => Vec::new(),
    }
}

/// Convenience: net area of one boolean operation between two rings,
/// in float units. Holes count negative.
#[wasm_bindgen]
pub fn clip_area(subject: &[f64], clip: &[f64], op: u32) -> f64 {
    let mut c = Clipper::new();
    // A rejected ring simply contributes nothing.
    let _ = c.add_path(&path_from_flat(subject), PolyType::Subject);
    let _ = c.add_path(&path_from_flat(clip), PolyType::Clip);
    let mut solution = Paths::new();
    if c.execute(clip_type(op), &mut solution, PolyFillType::NonZero).is_err() {
        return 0.0;
    }
    let total: f64 = solution.iter().map(|p| area(p)).sum();
    total / (CLIPPER_SCALE * CLIPPER_SCALE)
}
