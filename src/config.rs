// Copyright 2025 Lars Brubaker
// License: MIT
//
// Engine constants and the option structs callers hand to `Clipper` and
// `ClipperOffset`. With the `serde` feature the option structs round-trip
// through JSON so a worker can receive them alongside its polygons.

use crate::point::CInt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coordinates up to this magnitude keep slope tests in plain `i64` products.
pub const LOW_RANGE: CInt = 0x3FFF_FFFF;
/// Largest magnitude the engine accepts without logging a range warning.
pub const HIGH_RANGE: CInt = 0x3FFF_FFFF_FFFF_FFFF;

/// Sentinel `dx` for horizontal edges.
pub const HORIZONTAL: f64 = -1.0e40;

/// Per-axis tolerance used when merging ingested vertices. Zero keeps merging exact.
pub const VERTEX_TOLERANCE: CInt = 0;

pub const DEFAULT_MITER_LIMIT: f64 = 2.0;
pub const DEFAULT_ARC_TOLERANCE: f64 = 0.25;

/// Scale the nesting layer applies when converting float paths to integers.
pub const CLIPPER_SCALE: f64 = 10_000_000.0;

/// Boolean switches on a `Clipper`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClipOption {
    /// Outer rings come out with negative orientation and holes positive.
    ReverseSolution,
    /// Split rings at touching vertices so every output ring is simple.
    StrictlySimple,
    /// Keep collinear vertices on ring edges (spikes are still removed).
    PreserveCollinear,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClipperConfig {
    pub reverse_solution: bool,
    pub strictly_simple: bool,
    pub preserve_collinear: bool,
}

impl ClipperConfig {
    pub fn set(&mut self, option: ClipOption, value: bool) {
        match option {
            ClipOption::ReverseSolution => self.reverse_solution = value,
            ClipOption::StrictlySimple => self.strictly_simple = value,
            ClipOption::PreserveCollinear => self.preserve_collinear = value,
        }
    }

    pub fn get(&self, option: ClipOption) -> bool {
        match option {
            ClipOption::ReverseSolution => self.reverse_solution,
            ClipOption::StrictlySimple => self.strictly_simple,
            ClipOption::PreserveCollinear => self.preserve_collinear,
        }
    }
}

/// Offsetting parameters.
///
/// `miter_limit` is a multiple of the offset distance: a miter corner whose
/// tip would lie further out than that is squared off instead. `arc_tolerance`
/// is the largest distance a round corner's chords may stray from the true arc.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OffsetConfig {
    pub miter_limit: f64,
    pub arc_tolerance: f64,
}

impl Default for OffsetConfig {
    fn default() -> Self {
        OffsetConfig {
            miter_limit: DEFAULT_MITER_LIMIT,
            arc_tolerance: DEFAULT_ARC_TOLERANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_toggle_individually() {
        let mut cfg = ClipperConfig::default();
        cfg.set(ClipOption::StrictlySimple, true);
        assert!(cfg.get(ClipOption::StrictlySimple));
        assert!(!cfg.get(ClipOption::ReverseSolution));
        assert!(!cfg.get(ClipOption::PreserveCollinear));
        cfg.set(ClipOption::StrictlySimple, false);
        assert_eq!(cfg, ClipperConfig::default());
    }

    #[test]
    fn offset_defaults() {
        let cfg = OffsetConfig::default();
        assert_eq!(cfg.miter_limit, 2.0);
        assert_eq!(cfg.arc_tolerance, 0.25);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_round_trips_through_json() {
        let cfg = ClipperConfig {
            reverse_solution: true,
            strictly_simple: false,
            preserve_collinear: true,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ClipperConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);

        let partial: OffsetConfig = serde_json::from_str(r#"{"miter_limit": 4.0}"#).unwrap();
        assert_eq!(partial.miter_limit, 4.0);
        assert_eq!(partial.arc_tolerance, DEFAULT_ARC_TOLERANCE);
    }
}
