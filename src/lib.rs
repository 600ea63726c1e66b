// nest-clipper: polygon clipping and offsetting on integer coordinates
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod active;
pub mod clipper;
pub mod config;
pub mod edge;
pub mod error;
pub mod join;
pub mod minima;
pub mod offset;
pub mod outrec;
pub mod point;
pub mod polygon;
pub mod scanbeam;

pub use clipper::{ClipType, Clipper, PolyFillType, PolyType, SolutionRing};
pub use config::{ClipOption, ClipperConfig, OffsetConfig, CLIPPER_SCALE};
pub use error::{ClipError, ClipResult, InvariantError};
pub use offset::{ClipperOffset, JoinType};
pub use point::{path_from, CInt, IntPoint, Path, Paths};
pub use polygon::{
    area, clean_polygon, clean_polygons, orientation, point_in_polygon, reverse_path,
    reverse_paths, scale_path_down, scale_path_up, simplify_polygon, simplify_polygons,
    PointLocation,
};
