//! Field model: segmentation of the playing area and fielder coverage.
//!
//! Segmentation depends only on [`FieldGeometry`] and is rebuilt when that
//! changes. Coverage depends on fielder positions and is recomputed into a
//! fresh segment list on every fielder move.

pub mod coverage;
pub mod segment;
pub mod segmenter;

pub use coverage::{CoverageEngine, KEEPER_BASELINE_SEGMENTS, MIN_PICKUP_RANGE};
pub use segment::{Segment, SegmentId};
pub use segmenter::{FieldGeometry, FieldGrid, FieldSegmenter, Spoke, MAX_GRID_CELLS};
