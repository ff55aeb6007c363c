//! # cric_core - Cricket Shot Placement Engine
//!
//! Splits an oval cricket field into wedge × zone segments, measures how
//! well a fielding layout covers each one, and scores where a batsman is
//! likely to hit a given delivery.
//!
//! ## Features
//! - Elliptical field segmentation radiating from the batsman
//! - Distance-scaled fielder coverage
//! - Catalog-driven shot selection with weak-area and aggression weighting
//! - Normalized per-segment and per-zone probability distributions
//!
//! ## Usage
//! ```rust
//! use cric_core::{Aggression, Delivery, FieldSession};
//!
//! let mut session = FieldSession::with_defaults()?;
//! session.set_aggression(Aggression::Attacking);
//! let analysis = session.commit_delivery(Delivery::new(4, 4));
//! for (zone, p) in analysis.zones.ranked() {
//!     println!("zone {zone}: {:.1}%", p * 100.0);
//! }
//! # Ok::<(), cric_core::ShotMapError>(())
//! ```

// Probability comparisons against exact multiples are intentional
#![allow(clippy::float_cmp)]

pub mod analysis;
pub mod batsman;
pub mod config;
pub mod error;
pub mod field;
pub mod geometry;
pub mod session;
pub mod shots;

pub use analysis::{
    OutcomeId, ProbabilityDistribution, Sentinel, ShotAnalysis, ShotAnalyzer, ZoneDistribution,
};
pub use batsman::{Aggression, BatsmanProfile};
pub use config::FieldConfig;
pub use error::{Result, ShotMapError};
pub use field::{CoverageEngine, FieldGeometry, FieldGrid, FieldSegmenter, Segment, SegmentId};
pub use geometry::{Point, Polygon};
pub use session::FieldSession;
pub use shots::{Delivery, ShotCatalog, ShotName};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
