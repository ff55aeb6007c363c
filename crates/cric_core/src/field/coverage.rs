//! Coverage engine
//!
//! Counts, per segment, how many fielders can reach it. A fielder's pickup
//! radius grows with distance from the batsman (deep fielders cover ground
//! by running and throwing), floored at [`MIN_PICKUP_RANGE`].

use tracing::debug;

use super::segment::{Segment, SegmentId};
use crate::error::{Result, ShotMapError};
use crate::geometry::{circle_intersects_polygon, Point};

pub const MIN_PICKUP_RANGE: f64 = 10.0;
pub const RANGE_DISTANCE_FACTOR: f64 = 0.25;

/// Cells straight of the wicket that always count as covered once.
///
/// Models the bowler / keeper line, which is never left open.
pub const KEEPER_BASELINE_SEGMENTS: [SegmentId; 3] =
    [SegmentId::new(4, 0), SegmentId::new(4, 1), SegmentId::new(4, 2)];

#[derive(Debug, Clone, PartialEq)]
pub struct CoverageEngine {
    batsman: Point,
    base_range: f64,
    keeper_baseline: bool,
}

impl CoverageEngine {
    pub fn new(batsman: Point, base_range: f64) -> Result<Self> {
        if !batsman.is_finite() {
            return Err(ShotMapError::NonFiniteCoordinate("batsman position"));
        }
        if !base_range.is_finite() || base_range < 0.0 {
            return Err(ShotMapError::InvalidFielderRange(base_range));
        }
        Ok(Self { batsman, base_range, keeper_baseline: true })
    }

    pub fn with_keeper_baseline(mut self, enabled: bool) -> Self {
        self.keeper_baseline = enabled;
        self
    }

    pub fn base_range(&self) -> f64 {
        self.base_range
    }

    /// Effective pickup radius: `max(10, base + floor(distance * 0.25))`.
    pub fn pickup_radius(&self, fielder: Point) -> f64 {
        let distance = fielder.distance_to(self.batsman);
        (self.base_range + (distance * RANGE_DISTANCE_FACTOR).floor()).max(MIN_PICKUP_RANGE)
    }

    /// Fresh copy of `segments` with coverage recomputed from scratch.
    ///
    /// Input coverage values are ignored, so the result depends only on the
    /// polygons and fielder positions.
    pub fn compute(&self, segments: &[Segment], fielders: &[Point]) -> Vec<Segment> {
        let mut counts = vec![0u32; segments.len()];

        if self.keeper_baseline {
            for (count, seg) in counts.iter_mut().zip(segments) {
                if KEEPER_BASELINE_SEGMENTS.contains(&seg.id()) {
                    *count = 1;
                }
            }
        }

        for &fielder in fielders {
            let radius = self.pickup_radius(fielder);
            for (count, seg) in counts.iter_mut().zip(segments) {
                if circle_intersects_polygon(fielder, radius, seg.polygon()) {
                    *count += 1;
                }
            }
        }

        let covered = counts.iter().filter(|&&c| c > 0).count();
        debug!(fielders = fielders.len(), covered, total = segments.len(), "coverage recomputed");

        segments.iter().zip(counts).map(|(seg, count)| seg.with_coverage(count)).collect()
    }
}
