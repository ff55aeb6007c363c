use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ShotMapError;
use crate::geometry::Polygon;

/// Wedge × zone coordinate of a field cell, rendered as `W{wedge}Z{zone}`.
///
/// Ordering is wedge-major, so sorted ids walk the field spoke by spoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId {
    pub wedge: usize,
    pub zone: usize,
}

impl SegmentId {
    pub const fn new(wedge: usize, zone: usize) -> Self {
        Self { wedge, zone }
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{}Z{}", self.wedge, self.zone)
    }
}

impl FromStr for SegmentId {
    type Err = ShotMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ShotMapError::InvalidSegmentId(s.to_string());

        let rest = s.strip_prefix('W').ok_or_else(malformed)?;
        let (wedge, zone) = rest.split_once('Z').ok_or_else(malformed)?;
        let wedge = wedge.parse::<usize>().map_err(|_| malformed())?;
        let zone = zone.parse::<usize>().map_err(|_| malformed())?;
        Ok(Self { wedge, zone })
    }
}

impl Serialize for SegmentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SegmentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One wedge-zone cell of the field.
///
/// The polygon is fixed once segmented; `coverage` is re-derived by the
/// coverage engine whenever fielders move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    id: SegmentId,
    polygon: Polygon,
    coverage: u32,
}

impl Segment {
    pub fn new(id: SegmentId, polygon: Polygon) -> Self {
        Self { id, polygon, coverage: 0 }
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn coverage(&self) -> u32 {
        self.coverage
    }

    /// Copy of this segment carrying a different coverage count.
    pub fn with_coverage(&self, coverage: u32) -> Self {
        Self { id: self.id, polygon: self.polygon.clone(), coverage }
    }

    /// Share of fielders covering this cell, clamped to 1.0.
    ///
    /// Used by renderers for overlay opacity.
    pub fn coverage_intensity(&self, fielder_count: usize) -> f64 {
        if fielder_count == 0 {
            return 0.0;
        }
        (self.coverage as f64 / fielder_count as f64).min(1.0)
    }
}
