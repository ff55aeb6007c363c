//! Field segmenter
//!
//! Splits the playing area into `wedges` angular slices radiating from the
//! batsman, each cut into `zones` radial bands. Spokes run from the batsman
//! to the boundary ellipse; cell corners are interpolated along neighbouring
//! spokes, so zone bands follow the boundary shape rather than fixed radii.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::segment::{Segment, SegmentId};
use crate::error::{Result, ShotMapError};
use crate::geometry::{ellipse_ray_distance, lerp, Point, Polygon};

/// Upper bound on `wedges * zones`; larger grids are rejected at validation.
pub const MAX_GRID_CELLS: usize = 10_000;

/// Geometry parameters that define the segment grid.
///
/// Changing any of these requires re-segmentation; moving fielders does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldGeometry {
    /// Strike position; origin of every spoke.
    pub batsman: Point,
    /// Centre of the boundary ellipse.
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    pub wedges: usize,
    pub zones: usize,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            batsman: Point::new(700.0, 360.0),
            center: Point::new(700.0, 400.0),
            radius_x: 240.0,
            radius_y: 240.0,
            wedges: 18,
            zones: 7,
        }
    }
}

impl FieldGeometry {
    pub fn validate(&self) -> Result<()> {
        if !self.batsman.is_finite() {
            return Err(ShotMapError::NonFiniteCoordinate("batsman position"));
        }
        if !self.center.is_finite() {
            return Err(ShotMapError::NonFiniteCoordinate("ellipse center"));
        }
        let radius_ok = |r: f64| r.is_finite() && r > 0.0;
        if !radius_ok(self.radius_x) || !radius_ok(self.radius_y) {
            return Err(ShotMapError::InvalidRadius {
                radius_x: self.radius_x,
                radius_y: self.radius_y,
            });
        }
        let cells = self.wedges.checked_mul(self.zones).filter(|&n| n <= MAX_GRID_CELLS);
        if self.wedges < 3 || self.zones < 1 || cells.is_none() {
            return Err(ShotMapError::InvalidGridSize { wedges: self.wedges, zones: self.zones });
        }
        Ok(())
    }

    /// Angular width of one wedge in degrees.
    pub fn wedge_angle_deg(&self) -> f64 {
        360.0 / self.wedges as f64
    }
}

/// A radial boundary line from the batsman to the field edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spoke {
    pub start: Point,
    pub end: Point,
}

impl Spoke {
    #[inline]
    pub fn at(&self, t: f64) -> Point {
        lerp(self.start, self.end, t)
    }
}

/// Output of segmentation: the spokes and `wedges * zones` cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldGrid {
    geometry: FieldGeometry,
    spokes: Vec<Spoke>,
    segments: Vec<Segment>,
}

impl FieldGrid {
    pub fn geometry(&self) -> &FieldGeometry {
        &self.geometry
    }

    pub fn spokes(&self) -> &[Spoke] {
        &self.spokes
    }

    /// Segments in wedge-major order, all with zero coverage.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.index_of(id).map(|i| &self.segments[i])
    }

    /// Position of `id` in `segments()`, if it lies on this grid.
    pub fn index_of(&self, id: SegmentId) -> Option<usize> {
        if id.wedge < self.geometry.wedges && id.zone < self.geometry.zones {
            Some(id.wedge * self.geometry.zones + id.zone)
        } else {
            None
        }
    }
}

pub struct FieldSegmenter;

impl FieldSegmenter {
    /// Boundary spokes at equally spaced angles, starting at 0° (+x axis).
    pub fn spokes(geometry: &FieldGeometry) -> Vec<Spoke> {
        (0..geometry.wedges)
            .map(|i| {
                let rad = (i as f64 * geometry.wedge_angle_deg()).to_radians();
                let (dx, dy) = (rad.cos(), rad.sin());
                let t = ellipse_ray_distance(dx, dy, geometry.radius_x, geometry.radius_y);
                let end = Point::new(geometry.center.x + dx * t, geometry.center.y + dy * t);
                Spoke { start: geometry.batsman, end }
            })
            .collect()
    }

    /// Builds the segment grid. Rejects invalid geometry before any work.
    pub fn segment(geometry: &FieldGeometry) -> Result<FieldGrid> {
        geometry.validate()?;

        let spokes = Self::spokes(geometry);
        let wedges = geometry.wedges;
        let zones = geometry.zones;

        let mut segments = Vec::with_capacity(wedges * zones);
        for i in 0..wedges {
            let start_ray = spokes[i];
            let end_ray = spokes[(i + 1) % wedges];

            for z in 0..zones {
                let t0 = z as f64 / zones as f64;
                let t1 = (z + 1) as f64 / zones as f64;

                // inner-near, outer-near, outer-far, inner-far
                let polygon = Polygon::new(vec![
                    start_ray.at(t0),
                    start_ray.at(t1),
                    end_ray.at(t1),
                    end_ray.at(t0),
                ])?;
                segments.push(Segment::new(SegmentId::new(i, z), polygon));
            }
        }

        debug!(wedges, zones, segments = segments.len(), "field segmented");
        Ok(FieldGrid { geometry: geometry.clone(), spokes, segments })
    }
}
