//! Geometry kernel
//!
//! Pure 2D helpers used by the field segmenter and the coverage engine.
//! Coordinates are screen-style (x right, y down) but nothing here depends
//! on axis orientation.
//!
//! ## Edge rule
//! `point_in_polygon` uses the half-open `min < y <= max` crossing rule so a
//! ray passing exactly through a vertex is counted once. Horizontal edges
//! never toggle the parity flag.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShotMapError};

/// Guards the x-intercept division for near-horizontal edges.
pub const INTERCEPT_EPSILON: f64 = 1e-10;

/// A 2D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Closed polygon with at least three vertices.
///
/// The closing edge (last vertex back to the first) is implicit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(ShotMapError::DegeneratePolygon { vertices: vertices.len() });
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edges in traversal order, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Same polygon traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    /// Arithmetic mean of the vertices.
    pub fn centroid(&self) -> Point {
        let n = self.vertices.len() as f64;
        let (sx, sy) = self.vertices.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / n, sy / n)
    }
}

impl<'de> Deserialize<'de> for Polygon {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let vertices = Vec::<Point>::deserialize(deserializer)?;
        Polygon::new(vertices).map_err(serde::de::Error::custom)
    }
}

/// Linear interpolation between `p` and `q`. `t` is not clamped.
#[inline]
pub fn lerp(p: Point, q: Point, t: f64) -> Point {
    Point::new(p.x + (q.x - p.x) * t, p.y + (q.y - p.y) * t)
}

/// Ray-casting parity test (horizontal ray towards +x).
pub fn point_in_polygon(point: Point, polygon: &Polygon) -> bool {
    let Point { x, y } = point;
    let vertices = polygon.vertices();
    let n = vertices.len();

    let mut inside = false;
    let mut p1 = vertices[0];
    for i in 0..=n {
        let p2 = vertices[i % n];
        if y > p1.y.min(p2.y) && y <= p1.y.max(p2.y) && x <= p1.x.max(p2.x) {
            let mut x_intersect = p1.x;
            if p1.y != p2.y {
                x_intersect =
                    (y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y + INTERCEPT_EPSILON) + p1.x;
            }
            if p1.x == p2.x || x <= x_intersect {
                inside = !inside;
            }
        }
        p1 = p2;
    }
    inside
}

/// True if the finite segment `p1`-`p2` touches the circle.
///
/// Solves `a t² + b t + c = 0` for the parametrised segment and accepts any
/// root in `[0, 1]`. A zero-length segment degrades to a point-in-circle test.
pub fn line_intersects_circle(p1: Point, p2: Point, center: Point, radius: f64) -> bool {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let fx = p1.x - center.x;
    let fy = p1.y - center.y;

    let a = dx * dx + dy * dy;
    let b = 2.0 * (fx * dx + fy * dy);
    let c = fx * fx + fy * fy - radius * radius;

    if a == 0.0 {
        return fx * fx + fy * fy <= radius * radius;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return false;
    }
    let root = discriminant.sqrt();

    let t1 = (-b - root) / (2.0 * a);
    let t2 = (-b + root) / (2.0 * a);
    (0.0..=1.0).contains(&t1) || (0.0..=1.0).contains(&t2)
}

/// True if the circle overlaps the polygon.
///
/// Checked in order: centre inside the polygon, any edge crossing the
/// circle, any vertex within (or on) the circle.
pub fn circle_intersects_polygon(center: Point, radius: f64, polygon: &Polygon) -> bool {
    if point_in_polygon(center, polygon) {
        return true;
    }

    if polygon.edges().any(|(p1, p2)| line_intersects_circle(p1, p2, center, radius)) {
        return true;
    }

    let r2 = radius * radius;
    polygon.vertices().iter().any(|v| {
        let dx = v.x - center.x;
        let dy = v.y - center.y;
        dx * dx + dy * dy <= r2
    })
}

/// Parametric distance from the centre of an origin-centred ellipse to its
/// boundary along direction `(dx, dy)`.
///
/// For a unit direction this is the boundary radius at that angle.
#[inline]
pub fn ellipse_ray_distance(dx: f64, dy: f64, radius_x: f64, radius_y: f64) -> f64 {
    1.0 / ((dx * dx) / (radius_x * radius_x) + (dy * dy) / (radius_y * radius_y)).sqrt()
}
