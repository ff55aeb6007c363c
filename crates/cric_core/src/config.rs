//! # Field configuration
//!
//! One record holding everything that shapes a session: the field geometry,
//! the base fielder pickup range, the weak-area threshold and the starting
//! fielder layout.
//!
//! ## Usage
//! ```rust
//! use cric_core::config::FieldConfig;
//!
//! let config = FieldConfig::default();
//! let compact = FieldConfig::compact();
//! assert_eq!(config.geometry.wedges, compact.geometry.wedges);
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShotMapError};
use crate::field::{CoverageEngine, FieldGeometry};
use crate::geometry::Point;

/// Base fielder pickup range before the distance bonus.
pub const DEFAULT_FIELDER_RANGE: f64 = 10.0;

/// Reads a YAML or JSON document, chosen by file extension.
pub(crate) fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("yaml" | "yml") => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&text)?)
        }
        Some("json") => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        _ => Err(ShotMapError::UnsupportedFormat { path: path.display().to_string() }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub geometry: FieldGeometry,
    /// Base pickup range; each fielder adds a quarter of their distance from the batsman.
    pub fielder_range: f64,
    /// Always count the straight-of-the-wicket cells W4Z0..W4Z2 as covered once.
    pub keeper_baseline: bool,
    /// Coverage at or below which a segment earns the weak-area bonus.
    pub weak_area_threshold: u32,
    pub fielders: Vec<Point>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            geometry: FieldGeometry::default(),
            fielder_range: DEFAULT_FIELDER_RANGE,
            keeper_baseline: true,
            weak_area_threshold: 0,
            fielders: vec![
                Point::new(700.0, 300.0), // wicket keeper
                Point::new(630.0, 500.0), // mid off
                Point::new(650.0, 410.0), // short cover
                Point::new(500.0, 300.0), // deep point
                Point::new(685.0, 290.0), // first slip
                Point::new(670.0, 292.0), // second slip
                Point::new(655.0, 298.0), // third slip
                Point::new(790.0, 425.0), // midwicket
                Point::new(850.0, 225.0), // fine leg
                Point::new(750.0, 625.0), // long on
            ],
        }
    }
}

impl FieldConfig {
    /// Full-size layout (the default).
    pub fn standard() -> Self {
        Self::default()
    }

    /// Smaller-canvas layout: same field shifted up and left.
    pub fn compact() -> Self {
        let mut cfg = Self::default();
        let shift = |p: Point| Point::new(p.x - 300.0, p.y - 100.0);
        cfg.geometry.batsman = shift(cfg.geometry.batsman);
        cfg.geometry.center = shift(cfg.geometry.center);
        cfg.fielders = cfg.fielders.into_iter().map(shift).collect();
        cfg
    }

    /// Empty field, for isolating shot values from coverage.
    pub fn without_fielders() -> Self {
        Self { fielders: Vec::new(), ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        self.coverage_engine()?;
        if self.fielders.iter().any(|p| !p.is_finite()) {
            return Err(ShotMapError::NonFiniteCoordinate("fielder position"));
        }
        Ok(())
    }

    pub fn coverage_engine(&self) -> Result<CoverageEngine> {
        Ok(CoverageEngine::new(self.geometry.batsman, self.fielder_range)?
            .with_keeper_baseline(self.keeper_baseline))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads and validates a config file (`.yaml`, `.yml` or `.json`).
    pub fn load(path: &Path) -> Result<Self> {
        let cfg: Self = load_document(path)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
