use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShotMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Degenerate polygon: {vertices} vertices (need at least 3)")]
    DegeneratePolygon { vertices: usize },

    #[error("Invalid ellipse radii: rx={radius_x}, ry={radius_y}")]
    InvalidRadius { radius_x: f64, radius_y: f64 },

    #[error("Invalid grid size: {wedges} wedges x {zones} zones (need wedges >= 3, zones >= 1, at most {max} cells)", max = crate::field::MAX_GRID_CELLS)]
    InvalidGridSize { wedges: usize, zones: usize },

    #[error("Invalid fielder range: {0}")]
    InvalidFielderRange(f64),

    #[error("Non-finite coordinate in {0}")]
    NonFiniteCoordinate(&'static str),

    #[error("Unknown aggression level: {0}")]
    UnknownAggression(String),

    #[error("Unknown shot name: {0}")]
    UnknownShot(String),

    #[error("Invalid shot catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid skill rating for {shot}: {rating} (must be 0-100)")]
    InvalidSkill { shot: String, rating: u32 },

    #[error("Fielder index {index} out of range ({count} fielders)")]
    FielderOutOfRange { index: usize, count: usize },

    #[error("Malformed segment id: {0}")]
    InvalidSegmentId(String),

    #[error("Unsupported config format: {path}")]
    UnsupportedFormat { path: String },
}

impl ShotMapError {
    /// True for errors caused by bad session input rather than I/O.
    pub fn is_config_error(&self) -> bool {
        match self {
            ShotMapError::Io(_) => false,
            ShotMapError::Json(_) | ShotMapError::Yaml(_) => true,
            ShotMapError::FielderOutOfRange { .. } => false,
            ShotMapError::InvalidSegmentId(_) => false,
            _ => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShotMapError>;
