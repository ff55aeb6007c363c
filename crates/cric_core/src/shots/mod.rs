//! Shot vocabulary and the reference catalog.

pub mod catalog;
pub mod types;

pub use catalog::{OrdinalRange, ShotCatalog, ShotDefinition, STANDARD_CATALOG_YAML};
pub use types::{Delivery, Length, Line, ShotName};
