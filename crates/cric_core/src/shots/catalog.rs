//! Shot catalog
//!
//! Static reference data: which shots can be played to which deliveries and
//! where on the field they go. The canonical catalog is embedded at compile
//! time and parsed once; custom catalogs load through the same validation.
//!
//! ## Usage
//!
//! ```rust
//! use cric_core::shots::{Delivery, ShotCatalog};
//!
//! let catalog = ShotCatalog::standard();
//! let candidates = catalog.candidates(Delivery::new(4, 4));
//! assert!(!candidates.is_empty());
//! ```

use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::types::{Delivery, ShotName};
use crate::config::load_document;
use crate::error::{Result, ShotMapError};
use crate::field::SegmentId;

/// Canonical catalog YAML (compile-time embedded).
pub const STANDARD_CATALOG_YAML: &str = include_str!("../../data/shot_catalog.yaml");

static STANDARD_CATALOG: OnceLock<ShotCatalog> = OnceLock::new();

/// Inclusive `[min, max]` range over an ordinal domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 2]", into = "[u8; 2]")]
pub struct OrdinalRange {
    pub min: u8,
    pub max: u8,
}

impl OrdinalRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: u8) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

impl From<[u8; 2]> for OrdinalRange {
    fn from([min, max]: [u8; 2]) -> Self {
        Self { min, max }
    }
}

impl From<OrdinalRange> for [u8; 2] {
    fn from(range: OrdinalRange) -> Self {
        [range.min, range.max]
    }
}

/// Where a shot can go and which deliveries it answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotDefinition {
    #[serde(rename = "wedges")]
    pub applicable_wedges: BTreeSet<usize>,
    #[serde(rename = "power")]
    pub power_range: OrdinalRange,
    #[serde(rename = "line")]
    pub line_range: OrdinalRange,
    #[serde(rename = "length")]
    pub length_range: OrdinalRange,
}

impl ShotDefinition {
    /// True if the shot can be played to this delivery (both ranges inclusive).
    pub fn matches(&self, delivery: Delivery) -> bool {
        self.line_range.contains(delivery.line) && self.length_range.contains(delivery.length)
    }

    /// Segments this shot scores: each wedge at the minimum and maximum power.
    ///
    /// Intermediate power levels are not targeted.
    pub fn target_segments(&self) -> impl Iterator<Item = SegmentId> + '_ {
        let powers = [self.power_range.min, self.power_range.max];
        self.applicable_wedges.iter().flat_map(move |&wedge| {
            powers.into_iter().map(move |power| SegmentId::new(wedge, usize::from(power)))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogEntry {
    name: ShotName,
    wedges: BTreeSet<usize>,
    power: OrdinalRange,
    line: OrdinalRange,
    length: OrdinalRange,
}

impl From<CatalogEntry> for (ShotName, ShotDefinition) {
    fn from(entry: CatalogEntry) -> Self {
        let definition = ShotDefinition {
            applicable_wedges: entry.wedges,
            power_range: entry.power,
            line_range: entry.line,
            length_range: entry.length,
        };
        (entry.name, definition)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    shots: Vec<CatalogEntry>,
}

/// Ordered, validated collection of shot definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotCatalog {
    entries: Vec<(ShotName, ShotDefinition)>,
}

impl TryFrom<CatalogFile> for ShotCatalog {
    type Error = ShotMapError;

    fn try_from(file: CatalogFile) -> Result<Self> {
        ShotCatalog::new(file.shots.into_iter().map(Into::into).collect())
    }
}

impl ShotCatalog {
    /// Validates and wraps an ordered list of definitions.
    pub fn new(entries: Vec<(ShotName, ShotDefinition)>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (name, def) in &entries {
            if name.is_sentinel() {
                return Err(ShotMapError::InvalidCatalog(format!(
                    "{name} is an outcome sentinel, not a playable shot"
                )));
            }
            if !seen.insert(*name) {
                return Err(ShotMapError::InvalidCatalog(format!("duplicate entry for {name}")));
            }
            if def.applicable_wedges.is_empty() {
                return Err(ShotMapError::InvalidCatalog(format!("{name} has no wedges")));
            }
            for (label, range) in
                [("power", def.power_range), ("line", def.line_range), ("length", def.length_range)]
            {
                if !range.is_valid() {
                    return Err(ShotMapError::InvalidCatalog(format!(
                        "{name} {label} range [{}, {}] is inverted",
                        range.min, range.max
                    )));
                }
            }
        }
        Ok(Self { entries })
    }

    /// The built-in catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded YAML is invalid, which cannot happen in a
    /// build whose tests pass.
    pub fn standard() -> &'static ShotCatalog {
        STANDARD_CATALOG.get_or_init(|| {
            Self::from_yaml_str(STANDARD_CATALOG_YAML).expect("embedded shot catalog invalid")
        })
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        file.try_into()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        file.try_into()
    }

    /// Loads a catalog file (`.yaml`, `.yml` or `.json`).
    pub fn load(path: &Path) -> Result<Self> {
        let file: CatalogFile = load_document(path)?;
        file.try_into()
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        let file = CatalogFile {
            shots: self
                .entries
                .iter()
                .map(|(name, def)| CatalogEntry {
                    name: *name,
                    wedges: def.applicable_wedges.clone(),
                    power: def.power_range,
                    line: def.line_range,
                    length: def.length_range,
                })
                .collect(),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: ShotName) -> Option<&ShotDefinition> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, def)| def)
    }

    /// Entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (ShotName, &ShotDefinition)> {
        self.entries.iter().map(|(name, def)| (*name, def))
    }

    pub fn names(&self) -> impl Iterator<Item = ShotName> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Shots playable to `delivery`, in catalog order.
    pub fn candidates(&self, delivery: Delivery) -> Vec<(ShotName, &ShotDefinition)> {
        self.iter()
            .filter(|(name, def)| {
                let hit = def.matches(delivery);
                trace!(shot = %name, hit, "candidate filter");
                hit
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn def(wedges: &[usize], power: [u8; 2], line: [u8; 2], length: [u8; 2]) -> ShotDefinition {
        ShotDefinition {
            applicable_wedges: wedges.iter().copied().collect(),
            power_range: power.into(),
            line_range: line.into(),
            length_range: length.into(),
        }
    }

    #[test]
    fn test_standard_catalog_loads() {
        let catalog = ShotCatalog::standard();
        assert_eq!(catalog.len(), 16);
        assert_eq!(catalog.names().next(), Some(ShotName::PullShot));
        assert_eq!(catalog.names().last(), Some(ShotName::Tap));

        let straight = catalog.get(ShotName::StraightDrive).unwrap();
        assert_eq!(straight.applicable_wedges, BTreeSet::from([4]));
        assert_eq!(straight.power_range, OrdinalRange::new(4, 7));
        assert_eq!(straight.line_range, OrdinalRange::new(4, 4));
        assert_eq!(straight.length_range, OrdinalRange::new(4, 7));
        assert!(catalog.get(ShotName::Out).is_none());
    }

    #[test]
    fn test_candidates_for_stump_good_length() {
        let names: Vec<ShotName> = ShotCatalog::standard()
            .candidates(Delivery::new(4, 4))
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            names,
            vec![
                ShotName::Slog,
                ShotName::OnDrive,
                ShotName::StraightDrive,
                ShotName::Block,
                ShotName::Tap,
            ]
        );
    }

    #[test]
    fn test_candidates_bounds_are_inclusive() {
        let catalog = ShotCatalog::standard();
        // UPPER_CUT: line 3-4, length 1-2
        let at_edges = catalog.candidates(Delivery::new(3, 2));
        assert!(at_edges.iter().any(|(n, _)| *n == ShotName::UpperCut));
        let past_edge = catalog.candidates(Delivery::new(3, 3));
        assert!(!past_edge.iter().any(|(n, _)| *n == ShotName::UpperCut));
    }

    #[test]
    fn test_no_candidates_outside_domain() {
        let catalog = ShotCatalog::standard();
        assert!(catalog.candidates(Delivery::new(7, 7)).is_empty());
        assert!(catalog.candidates(Delivery::new(0, 0)).is_empty());
        assert!(catalog.candidates(Delivery::new(u8::MAX, 4)).is_empty());
    }

    #[test]
    fn test_target_segments_use_power_endpoints_only() {
        let cover = def(&[6, 7], [4, 7], [2, 3], [4, 7]);
        let targets: Vec<String> = cover.target_segments().map(|id| id.to_string()).collect();
        assert_eq!(targets, vec!["W6Z4", "W6Z7", "W7Z4", "W7Z7"]);
    }

    #[test]
    fn test_rejects_duplicate_and_sentinel_entries() {
        let d = def(&[1], [1, 2], [1, 2], [1, 2]);
        let dup = ShotCatalog::new(vec![(ShotName::Cut, d.clone()), (ShotName::Cut, d.clone())]);
        assert!(matches!(dup, Err(ShotMapError::InvalidCatalog(_))));

        let sentinel = ShotCatalog::new(vec![(ShotName::Miss, d)]);
        assert!(matches!(sentinel, Err(ShotMapError::InvalidCatalog(_))));
    }

    #[test]
    fn test_rejects_inverted_range_and_empty_wedges() {
        let inverted = ShotCatalog::new(vec![(ShotName::Hook, def(&[14], [7, 4], [5, 5], [1, 3]))]);
        let err = inverted.unwrap_err().to_string();
        assert!(err.contains("HOOK power range [7, 4] is inverted"), "{err}");

        let no_wedges = ShotCatalog::new(vec![(ShotName::Hook, def(&[], [4, 7], [5, 5], [1, 3]))]);
        assert!(no_wedges.is_err());
    }

    #[test]
    fn test_unknown_shot_name_is_rejected() {
        let yaml = "shots:\n  - name: SWITCH_HIT\n    wedges: [1]\n    power: [1, 2]\n    line: [1, 2]\n    length: [1, 2]\n";
        assert!(matches!(ShotCatalog::from_yaml_str(yaml), Err(ShotMapError::Yaml(_))));
    }

    #[test]
    fn test_yaml_round_trip_preserves_order() {
        let yaml = ShotCatalog::standard().to_yaml_string().unwrap();
        let reparsed = ShotCatalog::from_yaml_str(&yaml).unwrap();
        assert_eq!(&reparsed, ShotCatalog::standard());
    }

    #[test]
    fn test_load_json_catalog_from_file() {
        let json = r#"{"shots": [
            {"name": "CUT", "wedges": [9], "power": [2, 7], "line": [1, 2], "length": [2, 4]},
            {"name": "BLOCK", "wedges": [3, 4], "power": [1, 1], "line": [1, 7], "length": [1, 7]}
        ]}"#;
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = ShotCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec![ShotName::Cut, ShotName::Block]);
        assert_eq!(ShotCatalog::from_json_str(json).unwrap(), catalog);
    }
}
