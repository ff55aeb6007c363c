use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ShotMapError;
use crate::field::SegmentId;
use crate::shots::ShotName;

/// Non-geometric outcomes, always present with zero mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sentinel {
    Out,
    Leave,
    Miss,
    LegByes,
}

impl Sentinel {
    pub const ALL: [Sentinel; 4] = [Sentinel::Out, Sentinel::Leave, Sentinel::Miss, Sentinel::LegByes];

    pub fn shot(&self) -> ShotName {
        match self {
            Sentinel::Out => ShotName::Out,
            Sentinel::Leave => ShotName::Leave,
            Sentinel::Miss => ShotName::Miss,
            Sentinel::LegByes => ShotName::LegByes,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.shot().as_str()
    }
}

/// Key of a distribution entry: a field cell or a sentinel outcome.
///
/// Segments sort before sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutcomeId {
    Segment(SegmentId),
    Sentinel(Sentinel),
}

impl OutcomeId {
    pub fn segment(&self) -> Option<SegmentId> {
        match self {
            OutcomeId::Segment(id) => Some(*id),
            OutcomeId::Sentinel(_) => None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, OutcomeId::Sentinel(_))
    }
}

impl From<SegmentId> for OutcomeId {
    fn from(id: SegmentId) -> Self {
        OutcomeId::Segment(id)
    }
}

impl From<Sentinel> for OutcomeId {
    fn from(s: Sentinel) -> Self {
        OutcomeId::Sentinel(s)
    }
}

impl fmt::Display for OutcomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeId::Segment(id) => fmt::Display::fmt(id, f),
            OutcomeId::Sentinel(s) => f.write_str(s.as_str()),
        }
    }
}

impl FromStr for OutcomeId {
    type Err = ShotMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(sentinel) = Sentinel::ALL.iter().find(|x| x.as_str() == s) {
            return Ok(OutcomeId::Sentinel(*sentinel));
        }
        s.parse::<SegmentId>().map(OutcomeId::Segment)
    }
}

impl Serialize for OutcomeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OutcomeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Working value of one outcome and the shot that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredOutcome {
    pub value: f64,
    pub shot: ShotName,
}

/// Outcome values keyed by id, in id order.
pub type OutcomeValues = BTreeMap<OutcomeId, ScoredOutcome>;

/// Descending by value, ties broken by ascending key.
fn by_value_desc<K: Ord>(a: &(K, f64), b: &(K, f64)) -> Ordering {
    b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then_with(|| a.0.cmp(&b.0))
}

/// Entries of `values` ranked by descending value.
pub fn ranked_values(values: &OutcomeValues) -> Vec<(OutcomeId, ScoredOutcome)> {
    let mut ranked: Vec<_> = values.iter().map(|(id, s)| (*id, *s)).collect();
    ranked.sort_by(|a, b| by_value_desc(&(a.0, a.1.value), &(b.0, b.1.value)));
    ranked
}

/// Normalized outcome probabilities.
///
/// Either sums to 1 or, when no outcome carries positive value, is all zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityDistribution {
    probabilities: BTreeMap<OutcomeId, f64>,
}

impl ProbabilityDistribution {
    pub fn from_values(values: &OutcomeValues) -> Self {
        let total: f64 = values.values().map(|s| s.value).sum();
        let probabilities = values
            .iter()
            .map(|(id, s)| {
                let p = if total > 0.0 && total.is_finite() { s.value / total } else { 0.0 };
                (*id, p)
            })
            .collect();
        Self { probabilities }
    }

    pub fn get(&self, id: impl Into<OutcomeId>) -> Option<f64> {
        self.probabilities.get(&id.into()).copied()
    }

    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// True when every entry is zero (no playable outcome).
    pub fn is_degenerate(&self) -> bool {
        self.probabilities.values().all(|&p| p == 0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OutcomeId, f64)> + '_ {
        self.probabilities.iter().map(|(id, p)| (*id, *p))
    }

    pub fn ranked(&self) -> Vec<(OutcomeId, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(by_value_desc);
        ranked
    }

    /// The `n` most likely field segments; sentinels excluded.
    pub fn top_segments(&self, n: usize) -> Vec<(SegmentId, f64)> {
        let mut segments: Vec<_> =
            self.iter().filter_map(|(id, p)| id.segment().map(|seg| (seg, p))).collect();
        segments.sort_by(by_value_desc);
        segments.truncate(n);
        segments
    }

    /// Sums probability per zone index across all wedges.
    pub fn zones(&self) -> ZoneDistribution {
        let mut zones = BTreeMap::new();
        for (id, p) in self.iter() {
            if let Some(seg) = id.segment() {
                *zones.entry(seg.zone).or_insert(0.0) += p;
            }
        }
        ZoneDistribution { zones }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneDistribution {
    zones: BTreeMap<usize, f64>,
}

impl ZoneDistribution {
    pub fn get(&self, zone: usize) -> Option<f64> {
        self.zones.get(&zone).copied()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.zones.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.zones.iter().map(|(z, p)| (*z, *p))
    }

    pub fn ranked(&self) -> Vec<(usize, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(by_value_desc);
        ranked
    }
}
