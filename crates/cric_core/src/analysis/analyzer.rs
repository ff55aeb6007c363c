//! Shot analyzer
//!
//! Stateless scoring pipeline run once per committed delivery or fielder
//! move:
//!
//! 1. filter the catalog to shots playable to the delivery
//! 2. expand each shot onto its target segments at the batsman's skill
//!    (later catalog entries overwrite earlier ones on shared segments)
//! 3. boost segments nobody covers by the judgement multiplier
//! 4. reweight by aggression
//! 5. insert the zero-valued sentinels
//! 6. normalize and aggregate by zone

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::aggression;
use super::distribution::{
    ranked_values, OutcomeId, OutcomeValues, ProbabilityDistribution, ScoredOutcome, Sentinel,
    ZoneDistribution,
};
use crate::batsman::{Aggression, BatsmanProfile};
use crate::field::{Segment, SegmentId};
use crate::shots::{Delivery, ShotCatalog, ShotDefinition, ShotName};

/// Coverage at or below which a segment counts as open.
pub const DEFAULT_WEAK_AREA_THRESHOLD: u32 = 0;

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotAnalysis {
    pub delivery: Delivery,
    pub aggression: Aggression,
    /// Shots that passed the delivery filter, in catalog order.
    pub candidates: Vec<ShotName>,
    /// Segment values after the weak-area bonus, before aggression.
    pub potential: OutcomeValues,
    /// Final values including sentinels.
    pub adjusted: OutcomeValues,
    pub distribution: ProbabilityDistribution,
    pub zones: ZoneDistribution,
}

impl ShotAnalysis {
    /// Potential shots by descending value.
    pub fn ranked_potential(&self) -> Vec<(OutcomeId, ScoredOutcome)> {
        ranked_values(&self.potential)
    }

    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ShotAnalyzer<'a> {
    catalog: &'a ShotCatalog,
    batsman: &'a BatsmanProfile,
    weak_area_threshold: u32,
}

impl<'a> ShotAnalyzer<'a> {
    pub fn new(catalog: &'a ShotCatalog, batsman: &'a BatsmanProfile) -> Self {
        Self { catalog, batsman, weak_area_threshold: DEFAULT_WEAK_AREA_THRESHOLD }
    }

    pub fn with_weak_area_threshold(mut self, threshold: u32) -> Self {
        self.weak_area_threshold = threshold;
        self
    }

    pub fn filter(&self, delivery: Delivery) -> Vec<(ShotName, &'a ShotDefinition)> {
        self.catalog.candidates(delivery)
    }

    /// Initial segment values; last write wins on shared segments.
    pub fn expand(&self, candidates: &[(ShotName, &ShotDefinition)]) -> OutcomeValues {
        let mut values = OutcomeValues::new();
        for &(shot, def) in candidates {
            let value = f64::from(self.batsman.skill(shot));
            for id in def.target_segments() {
                values.insert(OutcomeId::Segment(id), ScoredOutcome { value, shot });
            }
        }
        values
    }

    /// Multiplies every open segment by the batsman's judgement multiplier.
    ///
    /// Ids that are not on the grid have no coverage and get no bonus.
    pub fn apply_weak_area_bonus(&self, values: &mut OutcomeValues, segments: &[Segment]) {
        let weak: HashSet<SegmentId> = segments
            .iter()
            .filter(|s| s.coverage() <= self.weak_area_threshold)
            .map(|s| s.id())
            .collect();
        let multiplier = self.batsman.judgement_multiplier();

        let mut boosted = 0usize;
        for (id, scored) in values.iter_mut() {
            if id.segment().is_some_and(|seg| weak.contains(&seg)) {
                scored.value *= multiplier;
                boosted += 1;
            }
        }
        debug!(weak = weak.len(), boosted, multiplier, "weak-area bonus applied");
    }

    pub fn reweight(values: &mut OutcomeValues, aggression: Aggression) {
        for (id, scored) in values.iter_mut() {
            if let Some(seg) = id.segment() {
                scored.value *= aggression::multiplier(aggression, seg.zone, scored.shot);
            }
        }
    }

    pub fn add_sentinels(values: &mut OutcomeValues) {
        for sentinel in Sentinel::ALL {
            let scored = ScoredOutcome { value: 0.0, shot: sentinel.shot() };
            values.insert(OutcomeId::Sentinel(sentinel), scored);
        }
    }

    /// Runs the full pipeline against covered `segments`.
    pub fn analyze(
        &self,
        segments: &[Segment],
        delivery: Delivery,
        aggression: Aggression,
    ) -> ShotAnalysis {
        let candidates = self.filter(delivery);
        if candidates.is_empty() {
            warn!(%delivery, "no catalog shot can be played to this delivery");
        }
        for (shot, def) in &candidates {
            trace!(
                shot = %shot,
                skill = self.batsman.skill(*shot),
                wedges = def.applicable_wedges.len(),
                "candidate"
            );
        }

        let mut potential = self.expand(&candidates);
        self.apply_weak_area_bonus(&mut potential, segments);

        let mut adjusted = potential.clone();
        Self::reweight(&mut adjusted, aggression);
        Self::add_sentinels(&mut adjusted);

        let distribution = ProbabilityDistribution::from_values(&adjusted);
        let zones = distribution.zones();
        debug!(
            %delivery,
            %aggression,
            candidates = candidates.len(),
            outcomes = distribution.len(),
            "analysis complete"
        );

        ShotAnalysis {
            delivery,
            aggression,
            candidates: candidates.iter().map(|(name, _)| *name).collect(),
            potential,
            adjusted,
            distribution,
            zones,
        }
    }
}
