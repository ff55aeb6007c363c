//! Shot analysis
//!
//! Turns a covered field, a delivery and a batsman into a probability
//! distribution over where the ball goes.

pub mod aggression;
pub mod analyzer;
pub mod distribution;

pub use aggression::{multiplier as aggression_multiplier, rules_for, ZoneRule};
pub use analyzer::{ShotAnalysis, ShotAnalyzer, DEFAULT_WEAK_AREA_THRESHOLD};
pub use distribution::{
    ranked_values, OutcomeId, OutcomeValues, ProbabilityDistribution, ScoredOutcome, Sentinel,
    ZoneDistribution,
};

#[cfg(test)]
mod tests;
