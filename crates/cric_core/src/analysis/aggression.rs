//! Aggression reweighting tables
//!
//! Each aggression level maps to an ordered list of zone rules. A rule
//! matches a segment when its zone lies in the rule's inclusive band, or
//! (for defensive rules) when the shot is a BLOCK or TAP. The first matching
//! rule supplies the multiplier; no match leaves the value unchanged.
//!
//! The defensive and attacking families split the field at different zones:
//!
//! | Level          | Near band            | Far band     |
//! |----------------|----------------------|--------------|
//! | VERY_DEFENSIVE | 1-3 or BLOCK/TAP ×3  | 4-7 ×0.5     |
//! | DEFENSIVE      | 1-3 or BLOCK/TAP ×1.5| 4-7 ×0.75    |
//! | NEUTRAL        | -                    | -            |
//! | ATTACKING      | 5-7 ×1.5             | 1-2 ×0.75    |
//! | VERY_ATTACKING | 5-7 ×3               | 1-3 ×0.5     |
//!
//! Zone 0 and zones beyond 7 never match.

use crate::batsman::Aggression;
use crate::shots::ShotName;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneRule {
    pub zone_min: usize,
    pub zone_max: usize,
    /// Also match BLOCK and TAP regardless of zone.
    pub defensive_strokes: bool,
    pub multiplier: f64,
}

impl ZoneRule {
    const fn zones(zone_min: usize, zone_max: usize, multiplier: f64) -> Self {
        Self { zone_min, zone_max, defensive_strokes: false, multiplier }
    }

    const fn zones_or_defensive(zone_min: usize, zone_max: usize, multiplier: f64) -> Self {
        Self { zone_min, zone_max, defensive_strokes: true, multiplier }
    }

    pub fn matches(&self, zone: usize, shot: ShotName) -> bool {
        (self.defensive_strokes && shot.is_defensive_stroke())
            || (self.zone_min..=self.zone_max).contains(&zone)
    }
}

const VERY_DEFENSIVE_RULES: [ZoneRule; 2] =
    [ZoneRule::zones_or_defensive(1, 3, 3.0), ZoneRule::zones(4, 7, 0.5)];

const DEFENSIVE_RULES: [ZoneRule; 2] =
    [ZoneRule::zones_or_defensive(1, 3, 1.5), ZoneRule::zones(4, 7, 0.75)];

const NEUTRAL_RULES: [ZoneRule; 0] = [];

const ATTACKING_RULES: [ZoneRule; 2] = [ZoneRule::zones(5, 7, 1.5), ZoneRule::zones(1, 2, 0.75)];

const VERY_ATTACKING_RULES: [ZoneRule; 2] = [ZoneRule::zones(5, 7, 3.0), ZoneRule::zones(1, 3, 0.5)];

/// Rule table for one aggression level, in evaluation order.
pub fn rules_for(aggression: Aggression) -> &'static [ZoneRule] {
    match aggression {
        Aggression::VeryDefensive => &VERY_DEFENSIVE_RULES,
        Aggression::Defensive => &DEFENSIVE_RULES,
        Aggression::Neutral => &NEUTRAL_RULES,
        Aggression::Attacking => &ATTACKING_RULES,
        Aggression::VeryAttacking => &VERY_ATTACKING_RULES,
    }
}

/// Multiplier for a segment in `zone` scored by `shot`.
pub fn multiplier(aggression: Aggression, zone: usize, shot: ShotName) -> f64 {
    rules_for(aggression)
        .iter()
        .find(|rule| rule.matches(zone, shot))
        .map_or(1.0, |rule| rule.multiplier)
}
