//! Batsman profile
//!
//! Per-session record of who is on strike: fixed base traits, in-game state
//! and a 0-100 skill rating per catalog shot. Immutable for the life of an
//! analysis; the session holds it behind an `Arc`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::config::load_document;
use crate::error::{Result, ShotMapError};
use crate::shots::ShotName;

pub const SAMPLE_BATSMAN_YAML: &str = include_str!("../data/sample_batsman.yaml");

static SAMPLE_BATSMAN: OnceLock<BatsmanProfile> = OnceLock::new();

/// Highest allowed skill rating.
pub const MAX_SKILL: u8 = 100;

/// Batting intent, from blocking everything to swinging at everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Aggression {
    VeryDefensive,
    Defensive,
    #[default]
    Neutral,
    Attacking,
    VeryAttacking,
}

impl Aggression {
    pub const ALL: [Aggression; 5] = [
        Aggression::VeryDefensive,
        Aggression::Defensive,
        Aggression::Neutral,
        Aggression::Attacking,
        Aggression::VeryAttacking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Aggression::VeryDefensive => "VERY_DEFENSIVE",
            Aggression::Defensive => "DEFENSIVE",
            Aggression::Neutral => "NEUTRAL",
            Aggression::Attacking => "ATTACKING",
            Aggression::VeryAttacking => "VERY_ATTACKING",
        }
    }
}

impl fmt::Display for Aggression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggression {
    type Err = ShotMapError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Aggression::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| ShotMapError::UnknownAggression(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTraits {
    pub timing: u8,
    /// Drives the weak-area bonus: `1 + judgement / 100`.
    pub judgement: u8,
    pub stamina: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InGameTraits {
    pub fatigue: u8,
    pub confidence: u8,
    #[serde(default)]
    pub aggression: Aggression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatsmanProfile {
    pub base_traits: BaseTraits,
    pub in_game_traits: InGameTraits,
    #[serde(default)]
    pub skills: BTreeMap<ShotName, u8>,
}

impl BatsmanProfile {
    /// Reference batsman shipped with the crate.
    ///
    /// # Panics
    ///
    /// Panics if the embedded sample YAML is invalid.
    pub fn sample() -> &'static BatsmanProfile {
        SAMPLE_BATSMAN.get_or_init(|| {
            Self::from_yaml_str(SAMPLE_BATSMAN_YAML).expect("embedded sample batsman invalid")
        })
    }

    /// Neutral batsman with the same rating for every playable shot.
    pub fn uniform(rating: u8) -> Result<Self> {
        let profile = Self {
            base_traits: BaseTraits { timing: 50, judgement: 50, stamina: 50 },
            in_game_traits: InGameTraits { fatigue: 0, confidence: 0, aggression: Aggression::Neutral },
            skills: ShotName::ALL
                .iter()
                .filter(|s| !s.is_sentinel())
                .map(|&s| (s, rating))
                .collect(),
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let profile: Self = serde_yaml::from_str(yaml)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Loads a profile file (`.yaml`, `.yml` or `.json`).
    pub fn load(path: &Path) -> Result<Self> {
        let profile: Self = load_document(path)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<()> {
        for (shot, &rating) in &self.skills {
            if rating > MAX_SKILL {
                return Err(ShotMapError::InvalidSkill {
                    shot: shot.to_string(),
                    rating: u32::from(rating),
                });
            }
        }
        Ok(())
    }

    /// Rating for `shot`, or 0 if the batsman has none.
    pub fn skill(&self, shot: ShotName) -> u8 {
        self.skills.get(&shot).copied().unwrap_or(0)
    }

    pub fn judgement_multiplier(&self) -> f64 {
        1.0 + f64::from(self.base_traits.judgement) / 100.0
    }

    pub fn with_aggression(mut self, aggression: Aggression) -> Self {
        self.in_game_traits.aggression = aggression;
        self
    }
}
