use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShotMapError;

/// Named batting outcomes.
///
/// The last four are non-geometric results that never come from the
/// catalog; they only appear as zero-valued sentinel entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShotName {
    PullShot,
    Slog,
    OnDrive,
    StraightDrive,
    OffDrive,
    CoverDrive,
    LoftedDrive,
    Cut,
    SquareCut,
    LateCut,
    UpperCut,
    LegGlance,
    Hook,
    Flick,
    Block,
    Tap,
    Out,
    Leave,
    Miss,
    LegByes,
}

impl ShotName {
    pub const ALL: [ShotName; 20] = [
        ShotName::PullShot,
        ShotName::Slog,
        ShotName::OnDrive,
        ShotName::StraightDrive,
        ShotName::OffDrive,
        ShotName::CoverDrive,
        ShotName::LoftedDrive,
        ShotName::Cut,
        ShotName::SquareCut,
        ShotName::LateCut,
        ShotName::UpperCut,
        ShotName::LegGlance,
        ShotName::Hook,
        ShotName::Flick,
        ShotName::Block,
        ShotName::Tap,
        ShotName::Out,
        ShotName::Leave,
        ShotName::Miss,
        ShotName::LegByes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotName::PullShot => "PULL_SHOT",
            ShotName::Slog => "SLOG",
            ShotName::OnDrive => "ON_DRIVE",
            ShotName::StraightDrive => "STRAIGHT_DRIVE",
            ShotName::OffDrive => "OFF_DRIVE",
            ShotName::CoverDrive => "COVER_DRIVE",
            ShotName::LoftedDrive => "LOFTED_DRIVE",
            ShotName::Cut => "CUT",
            ShotName::SquareCut => "SQUARE_CUT",
            ShotName::LateCut => "LATE_CUT",
            ShotName::UpperCut => "UPPER_CUT",
            ShotName::LegGlance => "LEG_GLANCE",
            ShotName::Hook => "HOOK",
            ShotName::Flick => "FLICK",
            ShotName::Block => "BLOCK",
            ShotName::Tap => "TAP",
            ShotName::Out => "OUT",
            ShotName::Leave => "LEAVE",
            ShotName::Miss => "MISS",
            ShotName::LegByes => "LEG_BYES",
        }
    }

    /// True for OUT / LEAVE / MISS / LEG_BYES.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, ShotName::Out | ShotName::Leave | ShotName::Miss | ShotName::LegByes)
    }

    /// Shots that always count as defensive, whatever zone they reach.
    pub fn is_defensive_stroke(&self) -> bool {
        matches!(self, ShotName::Block | ShotName::Tap)
    }
}

impl fmt::Display for ShotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShotName {
    type Err = ShotMapError;

    /// Accepts `PULL_SHOT`, `pull_shot` or `pull-shot`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        ShotName::ALL
            .iter()
            .copied()
            .find(|shot| shot.as_str() == normalized)
            .ok_or_else(|| ShotMapError::UnknownShot(s.to_string()))
    }
}

/// Delivery line, ordinal 1 (far off side) to 7 (far leg side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Line {
    VeryWideOff,
    WideOff,
    OutsideOff,
    Stump,
    OutsideLeg,
    WideLeg,
    VeryWideLeg,
}

impl Line {
    pub const ALL: [Line; 7] = [
        Line::VeryWideOff,
        Line::WideOff,
        Line::OutsideOff,
        Line::Stump,
        Line::OutsideLeg,
        Line::WideLeg,
        Line::VeryWideLeg,
    ];

    pub fn ordinal(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal).checked_sub(1)?).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Line::VeryWideOff => "VERY_WIDE_OFF",
            Line::WideOff => "WIDE_OFF",
            Line::OutsideOff => "OUTSIDE_OFF",
            Line::Stump => "STUMP",
            Line::OutsideLeg => "OUTSIDE_LEG",
            Line::WideLeg => "WIDE_LEG",
            Line::VeryWideLeg => "VERY_WIDE_LEG",
        }
    }
}

/// Delivery length, ordinal 1 (shortest) to 7 (full toss).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Length {
    VeryShort,
    Short,
    BackOfALength,
    Good,
    Full,
    Yorker,
    FullToss,
}

impl Length {
    pub const ALL: [Length; 7] = [
        Length::VeryShort,
        Length::Short,
        Length::BackOfALength,
        Length::Good,
        Length::Full,
        Length::Yorker,
        Length::FullToss,
    ];

    pub fn ordinal(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal).checked_sub(1)?).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Length::VeryShort => "VERY_SHORT",
            Length::Short => "SHORT",
            Length::BackOfALength => "BACK_OF_A_LENGTH",
            Length::Good => "GOOD",
            Length::Full => "FULL",
            Length::Yorker => "YORKER",
            Length::FullToss => "FULL_TOSS",
        }
    }
}

/// Line and length of the ball being faced, as raw ordinals.
///
/// Values outside 1..=7 are accepted; they simply match no catalog shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delivery {
    pub line: u8,
    pub length: u8,
}

impl Default for Delivery {
    fn default() -> Self {
        Self { line: Line::Stump.ordinal(), length: Length::Full.ordinal() }
    }
}

impl Delivery {
    pub const fn new(line: u8, length: u8) -> Self {
        Self { line, length }
    }

    pub fn line_label(&self) -> Option<Line> {
        Line::from_ordinal(self.line)
    }

    pub fn length_label(&self) -> Option<Length> {
        Length::from_ordinal(self.length)
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.line_label().map_or("?", |l| l.as_str());
        let length = self.length_label().map_or("?", |l| l.as_str());
        write!(f, "line {} ({}), length {} ({})", self.line, line, self.length, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shot_name_round_trip() {
        for shot in ShotName::ALL {
            assert_eq!(shot.as_str().parse::<ShotName>().unwrap(), shot);
            let json = serde_json::to_string(&shot).unwrap();
            assert_eq!(json, format!("\"{}\"", shot.as_str()));
        }
    }

    #[test]
    fn test_shot_name_lenient_parse() {
        assert_eq!("straight-drive".parse::<ShotName>().unwrap(), ShotName::StraightDrive);
        assert_eq!(" leg_byes ".parse::<ShotName>().unwrap(), ShotName::LegByes);
        assert!(matches!(
            "REVERSE_SWEEP".parse::<ShotName>(),
            Err(ShotMapError::UnknownShot(_))
        ));
    }

    #[test]
    fn test_sentinels_and_defensive_strokes() {
        let sentinels: Vec<_> = ShotName::ALL.iter().filter(|s| s.is_sentinel()).collect();
        assert_eq!(sentinels.len(), 4);
        assert!(ShotName::Block.is_defensive_stroke());
        assert!(ShotName::Tap.is_defensive_stroke());
        assert!(!ShotName::Cut.is_defensive_stroke());
    }

    #[test]
    fn test_line_length_ordinals() {
        assert_eq!(Line::Stump.ordinal(), 4);
        assert_eq!(Line::from_ordinal(1), Some(Line::VeryWideOff));
        assert_eq!(Line::from_ordinal(7), Some(Line::VeryWideLeg));
        assert_eq!(Line::from_ordinal(0), None);
        assert_eq!(Line::from_ordinal(8), None);

        assert_eq!(Length::Good.ordinal(), 4);
        assert_eq!(Length::from_ordinal(5), Some(Length::Full));
        assert_eq!(Length::from_ordinal(0), None);
    }

    #[test]
    fn test_delivery_display() {
        let d = Delivery::new(4, 4);
        assert_eq!(d.to_string(), "line 4 (STUMP), length 4 (GOOD)");
        assert_eq!(Delivery::new(9, 0).to_string(), "line 9 (?), length 0 (?)");
        assert_eq!(Delivery::default(), Delivery::new(4, 5));
    }
}
