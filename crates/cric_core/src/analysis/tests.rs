//! Scenario tests for the full scoring pipeline
//!
//! Runs segmentation, coverage and analysis together on the default field.

use super::*;
use crate::batsman::{Aggression, BatsmanProfile};
use crate::field::{CoverageEngine, FieldGeometry, FieldSegmenter, Segment, SegmentId};
use crate::geometry::Point;
use crate::shots::{Delivery, ShotCatalog, ShotName};

fn covered_field(fielders: &[Point]) -> Vec<Segment> {
    let geometry = FieldGeometry::default();
    let grid = FieldSegmenter::segment(&geometry).unwrap();
    CoverageEngine::new(geometry.batsman, 10.0).unwrap().compute(grid.segments(), fielders)
}

fn value(values: &OutcomeValues, wedge: usize, zone: usize) -> f64 {
    values[&OutcomeId::Segment(SegmentId::new(wedge, zone))].value
}

#[test]
fn test_stump_good_length_reaches_straight_wedges() {
    let segments = covered_field(&[]);
    let batsman = BatsmanProfile::uniform(80).unwrap();
    let analyzer = ShotAnalyzer::new(ShotCatalog::standard(), &batsman);

    let analysis = analyzer.analyze(&segments, Delivery::new(4, 4), Aggression::Neutral);
    assert_eq!(
        analysis.candidates,
        vec![
            ShotName::Slog,
            ShotName::OnDrive,
            ShotName::StraightDrive,
            ShotName::Block,
            ShotName::Tap,
        ]
    );

    // open cells get 80 * 1.5; the keeper baseline keeps W4Z1/W4Z2 at 80
    assert_eq!(value(&analysis.potential, 3, 4), 120.0);
    assert_eq!(value(&analysis.potential, 4, 4), 120.0);
    assert_eq!(value(&analysis.potential, 4, 1), 80.0);
    // zone 7 is past the 7-zone grid, so never counts as open
    assert_eq!(value(&analysis.potential, 3, 7), 80.0);
    assert_eq!(value(&analysis.potential, 4, 7), 80.0);

    assert_eq!(analysis.potential[&OutcomeId::Segment(SegmentId::new(3, 4))].shot, ShotName::OnDrive);
    assert_eq!(analysis.potential[&OutcomeId::Segment(SegmentId::new(4, 7))].shot, ShotName::StraightDrive);
    for wedge in [3, 4] {
        assert!(analysis.distribution.get(SegmentId::new(wedge, 4)).unwrap() > 0.0);
        assert!(analysis.distribution.get(SegmentId::new(wedge, 7)).unwrap() > 0.0);
    }

    // 38 boosted entries at 120 + 6 unboosted at 80
    let total: f64 = analysis.adjusted.values().map(|s| s.value).sum();
    assert!((total - 5040.0).abs() < 1e-9);
    assert!((analysis.distribution.get(SegmentId::new(3, 4)).unwrap() - 120.0 / 5040.0).abs() < 1e-12);
}

#[test]
fn test_tap_overwrites_block_on_shared_wedges() {
    let segments = covered_field(&[]);
    let mut batsman = BatsmanProfile::uniform(80).unwrap();
    batsman.skills.insert(ShotName::Block, 40);
    batsman.skills.insert(ShotName::Tap, 20);
    let analyzer = ShotAnalyzer::new(ShotCatalog::standard(), &batsman);

    let analysis = analyzer.analyze(&segments, Delivery::new(4, 4), Aggression::Neutral);
    let get = |w, z| analysis.potential[&OutcomeId::Segment(SegmentId::new(w, z))];

    // BLOCK reaches wedges 1-8, TAP 0-2 and 6-17; TAP is later in the catalog
    assert_eq!(get(1, 1).shot, ShotName::Tap);
    assert_eq!(get(7, 2).shot, ShotName::Tap);
    assert_eq!(get(3, 1).shot, ShotName::Block);
    assert_eq!(get(3, 1).value, 60.0);
    assert_eq!(get(5, 2).shot, ShotName::Block);
    assert_eq!(get(1, 1).value, 30.0);
}

#[test]
fn test_very_attacking_triples_far_zones() {
    let segments = covered_field(&[]);
    let batsman = BatsmanProfile::uniform(80).unwrap();
    let analyzer = ShotAnalyzer::new(ShotCatalog::standard(), &batsman);
    let delivery = Delivery::new(4, 4);

    let neutral = analyzer.analyze(&segments, delivery, Aggression::Neutral);
    let attacking = analyzer.analyze(&segments, delivery, Aggression::VeryAttacking);
    assert_eq!(neutral.potential, attacking.potential);

    for (id, scored) in &attacking.adjusted {
        let Some(seg) = id.segment() else { continue };
        let base = neutral.adjusted[id].value;
        let expected = match seg.zone {
            5..=7 => base * 3.0,
            1..=3 => base * 0.5,
            _ => base,
        };
        assert_eq!(scored.value, expected, "{id}");
    }
    assert_eq!(value(&attacking.adjusted, 3, 7), 3.0 * value(&neutral.adjusted, 3, 7));
    assert_eq!(value(&attacking.adjusted, 4, 7), 240.0);
    assert_eq!(value(&attacking.adjusted, 4, 4), 120.0);
}

#[test]
fn test_defensive_boosts_block_and_tap_everywhere() {
    let segments = covered_field(&[]);
    let batsman = BatsmanProfile::uniform(80).unwrap();
    let analyzer = ShotAnalyzer::new(ShotCatalog::standard(), &batsman);

    let neutral = analyzer.analyze(&segments, Delivery::new(4, 4), Aggression::Neutral);
    let defensive = analyzer.analyze(&segments, Delivery::new(4, 4), Aggression::Defensive);

    assert_eq!(value(&defensive.adjusted, 5, 1), value(&neutral.adjusted, 5, 1) * 1.5);
    assert_eq!(value(&defensive.adjusted, 1, 5), value(&neutral.adjusted, 1, 5) * 0.75);
    assert_eq!(value(&defensive.adjusted, 3, 4), value(&neutral.adjusted, 3, 4) * 0.75);

    let far_zone: f64 = defensive.zones.iter().filter(|(z, _)| *z >= 4).map(|(_, p)| p).sum();
    let far_zone_neutral: f64 = neutral.zones.iter().filter(|(z, _)| *z >= 4).map(|(_, p)| p).sum();
    assert!(far_zone < far_zone_neutral);
}

#[test]
fn test_covered_segments_lose_bonus() {
    let batsman = BatsmanProfile::uniform(80).unwrap();
    let analyzer = ShotAnalyzer::new(ShotCatalog::standard(), &batsman);
    let delivery = Delivery::new(4, 4);

    let open = analyzer.analyze(&covered_field(&[]), delivery, Aggression::Neutral);
    // deep fielder sitting in W3Z4
    let grid = FieldSegmenter::segment(&FieldGeometry::default()).unwrap();
    let fielder = grid.segment(SegmentId::new(3, 4)).unwrap().polygon().centroid();
    let guarded = analyzer.analyze(&covered_field(&[fielder]), delivery, Aggression::Neutral);

    assert_eq!(value(&open.potential, 3, 4), 120.0);
    assert_eq!(value(&guarded.potential, 3, 4), 80.0);
}

#[test]
fn test_weak_area_threshold_widens_bonus() {
    let segments = covered_field(&[]);
    let batsman = BatsmanProfile::uniform(80).unwrap();
    let analyzer = ShotAnalyzer::new(ShotCatalog::standard(), &batsman).with_weak_area_threshold(1);

    let analysis = analyzer.analyze(&segments, Delivery::new(4, 4), Aggression::Neutral);
    assert_eq!(value(&analysis.potential, 4, 1), 120.0);
}

#[test]
fn test_unplayable_delivery_is_all_zero() {
    let segments = covered_field(&[]);
    let analyzer = ShotAnalyzer::new(ShotCatalog::standard(), BatsmanProfile::sample());

    let analysis = analyzer.analyze(&segments, Delivery::new(7, 7), Aggression::VeryAttacking);
    assert!(!analysis.has_candidates());
    assert!(analysis.potential.is_empty());
    assert_eq!(analysis.distribution.len(), 4);
    assert!(analysis.distribution.is_degenerate());
    assert!(analysis.zones.is_empty());
}

#[test]
fn test_ranked_potential_order() {
    let segments = covered_field(&[]);
    let analyzer = ShotAnalyzer::new(ShotCatalog::standard(), BatsmanProfile::sample());
    let analysis = analyzer.analyze(&segments, Delivery::new(4, 4), Aggression::Neutral);

    let ranked = analysis.ranked_potential();
    assert_eq!(ranked.len(), analysis.potential.len());
    assert!(ranked.windows(2).all(|w| w[0].1.value >= w[1].1.value));
    // 80 * 1.7 on every open cell; W0Z1 sorts first among equals
    assert_eq!(ranked[0].0.to_string(), "W0Z1");
    assert!((ranked[0].1.value - 136.0).abs() < 1e-9);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn aggression() -> impl Strategy<Value = Aggression> {
        prop::sample::select(Aggression::ALL.to_vec())
    }

    proptest! {
        /// Property: sentinels always present at zero; mass sums to 1 or 0.
        #[test]
        fn prop_distribution_mass(
            line in 0u8..9,
            length in 0u8..9,
            rating in 0u8..=100,
            aggression in aggression(),
            fielders in prop::collection::vec((450.0f64..950.0, 150.0f64..650.0), 0..8),
        ) {
            let fielders: Vec<Point> = fielders.into_iter().map(Point::from).collect();
            let segments = covered_field(&fielders);
            let batsman = BatsmanProfile::uniform(rating).unwrap();
            let analyzer = ShotAnalyzer::new(ShotCatalog::standard(), &batsman);
            let analysis = analyzer.analyze(&segments, Delivery::new(line, length), aggression);

            for sentinel in Sentinel::ALL {
                prop_assert_eq!(analysis.distribution.get(sentinel), Some(0.0));
            }
            prop_assert!(analysis.distribution.iter().all(|(_, p)| p.is_finite() && p >= 0.0));

            let total = analysis.distribution.total();
            if analysis.has_candidates() && rating > 0 {
                prop_assert!((total - 1.0).abs() < 1e-9, "total {}", total);
                prop_assert!((analysis.zones.total() - 1.0).abs() < 1e-9);
            } else {
                prop_assert_eq!(total, 0.0);
            }
        }
    }
}
