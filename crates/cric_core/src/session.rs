//! Field session
//!
//! Sole owner of the segment grid, fielder positions, current delivery and
//! the latest analysis. Every mutation re-runs only the stages it makes
//! stale:
//!
//! | Event                | Segment | Coverage | Analysis |
//! |----------------------|---------|----------|----------|
//! | `reconfigure_field`  | yes     | yes      | yes      |
//! | `place_fielder`      |         | yes      | yes      |
//! | `set_fielders`       |         | yes      | yes      |
//! | `set_fielder_range`  |         | yes      | yes      |
//! | `commit_delivery`    |         |          | yes      |
//! | `set_aggression`     |         |          | yes      |

use std::sync::Arc;

use tracing::{debug, info};

use crate::analysis::{ShotAnalysis, ShotAnalyzer};
use crate::batsman::{Aggression, BatsmanProfile};
use crate::config::FieldConfig;
use crate::error::{Result, ShotMapError};
use crate::field::{CoverageEngine, FieldGeometry, FieldGrid, FieldSegmenter, Segment, SegmentId};
use crate::geometry::Point;
use crate::shots::{Delivery, ShotCatalog};

/// Distance within which a pointer press grabs a fielder.
pub const DEFAULT_GRAB_RADIUS: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct FieldSession {
    config: FieldConfig,
    catalog: Arc<ShotCatalog>,
    batsman: Arc<BatsmanProfile>,
    engine: CoverageEngine,
    grid: FieldGrid,
    covered: Vec<Segment>,
    delivery: Delivery,
    aggression: Aggression,
    analysis: ShotAnalysis,
}

impl FieldSession {
    /// Builds the grid, coverage and first analysis for `config`.
    ///
    /// Starts on the default delivery at the batsman's own aggression.
    pub fn new(
        config: FieldConfig,
        catalog: Arc<ShotCatalog>,
        batsman: Arc<BatsmanProfile>,
    ) -> Result<Self> {
        config.validate()?;
        batsman.validate()?;

        let engine = config.coverage_engine()?;
        let grid = FieldSegmenter::segment(&config.geometry)?;
        let covered = engine.compute(grid.segments(), &config.fielders);
        let delivery = Delivery::default();
        let aggression = batsman.in_game_traits.aggression;
        let analysis = ShotAnalyzer::new(&catalog, &batsman)
            .with_weak_area_threshold(config.weak_area_threshold)
            .analyze(&covered, delivery, aggression);

        info!(
            segments = covered.len(),
            fielders = config.fielders.len(),
            catalog = catalog.len(),
            "field session started"
        );

        Ok(Self { config, catalog, batsman, engine, grid, covered, delivery, aggression, analysis })
    }

    /// Default field, canonical catalog and sample batsman.
    pub fn with_defaults() -> Result<Self> {
        Self::new(
            FieldConfig::default(),
            Arc::new(ShotCatalog::standard().clone()),
            Arc::new(BatsmanProfile::sample().clone()),
        )
    }

    // ---- events ----

    pub fn commit_delivery(&mut self, delivery: Delivery) -> &ShotAnalysis {
        debug!(%delivery, "delivery committed");
        self.delivery = delivery;
        self.reanalyze()
    }

    pub fn set_aggression(&mut self, aggression: Aggression) -> &ShotAnalysis {
        debug!(%aggression, "aggression changed");
        self.aggression = aggression;
        self.reanalyze()
    }

    /// Drops fielder `index` at `position` (end of a drag).
    pub fn place_fielder(&mut self, index: usize, position: Point) -> Result<&ShotAnalysis> {
        let count = self.config.fielders.len();
        if index >= count {
            return Err(ShotMapError::FielderOutOfRange { index, count });
        }
        if !position.is_finite() {
            return Err(ShotMapError::NonFiniteCoordinate("fielder position"));
        }
        debug!(index, x = position.x, y = position.y, "fielder placed");
        self.config.fielders[index] = position;
        Ok(self.recompute_coverage())
    }

    /// Replaces the whole fielder layout.
    pub fn set_fielders(&mut self, fielders: Vec<Point>) -> Result<&ShotAnalysis> {
        if fielders.iter().any(|p| !p.is_finite()) {
            return Err(ShotMapError::NonFiniteCoordinate("fielder position"));
        }
        self.config.fielders = fielders;
        Ok(self.recompute_coverage())
    }

    pub fn set_fielder_range(&mut self, base_range: f64) -> Result<&ShotAnalysis> {
        self.engine = CoverageEngine::new(self.config.geometry.batsman, base_range)?
            .with_keeper_baseline(self.config.keeper_baseline);
        self.config.fielder_range = base_range;
        Ok(self.recompute_coverage())
    }

    /// Re-segments the field. The only event that rebuilds polygons.
    pub fn reconfigure_field(&mut self, geometry: FieldGeometry) -> Result<&ShotAnalysis> {
        let grid = FieldSegmenter::segment(&geometry)?;
        self.engine = CoverageEngine::new(geometry.batsman, self.config.fielder_range)?
            .with_keeper_baseline(self.config.keeper_baseline);
        info!(wedges = geometry.wedges, zones = geometry.zones, "field re-segmented");
        self.grid = grid;
        self.config.geometry = geometry;
        Ok(self.recompute_coverage())
    }

    // ---- queries ----

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ShotCatalog {
        &self.catalog
    }

    pub fn batsman(&self) -> &BatsmanProfile {
        &self.batsman
    }

    pub fn grid(&self) -> &FieldGrid {
        &self.grid
    }

    /// Segments carrying current coverage.
    pub fn segments(&self) -> &[Segment] {
        &self.covered
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.grid.index_of(id).map(|i| &self.covered[i])
    }

    pub fn segments_in_wedge(&self, wedge: usize) -> impl Iterator<Item = &Segment> + '_ {
        self.covered.iter().filter(move |s| s.id().wedge == wedge)
    }

    pub fn fielders(&self) -> &[Point] {
        &self.config.fielders
    }

    pub fn delivery(&self) -> Delivery {
        self.delivery
    }

    pub fn aggression(&self) -> Aggression {
        self.aggression
    }

    pub fn analysis(&self) -> &ShotAnalysis {
        &self.analysis
    }

    /// Effective pickup radius of each fielder, in fielder order.
    pub fn pickup_radii(&self) -> Vec<f64> {
        self.config.fielders.iter().map(|&f| self.engine.pickup_radius(f)).collect()
    }

    /// Nearest fielder strictly within `grab_radius` of `point`.
    pub fn fielder_near(&self, point: Point, grab_radius: f64) -> Option<usize> {
        self.config
            .fielders
            .iter()
            .enumerate()
            .map(|(i, f)| (i, f.distance_to(point)))
            .filter(|&(_, d)| d < grab_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    // ---- pipeline ----

    fn recompute_coverage(&mut self) -> &ShotAnalysis {
        self.covered = self.engine.compute(self.grid.segments(), &self.config.fielders);
        self.reanalyze()
    }

    fn reanalyze(&mut self) -> &ShotAnalysis {
        self.analysis = ShotAnalyzer::new(&self.catalog, &self.batsman)
            .with_weak_area_threshold(self.config.weak_area_threshold)
            .analyze(&self.covered, self.delivery, self.aggression);
        &self.analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Sentinel;

    fn empty_session() -> FieldSession {
        FieldSession::new(
            FieldConfig::without_fielders(),
            Arc::new(ShotCatalog::standard().clone()),
            Arc::new(BatsmanProfile::uniform(80).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn test_default_session() {
        let session = FieldSession::with_defaults().unwrap();
        assert_eq!(session.segments().len(), 126);
        assert_eq!(session.fielders().len(), 10);
        assert_eq!(session.delivery(), Delivery::new(4, 5));
        assert_eq!(session.aggression(), Aggression::Neutral);
        assert!(session.analysis().has_candidates());
        assert!((session.analysis().distribution.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_commit_delivery_reanalyzes() {
        let mut session = empty_session();
        let analysis = session.commit_delivery(Delivery::new(7, 7));
        assert!(!analysis.has_candidates());
        assert_eq!(analysis.distribution.get(Sentinel::LegByes), Some(0.0));

        session.commit_delivery(Delivery::new(4, 4));
        assert_eq!(session.analysis().delivery, Delivery::new(4, 4));
        assert!(session.analysis().has_candidates());
    }

    #[test]
    fn test_set_aggression_keeps_coverage() {
        let mut session = empty_session();
        let before = session.segments().to_vec();
        session.set_aggression(Aggression::VeryDefensive);
        assert_eq!(session.analysis().aggression, Aggression::VeryDefensive);
        assert_eq!(session.segments(), before.as_slice());
    }

    #[test]
    fn test_place_fielder_updates_coverage() {
        let mut session = FieldSession::new(
            FieldConfig { fielders: vec![Point::new(0.0, 0.0)], ..FieldConfig::default() },
            Arc::new(ShotCatalog::standard().clone()),
            Arc::new(BatsmanProfile::sample().clone()),
        )
        .unwrap();
        let target = SegmentId::new(9, 5);
        assert_eq!(session.segment(target).unwrap().coverage(), 0);

        let spot = session.grid().segment(target).unwrap().polygon().centroid();
        session.place_fielder(0, spot).unwrap();
        assert_eq!(session.fielders()[0], spot);
        assert!(session.segment(target).unwrap().coverage() >= 1);
        assert_eq!(session.segments().len(), 126);
    }

    #[test]
    fn test_place_fielder_rejects_bad_input() {
        let mut session = FieldSession::with_defaults().unwrap();
        assert!(matches!(
            session.place_fielder(10, Point::new(1.0, 1.0)),
            Err(ShotMapError::FielderOutOfRange { index: 10, count: 10 })
        ));
        assert!(session.place_fielder(0, Point::new(f64::INFINITY, 1.0)).is_err());
        assert_eq!(session.fielders()[0], Point::new(700.0, 300.0));
    }

    #[test]
    fn test_set_fielders_and_range() {
        let mut session = empty_session();
        let batsman = session.config().geometry.batsman;
        session.set_fielders(vec![batsman]).unwrap();
        assert_eq!(session.pickup_radii(), vec![10.0]);

        session.set_fielder_range(30.0).unwrap();
        assert_eq!(session.pickup_radii(), vec![30.0]);
        assert!(session.set_fielder_range(-1.0).is_err());
        assert_eq!(session.config().fielder_range, 30.0);
    }

    #[test]
    fn test_reconfigure_field() {
        let mut session = empty_session();
        let geometry = FieldGeometry { wedges: 12, zones: 5, ..FieldGeometry::default() };
        session.reconfigure_field(geometry.clone()).unwrap();
        assert_eq!(session.segments().len(), 60);
        assert_eq!(session.grid().spokes().len(), 12);
        assert_eq!(session.config().geometry, geometry);

        let bad = FieldGeometry { radius_y: 0.0, ..FieldGeometry::default() };
        assert!(session.reconfigure_field(bad).is_err());
        assert_eq!(session.segments().len(), 60);
    }

    #[test]
    fn test_overlay_queries() {
        let session = FieldSession::with_defaults().unwrap();
        assert_eq!(session.fielder_near(Point::new(703.0, 301.0), DEFAULT_GRAB_RADIUS), Some(0));
        assert_eq!(session.fielder_near(Point::new(0.0, 0.0), DEFAULT_GRAB_RADIUS), None);
        // slips are 15 apart; the closer one wins
        assert_eq!(session.fielder_near(Point::new(668.0, 292.0), DEFAULT_GRAB_RADIUS), Some(5));

        let wedge: Vec<_> = session.segments_in_wedge(4).collect();
        assert_eq!(wedge.len(), 7);
        assert!(wedge.iter().all(|s| s.id().wedge == 4));
        assert!(wedge[0].coverage() >= 1);

        let radii = session.pickup_radii();
        assert_eq!(radii.len(), 10);
        assert!(radii.iter().all(|&r| r >= 10.0));
    }
}
