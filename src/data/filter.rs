use super::model::{LaunchTable, Outcome, PayloadRange, SiteChoice};

// ---------------------------------------------------------------------------
// Scatter series: payload mass vs. outcome
// ---------------------------------------------------------------------------

/// One surviving launch in the payload scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Index of the source record in the [`LaunchTable`].
    pub row: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Launches whose payload lies in `range` (inclusive) and, unless `site` is
/// [`SiteChoice::All`], that launched from `site`.
///
/// Records without a payload mass never pass the range test.
pub fn filtered_scatter_series(
    table: &LaunchTable,
    site: &SiteChoice,
    range: PayloadRange,
) -> ScatterSeries {
    let points = table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| range.contains(r.payload_mass_kg) && site.matches(&r.site))
        .filter_map(|(row, r)| {
            r.payload_mass_kg.map(|payload_mass_kg| ScatterPoint {
                payload_mass_kg,
                outcome: r.outcome,
                row,
            })
        })
        .collect();

    ScatterSeries {
        title: format!("Success vs Payload for {site}"),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;
    use proptest::prelude::*;

    fn scenario_table() -> LaunchTable {
        LaunchTable::from_records(vec![
            LaunchRecord::new("KSC", Some(5000.0), Outcome::Success),
            LaunchRecord::new("KSC", Some(3000.0), Outcome::Failure),
            LaunchRecord::new("CCAFS", Some(2000.0), Outcome::Success),
        ])
    }

    fn pairs(series: &ScatterSeries) -> Vec<(f64, Outcome)> {
        series
            .points
            .iter()
            .map(|p| (p.payload_mass_kg, p.outcome))
            .collect()
    }

    fn range(min: f64, max: f64) -> PayloadRange {
        PayloadRange::new(min, max).unwrap()
    }

    #[test]
    fn all_sites_within_range() {
        let series = filtered_scatter_series(&scenario_table(), &SiteChoice::All, range(0.0, 4000.0));
        assert_eq!(series.title, "Success vs Payload for All Sites");
        assert_eq!(
            pairs(&series),
            vec![(3000.0, Outcome::Failure), (2000.0, Outcome::Success)]
        );
        assert_eq!(series.points[0].row, 1);
    }

    #[test]
    fn site_with_no_point_in_range_is_empty() {
        let site = SiteChoice::Site("CCAFS".into());
        let series = filtered_scatter_series(&scenario_table(), &site, range(3000.0, 10000.0));
        assert!(series.is_empty());
        assert_eq!(series.title, "Success vs Payload for CCAFS");
    }

    #[test]
    fn degenerate_range_keeps_exact_matches_only() {
        let series = filtered_scatter_series(&scenario_table(), &SiteChoice::All, range(2000.0, 2000.0));
        assert_eq!(pairs(&series), vec![(2000.0, Outcome::Success)]);
    }

    #[test]
    fn absent_payload_is_excluded() {
        let table = LaunchTable::from_records(vec![
            LaunchRecord::new("KSC", None, Outcome::Success),
            LaunchRecord::new("KSC", Some(0.0), Outcome::Failure),
        ]);
        let series = filtered_scatter_series(&table, &SiteChoice::All, range(0.0, 1.0e6));
        assert_eq!(pairs(&series), vec![(0.0, Outcome::Failure)]);
    }

    #[test]
    fn unknown_site_and_empty_table_yield_nothing() {
        let unknown = SiteChoice::Site("Boca Chica".into());
        assert!(filtered_scatter_series(&scenario_table(), &unknown, range(0.0, 1.0e6)).is_empty());
        assert!(filtered_scatter_series(&LaunchTable::default(), &SiteChoice::All, range(0.0, 1.0e6)).is_empty());
    }

    fn arb_table() -> impl Strategy<Value = LaunchTable> {
        let record = (
            prop::sample::select(vec!["KSC", "CCAFS", "VAFB"]),
            prop::option::of(0.0..10000.0f64),
            any::<bool>(),
        )
            .prop_map(|(site, kg, ok)| {
                let outcome = if ok { Outcome::Success } else { Outcome::Failure };
                LaunchRecord::new(site, kg, outcome)
            });
        prop::collection::vec(record, 0..40).prop_map(LaunchTable::from_records)
    }

    proptest! {
        #[test]
        fn narrowing_range_never_adds_points(
            table in arb_table(),
            lo in 0.0..5000.0f64,
            width in 0.0..5000.0f64,
            shrink_lo in 0.0..1.0f64,
            shrink_hi in 0.0..1.0f64,
        ) {
            let hi = lo + width;
            let inner_lo = lo + width * shrink_lo * 0.5;
            let inner_hi = hi - width * shrink_hi * 0.5;
            let wide = filtered_scatter_series(&table, &SiteChoice::All, range(lo, hi));
            let narrow = filtered_scatter_series(&table, &SiteChoice::All, range(inner_lo, inner_hi));
            prop_assert!(narrow.points.len() <= wide.points.len());
        }

        #[test]
        fn scatter_is_idempotent(table in arb_table(), lo in 0.0..10000.0f64) {
            let site = SiteChoice::Site("KSC".into());
            let r = range(lo, 10000.0);
            prop_assert_eq!(
                filtered_scatter_series(&table, &site, r),
                filtered_scatter_series(&table, &site, r)
            );
        }
    }
}
