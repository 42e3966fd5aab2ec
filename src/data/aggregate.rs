use std::collections::BTreeMap;

use super::model::{LaunchTable, Outcome, SiteChoice};

// ---------------------------------------------------------------------------
// Pie series: success distribution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieSeries {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieSeries {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Success counts for the pie chart.
///
/// * [`SiteChoice::All`] – successful launches grouped by site. Sites without
///   a single success produce no slice.
/// * A specific site – that site's launches grouped into "Success" / "Failed".
///   An outcome that never occurs produces no slice.
pub fn success_distribution(table: &LaunchTable, site: &SiteChoice) -> PieSeries {
    match site {
        SiteChoice::All => {
            let mut by_site: BTreeMap<&str, usize> = BTreeMap::new();
            for record in table.records() {
                if record.outcome == Outcome::Success {
                    *by_site.entry(record.site.as_str()).or_default() += 1;
                }
            }
            PieSeries {
                title: "Total Success Launches for All Sites".to_string(),
                slices: by_site
                    .into_iter()
                    .map(|(label, count)| PieSlice {
                        label: label.to_string(),
                        count,
                    })
                    .collect(),
            }
        }
        SiteChoice::Site(selected) => {
            let mut by_outcome: BTreeMap<Outcome, usize> = BTreeMap::new();
            for record in table.records().iter().filter(|r| r.site == *selected) {
                *by_outcome.entry(record.outcome).or_default() += 1;
            }
            PieSeries {
                title: format!("Success vs Failed Launches ({selected})"),
                // Success before Failed.
                slices: by_outcome
                    .into_iter()
                    .rev()
                    .map(|(outcome, count)| PieSlice {
                        label: outcome.label().to_string(),
                        count,
                    })
                    .collect(),
            }
        }
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

    fn slice(label: &str, count: usize) -> PieSlice {
        PieSlice {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn all_sites_counts_successes_per_site() {
        let pie = success_distribution(&scenario_table(), &SiteChoice::All);
        assert_eq!(pie.title, "Total Success Launches for All Sites");
        assert_eq!(pie.slices, vec![slice("CCAFS", 1), slice("KSC", 1)]);
    }

    #[test]
    fn single_site_splits_success_and_failure() {
        let pie = success_distribution(&scenario_table(), &SiteChoice::Site("KSC".into()));
        assert_eq!(pie.title, "Success vs Failed Launches (KSC)");
        assert_eq!(pie.slices, vec![slice("Success", 1), slice("Failed", 1)]);
    }

    #[test]
    fn zero_count_categories_are_omitted() {
        let table = LaunchTable::from_records(vec![
            LaunchRecord::new("VAFB", None, Outcome::Failure),
            LaunchRecord::new("VAFB", Some(100.0), Outcome::Failure),
            LaunchRecord::new("KSC", Some(100.0), Outcome::Success),
        ]);
        let all = success_distribution(&table, &SiteChoice::All);
        assert_eq!(all.slices, vec![slice("KSC", 1)]);

        let vafb = success_distribution(&table, &SiteChoice::Site("VAFB".into()));
        assert_eq!(vafb.slices, vec![slice("Failed", 2)]);
    }

    #[test]
    fn empty_inputs_yield_empty_pie() {
        assert!(success_distribution(&LaunchTable::default(), &SiteChoice::All).is_empty());
        let unknown = success_distribution(&scenario_table(), &SiteChoice::Site("Mars".into()));
        assert!(unknown.is_empty());
        assert_eq!(unknown.title, "Success vs Failed Launches (Mars)");
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
        fn all_sites_total_matches_success_count(table in arb_table()) {
            let pie = success_distribution(&table, &SiteChoice::All);
            let successes = table.records().iter().filter(|r| r.outcome == Outcome::Success).count();
            prop_assert_eq!(pie.total(), successes);
            prop_assert!(pie.slices.iter().all(|s| s.count > 0));
        }

        #[test]
        fn site_total_matches_site_rows(
            table in arb_table(),
            site in prop::sample::select(vec!["KSC", "CCAFS", "VAFB"]),
        ) {
            let pie = success_distribution(&table, &SiteChoice::Site(site.to_string()));
            let rows = table.records().iter().filter(|r| r.site == site).count();
            prop_assert_eq!(pie.total(), rows);
            prop_assert!(pie.slices.len() <= 2);
        }

        #[test]
        fn distribution_is_idempotent(table in arb_table()) {
            prop_assert_eq!(
                success_distribution(&table, &SiteChoice::All),
                success_distribution(&table, &SiteChoice::All)
            );
        }
    }
}
