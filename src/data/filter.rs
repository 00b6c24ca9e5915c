use std::collections::BTreeSet;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Selection: which values are chosen per filter category
// ---------------------------------------------------------------------------

/// The years, domains and areas chosen for one dataset.
///
/// An empty set selects nothing: the view stays empty until the user picks at
/// least one value in every category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub years: BTreeSet<i64>,
    pub domains: BTreeSet<String>,
    pub areas: BTreeSet<String>,
}

impl Selection {
    /// A selection containing every value the dataset offers.
    pub fn all_of(dataset: &Dataset) -> Self {
        Self {
            years: dataset.years.iter().copied().collect(),
            domains: dataset.domains.iter().cloned().collect(),
            areas: dataset.areas.iter().cloned().collect(),
        }
    }

    /// Whether a record passes all three membership tests.
    pub fn matches(&self, record: &Record) -> bool {
        self.years.contains(&record.year)
            && self.domains.contains(&record.domain)
            && self.areas.contains(&record.area)
    }
}

// ---------------------------------------------------------------------------
// FilteredView
// ---------------------------------------------------------------------------

/// Records of a dataset that pass a [`Selection`], in dataset order.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    pub records: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    /// Number of rows in the view.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record matched.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `n` rows (table preview).
    pub fn head(&self, n: usize) -> &[&'a Record] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }
}

/// Return the records of `dataset` passing `selection`, preserving order.
pub fn filter<'a>(dataset: &'a Dataset, selection: &Selection) -> FilteredView<'a> {
    FilteredView {
        records: dataset
            .records
            .iter()
            .filter(|record| selection.matches(record))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{DatasetKind, EXPORT_VALUE, IMPORT_VALUE};
    use std::path::PathBuf;

    fn scenario_dataset() -> Dataset {
        Dataset::from_records(
            DatasetKind::Ireland,
            PathBuf::new(),
            vec![
                Record::new(2020, "Agriculture", "EU", IMPORT_VALUE, 100.0),
                Record::new(2021, "Agriculture", "EU", EXPORT_VALUE, 50.0),
            ],
        )
    }

    fn selection(years: &[i64], domains: &[&str], areas: &[&str]) -> Selection {
        Selection {
            years: years.iter().copied().collect(),
            domains: domains.iter().map(|s| s.to_string()).collect(),
            areas: areas.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn mixed_dataset() -> Dataset {
        let mut records = Vec::new();
        for (i, year) in [2018, 2019, 2020, 2021].into_iter().enumerate() {
            for domain in ["Agriculture", "Crops"] {
                for area in ["EU", "US", "China"] {
                    records.push(Record::new(year, domain, area, IMPORT_VALUE, i as f64));
                }
            }
        }
        Dataset::from_records(DatasetKind::World, PathBuf::new(), records)
    }

    #[test]
    fn test_single_match_scenario() {
        let ds = scenario_dataset();
        let view = filter(&ds, &selection(&[2020], &["Agriculture"], &["EU"]));
        assert_eq!(view.len(), 1);
        assert_eq!(view.records[0], &ds.records[0]);
    }

    #[test]
    fn test_empty_years_yield_empty_view() {
        let ds = scenario_dataset();
        let view = filter(&ds, &selection(&[], &["Agriculture"], &["EU"]));
        assert!(view.is_empty());
    }

    #[test]
    fn test_default_selection_matches_nothing() {
        let ds = mixed_dataset();
        assert!(filter(&ds, &Selection::default()).is_empty());
    }

    #[test]
    fn test_any_empty_category_matches_nothing() {
        let ds = mixed_dataset();
        let full = Selection::all_of(&ds);

        let mut no_domains = full.clone();
        no_domains.domains.clear();
        let mut no_areas = full.clone();
        no_areas.areas.clear();
        let mut no_years = full.clone();
        no_years.years.clear();

        for sel in [no_domains, no_areas, no_years] {
            assert!(filter(&ds, &sel).is_empty());
        }
        assert_eq!(filter(&ds, &full).len(), ds.len());
    }

    #[test]
    fn test_view_is_ordered_subset() {
        let ds = mixed_dataset();
        let view = filter(&ds, &selection(&[2019, 2021], &["Crops"], &["US", "EU"]));
        assert_eq!(view.len(), 4);

        // Every row comes from the dataset, each at most once, in dataset order.
        let positions: Vec<usize> = view
            .iter()
            .map(|r| {
                ds.records
                    .iter()
                    .position(|d| std::ptr::eq(d, r))
                    .expect("row from dataset")
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(view
            .iter()
            .all(|r| r.domain == "Crops" && (r.year == 2019 || r.year == 2021)));
    }

    #[test]
    fn test_unknown_values_match_nothing() {
        let ds = scenario_dataset();
        let view = filter(&ds, &selection(&[1999], &["Fisheries"], &["Mars"]));
        assert!(view.is_empty());
    }

    #[test]
    fn test_head_truncates() {
        let ds = mixed_dataset();
        let view = filter(&ds, &Selection::all_of(&ds));
        assert_eq!(view.head(10).len(), 10);
        assert_eq!(view.head(10)[0], &ds.records[0]);

        let scenario = scenario_dataset();
        let small = filter(&scenario, &Selection::default());
        assert!(small.head(10).is_empty());
    }
}
