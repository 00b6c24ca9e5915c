use std::collections::{BTreeMap, HashMap};

use super::filter::FilteredView;
use super::model::{COL_VALUE, COL_YEAR};

/// Default divisor for [`normalize`]: report totals in thousands.
pub const DEFAULT_NORMALIZE_FACTOR: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Summary of one numeric column.
///
/// Missing values are not counted. With no observations `count` is 0 and every
/// other field is `NaN`; `std` is the sample deviation and needs two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnStats {
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                q50: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        };

        Self {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            q50: quantile(&sorted, 0.50),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        }
    }

    /// Rows of the statistics table: label → value.
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.q50),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }
}

/// Linear interpolation between the closest ranks of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Statistics for every numeric column of a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub year: ColumnStats,
    pub value: ColumnStats,
}

impl Statistics {
    pub fn columns(&self) -> [(&'static str, &ColumnStats); 2] {
        [(COL_YEAR, &self.year), (COL_VALUE, &self.value)]
    }
}

/// Count, mean, std, min, quartiles and max of `Year` and `Value`.
pub fn describe(view: &FilteredView<'_>) -> Statistics {
    Statistics {
        year: ColumnStats::from_values(view.iter().map(|r| r.year as f64)),
        value: ColumnStats::from_values(view.iter().map(|r| r.value)),
    }
}

// ---------------------------------------------------------------------------
// Area totals
// ---------------------------------------------------------------------------

/// Area → summed value, in order of each area's first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaTotals {
    entries: Vec<(String, f64)>,
}

impl AreaTotals {
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn get(&self, area: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(a, _)| a == area)
            .map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Order-insensitive view, mostly for comparisons.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.entries.iter().cloned().collect()
    }
}

impl FromIterator<(String, f64)> for AreaTotals {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Group records by area and sum their values. Missing values add nothing.
pub fn sum_by_area<'a, I>(records: I) -> AreaTotals
where
    I: IntoIterator<Item = &'a super::model::Record>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(String, f64)> = Vec::new();

    for record in records {
        let slot = *index.entry(record.area.as_str()).or_insert_with(|| {
            entries.push((record.area.clone(), 0.0));
            entries.len() - 1
        });
        if !record.value.is_nan() {
            entries[slot].1 += record.value;
        }
    }

    AreaTotals { entries }
}

/// Divide every total by `factor`.
pub fn normalize(totals: &AreaTotals, factor: f64) -> AreaTotals {
    totals
        .entries
        .iter()
        .map(|(area, v)| (area.clone(), v / factor))
        .collect()
}

// ---------------------------------------------------------------------------
// Per-year means (bar and line charts)
// ---------------------------------------------------------------------------

/// Mean value per year, ascending by year. Years without any value are left out.
pub fn mean_by_year(view: &FilteredView<'_>) -> Vec<(i64, f64)> {
    let mut acc: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
    for record in view.iter().filter(|r| !r.value.is_nan()) {
        let slot = acc.entry(record.year).or_insert((0.0, 0));
        slot.0 += record.value;
        slot.1 += 1;
    }
    acc.into_iter()
        .map(|(year, (sum, n))| (year, sum / n as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Record, EXPORT_VALUE, IMPORT_VALUE};

    fn view_of(records: &[Record]) -> FilteredView<'_> {
        FilteredView {
            records: records.iter().collect(),
        }
    }

    fn area_rows() -> Vec<Record> {
        vec![
            Record::new(2020, "Agriculture", "EU", IMPORT_VALUE, 100.0),
            Record::new(2021, "Agriculture", "EU", EXPORT_VALUE, 50.0),
            Record::new(2020, "Agriculture", "US", IMPORT_VALUE, 10.0),
        ]
    }

    #[test]
    fn test_sum_by_area_scenario() {
        let totals = sum_by_area(&area_rows());
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("EU"), Some(150.0));
        assert_eq!(totals.get("US"), Some(10.0));
        assert_eq!(totals.entries()[0].0, "EU");
    }

    #[test]
    fn test_sum_by_area_is_order_independent() {
        let rows = area_rows();
        let forward = sum_by_area(&rows);
        let reversed = sum_by_area(rows.iter().rev());
        assert_eq!(forward.to_map(), reversed.to_map());
        // First-occurrence order follows the input.
        assert_eq!(reversed.entries()[0].0, "US");
    }

    #[test]
    fn test_sum_by_area_skips_missing_values() {
        let rows = vec![
            Record::new(2020, "A", "EU", IMPORT_VALUE, f64::NAN),
            Record::new(2020, "A", "EU", IMPORT_VALUE, 5.0),
            Record::new(2020, "A", "US", IMPORT_VALUE, f64::NAN),
        ];
        let totals = sum_by_area(&rows);
        assert_eq!(totals.get("EU"), Some(5.0));
        assert_eq!(totals.get("US"), Some(0.0));
    }

    #[test]
    fn test_normalize_scenario() {
        let totals: AreaTotals = [("EU".to_string(), 1000.0)].into_iter().collect();
        let normalized = normalize(&totals, DEFAULT_NORMALIZE_FACTOR);
        assert_eq!(normalized.get("EU"), Some(1.0));
    }

    #[test]
    fn test_normalize_round_trip() {
        let totals = sum_by_area(&area_rows());
        for factor in [1000.0, 3.0, 0.125, 7.5e6] {
            let restored: AreaTotals = normalize(&totals, factor)
                .entries()
                .iter()
                .map(|(a, v)| (a.clone(), v * factor))
                .collect();
            for ((a, orig), (b, back)) in totals.entries().iter().zip(restored.entries()) {
                assert_eq!(a, b);
                assert!((orig - back).abs() <= 1e-9 * orig.abs().max(1.0));
            }
        }
    }

    #[test]
    fn test_describe_known_values() {
        let rows: Vec<Record> = [1.0, 2.0, 3.0, 4.0]
            .into_iter()
            .enumerate()
            .map(|(i, v)| Record::new(2020 + i as i64, "A", "EU", IMPORT_VALUE, v))
            .collect();
        let stats = describe(&view_of(&rows));

        let v = stats.value;
        assert_eq!(v.count, 4);
        assert_eq!(v.mean, 2.5);
        assert!((v.std - 1.2909944487358056).abs() < 1e-12);
        assert_eq!(v.min, 1.0);
        assert_eq!(v.q25, 1.75);
        assert_eq!(v.q50, 2.5);
        assert_eq!(v.q75, 3.25);
        assert_eq!(v.max, 4.0);

        assert_eq!(stats.year.min, 2020.0);
        assert_eq!(stats.year.max, 2023.0);
    }

    #[test]
    fn test_describe_empty_view_is_all_nan() {
        let stats = describe(&FilteredView::default());
        for (_, col) in stats.columns() {
            assert_eq!(col.count, 0);
            for (label, value) in col.rows().into_iter().skip(1) {
                assert!(value.is_nan(), "{label} should be NaN");
            }
        }
    }

    #[test]
    fn test_describe_single_row_has_undefined_std() {
        let rows = vec![Record::new(2020, "A", "EU", IMPORT_VALUE, 42.0)];
        let stats = describe(&view_of(&rows));
        assert_eq!(stats.value.count, 1);
        assert_eq!(stats.value.mean, 42.0);
        assert!(stats.value.std.is_nan());
        assert_eq!(stats.value.q75, 42.0);
    }

    #[test]
    fn test_describe_ignores_missing_values() {
        let rows = vec![
            Record::new(2020, "A", "EU", IMPORT_VALUE, f64::NAN),
            Record::new(2021, "A", "EU", IMPORT_VALUE, 10.0),
        ];
        let stats = describe(&view_of(&rows));
        assert_eq!(stats.value.count, 1);
        assert_eq!(stats.year.count, 2);
    }

    #[test]
    fn test_mean_by_year_sorted() {
        let rows = vec![
            Record::new(2021, "A", "EU", IMPORT_VALUE, 10.0),
            Record::new(2020, "A", "EU", IMPORT_VALUE, 4.0),
            Record::new(2021, "A", "US", IMPORT_VALUE, 20.0),
            Record::new(2019, "A", "US", IMPORT_VALUE, f64::NAN),
        ];
        assert_eq!(
            mean_by_year(&view_of(&rows)),
            vec![(2020, 4.0), (2021, 15.0)]
        );
    }
}
