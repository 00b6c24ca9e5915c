use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COL_YEAR: &str = "Year";
pub const COL_DOMAIN: &str = "Domain";
pub const COL_AREA: &str = "Area";
pub const COL_ELEMENT: &str = "Element";
pub const COL_VALUE: &str = "Value";

/// Columns every input table must carry, spelled exactly like this.
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_YEAR, COL_DOMAIN, COL_AREA, COL_ELEMENT, COL_VALUE];

pub const IMPORT_VALUE: &str = "Import Value";
pub const EXPORT_VALUE: &str = "Export Value";

// ---------------------------------------------------------------------------
// Record – one row of a trade table
// ---------------------------------------------------------------------------

/// A single import/export observation.
///
/// `value` is `NaN` when the source cell was empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub year: i64,
    pub domain: String,
    pub area: String,
    pub element: String,
    pub value: f64,
}

impl Record {
    pub fn new(year: i64, domain: &str, area: &str, element: &str, value: f64) -> Self {
        Self {
            year,
            domain: domain.to_string(),
            area: area.to_string(),
            element: element.to_string(),
            value,
        }
    }

    /// True for rows that carry an import or export value.
    pub fn is_trade_value(&self) -> bool {
        self.element == IMPORT_VALUE || self.element == EXPORT_VALUE
    }
}

// ---------------------------------------------------------------------------
// DatasetKind
// ---------------------------------------------------------------------------

/// Which of the two dashboard tables a dataset feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Ireland,
    World,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Ireland, DatasetKind::World];
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Ireland => write!(f, "Ireland"),
            DatasetKind::World => write!(f, "World"),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// An immutable loaded table plus the distinct values offered by the filters.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub kind: DatasetKind,
    /// File the records were read from (empty for in-memory tables).
    pub source: PathBuf,
    pub records: Vec<Record>,
    /// Distinct years in first-occurrence order.
    pub years: Vec<i64>,
    /// Distinct domains in first-occurrence order.
    pub domains: Vec<String>,
    /// Distinct areas in first-occurrence order.
    pub areas: Vec<String>,
}

impl Dataset {
    /// Build the distinct-value indices from the loaded records.
    pub fn from_records(kind: DatasetKind, source: PathBuf, records: Vec<Record>) -> Self {
        let years = unique_in_order(records.iter().map(|r| r.year));
        let domains = unique_in_order(records.iter().map(|r| r.domain.clone()));
        let areas = unique_in_order(records.iter().map(|r| r.area.clone()));
        Dataset {
            kind,
            source,
            records,
            years,
            domains,
            areas,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn unique_in_order<T, I>(values: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_values_keep_first_occurrence_order() {
        let ds = Dataset::from_records(
            DatasetKind::World,
            PathBuf::new(),
            vec![
                Record::new(2021, "Crops", "US", IMPORT_VALUE, 1.0),
                Record::new(2020, "Agriculture", "EU", EXPORT_VALUE, 2.0),
                Record::new(2021, "Crops", "EU", IMPORT_VALUE, 3.0),
            ],
        );
        assert_eq!(ds.years, vec![2021, 2020]);
        assert_eq!(ds.domains, vec!["Crops", "Agriculture"]);
        assert_eq!(ds.areas, vec!["US", "EU"]);
        assert_eq!(ds.len(), 3);
        assert!(!ds.is_empty());
    }

    #[test]
    fn test_empty_dataset_has_no_options() {
        let ds = Dataset::from_records(DatasetKind::Ireland, PathBuf::new(), Vec::new());
        assert!(ds.is_empty());
        assert!(ds.years.is_empty() && ds.domains.is_empty() && ds.areas.is_empty());
    }

    #[test]
    fn test_trade_value_elements() {
        assert!(Record::new(2020, "A", "EU", IMPORT_VALUE, 1.0).is_trade_value());
        assert!(Record::new(2020, "A", "EU", EXPORT_VALUE, 1.0).is_trade_value());
        assert!(!Record::new(2020, "A", "EU", "Import Quantity", 1.0).is_trade_value());
    }
}
