//! Domain types for classification datasets.

use std::collections::BTreeMap;

/// A geographic region identifier (a FIPS code in practice).
///
/// Wraps a non-empty string key from the input dataset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(String);

impl RegionId {
    /// Create a new region ID from a non-empty string.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        debug_assert!(!id.is_empty(), "region ID must not be empty");
        Self(id)
    }

    /// Return the region ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One observed attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// A numeric observation for a continuous attribute.
    Continuous(f64),
    /// A string token for a categorical attribute.
    Categorical(String),
}

/// One region's observations: attribute name to value, plus the numeric
/// label (vaccination rate). Records are immutable; predictions are a
/// separate output value, never written back into the record.
#[derive(Debug, Clone)]
pub struct Record {
    values: BTreeMap<String, AttributeValue>,
    label: f64,
}

impl Record {
    /// Create a record from its attribute values and label.
    #[must_use]
    pub fn new(values: BTreeMap<String, AttributeValue>, label: f64) -> Self {
        Self { values, label }
    }

    /// Return the value for an attribute, if present.
    #[must_use]
    pub fn value(&self, attribute: &str) -> Option<&AttributeValue> {
        self.values.get(attribute)
    }

    /// Return the numeric label.
    #[must_use]
    pub fn label(&self) -> f64 {
        self.label
    }
}

/// An ordered mapping from region ID to record.
///
/// Two independent instances exist per run: the training set and the
/// test set. `BTreeMap` keeps iteration deterministic.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: BTreeMap<RegionId, Record>,
}

impl Dataset {
    /// Build a dataset from (region, record) pairs. A repeated region ID
    /// keeps the last record, matching JSON object semantics.
    pub fn from_records(records: impl IntoIterator<Item = (RegionId, Record)>) -> Self {
        Self { records: records.into_iter().collect() }
    }

    /// Return the record for a region, if present.
    #[must_use]
    pub fn get(&self, region: &RegionId) -> Option<&Record> {
        self.records.get(region)
    }

    /// Iterate records in region-ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&RegionId, &Record)> {
        self.records.iter()
    }

    /// Return the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return `true` when the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_id_as_str_returns_inner() {
        let id = RegionId::new("06037");
        assert_eq!(id.as_str(), "06037");
    }

    #[test]
    fn record_lookup() {
        let mut values = BTreeMap::new();
        values.insert("Income".to_string(), AttributeValue::Continuous(50_000.0));
        let record = Record::new(values, 70.0);
        assert_eq!(
            record.value("Income"),
            Some(&AttributeValue::Continuous(50_000.0))
        );
        assert!(record.value("absent").is_none());
        assert!((record.label() - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn dataset_iterates_in_region_order() {
        let dataset = Dataset::from_records(vec![
            (RegionId::new("b"), Record::new(BTreeMap::new(), 1.0)),
            (RegionId::new("a"), Record::new(BTreeMap::new(), 2.0)),
        ]);
        let ids: Vec<_> = dataset.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(dataset.len(), 2);
    }
}
