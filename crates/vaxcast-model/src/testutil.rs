//! Shared record builders for unit tests.

use std::collections::BTreeMap;

use crate::dataset::{AttributeValue, Dataset, Record, RegionId};

/// Build a full vaccination-schema record.
pub fn full_record(
    id: &str,
    pop: f64,
    over65: f64,
    income: f64,
    college: f64,
    svi: &str,
    label: f64,
) -> (RegionId, Record) {
    let mut values = BTreeMap::new();
    values.insert("Population-Density".to_string(), AttributeValue::Continuous(pop));
    values.insert("Percent-Over-65".to_string(), AttributeValue::Continuous(over65));
    values.insert("Income".to_string(), AttributeValue::Continuous(income));
    values.insert(
        "Percent-Attend-College".to_string(),
        AttributeValue::Continuous(college),
    );
    values.insert(
        "Social Vulnerability Index".to_string(),
        AttributeValue::Categorical(svi.to_string()),
    );
    (RegionId::new(id), Record::new(values, label))
}

/// Build a record varying only population density and SVI token.
///
/// The other continuous values sit exactly midway between the class
/// means of [`two_county_training_set`], so against models fitted from
/// that set they tie and only density and SVI carry evidence.
pub fn record(id: &str, pop: f64, svi: &str, label: f64) -> (RegionId, Record) {
    full_record(id, pop, 15.0, 45_000.0, 25.0, svi, label)
}

/// Two counties straddling the default 55.0 threshold: county1 (label
/// 70) lands high, county2 (label 40) lands low.
pub fn two_county_training_set() -> Dataset {
    Dataset::from_records(vec![
        full_record("county1", 100.0, 20.0, 50_000.0, 30.0, "A", 70.0),
        full_record("county2", 200.0, 10.0, 40_000.0, 20.0, "B", 40.0),
    ])
}
