use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};
use tracing::warn;

use crate::{helpers::timestamp_to_day, types::BirdeyePriceItem};

/// Daily prices keyed by calendar day. Days without a price are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries(BTreeMap<NaiveDate, f64>);

impl PriceSeries {
    pub fn new() -> Self {
        PriceSeries::default()
    }

    /// Later entries for the same day overwrite earlier ones.
    pub fn insert(&mut self, day: NaiveDate, price: f64) {
        self.0.insert(day, price);
    }

    pub fn get(&self, day: &NaiveDate) -> Option<f64> {
        self.0.get(day).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries whose timestamp cannot be mapped to a day are dropped; the
    /// remaining days are kept.
    pub fn from_items<Tz: TimeZone>(
        items: &[BirdeyePriceItem],
        tz: &Tz,
    ) -> Self {
        let mut series = PriceSeries::new();
        for item in items {
            match timestamp_to_day(item.unix_time, tz) {
                Ok(day) => series.insert(day, item.value),
                Err(e) => warn!("dropping price entry: {}", e),
            }
        }
        series
    }
}

impl FromIterator<(NaiveDate, f64)> for PriceSeries {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, f64)>>(iter: T) -> Self {
        PriceSeries(iter.into_iter().collect())
    }
}
