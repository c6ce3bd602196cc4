use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dataset::Dataset;
use crate::metrics::AggregateMetrics;
use crate::pickers::{PickerStats, compute_picker_stats};
use crate::record::ShipmentRecord;

/// Everything one dashboard view shows, derived from a [`Dataset`].
///
/// Built fresh for every view; the records are borrowed, never copied or
/// modified.
#[derive(Debug, Serialize)]
pub struct Dashboard<'a> {
    pub generated_at: DateTime<Utc>,
    pub metrics: AggregateMetrics,
    pub pickers: Vec<PickerStats>,
    pub records: &'a [ShipmentRecord],
}

impl<'a> Dashboard<'a> {
    pub fn build(dataset: &'a Dataset) -> Self {
        let records = dataset.records();

        Dashboard {
            generated_at: Utc::now(),
            metrics: AggregateMetrics::from_records(records),
            pickers: compute_picker_stats(records),
            records,
        }
    }

    /// The picker ranked first, if any picker is present.
    pub fn top_performer(&self) -> Option<&PickerStats> {
        self.pickers.first()
    }
}
