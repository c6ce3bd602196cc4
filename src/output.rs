//! Output formatting and persistence for dashboard figures.
//!
//! Supports pretty-printing, JSON serialization, CSV snapshot append and a
//! CSV export of the picker leaderboard.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing::{debug, info};

use crate::metrics::AggregateMetrics;
use crate::pickers::PickerStats;

/// One timestamped row of aggregate metrics, as appended by the
/// `snapshot` command.
#[derive(Debug, Serialize)]
pub struct MetricsSnapshot<'a> {
    pub timestamp: DateTime<Utc>,
    pub source: &'a str,
    pub total_shipments: usize,
    pub completed_pickings: usize,
    pub in_progress_pickings: usize,
    pub arrived_vehicles: usize,
    pub on_the_way_vehicles: usize,
    pub active_pickers: usize,
    pub total_weight: f64,
    pub picked_weight: f64,
    pub remaining_weight: f64,
    pub total_quantity: u64,
    pub picked_quantity: u64,
    pub remaining_quantity: u64,
    pub completion_rate: u32,
    pub weight_completion_rate: u32,
    pub quantity_completion_rate: u32,
    pub unknown_statuses: usize,
}

impl<'a> MetricsSnapshot<'a> {
    pub fn new(source: &'a str, m: &AggregateMetrics) -> Self {
        MetricsSnapshot {
            timestamp: Utc::now(),
            source,
            total_shipments: m.total_shipments,
            completed_pickings: m.completed_pickings,
            in_progress_pickings: m.in_progress_pickings,
            arrived_vehicles: m.arrived_vehicles,
            on_the_way_vehicles: m.on_the_way_vehicles,
            active_pickers: m.active_pickers,
            total_weight: m.total_weight,
            picked_weight: m.picked_weight,
            remaining_weight: m.remaining_weight,
            total_quantity: m.total_quantity,
            picked_quantity: m.picked_quantity,
            remaining_quantity: m.remaining_quantity,
            completion_rate: m.completion_rate,
            weight_completion_rate: m.weight_completion_rate,
            quantity_completion_rate: m.quantity_completion_rate,
            unknown_statuses: m.unknown_statuses,
        }
    }
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl std::fmt::Debug) {
    debug!("{:#?}", value);
}

/// Writes a value to stdout as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Appends a [`MetricsSnapshot`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_snapshot(path: &str, snapshot: &MetricsSnapshot<'_>) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV snapshot");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(snapshot)?;
    writer.flush()?;

    Ok(())
}

/// Writes the picker leaderboard to a CSV file, replacing any existing file.
/// Rows keep leaderboard order.
pub fn write_picker_csv(path: &str, pickers: &[PickerStats]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(File::create(path)?);

    for picker in pickers {
        writer.serialize(picker)?;
    }
    writer.flush()?;

    info!(path, pickers = pickers.len(), "Picker stats exported");
    Ok(())
}
