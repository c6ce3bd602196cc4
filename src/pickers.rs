//! Per-picker statistics and the performance leaderboard.
//!
//! Pickers are grouped by their display name. Two people sharing a name are
//! merged into one entry; the source data has no stable picker identifier.

use std::collections::HashMap;

use serde::Serialize;

use crate::metrics::rate;
use crate::record::ShipmentRecord;

/// Three-tier classification of a picker's completion rate.
///
/// | Completion rate | Status          |
/// |-----------------|-----------------|
/// | >= 80           | excellent       |
/// | >= 50           | good            |
/// | < 50            | needs-attention |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerformanceStatus {
    Excellent,
    Good,
    NeedsAttention,
}

impl PerformanceStatus {
    pub fn from_rate(completion_rate: u32) -> Self {
        match completion_rate {
            r if r >= 80 => PerformanceStatus::Excellent,
            r if r >= 50 => PerformanceStatus::Good,
            _ => PerformanceStatus::NeedsAttention,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceStatus::Excellent => "Excellent",
            PerformanceStatus::Good => "Good",
            PerformanceStatus::NeedsAttention => "Needs Attention",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickerStats {
    pub name: String,
    pub completion_rate: u32,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub active_tasks: usize,
    pub total_items: u64,
    /// Kilograms, unrounded.
    pub total_weight: f64,
    pub average_progress: u32,
    pub performance_status: PerformanceStatus,
}

impl PickerStats {
    fn from_tasks(name: &str, tasks: &[&ShipmentRecord]) -> Self {
        let total_tasks = tasks.len();
        let completed_tasks = tasks
            .iter()
            .filter(|t| t.picking_status.is_completed())
            .count();
        let total_items: u64 = tasks.iter().map(|t| t.qty).sum();
        let total_weight: f64 = tasks.iter().map(|t| t.weight).sum();

        let progress_sum: u64 = tasks
            .iter()
            .map(|t| u64::from(t.picking_status.progress()))
            .sum();
        let average_progress = if total_tasks == 0 {
            0
        } else {
            (progress_sum as f64 / total_tasks as f64).round() as u32
        };

        let completion_rate = rate(completed_tasks as f64, total_tasks as f64);

        PickerStats {
            name: name.to_string(),
            completion_rate,
            total_tasks,
            completed_tasks,
            active_tasks: total_tasks - completed_tasks,
            total_items,
            total_weight,
            average_progress,
            performance_status: PerformanceStatus::from_rate(completion_rate),
        }
    }

    /// First letter of every name part, upper-cased ("Alice smith" -> "AS").
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Groups records by picker and ranks the pickers by completion rate,
/// highest first. Pickers with equal rates keep first-seen order.
///
/// Records without a picker are skipped.
pub fn compute_picker_stats(records: &[ShipmentRecord]) -> Vec<PickerStats> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&ShipmentRecord>> = HashMap::new();

    for record in records {
        let Some(name) = record.picker_name() else {
            continue;
        };

        groups
            .entry(name)
            .or_insert_with(|| {
                order.push(name);
                Vec::new()
            })
            .push(record);
    }

    let mut stats: Vec<PickerStats> = order
        .iter()
        .map(|name| PickerStats::from_tasks(name, &groups[name]))
        .collect();

    // sort_by is stable
    stats.sort_by(|a, b| b.completion_rate.cmp(&a.completion_rate));
    stats
}
