use std::collections::HashSet;

use serde::Serialize;

use crate::record::ShipmentRecord;

/// Warehouse-wide figures derived from a record collection.
///
/// Always recomputed from scratch; nothing here is cached or updated in
/// place.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct AggregateMetrics {
    pub total_shipments: usize,

    // picking
    pub completed_pickings: usize,
    pub in_progress_pickings: usize,

    // vehicles
    pub arrived_vehicles: usize,
    pub on_the_way_vehicles: usize,
    pub expected_vehicles: usize,

    pub active_pickers: usize,

    // daily progress, weights in kg rounded to 2 decimals
    pub total_weight: f64,
    pub total_quantity: u64,
    pub picked_weight: f64,
    pub picked_quantity: u64,
    pub remaining_weight: f64,
    pub remaining_quantity: u64,

    // rates, whole percent
    pub completion_rate: u32,
    pub weight_completion_rate: u32,
    pub quantity_completion_rate: u32,

    pub unknown_statuses: usize,
}

impl AggregateMetrics {
    pub fn from_records(records: &[ShipmentRecord]) -> Self {
        let mut m = AggregateMetrics {
            total_shipments: records.len(),
            ..Default::default()
        };

        let mut pickers: HashSet<&str> = HashSet::new();
        let mut total_weight = 0.0;
        let mut picked_weight = 0.0;

        for r in records {
            if r.picking_status.is_completed() {
                m.completed_pickings += 1;
                picked_weight += r.weight;
                m.picked_quantity += r.qty;
            } else if r.picking_status.is_in_progress() {
                m.in_progress_pickings += 1;
            }

            if r.vehicle_status.is_arrived() {
                m.arrived_vehicles += 1;
            }
            if r.vehicle_status.is_on_the_way() {
                m.on_the_way_vehicles += 1;
            }

            if r.picking_status.is_unknown() || r.vehicle_status.is_unknown() {
                m.unknown_statuses += 1;
            }

            if let Some(name) = r.picker_name() {
                pickers.insert(name);
            }

            total_weight += r.weight;
            m.total_quantity += r.qty;
        }

        m.expected_vehicles = m.arrived_vehicles + m.on_the_way_vehicles;
        m.active_pickers = pickers.len();

        m.remaining_quantity = m.total_quantity - m.picked_quantity;
        m.total_weight = round2(total_weight);
        m.picked_weight = round2(picked_weight);
        m.remaining_weight = round2(total_weight - picked_weight);

        m.completion_rate = rate(m.completed_pickings as f64, m.total_shipments as f64);
        m.weight_completion_rate = rate(picked_weight, total_weight);
        m.quantity_completion_rate = rate(m.picked_quantity as f64, m.total_quantity as f64);

        m
    }
}

/// Whole-number percentage of `part` in `total`; 0 when `total` is 0.
pub fn rate(part: f64, total: f64) -> u32 {
    if total <= 0.0 {
        0
    } else {
        ((part / total) * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
