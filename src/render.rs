//! Plain-text rendering of the dashboard.
//!
//! Layout follows the warehouse screen: daily progress cards, key metric
//! cards, the picker leaderboard and the shipment table. Status cells are
//! drawn as badges, optionally coloured with ANSI escapes.

use std::fmt::Write;

use crate::dashboard::Dashboard;
use crate::metrics::AggregateMetrics;
use crate::pickers::{PerformanceStatus, PickerStats};
use crate::record::ShipmentRecord;
use crate::status::BadgeVariant;

const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    pub color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn dashboard(&self, dashboard: &Dashboard<'_>) -> String {
        let mut out = String::new();

        out.push_str(&title_block(
            "Warehouse Management Dashboard",
            "Monitoring of warehouse picking operations and performance metrics",
        ));
        out.push('\n');
        out.push_str(&self.progress(&dashboard.metrics));
        out.push('\n');
        out.push_str(&self.key_metrics(&dashboard.metrics));

        if !dashboard.pickers.is_empty() {
            out.push('\n');
            out.push_str(&self.leaderboard(&dashboard.pickers));
        }

        out.push('\n');
        out.push_str(&self.table(dashboard.records));
        out
    }

    /// Quantity and weight progress cards.
    pub fn progress(&self, m: &AggregateMetrics) -> String {
        let mut out = title_block(
            "Today's Picking Progress",
            "Tracking of daily picking targets",
        );

        out.push_str(&progress_card(
            "Quantity Progress",
            m.quantity_completion_rate,
            &format_thousands(m.total_quantity),
            &format_thousands(m.picked_quantity),
            &format_thousands(m.remaining_quantity),
        ));
        out.push_str(&progress_card(
            "Weight Progress",
            m.weight_completion_rate,
            &format_kg(m.total_weight),
            &format_kg(m.picked_weight),
            &format_kg(m.remaining_weight),
        ));
        out
    }

    pub fn key_metrics(&self, m: &AggregateMetrics) -> String {
        let cards = [
            ("Active Pickers", m.active_pickers.to_string(), "Currently working"),
            (
                "Shipments",
                format!("{}/{}", m.completed_pickings, m.total_shipments),
                "Completed/Total",
            ),
            ("In Progress", m.in_progress_pickings.to_string(), "Currently picking"),
            (
                "Vehicles",
                format!("{}/{}", m.arrived_vehicles, m.expected_vehicles),
                "Arrived/Expected",
            ),
        ];

        let mut out = String::new();
        for (title, value, subtitle) in cards {
            let _ = writeln!(out, "  {title:<16} {value:>9}   {subtitle}");
        }

        if m.unknown_statuses > 0 {
            let _ = writeln!(
                out,
                "  {} record(s) carry an unrecognized status",
                m.unknown_statuses
            );
        }
        out
    }

    pub fn leaderboard(&self, pickers: &[PickerStats]) -> String {
        let mut out = title_block(
            "Picker Performance",
            "Individual picker statistics and performance metrics",
        );

        for (idx, picker) in pickers.iter().enumerate() {
            let rank = idx + 1;
            let top = if rank == 1 { "  * Top Performer" } else { "" };
            let status = self.badge(
                picker.performance_status.label(),
                performance_variant(picker),
            );

            let _ = writeln!(
                out,
                "  #{rank:<3} [{initials}] {name}{top}",
                initials = picker.initials(),
                name = picker.name,
            );
            let _ = writeln!(
                out,
                "       {status}  {rate}% completion rate",
                rate = picker.completion_rate
            );
            let _ = writeln!(
                out,
                "       {}",
                progress_bar(picker.completion_rate, BAR_WIDTH)
            );
            let _ = writeln!(
                out,
                "       Completed {:<6} Active {:<6} Items {:<10} Weight {:.1} kg",
                picker.completed_tasks,
                picker.active_tasks,
                format_thousands(picker.total_items),
                picker.total_weight
            );
            out.push('\n');
        }
        out
    }

    /// Row-per-record shipment table.
    pub fn table(&self, records: &[ShipmentRecord]) -> String {
        const HEADERS: [&str; 13] = [
            "S.No",
            "Invoice Number",
            "Date",
            "Ship-To-Party",
            "Destination",
            "Qty",
            "Weight",
            "Plan ID",
            "Transport",
            "Vehicle No",
            "Vehicle Status",
            "Picker",
            "Status",
        ];
        // Qty and Weight
        const RIGHT_ALIGNED: [usize; 2] = [5, 6];
        const VEHICLE_STATUS: usize = 10;
        const PICKING_STATUS: usize = 12;

        let rows: Vec<[String; 13]> = records.iter().map(table_cells).collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = title_block(
            "Warehouse Picking Status",
            "Monitoring of shipment picking operations",
        );

        let header: Vec<String> = HEADERS
            .iter()
            .zip(widths)
            .map(|(h, w)| format!("{h:<w$}"))
            .collect();
        let _ = writeln!(out, "{}", header.join(" | ").trim_end());
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(out, "{}", rule.join("-+-"));

        for (record, row) in records.iter().zip(&rows) {
            let cells: Vec<String> = row
                .iter()
                .zip(widths)
                .enumerate()
                .map(|(col, (cell, w))| {
                    let padded = if RIGHT_ALIGNED.contains(&col) {
                        format!("{cell:>w$}")
                    } else {
                        format!("{cell:<w$}")
                    };
                    match col {
                        VEHICLE_STATUS if !cell.is_empty() => {
                            self.badge(&padded, record.vehicle_status.badge())
                        }
                        PICKING_STATUS if !cell.is_empty() => {
                            self.badge(&padded, record.picking_status.badge())
                        }
                        _ => padded,
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", cells.join(" | ").trim_end());
        }

        if records.is_empty() {
            out.push_str("  No shipments.\n");
        }
        out
    }

    fn badge(&self, text: &str, variant: BadgeVariant) -> String {
        if !self.color {
            return text.to_string();
        }

        let code = match variant {
            BadgeVariant::Success => "32",
            BadgeVariant::Warning => "33",
            BadgeVariant::Secondary => "90",
        };
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn performance_variant(picker: &PickerStats) -> BadgeVariant {
    match picker.performance_status {
        PerformanceStatus::Excellent => BadgeVariant::Success,
        PerformanceStatus::Good => BadgeVariant::Secondary,
        PerformanceStatus::NeedsAttention => BadgeVariant::Warning,
    }
}

fn table_cells(r: &ShipmentRecord) -> [String; 13] {
    [
        r.s_no.to_string(),
        r.invoice_number.clone(),
        r.invoice_date.clone(),
        r.ship_to_party_name.clone(),
        r.destination.clone(),
        r.qty.to_string(),
        r.weight.to_string(),
        r.plan_id.clone(),
        r.transport_name.clone(),
        r.vehicle_no.clone(),
        r.vehicle_status.label().unwrap_or_default().to_string(),
        r.picker.clone().unwrap_or_default(),
        r.picking_status.label().unwrap_or_default().to_string(),
    ]
}

fn title_block(title: &str, subtitle: &str) -> String {
    format!("{title}\n{}\n{subtitle}\n\n", "=".repeat(title.chars().count()))
}

fn progress_card(title: &str, rate: u32, total: &str, picked: &str, remaining: &str) -> String {
    format!(
        "  {title:<20} {rate:>3}%\n  {}\n  Total {total}   Picked {picked}   Remaining {remaining}\n\n",
        progress_bar(rate, BAR_WIDTH)
    )
}

/// `[#########---------]` style bar for a 0-100 percentage.
pub fn progress_bar(rate: u32, width: usize) -> String {
    let filled = (rate.min(100) as usize * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Integer with comma thousands separators.
pub fn format_thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Kilograms with thousands separators and up to two decimals.
pub fn format_kg(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    if frac_part.is_empty() {
        format!("{sign}{} kg", group_digits(digits))
    } else {
        format!("{sign}{}.{frac_part} kg", group_digits(digits))
    }
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn sample_dataset() -> Dataset {
        let mut first = ShipmentRecord::new(1, "INV-1", 1200, 512.5)
            .with_picker("Alice Smith")
            .with_picking_status("100%")
            .with_vehicle_status("Arrived");
        first.destination = "Pune".to_string();

        let second = ShipmentRecord::new(2, "INV-2", 300, 80.0)
            .with_picker("Bob")
            .with_picking_status("40%")
            .with_vehicle_status("On the way");

        Dataset::ingest(vec![first, second]).unwrap()
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_format_kg() {
        assert_eq!(format_kg(0.0), "0 kg");
        assert_eq!(format_kg(1234.5), "1,234.5 kg");
        assert_eq!(format_kg(1000000.25), "1,000,000.25 kg");
        assert_eq!(format_kg(12.0), "12 kg");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "[----------]");
        assert_eq!(progress_bar(50, 10), "[#####-----]");
        assert_eq!(progress_bar(100, 10), "[##########]");
        assert_eq!(progress_bar(250, 4), "[####]");
    }

    #[test]
    fn test_dashboard_sections() {
        let dataset = sample_dataset();
        let text = Renderer::new(false).dashboard(&Dashboard::build(&dataset));

        assert!(text.contains("Today's Picking Progress"));
        assert!(text.contains("Quantity Progress"));
        assert!(text.contains("1,500"));
        assert!(text.contains("592.5 kg"));
        assert!(text.contains("Picker Performance"));
        assert!(text.contains("Top Performer"));
        assert!(text.contains("[AS] Alice Smith"));
        assert!(text.contains("Warehouse Picking Status"));
        assert!(text.contains("INV-2"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_leaderboard_omitted_without_pickers() {
        let dataset = Dataset::ingest(vec![ShipmentRecord::new(1, "INV-1", 1, 1.0)]).unwrap();
        let text = Renderer::new(false).dashboard(&Dashboard::build(&dataset));

        assert!(!text.contains("Picker Performance"));
    }

    #[test]
    fn test_key_metrics_values() {
        let dataset = sample_dataset();
        let dashboard = Dashboard::build(&dataset);
        let text = Renderer::default().key_metrics(&dashboard.metrics);

        assert!(text.contains("Shipments"));
        assert!(text.contains("1/2"));
        assert!(text.contains("Arrived/Expected"));
    }

    #[test]
    fn test_table_columns_align() {
        let dataset = sample_dataset();
        let text = Renderer::new(false).table(dataset.records());
        let lines: Vec<&str> = text
            .lines()
            .filter(|l| l.contains(" | "))
            .collect();

        assert_eq!(lines.len(), 3);
        let pipes: Vec<Vec<usize>> = lines
            .iter()
            .map(|l| l.match_indices(" | ").map(|(i, _)| i).collect())
            .collect();
        assert_eq!(pipes[0], pipes[1]);
        assert_eq!(pipes[1], pipes[2]);
    }

    #[test]
    fn test_badges_colored() {
        let dataset = sample_dataset();
        let text = Renderer::new(true).table(dataset.records());

        assert!(text.contains("\x1b[32m"));
        assert!(text.contains("\x1b[33m"));
    }

    #[test]
    fn test_empty_table() {
        let text = Renderer::new(false).table(&[]);
        assert!(text.contains("No shipments."));
    }
}
