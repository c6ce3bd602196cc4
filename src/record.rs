//! Shipment record schema.

use serde::{Deserialize, Deserializer, Serialize};

use crate::status::{PickingStatus, VehicleStatus};

/// One row of the warehouse picking list.
///
/// Field names follow the source data (`sNo`, `invoiceNumber`, ...), so the
/// same struct reads CSV exports with headers and JSON arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRecord {
    pub s_no: u32,
    pub invoice_number: String,
    #[serde(default)]
    pub invoice_date: String,
    #[serde(default)]
    pub ship_to_party: String,
    #[serde(default)]
    pub ship_to_party_name: String,
    #[serde(default)]
    pub destination: String,
    pub qty: u64,
    /// Kilograms.
    pub weight: f64,
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub transport_name: String,
    #[serde(default)]
    pub vehicle_no: String,
    #[serde(default)]
    pub vehicle_status: VehicleStatus,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub picker: Option<String>,
    #[serde(default)]
    pub picking_status: PickingStatus,
}

impl ShipmentRecord {
    /// Minimal record used by tests and in-memory sources.
    pub fn new(s_no: u32, invoice_number: &str, qty: u64, weight: f64) -> Self {
        Self {
            s_no,
            invoice_number: invoice_number.to_string(),
            invoice_date: String::new(),
            ship_to_party: String::new(),
            ship_to_party_name: String::new(),
            destination: String::new(),
            qty,
            weight,
            plan_id: String::new(),
            transport_name: String::new(),
            vehicle_no: String::new(),
            vehicle_status: VehicleStatus::Missing,
            picker: None,
            picking_status: PickingStatus::Missing,
        }
    }

    pub fn with_picker(mut self, picker: &str) -> Self {
        self.picker = normalize_picker(Some(picker.to_string()));
        self
    }

    pub fn with_picking_status(mut self, label: &str) -> Self {
        self.picking_status = PickingStatus::parse(label);
        self
    }

    pub fn with_vehicle_status(mut self, label: &str) -> Self {
        self.vehicle_status = VehicleStatus::parse(label);
        self
    }

    /// Name used for picker grouping, if any.
    pub fn picker_name(&self) -> Option<&str> {
        self.picker.as_deref()
    }
}

fn normalize_picker(name: Option<String>) -> Option<String> {
    name.filter(|n| !n.is_empty())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(normalize_picker(Option::<String>::deserialize(deserializer)?))
}
