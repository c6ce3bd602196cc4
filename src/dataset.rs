//! Ingestion boundary for shipment records.
//!
//! A [`Dataset`] is the validated, read-only collection every aggregation
//! runs over. Structural problems (missing or duplicate invoice numbers,
//! impossible weights) are rejected here; free-text statuses that match no
//! known pattern are accepted, logged and counted.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::record::ShipmentRecord;
use crate::status::{PickingStatus, VehicleStatus};

#[derive(Debug, Error, PartialEq)]
pub enum IngestError {
    #[error("record at row {row} has no invoice number")]
    MissingInvoice { row: usize },

    #[error("duplicate invoice number '{invoice}' at rows {first} and {second}")]
    DuplicateInvoice {
        invoice: String,
        first: usize,
        second: usize,
    },

    #[error("invoice '{invoice}' has invalid weight {weight}")]
    InvalidWeight { invoice: String, weight: f64 },
}

/// Records whose status text matched no known pattern.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UnknownStatuses {
    pub picking: Vec<String>,
    pub vehicle: Vec<String>,
}

impl UnknownStatuses {
    pub fn total(&self) -> usize {
        self.picking.len() + self.vehicle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<ShipmentRecord>,
    unknown: UnknownStatuses,
}

impl Dataset {
    /// Validates `records` and freezes them in input order.
    ///
    /// Rows are reported 1-based.
    pub fn ingest(records: Vec<ShipmentRecord>) -> Result<Self, IngestError> {
        let mut unknown = UnknownStatuses::default();
        let mut seen: HashMap<String, usize> = HashMap::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            let row = idx + 1;
            let invoice = record.invoice_number.trim();

            if invoice.is_empty() {
                return Err(IngestError::MissingInvoice { row });
            }

            if let Some(first) = seen.insert(invoice.to_string(), row) {
                return Err(IngestError::DuplicateInvoice {
                    invoice: invoice.to_string(),
                    first,
                    second: row,
                });
            }

            if !record.weight.is_finite() || record.weight < 0.0 {
                return Err(IngestError::InvalidWeight {
                    invoice: invoice.to_string(),
                    weight: record.weight,
                });
            }

            if let PickingStatus::Unknown(label) = &record.picking_status {
                warn!(invoice, status = %label, "Unrecognized picking status");
                unknown.picking.push(invoice.to_string());
            }

            if let VehicleStatus::Unknown(label) = &record.vehicle_status {
                warn!(invoice, status = %label, "Unrecognized vehicle status");
                unknown.vehicle.push(invoice.to_string());
            }
        }

        debug!(
            records = records.len(),
            unknown_statuses = unknown.total(),
            "Dataset ingested"
        );

        Ok(Self { records, unknown })
    }

    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            unknown: UnknownStatuses::default(),
        }
    }

    pub fn records(&self) -> &[ShipmentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn unknown_statuses(&self) -> &UnknownStatuses {
        &self.unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_empty() {
        let dataset = Dataset::ingest(vec![]).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.unknown_statuses().is_empty());
    }

    #[test]
    fn test_ingest_preserves_order() {
        let dataset = Dataset::ingest(vec![
            ShipmentRecord::new(2, "B", 1, 1.0),
            ShipmentRecord::new(1, "A", 1, 1.0),
        ])
        .unwrap();

        let invoices: Vec<_> = dataset
            .records()
            .iter()
            .map(|r| r.invoice_number.as_str())
            .collect();
        assert_eq!(invoices, vec!["B", "A"]);
    }

    #[test]
    fn test_ingest_rejects_duplicate_invoice() {
        let err = Dataset::ingest(vec![
            ShipmentRecord::new(1, "INV-1", 1, 1.0),
            ShipmentRecord::new(2, "INV-2", 1, 1.0),
            ShipmentRecord::new(3, "INV-1", 1, 1.0),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            IngestError::DuplicateInvoice {
                invoice: "INV-1".to_string(),
                first: 1,
                second: 3,
            }
        );
    }

    #[test]
    fn test_ingest_rejects_missing_invoice() {
        let err = Dataset::ingest(vec![ShipmentRecord::new(1, " ", 1, 1.0)]).unwrap_err();
        assert_eq!(err, IngestError::MissingInvoice { row: 1 });
    }

    #[test]
    fn test_ingest_rejects_bad_weight() {
        let err = Dataset::ingest(vec![ShipmentRecord::new(1, "INV-1", 1, -0.5)]).unwrap_err();
        assert!(matches!(err, IngestError::InvalidWeight { .. }));

        let err = Dataset::ingest(vec![ShipmentRecord::new(1, "INV-1", 1, f64::NAN)]).unwrap_err();
        assert!(matches!(err, IngestError::InvalidWeight { .. }));
    }

    #[test]
    fn test_ingest_counts_unknown_statuses() {
        let dataset = Dataset::ingest(vec![
            ShipmentRecord::new(1, "INV-1", 1, 1.0).with_picking_status("Pending"),
            ShipmentRecord::new(2, "INV-2", 1, 1.0).with_vehicle_status("Delayed"),
            ShipmentRecord::new(3, "INV-3", 1, 1.0).with_picking_status("50%"),
        ])
        .unwrap();

        let unknown = dataset.unknown_statuses();
        assert_eq!(unknown.picking, vec!["INV-1".to_string()]);
        assert_eq!(unknown.vehicle, vec!["INV-2".to_string()]);
        assert_eq!(unknown.total(), 2);
    }
}
