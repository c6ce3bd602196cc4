//! Picking and vehicle status classification.
//!
//! Source data carries both statuses as free text ("60%", "Arrived", ...).
//! They are classified once, when a record is deserialized, into closed
//! enumerations. The label text is kept verbatim so it can be displayed
//! and written back unchanged.

use serde::{Deserialize, Serialize};

/// Marker that identifies a fully picked shipment.
const COMPLETE_TOKEN: &str = "100%";

/// Picking progress of a single shipment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum PickingStatus {
    /// No status recorded (absent or empty).
    #[default]
    Missing,
    /// Label contains "100%".
    Completed { label: String, progress: u32 },
    /// Label contains a percent token other than "100%".
    InProgress { label: String, progress: u32 },
    /// Non-empty label without any percent token.
    Unknown(String),
}

impl PickingStatus {
    pub fn parse(label: &str) -> Self {
        if label.is_empty() {
            return PickingStatus::Missing;
        }

        let progress = extract_percent(label).unwrap_or(0);
        if label.contains(COMPLETE_TOKEN) {
            PickingStatus::Completed {
                label: label.to_string(),
                progress,
            }
        } else if label.contains('%') {
            PickingStatus::InProgress {
                label: label.to_string(),
                progress,
            }
        } else {
            PickingStatus::Unknown(label.to_string())
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, PickingStatus::Completed { .. })
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, PickingStatus::InProgress { .. })
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, PickingStatus::Unknown(_))
    }

    /// Percent value used for progress averages. Missing and unknown
    /// statuses count as 0.
    pub fn progress(&self) -> u32 {
        match self {
            PickingStatus::Completed { progress, .. } | PickingStatus::InProgress { progress, .. } => {
                *progress
            }
            PickingStatus::Missing | PickingStatus::Unknown(_) => 0,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            PickingStatus::Missing => None,
            PickingStatus::Completed { label, .. }
            | PickingStatus::InProgress { label, .. }
            | PickingStatus::Unknown(label) => Some(label),
        }
    }

    pub fn badge(&self) -> BadgeVariant {
        match self {
            PickingStatus::Completed { .. } => BadgeVariant::Success,
            PickingStatus::InProgress { .. } => BadgeVariant::Warning,
            PickingStatus::Missing | PickingStatus::Unknown(_) => BadgeVariant::Secondary,
        }
    }
}

impl From<Option<String>> for PickingStatus {
    fn from(value: Option<String>) -> Self {
        value.map_or(PickingStatus::Missing, |label| PickingStatus::parse(&label))
    }
}

impl From<PickingStatus> for Option<String> {
    fn from(status: PickingStatus) -> Self {
        status.label().map(str::to_string)
    }
}

/// Logistics state of the vehicle assigned to a shipment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum VehicleStatus {
    #[default]
    Missing,
    Arrived(String),
    OnTheWay(String),
    /// Label mentions both states; counts as arrived and as on the way.
    ArrivedAndOnTheWay(String),
    Unknown(String),
}

impl VehicleStatus {
    /// Matching is case-insensitive. The two patterns are checked
    /// independently.
    pub fn parse(label: &str) -> Self {
        if label.is_empty() {
            return VehicleStatus::Missing;
        }

        let normalized = label.to_lowercase();
        let label = label.to_string();
        match (normalized.contains("arrived"), normalized.contains("on the way")) {
            (true, true) => VehicleStatus::ArrivedAndOnTheWay(label),
            (true, false) => VehicleStatus::Arrived(label),
            (false, true) => VehicleStatus::OnTheWay(label),
            (false, false) => VehicleStatus::Unknown(label),
        }
    }

    pub fn is_arrived(&self) -> bool {
        matches!(
            self,
            VehicleStatus::Arrived(_) | VehicleStatus::ArrivedAndOnTheWay(_)
        )
    }

    pub fn is_on_the_way(&self) -> bool {
        matches!(
            self,
            VehicleStatus::OnTheWay(_) | VehicleStatus::ArrivedAndOnTheWay(_)
        )
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, VehicleStatus::Unknown(_))
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            VehicleStatus::Missing => None,
            VehicleStatus::Arrived(label)
            | VehicleStatus::OnTheWay(label)
            | VehicleStatus::ArrivedAndOnTheWay(label)
            | VehicleStatus::Unknown(label) => Some(label),
        }
    }

    /// Arrival or a "100%" token reads as success, travel or any other
    /// percent token as warning.
    pub fn badge(&self) -> BadgeVariant {
        let Some(label) = self.label() else {
            return BadgeVariant::Secondary;
        };

        if self.is_arrived() || label.contains(COMPLETE_TOKEN) {
            BadgeVariant::Success
        } else if self.is_on_the_way() || label.contains('%') {
            BadgeVariant::Warning
        } else {
            BadgeVariant::Secondary
        }
    }
}

impl From<Option<String>> for VehicleStatus {
    fn from(value: Option<String>) -> Self {
        value.map_or(VehicleStatus::Missing, |label| VehicleStatus::parse(&label))
    }
}

impl From<VehicleStatus> for Option<String> {
    fn from(status: VehicleStatus) -> Self {
        status.label().map(str::to_string)
    }
}

/// Visual emphasis for a status cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Success,
    Warning,
    Secondary,
}

/// Returns the digit run immediately preceding the first `%` that has one.
///
/// `"Picking 60%"` yields 60, `"% done"` yields `None`. A run too large for
/// a `u32` also yields `None`.
pub fn extract_percent(label: &str) -> Option<u32> {
    let bytes = label.as_bytes();

    for (idx, _) in label.match_indices('%') {
        let start = bytes[..idx]
            .iter()
            .rposition(|b| !b.is_ascii_digit())
            .map_or(0, |p| p + 1);
        if start < idx {
            return label[start..idx].parse().ok();
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_percent_simple() {
        assert_eq!(extract_percent("60%"), Some(60));
        assert_eq!(extract_percent("100%"), Some(100));
        assert_eq!(extract_percent("Picking 45% done"), Some(45));
    }

    #[test]
    fn test_extract_percent_skips_bare_percent() {
        assert_eq!(extract_percent("% then 30%"), Some(30));
        assert_eq!(extract_percent("abc 12x 60%"), Some(60));
    }

    #[test]
    fn test_extract_percent_none() {
        assert_eq!(extract_percent(""), None);
        assert_eq!(extract_percent("Pending"), None);
        assert_eq!(extract_percent("%"), None);
        assert_eq!(extract_percent("99999999999%"), None);
    }

    #[test]
    fn test_picking_status_classification() {
        assert!(PickingStatus::parse("100%").is_completed());
        assert!(PickingStatus::parse("Done 100%").is_completed());
        assert!(PickingStatus::parse("60%").is_in_progress());
        assert!(PickingStatus::parse("%").is_in_progress());
        assert!(PickingStatus::parse("Pending").is_unknown());
        assert_eq!(PickingStatus::parse(""), PickingStatus::Missing);
    }

    #[test]
    fn test_picking_status_progress() {
        assert_eq!(PickingStatus::parse("75%").progress(), 75);
        assert_eq!(PickingStatus::parse("100%").progress(), 100);
        assert_eq!(PickingStatus::parse("%").progress(), 0);
        assert_eq!(PickingStatus::parse("Pending").progress(), 0);
        assert_eq!(PickingStatus::Missing.progress(), 0);
    }

    #[test]
    fn test_vehicle_status_is_case_insensitive() {
        assert!(VehicleStatus::parse("Arrived").is_arrived());
        assert!(VehicleStatus::parse("ARRIVED at dock 3").is_arrived());
        assert!(VehicleStatus::parse("On The Way").is_on_the_way());
        assert!(VehicleStatus::parse("Delayed").is_unknown());
        assert_eq!(VehicleStatus::parse(""), VehicleStatus::Missing);
    }

    #[test]
    fn test_vehicle_status_matches_both_states() {
        let status = VehicleStatus::parse("On the way - arrived at gate");
        assert!(status.is_arrived());
        assert!(status.is_on_the_way());
        assert!(!status.is_unknown());
        assert_eq!(status.label(), Some("On the way - arrived at gate"));
    }

    #[test]
    fn test_label_round_trip() {
        let status = PickingStatus::parse("Picking 60%");
        let raw: Option<String> = status.clone().into();
        assert_eq!(raw.as_deref(), Some("Picking 60%"));
        assert_eq!(PickingStatus::from(raw), status);

        let raw: Option<String> = VehicleStatus::Missing.into();
        assert_eq!(raw, None);
    }

    #[test]
    fn test_badges() {
        assert_eq!(PickingStatus::parse("100%").badge(), BadgeVariant::Success);
        assert_eq!(PickingStatus::parse("10%").badge(), BadgeVariant::Warning);
        assert_eq!(PickingStatus::parse("Hold").badge(), BadgeVariant::Secondary);
        assert_eq!(VehicleStatus::parse("Arrived").badge(), BadgeVariant::Success);
        assert_eq!(VehicleStatus::parse("on the way").badge(), BadgeVariant::Warning);
        assert_eq!(VehicleStatus::Missing.badge(), BadgeVariant::Secondary);
        assert_eq!(VehicleStatus::parse("Delayed").badge(), BadgeVariant::Secondary);
    }

    #[test]
    fn test_vehicle_badge_reads_percent_tokens() {
        assert_eq!(VehicleStatus::parse("Loaded 100%").badge(), BadgeVariant::Success);
        assert_eq!(VehicleStatus::parse("Loading 40%").badge(), BadgeVariant::Warning);
        assert!(VehicleStatus::parse("Loading 40%").is_unknown());
    }
}
