#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Canonical citizen complaint record types.
//!
//! This crate defines the shared data model used across the entire
//! complaint-map system: the complaint record schema and its status
//! labels. The dataset is loaded once at startup and treated as a
//! read-only source of truth; every record is immutable after load.

use serde::{Deserialize, Serialize};

/// Processing status of a citizen complaint.
///
/// The three recognized statuses carry the exact Russian labels used in
/// the source dataset. Matching against a label is exact and
/// case-sensitive: anything else is preserved verbatim as
/// [`ComplaintStatus::Unrecognized`] rather than rejected, since the
/// upstream dataset is not under this system's control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComplaintStatus {
    /// "В работе" — the complaint is being worked on.
    InProgress,
    /// "Решено" — the complaint has been resolved.
    Resolved,
    /// "Отклонено" — the complaint was rejected.
    Rejected,
    /// Any label outside the recognized set, kept verbatim.
    Unrecognized(String),
}

impl ComplaintStatus {
    /// Wire label for [`Self::InProgress`].
    pub const IN_PROGRESS: &str = "В работе";
    /// Wire label for [`Self::Resolved`].
    pub const RESOLVED: &str = "Решено";
    /// Wire label for [`Self::Rejected`].
    pub const REJECTED: &str = "Отклонено";

    /// The three recognized statuses, in dataset order.
    pub const RECOGNIZED: &[Self] = &[Self::InProgress, Self::Resolved, Self::Rejected];

    /// Returns the display label for this status.
    ///
    /// Unrecognized statuses return their original raw label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InProgress => Self::IN_PROGRESS,
            Self::Resolved => Self::RESOLVED,
            Self::Rejected => Self::REJECTED,
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Whether this status is one of the three recognized values.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Parses a label into a recognized status.
    ///
    /// Unlike the serde path, this rejects labels outside the recognized
    /// set. Used where the status comes from a closed picker (e.g. a CLI
    /// `--status` flag) rather than from the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownStatusError`] if the label is not one of the
    /// three recognized values.
    pub fn parse_recognized(label: &str) -> Result<Self, UnknownStatusError> {
        match label {
            Self::IN_PROGRESS => Ok(Self::InProgress),
            Self::RESOLVED => Ok(Self::Resolved),
            Self::REJECTED => Ok(Self::Rejected),
            _ => Err(UnknownStatusError {
                label: label.to_string(),
            }),
        }
    }
}

impl From<String> for ComplaintStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            Self::IN_PROGRESS => Self::InProgress,
            Self::RESOLVED => Self::Resolved,
            Self::REJECTED => Self::Rejected,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<ComplaintStatus> for String {
    fn from(status: ComplaintStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label is not one of the recognized statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatusError {
    /// The label that failed to parse.
    pub label: String,
}

impl std::fmt::Display for UnknownStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown status \"{}\": expected one of \"{}\", \"{}\", \"{}\"",
            self.label,
            ComplaintStatus::IN_PROGRESS,
            ComplaintStatus::RESOLVED,
            ComplaintStatus::REJECTED,
        )
    }
}

impl std::error::Error for UnknownStatusError {}

/// One citizen complaint entry.
///
/// Every field beyond `id` and `status` is optional or may be empty;
/// absence means "no value", never an error. In particular a record is
/// geolocated only when both coordinates are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    /// Unique, stable identifier; the display/row key.
    pub id: u64,
    /// Free-text category label.
    #[serde(default)]
    pub category: String,
    /// Free-text address label.
    #[serde(default)]
    pub address: String,
    /// Processing status.
    pub status: ComplaintStatus,
    /// Registration date as an opaque display string; the engine never
    /// parses or orders by it.
    #[serde(default)]
    pub created_at: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Latitude, if the complaint is geolocated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude, if the complaint is geolocated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// URL or path of an attached photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl ComplaintRecord {
    /// Returns `(latitude, longitude)` when both coordinates are present.
    #[must_use]
    pub const fn location(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    /// Whether both coordinates are present.
    #[must_use]
    pub const fn is_geolocated(&self) -> bool {
        self.location().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_labels_round_trip() {
        for status in ComplaintStatus::RECOGNIZED {
            let label = status.as_str().to_string();
            assert_eq!(&ComplaintStatus::from(label), status);
        }
    }

    #[test]
    fn unknown_label_is_preserved_verbatim() {
        let status = ComplaintStatus::from("На рассмотрении".to_string());
        assert_eq!(
            status,
            ComplaintStatus::Unrecognized("На рассмотрении".to_string())
        );
        assert_eq!(status.as_str(), "На рассмотрении");
        assert!(!status.is_recognized());
    }

    #[test]
    fn status_matching_is_case_sensitive() {
        // Lowercase "р" differs from the canonical label.
        let status = ComplaintStatus::from("решено".to_string());
        assert!(!status.is_recognized());
    }

    #[test]
    fn parse_recognized_rejects_unknown() {
        assert_eq!(
            ComplaintStatus::parse_recognized("Решено"),
            Ok(ComplaintStatus::Resolved)
        );
        assert!(ComplaintStatus::parse_recognized("done").is_err());
    }

    #[test]
    fn location_requires_both_coordinates() {
        let mut record = ComplaintRecord {
            id: 1,
            category: "Дороги".to_string(),
            address: "ул. Абая, 1".to_string(),
            status: ComplaintStatus::InProgress,
            created_at: "2024-01-15".to_string(),
            description: None,
            latitude: Some(53.21),
            longitude: None,
            photo: None,
        };
        assert!(!record.is_geolocated());

        record.longitude = Some(63.62);
        assert_eq!(record.location(), Some((53.21, 63.62)));
    }

    #[test]
    fn record_deserializes_with_missing_optional_fields() {
        let json = r#"{"id": 7, "status": "В работе"}"#;
        let record: ComplaintRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.status, ComplaintStatus::InProgress);
        assert!(record.address.is_empty());
        assert!(record.description.is_none());
        assert!(!record.is_geolocated());
    }
}
