#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Pure query engine over the complaint dataset.
//!
//! Three operations drive the whole dashboard: [`compute_aggregates`]
//! for the summary counters, [`filter`] for the table and marker set,
//! and [`compute_map_center`] for re-centering the map on the filtered
//! results. All three are pure functions over an immutable record
//! slice, safe to re-run on every query change with no shared state
//! and no side effects.

use complaint_map_complaint_models::{ComplaintRecord, ComplaintStatus};
use geo::{Centroid, MultiPoint, Point};
use serde::Serialize;

/// A complaint query as entered by the user.
///
/// `Default` is the match-everything query: empty text, no status
/// filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintQuery {
    /// Free-text search over address and status label. Leading and
    /// trailing whitespace is ignored; an (effectively) empty string
    /// matches every record.
    pub text: String,
    /// Exact status to keep, or `None` for all statuses.
    pub status: Option<ComplaintStatus>,
}

impl ComplaintQuery {
    /// Builds a query from raw user input.
    #[must_use]
    pub fn new(text: impl Into<String>, status: Option<ComplaintStatus>) -> Self {
        Self {
            text: text.into(),
            status,
        }
    }

    /// Whether a single record satisfies both the status and the text
    /// stage of this query.
    #[must_use]
    pub fn matches(&self, record: &ComplaintRecord) -> bool {
        self.matches_with_needle(record, &normalize_needle(&self.text))
    }

    /// Match against a pre-normalized needle so [`filter`] normalizes
    /// the query text once per call instead of once per record.
    fn matches_with_needle(&self, record: &ComplaintRecord, needle: &str) -> bool {
        if let Some(wanted) = &self.status {
            if &record.status != wanted {
                return false;
            }
        }

        if needle.is_empty() {
            return true;
        }

        haystack(record).contains(needle)
    }
}

/// Trims and lowercases the query text.
fn normalize_needle(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Builds the searchable text for one record: address and status label
/// joined by a single space, skipping empty parts, lowercased.
///
/// Category and description are intentionally not searched; the search
/// box is advertised as "по статусу и адресу".
fn haystack(record: &ComplaintRecord) -> String {
    let status = record.status.as_str();
    let parts: Vec<&str> = [record.address.as_str(), status]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    parts.join(" ").to_lowercase()
}

/// Dataset-wide complaint counts by status.
///
/// Always computed over the full unfiltered dataset, so the summary
/// counters stay fixed while the user filters. Records with an
/// unrecognized status count only toward `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateCounts {
    /// Number of records in the dataset.
    pub total: usize,
    /// Records whose status is exactly "В работе".
    pub in_progress: usize,
    /// Records whose status is exactly "Решено".
    pub resolved: usize,
    /// Records whose status is exactly "Отклонено".
    pub rejected: usize,
}

/// The coordinate the map should center on for the current result set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapCenter {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl MapCenter {
    /// Center used when the result set has no geolocated records:
    /// downtown Kostanay.
    pub const FALLBACK: Self = Self {
        lat: 53.2205,
        lng: 63.6283,
    };
}

/// Counts records by status over the full dataset.
///
/// Status matching is exact and case-sensitive; no normalization is
/// applied. An empty dataset yields all-zero counts.
#[must_use]
pub fn compute_aggregates(records: &[ComplaintRecord]) -> AggregateCounts {
    let mut counts = AggregateCounts {
        total: records.len(),
        ..AggregateCounts::default()
    };

    for record in records {
        match record.status {
            ComplaintStatus::InProgress => counts.in_progress += 1,
            ComplaintStatus::Resolved => counts.resolved += 1,
            ComplaintStatus::Rejected => counts.rejected += 1,
            ComplaintStatus::Unrecognized(_) => {}
        }
    }

    counts
}

/// Filters records by the query, preserving input order.
///
/// A record is kept iff it passes both stages:
///
/// - status stage: exact equality with `query.status` when set,
///   otherwise pass-all;
/// - text stage: case-insensitive substring containment of the trimmed
///   query text in the record's address + status label, otherwise
///   pass-all when the trimmed text is empty.
///
/// The match is a single-pass substring test, not tokenized or fuzzy.
/// Re-applying the same query to the output yields the same sequence.
#[must_use]
pub fn filter<'a>(
    records: &'a [ComplaintRecord],
    query: &ComplaintQuery,
) -> Vec<&'a ComplaintRecord> {
    let needle = normalize_needle(&query.text);
    records
        .iter()
        .filter(|record| query.matches_with_needle(record, &needle))
        .collect()
}

/// Derives the map center from a result set.
///
/// Returns the unweighted centroid of the geolocated records (the
/// arithmetic mean of latitudes and of longitudes), or
/// [`MapCenter::FALLBACK`] when none of the input records carry
/// coordinates. Callers pass the *filtered* set so the map follows the
/// active query.
#[must_use]
pub fn compute_map_center<'a, I>(records: I) -> MapCenter
where
    I: IntoIterator<Item = &'a ComplaintRecord>,
{
    let points: Vec<Point<f64>> = records
        .into_iter()
        .filter_map(ComplaintRecord::location)
        .map(|(lat, lng)| Point::new(lng, lat))
        .collect();

    MultiPoint::new(points).centroid().map_or(
        MapCenter::FALLBACK,
        |center| MapCenter {
            lat: center.y(),
            lng: center.x(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, address: &str, status: ComplaintStatus) -> ComplaintRecord {
        ComplaintRecord {
            id,
            category: "Благоустройство".to_string(),
            address: address.to_string(),
            status,
            created_at: "2024-03-01".to_string(),
            description: None,
            latitude: None,
            longitude: None,
            photo: None,
        }
    }

    fn geolocated(
        id: u64,
        address: &str,
        status: ComplaintStatus,
        lat: f64,
        lng: f64,
    ) -> ComplaintRecord {
        ComplaintRecord {
            latitude: Some(lat),
            longitude: Some(lng),
            ..record(id, address, status)
        }
    }

    fn sample() -> Vec<ComplaintRecord> {
        vec![
            geolocated(1, "Abai 1", ComplaintStatus::InProgress, 53.1, 63.5),
            record(2, "Lenin 5", ComplaintStatus::Resolved),
        ]
    }

    #[test]
    fn aggregates_count_every_record_in_total() {
        let records = sample();
        let counts = compute_aggregates(&records);
        assert_eq!(counts.total, records.len());
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.resolved, 1);
        assert_eq!(counts.rejected, 0);
    }

    #[test]
    fn aggregates_of_empty_dataset_are_zero() {
        assert_eq!(compute_aggregates(&[]), AggregateCounts::default());
    }

    #[test]
    fn unrecognized_status_counts_only_toward_total() {
        let records = vec![
            record(1, "Abai 1", ComplaintStatus::InProgress),
            record(2, "Lenin 5", ComplaintStatus::Unrecognized("Новое".to_string())),
        ];
        let counts = compute_aggregates(&records);
        assert_eq!(counts.total, 2);
        assert_eq!(
            counts.in_progress + counts.resolved + counts.rejected,
            1
        );
    }

    #[test]
    fn bucket_sum_equals_total_when_all_statuses_recognized() {
        let records = vec![
            record(1, "a", ComplaintStatus::InProgress),
            record(2, "b", ComplaintStatus::Resolved),
            record(3, "c", ComplaintStatus::Rejected),
        ];
        let counts = compute_aggregates(&records);
        assert_eq!(
            counts.in_progress + counts.resolved + counts.rejected,
            counts.total
        );
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let records = sample();
        let result = filter(&records, &ComplaintQuery::default());
        let ids: Vec<u64> = result.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn whitespace_only_query_matches_everything() {
        let records = sample();
        let query = ComplaintQuery::new("   ", None);
        assert_eq!(filter(&records, &query).len(), records.len());
    }

    #[test]
    fn text_match_is_case_insensitive_substring() {
        let records = sample();
        let result = filter(&records, &ComplaintQuery::new("abai", None));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);

        // Status labels are searchable too.
        let result = filter(&records, &ComplaintQuery::new("решено", None));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);
    }

    #[test]
    fn status_filter_requires_exact_equality() {
        let records = sample();
        let query = ComplaintQuery::new("", Some(ComplaintStatus::Rejected));
        assert!(filter(&records, &query).is_empty());

        let query = ComplaintQuery::new("", Some(ComplaintStatus::InProgress));
        let result = filter(&records, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn both_stages_must_pass() {
        let records = sample();
        // Text matches record 1, status filter matches record 2 only.
        let query = ComplaintQuery::new("abai", Some(ComplaintStatus::Resolved));
        assert!(filter(&records, &query).is_empty());
    }

    #[test]
    fn empty_address_is_skipped_in_haystack() {
        let records = vec![record(1, "", ComplaintStatus::InProgress)];
        // The haystack is just the status label, with no stray space.
        let result = filter(&records, &ComplaintQuery::new("в работе", None));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn filter_is_idempotent() {
        let records = sample();
        let query = ComplaintQuery::new("abai", None);
        let once = filter(&records, &query);

        let once_owned: Vec<ComplaintRecord> = once.iter().map(|r| (*r).clone()).collect();
        let twice = filter(&once_owned, &query);
        let ids_once: Vec<u64> = once.iter().map(|r| r.id).collect();
        let ids_twice: Vec<u64> = twice.iter().map(|r| r.id).collect();
        assert_eq!(ids_once, ids_twice);
    }

    #[test]
    fn every_filtered_record_satisfies_the_query() {
        let records = vec![
            geolocated(1, "Abai 1", ComplaintStatus::InProgress, 53.1, 63.5),
            record(2, "Lenin 5", ComplaintStatus::Resolved),
            record(3, "Abai 12", ComplaintStatus::Resolved),
        ];
        let query = ComplaintQuery::new("abai", Some(ComplaintStatus::Resolved));
        let result = filter(&records, &query);

        for kept in &result {
            assert!(query.matches(kept));
        }
        let kept_ids: Vec<u64> = result.iter().map(|r| r.id).collect();
        for candidate in &records {
            if query.matches(candidate) {
                assert!(kept_ids.contains(&candidate.id));
            }
        }
        assert_eq!(kept_ids, vec![3]);
    }

    #[test]
    fn map_center_of_empty_set_is_fallback() {
        assert_eq!(compute_map_center([]), MapCenter::FALLBACK);
    }

    #[test]
    fn map_center_ignores_records_without_coordinates() {
        let records = vec![record(1, "Lenin 5", ComplaintStatus::Resolved)];
        assert_eq!(compute_map_center(&records), MapCenter::FALLBACK);
    }

    #[test]
    fn map_center_of_single_record_is_its_location() {
        let records = vec![geolocated(1, "Abai 1", ComplaintStatus::InProgress, 53.1, 63.5)];
        let center = compute_map_center(&records);
        assert!((center.lat - 53.1).abs() < f64::EPSILON);
        assert!((center.lng - 63.5).abs() < f64::EPSILON);
    }

    #[test]
    fn map_center_is_unweighted_mean() {
        let records = vec![
            geolocated(1, "a", ComplaintStatus::InProgress, 53.0, 63.0),
            geolocated(2, "b", ComplaintStatus::Resolved, 53.4, 63.8),
            record(3, "c", ComplaintStatus::Rejected),
        ];
        let center = compute_map_center(&records);
        assert!((center.lat - 53.2).abs() < 1e-9);
        assert!((center.lng - 63.4).abs() < 1e-9);
    }

    #[test]
    fn map_center_follows_the_filtered_set() {
        let records = sample();
        let filtered = filter(&records, &ComplaintQuery::new("abai", None));
        let center = compute_map_center(filtered.iter().copied());
        assert!((center.lat - 53.1).abs() < f64::EPSILON);
        assert!((center.lng - 63.5).abs() < f64::EPSILON);
    }

    #[test]
    fn fallback_center_is_kostanay() {
        assert!((MapCenter::FALLBACK.lat - 53.2205).abs() < f64::EPSILON);
        assert!((MapCenter::FALLBACK.lng - 63.6283).abs() < f64::EPSILON);
    }
}
