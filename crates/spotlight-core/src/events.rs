use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::Coordinate;

/// A geotagged event as read from the backing store.
///
/// Events are treated as immutable for the duration of a clustering pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub genre: Option<String>,
    /// Venue or neighbourhood label, used when naming genre-less clusters.
    pub location: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Attendee or occurrence count; absent counts are treated as 1.
    pub attendee_count: Option<u32>,
    pub is_hot: bool,
    pub created_at: DateTime<Utc>,
}

impl Event {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    #[must_use]
    pub fn has_valid_coordinates(&self) -> bool {
        self.coordinate().is_valid()
    }

    /// Count contributed to a cluster's total.
    #[must_use]
    pub fn effective_count(&self) -> u64 {
        u64::from(self.attendee_count.unwrap_or(1))
    }
}
