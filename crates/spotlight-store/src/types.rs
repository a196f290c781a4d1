//! Row shapes returned by the backend's REST interface.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use spotlight_core::{Coordinate, Event};
use uuid::Uuid;

/// One row of the events table.
///
/// Coordinates are nullable in storage; rows without a usable coordinate are
/// dropped by [`EventRow::into_event`].
#[derive(Debug, Deserialize)]
pub struct EventRow {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub attendee_count: Option<u32>,
    /// Legacy column; only read when `attendee_count` is null.
    #[serde(default)]
    pub attendees: Option<u32>,
    #[serde(default)]
    pub is_hot: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl EventRow {
    /// Convert to a domain [`Event`], or `None` when the coordinate is missing
    /// or out of range.
    #[must_use]
    pub fn into_event(self) -> Option<Event> {
        let coordinate = Coordinate::new(self.latitude?, self.longitude?);
        if !coordinate.is_valid() {
            return None;
        }
        Some(Event {
            id: self.id,
            title: self.title,
            genre: self.genre,
            location: self.location,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            attendee_count: self.attendee_count.or(self.attendees),
            is_hot: self.is_hot.unwrap_or(false),
            created_at: self.created_at,
        })
    }
}
