//! Display name and description derived from a cluster's members.

use spotlight_core::{genre_display_name, Event};

const MAJOR_HUB_MIN_SIZE: usize = 5;
const CLUSTER_MIN_SIZE: usize = 3;

/// Name a cluster after its plurality genre, falling back to size-based names.
///
/// Genre ties go to the genre seen first among the members.
#[must_use]
pub fn cluster_name(members: &[Event]) -> String {
    if let Some(genre) = plurality_genre(members) {
        return format!("{} Hub", genre_display_name(genre));
    }

    match members.len() {
        n if n >= MAJOR_HUB_MIN_SIZE => "Major Event Hub".to_string(),
        n if n >= CLUSTER_MIN_SIZE => "Event Cluster".to_string(),
        _ => {
            let place = members
                .first()
                .and_then(|e| e.location.as_deref())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or("Event");
            format!("{place} Area")
        }
    }
}

/// One-sentence summary: member count and total attendance.
#[must_use]
pub fn cluster_description(members: &[Event]) -> String {
    let attending: u64 = members.iter().map(Event::effective_count).sum();
    match members.len() {
        1 => format!("1 event with {attending} attending"),
        n => format!("{n} events with {attending} attending"),
    }
}

fn plurality_genre(members: &[Event]) -> Option<&str> {
    // Keyed case-insensitively, matching the display lookup; the first-seen
    // spelling is kept. Insertion order makes the tie-break deterministic.
    let mut tally: Vec<(String, &str, usize)> = Vec::new();
    for genre in members
        .iter()
        .filter_map(|e| e.genre.as_deref())
        .map(str::trim)
        .filter(|g| !g.is_empty())
    {
        let key = genre.to_ascii_lowercase();
        match tally.iter_mut().find(|(seen, _, _)| *seen == key) {
            Some((_, _, count)) => *count += 1,
            None => tally.push((key, genre, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (_, genre, count) in tally {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((genre, count));
        }
    }
    best.map(|(genre, _)| genre)
}
