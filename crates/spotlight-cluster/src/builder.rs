//! Single-pass greedy radius grouping.
//!
//! Each unprocessed event in input order seeds a new group; every later
//! unprocessed event within `radius_m` of that seed joins it. Membership is
//! measured against the seed only, never against a moving center, so the
//! result depends on input order and is reproducible for a given order.

use spotlight_core::{haversine_distance_m, Coordinate, Event};

use crate::annotate::{cluster_description, cluster_name};
use crate::types::{Cluster, ClusterId};

/// Groups at or above this size are hot regardless of member flags.
pub const HOT_CLUSTER_MIN_SIZE: usize = 3;

/// Membership of one group before naming.
#[derive(Debug, Clone)]
pub struct EventGroup {
    /// Members in discovery order; `members[0]` is the seed.
    pub members: Vec<Event>,
    pub center: Coordinate,
    pub hot: bool,
}

/// Partition `events` into seed-relative radius groups.
///
/// The comparison is inclusive, so coincident events merge even at radius 0.
/// A negative or NaN radius yields one group per event. Callers must filter
/// out events without valid coordinates first.
#[must_use]
pub fn group_events(events: &[Event], radius_m: f64) -> Vec<EventGroup> {
    let mut processed = vec![false; events.len()];
    let mut groups = Vec::new();

    for (seed_idx, seed) in events.iter().enumerate() {
        if processed[seed_idx] {
            continue;
        }
        processed[seed_idx] = true;

        let origin = seed.coordinate();
        let mut members = vec![seed.clone()];

        // Everything before the seed is already assigned.
        for (idx, candidate) in events.iter().enumerate().skip(seed_idx + 1) {
            if processed[idx] {
                continue;
            }
            if haversine_distance_m(origin, candidate.coordinate()) <= radius_m {
                processed[idx] = true;
                members.push(candidate.clone());
            }
        }

        let center = if members.len() > 1 {
            mean_coordinate(&members)
        } else {
            origin
        };
        let hot = members.len() >= HOT_CLUSTER_MIN_SIZE || members.iter().any(|e| e.is_hot);

        groups.push(EventGroup {
            members,
            center,
            hot,
        });
    }

    groups
}

/// Group and annotate `events`, assigning ids in discovery order.
#[must_use]
pub fn build_clusters(events: &[Event], radius_m: f64) -> Vec<Cluster> {
    group_events(events, radius_m)
        .into_iter()
        .zip(0u32..)
        .map(|(group, idx)| Cluster {
            id: ClusterId(idx),
            name: cluster_name(&group.members),
            description: cluster_description(&group.members),
            center: group.center,
            hot: group.hot,
            events: group.members,
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn mean_coordinate(members: &[Event]) -> Coordinate {
    let n = members.len() as f64;
    let (lat_sum, lng_sum) = members.iter().fold((0.0, 0.0), |(lat, lng), e| {
        (lat + e.latitude, lng + e.longitude)
    });
    Coordinate::new(lat_sum / n, lng_sum / n)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn event_at(lat: f64, lng: f64) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: format!("Event at {lat},{lng}"),
            genre: None,
            location: None,
            latitude: lat,
            longitude: lng,
            attendee_count: None,
            is_hot: false,
            created_at: Utc::now(),
        }
    }

    fn hot_event_at(lat: f64, lng: f64) -> Event {
        Event {
            is_hot: true,
            ..event_at(lat, lng)
        }
    }

    #[test]
    fn no_events_produce_no_groups() {
        assert!(group_events(&[], 1_000.0).is_empty());
    }

    #[test]
    fn every_event_lands_in_exactly_one_group() {
        let events: Vec<Event> = (0..40)
            .map(|i| event_at(f64::from(i % 7) * 0.004, f64::from(i / 7) * 0.003))
            .collect();

        let groups = group_events(&events, 400.0);

        let mut seen = HashSet::new();
        let mut total = 0;
        for group in &groups {
            assert!(!group.members.is_empty());
            for member in &group.members {
                assert!(seen.insert(member.id), "duplicate member {}", member.id);
                total += 1;
            }
        }
        assert_eq!(total, events.len());
        assert!(events.iter().all(|e| seen.contains(&e.id)));
    }

    #[test]
    fn zero_radius_merges_only_coincident_points() {
        let events = vec![
            event_at(12.0, 34.0),
            event_at(12.0, 34.0),
            event_at(12.0, 34.000_01),
        ];

        let groups = group_events(&events, 0.0);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].members.len(), 2);
        assert_eq!(groups[1].members.len(), 1);
    }

    #[test]
    fn negative_radius_yields_singletons() {
        let events = vec![event_at(1.0, 1.0), event_at(1.0, 1.0)];
        let groups = group_events(&events, -5.0);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn infinite_radius_collapses_to_one_group_at_mean() {
        let events = vec![
            event_at(10.0, 20.0),
            event_at(-10.0, 40.0),
            event_at(30.0, -30.0),
        ];

        let groups = group_events(&events, f64::INFINITY);

        assert_eq!(groups.len(), 1);
        let center = groups[0].center;
        assert!((center.latitude - 10.0).abs() < 1e-9);
        assert!((center.longitude - 10.0).abs() < 1e-9);
    }

    #[test]
    fn pair_111m_apart_merges_at_200m_and_is_not_hot() {
        let events = vec![event_at(0.0, 0.0), event_at(0.0, 0.001)];

        let groups = group_events(&events, 200.0);

        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.members.len(), 2);
        assert!(group.center.latitude.abs() < 1e-12);
        assert!((group.center.longitude - 0.000_5).abs() < 1e-12);
        assert!(!group.hot);
    }

    #[test]
    fn pair_is_hot_when_either_member_is_hot() {
        let events = vec![event_at(0.0, 0.0), hot_event_at(0.0, 0.001)];
        let groups = group_events(&events, 200.0);
        assert!(groups[0].hot);
    }

    #[test]
    fn three_members_make_a_hot_group() {
        let events = vec![
            event_at(0.0, 0.0),
            event_at(0.0, 0.000_5),
            event_at(0.000_5, 0.0),
        ];
        let groups = group_events(&events, 200.0);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].hot);
    }

    #[test]
    fn singleton_center_is_the_seed_coordinate() {
        let groups = group_events(&[event_at(45.5, -73.6)], 100.0);
        assert_eq!(groups[0].center, Coordinate::new(45.5, -73.6));
    }

    #[test]
    fn membership_is_relative_to_seed_not_center() {
        // A at 0, B ~111m east, C ~222m east. With 150m radius, A seeds and
        // takes B; C is out of reach of A even though it is within 150m of B.
        let events = vec![
            event_at(0.0, 0.0),
            event_at(0.0, 0.001),
            event_at(0.0, 0.002),
        ];

        let groups = group_events(&events, 150.0);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].members.len(), 2);
        assert_eq!(groups[1].members[0].id, events[2].id);
    }

    #[test]
    fn grouping_depends_on_input_order() {
        let a = event_at(0.0, 0.0);
        let b = event_at(0.0, 0.001);
        let c = event_at(0.0, 0.002);

        let seeded_by_a = group_events(&[a.clone(), b.clone(), c.clone()], 150.0);
        let seeded_by_b = group_events(&[b, a, c], 150.0);

        assert_eq!(seeded_by_a.len(), 2);
        assert_eq!(seeded_by_b.len(), 1);
    }

    #[test]
    fn members_keep_discovery_order() {
        let events = vec![
            event_at(0.0, 0.0),
            event_at(5.0, 5.0),
            event_at(0.0, 0.000_1),
            event_at(0.0, 0.000_2),
        ];
        let groups = group_events(&events, 100.0);
        let ids: Vec<Uuid> = groups[0].members.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![events[0].id, events[2].id, events[3].id]);
    }

    #[test]
    fn build_clusters_assigns_sequential_ids_and_annotations() {
        let events = vec![
            event_at(0.0, 0.0),
            event_at(0.0, 0.000_5),
            event_at(20.0, 20.0),
        ];

        let clusters = build_clusters(&events, 200.0);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].id, ClusterId(0));
        assert_eq!(clusters[1].id, ClusterId(1));
        assert_eq!(clusters[0].size(), 2);
        assert_eq!(clusters[0].name, "Event Area");
        assert_eq!(clusters[0].description, "2 events with 2 attending");
        assert_eq!(clusters[1].description, "1 event with 1 attending");
    }
}
