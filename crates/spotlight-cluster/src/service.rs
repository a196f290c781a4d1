//! Get-or-compute cache in front of the clustering pass.
//!
//! The cache holds a single entry keyed by [`ClusterQuery`]. A fetch failure
//! yields an empty cluster set and leaves the slot untouched, so the next call
//! retries. Concurrent cold calls each fetch and compute; the last to finish
//! owns the slot.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use spotlight_core::{haversine_distance_m, Coordinate, Event};
use tokio::sync::RwLock;

use crate::builder::build_clusters;
use crate::clock::{Clock, SystemClock};
use crate::source::EventSource;
use crate::types::{Cluster, ClusterId, ClusterQuery, MapMarker};

/// Default freshness window for a cached cluster set.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(5 * 60);

/// Default maximum distance for [`ClusterService::nearest_cluster`].
pub const DEFAULT_NEAREST_THRESHOLD_M: f64 = 500.0;

struct CacheEntry {
    query: ClusterQuery,
    clusters: Arc<[Cluster]>,
    computed_at: DateTime<Utc>,
}

/// Clusters events from an [`EventSource`] and memoizes the result.
pub struct ClusterService<S, C = SystemClock> {
    source: S,
    clock: C,
    freshness: Duration,
    nearest_threshold_m: f64,
    slot: RwLock<Option<CacheEntry>>,
}

impl<S: EventSource> ClusterService<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_clock(source, SystemClock)
    }
}

impl<S: EventSource, C: Clock> ClusterService<S, C> {
    #[must_use]
    pub fn with_clock(source: S, clock: C) -> Self {
        Self {
            source,
            clock,
            freshness: DEFAULT_FRESHNESS,
            nearest_threshold_m: DEFAULT_NEAREST_THRESHOLD_M,
            slot: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn freshness(mut self, window: Duration) -> Self {
        self.freshness = window;
        self
    }

    #[must_use]
    pub fn nearest_threshold_m(mut self, threshold_m: f64) -> Self {
        self.nearest_threshold_m = threshold_m;
        self
    }

    /// Return the cluster set for `query`, recomputing when the cached set is
    /// missing, empty, stale, for a different query, or `force_refresh` is set.
    ///
    /// Never fails: a fetch error or a NaN radius is logged and produces an
    /// empty set without touching the cache.
    pub async fn clusters(&self, query: &ClusterQuery, force_refresh: bool) -> Arc<[Cluster]> {
        if query.radius_m.is_nan() {
            tracing::warn!("cluster radius is NaN; returning no clusters");
            return Arc::from(Vec::new());
        }

        if !force_refresh {
            if let Some(hit) = self.fresh_entry(query).await {
                tracing::debug!(clusters = hit.len(), "cluster cache hit");
                return hit;
            }
        }

        let events = match self.source.fetch_events(query.genre.as_deref()).await {
            Ok(events) => events,
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    genre = query.genre.as_deref(),
                    "event fetch failed; returning no clusters"
                );
                return Arc::from(Vec::new());
            }
        };

        let fetched = events.len();
        let events: Vec<Event> = events
            .into_iter()
            .filter(Event::has_valid_coordinates)
            .collect();
        if events.len() < fetched {
            tracing::debug!(
                dropped = fetched - events.len(),
                "skipping events with invalid coordinates"
            );
        }

        let clusters: Arc<[Cluster]> = build_clusters(&events, query.radius_m).into();
        tracing::info!(
            events = events.len(),
            clusters = clusters.len(),
            radius_m = query.radius_m,
            genre = query.genre.as_deref(),
            "recomputed event clusters"
        );

        *self.slot.write().await = Some(CacheEntry {
            query: query.clone(),
            clusters: Arc::clone(&clusters),
            computed_at: self.clock.now(),
        });

        clusters
    }

    /// Full cluster detail keyed by id, for list and detail views.
    pub async fn cluster_details(
        &self,
        query: &ClusterQuery,
        force_refresh: bool,
    ) -> BTreeMap<ClusterId, Cluster> {
        self.clusters(query, force_refresh)
            .await
            .iter()
            .map(|cluster| (cluster.id, cluster.clone()))
            .collect()
    }

    /// One marker per cluster, for map pins.
    pub async fn map_markers(&self, query: &ClusterQuery, force_refresh: bool) -> Vec<MapMarker> {
        self.clusters(query, force_refresh)
            .await
            .iter()
            .map(Cluster::marker)
            .collect()
    }

    /// Id of the cluster whose center is closest to `point`, if it lies within
    /// the proximity threshold.
    pub async fn nearest_cluster(
        &self,
        query: &ClusterQuery,
        point: Coordinate,
    ) -> Option<ClusterId> {
        let clusters = self.clusters(query, false).await;
        clusters
            .iter()
            .map(|cluster| (cluster.id, haversine_distance_m(point, cluster.center)))
            .filter(|(_, distance)| *distance <= self.nearest_threshold_m)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(id, _)| id)
    }

    /// Drop the cached set so the next call refetches.
    ///
    /// Call after any event is created, updated, or deleted.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
        tracing::debug!("cluster cache invalidated");
    }

    /// When the cached set was computed, if one is held.
    pub async fn cached_at(&self) -> Option<DateTime<Utc>> {
        self.slot.read().await.as_ref().map(|entry| entry.computed_at)
    }

    async fn fresh_entry(&self, query: &ClusterQuery) -> Option<Arc<[Cluster]>> {
        let slot = self.slot.read().await;
        let entry = slot.as_ref()?;
        if entry.query != *query || entry.clusters.is_empty() {
            return None;
        }
        // A negative age means the clock stepped back; treat as fresh.
        let fresh = (self.clock.now() - entry.computed_at)
            .to_std()
            .map_or(true, |age| age < self.freshness);
        fresh.then(|| Arc::clone(&entry.clusters))
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
