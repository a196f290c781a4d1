//! Greedy radius clustering of geotagged events for map display.
//!
//! [`build_clusters`] is the synchronous core; [`ClusterService`] wraps it in a
//! time-bounded single-slot cache fed by an [`EventSource`].

pub mod annotate;
pub mod builder;
pub mod clock;
pub mod service;
pub mod source;
pub mod types;

pub use annotate::{cluster_description, cluster_name};
pub use builder::{build_clusters, group_events, EventGroup, HOT_CLUSTER_MIN_SIZE};
pub use clock::{Clock, SystemClock};
pub use service::{ClusterService, DEFAULT_FRESHNESS, DEFAULT_NEAREST_THRESHOLD_M};
pub use source::{EventSource, FetchError};
pub use types::{Cluster, ClusterId, ClusterQuery, MapMarker};
