use serde::{Serialize, Serializer};
use spotlight_core::{Coordinate, Event};

/// Identifier of a cluster within one clustering pass.
///
/// Ids follow discovery order and are only stable while the same input is
/// clustered with the same radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterId(pub u32);

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cluster-{}", self.0)
    }
}

impl std::str::FromStr for ClusterId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("cluster-").unwrap_or(s).parse().map(ClusterId)
    }
}

// Serialized as its display string so it can key JSON objects.
impl Serialize for ClusterId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A group of nearby events rendered as a single map marker.
#[derive(Debug, Clone, Serialize)]
pub struct Cluster {
    pub id: ClusterId,
    pub name: String,
    pub description: String,
    pub center: Coordinate,
    pub hot: bool,
    /// Members in discovery order; the first entry is the seed.
    pub events: Vec<Event>,
}

impl Cluster {
    #[must_use]
    pub fn size(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn marker(&self) -> MapMarker {
        MapMarker {
            cluster_id: self.id,
            coordinate: self.center,
            count: self.events.len(),
            hot: self.hot,
        }
    }
}

/// Lightweight projection of a [`Cluster`] for map pins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapMarker {
    pub cluster_id: ClusterId,
    pub coordinate: Coordinate,
    pub count: usize,
    pub hot: bool,
}

/// Parameters of a clustering pass; also the cache key.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterQuery {
    pub radius_m: f64,
    /// Restrict the fetched events to one genre tag.
    pub genre: Option<String>,
}

impl ClusterQuery {
    #[must_use]
    pub fn new(radius_m: f64) -> Self {
        Self {
            radius_m,
            genre: None,
        }
    }

    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }
}
