use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use spotlight_cluster::{Cluster, ClusterId, ClusterQuery, EventSource, MapMarker};
use spotlight_core::Coordinate;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ClustersQuery {
    pub radius_m: Option<f64>,
    pub genre: Option<String>,
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct NearestQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius_m: Option<f64>,
    pub genre: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct NearestItem {
    pub cluster_id: Option<ClusterId>,
}

#[derive(Debug, Serialize)]
pub(super) struct InvalidatedItem {
    pub invalidated: bool,
}

fn cluster_query<S>(
    state: &AppState<S>,
    req_id: &RequestId,
    radius_m: Option<f64>,
    genre: Option<String>,
) -> Result<ClusterQuery, ApiError> {
    let radius_m = radius_m.unwrap_or(state.default_radius_m);
    if radius_m.is_nan() {
        return Err(ApiError::new(
            req_id.0.clone(),
            "validation_error",
            "radius_m must be a number",
        ));
    }
    let query = ClusterQuery::new(radius_m);
    Ok(match genre.filter(|g| !g.trim().is_empty()) {
        Some(genre) => query.with_genre(genre),
        None => query,
    })
}

pub(super) async fn list_clusters<S: EventSource + 'static>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<ClustersQuery>,
) -> Result<Json<ApiResponse<BTreeMap<ClusterId, Cluster>>>, ApiError> {
    let query = cluster_query(&state, &req_id, params.radius_m, params.genre)?;
    let data = state.clusters.cluster_details(&query, params.refresh).await;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_markers<S: EventSource + 'static>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<ClustersQuery>,
) -> Result<Json<ApiResponse<Vec<MapMarker>>>, ApiError> {
    let query = cluster_query(&state, &req_id, params.radius_m, params.genre)?;
    let data = state.clusters.map_markers(&query, params.refresh).await;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn nearest_cluster<S: EventSource + 'static>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<NearestQuery>,
) -> Result<Json<ApiResponse<NearestItem>>, ApiError> {
    let point = Coordinate::new(params.lat, params.lng);
    if !point.is_valid() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "lat must be within [-90, 90] and lng within [-180, 180]",
        ));
    }
    let query = cluster_query(&state, &req_id, params.radius_m, params.genre)?;
    let cluster_id = state.clusters.nearest_cluster(&query, point).await;

    Ok(Json(ApiResponse {
        data: NearestItem { cluster_id },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn invalidate_clusters<S: EventSource + 'static>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<InvalidatedItem>> {
    state.clusters.invalidate().await;
    tracing::info!(request_id = %req_id.0, "cluster cache invalidated by request");

    Json(ApiResponse {
        data: InvalidatedItem { invalidated: true },
        meta: ResponseMeta::new(req_id.0),
    })
}
