//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use super::dto::{
    HealthResponse, PanelQuery, PanelRequest, UnpivotRequest, UnpivotResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{FilterControls, FilterSelection, MemberMetrics, PageContent, PanelData};
use crate::services::{self, EditOverlay, PanelKind, SortOrder};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn parse_panel(slug: &str) -> Result<PanelKind, AppError> {
    slug.parse().map_err(AppError::NotFound)
}

async fn default_selection(state: &AppState) -> Result<FilterSelection, AppError> {
    let observed = state.repository.workout_types().await?;
    Ok(services::default_selection(&observed, &state.config.panels))
}

/// Recompute a panel from the shared table on a blocking task.
async fn compute_panel(
    state: &AppState,
    kind: PanelKind,
    selection: FilterSelection,
    order: SortOrder,
    edits: Option<EditOverlay>,
) -> Result<PanelData, AppError> {
    let table = state.repository.sessions().await?;

    let data = tokio::task::spawn_blocking(move || {
        services::build_panel(&table, kind, selection, order, edits.as_ref())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    tracing::debug!(
        panel = kind.slug(),
        rows = data.table.rows().len(),
        columns = data.table.columns().len(),
        "panel computed"
    );
    Ok(data)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint reporting the loaded dataset. An empty dataset
/// reports `degraded`.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let healthy = state.repository.health_check().await?;
    let dataset = state.repository.dataset_info().await?;

    Ok(Json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: "v1".to_string(),
        dataset,
    }))
}

// =============================================================================
// Static Content
// =============================================================================

/// GET /v1/page
///
/// Landing page sections: product, classes, demo, FAQ, contact form.
pub async fn get_page_content(State(state): State<AppState>) -> HandlerResult<PageContent> {
    Ok(Json(services::page_content(&state.config.content)))
}

/// GET /v1/metrics
///
/// Average member BMI, resting BPM and fat percentage.
pub async fn get_member_metrics(State(state): State<AppState>) -> HandlerResult<MemberMetrics> {
    let table = state.repository.sessions().await?;
    Ok(Json(services::compute_member_metrics(&table)))
}

// =============================================================================
// Data Panels
// =============================================================================

/// GET /v1/filters
///
/// Options and defaults for the workout-type multiselect and duration slider.
pub async fn get_filter_controls(State(state): State<AppState>) -> HandlerResult<FilterControls> {
    let observed = state.repository.workout_types().await?;
    Ok(Json(services::filter_controls(&observed, &state.config.panels)))
}

/// GET /v1/panels/{panel}
///
/// Fresh grid and chart rows for a filter selection given in the query string.
pub async fn get_panel(
    State(state): State<AppState>,
    Path(panel): Path<String>,
    query: Result<Query<PanelQuery>, QueryRejection>,
) -> HandlerResult<PanelData> {
    let kind = parse_panel(&panel)?;
    let Query(query) = query?;
    let selection = query.selection(&default_selection(&state).await?);
    let order = query
        .order
        .unwrap_or_else(|| kind.default_order(&state.config.panels));

    let data = compute_panel(&state, kind, selection, order, None).await?;
    Ok(Json(data))
}

/// POST /v1/panels/{panel}
///
/// Same as the GET variant, with the client's grid edits applied before the
/// chart rows are built. Edits never reach the session data.
pub async fn post_panel(
    State(state): State<AppState>,
    Path(panel): Path<String>,
    payload: Result<Json<PanelRequest>, JsonRejection>,
) -> HandlerResult<PanelData> {
    let kind = parse_panel(&panel)?;
    let Json(request) = payload?;
    let selection = match request.selection {
        Some(selection) => selection,
        None => default_selection(&state).await?,
    };
    let order = request
        .order
        .unwrap_or_else(|| kind.default_order(&state.config.panels));

    let data = compute_panel(&state, kind, selection, order, request.edits).await?;
    Ok(Json(data))
}

/// POST /v1/unpivot
///
/// Flatten a client-held grid into chart rows. A ragged or duplicate-keyed
/// grid is rejected while decoding the body.
pub async fn post_unpivot(
    payload: Result<Json<UnpivotRequest>, JsonRejection>,
) -> HandlerResult<UnpivotResponse> {
    let Json(request) = payload?;
    let rows = request.table.unpivot();
    let total = rows.len();
    Ok(Json(UnpivotResponse { rows, total }))
}
