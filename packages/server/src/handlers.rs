//! HTTP handler functions for the massacre map API.
//!
//! Every selection endpoint rebuilds a [`DashboardState`] from the shared
//! dataset and the request's `governor`/`q` parameters. Nothing is cached
//! between requests.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use massacre_map_analytics::{DashboardState, governors as list_governors};
use massacre_map_incident_models::VictimCategory;
use massacre_map_server_models::{ApiCategory, ApiHealth, SelectionParams};

use crate::AppState;

fn selection(state: &AppState, params: &SelectionParams) -> DashboardState {
    DashboardState::select(
        Arc::clone(&state.dataset),
        params.selector(),
        params.query().to_string(),
    )
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.dataset.len(),
    })
}

/// `GET /api/categories`
///
/// Returns the victim categories with their labels.
pub async fn categories() -> HttpResponse {
    let categories: Vec<ApiCategory> = VictimCategory::all()
        .iter()
        .copied()
        .map(ApiCategory::from)
        .collect();

    HttpResponse::Ok().json(categories)
}

/// `GET /api/governors`
///
/// Returns the distinct governors of the full dataset, sorted.
pub async fn governors(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(list_governors(&state.dataset))
}

/// `GET /api/incidents`
///
/// Returns the records matching `governor` and `q`, in source order.
pub async fn incidents(
    state: web::Data<AppState>,
    params: web::Query<SelectionParams>,
) -> HttpResponse {
    let view = selection(&state, &params);
    HttpResponse::Ok().json(view.active())
}

/// `GET /api/statistics`
///
/// Returns summary statistics of the records matching `governor` and `q`.
pub async fn statistics(
    state: web::Data<AppState>,
    params: web::Query<SelectionParams>,
) -> HttpResponse {
    let view = selection(&state, &params);
    HttpResponse::Ok().json(view.statistics())
}

/// `GET /api/timeline`
///
/// Returns the yearly stacked timeline of the records matching `governor`
/// and `q`.
pub async fn timeline(
    state: web::Data<AppState>,
    params: web::Query<SelectionParams>,
) -> HttpResponse {
    let view = selection(&state, &params);
    HttpResponse::Ok().json(view.timeline())
}
