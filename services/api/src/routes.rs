use crate::infra::AppState;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use study_planner::auth::AuthState;
use study_planner::budget::{BudgetSummary, MonthlyBudget};
use study_planner::catalog::{CostCategory, Entity, EntityId};
use study_planner::comparison::{
    AggregateView, Bar, ComparisonWorkspace, DonutChart, SelectionEvent,
};
use study_planner::currency::{convert, swap, Conversion};
use study_planner::error::AppError;
use study_planner::journey::{
    journey_profile_router, JourneyProfileRepository, JourneyProfileService,
};

const TOTAL_BAR_LENGTH: f64 = 200.0;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CitiesQuery {
    #[serde(default)]
    pub(crate) query: Option<String>,
    #[serde(default)]
    pub(crate) show_all: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct CitiesResponse {
    pub(crate) query: String,
    pub(crate) total_matches: usize,
    pub(crate) hidden: usize,
    pub(crate) cities: Vec<Entity>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareRequest {
    /// Toggled in order, so later ids can evict earlier ones once full.
    pub(crate) city_ids: Vec<EntityId>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CityChart {
    pub(crate) entity_id: EntityId,
    pub(crate) chart: DonutChart,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompareResponse {
    pub(crate) selection: Vec<EntityId>,
    pub(crate) evicted: Vec<EntityId>,
    pub(crate) currency: String,
    pub(crate) comparison: Option<AggregateView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) total_bars: Vec<Bar>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) cost_charts: Vec<CityChart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConvertRequest {
    pub(crate) amount: f64,
    pub(crate) from: String,
    pub(crate) to: String,
    #[serde(default)]
    pub(crate) swap: bool,
}

/// Budget inputs arrive as typed into the form, so both `"950"` and `950` work.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    fn as_input(&self) -> String {
        match self {
            RawAmount::Number(value) => value.to_string(),
            RawAmount::Text(value) => value.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BudgetRequest {
    #[serde(default = "default_budget_currency")]
    pub(crate) currency: String,
    #[serde(default)]
    pub(crate) accommodation: Option<RawAmount>,
    #[serde(default)]
    pub(crate) food: Option<RawAmount>,
    #[serde(default)]
    pub(crate) transportation: Option<RawAmount>,
    #[serde(default)]
    pub(crate) utilities: Option<RawAmount>,
    #[serde(default)]
    pub(crate) entertainment: Option<RawAmount>,
    #[serde(default)]
    pub(crate) education: Option<RawAmount>,
}

fn default_budget_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Serialize)]
pub(crate) struct BudgetResponse {
    #[serde(flatten)]
    pub(crate) summary: BudgetSummary,
    pub(crate) chart: Option<DonutChart>,
}

pub(crate) fn with_planner_routes<R>(service: Arc<JourneyProfileService<R>>) -> axum::Router
where
    R: JourneyProfileRepository + 'static,
{
    journey_profile_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/cities", axum::routing::get(cities_endpoint))
        .route("/api/v1/compare", axum::routing::post(compare_endpoint))
        .route(
            "/api/v1/currency/convert",
            axum::routing::post(convert_endpoint),
        )
        .route("/api/v1/budget", axum::routing::post(budget_endpoint))
        .route("/api/v1/session", axum::routing::get(session_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn cities_endpoint(
    Extension(state): Extension<AppState>,
    Query(params): Query<CitiesQuery>,
) -> Json<CitiesResponse> {
    let mut workspace = ComparisonWorkspace::new(&state.catalog, &state.planner);
    workspace.set_show_all(params.show_all);
    if let Some(query) = params.query {
        workspace.set_query(query);
    }

    let page = workspace.visible();
    Json(CitiesResponse {
        query: workspace.query().to_string(),
        total_matches: page.total_matches,
        hidden: page.hidden,
        cities: page.visible.into_iter().cloned().collect(),
    })
}

pub(crate) async fn compare_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    let mut workspace = ComparisonWorkspace::new(&state.catalog, &state.planner);
    let mut evicted = Vec::new();
    for id in payload.city_ids {
        if let SelectionEvent::Replaced { evicted: dropped, .. } = workspace.toggle(id) {
            evicted.push(dropped);
        }
    }

    let comparison = workspace.aggregate();
    let total_bars = if comparison.is_some() {
        workspace.total_bars(TOTAL_BAR_LENGTH)?
    } else {
        Vec::new()
    };

    let mut cost_charts = Vec::new();
    for entity in workspace.selected() {
        if let Some(chart) = workspace.cost_chart(&entity.id) {
            cost_charts.push(CityChart {
                entity_id: entity.id.clone(),
                chart: chart?,
            });
        }
    }

    Ok(Json(CompareResponse {
        selection: workspace.selection().ids().to_vec(),
        evicted,
        currency: state.planner.reporting_currency.clone(),
        comparison,
        total_bars,
        cost_charts,
    }))
}

pub(crate) async fn convert_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ConvertRequest>,
) -> Result<Json<Conversion>, AppError> {
    let ConvertRequest {
        amount,
        from,
        to,
        swap: swapped,
    } = payload;
    let (from, to) = if swapped { swap(from, to) } else { (from, to) };

    let conversion = convert(amount, &from, &to, &state.currencies)?;
    Ok(Json(conversion))
}

pub(crate) async fn budget_endpoint(Json(payload): Json<BudgetRequest>) -> Json<BudgetResponse> {
    let mut budget = MonthlyBudget::starter(payload.currency);
    let overrides = [
        (CostCategory::Accommodation, payload.accommodation),
        (CostCategory::Food, payload.food),
        (CostCategory::Transportation, payload.transportation),
        (CostCategory::Utilities, payload.utilities),
        (CostCategory::Entertainment, payload.entertainment),
        (CostCategory::Education, payload.education),
    ];
    for (category, raw) in overrides {
        if let Some(raw) = raw {
            budget.set_amount(category, &raw.as_input());
        }
    }

    let summary = budget.summary();
    // An all-zero plan has nothing to chart.
    let chart = summary.donut().ok();
    Json(BudgetResponse { summary, chart })
}

pub(crate) async fn session_endpoint(Extension(state): Extension<AppState>) -> Response {
    match state.auth.current_user() {
        Some(user) => Json(user).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "not signed in" })),
        )
            .into_response(),
    }
}
