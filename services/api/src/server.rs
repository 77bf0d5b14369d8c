use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryJourneyProfileRepository};
use crate::routes::with_planner_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use study_planner::auth::{AuthState, StaticAuthState};
use study_planner::catalog::EntityCatalog;
use study_planner::config::AppConfig;
use study_planner::currency::CurrencyTable;
use study_planner::error::AppError;
use study_planner::journey::JourneyProfileService;
use study_planner::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let catalog = EntityCatalog::standard();
    config
        .planner
        .ensure_reporting_currency(EntityCatalog::STANDARD_PRICING_CURRENCY)?;
    // Sign-in is owned by the external identity provider; the service runs signed out.
    let auth: Arc<dyn AuthState> = Arc::new(StaticAuthState::anonymous());
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: Arc::new(catalog),
        currencies: Arc::new(CurrencyTable::standard()),
        planner: config.planner.clone(),
        auth,
    };

    let repository = Arc::new(InMemoryJourneyProfileRepository::default());
    let journey_service = Arc::new(JourneyProfileService::new(repository));

    let app = with_planner_routes(journey_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        selection_capacity = config.planner.selection_capacity,
        "study planner api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
