use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAlumniRepository, InMemorySearchLog, InMemoryWaitlist};
use crate::routes::with_service_routes;
use alumni_match::config::AppConfig;
use alumni_match::error::AppError;
use alumni_match::import::AlumniImporter;
use alumni_match::matching::MatchService;
use alumni_match::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.alumni_csv.take() {
        config.data.alumni_csv = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let records = match &config.data.alumni_csv {
        Some(path) => {
            let imported = AlumniImporter::new(config.data.default_college.clone()).from_path(path)?;
            info!(
                path = %path.display(),
                alumni = imported.records.len(),
                "loaded alumni export"
            );
            imported.records
        }
        None => {
            warn!("no alumni export configured; every match will be empty");
            Vec::new()
        }
    };

    let search_log = Arc::new(InMemorySearchLog::default());
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        admin_password: config.admin.password.as_deref().map(Arc::from),
        waitlist: Arc::new(InMemoryWaitlist::default()),
        search_log: search_log.clone(),
    };

    let match_service = Arc::new(MatchService::new(
        Arc::new(InMemoryAlumniRepository::with_records(records)),
        search_log,
    ));

    let app = with_service_routes(match_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "alumni match service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
