use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionStore};
use crate::routes::with_analysis_routes;
use assessment_ai::config::AppConfig;
use assessment_ai::error::AppError;
use assessment_ai::telemetry;
use assessment_ai::workflows::gateway::GeminiGateway;
use assessment_ai::workflows::report::ReportPromptBuilder;
use assessment_ai::workflows::session::AnalysisService;
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

    telemetry::init(&config.telemetry, config.environment)?;

    let gateway = match GeminiGateway::from_config(&config.gemini) {
        Ok(gateway) => {
            info!(model = gateway.model(), "AI gateway configured");
            Some(Arc::new(gateway))
        }
        Err(err) => {
            warn!(error = %err, "report generation and chat disabled");
            None
        }
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        ai_enabled: gateway.is_some(),
    };

    let service = Arc::new(AnalysisService::new(
        Arc::new(InMemorySessionStore::default()),
        gateway,
        ReportPromptBuilder::new(&config.report),
    ));

    let app = with_analysis_routes::<GeminiGateway, InMemorySessionStore>(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "assessment insight service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
