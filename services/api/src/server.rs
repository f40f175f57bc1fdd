use crate::cli::ServeArgs;
use crate::infra::{AppState, FileWorldSkillsSource};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use robo_awards::awards::{EligibilityEngine, WorldSkillsCache};
use robo_awards::config::AppConfig;
use robo_awards::error::AppError;
use robo_awards::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let mut cache = WorldSkillsCache::new();
    if let Some(path) = args.world_skills.take() {
        let source = FileWorldSkillsSource::from_path(config.program, &path)?;
        cache.refresh(config.program, &source)?;
    }
    let world_skills = cache.shared();

    let engine = Arc::new(
        EligibilityEngine::new(config.eligibility).with_world_skills(world_skills.clone()),
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine: engine.clone(),
        world_skills,
        program: config.program,
    };

    let app = with_application_routes(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        program = config.program.profile().short_label,
        "award eligibility service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
