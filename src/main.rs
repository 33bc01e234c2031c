use std::{future::IntoFuture, process, sync::Arc, time::Duration};

use booktrack::{
    application::error::AppError,
    cache::{CacheConfig, QueryCache},
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, ApiState},
        telemetry,
    },
};
use tokio::{sync::Notify, task::JoinHandle};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;
    info!(
        target = "booktrack::startup",
        profile = %cli_args.profile,
        "configuration loaded"
    );

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;

    let cache = Arc::new(QueryCache::new(CacheConfig::from(&settings.cache)));
    let sweeper = spawn_cache_sweeper(cache.clone());
    let api_state = ApiState::from_repositories(repositories, cache);

    let result = serve_http(&settings, api_state).await;

    if let Some(handle) = sweeper {
        handle.abort();
        let _ = handle.await;
    }

    result
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(AppError::from)?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn spawn_cache_sweeper(cache: Arc<QueryCache>) -> Option<JoinHandle<()>> {
    if !cache.config().enabled {
        return None;
    }
    let period = cache.config().sweep_interval()?;

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await; // Skip the first immediate tick
        loop {
            interval.tick().await;
            let purged = cache.purge_expired();
            if purged > 0 {
                info!(
                    target = "booktrack::cache",
                    purged,
                    remaining = cache.len(),
                    "swept expired cache entries"
                );
            }
        }
    }))
}

async fn serve_http(settings: &config::Settings, api_state: ApiState) -> Result<(), AppError> {
    let router = http::build_router(api_state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(
        target = "booktrack::startup",
        addr = %settings.server.addr,
        "listening"
    );

    let shutdown = Arc::new(Notify::new());
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown({
            let shutdown = shutdown.clone();
            async move { shutdown.notified().await }
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            return result.map_err(|err| AppError::from(InfraError::server(err.to_string())));
        }
        _ = shutdown_signal() => {
            info!(target = "booktrack::shutdown", "shutdown requested, draining connections");
            shutdown.notify_one();
        }
    }

    drain(server, settings.server.graceful_shutdown).await
}

async fn drain<F>(server: F, grace: Duration) -> Result<(), AppError>
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    match tokio::time::timeout(grace, server).await {
        Ok(result) => result.map_err(|err| AppError::from(InfraError::server(err.to_string()))),
        Err(_) => {
            warn!(
                target = "booktrack::shutdown",
                grace_seconds = grace.as_secs(),
                "graceful shutdown timed out"
            );
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
