use std::{process, sync::Arc};

use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;
use vetrina::{
    application::{error::AppError, pages::PageService, posts::PostService, repos::ContentRepo},
    cache::CacheConfig,
    config,
    infra::{db::PostgresStore, http, telemetry},
};

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
    let (cli_args, mut settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(config::ServeArgs::default()));

    match command {
        config::Command::Serve(args) => {
            args.overrides.apply(&mut settings);
            telemetry::init(&settings.logging).map_err(AppError::from)?;
            run_serve(settings).await
        }
        config::Command::Migrate(args) => {
            if let Some(url) = args.database_url {
                settings.database.url = url;
            }
            telemetry::init(&settings.logging).map_err(AppError::from)?;
            run_migrate(settings).await
        }
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let store = connect_store(&settings).await?;

    let repo: Arc<dyn ContentRepo> = Arc::new(store.clone());
    let posts = Arc::new(PostService::new(Arc::clone(&repo)));
    let pages = Arc::new(PageService::new(repo, CacheConfig::from(&settings.cache)));

    let summary = pages.warm().await;
    info!(
        target: "vetrina::startup",
        generated = summary.generated,
        failed = summary.failed,
        "pre-generated pages for known posts"
    );

    let state = http::ApiState { posts, pages };
    let router = http::build_router(state).merge(http::health_router(Arc::new(store)));

    http::serve(&settings.server, router)
        .await
        .map_err(AppError::from)
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    let store = connect_store(&settings).await?;
    info!(target: "vetrina::startup", "migrations applied");
    drop(store);
    Ok(())
}

/// Connects the pool and applies pending migrations.
async fn connect_store(settings: &config::Settings) -> Result<PostgresStore, AppError> {
    let pool = PostgresStore::connect(&settings.database.url, settings.database.max_connections)
        .await
        .map_err(|err| {
            AppError::unexpected(format!(
                "could not connect to database at startup: {err}"
            ))
        })?;

    PostgresStore::run_migrations(&pool)
        .await
        .map_err(|err| AppError::unexpected(format!("could not apply migrations: {err}")))?;

    Ok(PostgresStore::new(pool))
}
