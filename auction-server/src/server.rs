use {
    crate::{
        api,
        auction::service::{
            self,
            Service,
        },
        config::RunOptions,
        per_metrics,
        state::Store,
    },
    anyhow::anyhow,
    sqlx::postgres::PgPoolOptions,
    std::{
        future::Future,
        sync::Arc,
    },
    tokio_util::sync::CancellationToken,
};

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?err, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Runs `task` and asks every other task to exit once it returns.
async fn run_until_exit<F>(name: &str, task: F, exit_token: CancellationToken) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<()>>,
{
    let result = task.await;
    if let Err(err) = &result {
        tracing::error!(task = name, error = ?err, "Task failed");
    }
    exit_token.cancel();
    result
}

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    let exit_token = CancellationToken::new();
    tokio::spawn({
        let exit_token = exit_token.clone();
        async move {
            tracing::info!("Registered shutdown signal handler...");
            shutdown_signal().await;
            tracing::info!("Shut down signal received, waiting for tasks...");
            exit_token.cancel();
        }
    });

    let metrics_recorder = per_metrics::setup_metrics_recorder()?;

    let pool = PgPoolOptions::new()
        .max_connections(run_options.server.database_max_connections)
        .connect(&run_options.server.database_url)
        .await
        .map_err(|err| anyhow!("Failed to connect to database: {:?}", err))?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|err| anyhow!("Failed to run migrations: {:?}", err))?;

    let config = service::Config {
        auction_duration: run_options.auction.auction_duration(),
        check_interval:   run_options.auction.check_interval(),
    };
    tracing::info!(
        auction_duration = ?config.auction_duration,
        check_interval = ?config.check_interval,
        "Starting auction service..."
    );
    let auction_service = Service::new(pool, config);
    auction_service.start();

    let store = Arc::new(Store {
        auction_service: auction_service.clone(),
    });

    let (api_result, metrics_result) = tokio::join!(
        run_until_exit(
            "api",
            api::start_api(run_options.clone(), store, exit_token.clone()),
            exit_token.clone(),
        ),
        run_until_exit(
            "metrics",
            per_metrics::start_metrics(run_options.clone(), metrics_recorder, exit_token.clone()),
            exit_token.clone(),
        ),
    );

    auction_service.stop().await;
    api_result?;
    metrics_result?;
    tracing::info!("Server stopped");
    Ok(())
}
