use anyhow::{Context, Result};
use catalog::{
    config::{myconfig::Config, server_config::ServerConfig},
    handler::ProductRpcHandler,
    kafka::rpc_server::KafkaRpcServer,
    metrics::metrics_router,
    state::AppState,
};
use shared::{
    abstract_trait::DynKafka,
    config::{ConnectionManager, ConnectionPool, Kafka},
    utils::{Telemetry, init_logger},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, sync::broadcast};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const SERVICE_NAME: &str = "catalog-service";

#[tokio::main]
async fn main() -> Result<()> {
    let (config, server_config, state, telemetry, _log_guard) =
        setup().await.context("Failed to setup application")?;

    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);

    let server_handles = run_servers(config, server_config, state, shutdown_tx.clone())
        .await
        .context("Failed to start servers")?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("🛑 Shutdown signal received (Ctrl+C).");
        }
        _ = shutdown_rx.recv() => {
            info!("🛑 Shutdown signal received from internal component.");
        }
    }

    shutdown(telemetry, server_handles).await;

    Ok(())
}

async fn setup() -> Result<(Config, ServerConfig, Arc<AppState>, Telemetry, WorkerGuard)> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;
    let server_config = ServerConfig::from_config(&config)?;

    let telemetry = Telemetry::init(SERVICE_NAME, &config.otel_endpoint)
        .context("Failed to initialize telemetry")?;

    let log_guard = init_logger(telemetry.logger_provider(), SERVICE_NAME);

    info!("🚀 Starting Catalog Service initialization...");

    let db_pool = ConnectionManager::new_pool(
        &server_config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
        info!("✅ Database migrations applied");
    }

    let state = Arc::new(AppState::new(db_pool));

    info!("✅ Application setup completed successfully.");
    Ok((config, server_config, state, telemetry, log_guard))
}

struct ServerHandles {
    kafka_handle: tokio::task::JoinHandle<()>,
    metrics_handle: tokio::task::JoinHandle<()>,
}

async fn run_servers(
    config: Config,
    server_config: ServerConfig,
    state: Arc<AppState>,
    shutdown_tx: broadcast::Sender<()>,
) -> Result<ServerHandles> {
    let handler = Arc::new(state.di_container.rpc_handler());

    let kafka = Kafka::new(&config.kafka_broker).context("Failed to create Kafka producer")?;

    let kafka_handle = spawn_rpc_server(config, kafka, handler, shutdown_tx.clone());

    let metrics_handle = run_metrics_server(state, server_config.metric_addr, shutdown_tx.clone());

    shutdown_listener(shutdown_tx);

    Ok(ServerHandles {
        kafka_handle,
        metrics_handle,
    })
}

fn spawn_rpc_server(
    config: Config,
    kafka: Kafka,
    handler: Arc<ProductRpcHandler>,
    shutdown_tx: broadcast::Sender<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let shutdown_rx = shutdown_tx.subscribe();
        let publisher: DynKafka = Arc::new(kafka.clone());

        loop {
            info!("🔄 Starting Kafka RPC server...");

            let consumer = match kafka.consumer(&config.kafka_group_id) {
                Ok(consumer) => consumer,
                Err(e) => {
                    error!("💀 Failed to create Kafka consumer: {e}. Restarting in 5s...");
                    tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
                    continue;
                }
            };

            let server = KafkaRpcServer::new(
                consumer,
                handler.clone(),
                publisher.clone(),
                config.rpc_topic_prefix.clone(),
            );

            let server_shutdown_rx = shutdown_rx.resubscribe();
            let kafka_task =
                tokio::spawn(async move { server.start_with_shutdown(server_shutdown_rx).await });

            match kafka_task.await {
                Ok(Ok(())) => {
                    info!("✅ Kafka RPC server stopped gracefully");
                    break;
                }
                Ok(Err(e)) => {
                    error!("💀 Kafka RPC server error: {e}. Restarting in 5s...");
                }
                Err(e) => {
                    if e.is_cancelled() {
                        info!("Kafka RPC task cancelled during shutdown");
                        break;
                    } else {
                        error!("💀 Kafka RPC task panicked: {e}. Restarting in 5s...");
                    }
                }
            }

            tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
        }
    })
}

fn run_metrics_server(
    state: Arc<AppState>,
    addr: SocketAddr,
    shutdown_tx: broadcast::Sender<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let shutdown_rx = shutdown_tx.subscribe();

        loop {
            info!("📡 Attempting to start metrics server on {addr}");

            match start_metrics_server(state.clone(), addr, shutdown_rx.resubscribe()).await {
                Ok(()) => {
                    info!("✅ Metrics server stopped gracefully");
                    break;
                }
                Err(e) => {
                    error!("❌ Metrics server failed: {e}. Restarting in 5s...");
                    tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
                }
            }
        }
    })
}

async fn start_metrics_server(
    state: Arc<AppState>,
    addr: SocketAddr,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind metrics server on {addr}"))?;

    info!("📡 Metrics server listening on {addr}");

    axum::serve(listener, metrics_router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Metrics server received shutdown signal");
        })
        .await
        .context("Metrics server failed")
}

fn shutdown_listener(shutdown_tx: broadcast::Sender<()>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("🛑 Ctrl+C signal detected, broadcasting shutdown...");
                if let Err(e) = shutdown_tx.send(()) {
                    warn!("Failed to send shutdown signal: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to listen for shutdown signal: {}", e);
            }
        }
    });
}

async fn shutdown(telemetry: Telemetry, server_handles: ServerHandles) {
    info!("🛑 Shutting down all servers...");

    let shutdown_timeout = tokio::time::Duration::from_secs(30);
    let shutdown_result = tokio::time::timeout(shutdown_timeout, async {
        let _ = tokio::join!(server_handles.kafka_handle, server_handles.metrics_handle);
    })
    .await;

    match shutdown_result {
        Ok(()) => info!("✅ All components shutdown gracefully"),
        Err(_) => {
            warn!("⚠️  Shutdown timeout reached, forcing exit");
        }
    }

    if let Err(e) = telemetry.shutdown() {
        error!("Failed to shutdown telemetry: {}", e);
    }

    info!("✅ Catalog Service shutdown complete.");
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
