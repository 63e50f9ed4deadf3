// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use github_telex::config::settings::Settings;
use github_telex::domain::services::event_translator::EventTranslator;
use github_telex::infrastructure::metrics;
use github_telex::infrastructure::services::telex_relay_service_impl::TelexRelayServiceImpl;
use github_telex::presentation::routes;
use github_telex::utils::telemetry;
use github_telex::workers::spawn_relay_worker;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting github-telex...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!(
        integration = %settings.integration.id,
        enabled = settings.integration.enabled,
        "Configuration loaded"
    );

    // 3. Metrics
    metrics::init_metrics(&settings.metrics);

    // 4. Start relay worker
    let relay_service = Arc::new(TelexRelayServiceImpl::new(settings.telex.timeout())?);
    let (dispatcher, worker_handle) = spawn_relay_worker(relay_service, &settings.relay);
    info!("Relay worker initialized");

    // 5. Start HTTP server
    let app = routes::routes(
        settings.clone(),
        Arc::new(EventTranslator::default()),
        dispatcher,
    );

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last dispatcher, so the worker now drains and exits
    info!("Server stopped, draining relay queue...");
    let grace = Duration::from_secs(settings.relay.shutdown_grace_secs);
    match tokio::time::timeout(grace, worker_handle).await {
        Ok(Ok(())) => info!("Relay worker shut down successfully"),
        Ok(Err(e)) => error!("Relay worker terminated abnormally: {}", e),
        Err(_) => warn!(
            "Relay queue not drained within {}s, pending messages dropped",
            grace.as_secs()
        ),
    }

    Ok(())
}

/// 等待关闭信号
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Unable to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("Unable to listen for SIGTERM: {}", err);
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

    info!("Shutdown signal received");
}
