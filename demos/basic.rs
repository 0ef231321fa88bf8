use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use tracing_elastic_hook::elasticsearch::{ElasticsearchBackend, ElasticsearchConfig};
use tracing_elastic_hook::hook::ElasticHook;
use tracing_elastic_hook::init::init_tracing;
use tracing_elastic_hook::level::Severity;

#[tokio::main]
async fn main() {
    let backend = Arc::new(ElasticsearchBackend::new(ElasticsearchConfig {
        base_url: "http://localhost:9200".to_string(),
        username: None,
        password: None,
    }));

    // Daily index rotation: logs-2026.08.07, logs-2026.08.08, ...
    let hook = ElasticHook::new(
        backend,
        "demo-host",
        Severity::Info,
        || format!("logs-{}", Utc::now().format("%Y.%m.%d")),
        Duration::from_secs(1),
    )
    .await
    .expect("connect to elasticsearch");

    let hook = Arc::new(hook);
    init_tracing(hook.clone());

    info!("starting service");

    error!(
        user_id = 42,
        reason = "invalid password",
        "authentication failed"
    );

    tokio::time::sleep(Duration::from_secs(2)).await;

    hook.flush().await.expect("flush buffered log entries");
    hook.cancel();
}
