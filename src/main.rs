use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blobgate::api;
use blobgate::config;
use blobgate::state::AppState;
use blobgate::storage::S3Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blobgate=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let app_config = config::load_config().map_err(|e| anyhow::anyhow!(e))?;

    // Missing bucket is a fatal startup error / 缺少存储桶配置直接退出
    if app_config.s3.bucket.is_empty() {
        anyhow::bail!("You must specify a bucket in config.json (s3.bucket)");
    }

    // Credentials come from the environment, fatal if absent / 凭证缺失直接退出
    let store = S3Store::from_env(&app_config.s3)?;

    let state = Arc::new(AppState::new(Arc::new(store), &app_config.gateway));
    let app = api::build_router(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!(
        "Listening on {} (bucket={}, prefix={:?})",
        bind_addr,
        app_config.s3.bucket,
        app_config.gateway.prefix
    );

    axum::serve(listener, app).await?;

    Ok(())
}
