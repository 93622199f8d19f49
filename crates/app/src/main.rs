use std::sync::Arc;

use clap::Parser;
use engine::Registry;
use spliit_client::SpliitConnector;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new(settings::Args::parse())?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spliit_action={level},server={level},engine={level},spliit_client={level}",
            level = settings.app.level
        ))
        .init();

    let registry = Arc::new(Registry::new(SpliitConnector::default()));
    for entry in &settings.entries {
        match registry
            .setup(&entry.group_id, entry.base_url.as_deref())
            .await
        {
            Ok(configured) => tracing::info!(
                "imported {} as entry {}",
                configured.title,
                configured.entry_id
            ),
            Err(err) => tracing::error!("skipping group {}: {err}", entry.group_id),
        }
    }

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(registry, listener).await?;

    Ok(())
}
