use std::sync::Arc;

use anyhow::Context;
use gateway_client::{RemoteCallClient, StaticResolver};
use gateway_kernel::settings::Settings;
use gateway_kernel::{InitCtx, ModuleRegistry};
use library_gateway::modules;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load gateway settings")?;
    gateway_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        book_service = %settings.backends.book.address,
        user_service = %settings.backends.user.address,
        "library-gateway bootstrap starting"
    );

    // One shared outbound client for the whole process.
    let resolver = Arc::new(StaticResolver::from_settings(&settings.backends));
    let client = Arc::new(
        RemoteCallClient::new(&settings.client, resolver)
            .context("failed to build the remote call client")?,
    );

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, client);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("library-gateway bootstrap complete");

    gateway_http::start_server(&registry, &settings).await?;

    registry.stop_all().await?;
    Ok(())
}
