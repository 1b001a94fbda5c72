use anyhow::Context;
use onboard_assist::config::PortalConfig;
use onboard_assist::routes::{AppState, portal_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = PortalConfig::from_env()?;
    let state = AppState::from_config(&config).await?;

    let registry = state.resolver.registry();
    eprintln!("🧭 Onboard Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "   Catalog: {} ({} projects, {} roles)",
        config
            .catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string()),
        registry.projects().len(),
        registry.role_count(),
    );
    eprintln!("   Sessions: {}", config.sessions_path.display());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;

    eprintln!("   Intake: http://0.0.0.0:{}/api/onboard", config.port);
    eprintln!("   Login:  http://0.0.0.0:{}/api/login", config.port);
    eprintln!("   Chat:   http://0.0.0.0:{}/api/chat/{{id}}\n", config.port);
    tracing::info!(port = config.port, "Onboarding portal started");

    axum::serve(listener, portal_routes(state)).await?;
    Ok(())
}
