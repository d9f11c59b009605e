use std::net::SocketAddr;

use payslip_engine::api::{AppState, create_router};
use payslip_engine::config::ConfigLoader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payslip_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir =
        std::env::var("PAYSLIP_CONFIG_DIR").unwrap_or_else(|_| "./config/default".into());
    let config = ConfigLoader::load(&config_dir).expect("Failed to load payslip configuration");
    tracing::info!(
        config_dir = %config_dir,
        strategy = %config.export().strategy,
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("PORT must be a number");

    let addr = SocketAddr::new(host.parse().expect("Invalid HOST"), port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
