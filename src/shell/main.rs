use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt};

use event_registrations::shell::config::AppConfig;
use event_registrations::shell::http::router;
use event_registrations::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;
    let app = router(AppState::new(&config));

    let addr: SocketAddr = config.bind_addr;
    tracing::info!(
        submit_delay_ms = config.submit_delay.as_millis() as u64,
        payment_delay_ms = config.payment_delay.as_millis() as u64,
        "registration dialogs: http://{}/registration-dialogs",
        addr
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
