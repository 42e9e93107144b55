use jobsheet_server::app;
use jobsheet_server::config::Config;
use jobsheet_server::state::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env();
    if !config.forms_dir.is_dir() {
        tracing::warn!(
            forms_dir = %config.forms_dir.display(),
            "forms directory missing, strict templates will fail to render"
        );
    }

    let state = AppState::new(&config);
    let listener = TcpListener::bind(config.bind.as_str()).await?;
    tracing::info!(
        bind = %config.bind,
        forms_dir = %config.forms_dir.display(),
        temp_dir = %config.temp_dir.display(),
        "listening"
    );

    axum::serve(listener, app(state)).await?;
    Ok(())
}
