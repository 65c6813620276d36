use tokio::net::TcpListener;
use blog_script_gen::{
    config::Config,
    api::routes::create_router,
    telemetry::init_tracing,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = Config::load()?;
    let server_addr = config.server_addr;
    tracing::info!(model = %config.model_name, pacing = ?config.summary_pacing, "configuration loaded");

    let app_state = AppState::from_config(config);
    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    tracing::info!(%server_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
