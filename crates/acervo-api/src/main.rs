use acervo_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();
    acervo_api::telemetry::init_tracing();

    // Load configuration - fail fast on misconfiguration
    let config = Config::from_env()?;

    // Initialize the application (database, upload client, routes)
    let (_state, router) = acervo_api::setup::initialize_app(&config).await?;

    // Start the server
    acervo_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
