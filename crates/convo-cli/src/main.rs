use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use convo_cli::{config::Config, repl};
use convo_llm::ClientFactory;
use convo_session::{Orchestrator, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting convo");
    tracing::info!("Backend: {}", config.backend.base_url);

    let backend = ClientFactory::create_backend(&config.backend)?;
    let orchestrator = Orchestrator::with_backend(Session::new(), backend, config.orchestrator());

    repl::run(orchestrator).await
}

// Logs go to stderr so they never interleave with the transcript on stdout
fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
