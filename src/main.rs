use rag_bridge::config::BridgeConfig;
use rag_bridge::engine::EngineAdapter;
use rag_bridge::server::BridgeServer;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr; stdout carries the response frames.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match BridgeConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("rag-bridge: configuration error: {e}");
            std::process::exit(1);
        }
    };

    let server = BridgeServer::new(EngineAdapter::local(config));
    if let Err(e) = server.run().await {
        eprintln!("rag-bridge: fatal error: {e}");
        std::process::exit(1);
    }
}
