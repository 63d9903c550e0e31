use std::path::PathBuf;

/// Bridge configuration loaded from environment variables. Captured once at
/// process start; read-only afterwards.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub working_dir: PathBuf,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub embedding_model: String,
    pub vector_store_addr: Option<String>,
    pub graph_store_uri: Option<String>,
    pub graph_store_username: Option<String>,
    pub graph_store_password: Option<String>,
}

impl BridgeConfig {
    /// Load configuration from environment.
    ///
    /// - `RAG_BRIDGE_WORKING_DIR` (optional, default `./dev-data`)
    /// - `RAG_BRIDGE_LLM_API_KEY` (required) — language-model provider credential
    /// - `RAG_BRIDGE_LLM_BASE_URL` (optional) — OpenAI-compatible endpoint
    /// - `RAG_BRIDGE_LLM_MODEL`, `RAG_BRIDGE_EMBEDDING_MODEL` (optional)
    /// - `RAG_BRIDGE_VECTOR_STORE_ADDR` (optional) — remote vector store
    /// - `RAG_BRIDGE_GRAPH_STORE_URI` / `_USERNAME` / `_PASSWORD` (optional)
    pub fn from_env() -> Result<Self, String> {
        let llm_api_key = std::env::var("RAG_BRIDGE_LLM_API_KEY")
            .map_err(|_| "RAG_BRIDGE_LLM_API_KEY environment variable is not set".to_string())?;

        Ok(Self {
            working_dir: PathBuf::from(env_or("RAG_BRIDGE_WORKING_DIR", "./dev-data")),
            llm_api_key,
            llm_base_url: env_or("RAG_BRIDGE_LLM_BASE_URL", "https://api.openai.com/v1"),
            llm_model: env_or("RAG_BRIDGE_LLM_MODEL", "gpt-4"),
            embedding_model: env_or("RAG_BRIDGE_EMBEDDING_MODEL", "text-embedding-ada-002"),
            vector_store_addr: std::env::var("RAG_BRIDGE_VECTOR_STORE_ADDR").ok(),
            graph_store_uri: std::env::var("RAG_BRIDGE_GRAPH_STORE_URI").ok(),
            graph_store_username: std::env::var("RAG_BRIDGE_GRAPH_STORE_USERNAME").ok(),
            graph_store_password: std::env::var("RAG_BRIDGE_GRAPH_STORE_PASSWORD").ok(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
