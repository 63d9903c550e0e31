//! The collaborator seam: the retrieval engine behind a narrow async
//! interface, plus the adapter that owns its lifecycle.

pub mod adapter;
pub mod local;

pub use adapter::{
    BackendChoice, BackendSelection, EngineAdapter, EngineCapabilities, EngineFactory,
};
pub use local::LocalEngine;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Failure surfaced by the retrieval engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("storage initialization failed: {0}")]
    StorageInit(String),
    #[error("insert failed: {0}")]
    Insert(String),
    #[error("query failed: {0}")]
    Query(String),
    #[error("engine I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Coarse category label carried in the error `data` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StorageInit(_) => "storage_init",
            Self::Insert(_) => "insert_failed",
            Self::Query(_) => "query_failed",
            Self::Io(_) => "io_error",
        }
    }
}

/// Retrieval strategy keyword, passed through to the engine; semantics are
/// owned entirely by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    Local,
    Global,
    #[default]
    Hybrid,
    Naive,
}

impl QueryMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Global => "global",
            Self::Hybrid => "hybrid",
            Self::Naive => "naive",
        }
    }
}

/// Query configuration forwarded to the engine.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub mode: QueryMode,
    pub only_need_context: bool,
    pub top_k: usize,
    pub response_type: String,
    pub max_token_for_text_unit: usize,
    pub max_token_for_global_context: usize,
    pub max_token_for_local_context: usize,
    pub hl_keywords: Vec<String>,
    pub ll_keywords: Vec<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            mode: QueryMode::Hybrid,
            only_need_context: false,
            top_k: 10,
            response_type: "Multiple Paragraphs".to_string(),
            max_token_for_text_unit: 4000,
            max_token_for_global_context: 4000,
            max_token_for_local_context: 4000,
            hl_keywords: Vec::new(),
            ll_keywords: Vec::new(),
        }
    }
}

/// The narrow interface the bridge consumes. Implemented by the bundled
/// [`LocalEngine`] and by test mocks.
#[async_trait]
pub trait KnowledgeEngine: Send + Sync {
    /// Idempotent storage setup; called exactly once by the adapter.
    async fn initialize_storages(&self) -> Result<(), EngineError>;

    /// Insert one unit of content into the index.
    async fn insert(&self, content: &str) -> Result<(), EngineError>;

    /// Run a retrieval query and return the engine's answer text.
    async fn query(&self, text: &str, options: &QueryOptions) -> Result<String, EngineError>;
}
