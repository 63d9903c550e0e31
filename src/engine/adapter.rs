use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::local::LocalEngine;
use super::{EngineError, KnowledgeEngine};
use crate::config::BridgeConfig;

/// What the embedded collaborator can provide; drives backend selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineCapabilities {
    pub remote_vector: bool,
    pub remote_graph: bool,
}

/// Storage backend chosen for one concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendChoice {
    Remote(String),
    Default,
}

impl BackendChoice {
    /// Endpoint string for status reporting: the configured address, or
    /// `"default"` for the in-process backend.
    pub fn describe(&self) -> &str {
        match self {
            Self::Remote(addr) => addr,
            Self::Default => "default",
        }
    }
}

/// Outcome of storage-backend selection, evaluated once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSelection {
    pub vector: BackendChoice,
    pub graph: BackendChoice,
}

impl BackendSelection {
    /// Pure function of configuration and collaborator capabilities.
    ///
    /// A configured endpoint the collaborator cannot serve degrades to the
    /// default in-process backend with a warning, never an error. The chosen
    /// selection is stored on the adapter so the fallback is observable
    /// through `get_indexing_status`, not only through logs.
    pub fn select(config: &BridgeConfig, capabilities: &EngineCapabilities) -> Self {
        let graph = match (&config.graph_store_uri, &config.graph_store_password) {
            (Some(uri), Some(_)) if capabilities.remote_graph => {
                info!(uri = %uri, "using remote graph storage");
                BackendChoice::Remote(uri.clone())
            }
            (Some(uri), Some(_)) => {
                warn!(uri = %uri, "remote graph storage unavailable, using default backend");
                BackendChoice::Default
            }
            (Some(uri), None) => {
                warn!(uri = %uri, "graph store endpoint configured without credentials, using default backend");
                BackendChoice::Default
            }
            (None, _) => BackendChoice::Default,
        };

        let vector = match &config.vector_store_addr {
            Some(addr) if capabilities.remote_vector => {
                info!(address = %addr, "using remote vector storage");
                BackendChoice::Remote(addr.clone())
            }
            Some(addr) => {
                warn!(address = %addr, "remote vector storage unavailable, using default backend");
                BackendChoice::Default
            }
            None => BackendChoice::Default,
        };

        Self { vector, graph }
    }
}

/// Builds the engine once backends are selected.
pub type EngineFactory =
    Box<dyn Fn(&BridgeConfig, &BackendSelection) -> Arc<dyn KnowledgeEngine> + Send + Sync>;

struct EngineState {
    engine: Arc<dyn KnowledgeEngine>,
    backends: BackendSelection,
}

/// Owns the configuration and the single lazily-created engine handle.
///
/// The handle is constructed at most once per process; `ensure_ready` is
/// idempotent under repetition and under concurrent callers.
pub struct EngineAdapter {
    config: BridgeConfig,
    capabilities: EngineCapabilities,
    factory: EngineFactory,
    state: OnceCell<EngineState>,
}

impl EngineAdapter {
    pub fn new(
        config: BridgeConfig,
        capabilities: EngineCapabilities,
        factory: EngineFactory,
    ) -> Self {
        Self {
            config,
            capabilities,
            factory,
            state: OnceCell::new(),
        }
    }

    /// Adapter wired to the in-process engine; used by the binary.
    pub fn local(config: BridgeConfig) -> Self {
        Self::new(
            config,
            EngineCapabilities::default(),
            Box::new(|config: &BridgeConfig, _: &BackendSelection| {
                Arc::new(LocalEngine::new(config.working_dir.clone())) as Arc<dyn KnowledgeEngine>
            }),
        )
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Whether the engine handle has been constructed.
    pub fn initialized(&self) -> bool {
        self.state.initialized()
    }

    /// Backend selection outcome; `None` before the first `ensure_ready`.
    pub fn backends(&self) -> Option<&BackendSelection> {
        self.state.get().map(|s| &s.backends)
    }

    /// Lazily select backends, construct the engine, and run its storage
    /// setup. All three happen at most once; later calls return the existing
    /// handle without repeating any side effect.
    pub async fn ensure_ready(&self) -> Result<&Arc<dyn KnowledgeEngine>, EngineError> {
        let state = self
            .state
            .get_or_try_init(|| async {
                info!("initializing retrieval engine");
                let backends = BackendSelection::select(&self.config, &self.capabilities);
                let engine = (self.factory)(&self.config, &backends);
                engine.initialize_storages().await?;
                info!(
                    vector = backends.vector.describe(),
                    graph = backends.graph.describe(),
                    "retrieval engine ready"
                );
                Ok::<_, EngineError>(EngineState { engine, backends })
            })
            .await?;
        Ok(&state.engine)
    }
}
