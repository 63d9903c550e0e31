//! Shared test support: a scriptable mock engine and adapter builders.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rag_bridge::config::BridgeConfig;
use rag_bridge::engine::{
    BackendSelection, EngineAdapter, EngineCapabilities, EngineError, KnowledgeEngine,
    QueryOptions,
};
use rag_bridge::protocol::{JsonRpcRequest, RpcId};

/// Scriptable collaborator standing in for the real retrieval engine.
#[derive(Default)]
pub struct MockEngine {
    pub init_calls: AtomicUsize,
    pub inserts: Mutex<Vec<String>>,
    pub queries: Mutex<Vec<(String, QueryOptions)>>,
    pub answer: Mutex<String>,
    pub fail_insert: bool,
    pub fail_query: bool,
}

impl MockEngine {
    pub fn with_answer(answer: &str) -> Arc<Self> {
        let engine = Self::default();
        *engine.answer.lock().unwrap() = answer.to_string();
        Arc::new(engine)
    }

    pub fn failing_insert() -> Arc<Self> {
        Arc::new(Self {
            fail_insert: true,
            ..Self::default()
        })
    }

    pub fn failing_query() -> Arc<Self> {
        Arc::new(Self {
            fail_query: true,
            ..Self::default()
        })
    }
}

#[async_trait]
impl KnowledgeEngine for MockEngine {
    async fn initialize_storages(&self) -> Result<(), EngineError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn insert(&self, content: &str) -> Result<(), EngineError> {
        if self.fail_insert {
            return Err(EngineError::Insert("mock insert failure".into()));
        }
        self.inserts.lock().unwrap().push(content.to_string());
        Ok(())
    }

    async fn query(&self, text: &str, options: &QueryOptions) -> Result<String, EngineError> {
        if self.fail_query {
            return Err(EngineError::Query("mock query failure".into()));
        }
        self.queries
            .lock()
            .unwrap()
            .push((text.to_string(), options.clone()));
        Ok(self.answer.lock().unwrap().clone())
    }
}

pub fn test_config(working_dir: &Path) -> BridgeConfig {
    BridgeConfig {
        working_dir: working_dir.to_path_buf(),
        llm_api_key: "test-key".into(),
        llm_base_url: "https://llm.test/v1".into(),
        llm_model: "test-model".into(),
        embedding_model: "test-embedding".into(),
        vector_store_addr: None,
        graph_store_uri: None,
        graph_store_username: None,
        graph_store_password: None,
    }
}

/// Adapter wired to the given mock engine. The returned counter records how
/// many times the factory constructed an engine handle.
pub fn mock_adapter(
    config: BridgeConfig,
    engine: Arc<MockEngine>,
) -> (EngineAdapter, Arc<AtomicUsize>) {
    mock_adapter_with_capabilities(config, EngineCapabilities::default(), engine)
}

pub fn mock_adapter_with_capabilities(
    config: BridgeConfig,
    capabilities: EngineCapabilities,
    engine: Arc<MockEngine>,
) -> (EngineAdapter, Arc<AtomicUsize>) {
    let built = Arc::new(AtomicUsize::new(0));
    let built_in_factory = built.clone();
    let adapter = EngineAdapter::new(
        config,
        capabilities,
        Box::new(move |_: &BridgeConfig, _: &BackendSelection| {
            built_in_factory.fetch_add(1, Ordering::SeqCst);
            engine.clone() as Arc<dyn KnowledgeEngine>
        }),
    );
    (adapter, built)
}

pub fn request(id: i64, method: &str, params: Option<serde_json::Value>) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(RpcId::Number(id)),
        method: method.into(),
        params,
    }
}
