//! JSON-RPC 2.0 stdio bridge to a knowledge indexing and retrieval engine.
//!
//! Exposes `index_files`, `insert_text`, `search_code`, `get_entity`,
//! `get_relationships`, `visualize_subgraph`, and `get_indexing_status` over
//! newline-delimited JSON-RPC 2.0 on stdin/stdout. The retrieval engine sits
//! behind the [`engine::KnowledgeEngine`] trait; the bundled
//! [`engine::LocalEngine`] is the default in-process backend used when no
//! remote storage is configured.

pub mod config;
pub mod engine;
pub mod handlers;
pub mod protocol;
pub mod server;
