use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::debug;

use super::{EngineError, KnowledgeEngine, QueryMode, QueryOptions};

/// In-process default backend.
///
/// Documents are plain files under `<working_dir>/documents/`; retrieval is
/// case-insensitive term overlap with a deterministic tie-break on document
/// id. Stands in for a full retrieval stack when no remote storage is
/// configured; answer quality is bounded by design.
pub struct LocalEngine {
    working_dir: PathBuf,
    next_doc: AtomicU64,
}

impl LocalEngine {
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            working_dir,
            next_doc: AtomicU64::new(0),
        }
    }

    fn documents_dir(&self) -> PathBuf {
        self.working_dir.join("documents")
    }

    /// Load all stored documents in stable name order.
    fn load_documents(&self) -> Result<Vec<(String, String)>, EngineError> {
        let dir = self.documents_dir();
        let mut docs = Vec::new();
        if !dir.is_dir() {
            return Ok(docs);
        }
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            let content = std::fs::read_to_string(entry.path())?;
            docs.push((name, content));
        }
        docs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(docs)
    }
}

#[async_trait]
impl KnowledgeEngine for LocalEngine {
    async fn initialize_storages(&self) -> Result<(), EngineError> {
        let dir = self.documents_dir();
        std::fs::create_dir_all(&dir)?;

        // Resume the document counter past anything already on disk.
        let mut next = 0u64;
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) {
                if let Some(n) = stem.strip_prefix("doc-").and_then(|s| s.parse::<u64>().ok()) {
                    next = next.max(n + 1);
                }
            }
        }
        self.next_doc.store(next, Ordering::SeqCst);
        Ok(())
    }

    async fn insert(&self, content: &str) -> Result<(), EngineError> {
        let seq = self.next_doc.fetch_add(1, Ordering::SeqCst);
        let path = self.documents_dir().join(format!("doc-{seq:06}.txt"));
        tokio::fs::write(&path, content).await?;
        debug!(path = %path.display(), "stored document");
        Ok(())
    }

    async fn query(&self, text: &str, options: &QueryOptions) -> Result<String, EngineError> {
        let docs = self.load_documents()?;

        let mut terms = tokenize(text);
        // Naive mode ranks on the raw query text alone.
        if options.mode != QueryMode::Naive {
            for kw in options.hl_keywords.iter().chain(&options.ll_keywords) {
                terms.extend(tokenize(kw));
            }
        }
        terms.sort();
        terms.dedup();

        let mut scored: Vec<(usize, &(String, String))> = docs
            .iter()
            .map(|doc| {
                let body = doc.1.to_lowercase();
                let hits = terms.iter().filter(|t| body.contains(t.as_str())).count();
                (hits, doc)
            })
            .filter(|(hits, _)| *hits > 0)
            .collect();

        // Highest overlap first; ties resolved by document id.
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1 .0.cmp(&b.1 .0)));
        scored.truncate(options.top_k);

        if scored.is_empty() {
            return Ok(if options.only_need_context {
                String::new()
            } else {
                format!("No indexed content matched '{text}'.")
            });
        }

        // Rough character budget derived from the text-unit token budget.
        let excerpt_len = options.max_token_for_text_unit.saturating_mul(4).max(80);

        let mut sections = Vec::with_capacity(scored.len());
        for (hits, (name, content)) in &scored {
            let excerpt: String = content.chars().take(excerpt_len).collect();
            if options.only_need_context {
                sections.push(excerpt);
            } else {
                sections.push(format!("[{name}] ({hits} matching terms)\n{excerpt}"));
            }
        }

        if options.only_need_context {
            Ok(sections.join("\n\n"))
        } else {
            Ok(format!(
                "Found {} matching documents for '{}':\n\n{}",
                scored.len(),
                text,
                sections.join("\n\n")
            ))
        }
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 3)
        .map(|t| t.to_lowercase())
        .collect()
}
