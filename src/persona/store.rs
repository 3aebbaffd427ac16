//! File-backed content store for persona knowledge bases.
//!
//! Each persona owns a directory under the knowledge base root, keyed by its
//! canonical name. Scraped documents live as one text file per content id
//! (a truncated hash of the source URL) in a `content/` subdirectory, with a
//! `metadata.json` map at the persona root as the source of truth for
//! existence checks and statistics.
//!
//! All I/O here is synchronous `std::fs`; async callers wrap store calls in
//! `tokio::task::spawn_blocking`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Metadata for one stored document, persisted in `metadata.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentMeta {
    /// Source URL the document was scraped from.
    pub url: String,
    /// Character count of the stored body.
    pub char_count: usize,
    /// Path of the body file, relative to the persona directory.
    pub file: String,
    /// RFC 3339 timestamp of when the document was stored.
    pub fetched_at: String,
}

/// Aggregate statistics for a persona's knowledge base.
#[derive(Debug, Clone, Serialize)]
pub struct PersonaStats {
    pub exists: bool,
    pub documents: usize,
    pub total_chars: usize,
    pub urls: Vec<String>,
}

impl PersonaStats {
    fn missing() -> Self {
        Self {
            exists: false,
            documents: 0,
            total_chars: 0,
            urls: Vec::new(),
        }
    }
}

type Metadata = BTreeMap<String, ContentMeta>;

/// Manages on-disk storage for persona knowledge bases.
pub struct ContentStore {
    base_dir: PathBuf,
    // Serializes the metadata read-modify-write per persona, so concurrent
    // saves for the same persona cannot lose updates.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

/// Normalize a display name to its canonical storage key: lowercased, with
/// whitespace runs collapsed to single underscores. Two spellings that
/// normalize equally are the same persona.
pub fn normalize_name(person_name: &str) -> String {
    person_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Deterministic content id for a source URL: first 16 hex chars of its
/// SHA-256 digest. Stable across runs, so re-ingesting a URL overwrites.
pub fn content_id(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex[..16].to_string()
}

impl ContentStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn persona_dir(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }

    fn content_dir(&self, key: &str) -> PathBuf {
        self.persona_dir(key).join("content")
    }

    fn metadata_path(&self, key: &str) -> PathBuf {
        self.persona_dir(key).join("metadata.json")
    }

    fn persona_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("persona lock map poisoned");
        locks.entry(key.to_string()).or_default().clone()
    }

    /// Save one scraped document. Returns the content id.
    ///
    /// The body file is written before the metadata map is updated, so a
    /// failure between the two never leaves metadata pointing at a missing
    /// body. Saving the same URL again overwrites the same id.
    pub fn save(&self, person_name: &str, url: &str, content: &str) -> Result<String> {
        let key = normalize_name(person_name);
        let id = content_id(url);

        let lock = self.persona_lock(&key);
        let _guard = lock.lock().expect("persona lock poisoned");

        let content_dir = self.content_dir(&key);
        std::fs::create_dir_all(&content_dir)
            .with_context(|| format!("failed to create content dir for {key}"))?;

        let body_path = content_dir.join(format!("{id}.txt"));
        std::fs::write(&body_path, content)
            .with_context(|| format!("failed to write {}", body_path.display()))?;

        let mut metadata = self.load_metadata(&key)?;
        metadata.insert(
            id.clone(),
            ContentMeta {
                url: url.to_string(),
                char_count: content.chars().count(),
                file: format!("content/{id}.txt"),
                fetched_at: chrono::Utc::now().to_rfc3339(),
            },
        );
        self.save_metadata(&key, &metadata)?;

        Ok(id)
    }

    /// Load every stored body for a persona. Returns an empty vec (not an
    /// error) when the persona has no content directory yet.
    pub fn load_all(&self, person_name: &str) -> Result<Vec<String>> {
        let key = normalize_name(person_name);
        let content_dir = self.content_dir(&key);

        if !content_dir.exists() {
            return Ok(Vec::new());
        }

        let mut chunks = Vec::new();
        for entry in std::fs::read_dir(&content_dir)
            .with_context(|| format!("failed to read {}", content_dir.display()))?
        {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "txt") {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                chunks.push(text);
            }
        }

        Ok(chunks)
    }

    /// True iff the persona's directory and metadata file are both present.
    pub fn exists(&self, person_name: &str) -> bool {
        let key = normalize_name(person_name);
        self.persona_dir(&key).exists() && self.metadata_path(&key).exists()
    }

    /// Statistics derived entirely from metadata. `exists: false` when the
    /// persona has never been initialized.
    pub fn stats(&self, person_name: &str) -> Result<PersonaStats> {
        if !self.exists(person_name) {
            return Ok(PersonaStats::missing());
        }

        let key = normalize_name(person_name);
        let metadata = self.load_metadata(&key)?;
        let total_chars = metadata.values().map(|m| m.char_count).sum();
        let urls = metadata.values().map(|m| m.url.clone()).collect();

        Ok(PersonaStats {
            exists: true,
            documents: metadata.len(),
            total_chars,
            urls,
        })
    }

    fn load_metadata(&self, key: &str) -> Result<Metadata> {
        let path = self.metadata_path(key);
        if !path.exists() {
            return Ok(Metadata::new());
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    fn save_metadata(&self, key: &str, metadata: &Metadata) -> Result<()> {
        let path = self.metadata_path(key);
        let json = serde_json::to_string_pretty(metadata)?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))
    }
}
