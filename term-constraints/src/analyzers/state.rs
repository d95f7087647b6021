//! Loading and persisting analyzer states.
//!
//! An analyzer's [`calculate`](super::Analyzer::calculate) can merge its
//! freshly computed state with a previously saved one and write the merged
//! state back. States travel as JSON bytes keyed by [`AnalyzerKey`], so the
//! traits here stay object-safe whatever the analyzer's state type is.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, instrument};

use super::errors::{AnalyzerError, AnalyzerResult};
use super::traits::AnalyzerKey;

/// Source of previously computed states.
#[async_trait]
pub trait StateLoader: Send + Sync {
    /// Loads the serialized state stored for `key`, if any.
    async fn load(&self, key: &AnalyzerKey) -> AnalyzerResult<Option<Vec<u8>>>;
}

/// Sink for computed states.
#[async_trait]
pub trait StatePersister: Send + Sync {
    /// Stores the serialized state for `key`, replacing any previous one.
    async fn persist(&self, key: &AnalyzerKey, state: Vec<u8>) -> AnalyzerResult<()>;
}

/// Keeps states in memory; useful for tests and single-process pipelines.
#[derive(Debug, Default)]
pub struct InMemoryStateProvider {
    states: RwLock<HashMap<AnalyzerKey, Vec<u8>>>,
}

impl InMemoryStateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored states.
    pub fn len(&self) -> usize {
        self.states.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the stored state for `key` as JSON text.
    pub fn state_json(&self, key: &AnalyzerKey) -> Option<String> {
        let states = self.states.read().ok()?;
        states
            .get(key)
            .and_then(|bytes| String::from_utf8(bytes.clone()).ok())
    }
}

#[async_trait]
impl StateLoader for InMemoryStateProvider {
    async fn load(&self, key: &AnalyzerKey) -> AnalyzerResult<Option<Vec<u8>>> {
        let states = self
            .states
            .read()
            .map_err(|_| AnalyzerError::state_store("state map lock poisoned"))?;
        Ok(states.get(key).cloned())
    }
}

#[async_trait]
impl StatePersister for InMemoryStateProvider {
    async fn persist(&self, key: &AnalyzerKey, state: Vec<u8>) -> AnalyzerResult<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| AnalyzerError::state_store("state map lock poisoned"))?;
        states.insert(key.clone(), state);
        Ok(())
    }
}

/// Stores one JSON file per analyzer under a base directory:
///
/// ```text
/// base_path/
/// ├── size.json
/// ├── completeness_email.json
/// └── mean_price.json
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemStateProvider {
    base_path: PathBuf,
}

impl FileSystemStateProvider {
    /// Creates a provider rooted at `base_path`, creating the directory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> AnalyzerResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            AnalyzerError::state_store(format!("Failed to create state directory: {e}"))
        })?;

        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn state_file_path(&self, key: &AnalyzerKey) -> PathBuf {
        self.base_path.join(format!("{}.json", key.file_stem()))
    }
}

#[async_trait]
impl StateLoader for FileSystemStateProvider {
    #[instrument(skip(self), fields(analyzer = %key))]
    async fn load(&self, key: &AnalyzerKey) -> AnalyzerResult<Option<Vec<u8>>> {
        let path = self.state_file_path(key);

        if !path.exists() {
            debug!("No stored state found");
            return Ok(None);
        }

        let bytes = fs::read(&path)
            .await
            .map_err(|e| AnalyzerError::state_store(format!("Failed to read state file: {e}")))?;

        debug!(bytes = bytes.len(), "Loaded stored state");
        Ok(Some(bytes))
    }
}

#[async_trait]
impl StatePersister for FileSystemStateProvider {
    #[instrument(skip(self, state), fields(analyzer = %key))]
    async fn persist(&self, key: &AnalyzerKey, state: Vec<u8>) -> AnalyzerResult<()> {
        let path = self.state_file_path(key);

        fs::write(&path, state)
            .await
            .map_err(|e| AnalyzerError::state_store(format!("Failed to write state file: {e}")))?;

        debug!(path = %path.display(), "Persisted state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let provider = InMemoryStateProvider::new();
        let key = AnalyzerKey::new("size");

        assert!(provider.load(&key).await.unwrap().is_none());
        assert!(provider.is_empty());

        provider
            .persist(&key, br#"{"count":3}"#.to_vec())
            .await
            .unwrap();

        assert_eq!(provider.len(), 1);
        assert_eq!(provider.state_json(&key).as_deref(), Some(r#"{"count":3}"#));
        assert_eq!(
            provider.load(&key).await.unwrap(),
            Some(br#"{"count":3}"#.to_vec())
        );
    }

    #[tokio::test]
    async fn test_file_system_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileSystemStateProvider::new(dir.path().join("states")).unwrap();
        let key = AnalyzerKey::new("completeness").with_param("user id");

        assert!(provider.load(&key).await.unwrap().is_none());

        provider.persist(&key, b"{}".to_vec()).await.unwrap();
        assert!(provider
            .base_path()
            .join("completeness_user%20id.json")
            .exists());
        assert_eq!(provider.load(&key).await.unwrap(), Some(b"{}".to_vec()));
    }

    #[tokio::test]
    async fn test_file_system_keys_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileSystemStateProvider::new(dir.path()).unwrap();
        let spaced = AnalyzerKey::new("mean").with_param("a b");
        let underscored = AnalyzerKey::new("mean").with_param("a_b");
        let split = AnalyzerKey::new("mean").with_param("a").with_param("b");

        provider
            .persist(&spaced, br#"{"sum":10.0,"count":1}"#.to_vec())
            .await
            .unwrap();

        assert!(provider.load(&underscored).await.unwrap().is_none());
        assert!(provider.load(&split).await.unwrap().is_none());
        assert_ne!(spaced.file_stem(), underscored.file_stem());
        assert_ne!(underscored.file_stem(), split.file_stem());
    }
}
