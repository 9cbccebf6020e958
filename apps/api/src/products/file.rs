use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{error, info};

use super::{check_new_name, search_entries, ProductStore, StoreError, DEFAULT_PRODUCTS};

/// Product list persisted as a pretty-printed JSON array.
///
/// The whole file is rewritten after every successful add (temp file + rename).
/// The mutex is held across append and write, so in-process adds never race.
#[derive(Debug)]
pub struct FileProductStore {
    path: PathBuf,
    entries: Mutex<Vec<String>>,
}

impl FileProductStore {
    /// Loads the list from `path`, seeding and writing the default list if the file does not exist.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let entries: Vec<String> = serde_json::from_str(&content)?;
                info!("Loaded {} products from {}", entries.len(), path.display());
                entries
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let entries: Vec<String> = DEFAULT_PRODUCTS.iter().map(|s| s.to_string()).collect();
                persist(&path, &entries).await?;
                info!(
                    "Seeded {} default products into {}",
                    entries.len(),
                    path.display()
                );
                entries
            }
            Err(e) => return Err(StoreError::Load(e)),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }
}

#[async_trait]
impl ProductStore for FileProductStore {
    async fn search(&self, query: &str) -> Vec<String> {
        search_entries(&self.entries.lock().await, query)
    }

    async fn add(&self, name: &str) -> Result<String, StoreError> {
        let mut entries = self.entries.lock().await;
        let name = check_new_name(&entries, name)?;

        entries.push(name.clone());
        if let Err(e) = persist(&self.path, &entries).await {
            error!("Rolling back add of '{name}': {e}");
            entries.pop();
            return Err(e);
        }

        info!("Added product '{name}' ({} total)", entries.len());
        Ok(name)
    }
}

/// Writes `entries` to a sibling temp file, then renames it over `path`.
async fn persist(path: &Path, entries: &[String]) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(entries)?;
    let path = path.to_path_buf();

    tokio::task::spawn_blocking(move || -> std::io::Result<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    })
    .await
    .map_err(|e| StoreError::Persist(std::io::Error::new(std::io::ErrorKind::Other, e)))?
    .map_err(StoreError::Persist)
}
