use super::{KeyValueStore, StoreError, StoreResult};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::trace;

/// Store keeping every key in its own `<key>.json` file inside a directory.
/// The directory is created on the first write.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> FileStore {
        FileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        key: key.to_owned(),
        source,
    }
}

impl KeyValueStore for FileStore {
    async fn get(&mut self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    async fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.dir).await.map_err(io_error(key))?;
        let path = self.path_for(key);
        trace!(path = %path.display(), "writing value");
        fs::write(path, value).await.map_err(io_error(key))
    }

    async fn remove(&mut self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path_for(key)).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(io_error(key)(e)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_a_new_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("state"));
        assert_eq!(store.get("user").await.unwrap(), None);
        store.set("user", r#"{"name":"Jane"}"#).await.unwrap();
        let mut reopened = FileStore::new(dir.path().join("state"));
        assert_eq!(
            reopened.get("user").await.unwrap().as_deref(),
            Some(r#"{"name":"Jane"}"#)
        );
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.remove("apps").await.unwrap();
        store.set("apps", "[1]").await.unwrap();
        store.remove("apps").await.unwrap();
        store.remove("apps").await.unwrap();
        assert_eq!(store.get("apps").await.unwrap(), None);
    }
}
