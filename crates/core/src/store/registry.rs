//! Generation registry operations.
//!
//! The registry level of the store: open-or-create a named generation,
//! enumerate all known generations, and delete a generation together
//! with every snapshot it holds.

use super::connection::GenerationStore;
use crate::Error;
use tokio_rusqlite::params;

impl GenerationStore {
    /// Open the named generation, creating it if absent.
    pub async fn open_generation(&self, name: &str) -> Result<(), Error> {
        let name = name.to_string();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT OR IGNORE INTO generations (name, created_at) VALUES (?1, ?2)",
                    params![name, chrono::Utc::now().to_rfc3339()],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// All generation names known to the registry, oldest first.
    pub async fn list_generations(&self) -> Result<Vec<String>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<String>, Error> {
                let mut stmt = conn.prepare("SELECT name FROM generations ORDER BY created_at, name")?;
                let names = stmt
                    .query_map([], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(names)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete a generation and, via cascade, all of its snapshots.
    ///
    /// Returns whether the generation existed.
    pub async fn delete_generation(&self, name: &str) -> Result<bool, Error> {
        let name = name.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let deleted = conn.execute("DELETE FROM generations WHERE name = ?1", params![name])?;
                Ok(deleted > 0)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{RequestIdentity, Snapshot};
    use url::Url;

    fn identity(url: &str) -> RequestIdentity {
        RequestIdentity::new("GET", &Url::parse(url).unwrap())
    }

    fn make_test_snapshot() -> Snapshot {
        Snapshot {
            status: 200,
            content_type: Some("text/html".to_string()),
            headers: Vec::new(),
            body: b"<!doctype html>".to_vec(),
            fetched_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let store = GenerationStore::open_in_memory().await.unwrap();
        store.open_generation("v1").await.unwrap();
        store.open_generation("v1").await.unwrap();

        assert_eq!(store.list_generations().await.unwrap(), vec!["v1".to_string()]);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let store = GenerationStore::open_in_memory().await.unwrap();
        assert!(store.list_generations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_generation() {
        let store = GenerationStore::open_in_memory().await.unwrap();
        store.open_generation("v2").await.unwrap();
        store.open_generation("v3").await.unwrap();

        assert!(store.delete_generation("v2").await.unwrap());
        assert!(!store.delete_generation("v2").await.unwrap());
        assert_eq!(store.list_generations().await.unwrap(), vec!["v3".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_snapshots() {
        let store = GenerationStore::open_in_memory().await.unwrap();
        let identity = identity("https://app.example/index.html");

        store
            .put_snapshot("v2", &identity, &make_test_snapshot())
            .await
            .unwrap();
        store.delete_generation("v2").await.unwrap();

        // Re-creating the generation must not resurrect old entries.
        store.open_generation("v2").await.unwrap();
        assert!(store.get_snapshot("v2", &identity).await.unwrap().is_none());
        assert_eq!(store.entry_count("v2").await.unwrap(), 0);
    }
}
