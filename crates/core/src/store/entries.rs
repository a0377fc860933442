//! Snapshot entry operations.
//!
//! Reads and writes of individual request-identity → snapshot entries
//! within a generation. Writes are UPSERTs: a later snapshot for the
//! same identity replaces the earlier one.

use super::connection::GenerationStore;
use crate::Error;
use crate::http::{RequestIdentity, Snapshot};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

impl GenerationStore {
    /// Store a snapshot under `identity` in `generation`.
    ///
    /// The generation row is created if it does not exist yet, matching
    /// the open-or-create behavior of the registry: every strategy write
    /// opens the store it targets.
    pub async fn put_snapshot(
        &self, generation: &str, identity: &RequestIdentity, snapshot: &Snapshot,
    ) -> Result<(), Error> {
        let generation = generation.to_string();
        let entry_key = identity.entry_key();
        let identity = identity.clone();
        let snapshot = snapshot.clone();
        let headers_json = serde_json::to_string(&snapshot.headers).unwrap_or_else(|_| "[]".to_string());
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT OR IGNORE INTO generations (name, created_at) VALUES (?1, ?2)",
                    params![generation, chrono::Utc::now().to_rfc3339()],
                )?;
                conn.execute(
                    "INSERT INTO snapshots (
                        generation, entry_key, method, url, status,
                        content_type, headers_json, body, fetched_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                    ON CONFLICT(generation, entry_key) DO UPDATE SET
                        method = excluded.method,
                        url = excluded.url,
                        status = excluded.status,
                        content_type = excluded.content_type,
                        headers_json = excluded.headers_json,
                        body = excluded.body,
                        fetched_at = excluded.fetched_at",
                    params![
                        generation,
                        entry_key,
                        identity.method,
                        identity.url,
                        snapshot.status as i64,
                        &snapshot.content_type,
                        headers_json,
                        &snapshot.body,
                        &snapshot.fetched_at,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Look up the snapshot stored for `identity` in `generation`.
    ///
    /// Returns None if there is no entry.
    pub async fn get_snapshot(
        &self, generation: &str, identity: &RequestIdentity,
    ) -> Result<Option<Snapshot>, Error> {
        let generation = generation.to_string();
        let entry_key = identity.entry_key();
        self.conn
            .call(move |conn| -> Result<Option<Snapshot>, Error> {
                let result = conn.query_row(
                    "SELECT status, content_type, headers_json, body, fetched_at
                     FROM snapshots WHERE generation = ?1 AND entry_key = ?2",
                    params![generation, entry_key],
                    |row| {
                        let headers_json: String = row.get(2)?;
                        Ok(Snapshot {
                            status: row.get::<_, i64>(0)? as u16,
                            content_type: row.get(1)?,
                            headers: serde_json::from_str(&headers_json).unwrap_or_default(),
                            body: row.get(3)?,
                            fetched_at: row.get(4)?,
                        })
                    },
                );

                match result {
                    Ok(s) => Ok(Some(s)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Delete one entry. Returns whether an entry existed.
    pub async fn delete_snapshot(&self, generation: &str, identity: &RequestIdentity) -> Result<bool, Error> {
        let generation = generation.to_string();
        let entry_key = identity.entry_key();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let deleted = conn.execute(
                    "DELETE FROM snapshots WHERE generation = ?1 AND entry_key = ?2",
                    params![generation, entry_key],
                )?;
                Ok(deleted > 0)
            })
            .await
            .map_err(Error::from)
    }

    /// Number of entries in a generation.
    pub async fn entry_count(&self, generation: &str) -> Result<u64, Error> {
        let generation = generation.to_string();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM snapshots WHERE generation = ?1",
                    params![generation],
                    |row| row.get(0),
                )?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
