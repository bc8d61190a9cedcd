use crate::domain::entities::competitor_catalog::CompetitorProfile;
use crate::domain::entities::menu_entry::MenuEntry;
use crate::domain::error::DomainError;
use crate::domain::ports::catalog_source::{CatalogSource, CatalogStore};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

const ENTRY_COLS: &str = "id, name, category, price, currency";

pub struct SqliteCatalogRepo {
    conn: Mutex<Connection>,
}

impl SqliteCatalogRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, DomainError> {
        self.conn.lock().map_err(|e| DomainError::Database(e.to_string()))
    }

    /// Rows that no longer validate are dropped with a warning rather than
    /// failing the whole read.
    fn row_to_entry(row: &rusqlite::Row) -> Result<Option<MenuEntry>, rusqlite::Error> {
        let id: String = row.get(0)?;
        let price: f64 = row.get(3)?;
        match MenuEntry::new(id.clone(), row.get::<_, String>(1)?, row.get(2)?, price, row.get::<_, String>(4)?) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                tracing::warn!(entry_id = %id, error = %e, "skipping invalid stored menu entry");
                Ok(None)
            }
        }
    }
}

impl CatalogSource for SqliteCatalogRepo {
    fn get_entries(&self, owner_id: &str) -> Result<Vec<MenuEntry>, DomainError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {ENTRY_COLS} FROM menu_entries WHERE owner_id = ?1 ORDER BY position"
            ))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let entries = stmt
            .query_map(params![owner_id], Self::row_to_entry)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok().flatten())
            .collect();
        Ok(entries)
    }

    fn get_entry(&self, owner_id: &str, entry_id: &str) -> Result<Option<MenuEntry>, DomainError> {
        let conn = self.lock()?;
        let entry = conn
            .query_row(
                &format!("SELECT {ENTRY_COLS} FROM menu_entries WHERE owner_id = ?1 AND id = ?2"),
                params![owner_id, entry_id],
                Self::row_to_entry,
            )
            .optional()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(entry.flatten())
    }

    fn list_competitors(&self, business_id: &str) -> Result<Vec<CompetitorProfile>, DomainError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT competitor_id, name, distance_km FROM competitors
                 WHERE business_id = ?1 ORDER BY competitor_id",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let profiles = stmt
            .query_map(params![business_id], |row| {
                Ok(CompetitorProfile {
                    competitor_id: row.get(0)?,
                    name: row.get(1)?,
                    distance_km: row.get(2)?,
                })
            })
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(profiles)
    }

    fn catalog_version(&self, owner_id: &str) -> Result<u64, DomainError> {
        let conn = self.lock()?;
        let version: Option<i64> = conn
            .query_row(
                "SELECT version FROM catalog_versions WHERE owner_id = ?1",
                params![owner_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(version.unwrap_or(0).max(0) as u64)
    }
}

impl CatalogStore for SqliteCatalogRepo {
    fn replace_entries(&self, owner_id: &str, entries: &[MenuEntry]) -> Result<(), DomainError> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        tx.execute("DELETE FROM menu_entries WHERE owner_id = ?1", params![owner_id])
            .map_err(|e| DomainError::Database(format!("Failed to clear catalog: {e}")))?;
        for (position, entry) in entries.iter().enumerate() {
            tx.execute(
                "INSERT INTO menu_entries (owner_id, id, name, category, price, currency, position)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    owner_id,
                    entry.id,
                    entry.name,
                    entry.category,
                    entry.price,
                    entry.currency,
                    position as i64,
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to add menu entry {}: {e}", entry.id)))?;
        }
        tx.execute(
            "INSERT INTO catalog_versions (owner_id, version) VALUES (?1, 1)
             ON CONFLICT(owner_id) DO UPDATE SET version = version + 1",
            params![owner_id],
        )
        .map_err(|e| DomainError::Database(format!("Failed to bump catalog version: {e}")))?;
        tx.commit().map_err(|e| DomainError::Database(e.to_string()))
    }

    fn upsert_competitor(&self, business_id: &str, profile: &CompetitorProfile) -> Result<(), DomainError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO competitors (business_id, competitor_id, name, distance_km)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(business_id, competitor_id) DO UPDATE SET name = excluded.name, distance_km = excluded.distance_km",
            params![business_id, profile.competitor_id, profile.name, profile.distance_km],
        )
        .map_err(|e| DomainError::Database(format!("Failed to save competitor: {e}")))?;
        Ok(())
    }
}
