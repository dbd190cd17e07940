//! Layered template lookup.
//!
//! Reads resolve in priority order: the in-process cache, then the SQLite
//! `templates` table, then the compiled-in defaults. A failing database read
//! falls through to the defaults without being cached, so the next read tries
//! the database again.

use crate::db;
use crate::error::ServiceError;
use common::model::template::{default_templates, Template, TemplateMap};
use log::{debug, info, warn};
use rusqlite::{params, Connection};
use std::path::PathBuf;
use tokio::sync::RwLock;

pub struct TemplateStore {
    db_path: PathBuf,
    cache: RwLock<Option<TemplateMap>>,
}

impl TemplateStore {
    pub fn new(db_path: PathBuf) -> Self {
        TemplateStore {
            db_path,
            cache: RwLock::new(None),
        }
    }

    /// The current templates. Never fails; see the module docs for the fallback order.
    pub async fn load(&self) -> TemplateMap {
        if let Some(cached) = self.cache.read().await.as_ref() {
            return cached.clone();
        }

        match db::with_connection(&self.db_path, |conn| Ok(read_templates(conn)?)).await {
            Ok(stored) if !stored.is_empty() => {
                debug!("Loaded {} templates from storage", stored.len());
                *self.cache.write().await = Some(stored.clone());
                stored
            }
            Ok(_) => {
                info!("No stored templates, seeding defaults");
                let defaults = default_templates();
                *self.cache.write().await = Some(defaults.clone());
                defaults
            }
            Err(e) => {
                warn!("Reading templates failed, serving defaults: {}", e);
                default_templates()
            }
        }
    }

    /// Creates or replaces the template for `persona` and persists the whole set.
    ///
    /// On a storage failure the cache keeps its previous contents.
    pub async fn upsert(
        &self,
        persona: String,
        template: Template,
    ) -> Result<TemplateMap, ServiceError> {
        let current = self.load().await;
        let mut cache = self.cache.write().await;

        let mut templates = cache.clone().unwrap_or(current);
        templates.insert(persona, template);

        let snapshot = templates.clone();
        db::with_connection(&self.db_path, move |conn| Ok(write_templates(conn, &snapshot)?))
            .await?;

        *cache = Some(templates.clone());
        Ok(templates)
    }
}

fn read_templates(conn: &Connection) -> Result<TemplateMap, rusqlite::Error> {
    let mut stmt = conn.prepare("SELECT persona, title, content FROM templates")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            Template {
                title: row.get(1)?,
                content: row.get(2)?,
            },
        ))
    })?;
    rows.collect()
}

fn write_templates(conn: &mut Connection, templates: &TemplateMap) -> Result<(), rusqlite::Error> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO templates (persona, title, content) VALUES (?1, ?2, ?3)",
        )?;
        for (persona, template) in templates {
            stmt.execute(params![persona, template.title, template.content])?;
        }
    }
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, TemplateStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("templates.sqlite");
        db::init(&path).unwrap();
        (dir, TemplateStore::new(path))
    }

    #[actix_web::test]
    async fn empty_database_serves_defaults() {
        let (_dir, store) = store();
        let templates = store.load().await;
        assert_eq!(templates, default_templates());
    }

    #[actix_web::test]
    async fn upsert_persists_defaults_and_new_entry() {
        let (_dir, store) = store();
        let saved = store
            .upsert("Fintech".into(), Template::new("Fintech", "Hi {{name}}"))
            .await
            .unwrap();
        assert_eq!(saved.len(), 5);

        // A fresh store over the same file sees what was written.
        let reopened = TemplateStore::new(store.db_path.clone());
        let loaded = reopened.load().await;
        assert_eq!(loaded, saved);
        assert_eq!(loaded["Fintech"].content, "Hi {{name}}");
    }

    #[actix_web::test]
    async fn upsert_replaces_existing_persona() {
        let (_dir, store) = store();
        store
            .upsert("SMB".into(), Template::new("Small biz", "New body"))
            .await
            .unwrap();
        let templates = store.load().await;
        assert_eq!(templates["SMB"], Template::new("Small biz", "New body"));
        assert_eq!(templates.len(), 4);
    }

    #[actix_web::test]
    async fn unreadable_database_falls_back_without_caching() {
        let dir = TempDir::new().unwrap();
        let store = TemplateStore::new(dir.path().join("missing").join("db.sqlite"));
        assert_eq!(store.load().await, default_templates());
        assert!(store.cache.read().await.is_none());
    }

    #[actix_web::test]
    async fn failed_write_leaves_cache_untouched() {
        let dir = TempDir::new().unwrap();
        let store = TemplateStore::new(dir.path().join("missing").join("db.sqlite"));
        let result = store
            .upsert("Fintech".into(), Template::new("Fintech", "x"))
            .await;
        assert!(result.is_err());
        assert!(store.cache.read().await.is_none());
        assert!(!store.load().await.contains_key("Fintech"));
    }
}
