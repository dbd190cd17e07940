//! SQLite-backed contact list.
//!
//! Contacts are stored as JSON bodies keyed by their CSV row position, so the
//! list always comes back in file order. The `uploads` table keeps the MD5
//! fingerprint and headers of the last uploaded file.

use crate::db;
use crate::error::ServiceError;
use common::model::contact::Contact;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;

pub struct ContactStore {
    db_path: PathBuf,
}

impl ContactStore {
    pub fn new(db_path: PathBuf) -> Self {
        ContactStore { db_path }
    }

    /// Replaces the stored contacts with `contacts` in one transaction.
    ///
    /// Returns `true` when `csv_md5` matches the fingerprint of the previous upload.
    pub async fn replace(
        &self,
        contacts: Vec<Contact>,
        csv_md5: String,
        headers: Vec<String>,
    ) -> Result<bool, ServiceError> {
        db::with_connection(&self.db_path, move |conn| {
            let headers = serde_json::to_string(&headers)?;
            let tx = conn.transaction()?;

            let previous: Option<String> = tx
                .query_row("SELECT csv_md5 FROM uploads WHERE id = 1", [], |row| row.get(0))
                .optional()?;

            tx.execute("DELETE FROM contacts", [])?;
            {
                let mut stmt = tx.prepare("INSERT INTO contacts (position, body) VALUES (?1, ?2)")?;
                for (position, contact) in contacts.iter().enumerate() {
                    stmt.execute(params![position as i64, serde_json::to_string(contact)?])?;
                }
            }
            tx.execute(
                "INSERT OR REPLACE INTO uploads (id, csv_md5, headers) VALUES (1, ?1, ?2)",
                params![csv_md5, headers],
            )?;
            tx.commit()?;

            Ok(previous.as_deref() == Some(csv_md5.as_str()))
        })
        .await
    }

    /// All stored contacts in upload order.
    pub async fn list(&self) -> Result<Vec<Contact>, ServiceError> {
        db::with_connection(&self.db_path, |conn| read_contacts(conn)).await
    }

    /// Stored contacts whose `role` equals `role` exactly.
    pub async fn by_role(&self, role: &str) -> Result<Vec<Contact>, ServiceError> {
        let contacts = self.list().await?;
        Ok(contacts
            .into_iter()
            .filter(|c| c.role.as_deref() == Some(role))
            .collect())
    }
}

fn read_contacts(conn: &Connection) -> Result<Vec<Contact>, ServiceError> {
    let mut stmt = conn.prepare("SELECT body FROM contacts ORDER BY position")?;
    let bodies = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    bodies
        .iter()
        .map(|body| Ok(serde_json::from_str(body)?))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, ContactStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contacts.sqlite");
        db::init(&path).unwrap();
        (dir, ContactStore::new(path))
    }

    fn contact(name: &str, role: &str) -> Contact {
        Contact {
            name: Some(name.into()),
            role: Some(role.into()),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn keeps_upload_order() {
        let (_dir, store) = store();
        let contacts = vec![contact("Zoe", "CTO"), contact("Adam", "CEO"), contact("Mia", "CTO")];
        store
            .replace(contacts.clone(), "abc".into(), vec!["First Name".into()])
            .await
            .unwrap();
        assert_eq!(store.list().await.unwrap(), contacts);
    }

    #[actix_web::test]
    async fn replace_discards_previous_contacts() {
        let (_dir, store) = store();
        store
            .replace(vec![contact("Zoe", "CTO"), contact("Adam", "CEO")], "a".into(), vec![])
            .await
            .unwrap();
        store
            .replace(vec![contact("Mia", "VP")], "b".into(), vec![])
            .await
            .unwrap();
        assert_eq!(store.list().await.unwrap(), vec![contact("Mia", "VP")]);
    }

    #[actix_web::test]
    async fn reports_identical_uploads() {
        let (_dir, store) = store();
        let first = store.replace(vec![], "same".into(), vec![]).await.unwrap();
        let second = store.replace(vec![], "same".into(), vec![]).await.unwrap();
        let third = store.replace(vec![], "other".into(), vec![]).await.unwrap();
        assert!(!first);
        assert!(second);
        assert!(!third);
    }

    #[actix_web::test]
    async fn filters_by_exact_role() {
        let (_dir, store) = store();
        store
            .replace(
                vec![contact("Zoe", "CTO"), contact("Adam", "CEO"), contact("Mia", "cto")],
                "x".into(),
                vec![],
            )
            .await
            .unwrap();
        let ctos = store.by_role("CTO").await.unwrap();
        assert_eq!(ctos, vec![contact("Zoe", "CTO")]);
        assert!(store.by_role("Founder").await.unwrap().is_empty());
    }
}
