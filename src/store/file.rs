use crate::store::Store;
use crate::{utils, Result};
use anyhow::ensure;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that holds `key`. Keys are plain names, not paths.
    pub fn path(&self, key: &str) -> Result<PathBuf> {
        ensure!(
            !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            "Invalid storage key '{key}', use letters, digits, '-' or '_'"
        );
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl Store for FileStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        let Some(bytes) = utils::read_optional(&path).await? else {
            return Ok(None);
        };
        match String::from_utf8(bytes) {
            Ok(text) => Ok(Some(text)),
            Err(e) => {
                // Malformed data opens as an empty ledger.
                warn!("{} is not valid UTF-8 ({e}), ignoring its contents", path.display());
                Ok(None)
            }
        }
    }

    async fn save(&self, key: &str, text: &str) -> Result<()> {
        utils::make_dir(&self.dir).await?;
        utils::write_replace(self.path(key)?, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SaleInput;
    use crate::store::StoredLedger;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        assert!(store.load("sales").await.unwrap().is_none());

        store.save("sales", "[]").await.unwrap();
        assert_eq!(store.load("sales").await.unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("data").join("sales.json").is_file());
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.save("../escape", "[]").await.is_err());
        assert!(store.load("").await.is_err());
    }

    #[tokio::test]
    async fn test_stored_ledger_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        let mut stored = StoredLedger::open(store.clone(), "sales").await.unwrap();
        stored
            .add_sale(SaleInput::new("printed", 170, date, "cash", "shirts").with_quantity(2))
            .await
            .unwrap();
        stored
            .add_sale(SaleInput::new("girly", 120, date, "card", "dresses").with_notes("gift"))
            .await
            .unwrap();

        let reopened = StoredLedger::open(store, "sales").await.unwrap();
        assert_eq!(reopened.ledger(), stored.ledger());
    }

    #[tokio::test]
    async fn test_corrupt_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("sales.json"), "not json").unwrap();
        let stored = StoredLedger::open(FileStore::new(dir.path()), "sales")
            .await
            .unwrap();
        assert!(stored.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_non_utf8_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("sales.json"), [0xff, 0xfe, 0x00, 0x5b]).unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.load("sales").await.unwrap().is_none());

        let mut stored = StoredLedger::open(store.clone(), "sales").await.unwrap();
        assert!(stored.ledger().is_empty());

        // The next save replaces the unreadable file.
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        stored
            .add_sale(SaleInput::new("cap", 45, date, "cash", "hats"))
            .await
            .unwrap();
        let reopened = StoredLedger::open(store, "sales").await.unwrap();
        assert_eq!(reopened.ledger().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_records_open_empty() {
        let dir = TempDir::new().unwrap();
        let text = r#"[
            {"id": 1, "product": "printed", "unit_amount": "170", "date": "2024-01-05",
             "payment": "cash", "category": "shirts", "created_at": "2024-01-05T10:00:00Z"},
            {"id": 1, "product": "", "unit_amount": "-5", "quantity": 0, "date": "2024-01-05",
             "payment": "cash", "category": "shirts", "created_at": "2024-01-05T10:00:00Z"}
        ]"#;
        std::fs::write(dir.path().join("sales.json"), text).unwrap();
        let stored = StoredLedger::open(FileStore::new(dir.path()), "sales")
            .await
            .unwrap();
        assert!(stored.ledger().is_empty());
    }
}
