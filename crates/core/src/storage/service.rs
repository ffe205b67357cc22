//! Backup store implementation using Apache OpenDAL.

use async_trait::async_trait;
use msb_shared::BackupConfig;
use opendal::{Operator, services};
use tracing::{info, warn};

use super::error::StorageError;
use crate::delivery::{BackupExporter, BackupFile, backup_filename};
use crate::reports::SubmittedReport;

/// Writes report backups to the configured backend.
pub struct BackupStore {
    operator: Operator,
    provider: &'static str,
}

impl BackupStore {
    /// Create a backup store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: &BackupConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(config)?;
        Ok(Self {
            operator,
            provider: provider_name(config),
        })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(config: &BackupConfig) -> Result<Operator, StorageError> {
        match config {
            BackupConfig::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            BackupConfig::LocalFs { root } => {
                if root.trim().is_empty() {
                    return Err(StorageError::configuration("empty backup root"));
                }
                let builder = services::Fs::default().root(root);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
        }
    }

    /// Write a backup file under its own name.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    pub async fn write(&self, file: BackupFile) -> Result<(), StorageError> {
        self.operator
            .write(&file.filename, file.contents.into_bytes())
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Read a backup file back as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not UTF-8.
    pub async fn read(&self, filename: &str) -> Result<String, StorageError> {
        let buffer = self
            .operator
            .read(filename)
            .await
            .map_err(StorageError::from)?;
        String::from_utf8(buffer.to_vec()).map_err(|e| StorageError::Operation(e.to_string()))
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider
    }
}

#[async_trait]
impl BackupExporter for BackupStore {
    async fn export(&self, report: &SubmittedReport) -> String {
        let filename = backup_filename(report);
        let result = match BackupFile::for_report(report) {
            Ok(file) => self.write(file).await,
            Err(e) => Err(StorageError::from(e)),
        };

        match result {
            Ok(()) => info!(filename = %filename, provider = self.provider, "Backup saved"),
            Err(e) => warn!(filename = %filename, error = %e, "Failed to save backup"),
        }
        filename
    }
}

const fn provider_name(config: &BackupConfig) -> &'static str {
    match config {
        BackupConfig::S3 { .. } => "s3",
        BackupConfig::LocalFs { .. } => "local",
    }
}

/// Extension trait for pipe operator.
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::fiscal::Quarter;
    use crate::reports::ReportDraft;

    fn report() -> SubmittedReport {
        let mut draft = ReportDraft::default();
        draft.legal_name = "Acme Cash LLC".to_string();
        draft.contact_person = "Jane Doe".to_string();
        draft.quarter = Some(Quarter::Q2);
        draft.year = Some(2024);
        draft
            .snapshot(Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap())
            .unwrap()
    }

    fn local_config(root: &std::path::Path) -> BackupConfig {
        BackupConfig::LocalFs {
            root: root.to_string_lossy().into_owned(),
        }
    }

    #[test]
    fn test_local_store_provider() {
        let dir = tempfile::tempdir().unwrap();
        let store = BackupStore::from_config(&local_config(dir.path())).unwrap();
        assert_eq!(store.provider_name(), "local");
    }

    #[test]
    fn test_empty_root_rejected() {
        let config = BackupConfig::LocalFs {
            root: "  ".to_string(),
        };
        let err = BackupStore::from_config(&config).err().unwrap();
        assert!(matches!(err, StorageError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_export_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = BackupStore::from_config(&local_config(dir.path())).unwrap();
        let report = report();

        let filename = store.export(&report).await;

        assert_eq!(filename, "MSB_Report_Q2_2024_Acme_Cash_LLC.json");
        let on_disk = std::fs::read_to_string(dir.path().join(&filename)).unwrap();
        let parsed: SubmittedReport = serde_json::from_str(&on_disk).unwrap();
        assert_eq!(parsed, report);
        assert_eq!(store.read(&filename).await.unwrap(), on_disk);
    }

    #[tokio::test]
    async fn test_export_keeps_slashed_names_in_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = BackupStore::from_config(&local_config(dir.path())).unwrap();
        let mut report = report();
        report.company_info.legal_name = "A/B Cash".to_string();

        let filename = store.export(&report).await;

        assert_eq!(filename, "MSB_Report_Q2_2024_A_B_Cash.json");
        assert!(dir.path().join(&filename).is_file());
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = BackupStore::from_config(&local_config(dir.path())).unwrap();

        let err = store.read("missing.json").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }
}
