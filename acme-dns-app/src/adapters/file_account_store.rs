//! ACME account store on the local filesystem.
//!
//! One JSON document per email: `<dir>/<email>.json`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use acme_dns_core::error::{CoreError, CoreResult};
use acme_dns_core::traits::AccountStore;
use acme_dns_core::types::StoredAccount;

/// Filesystem [`AccountStore`]
pub struct FileAccountStore {
    dir: PathBuf,
}

impl FileAccountStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the account file of `email`
    pub fn path(&self, email: &str) -> PathBuf {
        let file_name: String = email
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

#[async_trait]
impl AccountStore for FileAccountStore {
    async fn load(&self, email: &str) -> CoreResult<Option<StoredAccount>> {
        let path = self.path(email);
        let json = match tokio::fs::read(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CoreError::Storage(format!("{}: {e}", path.display()))),
        };

        serde_json::from_slice(&json)
            .map(Some)
            .map_err(|e| CoreError::Serialization(format!("{}: {e}", path.display())))
    }

    async fn save(&self, account: &StoredAccount) -> CoreResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CoreError::Storage(format!("{}: {e}", self.dir.display())))?;

        let path = self.path(&account.email);
        let json = serde_json::to_vec_pretty(account)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| CoreError::Storage(format!("{}: {e}", path.display())))?;

        // The document holds the account private key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| CoreError::Storage(format!("{}: {e}", path.display())))?;
        }

        log::debug!("Saved ACME account of {} to {}", account.email, path.display());
        Ok(())
    }
}
