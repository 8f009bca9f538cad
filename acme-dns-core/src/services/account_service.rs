//! ACME account service

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::OrchestratorConfig;
use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{StoredAccount, UserAccount};

/// Loads, persists and exports ACME users
pub struct AccountService {
    ctx: Arc<ServiceContext>,
    config: Arc<OrchestratorConfig>,
}

impl AccountService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, config: Arc<OrchestratorConfig>) -> Self {
        Self { ctx, config }
    }

    /// User for `email`: the stored account when reuse is enabled, else a fresh key.
    pub async fn load_user(&self, email: &str) -> CoreResult<UserAccount> {
        if self.config.reuse_account {
            match self.ctx.account_store.load(email).await {
                Ok(Some(stored)) => {
                    log::debug!("Reusing stored ACME account of {email}");
                    return Ok(stored.into());
                }
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Failed to load stored account of {email}, using a new key: {e}");
                }
            }
        }

        log::info!("Generating a new ACME account key for {email}");
        UserAccount::generate(email)
    }

    /// Persist the user, keeping the original creation time
    pub async fn save_user(&self, user: &UserAccount) -> CoreResult<()> {
        let previous = self.ctx.account_store.load(&user.email).await.ok().flatten();
        let stored = StoredAccount::from_user(user, previous.as_ref());
        self.ctx.account_store.save(&stored).await
    }

    /// Path of the exported account key: `{config_dir}/{email}.pem`
    pub fn key_path(&self, email: &str) -> PathBuf {
        self.config.config_dir.join(format!("{email}.pem"))
    }

    /// Write the account private key to [`key_path`](Self::key_path)
    pub async fn persist_key(&self, user: &UserAccount) -> CoreResult<PathBuf> {
        let path = self.key_path(&user.email);

        let dir = &self.config.config_dir;
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| CoreError::PersistKey(format!("{}: {e}", dir.display())))?;
        tokio::fs::write(&path, user.private_key_pem.as_bytes())
            .await
            .map_err(|e| CoreError::PersistKey(format!("{}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| CoreError::PersistKey(format!("{}: {e}", path.display())))?;
        }

        log::debug!("Account key written to {}", path.display());
        Ok(path)
    }
}
