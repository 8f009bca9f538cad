//! Certificate store on the local filesystem.
//!
//! Layout per domain set, `<key>` being the domains joined with `+` and `*`
//! replaced by `_`:
//!
//! | File | Content |
//! |------|---------|
//! | `<key>.crt` | certificate (PEM) |
//! | `<key>.issuer.crt` | issuer certificate, when present |
//! | `<key>.key` | private key |
//! | `<key>.pem` | certificate followed by the private key |
//! | `<key>.json` | metadata |

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use acme_dns_core::error::{CoreError, CoreResult};
use acme_dns_core::traits::CertStore;
use acme_dns_core::types::{CertificateBundle, CertificateExpiry};

/// Metadata written next to the certificate
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CertificateResource {
    domain: String,
    domains: Vec<String>,
    cert_url: String,
    cert_stable_url: String,
    not_after: DateTime<Utc>,
    stored_at: DateTime<Utc>,
}

/// `notAfter` of the first certificate in a PEM document
pub fn parse_not_after(pem: &[u8]) -> CoreResult<DateTime<Utc>> {
    let (_, pem) = x509_parser::pem::parse_x509_pem(pem)
        .map_err(|e| CoreError::Store(format!("invalid PEM: {e}")))?;
    let cert = pem
        .parse_x509()
        .map_err(|e| CoreError::Store(format!("invalid certificate: {e}")))?;

    let timestamp = cert.validity().not_after.timestamp();
    DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| CoreError::Store(format!("notAfter out of range: {timestamp}")))
}

fn store_err(path: &Path, e: &std::io::Error) -> CoreError {
    CoreError::Store(format!("{}: {e}", path.display()))
}

/// Filesystem [`CertStore`]
pub struct FileCertStore {
    root: PathBuf,
}

impl FileCertStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File name stem of a domain set
    pub fn base_name(domains: &[String]) -> String {
        domains.join("+").replace('*', "_")
    }

    fn path(&self, domains: &[String], extension: &str) -> PathBuf {
        self.root
            .join(format!("{}.{extension}", Self::base_name(domains)))
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> CoreResult<()> {
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| store_err(path, &e))
    }

    /// Same as `write`, readable by the owner only
    async fn write_private(&self, path: &Path, contents: &[u8]) -> CoreResult<()> {
        self.write(path, contents).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| store_err(path, &e))?;
        }
        Ok(())
    }
}

#[async_trait]
impl CertStore for FileCertStore {
    async fn store(&self, bundle: &CertificateBundle, domains: &[String]) -> CoreResult<()> {
        let Some(private_key) = bundle.private_key.as_deref().filter(|k| !k.is_empty()) else {
            return Err(CoreError::Store("private key missing".to_string()));
        };
        // A certificate `load` cannot read back must never reach the disk
        let not_after = parse_not_after(bundle.certificate.as_bytes())?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| store_err(&self.root, &e))?;

        self.write(&self.path(domains, "crt"), bundle.certificate.as_bytes())
            .await?;
        if !bundle.issuer_certificate.is_empty() {
            self.write(
                &self.path(domains, "issuer.crt"),
                bundle.issuer_certificate.as_bytes(),
            )
            .await?;
        }
        self.write_private(&self.path(domains, "key"), private_key.as_bytes())
            .await?;

        let mut combined = bundle.certificate.clone();
        if !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(private_key);
        self.write_private(&self.path(domains, "pem"), combined.as_bytes())
            .await?;

        let resource = CertificateResource {
            domain: bundle.domain.clone(),
            domains: domains.to_vec(),
            cert_url: bundle.cert_url.clone(),
            cert_stable_url: bundle.cert_stable_url.clone(),
            not_after,
            stored_at: Utc::now(),
        };
        let json = serde_json::to_vec_pretty(&resource)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
        self.write(&self.path(domains, "json"), &json).await?;

        log::info!(
            "Stored certificate for {} under {}",
            domains.join(", "),
            self.root.display()
        );
        Ok(())
    }

    async fn load(&self, domains: &[String]) -> CoreResult<Option<CertificateExpiry>> {
        let path = self.path(domains, "crt");
        let pem = match tokio::fs::read(&path).await {
            Ok(pem) => pem,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store_err(&path, &e)),
        };

        parse_not_after(&pem).map(|not_after| Some(CertificateExpiry::new(not_after)))
    }
}
