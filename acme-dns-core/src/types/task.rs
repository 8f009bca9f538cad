//! Certificate task outcomes

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::error::CoreError;

/// Stages of one certificate task, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    DecideRenewal,
    LoadUser,
    BuildConfig,
    RegisterAccount,
    ObtainCertificate,
    StoreCertificate,
    Notify,
    PersistUserKey,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DecideRenewal => "decide renewal",
            Self::LoadUser => "load user",
            Self::BuildConfig => "build config",
            Self::RegisterAccount => "register account",
            Self::ObtainCertificate => "obtain certificate",
            Self::StoreCertificate => "store certificate",
            Self::Notify => "notify",
            Self::PersistUserKey => "persist user key",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-fatal failure of a best-effort stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageWarning {
    pub stage: Stage,
    pub message: String,
}

/// Successful end of a certificate task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ObtainOutcome {
    /// Existing certificate is valid beyond the renewal window
    #[serde(rename_all = "camelCase")]
    Skipped { remaining_days: i64 },
    /// A new certificate was issued and stored
    Issued { warnings: Vec<StageWarning> },
}

/// Fatal failure of a certificate task
#[derive(Debug, Error, Serialize)]
#[error("[{}] {stage} failed: {source}", .domains.join(", "))]
pub struct TaskError {
    pub domains: Vec<String>,
    pub stage: Stage,
    pub source: CoreError,
}

impl TaskError {
    pub fn new(domains: &[String], stage: Stage, source: CoreError) -> Self {
        Self {
            domains: domains.to_vec(),
            stage,
            source,
        }
    }
}

/// Outcome of one domain within a run
#[derive(Debug)]
pub struct DomainReport {
    pub domain: String,
    pub result: Result<ObtainOutcome, TaskError>,
}

/// Aggregated outcome of a run over several domains
#[derive(Debug, Default)]
pub struct RunSummary {
    pub success_count: usize,
    pub skipped_count: usize,
    pub failed_count: usize,
    pub reports: Vec<DomainReport>,
}

impl RunSummary {
    pub fn from_reports(reports: Vec<DomainReport>) -> Self {
        let mut summary = Self::default();
        for report in &reports {
            match &report.result {
                Ok(ObtainOutcome::Issued { .. }) => summary.success_count += 1,
                Ok(ObtainOutcome::Skipped { .. }) => summary.skipped_count += 1,
                Err(_) => summary.failed_count += 1,
            }
        }
        summary.reports = reports;
        summary
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count > 0
    }

    /// Report of `domain`, if it was part of the run
    pub fn report(&self, domain: &str) -> Option<&DomainReport> {
        self.reports.iter().find(|r| r.domain == domain)
    }
}
