//! Import outcomes and the persisted run report

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::export::write_json;
use crate::record::REPORT_PREFIX;

/// Directory (next to the import directory) receiving the reports.
pub const REPORTS_DIR: &str = "firestore_import_reports";

/// Terminal state of a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOutcome {
    Imported,
    Skipped,
}

/// Counts for one imported collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionOutcome {
    pub collection_name: String,
    pub total_documents: usize,
    pub imported: usize,
    pub skipped: usize,
    pub errors: usize,
    pub imported_at: String,
}

/// Placeholder for a collection that could not be imported at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedImport {
    pub error: String,
    pub imported_at: String,
}

/// Report entry for one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CollectionResult {
    Imported(CollectionOutcome),
    Failed(FailedImport),
}

/// Totals across the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_collections: usize,
    pub successful_imports: usize,
    pub failed_imports: usize,
    pub total_documents: usize,
    pub total_imported: usize,
    pub total_skipped: usize,
    pub total_errors: usize,
}

impl ImportSummary {
    pub fn new(total_collections: usize) -> Self {
        Self {
            total_collections,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self, outcome: &CollectionOutcome) {
        self.successful_imports += 1;
        self.total_documents += outcome.total_documents;
        self.total_imported += outcome.imported;
        self.total_skipped += outcome.skipped;
        self.total_errors += outcome.errors;
    }

    pub fn record_failure(&mut self) {
        self.failed_imports += 1;
    }
}

/// Report of one import run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub project_id: String,
    pub import_started_at: String,
    pub dry_run: bool,
    pub collections: BTreeMap<String, CollectionResult>,
    pub summary: ImportSummary,
    pub import_completed_at: String,
}

impl ImportReport {
    /// Persist under `<import_dir parent>/firestore_import_reports/`.
    pub async fn save(&self, import_dir: &Path) -> Result<PathBuf> {
        let dir = reports_dir(import_dir);
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(report_file_name(&chrono::Local::now()));
        write_json(&path, self).await?;
        Ok(path)
    }
}

/// Reports directory for an import directory.
pub fn reports_dir(import_dir: &Path) -> PathBuf {
    match import_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(REPORTS_DIR),
        _ => PathBuf::from(".").join(REPORTS_DIR),
    }
}

fn report_file_name<Tz>(now: &chrono::DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{REPORT_PREFIX}{}.json", now.format("%Y%m%d_%H%M%S"))
}
