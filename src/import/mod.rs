//! Import of exported collection files into a target database
//!
//! Each `<collection>.json` file in the import directory holds the
//! `sample_documents` of one collection. Documents are applied one at a time:
//! - dry run: counted as imported, nothing is read or written
//! - live, document exists and overwrite is off: skipped
//! - otherwise: written (full replace)
//!
//! A failing document is counted as an error and the collection continues;
//! a failing collection is recorded in the report and the run continues.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value as JsonValue;
use tracing::{debug, error, info};

use crate::codec::{self, Fields};
use crate::error::{ConfigError, FormatError, Result};
use crate::record::{DocumentRecord, MANIFEST_FILE, REPORT_PREFIX, timestamp_now};
use crate::store::DocumentWriter;
use crate::ui::{Console, Marker};

pub mod report;
pub mod safety;

pub use report::{
    CollectionOutcome, CollectionResult, DocumentOutcome, FailedImport, ImportReport,
    ImportSummary,
};
pub use safety::validate_credentials;

const SAMPLE_DOCUMENTS_KEY: &str = "sample_documents";

/// Collection names available in `import_dir`, sorted.
///
/// Every `*.json` file counts except the export manifest and import reports.
pub async fn list_available_collections(import_dir: &Path) -> Result<Vec<String>> {
    if !import_dir.is_dir() {
        return Err(ConfigError::DirectoryNotFound(import_dir.display().to_string()).into());
    }

    let mut collections = Vec::new();
    let mut entries = tokio::fs::read_dir(import_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if file_name == MANIFEST_FILE || file_name.starts_with(REPORT_PREFIX) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            collections.push(stem.to_string());
        }
    }

    collections.sort();
    Ok(collections)
}

/// Parse `<import_dir>/<name>.json`.
pub async fn load_collection_data(name: &str, import_dir: &Path) -> Result<JsonValue> {
    let path = import_dir.join(format!("{name}.json"));
    if !path.exists() {
        return Err(FormatError::CollectionNotFound(path.display().to_string()).into());
    }
    let text = tokio::fs::read_to_string(&path).await?;
    Ok(serde_json::from_str(&text)?)
}

/// Applies collection files to a writable store.
pub struct Importer<'a, S: DocumentWriter + ?Sized> {
    store: &'a S,
    project_id: String,
    dry_run: bool,
    console: Console,
}

impl<'a, S: DocumentWriter + ?Sized> Importer<'a, S> {
    pub fn new(store: &'a S, project_id: impl Into<String>, dry_run: bool) -> Self {
        Self {
            store,
            project_id: project_id.into(),
            dry_run,
            console: Console::new(false),
        }
    }

    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    fn mode_tag(&self) -> &'static str {
        if self.dry_run { "[DRY-RUN] " } else { "" }
    }

    /// Import one collection file.
    ///
    /// Fails as a whole only when the file is missing or malformed; individual
    /// document failures are counted in `errors`.
    pub async fn import_collection(
        &self,
        name: &str,
        import_dir: &Path,
        overwrite: bool,
    ) -> Result<CollectionOutcome> {
        self.console.print(
            Marker::Start,
            format!("{}Importing collection: {}", self.mode_tag(), name),
        );

        let data = load_collection_data(name, import_dir).await?;
        let records = sample_documents(name, data)?;

        let mut outcome = CollectionOutcome {
            collection_name: name.to_string(),
            total_documents: records.len(),
            imported: 0,
            skipped: 0,
            errors: 0,
            imported_at: String::new(),
        };

        for record in &records {
            let fields = codec::deserialize_fields(&record.data);
            match self.apply_document(name, &record.id, &fields, overwrite).await {
                Ok(DocumentOutcome::Imported) => outcome.imported += 1,
                Ok(DocumentOutcome::Skipped) => outcome.skipped += 1,
                Err(e) => {
                    error!("Import of {}/{} failed: {}", name, record.id, e);
                    self.console
                        .failure(format!("  Error importing document {}: {}", record.id, e));
                    outcome.errors += 1;
                }
            }
        }
        outcome.imported_at = timestamp_now();

        self.console.success(format!("Collection {name} import completed:"));
        self.console.info(format!(
            "   Total: {}, Imported: {}, Skipped: {}, Errors: {}",
            outcome.total_documents, outcome.imported, outcome.skipped, outcome.errors
        ));
        Ok(outcome)
    }

    async fn apply_document(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
        overwrite: bool,
    ) -> Result<DocumentOutcome> {
        if self.dry_run {
            self.console
                .print(Marker::DryRun, format!("  [DRY-RUN] Would import document: {id}"));
            return Ok(DocumentOutcome::Imported);
        }

        if !overwrite && self.store.exists(collection, id).await? {
            self.console
                .print(Marker::Skipped, format!("  Skipped existing document: {id}"));
            return Ok(DocumentOutcome::Skipped);
        }

        self.store.set(collection, id, fields).await?;
        debug!("Imported {}/{}", collection, id);
        self.console.success(format!("  Imported document: {id}"));
        Ok(DocumentOutcome::Imported)
    }

    /// Import each named collection and aggregate a report.
    ///
    /// In live mode the report is also written next to the import directory.
    pub async fn import_selected_collections(
        &self,
        names: &[String],
        import_dir: &Path,
        overwrite: bool,
    ) -> Result<ImportReport> {
        self.console.print(
            Marker::Start,
            format!(
                "{}Starting import of {} collections",
                self.mode_tag(),
                names.len()
            ),
        );

        let import_started_at = timestamp_now();
        let mut collections = BTreeMap::new();
        let mut summary = ImportSummary::new(names.len());

        for name in names {
            let result = match self.import_collection(name, import_dir, overwrite).await {
                Ok(outcome) => {
                    summary.record_success(&outcome);
                    CollectionResult::Imported(outcome)
                }
                Err(e) => {
                    error!("Import of collection {} failed: {}", name, e);
                    self.console
                        .failure(format!("Failed to import collection {name}: {e}"));
                    summary.record_failure();
                    CollectionResult::Failed(FailedImport {
                        error: e.to_string(),
                        imported_at: timestamp_now(),
                    })
                }
            };
            collections.insert(name.clone(), result);
        }

        let report = ImportReport {
            project_id: self.project_id.clone(),
            import_started_at,
            dry_run: self.dry_run,
            collections,
            summary,
            import_completed_at: timestamp_now(),
        };

        if !self.dry_run {
            let path = report.save(import_dir).await?;
            info!("Import report saved to {}", path.display());
            self.console
                .print(Marker::Info, format!("Import report saved: {}", path.display()));
        }

        Ok(report)
    }
}

fn sample_documents(name: &str, data: JsonValue) -> Result<Vec<DocumentRecord>> {
    let file = format!("{name}.json");
    let JsonValue::Object(mut obj) = data else {
        return Err(FormatError::MissingKey {
            file,
            key: SAMPLE_DOCUMENTS_KEY.to_string(),
        }
        .into());
    };
    let Some(docs) = obj.remove(SAMPLE_DOCUMENTS_KEY) else {
        return Err(FormatError::MissingKey {
            file,
            key: SAMPLE_DOCUMENTS_KEY.to_string(),
        }
        .into());
    };
    serde_json::from_value(docs).map_err(|e| {
        FormatError::InvalidRecord {
            file,
            reason: e.to_string(),
        }
        .into()
    })
}
