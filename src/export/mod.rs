//! Sampled, read-only database export
//!
//! For every top-level collection the exporter writes `<collection>.json`
//! holding a bounded sample of documents and an estimated document count, then
//! writes a manifest covering all collections. A failure on one collection is
//! recorded in the manifest and the run continues with the rest.
//!
//! The exporter only holds a [`DocumentReader`], so it cannot write to the
//! source database.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{error, info, warn};

use crate::error::Result;
use crate::record::{
    CollectionEntry, CollectionExport, DatabaseExport, DocumentRecord, EstimatedCount,
    FailedExport, MANIFEST_FILE, timestamp_now,
};
use crate::store::DocumentReader;
use crate::ui::{Console, Marker};

pub mod progress;
pub mod writer;

pub use progress::ProgressTracker;
pub use writer::write_json;

/// Documents fetched to estimate a collection's size.
pub const DEFAULT_COUNT_CAP: usize = 100;

/// Read-only exporter over a document store.
pub struct Exporter<'a, S: DocumentReader + ?Sized> {
    store: &'a S,
    project_id: String,
    count_cap: usize,
    console: Console,
    show_progress: bool,
}

impl<'a, S: DocumentReader + ?Sized> Exporter<'a, S> {
    pub fn new(store: &'a S, project_id: impl Into<String>) -> Self {
        Self {
            store,
            project_id: project_id.into(),
            count_cap: DEFAULT_COUNT_CAP,
            console: Console::new(false),
            show_progress: false,
        }
    }

    pub fn with_count_cap(mut self, count_cap: usize) -> Self {
        self.count_cap = count_cap;
        self
    }

    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// All top-level collections, sorted by name.
    pub async fn list_collections(&self) -> Result<Vec<String>> {
        let mut collections = self.store.list_collections().await?;
        collections.sort();
        Ok(collections)
    }

    /// Sample one collection.
    ///
    /// Documents without fields are left out of the sample. The estimated
    /// count comes from a separate query capped at `count_cap`; if that query
    /// fails the count is reported as unknown.
    pub async fn export_collection(&self, name: &str, sample_limit: usize) -> Result<CollectionExport> {
        self.sample_collection(name, sample_limit, &ProgressTracker::new(0, false))
            .await
    }

    /// Status lines go through `tracker` so they do not tear its bar.
    async fn sample_collection(
        &self,
        name: &str,
        sample_limit: usize,
        tracker: &ProgressTracker,
    ) -> Result<CollectionExport> {
        info!("Analyzing collection {}", name);

        let sample_documents: Vec<DocumentRecord> = self
            .store
            .query(name, sample_limit)
            .await?
            .iter()
            .filter(|doc| !doc.fields.is_empty())
            .map(DocumentRecord::from)
            .collect();

        let estimated_document_count = self.estimate_count(name, tracker).await;

        Ok(CollectionExport {
            collection_name: name.to_string(),
            estimated_document_count,
            sample_count: sample_documents.len(),
            sample_documents,
            exported_at: timestamp_now(),
        })
    }

    async fn estimate_count(&self, name: &str, tracker: &ProgressTracker) -> EstimatedCount {
        match self.store.query(name, self.count_cap).await {
            Ok(docs) if docs.len() >= self.count_cap => EstimatedCount::AtLeast(self.count_cap),
            Ok(docs) => EstimatedCount::Exact(docs.len()),
            Err(e) => {
                warn!("Could not count documents in {}: {}", name, e);
                tracker.suspend(|| {
                    self.console
                        .warning(format!("Could not get document count for {name}: {e}"))
                });
                EstimatedCount::Unknown
            }
        }
    }

    /// Export every collection into `output_dir`.
    ///
    /// Writes one file per successfully exported collection and finally the
    /// manifest, which also lists the failed collections.
    pub async fn export_database(&self, output_dir: &Path, sample_limit: usize) -> Result<DatabaseExport> {
        self.console.print(
            Marker::Start,
            format!("Starting database export to: {}", output_dir.display()),
        );
        tokio::fs::create_dir_all(output_dir).await?;

        let names = self.list_collections().await?;
        self.console.print(
            Marker::Info,
            format!("Found {} collections: {}", names.len(), names.join(", ")),
        );

        let tracker = ProgressTracker::new(names.len() as u64, self.show_progress);
        let mut collections = BTreeMap::new();

        for name in &names {
            tracker.start(name);
            let entry = match self
                .export_and_write(name, output_dir, sample_limit, &tracker)
                .await
            {
                Ok(export) => {
                    tracker.suspend(|| {
                        self.console.success(format!(
                            "Exported {} ({} samples)",
                            name, export.sample_count
                        ))
                    });
                    CollectionEntry::Exported(export)
                }
                Err(e) => {
                    error!("Export of {} failed: {}", name, e);
                    tracker.suspend(|| self.console.failure(format!("Error exporting {name}: {e}")));
                    CollectionEntry::Failed(FailedExport {
                        error: e.to_string(),
                        exported_at: timestamp_now(),
                    })
                }
            };
            collections.insert(name.clone(), entry);
            tracker.advance();
        }
        tracker.finish();

        let structure = DatabaseExport {
            project_id: self.project_id.clone(),
            exported_at: timestamp_now(),
            total_collections: names.len(),
            collections,
        };
        write_json(&output_dir.join(MANIFEST_FILE), &structure).await?;

        let shown = std::path::absolute(output_dir).unwrap_or_else(|_| output_dir.to_path_buf());
        self.console.print(
            Marker::Success,
            format!("Database export completed! Files saved to: {}", shown.display()),
        );
        Ok(structure)
    }

    async fn export_and_write(
        &self,
        name: &str,
        output_dir: &Path,
        sample_limit: usize,
        tracker: &ProgressTracker,
    ) -> Result<CollectionExport> {
        let export = self.sample_collection(name, sample_limit, tracker).await?;
        write_json(&output_dir.join(format!("{name}.json")), &export).await?;
        Ok(export)
    }
}
