//! Firestore database importer
//!
//! Interactively imports exported collection files into a target database.
//! Refuses the production service account key.
//!
//! # Usage
//!
//! ```bash
//! FIREBASE_PROJECT_ID=staging FIREBASE_SERVICE_ACCOUNT_PATH=staging.json \
//!     firestore-import --dry-run
//! ```

use std::process::ExitCode;

use clap::Parser;
use firestore_sampler::cli::{ImportArgs, main_import};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    main_import(ImportArgs::parse()).await
}
