//! Firestore database exporter
//!
//! Samples every top-level collection into `<collection>.json` files plus a
//! manifest. The source database is only read.
//!
//! # Usage
//!
//! ```bash
//! FIREBASE_SERVICE_ACCOUNT_PATH=prod.json firestore-export --sample-limit 10
//! ```

use std::process::ExitCode;

use clap::Parser;
use firestore_sampler::cli::{ExportArgs, main_export};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    main_export(ExportArgs::parse()).await
}
