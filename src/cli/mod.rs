//! Command-line interface for the export and import tools
//!
//! This module handles:
//! - Argument parsing using clap, with every setting also bound to an
//!   environment variable
//! - Layering arguments over the configuration file
//! - Logging initialization
//! - The top-level export and import flows and their exit codes

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser};
use clap_complete::Shell;
use tracing::Level;

use crate::config::{Config, LoggingConfig, database_id, is_truthy};
use crate::error::{ConfigError, Result, SamplerError};
use crate::export::Exporter;
use crate::import::{ImportReport, Importer, list_available_collections, validate_credentials};
use crate::store::DocumentWriter;
use crate::store::firestore::{DEFAULT_DATABASE_ID, FirestoreStore, ServiceAccount};
use crate::ui::{Console, Marker, import_summary_table};

pub mod completion;
pub mod prompt;

use prompt::{PromptProvider, StdioPrompt, ask_overwrite, confirm_import, select_collections};

const SERVICE_ACCOUNT_VAR: &str = "FIREBASE_SERVICE_ACCOUNT_PATH";
const PROJECT_ID_VAR: &str = "FIREBASE_PROJECT_ID";

/// Flags shared by both tools
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<Shell>,
}

/// Sample every collection of a Firestore database into JSON files
#[derive(Parser, Debug)]
#[command(
    name = "firestore-export",
    version,
    about = "Sample Firestore collections into JSON files (read-only)"
)]
pub struct ExportArgs {
    /// Service account key file
    #[arg(long, value_name = "FILE", env = SERVICE_ACCOUNT_VAR)]
    pub service_account: Option<PathBuf>,

    /// Project id; defaults to the service account's project
    #[arg(long, value_name = "ID", env = PROJECT_ID_VAR)]
    pub project_id: Option<String>,

    /// Documents sampled per collection
    #[arg(long, value_name = "N", env = "SAMPLE_LIMIT")]
    pub sample_limit: Option<String>,

    /// Directory receiving the exported files
    #[arg(long, value_name = "DIR", env = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Import exported collection files into a Firestore database
#[derive(Parser, Debug)]
#[command(
    name = "firestore-import",
    version,
    about = "Import sampled collections into a Firestore database"
)]
pub struct ImportArgs {
    /// Target project id
    #[arg(long, value_name = "ID", env = PROJECT_ID_VAR)]
    pub project_id: Option<String>,

    /// Service account key file of the target project
    #[arg(long, value_name = "FILE", env = SERVICE_ACCOUNT_VAR)]
    pub service_account: Option<PathBuf>,

    /// Directory holding the collection files
    #[arg(long, value_name = "DIR", env = "IMPORT_DIR")]
    pub import_dir: Option<PathBuf>,

    /// Simulate the import without writing ("true" enables)
    #[arg(
        long,
        value_name = "BOOL",
        env = "DRY_RUN",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub dry_run: Option<String>,

    /// Target database name; `default` is the primary database
    #[arg(long = "database", value_name = "NAME", env = "FIREBASE_DATABASE_NAME")]
    pub database_name: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Effective export settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub service_account: PathBuf,
    pub project_id: Option<String>,
    pub sample_limit: usize,
    pub output_dir: PathBuf,
    pub count_cap: usize,
}

/// Effective import settings
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSettings {
    pub project_id: String,
    pub service_account: PathBuf,
    pub import_dir: PathBuf,
    pub dry_run: bool,
    pub database_name: String,
}

impl ExportArgs {
    /// Layer the arguments over `config`.
    pub fn resolve(&self, config: &Config) -> Result<ExportSettings> {
        let sample_limit = match &self.sample_limit {
            Some(value) => parse_limit("SAMPLE_LIMIT", value)?,
            None => config.export.sample_limit,
        };

        Ok(ExportSettings {
            service_account: required(self.service_account.clone(), SERVICE_ACCOUNT_VAR)?,
            project_id: self.project_id.clone().filter(|id| !id.trim().is_empty()),
            sample_limit,
            output_dir: self
                .output_dir
                .clone()
                .unwrap_or_else(|| config.export.output_dir.clone()),
            count_cap: config.export.count_cap,
        })
    }
}

impl ImportArgs {
    /// Layer the arguments over `config`.
    pub fn resolve(&self, config: &Config) -> Result<ImportSettings> {
        let project_id = required(
            self.project_id.clone().filter(|id| !id.trim().is_empty()),
            PROJECT_ID_VAR,
        )?;
        let service_account = required(self.service_account.clone(), SERVICE_ACCOUNT_VAR)?;

        Ok(ImportSettings {
            project_id,
            service_account,
            import_dir: self
                .import_dir
                .clone()
                .unwrap_or_else(|| config.import.import_dir.clone()),
            dry_run: self.dry_run.as_deref().is_some_and(is_truthy),
            database_name: self
                .database_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| config.import.database_name.clone()),
        })
    }
}

fn required<T>(value: Option<T>, var: &str) -> Result<T> {
    value.ok_or_else(|| ConfigError::MissingField(var.to_string()).into())
}

fn parse_limit(field: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }
        .into()),
    }
}

/// Initialize logging to stderr based on verbosity flags and configuration
pub fn initialize_logging(common: &CommonArgs, logging: &LoggingConfig) {
    let level = if common.very_verbose {
        Level::TRACE
    } else if common.verbose {
        Level::DEBUG
    } else {
        logging.level.to_tracing_level()
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed when flows run more than once in a process
    let installed = if logging.timestamps {
        subscriber.try_init()
    } else {
        subscriber.without_time().try_init()
    };
    if installed.is_err() {
        tracing::debug!("Logging already initialized");
    }
}

fn console_for(common: &CommonArgs, config: &Config) -> Console {
    Console::from_env(config.display.color_output && !common.no_color)
}

/// Print a fatal error with guidance where there is some.
fn report_fatal(console: &Console, err: &SamplerError) {
    if let SamplerError::Config(ConfigError::MissingField(var)) = err {
        console.failure(format!("Error: {err}"));
        println!("Please set it before running, for example:");
        println!("export {var}=...");
        return;
    }
    console.failure(format!("Fatal error: {err}"));
}

/// Entry point of `firestore-export`.
pub async fn main_export(args: ExportArgs) -> ExitCode {
    let console = Console::from_env(!args.common.no_color);
    match run_export(args).await {
        Ok(code) => code,
        Err(e) => {
            report_fatal(&console, &e);
            ExitCode::FAILURE
        }
    }
}

/// Entry point of `firestore-import`.
pub async fn main_import(args: ImportArgs) -> ExitCode {
    let console = Console::from_env(!args.common.no_color);
    match run_import(args, &mut StdioPrompt).await {
        Ok(code) => code,
        Err(e) => {
            report_fatal(&console, &e);
            ExitCode::FAILURE
        }
    }
}

/// Export flow: connect read-only, sample every collection, print a summary.
pub async fn run_export(args: ExportArgs) -> Result<ExitCode> {
    if let Some(shell) = args.common.completions {
        completion::print_completions::<ExportArgs>(shell, "firestore-export");
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load_from_file(args.common.config_file.as_deref())?;
    initialize_logging(&args.common, &config.logging);
    let console = console_for(&args.common, &config);

    console.heading("🔥 Firestore Database Exporter");
    let settings = args.resolve(&config)?;

    let account = ServiceAccount::from_file(&settings.service_account)?;
    let project_id = settings
        .project_id
        .clone()
        .unwrap_or_else(|| account.project_id.clone());
    let store = FirestoreStore::connect(account, project_id.as_str(), DEFAULT_DATABASE_ID).await?;
    console.success(format!("Connected to Firestore project: {}", store.project_id()));

    let structure = Exporter::new(&store, store.project_id())
        .with_count_cap(settings.count_cap)
        .with_console(console)
        .with_progress(config.display.progress)
        .export_database(&settings.output_dir, settings.sample_limit)
        .await?;

    println!();
    console.info("Export Summary:");
    println!("   Project: {}", structure.project_id);
    println!("   Collections: {}", structure.total_collections);
    println!("   Output directory: {}", settings.output_dir.display());
    Ok(ExitCode::SUCCESS)
}

/// How an import run ended.
#[derive(Debug)]
pub enum ImportOutcome {
    /// The import directory holds no collection files.
    NothingToImport,
    /// The user quit the menu or declined the confirmation.
    Cancelled,
    Completed(ImportReport),
}

impl ImportOutcome {
    /// Cancelling is a success; an empty import directory is not.
    pub fn is_success(&self) -> bool {
        !matches!(self, ImportOutcome::NothingToImport)
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Import flow: validate credentials, check the import directory, connect,
/// then run the interactive session.
///
/// Local checks all happen before the first network call.
pub async fn run_import(args: ImportArgs, prompt: &mut dyn PromptProvider) -> Result<ExitCode> {
    if let Some(shell) = args.common.completions {
        completion::print_completions::<ImportArgs>(shell, "firestore-import");
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load_from_file(args.common.config_file.as_deref())?;
    initialize_logging(&args.common, &config.logging);
    let console = console_for(&args.common, &config);

    console.heading("📥 Firestore Database Importer");
    let settings = args.resolve(&config)?;

    validate_credentials(&settings.service_account)?;
    let key_name = settings
        .service_account
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    console.success(format!("Service account validated: {key_name}"));

    let Some(available) = importable_collections(&settings.import_dir, &console).await? else {
        return Ok(ImportOutcome::NothingToImport.exit_code());
    };

    let account = ServiceAccount::from_file(&settings.service_account)?;
    let store = FirestoreStore::connect(
        account,
        settings.project_id.as_str(),
        database_id(&settings.database_name),
    )
    .await?;

    let db_info = if store.database_id() == DEFAULT_DATABASE_ID {
        "default database".to_string()
    } else {
        format!("database '{}'", store.database_id())
    };
    let mode = if settings.dry_run { "DRY-RUN" } else { "LIVE" };
    console.success(format!(
        "Connected to Firestore project: {}, {} ({} mode)",
        store.project_id(),
        db_info,
        mode
    ));

    let outcome = import_session(&store, &settings, &available, console, prompt).await?;
    Ok(outcome.exit_code())
}

/// Collection files in `import_dir`, or `None` with guidance printed when
/// there are none.
pub async fn importable_collections(
    import_dir: &Path,
    console: &Console,
) -> Result<Option<Vec<String>>> {
    let available = list_available_collections(import_dir).await?;
    if available.is_empty() {
        console.failure(format!("No collection files found in {}/", import_dir.display()));
        println!("Please ensure you have JSON files in the import directory.");
        return Ok(None);
    }
    Ok(Some(available))
}

/// Interactive part of an import against a connected store: select, confirm,
/// ask about overwriting (live runs only), import and summarize.
pub async fn import_session(
    store: &dyn DocumentWriter,
    settings: &ImportSettings,
    available: &[String],
    console: Console,
    prompt: &mut dyn PromptProvider,
) -> Result<ImportOutcome> {
    let selected = select_collections(available, prompt)?;
    if selected.is_empty() {
        println!("👋 Import cancelled or no collections selected.");
        return Ok(ImportOutcome::Cancelled);
    }

    if !confirm_import(
        &selected,
        &settings.project_id,
        &settings.database_name,
        settings.dry_run,
        prompt,
    )? {
        println!("👋 Import cancelled.");
        return Ok(ImportOutcome::Cancelled);
    }

    let overwrite = if settings.dry_run {
        false
    } else {
        prompt.show("");
        ask_overwrite(prompt)?
    };

    let report = Importer::new(store, settings.project_id.as_str(), settings.dry_run)
        .with_console(console)
        .import_selected_collections(&selected, &settings.import_dir, overwrite)
        .await?;

    print_import_summary(&report, console);
    Ok(ImportOutcome::Completed(report))
}

fn print_import_summary(report: &ImportReport, console: Console) {
    println!();
    println!("{}", import_summary_table(report, console.color_enabled()));
    println!();

    let summary = &report.summary;
    let operation = if report.dry_run { "simulation" } else { "operation" };
    println!("🎉 Import {operation} completed!");
    console.info(format!(
        "Collections: {}/{} successful",
        summary.successful_imports, summary.total_collections
    ));
    println!(
        "📄 Documents: {} imported, {} skipped, {} errors",
        summary.total_imported, summary.total_skipped, summary.total_errors
    );
    if summary.failed_imports > 0 {
        console.print(
            Marker::Warning,
            format!("{} collections failed to import", summary.failed_imports),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::prompt::scripted::ScriptedPrompt;
    use crate::codec::{FieldValue, Fields};
    use crate::store::{MemoryStore, StoreCall};
    use serde_json::json;

    fn export_args(args: &[&str]) -> ExportArgs {
        ExportArgs::try_parse_from(std::iter::once("firestore-export").chain(args.iter().copied()))
            .unwrap()
    }

    fn import_args(args: &[&str]) -> ImportArgs {
        ImportArgs::try_parse_from(std::iter::once("firestore-import").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_export_flags_override_config() {
        let args = export_args(&[
            "--service-account",
            "keys/prod.json",
            "--sample-limit",
            "12",
            "--output-dir",
            "out",
        ]);
        let settings = args.resolve(&Config::default()).unwrap();
        assert_eq!(settings.service_account, PathBuf::from("keys/prod.json"));
        assert_eq!(settings.sample_limit, 12);
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.count_cap, 100);
        assert_eq!(settings.project_id, None);
    }

    #[test]
    fn test_export_defaults_come_from_config() {
        let mut config = Config::default();
        config.export.sample_limit = 3;
        let args = export_args(&["--service-account", "sa.json"]);
        let settings = args.resolve(&config).unwrap();
        assert_eq!(settings.sample_limit, 3);
        assert_eq!(settings.output_dir, PathBuf::from("firestore_export"));
    }

    #[test]
    fn test_invalid_sample_limit_is_config_error() {
        for bad in ["abc", "0", "-2"] {
            let args = ExportArgs {
                service_account: Some("sa.json".into()),
                project_id: None,
                sample_limit: Some(bad.to_string()),
                output_dir: None,
                common: CommonArgs::default(),
            };
            let err = args.resolve(&Config::default()).unwrap_err();
            assert!(
                matches!(err, SamplerError::Config(ConfigError::InvalidValue { .. })),
                "{bad} accepted"
            );
        }
    }

    #[test]
    fn test_missing_service_account_is_reported_by_name() {
        let args = ExportArgs {
            service_account: None,
            project_id: None,
            sample_limit: None,
            output_dir: None,
            common: CommonArgs::default(),
        };
        let err = args.resolve(&Config::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: FIREBASE_SERVICE_ACCOUNT_PATH environment variable not set"
        );
    }

    #[test]
    fn test_import_requires_project_id() {
        let args = ImportArgs {
            project_id: Some("  ".into()),
            service_account: Some("sa.json".into()),
            import_dir: None,
            dry_run: None,
            database_name: None,
            common: CommonArgs::default(),
        };
        let err = args.resolve(&Config::default()).unwrap_err();
        assert!(matches!(
            err,
            SamplerError::Config(ConfigError::MissingField(ref var)) if var == PROJECT_ID_VAR
        ));
    }

    #[test]
    fn test_import_dry_run_values() {
        let base = ["--project-id", "staging", "--service-account", "sa.json"];

        let settings = import_args(&base).resolve(&Config::default()).unwrap();
        assert!(!settings.dry_run);
        assert_eq!(settings.database_name, "default");
        assert_eq!(settings.import_dir, PathBuf::from("firestore_import"));

        let mut with_flag = base.to_vec();
        with_flag.push("--dry-run");
        assert!(import_args(&with_flag).resolve(&Config::default()).unwrap().dry_run);

        for (value, expected) in [("TRUE", true), ("false", false), ("yes", false)] {
            let mut args = base.to_vec();
            args.extend(["--dry-run", value]);
            assert_eq!(
                import_args(&args).resolve(&Config::default()).unwrap().dry_run,
                expected,
                "{value}"
            );
        }
    }

    #[test]
    fn test_import_database_name() {
        let args = import_args(&[
            "--project-id",
            "staging",
            "--service-account",
            "sa.json",
            "--database",
            "analytics",
        ]);
        let settings = args.resolve(&Config::default()).unwrap();
        assert_eq!(settings.database_name, "analytics");
        assert_eq!(database_id(&settings.database_name), "analytics");
    }

    #[test]
    fn test_completions_flag_parses_shell() {
        let args = export_args(&["--completions", "zsh"]);
        assert_eq!(args.common.completions, Some(Shell::Zsh));
    }

    fn write_collection(dir: &Path, name: &str, ids: &[&str]) {
        let docs: Vec<_> = ids
            .iter()
            .map(|id| json!({"id": id, "data": {"source": "export"}}))
            .collect();
        let body = json!({"collection_name": name, "sample_documents": docs});
        std::fs::write(dir.join(format!("{name}.json")), body.to_string()).unwrap();
    }

    fn existing() -> Fields {
        let mut fields = Fields::new();
        fields.insert("source".into(), FieldValue::String("target".into()));
        fields
    }

    fn session_settings(import_dir: &Path, dry_run: bool) -> ImportSettings {
        ImportSettings {
            project_id: "staging".into(),
            service_account: PathBuf::from("staging.json"),
            import_dir: import_dir.to_path_buf(),
            dry_run,
            database_name: "default".into(),
        }
    }

    /// Key file that parses but cannot sign a token.
    fn unusable_key(dir: &Path) -> PathBuf {
        let path = dir.join("staging.json");
        let key = json!({
            "project_id": "staging",
            "client_email": "importer@staging.iam.gserviceaccount.com",
            "private_key": "not a pem key"
        });
        std::fs::write(&path, key.to_string()).unwrap();
        path
    }

    fn dry_run_import_args(service_account: PathBuf, import_dir: PathBuf) -> ImportArgs {
        ImportArgs {
            project_id: Some("staging".into()),
            service_account: Some(service_account),
            import_dir: Some(import_dir),
            dry_run: Some("true".into()),
            database_name: None,
            common: CommonArgs {
                no_color: true,
                ..CommonArgs::default()
            },
        }
    }

    #[tokio::test]
    async fn test_missing_import_dir_fails_before_connecting() {
        let root = tempfile::tempdir().unwrap();
        let args = dry_run_import_args(unusable_key(root.path()), root.path().join("missing"));
        let mut prompt = ScriptedPrompt::new(&[]);

        let err = run_import(args, &mut prompt).await.unwrap_err();
        assert!(
            matches!(err, SamplerError::Config(ConfigError::DirectoryNotFound(_))),
            "{err}"
        );
        assert!(prompt.questions.is_empty());
    }

    #[tokio::test]
    async fn test_empty_import_dir_stops_before_connecting() {
        let root = tempfile::tempdir().unwrap();
        let import_dir = root.path().join("firestore_import");
        std::fs::create_dir(&import_dir).unwrap();
        std::fs::write(import_dir.join("notes.txt"), "").unwrap();

        let found = importable_collections(&import_dir, &Console::new(false))
            .await
            .unwrap();
        assert!(found.is_none());
        assert!(!ImportOutcome::NothingToImport.is_success());

        // The key cannot sign, so reaching the connect step would be an error.
        let args = dry_run_import_args(unusable_key(root.path()), import_dir);
        let mut prompt = ScriptedPrompt::new(&[]);
        assert!(run_import(args, &mut prompt).await.is_ok());
        assert!(prompt.questions.is_empty());
    }

    #[tokio::test]
    async fn test_quit_cancels_without_store_calls() {
        let dir = tempfile::tempdir().unwrap();
        write_collection(dir.path(), "users", &["u1"]);
        let store = MemoryStore::new();
        let mut prompt = ScriptedPrompt::new(&["quit"]);

        let outcome = import_session(
            &store,
            &session_settings(dir.path(), false),
            &["users".to_string()],
            Console::new(false),
            &mut prompt,
        )
        .await
        .unwrap();

        assert!(matches!(outcome, ImportOutcome::Cancelled));
        assert!(outcome.is_success());
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_declined_confirmation_cancels_live_import() {
        let dir = tempfile::tempdir().unwrap();
        write_collection(dir.path(), "users", &["u1"]);
        let store = MemoryStore::new();
        let mut prompt = ScriptedPrompt::new(&["1", "no"]);

        let outcome = import_session(
            &store,
            &session_settings(dir.path(), false),
            &["users".to_string()],
            Console::new(false),
            &mut prompt,
        )
        .await
        .unwrap();

        assert!(matches!(outcome, ImportOutcome::Cancelled));
        assert!(outcome.is_success());
        assert_eq!(prompt.questions.len(), 2);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_session_skips_confirmation_and_overwrite_question() {
        let dir = tempfile::tempdir().unwrap();
        write_collection(dir.path(), "users", &["u1", "u2"]);
        let store = MemoryStore::new().with_document("users", "u1", existing());
        let mut prompt = ScriptedPrompt::new(&["all"]);

        let outcome = import_session(
            &store,
            &session_settings(dir.path(), true),
            &["users".to_string()],
            Console::new(false),
            &mut prompt,
        )
        .await
        .unwrap();

        let ImportOutcome::Completed(report) = outcome else {
            panic!("dry run did not complete: {outcome:?}");
        };
        assert!(report.dry_run);
        assert_eq!(report.summary.total_imported, 2);
        assert_eq!(prompt.questions.len(), 1);
        assert!(!prompt.questions.iter().any(|q| q.contains("Overwrite")));
        assert!(store.calls().is_empty());
        assert_eq!(store.document("users", "u1"), Some(existing()));
    }

    #[tokio::test]
    async fn test_live_session_asks_overwrite_and_writes() {
        let root = tempfile::tempdir().unwrap();
        let import_dir = root.path().join("firestore_import");
        std::fs::create_dir(&import_dir).unwrap();
        write_collection(&import_dir, "users", &["u1", "u2"]);
        let store = MemoryStore::new().with_document("users", "u1", existing());
        let mut prompt = ScriptedPrompt::new(&["1", "yes", "no"]);

        let outcome = import_session(
            &store,
            &session_settings(&import_dir, false),
            &["users".to_string()],
            Console::new(false),
            &mut prompt,
        )
        .await
        .unwrap();

        let ImportOutcome::Completed(report) = outcome else {
            panic!("live import did not complete: {outcome:?}");
        };
        assert_eq!(prompt.questions.len(), 3);
        assert!(prompt.questions[2].contains("Overwrite"));
        assert_eq!(report.summary.total_imported, 1);
        assert_eq!(report.summary.total_skipped, 1);
        assert_eq!(store.document("users", "u1"), Some(existing()));
        assert!(store.document("users", "u2").is_some());
        assert_eq!(
            store.calls().into_iter().filter(StoreCall::is_write).count(),
            1
        );
    }
}
