//! CLI command implementations.
//!
//! Contains the business logic for each CLI command. Commands that reach
//! the model run on a single-threaded tokio runtime created per call.

use crate::agent::{
    Agent, AgentOutput, DietPlanner, MotivationCoach, PromptSet, ReportAnalyst, TabletDescriber,
    run_agent,
};
use crate::backend::{OpenAiBackend, TextBackend, UnavailableBackend};
use crate::cli::output::{
    OutputFormat, format_agent_output, format_buffer, format_buffer_list, format_context,
    format_faqs, format_history, format_no_content, format_status,
};
use crate::cli::parser::{Cli, Commands, ThresholdArgs};
use crate::core::buffer::current_timestamp;
use crate::core::{FeatureArea, Identity, Payload};
use crate::error::{CommandError, Error, Result, StorageError};
use crate::io::read_file;
use crate::pipeline::{
    ContextSelector, FaqGenerator, ResponseCoercer, SelectionConfig, StrictJson, coalesce,
};
use crate::storage::{FaqRecord, FaqSource, SqliteStorage, Storage};
use std::future::Future;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Executes the CLI command.
///
/// Commands that need a text-generation backend build one from the global
/// options.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    run(cli, None)
}

/// Executes the CLI command against the given backend.
///
/// Must not be called from inside an async runtime.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute_with_backend(cli: &Cli, backend: &dyn TextBackend) -> Result<String> {
    run(cli, Some(backend))
}

fn run(cli: &Cli, backend: Option<&dyn TextBackend>) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let db_path = cli.get_db_path();

    match &cli.command {
        Commands::Init { force } => cmd_init(&db_path, *force),
        Commands::Status => cmd_status(&db_path, format),
        Commands::Reset { yes } => cmd_reset(&db_path, *yes),
        Commands::Login { name, email } => cmd_login(&db_path, name, email, format),
        Commands::Logout => cmd_logout(&db_path),
        Commands::Record {
            name,
            content,
            area,
        } => cmd_record(&db_path, name, content.as_deref(), *area, format),
        Commands::ListBuffers => cmd_list_buffers(&db_path, format),
        Commands::ShowBuffer { name } => cmd_show_buffer(&db_path, name, format),
        Commands::Context { area, thresholds } => {
            cmd_context(&db_path, *area, *thresholds, format)
        }
        Commands::Faq {
            area,
            content,
            file,
            json,
            strict_only,
            thresholds,
        } => {
            let source = FaqInput {
                content: content.as_deref(),
                file: file.as_deref(),
                json: json.as_deref(),
            };
            cmd_faq(cli, backend, *area, &source, *strict_only, *thresholds, format)
        }
        Commands::AnalyzeReport { file } => {
            let agent = ReportAnalyst::from_file(file)?;
            cmd_agent(cli, backend, &agent, format)
        }
        Commands::DescribeTablet { text } => {
            let text = text_or_stdin(text.as_deref())?;
            let agent = TabletDescriber::new(&text)?;
            cmd_agent(cli, backend, &agent, format)
        }
        Commands::Diet {
            symptoms,
            conditions,
        } => {
            let identity = open_storage(&db_path)?.load_identity()?;
            let agent = DietPlanner::new(identity.name.as_deref(), symptoms, conditions)?;
            cmd_agent(cli, backend, &agent, format)
        }
        Commands::Quote { topic } => {
            let agent = MotivationCoach::for_topic(topic.as_deref());
            cmd_agent(cli, backend, &agent, format)
        }
        Commands::History { limit } => cmd_history(&db_path, *limit, format),
        Commands::Prompts { dir } => cmd_prompts(cli, dir.as_deref(), format),
    }
}

/// Opens storage and ensures it's initialized.
fn open_storage(db_path: &Path) -> Result<SqliteStorage> {
    let storage = SqliteStorage::open(db_path)?;

    if !storage.is_initialized()? {
        return Err(StorageError::NotInitialized.into());
    }

    Ok(storage)
}

/// Runs a future to completion on a fresh single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CommandError::ExecutionFailed(format!("Failed to start runtime: {e}")))?;
    Ok(runtime.block_on(future))
}

fn text_or_stdin(text: Option<&str>) -> Result<String> {
    if let Some(t) = text {
        return Ok(t.to_string());
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| CommandError::ExecutionFailed(format!("Failed to read from stdin: {e}")))?;
    Ok(buffer)
}

fn selection_config(thresholds: ThresholdArgs) -> SelectionConfig {
    let defaults = SelectionConfig::default();
    SelectionConfig {
        area_min_chars: thresholds.area_min.unwrap_or(defaults.area_min_chars),
        fallback_min_chars: thresholds
            .fallback_min
            .unwrap_or(defaults.fallback_min_chars),
        result_min_chars: defaults.result_min_chars,
    }
}

// ==================== Command Implementations ====================

fn cmd_init(db_path: &Path, force: bool) -> Result<String> {
    if db_path.exists() && !force {
        return Err(CommandError::ExecutionFailed(
            "Database already exists. Use --force to reinitialize.".to_string(),
        )
        .into());
    }

    if force && db_path.exists() {
        std::fs::remove_file(db_path).map_err(|e| {
            CommandError::ExecutionFailed(format!("Failed to remove existing database: {e}"))
        })?;
    }

    let mut storage = SqliteStorage::open(db_path)?;
    storage.init()?;
    storage.save_identity(&Identity::default())?;

    Ok(format!(
        "Initialized session database at: {}\n",
        db_path.display()
    ))
}

fn cmd_status(db_path: &Path, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let stats = storage.stats()?;
    let identity = storage.load_identity()?;
    Ok(format_status(&stats, &identity, format))
}

fn cmd_reset(db_path: &Path, yes: bool) -> Result<String> {
    if !yes {
        return Err(CommandError::ExecutionFailed(
            "Use --yes to confirm reset. This will delete all data.".to_string(),
        )
        .into());
    }

    let mut storage = open_storage(db_path)?;
    storage.reset()?;
    storage.save_identity(&Identity::default())?;

    Ok("Session reset successfully.\n".to_string())
}

fn cmd_login(db_path: &Path, name: &str, email: &str, format: OutputFormat) -> Result<String> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() {
        return Err(CommandError::MissingArgument("name".to_string()).into());
    }
    if !email.contains('@') {
        return Err(CommandError::InvalidArgument(format!("not an email address: {email}")).into());
    }

    let mut storage = open_storage(db_path)?;
    let identity = Identity {
        logged_in: true,
        name: Some(name.to_string()),
        email: Some(email.to_string()),
    };
    storage.save_identity(&identity)?;

    match format {
        OutputFormat::Text => Ok(format!("Logged in as {name} <{email}>\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&identity).unwrap_or_default()),
    }
}

fn cmd_logout(db_path: &Path) -> Result<String> {
    let mut storage = open_storage(db_path)?;
    storage.logout()?;
    Ok("Logged out. Session buffers cleared.\n".to_string())
}

fn cmd_record(
    db_path: &Path,
    name: &str,
    content: Option<&str>,
    area: Option<FeatureArea>,
    format: OutputFormat,
) -> Result<String> {
    let mut storage = open_storage(db_path)?;
    let content = text_or_stdin(content)?;
    let id = storage.put_buffer(name, area, &content)?;

    match format {
        OutputFormat::Text => Ok(format!(
            "Recorded buffer '{name}' (ID: {id}, {} bytes)\n",
            content.len()
        )),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "buffer_id": id,
                "name": name,
                "area": area,
                "size": content.len(),
            });
            Ok(serde_json::to_string_pretty(&result).unwrap_or_default())
        }
    }
}

fn cmd_list_buffers(db_path: &Path, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let buffers = storage.list_buffers()?;
    Ok(format_buffer_list(&buffers, format))
}

fn cmd_show_buffer(db_path: &Path, name: &str, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let buffer = storage
        .get_buffer(name)?
        .ok_or_else(|| StorageError::BufferNotFound {
            identifier: name.to_string(),
        })?;
    Ok(format_buffer(&buffer, format))
}

fn cmd_context(
    db_path: &Path,
    area: FeatureArea,
    thresholds: ThresholdArgs,
    format: OutputFormat,
) -> Result<String> {
    let storage = open_storage(db_path)?;
    let session = storage.load_session()?;
    let context = ContextSelector::with_config(&session, selection_config(thresholds)).select(area);
    Ok(format_context(area, &context, format))
}

/// Explicit content sources for `faq`; at most one is set.
struct FaqInput<'a> {
    content: Option<&'a str>,
    file: Option<&'a Path>,
    json: Option<&'a Path>,
}

impl FaqInput<'_> {
    /// Coalesces whichever source is set into trimmed text.
    fn text(&self) -> Result<String> {
        let payload = if let Some(content) = self.content {
            Payload::from(content)
        } else if let Some(path) = self.file {
            Payload::from(read_file(path)?)
        } else if let Some(path) = self.json {
            let raw = read_file(path)?;
            let value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
                CommandError::InvalidArgument(format!("invalid JSON in {}: {e}", path.display()))
            })?;
            Payload::from(value)
        } else {
            Payload::Null
        };
        Ok(coalesce(&payload).trim().to_string())
    }
}

fn cmd_faq(
    cli: &Cli,
    backend: Option<&dyn TextBackend>,
    area: Option<FeatureArea>,
    input: &FaqInput<'_>,
    strict_only: bool,
    thresholds: ThresholdArgs,
    format: OutputFormat,
) -> Result<String> {
    let mut storage = open_storage(&cli.get_db_path())?;

    let explicit = input.text()?;
    let (content, source, area) = if explicit.is_empty() {
        let area = area.unwrap_or(FeatureArea::Assistant);
        let session = storage.load_session()?;
        let selected =
            ContextSelector::with_config(&session, selection_config(thresholds)).select(area);
        (selected, FaqSource::Selected, Some(area))
    } else {
        (explicit, FaqSource::Explicit, area)
    };

    if content.is_empty() {
        debug!("no FAQ content, skipping");
        return Ok(format_no_content(format));
    }

    let fallback;
    let backend: &dyn TextBackend = if let Some(b) = backend {
        b
    } else {
        fallback = faq_backend(cli);
        &*fallback
    };

    let prompts = PromptSet::load(cli.prompt_dir.as_deref());
    let mut generator = FaqGenerator::new(backend).with_template(prompts.faq);
    if strict_only {
        let coercer = ResponseCoercer::with_strategies(vec![Box::new(StrictJson)]);
        debug!(strategies = ?coercer.strategy_names(), "restricted parse chain");
        generator = generator.with_coercer(coercer);
    }
    let result = block_on(generator.generate(&content))?;

    storage.record_faqs(&FaqRecord {
        id: None,
        area,
        source,
        outcome: result.outcome.label().to_string(),
        detail: result.outcome.detail(),
        pairs: result.pairs.clone(),
        created_at: current_timestamp(),
    })?;

    Ok(format_faqs(&result, source, format))
}

/// Builds the FAQ backend. A configuration error becomes an
/// [`UnavailableBackend`] so the run still ends with a displayable answer.
fn faq_backend(cli: &Cli) -> Box<dyn TextBackend> {
    match OpenAiBackend::new(&cli.backend_config()) {
        Ok(backend) => Box::new(backend),
        Err(err) => {
            debug!(error = %err, "FAQ backend unavailable");
            Box::new(UnavailableBackend::new(err.to_string()))
        }
    }
}

fn cmd_agent(
    cli: &Cli,
    backend: Option<&dyn TextBackend>,
    agent: &dyn Agent,
    format: OutputFormat,
) -> Result<String> {
    let mut storage = open_storage(&cli.get_db_path())?;

    let owned;
    let backend: &dyn TextBackend = if let Some(b) = backend {
        b
    } else {
        owned = OpenAiBackend::new(&cli.backend_config()).map_err(Error::from)?;
        &owned
    };

    let prompts = PromptSet::load(cli.prompt_dir.as_deref());
    let output: AgentOutput = block_on(run_agent(agent, backend, &prompts))??;

    for write in &output.writes {
        storage.put_buffer(&write.name, write.area, &write.text)?;
    }

    Ok(format_agent_output(&output, format))
}

fn cmd_history(db_path: &Path, limit: usize, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let records = storage.list_history(limit)?;
    Ok(format_history(&records, format))
}

fn cmd_prompts(cli: &Cli, dir: Option<&Path>, format: OutputFormat) -> Result<String> {
    let target = dir
        .map(Path::to_path_buf)
        .or_else(|| cli.prompt_dir.clone())
        .or_else(PromptSet::default_dir)
        .ok_or_else(|| Error::Config {
            message: "cannot determine prompt directory; pass --dir".to_string(),
        })?;

    let written = PromptSet::write_defaults(&target)?;

    match format {
        OutputFormat::Text => {
            if written.is_empty() {
                return Ok(format!(
                    "All prompt templates already exist in {}\n",
                    target.display()
                ));
            }
            let mut output = String::new();
            for path in &written {
                output.push_str(&format!("Wrote {}\n", path.display()));
            }
            Ok(output)
        }
        OutputFormat::Json => {
            let paths: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
            let result = serde_json::json!({
                "dir": target.display().to_string(),
                "written": paths,
            });
            Ok(serde_json::to_string_pretty(&result).unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::ScriptedBackend;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(db: &Path, args: &[&str]) -> Cli {
        let db = db.to_string_lossy().to_string();
        let mut argv = vec!["healthfaq", "--db-path", db.as_str(), "--api-key", ""];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_selection_config_overrides() {
        let config = selection_config(ThresholdArgs {
            area_min: Some(10),
            fallback_min: None,
        });
        assert_eq!(config.area_min_chars, 10);
        assert_eq!(config.fallback_min_chars, 120);
    }

    #[test]
    fn test_uninitialized_storage_rejected() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("s.db");
        let err = execute(&cli(&db, &["status"])).unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::NotInitialized)));
    }

    #[test]
    fn test_faq_without_key_uses_service_failure() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("s.db");
        execute(&cli(&db, &["init"])).unwrap();

        let out = execute(&cli(&db, &["faq", "--content", "Blood sugar is high."])).unwrap();
        assert!(out.contains("Q1: Why can't I see my FAQs?"));
    }

    #[test]
    fn test_agent_writes_own_buffers_only() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("s.db");
        execute(&cli(&db, &["init"])).unwrap();

        let backend = ScriptedBackend::replying("Ibuprofen relieves pain and swelling.");
        execute_with_backend(&cli(&db, &["describe-tablet", "Ibuprofen 200"]), &backend).unwrap();

        let shown = execute(&cli(&db, &["show", "tablet_output"])).unwrap();
        assert!(shown.contains("pain and swelling"));
        let err = execute(&cli(&db, &["show", "latest_output"])).unwrap_err();
        assert!(matches!(
            err,
            Error::Storage(StorageError::BufferNotFound { .. })
        ));
    }

    #[test]
    fn test_quote_leaves_session_untouched() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("s.db");
        execute(&cli(&db, &["init"])).unwrap();

        let quote = "Stay hydrated, every sip counts. ".repeat(5);
        let backend = ScriptedBackend::replying(&quote);
        let out =
            execute_with_backend(&cli(&db, &["quote", "--topic", "water"]), &backend).unwrap();
        assert_eq!(out, format!("{}\n", quote.trim()));

        assert_eq!(execute(&cli(&db, &["list"])).unwrap(), "No buffers found.\n");
        let context = execute(&cli(&db, &["context", "--area", "report"])).unwrap();
        assert_eq!(context, "No content available.\n");
    }
}
