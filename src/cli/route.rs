//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::{BatchArgs, Commands, GenerateArgs, OutputFormat};
use crate::cli::presentation::{
    format_batch_json, format_batch_summary, format_generate_json, format_generate_text,
    format_progress_line,
};
use crate::config::{ConfigLoader, OutreachConfig};
use crate::error::OutreachError;
use crate::generation::GenerationService;
use crate::input;
use crate::output;
use crate::prompt::{Intent, OutreachRequest, SenderPerspective};
use std::path::PathBuf;
use std::time::Instant;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::info;

/// Runtime context for CLI execution: workspace and the loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: OutreachConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, OutreachError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: OutreachConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &OutreachConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, OutreachError> {
        let started = Instant::now();
        let result = match command {
            Commands::Generate(args) => self.handle_generate(args),
            Commands::Batch(args) => self.handle_batch(args),
        };
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis(),
            "Command finished"
        );
        result
    }

    fn handle_generate(&self, args: &GenerateArgs) -> Result<String, OutreachError> {
        if args.variants == 0 {
            return Err(OutreachError::ConfigError(
                "--variants must be at least 1".to_string(),
            ));
        }
        let request = resolve_generate_request(args)?;
        let config = validated(self.config.clone())?;
        let service = GenerationService::from_config(&config)?;

        let results = runtime()?.block_on(async {
            if args.variants == 1 {
                Ok(vec![service.generate_one(&request).await])
            } else {
                service.generate_variants(&request, args.variants).await
            }
        })?;

        match args.format {
            OutputFormat::Json => format_generate_json(&request, &results),
            OutputFormat::Text => Ok(format_generate_text(&request, &results)),
        }
    }

    fn handle_batch(&self, args: &BatchArgs) -> Result<String, OutreachError> {
        let config = validated(apply_batch_overrides(self.config.clone(), args))?;

        let input_path = self.resolve_path(&args.input);
        let output_path = self.resolve_path(&args.output);
        let mut table = input::load_table(&input_path)?;
        if let Some(ref perspective) = args.perspective {
            let perspective = SenderPerspective::parse(perspective);
            for record in &mut table.records {
                record.sender_perspective = perspective;
            }
        }
        info!(
            input = %input_path.display(),
            records = table.len(),
            chunk_size = config.batch.chunk_size,
            pool_width = config.batch.pool_width,
            "Batch command starting"
        );

        let service = GenerationService::from_config(&config)?;
        let report = runtime()?.block_on(async {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let printer = tokio::spawn(async move {
                while let Some(progress) = rx.recv().await {
                    eprintln!("{}", format_progress_line(&progress));
                }
            });
            let report = service.generate_batch(&table.records, Some(tx)).await;
            // The sender is gone once the batch returns, which ends the printer loop.
            let _ = printer.await;
            report
        })?;

        output::write_results(&output_path, &table, &report.results)?;

        match args.format {
            OutputFormat::Json => format_batch_json(&report, &output_path),
            OutputFormat::Text => Ok(format_batch_summary(
                &table.records,
                &report,
                &output_path,
                args.preview,
            )),
        }
    }

    fn resolve_path(&self, path: &std::path::Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }
}

pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Generate(_) => "generate",
        Commands::Batch(_) => "batch",
    }
}

fn runtime() -> Result<Runtime, OutreachError> {
    Ok(Runtime::new()?)
}

fn validated(config: OutreachConfig) -> Result<OutreachConfig, OutreachError> {
    config.validate().map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        OutreachError::ConfigError(format!(
            "Configuration validation failed:\n{}",
            error_msgs.join("\n")
        ))
    })?;
    Ok(config)
}

/// Flags win over every configuration layer.
pub(crate) fn apply_batch_overrides(mut config: OutreachConfig, args: &BatchArgs) -> OutreachConfig {
    if let Some(chunk_size) = args.chunk_size {
        config.batch.chunk_size = chunk_size;
    }
    if let Some(pool_width) = args.pool_width {
        config.batch.pool_width = pool_width;
    }
    if let Some(max_attempts) = args.max_attempts {
        config.retry.max_attempts = max_attempts;
    }
    config
}

/// Build the request from flags, asking for whatever is missing unless `--no-input` is set.
fn resolve_generate_request(args: &GenerateArgs) -> Result<OutreachRequest, OutreachError> {
    let missing: Vec<&str> = [
        ("name", &args.name),
        ("role", &args.role),
        ("company", &args.company),
        ("intent", &args.intent),
    ]
    .iter()
    .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
    .map(|(flag, _)| *flag)
    .collect();

    if args.no_input && !missing.is_empty() {
        return Err(OutreachError::ConfigError(format!(
            "Missing required flags: {}",
            missing
                .iter()
                .map(|flag| format!("--{}", flag))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    let name = value_or_prompt(&args.name, "Recipient name")?;
    let role = value_or_prompt(&args.role, "Job role")?;
    let company = value_or_prompt(&args.company, "Company")?;
    let intent = match args.intent.as_deref().filter(|v| !v.trim().is_empty()) {
        Some(intent) => Intent::parse(intent),
        None => select_intent()?,
    };
    let post = match (&args.post, args.no_input) {
        (Some(post), _) => post.clone(),
        (None, true) => String::new(),
        (None, false) => dialoguer::Input::<String>::new()
            .with_prompt("Post or profile text (optional, press Enter to skip)")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?,
    };
    let perspective = args
        .perspective
        .as_deref()
        .map(SenderPerspective::parse)
        .unwrap_or_default();

    Ok(OutreachRequest::new(name, role, company, intent)
        .with_post(post)
        .with_perspective(perspective))
}

fn value_or_prompt(value: &Option<String>, prompt: &str) -> Result<String, OutreachError> {
    match value.as_deref().filter(|v| !v.trim().is_empty()) {
        Some(v) => Ok(v.to_string()),
        None => dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(prompt_error),
    }
}

fn select_intent() -> Result<Intent, OutreachError> {
    let labels: Vec<&str> = Intent::ALL.iter().map(|intent| intent.as_str()).collect();
    let selection = dialoguer::Select::new()
        .with_prompt("Intent")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    Ok(Intent::ALL[selection])
}

fn prompt_error(e: dialoguer::Error) -> OutreachError {
    OutreachError::ConfigError(format!("Failed to get user input: {}", e))
}
