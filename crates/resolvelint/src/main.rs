// # resolvelint - nginx Resolver Linter
//
// This binary is a THIN integration layer only:
// - Reads configuration from environment variables
// - Initializes logging and the runtime
// - Registers rules and builds the lint engine
// - Lints the given files and prints the reports
//
// All parsing and rule logic lives in the library crates.
//
// ## Usage
//
// ```bash
// resolvelint /etc/nginx/nginx.conf /etc/nginx/conf.d/*.conf
// ```
//
// ## Configuration
//
// - `RESOLVELINT_CONFIG`: JSON lint configuration file (optional)
// - `RESOLVELINT_RULES`: Comma-separated rule names (default: missing_resolver)
// - `RESOLVELINT_DIRECTIVES`: Comma-separated directives to audit (default: rule defaults)
// - `RESOLVELINT_MIN_SEVERITY`: Lowest reported severity (medium, high)
// - `RESOLVELINT_FORMAT`: Output format (text, json)
// - `RESOLVELINT_LOG_LEVEL`: Log level (default: warn)
//
// `RESOLVELINT_RULES` and `RESOLVELINT_DIRECTIVES` are ignored when a
// configuration file is given; severity and format override the file.
//
// ## Exit Codes
//
// - 0: No findings
// - 1: Configuration error
// - 2: A file could not be read or parsed
// - 3: Findings reported

use anyhow::{Context, Result};
use resolvelint_core::report::{FileReport, render_json, render_text};
use resolvelint_core::{
    Finding, LintConfig, LintEngine, MemoryReporter, OutputFormat, RuleConfig, RuleRegistry,
    Severity,
};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Rules this binary knows how to configure from the environment
const SUPPORTED_RULES: &[&str] = &["missing_resolver"];

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LintExitCode {
    /// Every file is clean
    Clean = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// A file could not be linted
    RuntimeError = 2,
    /// At least one finding was reported
    FindingsReported = 3,
}

impl From<LintExitCode> for ExitCode {
    fn from(code: LintExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
#[derive(Debug)]
struct Config {
    files: Vec<PathBuf>,
    config_path: Option<PathBuf>,
    rules: Vec<String>,
    directives: Vec<String>,
    min_severity: Option<String>,
    format: Option<String>,
    log_level: String,
}

impl Config {
    /// Load configuration from command line arguments and environment variables
    fn from_env() -> Self {
        Self::from_lookup(env::args().skip(1), |key| env::var(key).ok())
    }

    fn from_lookup(
        args: impl IntoIterator<Item = String>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Self {
        Self {
            files: args.into_iter().map(PathBuf::from).collect(),
            config_path: var("RESOLVELINT_CONFIG").map(PathBuf::from),
            rules: var("RESOLVELINT_RULES")
                .map(|s| split_list(&s))
                .unwrap_or_else(|| vec!["missing_resolver".to_string()]),
            directives: var("RESOLVELINT_DIRECTIVES")
                .map(|s| split_list(&s))
                .unwrap_or_default(),
            min_severity: var("RESOLVELINT_MIN_SEVERITY"),
            format: var("RESOLVELINT_FORMAT"),
            log_level: var("RESOLVELINT_LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            anyhow::bail!("No configuration files given. Usage: resolvelint <nginx.conf>...");
        }

        if self.config_path.is_none() {
            if self.rules.is_empty() {
                anyhow::bail!(
                    "RESOLVELINT_RULES must name at least one rule. \
                    Supported rules: {}",
                    SUPPORTED_RULES.join(", ")
                );
            }
            for rule in &self.rules {
                if !SUPPORTED_RULES.contains(&rule.as_str()) {
                    anyhow::bail!(
                        "RESOLVELINT_RULES entry '{}' is not supported. Supported rules: {}",
                        rule,
                        SUPPORTED_RULES.join(", ")
                    );
                }
            }
        }

        if let Some(ref severity) = self.min_severity {
            severity.parse::<Severity>()?;
        }

        if let Some(ref format) = self.format {
            format.parse::<OutputFormat>()?;
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "RESOLVELINT_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Build the lint configuration, from file or from the environment
    fn lint_config(&self) -> Result<LintConfig> {
        let mut lint_config = match self.config_path {
            Some(ref path) => LintConfig::load(path)
                .with_context(|| format!("Cannot load {}", path.display()))?,
            None => LintConfig::new(
                self.rules
                    .iter()
                    .map(|_| RuleConfig::MissingResolver {
                        directives: self.directives.clone(),
                    })
                    .collect(),
            ),
        };

        if let Some(ref severity) = self.min_severity {
            lint_config.report.min_severity = severity.parse()?;
        }
        if let Some(ref format) = self.format {
            lint_config.report.format = format.parse()?;
        }

        lint_config.validate()?;
        Ok(lint_config)
    }

    fn log_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Register every rule compiled into this binary
fn register_rules(registry: &RuleRegistry) {
    #[cfg(feature = "missing-resolver")]
    resolvelint_rule_resolver::register(registry);

    debug!("Available rules: {:?}", registry.list_rules());
}

fn main() -> ExitCode {
    let config = Config::from_env();

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return LintExitCode::ConfigError.into();
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return LintExitCode::ConfigError.into();
    }

    let lint_config = match config.lint_config() {
        Ok(lint_config) => lint_config,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            return LintExitCode::ConfigError.into();
        }
    };

    let registry = RuleRegistry::new();
    register_rules(&registry);

    let engine = match LintEngine::from_config(&registry, &lint_config) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            error!("Cannot create rules: {}", e);
            return LintExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return LintExitCode::RuntimeError.into();
        }
    };

    let outcome = rt.block_on(lint_files(engine, &config.files, lint_config.report.min_severity));

    let output = match lint_config.report.format {
        OutputFormat::Text => Ok(outcome.reports.iter().map(render_text).collect()),
        OutputFormat::Json => render_json(&outcome.reports),
    };
    match output {
        Ok(output) => print!("{}", output),
        Err(e) => {
            error!("Cannot render report: {}", e);
            return LintExitCode::RuntimeError.into();
        }
    }

    outcome.exit_code().into()
}

/// Reports of all files that could be linted
struct LintOutcome {
    reports: Vec<FileReport>,
    failures: usize,
}

impl LintOutcome {
    fn exit_code(&self) -> LintExitCode {
        if self.failures > 0 {
            LintExitCode::RuntimeError
        } else if self.reports.iter().any(|report| !report.findings.is_empty()) {
            LintExitCode::FindingsReported
        } else {
            LintExitCode::Clean
        }
    }
}

/// Lint files concurrently, keeping reports in argument order
async fn lint_files(engine: Arc<LintEngine>, files: &[PathBuf], min_severity: Severity) -> LintOutcome {
    info!(
        "Linting {} file(s) with rule(s): {}",
        files.len(),
        engine.rule_names().join(", ")
    );

    let tasks: Vec<_> = files
        .iter()
        .map(|path| tokio::spawn(lint_file(Arc::clone(&engine), path.clone())))
        .collect();

    let mut outcome = LintOutcome {
        reports: Vec::new(),
        failures: 0,
    };

    for (path, task) in files.iter().zip(tasks) {
        let result = match task.await {
            Ok(result) => result,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(findings) => outcome.reports.push(FileReport::new(
                path.display().to_string(),
                findings,
                min_severity,
            )),
            Err(e) => {
                error!("{}: {:#}", path.display(), e);
                outcome.failures += 1;
            }
        }
    }

    outcome
}

/// Read, parse and lint one file
async fn lint_file(engine: Arc<LintEngine>, path: PathBuf) -> Result<Vec<Finding>> {
    let text = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;

    let findings = tokio::task::spawn_blocking(move || -> resolvelint_core::Result<Vec<Finding>> {
        let tree = resolvelint_conf::parse_str(&text)?;
        let mut reporter = MemoryReporter::new();
        let summary = engine.lint(&tree, &mut reporter);
        debug!(
            "{} directive(s), {} audit(s), {} failed, {} finding(s)",
            summary.directives_visited, summary.audits_run, summary.audits_failed, summary.findings
        );
        Ok(reporter.into_findings())
    })
    .await??;

    Ok(findings)
}
