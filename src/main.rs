//! ODF Console View Model Inspector
//!
//! Loads a snapshot of DR resources and prints the application view models
//! the console would render, optionally checking a proposed DR policy name.
//!
//! ```text
//! snapshot.yaml ─▶ ResourceSnapshot ─▶ ApplicationInfo[] ─▶ JSON / YAML
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use odf_viewmodel::i18n::Untranslated;
use odf_viewmodel::info::{ApplicationInfo, DRPolicyInfo};
use odf_viewmodel::validation::{requirement_states, NameRules, RequirementStatus};
use odf_viewmodel::{ResourceSnapshot, Schema, ValidationResolver};

/// Longest DR policy name the console accepts
const POLICY_NAME_MAX: usize = 253;

// =============================================================================
// CLI Arguments
// =============================================================================

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

/// Inspect DR view models derived from a resource snapshot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Snapshot file (YAML or JSON, List or multi-document)
    #[arg(long, env = "SNAPSHOT_PATH")]
    snapshot: PathBuf,

    /// Only show applications in this namespace
    #[arg(long, env = "APP_NAMESPACE")]
    namespace: Option<String>,

    /// Output format
    #[arg(long, value_enum, env = "OUTPUT_FORMAT", default_value = "json")]
    output: OutputFormat,

    /// Validate a proposed DR policy name against the snapshot
    #[arg(long)]
    check_name: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationReport {
    application: ApplicationInfo,
    matching_policies: Vec<DRPolicyInfo>,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args)?;

    let snapshot = ResourceSnapshot::from_path(&args.snapshot)
        .with_context(|| format!("loading snapshot {}", args.snapshot.display()))?;
    info!("Loaded snapshot {}", args.snapshot.display());

    if let Some(name) = &args.check_name {
        return check_policy_name(&snapshot, name).await;
    }

    let reports: Vec<ApplicationReport> = snapshot
        .application_infos(&Untranslated)
        .into_iter()
        .filter(|app| {
            args.namespace
                .as_deref()
                .is_none_or(|ns| app.workload_namespace == ns)
        })
        .map(|application| ApplicationReport {
            matching_policies: snapshot.matching_policies(&application),
            application,
        })
        .collect();

    if reports.is_empty() {
        warn!("No applications found in snapshot");
    }

    let rendered = match args.output {
        OutputFormat::Json => serde_json::to_string_pretty(&reports)?,
        OutputFormat::Yaml => serde_yaml::to_string(&reports)?,
    };
    println!("{}", rendered);
    Ok(())
}

async fn check_policy_name(snapshot: &ResourceSnapshot, name: &str) -> anyhow::Result<()> {
    let rules = NameRules::new(POLICY_NAME_MAX).unique_among(
        snapshot.policy_names(),
        "A unique name for the policy within the cluster",
    );
    let resolver = ValidationResolver::new(Some(
        Schema::new().field("policy-name", rules.field_schema(&Untranslated)),
    ));

    let resolution = resolver
        .resolve([("policy-name".to_string(), name.to_string())].into())
        .await?;
    let error = resolution.errors.get("policy-name");

    for (requirement, status) in requirement_states(&rules.requirements(&Untranslated), true, error)
    {
        let mark = match status {
            RequirementStatus::Success => "ok",
            RequirementStatus::Error => "FAIL",
            RequirementStatus::Indeterminate => "-",
        };
        println!("[{:>4}] {}", mark, requirement);
    }

    if let Some(error) = error {
        // Messages outside the listed requirements, e.g. a missing name
        for message in error.messages.keys() {
            if !rules.requirements(&Untranslated).contains(message) {
                println!("[FAIL] {}", message);
            }
        }
        anyhow::bail!("policy name '{}' is not valid", name);
    }
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("kube=info".parse()?);

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}
