mod report;

use clap::Parser;
use pkg_constants::paths::DEFAULT_CHECK_CONFIG;
use pkg_types::config::{CheckConfigFile, OutputFormat, load_config_file};
use pkg_validation::ValidatingAdmission;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fedquota-check",
    about = "Validate FederatedResourceQuota manifests before admission"
)]
struct Cli {
    /// Path to YAML config file
    #[arg(long, short, default_value = DEFAULT_CHECK_CONFIG)]
    config: String,

    /// Report format: text or json
    #[arg(long, short)]
    output: Option<OutputFormat>,

    /// Log filter directive, e.g. `pkg_validation=debug`
    #[arg(long)]
    log_filter: Option<String>,

    /// Manifest files (YAML, or JSON with a .json extension)
    #[arg(required = true)]
    manifests: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config file (returns defaults if file not found)
    let file_cfg: CheckConfigFile = load_config_file(&cli.config)?;

    // Merge: CLI args > config file > defaults
    let filter = match cli.log_filter.or(file_cfg.log_filter) {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let output = cli.output.or(file_cfg.output).unwrap_or_default();

    info!("Config file: {}", cli.config);
    info!("Checking {} manifest(s)", cli.manifests.len());

    let admission = ValidatingAdmission::new();
    let reports = cli
        .manifests
        .iter()
        .map(|path| report::check_manifest(&admission, path))
        .collect::<anyhow::Result<Vec<_>>>()?;

    match output {
        OutputFormat::Text => print!("{}", report::render_text(&reports)),
        OutputFormat::Json => println!("{}", report::render_json(&reports)?),
    }

    if reports.iter().any(|r| !r.decision.is_allowed()) {
        std::process::exit(1);
    }
    Ok(())
}
