//! chainview - Entry Point

use chainview::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    CliOverrides,
};
use chainview::model::{AppError, ViewTab};
use chainview::state::QueryResetPolicy;
use chainview::store::{load_dataset, RecordStore};
use chainview::view_state::LayoutKind;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

/// Subtitle shown in the header when no dataset file is given.
const BUILTIN_SUBTITLE: &str = "Demo prototype · static data";

/// chainview - browse supply-chain traceability records in the terminal
#[derive(Parser, Debug)]
#[command(name = "chainview")]
#[command(version)]
#[command(about = "TUI viewer for supply-chain traceability flow records")]
pub struct Args {
    /// JSON dataset to load (the built-in demo chain if not provided)
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Initial search query
    #[arg(short, long)]
    pub query: Option<String>,

    /// View shown first on the results screen (flow, graph, list)
    #[arg(long)]
    pub tab: Option<ViewTab>,

    /// Skip the search screen and open results immediately
    #[arg(long)]
    pub results: bool,

    /// Graph node placement (static, chain)
    #[arg(long)]
    pub layout: Option<LayoutKind>,

    /// Query handling when going back to search (keep, clear-on-back, replace-on-type)
    #[arg(long)]
    pub query_policy: Option<QueryResetPolicy>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let origin = args
            .config
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "config file".to_string());
        let config_file = load_config_with_precedence(args.config.clone())?;
        let merged = merge_config(config_file, &origin)?;
        let with_env = apply_env_overrides(merged)?;

        apply_cli_overrides(
            with_env,
            CliOverrides {
                dataset: args.dataset.clone(),
                tab: args.tab,
                layout: args.layout,
                query_policy: args.query_policy,
                no_color: args.no_color,
            },
        )
    };

    // Initialize tracing with configured log file path
    chainview::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let (store, subtitle) = load_store(config.dataset.as_deref())?;

    let cli_args = chainview::view::CliArgs {
        query: args.query,
        start_on_results: args.results,
        tab: config.default_tab,
        layout: config.layout,
        query_policy: config.query_policy,
        no_color: config.no_color,
        subtitle,
    };

    chainview::view::run_with_store(store, cli_args)?;

    Ok(())
}

/// Load the configured dataset, or the built-in chain when none is set.
///
/// Returns the store with the header subtitle describing where it came from.
fn load_store(dataset: Option<&Path>) -> Result<(RecordStore, String), AppError> {
    match dataset {
        Some(path) => Ok((load_dataset(path)?, path.display().to_string())),
        None => Ok((RecordStore::builtin(), BUILTIN_SUBTITLE.to_string())),
    }
}
