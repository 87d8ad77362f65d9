//! Playbook Sequencer binary.
//!
//! Loads a playbook list, applies the selection flags and runs each selected
//! playbook through the runner program.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playbook_sequencer::{
    ExtraArgs, PlaybookList, PlaybookRunner, Selection, SequencerConfig, SequencerError,
};

#[derive(Parser)]
#[command(name = "playbook-sequencer")]
#[command(version, about = "Run a list of playbooks in order", long_about = None)]
#[command(after_help = "ENVIRONMENT:
    PLAYBOOK_RUNNER            Runner program (default: ansible-playbook)
    PLAYBOOK_LIST_MAX_BYTES    Lower list file size cap (default and maximum: 1048576)
    RUST_LOG                   Log filter, e.g. playbook_sequencer=debug")]
struct Cli {
    /// The playbook list file
    #[arg(short = 'f', long, value_name = "PATH")]
    playbook_list_file: Option<PathBuf>,

    /// Comma-separated playbooks to run instead of the list file entries
    #[arg(short = 'p', long, value_name = "LIST", default_value = "")]
    include_playbooks: String,

    /// Comma-separated playbooks to skip
    #[arg(short = 'x', long, value_name = "LIST", default_value = "")]
    exclude_playbooks: String,

    /// Playbook to start running from (inclusive)
    #[arg(long, value_name = "PLAYBOOK", default_value = "")]
    from: String,

    /// Playbook to stop before (exclusive)
    #[arg(long, value_name = "PLAYBOOK", default_value = "")]
    to: String,

    /// Runner arguments as one string, split on single spaces
    #[arg(long, value_name = "ARGS", default_value = "", allow_hyphen_values = true)]
    pargs: String,

    /// Runner program (overrides PLAYBOOK_RUNNER)
    #[arg(long, value_name = "PROGRAM")]
    runner: Option<String>,

    /// Print the commands without running them
    #[arg(long)]
    dry_run: bool,

    /// Emit only the planned commands as JSON (requires --dry-run)
    #[arg(long, requires = "dry_run")]
    json: bool,

    /// Runner arguments passed verbatim, after those from --pargs
    #[arg(last = true, value_name = "ARGS")]
    runner_args: Vec<String>,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the plan and command echo
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let Some(list_file) = cli.playbook_list_file.clone() else {
        eprintln!("{}", Cli::command().render_help());
        process::exit(1);
    };

    let config = SequencerConfig::from_env()
        .context("Failed to load configuration")?
        .with_runner(cli.runner.clone());
    tracing::debug!(
        runner = %config.runner_program,
        max_list_bytes = config.max_list_bytes,
        "Sequencer configuration loaded"
    );

    if let Err(e) = run(&cli, &list_file, &config) {
        eprintln!("error: {}", e);
        process::exit(e.exit_code());
    }

    Ok(())
}

fn run(cli: &Cli, list_file: &Path, config: &SequencerConfig) -> Result<(), SequencerError> {
    let list = PlaybookList::load(list_file, config.max_list_bytes)?;

    let selection = Selection::new()
        .with_include(cli.include_playbooks.as_str())
        .with_exclude(cli.exclude_playbooks.as_str())
        .with_from(cli.from.as_str())
        .with_to(cli.to.as_str());
    let playbooks = selection.select(list.as_slice())?;

    tracing::info!(
        loaded = list.len(),
        selected = playbooks.len(),
        "Playbook selection complete"
    );

    let extra_args =
        ExtraArgs::from_flat(&cli.pargs).with_trailing(cli.runner_args.iter().cloned());
    let mut runner = PlaybookRunner::new(config.runner_program.as_str())
        .with_extra_args(extra_args)
        .with_dry_run(cli.dry_run);

    if cli.json {
        let plan = runner.plan(&playbooks);
        let json = serde_json::to_string_pretty(&plan)
            .map_err(|e| SequencerError::Config(format!("failed to encode plan: {}", e)))?;
        println!("{}", json);
        return Ok(());
    }

    println!("Playbooks to be run: [{}]", playbooks.join(" "));
    runner.run(&playbooks)
}
