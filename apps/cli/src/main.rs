mod commands;
mod core;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::commands::{
    catalog::CatalogCommand, diagnose::DiagnoseCommand, new::NewCommand, order::OrderCommand,
    posterior::PosteriorCommand, reset::ResetCommand, schema::SchemaCommand, show::ShowCommand,
    tests::TestsCommand,
};
use crate::core::context::AppContext;
use crate::core::error::CliError;

#[derive(Parser)]
#[command(name = "dx-trainer")]
#[command(about = "Practice diagnostic reasoning on simulated patients", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to a dx-trainer.toml config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of disease templates
    #[arg(long, global = true)]
    pub templates: Option<PathBuf>,

    /// Session the case is stored under
    #[arg(long, global = true)]
    pub session: Option<String>,

    /// Seed for reproducible cases and test results
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a new simulated patient
    New(NewCommand),
    /// Show the current patient and results so far
    Show(ShowCommand),
    /// Order a diagnostic test
    Order(OrderCommand),
    /// Submit a diagnosis
    Diagnose(DiagnoseCommand),
    /// Discard the current case
    Reset(ResetCommand),
    /// List every orderable test
    Tests(TestsCommand),
    /// List the diseases and their priors
    Catalog(CatalogCommand),
    /// Show the current probability of each disease
    Posterior(PosteriorCommand),
    /// Print the JSON Schema for disease templates
    Schema(SchemaCommand),
}

fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli) {
        CliError::from(err).render();
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Schema(cmd) = &cli.command {
        return cmd.execute();
    }

    let ctx = AppContext::resolve(&cli.global)?;
    match &cli.command {
        Commands::New(cmd) => cmd.execute(&ctx),
        Commands::Show(cmd) => cmd.execute(&ctx),
        Commands::Order(cmd) => cmd.execute(&ctx),
        Commands::Diagnose(cmd) => cmd.execute(&ctx),
        Commands::Reset(cmd) => cmd.execute(&ctx),
        Commands::Tests(cmd) => cmd.execute(&ctx),
        Commands::Catalog(cmd) => cmd.execute(&ctx),
        Commands::Posterior(cmd) => cmd.execute(&ctx),
        Commands::Schema(cmd) => cmd.execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dx-trainer", "order", "WBC_Count", "--session", "ward", "--seed", "9",
        ])
        .unwrap();
        assert_eq!(cli.global.session.as_deref(), Some("ward"));
        assert_eq!(cli.global.seed, Some(9));
        assert!(matches!(cli.command, Commands::Order(_)));
    }
}
