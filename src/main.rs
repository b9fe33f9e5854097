use clap::Parser;
use helm_updater::{
    RunOutcome, SystemCommandRunner,
    cli::{Cli, Commands},
    config::{self, types::RunConfig},
    handle_check, handle_digests, handle_run,
};
use log::{error, info};
use std::process;

fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    if let Err(e) = run(cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> helm_updater::Result<()> {
    let file_config =
        config::load_file_config(cli.config.as_deref(), &cli.settings.working_directory)?;
    let config: RunConfig = config::build_run_config(&cli.settings, file_config);
    let runner = SystemCommandRunner;

    let outcome = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => handle_run(&config, &runner)?,
        Commands::Digests => handle_digests(&config, &runner)?,
        Commands::Check { format } => {
            handle_check(&config, &runner, format)?;
            return Ok(());
        }
    };

    report(&outcome);
    Ok(())
}

fn report(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::UpToDate => info!("All charts are up to date"),
        RunOutcome::NotWritten(updates) => {
            info!("{} chart update(s) found, nothing written", updates.len())
        }
        RunOutcome::ChartsUpdated { updates, publish } => {
            info!("{} chart update(s) processed: {:?}", updates.len(), publish)
        }
        RunOutcome::DigestsUpdated { images, publish } => {
            info!("{} image digest(s) generated: {:?}", images, publish)
        }
    }
}
