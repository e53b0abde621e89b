mod cli;
mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod stats;

use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Commands, RunArgs};
use crate::error::AnalysisError;
use crate::input::load_input;
use crate::pipeline::run_pipeline;
use crate::pipeline::stage5_report::{ReportMode, write_reports};

fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AnalysisError> {
    match cli.command {
        Commands::Run(args) => run_analysis(&args),
        Commands::Params(args) => {
            let profile = args.resolve()?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(())
        }
    }
}

fn run_analysis(args: &RunArgs) -> Result<(), AnalysisError> {
    let params = args.params.resolve()?;
    info!(
        input = %args.input.display(),
        treatment = params.treatment_token.as_deref().unwrap_or(""),
        "starting analysis"
    );

    let files = load_input(&args.input, &params)?;
    let output = run_pipeline(files, &params)?;

    let mode = if args.json_only {
        ReportMode::JsonOnly
    } else {
        ReportMode::Full
    };
    write_reports(&output, &params, &args.out, mode)?;

    if output.summary.qc.consider_optimizing_lower_cutoff {
        tracing::warn!(
            total_fragments = output.summary.qc.total_fragments,
            files = %output.summary.qc.files_to_check.join(", "),
            "many fragments excluded; consider optimizing the lower cutoff"
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
