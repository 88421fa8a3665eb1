//! Command line entry point: parse [`BaseArgs`], load parameters, run, write the report.
use std::path::PathBuf;

use clap::{ArgAction, Args, Command, FromArgMatches as _};
use log::{info, LevelFilter};

use crate::error::EpisimError;
use crate::execution_stats::{report_execution_statistics, ExecutionStatsCollector};
use crate::log::{parse_log_levels, set_log_level};
use crate::parameters::Parameters;
use crate::random::seeded_rng;
use crate::report::Report;
use crate::simulation::Simulation;

/// File name of the report written to `--output-dir`.
pub const REPORT_FILE_NAME: &str = "report.csv";

/// Default cli arguments for the episim runner
#[derive(Args, Debug, Default)]
pub struct BaseArgs {
    /// Random seed
    #[arg(short, long, default_value = "0")]
    pub random_seed: u64,

    /// Optional path to a JSON parameters file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Optional directory for report output
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Enable logging at LEVEL, or per module with `module=LEVEL,...`
    #[arg(long)]
    pub log_level: Option<String>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, action = ArgAction::Count)]
    pub verbose: u8,

    /// Do not report execution statistics
    #[arg(long)]
    pub no_stats: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

fn create_episim_cli() -> Command {
    let cli = Command::new("episim").about("Stochastic agent-based epidemic simulator");
    BaseArgs::augment_args(cli)
}

/// Parses the process arguments and runs a simulation.
///
/// # Errors
/// Returns an error if argument parsing, parameter loading or report output fails
pub fn run_with_args() -> Result<Report, Box<dyn std::error::Error>> {
    let matches = create_episim_cli().get_matches();
    let args = BaseArgs::from_arg_matches(&matches)?;
    Ok(run_with_base_args(&args)?)
}

fn verbosity_level(verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

fn configure_logging(args: &BaseArgs) -> Result<(), EpisimError> {
    if let Some(level) = verbosity_level(args.verbose) {
        set_log_level(level);
        println!("Logging enabled at level {level}");
    }
    // `--log-level` wins over `-v` when both set the global level.
    if let Some(log_level) = &args.log_level {
        let levels = parse_log_levels(log_level)?;
        levels.apply();
        if let Some(level) = levels.global {
            println!("Logging enabled at level {level}");
        }
        for (module, level) in &levels.modules {
            println!("Logging enabled for {module} at level {level}");
        }
    }
    Ok(())
}

/// Runs one simulation as described by `args` and returns its report.
///
/// # Errors
/// Returns an error if the log level, the parameters or the output directory are invalid
pub fn run_with_base_args(args: &BaseArgs) -> Result<Report, EpisimError> {
    configure_logging(args)?;

    let parameters = match &args.config {
        Some(path) => Parameters::from_file(path)?,
        None => {
            let parameters = Parameters::default();
            parameters.validate()?;
            parameters
        }
    };

    let mut rng = seeded_rng(args.random_seed);
    let pathogen = parameters.build_pathogen()?;
    let mut population = parameters.build_population(&mut rng)?;
    let interaction = parameters.build_interaction();
    info!("{}", pathogen);
    info!(
        "population of {} in a space of {} with {} initial cases, seed {}",
        population.len(),
        population.space(),
        parameters.initial_cases,
        args.random_seed
    );

    let collector = ExecutionStatsCollector::new();
    let mut simulation = Simulation::new(
        &mut population,
        &pathogen,
        interaction.as_ref(),
        parameters.settings(),
    )?
    .with_progress(!args.no_progress);
    simulation.run(parameters.iterations, &mut rng);
    let report = simulation.into_report();

    if !args.no_stats {
        let stats =
            collector.compute_final_statistics(population.initial_size(), parameters.iterations);
        report_execution_statistics(&stats);
    }

    if let Some(output_dir) = &args.output_dir {
        let path = output_dir.join(REPORT_FILE_NAME);
        report.write_csv(&path)?;
        info!("report written to {}", path.display());
    }
    Ok(report)
}
