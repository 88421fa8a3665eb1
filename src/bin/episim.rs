use std::process::ExitCode;

use episim::runner::run_with_args;

fn main() -> ExitCode {
    let report = match run_with_args() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let Some(last) = report.last() else {
        println!("No days simulated.");
        return ExitCode::SUCCESS;
    };
    println!("Days simulated: {}", report.len());
    println!("Peak infected: {}", report.total_infected().iter().max().copied().unwrap_or(0));
    println!("Infected on day {}: {}", last.day, last.total_infected);
    println!("Immunized on day {}: {}", last.day, last.immunized);
    println!("Total deaths: {}", report.total_deaths());
    ExitCode::SUCCESS
}
