use cpu_scheduling_simulator::{
    config::Config,
    error::AppError,
    logger,
    scheduler::{Simulation, SimulationRunner},
    workload,
};
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use log::LevelFilter;
use std::{io, process::ExitCode};

fn main() -> ExitCode {
    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(err) => err.exit(),
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<(), AppError> {
    // Log records would tear the terminal UI apart
    let level = match config.algorithm() {
        Some(_) => logger::level_for(config.verbosity),
        None => LevelFilter::Off,
    };
    logger::init(level)?;

    let processes = match &config.workload {
        Some(path) => workload::load(path)?,
        None => workload::demo(),
    };

    if let Some(algorithm) = config.algorithm() {
        let outcome = algorithm.run(&processes)?;
        println!("{} Results:", outcome.name());
        println!("{outcome}");
        return Ok(());
    }

    execute!(io::stdout(), Clear(ClearType::All))?;

    let simulation = Simulation::new(processes, config.quantum, config.idle_gaps);
    let mut runner = SimulationRunner::new(simulation)?;

    while runner.run()? {}
    drop(runner);

    execute!(io::stdout(), Clear(ClearType::All))?;
    Ok(())
}
