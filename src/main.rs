use std::process::ExitCode;

use clap::Parser;
use ring_sim::{log, Histogram, LoadMetrics, LoadVector, Result, Simulation, SimulationConfig};

fn report(title: &str, loads: &LoadVector, bins: usize) -> Result<()> {
    let metrics = LoadMetrics::from_loads(loads.as_slice())?;
    let histogram = Histogram::new(loads.as_slice(), bins)?;
    println!("Load Metrics {}:", title);
    println!("{}", metrics);
    println!("Load Distribution {}:", title);
    print!("{}", histogram);
    Ok(())
}

fn run(config: SimulationConfig) -> Result<()> {
    let bins = config.bins;
    let mut sim = Simulation::new(config)?;
    let result = sim.run()?;
    report("without Virtual Copies", &result.plain, bins)?;
    println!();
    report("with Virtual Copies", &result.virtual_nodes, bins)
}

fn main() -> ExitCode {
    log::init_logger();
    let config = SimulationConfig::parse();
    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
