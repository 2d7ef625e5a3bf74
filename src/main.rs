extern crate env_logger;
#[macro_use]
extern crate log;
extern crate sift_perf_plots;

use sift_perf_plots::RunConfig;
use std::process;

fn main() {
    env_logger::init();

    match run() {
        Ok(n) => info!("Exited great, wrote {} plots.", n),
        Err(err) => {
            error!("Exited with error: {}.", err);
            process::exit(1);
        }
    }
}

fn run() -> sift_perf_plots::Result<usize> {
    let config = RunConfig::from_env()?;
    let written = sift_perf_plots::run(&config)?;
    Ok(written.len())
}
