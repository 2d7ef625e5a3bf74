extern crate itertools;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate noisy_float;
extern crate num_traits;
extern crate plotters;
extern crate thiserror;

pub mod arch;
pub mod config;
pub mod error;
pub mod flops;
pub mod geometry;
pub mod logs;
pub mod math;
pub mod plot;
pub mod resolution;
pub mod util;
#[cfg(test)]
mod tests;

pub use crate::config::RunConfig;
pub use crate::error::{Error, Result};
use std::fs;
use std::path::PathBuf;

/// Reads the logs and draws every configured plot mode, returning the files written.
pub fn run(config: &RunConfig) -> Result<Vec<PathBuf>> {
    info!(
        "Reading logs from {} ({}, {} flop model, {})",
        config.logs_dir.display(),
        config.method,
        config.flop_model,
        config.arch.name
    );
    let measurements = logs::read_logs(&config.logs_dir, &config.read_options())?;
    info!(
        "Read {} functions of {} libraries",
        measurements.functions().count(),
        measurements.libraries().len()
    );

    fs::create_dir_all(&config.plots_dir)?;
    let mut written = Vec::new();
    for &mode in config.modes.iter() {
        written.extend(plot::make_plots(mode, &measurements, config)?);
    }
    Ok(written)
}
