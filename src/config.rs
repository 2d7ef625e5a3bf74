//! Run configuration read from environment variables.
use crate::arch::ArchConfig;
use crate::error::{Error, Result};
use crate::flops::FlopModel;
use crate::logs::{MeasurementMethod, ReadOptions};
use crate::plot::{ImageFormat, PlotMode};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_LOGS_DIR: &str = "logs";
const DEFAULT_PLOTS_DIR: &str = "plots";
const DEFAULT_PEAK_LIBRARY: &str = "eth";

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub logs_dir: PathBuf,
    pub plots_dir: PathBuf,
    pub version: Option<String>,
    pub method: MeasurementMethod,
    /// Plot modes to render, in order
    pub modes: Vec<PlotMode>,
    pub format: ImageFormat,
    pub flop_model: FlopModel,
    pub arch: ArchConfig,
    /// Prefix of the library whose peak performance is shown in the titles
    pub peak_library: String,
}

impl Default for RunConfig {
    fn default() -> RunConfig {
        RunConfig {
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
            plots_dir: PathBuf::from(DEFAULT_PLOTS_DIR),
            version: None,
            method: MeasurementMethod::default(),
            modes: PlotMode::ALL.to_vec(),
            format: ImageFormat::default(),
            flop_model: FlopModel::default(),
            arch: ArchConfig::default(),
            peak_library: DEFAULT_PEAK_LIBRARY.to_owned(),
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Result<RunConfig> {
        RunConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from a key-value lookup; unset or empty keys take the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<RunConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = RunConfig::default();

        if let Some(dir) = get("LOGS") {
            config.logs_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("PLOTS_DIR") {
            config.plots_dir = PathBuf::from(dir);
        }
        config.version = get("VERSION");
        if let Some(method) = get("MEAS_METHOD") {
            config.method = parse_value("MEAS_METHOD", &method)?;
        }
        if let Some(mode) = get("PLOT_MODE") {
            config.modes = if mode == "all" {
                PlotMode::ALL.to_vec()
            } else {
                vec![parse_value("PLOT_MODE", &mode)?]
            };
        }
        if let Some(format) = get("IMG_FORMAT") {
            config.format = parse_value("IMG_FORMAT", &format)?;
        }
        if let Some(model) = get("FLOPS_MODEL") {
            config.flop_model = parse_value("FLOPS_MODEL", &model)?;
        }
        if let Some(arch) = get("ARCH") {
            config.arch = ArchConfig::from_name(&arch).ok_or(Error::Config {
                key: "ARCH",
                value: arch,
            })?;
        }
        if let Some(lib) = get("PEAK_LIB") {
            config.peak_library = lib;
        }
        Ok(config)
    }

    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            method: self.method,
            flop_model: self.flop_model,
            arch: self.arch.clone(),
            version: self.version.clone(),
        }
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T>
where
    T: FromStr,
{
    value.trim().parse::<T>().map_err(|_| Error::Config {
        key,
        value: value.to_owned(),
    })
}
