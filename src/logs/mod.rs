//! Reading benchmark logs into per-function, per-library measurement series.
mod record;
#[cfg(test)]
mod test;

pub use self::record::*;
use crate::arch::ArchConfig;
use crate::error::{Error, Result};
use crate::flops::{Estimate, FlopModel, Stage};
use crate::math::ratio_std;
use crate::resolution::Resolution;
use crate::util::{list_files, read_lines};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::path::Path;

/// Settings that decide which log files are read and how their values are interpreted.
#[derive(Clone, Debug)]
pub struct ReadOptions {
    pub method: MeasurementMethod,
    pub flop_model: FlopModel,
    pub arch: ArchConfig,
    /// Only files whose name contains this are read
    pub version: Option<String>,
}

impl Default for ReadOptions {
    fn default() -> ReadOptions {
        ReadOptions {
            method: MeasurementMethod::default(),
            flop_model: FlopModel::default(),
            arch: ArchConfig::default(),
            version: None,
        }
    }
}

/// A measured function at one resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub resolution: Resolution,
    /// Median duration in the unit of the log
    pub runtime: f64,
    pub runtime_std: f64,
    pub cycles: f64,
    pub cycles_std: f64,
    pub estimate: Estimate,
}

impl Point {
    /// Throughput in flops/cycle.
    pub fn performance(&self) -> f64 {
        if self.cycles > 0.0 {
            self.estimate.flops / self.cycles
        } else {
            0.0
        }
    }

    pub fn performance_std(&self) -> f64 {
        ratio_std(self.estimate.flops, self.cycles, self.cycles_std)
    }

    pub fn cycles_per_flop(&self) -> f64 {
        self.cycles / self.estimate.flops
    }

    pub fn intensity(&self) -> f64 {
        self.estimate.intensity()
    }
}

/// The points of one (function, library) pair, ordered by resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    points: Vec<Point>,
}

impl Series {
    /// Inserts the point in resolution order, returning the point it replaces.
    pub fn insert(&mut self, point: Point) -> Option<Point> {
        match self
            .points
            .binary_search_by_key(&point.resolution, |p| p.resolution)
        {
            Ok(idx) => Some(std::mem::replace(&mut self.points[idx], point)),
            Err(idx) => {
                self.points.insert(idx, point);
                None
            }
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn get(&self, resolution: Resolution) -> Option<&Point> {
        self.points.iter().find(|p| p.resolution == resolution)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// All series read from a log directory.
#[derive(Clone, Debug)]
pub struct Measurements {
    method: MeasurementMethod,
    functions: BTreeMap<Stage, BTreeMap<String, Series>>,
}

impl Measurements {
    pub fn new(method: MeasurementMethod) -> Measurements {
        Measurements {
            method,
            functions: BTreeMap::new(),
        }
    }

    pub fn method(&self) -> MeasurementMethod {
        self.method
    }

    /// Adds a record measured at `resolution`. Records of unknown functions are skipped.
    pub fn add(&mut self, record: &Record, resolution: Resolution, options: &ReadOptions) {
        let stage = match record.function.parse::<Stage>() {
            Ok(stage) => stage,
            Err(_) => {
                warn!(
                    "No flop model for {}_{}, skipping it",
                    record.library, record.function
                );
                return;
            }
        };
        let (cycles, cycles_std) = match options.method {
            MeasurementMethod::Rdtsc => (record.median, record.std_dev),
            MeasurementMethod::Chrono => (
                options.arch.micros_to_cycles(record.median),
                options.arch.micros_to_cycles(record.std_dev),
            ),
        };
        let point = Point {
            resolution,
            runtime: record.median,
            runtime_std: record.std_dev,
            cycles,
            cycles_std,
            estimate: options.flop_model.estimate(stage, resolution),
        };
        debug!(
            "{} {} @ {}: {} cycles, {:.4} flops/cycle",
            record.library,
            stage,
            resolution,
            cycles,
            point.performance()
        );

        let replaced = self
            .functions
            .entry(stage)
            .or_insert_with(BTreeMap::new)
            .entry(record.library.clone())
            .or_insert_with(Series::default)
            .insert(point);
        if replaced.is_some() {
            warn!(
                "Duplicate measurement of {}_{} at {}, keeping the later one",
                record.library, stage, resolution
            );
        }
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Functions in pipeline order.
    pub fn functions(&self) -> impl Iterator<Item = Stage> + '_ {
        self.functions.keys().cloned()
    }

    /// The series of every library that measured `stage`.
    pub fn libraries_of(&self, stage: Stage) -> impl Iterator<Item = (&str, &Series)> + '_ {
        self.functions
            .get(&stage)
            .into_iter()
            .flat_map(|libs| libs.iter().map(|(lib, series)| (lib.as_str(), series)))
    }

    /// Every library that appears in any function, sorted.
    pub fn libraries(&self) -> Vec<&str> {
        self.functions
            .values()
            .flat_map(|libs| libs.keys().map(String::as_str))
            .unique()
            .sorted()
            .collect()
    }

    pub fn series(&self, stage: Stage, library: &str) -> Option<&Series> {
        self.functions.get(&stage).and_then(|libs| libs.get(library))
    }

    /// The summed runtime of every stage of `library`, per resolution.
    ///
    /// Stages whose runtime already contains the others are left out.
    pub fn total_runtimes(&self, library: &str) -> BTreeMap<Resolution, f64> {
        let mut totals = BTreeMap::new();
        for (stage, libs) in self.functions.iter() {
            if stage.is_aggregate() {
                continue;
            }
            if let Some(series) = libs.get(library) {
                for point in series.points() {
                    *totals.entry(point.resolution).or_insert(0.0) += point.runtime;
                }
            }
        }
        totals
    }

    /// The longest runtime over all series.
    pub fn longest_runtime(&self) -> f64 {
        self.functions
            .values()
            .flat_map(|libs| libs.values())
            .flat_map(|series| series.points())
            .map(|p| p.runtime)
            .fold(0.0, f64::max)
    }
}

/// Reads the records of one log file, skipping the header line and blank lines.
pub fn read_log_file<P>(path: P) -> Result<Vec<Record>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let lines = read_lines(path)?;
    lines
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            Record::parse(line).map_err(|reason| Error::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                reason,
            })
        })
        .collect()
}

/// Reads every log file in `dir` into measurements.
///
/// Log files are named `<prefix>-<resolution>[_<suffix>]`; files without a known resolution are
/// skipped.
pub fn read_logs<P>(dir: P, options: &ReadOptions) -> Result<Measurements>
where
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    let mut measurements = Measurements::new(options.method);

    for path in list_files(dir)? {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        if let Some(version) = &options.version {
            if !name.contains(version.as_str()) {
                debug!("Skipping {}, not of version {}", name, version);
                continue;
            }
        }
        let resolution = match Resolution::from_file_name(&name) {
            Some(resolution) => resolution,
            None => {
                warn!("Skipping {}, no resolution in the file name", name);
                continue;
            }
        };

        let records = match read_log_file(&path) {
            Ok(records) => records,
            Err(Error::Io(err)) => {
                warn!("Skipping {}, unreadable: {}", name, err);
                continue;
            }
            Err(err) => return Err(err),
        };
        info!("Read {} records at {} from {}", records.len(), resolution, name);
        for record in records.iter() {
            measurements.add(record, resolution, options);
        }
    }

    if measurements.is_empty() {
        return Err(Error::NoMeasurements(dir.to_path_buf()));
    }
    Ok(measurements)
}
