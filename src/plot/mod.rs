//! Charts of the measurements, drawn with any plotters backend and saved as PNG or SVG.
mod performance;
mod roofline;
mod runtime;
mod stacked;
pub mod style;

pub use self::performance::PerformancePlot;
pub use self::roofline::RooflinePlot;
pub use self::runtime::RuntimePlot;
pub use self::stacked::StackedPlot;
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::logs::Measurements;
use crate::resolution::Resolution;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlotMode {
    Performance,
    Runtime,
    StackedRuntime,
    Roofline,
}

impl PlotMode {
    pub const ALL: [PlotMode; 4] = [
        PlotMode::Performance,
        PlotMode::Runtime,
        PlotMode::StackedRuntime,
        PlotMode::Roofline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlotMode::Performance => "performance",
            PlotMode::Runtime => "runtime",
            PlotMode::StackedRuntime => "stacked_runtime",
            PlotMode::Roofline => "roofline",
        }
    }
}

impl fmt::Display for PlotMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PlotMode {
    type Err = &'static str;

    fn from_str(s: &str) -> std::result::Result<PlotMode, &'static str> {
        PlotMode::ALL
            .iter()
            .cloned()
            .find(|mode| mode.name() == s)
            .ok_or("cannot convert input to a plot mode")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn ext(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl Default for ImageFormat {
    fn default() -> ImageFormat {
        ImageFormat::Png
    }
}

impl FromStr for ImageFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> std::result::Result<ImageFormat, &'static str> {
        match s {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err("cannot convert input to an image format"),
        }
    }
}

/// A figure that can be drawn onto any backend.
pub trait Chart {
    /// Output file name without the extension
    fn file_stem(&self) -> String;

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>>;
}

/// Renders `chart` into `dir` and returns the path of the written file.
pub fn save<C>(chart: &C, dir: &Path, format: ImageFormat, size: (u32, u32)) -> Result<PathBuf>
where
    C: Chart,
{
    let path = dir.join(format!("{}.{}", chart.file_stem(), format.ext()));
    match format {
        ImageFormat::Png => render(chart, &BitMapBackend::new(&path, size).into_drawing_area())?,
        ImageFormat::Svg => render(chart, &SVGBackend::new(&path, size).into_drawing_area())?,
    }
    info!("Wrote {}", path.display());
    Ok(path)
}

fn render<C, DB>(chart: &C, root: &DrawingArea<DB, Shift>) -> Result<()>
where
    C: Chart,
    DB: DrawingBackend,
{
    chart
        .draw(root)
        .and_then(|_| root.present())
        .map_err(|err| Error::Plot(err.to_string()))
}

/// Draws every chart of `mode` into the configured plot directory.
pub fn make_plots(
    mode: PlotMode,
    measurements: &Measurements,
    config: &RunConfig,
) -> Result<Vec<PathBuf>> {
    let dir = config.plots_dir.as_path();
    let (format, size) = (config.format, config.arch.figure_size);
    info!("Creating {} plots", mode);

    let mut written = Vec::new();
    match mode {
        PlotMode::Performance => {
            for stage in measurements.functions() {
                let plot = PerformancePlot::new(
                    measurements,
                    stage,
                    &config.arch,
                    &config.peak_library,
                );
                if let Some(peak) = plot.peak_performance() {
                    debug!("Peak performance of {} in {}: {:.3}", config.peak_library, stage, peak);
                }
                written.push(save(&plot, dir, format, size)?);
            }
        }
        PlotMode::Runtime => {
            let plot = RuntimePlot::new(measurements);
            written.push(save(&plot, dir, format, size)?);
        }
        PlotMode::StackedRuntime => {
            for library in measurements.libraries() {
                match StackedPlot::new(measurements, library) {
                    Some(plot) => written.push(save(&plot, dir, format, size)?),
                    None => warn!("No stage runtimes for {}, skipping its stacked plot", library),
                }
            }
        }
        PlotMode::Roofline => {
            let plot = RooflinePlot::new(measurements, &config.arch);
            written.push(save(&plot, dir, format, size)?);
        }
    }
    Ok(written)
}

/// The x range that fits every benchmark resolution on a log axis.
fn pixel_range() -> (f64, f64) {
    let min = Resolution::R240p.pixels() as f64;
    let max = Resolution::R4320p.pixels() as f64;
    (min / 1.5, max * 1.5)
}

/// Formats a count with a metric suffix, e.g. `2.1M`.
fn format_count(x: f64) -> String {
    let (value, suffix) = match x.abs() {
        v if v >= 1e9 => (x / 1e9, "G"),
        v if v >= 1e6 => (x / 1e6, "M"),
        v if v >= 1e3 => (x / 1e3, "k"),
        _ => (x, ""),
    };
    if (value - value.round()).abs() < 1e-6 {
        format!("{:.0}{}", value, suffix)
    } else {
        format!("{:.1}{}", value, suffix)
    }
}

/// Formats a value of a log axis, which may span several orders of magnitude.
fn format_log_value(y: f64) -> String {
    if y >= 1e3 {
        format_count(y)
    } else if y >= 1.0 {
        format!("{:.0}", y)
    } else {
        format!("{:.0e}", y)
    }
}
