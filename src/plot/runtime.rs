use super::style::*;
use super::{format_count, format_log_value, pixel_range, Chart};
use crate::flops::Stage;
use crate::logs::{MeasurementMethod, Measurements, Series};
use crate::math;
use crate::util::slug;
use itertools::Itertools;
use plotters::chart::SeriesLabelPosition;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

const TITLE: &str = "All Functions";

/// Runtime over image size of every function of every library.
pub struct RuntimePlot<'a> {
    lines: Vec<(Stage, &'a str, &'a Series)>,
    method: MeasurementMethod,
}

impl<'a> RuntimePlot<'a> {
    pub fn new(measurements: &'a Measurements) -> RuntimePlot<'a> {
        let lines = measurements
            .functions()
            .flat_map(move |stage| {
                measurements
                    .libraries_of(stage)
                    .map(move |(library, series)| (stage, library, series))
            })
            .collect();
        RuntimePlot {
            lines,
            method: measurements.method(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Color and marker of every line, distinct for each line.
    pub fn line_styles(&self) -> Vec<(RGBColor, LibraryStyle)> {
        let libraries = self
            .lines
            .iter()
            .map(|&(_, library, _)| library)
            .unique()
            .collect::<Vec<_>>();
        self.lines
            .iter()
            .enumerate()
            .map(|(idx, &(_, library, _))| {
                let library_idx = libraries.iter().position(|l| *l == library).unwrap_or(0);
                (
                    spread_color(idx, self.lines.len()),
                    LibraryStyle::of(library, library_idx),
                )
            })
            .collect()
    }

    /// The y range on a log axis, from the shortest to the longest runtime.
    fn y_range(&self) -> (f64, f64) {
        let runtimes = || {
            self.lines
                .iter()
                .flat_map(|(_, _, s)| s.points().iter())
                .filter(|p| p.runtime > 0.0)
        };
        let longest = math::peak(runtimes().map(|p| p.runtime + p.runtime_std)).unwrap_or(1.0);
        let shortest = math::peak(runtimes().map(|p| -p.runtime)).map_or(1.0, |neg| -neg);
        (math::pow2_floor(shortest / 2.0), math::pow2_ceil(longest * 2.0))
    }
}

impl<'a> Chart for RuntimePlot<'a> {
    fn file_stem(&self) -> String {
        format!("runtimeplot_{}", slug(TITLE))
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;
        let (x_min, x_max) = pixel_range();
        let (y_min, y_max) = self.y_range();

        let mut chart = ChartBuilder::on(root)
            .caption(format!("Runtime {}", TITLE), (FONT, TITLE_SIZE))
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(100)
            .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())?;
        chart
            .configure_mesh()
            .x_desc("Image resolution [pixels]")
            .y_desc(format!("Runtime [{}]", self.method.unit()))
            .axis_desc_style((FONT, LABEL_SIZE))
            .label_style((FONT, LABEL_SIZE))
            .x_label_formatter(&|x| format_count(*x))
            .y_label_formatter(&|y| format_log_value(*y))
            .draw()?;

        for (&(stage, _, series), (color, style)) in self.lines.iter().zip(self.line_styles()) {
            let points = series
                .points()
                .iter()
                .filter(|p| p.runtime > 0.0)
                .map(|p| (p.resolution.pixels() as f64, p.runtime))
                .collect::<Vec<_>>();

            chart
                .draw_series(LineSeries::new(
                    points.clone(),
                    color.stroke_width(LINE_WIDTH),
                ))?
                .label(format!("{} {}", style.name, stage))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
                });
            chart.draw_series(series.points().iter().filter(|p| p.runtime > 0.0).map(|p| {
                ErrorBar::new_vertical(
                    p.resolution.pixels() as f64,
                    (p.runtime - p.runtime_std).max(y_min),
                    p.runtime,
                    p.runtime + p.runtime_std,
                    color.stroke_width(1),
                    10,
                )
            }))?;
            draw_markers(&mut chart, points, style.marker, color)?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((FONT, LABEL_SIZE - 4))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }
}
