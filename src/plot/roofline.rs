use super::style::*;
use super::{format_log_value, Chart};
use crate::arch::ArchConfig;
use crate::flops::Stage;
use crate::logs::{Measurements, Series};
use crate::math;
use crate::util::slug;
use itertools::Itertools;
use plotters::chart::SeriesLabelPosition;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

const TITLE: &str = "All Functions";

/// Measured performance against operational intensity, under the compute and memory roofs.
pub struct RooflinePlot<'a> {
    arch: &'a ArchConfig,
    series: Vec<(Stage, &'a str, &'a Series)>,
}

impl<'a> RooflinePlot<'a> {
    pub fn new(measurements: &'a Measurements, arch: &'a ArchConfig) -> RooflinePlot<'a> {
        let series = measurements
            .functions()
            .flat_map(move |stage| {
                measurements
                    .libraries_of(stage)
                    .map(move |(library, series)| (stage, library, series))
            })
            .collect();
        RooflinePlot { arch, series }
    }

    /// Peak flops/cycle per instruction mix, lowest first.
    pub fn roofs(&self) -> [(f64, &'static str); 4] {
        [
            (self.arch.maxflops_sisd, "Max Performance SISD"),
            (self.arch.maxflops_sisd_fma, "Max Performance SISD + FMA"),
            (self.arch.maxflops_simd, "Max Performance SIMD"),
            (self.arch.maxflops_simd_fma, "Max Performance SIMD + FMA"),
        ]
    }

    /// The (intensity, performance) points of one series that can be placed on log axes.
    fn points(series: &Series) -> Vec<(f64, f64)> {
        series
            .points()
            .iter()
            .map(|p| (p.intensity(), p.performance()))
            .filter(|&(i, perf)| i > 0.0 && perf > 0.0 && i.is_finite() && perf.is_finite())
            .collect()
    }

    /// Axis ranges in powers of two that hold every point and the ridge of every roof.
    pub fn ranges(&self) -> ((f64, f64), (f64, f64)) {
        let beta = self.arch.roofline_beta;
        let roofs = self.roofs();
        let points = self
            .series
            .iter()
            .flat_map(|&(_, _, s)| RooflinePlot::points(s))
            .collect::<Vec<_>>();

        let x_values = points
            .iter()
            .map(|&(i, _)| i)
            .chain(roofs.iter().map(|&(peak, _)| peak / beta));
        let y_values = points
            .iter()
            .map(|&(_, perf)| perf)
            .chain(roofs.iter().map(|&(peak, _)| peak));
        let (x_min, x_max) = bracket(x_values);
        let (y_min, y_max) = bracket(y_values);
        ((x_min / 2.0, x_max * 4.0), (y_min / 2.0, y_max * 2.0))
    }
}

/// The powers of two just outside the smallest and the largest value.
fn bracket<I>(values: I) -> (f64, f64)
where
    I: Iterator<Item = f64>,
{
    let values = values.collect::<Vec<_>>();
    let max = math::peak(values.iter().cloned()).unwrap_or(1.0);
    let min = math::peak(values.iter().map(|v| -v)).map_or(1.0, |neg| -neg);
    (math::pow2_floor(min), math::pow2_ceil(max))
}

impl<'a> Chart for RooflinePlot<'a> {
    fn file_stem(&self) -> String {
        format!("rooflineplot_{}", slug(TITLE))
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;
        let ((x_min, x_max), (y_min, y_max)) = self.ranges();
        let beta = self.arch.roofline_beta;

        let mut chart = ChartBuilder::on(root)
            .caption(
                format!("Roofline {} ({})", TITLE, self.arch.fixed_cpu_frequency),
                (FONT, TITLE_SIZE),
            )
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(100)
            .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())?;
        chart
            .configure_mesh()
            .x_desc("Operational intensity [flops/byte]")
            .y_desc("Performance [flops/cycle]")
            .axis_desc_style((FONT, LABEL_SIZE))
            .label_style((FONT, LABEL_SIZE))
            .x_label_formatter(&|x| format_log_value(*x))
            .y_label_formatter(&|y| format_log_value(*y))
            .draw()?;

        // Memory bound up to the highest roof
        let top = self.roofs()[3].0;
        chart
            .draw_series(LineSeries::new(
                vec![(x_min, beta * x_min), (top / beta, top)],
                MEMORY_BOUND_COLOR.stroke_width(LINE_WIDTH + 1),
            ))?
            .label(format!("Memory bound ({} bytes/cycle)", beta))
            .legend(|(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    MEMORY_BOUND_COLOR.stroke_width(LINE_WIDTH + 1),
                )
            });
        for (idx, &(peak, label)) in self.roofs().iter().enumerate() {
            let color = if idx < 2 {
                SISD_BOUND_COLOR
            } else {
                SIMD_BOUND_COLOR
            };
            let width = if idx % 2 == 0 { LINE_WIDTH } else { LINE_WIDTH + 1 };
            chart
                .draw_series(LineSeries::new(
                    vec![(peak / beta, peak), (x_max, peak)],
                    color.stroke_width(width),
                ))?
                .label(label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width))
                });
        }

        let stages = self.series.iter().map(|&(stage, _, _)| stage).unique().collect::<Vec<_>>();
        let libraries = self.series.iter().map(|&(_, lib, _)| lib).unique().collect::<Vec<_>>();
        for &(stage, library, series) in self.series.iter() {
            let color = palette_color(stages.iter().position(|s| *s == stage).unwrap_or(0));
            let library_idx = libraries.iter().position(|l| *l == library).unwrap_or(0);
            let style = LibraryStyle::of(library, library_idx);
            let points = RooflinePlot::points(series);
            if points.is_empty() {
                continue;
            }

            // An invisible series carries the legend entry of the markers
            chart
                .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
                .label(format!("{} {}", style.name, stage))
                .legend(move |(x, y)| Circle::new((x + 10, y), MARKER_SIZE, color.filled()));
            draw_markers(&mut chart, points, style.marker, color)?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .label_font((FONT, LABEL_SIZE - 4))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }
}
