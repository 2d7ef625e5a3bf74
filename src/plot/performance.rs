use super::style::*;
use super::{format_count, pixel_range, Chart};
use crate::arch::ArchConfig;
use crate::flops::Stage;
use crate::logs::{MeasurementMethod, Measurements, Series};
use crate::math;
use plotters::chart::SeriesLabelPosition;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

/// Performance of one function over image size, a line per library.
pub struct PerformancePlot<'a> {
    stage: Stage,
    series: Vec<(&'a str, &'a Series)>,
    method: MeasurementMethod,
    arch: &'a ArchConfig,
    peak_library: String,
    peak: Option<f64>,
}

impl<'a> PerformancePlot<'a> {
    /// The peak performance of the libraries whose name contains `peak_library` goes in the
    /// subtitle.
    pub fn new(
        measurements: &'a Measurements,
        stage: Stage,
        arch: &'a ArchConfig,
        peak_library: &str,
    ) -> PerformancePlot<'a> {
        let series = measurements.libraries_of(stage).collect::<Vec<_>>();
        let peak = math::peak(
            series
                .iter()
                .filter(|(library, _)| library.contains(peak_library))
                .flat_map(|(_, s)| s.points().iter().map(|p| p.performance())),
        );
        PerformancePlot {
            stage,
            series,
            method: measurements.method(),
            arch,
            peak_library: display_name(peak_library),
            peak,
        }
    }

    pub fn peak_performance(&self) -> Option<f64> {
        self.peak
    }

    pub fn title(&self) -> String {
        format!("Performance {}", self.stage)
    }

    pub fn subtitle(&self) -> String {
        match self.peak {
            Some(peak) => format!(
                "(Measured with {}; Peak Performance {}: {:.2})",
                self.method, self.peak_library, peak
            ),
            None => format!("(Measured with {})", self.method),
        }
    }

    fn y_max(&self) -> f64 {
        let measured = math::peak(
            self.series
                .iter()
                .flat_map(|(_, s)| s.points().iter())
                .map(|p| p.performance() + p.performance_std()),
        )
        .unwrap_or(0.0);
        (self.arch.maxflops_simd + 0.5).max(measured * 1.1)
    }
}

impl<'a> Chart for PerformancePlot<'a> {
    fn file_stem(&self) -> String {
        format!("perfplot_{}", self.stage.name().to_lowercase())
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;
        let root = root.titled(&self.title(), (FONT, TITLE_SIZE))?;
        let (x_min, x_max) = pixel_range();

        let mut chart = ChartBuilder::on(&root)
            .caption(self.subtitle(), (FONT, SUBTITLE_SIZE))
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(90)
            .build_cartesian_2d((x_min..x_max).log_scale(), 0f64..self.y_max())?;
        chart
            .configure_mesh()
            .x_desc("Image resolution [pixels]")
            .y_desc("Performance [flops/cycle]")
            .axis_desc_style((FONT, LABEL_SIZE))
            .label_style((FONT, LABEL_SIZE))
            .x_label_formatter(&|x| format_count(*x))
            .draw()?;

        let bounds = [
            (self.arch.maxflops_sisd, "Max Performance SISD", SISD_BOUND_COLOR),
            (self.arch.maxflops_simd, "Max Performance SIMD", SIMD_BOUND_COLOR),
        ];
        for &(bound, label, color) in bounds.iter() {
            chart
                .draw_series(LineSeries::new(
                    vec![(x_min, bound), (x_max, bound)],
                    color.stroke_width(LINE_WIDTH),
                ))?
                .label(label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
                });
        }

        for (idx, &(library, series)) in self.series.iter().enumerate() {
            let style = LibraryStyle::of(library, idx);
            let color = palette_color(idx);
            let points = series
                .points()
                .iter()
                .map(|p| (p.resolution.pixels() as f64, p.performance()))
                .collect::<Vec<_>>();

            chart
                .draw_series(LineSeries::new(
                    points.clone(),
                    color.stroke_width(LINE_WIDTH),
                ))?
                .label(style.name.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
                });
            chart.draw_series(series.points().iter().map(|p| {
                let (perf, std) = (p.performance(), p.performance_std());
                ErrorBar::new_vertical(
                    p.resolution.pixels() as f64,
                    (perf - std).max(0.0),
                    perf,
                    perf + std,
                    color.stroke_width(1),
                    10,
                )
            }))?;
            draw_markers(&mut chart, points, style.marker, color)?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((FONT, LABEL_SIZE))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }
}
