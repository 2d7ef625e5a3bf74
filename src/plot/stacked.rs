use super::style::*;
use super::Chart;
use crate::flops::Stage;
use crate::logs::Measurements;
use crate::resolution::Resolution;
use crate::util::slug;
use plotters::chart::SeriesLabelPosition;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

const TITLE: &str = "Stacked Proportional Runtime";
const BAR_HALF_WIDTH: f64 = 0.3;
// Empty columns right of the bars that keep the legend clear of them
const LEGEND_COLUMNS: f64 = 2.0;

/// The share of each function in the total runtime of one library, a bar per resolution.
pub struct StackedPlot<'a> {
    library: &'a str,
    resolutions: Vec<Resolution>,
    segments: Vec<(Stage, Vec<f64>)>,
}

impl<'a> StackedPlot<'a> {
    /// Returns `None` when `library` has no stage runtimes to stack.
    pub fn new(measurements: &'a Measurements, library: &'a str) -> Option<StackedPlot<'a>> {
        let (resolutions, totals): (Vec<Resolution>, Vec<f64>) = measurements
            .total_runtimes(library)
            .into_iter()
            .filter(|&(_, total)| total > 0.0)
            .unzip();
        if resolutions.is_empty() {
            return None;
        }

        let segments = measurements
            .functions()
            .filter(|stage| !stage.is_aggregate())
            .filter_map(|stage| {
                let series = measurements.series(stage, library)?;
                let shares = resolutions
                    .iter()
                    .zip(totals.iter())
                    .map(|(&res, &total)| series.get(res).map_or(0.0, |p| p.runtime / total))
                    .collect();
                Some((stage, shares))
            })
            .collect();
        Some(StackedPlot {
            library,
            resolutions,
            segments,
        })
    }

    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    /// Per function, its share of the total runtime at each resolution.
    pub fn shares(&self) -> &[(Stage, Vec<f64>)] {
        &self.segments
    }

    fn resolution_label(&self, x: f64) -> String {
        let idx = x.round();
        if idx < 0.0 || (x - idx).abs() > 1e-6 {
            return String::new();
        }
        self.resolutions
            .get(idx as usize)
            .map_or_else(String::new, |res| res.label().to_owned())
    }
}

impl<'a> Chart for StackedPlot<'a> {
    fn file_stem(&self) -> String {
        format!("stackedplot_{}", slug(&format!("{} {}", TITLE, self.library)))
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;
        let n = self.resolutions.len();
        let x_max = n as f64 - 0.5 + LEGEND_COLUMNS;

        let mut chart = ChartBuilder::on(root)
            .caption(
                format!("{} {}", TITLE, display_name(self.library)),
                (FONT, TITLE_SIZE),
            )
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(90)
            .build_cartesian_2d(-0.5f64..x_max, 0f64..1f64)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(2 * (n + LEGEND_COLUMNS as usize) + 1)
            .x_desc("Image resolution")
            .y_desc("Share of total runtime")
            .axis_desc_style((FONT, LABEL_SIZE))
            .label_style((FONT, LABEL_SIZE))
            .x_label_formatter(&|x| self.resolution_label(*x))
            .y_label_formatter(&|y| format!("{:.0}%", y * 100.0))
            .draw()?;

        let mut bottoms = vec![0.0; n];
        for (idx, (stage, shares)) in self.segments.iter().enumerate() {
            let color = palette_color(idx);
            let bars = shares
                .iter()
                .zip(bottoms.iter())
                .enumerate()
                .map(|(i, (&share, &bottom))| {
                    let x = i as f64;
                    Rectangle::new(
                        [(x - BAR_HALF_WIDTH, bottom), (x + BAR_HALF_WIDTH, bottom + share)],
                        color.filled(),
                    )
                })
                .collect::<Vec<_>>();
            chart
                .draw_series(bars)?
                .label(stage.name())
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled()));

            for (bottom, share) in bottoms.iter_mut().zip(shares.iter()) {
                *bottom += share;
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font((FONT, LABEL_SIZE))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }
}
