use plotters::chart::ChartContext;
use plotters::coord::CoordTranslate;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::collections::HashMap;

pub const FONT: &str = "sans-serif";
pub const TITLE_SIZE: u32 = 40;
pub const SUBTITLE_SIZE: u32 = 26;
pub const LABEL_SIZE: u32 = 20;
pub const MARKER_SIZE: i32 = 6;
pub const LINE_WIDTH: u32 = 2;

// Dark2, followed by a few extra hues for plots with many series
pub const PALETTE: [RGBColor; 12] = [
    RGBColor(27, 158, 119),
    RGBColor(217, 95, 2),
    RGBColor(117, 112, 179),
    RGBColor(231, 41, 138),
    RGBColor(102, 166, 30),
    RGBColor(230, 171, 2),
    RGBColor(166, 118, 29),
    RGBColor(102, 102, 102),
    RGBColor(31, 120, 180),
    RGBColor(227, 26, 28),
    RGBColor(106, 61, 154),
    RGBColor(177, 89, 40),
];

pub const SISD_BOUND_COLOR: RGBColor = RGBColor(196, 66, 64);
pub const SIMD_BOUND_COLOR: RGBColor = RGBColor(123, 3, 35);
pub const MEMORY_BOUND_COLOR: RGBColor = RGBColor(31, 120, 180);
pub const BACKGROUND: RGBColor = RGBColor(235, 235, 235);

pub fn palette_color(idx: usize) -> RGBColor {
    PALETTE[idx % PALETTE.len()]
}

/// The `idx`th of `count` distinct colors: the palette while it lasts, otherwise hues spread
/// evenly around the color wheel.
pub fn spread_color(idx: usize, count: usize) -> RGBColor {
    if count <= PALETTE.len() {
        return palette_color(idx);
    }
    let (r, g, b) = HSLColor(idx as f64 / count as f64, 0.65, 0.45).rgb();
    RGBColor(r, g, b)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Triangle,
    Square,
    Cross,
}

impl Marker {
    const CYCLE: [Marker; 4] = [Marker::Square, Marker::Cross, Marker::Circle, Marker::Triangle];
}

lazy_static! {
    // Display name and marker of the libraries the benchmarks compare
    static ref KNOWN_LIBRARIES: HashMap<&'static str, (&'static str, Marker)> = {
        let mut m = HashMap::new();
        m.insert("eth", ("ethSIFT", Marker::Circle));
        m.insert("ez", ("ezSIFT", Marker::Triangle));
        m
    };
}

/// How the series of one library are drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct LibraryStyle {
    pub name: String,
    pub marker: Marker,
}

impl LibraryStyle {
    /// Known libraries get their own name and marker, others keep their name and take the
    /// `idx`th marker of a fixed cycle.
    pub fn of(library: &str, idx: usize) -> LibraryStyle {
        match KNOWN_LIBRARIES.get(library) {
            Some(&(name, marker)) => LibraryStyle {
                name: name.to_owned(),
                marker,
            },
            None => LibraryStyle {
                name: library.to_owned(),
                marker: Marker::CYCLE[idx % Marker::CYCLE.len()],
            },
        }
    }
}

pub fn display_name(library: &str) -> String {
    KNOWN_LIBRARIES
        .get(library)
        .map_or_else(|| library.to_owned(), |&(name, _)| name.to_owned())
}

/// Draws `marker` at every point.
pub fn draw_markers<DB, CT, I>(
    chart: &mut ChartContext<'_, DB, CT>,
    points: I,
    marker: Marker,
    color: RGBColor,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
    CT: CoordTranslate<From = (f64, f64)>,
    I: IntoIterator<Item = (f64, f64)>,
{
    let filled = color.filled();
    let points = points.into_iter();
    match marker {
        Marker::Circle => {
            chart.draw_series(points.map(|c| Circle::new(c, MARKER_SIZE, filled)))?;
        }
        Marker::Triangle => {
            chart.draw_series(points.map(|c| TriangleMarker::new(c, MARKER_SIZE, filled)))?;
        }
        Marker::Square => {
            let s = MARKER_SIZE - 1;
            chart.draw_series(
                points.map(|c| EmptyElement::at(c) + Rectangle::new([(-s, -s), (s, s)], filled)),
            )?;
        }
        Marker::Cross => {
            let stroke = color.stroke_width(LINE_WIDTH);
            chart.draw_series(points.map(|c| Cross::new(c, MARKER_SIZE, stroke)))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_libraries_have_display_names() {
        assert_eq!(display_name("eth"), "ethSIFT");
        assert_eq!(display_name("ez"), "ezSIFT");
        assert_eq!(display_name("opencv"), "opencv");
    }

    #[test]
    fn unknown_libraries_cycle_markers() {
        assert_eq!(LibraryStyle::of("eth", 3).marker, Marker::Circle);
        assert_eq!(LibraryStyle::of("a", 0).marker, Marker::Square);
        assert_eq!(LibraryStyle::of("b", 1).marker, Marker::Cross);
        assert_eq!(LibraryStyle::of("e", 4).marker, Marker::Square);
    }

    #[test]
    fn palette_wraps_around() {
        assert_eq!(palette_color(0), palette_color(PALETTE.len()));
    }

    #[test]
    fn spread_colors_stay_distinct_past_the_palette() {
        assert_eq!(spread_color(3, 5), palette_color(3));
        let mut colors = (0..30).map(|i| spread_color(i, 30).rgb()).collect::<Vec<_>>();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 30);
    }
}
