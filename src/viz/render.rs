// SVG rendering of the histogram and bar chart specifications.
//
// Plotters draws into an in-memory SVG string so the same output serves the
// HTML dashboard, the report files, and the web API.

use plotters::prelude::*;

use super::bar::BarSpec;
use super::histogram::HistogramSpec;
use crate::error::VizError;

pub const CHART_WIDTH: u32 = 900;
pub const CHART_HEIGHT: u32 = 450;

const HISTOGRAM_TITLE: &str = "Distribution of tweet lengths";
const HISTOGRAM_X: &str = "Number of words";
const HISTOGRAM_Y: &str = "Count";
const BAR_X: &str = "Words";
const BAR_Y: &str = "Frequency";

/// Title of the top-token chart for a given K.
pub fn bar_title(k: usize) -> String {
    format!("Top {k} most frequent words")
}

/// Draw a length histogram as an SVG document.
pub fn histogram_svg(spec: &HistogramSpec) -> Result<String, VizError> {
    let (lo, hi) = match (spec.edges.first(), spec.edges.last()) {
        (Some(&lo), Some(&hi)) if hi > lo => (lo, hi),
        _ => return Err(VizError::InvalidBinCount),
    };
    let y_top = headroom(spec.counts.iter().copied().max().unwrap_or(0));

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .caption(HISTOGRAM_TITLE, ("sans-serif", 24))
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(lo..hi, 0u32..y_top)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(HISTOGRAM_X)
            .y_desc(HISTOGRAM_Y)
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(spec.iter_bins().map(|(x0, x1, count)| {
                Rectangle::new([(x0, 0u32), (x1, count as u32)], BLUE.mix(0.6).filled())
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Draw the top-token bar chart as an SVG document.
pub fn bar_svg(spec: &BarSpec) -> Result<String, VizError> {
    let n = spec.bars.len() as u32;
    let y_top = headroom(spec.max_count());
    let labels: Vec<&str> = spec.bars.iter().map(|b| b.token.as_str()).collect();
    let label_for = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).map(|s| s.to_string()).unwrap_or_default(),
        _ => String::new(),
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .caption(bar_title(spec.k), ("sans-serif", 24))
            .x_label_area_size(90)
            .y_label_area_size(55)
            .build_cartesian_2d((0u32..n.max(1)).into_segmented(), 0u32..y_top)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len().max(1))
            .x_label_formatter(&label_for)
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .x_desc(BAR_X)
            .y_desc(BAR_Y)
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BLUE.mix(0.7).filled())
                    .margin(6)
                    .data(spec.bars.iter().enumerate().map(|(i, b)| (i as u32, b.count as u32))),
            )
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Y-axis upper bound with ~10% room above the tallest bar.
fn headroom(max: usize) -> u32 {
    let max = max as u32;
    max + max / 10 + 1
}

fn render_err(e: impl std::fmt::Display) -> VizError {
    VizError::Render(e.to_string())
}
