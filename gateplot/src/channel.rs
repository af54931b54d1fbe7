//! Event-order trace of a single channel, used to spot acquisition problems
//! such as clogs or drift.

use crate::error::GatePlotError;
use crate::surface::RenderSurface;
use gateplot_common::types::{CssColor, Fill, Stroke};
use gateplot_scales::colormap::rainbow_colormap;
use gateplot_scales::extent::data_range;
use gateplot_scales::Histogram2d;
use serde::Serialize;
use tracing::debug;

/// Bins along the value axis of a channel trace
pub const VALUE_BINS: usize = 128;

pub const EVENTS_LABEL: &str = "Events";

const FLAG_FILL: CssColor = CssColor::rgb(1.0, 192.0 / 255.0, 203.0 / 255.0);
const FLAG_EDGE: CssColor = CssColor::rgb(1.0, 20.0 / 255.0, 147.0 / 255.0);
const FLAG_ALPHA: f32 = 0.3;

/// Transform applied to raw channel values before plotting
pub trait EventTransform {
    fn apply(&self, values: &[f64]) -> Vec<f64>;
}

impl<F: Fn(f64) -> f64> EventTransform for F {
    fn apply(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| self(*v)).collect()
    }
}

/// One non-empty cell of the event/value heatmap
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub count: f64,
    pub color: CssColor,
}

/// A run of consecutive flagged events, from its first event to its last
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlaggedSpan {
    pub start: usize,
    pub end: usize,
    pub fill: Fill,
    pub stroke: Stroke,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelPlot {
    pub title: String,
    pub cells: Vec<HeatmapCell>,
    pub flagged: Vec<FlaggedSpan>,
    pub event_range: Option<(f64, f64)>,
    pub value_range: Option<(f64, f64)>,
}

impl ChannelPlot {
    pub fn render<S: RenderSurface>(&self, mut surface: S) -> Result<S::Output, GatePlotError> {
        surface.axis_labels(Some(EVENTS_LABEL), None)?;
        surface.axis_ranges(self.event_range, self.value_range)?;
        surface.heatmap(&self.cells)?;
        for span in &self.flagged {
            surface.span(span)?;
        }
        surface.titles(std::slice::from_ref(&self.title))?;
        surface.finish()
    }
}

/// Plot `values` against event number as a 2-D histogram, marking each run
/// of flagged events.
#[tracing::instrument(skip_all, fields(events = values.len()))]
pub fn plot_channel(
    values: &[f64],
    label: &str,
    transform: Option<&dyn EventTransform>,
    flagged_events: Option<&[bool]>,
) -> Result<ChannelPlot, GatePlotError> {
    if let Some(flags) = flagged_events {
        GatePlotError::check_mask("flagged events", values.len(), flags.len())?;
    }

    let values = match transform {
        Some(transform) => transform.apply(values),
        None => values.to_vec(),
    };
    let event_numbers: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();

    let (cells, event_range, value_range) = match data_range(&values) {
        Some(value_range) => {
            let event_range = (0.0, values.len().saturating_sub(1) as f64);
            let event_bins = ((values.len() as f64).sqrt() as usize).max(1);
            debug!(event_bins, value_bins = VALUE_BINS, "binning channel trace");
            let hist = Histogram2d::compute(
                &event_numbers,
                &values,
                (event_bins, VALUE_BINS),
                [event_range, value_range],
            )?;
            (heatmap_cells(&hist), Some(event_range), Some(value_range))
        }
        None => (vec![], None, None),
    };

    let flagged = flagged_events
        .map(|flags| {
            flagged_runs(flags)
                .into_iter()
                .map(|(start, end)| FlaggedSpan {
                    start,
                    end,
                    fill: Fill {
                        color: FLAG_FILL,
                        alpha: FLAG_ALPHA,
                    },
                    stroke: Stroke {
                        color: FLAG_EDGE,
                        width: 1.0,
                    },
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(ChannelPlot {
        title: label.to_string(),
        cells,
        flagged,
        event_range,
        value_range,
    })
}

/// Non-empty cells colored by count relative to the fullest cell
fn heatmap_cells(hist: &Histogram2d) -> Vec<HeatmapCell> {
    let cmap = rainbow_colormap();
    let counts = hist.counts.iter().flatten().copied().filter(|c| *c >= 1.0);
    let Some((lo, hi)) = counts.fold(None, |acc: Option<(f64, f64)>, c| {
        Some(acc.map_or((c, c), |(lo, hi)| (lo.min(c), hi.max(c))))
    }) else {
        return vec![];
    };

    let mut cells = vec![];
    for (i, column) in hist.counts.iter().enumerate() {
        for (j, &count) in column.iter().enumerate() {
            if count < 1.0 {
                continue;
            }
            let t = if hi > lo { (count - lo) / (hi - lo) } else { 0.0 };
            cells.push(HeatmapCell {
                x0: hist.x_edges[i],
                x1: hist.x_edges[i + 1],
                y0: hist.y_edges[j],
                y1: hist.y_edges[j + 1],
                count,
                color: cmap.map_css(t),
            });
        }
    }
    cells
}

/// Inclusive `(first, last)` event indices of every run of `true` values
pub fn flagged_runs(flags: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = vec![];
    let mut start = None;
    for (i, &flag) in flags.iter().enumerate() {
        match (flag, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, flags.len() - 1));
    }
    runs
}
