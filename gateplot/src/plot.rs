use crate::config::PlotOptions;
use crate::context::{CompensationMatrix, GatingContext, SampleProvider};
use crate::error::GatePlotError;
use crate::labels::{axis_label, gate_title, AxisLabel};
use crate::surface::RenderSurface;
use gateplot_common::types::{CssColor, Fill};
use gateplot_geometry::{
    resolve_overlay, DividerAxes, GateDefinition, OverlayPrimitive, PlottableGate,
};
use gateplot_scales::{
    estimate_density, DensityOptions, DensityScatter, Histogram, HistogramBins, ScatterBounds,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const EVENT_COUNT_LABEL: &str = "Event Count";

const BAR_COLOR: CssColor = CssColor::rgb(31.0 / 255.0, 119.0 / 255.0, 180.0 / 255.0);
const BAR_ALPHA: f32 = 0.5;

/// A gate by name, plus its ancestor path when the name alone is ambiguous
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateId {
    pub name: String,
    #[serde(default)]
    pub path: Option<Vec<String>>,
}

impl GateId {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.path = Some(path.into_iter().map(Into::into).collect());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramPlot {
    pub histogram: Histogram,
    pub x_label: String,
    pub fill: Fill,
}

impl HistogramPlot {
    fn draw<S: RenderSurface>(&self, surface: &mut S) -> Result<(), GatePlotError> {
        surface.axis_labels(Some(&self.x_label), Some(EVENT_COUNT_LABEL))?;
        let y_max = self.histogram.counts.iter().max().copied().unwrap_or(0);
        surface.axis_ranges(None, Some((0.0, y_max as f64)))?;
        surface.bars(&self.histogram, self.fill)
    }

    pub fn render<S: RenderSurface>(&self, mut surface: S) -> Result<S::Output, GatePlotError> {
        self.draw(&mut surface)?;
        surface.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPlot {
    pub scatter: DensityScatter,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

impl ScatterPlot {
    fn draw<S: RenderSurface>(&self, surface: &mut S) -> Result<(), GatePlotError> {
        surface.axis_labels(self.x_label.as_deref(), self.y_label.as_deref())?;
        surface.axis_ranges(self.scatter.x_range, self.scatter.y_range)?;
        surface.scatter(&self.scatter)
    }

    pub fn render<S: RenderSurface>(&self, mut surface: S) -> Result<S::Output, GatePlotError> {
        self.draw(&mut surface)?;
        surface.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlotData {
    Histogram(HistogramPlot),
    Scatter(ScatterPlot),
}

/// Everything needed to draw one gate: the events, the gate boundary on top
/// of them, and the titles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatePlot {
    pub data: PlotData,
    pub overlay: Vec<OverlayPrimitive>,
    /// Sample id first, then the gate path
    pub titles: Vec<String>,
}

impl GatePlot {
    pub fn render<S: RenderSurface>(&self, mut surface: S) -> Result<S::Output, GatePlotError> {
        match &self.data {
            PlotData::Histogram(plot) => plot.draw(&mut surface)?,
            PlotData::Scatter(plot) => plot.draw(&mut surface)?,
        }
        for primitive in &self.overlay {
            surface.overlay(primitive)?;
        }
        surface.titles(&self.titles)?;
        surface.finish()
    }
}

/// Histogram of 1-D data with bars drawn from zero
#[tracing::instrument(skip_all, fields(events = x.len()))]
pub fn plot_histogram(
    x: &[f64],
    x_label: &str,
    bins: HistogramBins,
) -> Result<HistogramPlot, GatePlotError> {
    let histogram = Histogram::compute(x, bins)?;
    debug!(bins = histogram.len(), "computed histogram");
    Ok(HistogramPlot {
        histogram,
        x_label: x_label.to_string(),
        fill: Fill {
            color: BAR_COLOR,
            alpha: BAR_ALPHA,
        },
    })
}

/// Density colored scatter of two arrays.
///
/// `event_mask` drops events before anything else is computed, so axis
/// bounds and density only reflect the kept events. `highlight_mask` keeps
/// every event but greys out the ones it excludes.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(skip_all, fields(events = x.len()))]
pub fn plot_scatter(
    x: &[f64],
    y: &[f64],
    x_label: Option<&str>,
    y_label: Option<&str>,
    event_mask: Option<&[bool]>,
    highlight_mask: Option<&[bool]>,
    bounds: &ScatterBounds,
    density: &DensityOptions,
) -> Result<ScatterPlot, GatePlotError> {
    GatePlotError::check_mask("y", x.len(), y.len())?;
    if let Some(mask) = highlight_mask {
        GatePlotError::check_mask("highlight mask", x.len(), mask.len())?;
    }

    let scatter = match event_mask {
        Some(mask) => {
            GatePlotError::check_mask("event mask", x.len(), mask.len())?;
            let keep = |values: &[f64]| -> Vec<f64> {
                values
                    .iter()
                    .zip(mask)
                    .filter_map(|(v, keep)| keep.then_some(*v))
                    .collect()
            };
            let highlight: Option<Vec<bool>> = highlight_mask.map(|h| {
                h.iter()
                    .zip(mask)
                    .filter_map(|(v, keep)| keep.then_some(*v))
                    .collect()
            });
            estimate_density(&keep(x), &keep(y), bounds, density, highlight.as_deref())?
        }
        None => estimate_density(x, y, bounds, density, highlight_mask)?,
    };

    Ok(ScatterPlot {
        scatter,
        x_label: x_label.map(str::to_string),
        y_label: y_label.map(str::to_string),
    })
}

/// Plot the events of `sample` on the axes of a gate and draw the gate on
/// top. One dimensional gates become histograms, two dimensional gates
/// density scatters.
///
/// `event_mask` restricts the plot to a subset of events, typically the
/// members of the gate's parent.
#[tracing::instrument(skip_all, fields(gate = %gate_id.name))]
pub fn plot_gate<C, S>(
    gate_id: &GateId,
    context: &C,
    sample: &S,
    options: &PlotOptions,
    event_mask: Option<&[bool]>,
) -> Result<GatePlot, GatePlotError>
where
    C: GatingContext + ?Sized,
    S: SampleProvider + ?Sized,
{
    let gate = context.gate(&gate_id.name, gate_id.path.as_deref(), sample.id())?;
    if gate.is_boolean() {
        return Err(GatePlotError::UnsupportedGateType(gate.name().to_string()));
    }

    let dimensions = gate.dimensions();
    match dimensions.len() {
        0 => return Err(GatePlotError::NoDimensions(gate.name().to_string())),
        1 | 2 => {}
        count => {
            return Err(GatePlotError::UnsupportedDimensionality {
                gate: gate.name().to_string(),
                count,
            })
        }
    }
    debug!(kind = %gate.kind(), dimensions = dimensions.len(), "plotting gate");

    let labels = dimensions
        .iter()
        .map(|dim| axis_label(dim, context, sample))
        .collect::<Result<Vec<AxisLabel>, _>>()?;

    let rows = plotted_rows(sample, options, event_mask)?;
    debug!(rows = rows.len(), "selected events");
    let compensation: Vec<&CompensationMatrix> = dimensions
        .iter()
        .filter_map(|dim| context.compensation_matrix(dim.compensation_ref()?))
        .collect();
    let events = sample.preprocessed_events(&gate, &compensation)?;
    let x = events.select(dimensions[0].reference(), &rows)?;

    let data = match dimensions.get(1) {
        None => PlotData::Histogram(plot_histogram(
            &x,
            &labels[0].text,
            HistogramBins::Sqrt,
        )?),
        Some(y_dim) => {
            let y = events.select(y_dim.reference(), &rows)?;
            PlotData::Scatter(plot_scatter(
                &x,
                &y,
                Some(labels[0].text.as_str()),
                Some(labels[1].text.as_str()),
                None,
                None,
                &options.bounds,
                &options.density,
            )?)
        }
    };

    let overlay = gate_overlay(&gate, &labels, options)?;
    let titles = vec![
        sample.id().to_string(),
        gate_title(&gate_id.name, gate_id.path.as_deref()),
    ];

    Ok(GatePlot {
        data,
        overlay,
        titles,
    })
}

/// Subsampled rows, restricted to `event_mask` when given
fn plotted_rows<S: SampleProvider + ?Sized>(
    sample: &S,
    options: &PlotOptions,
    event_mask: Option<&[bool]>,
) -> Result<Vec<usize>, GatePlotError> {
    if let Some(mask) = event_mask {
        GatePlotError::check_mask("event mask", sample.event_count(), mask.len())?;
    }
    let mut rows = sample.subsample_indices(options.subsample_count, options.random_seed)?;
    rows.sort_unstable();
    if let Some(mask) = event_mask {
        rows.retain(|&row| mask.get(row).copied().unwrap_or(false));
    }
    Ok(rows)
}

/// Quadrant dividers may name either the dimension reference or the channel
/// it resolved to
fn gate_overlay(
    gate: &GateDefinition,
    labels: &[AxisLabel],
    options: &PlotOptions,
) -> Result<Vec<OverlayPrimitive>, GatePlotError> {
    let axis_names = |i: usize| -> Vec<String> {
        let reference = gate.dimensions().get(i).map(|dim| dim.reference().to_string());
        let pnn = labels.get(i).and_then(|label| label.pnn.clone());
        reference.into_iter().chain(pnn).collect()
    };
    let axes = DividerAxes::new(axis_names(0), axis_names(1));
    let plottable = PlottableGate::try_from(gate)?;
    Ok(resolve_overlay(&plottable, &axes, &options.style)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_histogram_labels_and_alpha() -> Result<(), GatePlotError> {
        let data: Vec<f64> = (0..16).map(|i| i as f64).collect();
        let plot = plot_histogram(&data, "FSC-H", HistogramBins::Sqrt)?;
        assert_eq!(plot.histogram.len(), 4);
        assert_eq!(plot.histogram.total(), 16);
        assert_approx_eq!(f32, plot.fill.alpha, 0.5);
        Ok(())
    }

    #[test]
    fn test_event_mask_filters_before_density() -> Result<(), GatePlotError> {
        let x = vec![0.0, 1.0, 2.0, 100.0];
        let y = vec![0.0, 1.0, 2.0, 100.0];
        let mask = vec![true, true, true, false];
        let plot = plot_scatter(
            &x,
            &y,
            None,
            None,
            Some(&mask),
            None,
            &ScatterBounds::default(),
            &DensityOptions::default(),
        )?;
        assert_eq!(plot.scatter.len(), 3);
        let (lo, hi) = plot.scatter.x_range.unwrap();
        assert_approx_eq!(f64, lo, -0.04);
        assert_approx_eq!(f64, hi, 2.04);
        Ok(())
    }

    #[test]
    fn test_highlight_mask_is_filtered_with_events() -> Result<(), GatePlotError> {
        let x = vec![0.0, 1.0, 2.0];
        let y = vec![0.0, 1.0, 2.0];
        let events = vec![true, false, true];
        let highlight = vec![false, true, true];
        let plot = plot_scatter(
            &x,
            &y,
            Some("x"),
            Some("y"),
            Some(&events),
            Some(&highlight),
            &ScatterBounds::default(),
            &DensityOptions::default(),
        )?;
        // event 0 is greyed out and drawn first, event 2 keeps its color
        assert_eq!(plot.scatter.x, vec![0.0, 2.0]);
        assert_eq!(plot.scatter.alpha, vec![0.3, 0.4]);
        Ok(())
    }

    #[test]
    fn test_all_nan_channel_renders_empty_axes() -> Result<(), GatePlotError> {
        let plot = plot_scatter(
            &[f64::NAN; 3],
            &[f64::NAN; 3],
            Some("FL1-H"),
            Some("FL2-H"),
            None,
            None,
            &ScatterBounds::default(),
            &DensityOptions::default(),
        )?;
        assert_eq!(plot.scatter.x_range, None);
        assert_eq!(plot.scatter.y_range, None);
        let scene = plot.render(crate::surface::SceneGraphSurface::new())?;
        assert_eq!(scene.x_range, None);
        assert_eq!(scene.x_label.as_deref(), Some("FL1-H"));
        Ok(())
    }

    #[test]
    fn test_scatter_length_checks() {
        let err = plot_scatter(
            &[1.0, 2.0],
            &[1.0],
            None,
            None,
            None,
            None,
            &ScatterBounds::default(),
            &DensityOptions::default(),
        )
        .unwrap_err();
        assert!(err.is_input_error());
    }
}
