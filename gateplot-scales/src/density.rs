use crate::colormap::density_colormap;
use crate::error::ScaleError;
use crate::extent::{calculate_extent, data_range, SCATTER_PAD};
use crate::histogram::Histogram2d;
use crate::interpolate::RegularGrid;
use gateplot_common::types::{Axis, CssColor};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Point radius as a fraction of the larger axis extent
pub const POINT_RADIUS_FRACTION: f64 = 0.003;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityOptions {
    /// Color events by local density, heat-map style
    pub color_density: bool,
    /// Density bin size in units of point radius; larger values give smoother gradients
    pub bin_width: f64,
    /// Color of events outside the highlight mask
    pub neutral_color: CssColor,
    pub highlighted_alpha: f32,
    pub background_alpha: f32,
}

impl Default for DensityOptions {
    fn default() -> Self {
        Self {
            color_density: true,
            bin_width: 4.0,
            neutral_color: CssColor::rgb(211.0 / 255.0, 211.0 / 255.0, 211.0 / 255.0),
            highlighted_alpha: 0.4,
            background_alpha: 0.3,
        }
    }
}

/// Optional explicit axis bounds. Missing bounds come from the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterBounds {
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

/// Scatter points in draw order, each with its fill color and alpha
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityScatter {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Interpolated density of each point, 0 when density coloring is off
    pub density: Vec<f64>,
    pub fill: Vec<CssColor>,
    pub alpha: Vec<f32>,
    pub radius: f64,
    pub radius_dimension: Axis,
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
    /// Density histogram bins along x and y, `None` when density was not binned
    pub density_bins: Option<(usize, usize)>,
}

impl DensityScatter {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Color scatter points by local density and order them for drawing.
///
/// Points are sorted so denser points are drawn last. With a highlight mask,
/// points outside the mask are greyed out and drawn before every highlighted
/// point; relative density order is kept within both groups.
#[tracing::instrument(skip_all, fields(points = x.len()))]
pub fn estimate_density(
    x: &[f64],
    y: &[f64],
    bounds: &ScatterBounds,
    options: &DensityOptions,
    highlight_mask: Option<&[bool]>,
) -> Result<DensityScatter, ScaleError> {
    ScaleError::check_len("y", x.len(), y.len())?;
    if let Some(mask) = highlight_mask {
        ScaleError::check_len("highlight mask", x.len(), mask.len())?;
    }

    let x_range = axis_view(x, bounds.x_min, bounds.x_max)?;
    let y_range = axis_view(y, bounds.y_min, bounds.y_max)?;
    let (radius, radius_dimension) = point_radius(x_range, y_range);

    let (density, order, density_bins) = match (x_range, y_range) {
        (Some(x_view), Some(y_view)) if options.color_density && !x.is_empty() => {
            let (density, bins) = bin_density(x, y, x_view, y_view, options.bin_width)?;
            let order = density_order(&density);
            (density, order, bins)
        }
        _ => (vec![0.0; x.len()], (0..x.len()).collect(), None),
    };

    let draw_order: Vec<usize> = match highlight_mask {
        Some(mask) => order
            .iter()
            .filter(|&&i| !mask[i])
            .chain(order.iter().filter(|&&i| mask[i]))
            .copied()
            .collect(),
        None => order,
    };

    let normalized = normalize(&density);
    let cmap = density_colormap();
    let is_highlighted = |i: usize| highlight_mask.map_or(true, |mask| mask[i]);

    let (fill, alpha): (Vec<CssColor>, Vec<f32>) = draw_order
        .iter()
        .map(|&i| {
            if is_highlighted(i) {
                (cmap.map_css(normalized[i]), options.highlighted_alpha)
            } else {
                (options.neutral_color, options.background_alpha)
            }
        })
        .unzip();

    Ok(DensityScatter {
        x: draw_order.iter().map(|&i| x[i]).collect(),
        y: draw_order.iter().map(|&i| y[i]).collect(),
        density: draw_order.iter().map(|&i| density[i]).collect(),
        fill,
        alpha,
        radius,
        radius_dimension,
        x_range,
        y_range,
        density_bins,
    })
}

/// Padded view of one axis. Without a finite value there is nothing to
/// measure, so only a fully specified pair of bounds yields a view.
fn axis_view(
    data: &[f64],
    d_min: Option<f64>,
    d_max: Option<f64>,
) -> Result<Option<(f64, f64)>, ScaleError> {
    if data_range(data).is_none() {
        return Ok(d_min.zip(d_max));
    }
    calculate_extent(data, d_min, d_max, SCATTER_PAD).map(Some)
}

/// Radius of a point and the axis it is measured along
pub fn point_radius(x_range: Option<(f64, f64)>, y_range: Option<(f64, f64)>) -> (f64, Axis) {
    let x_extent = x_range.map_or(0.0, |(lo, hi)| hi - lo);
    let y_extent = y_range.map_or(0.0, |(lo, hi)| hi - lo);
    if y_extent > x_extent {
        (POINT_RADIUS_FRACTION * y_extent, Axis::Y)
    } else {
        (POINT_RADIUS_FRACTION * x_extent, Axis::X)
    }
}

/// Indices that stably sort `density` ascending
pub fn density_order(density: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..density.len()).collect();
    order.sort_by_key(|&i| OrderedFloat(density[i]));
    order
}

/// Min-max normalize to [0, 1]; constant input maps to 0
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let Some((lo, hi)) = data_range(values) else {
        return vec![0.0; values.len()];
    };
    let span = hi - lo;
    values
        .iter()
        .map(|v| {
            if span > 0.0 && v.is_finite() {
                (v - lo) / span
            } else {
                0.0
            }
        })
        .collect()
}

/// Number of density bins needed to span the whole data range at the
/// resolution requested for the view
fn axis_bin_count(data_span: f64, view_span: f64, bin_count: usize) -> usize {
    let multiplier = if view_span > 0.0 {
        data_span / view_span
    } else {
        1.0
    };
    let count = multiplier * bin_count as f64;
    if count.is_finite() {
        (count as usize).max(1)
    } else {
        1
    }
}

/// Density of every point, bilinearly interpolated from a 2-D histogram
/// whose bins are sized relative to the view
fn bin_density(
    x: &[f64],
    y: &[f64],
    x_view: (f64, f64),
    y_view: (f64, f64),
    bin_width: f64,
) -> Result<(Vec<f64>, Option<(usize, usize)>), ScaleError> {
    if !(bin_width > 0.0 && bin_width.is_finite()) {
        return Err(ScaleError::InvalidBinWidth(bin_width));
    }
    let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) = (data_range(x), data_range(y)) else {
        return Ok((vec![0.0; x.len()], None));
    };

    let bin_count = ((1.0 / (bin_width * POINT_RADIUS_FRACTION)).round() as usize).max(1);
    let x_bins = axis_bin_count(x_hi - x_lo, x_view.1 - x_view.0, bin_count);
    let y_bins = axis_bin_count(y_hi - y_lo, y_view.1 - y_view.0, bin_count);
    debug!(bin_count, x_bins, y_bins, "binning event density");

    // One extra bin of margin on every side keeps edge events inside the
    // interpolation grid
    let x_margin = (x_hi - x_lo) / x_bins as f64;
    let y_margin = (y_hi - y_lo) / y_bins as f64;
    let hist = Histogram2d::compute(
        x,
        y,
        (x_bins, y_bins),
        [
            (x_lo - x_margin, x_hi + x_margin),
            (y_lo - y_margin, y_hi + y_margin),
        ],
    )?;

    let x_centers = hist.x_centers();
    let y_centers = hist.y_centers();
    let grid = RegularGrid::new(&x_centers, &y_centers, &hist.counts)?;
    Ok((grid.interpolate_all(x, y, 0.0), Some((x_bins, y_bins))))
}
