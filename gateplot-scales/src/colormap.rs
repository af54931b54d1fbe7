//! Color lookup tables used to paint event density.
//!
//! Stock continuous colormaps lose perceptual contrast at their extremes: the
//! dark blue and dark red ends of jet read as nearly the same darkness. The
//! custom table built here resamples a base colormap at a fixed set of
//! indices, forces full saturation, and pulls each sample's value toward a
//! half-sine envelope so lightness rises toward the middle of the table and
//! falls off at both ends.

use crate::error::ScaleError;
use gateplot_common::types::CssColor;
use lazy_static::lazy_static;
use palette::{Hsv, IntoColor, Lab, Mix, Srgb};
use std::f64::consts::PI;
use std::fmt::Debug;

/// Number of entries in every lookup table produced here
pub const LUT_SIZE: usize = 256;

/// Index at which the triangular value weight peaks
const WEIGHT_PEAK: f64 = 196.0;

/// Base colormap indices resampled for the density colormap
pub const DENSITY_SAMPLE_INDICES: [usize; 33] = [
    0, 4, 8, 12, 24, 36, 48, 60, 72, 80, 92, 100, 108, 116, 124, 132, 139, 147, 155, 159, 163,
    167, 171, 175, 179, 183, 187, 191, 195, 199, 215, 231, 239,
];

lazy_static! {
    static ref DENSITY_COLORMAP: ColorLookupTable =
        equalized_colormap(&DENSITY_SAMPLE_INDICES, &JET);
    static ref RAINBOW_COLORMAP: ColorLookupTable = ColorLookupTable::from_base(&RainbowColormap);
}

/// The perceptually equalized jet table used for density coloring
pub fn density_colormap() -> &'static ColorLookupTable {
    &DENSITY_COLORMAP
}

/// Plain rainbow table used for event/channel heatmaps
pub fn rainbow_colormap() -> &'static ColorLookupTable {
    &RAINBOW_COLORMAP
}

/// A continuous colormap sampled at `len()` evenly spaced positions
pub trait BaseColormap: Debug + Send + Sync {
    fn name(&self) -> &str;

    fn len(&self) -> usize {
        LUT_SIZE
    }

    /// Color at position `index / (len - 1)` along the map
    fn color(&self, index: usize) -> Srgb;
}

/// Piecewise-linear colormap defined by `(x, y_below, y_above)` anchors per channel
#[derive(Debug, Clone, Copy)]
pub struct SegmentedColormap {
    pub name: &'static str,
    pub red: &'static [(f64, f64, f64)],
    pub green: &'static [(f64, f64, f64)],
    pub blue: &'static [(f64, f64, f64)],
}

pub const JET: SegmentedColormap = SegmentedColormap {
    name: "jet",
    red: &[
        (0.0, 0.0, 0.0),
        (0.35, 0.0, 0.0),
        (0.66, 1.0, 1.0),
        (0.89, 1.0, 1.0),
        (1.0, 0.5, 0.5),
    ],
    green: &[
        (0.0, 0.0, 0.0),
        (0.125, 0.0, 0.0),
        (0.375, 1.0, 1.0),
        (0.64, 1.0, 1.0),
        (0.91, 0.0, 0.0),
        (1.0, 0.0, 0.0),
    ],
    blue: &[
        (0.0, 0.5, 0.5),
        (0.11, 1.0, 1.0),
        (0.34, 1.0, 1.0),
        (0.65, 0.0, 0.0),
        (1.0, 0.0, 0.0),
    ],
};

impl SegmentedColormap {
    fn channel_at(segments: &[(f64, f64, f64)], x: f64) -> f64 {
        let Some(first) = segments.first() else {
            return 0.0;
        };
        if x <= first.0 {
            return first.2;
        }
        // First anchor at or beyond x; the value ramps from the previous
        // anchor's right-hand value to this anchor's left-hand value
        match segments.iter().position(|s| s.0 >= x) {
            Some(k) => {
                let (x0, _, y_above) = segments[k - 1];
                let (x1, y_below, _) = segments[k];
                let t = (x - x0) / (x1 - x0);
                (y_above + t * (y_below - y_above)).clamp(0.0, 1.0)
            }
            None => segments[segments.len() - 1].1,
        }
    }
}

impl BaseColormap for SegmentedColormap {
    fn name(&self) -> &str {
        self.name
    }

    fn color(&self, index: usize) -> Srgb {
        let x = index as f64 / (self.len() - 1) as f64;
        Srgb::new(
            Self::channel_at(self.red, x) as f32,
            Self::channel_at(self.green, x) as f32,
            Self::channel_at(self.blue, x) as f32,
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RainbowColormap;

impl BaseColormap for RainbowColormap {
    fn name(&self) -> &str {
        "rainbow"
    }

    fn color(&self, index: usize) -> Srgb {
        let x = index as f64 / (self.len() - 1) as f64;
        let r = (2.0 * x - 0.5).abs();
        let g = (x * PI).sin();
        let b = (x * PI / 2.0).cos();
        Srgb::new(
            r.clamp(0.0, 1.0) as f32,
            g.clamp(0.0, 1.0) as f32,
            b.clamp(0.0, 1.0) as f32,
        )
    }
}

/// A fixed table of colors indexed by a normalized value in [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct ColorLookupTable {
    name: String,
    colors: Vec<Srgb>,
}

impl ColorLookupTable {
    /// Table built by linear interpolation over evenly spaced anchor colors
    pub fn from_anchors(name: impl Into<String>, anchors: &[Srgb], size: usize) -> Self {
        let colors = match anchors {
            [] => vec![Srgb::new(0.0, 0.0, 0.0); size],
            [only] => vec![*only; size],
            _ => {
                let last_anchor = (anchors.len() - 1) as f32;
                (0..size)
                    .map(|k| {
                        let position = if size > 1 {
                            k as f32 / (size - 1) as f32 * last_anchor
                        } else {
                            0.0
                        };
                        let lower = (position.floor() as usize).min(anchors.len() - 1);
                        let upper = (lower + 1).min(anchors.len() - 1);
                        anchors[lower].mix(anchors[upper], position - lower as f32)
                    })
                    .collect()
            }
        };
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Table holding every entry of a base colormap unchanged
    pub fn from_base(base: &dyn BaseColormap) -> Self {
        Self {
            name: base.name().to_string(),
            colors: (0..base.len()).map(|i| base.color(i)).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// Table index for a normalized value; 1.0 lands on the last entry
    pub fn index_of(&self, value: f64) -> usize {
        let n = self.colors.len();
        if n == 0 || !value.is_finite() || value <= 0.0 {
            return 0;
        }
        ((value * n as f64) as usize).min(n - 1)
    }

    pub fn map(&self, value: f64) -> Srgb {
        self.colors
            .get(self.index_of(value))
            .copied()
            .unwrap_or_else(|| Srgb::new(0.0, 0.0, 0.0))
    }

    pub fn map_css(&self, value: f64) -> CssColor {
        let c = self.map(value);
        CssColor([c.red, c.green, c.blue, 1.0])
    }

    /// CIE L* of an entry
    pub fn lightness(&self, index: usize) -> Option<f32> {
        self.colors.get(index).map(|c| {
            let lab: Lab = (*c).into_color();
            lab.l
        })
    }
}

/// Build a contrast-equalized lookup table from `base`.
///
/// Every sampled index is converted to HSV, forced to full saturation, and its
/// value replaced by the mean of the triangularly weighted original value and
/// a half-sine envelope over the base map. The resulting colors become evenly
/// spaced anchors of a 256 entry table.
pub fn generate_custom_colormap(
    sample_indices: &[usize],
    base: &dyn BaseColormap,
) -> Result<ColorLookupTable, ScaleError> {
    if sample_indices.is_empty() {
        return Err(ScaleError::EmptyColormapSample);
    }
    let n = base.len();
    if let Some(&index) = sample_indices.iter().find(|&&i| i >= n) {
        return Err(ScaleError::InvalidColormapSample { index, len: n });
    }
    if sample_indices.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ScaleError::ColormapSamplesNotAscending(
            sample_indices.to_vec(),
        ));
    }
    Ok(equalized_colormap(sample_indices, base))
}

/// Table construction behind [`generate_custom_colormap`] for indices already
/// known to be non-empty, ascending and inside `base`
fn equalized_colormap(sample_indices: &[usize], base: &dyn BaseColormap) -> ColorLookupTable {
    let n = base.len();
    let envelope_step = if n > 1 { PI / (n - 1) as f64 } else { 0.0 };
    let anchors: Vec<Srgb> = sample_indices
        .iter()
        .map(|&i| {
            let hsv: Hsv = base.color(i).into_color();
            let envelope = (i as f64 * envelope_step).sin() * 0.75 + 0.25;
            let weight = (WEIGHT_PEAK - (i as f64 - WEIGHT_PEAK).abs()) / WEIGHT_PEAK;
            let value = (hsv.value as f64 * weight + envelope) / 2.0;
            let rgb: Srgb = Hsv::new(hsv.hue, 1.0, value as f32).into_color();
            rgb
        })
        .collect();

    ColorLookupTable::from_anchors(format!("custom_{}", base.name()), &anchors, LUT_SIZE)
}
