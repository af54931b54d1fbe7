use gateplot_geometry::GateStyle;
use gateplot_scales::{DensityOptions, ScatterBounds};
use serde::{Deserialize, Serialize};

/// Options for [`crate::plot::plot_gate`]. Every field may be omitted in
/// configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    /// Maximum number of events drawn; smaller samples are drawn in full
    pub subsample_count: usize,
    pub random_seed: u64,
    pub bounds: ScatterBounds,
    pub density: DensityOptions,
    pub style: GateStyle,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            subsample_count: 10000,
            random_seed: 1,
            bounds: ScatterBounds::default(),
            density: DensityOptions::default(),
            style: GateStyle::default(),
        }
    }
}
