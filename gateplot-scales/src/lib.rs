pub mod colormap;
pub mod density;
pub mod error;
pub mod extent;
pub mod histogram;
pub mod interpolate;

pub use colormap::{density_colormap, ColorLookupTable};
pub use density::{estimate_density, DensityOptions, DensityScatter, ScatterBounds};
pub use error::ScaleError;
pub use extent::calculate_extent;
pub use histogram::{Histogram, Histogram2d, HistogramBins};
