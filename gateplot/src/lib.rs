pub mod channel;
pub mod config;
pub mod context;
pub mod error;
pub mod labels;
pub mod memory;
pub mod plot;
pub mod surface;

pub use channel::{plot_channel, ChannelPlot, EventTransform};
pub use config::PlotOptions;
pub use context::{CompensationMatrix, EventTable, GatingContext, SampleProvider};
pub use error::GatePlotError;
pub use plot::{plot_gate, plot_histogram, plot_scatter, GateId, GatePlot, PlotData};
pub use surface::{RenderSurface, SceneGraphSurface};
