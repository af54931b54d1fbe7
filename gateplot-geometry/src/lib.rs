pub mod error;
pub mod gates;
pub mod overlay;
pub mod style;

pub use error::GeometryError;
pub use gates::{Dimension, GateDefinition, GateGeometry, GateKind, PlottableGate};
pub use overlay::{resolve_definition, resolve_overlay, DividerAxes, OverlayPrimitive};
pub use style::GateStyle;
