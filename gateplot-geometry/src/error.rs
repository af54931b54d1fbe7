use crate::gates::GateKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Plotting {kind} gates is not supported (gate `{gate}`)")]
    UnsupportedGateType { gate: String, kind: GateKind },

    #[error("Gate `{gate}` has {count} dimensions, {kind} gates can be drawn with 1 or 2")]
    DimensionMismatch {
        gate: String,
        kind: GateKind,
        count: usize,
    },

    #[error("Invalid ellipsoid gate `{gate}`: {reason}")]
    InvalidEllipsoid { gate: String, reason: String },
}
