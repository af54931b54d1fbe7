use gateplot_geometry::GeometryError;
use gateplot_scales::ScaleError;
use gateplot_scenegraph::SceneGraphError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatePlotError {
    #[error("Gate `{0}` does not reference any dimensions")]
    NoDimensions(String),

    #[error("Gate `{gate}` has {count} dimensions, plotting more than 2 is not supported")]
    UnsupportedDimensionality { gate: String, count: usize },

    #[error("Plotting boolean gates is not allowed (gate `{0}`)")]
    UnsupportedGateType(String),

    #[error("`{0}` is neither a channel of the sample nor a fluorochrome of its compensation matrix")]
    ReferenceNotFound(String),

    #[error("Length of {name} ({actual}) does not match the event count ({expected})")]
    MaskLengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Gate `{0}` was not found")]
    GateNotFound(String),

    #[error("Gate name `{0}` is used more than once, a gate path is required")]
    AmbiguousGate(String),

    #[error(transparent)]
    Scale(#[from] ScaleError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    SceneGraph(#[from] SceneGraphError),

    /// Failure reported by a collaborator such as a sample reader
    #[error("Collaborator error: {0}")]
    Collaborator(String),
}

impl GatePlotError {
    /// Errors caused by the request itself rather than by a collaborator or surface.
    /// These are never worth retrying.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::NoDimensions(_)
            | Self::UnsupportedDimensionality { .. }
            | Self::UnsupportedGateType(_)
            | Self::ReferenceNotFound(_)
            | Self::MaskLengthMismatch { .. }
            | Self::GateNotFound(_)
            | Self::AmbiguousGate(_)
            | Self::Scale(_)
            | Self::Geometry(_) => true,
            Self::SceneGraph(_) | Self::Collaborator(_) => false,
        }
    }

    pub(crate) fn check_mask(
        name: &'static str,
        expected: usize,
        actual: usize,
    ) -> Result<(), GatePlotError> {
        if expected == actual {
            Ok(())
        } else {
            Err(GatePlotError::MaskLengthMismatch {
                name,
                expected,
                actual,
            })
        }
    }
}
