#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScaleError {
    #[error("Cannot compute an extent of empty data without explicit bounds")]
    EmptyData,

    #[error("Length of {name} ({actual}) does not match the expected length ({expected})")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Bin width must be positive and finite, got {0}")]
    InvalidBinWidth(f64),

    #[error("Bin count must be at least 1")]
    ZeroBins,

    #[error("Colormap sample index {index} is out of range for a colormap of {len} entries")]
    InvalidColormapSample { index: usize, len: usize },

    #[error("Colormap samples must be ascending: {0:?}")]
    ColormapSamplesNotAscending(Vec<usize>),

    #[error("Colormap sample list is empty")]
    EmptyColormapSample,
}

impl ScaleError {
    pub(crate) fn check_len(
        name: &'static str,
        expected: usize,
        actual: usize,
    ) -> Result<(), ScaleError> {
        if expected == actual {
            Ok(())
        } else {
            Err(ScaleError::LengthMismatch {
                name,
                expected,
                actual,
            })
        }
    }
}
