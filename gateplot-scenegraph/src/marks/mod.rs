pub mod band;
pub mod ellipse;
pub mod mark;
pub mod path;
pub mod rect;
pub mod rule;
pub mod symbol;

use crate::error::SceneGraphError;
use gateplot_common::value::ScalarOrArray;

/// Check that a per-instance encoding carries exactly `len` values
pub(crate) fn check_encoding<T: Clone>(
    mark: &'static str,
    name: &str,
    channel: &str,
    value: &ScalarOrArray<T>,
    len: u32,
) -> Result<(), SceneGraphError> {
    match value.array_len() {
        Some(actual) if actual != len as usize => Err(SceneGraphError::invalid(
            mark,
            name,
            format!("`{channel}` has {actual} values, expected {len}"),
        )),
        _ => Ok(()),
    }
}
