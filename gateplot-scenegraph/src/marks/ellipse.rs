use super::mark::SceneMark;
use crate::error::SceneGraphError;
use gateplot_common::types::{Fill, Stroke};
use serde::{Deserialize, Serialize};

/// A rotated ellipse in data coordinates. `width` and `height` are full axis
/// lengths and `angle` is the counter-clockwise rotation of the width axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneEllipseMark {
    pub name: String,
    pub center: [f32; 2],
    pub width: f32,
    pub height: f32,
    pub angle: f32,
    pub stroke: Stroke,
    pub fill: Option<Fill>,
    pub zindex: Option<i32>,
}

impl SceneEllipseMark {
    pub fn validate(&self) -> Result<(), SceneGraphError> {
        if !(self.width >= 0.0 && self.height >= 0.0) {
            return Err(SceneGraphError::invalid(
                "ellipse",
                &self.name,
                "axis lengths must be non-negative",
            ));
        }
        Ok(())
    }
}

impl From<SceneEllipseMark> for SceneMark {
    fn from(mark: SceneEllipseMark) -> Self {
        SceneMark::Ellipse(mark)
    }
}
