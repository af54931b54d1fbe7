use super::mark::SceneMark;
use crate::error::SceneGraphError;
use gateplot_common::types::{Fill, Stroke};
use serde::{Deserialize, Serialize};

/// A translucent region whose missing sides extend to the edge of the view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneBandMark {
    pub name: String,
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub top: Option<f32>,
    pub fill: Fill,
    pub stroke: Option<Stroke>,
    pub zindex: Option<i32>,
}

impl SceneBandMark {
    pub fn validate(&self) -> Result<(), SceneGraphError> {
        let inverted = |lo: Option<f32>, hi: Option<f32>| matches!((lo, hi), (Some(lo), Some(hi)) if lo > hi);
        if inverted(self.left, self.right) || inverted(self.bottom, self.top) {
            return Err(SceneGraphError::invalid(
                "band",
                &self.name,
                "lower bound exceeds upper bound",
            ));
        }
        Ok(())
    }
}

impl From<SceneBandMark> for SceneMark {
    fn from(mark: SceneBandMark) -> Self {
        SceneMark::Band(mark)
    }
}
