use super::check_encoding;
use super::mark::SceneMark;
use crate::error::SceneGraphError;
use gateplot_common::types::{Axis, Stroke};
use gateplot_common::value::ScalarOrArray;
use serde::{Deserialize, Serialize};

/// Infinite lines crossing the plot, each placed at `location` along `axis`.
/// A rule on the x axis is a vertical line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneRuleMark {
    pub name: String,
    pub len: u32,
    pub axis: Axis,
    pub location: ScalarOrArray<f32>,
    pub stroke: Stroke,
    pub zindex: Option<i32>,
}

impl SceneRuleMark {
    pub fn validate(&self) -> Result<(), SceneGraphError> {
        check_encoding("rule", &self.name, "location", &self.location, self.len)
    }
}

impl From<SceneRuleMark> for SceneMark {
    fn from(mark: SceneRuleMark) -> Self {
        SceneMark::Rule(mark)
    }
}
