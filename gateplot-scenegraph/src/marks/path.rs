use super::mark::SceneMark;
use gateplot_common::types::{Fill, Stroke};
use lyon_path::Path;
use serde::{Deserialize, Serialize};

/// A single closed outline, used for polygon gates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScenePathMark {
    pub name: String,
    pub path: Path,
    pub stroke: Stroke,
    pub fill: Option<Fill>,
    pub zindex: Option<i32>,
}

impl From<ScenePathMark> for SceneMark {
    fn from(mark: ScenePathMark) -> Self {
        SceneMark::Path(mark)
    }
}
