use super::check_encoding;
use super::mark::SceneMark;
use crate::error::SceneGraphError;
use gateplot_common::types::{CssColor, Stroke};
use gateplot_common::value::ScalarOrArray;
use itertools::izip;
use serde::{Deserialize, Serialize};

/// Axis aligned rectangles spanning `x..x2` and `y..y2` in data coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneRectMark {
    pub name: String,
    pub len: u32,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub x2: ScalarOrArray<f32>,
    pub y2: ScalarOrArray<f32>,
    pub fill: ScalarOrArray<CssColor>,
    pub fill_alpha: f32,
    pub stroke: Option<Stroke>,
    pub zindex: Option<i32>,
}

impl SceneRectMark {
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize)
    }

    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize)
    }

    pub fn x2_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x2.as_iter(self.len as usize)
    }

    pub fn y2_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y2.as_iter(self.len as usize)
    }

    pub fn fill_iter(&self) -> Box<dyn Iterator<Item = &CssColor> + '_> {
        self.fill.as_iter(self.len as usize)
    }

    /// Normalized `[x0, y0, x1, y1]` corners with `x0 <= x1` and `y0 <= y1`
    pub fn corners_iter(&self) -> impl Iterator<Item = [f32; 4]> + '_ {
        izip!(self.x_iter(), self.y_iter(), self.x2_iter(), self.y2_iter()).map(
            |(x, y, x2, y2)| [x.min(*x2), y.min(*y2), x.max(*x2), y.max(*y2)],
        )
    }

    pub fn validate(&self) -> Result<(), SceneGraphError> {
        check_encoding("rect", &self.name, "x", &self.x, self.len)?;
        check_encoding("rect", &self.name, "y", &self.y, self.len)?;
        check_encoding("rect", &self.name, "x2", &self.x2, self.len)?;
        check_encoding("rect", &self.name, "y2", &self.y2, self.len)?;
        check_encoding("rect", &self.name, "fill", &self.fill, self.len)
    }
}

impl Default for SceneRectMark {
    fn default() -> Self {
        Self {
            name: "".to_string(),
            len: 1,
            x: ScalarOrArray::Scalar(0.0),
            y: ScalarOrArray::Scalar(0.0),
            x2: ScalarOrArray::Scalar(0.0),
            y2: ScalarOrArray::Scalar(0.0),
            fill: ScalarOrArray::Scalar(CssColor::rgb(0.0, 0.0, 0.0)),
            fill_alpha: 1.0,
            stroke: None,
            zindex: None,
        }
    }
}

impl From<SceneRectMark> for SceneMark {
    fn from(mark: SceneRectMark) -> Self {
        SceneMark::Rect(mark)
    }
}
