use super::check_encoding;
use super::mark::SceneMark;
use crate::error::SceneGraphError;
use gateplot_common::types::{Axis, CssColor};
use gateplot_common::value::ScalarOrArray;
use itertools::izip;
use serde::{Deserialize, Serialize};

/// Filled circles in data coordinates.
///
/// `radius` is measured in data units along `radius_dimension`, so a renderer
/// with different x and y scales draws the circles as ellipses in data space
/// and as round dots on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneSymbolMark {
    pub name: String,
    pub len: u32,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub fill: ScalarOrArray<CssColor>,
    pub alpha: ScalarOrArray<f32>,
    pub radius: f32,
    pub radius_dimension: Axis,
    pub zindex: Option<i32>,
}

impl SceneSymbolMark {
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize)
    }

    pub fn x_vec(&self) -> Vec<f32> {
        self.x.as_vec(self.len as usize)
    }

    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize)
    }

    pub fn y_vec(&self) -> Vec<f32> {
        self.y.as_vec(self.len as usize)
    }

    pub fn fill_iter(&self) -> Box<dyn Iterator<Item = &CssColor> + '_> {
        self.fill.as_iter(self.len as usize)
    }

    pub fn fill_vec(&self) -> Vec<CssColor> {
        self.fill.as_vec(self.len as usize)
    }

    pub fn alpha_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.alpha.as_iter(self.len as usize)
    }

    /// Fill color of each point with its alpha folded in, in draw order
    pub fn rgba_iter(&self) -> impl Iterator<Item = [f32; 4]> + '_ {
        izip!(self.fill_iter(), self.alpha_iter()).map(|(fill, alpha)| fill.with_alpha(*alpha).0)
    }

    pub fn validate(&self) -> Result<(), SceneGraphError> {
        check_encoding("symbol", &self.name, "x", &self.x, self.len)?;
        check_encoding("symbol", &self.name, "y", &self.y, self.len)?;
        check_encoding("symbol", &self.name, "fill", &self.fill, self.len)?;
        check_encoding("symbol", &self.name, "alpha", &self.alpha, self.len)?;
        if !(self.radius >= 0.0) {
            return Err(SceneGraphError::invalid(
                "symbol",
                &self.name,
                format!("radius must be non-negative, got {}", self.radius),
            ));
        }
        Ok(())
    }
}

impl Default for SceneSymbolMark {
    fn default() -> Self {
        Self {
            name: "".to_string(),
            len: 1,
            x: ScalarOrArray::Scalar(0.0),
            y: ScalarOrArray::Scalar(0.0),
            fill: ScalarOrArray::Scalar(CssColor::rgb(0.0, 0.0, 0.0)),
            alpha: ScalarOrArray::Scalar(1.0),
            radius: 1.0,
            radius_dimension: Axis::X,
            zindex: None,
        }
    }
}

impl From<SceneSymbolMark> for SceneMark {
    fn from(mark: SceneSymbolMark) -> Self {
        SceneMark::Symbol(mark)
    }
}
