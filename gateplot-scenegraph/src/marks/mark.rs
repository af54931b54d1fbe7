use crate::error::SceneGraphError;
use crate::marks::band::SceneBandMark;
use crate::marks::ellipse::SceneEllipseMark;
use crate::marks::path::ScenePathMark;
use crate::marks::rect::SceneRectMark;
use crate::marks::rule::SceneRuleMark;
use crate::marks::symbol::SceneSymbolMark;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneMark {
    Symbol(SceneSymbolMark),
    Rect(SceneRectMark),
    Rule(SceneRuleMark),
    Band(SceneBandMark),
    Path(ScenePathMark),
    Ellipse(SceneEllipseMark),
}

impl SceneMark {
    pub fn name(&self) -> &str {
        match self {
            Self::Symbol(mark) => &mark.name,
            Self::Rect(mark) => &mark.name,
            Self::Rule(mark) => &mark.name,
            Self::Band(mark) => &mark.name,
            Self::Path(mark) => &mark.name,
            Self::Ellipse(mark) => &mark.name,
        }
    }

    pub fn zindex(&self) -> Option<i32> {
        match self {
            Self::Symbol(mark) => mark.zindex,
            Self::Rect(mark) => mark.zindex,
            Self::Rule(mark) => mark.zindex,
            Self::Band(mark) => mark.zindex,
            Self::Path(mark) => mark.zindex,
            Self::Ellipse(mark) => mark.zindex,
        }
    }

    pub fn validate(&self) -> Result<(), SceneGraphError> {
        match self {
            Self::Symbol(mark) => mark.validate(),
            Self::Rect(mark) => mark.validate(),
            Self::Rule(mark) => mark.validate(),
            Self::Band(mark) => mark.validate(),
            Self::Path(_) => Ok(()),
            Self::Ellipse(mark) => mark.validate(),
        }
    }
}
