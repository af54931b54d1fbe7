use crate::error::SceneGraphError;
use crate::marks::mark::SceneMark;
use crate::marks::symbol::SceneSymbolMark;
use serde::{Deserialize, Serialize};

/// A single gate plot: axis ranges and labels, stacked titles, and the marks
/// in draw order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneGraph {
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub x_range: Option<[f32; 2]>,
    pub y_range: Option<[f32; 2]>,
    /// Titles from the top down
    pub titles: Vec<String>,
    pub marks: Vec<SceneMark>,
}

impl SceneGraph {
    /// Validate and append a mark on top of the existing ones
    pub fn push_mark(&mut self, mark: impl Into<SceneMark>) -> Result<(), SceneGraphError> {
        let mark = mark.into();
        mark.validate()?;
        self.marks.push(mark);
        Ok(())
    }

    pub fn get_mark(&self, name: &str) -> Option<&SceneMark> {
        self.marks.iter().find(|m| m.name() == name)
    }

    pub fn symbol_marks(&self) -> Vec<&SceneSymbolMark> {
        self.marks
            .iter()
            .filter_map(|m| {
                let SceneMark::Symbol(symbol) = m else {
                    return None;
                };
                Some(symbol)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marks::rule::SceneRuleMark;
    use gateplot_common::types::{Axis, CssColor, Stroke};

    fn rule(name: &str, zindex: Option<i32>) -> SceneRuleMark {
        SceneRuleMark {
            name: name.to_string(),
            len: 1,
            axis: Axis::X,
            location: 1.0.into(),
            stroke: Stroke {
                color: CssColor::rgb(0.0, 0.0, 0.0),
                width: 1.0,
            },
            zindex,
        }
    }

    #[test]
    fn test_push_rejects_invalid_mark() {
        let mut scene = SceneGraph::default();
        let mut bad = rule("bad", None);
        bad.len = 2;
        bad.location = vec![1.0].into();
        assert!(scene.push_mark(bad).is_err());
        assert!(scene.marks.is_empty());
    }

    #[test]
    fn test_get_mark_by_name() -> Result<(), SceneGraphError> {
        let mut scene = SceneGraph::default();
        scene.push_mark(rule("a", Some(1)))?;
        scene.push_mark(rule("b", None))?;
        assert_eq!(scene.get_mark("b").map(|m| m.zindex()), Some(None));
        assert!(scene.get_mark("c").is_none());
        assert!(scene.symbol_marks().is_empty());
        Ok(())
    }
}
