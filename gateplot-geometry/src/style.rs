use gateplot_common::types::{CssColor, Fill, Stroke};
use serde::{Deserialize, Serialize};

/// Colors and widths used to draw gate boundaries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateStyle {
    pub line_color: CssColor,
    /// Outline color for polygon gates, which tend to sit on dense regions
    pub line_color_contrast: CssColor,
    pub line_width: f32,
    pub fill_color: CssColor,
    pub fill_alpha: f32,
}

impl Default for GateStyle {
    fn default() -> Self {
        Self {
            line_color: CssColor::rgb(31.0 / 255.0, 119.0 / 255.0, 180.0 / 255.0),
            line_color_contrast: CssColor::rgb(115.0 / 255.0, 213.0 / 255.0, 135.0 / 255.0),
            line_width: 3.0,
            fill_color: CssColor::rgb(0.0, 1.0, 0.0),
            fill_alpha: 0.08,
        }
    }
}

impl GateStyle {
    pub fn stroke(&self) -> Stroke {
        Stroke {
            color: self.line_color,
            width: self.line_width,
        }
    }

    pub fn contrast_stroke(&self) -> Stroke {
        Stroke {
            color: self.line_color_contrast,
            width: self.line_width,
        }
    }

    pub fn fill(&self) -> Fill {
        Fill {
            color: self.fill_color,
            alpha: self.fill_alpha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colors() {
        let style = GateStyle::default();
        assert_eq!(style.line_color.to_hex(), "#1f77b4");
        assert_eq!(style.line_color_contrast.to_hex(), "#73d587");
        assert_eq!(style.fill_color.to_hex(), "#00ff00");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let style: GateStyle =
            serde_json::from_str(r#"{"line_width": 1.5, "fill_color": "red"}"#).unwrap();
        assert_eq!(style.line_width, 1.5);
        assert_eq!(style.fill_color.to_hex(), "#ff0000");
        assert_eq!(style.fill_alpha, 0.08);
    }
}
