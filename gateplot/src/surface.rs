use crate::channel::{FlaggedSpan, HeatmapCell};
use crate::error::GatePlotError;
use gateplot_common::lyon::polygon_path;
use gateplot_common::types::{CssColor, Fill};
use gateplot_common::value::ScalarOrArray;
use gateplot_geometry::OverlayPrimitive;
use gateplot_scales::{DensityScatter, Histogram};
use gateplot_scenegraph::marks::band::SceneBandMark;
use gateplot_scenegraph::marks::ellipse::SceneEllipseMark;
use gateplot_scenegraph::marks::path::ScenePathMark;
use gateplot_scenegraph::marks::rect::SceneRectMark;
use gateplot_scenegraph::marks::rule::SceneRuleMark;
use gateplot_scenegraph::marks::symbol::SceneSymbolMark;
use gateplot_scenegraph::SceneGraph;

/// Something a plot can be drawn onto. Layers arrive bottom to top.
pub trait RenderSurface {
    type Output;

    fn axis_labels(&mut self, x: Option<&str>, y: Option<&str>) -> Result<(), GatePlotError>;

    /// Visible data ranges; `None` lets the surface fit its content
    fn axis_ranges(
        &mut self,
        x: Option<(f64, f64)>,
        y: Option<(f64, f64)>,
    ) -> Result<(), GatePlotError>;

    fn scatter(&mut self, scatter: &DensityScatter) -> Result<(), GatePlotError>;

    /// Histogram bars rising from zero
    fn bars(&mut self, histogram: &Histogram, fill: Fill) -> Result<(), GatePlotError>;

    fn heatmap(&mut self, cells: &[HeatmapCell]) -> Result<(), GatePlotError>;

    fn span(&mut self, span: &FlaggedSpan) -> Result<(), GatePlotError>;

    fn overlay(&mut self, primitive: &OverlayPrimitive) -> Result<(), GatePlotError>;

    /// Titles from the top down
    fn titles(&mut self, titles: &[String]) -> Result<(), GatePlotError>;

    fn finish(self) -> Result<Self::Output, GatePlotError>;
}

/// Draws plots into a [`SceneGraph`]
#[derive(Debug, Clone, Default)]
pub struct SceneGraphSurface {
    scene: SceneGraph,
    overlay_count: usize,
}

impl SceneGraphSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn overlay_name(&mut self, kind: &str) -> String {
        self.overlay_count += 1;
        format!("gate_{kind}_{}", self.overlay_count)
    }
}

fn to_f32(values: &[f64]) -> Vec<f32> {
    values.iter().map(|v| *v as f32).collect()
}

fn range_f32(range: Option<(f64, f64)>) -> Option<[f32; 2]> {
    range.map(|(lo, hi)| [lo as f32, hi as f32])
}

impl RenderSurface for SceneGraphSurface {
    type Output = SceneGraph;

    fn axis_labels(&mut self, x: Option<&str>, y: Option<&str>) -> Result<(), GatePlotError> {
        self.scene.x_label = x.map(str::to_string);
        self.scene.y_label = y.map(str::to_string);
        Ok(())
    }

    fn axis_ranges(
        &mut self,
        x: Option<(f64, f64)>,
        y: Option<(f64, f64)>,
    ) -> Result<(), GatePlotError> {
        self.scene.x_range = range_f32(x);
        self.scene.y_range = range_f32(y);
        Ok(())
    }

    fn scatter(&mut self, scatter: &DensityScatter) -> Result<(), GatePlotError> {
        self.scene.push_mark(SceneSymbolMark {
            name: "events".to_string(),
            len: scatter.len() as u32,
            x: to_f32(&scatter.x).into(),
            y: to_f32(&scatter.y).into(),
            fill: ScalarOrArray::Array(scatter.fill.clone()).compacted(),
            alpha: ScalarOrArray::Array(scatter.alpha.clone()).compacted(),
            radius: scatter.radius as f32,
            radius_dimension: scatter.radius_dimension,
            zindex: None,
        })?;
        Ok(())
    }

    fn bars(&mut self, histogram: &Histogram, fill: Fill) -> Result<(), GatePlotError> {
        self.scene.push_mark(SceneRectMark {
            name: "histogram".to_string(),
            len: histogram.len() as u32,
            x: to_f32(histogram.left_edges()).into(),
            x2: to_f32(histogram.right_edges()).into(),
            y: 0.0.into(),
            y2: histogram
                .counts
                .iter()
                .map(|c| *c as f32)
                .collect::<Vec<_>>()
                .into(),
            fill: fill.color.into(),
            fill_alpha: fill.alpha,
            stroke: None,
            zindex: None,
        })?;
        Ok(())
    }

    fn heatmap(&mut self, cells: &[HeatmapCell]) -> Result<(), GatePlotError> {
        let corners = |f: fn(&HeatmapCell) -> f64| -> ScalarOrArray<f32> {
            cells.iter().map(|c| f(c) as f32).collect::<Vec<_>>().into()
        };
        self.scene.push_mark(SceneRectMark {
            name: "heatmap".to_string(),
            len: cells.len() as u32,
            x: corners(|c| c.x0),
            x2: corners(|c| c.x1),
            y: corners(|c| c.y0),
            y2: corners(|c| c.y1),
            fill: cells.iter().map(|c| c.color).collect::<Vec<CssColor>>().into(),
            fill_alpha: 1.0,
            stroke: None,
            zindex: None,
        })?;
        Ok(())
    }

    fn span(&mut self, span: &FlaggedSpan) -> Result<(), GatePlotError> {
        let name = format!("flagged_{}_{}", span.start, span.end);
        self.scene.push_mark(SceneBandMark {
            name,
            left: Some(span.start as f32),
            right: Some(span.end as f32),
            bottom: None,
            top: None,
            fill: span.fill,
            stroke: Some(span.stroke),
            zindex: None,
        })?;
        Ok(())
    }

    fn overlay(&mut self, primitive: &OverlayPrimitive) -> Result<(), GatePlotError> {
        match primitive {
            OverlayPrimitive::Polygon {
                vertices,
                stroke,
                fill,
            } => {
                let name = self.overlay_name("polygon");
                self.scene.push_mark(ScenePathMark {
                    name,
                    path: polygon_path(vertices),
                    stroke: *stroke,
                    fill: Some(*fill),
                    zindex: None,
                })?;
            }
            OverlayPrimitive::Ellipse {
                center,
                width,
                height,
                angle,
                stroke,
                fill,
            } => {
                let name = self.overlay_name("ellipse");
                self.scene.push_mark(SceneEllipseMark {
                    name,
                    center: [center[0] as f32, center[1] as f32],
                    width: *width as f32,
                    height: *height as f32,
                    angle: *angle as f32,
                    stroke: *stroke,
                    fill: Some(*fill),
                    zindex: None,
                })?;
            }
            OverlayPrimitive::Rectangle {
                center,
                width,
                height,
                stroke,
                fill,
            } => {
                let name = self.overlay_name("rect");
                let (half_w, half_h) = (width / 2.0, height / 2.0);
                self.scene.push_mark(SceneRectMark {
                    name,
                    len: 1,
                    x: ((center[0] - half_w) as f32).into(),
                    x2: ((center[0] + half_w) as f32).into(),
                    y: ((center[1] - half_h) as f32).into(),
                    y2: ((center[1] + half_h) as f32).into(),
                    fill: fill.color.into(),
                    fill_alpha: fill.alpha,
                    stroke: Some(*stroke),
                    zindex: None,
                })?;
            }
            OverlayPrimitive::Divider {
                axis,
                location,
                stroke,
            } => {
                let name = self.overlay_name("divider");
                self.scene.push_mark(SceneRuleMark {
                    name,
                    len: 1,
                    axis: *axis,
                    location: (*location as f32).into(),
                    stroke: *stroke,
                    zindex: None,
                })?;
            }
            OverlayPrimitive::Box {
                left,
                right,
                bottom,
                top,
                fill,
            } => {
                let name = self.overlay_name("box");
                let bound = |v: &Option<f64>| v.map(|v| v as f32);
                self.scene.push_mark(SceneBandMark {
                    name,
                    left: bound(left),
                    right: bound(right),
                    bottom: bound(bottom),
                    top: bound(top),
                    fill: *fill,
                    stroke: None,
                    zindex: None,
                })?;
            }
        }
        Ok(())
    }

    fn titles(&mut self, titles: &[String]) -> Result<(), GatePlotError> {
        self.scene.titles = titles.to_vec();
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, GatePlotError> {
        Ok(self.scene)
    }
}
