use crate::error::GeometryError;
use crate::gates::{
    EllipsoidGeometry, GateDefinition, GateGeometry, PlottableGate, QuadrantGeometry,
    RangeGeometry, RectangleGeometry,
};
use crate::style::GateStyle;
use gateplot_common::types::{Axis, Fill, Stroke};
use nalgebra::Matrix2;
use serde::Serialize;
use tracing::debug;

/// Relative tolerance under which two eigenvalues describe a circle
const CIRCLE_TOLERANCE: f64 = 1e-12;

/// A drawable piece of a gate boundary, in data coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverlayPrimitive {
    Polygon {
        vertices: Vec<[f64; 2]>,
        stroke: Stroke,
        fill: Fill,
    },
    /// `width` and `height` are full axis lengths, `angle` is in radians
    Ellipse {
        center: [f64; 2],
        width: f64,
        height: f64,
        angle: f64,
        stroke: Stroke,
        fill: Fill,
    },
    Rectangle {
        center: [f64; 2],
        width: f64,
        height: f64,
        stroke: Stroke,
        fill: Fill,
    },
    /// Infinite line perpendicular to `axis` at `location`
    Divider {
        axis: Axis,
        location: f64,
        stroke: Stroke,
    },
    /// Translucent region, open on any side whose bound is `None`
    Box {
        left: Option<f64>,
        right: Option<f64>,
        bottom: Option<f64>,
        top: Option<f64>,
        fill: Fill,
    },
}

/// Names under which each plotted axis may be referenced by quadrant dividers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DividerAxes {
    pub x: Vec<String>,
    pub y: Vec<String>,
}

impl DividerAxes {
    pub fn new(x: impl IntoIterator<Item = String>, y: impl IntoIterator<Item = String>) -> Self {
        Self {
            x: x.into_iter().collect(),
            y: y.into_iter().collect(),
        }
    }

    /// Axes named after the gate's own dimension references
    pub fn from_definition(gate: &GateDefinition) -> Self {
        let mut refs = gate.dimensions().iter().map(|dim| dim.reference().to_string());
        Self::new(refs.next(), refs.next())
    }

    fn axis_of(&self, reference: &str) -> Option<Axis> {
        if self.x.iter().any(|name| name == reference) {
            Some(Axis::X)
        } else if self.y.iter().any(|name| name == reference) {
            Some(Axis::Y)
        } else {
            None
        }
    }
}

/// Overlay primitives reproducing the boundary of `gate`
#[tracing::instrument(skip_all, fields(gate = %gate.name))]
pub fn resolve_overlay(
    gate: &PlottableGate,
    axes: &DividerAxes,
    style: &GateStyle,
) -> Result<Vec<OverlayPrimitive>, GeometryError> {
    let primitives = match &gate.geometry {
        GateGeometry::Range(range) => range_overlay(range, style),
        GateGeometry::Rectangle(rect) => vec![rectangle_overlay(rect, style)],
        GateGeometry::Polygon(poly) => vec![OverlayPrimitive::Polygon {
            vertices: poly.vertices.clone(),
            stroke: style.contrast_stroke(),
            fill: style.fill(),
        }],
        GateGeometry::Ellipsoid(ellipse) => vec![ellipse_overlay(&gate.name, ellipse, style)?],
        GateGeometry::Quadrant(quad) => quadrant_overlay(quad, axes, style),
    };
    debug!("resolved {} overlay primitives", primitives.len());
    Ok(primitives)
}

/// Convert and resolve a gate definition in one step, matching dividers
/// against the definition's own dimension references
pub fn resolve_definition(
    gate: &GateDefinition,
    style: &GateStyle,
) -> Result<Vec<OverlayPrimitive>, GeometryError> {
    let plottable = PlottableGate::try_from(gate)?;
    resolve_overlay(&plottable, &DividerAxes::from_definition(gate), style)
}

fn range_overlay(range: &RangeGeometry, style: &GateStyle) -> Vec<OverlayPrimitive> {
    let bound = |bounds: &[Option<f64>], i: usize| bounds.get(i).copied().flatten();
    let (left, right) = (bound(&range.minimums, 0), bound(&range.maximums, 0));
    let (bottom, top) = (bound(&range.minimums, 1), bound(&range.maximums, 1));

    let x_lines = [left, right].into_iter().flatten().map(|location| (Axis::X, location));
    let y_lines = [bottom, top].into_iter().flatten().map(|location| (Axis::Y, location));

    let mut primitives: Vec<_> = x_lines
        .chain(y_lines)
        .map(|(axis, location)| OverlayPrimitive::Divider {
            axis,
            location,
            stroke: style.stroke(),
        })
        .collect();

    primitives.push(OverlayPrimitive::Box {
        left,
        right,
        bottom,
        top,
        fill: style.fill(),
    });
    primitives
}

fn rectangle_overlay(rect: &RectangleGeometry, style: &GateStyle) -> OverlayPrimitive {
    OverlayPrimitive::Rectangle {
        center: [
            (rect.min[0] + rect.max[0]) / 2.0,
            (rect.min[1] + rect.max[1]) / 2.0,
        ],
        width: rect.max[0] - rect.min[0],
        height: rect.max[1] - rect.min[1],
        stroke: style.stroke(),
        fill: style.fill(),
    }
}

fn ellipse_overlay(
    name: &str,
    ellipse: &EllipsoidGeometry,
    style: &GateStyle,
) -> Result<OverlayPrimitive, GeometryError> {
    let [[a, b], [c, d]] = ellipse.covariance;
    if ![a, b, c, d].iter().all(|v| v.is_finite()) {
        return Err(GeometryError::InvalidEllipsoid {
            gate: name.to_string(),
            reason: "covariance matrix contains non-finite values".to_string(),
        });
    }

    let eigen = Matrix2::new(a, b, c, d).symmetric_eigen();

    // Descending by eigenvalue. sort_by is stable so ties keep solver order.
    let mut order = [0usize, 1];
    order.sort_by(|&i, &j| eigen.eigenvalues[j].total_cmp(&eigen.eigenvalues[i]));
    let [major, minor] = order;

    // Round-off can push a zero eigenvalue slightly negative
    let major_value = eigen.eigenvalues[major].max(0.0);
    let minor_value = eigen.eigenvalues[minor].max(0.0);

    let angle = if major_value - minor_value <= CIRCLE_TOLERANCE * major_value.abs().max(1.0) {
        0.0
    } else {
        let vx = eigen.eigenvectors[(0, major)];
        let vy = eigen.eigenvectors[(1, major)];
        let (vx, vy) = if vx < 0.0 || (vx == 0.0 && vy < 0.0) {
            (-vx, -vy)
        } else {
            (vx, vy)
        };
        vy.atan2(vx)
    };

    Ok(OverlayPrimitive::Ellipse {
        center: ellipse.center,
        width: 2.0 * (major_value * ellipse.distance_square).sqrt(),
        height: 2.0 * (minor_value * ellipse.distance_square).sqrt(),
        angle,
        stroke: style.stroke(),
        fill: style.fill(),
    })
}

fn quadrant_overlay(
    quad: &QuadrantGeometry,
    axes: &DividerAxes,
    style: &GateStyle,
) -> Vec<OverlayPrimitive> {
    quad.dividers
        .iter()
        .filter_map(|div| {
            let axis = axes.axis_of(&div.dimension_ref);
            if axis.is_none() {
                debug!("divider {} matches neither plotted axis", div.id);
            }
            axis.map(|axis| (axis, div))
        })
        .flat_map(|(axis, div)| {
            div.values.iter().map(move |&location| OverlayPrimitive::Divider {
                axis,
                location,
                stroke: style.stroke(),
            })
        })
        .collect()
}
