use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// A gate axis bound to a measured channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDimension {
    pub id: String,
    #[serde(default)]
    pub compensation_ref: Option<String>,
    #[serde(default)]
    pub transformation_ref: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

/// A gate axis bound to a derived ratio of two channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioDimension {
    pub ratio_ref: String,
    #[serde(default)]
    pub compensation_ref: Option<String>,
    #[serde(default)]
    pub transformation_ref: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

/// Threshold values splitting one axis of a quadrant gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrantDivider {
    pub id: String,
    pub dimension_ref: String,
    #[serde(default)]
    pub compensation_ref: Option<String>,
    #[serde(default)]
    pub transformation_ref: Option<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Dimension {
    Channel(ChannelDimension),
    Ratio(RatioDimension),
    Divider(QuadrantDivider),
}

impl Dimension {
    pub fn channel(id: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Dimension::Channel(ChannelDimension {
            id: id.into(),
            compensation_ref: None,
            transformation_ref: None,
            min,
            max,
        })
    }

    pub fn ratio(ratio_ref: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Dimension::Ratio(RatioDimension {
            ratio_ref: ratio_ref.into(),
            compensation_ref: None,
            transformation_ref: None,
            min,
            max,
        })
    }

    pub fn divider(
        id: impl Into<String>,
        dimension_ref: impl Into<String>,
        values: Vec<f64>,
    ) -> Self {
        Dimension::Divider(QuadrantDivider {
            id: id.into(),
            dimension_ref: dimension_ref.into(),
            compensation_ref: None,
            transformation_ref: None,
            values,
        })
    }

    /// Name of the event column this dimension reads
    pub fn reference(&self) -> &str {
        match self {
            Dimension::Channel(dim) => &dim.id,
            Dimension::Ratio(dim) => &dim.ratio_ref,
            Dimension::Divider(dim) => &dim.dimension_ref,
        }
    }

    pub fn compensation_ref(&self) -> Option<&str> {
        match self {
            Dimension::Channel(dim) => dim.compensation_ref.as_deref(),
            Dimension::Ratio(dim) => dim.compensation_ref.as_deref(),
            Dimension::Divider(dim) => dim.compensation_ref.as_deref(),
        }
    }

    /// Lower and upper gate bounds; dividers carry thresholds instead
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            Dimension::Channel(dim) => (dim.min, dim.max),
            Dimension::Ratio(dim) => (dim.min, dim.max),
            Dimension::Divider(_) => (None, None),
        }
    }

    pub fn is_ratio(&self) -> bool {
        matches!(self, Dimension::Ratio(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleGate {
    pub name: String,
    pub dimensions: Vec<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonGate {
    pub name: String,
    pub dimensions: Vec<Dimension>,
    pub vertices: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipsoidGate {
    pub name: String,
    pub dimensions: Vec<Dimension>,
    pub coordinates: Vec<f64>,
    pub covariance_matrix: Vec<Vec<f64>>,
    pub distance_square: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrantGate {
    pub name: String,
    pub dimensions: Vec<Dimension>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanOperator {
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanGate {
    pub name: String,
    pub operator: BooleanOperator,
    pub gate_refs: Vec<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GateKind {
    Rectangle,
    Polygon,
    Ellipsoid,
    Quadrant,
    Boolean,
}

/// A gate as handed over by the gating context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GateDefinition {
    Rectangle(RectangleGate),
    Polygon(PolygonGate),
    Ellipsoid(EllipsoidGate),
    Quadrant(QuadrantGate),
    Boolean(BooleanGate),
}

impl GateDefinition {
    pub fn name(&self) -> &str {
        match self {
            GateDefinition::Rectangle(gate) => &gate.name,
            GateDefinition::Polygon(gate) => &gate.name,
            GateDefinition::Ellipsoid(gate) => &gate.name,
            GateDefinition::Quadrant(gate) => &gate.name,
            GateDefinition::Boolean(gate) => &gate.name,
        }
    }

    pub fn kind(&self) -> GateKind {
        match self {
            GateDefinition::Rectangle(_) => GateKind::Rectangle,
            GateDefinition::Polygon(_) => GateKind::Polygon,
            GateDefinition::Ellipsoid(_) => GateKind::Ellipsoid,
            GateDefinition::Quadrant(_) => GateKind::Quadrant,
            GateDefinition::Boolean(_) => GateKind::Boolean,
        }
    }

    /// Ordered gate axes. Boolean gates combine other gates and have none.
    pub fn dimensions(&self) -> &[Dimension] {
        match self {
            GateDefinition::Rectangle(gate) => &gate.dimensions,
            GateDefinition::Polygon(gate) => &gate.dimensions,
            GateDefinition::Ellipsoid(gate) => &gate.dimensions,
            GateDefinition::Quadrant(gate) => &gate.dimensions,
            GateDefinition::Boolean(_) => &[],
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, GateDefinition::Boolean(_))
    }
}

/// Bounds of a rectangle gate with at least one open side, or of a 1-D rectangle gate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeGeometry {
    pub minimums: Vec<Option<f64>>,
    pub maximums: Vec<Option<f64>>,
}

/// A rectangle gate closed on all four sides
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectangleGeometry {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonGeometry {
    pub vertices: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EllipsoidGeometry {
    pub center: [f64; 2],
    pub covariance: [[f64; 2]; 2],
    pub distance_square: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadrantGeometry {
    pub dividers: Vec<QuadrantDivider>,
}

/// The drawable shape of a gate. Boolean gates have no shape and are not representable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GateGeometry {
    Range(RangeGeometry),
    Rectangle(RectangleGeometry),
    Polygon(PolygonGeometry),
    Ellipsoid(EllipsoidGeometry),
    Quadrant(QuadrantGeometry),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlottableGate {
    pub name: String,
    pub geometry: GateGeometry,
}

impl TryFrom<&GateDefinition> for PlottableGate {
    type Error = GeometryError;

    fn try_from(gate: &GateDefinition) -> Result<Self, Self::Error> {
        let geometry = match gate {
            GateDefinition::Rectangle(rect) => rectangle_geometry(rect)?,
            GateDefinition::Polygon(poly) => GateGeometry::Polygon(PolygonGeometry {
                vertices: poly.vertices.clone(),
            }),
            GateDefinition::Ellipsoid(ellipse) => ellipsoid_geometry(ellipse)?,
            GateDefinition::Quadrant(quad) => GateGeometry::Quadrant(QuadrantGeometry {
                dividers: quad
                    .dimensions
                    .iter()
                    .filter_map(|dim| match dim {
                        Dimension::Divider(div) => Some(div.clone()),
                        _ => None,
                    })
                    .collect(),
            }),
            GateDefinition::Boolean(boolean) => {
                return Err(GeometryError::UnsupportedGateType {
                    gate: boolean.name.clone(),
                    kind: GateKind::Boolean,
                })
            }
        };

        Ok(Self {
            name: gate.name().to_string(),
            geometry,
        })
    }
}

impl TryFrom<GateDefinition> for PlottableGate {
    type Error = GeometryError;

    fn try_from(gate: GateDefinition) -> Result<Self, Self::Error> {
        PlottableGate::try_from(&gate)
    }
}

/// Rectangle gates may leave any bound open, in which case they are really
/// a set of ranges. Only a 2-D gate bounded on every side is a true rectangle.
fn rectangle_geometry(rect: &RectangleGate) -> Result<GateGeometry, GeometryError> {
    let count = rect.dimensions.len();
    if !(1..=2).contains(&count) {
        return Err(GeometryError::DimensionMismatch {
            gate: rect.name.clone(),
            kind: GateKind::Rectangle,
            count,
        });
    }

    let (minimums, maximums): (Vec<_>, Vec<_>) =
        rect.dimensions.iter().map(|dim| dim.bounds()).unzip();

    match (minimums.as_slice(), maximums.as_slice()) {
        ([Some(x0), Some(y0)], [Some(x1), Some(y1)]) => {
            Ok(GateGeometry::Rectangle(RectangleGeometry {
                min: [*x0, *y0],
                max: [*x1, *y1],
            }))
        }
        _ => Ok(GateGeometry::Range(RangeGeometry { minimums, maximums })),
    }
}

fn ellipsoid_geometry(ellipse: &EllipsoidGate) -> Result<GateGeometry, GeometryError> {
    let invalid = |reason: &str| GeometryError::InvalidEllipsoid {
        gate: ellipse.name.clone(),
        reason: reason.to_string(),
    };

    let center = match ellipse.coordinates.as_slice() {
        [x, y] => [*x, *y],
        _ => return Err(invalid("center must have exactly 2 coordinates")),
    };
    let covariance = match ellipse.covariance_matrix.as_slice() {
        [row0, row1] if row0.len() == 2 && row1.len() == 2 => {
            [[row0[0], row0[1]], [row1[0], row1[1]]]
        }
        _ => return Err(invalid("covariance matrix must be 2x2")),
    };
    if !(ellipse.distance_square >= 0.0 && ellipse.distance_square.is_finite()) {
        return Err(invalid("distance square must be a non-negative number"));
    }

    Ok(GateGeometry::Ellipsoid(EllipsoidGeometry {
        center,
        covariance,
        distance_square: ellipse.distance_square,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(dims: Vec<Dimension>) -> GateDefinition {
        GateDefinition::Rectangle(RectangleGate {
            name: "Rect1".to_string(),
            dimensions: dims,
        })
    }

    #[test]
    fn test_fully_bounded_rectangle() -> Result<(), GeometryError> {
        let gate = rect(vec![
            Dimension::channel("FSC-H", Some(0.0), Some(2.0)),
            Dimension::channel("SSC-H", Some(0.0), Some(4.0)),
        ]);
        let plottable = PlottableGate::try_from(&gate)?;
        assert_eq!(
            plottable.geometry,
            GateGeometry::Rectangle(RectangleGeometry {
                min: [0.0, 0.0],
                max: [2.0, 4.0]
            })
        );
        Ok(())
    }

    #[test]
    fn test_open_rectangle_is_range() -> Result<(), GeometryError> {
        let gate = rect(vec![
            Dimension::channel("FSC-H", Some(1.0), None),
            Dimension::channel("SSC-H", None, Some(5.0)),
        ]);
        let GateGeometry::Range(range) = PlottableGate::try_from(&gate)?.geometry else {
            panic!("expected a range");
        };
        assert_eq!(range.minimums, vec![Some(1.0), None]);
        assert_eq!(range.maximums, vec![None, Some(5.0)]);
        Ok(())
    }

    #[test]
    fn test_1d_rectangle_is_range() -> Result<(), GeometryError> {
        let gate = rect(vec![Dimension::channel("FSC-H", Some(1.0), Some(3.0))]);
        assert!(matches!(
            PlottableGate::try_from(&gate)?.geometry,
            GateGeometry::Range(_)
        ));
        Ok(())
    }

    #[test]
    fn test_boolean_is_not_plottable() {
        let gate = GateDefinition::Boolean(BooleanGate {
            name: "And1".to_string(),
            operator: BooleanOperator::And,
            gate_refs: vec!["Rect1".to_string(), "Poly1".to_string()],
        });
        let err = PlottableGate::try_from(&gate).unwrap_err();
        assert_eq!(
            err,
            GeometryError::UnsupportedGateType {
                gate: "And1".to_string(),
                kind: GateKind::Boolean
            }
        );
        assert_eq!(
            err.to_string(),
            "Plotting boolean gates is not supported (gate `And1`)"
        );
    }

    #[test]
    fn test_ellipsoid_shape_checks() {
        let gate = GateDefinition::Ellipsoid(EllipsoidGate {
            name: "Ellipse1".to_string(),
            dimensions: vec![],
            coordinates: vec![0.0, 0.0],
            covariance_matrix: vec![vec![1.0, 0.0]],
            distance_square: 1.0,
        });
        assert!(matches!(
            PlottableGate::try_from(&gate),
            Err(GeometryError::InvalidEllipsoid { .. })
        ));
    }

    #[test]
    fn test_deserialize_definition() {
        let gate: GateDefinition = serde_json::from_str(
            r#"{
                "type": "quadrant",
                "name": "Quad1",
                "dimensions": [
                    {"type": "divider", "id": "D1", "dimension_ref": "FL2-H", "values": [12.14]},
                    {"type": "divider", "id": "D2", "dimension_ref": "FL4-H", "values": [14.4]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(gate.kind(), GateKind::Quadrant);
        assert_eq!(gate.dimensions()[1].reference(), "FL4-H");
        assert_eq!(gate.dimensions()[0].bounds(), (None, None));
    }
}
