use gateplot::memory::{InMemoryGatingContext, InMemorySample};
use gateplot::{
    plot_gate, CompensationMatrix, EventTable, GateId, GatePlotError, PlotData, PlotOptions,
    SampleProvider, SceneGraphSurface,
};
use gateplot_common::types::Axis;
use gateplot_geometry::gates::{
    BooleanGate, BooleanOperator, EllipsoidGate, PolygonGate, QuadrantGate, RectangleGate,
};
use gateplot_geometry::{Dimension, GateDefinition, OverlayPrimitive};
use gateplot_scenegraph::SceneMark;
use indexmap::indexmap;
use std::cell::Cell;

const EVENTS: usize = 400;

fn sample() -> InMemorySample {
    let fsc: Vec<f64> = (0..EVENTS).map(|i| (i % 40) as f64 * 2.5).collect();
    let ssc: Vec<f64> = (0..EVENTS).map(|i| ((i * 7) % 50) as f64).collect();
    let fl1: Vec<f64> = (0..EVENTS).map(|i| (i % 13) as f64 + 0.5).collect();
    let events = EventTable::new(indexmap! {
        "FSC-H".to_string() => fsc,
        "SSC-H".to_string() => ssc,
        "FL1-H".to_string() => fl1.clone(),
        "FL1Ratio".to_string() => fl1.iter().map(|v| v / 2.0).collect(),
    })
    .unwrap();
    InMemorySample {
        id: "sample_001.fcs".to_string(),
        pnn_labels: vec!["FSC-H".to_string(), "SSC-H".to_string(), "FL1-H".to_string()],
        pns_labels: vec!["".to_string(), "".to_string(), "CD3".to_string()],
        events,
    }
}

/// Delegates to an in-memory sample while counting data access
struct CountingSample {
    inner: InMemorySample,
    subsample_calls: Cell<usize>,
    event_calls: Cell<usize>,
}

impl CountingSample {
    fn new() -> Self {
        Self {
            inner: sample(),
            subsample_calls: Cell::new(0),
            event_calls: Cell::new(0),
        }
    }

    fn data_calls(&self) -> usize {
        self.subsample_calls.get() + self.event_calls.get()
    }
}

impl SampleProvider for CountingSample {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn event_count(&self) -> usize {
        self.inner.event_count()
    }

    fn pnn_labels(&self) -> &[String] {
        self.inner.pnn_labels()
    }

    fn pns_labels(&self) -> &[String] {
        self.inner.pns_labels()
    }

    fn channel_index(&self, label: &str) -> Option<usize> {
        self.inner.channel_index(label)
    }

    fn subsample_indices(&self, count: usize, seed: u64) -> Result<Vec<usize>, GatePlotError> {
        self.subsample_calls.set(self.subsample_calls.get() + 1);
        self.inner.subsample_indices(count, seed)
    }

    fn preprocessed_events(
        &self,
        gate: &GateDefinition,
        compensation: &[&CompensationMatrix],
    ) -> Result<EventTable, GatePlotError> {
        self.event_calls.set(self.event_calls.get() + 1);
        self.inner.preprocessed_events(gate, compensation)
    }
}

fn channels(ids: &[&str]) -> Vec<Dimension> {
    ids.iter().map(|id| Dimension::channel(*id, None, None)).collect()
}

fn context() -> InMemoryGatingContext {
    let mut ctx = InMemoryGatingContext::default();
    ctx.add_gate(
        &["root"],
        GateDefinition::Rectangle(RectangleGate {
            name: "Range1".to_string(),
            dimensions: vec![Dimension::channel("FSC-H", Some(10.0), Some(60.0))],
        }),
    );
    ctx.add_gate(
        &["root", "Range1"],
        GateDefinition::Polygon(PolygonGate {
            name: "Poly1".to_string(),
            dimensions: channels(&["FSC-H", "FL1-H"]),
            vertices: vec![[10.0, 1.0], [60.0, 1.0], [60.0, 10.0]],
        }),
    );
    ctx.add_gate(
        &["root"],
        GateDefinition::Ellipsoid(EllipsoidGate {
            name: "Ellipse1".to_string(),
            dimensions: channels(&["FSC-H", "SSC-H"]),
            coordinates: vec![50.0, 25.0],
            covariance_matrix: vec![vec![4.0, 0.0], vec![0.0, 1.0]],
            distance_square: 4.0,
        }),
    );
    ctx.add_gate(
        &["root"],
        GateDefinition::Quadrant(QuadrantGate {
            name: "Quad1".to_string(),
            dimensions: vec![
                Dimension::divider("D1", "FSC-H", vec![50.0]),
                Dimension::divider("D2", "CD3", vec![6.0]),
            ],
        }),
    );
    ctx.add_gate(
        &["root"],
        GateDefinition::Boolean(BooleanGate {
            name: "And1".to_string(),
            operator: BooleanOperator::And,
            gate_refs: vec!["Poly1".to_string(), "Ellipse1".to_string()],
        }),
    );
    ctx.add_gate(
        &["root"],
        GateDefinition::Quadrant(QuadrantGate {
            name: "Empty1".to_string(),
            dimensions: vec![],
        }),
    );
    ctx.add_gate(
        &["root"],
        GateDefinition::Polygon(PolygonGate {
            name: "Cube1".to_string(),
            dimensions: channels(&["FSC-H", "SSC-H", "FL1-H"]),
            vertices: vec![],
        }),
    );
    ctx.add_gate(
        &["root"],
        GateDefinition::Rectangle(RectangleGate {
            name: "Ratio1".to_string(),
            dimensions: vec![
                Dimension::ratio("FL1Ratio", Some(1.0), Some(3.0)),
                Dimension::channel("SSC-H", Some(5.0), Some(40.0)),
            ],
        }),
    );
    ctx.add_gate(
        &["root"],
        GateDefinition::Rectangle(RectangleGate {
            name: "Fluoro1".to_string(),
            dimensions: vec![Dimension::Channel(gateplot_geometry::gates::ChannelDimension {
                id: "FITC".to_string(),
                compensation_ref: Some("spill".to_string()),
                transformation_ref: None,
                min: Some(2.0),
                max: None,
            })],
        }),
    );
    ctx.compensation_matrices.push(CompensationMatrix {
        id: "spill".to_string(),
        detectors: vec!["FL1-H".to_string()],
        fluorochromes: vec!["FITC".to_string()],
    });
    ctx
}

#[test]
fn test_boolean_gate_fails_without_touching_events() {
    let sample = CountingSample::new();
    let err = plot_gate(
        &GateId::new("And1"),
        &context(),
        &sample,
        &PlotOptions::default(),
        None,
    )
    .unwrap_err();
    assert_eq!(err, GatePlotError::UnsupportedGateType("And1".to_string()));
    assert!(err.is_input_error());
    assert_eq!(sample.subsample_calls.get(), 0);
    assert_eq!(sample.data_calls(), 0);
}

#[test]
fn test_dimension_count_is_checked_before_data() {
    let sample = CountingSample::new();
    let ctx = context();
    let options = PlotOptions::default();

    assert_eq!(
        plot_gate(&GateId::new("Empty1"), &ctx, &sample, &options, None),
        Err(GatePlotError::NoDimensions("Empty1".to_string()))
    );
    assert_eq!(
        plot_gate(&GateId::new("Cube1"), &ctx, &sample, &options, None),
        Err(GatePlotError::UnsupportedDimensionality {
            gate: "Cube1".to_string(),
            count: 3
        })
    );
    assert_eq!(sample.data_calls(), 0);
}

#[test]
fn test_range_gate_is_a_histogram() -> Result<(), GatePlotError> {
    let plot = plot_gate(
        &GateId::new("Range1").with_path(["root"]),
        &context(),
        &sample(),
        &PlotOptions::default(),
        None,
    )?;
    let PlotData::Histogram(hist) = &plot.data else {
        panic!("expected a histogram");
    };
    assert_eq!(hist.x_label, "FSC-H");
    assert_eq!(hist.histogram.total(), EVENTS as u64);
    assert_eq!(hist.histogram.len(), 20);

    let dividers: Vec<_> = plot
        .overlay
        .iter()
        .filter_map(|p| match p {
            OverlayPrimitive::Divider { axis, location, .. } => Some((*axis, *location)),
            _ => None,
        })
        .collect();
    assert_eq!(dividers, vec![(Axis::X, 10.0), (Axis::X, 60.0)]);
    assert_eq!(plot.titles, vec!["sample_001.fcs".to_string(), "Range1".to_string()]);
    Ok(())
}

#[test]
fn test_polygon_gate_scatter_with_labels_and_titles() -> Result<(), GatePlotError> {
    let plot = plot_gate(
        &GateId::new("Poly1").with_path(["root", "Range1"]),
        &context(),
        &sample(),
        &PlotOptions::default(),
        None,
    )?;
    let PlotData::Scatter(scatter) = &plot.data else {
        panic!("expected a scatter");
    };
    assert_eq!(scatter.x_label.as_deref(), Some("FSC-H"));
    assert_eq!(scatter.y_label.as_deref(), Some("CD3 (FL1-H)"));
    assert_eq!(scatter.scatter.len(), EVENTS);
    assert!(scatter
        .scatter
        .density
        .windows(2)
        .all(|w| w[0] <= w[1]));
    assert!(matches!(plot.overlay[..], [OverlayPrimitive::Polygon { .. }]));
    assert_eq!(
        plot.titles,
        vec!["sample_001.fcs".to_string(), "Range1 > Poly1".to_string()]
    );
    Ok(())
}

#[test]
fn test_subsample_and_event_mask() -> Result<(), GatePlotError> {
    let ctx = context();
    let options = PlotOptions {
        subsample_count: 100,
        ..Default::default()
    };
    let gate = GateId::new("Ellipse1");

    let first = plot_gate(&gate, &ctx, &sample(), &options, None)?;
    let second = plot_gate(&gate, &ctx, &sample(), &options, None)?;
    assert_eq!(first, second);
    let PlotData::Scatter(scatter) = &first.data else {
        panic!("expected a scatter");
    };
    assert_eq!(scatter.scatter.len(), 100);

    // Only the first half of the events are parent members
    let mask: Vec<bool> = (0..EVENTS).map(|i| i < EVENTS / 2).collect();
    let masked = plot_gate(&gate, &ctx, &sample(), &options, Some(&mask))?;
    let PlotData::Scatter(masked) = &masked.data else {
        panic!("expected a scatter");
    };
    assert!(masked.scatter.len() < 100);
    assert!(!masked.scatter.is_empty());

    let short_mask = vec![true; 10];
    assert!(matches!(
        plot_gate(&gate, &ctx, &sample(), &options, Some(&short_mask)),
        Err(GatePlotError::MaskLengthMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_ellipse_overlay_size() -> Result<(), GatePlotError> {
    let plot = plot_gate(
        &GateId::new("Ellipse1"),
        &context(),
        &sample(),
        &PlotOptions::default(),
        None,
    )?;
    let [OverlayPrimitive::Ellipse {
        center,
        width,
        height,
        angle,
        ..
    }] = plot.overlay.as_slice()
    else {
        panic!("expected one ellipse");
    };
    assert_eq!(*center, [50.0, 25.0]);
    assert_eq!((*width, *height, *angle), (8.0, 4.0, 0.0));
    Ok(())
}

#[test]
fn test_quadrant_dividers_match_long_label_channel() -> Result<(), GatePlotError> {
    let plot = plot_gate(
        &GateId::new("Quad1"),
        &context(),
        &sample(),
        &PlotOptions::default(),
        None,
    )?;
    let lines: Vec<_> = plot
        .overlay
        .iter()
        .map(|p| match p {
            OverlayPrimitive::Divider { axis, location, .. } => (*axis, *location),
            other => panic!("unexpected primitive {other:?}"),
        })
        .collect();
    assert_eq!(lines, vec![(Axis::X, 50.0), (Axis::Y, 6.0)]);
    Ok(())
}

#[test]
fn test_ratio_and_fluorochrome_labels() -> Result<(), GatePlotError> {
    let ctx = context();
    let ratio = plot_gate(
        &GateId::new("Ratio1"),
        &ctx,
        &sample(),
        &PlotOptions::default(),
        None,
    )?;
    let PlotData::Scatter(scatter) = &ratio.data else {
        panic!("expected a scatter");
    };
    assert_eq!(scatter.x_label.as_deref(), Some("FL1Ratio"));
    assert!(matches!(ratio.overlay[..], [OverlayPrimitive::Rectangle { .. }]));

    // FITC is measured on FL1-H according to the compensation matrix; the
    // sample only has detector columns
    let sample = sample();
    assert!(sample.events.column("FITC").is_none());
    let fluoro = plot_gate(
        &GateId::new("Fluoro1"),
        &ctx,
        &sample,
        &PlotOptions::default(),
        None,
    )?;
    let PlotData::Histogram(hist) = &fluoro.data else {
        panic!("expected a histogram");
    };
    assert_eq!(hist.x_label, "CD3 (FL1-H)");
    assert_eq!(hist.histogram.total(), EVENTS as u64);
    let dividers: Vec<_> = fluoro
        .overlay
        .iter()
        .filter_map(|p| match p {
            OverlayPrimitive::Divider { location, .. } => Some(*location),
            _ => None,
        })
        .collect();
    assert_eq!(dividers, vec![2.0]);
    Ok(())
}

#[test]
fn test_unknown_channel_is_reported() {
    let mut ctx = context();
    ctx.compensation_matrices.clear();
    assert_eq!(
        plot_gate(
            &GateId::new("Fluoro1"),
            &ctx,
            &sample(),
            &PlotOptions::default(),
            None
        ),
        Err(GatePlotError::ReferenceNotFound("FITC".to_string()))
    );
}

#[test]
fn test_render_to_scene_graph() -> Result<(), GatePlotError> {
    let plot = plot_gate(
        &GateId::new("Poly1").with_path(["root", "Range1"]),
        &context(),
        &sample(),
        &PlotOptions::default(),
        None,
    )?;
    let scene = plot.render(SceneGraphSurface::new())?;
    assert_eq!(scene.x_label.as_deref(), Some("FSC-H"));
    assert_eq!(scene.titles.len(), 2);
    assert!(matches!(scene.marks[0], SceneMark::Symbol(_)));
    assert!(matches!(scene.marks[1], SceneMark::Path(_)));
    let symbols = scene.symbol_marks();
    assert_eq!(symbols[0].len as usize, EVENTS);
    Ok(())
}
