//! Collaborators a gate plot is drawn from.
//!
//! Parsing, gating-strategy resolution and compensation math all live outside
//! this crate. Implementations hand over already preprocessed values.

use crate::error::GatePlotError;
use gateplot_geometry::GateDefinition;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Resolves gates and compensation matrices of a gating strategy
pub trait GatingContext {
    /// Gate `name`, disambiguated by its ancestor `path` when names repeat.
    /// Sample-specific gates are looked up under `sample_id`.
    fn gate(
        &self,
        name: &str,
        path: Option<&[String]>,
        sample_id: &str,
    ) -> Result<GateDefinition, GatePlotError>;

    fn compensation_matrix(&self, reference: &str) -> Option<&CompensationMatrix>;
}

/// Event data and channel metadata of one sample
pub trait SampleProvider {
    fn id(&self) -> &str;

    fn event_count(&self) -> usize;

    /// Short channel labels ($PnN)
    fn pnn_labels(&self) -> &[String];

    /// Long channel labels ($PnS), empty strings where unset
    fn pns_labels(&self) -> &[String];

    /// Index of the channel whose short or long label is `label`
    fn channel_index(&self, label: &str) -> Option<usize>;

    /// Up to `count` event indices, sorted. The same seed always yields the same indices.
    fn subsample_indices(&self, count: usize, seed: u64) -> Result<Vec<usize>, GatePlotError>;

    /// Compensated and transformed events, with one column per dimension
    /// reference of `gate`. `compensation` holds the matrices the gate's
    /// dimensions refer to; a reference naming one of their fluorochromes
    /// reads the detector channel measuring it.
    fn preprocessed_events(
        &self,
        gate: &GateDefinition,
        compensation: &[&CompensationMatrix],
    ) -> Result<EventTable, GatePlotError>;
}

/// Spillover matrix metadata; only the channel naming is needed for plotting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationMatrix {
    pub id: String,
    /// Detector ($PnN) names, in matrix order
    pub detectors: Vec<String>,
    /// Fluorochrome names, parallel to `detectors`
    pub fluorochromes: Vec<String>,
}

impl CompensationMatrix {
    /// Detector measuring `fluorochrome`
    pub fn detector_for(&self, fluorochrome: &str) -> Option<&str> {
        let i = self.fluorochromes.iter().position(|f| f == fluorochrome)?;
        self.detectors.get(i).map(String::as_str)
    }
}

/// Column-oriented events. Every column has one value per event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, Vec<f64>>", into = "IndexMap<String, Vec<f64>>")]
pub struct EventTable {
    columns: IndexMap<String, Vec<f64>>,
    len: usize,
}

impl EventTable {
    pub fn new(columns: IndexMap<String, Vec<f64>>) -> Result<Self, GatePlotError> {
        let len = columns.values().next().map_or(0, Vec::len);
        if let Some((name, column)) = columns.iter().find(|(_, c)| c.len() != len) {
            return Err(GatePlotError::Collaborator(format!(
                "event column `{name}` has {} values, expected {len}",
                column.len()
            )));
        }
        Ok(Self { columns, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Values of column `name` at the given rows
    pub fn select(&self, name: &str, rows: &[usize]) -> Result<Vec<f64>, GatePlotError> {
        let column = self
            .column(name)
            .ok_or_else(|| GatePlotError::ReferenceNotFound(name.to_string()))?;
        rows.iter()
            .map(|&row| {
                column.get(row).copied().ok_or_else(|| {
                    GatePlotError::Collaborator(format!(
                        "event {row} is out of range for {} events",
                        self.len
                    ))
                })
            })
            .collect()
    }
}

impl TryFrom<IndexMap<String, Vec<f64>>> for EventTable {
    type Error = GatePlotError;

    fn try_from(columns: IndexMap<String, Vec<f64>>) -> Result<Self, Self::Error> {
        EventTable::new(columns)
    }
}

impl From<EventTable> for IndexMap<String, Vec<f64>> {
    fn from(table: EventTable) -> Self {
        table.columns
    }
}
