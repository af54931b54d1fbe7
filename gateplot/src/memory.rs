//! In-memory collaborators, for tests and for sessions loaded from JSON

use crate::context::{CompensationMatrix, EventTable, GatingContext, SampleProvider};
use crate::error::GatePlotError;
use crate::plot::GateId;
use gateplot_geometry::GateDefinition;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// A sample whose events are already compensated and transformed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InMemorySample {
    pub id: String,
    pub pnn_labels: Vec<String>,
    #[serde(default)]
    pub pns_labels: Vec<String>,
    /// Channel columns keyed by short label, plus any derived columns such
    /// as ratios
    pub events: EventTable,
}

impl InMemorySample {
    /// Sample without long labels whose columns double as its channels
    pub fn from_events(id: impl Into<String>, events: EventTable) -> Self {
        let pnn_labels: Vec<String> = events.column_names().map(str::to_string).collect();
        Self {
            id: id.into(),
            pns_labels: vec![String::new(); pnn_labels.len()],
            pnn_labels,
            events,
        }
    }

    /// Column of the channel whose short or long label is `label`
    fn channel_column(&self, label: &str) -> Option<&[f64]> {
        let pnn = self.pnn_labels.get(self.channel_index(label)?)?;
        self.events.column(pnn)
    }

    /// A dimension reference is a column name, a channel label, or a
    /// fluorochrome of one of the compensation matrices
    fn column_for(&self, reference: &str, compensation: &[&CompensationMatrix]) -> Option<&[f64]> {
        self.events
            .column(reference)
            .or_else(|| self.channel_column(reference))
            .or_else(|| {
                compensation
                    .iter()
                    .find_map(|matrix| self.channel_column(matrix.detector_for(reference)?))
            })
    }
}

impl SampleProvider for InMemorySample {
    fn id(&self) -> &str {
        &self.id
    }

    fn event_count(&self) -> usize {
        self.events.len()
    }

    fn pnn_labels(&self) -> &[String] {
        &self.pnn_labels
    }

    fn pns_labels(&self) -> &[String] {
        &self.pns_labels
    }

    fn channel_index(&self, label: &str) -> Option<usize> {
        self.pnn_labels.iter().position(|l| l == label).or_else(|| {
            self.pns_labels
                .iter()
                .position(|l| !l.is_empty() && l == label)
        })
    }

    fn subsample_indices(&self, count: usize, seed: u64) -> Result<Vec<usize>, GatePlotError> {
        let event_count = self.event_count();
        if count >= event_count {
            return Ok((0..event_count).collect());
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let mut indices = rand::seq::index::sample(&mut rng, event_count, count).into_vec();
        indices.sort_unstable();
        Ok(indices)
    }

    fn preprocessed_events(
        &self,
        gate: &GateDefinition,
        compensation: &[&CompensationMatrix],
    ) -> Result<EventTable, GatePlotError> {
        let mut columns = IndexMap::new();
        for dim in gate.dimensions() {
            let reference = dim.reference();
            let column = self
                .column_for(reference, compensation)
                .ok_or_else(|| GatePlotError::ReferenceNotFound(reference.to_string()))?;
            columns.insert(reference.to_string(), column.to_vec());
        }
        EventTable::new(columns)
    }
}

/// A gate together with the ancestors it sits under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateEntry {
    /// Ancestor names starting at the root
    #[serde(default)]
    pub path: Vec<String>,
    /// Set for gates that only apply to one sample
    #[serde(default)]
    pub sample_id: Option<String>,
    pub gate: GateDefinition,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryGatingContext {
    pub gates: Vec<GateEntry>,
    #[serde(default)]
    pub compensation_matrices: Vec<CompensationMatrix>,
}

impl InMemoryGatingContext {
    pub fn add_gate(&mut self, path: &[&str], gate: GateDefinition) {
        self.gates.push(GateEntry {
            path: path.iter().map(|s| s.to_string()).collect(),
            sample_id: None,
            gate,
        });
    }

    /// Every gate with its full path, in insertion order
    pub fn gate_ids(&self) -> Vec<GateId> {
        self.gates
            .iter()
            .map(|entry| {
                GateId::new(entry.gate.name()).with_path(entry.path.iter().cloned())
            })
            .collect()
    }
}

impl GatingContext for InMemoryGatingContext {
    fn gate(
        &self,
        name: &str,
        path: Option<&[String]>,
        sample_id: &str,
    ) -> Result<GateDefinition, GatePlotError> {
        let candidates: Vec<&GateEntry> = self
            .gates
            .iter()
            .filter(|entry| entry.gate.name() == name)
            .filter(|entry| path.map_or(true, |p| entry.path == p))
            .collect();

        // A sample-specific gate replaces the template gate of the same position
        let specific: Vec<_> = candidates
            .iter()
            .filter(|entry| entry.sample_id.as_deref() == Some(sample_id))
            .collect();
        let template: Vec<_> = candidates
            .iter()
            .filter(|entry| entry.sample_id.is_none())
            .collect();
        let matches = if specific.is_empty() { template } else { specific };

        match matches.as_slice() {
            [] => Err(GatePlotError::GateNotFound(name.to_string())),
            [entry] => Ok(entry.gate.clone()),
            _ => Err(GatePlotError::AmbiguousGate(name.to_string())),
        }
    }

    fn compensation_matrix(&self, reference: &str) -> Option<&CompensationMatrix> {
        self.compensation_matrices.iter().find(|m| m.id == reference)
    }
}

/// A sample and the gating strategy applied to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub sample: InMemorySample,
    pub gating: InMemoryGatingContext,
}
