//! Serializable figure snapshots and their versioned JSON contract.

use serde::{Deserialize, Serialize};

use crate::core::grid::AxesPosition;
use crate::core::kind::DatasetKind;
use crate::core::style::StyleOptions;
use crate::error::{PlotError, PlotResult};
use crate::render::AxesSurface;

use super::{AxesId, AxesManager, AxesSettings, Layer};

pub const FIGURE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable description of one layer; arrays are summarized by shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    pub kind: DatasetKind,
    pub layer_name: String,
    pub names: Vec<String>,
    pub shapes: Vec<Vec<usize>>,
    pub style: StyleOptions,
}

impl LayerSnapshot {
    #[must_use]
    pub fn from_layer(layer: &Layer) -> Self {
        let dataset = layer.dataset();
        Self {
            kind: dataset.kind(),
            layer_name: dataset.layer_name().to_owned(),
            names: dataset.names().to_vec(),
            shapes: dataset.shapes(),
            style: layer.style().clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxesSnapshot {
    pub id: AxesId,
    pub position: AxesPosition,
    pub settings: AxesSettings,
    pub current_layer: Option<usize>,
    pub layers: Vec<LayerSnapshot>,
}

impl AxesSnapshot {
    #[must_use]
    pub fn from_axes<S: AxesSurface>(axes: &AxesManager<S>) -> Self {
        Self {
            id: axes.id(),
            position: axes.position(),
            settings: axes.settings().clone(),
            current_layer: axes.layers().current_index(),
            layers: axes.layers().iter().map(LayerSnapshot::from_layer).collect(),
        }
    }
}

/// Deterministic figure state used by regression tests and debugging tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureSnapshot {
    pub style: Option<String>,
    pub rows: usize,
    pub columns: usize,
    pub current_axes: usize,
    pub axes: Vec<AxesSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: FigureSnapshot,
}

impl FigureSnapshot {
    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            PlotError::InvalidData(format!("failed to serialize figure snapshot: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> PlotResult<String> {
        let payload = FigureSnapshotJsonContractV1 {
            schema_version: FIGURE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PlotError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts both the bare snapshot and the versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> PlotResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<FigureSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: FigureSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            PlotError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != FIGURE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(PlotError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
