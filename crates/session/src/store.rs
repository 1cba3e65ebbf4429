//! Layer store: owns every layer of a session, keyed by id.

use std::collections::HashMap;

use ps_common::{BufferError, Layer, LayerId, LayerSource, Resolution};
use tracing::{debug, warn};

/// All layers of one session.
///
/// Pixel data is copied in at ingest time; nothing in the store borrows
/// caller memory.
#[derive(Clone, Debug, Default)]
pub struct LayerStore {
    layers: HashMap<LayerId, Layer>,
}

impl LayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layer from a row-major RGBA8 buffer and store it under `id`,
    /// replacing any previous layer with that id.
    ///
    /// A buffer whose length is not `width * height * 4`, or non-positive
    /// dimensions, is rejected and the store is left unchanged.
    pub fn ingest(
        &mut self,
        bytes: &[u8],
        width: i64,
        height: i64,
        id: LayerId,
    ) -> Result<(), BufferError> {
        let layer = Layer::from_rgba(Some(id), bytes, width, height).map_err(|e| {
            warn!(layer_id = %id, width, height, len = bytes.len(), error = %e, "Rejected ingest buffer");
            e
        })?;
        let replaced = self.layers.insert(id, layer).is_some();
        debug!(layer_id = %id, width, height, replaced, "Ingested layer");
        Ok(())
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(&id)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.contains_key(&id)
    }

    /// Remove one layer, returning it if it existed.
    pub fn remove(&mut self, id: LayerId) -> Option<Layer> {
        self.layers.remove(&id)
    }

    /// Drop every layer.
    pub fn clear_all(&mut self) {
        self.layers.clear();
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Stored ids in ascending order.
    pub fn ids(&self) -> Vec<LayerId> {
        let mut ids: Vec<_> = self.layers.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Current grid size of a layer.
    pub fn dimensions(&self, id: LayerId) -> Option<Resolution> {
        self.get(id).map(Layer::resolution)
    }

    /// Copy a layer's grid out as a row-major RGBA8 buffer.
    pub fn export(&self, id: LayerId) -> Option<Vec<u8>> {
        self.get(id).map(Layer::to_rgba)
    }
}

impl LayerSource for LayerStore {
    fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.get(id)
    }
}
