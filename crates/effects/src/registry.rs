//! Effect registry: by-name lookup and category filtering.

use std::collections::HashMap;

use ps_common::{EffectCategory, KernelConfig};
use tracing::info;

use crate::blur::GaussianBlurEffect;
use crate::color::{GrayscaleEffect, GrayscaleMethod};
use crate::compress::QuadCompressEffect;
use crate::edge::{LaplacianEffect, LaplacianOfGaussianEffect, SobelEffect};
use crate::error::EffectError;
use crate::fill::FloodFillEffect;
use crate::traits::Effect;

/// Registry holding all available layer effects for lookup by name or category.
pub struct EffectRegistry {
    effects: HashMap<String, Box<dyn Effect>>,
}

impl EffectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            effects: HashMap::new(),
        }
    }

    /// Create a registry with all built-in effects, configured from `cfg`.
    pub fn with_builtins(cfg: &KernelConfig) -> Self {
        let mut registry = Self::new();

        // Color effects
        for method in GrayscaleMethod::all() {
            registry.register(Box::new(GrayscaleEffect::new(*method)));
        }

        // Blur effects
        registry.register(Box::new(GaussianBlurEffect::new(&cfg.blur)));

        // Edge effects
        registry.register(Box::new(SobelEffect::new(&cfg.edge)));
        registry.register(Box::new(LaplacianEffect::new(&cfg.edge)));
        registry.register(Box::new(LaplacianOfGaussianEffect::new(
            &cfg.blur, &cfg.edge,
        )));

        // Fill / compression
        registry.register(Box::new(FloodFillEffect::new()));
        registry.register(Box::new(QuadCompressEffect::new(&cfg.compression)));

        info!(
            count = registry.effects.len(),
            "Registered built-in effects"
        );

        registry
    }

    /// Register a new effect. Overwrites any previous effect with the same name.
    pub fn register(&mut self, effect: Box<dyn Effect>) {
        let name = effect.name().to_string();
        self.effects.insert(name, effect);
    }

    /// Try to register an effect, returning an error if one already exists with that name.
    pub fn try_register(&mut self, effect: Box<dyn Effect>) -> Result<(), EffectError> {
        let name = effect.name().to_string();
        if self.effects.contains_key(&name) {
            return Err(EffectError::AlreadyRegistered { name });
        }
        self.effects.insert(name, effect);
        Ok(())
    }

    /// Look up an effect by name.
    pub fn get(&self, name: &str) -> Option<&dyn Effect> {
        self.effects.get(name).map(|e| e.as_ref())
    }

    /// Look up an effect by name, failing with [`EffectError::NotFound`].
    pub fn require(&self, name: &str) -> Result<&dyn Effect, EffectError> {
        self.get(name).ok_or_else(|| EffectError::NotFound {
            name: name.to_string(),
        })
    }

    /// List all registered effects, sorted by name.
    pub fn list(&self) -> Vec<&dyn Effect> {
        let mut effects: Vec<_> = self.effects.values().map(|e| e.as_ref()).collect();
        effects.sort_by_key(|e| e.name());
        effects
    }

    /// List effects filtered by category, sorted by name.
    pub fn list_by_category(&self, category: EffectCategory) -> Vec<&dyn Effect> {
        let mut effects: Vec<_> = self
            .effects
            .values()
            .filter(|e| e.category() == category)
            .map(|e| e.as_ref())
            .collect();
        effects.sort_by_key(|e| e.name());
        effects
    }

    /// Number of registered effects.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}
