//! The session: a layer store plus the buffer-in/buffer-out entry points.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use ps_common::{check_rgba_len, KernelConfig, Layer, LayerId, Outcome, Pixel};
use ps_compositor::{Compositor, CompositorError};
use ps_effects::{
    flood_fill, gaussian_blur, grayscale, laplacian, laplacian_of_gaussian, quad_compress, sobel,
    validate_params, EffectRegistry, GrayscaleMethod,
};
use tracing::{debug, info};

use crate::error::SessionError;
use crate::operation::Operation;
use crate::store::LayerStore;

/// A session behind a mutex, for hosts that call in from several threads.
pub type SharedSession = Arc<Mutex<Session>>;

/// Owns the layers of one editing session and runs operations on them.
///
/// Every mutating entry point targets a single layer by id and works in
/// place. An unknown id is not an error: the call returns
/// [`Outcome::UnknownLayer`] and nothing is touched.
pub struct Session {
    store: LayerStore,
    registry: EffectRegistry,
    config: KernelConfig,
}

impl Session {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(KernelConfig::default())
    }

    pub fn with_config(config: KernelConfig) -> Self {
        Self {
            store: LayerStore::new(),
            registry: EffectRegistry::with_builtins(&config),
            config,
        }
    }

    /// Move the session behind an `Arc<Mutex<_>>`.
    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    pub fn store(&self) -> &LayerStore {
        &self.store
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.store.get(id)
    }

    // --- Store lifecycle ---

    /// Populate or replace layer `id` from a row-major RGBA8 buffer.
    pub fn ingest(
        &mut self,
        bytes: &[u8],
        width: i64,
        height: i64,
        id: LayerId,
    ) -> Result<(), SessionError> {
        self.store.ingest(bytes, width, height, id)?;
        Ok(())
    }

    /// Drop every layer.
    pub fn clear_all(&mut self) {
        let count = self.store.len();
        self.store.clear_all();
        info!(count, "Cleared all layers");
    }

    /// Drop one layer. Returns whether it existed.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        let removed = self.store.remove(id).is_some();
        debug!(layer_id = %id, removed, "Remove layer");
        removed
    }

    // --- Typed operations ---

    pub fn grayscale(&mut self, method: GrayscaleMethod, id: LayerId) -> Outcome {
        self.with_layer(method.effect_name(), id, |layer| {
            grayscale(layer, method);
            Outcome::Applied
        })
    }

    /// Gaussian blur. `sigma` and `kernel_size` are clamped to the
    /// configured [`BlurConfig`](ps_common::BlurConfig) limits.
    pub fn blur(&mut self, id: LayerId, sigma: f32, kernel_size: usize) -> Outcome {
        let (sigma, kernel_size) = self.blur_limits(sigma, kernel_size);
        self.with_layer("gaussian_blur", id, |layer| {
            gaussian_blur(layer, sigma, kernel_size);
            Outcome::Applied
        })
    }

    pub fn edge_sobel(&mut self, id: LayerId) -> Outcome {
        let norm = self.config.edge.gradient_norm;
        self.with_layer("edge_sobel", id, |layer| {
            sobel(layer, norm);
            Outcome::Applied
        })
    }

    pub fn edge_laplacian(&mut self, id: LayerId) -> Outcome {
        let gain = self.config.edge.laplacian_gain;
        self.with_layer("edge_laplacian", id, |layer| {
            laplacian(layer, gain);
            Outcome::Applied
        })
    }

    /// Laplacian of Gaussian. The blur stage is clamped like [`Session::blur`].
    pub fn edge_laplacian_of_gaussian(
        &mut self,
        id: LayerId,
        sigma: f32,
        kernel_size: usize,
    ) -> Outcome {
        let (sigma, kernel_size) = self.blur_limits(sigma, kernel_size);
        let gain = self.config.edge.laplacian_gain;
        self.with_layer("edge_laplacian_of_gaussian", id, |layer| {
            laplacian_of_gaussian(layer, sigma, kernel_size, gain);
            Outcome::Applied
        })
    }

    /// Bucket fill from `(x, y)` with a straight RGBA color.
    #[allow(clippy::too_many_arguments)]
    pub fn flood_fill(
        &mut self,
        id: LayerId,
        x: i64,
        y: i64,
        r: u8,
        g: u8,
        b: u8,
        a: u8,
        threshold_percent: f32,
    ) -> Outcome {
        let color = Pixel::new(r, g, b, a);
        self.with_layer("bucket_fill", id, |layer| {
            flood_fill(layer, x, y, color, threshold_percent)
        })
    }

    pub fn quad_compress(&mut self, id: LayerId, target_width: i64, target_height: i64) -> Outcome {
        let cfg = self.config.compression.clone();
        self.with_layer("quad_compression", id, |layer| {
            quad_compress(layer, target_width, target_height, &cfg)
        })
    }

    // --- By-name dispatch ---

    /// Run a serialized operation through the effect registry.
    ///
    /// Parameters are validated before the layer is looked up, so a bad
    /// payload is reported even when the id is unknown.
    pub fn apply(&mut self, op: &Operation) -> Result<Outcome, SessionError> {
        let effect = self.registry.require(op.effect_name())?;
        let params = op.params();
        validate_params(effect.name(), effect.param_defs(), &params)?;

        let id = op.layer_id();
        let Some(layer) = self.store.get_mut(id) else {
            debug!(op = effect.name(), layer_id = %id, "Unknown layer, skipping");
            return Ok(Outcome::UnknownLayer(id));
        };

        let start = Instant::now();
        let outcome = effect.apply(layer, &params)?;
        debug!(
            op = effect.name(),
            layer_id = %id,
            ?outcome,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Applied operation"
        );
        Ok(outcome)
    }

    /// Apply `op`, then re-composite `order` into `output`.
    ///
    /// The output size is checked before `op` runs, so an `Err` means no
    /// layer was touched. The composite runs whatever the outcome, so
    /// `output` always reflects the current layers.
    pub fn apply_and_composite(
        &mut self,
        op: &Operation,
        order: &[LayerId],
        output: &mut [u8],
        canvas_width: u32,
        canvas_height: u32,
    ) -> Result<Outcome, SessionError> {
        check_rgba_len(canvas_width as i64, canvas_height as i64, output.len())
            .map_err(CompositorError::from)?;
        let outcome = self.apply(op)?;
        self.composite(output, canvas_width, canvas_height, order)?;
        Ok(outcome)
    }

    // --- Compositing ---

    /// Merge `order` (bottom layer first) into the caller's RGBA8 buffer.
    pub fn composite(
        &self,
        output: &mut [u8],
        canvas_width: u32,
        canvas_height: u32,
        order: &[LayerId],
    ) -> Result<(), SessionError> {
        Compositor::new(canvas_width, canvas_height).composite(&self.store, order, output)?;
        Ok(())
    }

    /// Merge `order` into a newly allocated buffer.
    pub fn render(
        &self,
        order: &[LayerId],
        canvas_width: u32,
        canvas_height: u32,
    ) -> Result<Vec<u8>, SessionError> {
        Ok(Compositor::new(canvas_width, canvas_height).render(&self.store, order)?)
    }

    fn blur_limits(&self, sigma: f32, kernel_size: usize) -> (f32, usize) {
        let cfg = &self.config.blur;
        let max_kernel = cfg.max_kernel_size.max(1) as usize;
        if kernel_size > max_kernel || sigma > cfg.max_sigma {
            debug!(
                sigma,
                kernel_size,
                max_sigma = cfg.max_sigma,
                max_kernel,
                "Clamping blur parameters"
            );
        }
        // NaN passes through untouched; the kernel treats it as identity.
        let sigma = if sigma > cfg.max_sigma { cfg.max_sigma } else { sigma };
        (sigma, kernel_size.min(max_kernel))
    }

    fn with_layer(
        &mut self,
        op: &str,
        id: LayerId,
        f: impl FnOnce(&mut Layer) -> Outcome,
    ) -> Outcome {
        let Some(layer) = self.store.get_mut(id) else {
            debug!(op, layer_id = %id, "Unknown layer, skipping");
            return Outcome::UnknownLayer(id);
        };
        let start = Instant::now();
        let outcome = f(layer);
        debug!(
            op,
            layer_id = %id,
            ?outcome,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Applied operation"
        );
        outcome
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use ps_common::{BufferError, ParamType};
    use ps_effects::EffectError;

    use super::*;

    fn session_with(id: i32, width: i64, height: i64, px: [u8; 4]) -> Session {
        let mut session = Session::new();
        let bytes = px.repeat((width * height) as usize);
        session.ingest(&bytes, width, height, LayerId(id)).unwrap();
        session
    }

    #[test]
    fn unknown_layer_is_reported_not_raised() {
        let mut session = session_with(1, 2, 2, [10, 20, 30, 255]);
        let before = session.store().export(LayerId(1));
        let missing = LayerId(99);
        assert_eq!(session.grayscale(GrayscaleMethod::Average, missing), Outcome::UnknownLayer(missing));
        assert_eq!(session.blur(missing, 1.0, 3), Outcome::UnknownLayer(missing));
        assert_eq!(session.edge_sobel(missing), Outcome::UnknownLayer(missing));
        assert_eq!(session.edge_laplacian(missing), Outcome::UnknownLayer(missing));
        assert_eq!(
            session.edge_laplacian_of_gaussian(missing, 1.0, 3),
            Outcome::UnknownLayer(missing)
        );
        assert_eq!(
            session.flood_fill(missing, 0, 0, 1, 2, 3, 255, 0.0),
            Outcome::UnknownLayer(missing)
        );
        assert_eq!(session.quad_compress(missing, 1, 1), Outcome::UnknownLayer(missing));
        assert_eq!(session.store().export(LayerId(1)), before);
    }

    #[test]
    fn typed_and_named_paths_agree() {
        let mut typed = session_with(1, 6, 6, [200, 40, 90, 255]);
        typed.flood_fill(LayerId(1), 2, 2, 0, 0, 0, 255, 0.0);
        let mut named = Session::new();
        named
            .ingest(&typed.store().export(LayerId(1)).unwrap(), 6, 6, LayerId(1))
            .unwrap();
        typed.blur(LayerId(1), 1.2, 5);

        let op = Operation::GaussianBlur {
            layer_id: LayerId(1),
            sigma: 1.2,
            kernel_size: 5,
        };
        assert_eq!(named.apply(&op), Ok(Outcome::Applied));
        assert_eq!(named.layer(LayerId(1)), typed.layer(LayerId(1)));
    }

    #[test]
    fn apply_validates_params() {
        let mut session = session_with(1, 3, 3, [0, 0, 0, 255]);
        let op = Operation::GaussianBlur {
            layer_id: LayerId(1),
            sigma: 500.0,
            kernel_size: 5,
        };
        assert!(matches!(
            session.apply(&op),
            Err(SessionError::Effect(EffectError::ParamOutOfRange { .. }))
        ));
        let op = Operation::QuadCompression {
            layer_id: LayerId(1),
            new_width: 0,
            new_height: 1,
        };
        assert!(session.apply(&op).is_err());
    }

    #[test]
    fn apply_reports_unknown_layer_and_out_of_bounds() {
        let mut session = session_with(1, 2, 2, [1, 1, 1, 255]);
        let op = Operation::EdgeSobel { layer_id: LayerId(5) };
        assert_eq!(session.apply(&op), Ok(Outcome::UnknownLayer(LayerId(5))));

        let op = Operation::BucketFill {
            layer_id: LayerId(1),
            x: 2,
            y: 0,
            color: [9, 9, 9, 255],
            threshold: 0.0,
        };
        assert_eq!(session.apply(&op), Ok(Outcome::OutOfBounds));

        let op = Operation::QuadCompression {
            layer_id: LayerId(1),
            new_width: 3,
            new_height: 1,
        };
        assert_eq!(session.apply(&op), Ok(Outcome::OutOfBounds));
        assert_eq!(session.store().export(LayerId(1)), Some([1, 1, 1, 255].repeat(4)));
    }

    #[test]
    fn apply_uses_session_config() {
        let mut config = KernelConfig::default();
        config.blur.max_sigma = 1.0;
        let mut session = Session::with_config(config);
        session.ingest(&[0; 36], 3, 3, LayerId(1)).unwrap();
        let op = Operation::GaussianBlur {
            layer_id: LayerId(1),
            sigma: 2.0,
            kernel_size: 3,
        };
        assert!(session.apply(&op).is_err());
        let defs = session.registry().get("gaussian_blur").unwrap().param_defs();
        let sigma = defs.iter().find(|d| d.name == "sigma").unwrap();
        assert!(matches!(sigma.param_type, ParamType::Float { max, .. } if max == 1.0));
    }

    #[test]
    fn typed_blur_clamps_to_config_limits() {
        let max_kernel = KernelConfig::default().blur.max_kernel_size as usize;
        let mut huge = session_with(1, 4, 4, [0, 0, 0, 255]);
        huge.store.get_mut(LayerId(1)).unwrap().set(1, 1, Pixel::new(255, 255, 255, 255));
        let mut capped = Session::new();
        capped
            .ingest(&huge.store().export(LayerId(1)).unwrap(), 4, 4, LayerId(1))
            .unwrap();

        assert_eq!(huge.blur(LayerId(1), 1.0, usize::MAX), Outcome::Applied);
        assert_eq!(capped.blur(LayerId(1), 1.0, max_kernel), Outcome::Applied);
        assert_eq!(huge.layer(LayerId(1)), capped.layer(LayerId(1)));

        assert_eq!(huge.blur(LayerId(1), f32::MAX, 3), Outcome::Applied);
        assert_eq!(capped.blur(LayerId(1), 50.0, 3), Outcome::Applied);
        assert_eq!(huge.layer(LayerId(1)), capped.layer(LayerId(1)));
    }

    #[test]
    fn typed_laplacian_of_gaussian_clamps_to_config_limits() {
        let mut config = KernelConfig::default();
        config.blur.max_kernel_size = 5;
        let mut huge = Session::with_config(config.clone());
        let mut capped = Session::with_config(config);
        let mut bytes = [0u8, 0, 0, 255].repeat(49);
        bytes[24 * 4..24 * 4 + 3].copy_from_slice(&[200, 200, 200]);
        huge.ingest(&bytes, 7, 7, LayerId(1)).unwrap();
        capped.ingest(&bytes, 7, 7, LayerId(1)).unwrap();

        assert_eq!(
            huge.edge_laplacian_of_gaussian(LayerId(1), 1.0, usize::MAX),
            Outcome::Applied
        );
        assert_eq!(capped.edge_laplacian_of_gaussian(LayerId(1), 1.0, 5), Outcome::Applied);
        assert_eq!(huge.layer(LayerId(1)), capped.layer(LayerId(1)));
    }

    #[test]
    fn apply_and_composite_checks_output_before_applying() {
        let mut session = session_with(1, 2, 2, [255, 0, 0, 255]);
        let op = Operation::MonochromeAverage { layer_id: LayerId(1) };
        let mut short = vec![0u8; 3];
        let err = session
            .apply_and_composite(&op, &[LayerId(1)], &mut short, 2, 2)
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::Compositor(CompositorError::Output(BufferError::SizeMismatch {
                expected: 16,
                got: 3
            }))
        );
        assert_eq!(session.store().export(LayerId(1)), Some([255, 0, 0, 255].repeat(4)));

        let mut output = vec![0u8; 16];
        assert_eq!(
            session.apply_and_composite(&op, &[LayerId(1)], &mut output, 2, 2),
            Ok(Outcome::Applied)
        );
        assert_eq!(output, [85, 85, 85, 255].repeat(4));
    }

    #[test]
    fn remove_layer_and_clear_all() {
        let mut session = session_with(1, 1, 1, [0; 4]);
        session.ingest(&[0; 4], 1, 1, LayerId(2)).unwrap();
        assert!(session.remove_layer(LayerId(1)));
        assert!(!session.remove_layer(LayerId(1)));
        assert_eq!(session.store().ids(), vec![LayerId(2)]);
        session.clear_all();
        assert!(session.store().is_empty());
    }

    #[test]
    fn ingest_rejects_malformed_buffer() {
        let mut session = Session::new();
        assert_eq!(
            session.ingest(&[0; 5], 1, 1, LayerId(1)),
            Err(SessionError::Buffer(BufferError::SizeMismatch {
                expected: 4,
                got: 5
            }))
        );
    }

    #[test]
    fn shared_session_serializes_access() {
        let shared = session_with(1, 2, 1, [255, 0, 0, 255]).into_shared();
        let worker = {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || shared.lock().grayscale(GrayscaleMethod::Average, LayerId(1)))
        };
        assert_eq!(worker.join().unwrap(), Outcome::Applied);
        let out = shared.lock().render(&[LayerId(1)], 2, 1).unwrap();
        assert_eq!(out, [85, 85, 85, 255].repeat(2));
    }
}
