//! `ps-session`: Layer store and buffer-in/buffer-out entry points for PixelStack.
//!
//! A [`Session`] owns the layers of one editing session. Hosts ingest RGBA8
//! buffers into layers, run operations against layer ids (typed methods or
//! serialized [`Operation`]s dispatched through the effect registry) and
//! composite an ordered stack back into a caller-owned buffer.
//!
//! Sessions are single-threaded. [`SharedSession`] wraps one in a mutex for
//! hosts that need to call in from several threads.

pub mod error;
pub mod operation;
pub mod session;
pub mod store;

pub use error::SessionError;
pub use operation::Operation;
pub use session::{Session, SharedSession};
pub use store::LayerStore;

// Re-export the types every caller needs.
pub use ps_common::{KernelConfig, LayerId, Outcome};
pub use ps_effects::GrayscaleMethod;
