//! Seam to the host modeling application.
//!
//! The core never talks to the editor directly: operations that must reach
//! the real scene graph (pixel painting, pushing accepted entity changes) go
//! through this trait. Adapter failures surface as errors to the tool layer
//! and never touch the shadow model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BlockhostError;

/// One validated paint operation, ready for the host's canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintOp {
    /// "fill", "draw" or "line".
    pub kind: String,
    pub texture: String,
    pub color: String,
    pub from: (f64, f64),
    pub to: Option<(f64, f64)>,
    /// Shading intensity in `0.0..=1.0` when shading was requested.
    pub shade: Option<f64>,
}

/// Adapter to the live editor. Implementations resolve any asynchrony before
/// returning; the mutation path only ever sees plain values or errors.
#[async_trait]
pub trait HostAdapter: Send + Sync {
    /// Apply paint operations to a texture canvas in the host.
    async fn paint(&self, ops: &[PaintOp]) -> Result<(), BlockhostError>;
}

/// Host that accepts everything and does nothing. Used when running without
/// an attached editor and as the default in tests.
#[derive(Debug, Default)]
pub struct NoopHost;

#[async_trait]
impl HostAdapter for NoopHost {
    async fn paint(&self, _ops: &[PaintOp]) -> Result<(), BlockhostError> {
        Ok(())
    }
}
