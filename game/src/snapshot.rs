use std::fmt;
use std::sync::Arc;

use engine::codec::{CodecError, RgbaImage, decode_png};
use serde::{Deserialize, Serialize};

/// An encoded (PNG) image captured from a drawing surface or produced by the compositor.
///
/// Cheap to clone; session state copies it on every transition.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Arc<[u8]>);

impl Snapshot {
    /// Wraps already-encoded bytes. Nothing is validated until `decode`.
    pub fn from_png(bytes: Vec<u8>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn decode(&self) -> Result<RgbaImage, CodecError> {
        decode_png(&self.0)
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Snapshot({} bytes)", self.0.len())
    }
}
