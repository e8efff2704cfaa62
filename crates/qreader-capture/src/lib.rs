//! Capture collaborators for the qreader scanning screen.
//!
//! The screen never talks to camera hardware directly. It drives the
//! traits in [`traits`], which a platform backend implements. The `fake`
//! feature adds an in-memory backend for tests and demos.

pub mod error;
pub mod lock;
pub mod traits;
pub mod types;

#[cfg(feature = "fake")]
pub mod fake;

pub use error::CaptureError;
pub use lock::ConfigurationLock;
pub use traits::{
    CaptureBackend, CaptureDevice, CaptureSession, MetadataDelegate, MetadataOutput,
    PreviewSurface,
};
pub use types::{CodeType, DeviceOrientation, MetadataObject, TorchMode, VideoGravity, VideoOrientation};

#[cfg(feature = "fake")]
pub use fake::{FakeBackend, FakeDevice, FakeMetadataOutput, FakePreview, FakeSession, SessionCall};
