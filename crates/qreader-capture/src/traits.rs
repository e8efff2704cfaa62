use crate::{CaptureError, CodeType, MetadataObject, TorchMode, VideoGravity, VideoOrientation};
use qreader_base::{Point, Rect};
use std::sync::Arc;

/// A physical camera.
///
/// Configuration setters must only be called between a successful
/// [`lock_for_configuration`](CaptureDevice::lock_for_configuration) and the
/// matching unlock; [`ConfigurationLock`](crate::ConfigurationLock) pairs
/// them automatically.
pub trait CaptureDevice: Send + Sync {
    fn name(&self) -> &str;

    fn lock_for_configuration(&self) -> Result<(), CaptureError>;
    fn unlock_for_configuration(&self);

    fn has_torch(&self) -> bool;
    fn is_torch_available(&self) -> bool;
    fn is_torch_mode_supported(&self, mode: TorchMode) -> bool;
    fn torch_mode(&self) -> TorchMode;
    fn set_torch_mode(&self, mode: TorchMode) -> Result<(), CaptureError>;
    /// Turn the torch on at `level` in `0.0..=1.0`.
    fn set_torch_mode_on_with_level(&self, level: f32) -> Result<(), CaptureError>;

    fn is_low_light_boost_supported(&self) -> bool;
    fn set_automatically_enables_low_light_boost(&self, enabled: bool);
}

/// Receives batches of recognized codes from a [`MetadataOutput`].
///
/// Called on whatever thread the pipeline delivers on; implementations
/// forward to their own sequence.
pub trait MetadataDelegate: Send + Sync {
    fn did_output(&self, objects: Vec<MetadataObject>);
}

/// Session output that emits recognized codes instead of frames.
pub trait MetadataOutput: Send + Sync {
    /// Types this output can recognize with the bound input. Empty until
    /// the output is attached to a session that has an input.
    fn available_types(&self) -> Vec<CodeType>;
    fn active_types(&self) -> Vec<CodeType>;
    fn set_active_types(&self, types: &[CodeType]) -> Result<(), CaptureError>;
    fn set_delegate(&self, delegate: Arc<dyn MetadataDelegate>);
}

/// Coordinates a device input with its outputs.
///
/// Changes between `begin_configuration` and `commit_configuration` are
/// applied atomically; `discard_configuration` ends the transaction
/// without applying them.
pub trait CaptureSession: Send + Sync {
    fn begin_configuration(&self);
    fn commit_configuration(&self);
    fn discard_configuration(&self);

    fn add_input(&self, device: &dyn CaptureDevice) -> Result<(), CaptureError>;
    fn add_metadata_output(&self) -> Arc<dyn MetadataOutput>;

    fn start_running(&self);
    fn stop_running(&self);
    fn is_running(&self) -> bool;
}

/// On-screen layer rendering a session's video.
pub trait PreviewSurface: Send + Sync {
    fn set_gravity(&self, gravity: VideoGravity);
    fn set_frame(&self, frame: Rect);
    fn set_bounds(&self, bounds: Rect);
    fn set_position(&self, position: Point);

    /// Insert into the screen's layer tree.
    fn attach(&self);
    fn detach(&self);

    /// Whether the preview has a connection that accepts orientation changes.
    fn supports_video_orientation(&self) -> bool;
    fn set_video_orientation(&self, orientation: VideoOrientation);
}

/// Factory for the platform's capture objects.
pub trait CaptureBackend: Send + Sync {
    /// The default video camera, or `None` when the host has none.
    fn default_video_device(&self) -> Option<Arc<dyn CaptureDevice>>;
    fn new_session(&self) -> Arc<dyn CaptureSession>;
    fn new_preview(&self, session: &Arc<dyn CaptureSession>) -> Arc<dyn PreviewSurface>;
}
