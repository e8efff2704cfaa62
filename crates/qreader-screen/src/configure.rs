//! Off-UI capture setup.
//!
//! [`configure_capture`] blocks on device and session calls, so the screen
//! runs it on tokio's blocking pool and posts the [`ConfigureReport`] back
//! to the UI queue. It touches no screen state and can be driven directly
//! with fake collaborators.

use crate::ScanError;
use qreader_capture::{
    CaptureBackend, CaptureDevice, CaptureSession, CodeType, ConfigurationLock, MetadataDelegate,
};
use std::sync::Arc;

/// Everything the configure phase needs, owned so it can cross threads.
pub struct ConfigureRequest {
    pub backend: Arc<dyn CaptureBackend>,
    pub session: Arc<dyn CaptureSession>,
    pub code_types: Vec<CodeType>,
    pub error_domain: String,
    pub delegate: Arc<dyn MetadataDelegate>,
}

/// Result of the configure phase, applied on the UI sequence.
pub enum ConfigureReport {
    /// Session committed with the device bound and recognition active.
    Ready { device: Arc<dyn CaptureDevice> },
    /// Setup aborted; the transaction was discarded.
    Failed {
        device: Arc<dyn CaptureDevice>,
        error: ScanError,
    },
    /// The host has no video camera.
    NoDevice,
}

impl ConfigureReport {
    pub fn is_ready(&self) -> bool {
        matches!(self, ConfigureReport::Ready { .. })
    }

    pub fn error(&self) -> Option<&ScanError> {
        match self {
            ConfigureReport::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl std::fmt::Debug for ConfigureReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigureReport::Ready { device } => f
                .debug_struct("Ready")
                .field("device", &device.name())
                .finish(),
            ConfigureReport::Failed { device, error } => f
                .debug_struct("Failed")
                .field("device", &device.name())
                .field("error", error)
                .finish(),
            ConfigureReport::NoDevice => f.write_str("NoDevice"),
        }
    }
}

/// Enable automatic low-light boost if the device has it.
///
/// Best effort: returns `false` when unsupported or the lock is busy.
pub fn enable_low_light_boost(device: &dyn CaptureDevice) -> bool {
    if !device.is_low_light_boost_supported() {
        return false;
    }
    match ConfigurationLock::acquire(device) {
        Ok(_lock) => {
            device.set_automatically_enables_low_light_boost(true);
            true
        }
        Err(e) => {
            log::debug!("low-light boost skipped: {e}");
            false
        }
    }
}

/// Bind the default camera to `request.session` and activate recognition
/// of exactly `request.code_types`.
///
/// Types are checked in order against the output's advertised types; the
/// first unsupported one aborts the setup and is named in the error.
pub fn configure_capture(request: ConfigureRequest) -> ConfigureReport {
    let ConfigureRequest {
        backend,
        session,
        code_types,
        error_domain,
        delegate,
    } = request;

    let Some(device) = backend.default_video_device() else {
        return ConfigureReport::NoDevice;
    };

    if enable_low_light_boost(device.as_ref()) {
        log::debug!("low-light boost enabled on {}", device.name());
    }

    session.begin_configuration();

    if let Err(e) = session.add_input(device.as_ref()) {
        log::error!("cannot bind {} as capture input: {e}", device.name());
        session.discard_configuration();
        return ConfigureReport::Failed {
            device,
            error: e.into(),
        };
    }

    let output = session.add_metadata_output();
    let available = output.available_types();

    if let Some(missing) = code_types.iter().find(|t| !available.contains(t)) {
        log::warn!("{} cannot recognize {missing}", device.name());
        session.discard_configuration();
        return ConfigureReport::Failed {
            error: ScanError::unavailable_metadata_object_type(&error_domain, missing),
            device,
        };
    }

    if let Err(e) = output.set_active_types(&code_types) {
        session.discard_configuration();
        return ConfigureReport::Failed {
            device,
            error: e.into(),
        };
    }
    output.set_delegate(delegate);

    session.commit_configuration();
    log::debug!(
        "capture configured on {} for {} code type(s)",
        device.name(),
        code_types.len()
    );

    ConfigureReport::Ready { device }
}
