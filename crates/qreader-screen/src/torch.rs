use qreader_capture::{CaptureDevice, ConfigurationLock, TorchMode};

/// Whether the device can be switched to `mode` right now.
fn torch_ready(device: &dyn CaptureDevice, mode: TorchMode) -> bool {
    device.has_torch() && device.is_torch_available() && device.is_torch_mode_supported(mode)
}

/// Turn the torch on at `level`.
///
/// Returns `true` if the device accepted the change. Missing hardware, an
/// unsupported mode or a busy configuration lock leave the torch as it was.
pub fn turn_on(device: &dyn CaptureDevice, level: f32) -> bool {
    if !torch_ready(device, TorchMode::On) {
        log::debug!("torch on skipped: {} has no usable torch", device.name());
        return false;
    }

    let _lock = match ConfigurationLock::acquire(device) {
        Ok(lock) => lock,
        Err(e) => {
            log::debug!("torch on skipped: {e}");
            return false;
        }
    };

    match device.set_torch_mode_on_with_level(level) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("torch on rejected: {e}");
            false
        }
    }
}

/// Turn the torch off. Same silent preconditions as [`turn_on`].
pub fn turn_off(device: &dyn CaptureDevice) -> bool {
    if !torch_ready(device, TorchMode::Off) {
        log::debug!("torch off skipped: {} has no usable torch", device.name());
        return false;
    }

    let _lock = match ConfigurationLock::acquire(device) {
        Ok(lock) => lock,
        Err(e) => {
            log::debug!("torch off skipped: {e}");
            return false;
        }
    };

    match device.set_torch_mode(TorchMode::Off) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("torch off rejected: {e}");
            false
        }
    }
}
