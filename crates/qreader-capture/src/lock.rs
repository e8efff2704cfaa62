use crate::{CaptureDevice, CaptureError};

/// Holds a device's configuration lock and releases it on drop.
///
/// ```ignore
/// if let Ok(_lock) = ConfigurationLock::acquire(device) {
///     device.set_torch_mode(TorchMode::Off)?;
/// } // unlocked here
/// ```
pub struct ConfigurationLock<'a> {
    device: &'a dyn CaptureDevice,
}

impl<'a> ConfigurationLock<'a> {
    pub fn acquire(device: &'a dyn CaptureDevice) -> Result<Self, CaptureError> {
        device.lock_for_configuration()?;
        Ok(Self { device })
    }
}

impl Drop for ConfigurationLock<'_> {
    fn drop(&mut self) {
        self.device.unlock_for_configuration();
    }
}

impl std::fmt::Debug for ConfigurationLock<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationLock")
            .field("device", &self.device.name())
            .finish()
    }
}
