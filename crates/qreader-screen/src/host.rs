use qreader_capture::DeviceOrientation;

/// The UI layer presenting the screen.
///
/// Calls arrive on the UI sequence only.
pub trait ScreenHost {
    /// Show or remove the navigation bar's cancel control.
    fn set_cancel_control(&self, installed: bool);

    /// Current physical orientation, used to align the preview when
    /// capture starts.
    fn device_orientation(&self) -> DeviceOrientation {
        DeviceOrientation::Unknown
    }
}
