use qreader_capture::{DeviceOrientation, VideoOrientation};

/// Connection orientation for a device orientation.
///
/// Landscape left and right are swapped between the two enums. Face
/// up/down and unknown fall back to portrait.
pub fn video_orientation_for(orientation: DeviceOrientation) -> VideoOrientation {
    match orientation {
        DeviceOrientation::Portrait => VideoOrientation::Portrait,
        DeviceOrientation::LandscapeLeft => VideoOrientation::LandscapeRight,
        DeviceOrientation::LandscapeRight => VideoOrientation::LandscapeLeft,
        DeviceOrientation::PortraitUpsideDown => VideoOrientation::PortraitUpsideDown,
        DeviceOrientation::Unknown | DeviceOrientation::FaceUp | DeviceOrientation::FaceDown => {
            VideoOrientation::Portrait
        }
    }
}
