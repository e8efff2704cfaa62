mod common;

use common::{BOUNDS, Fired, Harness};
use qreader_base::{Point, Rect};
use qreader_capture::{
    CaptureError, CaptureSession, CodeType, DeviceOrientation, FakeBackend, MetadataObject, SessionCall,
    VideoGravity, VideoOrientation,
};
use qreader_screen::{ErrorRoute, ScanErrorCode, ScannerConfig};
use std::time::Duration;

fn input_failure() -> CaptureError {
    CaptureError::input("AVFoundationErrorDomain", -11852, "Cannot use Back Camera")
}

// --- Appear ---

#[tokio::test]
async fn test_appear_builds_preview_and_starts_session() {
    let mut h = Harness::with_defaults();
    h.appear().await;

    let preview = h.backend.last_preview().unwrap();
    assert!(preview.is_attached());
    assert_eq!(preview.gravity(), VideoGravity::ResizeAspectFill);
    assert_eq!(preview.frame(), BOUNDS);

    let session = h.session();
    assert_eq!(session.count(&SessionCall::StartRunning), 1);
    assert!(h.screen.is_visible());
    assert!(h.screen.is_configured());
    assert!(h.screen.is_running());
    assert!(h.screen.device().is_some());
}

#[tokio::test]
async fn test_session_starts_only_after_configuration_applied() {
    let mut h = Harness::with_defaults();
    h.screen.appear(BOUNDS);

    assert!(!h.screen.is_running());
    assert!(h.screen.device().is_none());

    assert!(h.screen.run_once().await);
    assert!(h.screen.is_running());
}

#[tokio::test]
async fn test_cancel_control_follows_cancel_callback() {
    let mut h = Harness::with_defaults();
    h.appear().await;
    assert_eq!(h.host.cancel_control.get(), Some(false));
    h.screen.disappear();

    h.on_cancel();
    h.appear().await;
    assert_eq!(h.host.cancel_control.get(), Some(true));
}

#[tokio::test]
async fn test_error_route_resolved_per_cycle() {
    let mut h = Harness::with_defaults();
    h.appear().await;
    assert_eq!(h.screen.error_route(), ErrorRoute::Unhandled);
    h.screen.disappear();

    h.on_cancel();
    h.appear().await;
    assert_eq!(h.screen.error_route(), ErrorRoute::DegradeToCancel);
    h.screen.disappear();

    h.on_error();
    h.appear().await;
    assert_eq!(h.screen.error_route(), ErrorRoute::Callback);
}

#[tokio::test]
async fn test_cleared_error_callback_changes_route_next_cycle() {
    let mut h = Harness::with_defaults();
    h.on_error().on_cancel();
    h.appear().await;
    assert_eq!(h.screen.error_route(), ErrorRoute::Callback);

    h.screen.callbacks_mut().set_error(None);
    assert_eq!(h.screen.error_route(), ErrorRoute::Callback);

    h.screen.disappear();
    h.appear().await;
    assert_eq!(h.screen.error_route(), ErrorRoute::DegradeToCancel);
}

#[tokio::test]
async fn test_status_bar_hidden_and_title() {
    let h = Harness::new(
        FakeBackend::new(),
        ScannerConfig::default().with_title("Boarding pass"),
    );
    assert!(h.screen.prefers_status_bar_hidden());
    assert_eq!(h.screen.title(), "Boarding pass");
    assert_eq!(h.screen.torch_press_duration(), Duration::from_millis(250));
}

#[tokio::test]
async fn test_initial_orientation_follows_host() {
    let mut h = Harness::with_defaults();
    h.host.orientation.set(DeviceOrientation::LandscapeRight);
    h.appear().await;

    assert_eq!(
        h.backend.last_preview().unwrap().video_orientation(),
        Some(VideoOrientation::LandscapeLeft)
    );
}

// --- Configuration errors ---

#[tokio::test]
async fn test_unsupported_type_reports_error_and_never_result() {
    let config = ScannerConfig::default()
        .with_code_types([CodeType::QR, CodeType::new("com.example.Hologram"), CodeType::AZTEC]);
    let backend = FakeBackend::new().with_supported_types(vec![CodeType::QR, CodeType::AZTEC]);
    let mut h = Harness::new(backend, config);
    h.on_result().on_error();
    h.appear().await;

    let fired = h.fired();
    assert_eq!(fired.len(), 1);
    match &fired[0] {
        Fired::Error(error) => {
            assert!(error.is("qreader.scanner", ScanErrorCode::UnavailableMetadataObjectType));
            assert!(error.message().contains("com.example.Hologram"));
        }
        other => panic!("Expected Fired::Error, got {:?}", other),
    }

    let session = h.session();
    assert_eq!(session.count(&SessionCall::StartRunning), 0);
    assert_eq!(session.count(&SessionCall::StopRunning), 1);
    assert!(!session.emit(vec![MetadataObject::new(CodeType::QR, "late")]));
    h.screen.run_pending();
    assert_eq!(h.fired().len(), 1);
}

#[tokio::test]
async fn test_unsupported_type_uses_configured_domain() {
    let config = ScannerConfig::default()
        .with_code_types([CodeType::ITF_14])
        .with_error_domain("com.example.tickets");
    let mut h = Harness::new(FakeBackend::new(), config);
    h.on_error();
    h.appear().await;

    match h.fired().first() {
        Some(Fired::Error(error)) => {
            assert_eq!(error.domain(), "com.example.tickets");
            assert_eq!(error.code(), ScanErrorCode::UnavailableMetadataObjectType as i64);
            assert_eq!(error.message(), "Unable to scan object of type org.gs1.ITF14");
        }
        other => panic!("Expected Fired::Error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_input_failure_reports_platform_error() {
    let mut h = Harness::new(
        FakeBackend::new().with_input_error(input_failure()),
        ScannerConfig::default(),
    );
    h.on_error().on_cancel();
    h.appear().await;

    match h.fired().as_slice() {
        [Fired::Error(error)] => {
            assert_eq!(error.domain(), "AVFoundationErrorDomain");
            assert_eq!(error.code(), -11852);
            assert_eq!(error.message(), "Cannot use Back Camera");
        }
        other => panic!("Expected a single Fired::Error, got {:?}", other),
    }
    assert!(!h.screen.is_running());
}

#[tokio::test]
async fn test_input_failure_with_only_cancel_degrades_to_cancel() {
    let mut h = Harness::new(
        FakeBackend::new().with_input_error(input_failure()),
        ScannerConfig::default(),
    );
    h.on_cancel();
    h.appear().await;

    assert_eq!(h.fired(), vec![Fired::Cancel]);
    let session = h.session();
    assert_eq!(session.count(&SessionCall::StopRunning), 1);
    assert!(!h.screen.is_running());
}

#[tokio::test]
async fn test_input_failure_without_handlers_is_silent() {
    let mut h = Harness::new(
        FakeBackend::new().with_input_error(input_failure()),
        ScannerConfig::default(),
    );
    h.on_result();
    h.appear().await;

    assert!(h.fired().is_empty());
    assert!(!h.screen.is_running());
}

#[tokio::test]
async fn test_no_device_delivers_nothing() {
    let mut h = Harness::new(FakeBackend::new().without_device(), ScannerConfig::default());
    h.on_result().on_error().on_cancel();
    h.appear().await;

    assert!(h.fired().is_empty());
    assert!(!h.screen.is_running());
    assert!(h.screen.device().is_none());
}

#[test]
fn test_appear_without_runtime_reports_error() {
    let mut h = Harness::with_defaults();
    h.on_result().on_error();
    h.screen.appear(BOUNDS);

    match h.fired().as_slice() {
        [Fired::Error(error)] => {
            assert!(error.is("qreader.scanner", ScanErrorCode::RuntimeUnavailable));
        }
        other => panic!("expected one error, got {other:?}"),
    }
    assert!(h.screen.is_visible());
    assert!(!h.screen.is_configured());
    assert!(!h.screen.is_running());
}

#[test]
fn test_appear_without_runtime_degrades_to_cancel() {
    let mut h = Harness::with_defaults();
    h.on_cancel();
    h.screen.appear(BOUNDS);

    assert_eq!(h.fired(), vec![Fired::Cancel]);
}

// --- Disappear ---

#[tokio::test]
async fn test_disappear_tears_down_everything() {
    let mut h = Harness::with_defaults();
    h.on_result().on_cancel();
    h.appear().await;
    let session = h.session();
    let preview = h.backend.last_preview().unwrap();

    h.screen.disappear();

    assert!(!preview.is_attached());
    assert!(!session.is_running());
    assert!(h.screen.session().is_none());
    assert!(h.screen.device().is_none());
    assert!(h.screen.preview().is_none());
    assert!(!h.screen.is_visible());
    assert!(h.fired().is_empty());
}

#[tokio::test]
async fn test_nothing_fires_after_disappear() {
    let mut h = Harness::with_defaults();
    h.on_result().on_error().on_cancel();
    h.appear().await;
    let session = h.session();

    let events = h.screen.events();
    events.gesture(qreader_screen::Gesture::CancelTapped);
    h.screen.disappear();

    session.emit(vec![MetadataObject::new(CodeType::QR, "ABC123")]);
    h.screen.run_pending();
    h.screen.cancel();
    h.screen.handle_gesture(qreader_screen::Gesture::Swipe(qreader_screen::SwipeDirection::Down));

    assert!(h.fired().is_empty());
}

#[tokio::test]
async fn test_configuration_for_hidden_cycle_is_dropped() {
    let mut h = Harness::with_defaults();
    h.on_result();
    h.screen.appear(BOUNDS);
    let session = h.session();
    h.screen.disappear();

    // The report either was already drained or arrives now and is ignored.
    let _ = tokio::time::timeout(Duration::from_millis(500), h.screen.run_once()).await;

    assert_eq!(session.count(&SessionCall::StartRunning), 0);
    assert!(!h.screen.is_running());
    assert!(h.screen.device().is_none());
}

#[tokio::test]
async fn test_reappear_creates_fresh_session() {
    let mut h = Harness::with_defaults();
    h.appear().await;
    h.screen.disappear();
    h.appear().await;

    let sessions = h.backend.sessions();
    assert_eq!(sessions.len(), 2);
    assert!(!sessions[0].is_running());
    assert!(sessions[1].is_running());
}

// --- Layout and rotation ---

#[tokio::test]
async fn test_layout_resizes_and_centers_preview() {
    let mut h = Harness::with_defaults();
    h.appear().await;

    let rotated = Rect::from_xywh(0.0, 0.0, 568.0, 320.0);
    h.screen.layout(rotated);

    let preview = h.backend.last_preview().unwrap();
    assert_eq!(preview.bounds(), rotated);
    assert_eq!(preview.position(), Point::new(284.0, 160.0));
    assert_eq!(preview.frame(), rotated);
    assert_eq!(h.screen.bounds(), rotated);
}

#[tokio::test]
async fn test_transition_sets_swapped_landscape() {
    let mut h = Harness::with_defaults();
    h.appear().await;

    h.screen.transition(DeviceOrientation::LandscapeLeft);
    let preview = h.backend.last_preview().unwrap();
    assert_eq!(preview.video_orientation(), Some(VideoOrientation::LandscapeRight));

    h.screen.transition(DeviceOrientation::FaceUp);
    assert_eq!(preview.video_orientation(), Some(VideoOrientation::Portrait));
}

#[tokio::test]
async fn test_transition_without_orientation_support() {
    let mut h = Harness::new(
        FakeBackend::new().without_orientation_support(),
        ScannerConfig::default(),
    );
    h.appear().await;

    h.screen.transition(DeviceOrientation::LandscapeLeft);
    assert_eq!(h.backend.last_preview().unwrap().video_orientation(), None);
}

#[tokio::test]
async fn test_layout_and_rotation_through_event_queue() {
    let mut h = Harness::with_defaults();
    h.appear().await;

    let events = h.screen.events();
    let rotated = Rect::from_xywh(0.0, 0.0, 568.0, 320.0);
    assert!(events.transition(DeviceOrientation::PortraitUpsideDown));
    assert!(events.layout(rotated));
    assert_eq!(h.screen.run_pending(), 2);

    let preview = h.backend.last_preview().unwrap();
    assert_eq!(preview.bounds(), rotated);
    assert_eq!(
        preview.video_orientation(),
        Some(VideoOrientation::PortraitUpsideDown)
    );
}
