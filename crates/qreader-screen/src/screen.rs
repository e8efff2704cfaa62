use crate::configure::{configure_capture, ConfigureReport, ConfigureRequest};
use crate::event::{ScreenEvent, ScreenEvents, UiMetadataSink};
use crate::gesture::{torch_command_for, Gesture, SwipeDirection, TorchCommand};
use crate::orientation::video_orientation_for;
use crate::outcome::{Callbacks, ErrorRoute, Outcome, OutcomeGate};
use crate::{torch, ScanError, ScanErrorCode, ScannerConfig, ScreenHost};
use qreader_base::Rect;
use qreader_capture::{
    CaptureBackend, CaptureDevice, CaptureSession, CodeType, DeviceOrientation, MetadataObject,
    PreviewSurface, VideoGravity,
};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Camera screen that reports the first recognized code.
///
/// The screen lives on a single UI sequence. Lifecycle calls (`appear`,
/// `disappear`, `layout`, ...) are made there directly; everything that
/// originates elsewhere (background setup, recognized codes, forwarded
/// gestures) is queued and applied by [`run_once`](Self::run_once) or
/// [`run_pending`](Self::run_pending).
///
/// Each `appear` starts a new visible cycle with a fresh session, device
/// and preview. At most one automatic outcome (result or error) is
/// delivered per scan run; hiding the screen silences it until the next
/// `appear`.
///
/// `appear()` spawns the capture setup on tokio's blocking pool. Outside
/// a tokio runtime the setup cannot start and the cycle fails with
/// [`ScanErrorCode::RuntimeUnavailable`].
pub struct ScannerScreen {
    config: ScannerConfig,
    backend: Arc<dyn CaptureBackend>,
    host: Rc<dyn ScreenHost>,
    callbacks: Callbacks,
    error_route: ErrorRoute,
    gate: OutcomeGate,
    last_result: Option<String>,
    cycle: u64,
    visible: bool,
    configured: bool,
    cancelled: bool,
    bounds: Rect,
    session: Option<Arc<dyn CaptureSession>>,
    device: Option<Arc<dyn CaptureDevice>>,
    preview: Option<Arc<dyn PreviewSurface>>,
    events: ScreenEvents,
    receiver: mpsc::UnboundedReceiver<ScreenEvent>,
}

impl std::fmt::Debug for ScannerScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScannerScreen")
            .field("config", &self.config)
            .field("callbacks", &self.callbacks)
            .field("error_route", &self.error_route)
            .field("gate", &self.gate)
            .field("last_result", &self.last_result)
            .field("cycle", &self.cycle)
            .field("visible", &self.visible)
            .field("configured", &self.configured)
            .field("cancelled", &self.cancelled)
            .field("session", &self.session.is_some())
            .field("device", &self.device.as_ref().map(|d| d.name().to_string()))
            .field("preview", &self.preview.is_some())
            .finish()
    }
}

impl ScannerScreen {
    pub fn new(
        config: ScannerConfig,
        backend: Arc<dyn CaptureBackend>,
        host: Rc<dyn ScreenHost>,
    ) -> Self {
        let (events, receiver) = ScreenEvents::channel();
        Self {
            config,
            backend,
            host,
            callbacks: Callbacks::default(),
            error_route: ErrorRoute::Unhandled,
            gate: OutcomeGate::default(),
            last_result: None,
            cycle: 0,
            visible: false,
            configured: false,
            cancelled: false,
            bounds: Rect::zero(),
            session: None,
            device: None,
            preview: None,
            events,
            receiver,
        }
    }

    // --- Callbacks ---

    pub fn set_on_result(&mut self, callback: impl FnMut(&ScannerScreen, &str) + 'static) {
        self.callbacks.set_result(Some(Box::new(callback)));
    }

    pub fn set_on_error(&mut self, callback: impl FnMut(&ScannerScreen, &ScanError) + 'static) {
        self.callbacks.set_error(Some(Box::new(callback)));
    }

    pub fn set_on_cancel(&mut self, callback: impl FnMut(&ScannerScreen) + 'static) {
        self.callbacks.set_cancel(Some(Box::new(callback)));
    }

    /// Direct access to the slots, e.g. to clear one. Takes effect for the
    /// error route at the next `appear`.
    pub fn callbacks_mut(&mut self) -> &mut Callbacks {
        &mut self.callbacks
    }

    // --- Accessors ---

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn code_types(&self) -> &[CodeType] {
        self.config.code_types()
    }

    pub fn title(&self) -> &str {
        self.config.title()
    }

    /// The scanner is always full screen.
    pub fn prefers_status_bar_hidden(&self) -> bool {
        true
    }

    /// Minimum hold the host should configure on its long-press recognizer.
    pub fn torch_press_duration(&self) -> Duration {
        self.config.torch_press_duration()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// True once background setup succeeded in the current cycle.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_running())
    }

    pub fn last_result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    pub fn error_route(&self) -> ErrorRoute {
        self.error_route
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn session(&self) -> Option<&Arc<dyn CaptureSession>> {
        self.session.as_ref()
    }

    pub fn device(&self) -> Option<&Arc<dyn CaptureDevice>> {
        self.device.as_ref()
    }

    pub fn preview(&self) -> Option<&Arc<dyn PreviewSurface>> {
        self.preview.as_ref()
    }

    /// Handle for posting gestures and layout changes from elsewhere.
    pub fn events(&self) -> ScreenEvents {
        self.events.clone()
    }

    // --- Lifecycle ---

    /// The screen is about to become visible with `bounds`.
    ///
    /// Starts a new cycle: resets dedup state, resolves the error route,
    /// creates a session and preview, and kicks off background setup.
    /// The session starts once the setup report has been applied.
    pub fn appear(&mut self, bounds: Rect) {
        if self.visible {
            self.disappear();
        }

        self.cycle += 1;
        self.visible = true;
        self.configured = false;
        self.cancelled = false;
        self.bounds = bounds;

        self.host.set_cancel_control(self.callbacks.has_cancel());
        self.last_result = None;
        self.error_route = ErrorRoute::resolve(&self.callbacks);
        self.gate.arm();

        let session = self.backend.new_session();
        let preview = self.backend.new_preview(&session);
        preview.set_gravity(VideoGravity::ResizeAspectFill);
        preview.set_frame(bounds);

        let request = ConfigureRequest {
            backend: self.backend.clone(),
            session: session.clone(),
            code_types: self.config.code_types().to_vec(),
            error_domain: self.config.error_domain().to_string(),
            delegate: Arc::new(UiMetadataSink::new(self.cycle, self.events.clone())),
        };
        let events = self.events.clone();
        let cycle = self.cycle;
        let runtime = tokio::runtime::Handle::try_current();
        if let Ok(handle) = &runtime {
            handle.spawn_blocking(move || {
                let report = configure_capture(request);
                if !events.send(ScreenEvent::Configured { cycle, report }) {
                    log::debug!("configuration for cycle {cycle} finished after screen was dropped");
                }
            });
        }

        preview.attach();
        self.session = Some(session);
        self.preview = Some(preview);

        log::info!(
            "scanner cycle {} started for {:?}",
            self.cycle,
            self.config.code_types()
        );

        if let Err(e) = runtime {
            log::error!("cannot start capture setup: {e}");
            let error = ScanError::new(
                self.config.error_domain(),
                ScanErrorCode::RuntimeUnavailable as i64,
                "Capture setup requires a running tokio runtime",
            );
            self.fail(error);
        }
    }

    /// The screen is about to be hidden. Tears down the preview, session
    /// and device. No callback fires.
    pub fn disappear(&mut self) {
        if !self.visible {
            return;
        }

        if let Some(preview) = self.preview.take() {
            preview.detach();
        }
        if let Some(session) = self.session.take() {
            session.stop_running();
        }
        self.device = None;
        self.visible = false;
        self.configured = false;
        self.gate.close();

        // Anything still queued belongs to the cycle that just ended.
        let mut dropped = 0;
        while self.receiver.try_recv().is_ok() {
            dropped += 1;
        }

        log::info!("scanner cycle {} ended ({dropped} pending event(s) dropped)", self.cycle);
    }

    /// Screen bounds changed: make the preview fill them exactly.
    pub fn layout(&mut self, bounds: Rect) {
        self.bounds = bounds;
        if let Some(preview) = &self.preview {
            preview.set_bounds(bounds);
            preview.set_position(bounds.center());
        }
    }

    /// A rotation to `orientation` finished.
    pub fn transition(&mut self, orientation: DeviceOrientation) {
        if let Some(preview) = &self.preview {
            if preview.supports_video_orientation() {
                preview.set_video_orientation(video_orientation_for(orientation));
            }
        }
    }

    /// Restart a session stopped by a delivered result, keeping dedup state.
    ///
    /// Returns `false` if the screen is hidden, not configured yet, or
    /// already running.
    pub fn resume_scanning(&mut self) -> bool {
        if !self.visible || !self.configured {
            return false;
        }
        let Some(session) = &self.session else {
            return false;
        };
        if session.is_running() {
            return false;
        }
        self.gate.arm();
        session.start_running();
        log::debug!("scanning resumed in cycle {}", self.cycle);
        true
    }

    // --- Gestures ---

    pub fn handle_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::LongPress(state) => match torch_command_for(state) {
                Some(TorchCommand::On) => {
                    self.turn_torch_on();
                }
                Some(TorchCommand::Off) => {
                    self.turn_torch_off();
                }
                None => {}
            },
            Gesture::Swipe(SwipeDirection::Down) | Gesture::CancelTapped => self.cancel(),
            Gesture::Swipe(_) => {}
        }
    }

    /// Returns `true` if the torch was switched on.
    pub fn turn_torch_on(&self) -> bool {
        match &self.device {
            Some(device) => torch::turn_on(device.as_ref(), self.config.torch_level()),
            None => false,
        }
    }

    /// Returns `true` if the torch was switched off.
    pub fn turn_torch_off(&self) -> bool {
        match &self.device {
            Some(device) => torch::turn_off(device.as_ref()),
            None => false,
        }
    }

    /// User cancel: stop the session and report `Cancel`, whatever the
    /// scan state. Ignored while hidden.
    pub fn cancel(&mut self) {
        if !self.visible {
            log::debug!("cancel ignored: screen hidden");
            return;
        }
        self.stop_session();
        self.cancelled = true;
        self.gate.close();
        self.deliver(Outcome::Cancel);
    }

    // --- UI queue ---

    /// Wait for the next queued event and apply it.
    pub async fn run_once(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Apply every event already queued without waiting. Returns how many
    /// were applied.
    pub fn run_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.receiver.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    pub fn handle_event(&mut self, event: ScreenEvent) {
        match event {
            ScreenEvent::Configured { cycle, report } => self.apply_configuration(cycle, report),
            ScreenEvent::Metadata { cycle, objects } => self.handle_metadata(cycle, &objects),
            ScreenEvent::Gesture(gesture) => self.handle_gesture(gesture),
            ScreenEvent::Layout(bounds) => self.layout(bounds),
            ScreenEvent::Transition(orientation) => self.transition(orientation),
        }
    }

    fn is_current(&self, cycle: u64) -> bool {
        self.visible && cycle == self.cycle
    }

    /// The UI half of setup: adopt the device and start, or report failure.
    fn apply_configuration(&mut self, cycle: u64, report: ConfigureReport) {
        if !self.is_current(cycle) {
            log::debug!("dropping configuration for stale cycle {cycle}");
            return;
        }

        match report {
            ConfigureReport::Ready { device } => {
                self.device = Some(device);
                if let Some(preview) = &self.preview {
                    if preview.supports_video_orientation() {
                        let orientation = self.host.device_orientation();
                        preview.set_video_orientation(video_orientation_for(orientation));
                    }
                }
                self.configured = true;
                if self.cancelled {
                    log::info!("cycle {cycle} configured after cancel, session stays stopped");
                    return;
                }
                if let Some(session) = &self.session {
                    session.start_running();
                }
                self.gate.arm();
                log::info!("scanning started in cycle {cycle}");
            }
            ConfigureReport::Failed { device, error } => {
                self.device = Some(device);
                self.fail(error);
            }
            ConfigureReport::NoDevice => {
                log::warn!("no video capture device available");
            }
        }
    }

    fn fail(&mut self, error: ScanError) {
        match self.error_route {
            ErrorRoute::Callback => {
                if self.gate.claim() {
                    self.stop_session();
                    self.deliver(Outcome::Error(error));
                }
            }
            ErrorRoute::DegradeToCancel => {
                if self.gate.claim() {
                    log::warn!("scanner error reported as cancel: {error}");
                    self.stop_session();
                    self.deliver(Outcome::Cancel);
                }
            }
            ErrorRoute::Unhandled => {
                log::error!("unhandled scanner error: {error}");
            }
        }
    }

    /// Recognition sink: first configured type in the batch wins.
    fn handle_metadata(&mut self, cycle: u64, objects: &[MetadataObject]) {
        if !self.is_current(cycle) {
            return;
        }

        let code_types = self.config.code_types();
        let Some(found) = objects.iter().find(|o| code_types.contains(&o.code_type)) else {
            return;
        };
        let Some(text) = found.string_value.as_deref() else {
            return;
        };

        if self.last_result.as_deref() == Some(text) {
            return;
        }
        if !self.gate.claim() {
            log::debug!("ignoring {text:?}: outcome already delivered for this run");
            return;
        }

        let text = text.to_string();
        self.last_result = Some(text.clone());
        self.stop_session();
        log::info!("recognized {} code", found.code_type);
        self.deliver(Outcome::Result(text));
    }

    fn stop_session(&self) {
        if let Some(session) = &self.session {
            session.stop_running();
        }
    }

    /// Call the matching callback with `&self`. The slots are moved out for
    /// the duration of the call.
    fn deliver(&mut self, outcome: Outcome) {
        let mut callbacks = std::mem::take(&mut self.callbacks);
        let handled = callbacks.invoke(self, &outcome);
        self.callbacks = callbacks;

        if !handled {
            log::debug!("no callback registered for {outcome:?}");
        }
    }
}

impl Drop for ScannerScreen {
    fn drop(&mut self) {
        self.disappear();
    }
}
