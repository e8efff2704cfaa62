//! In-memory capture backend.
//!
//! Every fake records what was done to it so tests can assert on the
//! exact sequence of session calls, torch changes and preview geometry.
//! Recognized codes are injected with [`FakeSession::emit`] or
//! [`FakeMetadataOutput::emit`].

use crate::{
    CaptureBackend, CaptureDevice, CaptureError, CaptureSession, CodeType, MetadataDelegate,
    MetadataObject, MetadataOutput, PreviewSurface, TorchMode, VideoGravity, VideoOrientation,
};
use qreader_base::{Point, Rect};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

// --- Device ---

#[derive(Debug)]
struct DeviceState {
    locked: bool,
    lock_count: usize,
    torch_mode: TorchMode,
    torch_level: f32,
    low_light_boost: bool,
}

/// Camera with a configurable torch and low-light capability.
///
/// Setters fail with [`CaptureError::Lock`] unless the device is locked,
/// mirroring platform behavior.
#[derive(Debug)]
pub struct FakeDevice {
    name: String,
    has_torch: bool,
    torch_available: bool,
    torch_modes: Vec<TorchMode>,
    low_light_supported: bool,
    lock_fails: AtomicBool,
    state: Mutex<DeviceState>,
}

impl FakeDevice {
    /// A back camera with a working torch and low-light boost.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_torch: true,
            torch_available: true,
            torch_modes: vec![TorchMode::Off, TorchMode::On, TorchMode::Auto],
            low_light_supported: true,
            lock_fails: AtomicBool::new(false),
            state: Mutex::new(DeviceState {
                locked: false,
                lock_count: 0,
                torch_mode: TorchMode::Off,
                torch_level: 0.0,
                low_light_boost: false,
            }),
        }
    }

    pub fn without_torch(mut self) -> Self {
        self.has_torch = false;
        self
    }

    /// Torch hardware present but currently unusable (e.g. overheated).
    pub fn with_torch_unavailable(mut self) -> Self {
        self.torch_available = false;
        self
    }

    pub fn with_torch_modes(mut self, modes: Vec<TorchMode>) -> Self {
        self.torch_modes = modes;
        self
    }

    pub fn without_low_light_boost(mut self) -> Self {
        self.low_light_supported = false;
        self
    }

    /// Make every subsequent `lock_for_configuration` fail (or succeed again).
    pub fn set_lock_fails(&self, fails: bool) {
        self.lock_fails.store(fails, Ordering::SeqCst);
    }

    pub fn torch_level(&self) -> f32 {
        lock(&self.state).torch_level
    }

    pub fn low_light_boost_enabled(&self) -> bool {
        lock(&self.state).low_light_boost
    }

    pub fn is_locked(&self) -> bool {
        lock(&self.state).locked
    }

    /// Number of successful lock acquisitions so far.
    pub fn lock_count(&self) -> usize {
        lock(&self.state).lock_count
    }

    fn require_lock(state: &DeviceState) -> Result<(), CaptureError> {
        if state.locked {
            Ok(())
        } else {
            Err(CaptureError::Lock("device not locked for configuration".to_string()))
        }
    }
}

impl CaptureDevice for FakeDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn lock_for_configuration(&self) -> Result<(), CaptureError> {
        if self.lock_fails.load(Ordering::SeqCst) {
            return Err(CaptureError::Lock(format!("{} is in use", self.name)));
        }
        let mut state = lock(&self.state);
        if state.locked {
            return Err(CaptureError::Lock(format!("{} already locked", self.name)));
        }
        state.locked = true;
        state.lock_count += 1;
        Ok(())
    }

    fn unlock_for_configuration(&self) {
        lock(&self.state).locked = false;
    }

    fn has_torch(&self) -> bool {
        self.has_torch
    }

    fn is_torch_available(&self) -> bool {
        self.torch_available
    }

    fn is_torch_mode_supported(&self, mode: TorchMode) -> bool {
        self.has_torch && self.torch_modes.contains(&mode)
    }

    fn torch_mode(&self) -> TorchMode {
        lock(&self.state).torch_mode
    }

    fn set_torch_mode(&self, mode: TorchMode) -> Result<(), CaptureError> {
        let mut state = lock(&self.state);
        Self::require_lock(&state)?;
        if !self.is_torch_mode_supported(mode) {
            return Err(CaptureError::Torch(format!("mode {mode:?} not supported")));
        }
        state.torch_mode = mode;
        if mode == TorchMode::Off {
            state.torch_level = 0.0;
        }
        Ok(())
    }

    fn set_torch_mode_on_with_level(&self, level: f32) -> Result<(), CaptureError> {
        let mut state = lock(&self.state);
        Self::require_lock(&state)?;
        if !(level > 0.0 && level <= 1.0) {
            return Err(CaptureError::Torch(format!("level {level} out of range")));
        }
        if !self.is_torch_mode_supported(TorchMode::On) {
            return Err(CaptureError::Torch("mode On not supported".to_string()));
        }
        state.torch_mode = TorchMode::On;
        state.torch_level = level;
        Ok(())
    }

    fn is_low_light_boost_supported(&self) -> bool {
        self.low_light_supported
    }

    fn set_automatically_enables_low_light_boost(&self, enabled: bool) {
        let mut state = lock(&self.state);
        if state.locked && self.low_light_supported {
            state.low_light_boost = enabled;
        }
    }
}

// --- Metadata output ---

/// Metadata output that forwards injected batches to its delegate.
pub struct FakeMetadataOutput {
    available: Vec<CodeType>,
    active: Mutex<Vec<CodeType>>,
    delegate: Mutex<Option<Arc<dyn MetadataDelegate>>>,
}

impl FakeMetadataOutput {
    pub fn new(available: Vec<CodeType>) -> Self {
        Self {
            available,
            active: Mutex::new(Vec::new()),
            delegate: Mutex::new(None),
        }
    }

    pub fn has_delegate(&self) -> bool {
        lock(&self.delegate).is_some()
    }

    /// Deliver a batch to the delegate. Returns `false` when none is set.
    pub fn emit(&self, objects: Vec<MetadataObject>) -> bool {
        // Clone out so the delegate may call back into this output.
        let delegate = lock(&self.delegate).clone();
        match delegate {
            Some(delegate) => {
                delegate.did_output(objects);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for FakeMetadataOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeMetadataOutput")
            .field("available", &self.available)
            .field("active", &*lock(&self.active))
            .field("delegate", &self.has_delegate())
            .finish()
    }
}

impl MetadataOutput for FakeMetadataOutput {
    fn available_types(&self) -> Vec<CodeType> {
        self.available.clone()
    }

    fn active_types(&self) -> Vec<CodeType> {
        lock(&self.active).clone()
    }

    fn set_active_types(&self, types: &[CodeType]) -> Result<(), CaptureError> {
        if let Some(missing) = types.iter().find(|t| !self.available.contains(t)) {
            return Err(CaptureError::Unsupported(format!(
                "metadata type {missing} is not available"
            )));
        }
        *lock(&self.active) = types.to_vec();
        Ok(())
    }

    fn set_delegate(&self, delegate: Arc<dyn MetadataDelegate>) {
        *lock(&self.delegate) = Some(delegate);
    }
}

// --- Session ---

/// One recorded call against a [`FakeSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCall {
    BeginConfiguration,
    CommitConfiguration,
    DiscardConfiguration,
    AddInput(String),
    AddMetadataOutput,
    StartRunning,
    StopRunning,
}

#[derive(Debug)]
pub struct FakeSession {
    supported_types: Vec<CodeType>,
    input_error: Option<CaptureError>,
    input_bound: AtomicBool,
    running: AtomicBool,
    calls: Mutex<Vec<SessionCall>>,
    output: Mutex<Option<Arc<FakeMetadataOutput>>>,
}

impl FakeSession {
    pub fn new(supported_types: Vec<CodeType>, input_error: Option<CaptureError>) -> Self {
        Self {
            supported_types,
            input_error,
            input_bound: AtomicBool::new(false),
            running: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
            output: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> Vec<SessionCall> {
        lock(&self.calls).clone()
    }

    pub fn count(&self, call: &SessionCall) -> usize {
        lock(&self.calls).iter().filter(|c| *c == call).count()
    }

    pub fn output(&self) -> Option<Arc<FakeMetadataOutput>> {
        lock(&self.output).clone()
    }

    /// Deliver a batch through the attached output, if any.
    pub fn emit(&self, objects: Vec<MetadataObject>) -> bool {
        match self.output() {
            Some(output) => output.emit(objects),
            None => false,
        }
    }

    fn record(&self, call: SessionCall) {
        lock(&self.calls).push(call);
    }
}

impl CaptureSession for FakeSession {
    fn begin_configuration(&self) {
        self.record(SessionCall::BeginConfiguration);
    }

    fn commit_configuration(&self) {
        self.record(SessionCall::CommitConfiguration);
    }

    fn discard_configuration(&self) {
        self.record(SessionCall::DiscardConfiguration);
    }

    fn add_input(&self, device: &dyn CaptureDevice) -> Result<(), CaptureError> {
        self.record(SessionCall::AddInput(device.name().to_string()));
        if let Some(err) = &self.input_error {
            return Err(err.clone());
        }
        self.input_bound.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn add_metadata_output(&self) -> Arc<dyn MetadataOutput> {
        self.record(SessionCall::AddMetadataOutput);
        // Types are only advertised once an input is bound.
        let available = if self.input_bound.load(Ordering::SeqCst) {
            self.supported_types.clone()
        } else {
            Vec::new()
        };
        let output = Arc::new(FakeMetadataOutput::new(available));
        *lock(&self.output) = Some(output.clone());
        output
    }

    fn start_running(&self) {
        self.record(SessionCall::StartRunning);
        self.running.store(true, Ordering::SeqCst);
    }

    fn stop_running(&self) {
        self.record(SessionCall::StopRunning);
        self.running.store(false, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

// --- Preview ---

#[derive(Debug, Clone, Default)]
struct PreviewState {
    gravity: VideoGravity,
    frame: Rect,
    bounds: Rect,
    position: Point,
    attached: bool,
    orientation: Option<VideoOrientation>,
}

#[derive(Debug)]
pub struct FakePreview {
    supports_orientation: bool,
    state: Mutex<PreviewState>,
}

impl FakePreview {
    pub fn new(supports_orientation: bool) -> Self {
        Self {
            supports_orientation,
            state: Mutex::new(PreviewState::default()),
        }
    }

    pub fn gravity(&self) -> VideoGravity {
        lock(&self.state).gravity
    }

    pub fn frame(&self) -> Rect {
        lock(&self.state).frame
    }

    pub fn bounds(&self) -> Rect {
        lock(&self.state).bounds
    }

    pub fn position(&self) -> Point {
        lock(&self.state).position
    }

    pub fn is_attached(&self) -> bool {
        lock(&self.state).attached
    }

    /// Last orientation set on the connection, if any.
    pub fn video_orientation(&self) -> Option<VideoOrientation> {
        lock(&self.state).orientation
    }
}

impl PreviewSurface for FakePreview {
    fn set_gravity(&self, gravity: VideoGravity) {
        lock(&self.state).gravity = gravity;
    }

    // Like a layer, a frame sets bounds and position together.
    fn set_frame(&self, frame: Rect) {
        let mut state = lock(&self.state);
        state.frame = frame;
        state.bounds = frame.local_bounds();
        state.position = frame.center();
    }

    fn set_bounds(&self, bounds: Rect) {
        let mut state = lock(&self.state);
        state.bounds = bounds;
        state.frame.size = bounds.size;
        state.frame.origin = Point::new(
            state.position.x - bounds.size.width / 2.0,
            state.position.y - bounds.size.height / 2.0,
        );
    }

    fn set_position(&self, position: Point) {
        let mut state = lock(&self.state);
        state.position = position;
        state.frame.origin = Point::new(
            position.x - state.bounds.size.width / 2.0,
            position.y - state.bounds.size.height / 2.0,
        );
    }

    fn attach(&self) {
        lock(&self.state).attached = true;
    }

    fn detach(&self) {
        lock(&self.state).attached = false;
    }

    fn supports_video_orientation(&self) -> bool {
        self.supports_orientation
    }

    fn set_video_orientation(&self, orientation: VideoOrientation) {
        if self.supports_orientation {
            lock(&self.state).orientation = Some(orientation);
        }
    }
}

// --- Backend ---

/// Backend handing out fakes and keeping every session and preview it made.
#[derive(Debug)]
pub struct FakeBackend {
    device: Option<Arc<FakeDevice>>,
    supported_types: Vec<CodeType>,
    input_error: Option<CaptureError>,
    orientation_support: bool,
    sessions: Mutex<Vec<Arc<FakeSession>>>,
    previews: Mutex<Vec<Arc<FakePreview>>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBackend {
    /// A backend with one back camera that recognizes the common 1D and 2D types.
    pub fn new() -> Self {
        Self {
            device: Some(Arc::new(FakeDevice::new("Back Camera"))),
            supported_types: vec![
                CodeType::QR,
                CodeType::AZTEC,
                CodeType::DATA_MATRIX,
                CodeType::PDF_417,
                CodeType::CODE_39,
                CodeType::CODE_93,
                CodeType::CODE_128,
                CodeType::EAN_8,
                CodeType::EAN_13,
                CodeType::UPC_E,
            ],
            input_error: None,
            orientation_support: true,
            sessions: Mutex::new(Vec::new()),
            previews: Mutex::new(Vec::new()),
        }
    }

    pub fn with_device(mut self, device: FakeDevice) -> Self {
        self.device = Some(Arc::new(device));
        self
    }

    pub fn without_device(mut self) -> Self {
        self.device = None;
        self
    }

    pub fn with_supported_types(mut self, types: Vec<CodeType>) -> Self {
        self.supported_types = types;
        self
    }

    /// Make every session reject the device input with `error`.
    pub fn with_input_error(mut self, error: CaptureError) -> Self {
        self.input_error = Some(error);
        self
    }

    pub fn without_orientation_support(mut self) -> Self {
        self.orientation_support = false;
        self
    }

    pub fn device(&self) -> Option<Arc<FakeDevice>> {
        self.device.clone()
    }

    pub fn sessions(&self) -> Vec<Arc<FakeSession>> {
        lock(&self.sessions).clone()
    }

    pub fn last_session(&self) -> Option<Arc<FakeSession>> {
        lock(&self.sessions).last().cloned()
    }

    pub fn previews(&self) -> Vec<Arc<FakePreview>> {
        lock(&self.previews).clone()
    }

    pub fn last_preview(&self) -> Option<Arc<FakePreview>> {
        lock(&self.previews).last().cloned()
    }
}

impl CaptureBackend for FakeBackend {
    fn default_video_device(&self) -> Option<Arc<dyn CaptureDevice>> {
        self.device
            .clone()
            .map(|device| device as Arc<dyn CaptureDevice>)
    }

    fn new_session(&self) -> Arc<dyn CaptureSession> {
        let session = Arc::new(FakeSession::new(
            self.supported_types.clone(),
            self.input_error.clone(),
        ));
        lock(&self.sessions).push(session.clone());
        session
    }

    fn new_preview(&self, _session: &Arc<dyn CaptureSession>) -> Arc<dyn PreviewSurface> {
        let preview = Arc::new(FakePreview::new(self.orientation_support));
        lock(&self.previews).push(preview.clone());
        preview
    }
}
