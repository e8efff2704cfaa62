#![allow(dead_code)]

use qreader_base::Rect;
use qreader_capture::{DeviceOrientation, FakeBackend, FakeSession};
use qreader_screen::{ScanError, ScannerConfig, ScannerScreen, ScreenHost};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

pub const BOUNDS: Rect = Rect::from_xywh(0.0, 0.0, 320.0, 568.0);

#[derive(Default)]
pub struct RecordingHost {
    pub cancel_control: Cell<Option<bool>>,
    pub orientation: Cell<DeviceOrientation>,
}

impl ScreenHost for RecordingHost {
    fn set_cancel_control(&self, installed: bool) {
        self.cancel_control.set(Some(installed));
    }

    fn device_orientation(&self) -> DeviceOrientation {
        self.orientation.get()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fired {
    Result(String),
    Error(ScanError),
    Cancel,
}

pub type Fires = Rc<RefCell<Vec<Fired>>>;

pub struct Harness {
    pub screen: ScannerScreen,
    pub backend: Arc<FakeBackend>,
    pub host: Rc<RecordingHost>,
    pub fired: Fires,
}

impl Harness {
    pub fn new(backend: FakeBackend, config: ScannerConfig) -> Self {
        let backend = Arc::new(backend);
        let host = Rc::new(RecordingHost::default());
        let screen = ScannerScreen::new(config, backend.clone(), host.clone());
        Self {
            screen,
            backend,
            host,
            fired: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeBackend::new(), ScannerConfig::default())
    }

    pub fn on_result(&mut self) -> &mut Self {
        let fired = self.fired.clone();
        self.screen
            .set_on_result(move |_, text| fired.borrow_mut().push(Fired::Result(text.to_string())));
        self
    }

    pub fn on_error(&mut self) -> &mut Self {
        let fired = self.fired.clone();
        self.screen
            .set_on_error(move |_, error| fired.borrow_mut().push(Fired::Error(error.clone())));
        self
    }

    pub fn on_cancel(&mut self) -> &mut Self {
        let fired = self.fired.clone();
        self.screen
            .set_on_cancel(move |_| fired.borrow_mut().push(Fired::Cancel));
        self
    }

    /// Show the screen and apply the background setup report.
    pub async fn appear(&mut self) {
        self.screen.appear(BOUNDS);
        assert!(self.screen.run_once().await, "configuration report expected");
    }

    pub fn session(&self) -> Arc<FakeSession> {
        self.backend.last_session().expect("a session was created")
    }

    pub fn fired(&self) -> Vec<Fired> {
        self.fired.borrow().clone()
    }
}
