//! Camera-driven code scanning screen.
//!
//! [`ScannerScreen`] owns a capture session and preview for as long as it
//! is visible, watches the session's metadata output for the configured
//! code types and reports the first new code through its result callback.
//! Users can cancel by swiping down or tapping the cancel control, and a
//! long press lights the torch while held.
//!
//! Hardware access goes through the `qreader-capture` traits; with the
//! `fake` feature of that crate the whole flow runs without a camera.

pub mod config;
pub mod configure;
pub mod error;
pub mod event;
pub mod gesture;
pub mod host;
pub mod orientation;
pub mod outcome;
pub mod screen;
pub mod torch;

pub use config::ScannerConfig;
pub use configure::{configure_capture, ConfigureReport, ConfigureRequest};
pub use error::{ScanError, ScanErrorCode};
pub use event::{ScreenEvent, ScreenEvents};
pub use gesture::{Gesture, GestureState, SwipeDirection, TorchCommand};
pub use host::ScreenHost;
pub use orientation::video_orientation_for;
pub use outcome::{Callbacks, ErrorRoute, Outcome};
pub use screen::ScannerScreen;
