use crate::configure::ConfigureReport;
use crate::gesture::Gesture;
use qreader_base::Rect;
use qreader_capture::{DeviceOrientation, MetadataDelegate, MetadataObject};
use tokio::sync::mpsc;

/// Work for the UI sequence. Everything that touches screen state
/// arrives through this queue.
#[derive(Debug)]
pub enum ScreenEvent {
    /// Background configuration finished for visible cycle `cycle`.
    Configured { cycle: u64, report: ConfigureReport },
    /// A batch from the metadata output registered in cycle `cycle`.
    Metadata {
        cycle: u64,
        objects: Vec<MetadataObject>,
    },
    Gesture(Gesture),
    /// Screen bounds changed.
    Layout(Rect),
    /// A rotation finished.
    Transition(DeviceOrientation),
}

/// Cloneable handle for posting [`ScreenEvent`]s to a screen.
#[derive(Clone, Debug)]
pub struct ScreenEvents {
    tx: mpsc::UnboundedSender<ScreenEvent>,
}

impl ScreenEvents {
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<ScreenEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns `false` once the screen is gone.
    pub fn send(&self, event: ScreenEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn gesture(&self, gesture: Gesture) -> bool {
        self.send(ScreenEvent::Gesture(gesture))
    }

    pub fn layout(&self, bounds: Rect) -> bool {
        self.send(ScreenEvent::Layout(bounds))
    }

    pub fn transition(&self, orientation: DeviceOrientation) -> bool {
        self.send(ScreenEvent::Transition(orientation))
    }
}

/// Metadata delegate that hops batches onto the UI queue.
pub(crate) struct UiMetadataSink {
    cycle: u64,
    events: ScreenEvents,
}

impl UiMetadataSink {
    pub(crate) fn new(cycle: u64, events: ScreenEvents) -> Self {
        Self { cycle, events }
    }
}

impl MetadataDelegate for UiMetadataSink {
    fn did_output(&self, objects: Vec<MetadataObject>) {
        if !self.events.send(ScreenEvent::Metadata {
            cycle: self.cycle,
            objects,
        }) {
            log::trace!("metadata batch dropped: screen gone");
        }
    }
}
