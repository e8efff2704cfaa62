/// Recognizer state as reported by the host's gesture system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

/// What a long-press state change asks of the torch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorchCommand {
    On,
    Off,
}

/// Hold to light: the torch follows the press.
pub fn torch_command_for(state: GestureState) -> Option<TorchCommand> {
    match state {
        GestureState::Began => Some(TorchCommand::On),
        GestureState::Ended | GestureState::Cancelled | GestureState::Failed => {
            Some(TorchCommand::Off)
        }
        GestureState::Possible | GestureState::Changed => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Gestures and control taps the host forwards to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    LongPress(GestureState),
    Swipe(SwipeDirection),
    CancelTapped,
}
