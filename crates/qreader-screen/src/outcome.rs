use crate::{ScanError, ScannerScreen};

pub type ResultCallback = Box<dyn FnMut(&ScannerScreen, &str)>;
pub type ErrorCallback = Box<dyn FnMut(&ScannerScreen, &ScanError)>;
pub type CancelCallback = Box<dyn FnMut(&ScannerScreen)>;

/// How a scan run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Result(String),
    Error(ScanError),
    Cancel,
}

/// The three optional outcome slots registered by whoever presents the screen.
#[derive(Default)]
pub struct Callbacks {
    result: Option<ResultCallback>,
    error: Option<ErrorCallback>,
    cancel: Option<CancelCallback>,
}

impl Callbacks {
    pub fn set_result(&mut self, callback: Option<ResultCallback>) {
        self.result = callback;
    }

    pub fn set_error(&mut self, callback: Option<ErrorCallback>) {
        self.error = callback;
    }

    pub fn set_cancel(&mut self, callback: Option<CancelCallback>) {
        self.cancel = callback;
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn has_cancel(&self) -> bool {
        self.cancel.is_some()
    }

    /// Call the slot matching `outcome`. Returns `false` if it is empty.
    pub(crate) fn invoke(&mut self, screen: &ScannerScreen, outcome: &Outcome) -> bool {
        match outcome {
            Outcome::Result(text) => match self.result.as_mut() {
                Some(callback) => {
                    callback(screen, text);
                    true
                }
                None => false,
            },
            Outcome::Error(error) => match self.error.as_mut() {
                Some(callback) => {
                    callback(screen, error);
                    true
                }
                None => false,
            },
            Outcome::Cancel => match self.cancel.as_mut() {
                Some(callback) => {
                    callback(screen);
                    true
                }
                None => false,
            },
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("result", &self.has_result())
            .field("error", &self.has_error())
            .field("cancel", &self.has_cancel())
            .finish()
    }
}

/// Where configuration errors go for the current visible cycle.
///
/// Resolved once per `appear`: a registered error callback wins; without
/// one, a registered cancel callback turns errors into a cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorRoute {
    Callback,
    DegradeToCancel,
    Unhandled,
}

impl ErrorRoute {
    pub fn resolve(callbacks: &Callbacks) -> Self {
        if callbacks.has_error() {
            ErrorRoute::Callback
        } else if callbacks.has_cancel() {
            ErrorRoute::DegradeToCancel
        } else {
            ErrorRoute::Unhandled
        }
    }
}

/// Admits at most one automatic outcome (result or error) per scan run.
///
/// Armed when a run begins, closed by the first claim.
#[derive(Debug, Default)]
pub struct OutcomeGate {
    armed: bool,
}

impl OutcomeGate {
    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn close(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Take the single slot for this run. `false` if already taken.
    pub fn claim(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_admits_one_claim_per_arm() {
        let mut gate = OutcomeGate::default();
        assert!(!gate.is_armed());
        assert!(!gate.claim());

        gate.arm();
        assert!(gate.is_armed());
        assert!(gate.claim());
        assert!(!gate.is_armed());
        assert!(!gate.claim());
    }

    #[test]
    fn test_close_disarms_gate() {
        let mut gate = OutcomeGate::default();
        gate.arm();
        gate.close();
        assert!(!gate.claim());
    }

    #[test]
    fn test_route_prefers_error_callback() {
        let mut callbacks = Callbacks::default();
        assert_eq!(ErrorRoute::resolve(&callbacks), ErrorRoute::Unhandled);

        callbacks.set_cancel(Some(Box::new(|_: &ScannerScreen| {})));
        assert_eq!(ErrorRoute::resolve(&callbacks), ErrorRoute::DegradeToCancel);

        callbacks.set_error(Some(Box::new(|_: &ScannerScreen, _: &ScanError| {})));
        assert_eq!(ErrorRoute::resolve(&callbacks), ErrorRoute::Callback);
    }
}
