use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureError {
    /// The device could not be bound to a session. Carries the platform's
    /// own error identity so it can be passed through unchanged.
    Input {
        domain: String,
        code: i64,
        message: String,
    },
    /// Exclusive configuration lock could not be acquired.
    Lock(String),
    /// Torch mode or level was rejected by the device.
    Torch(String),
    Unsupported(String),
}

impl CaptureError {
    pub fn input(domain: impl Into<String>, code: i64, message: impl Into<String>) -> Self {
        CaptureError::Input {
            domain: domain.into(),
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Input {
                domain,
                code,
                message,
            } => write!(f, "input error ({domain} {code}): {message}"),
            CaptureError::Lock(msg) => write!(f, "lock error: {msg}"),
            CaptureError::Torch(msg) => write!(f, "torch error: {msg}"),
            CaptureError::Unsupported(msg) => write!(f, "unsupported: {msg}"),
        }
    }
}

impl std::error::Error for CaptureError {}
