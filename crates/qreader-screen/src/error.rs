use qreader_capture::{CaptureError, CodeType};
use std::fmt;

/// Codes for errors raised by the screen itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum ScanErrorCode {
    UnavailableMetadataObjectType = 1,
    /// `appear` was called with no tokio runtime to run the setup on.
    RuntimeUnavailable = 2,
}

/// Error handed to the error callback: domain, numeric code, message.
///
/// Platform failures keep the platform's domain and code; errors the
/// screen raises use the configured domain and a [`ScanErrorCode`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScanError {
    domain: String,
    code: i64,
    message: String,
}

impl ScanError {
    pub fn new(domain: impl Into<String>, code: i64, message: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            code,
            message: message.into(),
        }
    }

    pub fn unavailable_metadata_object_type(domain: &str, code_type: &CodeType) -> Self {
        Self::new(
            domain,
            ScanErrorCode::UnavailableMetadataObjectType as i64,
            format!("Unable to scan object of type {code_type}"),
        )
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True if this error was raised locally with `code`.
    pub fn is(&self, domain: &str, code: ScanErrorCode) -> bool {
        self.domain == domain && self.code == code as i64
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.message, self.domain, self.code)
    }
}

impl std::error::Error for ScanError {}

impl From<CaptureError> for ScanError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::Input {
                domain,
                code,
                message,
            } => ScanError::new(domain, code, message),
            other => ScanError::new("qreader.capture", 0, other.to_string()),
        }
    }
}
