use qreader_capture::CodeType;
use std::time::Duration;

/// Configuration for a scanner screen.
///
/// Fixed once the screen is built; the screen keeps its own copy.
#[derive(Clone, Debug)]
pub struct ScannerConfig {
    code_types: Vec<CodeType>,
    title: String,
    torch_level: f32,
    torch_press_duration: Duration,
    error_domain: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            code_types: vec![CodeType::QR],
            title: "QR Code".to_string(),
            torch_level: 0.25,
            torch_press_duration: Duration::from_millis(250),
            error_domain: "qreader.scanner".to_string(),
        }
    }
}

impl ScannerConfig {
    /// Set the code types to recognize, in the order they are checked.
    ///
    /// Duplicates are dropped keeping the first occurrence. An empty list
    /// keeps the default `[CodeType::QR]`.
    pub fn with_code_types(mut self, code_types: impl IntoIterator<Item = CodeType>) -> Self {
        let mut unique: Vec<CodeType> = Vec::new();
        for code_type in code_types {
            if !unique.contains(&code_type) {
                unique.push(code_type);
            }
        }
        if !unique.is_empty() {
            self.code_types = unique;
        }
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the torch brightness used while the long press is held.
    /// Clamped to `0.01..=1.0`.
    pub fn with_torch_level(mut self, level: f32) -> Self {
        self.torch_level = level.clamp(0.01, 1.0);
        self
    }

    /// Set the minimum hold before a long press turns the torch on.
    pub fn with_torch_press_duration(mut self, duration: Duration) -> Self {
        self.torch_press_duration = duration;
        self
    }

    /// Set the domain reported in locally raised errors.
    pub fn with_error_domain(mut self, domain: impl Into<String>) -> Self {
        self.error_domain = domain.into();
        self
    }

    // Getters
    pub fn code_types(&self) -> &[CodeType] {
        &self.code_types
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn torch_level(&self) -> f32 {
        self.torch_level
    }

    pub fn torch_press_duration(&self) -> Duration {
        self.torch_press_duration
    }

    pub fn error_domain(&self) -> &str {
        &self.error_domain
    }
}
