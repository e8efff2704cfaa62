use std::borrow::Cow;
use std::fmt;

/// Identifier of a machine-readable code symbology.
///
/// Values use the reverse-DNS names capture pipelines report
/// (`org.iso.QRCode`, `org.gs1.EAN-13`, ...). Backends that use other
/// names can build their own with [`CodeType::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeType(Cow<'static, str>);

impl CodeType {
    pub const QR: CodeType = CodeType(Cow::Borrowed("org.iso.QRCode"));
    pub const AZTEC: CodeType = CodeType(Cow::Borrowed("org.iso.Aztec"));
    pub const DATA_MATRIX: CodeType = CodeType(Cow::Borrowed("org.iso.DataMatrix"));
    pub const PDF_417: CodeType = CodeType(Cow::Borrowed("org.iso.PDF417"));
    pub const CODE_39: CodeType = CodeType(Cow::Borrowed("org.iso.Code39"));
    pub const CODE_93: CodeType = CodeType(Cow::Borrowed("com.intermec.Code93"));
    pub const CODE_128: CodeType = CodeType(Cow::Borrowed("org.iso.Code128"));
    pub const EAN_8: CodeType = CodeType(Cow::Borrowed("org.gs1.EAN-8"));
    pub const EAN_13: CodeType = CodeType(Cow::Borrowed("org.gs1.EAN-13"));
    pub const UPC_E: CodeType = CodeType(Cow::Borrowed("org.gs1.UPC-E"));
    pub const ITF_14: CodeType = CodeType(Cow::Borrowed("org.gs1.ITF14"));
    pub const INTERLEAVED_2_OF_5: CodeType = CodeType(Cow::Borrowed("org.ansi.Interleaved2of5"));

    pub fn new(name: impl Into<String>) -> Self {
        CodeType(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CodeType {
    fn default() -> Self {
        CodeType::QR
    }
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CodeType {
    fn from(name: &str) -> Self {
        CodeType::new(name)
    }
}

/// One recognized code reported by a metadata output.
///
/// `string_value` is `None` when the pipeline recognized the symbology
/// but could not produce a string (e.g. binary payloads).
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataObject {
    pub code_type: CodeType,
    pub string_value: Option<String>,
}

impl MetadataObject {
    pub fn new(code_type: CodeType, value: impl Into<String>) -> Self {
        Self {
            code_type,
            string_value: Some(value.into()),
        }
    }

    pub fn unreadable(code_type: CodeType) -> Self {
        Self {
            code_type,
            string_value: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorchMode {
    Off,
    On,
    Auto,
}

/// Physical orientation reported by the host device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceOrientation {
    #[default]
    Unknown,
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
    FaceUp,
    FaceDown,
}

/// Orientation applied to a capture connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoOrientation {
    #[default]
    Portrait,
    PortraitUpsideDown,
    LandscapeRight,
    LandscapeLeft,
}

/// How the preview scales video into its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoGravity {
    Resize,
    ResizeAspect,
    #[default]
    ResizeAspectFill,
}
