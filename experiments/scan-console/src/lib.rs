//! Line commands for driving a scanner screen from a terminal.

use qreader_base::Rect;
use qreader_capture::{CodeType, DeviceOrientation};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show(Rect),
    Hide,
    /// Feed one recognized code through the metadata output.
    Code(CodeType, String),
    Press,
    Release,
    Swipe,
    Cancel,
    Rotate(DeviceOrientation),
    Resize(Rect),
    Resume,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError(pub String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

pub const DEFAULT_BOUNDS: Rect = Rect::from_xywh(0.0, 0.0, 390.0, 844.0);

pub const HELP: &str = "\
commands:
  show [w h]          make the screen visible (default 390x844)
  hide                hide the screen
  qr <text>           recognize a QR code
  code <type> <text>  recognize a code of any type (qr, ean13, ean8, code128, aztec, ...)
  press / release     long press for the torch
  swipe               swipe down (cancel)
  cancel              tap the cancel control
  rotate <o>          portrait | upside-down | left | right | face-up
  resize <w> <h>      change screen bounds
  resume              restart scanning after a result
  status              print screen state
  quit";

/// Short symbology names accepted on the command line.
pub fn code_type_from_name(name: &str) -> CodeType {
    match name.to_ascii_lowercase().as_str() {
        "qr" => CodeType::QR,
        "aztec" => CodeType::AZTEC,
        "datamatrix" => CodeType::DATA_MATRIX,
        "pdf417" => CodeType::PDF_417,
        "code39" => CodeType::CODE_39,
        "code93" => CodeType::CODE_93,
        "code128" => CodeType::CODE_128,
        "ean8" => CodeType::EAN_8,
        "ean13" => CodeType::EAN_13,
        "upce" => CodeType::UPC_E,
        "itf14" => CodeType::ITF_14,
        "i2of5" => CodeType::INTERLEAVED_2_OF_5,
        _ => CodeType::new(name),
    }
}

fn parse_size(w: Option<&str>, h: Option<&str>) -> Result<Rect, ParseError> {
    let parse = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| ParseError(format!("not a number: {s}")))
    };
    match (w, h) {
        (Some(w), Some(h)) => Ok(Rect::from_xywh(0.0, 0.0, parse(w)?, parse(h)?)),
        _ => Err(ParseError("expected <width> <height>".to_string())),
    }
}

fn parse_orientation(name: Option<&str>) -> Result<DeviceOrientation, ParseError> {
    match name {
        Some("portrait") => Ok(DeviceOrientation::Portrait),
        Some("upside-down") => Ok(DeviceOrientation::PortraitUpsideDown),
        Some("left") => Ok(DeviceOrientation::LandscapeLeft),
        Some("right") => Ok(DeviceOrientation::LandscapeRight),
        Some("face-up") => Ok(DeviceOrientation::FaceUp),
        Some("face-down") => Ok(DeviceOrientation::FaceDown),
        Some(other) => Err(ParseError(format!("unknown orientation: {other}"))),
        None => Err(ParseError("expected an orientation".to_string())),
    }
}

/// Parse one input line. Code text keeps its inner spaces.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let mut args = rest.split_whitespace();

    match word {
        "show" => {
            if rest.is_empty() {
                Ok(Command::Show(DEFAULT_BOUNDS))
            } else {
                parse_size(args.next(), args.next()).map(Command::Show)
            }
        }
        "hide" => Ok(Command::Hide),
        "qr" if !rest.is_empty() => Ok(Command::Code(CodeType::QR, rest.to_string())),
        "code" => {
            let (kind, text) = rest
                .split_once(' ')
                .ok_or_else(|| ParseError("expected <type> <text>".to_string()))?;
            Ok(Command::Code(code_type_from_name(kind), text.trim().to_string()))
        }
        "press" => Ok(Command::Press),
        "release" => Ok(Command::Release),
        "swipe" => Ok(Command::Swipe),
        "cancel" => Ok(Command::Cancel),
        "rotate" => parse_orientation(args.next()).map(Command::Rotate),
        "resize" => parse_size(args.next(), args.next()).map(Command::Resize),
        "resume" => Ok(Command::Resume),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "qr" => Err(ParseError("expected qr <text>".to_string())),
        "" => Err(ParseError("empty command".to_string())),
        other => Err(ParseError(format!("unknown command: {other}"))),
    }
}
