use qreader_capture::CodeType;
use qreader_screen::ScannerConfig;
use std::time::Duration;

#[test]
fn test_defaults() {
    let config = ScannerConfig::default();
    assert_eq!(config.code_types(), &[CodeType::QR]);
    assert_eq!(config.title(), "QR Code");
    assert_eq!(config.torch_level(), 0.25);
    assert_eq!(config.torch_press_duration(), Duration::from_millis(250));
    assert_eq!(config.error_domain(), "qreader.scanner");
}

#[test]
fn test_code_types_keep_order_and_drop_duplicates() {
    let config = ScannerConfig::default().with_code_types([
        CodeType::EAN_13,
        CodeType::QR,
        CodeType::EAN_13,
        CodeType::CODE_128,
    ]);
    assert_eq!(
        config.code_types(),
        &[CodeType::EAN_13, CodeType::QR, CodeType::CODE_128]
    );
}

#[test]
fn test_empty_code_types_keep_default() {
    let config = ScannerConfig::default().with_code_types(Vec::new());
    assert_eq!(config.code_types(), &[CodeType::QR]);
}

#[test]
fn test_torch_level_is_clamped() {
    assert_eq!(ScannerConfig::default().with_torch_level(3.0).torch_level(), 1.0);
    assert_eq!(ScannerConfig::default().with_torch_level(0.0).torch_level(), 0.01);
    assert_eq!(ScannerConfig::default().with_torch_level(0.5).torch_level(), 0.5);
}

#[test]
fn test_builder_setters() {
    let config = ScannerConfig::default()
        .with_title("Scan ticket")
        .with_torch_press_duration(Duration::from_millis(400))
        .with_error_domain("com.example.tickets");
    assert_eq!(config.title(), "Scan ticket");
    assert_eq!(config.torch_press_duration(), Duration::from_millis(400));
    assert_eq!(config.error_domain(), "com.example.tickets");
}
