use qreader_base::log;
use qreader_capture::{
    CaptureDevice, CaptureError, CodeType, DeviceOrientation, FakeBackend, FakeDevice,
    MetadataObject,
};
use qreader_screen::{
    Gesture, GestureState, ScannerConfig, ScannerScreen, ScreenHost, SwipeDirection,
};
use scan_console::{code_type_from_name, parse_command, Command, HELP};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Default)]
struct ConsoleHost {
    orientation: Cell<DeviceOrientation>,
}

impl ScreenHost for ConsoleHost {
    fn set_cancel_control(&self, installed: bool) {
        println!("[nav] cancel control {}", if installed { "shown" } else { "hidden" });
    }

    fn device_orientation(&self) -> DeviceOrientation {
        self.orientation.get()
    }
}

struct Flags {
    types: Vec<CodeType>,
    torch_level: Option<f32>,
    fail_input: bool,
    no_device: bool,
    no_torch: bool,
    cancel_only: bool,
    log_dir: Option<String>,
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    let types: Option<String> = args.opt_value_from_str("--types")?;
    Ok(Flags {
        types: types
            .map(|list| list.split(',').map(code_type_from_name).collect())
            .unwrap_or_default(),
        torch_level: args.opt_value_from_str("--torch-level")?,
        fail_input: args.contains("--fail-input"),
        no_device: args.contains("--no-device"),
        no_torch: args.contains("--no-torch"),
        cancel_only: args.contains("--cancel-only"),
        log_dir: args.opt_value_from_str("--log-dir")?,
    })
}

fn build_backend(flags: &Flags) -> FakeBackend {
    let mut device = FakeDevice::new("Simulated Camera");
    if flags.no_torch {
        device = device.without_torch();
    }

    let mut backend = FakeBackend::new().with_device(device);
    if flags.no_device {
        backend = backend.without_device();
    }
    if flags.fail_input {
        backend = backend.with_input_error(CaptureError::input(
            "scan-console",
            -1,
            "camera access denied",
        ));
    }
    backend
}

fn print_status(screen: &ScannerScreen, backend: &FakeBackend) {
    println!("visible:    {}", screen.is_visible());
    println!("configured: {}", screen.is_configured());
    println!("running:    {}", screen.is_running());
    println!("last:       {:?}", screen.last_result());
    println!("route:      {:?}", screen.error_route());
    if let Some(device) = backend.device() {
        println!(
            "torch:      {:?} @ {:.2}",
            device.torch_mode(),
            device.torch_level()
        );
    }
    if let Some(preview) = backend.last_preview() {
        println!(
            "preview:    {:?} attached={} orientation={:?}",
            preview.frame(),
            preview.is_attached(),
            preview.video_orientation()
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let flags = parse_flags()?;
    match &flags.log_dir {
        Some(dir) => qreader_base::init_file_logger(dir)?,
        None => qreader_base::init_stdout_logger(),
    }

    let mut config = ScannerConfig::default().with_code_types(flags.types.clone());
    if let Some(level) = flags.torch_level {
        config = config.with_torch_level(level);
    }

    let backend = Arc::new(build_backend(&flags));
    let host = Rc::new(ConsoleHost::default());
    let mut screen = ScannerScreen::new(config, backend.clone(), host.clone());

    screen.set_on_cancel(|_| println!("=> cancelled"));
    if !flags.cancel_only {
        screen.set_on_result(|screen, text| println!("=> {} result: {text}", screen.title()));
        screen.set_on_error(|_, error| println!("=> error: {error}"));
    }

    log::info!("scan console ready, types {:?}", screen.code_types());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e} (try `help`)");
                continue;
            }
        };

        match command {
            Command::Show(bounds) => {
                screen.appear(bounds);
                // Wait for the background setup report.
                screen.run_once().await;
            }
            Command::Hide => screen.disappear(),
            Command::Code(code_type, text) => match backend.last_session() {
                Some(session) if screen.is_visible() => {
                    if !session.emit(vec![MetadataObject::new(code_type, text)]) {
                        println!("metadata output is not configured");
                    }
                }
                _ => println!("screen is hidden"),
            },
            Command::Press => screen.handle_gesture(Gesture::LongPress(GestureState::Began)),
            Command::Release => screen.handle_gesture(Gesture::LongPress(GestureState::Ended)),
            Command::Swipe => screen.handle_gesture(Gesture::Swipe(SwipeDirection::Down)),
            Command::Cancel => screen.handle_gesture(Gesture::CancelTapped),
            Command::Rotate(orientation) => {
                host.orientation.set(orientation);
                screen.transition(orientation);
            }
            Command::Resize(bounds) => screen.layout(bounds),
            Command::Resume => {
                if !screen.resume_scanning() {
                    println!("nothing to resume");
                }
            }
            Command::Status => print_status(&screen, &backend),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }

        screen.run_pending();
    }

    screen.disappear();
    Ok(())
}
