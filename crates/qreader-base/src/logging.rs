use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

/// Writes one line per record to stdout.
pub struct StdoutLogger {
    level: LevelFilter,
}

impl StdoutLogger {
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

/// Appends records to `<dir>/<YYYY-MM-DD>.log`, reopening when the UTC date changes.
pub struct FileLogger {
    level: LevelFilter,
    dir: PathBuf,
    sink: Mutex<(String, File)>,
}

impl FileLogger {
    pub fn new(dir: impl Into<PathBuf>, level: LevelFilter) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let date = utc_date(now_secs());
        let file = open_day_file(&dir, &date)?;
        Ok(Self {
            level,
            dir,
            sink: Mutex::new((date, file)),
        })
    }

    /// Directory the day files are written to.
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

/// Keeps formatted lines in memory. Used by tests that assert on log output.
#[derive(Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|line| line.contains(needle))
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{}", format_record(record));
        }
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());

        let today = utc_date(now_secs());
        if today != sink.0 {
            match open_day_file(&self.dir, &today) {
                Ok(file) => *sink = (today, file),
                // keep writing to the previous day's file
                Err(e) => eprintln!("log rollover to {today} failed: {e}"),
            }
        }

        let line = format_record(record);
        if let Err(e) = writeln!(sink.1, "{line}") {
            eprintln!("log write failed: {e}");
            eprintln!("{line}");
        }
    }

    fn flush(&self) {
        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        sink.1.flush().ok();
    }
}

impl Log for MemoryLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let line = format_record(record);
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line);
    }

    fn flush(&self) {}
}

/// `2026-10-17T08:30:00Z WARN qreader_screen::screen - message`
pub fn format_record(record: &Record) -> String {
    format!(
        "{} {:<5} {} - {}",
        utc_timestamp(now_secs()),
        record.level(),
        record.target(),
        record.args()
    )
}

fn open_day_file(dir: &std::path::Path, date: &str) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(format!("{date}.log")))
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// `YYYY-MM-DDTHH:MM:SSZ` for the given seconds since the Unix epoch.
pub fn utc_timestamp(secs: u64) -> String {
    let tod = secs % 86_400;
    format!(
        "{}T{:02}:{:02}:{:02}Z",
        utc_date(secs),
        tod / 3600,
        (tod % 3600) / 60,
        tod % 60
    )
}

/// `YYYY-MM-DD` for the given seconds since the Unix epoch.
pub fn utc_date(secs: u64) -> String {
    let (y, m, d) = date_from_epoch_days((secs / 86_400) as i64);
    format!("{y:04}-{m:02}-{d:02}")
}

// Hinnant's days_from_civil inverse, shifted so that years start in March.
fn date_from_epoch_days(days: i64) -> (i64, u32, u32) {
    let shifted = days + 719_468;
    let era = shifted.div_euclid(146_097);
    let day_of_era = shifted.rem_euclid(146_097);
    let year_of_era = (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_index = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * month_index + 2) / 5 + 1) as u32;
    let month = (if month_index < 10 { month_index + 3 } else { month_index - 9 }) as u32;
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install a `StdoutLogger` as the global logger.
///
/// Debug builds log at `Debug`, release builds at `Info`. Only the first
/// call per process takes effect.
pub fn init_stdout_logger() {
    static LOGGER: StdoutLogger = StdoutLogger::new(LevelFilter::Trace);

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(default_level());
    }
}

/// Install a `FileLogger` writing into `dir` as the global logger.
///
/// Same level rules as [`init_stdout_logger`]. Fails if `dir` cannot be
/// created or the day file cannot be opened.
pub fn init_file_logger(dir: impl Into<PathBuf>) -> std::io::Result<()> {
    let logger = FileLogger::new(dir, LevelFilter::Trace)?;

    // set_logger needs a 'static reference; this runs once per process.
    if log::set_logger(Box::leak(Box::new(logger))).is_ok() {
        log::set_max_level(default_level());
    }

    Ok(())
}

/// Install a shared `MemoryLogger` as the global logger and return it.
///
/// Every call returns the same instance. Returns `None` when a different
/// logger was installed first.
pub fn init_memory_logger() -> Option<&'static MemoryLogger> {
    static LOGGER: OnceLock<Option<&'static MemoryLogger>> = OnceLock::new();

    *LOGGER.get_or_init(|| {
        let logger: &'static MemoryLogger = Box::leak(Box::new(MemoryLogger::new()));
        if log::set_logger(logger).is_ok() {
            log::set_max_level(LevelFilter::Trace);
            Some(logger)
        } else {
            None
        }
    })
}
