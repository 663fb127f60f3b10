use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Environment variable that overrides the default max log level.
pub const LOG_LEVEL_ENV: &str = "DELI_LOG";

/// A logger that writes one line per record to stdout
pub struct StdoutLogger;

impl StdoutLogger {
    /// Render a record the way it is printed
    pub fn format_record(record: &Record) -> String {
        format!(
            "{} [{}] [thread:{:?}] {}:{} - {}",
            format_timestamp(),
            record.level(),
            std::thread::current().id(),
            record.file().unwrap_or("unknown"),
            record.line().unwrap_or(0),
            record.args()
        )
    }
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format_record(record);
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line).ok();
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

/// Default max level for the current build mode:
/// Debug in debug builds, Info in release builds.
pub fn default_max_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
///
/// Unknown or empty values fall back to [`default_max_level`].
pub fn parse_level(value: &str) -> LevelFilter {
    LevelFilter::from_str(value.trim()).unwrap_or_else(|_| default_max_level())
}

/// Max level taken from `DELI_LOG`, or the build-mode default when unset.
pub fn max_level_from_env() -> LevelFilter {
    match std::env::var(LOG_LEVEL_ENV) {
        Ok(value) => parse_level(&value),
        Err(_) => default_max_level(),
    }
}

/// Initialize the global logger with StdoutLogger
///
/// The max level comes from [`max_level_from_env`]. This can only take effect
/// once per process; later calls are silently ignored.
pub fn init_stdout_logger() {
    static LOGGER: StdoutLogger = StdoutLogger;

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level_from_env());
    }
}

/// Format current time as YYYY-MM-DDTHH:MM:SS (UTC)
pub fn format_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let (year, month, day) = civil_from_days((secs / 86400) as i64);
    let time_of_day = secs % 86400;

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60
    )
}

/// Convert days since Unix epoch to civil date (year, month, day)
/// Uses Howard Hinnant's algorithm (public domain)
/// http://howardhinnant.github.io/date_algorithms.html
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}
