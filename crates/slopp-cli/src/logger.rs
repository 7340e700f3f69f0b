//! Minimal stderr logger for the `log` facade

use log::{LevelFilter, Log, Metadata, Record};

pub struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_record(record));
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!(
        "[{level} {target}] {message}",
        level = record.level(),
        target = record.target(),
        message = record.args()
    )
}

pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    static LOGGER: StderrLogger = StderrLogger;
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Level for `-v` repetitions, falling back to `env_level` and then `warn`
pub fn level_from(verbosity: u8, env_level: Option<&str>) -> LevelFilter {
    match verbosity {
        0 => env_level
            .and_then(|s| s.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
