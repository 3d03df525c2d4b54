//! Browser console logging and panic reporting.

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Forwards `log` records to `console.*`.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format!("[{}] {}", record.target(), record.args());
        emit(record.level(), &msg);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, msg: &str) {
    let msg = wasm_bindgen::JsValue::from_str(msg);
    match level {
        Level::Error => web_sys::console::error_1(&msg),
        Level::Warn => web_sys::console::warn_1(&msg),
        Level::Info => web_sys::console::info_1(&msg),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: Level, msg: &str) {
    eprintln!("{level:<5} {msg}");
}

/// Install the console logger and panic hook once per page.
/// Later calls only adjust the level.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        panic_hook_setup();
    }
    log::set_max_level(level);
}

/// Parse a level name (`"debug"`, `"warn"`, ...), defaulting to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.parse().unwrap_or(LevelFilter::Info)
}

fn panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        std::panic::set_hook(Box::new(|info| {
            let msg = format!("Pitchboard WASM panic: {info}");
            web_sys::console::error_1(&msg.into());
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }
}
