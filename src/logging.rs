//! Browser console logging.
//!
//! A tracing Layer that formats each event into one line and hands it to a
//! [`ConsoleSink`]. In the browser the sink is the devtools console, routed
//! by level so filtering in devtools works as expected.
//!
//! ```text
//! [loresite_core::controller] mobile UI mounted menu=true popup=true slides=false listeners=7
//! ```

use std::fmt::Write as FmtWrite;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::Layer;

/// Destination for formatted log lines
pub trait ConsoleSink: Send + Sync + 'static {
    fn write(&self, level: &Level, line: &str);
}

/// The browser's devtools console
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserConsole;

impl ConsoleSink for BrowserConsole {
    fn write(&self, level: &Level, line: &str) {
        let line = wasm_bindgen::JsValue::from_str(line);
        match *level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// A tracing Layer that writes events to a console sink.
pub struct ConsoleLayer<S = BrowserConsole> {
    sink: S,
}

impl ConsoleLayer<BrowserConsole> {
    pub fn new() -> Self {
        Self {
            sink: BrowserConsole,
        }
    }
}

impl Default for ConsoleLayer<BrowserConsole> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ConsoleSink> ConsoleLayer<S> {
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }
}

impl<S, C> Layer<C> for ConsoleLayer<S>
where
    S: ConsoleSink,
    C: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, C>) {
        let metadata = event.metadata();

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let mut line = format!("[{}] {}", metadata.target(), visitor.message);
        if !visitor.fields.is_empty() {
            line.push(' ');
            line.push_str(&visitor.fields);
        }
        self.sink.write(metadata.level(), &line);
    }
}

/// Collects the message and `key=value` pairs of an event
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}

/// Install the console layer as the global subscriber.
///
/// Debug builds log at `debug`, release builds at `info`. Calling twice is
/// harmless; the second install is ignored.
pub fn init() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let _ = tracing_subscriber::registry()
        .with(ConsoleLayer::new().with_filter(level))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<(Level, String)>>>);

    impl ConsoleSink for Capture {
        fn write(&self, level: &Level, line: &str) {
            self.0.lock().unwrap().push((*level, line.to_string()));
        }
    }

    #[test]
    fn formats_target_message_and_fields() {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::registry().with(ConsoleLayer::with_sink(capture.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "loresite::test", slides = 4, key = "End", "jumped");
        });

        let lines = capture.0.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::INFO);
        assert_eq!(lines[0].1, "[loresite::test] jumped slides=4 key=End");
    }

    #[test]
    fn keeps_level_for_routing() {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::registry().with(ConsoleLayer::with_sink(capture.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("bad override");
            tracing::debug!("skipped feature");
        });

        let lines = capture.0.lock().unwrap();
        let levels: Vec<Level> = lines.iter().map(|(level, _)| *level).collect();
        assert_eq!(levels, vec![Level::WARN, Level::DEBUG]);
        assert!(lines[0].1.ends_with("bad override"));
    }
}
