//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing::field::{Field, Visit};

use super::utils::{log_file_path, strip_ansi, timestamp};

/// Target used for stage headers.
pub(super) const STAGE_TARGET: &str = "lintrc::stage";

/// The message of an event plus its structured fields rendered as
/// `key=value` pairs (for example the `reference` a composer event is about).
#[derive(Default)]
struct EventText {
    message: String,
    fields: String,
}

impl EventText {
    fn of(event: &tracing::Event<'_>) -> Self {
        let mut text = Self::default();
        event.record(&mut text);
        text
    }

    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for EventText {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }
}

/// Appends every event to the per-command log file, ANSI codes stripped.
///
/// Captures `DEBUG` and above regardless of console verbosity.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Open the log file for `command` under the cache directory.
    ///
    /// Returns `None` if the file cannot be created.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::at(&log_file_path(command)?)
    }

    /// Start a fresh log at `path` with a one-line run header.
    pub(super) fn at(path: &Path) -> Option<Self> {
        let version =
            option_env!("LINTRC_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let header = format!("# lintrc {version} started {}\n", timestamp("%Y-%m-%d %H:%M:%S"));
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let text = EventText::of(event);
        let label = if metadata.target() == STAGE_TARGET {
            "STAGE"
        } else {
            metadata.level().as_str()
        };

        let mut line = format!(
            "{} {label:<5} {}",
            timestamp("%H:%M:%S"),
            strip_ansi(&text.message)
        );
        if !text.fields.is_empty() {
            let _ = write!(line, " [{}]", text.fields);
        }

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// Console format: coloured level tags, bold stage headers, and dimmed
/// structured fields after the message.
struct ConsoleFormat;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormat
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let EventText { message, fields } = EventText::of(event);

        match *metadata.level() {
            _ if metadata.target() == STAGE_TARGET => {
                write!(writer, "\x1b[1;36m::\x1b[0m \x1b[1m{message}\x1b[0m")?;
            }
            Level::ERROR => write!(writer, "\x1b[31merror:\x1b[0m {message}")?,
            Level::WARN => write!(writer, "\x1b[33mwarning:\x1b[0m {message}")?,
            Level::INFO => write!(writer, "   {message}")?,
            _ => write!(writer, "   \x1b[2m{message}\x1b[0m")?,
        }
        if !fields.is_empty() {
            write!(writer, " \x1b[2m{fields}\x1b[0m")?;
        }
        writeln!(writer)
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console output goes to stderr so stdout carries only command results.
/// The file layer receives every event, including `debug`, at
/// `$XDG_CACHE_HOME/lintrc/<command>.log`. `RUST_LOG` overrides the console
/// level when set. Call once, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .event_format(ConsoleFormat)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
