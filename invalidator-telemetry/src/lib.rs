//! Structured logging for the invalidation function.
//!
//! Production and staging emit JSON lines on stdout, which the Lambda service forwards to
//! CloudWatch. Development gets pretty console output.

use invalidator_config::Environment;
use std::any::Any;
use std::io::{Error, Write};
use std::sync::{Once, OnceLock};
use std::{
    backtrace::{Backtrace, BacktraceStatus},
    panic::PanicHookInfo,
};
use thiserror::Error;
use tracing::subscriber::{SetGlobalDefaultError, set_global_default};
use tracing_log::{LogTracer, log_tracer::SetLoggerError};
use tracing_subscriber::{EnvFilter, FmtSubscriber, Registry, fmt, layer::SubscriberExt};

/// Variable the Lambda service sets to the name of the running function.
const LAMBDA_FUNCTION_NAME_ENV_NAME: &str = "AWS_LAMBDA_FUNCTION_NAME";

/// JSON field name for function identification in logs.
const FUNCTION_KEY_IN_LOG: &str = "function";

/// Errors that can occur during tracing initialization.
#[derive(Debug, Error)]
pub enum TracingError {
    #[error("failed to init log tracer: {0}")]
    InitLogTracer(#[from] SetLoggerError),

    #[error("failed to set global default subscriber: {0}")]
    SetGlobalDefault(#[from] SetGlobalDefaultError),

    #[error("an io error occurred: {0}")]
    Io(#[from] Error),
}

static INIT_TEST_TRACING: Once = Once::new();

/// Initializes tracing for tests.
///
/// Does nothing unless `ENABLE_TRACING` is set:
/// ```bash
/// ENABLE_TRACING=1 cargo test test_name
/// ```
pub fn init_test_tracing() {
    INIT_TEST_TRACING.call_once(|| {
        if std::env::var("ENABLE_TRACING").is_ok() {
            // Without this the default stage is prod, which prints JSON instead of pretty output.
            Environment::Dev.set();
            init_tracing("test").expect("Failed to initialize tracing for tests");
        }
    });
}

static FUNCTION_NAME: OnceLock<String> = OnceLock::new();

/// Sets the function name injected into every JSON log entry.
pub fn set_global_function_name(function_name: String) {
    let _ = FUNCTION_NAME.set(function_name);
}

/// Returns the function name injected into JSON log entries, if one was set.
pub fn get_global_function_name() -> Option<&'static str> {
    FUNCTION_NAME.get().map(|s| s.as_str())
}

/// Writer wrapper that adds a top-level `function` field to JSON log entries.
struct FunctionInjectingWriter<W> {
    inner: W,
    function_name: Option<&'static str>,
}

impl<W> FunctionInjectingWriter<W> {
    fn new(inner: W, function_name: Option<&'static str>) -> Self {
        Self {
            inner,
            function_name,
        }
    }
}

impl<W> Write for FunctionInjectingWriter<W>
where
    W: Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Some(function_name) = self.function_name
            && let Ok(json_str) = std::str::from_utf8(buf)
            && let Ok(serde_json::Value::Object(mut map)) =
                serde_json::from_str::<serde_json::Value>(json_str)
            && !map.contains_key(FUNCTION_KEY_IN_LOG)
        {
            map.insert(
                FUNCTION_KEY_IN_LOG.to_string(),
                serde_json::Value::String(function_name.to_string()),
            );

            if let Ok(modified) = serde_json::to_string(&map) {
                let output = if json_str.ends_with('\n') {
                    format!("{modified}\n")
                } else {
                    modified
                };

                // The caller only knows about its own buffer, so report that length back.
                self.inner.write_all(output.as_bytes())?;
                return Ok(buf.len());
            }
        }

        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Initializes tracing for the application.
///
/// The function name is taken from `AWS_LAMBDA_FUNCTION_NAME` when running inside Lambda and
/// falls back to `app_name` otherwise.
pub fn init_tracing(app_name: &str) -> Result<(), TracingError> {
    let function_name =
        std::env::var(LAMBDA_FUNCTION_NAME_ENV_NAME).unwrap_or_else(|_| app_name.to_string());
    set_global_function_name(function_name);

    // Routes records from crates that log through `log` into the subscriber.
    LogTracer::init()?;

    let is_prod = Environment::load()?.is_prod();

    // Default to `info` when `RUST_LOG` is not set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    if is_prod {
        configure_prod_tracing(filter)?;
    } else {
        configure_dev_tracing(filter)?;
    }

    set_tracing_panic_hook();

    Ok(())
}

/// Configures JSON logging to stdout.
///
/// Writes are synchronous: the Lambda service may freeze the process as soon as an invocation
/// returns, so nothing may be left buffered in a background writer.
fn configure_prod_tracing(filter: EnvFilter) -> Result<(), TracingError> {
    let format = fmt::format()
        .with_level(true)
        .with_ansi(false)
        .with_target(false);

    let subscriber = Registry::default().with(filter).with(
        fmt::layer()
            .event_format(format)
            .with_writer(|| {
                FunctionInjectingWriter::new(std::io::stdout(), get_global_function_name())
            })
            .json()
            .with_current_span(true)
            .with_span_list(true),
    );

    set_global_default(subscriber)?;

    Ok(())
}

/// Configures pretty-printed console logging.
fn configure_dev_tracing(filter: EnvFilter) -> Result<(), TracingError> {
    let format = fmt::format()
        .with_level(true)
        .with_ansi(true)
        .pretty()
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    let subscriber = FmtSubscriber::builder()
        .event_format(format)
        .with_env_filter(filter)
        .finish();

    set_global_default(subscriber)?;

    Ok(())
}

/// Logs panics through `tracing` before handing them to the previous hook.
///
/// The default hook only writes to stderr, which bypasses the JSON formatting.
fn set_tracing_panic_hook() {
    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        panic_hook(info);
        prev_hook(info);
    }));
}

fn panic_hook(panic_info: &PanicHookInfo) {
    let backtrace = Backtrace::capture();
    let note = backtrace_note(backtrace.status());
    let backtrace = note.is_none().then_some(backtrace);
    let location = panic_info.location().map(|location| location.to_string());

    tracing::error!(
        function = get_global_function_name(),
        panic.payload = panic_payload(panic_info.payload()),
        panic.location = location,
        panic.backtrace = backtrace.map(tracing::field::display),
        panic.note = note,
        "the invalidation function panicked",
    );
}

/// Explains why a backtrace is missing, or returns `None` when one was captured.
fn backtrace_note(status: BacktraceStatus) -> Option<&'static str> {
    match status {
        BacktraceStatus::Captured => None,
        BacktraceStatus::Disabled => Some("run with RUST_BACKTRACE=1 to display backtraces"),
        BacktraceStatus::Unsupported => Some("backtraces are not supported on this platform"),
        _ => Some("backtrace status is unknown"),
    }
}

/// `panic!` payloads are a `&str` for literal messages and a `String` for formatted ones.
fn panic_payload(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}
