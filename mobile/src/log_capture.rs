use crate::LogLevel;
use std::sync::{Arc, Mutex, OnceLock, RwLock};
use tracing::Subscriber;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Characters kept for the in-app log panel
const MAX_LOG_CHARS: usize = 10000;

/// Mirrors tracing events into the in-app log panel buffer.
pub struct LogCaptureLayer;

impl<S> Layer<S> for LogCaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        struct MessageVisitor {
            message: String,
        }

        impl tracing::field::Visit for MessageVisitor {
            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = format!("{:?}", value);
                }
            }

            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = value.to_string();
                }
            }
        }

        let mut visitor = MessageVisitor {
            message: String::new(),
        };
        event.record(&mut visitor);

        let level = LogLevel::from(*metadata.level());
        append_log(
            level,
            format!("[{}] {}: {}", metadata.level(), metadata.target(), visitor.message),
        );
    }
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => LogLevel::Error,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::TRACE => LogLevel::Trace,
        }
    }
}

static LOG_BUFFER: OnceLock<Mutex<String>> = OnceLock::new();
static CAPTURE_LEVEL: OnceLock<Mutex<LogLevel>> = OnceLock::new();

fn get_log_buffer() -> &'static Mutex<String> {
    LOG_BUFFER.get_or_init(|| Mutex::new(String::new()))
}

fn get_capture_level() -> &'static Mutex<LogLevel> {
    CAPTURE_LEVEL.get_or_init(|| Mutex::new(LogLevel::default()))
}

/// Lowest-priority level still written to the panel buffer
pub fn set_capture_level(level: LogLevel) {
    if let Ok(mut current) = get_capture_level().lock() {
        *current = level;
    }
}

/// Priority order: ERROR > WARN > INFO > DEBUG > TRACE
pub fn append_log(level: LogLevel, line: String) {
    let captured = match get_capture_level().lock() {
        Ok(current) => level <= *current,
        Err(_) => false,
    };
    if !captured {
        return;
    }

    if let Ok(mut buffer) = get_log_buffer().lock() {
        push_bounded(&mut buffer, &line, MAX_LOG_CHARS);
    }
}

fn push_bounded(buffer: &mut String, line: &str, max_chars: usize) {
    buffer.push_str(line);
    buffer.push('\n');

    let count = buffer.chars().count();
    if count > max_chars {
        *buffer = buffer.chars().skip(count - max_chars).collect();
    }
}

pub fn recent_logs() -> String {
    get_log_buffer()
        .lock()
        .map(|buffer| buffer.clone())
        .unwrap_or_default()
}

pub fn clear_logs() {
    if let Ok(mut buffer) = get_log_buffer().lock() {
        buffer.clear();
    }
}

// Type-erased reload handle using a closure
type ReloadFn = Box<dyn Fn(&str) + Send + Sync>;

static RELOAD_HANDLE: OnceLock<Arc<RwLock<Option<ReloadFn>>>> = OnceLock::new();

fn get_reload_handle() -> &'static Arc<RwLock<Option<ReloadFn>>> {
    RELOAD_HANDLE.get_or_init(|| Arc::new(RwLock::new(None)))
}

/// Store the reload handle for later use (type-erased)
pub fn set_reload_fn<F>(reload_fn: F)
where
    F: Fn(&str) + Send + Sync + 'static,
{
    if let Ok(mut handle) = get_reload_handle().write() {
        *handle = Some(Box::new(reload_fn));
    }
}

/// Update the tracing log level at runtime
pub fn update_tracing_level(level: &str) {
    if let Ok(handle) = get_reload_handle().read() {
        if let Some(ref reload_fn) = *handle {
            reload_fn(level);
        }
    }
}

/// Install the global subscriber: reloadable filter, fmt output and the panel capture layer.
/// `RUST_LOG` overrides `directive` when `honor_env` is set.
///
/// `log` records are bridged into tracing only when no `log` logger is installed yet;
/// a logger set up earlier (logcat on Android) keeps receiving them.
pub fn init_tracing(directive: &str, honor_env: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::reload;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let env_filter = if honor_env {
        EnvFilter::try_from_default_env().ok()
    } else {
        None
    }
    .or_else(|| EnvFilter::try_new(directive).ok())
    .unwrap_or_else(|| EnvFilter::new("error"));
    let (filter, reload_handle) = reload::Layer::new(env_filter);

    set_reload_fn(move |level: &str| {
        let new_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("error"));
        if let Err(e) = reload_handle.reload(new_filter) {
            eprintln!("Failed to reload log filter: {}", e);
        }
    });

    // try_init sets the subscriber before the log bridge, so an error here
    // usually only means another `log` logger was already in place.
    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(LogCaptureLayer)
        .try_init()
    {
        tracing::debug!("Tracing init left existing loggers in place: {}", e);
    }
}
