//! Destination for lines emitted by the logging syscalls.

use crate::trace;
use std::fmt;

/// Callback receiving each emitted line.
pub type LogObserver = Box<dyn Fn(&str) + Send + Sync>;

/// Writes every line to the trace log and forwards it to at most one observer.
#[derive(Default)]
pub struct LogSink {
    observer: Option<LogObserver>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `observer`, replacing any previously registered one.
    pub fn register(&mut self, observer: impl Fn(&str) + Send + Sync + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Removes the current observer. Returns true if one was registered.
    pub fn unregister(&mut self) -> bool {
        self.observer.take().is_some()
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    /// Emits one line. A missing observer is not an error.
    pub fn emit(&self, line: &str) {
        trace!("{line}");
        if let Some(observer) = &self.observer {
            observer(line);
        }
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink")
            .field("has_observer", &self.has_observer())
            .finish()
    }
}
