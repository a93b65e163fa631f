//! Host logger trait and implementations.

use parking_lot::RwLock;
use tracing::{error, info};

/// The logging channel a host hands to the builder.
///
/// Both methods are fire-and-forget: implementations must not panic and
/// nothing they return is consumed.
pub trait BuilderLogger: Send + Sync {
    /// Logs a progress message.
    fn info(&self, message: &str);

    /// Logs a failure message.
    fn error(&self, message: &str);
}

/// A no-op logger that discards all messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl BuilderLogger for NoOpLogger {
    fn info(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

/// A logger that forwards messages to the tracing framework.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    /// Optional project name attached to every event.
    project: Option<String>,
}

impl TracingLogger {
    /// Creates a new tracing logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a project name to every emitted event.
    #[must_use]
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }
}

impl BuilderLogger for TracingLogger {
    fn info(&self, message: &str) {
        match self.project {
            Some(ref project) => info!(project = %project, "{}", message),
            None => info!("{}", message),
        }
    }

    fn error(&self, message: &str) {
        match self.project {
            Some(ref project) => error!(project = %project, "{}", message),
            None => error!("{}", message),
        }
    }
}

/// The channel a collected message was logged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// `info` channel.
    Info,
    /// `error` channel.
    Error,
}

/// A collecting logger for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingLogger {
    entries: RwLock<Vec<(LogLevel, String)>>,
}

impl CollectingLogger {
    /// Creates a new collecting logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected entries in order.
    #[must_use]
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.read().clone()
    }

    /// Returns the messages logged on the info channel.
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.messages_at(LogLevel::Info)
    }

    /// Returns the messages logged on the error channel.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.messages_at(LogLevel::Error)
    }

    /// Returns the number of collected entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns true if any message contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.read().iter().any(|(_, m)| m.contains(needle))
    }

    /// Clears all collected entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl BuilderLogger for CollectingLogger {
    fn info(&self, message: &str) {
        self.entries.write().push((LogLevel::Info, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.entries.write().push((LogLevel::Error, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_logger() {
        let logger = NoOpLogger;
        logger.info("test");
        logger.error("test");
        // Should not panic
    }

    #[test]
    fn test_tracing_logger() {
        let logger = TracingLogger::new().with_project("schematics");
        logger.info("[BUILD] done");
        logger.error("[BUILD] failed");
        // Should not panic
    }

    #[test]
    fn test_collecting_logger() {
        let logger = CollectingLogger::new();
        assert!(logger.is_empty());

        logger.info("first");
        logger.error("second");
        logger.info("third");

        assert_eq!(logger.len(), 3);
        assert_eq!(logger.infos(), vec!["first", "third"]);
        assert_eq!(logger.errors(), vec!["second"]);
        assert_eq!(logger.entries()[1], (LogLevel::Error, "second".to_string()));
        assert!(logger.contains("sec"));
    }

    #[test]
    fn test_collecting_logger_clear() {
        let logger = CollectingLogger::new();
        logger.info("message");
        assert_eq!(logger.len(), 1);

        logger.clear();
        assert!(logger.is_empty());
    }
}
