//! Host logging channels.
//!
//! The builder reports human-readable progress through whatever logger the
//! host supplies. Structured diagnostics go to `tracing` independently.

mod logger;

pub use logger::{BuilderLogger, CollectingLogger, LogLevel, NoOpLogger, TracingLogger};
