//! Builder configuration.
//!
//! - Options the host passes to a build
//! - The message table stages log through

mod messages;
mod options;

pub use messages::{MessageTable, MessageVars, StageMessages};
pub use options::{BuilderOptions, ValidatedOptions, MANIFEST_FILE};
