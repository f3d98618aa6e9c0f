//! Sculptor Session
//!
//! The user-facing edit session over one class file.
//!
//! Responsibilities:
//! - Load and parse a source file
//! - Queue fluent edit calls as descriptors
//! - Drain the queue in call order and report each outcome
//! - Render, persist and back up the source
//!
//! # Module Structure
//!
//! - `sculptor` - The `Sculptor` session and its fluent edit surface
//! - `config` - Print style and operation registry for a session
//! - `result` - Per-operation reports
//! - `error` - Load and session errors

mod config;
mod error;
mod result;
mod sculptor;

pub use config::SessionConfig;
pub use error::{LoadError, SessionError, SessionResult};
pub use result::OperationReport;
pub use sculptor::Sculptor;

pub use sculptor_mutation::ParamSpec;
