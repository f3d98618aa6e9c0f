//! Scenario test harness for Sculptor.
//!
//! A scenario starts from a fixture class file, runs named steps of queued
//! edits against one session and checks each step's reports and rendered
//! output.
//!
//! # Module Structure
//!
//! - `scenario` - Scenario and step builders
//! - `runner` - Executes a scenario against a file-backed session
//! - `assertion` - Per-step expectations
//! - `fixtures` - Source files scenarios start from
//! - `error` - Harness errors

pub mod assertion;
pub mod error;
pub mod fixtures;
pub mod runner;
pub mod scenario;

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod prelude {
    pub use crate::assertion::{Assertion, AssertionBuilder, StepResult};
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::fixtures;
    pub use crate::init_test_logging;
    pub use crate::scenario::{Scenario, Step};
    pub use sculptor_core::{assoc, params, Params, Value};
    pub use sculptor_mutation::{MutationOutcome, SkipReason};
    pub use sculptor_session::{OperationReport, ParamSpec, Sculptor, SessionError};
}

static TEST_SETUP: Once = Once::new();

/// Install a stderr subscriber once per test binary. Honours `RUST_LOG`
/// and defaults to `debug`.
pub fn init_test_logging() {
    TEST_SETUP.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(env_filter),
        );

        if tracing::dispatcher::has_been_set() {
            debug!("tracing subscriber already set");
        } else if let Err(err) = subscriber.try_init() {
            eprintln!("failed to set up test logging: {}", err);
        }
    });
}
