//! Harness error types.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while running a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("unknown fixture '{name}'")]
    FixtureNotFound { name: String },

    #[error("failed to write fixture {}: {source}", path.display())]
    FixtureWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open session for scenario '{scenario}': {message}")]
    SessionSetup { scenario: String, message: String },

    #[error("step '{step}' failed: {message}")]
    AssertionFailed { step: String, message: String },
}

impl ScenarioError {
    pub fn fixture_not_found(name: impl Into<String>) -> Self {
        Self::FixtureNotFound { name: name.into() }
    }

    pub fn fixture_write(path: &Path, source: io::Error) -> Self {
        Self::FixtureWrite {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn session_setup(scenario: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SessionSetup {
            scenario: scenario.into(),
            message: message.into(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
