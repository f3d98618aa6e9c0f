//! Session configuration.

use sculptor_mutation::OperationRegistry;
use sculptor_parser::PrintConfig;

/// Settings a session is created with.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Output layout.
    pub print: PrintConfig,
    /// Kinds available to `add_registered` and registry factories.
    pub registry: OperationRegistry,
    /// Print with the line ending most of the loaded source uses. Cleared
    /// when the caller picks a line ending.
    pub line_ending_from_source: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            print: PrintConfig::default(),
            registry: OperationRegistry::with_builtins(),
            line_ending_from_source: true,
        }
    }
}

impl SessionConfig {
    pub fn with_print(mut self, print: PrintConfig) -> Self {
        self.print = print;
        self.line_ending_from_source = false;
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.print.indent = indent.into();
        self
    }

    pub fn with_line_ending(mut self, line_ending: impl Into<String>) -> Self {
        self.print.line_ending = line_ending.into();
        self.line_ending_from_source = false;
        self
    }

    pub fn with_registry(mut self, registry: OperationRegistry) -> Self {
        self.registry = registry;
        self
    }
}
