//! Assertion types and builders for verifying step results.

use sculptor_mutation::{MutationOutcome, SkipReason};
use sculptor_session::OperationReport;

use crate::error::{ScenarioError, ScenarioResult};

/// What one step produced: a report per drained edit and the rendered
/// source afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub reports: Vec<OperationReport>,
    pub output: String,
}

impl StepResult {
    fn count(&self, outcome: MutationOutcome) -> usize {
        self.reports.iter().filter(|r| r.outcome == outcome).count()
    }
}

/// A complete assertion for a step result.
#[derive(Default)]
pub struct Assertion {
    // Outcome assertions
    pub applied: Option<usize>,
    pub duplicates: Option<usize>,
    pub not_found: Option<usize>,

    // Output assertions
    pub contains: Vec<String>,
    pub absent: Vec<String>,
    pub occurrences: Vec<(String, usize)>,
    pub pattern: Option<String>,
    pub exactly: Option<String>,

    // Error assertions
    pub error: Option<String>,

    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&StepResult) -> bool + Send + Sync>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("applied", &self.applied)
            .field("duplicates", &self.duplicates)
            .field("not_found", &self.not_found)
            .field("contains", &self.contains)
            .field("absent", &self.absent)
            .field("occurrences", &self.occurrences)
            .field("pattern", &self.pattern)
            .field("exactly", &self.exactly.is_some())
            .field("error", &self.error)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Assertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the assertion against a step result.
    pub fn verify(&self, step: &str, result: &Result<StepResult, String>) -> ScenarioResult<()> {
        if let Some(ref expected_error) = self.error {
            return match result {
                Err(msg) if msg.contains(expected_error) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', got: {}", expected_error, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "expected error containing '{}', but step succeeded",
                        expected_error
                    ),
                )),
            };
        }

        let result = result
            .as_ref()
            .map_err(|msg| ScenarioError::assertion_failed(step, format!("step failed: {}", msg)))?;

        if let Some(ref custom) = self.custom {
            if !custom(result) {
                return Err(ScenarioError::assertion_failed(step, "custom assertion failed"));
            }
        }

        self.verify_outcomes(step, result)?;
        self.verify_output(step, &result.output)
    }

    fn verify_outcomes(&self, step: &str, result: &StepResult) -> ScenarioResult<()> {
        let expectations = [
            ("applied", self.applied, MutationOutcome::Applied),
            ("duplicate", self.duplicates, MutationOutcome::Skipped(SkipReason::Duplicate)),
            ("not found", self.not_found, MutationOutcome::Skipped(SkipReason::NotFound)),
        ];
        for (label, expected, outcome) in expectations {
            let Some(expected) = expected else {
                continue;
            };
            let actual = result.count(outcome);
            if actual != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "expected {} {}, got {}\n  reports: {:?}",
                        expected, label, actual, result.reports
                    ),
                ));
            }
        }
        Ok(())
    }

    fn verify_output(&self, step: &str, output: &str) -> ScenarioResult<()> {
        if let Some(ref expected) = self.exactly {
            if output != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("output mismatch:\n--- expected\n{}\n--- actual\n{}", expected, output),
                ));
            }
        }

        for needle in &self.contains {
            if !output.contains(needle.as_str()) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected output to contain {:?}\n{}", needle, output),
                ));
            }
        }

        for needle in &self.absent {
            if output.contains(needle.as_str()) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected output not to contain {:?}\n{}", needle, output),
                ));
            }
        }

        for (needle, expected) in &self.occurrences {
            let actual = output.matches(needle.as_str()).count();
            if actual != *expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "expected {:?} {} time(s), found {}\n{}",
                        needle, expected, actual, output
                    ),
                ));
            }
        }

        if let Some(ref pattern) = self.pattern {
            let re = regex_lite::Regex::new(pattern).map_err(|e| {
                ScenarioError::assertion_failed(step, format!("invalid regex pattern: {}", e))
            })?;
            if !re.is_match(output) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected output matching '{}'\n{}", pattern, output),
                ));
            }
        }

        Ok(())
    }
}

/// Builder for fluent assertion construction.
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    pub fn new() -> Self {
        Self {
            assertion: Assertion::new(),
        }
    }

    pub fn build(self) -> Assertion {
        self.assertion
    }

    // ========== Outcome assertions ==========

    /// Assert that N edits were applied.
    pub fn applied(mut self, n: usize) -> Self {
        self.assertion.applied = Some(n);
        self
    }

    /// Assert that N edits were skipped as duplicates.
    pub fn duplicates(mut self, n: usize) -> Self {
        self.assertion.duplicates = Some(n);
        self
    }

    /// Assert that N edits were skipped for a missing target.
    pub fn not_found(mut self, n: usize) -> Self {
        self.assertion.not_found = Some(n);
        self
    }

    // ========== Output assertions ==========

    pub fn contains(mut self, needle: impl Into<String>) -> Self {
        self.assertion.contains.push(needle.into());
        self
    }

    pub fn absent(mut self, needle: impl Into<String>) -> Self {
        self.assertion.absent.push(needle.into());
        self
    }

    /// Assert that the output contains `needle` exactly `n` times.
    pub fn occurs(mut self, needle: impl Into<String>, n: usize) -> Self {
        self.assertion.occurrences.push((needle.into(), n));
        self
    }

    /// Assert that the output matches the given regex.
    pub fn matches(mut self, pattern: impl Into<String>) -> Self {
        self.assertion.pattern = Some(pattern.into());
        self
    }

    pub fn exactly(mut self, output: impl Into<String>) -> Self {
        self.assertion.exactly = Some(output.into());
        self
    }

    // ========== Error assertions ==========

    /// Assert that the step fails with an error containing the given string.
    pub fn error(mut self, contains: impl Into<String>) -> Self {
        self.assertion.error = Some(contains.into());
        self
    }

    // ========== Advanced ==========

    pub fn assert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&StepResult) -> bool + Send + Sync + 'static,
    {
        self.assertion.custom = Some(Box::new(f));
        self
    }
}

impl Default for AssertionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(outcomes: &[MutationOutcome], output: &str) -> Result<StepResult, String> {
        Ok(StepResult {
            reports: outcomes
                .iter()
                .map(|o| OperationReport::new("add_mixin", *o))
                .collect(),
            output: output.to_string(),
        })
    }

    #[test]
    fn test_outcome_counts() {
        // GIVEN
        let step = result(
            &[MutationOutcome::Applied, MutationOutcome::duplicate()],
            "use HasTeams;",
        );

        // THEN
        let ok = AssertionBuilder::new().applied(1).duplicates(1).not_found(0).build();
        assert!(ok.verify("s", &step).is_ok());

        let wrong = AssertionBuilder::new().applied(2).build();
        assert!(matches!(
            wrong.verify("s", &step),
            Err(ScenarioError::AssertionFailed { .. })
        ));
    }

    #[test]
    fn test_output_checks() {
        // GIVEN
        let step = result(&[], "use HasTeams;\nuse HasTeams;\n");

        // THEN
        let ok = AssertionBuilder::new()
            .contains("HasTeams")
            .absent("Notifiable")
            .occurs("use HasTeams;", 2)
            .matches(r"use \w+;")
            .build();
        assert!(ok.verify("s", &step).is_ok());
        assert!(AssertionBuilder::new()
            .occurs("use HasTeams;", 1)
            .build()
            .verify("s", &step)
            .is_err());
    }

    #[test]
    fn test_error_expectation() {
        let failed: Result<StepResult, String> = Err("Unknown operation: add_widget".into());
        let assertion = AssertionBuilder::new().error("Unknown operation").build();
        assert!(assertion.verify("s", &failed).is_ok());
        assert!(AssertionBuilder::new().build().verify("s", &failed).is_err());
    }
}
