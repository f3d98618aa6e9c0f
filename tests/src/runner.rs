//! Scenario runner.

use sculptor_session::Sculptor;
use tempfile::TempDir;
use tracing::debug;

use crate::assertion::StepResult;
use crate::error::{ScenarioError, ScenarioResult};
use crate::fixtures;
use crate::scenario::Scenario;

/// Runs a scenario against a session loaded from a fixture file.
pub struct Runner<'s> {
    scenario: &'s Scenario,
}

impl<'s> Runner<'s> {
    pub fn new(scenario: &'s Scenario) -> Self {
        Self { scenario }
    }

    pub fn run(&self) -> ScenarioResult<()> {
        // 1. Write the fixture to a scratch directory
        let dir = TempDir::new()
            .map_err(|e| ScenarioError::session_setup(self.scenario.name(), e.to_string()))?;
        let path = fixtures::write(dir.path(), self.scenario.fixture_name())?;

        // 2. Open a session on it
        let mut sculptor = Sculptor::load(&path)
            .map_err(|e| ScenarioError::session_setup(self.scenario.name(), e.to_string()))?;

        // 3. Queue each step's edits, drain, and verify
        for step in self.scenario.steps() {
            debug!(scenario = %self.scenario.name(), step = %step.name, "running step");
            (step.edit)(&mut sculptor);

            let result = sculptor
                .apply_pending()
                .and_then(|reports| {
                    let output = sculptor.render()?;
                    Ok(StepResult { reports, output })
                })
                .map_err(|e| e.to_string());

            step.assertion.verify(&step.name, &result)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::scenario::Scenario;

    #[test]
    fn test_runner_reports_failing_step() {
        // GIVEN
        let scenario = Scenario::new("failing").step(
            "add_twice",
            |s| {
                s.add_mixin("HasTeams").add_mixin("HasTeams");
            },
            |a| a.applied(2),
        );

        // WHEN
        let err = scenario.run().unwrap_err();

        // THEN
        assert!(err.to_string().contains("step 'add_twice' failed"));
    }

    #[test]
    fn test_runner_passes_through_steps() {
        let scenario = Scenario::new("mixins")
            .step(
                "add",
                |s| {
                    s.add_mixin("HasTeams");
                },
                |a| a.applied(1).contains("    use HasTeams;\n"),
            )
            .step(
                "remove",
                |s| {
                    s.remove_mixin("HasTeams");
                },
                |a| a.applied(1).absent("use HasTeams;"),
            );

        scenario.run().unwrap();
    }
}
