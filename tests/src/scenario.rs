//! Scenario builder.

use sculptor_session::Sculptor;

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::ScenarioResult;
use crate::runner::Runner;

/// Queues the edits of one step.
pub type Edit = Box<dyn Fn(&mut Sculptor) + Send + Sync>;

/// One named step: edits to queue, then what the drain must produce.
pub struct Step {
    pub name: String,
    pub edit: Edit,
    pub assertion: Assertion,
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("assertion", &self.assertion)
            .finish()
    }
}

/// A sequence of steps run against one session opened on a fixture.
#[derive(Debug)]
pub struct Scenario {
    name: String,
    fixture: String,
    steps: Vec<Step>,
}

impl Scenario {
    /// A scenario over the `test_class` fixture.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixture: "test_class".to_string(),
            steps: Vec::new(),
        }
    }

    /// Start from another fixture.
    pub fn fixture(mut self, name: impl Into<String>) -> Self {
        self.fixture = name.into();
        self
    }

    pub fn step<E, A>(mut self, name: impl Into<String>, edit: E, assert: A) -> Self
    where
        E: Fn(&mut Sculptor) + Send + Sync + 'static,
        A: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        self.steps.push(Step {
            name: name.into(),
            edit: Box::new(edit),
            assertion: assert(AssertionBuilder::new()).build(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fixture_name(&self) -> &str {
        &self.fixture
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step in order, stopping at the first failed assertion.
    pub fn run(&self) -> ScenarioResult<()> {
        Runner::new(self).run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_step_order() {
        // GIVEN
        let scenario = Scenario::new("order")
            .fixture("plain_class")
            .step("first", |s| {
                s.add_mixin("A");
            }, |a| a.applied(1))
            .step("second", |s| {
                s.remove_mixin("A");
            }, |a| a.applied(1));

        // THEN
        assert_eq!(scenario.name(), "order");
        assert_eq!(scenario.fixture_name(), "plain_class");
        let names: Vec<&str> = scenario.steps().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(scenario.steps()[0].assertion.applied, Some(1));
    }
}
