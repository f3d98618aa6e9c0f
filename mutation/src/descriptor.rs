//! Modification descriptors.

use std::fmt;
use std::sync::Arc;

use sculptor_core::Params;

use crate::error::MutationResult;
use crate::operation::{Mutation, Operation};
use crate::registry::OperationRegistry;

/// Builds an operation from a descriptor's parameters.
pub type OperationFactory =
    Arc<dyn Fn(&Params) -> MutationResult<Box<dyn Mutation>> + Send + Sync>;

/// How a descriptor turns into an operation.
#[derive(Clone)]
pub enum DescriptorSource {
    /// Built-in kind, resolved by name.
    Builtin,
    /// Kind looked up in the session registry; the whole parameter map is
    /// the constructor's single argument.
    Registered,
    /// Caller-supplied factory.
    Factory(OperationFactory),
}

/// A queued, not yet applied edit.
#[derive(Clone)]
pub struct Descriptor {
    kind: String,
    params: Params,
    source: DescriptorSource,
}

impl Descriptor {
    pub fn new(kind: impl Into<String>, params: Params) -> Self {
        Self {
            kind: kind.into(),
            params,
            source: DescriptorSource::Builtin,
        }
    }

    pub fn registered(kind: impl Into<String>, params: Params) -> Self {
        Self {
            source: DescriptorSource::Registered,
            ..Self::new(kind, params)
        }
    }

    pub fn custom(kind: impl Into<String>, params: Params, factory: OperationFactory) -> Self {
        Self {
            source: DescriptorSource::Factory(factory),
            ..Self::new(kind, params)
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn source(&self) -> &DescriptorSource {
        &self.source
    }

    /// Construct the operation this descriptor stands for.
    pub fn instantiate(&self, registry: &OperationRegistry) -> MutationResult<Box<dyn Mutation>> {
        match &self.source {
            DescriptorSource::Builtin => {
                Ok(Box::new(Operation::from_params(&self.kind, &self.params)?))
            }
            DescriptorSource::Registered => registry.make(&self.kind, vec![self.params.to_value()]),
            DescriptorSource::Factory(factory) => factory(&self.params),
        }
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            DescriptorSource::Builtin => "builtin",
            DescriptorSource::Registered => "registered",
            DescriptorSource::Factory(_) => "factory",
        };
        f.debug_struct("Descriptor")
            .field("kind", &self.kind)
            .field("params", &self.params)
            .field("source", &source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MutationError;
    use crate::result::MutationOutcome;
    use sculptor_core::params;
    use sculptor_parser::{parse_file, SourceFile};

    struct Touch;

    impl Mutation for Touch {
        fn apply(&self, _file: &mut SourceFile) -> MutationOutcome {
            MutationOutcome::Applied
        }
    }

    #[test]
    fn test_builtin_descriptor_instantiates_by_name() {
        // GIVEN
        let registry = OperationRegistry::new();
        let descriptor = Descriptor::new("add_mixin", params! { "mixin" => "HasTeams" });
        let mut file = parse_file("<?php\nclass A\n{\n}\n").unwrap();

        // WHEN
        let op = descriptor.instantiate(&registry).unwrap();

        // THEN
        assert!(op.apply(&mut file).is_applied());
    }

    #[test]
    fn test_unknown_builtin_kind() {
        let descriptor = Descriptor::new("add_widget", params!());
        let err = descriptor
            .instantiate(&OperationRegistry::new())
            .err()
            .unwrap();
        assert_eq!(err, MutationError::unknown_operation("add_widget"));
    }

    #[test]
    fn test_custom_factory_receives_params() {
        // GIVEN
        let factory: OperationFactory = Arc::new(|params: &Params| {
            assert_eq!(params.get_str("label"), Some("x"));
            Ok(Box::new(Touch) as Box<dyn Mutation>)
        });
        let descriptor = Descriptor::custom("touch", params! { "label" => "x" }, factory);

        // WHEN
        let op = descriptor.instantiate(&OperationRegistry::new()).unwrap();

        // THEN
        let mut file = SourceFile::default();
        assert!(op.apply(&mut file).is_applied());
        assert!(format!("{:?}", descriptor).contains("factory"));
    }
}
