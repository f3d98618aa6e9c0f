//! Sculptor Mutation
//!
//! Structural edits over a parsed class file.
//!
//! Responsibilities:
//! - Turn queued descriptors into operations
//! - Apply each operation to the tree, absorbing duplicates and missing
//!   targets as skipped outcomes
//! - Place new members where a reader expects them
//! - Encode host values as literals
//! - Let callers register their own operation kinds
//!
//! # Module Structure
//!
//! - `operation` - `OperationKind`, the built-in `Operation` enum and the `Mutation` trait
//! - `ops/` - Individual operation implementations (mixins, imports, fields, routines, constants, class, namespace)
//! - `descriptor` - Queued edit records and custom factories
//! - `registry` - Kind name to constructor map, factory wrappers
//! - `literal` - Host value to literal expression codec
//! - `position` - Insertion-position resolver
//! - `locate` - Tree navigation helpers
//! - `signature` - Routine parameters and bodies from caller input
//! - `error` - Error types for descriptor failures
//! - `result` - Operation outcomes

mod descriptor;
mod error;
mod literal;
mod locate;
mod operation;
mod ops;
mod position;
mod registry;
mod result;
mod signature;

pub use descriptor::{Descriptor, DescriptorSource, OperationFactory};
pub use error::{MutationError, MutationResult};
pub use literal::{encode, merge};
pub use locate::first_class;
pub use operation::{Mutation, Operation, OperationKind};
pub use ops::*;
pub use position::{import_position, member_position};
pub use registry::{Constructor, OperationRegistry, ParamMapper};
pub use result::{MutationOutcome, SkipReason};
pub use signature::{build_body, ParamSpec, FALLBACK_BODY};
