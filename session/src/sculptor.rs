//! The editing session.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sculptor_core::{Params, Value};
use sculptor_mutation::{
    first_class, Descriptor, OperationFactory, OperationKind, OperationRegistry, ParamSpec,
};
use sculptor_parser::{dominant_line_ending, parse_file, print_file, SourceFile};
use tracing::{debug, info, instrument, trace};

use crate::config::SessionConfig;
use crate::error::{LoadError, SessionError, SessionResult};
use crate::result::OperationReport;

/// Edits one class file.
///
/// Edit calls only queue descriptors. The queue drains, in order, when the
/// source is rendered or persisted (or on [`Sculptor::apply_pending`]).
#[derive(Debug)]
pub struct Sculptor {
    file: SourceFile,
    /// Source text as loaded, before any edit.
    original: Option<String>,
    path: Option<PathBuf>,
    pending: Vec<Descriptor>,
    history: Vec<OperationReport>,
    config: SessionConfig,
}

impl Sculptor {
    /// Load and parse a file.
    pub fn load(path: impl AsRef<Path>) -> SessionResult<Self> {
        Self::load_with(path, SessionConfig::default())
    }

    pub fn load_with(path: impl AsRef<Path>, config: SessionConfig) -> SessionResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => LoadError::not_found(path),
            _ => LoadError::unreadable(path, err),
        })?;
        let mut sculptor = Self::from_source_with(&text, config)?;
        info!(path = %path.display(), bytes = text.len(), "loaded source file");
        sculptor.path = Some(path.to_path_buf());
        Ok(sculptor)
    }

    /// Parse source text that has no backing file.
    pub fn from_source(text: &str) -> SessionResult<Self> {
        Self::from_source_with(text, SessionConfig::default())
    }

    pub fn from_source_with(text: &str, mut config: SessionConfig) -> SessionResult<Self> {
        let file = parse_file(text).map_err(LoadError::from)?;
        if config.line_ending_from_source {
            let line_ending = dominant_line_ending(text);
            if config.print.line_ending != line_ending {
                debug!(line_ending = ?line_ending, "keeping source line ending");
                config.print.line_ending = line_ending.to_string();
            }
        }
        Ok(Self {
            file,
            original: Some(text.to_string()),
            path: None,
            pending: Vec::new(),
            history: Vec::new(),
            config,
        })
    }

    /// Path the session was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The tree as of the last drain.
    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    /// Name of the class being edited, as of the last drain.
    pub fn class_name(&self) -> Option<&str> {
        first_class(&self.file).map(|class| class.name.as_str())
    }

    /// Descriptors waiting for the next drain.
    pub fn pending(&self) -> &[Descriptor] {
        &self.pending
    }

    /// Every report produced so far, in application order.
    pub fn history(&self) -> &[OperationReport] {
        &self.history
    }

    /// Registry used by `add_registered`.
    pub fn registry_mut(&mut self) -> &mut OperationRegistry {
        &mut self.config.registry
    }

    // ==================== QUEUE ====================

    /// Queue a built-in edit by kind name. An unknown kind fails when the
    /// queue drains.
    pub fn enqueue(&mut self, kind: impl Into<String>, params: Params) -> &mut Self {
        self.push(Descriptor::new(kind, params))
    }

    /// Queue an edit built by a caller-supplied factory.
    pub fn add_custom(
        &mut self,
        kind: impl Into<String>,
        params: Params,
        factory: OperationFactory,
    ) -> &mut Self {
        self.push(Descriptor::custom(kind, params, factory))
    }

    /// Queue an edit of a kind registered in the session registry.
    pub fn add_registered(&mut self, kind: impl Into<String>, params: Params) -> &mut Self {
        self.push(Descriptor::registered(kind, params))
    }

    fn push(&mut self, descriptor: Descriptor) -> &mut Self {
        self.pending.push(descriptor);
        if let Some(descriptor) = self.pending.last() {
            debug!(kind = %descriptor.kind(), pending = self.pending.len(), "queued edit");
        }
        self
    }

    fn queue(&mut self, kind: OperationKind, params: Params) -> &mut Self {
        self.enqueue(kind.as_str(), params)
    }

    // ==================== MIXINS & IMPORTS ====================

    pub fn add_mixin(&mut self, mixin: &str) -> &mut Self {
        self.queue(OperationKind::AddMixin, Params::new().with("mixin", mixin))
    }

    pub fn remove_mixin(&mut self, mixin: &str) -> &mut Self {
        self.queue(OperationKind::RemoveMixin, Params::new().with("mixin", mixin))
    }

    pub fn add_import(&mut self, path: &str, alias: Option<&str>) -> &mut Self {
        self.queue(
            OperationKind::AddImport,
            Params::new().with("path", path).with_opt("alias", alias),
        )
    }

    pub fn remove_import(&mut self, path: &str) -> &mut Self {
        self.queue(OperationKind::RemoveImport, Params::new().with("path", path))
    }

    // ==================== FIELDS ====================

    /// Queue a new field. `default: None` declares it without a default.
    pub fn add_field(
        &mut self,
        name: &str,
        default: Option<Value>,
        visibility: &str,
        ty: Option<&str>,
    ) -> &mut Self {
        self.queue(
            OperationKind::AddField,
            Params::new()
                .with("name", name)
                .with_opt("default", default)
                .with("visibility", visibility)
                .with_opt("type", ty),
        )
    }

    pub fn remove_field(&mut self, name: &str) -> &mut Self {
        self.queue(OperationKind::RemoveField, Params::new().with("name", name))
    }

    /// Queue an in-place field change; `None` facets stay as they are.
    pub fn change_field(
        &mut self,
        name: &str,
        default: Option<Value>,
        visibility: Option<&str>,
        ty: Option<&str>,
    ) -> &mut Self {
        self.queue(
            OperationKind::ChangeField,
            Params::new()
                .with("name", name)
                .with_opt("default", default)
                .with_opt("visibility", visibility)
                .with_opt("type", ty),
        )
    }

    pub fn change_field_type(&mut self, name: &str, ty: &str) -> &mut Self {
        self.queue(
            OperationKind::ChangeFieldType,
            Params::new().with("name", name).with("type", ty),
        )
    }

    pub fn change_field_default(&mut self, name: &str, default: impl Into<Value>) -> &mut Self {
        self.queue(
            OperationKind::ChangeFieldDefault,
            Params::new().with("name", name).with("default", default),
        )
    }

    pub fn change_field_visibility(&mut self, name: &str, visibility: &str) -> &mut Self {
        self.queue(
            OperationKind::ChangeFieldVisibility,
            Params::new().with("name", name).with("visibility", visibility),
        )
    }

    /// Queue a merge of entries into a collection-valued field default.
    pub fn extend_collection_field(&mut self, name: &str, additions: impl Into<Value>) -> &mut Self {
        self.queue(
            OperationKind::ExtendCollectionField,
            Params::new().with("name", name).with("additions", additions),
        )
    }

    // ==================== ROUTINES ====================

    /// Queue a new routine. With `overwrite` an existing routine of the
    /// same name is replaced; otherwise it is kept.
    pub fn add_routine(
        &mut self,
        name: &str,
        params: Vec<ParamSpec>,
        body: &str,
        visibility: &str,
        overwrite: bool,
    ) -> &mut Self {
        self.queue(
            OperationKind::AddRoutine,
            Params::new()
                .with("name", name)
                .with("params", params)
                .with("body", body)
                .with("visibility", visibility)
                .with("override", overwrite),
        )
    }

    pub fn change_routine(
        &mut self,
        name: &str,
        params: Option<Vec<ParamSpec>>,
        body: Option<&str>,
        visibility: Option<&str>,
    ) -> &mut Self {
        self.queue(
            OperationKind::ChangeRoutine,
            Params::new()
                .with("name", name)
                .with_opt("params", params)
                .with_opt("body", body)
                .with_opt("visibility", visibility),
        )
    }

    pub fn change_routine_body(&mut self, name: &str, body: &str) -> &mut Self {
        self.queue(
            OperationKind::ChangeRoutineBody,
            Params::new().with("name", name).with("body", body),
        )
    }

    pub fn change_routine_visibility(&mut self, name: &str, visibility: &str) -> &mut Self {
        self.queue(
            OperationKind::ChangeRoutineVisibility,
            Params::new().with("name", name).with("visibility", visibility),
        )
    }

    pub fn remove_routine(&mut self, name: &str) -> &mut Self {
        self.queue(OperationKind::RemoveRoutine, Params::new().with("name", name))
    }

    // ==================== CONSTANTS ====================

    pub fn add_constant(&mut self, name: &str, value: impl Into<Value>, visibility: &str) -> &mut Self {
        self.queue(
            OperationKind::AddConstant,
            Params::new()
                .with("name", name)
                .with("value", value)
                .with("visibility", visibility),
        )
    }

    pub fn change_constant(
        &mut self,
        name: &str,
        value: Option<Value>,
        visibility: Option<&str>,
    ) -> &mut Self {
        self.queue(
            OperationKind::ChangeConstant,
            Params::new()
                .with("name", name)
                .with_opt("value", value)
                .with_opt("visibility", visibility),
        )
    }

    pub fn remove_constant(&mut self, name: &str) -> &mut Self {
        self.queue(OperationKind::RemoveConstant, Params::new().with("name", name))
    }

    // ==================== CLASS & NAMESPACE ====================

    pub fn change_class_name(&mut self, name: &str) -> &mut Self {
        self.queue(OperationKind::ChangeClassName, Params::new().with("name", name))
    }

    pub fn extend_class(&mut self, parent: &str) -> &mut Self {
        self.queue(OperationKind::ExtendClass, Params::new().with("parent", parent))
    }

    pub fn implement_interface(&mut self, interface: &str) -> &mut Self {
        self.queue(
            OperationKind::ImplementInterface,
            Params::new().with("interface", interface),
        )
    }

    pub fn change_namespace(&mut self, namespace: &str) -> &mut Self {
        self.queue(
            OperationKind::ChangeNamespace,
            Params::new().with("namespace", namespace),
        )
    }

    pub fn add_namespace(&mut self, namespace: &str) -> &mut Self {
        self.queue(
            OperationKind::AddNamespace,
            Params::new().with("namespace", namespace),
        )
    }

    // ==================== DRAIN & OUTPUT ====================

    /// Apply every queued edit in order and clear the queue.
    ///
    /// A descriptor that cannot be turned into an operation stops the
    /// drain: edits applied before it stay applied, it and the rest of the
    /// queue are dropped.
    #[instrument(level = "debug", skip(self), fields(pending = self.pending.len()))]
    pub fn apply_pending(&mut self) -> SessionResult<Vec<OperationReport>> {
        let pending = std::mem::take(&mut self.pending);
        if !pending.is_empty() {
            debug!(count = pending.len(), "draining queued edits");
        }

        let mut reports = Vec::with_capacity(pending.len());
        for descriptor in pending {
            let operation = descriptor.instantiate(&self.config.registry)?;
            let outcome = operation.apply(&mut self.file);
            trace!(kind = %descriptor.kind(), %outcome, "applied edit");

            let report = OperationReport::new(descriptor.kind(), outcome);
            self.history.push(report.clone());
            reports.push(report);
        }
        Ok(reports)
    }

    /// Drain the queue and print the source.
    pub fn render(&mut self) -> SessionResult<String> {
        self.apply_pending()?;
        Ok(print_file(&self.file, &self.config.print))
    }

    /// Render and write to `path`, or to the path the session was loaded
    /// from. Returns the path written.
    pub fn persist(&mut self, path: Option<&Path>) -> SessionResult<PathBuf> {
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => self.path.clone().ok_or(SessionError::NoPath)?,
        };
        let text = self.render()?;
        fs::write(&target, &text).map_err(|err| SessionError::write(&target, err))?;
        info!(path = %target.display(), bytes = text.len(), "persisted source file");
        Ok(target)
    }

    /// Write the source as it was loaded, before any edit.
    pub fn snapshot_original(&self, path: impl AsRef<Path>) -> SessionResult<()> {
        let Some(original) = &self.original else {
            return Ok(());
        };
        let path = path.as_ref();
        fs::write(path, original).map_err(|err| SessionError::write(path, err))?;
        info!(path = %path.display(), "wrote backup of original source");
        Ok(())
    }
}
