//! Routine signatures and bodies built from caller input.

use sculptor_core::{Key, Value};
use sculptor_parser::{parse_fragment, InnerStmt, Param};
use tracing::warn;

use crate::literal::encode;

/// Body installed when the supplied body text does not parse.
pub const FALLBACK_BODY: &str = "throw new \\Exception('Method body parsing failed');";

/// A routine parameter as supplied by a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub ty: Option<String>,
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: name.trim_start_matches('$').to_string(),
            ty: None,
            default: None,
        }
    }

    pub fn typed(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(name).with_type(ty)
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Build the tree node.
    pub fn to_param(&self) -> Param {
        Param {
            ty: self.ty.clone().filter(|t| !t.is_empty()),
            default: self.default.as_ref().map(encode),
            ..Param::new(self.name.clone())
        }
    }

    /// Descriptor form: `{name, type, default}`.
    pub fn to_value(&self) -> Value {
        let mut value = Value::map().with_entry("name", self.name.clone());
        if let Some(ty) = &self.ty {
            value = value.with_entry("type", ty.clone());
        }
        if let Some(default) = &self.default {
            value = value.with_entry("default", default.clone());
        }
        value
    }

    /// Read a parameter from a bare name or a `{name, type, default}` map.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self::new(name.clone())),
            Value::Map(entries) => {
                let field = |key: &str| {
                    entries
                        .iter()
                        .find(|(k, _)| *k == Key::String(key.to_string()))
                        .map(|(_, v)| v)
                };
                let mut spec = Self::new(field("name")?.as_str()?);
                spec.ty = field("type").and_then(Value::as_str).map(str::to_string);
                spec.default = field("default").cloned();
                Some(spec)
            }
            _ => None,
        }
    }
}

impl From<&str> for ParamSpec {
    fn from(name: &str) -> Self {
        ParamSpec::new(name)
    }
}

impl From<ParamSpec> for Value {
    fn from(spec: ParamSpec) -> Self {
        spec.to_value()
    }
}

/// Parse body text into statements. Unparsable text yields a body that
/// throws, so the tree stays well-formed.
pub fn build_body(routine: &str, text: &str) -> Vec<InnerStmt> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    match parse_fragment(text) {
        Ok(stmts) => stmts,
        Err(err) => {
            warn!(routine = %routine, error = %err, "routine body failed to parse, installing fallback");
            vec![InnerStmt::new(FALLBACK_BODY)]
        }
    }
}
