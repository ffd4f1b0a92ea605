use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Method assumed when a declaration or request does not name one.
pub const DEFAULT_METHOD: &str = "GET";

/// Extra declaration fields carried through to the match result untouched.
pub type Extra = Map<String, Value>;

/// A single route declaration.
///
/// `H` is the opaque handler payload returned on match. Loaders produce
/// `RouteDecl<serde_json::Value>`; programmatic callers usually pick their
/// own handler type (a function pointer, an id, a boxed closure).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDecl<H> {
    /// Path pattern, `/`-separated; `:name` segments are dynamic
    pub path: String,
    /// Method this route answers, `GET` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Opaque payload returned verbatim on match
    pub handler: H,
    /// Parameter name -> regex restricting the values that parameter may bind
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub constraints: BTreeMap<String, String>,
    /// Every other declared field
    #[serde(flatten)]
    pub extra: Extra,
}

impl<H> RouteDecl<H> {
    /// A `GET` route with no constraints and no extra fields.
    pub fn new(path: impl Into<String>, handler: H) -> Self {
        Self {
            path: path.into(),
            method: None,
            handler,
            constraints: BTreeMap::new(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    #[must_use]
    pub fn with_constraint(mut self, param: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.constraints.insert(param.into(), pattern.into());
        self
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The declared method, or [`DEFAULT_METHOD`].
    #[must_use]
    pub fn method_or_default(&self) -> &str {
        self.method.as_deref().unwrap_or(DEFAULT_METHOD)
    }
}
