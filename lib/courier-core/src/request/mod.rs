//! Outbound requests and the binding of arguments into them.
//!
//! - [`Argument`] - a call-time value captured as JSON
//! - [`ParameterBinding`] - where one argument goes: path, query or body
//! - [`BindingTable`] - the per-position binding kinds of a contract, computed once
//! - [`Request`] - the assembled request handed to the transport

use indexmap::IndexMap;

use crate::CourierError;
use crate::contract::{HttpVerb, TypeRef};

mod argument;
pub use self::argument::Argument;

mod binding;
pub use self::binding::{BindingKind, BindingTable, build_request};

mod path;

/// A request payload and the runtime type it was captured from.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    value: serde_json::Value,
    type_name: TypeRef,
}

impl Payload {
    /// The payload, as JSON.
    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    /// Runtime type of the original value.
    pub fn type_name(&self) -> &TypeRef {
        &self.type_name
    }
}

/// The destination of one argument in the outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterBinding {
    /// Substituted into the `{name}` placeholder of the path template.
    PathSegment {
        /// The placeholder name.
        name: String,
        /// The value to substitute.
        value: serde_json::Value,
    },
    /// A `name=value` pair of the query string.
    Query {
        /// The parameter name.
        name: String,
        /// The textual value.
        value: String,
    },
    /// The request payload.
    Body {
        /// The payload.
        value: Payload,
    },
}

/// A fully formed outbound request.
///
/// The path template is kept as declared; the bound path segments are
/// substituted by [`Request::resolved_path`] when the request is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    verb: HttpVerb,
    path_template: String,
    bindings: Vec<ParameterBinding>,
}

impl Request {
    pub(crate) fn new(verb: HttpVerb, path_template: impl Into<String>) -> Self {
        Self {
            verb,
            path_template: path_template.into(),
            bindings: Vec::new(),
        }
    }

    pub(crate) fn add_binding(&mut self, binding: ParameterBinding) {
        self.bindings.push(binding);
    }

    /// The request verb.
    pub fn verb(&self) -> HttpVerb {
        self.verb
    }

    /// The path template, placeholders not substituted.
    pub fn path_template(&self) -> &str {
        &self.path_template
    }

    /// Every binding, in parameter declaration order.
    pub fn bindings(&self) -> &[ParameterBinding] {
        &self.bindings
    }

    /// The path segments bound to the template placeholders.
    pub fn path_segments(&self) -> IndexMap<&str, &serde_json::Value> {
        self.bindings
            .iter()
            .filter_map(|binding| match binding {
                ParameterBinding::PathSegment { name, value } => Some((name.as_str(), value)),
                _ => None,
            })
            .collect()
    }

    /// The query parameters, in order.
    pub fn query(&self) -> Vec<(&str, &str)> {
        self.bindings
            .iter()
            .filter_map(|binding| match binding {
                ParameterBinding::Query { name, value } => Some((name.as_str(), value.as_str())),
                _ => None,
            })
            .collect()
    }

    /// The request payload, if any.
    pub fn body(&self) -> Option<&Payload> {
        self.bindings.iter().find_map(|binding| match binding {
            ParameterBinding::Body { value } => Some(value),
            _ => None,
        })
    }

    /// Substitutes the bound path segments into the template.
    ///
    /// Values are percent-encoded; arrays of scalars are joined with `,`.
    ///
    /// # Errors
    ///
    /// - [`CourierError::PathUnresolved`] if a placeholder has no bound segment
    /// - [`CourierError::UnsupportedPathValue`] if a segment value has no textual form
    pub fn resolved_path(&self) -> Result<String, CourierError> {
        path::resolve_path(&self.path_template, &self.path_segments())
    }
}
