//! Method contracts and their metadata.
//!
//! A [`MethodContract`] describes the shape of a remote call: its name, its ordered
//! formal parameters and the [`Marker`]s attached to it. Contracts are plain data;
//! the [`resolve`] function extracts the [`MethodDescriptor`] from the verb marker
//! and the classifier functions split the parameters into path segments and the rest.
//!
//! Contracts are usually generated by the `#[http_service]` macro, but they can be
//! declared by hand:
//!
//! ```rust
//! use courier_core::{HttpVerb, Marker, MethodContract, resolve};
//!
//! # fn example() -> Result<(), courier_core::CourierError> {
//! let contract = MethodContract::new("get_user")
//!     .with_marker(Marker::get("/users/{id}"))
//!     .with_parameter::<u64>("id");
//!
//! let descriptor = resolve(&contract)?;
//! assert_eq!(descriptor.verb(), HttpVerb::Get);
//! assert_eq!(descriptor.path_template(), "/users/{id}");
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;

use http::Method;

mod verb;
pub use self::verb::{ArgumentDestination, HttpVerb};

mod resolver;
pub use self::resolver::{MethodDescriptor, resolve};

mod classifier;
pub use self::classifier::{classify_others, classify_path_segments, placeholders};
pub(crate) use self::classifier::is_path_segment;

/// The declared type of a formal parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{_0}")]
pub struct TypeRef(Cow<'static, str>);

impl TypeRef {
    /// The type reference of `T`, as reported by [`std::any::type_name`].
    pub fn of<T: ?Sized>() -> Self {
        Self(Cow::Borrowed(std::any::type_name::<T>()))
    }

    /// A type reference from its textual name.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// The type name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A formal parameter of a method contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormalParameter {
    name: String,
    position: usize,
    declared_type: TypeRef,
}

impl FormalParameter {
    /// Creates a formal parameter at the given position.
    pub fn new(name: impl Into<String>, position: usize, declared_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            position,
            declared_type,
        }
    }

    /// The parameter name, matched against `{name}` placeholders.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based position in the method signature.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The declared type of the parameter.
    pub fn declared_type(&self) -> &TypeRef {
        &self.declared_type
    }
}

/// An HTTP verb marker: the verb and the path template of the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpMarker {
    method: Method,
    path_template: String,
}

impl HttpMarker {
    /// The verb carried by the marker, possibly outside the supported set.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path template, e.g. `/users/{id}`.
    pub fn path_template(&self) -> &str {
        &self.path_template
    }
}

/// Metadata attached to a method contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// A marker of the HTTP verb family.
    Http(HttpMarker),
    /// Any other metadata, ignored when resolving the verb.
    Other(Cow<'static, str>),
}

impl Marker {
    /// An HTTP verb marker with an arbitrary method.
    pub fn http(method: Method, path_template: impl Into<String>) -> Self {
        Self::Http(HttpMarker {
            method,
            path_template: path_template.into(),
        })
    }

    /// A `GET` marker.
    pub fn get(path_template: impl Into<String>) -> Self {
        Self::http(Method::GET, path_template)
    }

    /// A `POST` marker.
    pub fn post(path_template: impl Into<String>) -> Self {
        Self::http(Method::POST, path_template)
    }

    /// A `PUT` marker.
    pub fn put(path_template: impl Into<String>) -> Self {
        Self::http(Method::PUT, path_template)
    }

    /// A `DELETE` marker.
    pub fn delete(path_template: impl Into<String>) -> Self {
        Self::http(Method::DELETE, path_template)
    }

    /// A marker that is not related to HTTP.
    pub fn other(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Other(name.into())
    }

    /// The HTTP marker, if this is one.
    pub fn as_http(&self) -> Option<&HttpMarker> {
        match self {
            Self::Http(marker) => Some(marker),
            Self::Other(_) => None,
        }
    }
}

/// A declared remote operation: name, ordered formal parameters and markers.
///
/// Parameters get their position from the order in which they are added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodContract {
    name: String,
    parameters: Vec<FormalParameter>,
    markers: Vec<Marker>,
}

impl MethodContract {
    /// Creates a contract with no parameters and no markers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Attaches a marker.
    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Appends a formal parameter whose declared type is `T`.
    #[must_use]
    pub fn with_parameter<T: ?Sized>(self, name: impl Into<String>) -> Self {
        self.with_typed_parameter(name, TypeRef::of::<T>())
    }

    /// Appends a formal parameter with an explicit type reference.
    #[must_use]
    pub fn with_typed_parameter(mut self, name: impl Into<String>, declared_type: TypeRef) -> Self {
        let position = self.parameters.len();
        self.parameters
            .push(FormalParameter::new(name, position, declared_type));
        self
    }

    /// The method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Formal parameters, in declaration order.
    pub fn parameters(&self) -> &[FormalParameter] {
        &self.parameters
    }

    /// Attached markers, in declaration order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}
