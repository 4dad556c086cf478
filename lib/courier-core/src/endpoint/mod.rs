//! Hand-off of built requests to the HTTP transport.
//!
//! An [`Endpoint`] knows where a service lives. It turns a [`Request`] into a
//! concrete [`reqwest::Request`]: path segments substituted, query encoded and
//! JSON body attached. Sending it is up to the caller.

use headers::{ContentType, HeaderMapExt};
use http::Uri;
use reqwest::Body;
use tracing::debug;
use url::Url;

use crate::CourierError;
use crate::request::Request;

mod builder;
pub use self::builder::EndpointBuilder;

/// Base location of a remote service.
///
/// # Example
///
/// ```rust
/// use courier_core::{Argument, Endpoint, Marker, MethodContract, BoundMethod};
///
/// # fn example() -> Result<(), courier_core::CourierError> {
/// let endpoint = Endpoint::builder()
///     .with_host("api.example.com")
///     .with_base_path("/v1")?
///     .build()?;
///
/// let method = BoundMethod::register(
///     &MethodContract::new("get_user")
///         .with_marker(Marker::get("/users/{id}"))
///         .with_parameter::<u64>("id"),
/// )?;
/// let request = method.build(vec![Argument::new(&42_u64)?])?;
///
/// let url = endpoint.url_for(&request)?;
/// assert_eq!(url.as_str(), "http://api.example.com/v1/users/42");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_uri: Uri,
}

impl Endpoint {
    /// Creates an endpoint builder.
    pub fn builder() -> EndpointBuilder {
        EndpointBuilder::default()
    }

    /// The base URI requests are resolved against.
    pub fn base_uri(&self) -> &Uri {
        &self.base_uri
    }

    /// Computes the full URL of a request.
    ///
    /// # Errors
    ///
    /// - [`CourierError::PathUnresolved`] or [`CourierError::UnsupportedPathValue`] if the path cannot be resolved
    /// - [`CourierError::UrlError`] if the result is not a valid URL
    /// - [`CourierError::QuerySerializationError`] if the query cannot be encoded
    pub fn url_for(&self, request: &Request) -> Result<Url, CourierError> {
        let path = request.resolved_path()?;
        let base_uri = self.base_uri.to_string();
        let url = format!(
            "{}/{}",
            base_uri.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = url.parse::<Url>()?;

        let query = request.query();
        if !query.is_empty() {
            let query_string = serde_urlencoded::to_string(&query)?;
            url.set_query(Some(&query_string));
        }

        Ok(url)
    }

    /// Materializes a request for the HTTP transport, without sending it.
    ///
    /// The body, when present, is serialized as `application/json`.
    ///
    /// # Errors
    ///
    /// - any error of [`Endpoint::url_for`]
    /// - [`CourierError::ArgumentSerialization`] if the body cannot be serialized
    pub fn to_http_request(&self, request: &Request) -> Result<reqwest::Request, CourierError> {
        let url = self.url_for(request)?;
        let mut http_request = reqwest::Request::new(request.verb().as_method(), url);

        if let Some(payload) = request.body() {
            let data = serde_json::to_vec(payload.value())?;
            http_request.headers_mut().typed_insert(ContentType::json());
            *http_request.body_mut() = Some(Body::from(data));
        }

        debug!(?http_request, "request ready");
        Ok(http_request)
    }
}
