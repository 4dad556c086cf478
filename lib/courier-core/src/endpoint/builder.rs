use std::fmt::Debug;

use http::Uri;
use http::uri::{PathAndQuery, Scheme};

use super::Endpoint;
use crate::CourierError;

/// Builder for [`Endpoint`] instances.
///
/// # Default Configuration
///
/// - **Scheme**: HTTP (use `with_scheme()` to change to HTTPS)
/// - **Host**: 127.0.0.1 (localhost)
/// - **Port**: 80 (standard HTTP port)
/// - **Base path**: None (requests go to root path)
///
/// # Example
///
/// ```rust
/// use courier_core::Endpoint;
/// use http::uri::Scheme;
///
/// # fn example() -> Result<(), courier_core::CourierError> {
/// let endpoint = Endpoint::builder()
///     .with_scheme(Scheme::HTTPS)
///     .with_host("api.example.com")
///     .with_port(443)
///     .with_base_path("/v1")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EndpointBuilder {
    scheme: Scheme,
    host: String,
    port: u16,
    base_path: Option<PathAndQuery>,
}

impl EndpointBuilder {
    /// Builds the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::HttpError`] if the base URI cannot be built from
    /// the scheme, host and port.
    pub fn build(self) -> Result<Endpoint, CourierError> {
        let Self {
            scheme,
            host,
            port,
            base_path,
        } = self;

        let builder = Uri::builder()
            .scheme(scheme)
            .authority(format!("{host}:{port}"));
        let builder = if let Some(path) = &base_path {
            builder.path_and_query(path.path())
        } else {
            builder.path_and_query("/")
        };

        let base_uri = builder.build()?;
        Ok(Endpoint { base_uri })
    }

    /// Sets the HTTP scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the hostname or IP address of the service.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port of the service.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the base path prepended to every request path.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::InvalidBasePath`] if the path contains invalid characters
    /// (such as spaces) or cannot be parsed as a valid URI path.
    pub fn with_base_path<P>(mut self, base_path: P) -> Result<Self, CourierError>
    where
        P: TryInto<PathAndQuery>,
        P::Error: Debug + 'static,
    {
        let base_path = base_path
            .try_into()
            .map_err(|err| CourierError::InvalidBasePath {
                error: format!("{err:?}"),
            })?;
        self.base_path = Some(base_path);
        Ok(self)
    }
}

impl Default for EndpointBuilder {
    fn default() -> Self {
        Self {
            scheme: Scheme::HTTP,
            host: "127.0.0.1".to_string(),
            port: 80,
            base_path: None,
        }
    }
}
