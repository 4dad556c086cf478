use crate::contract::HttpVerb;

/// Errors that can occur while resolving contracts and building requests.
///
/// Every variant describes a programming error at the contract-definition level
/// or an argument that cannot be represented in the request; none of them is
/// transient, so nothing is retried.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum CourierError {
    /// The method contract carries no HTTP verb marker.
    #[display("Method '{method}' is not decorated with {expected}")]
    #[from(skip)]
    MissingVerbMarker {
        /// Name of the method contract.
        method: String,
        /// The marker family that was expected.
        expected: &'static str,
    },

    /// The method contract carries more than one HTTP verb marker.
    #[display("Method '{method}' has conflicting verb markers: {markers:?}")]
    #[from(skip)]
    ConflictingMarker {
        /// Name of the method contract.
        method: String,
        /// Every verb marker found on the method, as `VERB template`.
        markers: Vec<String>,
    },

    /// The verb marker does not map to one of the supported verbs.
    #[display("Method '{method}' uses unsupported verb '{verb}'")]
    #[from(skip)]
    UnsupportedVerb {
        /// Name of the method contract.
        method: String,
        /// The verb carried by the marker.
        verb: http::Method,
    },

    /// A query-routed argument has no textual representation.
    #[display(
        "Argument '{parameter}' of type '{type_name}' cannot be used as a query parameter. Got: {value}"
    )]
    #[from(skip)]
    InvalidQueryArgument {
        /// Name of the offending formal parameter.
        parameter: String,
        /// Runtime type of the argument.
        type_name: String,
        /// The captured argument value.
        value: serde_json::Value,
    },

    /// The number of arguments does not match the formal parameters.
    #[display("Expected {expected} arguments, got {actual}")]
    #[from(skip)]
    ArgumentCountMismatch {
        /// Number of formal parameters.
        expected: usize,
        /// Number of supplied arguments.
        actual: usize,
    },

    /// Parameter positions are not a permutation of `0..count`.
    #[display(
        "Parameter '{parameter}' has position {position}, expected a unique position below {count}"
    )]
    #[from(skip)]
    InvalidParameterPosition {
        /// Name of the offending formal parameter.
        parameter: String,
        /// Its declared position.
        position: usize,
        /// Number of formal parameters.
        count: usize,
    },

    /// More than one parameter would become the request body.
    #[display("{verb} '{path}' has more than one body parameter: {parameters:?}")]
    #[from(skip)]
    MultipleBodyParameters {
        /// Verb of the method.
        verb: HttpVerb,
        /// Path template of the method.
        path: String,
        /// Names of the body-eligible parameters.
        parameters: Vec<String>,
    },

    /// An argument could not be captured as a JSON value.
    ArgumentSerialization(serde_json::Error),

    /// No method with that name is registered in the service.
    #[display("Service '{service}' has no method '{method}'")]
    #[from(skip)]
    UnknownMethod {
        /// Name of the service contract.
        service: String,
        /// The requested method name.
        method: String,
    },

    /// A method with that name is already registered in the service.
    #[display("Service '{service}' already has a method '{method}'")]
    #[from(skip)]
    DuplicateMethod {
        /// Name of the service contract.
        service: String,
        /// The duplicated method name.
        method: String,
    },

    /// Path template contains placeholders without a bound segment.
    #[display("Path '{path}' is missing required arguments: {missings:?}")]
    #[from(skip)]
    PathUnresolved {
        /// The partially resolved path.
        path: String,
        /// Placeholder names left unresolved.
        missings: Vec<String>,
    },

    /// A path segment value has no textual representation.
    #[display("Unsupported value for path segment '{parameter}'. Got: {value}")]
    #[from(skip)]
    UnsupportedPathValue {
        /// Name of the path segment.
        parameter: String,
        /// The offending value.
        value: serde_json::Value,
    },

    /// Invalid base path configuration.
    #[display("Invalid base path: {error}")]
    #[from(skip)]
    InvalidBasePath {
        /// Description of why the base path is invalid.
        error: String,
    },

    /// URL parsing error when materializing a request URL.
    UrlError(url::ParseError),

    /// HTTP protocol error from the http crate.
    HttpError(http::Error),

    /// Query pairs could not be encoded.
    QuerySerializationError(serde_urlencoded::ser::Error),
}
