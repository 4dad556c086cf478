use http::Method;

/// The HTTP verbs a method contract can be bound to.
///
/// This is a closed set: a verb marker carrying any other [`Method`] is rejected
/// with [`CourierError::UnsupportedVerb`](crate::CourierError::UnsupportedVerb).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HttpVerb {
    /// `GET`
    #[display("GET")]
    Get,
    /// `POST`
    #[display("POST")]
    Post,
    /// `PUT`
    #[display("PUT")]
    Put,
    /// `DELETE`
    #[display("DELETE")]
    Delete,
}

/// Where the non-path arguments of a request go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentDestination {
    /// Encoded in the query string.
    Query,
    /// Sent as the request payload.
    Body,
}

/// Marker method to verb lookup table.
const VERB_TABLE: [(Method, HttpVerb); 4] = [
    (Method::GET, HttpVerb::Get),
    (Method::POST, HttpVerb::Post),
    (Method::PUT, HttpVerb::Put),
    (Method::DELETE, HttpVerb::Delete),
];

impl HttpVerb {
    /// Looks up the verb carried by a marker, `None` if the method is not supported.
    pub fn from_method(method: &Method) -> Option<Self> {
        VERB_TABLE
            .iter()
            .find(|(candidate, _)| candidate == method)
            .map(|(_, verb)| *verb)
    }

    /// The [`Method`] to use on the wire.
    pub fn as_method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }

    /// Routes non-path arguments: query for `GET`/`DELETE`, body for `POST`/`PUT`.
    pub fn argument_destination(self) -> ArgumentDestination {
        match self {
            Self::Get | Self::Delete => ArgumentDestination::Query,
            Self::Post | Self::Put => ArgumentDestination::Body,
        }
    }
}

impl From<HttpVerb> for Method {
    fn from(value: HttpVerb) -> Self {
        value.as_method()
    }
}
