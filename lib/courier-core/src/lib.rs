//! # Courier Core
//!
//! Build outbound HTTP requests from declaratively annotated method contracts.
//!
//! A remote operation is declared once, as a [`MethodContract`]: a name, ordered
//! formal parameters and an HTTP verb [`Marker`] carrying the path template.
//! At call time the arguments are bound into a [`Request`]:
//!
//! - parameters named after a `{placeholder}` of the path template become path segments
//! - with `GET` and `DELETE`, the other parameters become query parameters
//! - with `POST` and `PUT`, the other parameter becomes the request body
//!
//! ## Quick Start
//!
//! ### Using the `#[http_service]` macro
//!
//! With the `macros` feature, annotate a trait and get a request builder per method:
//!
//! ```rust,ignore
//! use courier_core::http_service;
//!
//! #[http_service]
//! trait UserService {
//!     #[get("/users/{id}")]
//!     fn get_user(&self, id: u64);
//!
//!     #[post("/users")]
//!     fn create_user(&self, user: UserDto);
//! }
//!
//! let requests = UserServiceRequests::new()?;
//! let request = requests.get_user(&42)?;
//! assert_eq!(request.resolved_path()?, "/users/42");
//! ```
//!
//! ### Declaring contracts by hand
//!
//! ```rust
//! use courier_core::{Argument, Marker, MethodContract, ServiceContract};
//!
//! # fn example() -> Result<(), courier_core::CourierError> {
//! let service = ServiceContract::new("ItemService")
//!     .register(
//!         &MethodContract::new("search")
//!             .with_marker(Marker::get("/items"))
//!             .with_parameter::<str>("term"),
//!     )?
//!     .register(
//!         &MethodContract::new("update_item")
//!             .with_marker(Marker::put("/items/{id}"))
//!             .with_parameter::<u64>("id")
//!             .with_parameter::<serde_json::Value>("item"),
//!     )?;
//!
//! let search = service.build("search", vec![Argument::new("rust")?])?;
//! assert_eq!(search.query(), vec![("term", "rust")]);
//!
//! let update = service.build("update_item", vec![
//!     Argument::new(&7_u64)?,
//!     Argument::from_json(serde_json::json!({"name": "book"})),
//! ])?;
//! assert_eq!(update.resolved_path()?, "/items/7");
//! assert!(update.body().is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Handing requests to the transport
//!
//! A [`Request`] is transport independent. An [`Endpoint`] turns it into a
//! [`reqwest::Request`] ready to be sent:
//!
//! ```rust
//! use courier_core::{Argument, BoundMethod, Endpoint, Marker, MethodContract};
//!
//! # fn example() -> Result<(), courier_core::CourierError> {
//! let endpoint = Endpoint::builder().with_host("api.example.com").build()?;
//! let method = BoundMethod::register(
//!     &MethodContract::new("delete_order")
//!         .with_marker(Marker::delete("/orders/{id}"))
//!         .with_parameter::<u64>("id"),
//! )?;
//!
//! let request = method.build(vec![Argument::new(&12_u64)?])?;
//! let http_request = endpoint.to_http_request(&request)?;
//! assert_eq!(http_request.url().as_str(), "http://api.example.com/orders/12");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure is a [`CourierError`]. Contract errors (missing or conflicting
//! verb markers, several body parameters) surface when the method is registered;
//! argument errors surface when the request is built.

mod contract;
mod endpoint;
mod error;
mod request;
mod service;

pub use self::contract::{
    ArgumentDestination, FormalParameter, HttpMarker, HttpVerb, Marker, MethodContract,
    MethodDescriptor, TypeRef, classify_others, classify_path_segments, placeholders, resolve,
};
pub use self::endpoint::{Endpoint, EndpointBuilder};
pub use self::error::CourierError;
pub use self::request::{
    Argument, BindingKind, BindingTable, ParameterBinding, Payload, Request, build_request,
};
pub use self::service::{BoundMethod, ServiceContract};

pub use http::Method;

#[cfg(feature = "macros")]
pub use courier_macro::http_service;
