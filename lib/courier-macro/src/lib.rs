//! Procedural macros for courier.
//!
//! This crate is re-exported by `courier-core` behind the `macros` feature; use it
//! through `courier_core::http_service`.

mod service;

use proc_macro::TokenStream;

/// Generates method contracts and request builders from an annotated trait.
///
/// Each trait method carries one HTTP verb attribute with its path template:
/// `#[get("...")]`, `#[post("...")]`, `#[put("...")]` or `#[delete("...")]`.
/// `#[patch]`, `#[head]` and `#[options]` are accepted by the macro and rejected
/// when the service is registered.
///
/// # Example
///
/// ```ignore
/// #[http_service]
/// pub trait UserService {
///     #[get("/users/{id}")]
///     fn get_user(&self, id: Uuid) -> User;
///
///     #[put("/users/{id}")]
///     fn update_user(&self, id: Uuid, user: UserDto) -> User;
/// }
/// ```
///
/// The trait is kept, without the verb attributes, and this is generated:
///
/// ```ignore
/// pub struct UserServiceRequests { /* ... */ }
///
/// impl UserServiceRequests {
///     pub fn contracts() -> Vec<courier_core::MethodContract>;
///     pub fn new() -> Result<Self, courier_core::CourierError>;
///     pub fn service(&self) -> &courier_core::ServiceContract;
///
///     pub fn get_user(&self, id: &Uuid) -> Result<courier_core::Request, courier_core::CourierError>;
///     pub fn update_user(&self, id: &Uuid, user: &UserDto) -> Result<courier_core::Request, courier_core::CourierError>;
/// }
/// ```
#[proc_macro_attribute]
pub fn http_service(attr: TokenStream, item: TokenStream) -> TokenStream {
    service::expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
