//! `#[http_service]` attribute implementation

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{Attribute, FnArg, Ident, ItemTrait, LitStr, Pat, TraitItem, TraitItemFn, Type};

/// Verb attributes, with the matching `http::Method` constant.
const VERB_ATTRIBUTES: [(&str, &str); 7] = [
    ("get", "GET"),
    ("post", "POST"),
    ("put", "PUT"),
    ("delete", "DELETE"),
    ("patch", "PATCH"),
    ("head", "HEAD"),
    ("options", "OPTIONS"),
];

/// Names of the generated associated functions.
const RESERVED_NAMES: [&str; 3] = ["new", "contracts", "service"];

pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new(
            attr.span(),
            "#[http_service] does not take arguments",
        ));
    }

    let mut item_trait: ItemTrait = syn::parse2(item)?;
    let mut methods = Vec::new();
    for trait_item in &mut item_trait.items {
        if let TraitItem::Fn(function) = trait_item {
            methods.push(ServiceMethod::extract(function)?);
        }
    }

    let vis = &item_trait.vis;
    let trait_ident = &item_trait.ident;
    let service_name = trait_ident.to_string();
    let requests_ident = format_ident!("{}Requests", trait_ident);

    let struct_doc = format!("Request builders of the [`{service_name}`] service.");
    let contracts = methods.iter().map(ServiceMethod::contract);
    let builders = methods.iter().map(|method| method.builder(&service_name));

    Ok(quote! {
        #item_trait

        #[doc = #struct_doc]
        #[derive(Debug, Clone)]
        #vis struct #requests_ident {
            service: ::courier_core::ServiceContract,
        }

        impl #requests_ident {
            /// Method contracts of the service, in declaration order.
            pub fn contracts() -> ::std::vec::Vec<::courier_core::MethodContract> {
                ::std::vec![#(#contracts),*]
            }

            /// Registers every method of the service.
            ///
            /// # Errors
            ///
            /// Returns the first registration error, e.g. a method without verb marker.
            pub fn new() -> ::core::result::Result<Self, ::courier_core::CourierError> {
                let mut service = ::courier_core::ServiceContract::new(#service_name);
                for contract in Self::contracts() {
                    service = service.register(&contract)?;
                }
                ::core::result::Result::Ok(Self { service })
            }

            /// The registered service.
            pub fn service(&self) -> &::courier_core::ServiceContract {
                &self.service
            }

            #(#builders)*
        }
    })
}

/// A trait method, with its verb attributes stripped.
struct ServiceMethod {
    ident: Ident,
    markers: Vec<TokenStream>,
    parameters: Vec<ServiceParameter>,
}

struct ServiceParameter {
    ident: Ident,
    /// Declared type, without the outer reference.
    ty: Type,
}

impl ServiceMethod {
    fn extract(function: &mut TraitItemFn) -> syn::Result<Self> {
        let ident = function.sig.ident.clone();
        if RESERVED_NAMES.contains(&ident.to_string().as_str()) {
            return Err(syn::Error::new(
                ident.span(),
                format!("method name `{ident}` is reserved by the generated request builders"),
            ));
        }
        if !function.sig.generics.params.is_empty() {
            return Err(syn::Error::new(
                function.sig.generics.span(),
                "generic methods are not supported by #[http_service]",
            ));
        }

        let mut markers = Vec::new();
        let mut kept = Vec::new();
        for attr in std::mem::take(&mut function.attrs) {
            if let Some(method) = verb_of(&attr) {
                let path: LitStr = attr.parse_args()?;
                let method = format_ident!("{}", method);
                markers.push(quote! {
                    ::courier_core::Marker::http(::courier_core::Method::#method, #path)
                });
            } else {
                if !attr.path().is_ident("doc") {
                    let name = path_name(&attr);
                    markers.push(quote! { ::courier_core::Marker::other(#name) });
                }
                kept.push(attr);
            }
        }
        function.attrs = kept;

        let parameters = function
            .sig
            .inputs
            .iter()
            .filter_map(|input| match input {
                FnArg::Receiver(_) => None,
                FnArg::Typed(typed) => Some(typed),
            })
            .map(|typed| {
                let Pat::Ident(pat) = typed.pat.as_ref() else {
                    return Err(syn::Error::new(
                        typed.pat.span(),
                        "parameters must be plain identifiers",
                    ));
                };
                let ty = match typed.ty.as_ref() {
                    Type::Reference(reference) => reference.elem.as_ref().clone(),
                    Type::ImplTrait(_) => {
                        return Err(syn::Error::new(
                            typed.ty.span(),
                            "`impl Trait` parameters are not supported by #[http_service]",
                        ));
                    }
                    ty => ty.clone(),
                };
                Ok(ServiceParameter {
                    ident: pat.ident.clone(),
                    ty,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        Ok(Self {
            ident,
            markers,
            parameters,
        })
    }

    fn contract(&self) -> TokenStream {
        let name = self.ident.to_string();
        let markers = &self.markers;
        let parameters = self.parameters.iter().map(|parameter| {
            let ty = &parameter.ty;
            let name = parameter.ident.to_string();
            quote! { .with_parameter::<#ty>(#name) }
        });

        quote! {
            ::courier_core::MethodContract::new(#name)
                #(.with_marker(#markers))*
                #(#parameters)*
        }
    }

    fn builder(&self, service_name: &str) -> TokenStream {
        let ident = &self.ident;
        let name = ident.to_string();
        let doc = format!("Builds the request of [`{service_name}::{name}`].");
        let idents: Vec<_> = self.parameters.iter().map(|param| &param.ident).collect();
        let types = self.parameters.iter().map(|param| &param.ty);

        quote! {
            #[doc = #doc]
            ///
            /// # Errors
            ///
            /// Returns an error if an argument cannot be bound into the request.
            pub fn #ident(
                &self,
                #(#idents: &#types),*
            ) -> ::core::result::Result<::courier_core::Request, ::courier_core::CourierError> {
                self.service.build(#name, ::std::vec![
                    #(::courier_core::Argument::new(#idents)?),*
                ])
            }
        }
    }
}

fn verb_of(attr: &Attribute) -> Option<&'static str> {
    VERB_ATTRIBUTES
        .iter()
        .find(|(name, _)| attr.path().is_ident(name))
        .map(|(_, method)| *method)
}

fn path_name(attr: &Attribute) -> String {
    attr.path()
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

#[cfg(test)]
mod tests {
    use syn::{ImplItem, Item};

    use super::*;

    fn expand_file(item: TokenStream) -> syn::File {
        let output = expand(TokenStream::new(), item).expect("expansion");
        syn::parse2(output).expect("valid items")
    }

    fn expand_error(item: TokenStream) -> String {
        expand(TokenStream::new(), item)
            .expect_err("expansion error")
            .to_string()
    }

    #[test]
    fn should_generate_requests_struct_and_builders() {
        let file = expand_file(quote! {
            pub trait UserService {
                /// Fetches a user.
                #[get("/users/{id}")]
                fn get_user(&self, id: Uuid) -> User;

                #[put("/users/{id}")]
                #[deprecated]
                fn update_user(&self, id: Uuid, user: &UserDto) -> User;
            }
        });

        let Some(Item::Trait(item_trait)) = file.items.first() else {
            panic!("the trait is kept first");
        };
        let remaining_attrs: Vec<_> = item_trait
            .items
            .iter()
            .filter_map(|item| match item {
                TraitItem::Fn(function) => Some(function.attrs.len()),
                _ => None,
            })
            .collect();
        assert_eq!(remaining_attrs, vec![1, 1]);

        let Some(Item::Struct(requests)) = file.items.get(1) else {
            panic!("a requests struct");
        };
        assert_eq!(requests.ident, "UserServiceRequests");

        let Some(Item::Impl(item_impl)) = file.items.get(2) else {
            panic!("an inherent impl");
        };
        let functions: Vec<_> = item_impl
            .items
            .iter()
            .filter_map(|item| match item {
                ImplItem::Fn(function) => Some(function.sig.ident.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(functions, vec![
            "contracts",
            "new",
            "service",
            "get_user",
            "update_user"
        ]);
    }

    #[test]
    fn should_take_arguments_by_reference() {
        let file = expand_file(quote! {
            trait ItemService {
                #[get("/items")]
                fn search(&self, term: &str, limit: u32);
            }
        });

        let Some(Item::Impl(item_impl)) = file.items.get(2) else {
            panic!("an inherent impl");
        };
        let Some(ImplItem::Fn(search)) = item_impl.items.last() else {
            panic!("a search builder");
        };
        let inputs: Vec<_> = search
            .sig
            .inputs
            .iter()
            .skip(1)
            .map(|input| quote!(#input).to_string().replace(' ', ""))
            .collect();
        assert_eq!(inputs, vec!["term:&str", "limit:&u32"]);
    }

    #[test]
    fn should_reject_arguments() {
        let result = expand(
            quote!(base = "/api"),
            quote! {
                trait ItemService {}
            },
        );

        let error = result.expect_err("no arguments");
        assert_eq!(error.to_string(), "#[http_service] does not take arguments");
    }

    #[test]
    fn should_reject_pattern_parameters() {
        let error = expand_error(quote! {
            trait ItemService {
                #[get("/items")]
                fn search(&self, (term, limit): (String, u32));
            }
        });

        assert_eq!(error, "parameters must be plain identifiers");
    }

    #[test]
    fn should_reject_reserved_names() {
        let error = expand_error(quote! {
            trait ItemService {
                #[get("/items")]
                fn new(&self);
            }
        });

        assert_eq!(
            error,
            "method name `new` is reserved by the generated request builders"
        );
    }

    #[test]
    fn should_reject_generic_methods() {
        let error = expand_error(quote! {
            trait ItemService {
                #[post("/items")]
                fn create<T>(&self, item: T);
            }
        });

        assert_eq!(error, "generic methods are not supported by #[http_service]");
    }

    #[test]
    fn should_reject_verb_without_path() {
        let result = expand(TokenStream::new(), quote! {
            trait ItemService {
                #[get]
                fn list(&self);
            }
        });

        assert!(result.is_err());
    }
}
