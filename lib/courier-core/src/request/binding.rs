use tracing::{debug, warn};

use super::{Argument, ParameterBinding, Payload, Request};
use crate::CourierError;
use crate::contract::{
    ArgumentDestination, FormalParameter, MethodContract, MethodDescriptor, is_path_segment,
    placeholders,
};

/// How the argument at one position is bound into the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// Substituted into the path template.
    PathSegment,
    /// Added to the query string.
    Query,
    /// Sent as the request payload.
    Body,
}

/// The binding kind of every formal parameter of a method, computed once.
///
/// Building a request from a table is a per-position lookup; no metadata is
/// inspected at call time.
///
/// # Example
///
/// ```rust
/// use courier_core::{Argument, BindingKind, BindingTable, HttpVerb, MethodDescriptor, FormalParameter, TypeRef};
///
/// # fn example() -> Result<(), courier_core::CourierError> {
/// let descriptor = MethodDescriptor::new(HttpVerb::Get, "/users/{id}");
/// let parameters = vec![
///     FormalParameter::new("id", 0, TypeRef::of::<u64>()),
///     FormalParameter::new("expand", 1, TypeRef::of::<bool>()),
/// ];
///
/// let table = BindingTable::new(descriptor, parameters)?;
/// assert_eq!(table.kinds(), &[BindingKind::PathSegment, BindingKind::Query]);
///
/// let request = table.bind(vec![Argument::new(&42_u64)?, Argument::new(&true)?])?;
/// assert_eq!(request.query(), vec![("expand", "true")]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTable {
    descriptor: MethodDescriptor,
    parameters: Vec<FormalParameter>,
    kinds: Vec<BindingKind>,
}

impl BindingTable {
    /// Classifies the parameters of a method against its descriptor.
    ///
    /// Placeholders without a matching parameter are reported with a warning
    /// and fail later, when the path is resolved.
    ///
    /// # Errors
    ///
    /// - [`CourierError::InvalidParameterPosition`] if positions are duplicated or out of range
    /// - [`CourierError::MultipleBodyParameters`] if more than one parameter would
    ///   become the payload of a `POST` or `PUT` request
    pub fn new(
        descriptor: MethodDescriptor,
        parameters: Vec<FormalParameter>,
    ) -> Result<Self, CourierError> {
        check_positions(&parameters)?;
        let template = descriptor.path_template();

        let other_kind = match descriptor.verb().argument_destination() {
            ArgumentDestination::Query => BindingKind::Query,
            ArgumentDestination::Body => BindingKind::Body,
        };
        let kinds: Vec<_> = parameters
            .iter()
            .map(|parameter| {
                if is_path_segment(parameter, template) {
                    BindingKind::PathSegment
                } else {
                    other_kind
                }
            })
            .collect();

        let body_parameters: Vec<String> = parameters
            .iter()
            .zip(&kinds)
            .filter(|(_, kind)| **kind == BindingKind::Body)
            .map(|(parameter, _)| parameter.name().to_string())
            .collect();
        if body_parameters.len() > 1 {
            return Err(CourierError::MultipleBodyParameters {
                verb: descriptor.verb(),
                path: template.to_string(),
                parameters: body_parameters,
            });
        }

        for name in placeholders(template) {
            if !parameters.iter().any(|parameter| parameter.name() == name) {
                warn!(?name, path = template, "placeholder has no matching parameter");
            }
        }

        Ok(Self {
            descriptor,
            parameters,
            kinds,
        })
    }

    /// Builds the table of a method contract already resolved to `descriptor`.
    ///
    /// # Errors
    ///
    /// See [`BindingTable::new`].
    pub fn for_contract(
        descriptor: MethodDescriptor,
        contract: &MethodContract,
    ) -> Result<Self, CourierError> {
        Self::new(descriptor, contract.parameters().to_vec())
    }

    /// The descriptor the table was built for.
    pub fn descriptor(&self) -> &MethodDescriptor {
        &self.descriptor
    }

    /// Formal parameters, in declaration order.
    pub fn parameters(&self) -> &[FormalParameter] {
        &self.parameters
    }

    /// Binding kind of each parameter, by position.
    pub fn kinds(&self) -> &[BindingKind] {
        &self.kinds
    }

    /// Binds the arguments of one call.
    ///
    /// `arguments[i]` is the value of the parameter at position `i`.
    ///
    /// # Errors
    ///
    /// - [`CourierError::ArgumentCountMismatch`] if the argument count differs from the parameters
    /// - [`CourierError::InvalidQueryArgument`] if a query argument has no textual form
    pub fn bind(&self, arguments: Vec<Argument>) -> Result<Request, CourierError> {
        let expected = self.parameters.len();
        let actual = arguments.len();
        if actual != expected {
            return Err(CourierError::ArgumentCountMismatch { expected, actual });
        }

        let mut arguments: Vec<_> = arguments.into_iter().map(Some).collect();
        let mut request = Request::new(self.descriptor.verb(), self.descriptor.path_template());
        for (parameter, kind) in self.parameters.iter().zip(&self.kinds) {
            let argument = arguments
                .get_mut(parameter.position())
                .and_then(Option::take)
                .ok_or(CourierError::ArgumentCountMismatch { expected, actual })?;
            match kind {
                BindingKind::PathSegment => request.add_binding(ParameterBinding::PathSegment {
                    name: parameter.name().to_string(),
                    value: argument.into_value(),
                }),
                BindingKind::Query => {
                    let Some(values) = argument.to_query_values() else {
                        return Err(CourierError::InvalidQueryArgument {
                            parameter: parameter.name().to_string(),
                            type_name: argument.type_name().to_string(),
                            value: argument.into_value(),
                        });
                    };
                    for value in values {
                        request.add_binding(ParameterBinding::Query {
                            name: parameter.name().to_string(),
                            value,
                        });
                    }
                }
                BindingKind::Body => {
                    let type_name = argument.type_name().clone();
                    request.add_binding(ParameterBinding::Body {
                        value: Payload {
                            value: argument.into_value(),
                            type_name,
                        },
                    });
                }
            }
        }

        debug!(
            verb = %request.verb(),
            path = request.path_template(),
            bindings = request.bindings().len(),
            "request built"
        );
        Ok(request)
    }
}

/// Positions must cover `0..parameters.len()`, each exactly once.
fn check_positions(parameters: &[FormalParameter]) -> Result<(), CourierError> {
    let count = parameters.len();
    let mut seen = vec![false; count];
    for parameter in parameters {
        let position = parameter.position();
        match seen.get_mut(position) {
            Some(slot) if !*slot => *slot = true,
            _ => {
                return Err(CourierError::InvalidParameterPosition {
                    parameter: parameter.name().to_string(),
                    position,
                    count,
                });
            }
        }
    }
    Ok(())
}

/// Builds a request from a descriptor, the formal parameters and the call arguments.
///
/// This classifies the parameters on every call; register the method with
/// [`BoundMethod`](crate::BoundMethod) to do it once.
///
/// # Errors
///
/// See [`BindingTable::new`] and [`BindingTable::bind`].
pub fn build_request(
    descriptor: &MethodDescriptor,
    parameters: &[FormalParameter],
    arguments: Vec<Argument>,
) -> Result<Request, CourierError> {
    BindingTable::new(descriptor.clone(), parameters.to_vec())?.bind(arguments)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde::Serialize;

    use super::*;
    use crate::contract::{HttpVerb, TypeRef};

    #[derive(Debug, Clone, Serialize)]
    struct OrderDto {
        product: String,
        quantity: u32,
    }

    fn parameters(names: &[&str]) -> Vec<FormalParameter> {
        names
            .iter()
            .enumerate()
            .map(|(position, name)| FormalParameter::new(*name, position, TypeRef::named("T")))
            .collect()
    }

    #[rstest]
    #[case::get(HttpVerb::Get, BindingKind::Query)]
    #[case::delete(HttpVerb::Delete, BindingKind::Query)]
    #[case::post(HttpVerb::Post, BindingKind::Body)]
    #[case::put(HttpVerb::Put, BindingKind::Body)]
    fn should_bind_path_segment_and_route_others_by_verb(
        #[case] verb: HttpVerb,
        #[case] other_kind: BindingKind,
    ) {
        let descriptor = MethodDescriptor::new(verb, "/users/{id}");

        let table = BindingTable::new(descriptor, parameters(&["id", "value"])).expect("table");

        assert_eq!(table.kinds(), &[BindingKind::PathSegment, other_kind]);
    }

    #[rstest]
    #[case::get(HttpVerb::Get)]
    #[case::delete(HttpVerb::Delete)]
    #[case::post(HttpVerb::Post)]
    #[case::put(HttpVerb::Put)]
    fn should_route_each_argument_to_exactly_one_destination(#[case] verb: HttpVerb) {
        let descriptor = MethodDescriptor::new(verb, "/users/{id}");
        let table = BindingTable::new(descriptor, parameters(&["id", "name"])).expect("table");

        let request = table
            .bind(vec![
                Argument::new(&7).expect("id"),
                Argument::new("bob").expect("name"),
            ])
            .expect("request");

        assert_eq!(request.path_segments().len(), 1);
        let in_query = request.query().iter().any(|(name, _)| *name == "name");
        let in_body = request.body().is_some();
        assert!(in_query != in_body, "{verb}: query={in_query} body={in_body}");
        assert_eq!(in_body, matches!(verb, HttpVerb::Post | HttpVerb::Put));
    }

    #[test]
    fn should_build_get_user() {
        let descriptor = MethodDescriptor::new(HttpVerb::Get, "/users/{id}");
        let params = parameters(&["id"]);

        let request = build_request(&descriptor, &params, vec![
            Argument::new("0f8fad5b-d9cb-469f-a165-70867728950e").expect("id"),
        ])
        .expect("request");

        insta::assert_debug_snapshot!(request, @r#"
        Request {
            verb: Get,
            path_template: "/users/{id}",
            bindings: [
                PathSegment {
                    name: "id",
                    value: String("0f8fad5b-d9cb-469f-a165-70867728950e"),
                },
            ],
        }
        "#);
    }

    #[test]
    fn should_build_create_order() {
        let descriptor = MethodDescriptor::new(HttpVerb::Post, "/orders");
        let payload = OrderDto {
            product: "book".to_string(),
            quantity: 2,
        };

        let request = build_request(&descriptor, &parameters(&["payload"]), vec![
            Argument::new(&payload).expect("payload"),
        ])
        .expect("request");

        assert!(request.query().is_empty());
        let body = request.body().expect("a body");
        assert_eq!(
            body.value(),
            &serde_json::json!({"product": "book", "quantity": 2})
        );
        assert!(body.type_name().as_str().ends_with("OrderDto"));
    }

    #[test]
    fn should_build_search() {
        let descriptor = MethodDescriptor::new(HttpVerb::Get, "/items");

        let request = build_request(&descriptor, &parameters(&["term"]), vec![
            Argument::new("rust").expect("term"),
        ])
        .expect("request");

        assert_eq!(request.query(), vec![("term", "rust")]);
        assert!(request.body().is_none());
        assert!(request.path_segments().is_empty());
    }

    #[test]
    fn should_fail_search_with_null_term() {
        let descriptor = MethodDescriptor::new(HttpVerb::Get, "/items");

        let result = build_request(&descriptor, &parameters(&["term"]), vec![
            Argument::new(&None::<String>).expect("term"),
        ]);

        let Err(CourierError::InvalidQueryArgument {
            parameter,
            type_name,
            ..
        }) = result
        else {
            panic!("expected an invalid query argument");
        };
        assert_eq!(parameter, "term");
        assert!(type_name.contains("Option"));
    }

    #[test]
    fn should_fail_query_with_object_value() {
        let descriptor = MethodDescriptor::new(HttpVerb::Delete, "/orders");
        let payload = OrderDto {
            product: "book".to_string(),
            quantity: 1,
        };

        let result = build_request(&descriptor, &parameters(&["filter"]), vec![
            Argument::new(&payload).expect("filter"),
        ]);

        assert!(matches!(result, Err(CourierError::InvalidQueryArgument { .. })));
    }

    #[test]
    fn should_repeat_array_query_values() {
        let descriptor = MethodDescriptor::new(HttpVerb::Get, "/items");

        let request = build_request(&descriptor, &parameters(&["tag", "limit"]), vec![
            Argument::new(&["rust", "web"]).expect("tag"),
            Argument::new(&10).expect("limit"),
        ])
        .expect("request");

        assert_eq!(
            request.query(),
            vec![("tag", "rust"), ("tag", "web"), ("limit", "10")]
        );
    }

    #[test]
    fn should_fail_on_empty_array_query_value() {
        let descriptor = MethodDescriptor::new(HttpVerb::Get, "/items");

        let result = build_request(&descriptor, &parameters(&["tag"]), vec![
            Argument::new(&Vec::<String>::new()).expect("tag"),
        ]);

        assert!(matches!(
            result,
            Err(CourierError::InvalidQueryArgument { ref parameter, .. }) if parameter == "tag"
        ));
    }

    #[test]
    fn should_bind_placeholder_with_non_word_name() {
        let descriptor = MethodDescriptor::new(HttpVerb::Get, "/users/{user-id}");
        let table = BindingTable::new(descriptor, parameters(&["user-id"])).expect("table");

        let request = table
            .bind(vec![Argument::new(&42).expect("user-id")])
            .expect("request");

        assert_eq!(table.kinds(), &[BindingKind::PathSegment]);
        assert_eq!(request.resolved_path().expect("path"), "/users/42");
    }

    #[rstest]
    #[case::duplicated(0, 0)]
    #[case::out_of_range(0, 2)]
    fn should_reject_invalid_positions(#[case] first: usize, #[case] second: usize) {
        let descriptor = MethodDescriptor::new(HttpVerb::Get, "/users/{id}");
        let params = vec![
            FormalParameter::new("id", first, TypeRef::named("u64")),
            FormalParameter::new("q", second, TypeRef::named("String")),
        ];

        let result = BindingTable::new(descriptor, params);

        assert!(matches!(
            result,
            Err(CourierError::InvalidParameterPosition { ref parameter, count: 2, .. })
                if parameter == "q"
        ));
    }

    #[test]
    fn should_display_invalid_position() {
        let descriptor = MethodDescriptor::new(HttpVerb::Get, "/users");
        let params = vec![
            FormalParameter::new("id", 0, TypeRef::named("u64")),
            FormalParameter::new("q", 0, TypeRef::named("String")),
        ];

        let error = BindingTable::new(descriptor, params).expect_err("duplicated position");

        insta::assert_snapshot!(error, @"Parameter 'q' has position 0, expected a unique position below 2");
    }

    #[test]
    fn should_reject_multiple_body_parameters() {
        let descriptor = MethodDescriptor::new(HttpVerb::Put, "/users/{id}");

        let error = BindingTable::new(descriptor, parameters(&["id", "user", "address"]))
            .expect_err("two body parameters");

        insta::assert_snapshot!(error, @r#"PUT '/users/{id}' has more than one body parameter: ["user", "address"]"#);
    }

    #[test]
    fn should_allow_multiple_query_parameters() {
        let descriptor = MethodDescriptor::new(HttpVerb::Get, "/users");

        let table = BindingTable::new(descriptor, parameters(&["name", "age"])).expect("table");

        assert_eq!(table.kinds(), &[BindingKind::Query, BindingKind::Query]);
    }

    #[test]
    fn should_fail_on_argument_count_mismatch() {
        let descriptor = MethodDescriptor::new(HttpVerb::Get, "/users/{id}");
        let table = BindingTable::new(descriptor, parameters(&["id"])).expect("table");

        let result = table.bind(vec![]);

        assert!(matches!(
            result,
            Err(CourierError::ArgumentCountMismatch {
                expected: 1,
                actual: 0
            })
        ));
    }

    #[test]
    fn should_bind_by_position() {
        let descriptor = MethodDescriptor::new(HttpVerb::Get, "/users/{id}");
        let params = vec![
            FormalParameter::new("expand", 1, TypeRef::named("bool")),
            FormalParameter::new("id", 0, TypeRef::named("u64")),
        ];
        let table = BindingTable::new(descriptor, params).expect("table");

        let request = table
            .bind(vec![
                Argument::new(&42).expect("id"),
                Argument::new(&true).expect("expand"),
            ])
            .expect("request");

        assert_eq!(request.query(), vec![("expand", "true")]);
        assert_eq!(request.resolved_path().expect("path"), "/users/42");
    }

    #[test]
    fn should_keep_unmatched_placeholder_unresolved() {
        let descriptor = MethodDescriptor::new(HttpVerb::Get, "/users/{id}/{section}");
        let table = BindingTable::new(descriptor, parameters(&["id"])).expect("table");

        let request = table
            .bind(vec![Argument::new(&1).expect("id")])
            .expect("request");

        assert!(matches!(
            request.resolved_path(),
            Err(CourierError::PathUnresolved { ref missings, .. }) if missings == &["section"]
        ));
    }

    #[test]
    fn should_build_identical_requests() {
        let descriptor = MethodDescriptor::new(HttpVerb::Get, "/users/{id}");
        let params = parameters(&["id", "q"]);
        let arguments = vec![
            Argument::new(&5).expect("id"),
            Argument::new("term").expect("q"),
        ];

        let first = build_request(&descriptor, &params, arguments.clone()).expect("first");
        let second = build_request(&descriptor, &params, arguments).expect("second");

        assert_eq!(first, second);
    }
}
