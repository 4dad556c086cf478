use super::{HttpMarker, HttpVerb, MethodContract};
use crate::CourierError;

const EXPECTED_MARKER: &str = "an HTTP verb marker (get, post, put or delete)";

/// The verb and path template of a method contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    verb: HttpVerb,
    path_template: String,
}

impl MethodDescriptor {
    /// Creates a descriptor.
    pub fn new(verb: HttpVerb, path_template: impl Into<String>) -> Self {
        Self {
            verb,
            path_template: path_template.into(),
        }
    }

    /// The resolved verb.
    pub fn verb(&self) -> HttpVerb {
        self.verb
    }

    /// The path template, e.g. `/users/{id}`.
    pub fn path_template(&self) -> &str {
        &self.path_template
    }
}

/// Resolves the descriptor of a method contract from its single HTTP verb marker.
///
/// # Errors
///
/// - [`CourierError::MissingVerbMarker`] if the contract has no HTTP marker
/// - [`CourierError::ConflictingMarker`] if it has more than one
/// - [`CourierError::UnsupportedVerb`] if the marker verb is not `GET`, `POST`, `PUT` or `DELETE`
pub fn resolve(contract: &MethodContract) -> Result<MethodDescriptor, CourierError> {
    let markers: Vec<&HttpMarker> = contract
        .markers()
        .iter()
        .filter_map(|marker| marker.as_http())
        .collect();

    let marker = match markers.as_slice() {
        [] => {
            return Err(CourierError::MissingVerbMarker {
                method: contract.name().to_string(),
                expected: EXPECTED_MARKER,
            });
        }
        [marker] => *marker,
        _ => {
            return Err(CourierError::ConflictingMarker {
                method: contract.name().to_string(),
                markers: markers
                    .iter()
                    .map(|marker| format!("{} {}", marker.method(), marker.path_template()))
                    .collect(),
            });
        }
    };

    let verb =
        HttpVerb::from_method(marker.method()).ok_or_else(|| CourierError::UnsupportedVerb {
            method: contract.name().to_string(),
            verb: marker.method().clone(),
        })?;

    Ok(MethodDescriptor::new(verb, marker.path_template()))
}
