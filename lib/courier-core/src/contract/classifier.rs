use std::sync::LazyLock;

use regex::Regex;

use super::{FormalParameter, MethodContract};

/// Regular expression for matching path placeholders in the format `{name}`.
///
/// Any name without braces is accepted, as path-segment parameters are matched
/// on the literal `{name}` text.
static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>[^{}]+)}").expect("a valid regex"));

/// Whether the literal `{name}` placeholder of the parameter occurs in the template.
pub(crate) fn is_path_segment(parameter: &FormalParameter, path_template: &str) -> bool {
    let placeholder = ["{", parameter.name(), "}"].concat();
    path_template.contains(&placeholder)
}

/// Returns the formal parameters bound to a `{name}` placeholder of the template.
///
/// Matching is exact on the parameter name: `{id}` does not match `user_id`.
pub fn classify_path_segments<'c>(
    contract: &'c MethodContract,
    path_template: &str,
) -> Vec<&'c FormalParameter> {
    contract
        .parameters()
        .iter()
        .filter(|parameter| is_path_segment(parameter, path_template))
        .collect()
}

/// Returns the formal parameters not bound to the path, in declaration order.
pub fn classify_others<'c>(
    contract: &'c MethodContract,
    path_template: &str,
) -> Vec<&'c FormalParameter> {
    let path_segments = classify_path_segments(contract, path_template);
    contract
        .parameters()
        .iter()
        .filter(|parameter| !path_segments.contains(parameter))
        .collect()
}

/// Lists the placeholder names of a path template, in order of appearance.
///
/// A placeholder used several times is listed once.
pub fn placeholders(path_template: &str) -> Vec<&str> {
    let mut result = Vec::new();
    for name in RE
        .captures_iter(path_template)
        .filter_map(|caps| caps.name("name"))
        .map(|found| found.as_str())
    {
        if !result.contains(&name) {
            result.push(name);
        }
    }
    result
}
