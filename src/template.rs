//! Endpoint path templates
//!
//! Resource endpoints are declared as `/projects/{{ project_id }}/repository/branches`.
//! Values are sanitized before substitution so each one stays a single path
//! segment.

use crate::error::{Error, Result};
use crate::sanitize::sanitize;
use crate::types::{value_to_string, JsonObject};
use regex::Regex;
use std::sync::LazyLock;

/// Regex for matching template variables: {{ variable }}
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*\}\}").expect("template regex is valid")
});

/// Render a path template with the given parameters
///
/// Every variable must be present in `params`; the missing names are
/// reported together.
pub fn render(template: &str, params: &JsonObject) -> Result<String> {
    let mut missing = Vec::new();

    let rendered = TEMPLATE_REGEX.replace_all(template, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        match params.get(name) {
            Some(value) if !value.is_null() => value_to_string(&sanitize(value)),
            _ => {
                missing.push(name.to_string());
                String::new()
            }
        }
    });

    if missing.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(Error::missing(&missing))
    }
}

/// Extract all variable names from a template
pub fn extract_variables(template: &str) -> Vec<String> {
    TEMPLATE_REGEX
        .captures_iter(template)
        .map(|cap| cap[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_render_simple() {
        let out = render(
            "/projects/{{ project_id }}/repository/branches",
            &params(json!({"project_id": 1})),
        )
        .unwrap();
        assert_eq!(out, "/projects/1/repository/branches");
    }

    #[test]
    fn test_render_without_spaces() {
        let out = render("/projects/user/{{user_id}}", &params(json!({"user_id": "2"}))).unwrap();
        assert_eq!(out, "/projects/user/2");
    }

    #[test]
    fn test_render_sanitizes_values() {
        let out = render(
            "/projects/{{ project_id }}",
            &params(json!({"project_id": "group/project"})),
        )
        .unwrap();
        assert_eq!(out, "/projects/group%2Fproject");
    }

    #[test]
    fn test_render_missing_variables() {
        let err = render(
            "/projects/{{ project_id }}/hooks/{{ hook_id }}",
            &params(json!({"hook_id": null})),
        )
        .unwrap_err();
        match err {
            Error::MissingParameter { names } => assert_eq!(names, "project_id, hook_id"),
            other => panic!("Expected MissingParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_no_templates() {
        assert_eq!(render("/projects", &JsonObject::new()).unwrap(), "/projects");
    }

    #[test]
    fn test_extract_variables() {
        let vars = extract_variables("/projects/{{ project_id }}/merge_requests/{{ mr_id }}/notes");
        assert_eq!(vars, vec!["project_id", "mr_id"]);
    }
}
