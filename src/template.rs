//! URL template substitution
//!
//! Handles the `${param}` placeholder in URL templates and the
//! `&{name}={page}` suffix used for page-number pagination.
//!
//! Substitution is literal: parameter values are inserted as-is, without
//! percent-encoding. Callers pre-encode values when the endpoint needs it.

use crate::error::{Error, Result};

/// Placeholder token replaced by each parameter value
pub const PLACEHOLDER: &str = "${param}";

/// Substitute a parameter value into a URL template
///
/// Every occurrence of [`PLACEHOLDER`] is replaced.
pub fn substitute(template: &str, param: &str) -> String {
    template.replace(PLACEHOLDER, param)
}

/// Append a page-number query parameter to a resolved URL
///
/// The separator is always `&`: the template is expected to carry a query
/// string already.
pub fn page_url(base_url: &str, page_param: &str, page: u32) -> String {
    format!("{base_url}&{page_param}={page}")
}

/// Check if a template contains the placeholder
pub fn has_placeholder(template: &str) -> bool {
    template.contains(PLACEHOLDER)
}

/// Count placeholder occurrences in a template
pub fn placeholder_count(template: &str) -> usize {
    template.matches(PLACEHOLDER).count()
}

/// Validate a URL template
///
/// The template must be non-empty and contain the placeholder. Templates with
/// more than one placeholder are accepted; all of them are substituted.
pub fn validate(template: &str) -> Result<()> {
    if template.trim().is_empty() {
        return Err(Error::missing_field("url_template"));
    }
    if !has_placeholder(template) {
        return Err(Error::invalid_value(
            "url_template",
            format!("template must contain the {PLACEHOLDER} placeholder"),
        ));
    }
    Ok(())
}
