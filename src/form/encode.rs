//! Query-string encoding and submission target resolution

use crate::config::UnknownMethodPolicy;
use crate::error::Result;
use crate::form::{FormElement, normalize_method};
use crate::types::{FormFieldSet, Strategy, SubmissionIntent};
use url::Url;
use url::form_urlencoded::Serializer;

/// Encode fields as `application/x-www-form-urlencoded`.
///
/// Order follows extraction order and repeated names stay repeated.
pub fn encode_query(fields: &FormFieldSet) -> String {
    let mut serializer = Serializer::new(String::new());
    for field in fields {
        serializer.append_pair(&field.name, field.value.as_query_value());
    }
    serializer.finish()
}

/// Work out strategy, request URL and history query for a submitted form.
///
/// Query submissions target `?<query>` on the current location. Body
/// submissions target the form action (or `?` when it has none), resolved
/// against the current location.
pub fn resolve_intent(
    form: &FormElement,
    location: &Url,
    policy: UnknownMethodPolicy,
) -> Result<SubmissionIntent> {
    let strategy = normalize_method(&form.method, policy)?;

    match strategy {
        Strategy::Query => {
            let query = encode_query(&form.fields);
            let target = location.join(&format!("?{query}"))?;
            Ok(SubmissionIntent {
                strategy,
                target,
                query: Some(query),
            })
        }
        Strategy::Body => {
            let action = form
                .action
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .unwrap_or("?");
            let target = location.join(action)?;
            Ok(SubmissionIntent {
                strategy,
                target,
                query: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileBlob;

    fn location() -> Url {
        Url::parse("https://app.example/search/page?old=1#results").unwrap()
    }

    #[test]
    fn test_encode_query_order_and_repeats() {
        let fields = FormFieldSet::new()
            .with("b", "2")
            .with("a", "1")
            .with("b", "3");
        assert_eq!(encode_query(&fields), "b=2&a=1&b=3");
    }

    #[test]
    fn test_encode_query_escapes_like_url_search_params() {
        let fields = FormFieldSet::new().with("q", "rust & go").with("k", "a=b");
        assert_eq!(encode_query(&fields), "q=rust+%26+go&k=a%3Db");
    }

    #[test]
    fn test_encode_query_empty() {
        assert_eq!(encode_query(&FormFieldSet::new()), "");
    }

    #[test]
    fn test_get_targets_current_path() {
        let form = FormElement::new("GET").with_field("q", "x");
        let intent = resolve_intent(&form, &location(), UnknownMethodPolicy::Reject).unwrap();

        assert_eq!(intent.strategy, Strategy::Query);
        assert_eq!(intent.target.as_str(), "https://app.example/search/page?q=x");
        assert_eq!(intent.query.as_deref(), Some("q=x"));
    }

    #[test]
    fn test_get_ignores_action() {
        let form = FormElement::new("get")
            .with_action("/elsewhere")
            .with_field("q", "x");
        let intent = resolve_intent(&form, &location(), UnknownMethodPolicy::Reject).unwrap();
        assert_eq!(intent.target.path(), "/search/page");
    }

    #[test]
    fn test_get_with_file_uses_file_name() {
        let form = FormElement::new("get").with_field("doc", FileBlob::new("a.txt", "hi"));
        let intent = resolve_intent(&form, &location(), UnknownMethodPolicy::Reject).unwrap();
        assert_eq!(intent.query.as_deref(), Some("doc=a.txt"));
    }

    #[test]
    fn test_post_resolves_relative_action() {
        let form = FormElement::new("post").with_action("/api/login");
        let intent = resolve_intent(&form, &location(), UnknownMethodPolicy::Reject).unwrap();

        assert_eq!(intent.strategy, Strategy::Body);
        assert_eq!(intent.target.as_str(), "https://app.example/api/login");
        assert!(intent.query.is_none());
    }

    #[test]
    fn test_post_without_action_targets_current_path() {
        let form = FormElement::new("POST").with_action("  ");
        let intent = resolve_intent(&form, &location(), UnknownMethodPolicy::Reject).unwrap();
        assert_eq!(intent.target.path(), "/search/page");
        assert_eq!(intent.target.query(), Some(""));
    }

    #[test]
    fn test_unknown_method_propagates_error() {
        let form = FormElement::new("PATCH");
        assert!(resolve_intent(&form, &location(), UnknownMethodPolicy::Reject).is_err());
    }
}
