//! Form method normalization

use crate::config::UnknownMethodPolicy;
use crate::error::{Error, Result};
use crate::types::Strategy;
use tracing::warn;

/// Normalize a form `method` attribute to a transport strategy.
///
/// `GET` and `POST` match case-insensitively; an empty attribute is the
/// HTML default `GET`. Anything else is decided by `policy`.
pub fn normalize_method(method: &str, policy: UnknownMethodPolicy) -> Result<Strategy> {
    let method = method.trim();

    if method.is_empty() || method.eq_ignore_ascii_case("get") {
        return Ok(Strategy::Query);
    }

    if method.eq_ignore_ascii_case("post") {
        return Ok(Strategy::Body);
    }

    match policy {
        UnknownMethodPolicy::Reject => Err(Error::UnsupportedMethod(method.to_string())),
        UnknownMethodPolicy::Post => {
            warn!(method, "unrecognized form method, submitting as POST");
            Ok(Strategy::Body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_post_any_case() {
        for m in ["get", "GET", "Get", " get "] {
            assert_eq!(
                normalize_method(m, UnknownMethodPolicy::Reject).unwrap(),
                Strategy::Query
            );
        }
        for m in ["post", "POST", "pOsT"] {
            assert_eq!(
                normalize_method(m, UnknownMethodPolicy::Reject).unwrap(),
                Strategy::Body
            );
        }
    }

    #[test]
    fn test_empty_method_is_get() {
        assert_eq!(
            normalize_method("", UnknownMethodPolicy::Reject).unwrap(),
            Strategy::Query
        );
    }

    #[test]
    fn test_unknown_method_rejected_by_default_policy() {
        let err = normalize_method("DELETE", UnknownMethodPolicy::Reject).unwrap_err();
        assert!(matches!(err, Error::UnsupportedMethod(ref m) if m == "DELETE"));
    }

    #[test]
    fn test_unknown_method_as_post() {
        assert_eq!(
            normalize_method("put", UnknownMethodPolicy::Post).unwrap(),
            Strategy::Body
        );
    }
}
