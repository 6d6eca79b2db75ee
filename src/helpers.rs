use hyper::Method;
use percent_encoding::percent_decode_str;

pub(crate) fn percent_decode_request_path(val: &str) -> Result<String, std::str::Utf8Error> {
    percent_decode_str(val).decode_utf8().map(|val| val.to_string())
}

/// Parses a method name case-insensitively, yielding its uppercase form.
pub(crate) fn canonical_method(method: &str) -> crate::Result<Method> {
    let parsed = if method.bytes().any(|b| b.is_ascii_lowercase()) {
        Method::from_bytes(method.to_ascii_uppercase().as_bytes())
    } else {
        Method::from_bytes(method.as_bytes())
    };

    parsed.map_err(|_| crate::Error::InvalidMethod(method.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_decode_request_path() {
        assert_eq!(percent_decode_request_path("/users/4%32").unwrap(), "/users/42");
        assert_eq!(percent_decode_request_path("/a%20b").unwrap(), "/a b");
        assert!(percent_decode_request_path("/%ff").is_err());
    }

    #[test]
    fn should_canonicalize_methods() {
        assert_eq!(canonical_method("get").unwrap(), Method::GET);
        assert_eq!(canonical_method("Patch").unwrap(), Method::PATCH);
        assert_eq!(canonical_method("OPTIONS").unwrap(), Method::OPTIONS);
        assert_eq!(canonical_method("purge").unwrap().as_str(), "PURGE");
        assert!(canonical_method("GE T").is_err());
        assert!(canonical_method("").is_err());
    }
}
