use crate::Error;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A parameter marker: "/:" followed by at least one ASCII word character.
    static ref PARAM_MARKER_RE: Regex = Regex::new(r"/:([A-Za-z0-9_]+)").unwrap();
}

/// Capture pattern every route parameter compiles into. Route parameters only ever match ASCII digits.
const PARAM_VALUE_PATTERN: &str = "[0-9]+";

/// Compiles a route path template such as `/users/:id/books/:bookId` into an anchored regex.
///
/// Returns the regex together with the parameter names in declaration order. Parameters compile into unnamed
/// groups, so the n-th capture group holds the value of the n-th name. Every literal piece of the template is
/// escaped, so only the `/:name` markers carry any meaning.
pub(crate) fn generate_exact_match_regex(path: &str) -> crate::Result<(Regex, Vec<String>)> {
    if !path.starts_with('/') {
        return Err(Error::invalid_path(path, "must start with '/'"));
    }

    let mut pattern = String::with_capacity(path.len() * 2 + 2);
    let mut params: Vec<String> = Vec::new();
    let mut last_end = 0;

    pattern.push('^');

    for caps in PARAM_MARKER_RE.captures_iter(path) {
        let (marker, name) = match (caps.get(0), caps.get(1)) {
            (Some(marker), Some(name)) => (marker, name.as_str()),
            _ => continue,
        };

        if params.iter().any(|p| p == name) {
            return Err(Error::invalid_path(path, format!("duplicate route parameter `{}`", name)));
        }

        pattern.push_str(&regex::escape(&path[last_end..marker.start()]));
        pattern.push_str(&format!("/({})", PARAM_VALUE_PATTERN));

        params.push(name.to_owned());
        last_end = marker.end();
    }

    pattern.push_str(&regex::escape(&path[last_end..]));
    pattern.push('$');

    let re = Regex::new(&pattern).map_err(|e| Error::invalid_path(path, e))?;

    Ok((re, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_compile_static_path() {
        let (re, params) = generate_exact_match_regex("/users").unwrap();
        assert_eq!(re.as_str(), "^/users$");
        assert!(params.is_empty());

        assert!(re.is_match("/users"));
        assert!(!re.is_match("/users/"));
        assert!(!re.is_match("/api/users"));
        assert!(!re.is_match("/usersx"));
    }

    #[test]
    fn should_compile_params_in_declaration_order() {
        let (re, params) = generate_exact_match_regex("/users/:userId/books/:book_id").unwrap();
        assert_eq!(params, vec!["userId".to_owned(), "book_id".to_owned()]);

        let caps = re.captures("/users/12/books/7").unwrap();
        assert_eq!(&caps[1], "12");
        assert_eq!(&caps[2], "7");
    }

    #[test]
    fn should_accept_param_names_starting_with_digit() {
        let (re, params) = generate_exact_match_regex("/items/:1st/parts/:2").unwrap();
        assert_eq!(params, vec!["1st".to_owned(), "2".to_owned()]);
        assert_eq!(re.as_str(), "^/items/([0-9]+)/parts/([0-9]+)$");

        let caps = re.captures("/items/5/parts/9").unwrap();
        assert_eq!(&caps[1], "5");
        assert_eq!(&caps[2], "9");
        assert!(!re.is_match("/items/first/parts/9"));
    }

    #[test]
    fn should_only_match_ascii_digits() {
        let (re, _) = generate_exact_match_regex("/users/:id").unwrap();
        assert!(re.is_match("/users/42"));
        assert!(!re.is_match("/users/abc"));
        assert!(!re.is_match("/users/4a"));
        assert!(!re.is_match("/users/"));
        assert!(!re.is_match("/users/٤٢"));
    }

    #[test]
    fn should_escape_literal_text() {
        let (re, params) = generate_exact_match_regex("/v1.0/files+/:id").unwrap();
        assert_eq!(params, vec!["id".to_owned()]);
        assert!(re.is_match("/v1.0/files+/3"));
        assert!(!re.is_match("/v1x0/files+/3"));
        assert!(!re.is_match("/v1.0/filesss/3"));
    }

    #[test]
    fn should_keep_bare_colon_literal() {
        let (re, params) = generate_exact_match_regex("/a/:/b").unwrap();
        assert!(params.is_empty());
        assert!(re.is_match("/a/:/b"));
    }

    #[test]
    fn should_reject_malformed_templates() {
        assert!(matches!(
            generate_exact_match_regex("users/:id"),
            Err(Error::InvalidPath { .. })
        ));
        assert!(matches!(
            generate_exact_match_regex("/users/:id/friends/:id"),
            Err(Error::InvalidPath { .. })
        ));
    }
}
