use std::collections::HashMap;

/// Represents a map of the route parameters using the name of the parameter specified in the path as their respective keys.
///
/// A fresh `RouteParams` is created for every matched request and handed to the route handler. Please refer to the
/// [Route Parameters](./index.html#route-parameters) section for more info.
///
/// **Note:** This type shouldn't be created directly. It will be populated by the router when a route matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    /// Creates an empty route parameters map.
    pub fn new() -> RouteParams {
        RouteParams(HashMap::new())
    }

    /// Creates an empty route parameters map with the specified capacity.
    pub fn with_capacity(capacity: usize) -> RouteParams {
        RouteParams(HashMap::with_capacity(capacity))
    }

    /// Sets a new parameter entry with the specified key and the value.
    pub fn set<N: Into<String>, V: Into<String>>(&mut self, param_name: N, param_val: V) {
        self.0.insert(param_name.into(), param_val.into());
    }

    /// Returns the route parameter value mapped with the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Full;
    /// use hyper::{body::Bytes, Request, Response};
    /// use restrouter::{RouteParams, Router};
    /// use std::convert::Infallible;
    ///
    /// async fn user_handler(_: Request<Full<Bytes>>, params: RouteParams) -> Result<Response<Full<Bytes>>, Infallible> {
    ///     let user_id = params.get("userId").unwrap();
    ///     Ok(Response::new(Full::from(format!("User: {}", user_id))))
    /// }
    ///
    /// # fn run() -> Router<Full<Bytes>, Infallible> {
    /// let router = Router::builder().get("/users/:userId", user_handler).build().unwrap();
    /// # router
    /// # }
    /// # run();
    /// ```
    pub fn get<N: AsRef<str>>(&self, param_name: N) -> Option<&String> {
        self.0.get(param_name.as_ref())
    }

    /// Checks if a route parameter exists.
    pub fn has<N: AsRef<str>>(&self, param_name: N) -> bool {
        self.0.contains_key(param_name.as_ref())
    }

    /// Returns the length of the route parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameters were captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an [Iterator](https://doc.rust-lang.org/std/collections/hash_map/struct.Iter.html) over the parameter entries
    /// as `(parameter_name: &String, parameter_value: &String)`.
    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a RouteParams {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for RouteParams {
    type Item = (String, String);
    type IntoIter = std::collections::hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = RouteParams::new();
        for (name, val) in iter {
            params.set(name, val);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_set_and_get_params() {
        let mut params = RouteParams::with_capacity(2);
        assert!(params.is_empty());

        params.set("id", "42");
        params.set("bookId".to_owned(), "7".to_owned());

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("id"), Some(&"42".to_owned()));
        assert!(params.has("bookId"));
        assert!(!params.has("userId"));
        assert_eq!(params.get("userId"), None);
    }

    #[test]
    fn should_collect_from_pairs() {
        let params: RouteParams = vec![("id", "1"), ("id", "2")].into_iter().collect();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("id").map(String::as_str), Some("2"));
    }
}
