use crate::error::RouteError;
use crate::regex_generator::generate_exact_match_regex;
use crate::types::RouteParams;
use crate::Error;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use regex::Regex;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::pin::Pin;

pub(crate) type Handler<B, E> = Box<dyn Fn(Request<B>, RouteParams) -> HandlerReturn<E> + Send + Sync + 'static>;
pub(crate) type HandlerReturn<E> = Box<dyn Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static>;

/// Represents a single route.
///
/// A route consists of a path template, one http method and a handler. It shouldn't be created directly, use
/// [RouterBuilder](./struct.RouterBuilder.html) methods to create a route.
///
/// This `Route<B, E>` type accepts two type parameters: `B` and `E`.
///
/// * The `B` represents the request body type the handler receives. When serving over a socket it is
///   [hyper::body::Incoming](https://docs.rs/hyper/1/hyper/body/struct.Incoming.html).
/// * The `E` represents any error type which will be used by route handlers. This error type must be convertible into a
///   boxed [std::error::Error](https://doc.rust-lang.org/std/error/trait.Error.html).
///
/// # Examples
///
/// ```
/// use http_body_util::Full;
/// use hyper::{body::Bytes, Request, Response};
/// use restrouter::{RouteParams, Router};
///
/// async fn home_handler(_: Request<Full<Bytes>>, _: RouteParams) -> Result<Response<Full<Bytes>>, hyper::Error> {
///     Ok(Response::new(Full::new(Bytes::from("home"))))
/// }
///
/// fn run() -> Router<Full<Bytes>, hyper::Error> {
///     let router = Router::builder().get("/", home_handler).build().unwrap();
///     router
/// }
/// # run();
/// ```
pub struct Route<B, E> {
    pub(crate) path: String,
    pub(crate) regex: Regex,
    route_params: Vec<String>,
    handler: Handler<B, E>,
    pub(crate) method: Method,
}

impl<B, E: Into<RouteError> + 'static> Route<B, E> {
    pub(crate) fn new_with_boxed_handler<P: Into<String>>(
        path: P,
        method: Method,
        handler: Handler<B, E>,
    ) -> crate::Result<Route<B, E>> {
        let path = path.into();
        let (re, params) = generate_exact_match_regex(path.as_str())?;

        Ok(Route {
            path,
            regex: re,
            route_params: params,
            handler,
            method,
        })
    }

    pub(crate) fn new<P, H, R>(path: P, method: Method, handler: H) -> crate::Result<Route<B, E>>
    where
        P: Into<String>,
        H: Fn(Request<B>, RouteParams) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        let handler: Handler<B, E> = Box::new(move |req, params| Box::new(handler(req, params)));
        Route::new_with_boxed_handler(path, method, handler)
    }

    /// The path template the route was registered with.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The canonical (uppercase) method the route was registered under.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The declared parameter names, in the order they appear in the path template.
    pub fn param_names(&self) -> &[String] {
        &self.route_params
    }

    pub(crate) fn is_match(&self, target_path: &str) -> bool {
        self.regex.is_match(target_path)
    }

    /// Binds the captured parameter values of a matching path to their declared names.
    ///
    /// Every declared parameter must yield exactly one value, anything else is reported as
    /// [`Error::ParamMismatch`](./enum.Error.html#variant.ParamMismatch).
    pub(crate) fn extract_params(&self, target_path: &str) -> crate::Result<RouteParams> {
        let declared = self.route_params.len();

        let values: Vec<&str> = match self.regex.captures(target_path) {
            // Skip the first group because it's the whole path.
            Some(caps) => caps.iter().skip(1).flatten().map(|m| m.as_str()).collect(),
            None => Vec::new(),
        };

        if values.len() != declared {
            return Err(Error::ParamMismatch {
                path: self.path.clone(),
                declared,
                captured: values.len(),
            });
        }

        let mut route_params = RouteParams::with_capacity(declared);
        for (name, val) in self.route_params.iter().zip(values) {
            route_params.set(name.clone(), val);
        }

        Ok(route_params)
    }

    pub(crate) async fn process(&self, req: Request<B>, params: RouteParams) -> Result<Response<Full<Bytes>>, RouteError> {
        Pin::from((self.handler)(req, params)).await.map_err(Into::into)
    }
}

impl<B, E> Debug for Route<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ path: {:?}, regex: {:?}, route_params: {:?}, method: {:?} }}",
            self.path, self.regex, self.route_params, self.method
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn route(path: &str) -> Route<(), Infallible> {
        Route::new(path, Method::GET, |_: Request<()>, _: RouteParams| async move {
            Ok::<_, Infallible>(Response::new(Full::new(Bytes::new())))
        })
        .unwrap()
    }

    #[test]
    fn should_extract_params_in_order() {
        let route = route("/users/:userId/books/:bookId");
        assert_eq!(route.param_names(), ["userId".to_owned(), "bookId".to_owned()]);
        assert!(route.is_match("/users/3/books/14"));

        let params = route.extract_params("/users/3/books/14").unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("userId").map(String::as_str), Some("3"));
        assert_eq!(params.get("bookId").map(String::as_str), Some("14"));
    }

    #[test]
    fn should_extract_no_params_for_static_route() {
        let route = route("/users");
        assert!(route.extract_params("/users").unwrap().is_empty());
    }

    #[test]
    fn should_report_param_mismatch() {
        let mut route = route("/users/:id");
        // A regex without the capture group the compiler would have generated.
        route.regex = Regex::new("^/users/[0-9]+$").unwrap();

        assert!(route.is_match("/users/1"));
        match route.extract_params("/users/1") {
            Err(Error::ParamMismatch { declared, captured, .. }) => {
                assert_eq!(declared, 1);
                assert_eq!(captured, 0);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
