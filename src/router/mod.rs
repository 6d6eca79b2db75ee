use crate::helpers;
use crate::route::Route;
use crate::types::RouteParams;
use crate::Error;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use log::{debug, error};
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::pin::Pin;

pub use self::builder::RouterBuilder;

mod builder;

pub(crate) type ErrHandler = Box<dyn Fn(Error) -> ErrHandlerReturn + Send + Sync + 'static>;
pub(crate) type ErrHandlerReturn = Box<dyn Future<Output = Response<Full<Bytes>>> + Send + 'static>;

/// Represents a modular, lightweight request router.
///
/// The router keeps, for every http method, the routes registered under that method in registration order.
/// A request is dispatched to the first route of its method whose path template matches the request path, and
/// no other route is tried afterwards, so registration order matters when templates overlap.
///
/// A router is built once with [RouterBuilder](./struct.RouterBuilder.html) and is read-only afterwards, so it can be
/// shared between connections behind an `Arc` without any locking.
///
/// This `Router<B, E>` type accepts two type parameters: `B` and `E`.
///
/// * The `B` represents the request body type handed to the route handlers.
/// * The `E` represents any error type which will be used by route handlers. This error type must be convertible into a
///   boxed [std::error::Error](https://doc.rust-lang.org/std/error/trait.Error.html).
///
/// # Examples
///
/// ```
/// use http_body_util::Full;
/// use hyper::{body::Bytes, Request, Response};
/// use restrouter::{RouteParams, Router};
/// use std::convert::Infallible;
///
/// async fn home_handler(_: Request<Full<Bytes>>, _: RouteParams) -> Result<Response<Full<Bytes>>, Infallible> {
///     Ok(Response::new(Full::from("Home page")))
/// }
///
/// async fn user_handler(_: Request<Full<Bytes>>, params: RouteParams) -> Result<Response<Full<Bytes>>, Infallible> {
///     Ok(Response::new(Full::from(format!("User {}", params.get("id").unwrap()))))
/// }
///
/// # fn run() -> Router<Full<Bytes>, Infallible> {
/// let router = Router::builder()
///     .get("/", home_handler)
///     .get("/users/:id", user_handler)
///     .build()
///     .unwrap();
/// # router
/// # }
/// # run();
/// ```
pub struct Router<B, E> {
    pub(crate) routes: HashMap<Method, Vec<Route<B, E>>>,
    pub(crate) err_handler: Option<ErrHandler>,
}

/// A successful route lookup: the route which matched and the parameters it captured.
pub struct Match<'a, B, E> {
    route: &'a Route<B, E>,
    params: RouteParams,
}

impl<'a, B, E> Match<'a, B, E> {
    /// The matched route.
    pub fn route(&self) -> &'a Route<B, E> {
        self.route
    }

    /// The parameters captured from the request path.
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// Consumes the match, returning the captured parameters.
    pub fn into_params(self) -> RouteParams {
        self.params
    }
}

impl<B, E> Debug for Match<'_, B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{ route: {:?}, params: {:?} }}", self.route, self.params)
    }
}

impl<B: Send + 'static, E: Into<crate::RouteError> + 'static> Router<B, E> {
    /// Return a [RouterBuilder](./struct.RouterBuilder.html) instance to build a `Router`.
    pub fn builder() -> RouterBuilder<B, E> {
        RouterBuilder::new()
    }

    /// Returns the routes registered for `method` in registration order.
    ///
    /// The method name is matched case-insensitively. An empty slice is returned for a method without any routes.
    pub fn routes_for(&self, method: &str) -> &[Route<B, E>] {
        helpers::canonical_method(method)
            .ok()
            .and_then(|method| self.routes.get(&method))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Finds the first route registered for `method` whose template matches `target_path`.
    ///
    /// Returns `Ok(None)` if nothing matches. The only error is
    /// [Error::ParamMismatch](./enum.Error.html#variant.ParamMismatch), raised when a matching route doesn't capture
    /// exactly one value per declared parameter.
    pub fn lookup(&self, method: &str, target_path: &str) -> crate::Result<Option<Match<'_, B, E>>> {
        let route = match self.routes_for(method).iter().find(|route| route.is_match(target_path)) {
            Some(route) => route,
            None => return Ok(None),
        };

        let params = route.extract_params(target_path)?;

        Ok(Some(Match { route, params }))
    }

    /// Dispatches a request to the handler of the first matching route and returns its response.
    ///
    /// The request path is percent-decoded before matching. A request which matches no route gets an empty
    /// `404 Not Found` response and no handler is invoked. Any failure while processing the request is contained
    /// to it and turned into a response by the error handler.
    pub async fn dispatch(&self, req: Request<B>) -> Response<Full<Bytes>> {
        let target_path = match helpers::percent_decode_request_path(req.uri().path()) {
            Ok(path) => path,
            Err(err) => return self.handle_error(Error::PathDecode(err)).await,
        };

        let matched = match self.lookup(req.method().as_str(), target_path.as_str()) {
            Ok(Some(matched)) => matched,
            Ok(None) => {
                debug!("No route matched {} {}", req.method(), target_path);
                return not_found_response();
            }
            Err(err) => return self.handle_error(err).await,
        };

        let route = matched.route();
        debug!("{} {} matched route {}", req.method(), target_path, route.path());

        match route.process(req, matched.into_params()).await {
            Ok(resp) => resp,
            Err(err) => self.handle_error(Error::Handler(err)).await,
        }
    }

    async fn handle_error(&self, err: Error) -> Response<Full<Bytes>> {
        match self.err_handler {
            Some(ref err_handler) => Pin::from(err_handler(err)).await,
            None => default_error_response(err),
        }
    }
}

fn not_found_response() -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::new()));
    *resp.status_mut() = StatusCode::NOT_FOUND;
    resp
}

fn default_error_response(err: Error) -> Response<Full<Bytes>> {
    error!("{}", err);

    let mut resp = Response::new(Full::new(Bytes::from(err.to_string())));
    *resp.status_mut() = err.status_code();
    resp
}

impl<B, E> Debug for Router<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ routes: {:?}, err_handler: {:?} }}",
            self.routes,
            self.err_handler.is_some()
        )
    }
}
