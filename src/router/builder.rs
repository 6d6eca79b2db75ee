use crate::helpers;
use crate::resource::{Resource, ResourceAction};
use crate::route::Route;
use crate::router::{ErrHandler, Router};
use crate::types::RouteParams;
use crate::{Error, RouteError};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::sync::Arc;

/// Builder for the [Router](./struct.Router.html) type.
///
/// This `RouterBuilder<B, E>` type accepts two type parameters: `B` and `E`.
///
/// * The `B` represents the request body type handed to the route handlers.
/// * The `E` represents any error type which will be used by route handlers. This error type must be convertible into a
///   boxed [std::error::Error](https://doc.rust-lang.org/std/error/trait.Error.html).
///
/// Path templates are compiled as soon as they are registered. The first registration error is kept and returned by
/// [build](#method.build), every registration after it is ignored.
///
/// # Examples
///
/// ```
/// use http_body_util::Full;
/// use hyper::{body::Bytes, Request, Response};
/// use restrouter::{RouteParams, Router, RouterBuilder};
/// use std::convert::Infallible;
///
/// async fn home_handler(_: Request<Full<Bytes>>, _: RouteParams) -> Result<Response<Full<Bytes>>, Infallible> {
///     Ok(Response::new(Full::from("home")))
/// }
///
/// # fn run() -> Router<Full<Bytes>, Infallible> {
/// // Use Router::builder() method to create a new RouterBuilder instance.
/// // We will use it to create a router for request body type `Full<Bytes>` and handler error type `Infallible`.
/// let router: Router<Full<Bytes>, Infallible> = Router::builder()
///     .get("/", home_handler)
///     .build()
///     .unwrap();
/// # router
/// # }
/// # run();
/// ```
pub struct RouterBuilder<B, E> {
    inner: crate::Result<BuilderInner<B, E>>,
}

struct BuilderInner<B, E> {
    routes: Vec<Route<B, E>>,
    err_handler: Option<ErrHandler>,
}

impl<B: Send + 'static, E: Into<RouteError> + 'static> RouterBuilder<B, E> {
    /// Creates a new `RouterBuilder` instance with default options.
    pub fn new() -> RouterBuilder<B, E> {
        RouterBuilder::default()
    }

    /// Creates a new [Router](./struct.Router.html) instance from the added configuration.
    ///
    /// Fails with the first registration error, e.g. a malformed path template or an invalid method name.
    pub fn build(self) -> crate::Result<Router<B, E>> {
        self.inner.map(|inner| {
            let mut routes: HashMap<Method, Vec<Route<B, E>>> = HashMap::new();
            for route in inner.routes {
                routes.entry(route.method.clone()).or_default().push(route);
            }

            Router {
                routes,
                err_handler: inner.err_handler,
            }
        })
    }

    fn and_then<F>(self, func: F) -> Self
    where
        F: FnOnce(BuilderInner<B, E>) -> crate::Result<BuilderInner<B, E>>,
    {
        RouterBuilder {
            inner: self.inner.and_then(func),
        }
    }
}

impl<B: Send + 'static, E: Into<RouteError> + 'static> RouterBuilder<B, E> {
    /// Adds a new route with `GET` method and the handler at the specified path.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Full;
    /// use hyper::{body::Bytes, Response};
    /// use restrouter::Router;
    /// # use std::convert::Infallible;
    ///
    /// # fn run() -> Router<Full<Bytes>, Infallible> {
    /// let router = Router::builder()
    ///     .get("/users/:id", |_req, params| async move {
    ///         Ok(Response::new(Full::from(format!("User {}", params.get("id").unwrap()))))
    ///     })
    ///     .build()
    ///     .unwrap();
    /// # router
    /// # }
    /// # run();
    /// ```
    pub fn get<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>, RouteParams) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add(Method::GET, path, handler)
    }

    /// Adds a new route with `POST` method and the handler at the specified path.
    pub fn post<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>, RouteParams) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add(Method::POST, path, handler)
    }

    /// Adds a new route with `PUT` method and the handler at the specified path.
    pub fn put<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>, RouteParams) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add(Method::PUT, path, handler)
    }

    /// Adds a new route with `DELETE` method and the handler at the specified path.
    pub fn delete<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>, RouteParams) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add(Method::DELETE, path, handler)
    }

    /// Adds a new route with `HEAD` method and the handler at the specified path.
    pub fn head<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>, RouteParams) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add(Method::HEAD, path, handler)
    }

    /// Adds a new route with `PATCH` method and the handler at the specified path.
    pub fn patch<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>, RouteParams) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add(Method::PATCH, path, handler)
    }

    /// Adds a new route with `OPTIONS` method and the handler at the specified path.
    pub fn options<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>, RouteParams) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add(Method::OPTIONS, path, handler)
    }

    /// Adds a new route for the specified method and the handler at the specified path.
    ///
    /// The method name is case-insensitive and stored in its uppercase form. Routes registered under the same method
    /// are tried in registration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Full;
    /// use hyper::{body::Bytes, Response};
    /// use restrouter::Router;
    /// # use std::convert::Infallible;
    ///
    /// # fn run() -> Router<Full<Bytes>, Infallible> {
    /// let router = Router::builder()
    ///     .add("purge", "/cache/:key", |_req, _params| async move {
    ///         Ok(Response::new(Full::from("purged")))
    ///     })
    ///     .build()
    ///     .unwrap();
    /// # router
    /// # }
    /// # run();
    /// ```
    pub fn add<M, P, H, R>(self, method: M, path: P, handler: H) -> Self
    where
        M: AsRef<str>,
        P: Into<String>,
        H: Fn(Request<B>, RouteParams) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.and_then(move |mut inner| {
            let method = helpers::canonical_method(method.as_ref())?;
            let route = Route::new(path, method, handler)?;

            if inner
                .routes
                .iter()
                .any(|r| r.method == route.method && r.path == route.path)
            {
                warn!(
                    "Route {} {} is registered more than once, only the first registration is reachable",
                    route.method, route.path
                );
            }

            debug!("Registered route {} {}", route.method, route.path);
            inner.routes.push(route);
            Ok(inner)
        })
    }

    /// Registers the eight handlers of a [Resource](./trait.Resource.html) bundle under the base path.
    ///
    /// It is the same as registering `GET` and `POST` on `path` and `GET`, `PUT`, `DELETE`, `HEAD`, `PATCH` and
    /// `OPTIONS` on `path/:id`, in that order.
    pub fn resource<P, R>(self, path: P, resource: R) -> Self
    where
        P: Into<String>,
        R: Resource<B, E>,
    {
        let path = path.into();
        let resource = Arc::new(resource);

        ResourceAction::ALL
            .iter()
            .fold(self, |builder, &(action, method, suffix)| {
                let resource = resource.clone();
                builder.add(method, format!("{}{}", path, suffix), move |req, params| {
                    let resource = resource.clone();
                    async move { action.call::<B, E, R>(resource.as_ref(), req, params).await }
                })
            })
    }

    /// Adds a handler to turn errors into responses: errors returned by the route handlers, undecodable request paths
    /// and internal routing failures.
    ///
    /// Without it the router logs the error and answers with the status of
    /// [Error::status_code](./enum.Error.html#method.status_code) and the error message as the body.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Full;
    /// use hyper::{body::Bytes, Response, StatusCode};
    /// use restrouter::{Error, Router};
    /// # use std::convert::Infallible;
    ///
    /// # fn run() -> Router<Full<Bytes>, Infallible> {
    /// let router = Router::builder()
    ///     .err_handler(|err: Error| async move {
    ///         Response::builder()
    ///             .status(err.status_code())
    ///             .body(Full::from(format!("Something went wrong: {}", err)))
    ///             .unwrap()
    ///     })
    ///     .build()
    ///     .unwrap();
    /// # router
    /// # }
    /// # run();
    /// ```
    pub fn err_handler<H, R>(self, handler: H) -> Self
    where
        H: Fn(Error) -> R + Send + Sync + 'static,
        R: Future<Output = Response<Full<Bytes>>> + Send + 'static,
    {
        let handler: ErrHandler = Box::new(move |err: Error| Box::new(handler(err)));

        self.and_then(move |mut inner| {
            inner.err_handler = Some(handler);
            Ok(inner)
        })
    }
}

impl<B, E> Default for RouterBuilder<B, E> {
    fn default() -> RouterBuilder<B, E> {
        RouterBuilder {
            inner: Ok(BuilderInner {
                routes: Vec::new(),
                err_handler: None,
            }),
        }
    }
}

impl<B, E> Debug for RouterBuilder<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.inner {
            Ok(ref inner) => write!(f, "{{ routes: {:?} }}", inner.routes),
            Err(ref err) => write!(f, "{{ error: {:?} }}", err),
        }
    }
}
