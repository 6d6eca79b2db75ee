//! `restrouter` is a small request router for the Rust HTTP library [hyper](https://hyper.rs/): it maps a request
//! method and path to a registered handler and binds the numeric route parameters of the path.
//!
//! Its core features:
//!
//! - Route paths with named numeric parameters, e.g. `/users/:id`, compiled once at startup
//!
//! - Deterministic first-match-wins dispatch in registration order
//!
//! - Resource-style registration of the eight CRUD routes of a path in one call
//!
//! - Contained error handling: a failing request never affects another one
//!
//! - A ready to use [`Server`](./struct.Server.html) on top of [hyper-util](https://docs.rs/hyper-util)
//!
//! ## Basic Example
//!
//! A simple example using `restrouter` would look like the following:
//!
//! ```no_run
//! use http_body_util::Full;
//! use hyper::body::{Bytes, Incoming};
//! use hyper::{Request, Response};
//! use restrouter::{RouteParams, Router};
//! use std::convert::Infallible;
//! use std::net::SocketAddr;
//!
//! // A handler for "/" page.
//! async fn home_handler(_: Request<Incoming>, _: RouteParams) -> Result<Response<Full<Bytes>>, Infallible> {
//!     Ok(Response::new(Full::from("Home page")))
//! }
//!
//! // A handler for "/users/:userId" page.
//! async fn user_handler(_: Request<Incoming>, params: RouteParams) -> Result<Response<Full<Bytes>>, Infallible> {
//!     let user_id = params.get("userId").unwrap();
//!     Ok(Response::new(Full::from(format!("Hello {}", user_id))))
//! }
//!
//! // Create a `Router<Incoming, Infallible>` for request body type `Incoming`
//! // and for handler error type `Infallible`.
//! fn router() -> Router<Incoming, Infallible> {
//!     Router::builder()
//!         .get("/", home_handler)
//!         .get("/users/:userId", user_handler)
//!         .build()
//!         .unwrap()
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), restrouter::Error> {
//!     // The address on which the server will be listening.
//!     let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
//!
//!     restrouter::serve(addr, router()).await
//! }
//! ```
//!
//! ## Routing
//!
//! ### Route Handlers
//!
//! A handler is a function or a closure taking the request and the [route parameters](./struct.RouteParams.html)
//! captured from its path and returning a future of the response.
//!
//! ```
//! use http_body_util::Full;
//! use hyper::{body::Bytes, Response};
//! use restrouter::Router;
//! # use std::convert::Infallible;
//!
//! # fn run() -> Router<Full<Bytes>, Infallible> {
//! let router = Router::builder()
//!     .get("/about", |_req, _params| async move { Ok(Response::new(Full::from("About page"))) })
//!     .build()
//!     .unwrap();
//! # router
//! # }
//! # run();
//! ```
//!
//! ### Route Paths
//!
//! A route path is matched against the whole (percent-decoded) request path. Everything in it is literal text except
//! the `/:name` parameter markers. The query string plays no part in routing.
//!
//! Routes are kept per method in the order they were registered, and a request is handed to the first one which
//! matches. Overlapping routes are allowed, so the more specific one must be registered first:
//!
//! ```
//! use http_body_util::Full;
//! use hyper::{body::Bytes, Response};
//! use restrouter::Router;
//! # use std::convert::Infallible;
//!
//! # fn run() -> Router<Full<Bytes>, Infallible> {
//! let router = Router::builder()
//!     // "/users/0" always lands here ...
//!     .get("/users/0", |_, _| async move { Ok(Response::new(Full::from("root user"))) })
//!     // ... and never here.
//!     .get("/users/:id", |_, _| async move { Ok(Response::new(Full::from("some user"))) })
//!     .build()
//!     .unwrap();
//! # router
//! # }
//! # run();
//! ```
//!
//! A request which matches no route, either because nothing is registered for its method or because none of the
//! method's paths match, is answered with an empty `404 Not Found` and no handler runs.
//!
//! ### Route Parameters
//!
//! Route parameters are named URL segments that capture the value at their position in the URL. A parameter only ever
//! matches one or more ASCII digits.
//!
//! ```txt
//! Route path: /users/:userId/books/:bookId
//! Request URL: http://localhost:3000/users/12/books/7
//! params: { "userId": "12", "bookId": "7" }
//!
//! Request URL: http://localhost:3000/users/alice/books/7
//! 404 Not Found
//! ```
//!
//! ### Resources
//!
//! A [Resource](./trait.Resource.html) bundles the handlers of a REST resource, and
//! [RouterBuilder::resource](./struct.RouterBuilder.html#method.resource) mounts all of them under a base path:
//! `GET` and `POST` on the path itself and `GET`, `PUT`, `DELETE`, `HEAD`, `PATCH` and `OPTIONS` on `path/:id`.
//!
//! ## Error Handling
//!
//! Registration errors, i.e. a malformed route path or an invalid method name, are returned by
//! [RouterBuilder::build](./struct.RouterBuilder.html#method.build) and should stop the application from starting.
//!
//! Errors which happen while handling a request, a handler returning `Err` included, are passed to the error handler
//! and answered with its response. The default one logs the error and responds with the status from
//! [Error::status_code](./enum.Error.html#method.status_code):
//!
//! ```
//! use http_body_util::Full;
//! use hyper::{body::Bytes, Response, StatusCode};
//! use restrouter::{Error, Router};
//! use std::io;
//!
//! # fn run() -> Router<Full<Bytes>, io::Error> {
//! let router = Router::builder()
//!     .get("/", |_, _| async move { Err(io::Error::new(io::ErrorKind::Other, "Something went wrong!")) })
//!     .err_handler(|err: Error| async move {
//!         Response::builder()
//!             .status(StatusCode::INTERNAL_SERVER_ERROR)
//!             .body(Full::from(format!("Something went wrong: {}", err)))
//!             .unwrap()
//!     })
//!     .build()
//!     .unwrap();
//! # router
//! # }
//! # run();
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [log](https://docs.rs/log) facade: every served request at `info` level, routing
//! decisions at `debug` level and contained request failures at `error` level.

pub use self::error::{Error, RouteError};
pub use self::resource::{HandlerResult, Resource};
pub use self::route::Route;
pub use self::router::{Match, Router, RouterBuilder};
pub use self::server::{serve, Server, ServerConfig, ADDR_ENV_VAR};
#[doc(hidden)]
pub use self::service::RequestService;
pub use self::service::RequestServiceBuilder;
pub use self::service::RouterService;
pub use self::types::RouteParams;

mod error;
mod helpers;
mod regex_generator;
mod resource;
mod route;
mod router;
mod server;
mod service;
mod types;

/// A Result type often returned from methods that can have restrouter errors.
pub type Result<T> = std::result::Result<T, Error>;
