use crate::types::RouteParams;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::future::Future;

/// The result type every route handler resolves to.
pub type HandlerResult<E> = Result<Response<Full<Bytes>>, E>;

/// A bundle of handlers for one resource, registered in one go with
/// [RouterBuilder::resource](./struct.RouterBuilder.html#method.resource).
///
/// Given a base path `p` the bundle is mounted as follows:
///
/// | Method    | Path     | Handler    |
/// |-----------|----------|------------|
/// | `GET`     | `p`      | `list`     |
/// | `POST`    | `p`      | `create`   |
/// | `GET`     | `p/:id`  | `retrieve` |
/// | `PUT`     | `p/:id`  | `update`   |
/// | `DELETE`  | `p/:id`  | `delete`   |
/// | `HEAD`    | `p/:id`  | `head`     |
/// | `PATCH`   | `p/:id`  | `patch`    |
/// | `OPTIONS` | `p/:id`  | `options`  |
///
/// The handlers for `p/:id` find the captured id under the `"id"` key of their [RouteParams](./struct.RouteParams.html).
///
/// # Examples
///
/// ```
/// use http_body_util::Full;
/// use hyper::{body::Bytes, Request, Response, StatusCode};
/// use restrouter::{HandlerResult, Resource, RouteParams, Router};
/// use std::convert::Infallible;
///
/// struct Widgets;
///
/// fn text(s: String) -> HandlerResult<Infallible> {
///     Ok(Response::new(Full::from(s)))
/// }
///
/// impl Resource<Full<Bytes>, Infallible> for Widgets {
///     async fn list(&self, _: Request<Full<Bytes>>, _: RouteParams) -> HandlerResult<Infallible> {
///         text("all widgets".into())
///     }
///     async fn create(&self, _: Request<Full<Bytes>>, _: RouteParams) -> HandlerResult<Infallible> {
///         text("created".into())
///     }
///     async fn retrieve(&self, _: Request<Full<Bytes>>, p: RouteParams) -> HandlerResult<Infallible> {
///         text(format!("widget {}", p.get("id").unwrap()))
///     }
///     async fn update(&self, _: Request<Full<Bytes>>, p: RouteParams) -> HandlerResult<Infallible> {
///         text(format!("updated {}", p.get("id").unwrap()))
///     }
///     async fn delete(&self, _: Request<Full<Bytes>>, p: RouteParams) -> HandlerResult<Infallible> {
///         text(format!("deleted {}", p.get("id").unwrap()))
///     }
///     async fn head(&self, _: Request<Full<Bytes>>, _: RouteParams) -> HandlerResult<Infallible> {
///         text(String::new())
///     }
///     async fn patch(&self, _: Request<Full<Bytes>>, p: RouteParams) -> HandlerResult<Infallible> {
///         text(format!("patched {}", p.get("id").unwrap()))
///     }
///     async fn options(&self, _: Request<Full<Bytes>>, _: RouteParams) -> HandlerResult<Infallible> {
///         Ok(Response::builder().status(StatusCode::NO_CONTENT).body(Full::default()).unwrap())
///     }
/// }
///
/// # fn run() -> Router<Full<Bytes>, Infallible> {
/// let router = Router::builder().resource("/widgets", Widgets).build().unwrap();
/// # router
/// # }
/// # run();
/// ```
pub trait Resource<B, E>: Send + Sync + 'static {
    /// `GET p`
    fn list(&self, req: Request<B>, params: RouteParams) -> impl Future<Output = HandlerResult<E>> + Send;

    /// `POST p`
    fn create(&self, req: Request<B>, params: RouteParams) -> impl Future<Output = HandlerResult<E>> + Send;

    /// `GET p/:id`
    fn retrieve(&self, req: Request<B>, params: RouteParams) -> impl Future<Output = HandlerResult<E>> + Send;

    /// `PUT p/:id`
    fn update(&self, req: Request<B>, params: RouteParams) -> impl Future<Output = HandlerResult<E>> + Send;

    /// `DELETE p/:id`
    fn delete(&self, req: Request<B>, params: RouteParams) -> impl Future<Output = HandlerResult<E>> + Send;

    /// `HEAD p/:id`
    fn head(&self, req: Request<B>, params: RouteParams) -> impl Future<Output = HandlerResult<E>> + Send;

    /// `PATCH p/:id`
    fn patch(&self, req: Request<B>, params: RouteParams) -> impl Future<Output = HandlerResult<E>> + Send;

    /// `OPTIONS p/:id`
    fn options(&self, req: Request<B>, params: RouteParams) -> impl Future<Output = HandlerResult<E>> + Send;
}

/// Names a single callback of a [Resource](./trait.Resource.html) bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResourceAction {
    List,
    Create,
    Retrieve,
    Update,
    Delete,
    Head,
    Patch,
    Options,
}

impl ResourceAction {
    /// The fixed method/path-suffix convention, in registration order.
    pub(crate) const ALL: [(ResourceAction, &'static str, &'static str); 8] = [
        (ResourceAction::List, "GET", ""),
        (ResourceAction::Create, "POST", ""),
        (ResourceAction::Retrieve, "GET", "/:id"),
        (ResourceAction::Update, "PUT", "/:id"),
        (ResourceAction::Delete, "DELETE", "/:id"),
        (ResourceAction::Head, "HEAD", "/:id"),
        (ResourceAction::Patch, "PATCH", "/:id"),
        (ResourceAction::Options, "OPTIONS", "/:id"),
    ];

    pub(crate) async fn call<B, E, R>(self, resource: &R, req: Request<B>, params: RouteParams) -> HandlerResult<E>
    where
        R: Resource<B, E>,
    {
        match self {
            ResourceAction::List => resource.list(req, params).await,
            ResourceAction::Create => resource.create(req, params).await,
            ResourceAction::Retrieve => resource.retrieve(req, params).await,
            ResourceAction::Update => resource.update(req, params).await,
            ResourceAction::Delete => resource.delete(req, params).await,
            ResourceAction::Head => resource.head(req, params).await,
            ResourceAction::Patch => resource.patch(req, params).await,
            ResourceAction::Options => resource.options(req, params).await,
        }
    }
}
